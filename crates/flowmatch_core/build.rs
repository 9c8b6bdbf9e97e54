use std::env;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Field key tokens and the `FieldKey` variant each one maps to. `reg<N>` is parsed apart.
const FIELDS: &[(&str, &str)] = &[
    ("dl_src", "FieldKey::DlSrc"),
    ("dl_dst", "FieldKey::DlDst"),
    ("dl_type", "FieldKey::DlType"),
    ("dl_vlan", "FieldKey::DlVlan"),
    ("vlan_tci", "FieldKey::VlanTci"),
    ("nw_src", "FieldKey::NwSrc"),
    ("nw_dst", "FieldKey::NwDst"),
    ("nw_proto", "FieldKey::NwProto"),
    ("ipv6_src", "FieldKey::Ipv6Src"),
    ("ipv6_dst", "FieldKey::Ipv6Dst"),
    ("icmp_type", "FieldKey::IcmpType"),
    ("nd_target", "FieldKey::NdTarget"),
    ("nd_sll", "FieldKey::NdSll"),
    ("nd_tll", "FieldKey::NdTll"),
    ("arp_sha", "FieldKey::ArpSha"),
    ("arp_tha", "FieldKey::ArpTha"),
    ("arp_spa", "FieldKey::ArpSpa"),
    ("arp_tpa", "FieldKey::ArpTpa"),
    ("tp_src", "FieldKey::TpSrc"),
    ("tp_dst", "FieldKey::TpDst"),
    ("ct_state", "FieldKey::CtState"),
    ("ct_mark", "FieldKey::CtMark"),
    ("ct_zone", "FieldKey::CtZone"),
    ("tcp_flags", "FieldKey::TcpFlags"),
    ("tun_id", "FieldKey::TunId"),
    ("conj_id", "FieldKey::ConjId"),
];

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let path = Path::new(&env::var("OUT_DIR").unwrap()).join("codegen.rs");
    let mut file = BufWriter::new(File::create(&path).unwrap());
    let mut m: phf_codegen::OrderedMap<&'static str> = phf_codegen::OrderedMap::new();
    for &(token, key) in FIELDS {
        m.entry(token, key);
    }

    write!(
        &mut file,
        "pub static FIELD_MAP: phf::OrderedMap<&'static str, FieldKey> = {}",
        m.build()
    )
    .unwrap();
    writeln!(&mut file, ";\n").unwrap();
}
