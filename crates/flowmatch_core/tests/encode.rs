use flowmatch_core::prelude::*;
use fxhash::FxHashSet;
use proptest::prelude::*;

fn clause(values: &[MatchValue]) -> Result<String, MatchError> {
    let mut tokens = vec![];
    for v in values {
        let token = v.encode()?;
        if !token.is_empty() {
            tokens.push(token);
        }
    }
    Ok(tokens.join(","))
}

#[test]
fn source_port_range_tokens() {
    let tokens: Vec<String> = TransportPortRange::source(1, 6)
        .masked_ports()
        .unwrap()
        .iter()
        .map(|m| m.encode().unwrap())
        .collect();
    assert_eq!(
        tokens,
        [
            "tp_src=1",
            "tp_src=0x0002/0x0001",
            "tp_src=0x0004/0x0001",
            "tp_src=6"
        ]
    );
}

#[test]
fn short_ethernet_address_is_rejected() {
    let err = MatchValue::data_link_destination("de:ad:be:ef:00")
        .encode()
        .unwrap_err();
    assert_eq!(
        err,
        MatchError::Format(FormatError::HardwareAddrLength {
            part: AddrPart::Address,
            expected: ETHERNET_ADDR_LEN,
            actual: 5
        })
    );
    let msg = err.to_string();
    assert!(msg.contains('6') && msg.contains('5'), "{}", msg);
}

#[test]
fn ipv6_literal_in_ipv4_field_is_rejected() {
    assert!(matches!(
        MatchValue::network_source("::1").encode(),
        Err(MatchError::Format(FormatError::NotIpv4 { .. }))
    ));
    assert_eq!(
        MatchValue::network_source("10.0.0.0/24").encode().unwrap(),
        "nw_src=10.0.0.0/24"
    );
}

#[test]
fn vlan_sentinel_and_domain() {
    assert_eq!(
        MatchValue::data_link_vlan(VLAN_NONE).encode().unwrap(),
        "dl_vlan=0xffff"
    );
    assert_eq!(
        MatchValue::data_link_vlan(VLAN_VID_MAX + 1).encode(),
        Err(MatchError::Range(RangeError::VlanId { vid: 4096 }))
    );
}

#[test]
fn unconstrained_register_is_left_out() {
    let values = [
        MatchValue::data_link_type(0x0800),
        MatchValue::network_protocol(6),
        MatchValue::register(0, 0xdead, 0),
        MatchValue::register(1, 0, u32::MAX),
        MatchValue::connection_tracking_state([CtState::Tracked.set(), CtState::Established.set()]),
        MatchValue::transport_destination_port(443),
    ];
    assert_eq!(
        clause(&values).unwrap(),
        "dl_type=0x0800,nw_proto=6,reg1=0,ct_state=+trk+est,tp_dst=443"
    );
}

#[test]
fn first_invalid_value_fails_the_clause() {
    let values = [
        MatchValue::network_destination("192.168.0.1"),
        MatchValue::ipv6_source("::ffff:10.0.0.1"),
        MatchValue::data_link_vlan(5000),
    ];
    assert!(matches!(
        clause(&values),
        Err(MatchError::Format(FormatError::NotIpv6 { .. }))
    ));
}

#[test]
fn every_fixed_key_has_a_value() {
    let values = [
        MatchValue::data_link_source("00:11:22:33:44:55"),
        MatchValue::data_link_destination("00:11:22:33:44:55"),
        MatchValue::data_link_type(0x86dd),
        MatchValue::data_link_vlan(1),
        MatchValue::vlan_tci(0, 0x1000),
        MatchValue::network_source("10.0.0.1"),
        MatchValue::network_destination("10.0.0.2"),
        MatchValue::network_protocol(58),
        MatchValue::ipv6_source("fe80::1"),
        MatchValue::ipv6_destination("fe80::2"),
        MatchValue::icmp_type(135),
        MatchValue::neighbor_discovery_target("fe80::3"),
        MatchValue::neighbor_discovery_source_link_layer([0, 1, 2, 3, 4, 5]),
        MatchValue::neighbor_discovery_target_link_layer([0, 1, 2, 3, 4, 5]),
        MatchValue::arp_source_hardware_address([0, 1, 2, 3, 4, 5]),
        MatchValue::arp_target_hardware_address([0, 1, 2, 3, 4, 5]),
        MatchValue::arp_source_protocol_address("10.0.0.3"),
        MatchValue::arp_target_protocol_address("10.0.0.4"),
        MatchValue::transport_source_port(1),
        MatchValue::transport_destination_port(2),
        MatchValue::connection_tracking_state([CtState::New.set()]),
        MatchValue::connection_tracking_mark(1, 0),
        MatchValue::connection_tracking_zone(1),
        MatchValue::tcp_flags([TcpFlag::Fin.set()]),
        MatchValue::tunnel_id(1),
        MatchValue::conjunction_id(1),
    ];
    let keys: FxHashSet<FieldKey> = values.iter().map(|v| v.field_key()).collect();
    let fixed: FxHashSet<FieldKey> = FIELD_MAP.values().copied().collect();
    assert_eq!(keys, fixed);

    for v in &values {
        let token = v.encode().unwrap();
        let (key, _) = token.split_once('=').unwrap();
        assert_eq!(key.parse::<FieldKey>().unwrap(), v.field_key(), "{}", token);
    }
}

#[test]
fn describe_names_the_constructor() {
    let cases = [
        (
            MatchValue::transport_source_masked_port(0x2, 0x1),
            "MatchValue::transport_source_masked_port(0x2, 0x1)",
        ),
        (
            MatchValue::connection_tracking_state([CtState::Tracked.set(), CtState::New.unset()]),
            r#"MatchValue::connection_tracking_state(["+trk", "-new"])"#,
        ),
        (
            MatchValue::register(2, 0x1, 0xff),
            "MatchValue::register(2, 0x1, 0xff)",
        ),
        (
            MatchValue::data_link_vlan(VLAN_NONE),
            "MatchValue::data_link_vlan(VLAN_NONE)",
        ),
    ];
    for (value, want) in cases {
        assert_eq!(value.describe(), want);
    }
}

proptest! {
    #[test]
    fn masked_ports_cover_the_range(a in any::<u16>(), b in any::<u16>()) {
        let (start, end) = (a.min(b), a.max(b));
        let ports = TransportPortRange::destination(start, end).masked_ports().unwrap();
        prop_assert!(ports.len() <= 32);

        let mut next = u32::from(start);
        for m in &ports {
            let token = m.encode().unwrap();
            match *m {
                MatchValue::TransportPort { port, mask: 0, .. } => {
                    prop_assert_eq!(u32::from(port), next);
                    prop_assert_eq!(token, format!("tp_dst={}", port));
                    next += 1;
                }
                MatchValue::TransportPort { port, mask, .. } => {
                    prop_assert_eq!(u32::from(port), next);
                    prop_assert_eq!(port & mask, 0);
                    prop_assert_eq!(token, format!("tp_dst=0x{:04x}/0x{:04x}", port, mask));
                    next += u32::from(mask) + 1;
                }
                _ => prop_assert!(false, "not a transport port: {:?}", m),
            }
        }
        prop_assert_eq!(next, u32::from(end) + 1);
    }
}
