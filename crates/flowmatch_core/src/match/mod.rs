//! # Match values
//!
//! A [MatchValue] is one typed predicate on one field. It is checked and rendered by
//! [MatchValue::encode], and [MatchValue::describe] gives back the constructor call that builds
//! it, for generated code and debug output.
//!
//! ```text
//!   MatchValue ──encode()──> "tp_dst=443"
//!        │
//!        └────describe()──> "MatchValue::transport_destination_port(443)"
//!
//!   TransportPortRange ──masked_ports()──> [MatchValue::TransportPort, ..]
//! ```
//!
//! ## Example
//! ```no_run
//! use flowmatch_core::r#match::{CtState, MatchValue, PortRanger, TransportPortRange};
//!
//! let m = MatchValue::connection_tracking_state([CtState::Tracked.set(), CtState::New.unset()]);
//! assert_eq!(m.encode().unwrap(), "ct_state=+trk-new");
//!
//! let tokens: Vec<String> = TransportPortRange::source(1, 6)
//!     .masked_ports()
//!     .unwrap()
//!     .iter()
//!     .map(|m| m.encode().unwrap())
//!     .collect();
//! assert_eq!(tokens, ["tp_src=1", "tp_src=0x0002/0x0001", "tp_src=0x0004/0x0001", "tp_src=6"]);
//! ```
pub mod flags;
mod port_range;

pub use flags::{CtState, TcpFlag};
pub use port_range::{PortRanger, TransportPortRange};

use crate::{
    addr::{ethernet_addr, ipv4_or_cidr, ipv6_or_cidr, HardwareAddr},
    encode,
    error::{AddrPart, MatchError, RangeError},
    field::{Direction, FieldKey, MaskPolarity, Radix},
};

/// VLAN ID that matches packets without a VLAN tag.
pub const VLAN_NONE: u16 = 0xffff;

/// Largest VLAN ID carried by a tag.
pub const VLAN_VID_MAX: u16 = 0x0fff;

/// VLAN selector of [MatchValue::DataLinkVlan].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Vlan {
    /// No VLAN tag present.
    None,
    Id(u16),
}

impl From<u16> for Vlan {
    fn from(vid: u16) -> Self {
        match vid {
            VLAN_NONE => Vlan::None,
            vid => Vlan::Id(vid),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchValue {
    /// Ethernet address with an optional `/wildcard` mask, both as text.
    DataLink { dir: Direction, addr: String },
    DataLinkType { ether_type: u16 },
    DataLinkVlan { vid: Vlan },
    VlanTci { tci: u16, mask: u16 },
    /// IPv4 address or CIDR block.
    Network { dir: Direction, ip: String },
    /// IPv6 address or CIDR block.
    Ipv6 { dir: Direction, ip: String },
    NetworkProtocol { num: u8 },
    IcmpType { typ: u8 },
    NeighborDiscoveryTarget { ip: String },
    NeighborDiscoveryLinkLayer { dir: Direction, addr: HardwareAddr },
    ArpHardwareAddress { dir: Direction, addr: HardwareAddr },
    ArpProtocolAddress { dir: Direction, ip: String },
    /// A zero mask is an exact match on `port`.
    TransportPort { dir: Direction, port: u16, mask: u16 },
    ConnectionTrackingMark { mark: u32, mask: u32 },
    ConnectionTrackingZone { zone: u16 },
    /// `+flag`/`-flag` tokens, concatenated as given.
    ConnectionTrackingState { state: Vec<String> },
    TcpFlags { flags: Vec<String> },
    TunnelId { id: u64, mask: u64 },
    ConjunctionId { id: u32 },
    /// A zero mask leaves the register unconstrained.
    Register { n: u32, value: u32, mask: u32 },
}

impl MatchValue {
    pub fn data_link_source(addr: impl Into<String>) -> Self {
        MatchValue::DataLink {
            dir: Direction::Source,
            addr: addr.into(),
        }
    }

    pub fn data_link_destination(addr: impl Into<String>) -> Self {
        MatchValue::DataLink {
            dir: Direction::Destination,
            addr: addr.into(),
        }
    }

    pub fn data_link_type(ether_type: u16) -> Self {
        MatchValue::DataLinkType { ether_type }
    }

    /// Takes a VLAN ID, [VLAN_NONE] or a [Vlan].
    pub fn data_link_vlan(vid: impl Into<Vlan>) -> Self {
        MatchValue::DataLinkVlan { vid: vid.into() }
    }

    pub fn vlan_tci(tci: u16, mask: u16) -> Self {
        MatchValue::VlanTci { tci, mask }
    }

    pub fn network_source(ip: impl Into<String>) -> Self {
        MatchValue::Network {
            dir: Direction::Source,
            ip: ip.into(),
        }
    }

    pub fn network_destination(ip: impl Into<String>) -> Self {
        MatchValue::Network {
            dir: Direction::Destination,
            ip: ip.into(),
        }
    }

    pub fn ipv6_source(ip: impl Into<String>) -> Self {
        MatchValue::Ipv6 {
            dir: Direction::Source,
            ip: ip.into(),
        }
    }

    pub fn ipv6_destination(ip: impl Into<String>) -> Self {
        MatchValue::Ipv6 {
            dir: Direction::Destination,
            ip: ip.into(),
        }
    }

    /// IP protocol number, e.g. 1 for ICMP over IPv4 or 58 for ICMPv6.
    pub fn network_protocol(num: u8) -> Self {
        MatchValue::NetworkProtocol { num }
    }

    pub fn icmp_type(typ: u8) -> Self {
        MatchValue::IcmpType { typ }
    }

    pub fn neighbor_discovery_target(ip: impl Into<String>) -> Self {
        MatchValue::NeighborDiscoveryTarget { ip: ip.into() }
    }

    pub fn neighbor_discovery_source_link_layer(addr: impl Into<HardwareAddr>) -> Self {
        MatchValue::NeighborDiscoveryLinkLayer {
            dir: Direction::Source,
            addr: addr.into(),
        }
    }

    pub fn neighbor_discovery_target_link_layer(addr: impl Into<HardwareAddr>) -> Self {
        MatchValue::NeighborDiscoveryLinkLayer {
            dir: Direction::Destination,
            addr: addr.into(),
        }
    }

    pub fn arp_source_hardware_address(addr: impl Into<HardwareAddr>) -> Self {
        MatchValue::ArpHardwareAddress {
            dir: Direction::Source,
            addr: addr.into(),
        }
    }

    pub fn arp_target_hardware_address(addr: impl Into<HardwareAddr>) -> Self {
        MatchValue::ArpHardwareAddress {
            dir: Direction::Destination,
            addr: addr.into(),
        }
    }

    pub fn arp_source_protocol_address(ip: impl Into<String>) -> Self {
        MatchValue::ArpProtocolAddress {
            dir: Direction::Source,
            ip: ip.into(),
        }
    }

    pub fn arp_target_protocol_address(ip: impl Into<String>) -> Self {
        MatchValue::ArpProtocolAddress {
            dir: Direction::Destination,
            ip: ip.into(),
        }
    }

    pub fn transport_source_port(port: u16) -> Self {
        Self::transport_source_masked_port(port, 0)
    }

    pub fn transport_destination_port(port: u16) -> Self {
        Self::transport_destination_masked_port(port, 0)
    }

    /// Set bits of `mask` are wildcarded.
    pub fn transport_source_masked_port(port: u16, mask: u16) -> Self {
        MatchValue::TransportPort {
            dir: Direction::Source,
            port,
            mask,
        }
    }

    /// Set bits of `mask` are wildcarded.
    pub fn transport_destination_masked_port(port: u16, mask: u16) -> Self {
        MatchValue::TransportPort {
            dir: Direction::Destination,
            port,
            mask,
        }
    }

    pub fn connection_tracking_mark(mark: u32, mask: u32) -> Self {
        MatchValue::ConnectionTrackingMark { mark, mask }
    }

    pub fn connection_tracking_zone(zone: u16) -> Self {
        MatchValue::ConnectionTrackingZone { zone }
    }

    /// Build the tokens with [CtState::set] and [CtState::unset].
    pub fn connection_tracking_state<I>(state: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        MatchValue::ConnectionTrackingState {
            state: state.into_iter().map(Into::into).collect(),
        }
    }

    /// Build the tokens with [TcpFlag::set] and [TcpFlag::unset].
    pub fn tcp_flags<I>(flags: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        MatchValue::TcpFlags {
            flags: flags.into_iter().map(Into::into).collect(),
        }
    }

    pub fn tunnel_id(id: u64) -> Self {
        Self::tunnel_id_with_mask(id, 0)
    }

    pub fn tunnel_id_with_mask(id: u64, mask: u64) -> Self {
        MatchValue::TunnelId { id, mask }
    }

    pub fn conjunction_id(id: u32) -> Self {
        MatchValue::ConjunctionId { id }
    }

    pub fn register(n: u32, value: u32, mask: u32) -> Self {
        MatchValue::Register { n, value, mask }
    }

    pub fn field_key(&self) -> FieldKey {
        use Direction::*;
        match self {
            MatchValue::DataLink { dir: Source, .. } => FieldKey::DlSrc,
            MatchValue::DataLink { dir: Destination, .. } => FieldKey::DlDst,
            MatchValue::DataLinkType { .. } => FieldKey::DlType,
            MatchValue::DataLinkVlan { .. } => FieldKey::DlVlan,
            MatchValue::VlanTci { .. } => FieldKey::VlanTci,
            MatchValue::Network { dir: Source, .. } => FieldKey::NwSrc,
            MatchValue::Network { dir: Destination, .. } => FieldKey::NwDst,
            MatchValue::Ipv6 { dir: Source, .. } => FieldKey::Ipv6Src,
            MatchValue::Ipv6 { dir: Destination, .. } => FieldKey::Ipv6Dst,
            MatchValue::NetworkProtocol { .. } => FieldKey::NwProto,
            MatchValue::IcmpType { .. } => FieldKey::IcmpType,
            MatchValue::NeighborDiscoveryTarget { .. } => FieldKey::NdTarget,
            MatchValue::NeighborDiscoveryLinkLayer { dir: Source, .. } => FieldKey::NdSll,
            MatchValue::NeighborDiscoveryLinkLayer { dir: Destination, .. } => FieldKey::NdTll,
            MatchValue::ArpHardwareAddress { dir: Source, .. } => FieldKey::ArpSha,
            MatchValue::ArpHardwareAddress { dir: Destination, .. } => FieldKey::ArpTha,
            MatchValue::ArpProtocolAddress { dir: Source, .. } => FieldKey::ArpSpa,
            MatchValue::ArpProtocolAddress { dir: Destination, .. } => FieldKey::ArpTpa,
            MatchValue::TransportPort { dir: Source, .. } => FieldKey::TpSrc,
            MatchValue::TransportPort { dir: Destination, .. } => FieldKey::TpDst,
            MatchValue::ConnectionTrackingMark { .. } => FieldKey::CtMark,
            MatchValue::ConnectionTrackingZone { .. } => FieldKey::CtZone,
            MatchValue::ConnectionTrackingState { .. } => FieldKey::CtState,
            MatchValue::TcpFlags { .. } => FieldKey::TcpFlags,
            MatchValue::TunnelId { .. } => FieldKey::TunId,
            MatchValue::ConjunctionId { .. } => FieldKey::ConjId,
            MatchValue::Register { n, .. } => FieldKey::Reg(*n),
        }
    }

    /// Mask polarity of the field, `None` when the value carries no numeric mask.
    pub fn polarity(&self) -> Option<MaskPolarity> {
        self.field_key().polarity()
    }

    /// Validates the value and renders its `key=value[/mask]` token.
    ///
    /// A register with a zero mask constrains nothing and renders as an empty string, which the
    /// clause assembler leaves out.
    pub fn encode(&self) -> Result<String, MatchError> {
        let key = self.field_key();
        let text = match self {
            MatchValue::DataLink { addr, .. } => {
                let (addr, wildcard) = match addr.split_once('/') {
                    Some((addr, wildcard)) => (addr, Some(wildcard)),
                    None => (addr.as_str(), None),
                };
                let addr = ethernet_addr(&addr.parse::<HardwareAddr>()?, AddrPart::Address)?;
                match wildcard {
                    Some(wildcard) => {
                        let wildcard = ethernet_addr(
                            &wildcard.parse::<HardwareAddr>()?,
                            AddrPart::WildcardMask,
                        )?;
                        encode::token(key, format!("{}/{}", addr, wildcard))
                    }
                    None => encode::token(key, addr),
                }
            }
            MatchValue::DataLinkType { ether_type } => encode::numeric(key, u64::from(*ether_type)),
            MatchValue::DataLinkVlan { vid } => match *vid {
                Vlan::None | Vlan::Id(VLAN_NONE) => encode::token(
                    key,
                    encode::render(Radix::PaddedHex, u16::BITS, u64::from(VLAN_NONE)),
                ),
                Vlan::Id(vid) if vid <= VLAN_VID_MAX => encode::numeric(key, u64::from(vid)),
                Vlan::Id(vid) => return Err(RangeError::VlanId { vid }.into()),
            },
            MatchValue::VlanTci { tci, mask } => {
                encode::masked(key, u64::from(*tci), u64::from(*mask)).unwrap_or_default()
            }
            MatchValue::Network { ip, .. } | MatchValue::ArpProtocolAddress { ip, .. } => {
                encode::token(key, ipv4_or_cidr(ip)?)
            }
            MatchValue::Ipv6 { ip, .. } | MatchValue::NeighborDiscoveryTarget { ip } => {
                encode::token(key, ipv6_or_cidr(ip)?)
            }
            MatchValue::NetworkProtocol { num } => encode::numeric(key, u64::from(*num)),
            MatchValue::IcmpType { typ } => encode::numeric(key, u64::from(*typ)),
            MatchValue::NeighborDiscoveryLinkLayer { addr, .. }
            | MatchValue::ArpHardwareAddress { addr, .. } => {
                encode::token(key, ethernet_addr(addr, AddrPart::Address)?)
            }
            MatchValue::TransportPort { port, mask, .. } => {
                encode::masked(key, u64::from(*port), u64::from(*mask)).unwrap_or_default()
            }
            MatchValue::ConnectionTrackingMark { mark, mask } => {
                encode::masked(key, u64::from(*mark), u64::from(*mask)).unwrap_or_default()
            }
            MatchValue::ConnectionTrackingZone { zone } => encode::numeric(key, u64::from(*zone)),
            MatchValue::ConnectionTrackingState { state } => encode::token(key, state.concat()),
            MatchValue::TcpFlags { flags } => encode::token(key, flags.concat()),
            MatchValue::TunnelId { id, mask } => {
                encode::masked(key, *id, *mask).unwrap_or_default()
            }
            MatchValue::ConjunctionId { id } => encode::numeric(key, u64::from(*id)),
            MatchValue::Register { value, mask, .. } => {
                encode::masked(key, u64::from(*value), u64::from(*mask)).unwrap_or_default()
            }
        };
        Ok(text)
    }

    /// The constructor call that rebuilds this value, e.g.
    /// `MatchValue::transport_source_masked_port(0x2, 0x1)`. Meant for generated code and debug
    /// output, not for parsing back.
    pub fn describe(&self) -> String {
        use Direction::*;
        let (ctor, args) = match self {
            MatchValue::DataLink { dir, addr } => (
                by_dir(*dir, "data_link_source", "data_link_destination"),
                format!("{:?}", addr),
            ),
            MatchValue::DataLinkType { ether_type } => {
                ("data_link_type", format!("{:#06x}", ether_type))
            }
            MatchValue::DataLinkVlan { vid } => match vid {
                Vlan::None => ("data_link_vlan", "VLAN_NONE".to_owned()),
                Vlan::Id(vid) => ("data_link_vlan", vid.to_string()),
            },
            MatchValue::VlanTci { tci, mask } => {
                ("vlan_tci", format!("{:#06x}, {:#06x}", tci, mask))
            }
            MatchValue::Network { dir, ip } => (
                by_dir(*dir, "network_source", "network_destination"),
                format!("{:?}", ip),
            ),
            MatchValue::Ipv6 { dir, ip } => (
                by_dir(*dir, "ipv6_source", "ipv6_destination"),
                format!("{:?}", ip),
            ),
            MatchValue::NetworkProtocol { num } => ("network_protocol", num.to_string()),
            MatchValue::IcmpType { typ } => ("icmp_type", typ.to_string()),
            MatchValue::NeighborDiscoveryTarget { ip } => {
                ("neighbor_discovery_target", format!("{:?}", ip))
            }
            MatchValue::NeighborDiscoveryLinkLayer { dir, addr } => (
                by_dir(
                    *dir,
                    "neighbor_discovery_source_link_layer",
                    "neighbor_discovery_target_link_layer",
                ),
                octet_array(addr),
            ),
            MatchValue::ArpHardwareAddress { dir, addr } => (
                by_dir(
                    *dir,
                    "arp_source_hardware_address",
                    "arp_target_hardware_address",
                ),
                octet_array(addr),
            ),
            MatchValue::ArpProtocolAddress { dir, ip } => (
                by_dir(
                    *dir,
                    "arp_source_protocol_address",
                    "arp_target_protocol_address",
                ),
                format!("{:?}", ip),
            ),
            MatchValue::TransportPort { dir, port, mask: 0 } => (
                by_dir(*dir, "transport_source_port", "transport_destination_port"),
                port.to_string(),
            ),
            MatchValue::TransportPort { dir, port, mask } => (
                match dir {
                    Source => "transport_source_masked_port",
                    Destination => "transport_destination_masked_port",
                },
                format!("{:#x}, {:#x}", port, mask),
            ),
            MatchValue::ConnectionTrackingMark { mark, mask } => (
                "connection_tracking_mark",
                format!("{:#010x}, {:#010x}", mark, mask),
            ),
            MatchValue::ConnectionTrackingZone { zone } => {
                ("connection_tracking_zone", zone.to_string())
            }
            MatchValue::ConnectionTrackingState { state } => {
                ("connection_tracking_state", string_array(state))
            }
            MatchValue::TcpFlags { flags } => ("tcp_flags", string_array(flags)),
            MatchValue::TunnelId { id, mask: 0 } => ("tunnel_id", format!("{:#x}", id)),
            MatchValue::TunnelId { id, mask } => {
                ("tunnel_id_with_mask", format!("{:#x}, {:#x}", id, mask))
            }
            MatchValue::ConjunctionId { id } => ("conjunction_id", id.to_string()),
            MatchValue::Register { n, value, mask } => {
                ("register", format!("{}, {:#x}, {:#x}", n, value, mask))
            }
        };
        format!("MatchValue::{}({})", ctor, args)
    }
}

fn by_dir(dir: Direction, src: &'static str, dst: &'static str) -> &'static str {
    match dir {
        Direction::Source => src,
        Direction::Destination => dst,
    }
}

/// `[0xde, 0xad, ..]`
fn octet_array(addr: &HardwareAddr) -> String {
    let octets: Vec<String> = addr
        .octets()
        .iter()
        .map(|o| format!("{:#04x}", o))
        .collect();
    format!("[{}]", octets.join(", "))
}

/// `["+trk", "-new"]`
fn string_array(tokens: &[String]) -> String {
    let quoted: Vec<String> = tokens.iter().map(|t| format!("{:?}", t)).collect();
    format!("[{}]", quoted.join(", "))
}
