//! # Field module
//!
//! ## What is a field key?
//! A field key is the lowercase token on the left of `=` in a match clause, such as `tp_src`
//! or `reg3`. Besides the token, every key declares what the encoder needs to render a value
//! for it: the bit width, the numeric [Radix] of bare and masked values, and the
//! [MaskPolarity] that decides when a mask is printed.
//!
//! ## Example
//! ```no_run
//! use flowmatch_core::field::{FieldKey, MaskPolarity};
//!
//! let key: FieldKey = "tp_dst".parse().unwrap();
//! assert_eq!(key, FieldKey::TpDst);
//! assert_eq!(key.polarity(), Some(MaskPolarity::DontCare));
//! assert_eq!("reg5".parse::<FieldKey>().unwrap().to_string(), "reg5");
//! ```
use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use nom::{
    bytes::complete::tag,
    character::complete::digit1,
    combinator::{all_consuming, map_res},
    sequence::preceded,
    Finish, IResult,
};

use crate::error::FormatError;

/// Which side of a packet a field refers to. ARP and neighbor discovery fields use
/// source/target, which map onto the same two directions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Source,
    Destination,
}

/// Meaning of a set bit in a field's mask.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MaskPolarity {
    /// Set bits are wildcarded. A zero mask is the exact-match sentinel and prints without a
    /// mask suffix.
    DontCare,
    /// Set bits must match. A zero mask leaves the field unconstrained and the token is
    /// omitted, an all-ones mask is an exact match and prints without a mask suffix.
    MustMatch,
}

/// Numeric base of a rendered value.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Radix {
    Decimal,
    /// `0x` prefixed, no padding.
    Hex,
    /// `0x` prefixed, zero padded to the field width.
    PaddedHex,
}

/// How a field renders its value alone and its value/mask pair.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FieldFormat {
    pub bare: Radix,
    pub masked: Radix,
}

impl FieldFormat {
    pub const DECIMAL: FieldFormat = FieldFormat {
        bare: Radix::Decimal,
        masked: Radix::Decimal,
    };
    pub const HEX: FieldFormat = FieldFormat {
        bare: Radix::Hex,
        masked: Radix::Hex,
    };
    pub const PADDED_HEX: FieldFormat = FieldFormat {
        bare: Radix::PaddedHex,
        masked: Radix::PaddedHex,
    };
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldKey {
    DlSrc,
    DlDst,
    DlType,
    DlVlan,
    VlanTci,
    NwSrc,
    NwDst,
    NwProto,
    Ipv6Src,
    Ipv6Dst,
    IcmpType,
    NdTarget,
    NdSll,
    NdTll,
    ArpSha,
    ArpTha,
    ArpSpa,
    ArpTpa,
    TpSrc,
    TpDst,
    CtState,
    CtMark,
    CtZone,
    TcpFlags,
    TunId,
    ConjId,
    Reg(u32),
}

pub mod constant {
    use super::FieldKey;

    include!(concat!(env!("OUT_DIR"), "/codegen.rs"));
}

impl FieldKey {
    /// The token of a fixed key, `None` for registers which carry their index.
    pub fn as_static(&self) -> Option<&'static str> {
        let token = match self {
            FieldKey::DlSrc => "dl_src",
            FieldKey::DlDst => "dl_dst",
            FieldKey::DlType => "dl_type",
            FieldKey::DlVlan => "dl_vlan",
            FieldKey::VlanTci => "vlan_tci",
            FieldKey::NwSrc => "nw_src",
            FieldKey::NwDst => "nw_dst",
            FieldKey::NwProto => "nw_proto",
            FieldKey::Ipv6Src => "ipv6_src",
            FieldKey::Ipv6Dst => "ipv6_dst",
            FieldKey::IcmpType => "icmp_type",
            FieldKey::NdTarget => "nd_target",
            FieldKey::NdSll => "nd_sll",
            FieldKey::NdTll => "nd_tll",
            FieldKey::ArpSha => "arp_sha",
            FieldKey::ArpTha => "arp_tha",
            FieldKey::ArpSpa => "arp_spa",
            FieldKey::ArpTpa => "arp_tpa",
            FieldKey::TpSrc => "tp_src",
            FieldKey::TpDst => "tp_dst",
            FieldKey::CtState => "ct_state",
            FieldKey::CtMark => "ct_mark",
            FieldKey::CtZone => "ct_zone",
            FieldKey::TcpFlags => "tcp_flags",
            FieldKey::TunId => "tun_id",
            FieldKey::ConjId => "conj_id",
            FieldKey::Reg(_) => return None,
        };
        Some(token)
    }

    /// Width of the field in bits.
    pub fn width(&self) -> u32 {
        match self {
            FieldKey::DlSrc | FieldKey::DlDst => 48,
            FieldKey::NdSll | FieldKey::NdTll => 48,
            FieldKey::ArpSha | FieldKey::ArpTha => 48,
            FieldKey::DlType | FieldKey::VlanTci => 16,
            FieldKey::DlVlan => 12,
            FieldKey::NwSrc | FieldKey::NwDst => 32,
            FieldKey::ArpSpa | FieldKey::ArpTpa => 32,
            FieldKey::Ipv6Src | FieldKey::Ipv6Dst | FieldKey::NdTarget => 128,
            FieldKey::NwProto | FieldKey::IcmpType => 8,
            FieldKey::TpSrc | FieldKey::TpDst => 16,
            FieldKey::CtState | FieldKey::CtMark => 32,
            FieldKey::CtZone => 16,
            FieldKey::TcpFlags => 12,
            FieldKey::TunId => 64,
            FieldKey::ConjId | FieldKey::Reg(_) => 32,
        }
    }

    /// All-ones mask over the field, for fields no wider than 64 bits.
    pub fn full_mask(&self) -> u64 {
        match self.width() {
            w if w >= u64::BITS => u64::MAX,
            w => (1u64 << w) - 1,
        }
    }

    /// Mask polarity of fields that take a numeric mask, `None` for the rest.
    pub fn polarity(&self) -> Option<MaskPolarity> {
        match self {
            FieldKey::TpSrc | FieldKey::TpDst => Some(MaskPolarity::DontCare),
            // these share the zero-mask sentinel of the transport ports
            FieldKey::VlanTci | FieldKey::CtMark | FieldKey::TunId => {
                Some(MaskPolarity::DontCare)
            }
            FieldKey::Reg(_) => Some(MaskPolarity::MustMatch),
            _ => None,
        }
    }

    /// Numeric formats of the field. Address and flag fields are never rendered as numbers and
    /// report [FieldFormat::DECIMAL].
    pub fn format(&self) -> FieldFormat {
        match self {
            FieldKey::DlType | FieldKey::VlanTci | FieldKey::CtMark => FieldFormat::PADDED_HEX,
            FieldKey::TpSrc | FieldKey::TpDst => FieldFormat {
                bare: Radix::Decimal,
                masked: Radix::PaddedHex,
            },
            FieldKey::TunId | FieldKey::Reg(_) => FieldFormat::HEX,
            _ => FieldFormat::DECIMAL,
        }
    }
}

impl Display for FieldKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldKey::Reg(n) => write!(f, "reg{}", n),
            key => f.write_str(key.as_static().unwrap_or_default()),
        }
    }
}

/// r"reg[0-9]+"
fn parse_reg(input: &str) -> IResult<&str, u32> {
    all_consuming(preceded(tag("reg"), map_res(digit1, str::parse::<u32>)))(input)
}

impl FromStr for FieldKey {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(key) = constant::FIELD_MAP.get(s) {
            return Ok(*key);
        }
        parse_reg(s)
            .finish()
            .map(|(_, n)| FieldKey::Reg(n))
            .map_err(|_| FormatError::UnknownField {
                token: s.to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_map_round_trip() {
        assert_eq!(constant::FIELD_MAP.len(), 26);
        for (token, key) in constant::FIELD_MAP.entries() {
            assert_eq!(key.to_string(), *token);
            assert_eq!(token.parse::<FieldKey>().unwrap(), *key);
        }
    }

    #[test]
    fn test_registers() {
        assert_eq!("reg0".parse::<FieldKey>().unwrap(), FieldKey::Reg(0));
        assert_eq!("reg12".parse::<FieldKey>().unwrap(), FieldKey::Reg(12));
        assert_eq!(FieldKey::Reg(7).to_string(), "reg7");
        assert_eq!(FieldKey::Reg(7).as_static(), None);
        for bad in ["reg", "reg+1", "reg1x", "Reg1", "tp_src ", ""] {
            assert_eq!(
                bad.parse::<FieldKey>(),
                Err(FormatError::UnknownField {
                    token: bad.to_owned()
                })
            );
        }
    }

    #[test]
    fn test_polarity() {
        assert_eq!(FieldKey::TpSrc.polarity(), Some(MaskPolarity::DontCare));
        assert_eq!(FieldKey::TunId.polarity(), Some(MaskPolarity::DontCare));
        assert_eq!(FieldKey::Reg(3).polarity(), Some(MaskPolarity::MustMatch));
        assert_eq!(FieldKey::NwSrc.polarity(), None);
        assert_eq!(FieldKey::CtState.polarity(), None);
    }

    #[test]
    fn test_widths() {
        assert_eq!(FieldKey::TpDst.full_mask(), 0xffff);
        assert_eq!(FieldKey::Reg(0).full_mask(), 0xffff_ffff);
        assert_eq!(FieldKey::TunId.full_mask(), u64::MAX);
        assert_eq!(FieldKey::DlVlan.full_mask(), 0x0fff);
    }
}
