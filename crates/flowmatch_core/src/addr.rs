//! Address validation shared by the match values.
//!
//! IPv4 and IPv6 fields are kept apart: an IPv4 field takes nothing written in IPv6 syntax, and
//! an IPv6 field takes neither IPv4 literals nor IPv4-mapped IPv6 addresses. Bare addresses come
//! back in canonical form, CIDR blocks come back exactly as given.
use std::{
    fmt::{Display, Formatter},
    net::{Ipv4Addr, Ipv6Addr},
    str::FromStr,
};

use ipnet::{Ipv4Net, Ipv6Net};
use nom::{
    branch::alt,
    bytes::complete::take_while_m_n,
    character::complete::char,
    combinator::{all_consuming, map, map_res},
    multi::separated_list1,
    sequence::pair,
    Finish, IResult,
};

use crate::error::{AddrPart, FormatError, ParseError};

/// Length in octets of an ethernet hardware address.
pub const ETHERNET_ADDR_LEN: usize = 6;

/// HardwareAddr is a link layer address of any length. Fields that need an ethernet address
/// check the length with [ethernet_addr].
#[derive(Eq, PartialEq, Hash, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HardwareAddr(Vec<u8>);

impl HardwareAddr {
    pub fn octets(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for HardwareAddr {
    fn from(octets: Vec<u8>) -> Self {
        HardwareAddr(octets)
    }
}

impl From<&[u8]> for HardwareAddr {
    fn from(octets: &[u8]) -> Self {
        HardwareAddr(octets.to_vec())
    }
}

impl<const N: usize> From<[u8; N]> for HardwareAddr {
    fn from(octets: [u8; N]) -> Self {
        HardwareAddr(octets.to_vec())
    }
}

/// Lowercase, colon separated: `de:ad:be:ef:00:01`.
impl Display for HardwareAddr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (i, octet) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(":")?;
            }
            write!(f, "{:02x}", octet)?;
        }
        Ok(())
    }
}

/// r"[0-9a-fA-F]{2}"
fn parse_hex_octet(input: &str) -> IResult<&str, u8> {
    map_res(take_while_m_n(2, 2, |c: char| c.is_ascii_hexdigit()), |s| {
        u8::from_str_radix(s, 16)
    })(input)
}

/// `aa:bb:cc`, `aa-bb-cc` or `aabb.ccdd`, any number of octets.
fn parse_hw_octets(input: &str) -> IResult<&str, Vec<u8>> {
    alt((
        all_consuming(separated_list1(char(':'), parse_hex_octet)),
        all_consuming(separated_list1(char('-'), parse_hex_octet)),
        all_consuming(map(
            separated_list1(char('.'), pair(parse_hex_octet, parse_hex_octet)),
            |groups| {
                groups
                    .into_iter()
                    .flat_map(|(hi, lo)| [hi, lo])
                    .collect::<Vec<u8>>()
            },
        )),
    ))(input)
}

impl FromStr for HardwareAddr {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match parse_hw_octets(s).finish() {
            Ok((_, octets)) => Ok(HardwareAddr(octets)),
            Err(_) => {
                tracing::debug!(literal = s, "rejected hardware address");
                Err(ParseError::HardwareAddr {
                    literal: s.to_owned(),
                })
            }
        }
    }
}

/// Checks `addr` is an ethernet address and returns its canonical text.
pub fn ethernet_addr(addr: &HardwareAddr, part: AddrPart) -> Result<String, FormatError> {
    if addr.len() != ETHERNET_ADDR_LEN {
        tracing::debug!(%part, octets = addr.len(), "rejected ethernet address");
        return Err(FormatError::HardwareAddrLength {
            part,
            expected: ETHERNET_ADDR_LEN,
            actual: addr.len(),
        });
    }
    Ok(addr.to_string())
}

/// Accepts an IPv4 address or IPv4 CIDR block.
pub fn ipv4_or_cidr(literal: &str) -> Result<String, FormatError> {
    if literal.parse::<Ipv4Net>().is_ok() {
        return Ok(literal.to_owned());
    }
    if let Ok(ip) = literal.parse::<Ipv4Addr>() {
        return Ok(ip.to_string());
    }
    tracing::debug!(literal, "rejected IPv4 literal");
    Err(FormatError::NotIpv4 {
        literal: literal.to_owned(),
    })
}

/// Accepts an IPv6 address or IPv6 CIDR block that is not an IPv4-mapped address.
pub fn ipv6_or_cidr(literal: &str) -> Result<String, FormatError> {
    if let Ok(net) = literal.parse::<Ipv6Net>() {
        if net.addr().to_ipv4_mapped().is_none() {
            return Ok(literal.to_owned());
        }
    } else if let Ok(ip) = literal.parse::<Ipv6Addr>() {
        if ip.to_ipv4_mapped().is_none() {
            return Ok(ip.to_string());
        }
    }
    tracing::debug!(literal, "rejected IPv6 literal");
    Err(FormatError::NotIpv6 {
        literal: literal.to_owned(),
    })
}
