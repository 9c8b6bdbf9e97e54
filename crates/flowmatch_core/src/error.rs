use std::fmt::{Display, Formatter};

use thiserror::Error;

pub use flowmatch_range::RangeError;

/// Which half of a `addr/wildcard` hardware address literal failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddrPart {
    Address,
    WildcardMask,
}

impl Display for AddrPart {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AddrPart::Address => f.write_str("hardware address"),
            AddrPart::WildcardMask => f.write_str("wildcard mask"),
        }
    }
}

/// A literal is well formed but not acceptable for the field.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("{part} must be {expected} octets, but got {actual}")]
    HardwareAddrLength {
        part: AddrPart,
        expected: usize,
        actual: usize,
    },

    #[error("{literal:?} is not a valid IPv4 address or IPv4 CIDR block")]
    NotIpv4 { literal: String },

    #[error("{literal:?} is not a valid IPv6 address or IPv6 CIDR block")]
    NotIpv6 { literal: String },

    #[error("{token:?} is not a known field key")]
    UnknownField { token: String },
}

/// A literal could not be parsed at all.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("{literal:?} is not a hardware address")]
    HardwareAddr { literal: String },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Range(#[from] RangeError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}
