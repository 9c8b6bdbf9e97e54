use thiserror::Error;

/// A numeric value falls outside the domain of its field.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RangeError {
    #[error("range start {start} exceeds range end {end}")]
    Inverted { start: u64, end: u64 },

    #[error("field width must be between 1 and 64 bits, but got {width}")]
    Width { width: u32 },

    #[error("value {value} does not fit in a {width}-bit field")]
    ExceedsWidth { value: u64, width: u32 },

    #[error("VLAN ID {vid} is out of range")]
    VlanId { vid: u16 },
}
