//! This crate provides the typed match values of a flow clause and their text encoding.
pub mod addr;
pub mod encode;
pub mod error;
pub mod field;
pub mod r#match;

#[allow(missing_docs)]
pub mod prelude {
    #[doc(hidden)]
    pub use crate::{
        addr::{HardwareAddr, ETHERNET_ADDR_LEN},
        error::{AddrPart, FormatError, MatchError, ParseError, RangeError},
        field::{constant::FIELD_MAP, Direction, FieldKey, MaskPolarity},
        r#match::{
            CtState, MatchValue, PortRanger, TcpFlag, TransportPortRange, Vlan, VLAN_NONE,
            VLAN_VID_MAX,
        },
    };
}
