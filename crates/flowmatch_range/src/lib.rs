//! This crate splits an inclusive integer range over a fixed-width field into the aligned
//! ternary blocks a flow table can match on.
//!
//! ## Example
//! ```no_run
//! use flowmatch_range::{decompose, Block};
//!
//! let blocks = decompose(1, 6, 16).unwrap();
//! assert_eq!(blocks.len(), 4);
//! assert_eq!(blocks[1], Block { value: 2, mask_bits: 1, width: 16 });
//! // 2 and 3 share the block, the lowest bit is wildcarded
//! assert_eq!(blocks[1].to_string(), "000000000000001*");
//! ```
mod block;
mod decompose;
mod error;

pub use crate::{
    block::Block,
    decompose::{decompose, decompose_field, PortRange, MAX_WIDTH},
    error::RangeError,
};

#[allow(missing_docs)]
pub mod prelude {
    #[doc(hidden)]
    pub use crate::{decompose, decompose_field, Block, PortRange, RangeError};
}
