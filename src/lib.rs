//! # flowmatch
//!
//! Typed match fields for OpenFlow-style flow clauses.
//!
//! - [range] splits an integer range into the aligned blocks a ternary table can match.
//! - [r#match] holds the match values and [encode] their `key=value[/mask]` text.
//!
//! ```no_run
//! use flowmatch::prelude::*;
//!
//! let clause: Vec<String> = TransportPortRange::destination(8000, 8003)
//!     .masked_ports()
//!     .unwrap()
//!     .iter()
//!     .map(|m| m.encode().unwrap())
//!     .collect();
//! assert_eq!(clause, ["tp_dst=0x1f40/0x0003"]);
//! ```
pub use flowmatch_core::{addr, encode, error, field, r#match};
pub use flowmatch_range as range;

#[allow(missing_docs)]
pub mod prelude {
    #[doc(hidden)]
    pub use flowmatch_core::prelude::*;
    #[doc(hidden)]
    pub use flowmatch_range::prelude::*;
}
