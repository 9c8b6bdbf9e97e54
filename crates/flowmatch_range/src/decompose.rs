//! # Range decomposition
//!
//! A ternary table cannot match an arbitrary interval directly, so the interval is covered by
//! aligned power-of-two blocks. Starting from the low end, each step emits the largest block
//! that is aligned on the current value and does not run past the high end:
//!
//! ```text
//! [1, 6] over 16 bits
//!   1      -> 0000000000000001   (1 is odd, block of one)
//!   2..=3  -> 000000000000001*
//!   4..=5  -> 000000000000010*   (4..=7 would overshoot 6)
//!   6      -> 0000000000000110
//! ```
//!
//! The greedy choice is not a minimal cover for every range, but it is the conventional
//! splitting used for ternary range encoding and is deterministic. Each block consumes at
//! least one value and the block sizes first grow then shrink, so at most `2 * width` blocks
//! are emitted.
use funty::Unsigned;

use crate::{
    block::{low_mask, Block},
    error::RangeError,
};

/// Widest field the decomposer accepts.
pub const MAX_WIDTH: u32 = u64::BITS;

/// Decomposes the inclusive range `[start, end]` of a `width`-bit field into ordered, pairwise
/// disjoint blocks whose union is exactly the range.
pub fn decompose(start: u64, end: u64, width: u32) -> Result<Vec<Block>, RangeError> {
    if width == 0 || width > MAX_WIDTH {
        return Err(RangeError::Width { width });
    }
    if end > low_mask(width) {
        return Err(RangeError::ExceedsWidth { value: end, width });
    }
    if start > end {
        return Err(RangeError::Inverted { start, end });
    }

    let mut blocks = vec![];
    let mut low = start;
    loop {
        // zero is aligned on every block size, cap it at the field
        let align = if low == 0 {
            width
        } else {
            low.trailing_zeros().min(width)
        };
        // floor(log2(end - low + 1)), the whole domain when it overflows
        let fit = match (end - low).checked_add(1) {
            Some(n) => u64::BITS - 1 - n.leading_zeros(),
            None => u64::BITS,
        };
        let block = Block {
            value: low,
            mask_bits: align.min(fit),
            width,
        };
        blocks.push(block);
        if block.last() == end {
            break;
        }
        low = block.last() + 1;
    }

    debug_assert!(blocks.len() <= 2 * width as usize);
    tracing::trace!(start, end, width, blocks = blocks.len(), "decomposed range");
    Ok(blocks)
}

/// Decomposes `[start, end]` over the full width of `U`.
/// ```no_run
/// use flowmatch_range::decompose_field;
/// let blocks = decompose_field(0u8, 255u8).unwrap();
/// assert_eq!(blocks.len(), 1);
/// ```
pub fn decompose_field<U>(start: U, end: U) -> Result<Vec<Block>, RangeError>
where
    U: Unsigned + Into<u64>,
{
    decompose(start.into(), end.into(), U::BITS)
}

/// PortRange is an inclusive range of transport layer ports.
#[derive(Eq, PartialEq, Hash, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PortRange {
    pub start: u16,
    pub end: u16,
}

impl PortRange {
    pub fn new(start: u16, end: u16) -> Self {
        Self { start, end }
    }

    /// The range as 16-bit blocks, see [decompose].
    pub fn decompose(&self) -> Result<Vec<Block>, RangeError> {
        decompose_field(self.start, self.end)
    }
}
