use std::fmt::{Binary, Display, Formatter};

use bitvec::prelude::*;

/// Block is an aligned sub-range that a single ternary match expresses: the low `mask_bits`
/// bits of `value` are zero and wildcarded, the remaining `width - mask_bits` bits must match.
///
/// A block with `mask_bits == 0` is an exact match on `value`.
#[derive(Eq, PartialEq, Hash, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Block {
    pub value: u64,
    pub mask_bits: u32,
    pub width: u32,
}

/// Low `bits` bits set, saturating at 64.
#[inline]
pub(crate) fn low_mask(bits: u32) -> u64 {
    if bits >= u64::BITS {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

impl Block {
    /// The wildcard mask of this block, `2^mask_bits - 1`.
    #[inline]
    pub fn mask(&self) -> u64 {
        low_mask(self.mask_bits)
    }

    /// The largest value covered by this block.
    #[inline]
    pub fn last(&self) -> u64 {
        self.value | self.mask()
    }

    #[inline]
    pub fn contains(&self, v: u64) -> bool {
        v & !self.mask() == self.value
    }

    #[inline]
    pub fn is_exact(&self) -> bool {
        self.mask_bits == 0
    }
}

impl Binary for Block {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:b}/{:b}", self.value, self.mask())
    }
}

/// Renders the block as a ternary string, most significant bit first.
impl Display for Block {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let octets = self.value.to_le_bytes();
        let bits = octets.view_bits::<Lsb0>();
        let mut ternary = String::with_capacity(self.width as usize);
        for i in (0..self.width as usize).rev() {
            ternary.push(if i < self.mask_bits as usize {
                '*'
            } else if bits[i] {
                '1'
            } else {
                '0'
            });
        }
        f.write_str(&ternary)
    }
}
