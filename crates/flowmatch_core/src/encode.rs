//! Text production shared by every match value: `key=value` or `key=value/mask`.
//!
//! The radix comes from [FieldKey::format] and whether the mask is printed comes from
//! [FieldKey::polarity], so a value never decides either on its own.
use std::fmt::Display;

use crate::field::{FieldKey, MaskPolarity, Radix};

/// Renders `v` for a field of `width` bits.
/// ```no_run
/// use flowmatch_core::{encode::render, field::Radix};
/// assert_eq!(render(Radix::Decimal, 16, 80), "80");
/// assert_eq!(render(Radix::Hex, 16, 80), "0x50");
/// assert_eq!(render(Radix::PaddedHex, 16, 80), "0x0050");
/// ```
pub fn render(radix: Radix, width: u32, v: u64) -> String {
    match radix {
        Radix::Decimal => v.to_string(),
        Radix::Hex => format!("{:#x}", v),
        Radix::PaddedHex => format!("{:#0w$x}", v, w = width.div_ceil(4) as usize + 2),
    }
}

#[inline]
pub fn token(key: FieldKey, value: impl Display) -> String {
    format!("{}={}", key, value)
}

/// A bare numeric value in the field's own radix.
pub fn numeric(key: FieldKey, value: u64) -> String {
    token(key, render(key.format().bare, key.width(), value))
}

/// A value/mask pair under the field's polarity. `None` means the field is unconstrained and
/// the token is left out of the clause.
pub fn masked(key: FieldKey, value: u64, mask: u64) -> Option<String> {
    let radix = key.format().masked;
    let width = key.width();
    match key.polarity() {
        Some(MaskPolarity::MustMatch) if mask == 0 => None,
        Some(MaskPolarity::MustMatch) if mask == key.full_mask() => match value {
            0 => Some(token(key, 0)),
            _ => Some(numeric(key, value)),
        },
        Some(MaskPolarity::DontCare) | None if mask == 0 => Some(numeric(key, value)),
        _ => Some(token(
            key,
            format!(
                "{}/{}",
                render(radix, width, value),
                render(radix, width, mask)
            ),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render() {
        assert_eq!(render(Radix::PaddedHex, 16, 0x0800), "0x0800");
        assert_eq!(render(Radix::PaddedHex, 32, 1), "0x00000001");
        assert_eq!(render(Radix::PaddedHex, 12, 0xfff), "0xfff");
        assert_eq!(render(Radix::Hex, 64, 0), "0x0");
        assert_eq!(render(Radix::Decimal, 8, 255), "255");
    }

    #[test]
    fn test_dont_care_sentinel() {
        assert_eq!(masked(FieldKey::TpSrc, 80, 0).unwrap(), "tp_src=80");
        assert_eq!(
            masked(FieldKey::TpSrc, 2, 1).unwrap(),
            "tp_src=0x0002/0x0001"
        );
        assert_eq!(
            masked(FieldKey::CtMark, 1, 0).unwrap(),
            "ct_mark=0x00000001"
        );
        // all-ones is not special for these fields
        assert_eq!(
            masked(FieldKey::CtMark, 1, 0xffff_ffff).unwrap(),
            "ct_mark=0x00000001/0xffffffff"
        );
        assert_eq!(masked(FieldKey::TunId, 0, 0).unwrap(), "tun_id=0x0");
    }

    #[test]
    fn test_must_match_sentinels() {
        assert_eq!(masked(FieldKey::Reg(0), 5, 0), None);
        assert_eq!(masked(FieldKey::Reg(0), 0, 0xffff_ffff).unwrap(), "reg0=0");
        assert_eq!(
            masked(FieldKey::Reg(1), 0x2a, 0xffff_ffff).unwrap(),
            "reg1=0x2a"
        );
        assert_eq!(
            masked(FieldKey::Reg(2), 0x10, 0xf0).unwrap(),
            "reg2=0x10/0xf0"
        );
    }
}
