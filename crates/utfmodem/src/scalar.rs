//! Scalar-value predicates shared by every codec.

/// Highest valid Unicode scalar value.
pub const MAX_SCALAR_VALUE: u32 = 0x10_FFFF;

/// The replacement character, U+FFFD, substituted for malformed input when a
/// decoder is not in strict mode.
pub const REPLACEMENT_CHAR: char = '\u{FFFD}';

pub(crate) const SURROGATE_START: u32 = 0xD800;
pub(crate) const SURROGATE_END: u32 = 0xDFFF;

pub(crate) const LEAD_SURROGATE_START: u16 = 0xD800;
pub(crate) const TRAIL_SURROGATE_START: u16 = 0xDC00;
pub(crate) const TRAIL_SURROGATE_END: u16 = 0xDFFF;

/// Offset applied when combining a surrogate pair into a scalar value.
pub(crate) const SURROGATE_PLANE_BASE: u32 = 0x1_0000;

/// Returns `true` if `value` is a valid Unicode scalar value: within
/// `[0, 0x10FFFF]` and outside the surrogate range.
#[must_use]
pub const fn is_scalar_value(value: u32) -> bool {
    value <= MAX_SCALAR_VALUE && !is_surrogate(value)
}

pub(crate) const fn is_surrogate(value: u32) -> bool {
    value >= SURROGATE_START && value <= SURROGATE_END
}

pub(crate) const fn is_lead_surrogate(unit: u16) -> bool {
    unit >= LEAD_SURROGATE_START && unit < TRAIL_SURROGATE_START
}

pub(crate) const fn is_trail_surrogate(unit: u16) -> bool {
    unit >= TRAIL_SURROGATE_START && unit <= TRAIL_SURROGATE_END
}

/// Combines a surrogate pair into the scalar value it denotes.
pub(crate) fn combine_surrogates(lead: u16, trail: u16) -> char {
    let value = SURROGATE_PLANE_BASE
        + ((u32::from(lead) - SURROGATE_START) << 10)
        + (u32::from(trail) - u32::from(TRAIL_SURROGATE_START));
    // A lead/trail pair always lands in [0x10000, 0x10FFFF].
    char::from_u32(value).unwrap_or(REPLACEMENT_CHAR)
}
