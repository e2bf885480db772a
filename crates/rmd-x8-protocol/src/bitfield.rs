//! Sub-byte field packing over a 64-bit frame word.
//!
//! Every field of the RMD-X8 frame lives at a fixed bit offset inside the
//! 8-byte payload. The payload is viewed as a little-endian `u64` so that bit
//! `n` of the word is bit `n % 8` of byte `n / 8`, regardless of host byte
//! order.
//!
//! Multi-byte fields are big-endian on the wire. Setting `reverse_bytes`
//! swaps the low `length / 8` bytes of the value so the caller can work in
//! native integers.

use crate::frame::CAN_MAX_DLC;

/// Width of the frame word in bits.
pub const WORD_BITS: u8 = 64;

/// Load an 8-byte payload as a little-endian word.
#[inline]
pub fn word_from_payload(payload: &[u8; CAN_MAX_DLC]) -> u64 {
    u64::from_le_bytes(*payload)
}

/// Store a word back into its 8-byte payload form.
#[inline]
pub fn payload_from_word(word: u64) -> [u8; CAN_MAX_DLC] {
    word.to_le_bytes()
}

/// Mask with the low `length` bits set.
#[inline]
fn low_mask(length: u8) -> u64 {
    if length >= WORD_BITS {
        u64::MAX
    } else {
        (1u64 << length) - 1
    }
}

#[inline]
fn debug_check_span(length: u8, offset: u8, reverse_bytes: bool) {
    debug_assert!(length > 0, "bit field length must be non-zero");
    debug_assert!(
        u16::from(length) + u16::from(offset) <= u16::from(WORD_BITS),
        "bit field {length}@{offset} exceeds the 64-bit frame word"
    );
    debug_assert!(
        !reverse_bytes || length % 8 == 0,
        "byte reversal needs a whole number of bytes, got {length} bits"
    );
}

/// Reverse the order of the low `count` bytes of `value`.
///
/// Bytes above `count` are left where they are. `count` larger than eight is
/// clamped to the full word.
#[inline]
pub fn reverse_low_bytes(value: u64, count: usize) -> u64 {
    let mut bytes = value.to_le_bytes();
    let count = count.min(bytes.len());
    if let Some(field) = bytes.get_mut(..count) {
        field.reverse();
    }
    u64::from_le_bytes(bytes)
}

/// Write `value` into the `length`-bit span starting at `offset`.
///
/// The span is cleared first and bits of `value` above `length` are dropped.
/// With `reverse_bytes` the low `length / 8` bytes of `value` are swapped
/// before packing.
///
/// # Panics
///
/// In debug builds, panics if the span does not fit in 64 bits or if byte
/// reversal is requested for a length that is not a multiple of eight.
#[inline]
pub fn write_field(word: &mut u64, value: u64, length: u8, offset: u8, reverse_bytes: bool) {
    debug_check_span(length, offset, reverse_bytes);

    let value = if reverse_bytes {
        reverse_low_bytes(value, usize::from(length / 8))
    } else {
        value
    };

    let mask = low_mask(length).checked_shl(u32::from(offset)).unwrap_or(0);
    let shifted = value.checked_shl(u32::from(offset)).unwrap_or(0);

    *word = (*word & !mask) | (shifted & mask);
}

/// Read the `length`-bit span starting at `offset`, right-justified.
///
/// With `reverse_bytes` the low `length / 8` bytes of the extracted value are
/// swapped after masking.
///
/// # Panics
///
/// In debug builds, panics under the same conditions as [`write_field`].
#[inline]
pub fn read_field(word: u64, length: u8, offset: u8, reverse_bytes: bool) -> u64 {
    debug_check_span(length, offset, reverse_bytes);

    let raw = word.checked_shr(u32::from(offset)).unwrap_or(0) & low_mask(length);

    if reverse_bytes {
        reverse_low_bytes(raw, usize::from(length / 8))
    } else {
        raw
    }
}
