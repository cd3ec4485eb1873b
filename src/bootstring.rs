//! Bootstring algorithm constants and helpers.
//!
//! These are the Bootstring parameters RFC 3492 fixes for Punycode:
//! base 36 with the alphabet a-z (0-25) + 0-9 (26-35). Digits decode
//! case-insensitively; the case of a digit is a side channel (see the
//! case-flag handling in the encode/decode modules).

/// Base for variable-length integer encoding.
pub(crate) const BASE: u32 = 36;

/// Minimum threshold value.
pub(crate) const T_MIN: u32 = 1;

/// Maximum threshold value.
pub(crate) const T_MAX: u32 = 26;

/// Skew factor for bias adaptation.
pub(crate) const SKEW: u32 = 38;

/// Damping factor for the first adaptation.
pub(crate) const DAMP: u32 = 700;

/// Initial bias value.
pub(crate) const INITIAL_BIAS: u32 = 72;

/// The first non-basic code point; decoder state `n` starts here.
pub(crate) const INITIAL_N: u32 = 0x80;

/// Separator between the basic prefix and the extended digit run.
pub(crate) const DELIMITER: u8 = b'-';

/// Largest value any accumulator may reach. An arithmetic step that
/// would pass this bound fails with `Error::Overflow` instead of
/// wrapping.
pub(crate) const MAX_VALUE: u32 = i32::MAX as u32;

/// Adapt bias after encoding/decoding a delta.
///
/// This function implements the bias adaptation algorithm from
/// RFC 3492 §3.4. It adjusts the bias to improve encoding efficiency
/// based on:
/// - delta: the delta value just processed
/// - num_points: number of code points handled so far
/// - first_time: whether this is the first adaptation
pub(crate) fn adapt_bias(mut delta: u32, num_points: u32, first_time: bool) -> u32 {
    // Scale delta down
    delta = if first_time { delta / DAMP } else { delta / 2 };

    // Compensate for the length of the string
    delta += delta / num_points;

    // Find the number of divisions needed
    let mut k = 0u32;
    let base_minus_tmin = BASE - T_MIN;
    let threshold = (base_minus_tmin * T_MAX) / 2;

    while delta > threshold {
        delta /= base_minus_tmin;
        k += BASE;
    }

    k + ((base_minus_tmin + 1) * delta) / (delta + SKEW)
}

/// Calculate the threshold for a given position k and bias.
pub(crate) fn threshold(k: u32, bias: u32) -> u32 {
    if k <= bias + T_MIN {
        T_MIN
    } else if k >= bias + T_MAX {
        T_MAX
    } else {
        k - bias
    }
}

/// Encode a digit value (0-35) to its code point.
///
/// Values 0-25 map to `a`-`z`, or `A`-`Z` when `uppercase` is set;
/// values 26-35 map to `0`-`9`. Returns `None` if the digit is out of
/// range.
pub(crate) fn encode_digit(d: u32, uppercase: bool) -> Option<u8> {
    match d {
        0..=25 if uppercase => Some(b'A' + d as u8),
        0..=25 => Some(b'a' + d as u8),
        26..=35 => Some(b'0' + (d - 26) as u8),
        _ => None,
    }
}

/// Decode a code point to its digit value (0-35).
///
/// Returns `None` if the byte is not in the digit alphabet.
pub(crate) fn decode_digit(byte: u8) -> Option<u32> {
    match byte {
        b'a'..=b'z' => Some(u32::from(byte - b'a')),
        b'A'..=b'Z' => Some(u32::from(byte - b'A')), // Case insensitive
        b'0'..=b'9' => Some(u32::from(byte - b'0') + 26),
        _ => None,
    }
}

/// Case flag recorded for a code point: true for `A`-`Z`.
pub(crate) fn flagged(byte: u8) -> bool {
    byte.wrapping_sub(b'A') < 26
}

/// Force the case of a basic code point according to its flag.
/// Non-letter code points pass through unchanged.
pub(crate) fn encode_basic(byte: u8, uppercase: bool) -> u8 {
    if uppercase {
        byte.to_ascii_uppercase()
    } else {
        byte.to_ascii_lowercase()
    }
}
