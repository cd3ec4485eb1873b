//! Punycode decoding implementation.

use crate::bootstring::{
    adapt_bias, decode_digit, flagged, threshold, BASE, DELIMITER, INITIAL_BIAS, INITIAL_N,
    MAX_VALUE,
};
use crate::utf8;
use crate::{ensure_room, Error, Result};

/// Decode a Punycode byte string back to Unicode.
///
/// # Examples
///
/// ```
/// use labelcode::decode;
///
/// assert_eq!(decode(b"bcher-kva").unwrap(), "bücher");
/// assert_eq!(decode(b"ihqwcrb4cv8a8dqg056pqjye").unwrap(), "他们为什么不说中文");
/// assert_eq!(decode(b"London-").unwrap(), "London");
/// ```
pub fn decode(input: &[u8]) -> Result<String> {
    decode_with(input, None, None)
}

/// Decode a Punycode byte string with an output cap and case capture.
///
/// `max_output` bounds the number of output code points; exceeding it
/// fails with [`Error::OutputSizeExceeded`]. `case_flags`, when
/// supplied, is cleared and repopulated with one flag per output code
/// point: the original case for each basic code point, and the case of
/// the terminal digit for each inserted one.
///
/// # Examples
///
/// ```
/// use labelcode::decode_with;
///
/// let mut flags = Vec::new();
/// let decoded = decode_with(b"Bcher-kvA", None, Some(&mut flags)).unwrap();
/// assert_eq!(decoded, "bücher");
/// assert_eq!(flags, [true, true, false, false, false, false]);
/// ```
pub fn decode_with(
    input: &[u8],
    max_output: Option<usize>,
    case_flags: Option<&mut Vec<bool>>,
) -> Result<String> {
    let codepoints = decode_codepoints(input, max_output, case_flags)?;

    let mut bytes = Vec::with_capacity(codepoints.len() * 4);
    for &codepoint in &codepoints {
        utf8::encode_codepoint(codepoint, &mut bytes);
    }
    Ok(String::from_utf8(bytes).expect("decoded scalar values are valid UTF-8"))
}

/// Decode to the intermediate code point sequence.
fn decode_codepoints(
    input: &[u8],
    max_output: Option<usize>,
    mut case_flags: Option<&mut Vec<bool>>,
) -> Result<Vec<u32>> {
    if let Some(flags) = case_flags.as_mut() {
        flags.clear();
    }

    // The basic prefix runs up to the last delimiter. A delimiter at
    // position 0 belongs to the extended region instead.
    let (basic, extended) = match input.iter().rposition(|&b| b == DELIMITER) {
        Some(position) if position > 0 => (&input[..position], &input[position + 1..]),
        _ => (&input[..0], input),
    };

    let mut output: Vec<u32> = Vec::with_capacity(input.len());

    for &byte in basic {
        if byte >= 0x80 {
            return Err(Error::InvalidInput);
        }
        ensure_room(output.len(), max_output)?;
        if let Some(flags) = case_flags.as_mut() {
            flags.push(flagged(byte));
        }
        output.push(u32::from(byte));
    }

    let mut n = INITIAL_N;
    let mut bias = INITIAL_BIAS;
    let mut i: u32 = 0;
    let mut iter = extended.iter().copied();

    while let Some(first) = iter.next() {
        let previous_i = i;
        let mut weight: u32 = 1;
        let mut k = BASE;
        let mut byte = first;

        // Decode a generalized variable-length integer into i, keeping
        // the terminal digit for its case flag.
        let last_digit = loop {
            let digit = decode_digit(byte).ok_or(Error::InvalidInput)?;
            if digit > (MAX_VALUE - i) / weight {
                return Err(Error::Overflow);
            }
            i += digit * weight;
            let t = threshold(k, bias);
            if digit < t {
                break byte;
            }
            if weight > MAX_VALUE / (BASE - t) {
                return Err(Error::Overflow);
            }
            weight *= BASE - t;
            k += BASE;
            // Running out of input mid-chain is malformed.
            byte = iter.next().ok_or(Error::InvalidInput)?;
        };

        let length = output.len() as u32;
        bias = adapt_bias(i - previous_i, length + 1, previous_i == 0);

        // i wraps around from length+1 to 0, bumping n each time.
        if i / (length + 1) > MAX_VALUE - n {
            return Err(Error::Overflow);
        }
        n += i / (length + 1);
        i %= length + 1;

        // Surrogates and values past U+10FFFF cannot become text.
        if char::from_u32(n).is_none() {
            return Err(Error::InvalidInput);
        }
        ensure_room(output.len(), max_output)?;
        if let Some(flags) = case_flags.as_mut() {
            flags.insert(i as usize, flagged(last_digit));
        }
        output.insert(i as usize, n);
        i += 1;
    }

    Ok(output)
}
