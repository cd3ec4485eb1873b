//! Punycode encoding implementation.

use crate::bootstring::{
    adapt_bias, encode_basic, encode_digit, threshold, BASE, DELIMITER, INITIAL_BIAS, INITIAL_N,
    MAX_VALUE,
};
use crate::utf8;
use crate::{ensure_room, Error, Result};

/// Encode a UTF-8 byte sequence as Punycode.
///
/// The input is decomposed first, so ill-formed UTF-8 is carried
/// through as U+FFFD rather than rejected.
///
/// # Examples
///
/// ```
/// use labelcode::encode;
///
/// assert_eq!(encode("bücher".as_bytes()).unwrap(), "bcher-kva");
/// assert_eq!(encode("他们为什么不说中文".as_bytes()).unwrap(), "ihqwcrb4cv8a8dqg056pqjye");
///
/// // Pure-ASCII input is unchanged apart from the trailing delimiter.
/// assert_eq!(encode(b"London").unwrap(), "London-");
/// ```
pub fn encode(input: &[u8]) -> Result<String> {
    encode_with(input, None, None)
}

/// Encode a Unicode string as Punycode.
///
/// Convenience wrapper around [`encode`].
pub fn encode_str(input: &str) -> Result<String> {
    encode(input.as_bytes())
}

/// Encode with an output cap and caller-directed case.
///
/// `max_output` bounds the number of output bytes, delimiter included;
/// exceeding it fails with [`Error::OutputSizeExceeded`]. A flag at
/// position `j` of `case_flags` forces the case of basic code point
/// `j`, or the case of the terminal digit encoding non-basic code
/// point `j`; positions without an entry are left as they are.
///
/// # Examples
///
/// ```
/// use labelcode::encode_with;
///
/// let flags = [true, false, false, false, false];
/// assert_eq!(encode_with(b"hello", None, Some(&flags)).unwrap(), "Hello-");
/// ```
pub fn encode_with(
    input: &[u8],
    max_output: Option<usize>,
    case_flags: Option<&[bool]>,
) -> Result<String> {
    encode_codepoints(&utf8::decompose(input), max_output, case_flags)
}

/// Encode a code point sequence as a Punycode byte string.
fn encode_codepoints(
    input: &[u32],
    max_output: Option<usize>,
    case_flags: Option<&[bool]>,
) -> Result<String> {
    let mut output: Vec<u8> = Vec::with_capacity(input.len());

    // Basic code points are emitted literally, in their original order.
    for (j, &c) in input.iter().enumerate() {
        if c < INITIAL_N {
            ensure_room(output.len(), max_output)?;
            let byte = match case_flags.and_then(|flags| flags.get(j)) {
                Some(&uppercase) => encode_basic(c as u8, uppercase),
                None => c as u8,
            };
            output.push(byte);
        }
    }

    let basic_length = output.len() as u32;
    if basic_length > 0 {
        ensure_room(output.len(), max_output)?;
        output.push(DELIMITER);
    }

    let mut n = INITIAL_N;
    let mut delta: u32 = 0;
    let mut bias = INITIAL_BIAS;
    let mut handled = basic_length;
    let input_length = input.len() as u32;

    while handled < input_length {
        // Everything below n is handled; find the smallest code point
        // still waiting.
        let m = match input.iter().copied().filter(|&c| c >= n).min() {
            Some(m) => m,
            None => break,
        };

        if m - n > (MAX_VALUE - delta) / (handled + 1) {
            return Err(Error::Overflow);
        }
        // Advance the decoder's <n, i> state to <m, 0>.
        delta += (m - n) * (handled + 1);
        n = m;

        for (j, &c) in input.iter().enumerate() {
            if c < n {
                delta += 1;
                if delta > MAX_VALUE {
                    return Err(Error::Overflow);
                }
            }
            if c == n {
                // Represent delta as a generalized variable-length
                // integer.
                let mut q = delta;
                let mut k = BASE;
                loop {
                    let t = threshold(k, bias);
                    if q < t {
                        break;
                    }
                    ensure_room(output.len(), max_output)?;
                    let digit = t + (q - t) % (BASE - t);
                    output.push(encode_digit(digit, false).expect("digit should be < BASE"));
                    q = (q - t) / (BASE - t);
                    k += BASE;
                }

                // The terminal digit carries this code point's case
                // flag.
                let uppercase = case_flags
                    .and_then(|flags| flags.get(j))
                    .copied()
                    .unwrap_or(false);
                ensure_room(output.len(), max_output)?;
                output.push(encode_digit(q, uppercase).expect("digit should be < BASE"));

                bias = adapt_bias(delta, handled + 1, handled == basic_length);
                delta = 0;
                handled += 1;
            }
        }

        delta += 1;
        if delta > MAX_VALUE {
            return Err(Error::Overflow);
        }
        n += 1;
    }

    Ok(String::from_utf8(output).expect("punycode output is ASCII"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codepoints(s: &str) -> Vec<u32> {
        s.chars().map(u32::from).collect()
    }

    #[test]
    fn test_encode_rfc_sample() {
        assert_eq!(
            encode_codepoints(&codepoints("他们为什么不说中文"), None, None),
            Ok("ihqwcrb4cv8a8dqg056pqjye".to_string())
        );
    }

    #[test]
    fn test_encode_mixed() {
        assert_eq!(
            encode_codepoints(&codepoints("bücher"), None, None),
            Ok("bcher-kva".to_string())
        );
    }

    #[test]
    fn test_encode_no_basic() {
        assert_eq!(
            encode_codepoints(&codepoints("ü"), None, None),
            Ok("tda".to_string())
        );
    }

    #[test]
    fn test_encode_pure_ascii() {
        assert_eq!(
            encode_codepoints(&codepoints("London"), None, None),
            Ok("London-".to_string())
        );
        // Mixed case passes through untouched when no flags are given.
        assert_eq!(
            encode_codepoints(&codepoints("Lloyd-Atkinson"), None, None),
            Ok("Lloyd-Atkinson-".to_string())
        );
    }

    #[test]
    fn test_encode_empty() {
        assert_eq!(encode_codepoints(&[], None, None), Ok(String::new()));
        assert_eq!(encode(b"").unwrap(), "");
    }

    #[test]
    fn test_encode_case_flags() {
        let flags = [false, true, false, false, false, false];
        assert_eq!(
            encode_codepoints(&codepoints("bücher"), None, Some(&flags)),
            Ok("bcher-kvA".to_string())
        );

        let flags = [true, false, false, false, false, false];
        assert_eq!(
            encode_codepoints(&codepoints("bücher"), None, Some(&flags)),
            Ok("Bcher-kva".to_string())
        );

        // Flags force case in both directions on basic code points.
        let flags = [true, false, false, false, false];
        assert_eq!(
            encode_codepoints(&codepoints("HELLO"), None, Some(&flags)),
            Ok("Hello-".to_string())
        );
    }

    #[test]
    fn test_encode_short_flags_leave_rest_untouched() {
        let flags = [true];
        assert_eq!(
            encode_codepoints(&codepoints("aBc"), None, Some(&flags)),
            Ok("ABc-".to_string())
        );
    }

    #[test]
    fn test_encode_max_output() {
        assert_eq!(
            encode_codepoints(&codepoints("a"), Some(0), None),
            Err(Error::OutputSizeExceeded)
        );
        // The delimiter byte counts against the cap.
        assert_eq!(
            encode_codepoints(&codepoints("London"), Some(6), None),
            Err(Error::OutputSizeExceeded)
        );
        assert_eq!(
            encode_codepoints(&codepoints("London"), Some(7), None),
            Ok("London-".to_string())
        );
        assert_eq!(
            encode_codepoints(&codepoints("bücher"), Some(8), None),
            Err(Error::OutputSizeExceeded)
        );
    }

    #[test]
    fn test_encode_overflow() {
        // The first delta is scaled by the number of code points
        // handled so far; enough basic padding pushes it past the
        // 32-bit signed bound.
        let mut input = vec![u32::from(b'a'); 2000];
        input.push(0x10FFFF);
        assert_eq!(
            encode_codepoints(&input, None, None),
            Err(Error::Overflow)
        );
    }

    #[test]
    fn test_encode_ill_formed_input_replaced() {
        // Decomposition substitutes U+FFFD before encoding.
        assert_eq!(
            encode(&[0xC0, 0x80]),
            encode("\u{FFFD}\u{FFFD}".as_bytes())
        );
    }
}
