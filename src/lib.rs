//! Labelcode: Punycode (RFC 3492) transcoding between Unicode text and
//! ASCII.
//!
//! This is the raw transform underlying Internationalized Domain Names:
//! basic (ASCII) code points pass through literally, and everything
//! else is folded into a run of base-36 digits after the last `-`.
//! Splitting domain names into labels, ACE prefix handling, and IDNA
//! validation are the caller's business; this crate only transcodes.
//!
//! # Key Properties
//!
//! - Round trip: `decode(encode(t)) == t` for any Unicode text `t`
//! - Total decomposition: ill-formed UTF-8 input to [`encode`] becomes
//!   U+FFFD rather than an error
//! - Checked arithmetic: all accumulators are bounded by the 32-bit
//!   signed range and fail with [`Error::Overflow`] instead of wrapping
//!
//! # Examples
//!
//! ```
//! use labelcode::{decode, encode};
//!
//! assert_eq!(encode("bücher".as_bytes()).unwrap(), "bcher-kva");
//! assert_eq!(decode(b"bcher-kva").unwrap(), "bücher");
//!
//! // Pure-ASCII input keeps its bytes, plus the trailing delimiter.
//! assert_eq!(encode(b"London").unwrap(), "London-");
//! assert_eq!(decode(b"London-").unwrap(), "London");
//! ```
//!
//! The `_with` forms add an output-size cap and the RFC 3492 case-flag
//! side channel:
//!
//! ```
//! use labelcode::{decode_with, encode_with};
//!
//! let mut flags = Vec::new();
//! decode_with(b"Hello-", None, Some(&mut flags)).unwrap();
//! assert_eq!(flags, [true, false, false, false, false]);
//!
//! assert_eq!(encode_with(b"hello", None, Some(&flags)).unwrap(), "Hello-");
//! ```

mod bootstring;
mod decode;
mod encode;
mod utf8;

pub use decode::{decode, decode_with};
pub use encode::{encode, encode_str, encode_with};

/// Errors that can occur while transcoding.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Malformed digit code point, non-ASCII byte in the basic prefix,
    /// input truncated mid digit run, or a decoded value that is not a
    /// Unicode scalar value.
    #[error("invalid input")]
    InvalidInput,

    /// An accumulator would exceed the 32-bit signed bound.
    #[error("arithmetic overflow")]
    Overflow,

    /// The caller-supplied output size limit would be exceeded.
    #[error("output size exceeded")]
    OutputSizeExceeded,
}

/// Result type alias for transcoding operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Room check before each output write.
pub(crate) fn ensure_room(len: usize, max_output: Option<usize>) -> Result<()> {
    match max_output {
        Some(max) if len >= max => Err(Error::OutputSizeExceeded),
        _ => Ok(()),
    }
}
