use super::Flags;
use bytes::Buf;
use std::error::Error as StdError;
use std::fmt;

/// A trait for decoding bytes into a frame.
pub trait Decode {
    /// The value decoded into.
    type Value;

    /// Decodes the given bytes into a frame.
    fn decode<B: Buf>(
        bytes: &mut B,
        stream_id: u32,
        flags: Flags,
    ) -> Result<Self::Value, DecodeError>;
}

/// Errors that can occur when decoding bytes into a specific frame failed.
///
/// Every variant here corresponds to a parse-time invariant violation
/// (stream id sign, zero/non-zero stream id requirements, numeric field
/// bounds, unrecognized frame type, and error code/stream id pairing). All
/// of them are fatal: the decoder never returns a partial frame alongside
/// one of these. UTF-8 validity is not checked here — that is an Encoder
/// Set concern (`crate::encoding`) enforced above the codec, not a wire
/// invariant the frame layout itself imposes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    /// Not enough data is available to parse a frame.
    InComplete,
    /// The decoded frame type is unrecognized.
    UnrecognizedFrameType(u16),
    /// The decoded stream ID is invalid for this frame's type.
    InvalidStreamId {
        /// expected stream ID
        expected: &'static str,
        /// found stream ID
        found: u32,
    },
    /// The stream ID's sign bit was set; stream IDs are 31-bit unsigned
    /// values and the header's top bit MUST be zero.
    NegativeStreamId(i32),
    /// A numeric field fell outside its allowed range.
    OutOfRange {
        /// name of the offending field
        field: &'static str,
        /// the value that was decoded
        value: i64,
        /// the maximum permitted value (the minimum is always 0)
        max: i64,
    },
    /// A field that MUST be strictly positive was zero or negative.
    NotPositive {
        /// name of the offending field
        field: &'static str,
        /// the value that was decoded
        value: i32,
    },
    /// An ERROR frame's code and stream ID disagree about whether the
    /// error is connection-level (stream ID 0) or request-level
    /// (stream ID > 0).
    InvalidErrorCode {
        /// the decoded error code
        code: u32,
        /// the decoded stream ID
        stream_id: u32,
    },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use DecodeError::*;
        match self {
            InComplete => write!(f, "incomplete frame"),
            UnrecognizedFrameType(v) => {
                write!(f, "unrecognized frame type {0:#x}", v)
            }
            InvalidStreamId { expected, found } => write!(
                f,
                "invalid stream ID (expected {}, found {})",
                expected, found
            ),
            NegativeStreamId(v) => {
                write!(f, "stream ID {} has its sign bit set", v)
            }
            OutOfRange { field, value, max } => write!(
                f,
                "field `{}` out of range: {} (expected 0..={})",
                field, value, max
            ),
            NotPositive { field, value } => write!(
                f,
                "field `{}` must be positive, found {}",
                field, value
            ),
            InvalidErrorCode { code, stream_id } => write!(
                f,
                "error code {:#x} is not valid for stream ID {}",
                code, stream_id
            ),
        }
    }
}

impl StdError for DecodeError {}
