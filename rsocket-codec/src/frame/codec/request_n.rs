use super::*;
use bytes::{Buf, BufMut, BytesMut};

/// The request_n frame.
///
/// # Frame Contents
///
/// The request_n frame is structured as follows:
///
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                           Stream ID                           |
/// +-----------+-+-+---------------+-------------------------------+
/// |Frame Type |0|0|     Flags     |
/// +-------------------------------+-------------------------------+
/// |0|                         Request N                           |
/// +---------------------------------------------------------------+
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestNFrame {
    stream_id: u32,
    flags: Flags,
    request_n: i32,
}

impl RequestNFrame {
    /// Type of this frame.
    pub const TYPE: FrameType = FrameType::REQUEST_N;

    /// Create a new `RequestN` frame.
    ///
    /// - `stream_id` MUST be <= [`MAX_U31`].
    /// - `request_n` represents the number of items to request. Value MUST be > 0.
    pub fn new(stream_id: u32, request_n: i32) -> Self {
        debug_assert_max_u31!(stream_id);
        debug_assert!(request_n > 0, "request_n MUST be positive");
        let stream_id = stream_id & MAX_U31;
        RequestNFrame { stream_id, flags: Flags::empty(), request_n }
    }

    /// Returns the stream ID of this frame.
    pub fn stream_id(&self) -> u32 {
        self.stream_id
    }

    /// Returns the number of items to request.
    pub fn request_n(&self) -> i32 {
        self.request_n
    }
}

impl Encode for RequestNFrame {
    fn encode(&self, buf: &mut BytesMut) {
        buf.put_u32(self.stream_id);
        buf.put_u16(FrameType::REQUEST_N.bits() | self.flags.bits());
        buf.put_i32(self.request_n);
    }

    fn len(&self) -> usize {
        // len(stream_id): 4
        // len(flags): 2
        // len(request_n): 4
        10
    }
}

impl Decode for RequestNFrame {
    type Value = Self;

    fn decode<B: Buf>(
        buf: &mut B,
        stream_id: u32,
        flags: Flags,
    ) -> Result<Self::Value> {
        if stream_id == 0 {
            return Err(DecodeError::InvalidStreamId {
                expected: "> 0",
                found: stream_id,
            });
        }
        let request_n = eat_positive_i32(buf, "requestN")?;
        Ok(RequestNFrame { stream_id, flags, request_n })
    }
}
