use super::*;
use bytes::{Buf, BufMut, Bytes, BytesMut};

/// The payload frame.
///
/// # Frame Contents
///
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                           Stream ID                           |
/// +-----------+-+-+-+-+-+---------+-------------------------------+
/// |Frame Type |0|M|F|C|N|  Flags  |
/// +-------------------------------+-------------------------------+
///                      Metadata & Data
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadFrame {
    stream_id: u32,
    flags: Flags,
    payload: Payload,
}

impl PayloadFrame {
    /// Type of this frame.
    pub const TYPE: FrameType = FrameType::PAYLOAD;

    /// Create a new `Payload` frame.
    ///
    /// - `stream_id` MUST be <= [`MAX_U31`].
    /// - flag `follows` means more fragments follow this fragment.
    /// - flag `complete` indicates stream completion. If set, `on_complete()` will be invoked on
    /// Subscriber/Observer.
    /// - flag `next` indicates Next (Payload Data and/or Metadata present). If set,
    /// `on_next(Payload)` will be invoked on Subscriber/Observer.
    ///
    /// A PAYLOAD MUST NOT have both (C)complete and (N)ext empty (false). See [`Payload Frame`]
    /// for more details.
    ///
    /// [`Payload Frame`]: https://rsocket.io/about/protocol/#payload-frame-0x0a
    pub fn new(stream_id: u32, mut flags: Flags, payload: Payload) -> Self {
        debug_assert_max_u31!(stream_id);
        let stream_id = stream_id & MAX_U31;
        flags &= Flags::FOLLOWS | Flags::COMPLETE | Flags::NEXT;
        if payload.has_metadata() {
            flags |= Flags::METADATA
        }
        PayloadFrame { stream_id, flags, payload }
    }

    /// Returns the stream ID of this frame.
    pub fn stream_id(&self) -> u32 {
        self.stream_id
    }

    /// Returns true if this frame has the FOLLOWS flag set.
    pub fn is_follows(&self) -> bool {
        self.flags.contains(Flags::FOLLOWS)
    }

    /// Returns true if this frame has the COMPLETE flag set.
    pub fn is_complete(&self) -> bool {
        self.flags.contains(Flags::COMPLETE)
    }

    /// Returns true if this frame has the NEXT flag set.
    pub fn is_next(&self) -> bool {
        self.flags.contains(Flags::NEXT)
    }

    /// Returns the metadata attached to this frame, if any.
    pub fn metadata(&self) -> Option<&Bytes> {
        self.payload.metadata()
    }

    /// Returns the data attached to this frame, if any.
    pub fn data(&self) -> Option<&Bytes> {
        self.payload.data()
    }

    /// Returns the payload attached to this frame.
    pub fn payload(self) -> Payload {
        self.payload
    }
}

impl Encode for PayloadFrame {
    fn encode(&self, buf: &mut BytesMut) {
        buf.put_u32(self.stream_id);
        buf.put_u16(FrameType::PAYLOAD.bits() | self.flags.bits());
        self.payload.encode_framed(buf, self.flags);
    }

    fn len(&self) -> usize {
        // len(stream_id): 4
        // len(flags): 2
        // len(payload section)
        6 + self.payload.framed_len(self.flags)
    }
}

impl Decode for PayloadFrame {
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
        let payload = eat_payload(buf, flags)?;
        Ok(PayloadFrame { stream_id, flags, payload })
    }
}
