use super::*;
use bytes::{Buf, BufMut, Bytes, BytesMut};

/// The meatadata_push frame.
///
/// A Metadata Push frame can be used to send asynchronous metadata notifications from a Requester
/// or Responder to its peer.
///
/// # Frame Contents
///
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                         Stream ID = 0                         |
/// +-----------+-+-+---------------+-------------------------------+
/// |Frame Type |0|1|     Flags     |
/// +-------------------------------+-------------------------------+
///                             Metadata
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataPushFrame {
    flags: Flags,
    metadata: Bytes,
}

impl MetadataPushFrame {
    /// METADATA_PUSH frames MUST always use Stream ID 0 as they pertain to the Connection.
    pub const STREAM_ID: u32 = 0;

    /// Type of this frame.
    pub const TYPE: FrameType = FrameType::METADATA_PUSH;

    /// Create a `MetadataPush` frame.
    pub fn new(metadata: Bytes) -> Self {
        MetadataPushFrame { flags: Flags::METADATA, metadata }
    }

    /// Returns the metadata attached to this frame, if any.
    pub fn metadata(&self) -> &Bytes {
        &self.metadata
    }
}

impl Encode for MetadataPushFrame {
    fn encode(&self, buf: &mut BytesMut) {
        buf.put_u32(0);
        buf.put_u16(FrameType::METADATA_PUSH.bits() | self.flags.bits());
        buf.put_slice(&self.metadata);
    }

    fn len(&self) -> usize {
        // len(stream_id): 4
        // len(flags): 2
        // len(metadata)
        6 + self.metadata.len()
    }
}

impl Decode for MetadataPushFrame {
    type Value = Self;

    fn decode<B: Buf>(
        buf: &mut B,
        _stream_id: u32,
        flags: Flags,
    ) -> Result<Self::Value> {
        let metadata = eat_bytes(buf, buf.remaining())?;
        Ok(MetadataPushFrame { flags, metadata })
    }
}
