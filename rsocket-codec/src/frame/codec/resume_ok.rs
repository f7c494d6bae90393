use super::*;
use bytes::{Buf, BufMut, BytesMut};

/// The resume_ok frame.
///
/// # Frame Contents
///
/// The resume_ok frame is structured as follows:
///
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                         Stream ID = 0                         |
/// +-----------+-+-+---------------+-------------------------------+
/// |Frame Type |0|0|    Flags      |
/// +-------------------------------+-------------------------------+
/// |0|                                                             |
/// +               Last Received Client Position                   +
/// |                                                               |
/// +---------------------------------------------------------------+
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeOkFrame {
    flags: Flags,
    last_received_client_position: u64,
}

impl ResumeOkFrame {
    /// RESUME OK frames MUST always use Stream ID 0 as they pertain to the connection.
    pub const STREAM_ID: u32 = 0;

    /// Create a new `ResumeOk` frame.
    pub fn new(last_received_client_position: u64) -> Self {
        ResumeOkFrame { flags: Flags::empty(), last_received_client_position }
    }

    /// Returns the last implied position the server received from the client.
    pub fn last_received_server_position(&self) -> u64 {
        self.last_received_client_position
    }
}

impl Encode for ResumeOkFrame {
    fn encode(&self, buf: &mut BytesMut) {
        buf.put_u32(0);
        buf.put_u16(FrameType::RESUME_OK.bits() | self.flags.bits());
        buf.put_u64(self.last_received_client_position);
    }

    fn len(&self) -> usize {
        // len(stream_id): 4
        // len(flags): 2
        // len(last_received_client_position): 8
        14
    }
}

impl Decode for ResumeOkFrame {
    type Value = Self;

    fn decode<B: Buf>(
        buf: &mut B,
        _stream_id: u32,
        flags: Flags,
    ) -> Result<Self::Value> {
        let last_received_client_position = eat_u64(buf)?;
        Ok(ResumeOkFrame { flags, last_received_client_position })
    }
}
