use super::*;
use bytes::{Buf, Bytes};

pub(super) type Result<T> = std::result::Result<T, DecodeError>;

macro_rules! incomplete_if_less_than {
    ($buf:ident, $len:expr) => {
        if $buf.remaining() < $len {
            return Err(DecodeError::InComplete);
        }
    };
}

/// Reads the 4-byte stream ID. The top bit is the sign bit of a signed
/// big-endian int32 on the wire; a set sign bit is a parse-time invariant
/// violation, not a value to mask away.
pub(super) fn eat_stream_id<B: Buf>(buf: &mut B) -> Result<u32> {
    incomplete_if_less_than!(buf, 4);

    let raw = buf.get_i32();
    if raw < 0 {
        return Err(DecodeError::NegativeStreamId(raw));
    }
    Ok(raw as u32)
}

pub(super) fn eat_flags<B: Buf>(buf: &mut B) -> Result<(FrameType, Flags)> {
    incomplete_if_less_than!(buf, 2);

    let flags = buf.get_u16();
    let ft = flags >> 10;
    let frame_type = match FrameType::from_bits(flags) {
        Some(frame_type) => frame_type,
        None => return Err(DecodeError::UnrecognizedFrameType(ft)),
    };
    let flags = Flags::from_bits_truncate(flags);

    Ok((frame_type, flags))
}

pub(super) fn eat_version<B: Buf>(buf: &mut B) -> Result<Version> {
    incomplete_if_less_than!(buf, 4);

    let major = buf.get_u16();
    let minor = buf.get_u16();
    Ok(Version::new(major, minor))
}

pub(super) fn eat_u8<B: Buf>(buf: &mut B) -> Result<u8> {
    incomplete_if_less_than!(buf, 1);

    Ok(buf.get_u8())
}

pub(super) fn eat_u16<B: Buf>(buf: &mut B) -> Result<u16> {
    incomplete_if_less_than!(buf, 2);

    Ok(buf.get_u16())
}

pub(super) fn eat_u24<B: Buf>(buf: &mut B) -> Result<U24> {
    let high = eat_u8(buf)?;
    let low = eat_u16(buf)?;
    Ok(U24::new(high, low))
}

pub(super) fn eat_u32<B: Buf>(buf: &mut B) -> Result<u32> {
    incomplete_if_less_than!(buf, 4);

    Ok(buf.get_u32())
}

/// Reads a plain 8-byte unsigned integer with no bit masking. Used for the
/// KEEPALIVE/RESUME/RESUME_OK position fields, which are unbounded (unlike
/// `keepAlive`/`lifetime`, which are genuinely 31-bit fields sharing their
/// top bit with a reserved wire bit).
pub(super) fn eat_u64<B: Buf>(buf: &mut B) -> Result<u64> {
    incomplete_if_less_than!(buf, 8);

    Ok(buf.get_u64())
}

/// Reads a 4-byte field and rejects values above `max` (the minimum is
/// always 0). Used for `keepAlive`, `lifetime`, and the ERROR `code` field,
/// all of which are bounded to `[0, 2^31 - 1]`.
pub(super) fn eat_bounded_u32<B: Buf>(
    buf: &mut B,
    field: &'static str,
    max: u32,
) -> Result<u32> {
    incomplete_if_less_than!(buf, 4);

    let value = buf.get_u32();
    if value > max {
        return Err(DecodeError::OutOfRange {
            field,
            value: value as i64,
            max: max as i64,
        });
    }
    Ok(value)
}

/// Reads a signed 4-byte field that MUST be strictly positive (`requestN`).
pub(super) fn eat_positive_i32<B: Buf>(
    buf: &mut B,
    field: &'static str,
) -> Result<i32> {
    incomplete_if_less_than!(buf, 4);

    let value = buf.get_i32();
    if value <= 0 {
        return Err(DecodeError::NotPositive { field, value });
    }
    Ok(value)
}

pub(super) fn eat_bytes<B: Buf>(buf: &mut B, len: usize) -> Result<Bytes> {
    incomplete_if_less_than!(buf, len);

    Ok(buf.copy_to_bytes(len))
}

pub(super) fn eat_payload<B: Buf>(
    buf: &mut B,
    flags: Flags,
) -> Result<Payload> {
    let metadata_len = if flags.contains(Flags::METADATA) {
        eat_u24(buf)?.into_usize()
    } else {
        0
    };
    let metadata = if metadata_len > 0 {
        Some(eat_bytes(buf, metadata_len)?)
    } else if flags.contains(Flags::METADATA) {
        Some(Bytes::new())
    } else {
        None
    };
    let data = match buf.remaining() {
        0 => None,
        len => Some(eat_bytes(buf, len)?),
    };
    Ok(Payload::new(metadata, data))
}

/// Reads the unconditional two-byte length + token bytes used by SETUP's
/// `resumeToken` field (SPEC_FULL §4.4). A length of 0 decodes to `None`,
/// matching the convention the rest of the crate uses for absent payload
/// fields.
pub(super) fn eat_resume_token<B: Buf>(buf: &mut B) -> Result<Option<Bytes>> {
    let token_len = eat_u16(buf)?;
    if token_len == 0 {
        Ok(None)
    } else {
        Ok(Some(eat_bytes(buf, token_len as usize)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::{BufMut, BytesMut};

    #[test]
    fn test_eat_flags() {
        let mut invalid_flags = BytesMut::new();
        invalid_flags.put_u16(
            (0x2F << 10)
                | Flags::METADATA.bits()
                | Flags::IGNORE.bits()
                | Flags::RESUME.bits(),
        );

        let mut valid_flags = BytesMut::new();
        valid_flags.put_u16(
            FrameType::SETUP.bits()
                | Flags::METADATA.bits()
                | Flags::IGNORE.bits()
                | Flags::RESUME.bits()
                | 0b01
                | 0b10,
        );

        assert_eq!(
            eat_flags(&mut invalid_flags),
            Err(DecodeError::UnrecognizedFrameType(0x2F))
        );
        assert_eq!(
            eat_flags(&mut valid_flags),
            Ok((
                FrameType::SETUP,
                Flags::METADATA | Flags::IGNORE | Flags::RESUME
                    | Flags::from_bits_truncate(0b01 | 0b10)
            ))
        );
    }

    #[test]
    fn test_eat_stream_id_rejects_negative() {
        let mut buf = BytesMut::new();
        buf.put_i32(-1);
        assert_eq!(
            eat_stream_id(&mut buf),
            Err(DecodeError::NegativeStreamId(-1))
        );
    }

    #[test]
    fn test_eat_bounded_u32_rejects_out_of_range() {
        let mut buf = BytesMut::new();
        buf.put_u32(0x8000_0000);
        assert_eq!(
            eat_bounded_u32(&mut buf, "keepAlive", MAX_U31),
            Err(DecodeError::OutOfRange {
                field: "keepAlive",
                value: 0x8000_0000,
                max: MAX_U31 as i64,
            })
        );
    }

    #[test]
    fn test_eat_positive_i32_rejects_zero_and_negative() {
        let mut zero = BytesMut::new();
        zero.put_i32(0);
        assert_eq!(
            eat_positive_i32(&mut zero, "requestN"),
            Err(DecodeError::NotPositive { field: "requestN", value: 0 })
        );

        let mut negative = BytesMut::new();
        negative.put_i32(-5);
        assert_eq!(
            eat_positive_i32(&mut negative, "requestN"),
            Err(DecodeError::NotPositive { field: "requestN", value: -5 })
        );
    }
}
