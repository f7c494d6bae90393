//! Length-prefixed framing and the crate's top-level parse/emit API.
//!
//! RSocket frames are carried over a transport (TCP, WebSocket, ...) as a
//! 24-bit big-endian length prefix followed by that many bytes of frame
//! body. This module implements that framing convention on top of
//! [`Frame::encode`]/[`Frame::decode`], and wires an optional [`EncoderSet`]
//! into both directions so callers can choose whether `data`/`metadata` are
//! required to be UTF-8 text (the default) or treated as opaque bytes.
use crate::encoding::{EncoderSet, Field};
use crate::frame::{Encode, Frame, U24};
use crate::Result;
use bytes::{Bytes, BytesMut};

/// Encodes `frame`'s wire bytes, with no length prefix.
///
/// `encoder` defaults to [`EncoderSet::text`] when `None` is given, matching
/// the codec's default field encoding.
pub fn emit_frame(frame: &Frame, encoder: Option<&EncoderSet>) -> Result<Bytes> {
    let owned;
    let encoder = match encoder {
        Some(e) => e,
        None => {
            owned = EncoderSet::text();
            &owned
        }
    };
    validate_frame(frame, encoder)?;
    Ok(frame.to_bytes())
}

/// Encodes `frame` prefixed with its 24-bit big-endian byte length.
///
/// # Panics
///
/// Panics if the encoded frame is longer than [`U24::MAX`] bytes. A single
/// RSocket frame that large is already a protocol violation the rest of the
/// codec has no way to express; every other 24-bit length write in this
/// crate (e.g. payload metadata lengths) has the same limit.
pub fn emit_length_prefixed(
    frame: &Frame,
    encoder: Option<&EncoderSet>,
) -> Result<Bytes> {
    let body = emit_frame(frame, encoder)?;
    let mut buf = BytesMut::with_capacity(3 + body.len());
    U24::from_usize(body.len()).encode(&mut buf);
    buf.extend_from_slice(&body);
    Ok(buf.freeze())
}

/// Decodes a single frame from `bytes`, which MUST contain exactly one
/// frame's body (no length prefix, no trailing bytes from another frame).
///
/// `encoder` defaults to [`EncoderSet::text`] when `None` is given.
pub fn parse_frame(bytes: Bytes, encoder: Option<&EncoderSet>) -> Result<Frame> {
    let owned;
    let encoder = match encoder {
        Some(e) => e,
        None => {
            owned = EncoderSet::text();
            &owned
        }
    };
    let mut buf = bytes;
    let frame = Frame::decode(&mut buf)?;
    validate_frame(&frame, encoder)?;
    Ok(frame)
}

/// Reads a 24-bit big-endian length prefix off the front of `bytes`, then
/// decodes exactly that many following bytes as a single frame. Returns an
/// error ([`crate::Error::is_decode`]) if `bytes` doesn't contain a full
/// length-prefixed frame.
pub fn parse_length_prefixed(
    bytes: Bytes,
    encoder: Option<&EncoderSet>,
) -> Result<Frame> {
    if bytes.len() < 3 {
        return Err(crate::frame::DecodeError::InComplete.into());
    }
    let len = read_u24(&bytes[0..3]);
    let body = bytes.slice(3..);
    if body.len() != len {
        return Err(crate::frame::DecodeError::InComplete.into());
    }
    parse_frame(body, encoder)
}

/// Parses as many complete length-prefixed frames as `buffer` holds,
/// returning the decoded frames along with whatever trailing bytes remain
/// (a partial length prefix, or a prefix whose body hasn't fully arrived
/// yet). Unlike [`parse_frame`]/[`parse_length_prefixed`], a buffer that
/// ends mid-frame is not an error — the leftover bytes are meant to be
/// prepended to the next chunk read off the transport.
pub fn parse_stream(
    mut buffer: Bytes,
    encoder: Option<&EncoderSet>,
) -> Result<(Vec<Frame>, Bytes)> {
    let owned;
    let encoder = match encoder {
        Some(e) => e,
        None => {
            owned = EncoderSet::text();
            &owned
        }
    };

    let mut frames = Vec::new();
    loop {
        if buffer.len() < 3 {
            break;
        }
        let len = read_u24(&buffer[0..3]);
        if 3 + len > buffer.len() {
            break;
        }
        let body = buffer.slice(3..3 + len);
        let mut cursor = body;
        let frame = Frame::decode(&mut cursor)?;
        validate_frame(&frame, encoder)?;
        frames.push(frame);
        buffer = buffer.slice(3 + len..);
    }
    Ok((frames, buffer))
}

fn read_u24(bytes: &[u8]) -> usize {
    ((bytes[0] as usize) << 16) | ((bytes[1] as usize) << 8) | (bytes[2] as usize)
}

/// Runs every payload-bearing field of `frame` through `encoder`'s matching
/// [`Encoder`](crate::encoding::Encoder), surfacing the first
/// [`EncoderMismatch`](crate::encoding::EncoderMismatch) as a [`crate::Error`].
fn validate_frame(frame: &Frame, encoder: &EncoderSet) -> Result<()> {
    match frame {
        Frame::Setup(s) => {
            encoder
                .metadata_mimetype()
                .encode(Field::MetadataMimeType, &s.metadata_mimetype)?;
            encoder
                .data_mimetype()
                .encode(Field::DataMimeType, &s.data_mimetype)?;
            if let Some(token) = s.resume_token() {
                encoder.resume_token().encode(Field::ResumeToken, token)?;
            }
            if let Some(metadata) = s.metadata() {
                encoder.metadata().encode(Field::Metadata, metadata)?;
            }
            if let Some(data) = s.data() {
                encoder.data().encode(Field::Data, data)?;
            }
        }
        Frame::Error(e) => {
            if let Some(message) = e.data() {
                encoder.message().encode(Field::Message, message)?;
            }
        }
        Frame::Lease(l) => {
            if let Some(metadata) = l.metadata() {
                encoder.metadata().encode(Field::Metadata, metadata)?;
            }
        }
        Frame::Keepalive(k) => {
            if let Some(data) = k.data() {
                encoder.data().encode(Field::Data, data)?;
            }
        }
        Frame::RequestResponse(r) => {
            if let Some(metadata) = r.metadata() {
                encoder.metadata().encode(Field::Metadata, metadata)?;
            }
            if let Some(data) = r.data() {
                encoder.data().encode(Field::Data, data)?;
            }
        }
        Frame::RequestFnf(r) => {
            if let Some(metadata) = r.metadata() {
                encoder.metadata().encode(Field::Metadata, metadata)?;
            }
            if let Some(data) = r.request_data() {
                encoder.data().encode(Field::Data, data)?;
            }
        }
        Frame::RequestStream(r) => {
            if let Some(metadata) = r.metadata() {
                encoder.metadata().encode(Field::Metadata, metadata)?;
            }
            if let Some(data) = r.data() {
                encoder.data().encode(Field::Data, data)?;
            }
        }
        Frame::RequestChannel(r) => {
            if let Some(metadata) = r.metadata() {
                encoder.metadata().encode(Field::Metadata, metadata)?;
            }
            if let Some(data) = r.data() {
                encoder.data().encode(Field::Data, data)?;
            }
        }
        Frame::Payload(p) => {
            if let Some(metadata) = p.metadata() {
                encoder.metadata().encode(Field::Metadata, metadata)?;
            }
            if let Some(data) = p.data() {
                encoder.data().encode(Field::Data, data)?;
            }
        }
        Frame::MetadataPush(m) => {
            encoder.metadata().encode(Field::Metadata, m.metadata())?;
        }
        Frame::Resume(r) => {
            encoder.resume_token().encode(Field::ResumeToken, r.resume_token())?;
        }
        Frame::RequestN(_) | Frame::Cancel(_) | Frame::ResumeOk(_) => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::codec::{RequestFnfFrame, SetupFrame};
    use crate::frame::Payload;

    fn fnf_with(data: Bytes) -> Frame {
        Frame::RequestFnf(RequestFnfFrame::new(
            1,
            false,
            Payload::builder().set_data(data).build(),
        ))
    }

    #[test]
    fn emit_then_parse_round_trips() {
        let frame = fnf_with(Bytes::from_static(b"hello"));
        let bytes = emit_frame(&frame, None).unwrap();
        let decoded = parse_frame(bytes, None).unwrap();
        assert_eq!(decoded, frame);
    }

    #[test]
    fn length_prefixed_round_trips() {
        let frame = fnf_with(Bytes::from_static(b"hello"));
        let bytes = emit_length_prefixed(&frame, None).unwrap();
        let decoded = parse_length_prefixed(bytes, None).unwrap();
        assert_eq!(decoded, frame);
    }

    #[test]
    fn text_encoder_rejects_non_utf8_data() {
        let frame = fnf_with(Bytes::from_static(&[0xFF, 0xFE]));
        assert!(emit_frame(&frame, None).is_err());
    }

    #[test]
    fn binary_encoder_accepts_non_utf8_data() {
        let frame = fnf_with(Bytes::from_static(&[0xFF, 0xFE]));
        let bytes =
            emit_frame(&frame, Some(&EncoderSet::binary())).unwrap();
        let decoded =
            parse_frame(bytes, Some(&EncoderSet::binary())).unwrap();
        assert_eq!(decoded, frame);
    }

    #[test]
    fn parse_stream_splits_multiple_frames_and_keeps_leftover() {
        let a = fnf_with(Bytes::from_static(b"first"));
        let b = fnf_with(Bytes::from_static(b"second"));

        let mut buffer = BytesMut::new();
        buffer.extend_from_slice(&emit_length_prefixed(&a, None).unwrap());
        buffer.extend_from_slice(&emit_length_prefixed(&b, None).unwrap());
        buffer.extend_from_slice(&[0x00, 0x00]); // partial trailing length prefix

        let (frames, leftover) = parse_stream(buffer.freeze(), None).unwrap();
        assert_eq!(frames, vec![a, b]);
        assert_eq!(leftover.len(), 2);
    }

    #[test]
    fn parse_stream_waits_for_full_frame_body() {
        let frame = fnf_with(Bytes::from_static(b"hello"));
        let full = emit_length_prefixed(&frame, None).unwrap();
        let partial = full.slice(0..full.len() - 1);

        let (frames, leftover) = parse_stream(partial.clone(), None).unwrap();
        assert!(frames.is_empty());
        assert_eq!(leftover, partial);
    }

    #[test]
    fn setup_frame_mimetype_validated_by_encoder() {
        let setup = SetupFrame::builder()
            .set_data_mimetype("application/octet-stream")
            .build();
        let frame = Frame::Setup(setup);
        assert!(emit_frame(&frame, None).is_ok());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::frame::codec::RequestFnfFrame;
    use crate::frame::{Payload, MAX_U31};
    use proptest::prelude::*;

    fn fnf_with(stream_id: u32, data: Vec<u8>) -> Frame {
        Frame::RequestFnf(RequestFnfFrame::new(
            stream_id,
            false,
            Payload::builder().set_data(Bytes::from(data)).build(),
        ))
    }

    proptest! {
        /// `parseFrame(emitFrame(f)) == f` (SPEC_FULL §8.1) for arbitrary
        /// stream ids and data bytes, using the permissive binary encoder so
        /// the data byte generator isn't constrained to valid UTF-8.
        #[test]
        fn emit_parse_round_trips(
            stream_id in 1u32..=MAX_U31,
            data in prop::collection::vec(any::<u8>(), 0..64),
        ) {
            let frame = fnf_with(stream_id, data);
            let bytes = emit_frame(&frame, Some(&EncoderSet::binary())).unwrap();
            let decoded = parse_frame(bytes, Some(&EncoderSet::binary())).unwrap();
            prop_assert_eq!(decoded, frame);
        }

        /// Same property through the length-prefixed entry points.
        #[test]
        fn length_prefixed_round_trips(
            stream_id in 1u32..=MAX_U31,
            data in prop::collection::vec(any::<u8>(), 0..64),
        ) {
            let frame = fnf_with(stream_id, data);
            let bytes = emit_length_prefixed(&frame, Some(&EncoderSet::binary())).unwrap();
            let decoded = parse_length_prefixed(bytes, Some(&EncoderSet::binary())).unwrap();
            prop_assert_eq!(decoded, frame);
        }

        /// `parse_stream` must reconstruct the same frame sequence no matter
        /// where the underlying transport happens to split the byte stream
        /// (SPEC_FULL §4.6's chunk-independence requirement).
        #[test]
        fn parse_stream_is_chunk_independent(
            datas in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..32), 1..5),
            split_at in 0usize..500,
        ) {
            let frames: Vec<Frame> = datas
                .iter()
                .enumerate()
                .map(|(i, d)| fnf_with((i as u32) + 1, d.clone()))
                .collect();

            let mut buffer = BytesMut::new();
            for f in &frames {
                buffer.extend_from_slice(
                    &emit_length_prefixed(f, Some(&EncoderSet::binary())).unwrap(),
                );
            }
            let whole = buffer.freeze();
            let split = split_at.min(whole.len());
            let (first, second) = (whole.slice(0..split), whole.slice(split..));

            let (mut parsed, leftover) =
                parse_stream(first, Some(&EncoderSet::binary())).unwrap();
            let mut rest = BytesMut::new();
            rest.extend_from_slice(&leftover);
            rest.extend_from_slice(&second);
            let (mut parsed2, leftover2) =
                parse_stream(rest.freeze(), Some(&EncoderSet::binary())).unwrap();
            parsed.append(&mut parsed2);

            prop_assert_eq!(parsed, frames);
            prop_assert!(leftover2.is_empty());
        }
    }
}
