//! Pluggable field encoders for the six payload-bearing fields of a [`Frame`].
//!
//! [`Frame`]: crate::frame::Frame
//!
//! The frame codec itself (`frame::codec`) always stores `data`, `metadata`,
//! `resumeToken`, MIME types and the ERROR `message` as raw [`Bytes`] — that
//! is already the universal wire representation the RSocket binary framing
//! spec describes. An [`EncoderSet`] sits one layer above the codec: it is
//! the capability a caller plugs in to decide whether a given field's bytes
//! are required to be valid UTF-8 text or may be an arbitrary binary blob,
//! and to convert between that field's bytes and a typed value without the
//! codec itself caring.
//!
//! Two standard sets are provided, [`EncoderSet::text`] (the default) and
//! [`EncoderSet::binary`]. Both round-trip every field's bytes unchanged;
//! they differ only in whether `encode`/`decode` enforce UTF-8 validity for
//! `data` and `metadata` (resume tokens are always treated as opaque bytes,
//! matching the wire spec's "opaque bytes" framing of that field).
use bytes::Bytes;
use std::fmt;

/// The field an [`Encoder`] is bound to. Used only for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Field {
    /// The `data` field of a payload-bearing frame.
    Data,
    /// The `metadata` field of a payload-bearing frame.
    Metadata,
    /// SETUP's `dataMimeType` field.
    DataMimeType,
    /// SETUP's `metadataMimeType` field.
    MetadataMimeType,
    /// ERROR's `message` field.
    Message,
    /// SETUP's `resumeToken` field.
    ResumeToken,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Data => "data",
            Field::Metadata => "metadata",
            Field::DataMimeType => "dataMimeType",
            Field::MetadataMimeType => "metadataMimeType",
            Field::Message => "message",
            Field::ResumeToken => "resumeToken",
        };
        f.write_str(name)
    }
}

/// An Encoder rejected a value handed to it (e.g. a UTF-8 encoder given
/// non-UTF-8 bytes). See spec §7's `EncoderMismatch` failure kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderMismatch {
    /// The field whose encoder rejected the value.
    pub field: Field,
}

impl fmt::Display for EncoderMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "encoder for field `{}` rejected the given value", self.field)
    }
}

impl std::error::Error for EncoderMismatch {}

/// A byte-level codec for one field of a [`Frame`](crate::frame::Frame).
///
/// `byte_length` MUST equal the number of bytes `encode` writes into its
/// output — callers rely on this consistency to size buffers up front.
pub trait Encoder: fmt::Debug {
    /// Returns the number of bytes `encode` would write for `value`.
    fn byte_length(&self, value: &Bytes) -> usize {
        value.len()
    }

    /// Validates (and passes through) `value`'s bytes as this field's wire
    /// representation. Returns [`EncoderMismatch`] if `value` isn't valid
    /// for this encoder (e.g. not UTF-8, for a text encoder).
    fn encode(&self, field: Field, value: &Bytes) -> Result<Bytes, EncoderMismatch>;

    /// The inverse of `encode`: validates bytes read off the wire before
    /// they're handed back to the caller as this field's value.
    fn decode(&self, field: Field, bytes: Bytes) -> Result<Bytes, EncoderMismatch> {
        self.encode(field, &bytes)
    }
}

/// Encodes a field as raw, unvalidated bytes. Used by [`EncoderSet::binary`]
/// for `data`, `metadata`, and always for `resumeToken`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryEncoder;

impl Encoder for BinaryEncoder {
    fn encode(&self, _field: Field, value: &Bytes) -> Result<Bytes, EncoderMismatch> {
        Ok(value.clone())
    }
}

/// Encodes a field as UTF-8 text, rejecting bytes that aren't valid UTF-8.
/// Used by [`EncoderSet::text`] for `data`/`metadata`, and by both standard
/// sets for `dataMimeType`, `metadataMimeType`, and `message`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Utf8Encoder;

impl Encoder for Utf8Encoder {
    fn encode(&self, field: Field, value: &Bytes) -> Result<Bytes, EncoderMismatch> {
        std::str::from_utf8(value)
            .map(|_| value.clone())
            .map_err(|_| EncoderMismatch { field })
    }
}

/// A six-field bundle of [`Encoder`]s, one per payload-bearing field of a
/// [`Frame`](crate::frame::Frame): `data`, `metadata`, `dataMimeType`,
/// `metadataMimeType`, `message`, and `resumeToken`.
///
/// The same `EncoderSet` must be used to encode and decode a given frame;
/// mismatches across encode/decode are undefined behavior, and this crate
/// does not attempt to detect them.
pub struct EncoderSet {
    data: Box<dyn Encoder + Send + Sync>,
    metadata: Box<dyn Encoder + Send + Sync>,
    data_mimetype: Box<dyn Encoder + Send + Sync>,
    metadata_mimetype: Box<dyn Encoder + Send + Sync>,
    message: Box<dyn Encoder + Send + Sync>,
    resume_token: Box<dyn Encoder + Send + Sync>,
}

impl fmt::Debug for EncoderSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncoderSet").finish_non_exhaustive()
    }
}

impl EncoderSet {
    /// The Text set: every field, including `data` and `metadata`, is
    /// validated as UTF-8. This is the codec's default when no
    /// `EncoderSet` is supplied (spec §4.2).
    pub fn text() -> Self {
        EncoderSet {
            data: Box::new(Utf8Encoder),
            metadata: Box::new(Utf8Encoder),
            data_mimetype: Box::new(Utf8Encoder),
            metadata_mimetype: Box::new(Utf8Encoder),
            message: Box::new(Utf8Encoder),
            resume_token: Box::new(BinaryEncoder),
        }
    }

    /// The Binary set: `data`, `metadata`, and `resumeToken` are raw byte
    /// blobs; MIME-type fields and `message` remain UTF-8 (they are always
    /// ASCII/UTF-8 strings on the wire per the SETUP and ERROR frame
    /// layouts).
    pub fn binary() -> Self {
        EncoderSet {
            data: Box::new(BinaryEncoder),
            metadata: Box::new(BinaryEncoder),
            data_mimetype: Box::new(Utf8Encoder),
            metadata_mimetype: Box::new(Utf8Encoder),
            message: Box::new(Utf8Encoder),
            resume_token: Box::new(BinaryEncoder),
        }
    }

    /// Builds a custom `EncoderSet` from six explicit per-field encoders.
    #[allow(clippy::too_many_arguments)]
    pub fn custom(
        data: impl Encoder + Send + Sync + 'static,
        metadata: impl Encoder + Send + Sync + 'static,
        data_mimetype: impl Encoder + Send + Sync + 'static,
        metadata_mimetype: impl Encoder + Send + Sync + 'static,
        message: impl Encoder + Send + Sync + 'static,
        resume_token: impl Encoder + Send + Sync + 'static,
    ) -> Self {
        EncoderSet {
            data: Box::new(data),
            metadata: Box::new(metadata),
            data_mimetype: Box::new(data_mimetype),
            metadata_mimetype: Box::new(metadata_mimetype),
            message: Box::new(message),
            resume_token: Box::new(resume_token),
        }
    }

    pub(crate) fn data(&self) -> &dyn Encoder {
        &*self.data
    }

    pub(crate) fn metadata(&self) -> &dyn Encoder {
        &*self.metadata
    }

    pub(crate) fn data_mimetype(&self) -> &dyn Encoder {
        &*self.data_mimetype
    }

    pub(crate) fn metadata_mimetype(&self) -> &dyn Encoder {
        &*self.metadata_mimetype
    }

    pub(crate) fn message(&self) -> &dyn Encoder {
        &*self.message
    }

    pub(crate) fn resume_token(&self) -> &dyn Encoder {
        &*self.resume_token
    }
}

impl Default for EncoderSet {
    /// The codec defaults to the Text set when no `EncoderSet` is supplied.
    fn default() -> Self {
        EncoderSet::text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_set_rejects_non_utf8_data() {
        let set = EncoderSet::text();
        let bad = Bytes::from_static(&[0xFF, 0xFE]);
        assert!(set.data().encode(Field::Data, &bad).is_err());
    }

    #[test]
    fn binary_set_accepts_non_utf8_data() {
        let set = EncoderSet::binary();
        let bad = Bytes::from_static(&[0xFF, 0xFE]);
        assert_eq!(set.data().encode(Field::Data, &bad).unwrap(), bad);
    }

    #[test]
    fn binary_set_still_validates_mimetype_as_utf8() {
        let set = EncoderSet::binary();
        let bad = Bytes::from_static(&[0xFF, 0xFE]);
        assert!(set.data_mimetype().encode(Field::DataMimeType, &bad).is_err());
    }

    #[test]
    fn byte_length_matches_encoded_length() {
        let set = EncoderSet::text();
        let value = Bytes::from_static(b"hello");
        let encoded = set.data().encode(Field::Data, &value).unwrap();
        assert_eq!(set.data().byte_length(&value), encoded.len());
    }

    #[test]
    fn round_trip_is_identity() {
        let set = EncoderSet::binary();
        let value = Bytes::from_static(&[1, 2, 3, 4]);
        let encoded = set.metadata().encode(Field::Metadata, &value).unwrap();
        let decoded = set.metadata().decode(Field::Metadata, encoded).unwrap();
        assert_eq!(decoded, value);
    }
}
