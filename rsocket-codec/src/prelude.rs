//! The RSocket prelude.
pub use crate::frame::{Data, Metadata, Payload, PayloadBuilder, PayloadChunks};

pub use crate::encoding::{Encoder, EncoderSet};

#[doc(inline)]
pub use super::mimetype::DEFAULT_MIMETYPE;
