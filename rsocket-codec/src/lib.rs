//! Implementation of the RSocket binary framing protocol.
#![warn(
    rust_2018_idioms,
    missing_docs,
    missing_debug_implementations,
    rustdoc::broken_intra_doc_links
)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(dead_code)]

#[macro_use]
#[doc(hidden)]
pub(crate) mod macros;

mod consts;
mod error;

pub mod encoding;
pub mod framer;
pub mod mimetype;
pub mod prelude;

cfg_doc! {
    #[feature = "frame"]
    pub mod frame;
}

cfg_not! {
    #[feature = "frame"]
    mod frame;
}

pub use self::error::{Code, Error, Result};
pub use self::frame::{Data, Metadata, Payload, PayloadBuilder};
