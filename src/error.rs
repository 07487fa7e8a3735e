use crate::{codec::CodecError, wg::config::ParseError};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("parse error: {0}")]
    ParseError(#[from] ParseError),

    #[error("codec error: {0}")]
    CodecError(#[from] CodecError),

    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("json error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("qr error: {0}")]
    QrError(#[from] qrcode::types::QrError),

    #[error("image error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("clipboard cmd {0} fail: {1:?}")]
    ClipboardFail(&'static str, Option<i32>),

    #[error("config is empty")]
    EmptyConfig,
}
