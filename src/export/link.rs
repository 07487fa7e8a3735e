//! Share links.
//!
//! - compact: `sn://wg?` + base64url, unpadded, of zlib(minified JSON)
//! - uri: `wireguard://` + padded standard base64 of minified JSON
//!
//! Decoding is all-or-nothing, any corruption is a [`CodecError`].

use serde::Serialize;
use serde_json::Value;

use crate::codec::{self, CodecError};

pub const COMPACT_SCHEME: &str = "sn://wg?";
pub const URI_SCHEME: &str = "wireguard://";

pub fn compact_link<T: Serialize + ?Sized>(object: &T) -> Result<String, CodecError> {
    let json = serde_json::to_vec(object)?;
    let payload = codec::encode_base64_url_no_pad(&codec::compress(&json)?);

    Ok(format!("{COMPACT_SCHEME}{payload}"))
}

pub fn decode_compact_link(link: &str) -> Result<Value, CodecError> {
    let payload = link
        .trim()
        .strip_prefix(COMPACT_SCHEME)
        .ok_or(CodecError::Scheme(COMPACT_SCHEME))?;

    let json = codec::decompress(&codec::decode_base64_url_no_pad(payload)?)?;

    Ok(serde_json::from_slice(&json)?)
}

pub fn uri<T: Serialize + ?Sized>(object: &T) -> Result<String, CodecError> {
    let json = serde_json::to_vec(object)?;

    Ok(format!("{URI_SCHEME}{}", codec::encode_base64_std(&json)))
}

pub fn decode_uri(uri: &str) -> Result<Value, CodecError> {
    let payload = uri
        .trim()
        .strip_prefix(URI_SCHEME)
        .ok_or(CodecError::Scheme(URI_SCHEME))?;

    Ok(serde_json::from_slice(&codec::decode_base64_std(payload)?)?)
}

/// Decodes either link form, picked by scheme.
pub fn decode(text: &str) -> Result<Value, CodecError> {
    let text = text.trim();

    if text.starts_with(COMPACT_SCHEME) {
        decode_compact_link(text)
    } else {
        decode_uri(text)
    }
}
