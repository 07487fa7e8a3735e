//! Payload primitives shared by the link exporters: zlib deflate and the
//! two base64 flavours.

use std::io::Write;

use base64::{
    Engine,
    prelude::{BASE64_STANDARD, BASE64_URL_SAFE, BASE64_URL_SAFE_NO_PAD},
};
use flate2::{Compression, Decompress, FlushDecompress, Status, write::ZlibEncoder};

const INFLATE_CHUNK: usize = 4096;

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("expected {0} prefix")]
    Scheme(&'static str),

    #[error("base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("deflate error: {0}")]
    Deflate(#[from] std::io::Error),

    #[error("inflate error: {0}")]
    Inflate(#[from] flate2::DecompressError),

    #[error("compressed stream is truncated")]
    Truncated,

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// zlib stream at the default level.
pub fn compress(data: &[u8]) -> Result<Vec<u8>, CodecError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;

    Ok(encoder.finish()?)
}

/// Inverse of [`compress`]. The stream must run to its end marker and
/// checksum, so a cut-off payload is an error rather than a short read.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>, CodecError> {
    let mut inflater = Decompress::new(true);
    let mut out = Vec::with_capacity(data.len().saturating_mul(4).max(INFLATE_CHUNK));

    loop {
        if out.len() == out.capacity() {
            out.reserve(INFLATE_CHUNK);
        }

        let (total_in, total_out) = (inflater.total_in(), inflater.total_out());
        let consumed = total_in as usize;

        let status =
            inflater.decompress_vec(&data[consumed..], &mut out, FlushDecompress::None)?;

        if status == Status::StreamEnd {
            return Ok(out);
        }

        if inflater.total_in() == total_in && inflater.total_out() == total_out {
            return Err(CodecError::Truncated);
        }
    }
}

pub fn encode_base64_url_no_pad(data: &[u8]) -> String {
    BASE64_URL_SAFE_NO_PAD.encode(data)
}

/// Restores `=` padding to a multiple of four before decoding.
pub fn decode_base64_url_no_pad(s: &str) -> Result<Vec<u8>, CodecError> {
    let s = s.trim_end_matches('=');
    let mut padded = String::with_capacity(s.len() + 3);
    padded.push_str(s);
    padded.extend(std::iter::repeat_n('=', (4 - s.len() % 4) % 4));

    Ok(BASE64_URL_SAFE.decode(padded)?)
}

pub fn encode_base64_std(data: &[u8]) -> String {
    BASE64_STANDARD.encode(data)
}

pub fn decode_base64_std(s: &str) -> Result<Vec<u8>, CodecError> {
    Ok(BASE64_STANDARD.decode(s)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compress_roundtrip() {
        let data = "[Interface]\nPrivateKey = ABC\n".repeat(500);
        let packed = compress(data.as_bytes()).unwrap();

        assert!(packed.len() < data.len());
        assert_eq!(packed[0], 0x78);
        assert_eq!(decompress(&packed).unwrap(), data.as_bytes());
    }

    #[test]
    fn test_decompress_empty_payload() {
        let packed = compress(b"").unwrap();
        assert_eq!(decompress(&packed).unwrap(), b"");
    }

    #[test]
    fn test_decompress_truncated() {
        let packed = compress(b"{\"type\":\"wireguard\"}").unwrap();

        assert!(matches!(
            decompress(&packed[..packed.len() - 1]),
            Err(CodecError::Truncated)
        ));
        assert!(decompress(&[]).is_err());
    }

    #[test]
    fn test_decompress_garbage() {
        assert!(decompress(b"not a zlib stream").is_err());
    }

    #[test]
    fn test_base64_url_no_pad() {
        let encoded = encode_base64_url_no_pad(&[0xfb, 0xff, 0xbf, 0x01]);

        assert_eq!(encoded, "-_-_AQ");
        assert_eq!(
            decode_base64_url_no_pad(&encoded).unwrap(),
            [0xfb, 0xff, 0xbf, 0x01]
        );
        assert_eq!(
            decode_base64_url_no_pad("-_-_AQ==").unwrap(),
            [0xfb, 0xff, 0xbf, 0x01]
        );
    }

    #[test]
    fn test_base64_url_no_pad_bad_length() {
        assert!(decode_base64_url_no_pad("abcde").is_err());
    }

    #[test]
    fn test_base64_std() {
        assert_eq!(encode_base64_std(b"wg"), "d2c=");
        assert_eq!(decode_base64_std("d2c=").unwrap(), b"wg");
        assert!(decode_base64_std("-_-_").is_err());
    }
}
