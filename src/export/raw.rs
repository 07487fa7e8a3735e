use serde::{Deserialize, Serialize};

use crate::codec;

/// Untouched config text next to its standard base64 form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawExport {
    pub raw: String,
    pub base64: String,
}

pub fn raw(text: &str) -> RawExport {
    RawExport {
        raw: text.to_string(),
        base64: codec::encode_base64_std(text.as_bytes()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_export() {
        let text = "[Peer]\nPublicKey = XYZ\n";
        let out = raw(text);

        assert_eq!(out.raw, text);
        assert_eq!(
            codec::decode_base64_std(&out.base64).unwrap(),
            text.as_bytes()
        );
    }

    #[test]
    fn test_raw_export_utf8() {
        assert_eq!(raw("# تونل").base64, "IyDYqtmI2YbZhA==");
    }
}
