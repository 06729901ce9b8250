//! Blob content transport encoding.
//!
//! The contents API ships file bodies as base64, wrapped at 60 columns and
//! sometimes without trailing padding.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use base64::Engine;

use crate::error::Error;

const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encodes and decodes file content for the contents API.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlobCodec;

impl BlobCodec {
    /// Encode plain text for transmission. Always padded.
    #[must_use]
    pub fn encode(content: &str) -> String {
        STANDARD.encode(content.as_bytes())
    }

    /// Decode a payload received from the platform.
    ///
    /// Embedded line breaks are ignored and padding is optional.
    ///
    /// # Errors
    ///
    /// Returns `Error::Decode` if the payload is not base64 or not UTF-8.
    pub fn decode(encoded: &str) -> Result<String, Error> {
        let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        let bytes = LENIENT
            .decode(compact.as_bytes())
            .map_err(|e| Error::Decode(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| Error::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode() {
        assert_eq!(BlobCodec::encode("contents"), "Y29udGVudHM=");
        assert_eq!(BlobCodec::encode(""), "");
    }

    #[test]
    fn test_decode_unpadded_payload() {
        let encoded = "ewogICJuYW1lIjogImV4c28tdGVzdCIsCiAgInZlcnNp\
                       b24iOiAidjIuMC4wIiwKICAiZGVwZW5kZW5jaWVzIjoge30KfQo";
        let decoded = BlobCodec::decode(encoded).expect("Should decode");
        assert_eq!(
            decoded,
            "{\n  \"name\": \"exso-test\",\n  \"version\": \"v2.0.0\",\n  \"dependencies\": {}\n}\n"
        );
    }

    #[test]
    fn test_decode_wrapped_payload() {
        let decoded = BlobCodec::decode("Y29u\ndGVu\ndHM=\n").expect("Should decode");
        assert_eq!(decoded, "contents");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = BlobCodec::decode("not base64 at all!").unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn test_decode_rejects_non_utf8() {
        let encoded = STANDARD.encode([0xff, 0xfe, 0xfd]);
        assert!(matches!(BlobCodec::decode(&encoded), Err(Error::Decode(_))));
    }
}
