//! Strict parsing of inline image data URLs.
//!
//! Widgets attach images as `data:image/<format>;base64,<payload>` URLs.
//! Both backends validate the attachment with [`InlineImage::parse`]
//! before building a request; a malformed URL fails that attempt with
//! [`LlmError::InvalidRequest`] so the fallback cascade can move on.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use leadline_types::llm::LlmError;

/// A validated inline image. `data` is the base64 payload exactly as
/// received; it is decoded once during parsing to prove it is well
/// formed, then kept in encoded form because both wire formats want
/// base64.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    /// Full MIME type, e.g. `image/png`.
    pub mime_type: String,
    /// Base64 payload without the data-URL framing.
    pub data: String,
}

impl InlineImage {
    /// Parse and validate a `data:image/...;base64,...` URL.
    pub fn parse(url: &str) -> Result<Self, LlmError> {
        let rest = url
            .strip_prefix("data:")
            .ok_or_else(|| invalid("missing 'data:' prefix"))?;
        let (mime_type, payload) = rest
            .split_once(";base64,")
            .ok_or_else(|| invalid("missing ';base64,' separator"))?;
        let format = mime_type
            .strip_prefix("image/")
            .ok_or_else(|| invalid("not an image MIME type"))?;
        if format.is_empty()
            || !format
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '-'))
        {
            return Err(invalid("malformed image format"));
        }
        if payload.is_empty() {
            return Err(invalid("empty payload"));
        }
        BASE64
            .decode(payload)
            .map_err(|e| invalid(&format!("payload is not valid base64: {e}")))?;

        Ok(Self {
            mime_type: mime_type.to_string(),
            data: payload.to_string(),
        })
    }

    /// Rebuild the canonical data URL (the OpenRouter wire carries the
    /// full URL form).
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

fn invalid(reason: &str) -> LlmError {
    LlmError::InvalidRequest(format!("unparsable inline image: {reason}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Base64 of the 8-byte PNG signature.
    const PNG_PAYLOAD: &str = "iVBORw0KGgo=";

    #[test]
    fn parse_valid_png_url() {
        let url = format!("data:image/png;base64,{PNG_PAYLOAD}");
        let image = InlineImage::parse(&url).unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.data, PNG_PAYLOAD);
        assert_eq!(image.to_data_url(), url);
    }

    #[test]
    fn parse_rejects_missing_prefix() {
        let err = InlineImage::parse("image/png;base64,AAAA").unwrap_err();
        assert!(matches!(err, LlmError::InvalidRequest(msg) if msg.contains("data:")));
    }

    #[test]
    fn parse_rejects_non_image_mime() {
        let err = InlineImage::parse("data:application/pdf;base64,AAAA").unwrap_err();
        assert!(matches!(err, LlmError::InvalidRequest(msg) if msg.contains("MIME")));
    }

    #[test]
    fn parse_rejects_missing_separator() {
        let err = InlineImage::parse("data:image/png,AAAA").unwrap_err();
        assert!(matches!(err, LlmError::InvalidRequest(_)));
    }

    #[test]
    fn parse_rejects_empty_payload() {
        let err = InlineImage::parse("data:image/png;base64,").unwrap_err();
        assert!(matches!(err, LlmError::InvalidRequest(msg) if msg.contains("empty")));
    }

    #[test]
    fn parse_rejects_invalid_base64() {
        let err = InlineImage::parse("data:image/png;base64,not!!valid").unwrap_err();
        assert!(matches!(err, LlmError::InvalidRequest(msg) if msg.contains("base64")));
    }

    #[test]
    fn parse_rejects_blank_format() {
        let err = InlineImage::parse("data:image/;base64,AAAA").unwrap_err();
        assert!(matches!(err, LlmError::InvalidRequest(_)));
    }

    #[test]
    fn parse_accepts_jpeg_and_webp() {
        for mime in ["image/jpeg", "image/webp"] {
            let url = format!("data:{mime};base64,{PNG_PAYLOAD}");
            let image = InlineImage::parse(&url).unwrap();
            assert_eq!(image.mime_type, mime);
        }
    }
}
