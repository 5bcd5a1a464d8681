//! Generation backend implementations.
//!
//! Contains concrete implementations of the
//! [`GenerationBackend`](leadline_core::llm::backend::GenerationBackend)
//! trait defined in `leadline-core`: Gemini for the tool-calling primary
//! path and OpenRouter for the plain-text fallback cascade. Both share
//! the data-URL validation in [`image`] and the HTTP status mapping in
//! [`status_to_error`].

pub mod gemini;
pub mod image;
pub mod openrouter;

use tokio_util::sync::CancellationToken;

use leadline_core::llm::box_backend::BoxGenerationBackend;
use leadline_types::config::LeadlineConfig;
use leadline_types::llm::LlmError;

use crate::config::Credentials;
use crate::tools::HttpContextTools;

use self::gemini::GeminiBackend;
use self::openrouter::OpenRouterBackend;

/// Build the primary and fallback backends from resolved credentials.
///
/// The primary gets the HTTP context tools; tool fetches hang off
/// `cancel` so shutdown also stops in-flight retrievals started by
/// abandoned turns.
pub fn build_backends(
    credentials: Credentials,
    config: &LeadlineConfig,
    cancel: CancellationToken,
) -> (BoxGenerationBackend, BoxGenerationBackend) {
    let tools = HttpContextTools::new(&config.tools, cancel);
    let primary = GeminiBackend::new(credentials.gemini_api_key, tools);
    let fallback = OpenRouterBackend::new(credentials.openrouter_api_key);
    (
        BoxGenerationBackend::new(primary),
        BoxGenerationBackend::new(fallback),
    )
}

/// Map a non-success HTTP response to an [`LlmError`].
///
/// A 400 whose body carries an unsupported-input marker becomes
/// [`LlmError::UnsupportedContent`] so the orchestrator can apologize
/// specifically instead of cascading.
pub(crate) fn status_to_error(status: reqwest::StatusCode, body: String) -> LlmError {
    match status.as_u16() {
        400 => {
            let lowered = body.to_lowercase();
            if lowered.contains("unsupported") || lowered.contains("image") {
                LlmError::UnsupportedContent(body)
            } else {
                LlmError::InvalidRequest(body)
            }
        }
        401 | 403 => LlmError::AuthenticationFailed,
        429 => LlmError::RateLimited {
            retry_after_ms: None,
        },
        503 | 529 => LlmError::Overloaded(body),
        _ => LlmError::Provider {
            message: format!("HTTP {status}: {body}"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use secrecy::SecretString;

    #[test]
    fn test_build_backends_names() {
        let credentials = Credentials {
            gemini_api_key: SecretString::from("test-key-not-real"),
            openrouter_api_key: SecretString::from("test-key-not-real"),
        };
        let (primary, fallback) = build_backends(
            credentials,
            &LeadlineConfig::default(),
            CancellationToken::new(),
        );
        assert_eq!(primary.name(), "gemini");
        assert_eq!(fallback.name(), "openrouter");
    }

    #[test]
    fn test_status_400_with_marker_is_unsupported_content() {
        let err = status_to_error(
            StatusCode::BAD_REQUEST,
            "Provided image is not supported".to_string(),
        );
        assert!(matches!(err, LlmError::UnsupportedContent(_)));

        let err = status_to_error(
            StatusCode::BAD_REQUEST,
            "Unsupported MIME type: text/calendar".to_string(),
        );
        assert!(matches!(err, LlmError::UnsupportedContent(_)));
    }

    #[test]
    fn test_status_400_plain_is_invalid_request() {
        let err = status_to_error(StatusCode::BAD_REQUEST, "missing contents".to_string());
        assert!(matches!(err, LlmError::InvalidRequest(_)));
    }

    #[test]
    fn test_status_auth_variants() {
        for code in [401, 403] {
            let status = StatusCode::from_u16(code).unwrap();
            let err = status_to_error(status, String::new());
            assert!(matches!(err, LlmError::AuthenticationFailed));
        }
    }

    #[test]
    fn test_status_rate_limited() {
        let err = status_to_error(StatusCode::TOO_MANY_REQUESTS, String::new());
        assert!(matches!(
            err,
            LlmError::RateLimited {
                retry_after_ms: None
            }
        ));
    }

    #[test]
    fn test_status_overloaded() {
        for code in [503, 529] {
            let status = StatusCode::from_u16(code).unwrap();
            let err = status_to_error(status, "busy".to_string());
            assert!(matches!(err, LlmError::Overloaded(body) if body == "busy"));
        }
    }

    #[test]
    fn test_status_other_is_provider() {
        let err = status_to_error(StatusCode::INTERNAL_SERVER_ERROR, "boom".to_string());
        match err {
            LlmError::Provider { message } => {
                assert!(message.contains("500"));
                assert!(message.contains("boom"));
            }
            other => panic!("expected Provider, got: {other}"),
        }
    }
}
