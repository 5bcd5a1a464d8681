//! Configuration loading for Leadline.
//!
//! Reads `leadline.toml` and deserializes it into
//! [`LeadlineConfig`]. A missing file at the default path falls back to
//! defaults; an explicitly requested path must exist. API keys never live
//! in the file -- [`Credentials::from_env`] resolves them from the
//! environment as [`SecretString`] values.

use std::path::Path;

use secrecy::SecretString;

use leadline_types::config::LeadlineConfig;
use leadline_types::error::ConfigError;

/// Config file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "leadline.toml";

/// Environment variable holding the primary backend API key.
pub const GEMINI_KEY_VAR: &str = "GEMINI_API_KEY";

/// Environment variable holding the fallback backend API key.
pub const OPENROUTER_KEY_VAR: &str = "OPENROUTER_API_KEY";

/// Load configuration from `path`, or from [`DEFAULT_CONFIG_PATH`] when
/// no path is given.
///
/// - Default path missing -> [`LeadlineConfig::default()`] (logged at debug).
/// - Explicit path missing -> [`ConfigError::Read`]; a named file that
///   does not exist is a deployment mistake, not a request for defaults.
/// - File present but unreadable or unparsable -> error. Startup fails
///   loudly instead of serving with a silently ignored config.
pub async fn load_config(path: Option<&Path>) -> Result<LeadlineConfig, ConfigError> {
    let (config_path, explicit) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => (Path::new(DEFAULT_CONFIG_PATH).to_path_buf(), false),
    };

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound && !explicit => {
            tracing::debug!(
                "no {} found at {}, using defaults",
                DEFAULT_CONFIG_PATH,
                config_path.display()
            );
            return Ok(LeadlineConfig::default());
        }
        Err(err) => {
            return Err(ConfigError::Read {
                path: config_path.display().to_string(),
                message: err.to_string(),
            });
        }
    };

    toml::from_str::<LeadlineConfig>(&content).map_err(|err| ConfigError::Parse {
        path: config_path.display().to_string(),
        message: err.to_string(),
    })
}

/// Resolved API keys for the two generation backends.
///
/// Keys are wrapped in [`SecretString`] and only exposed when the HTTP
/// clients build request headers.
pub struct Credentials {
    pub gemini_api_key: SecretString,
    pub openrouter_api_key: SecretString,
}

// Credentials intentionally does NOT derive Debug so the keys cannot end
// up in logs or panic output.

impl Credentials {
    /// Read both API keys from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            gemini_api_key: read_secret(GEMINI_KEY_VAR)?,
            openrouter_api_key: read_secret(OPENROUTER_KEY_VAR)?,
        })
    }
}

/// Read one environment variable as a secret. Unset, non-unicode, and
/// blank values all count as missing.
fn read_secret(var: &str) -> Result<SecretString, ConfigError> {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(SecretString::from(value)),
        _ => Err(ConfigError::MissingEnv(var.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_config_explicit_missing_is_error() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope.toml");
        let err = load_config(Some(&missing)).await.unwrap_err();
        match err {
            ConfigError::Read { path, .. } => assert!(path.contains("nope.toml")),
            other => panic!("expected Read error, got: {other}"),
        }
    }

    #[tokio::test]
    async fn load_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(DEFAULT_CONFIG_PATH);
        tokio::fs::write(
            &config_path,
            r#"
[server]
port = 9090

[generation]
primary_model = "gemini-2.5-pro"

[fallback]
candidates = ["google/gemini-2.0-flash-001"]
"#,
        )
        .await
        .unwrap();

        let config = load_config(Some(&config_path)).await.unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.generation.primary_model, "gemini-2.5-pro");
        assert_eq!(config.fallback.candidates.len(), 1);
        // Untouched sections keep their defaults.
        assert_eq!(config.context.recency_window, 50);
    }

    #[tokio::test]
    async fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(DEFAULT_CONFIG_PATH);
        tokio::fs::write(&config_path, "this is not { valid toml !!!")
            .await
            .unwrap();

        let err = load_config(Some(&config_path)).await.unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn read_secret_present() {
        // SAFETY: unique var name, set and removed within this test only.
        unsafe { std::env::set_var("LEADLINE_TEST_KEY_1", "not-a-real-key") };
        let secret = read_secret("LEADLINE_TEST_KEY_1").unwrap();
        use secrecy::ExposeSecret;
        assert_eq!(secret.expose_secret(), "not-a-real-key");
        // SAFETY: removing the var this test set above.
        unsafe { std::env::remove_var("LEADLINE_TEST_KEY_1") };
    }

    #[test]
    fn read_secret_blank_counts_as_missing() {
        // SAFETY: unique var name, set and removed within this test only.
        unsafe { std::env::set_var("LEADLINE_TEST_KEY_2", "   ") };
        let err = read_secret("LEADLINE_TEST_KEY_2").unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnv(name) if name == "LEADLINE_TEST_KEY_2"));
        // SAFETY: removing the var this test set above.
        unsafe { std::env::remove_var("LEADLINE_TEST_KEY_2") };
    }

    #[test]
    fn read_secret_unset_is_missing() {
        let err = read_secret("LEADLINE_TEST_KEY_NEVER_SET").unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnv(_)));
    }
}
