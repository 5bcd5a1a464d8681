use thiserror::Error;

/// Errors from configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {message}")]
    Read { path: String, message: String },

    #[error("failed to parse config file '{path}': {message}")]
    Parse { path: String, message: String },

    #[error("missing required environment variable '{0}'")]
    MissingEnv(String),
}

/// Errors from lead webhook delivery.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("webhook request failed: {message}")]
    Http { message: String },

    #[error("webhook returned status {code}")]
    Status { code: u16 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Parse {
            path: "leadline.toml".to_string(),
            message: "expected table".to_string(),
        };
        assert!(err.to_string().contains("leadline.toml"));
        assert!(err.to_string().contains("expected table"));
    }

    #[test]
    fn test_notify_error_display() {
        let err = NotifyError::Status { code: 502 };
        assert_eq!(err.to_string(), "webhook returned status 502");
    }
}
