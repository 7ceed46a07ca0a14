use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReachError {
    #[error("invalid privilege: {0}")]
    InvalidPrivilege(String),

    #[error("duplicate privilege name: {0}")]
    DuplicatePrivilege(String),

    #[error("invalid reach estimation: {0}")]
    InvalidEstimation(String),

    #[error("invalid role: {0}")]
    InvalidRole(String),

    #[error("invalid rate limit: {0}")]
    InvalidRateLimit(String),

    #[error("invalid api scope: {0}")]
    InvalidScope(String),

    #[error("unknown system: {key} (valid: {})", valid.join(", "))]
    UnknownSystem { key: String, valid: Vec<String> },

    #[error("unknown theme: {key} (valid: {})", valid.join(", "))]
    UnknownTheme { key: String, valid: Vec<String> },

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ReachError {
    pub fn is_unknown_selector(&self) -> bool {
        matches!(
            self,
            ReachError::UnknownSystem { .. } | ReachError::UnknownTheme { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ReachError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_system_lists_valid_keys() {
        let err = ReachError::UnknownSystem {
            key: "nope".to_string(),
            valid: vec!["filesystem".to_string(), "free-api".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "unknown system: nope (valid: filesystem, free-api)"
        );
        assert!(err.is_unknown_selector());
    }

    #[test]
    fn validation_errors_are_not_selector_errors() {
        let err = ReachError::InvalidRateLimit("must be greater than 0".to_string());
        assert!(!err.is_unknown_selector());
    }
}
