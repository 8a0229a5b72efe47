#![forbid(unsafe_code)]

//! Errors at the configuration and lifecycle boundary.
//!
//! Runtime commands never fail: they clamp, no-op, or degrade. Only
//! initialization and configuration loading return these.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ViewerError>;

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("invalid configuration: {}", .0.join("; "))]
    InvalidConfig(Vec<String>),

    #[error("viewer session is not initialized")]
    NotInitialized,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "config-files")]
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[cfg(feature = "config-files")]
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ViewerError {
    /// `InvalidConfig` when `errors` is non-empty.
    pub fn check(errors: Vec<String>) -> Result<()> {
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Self::InvalidConfig(errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ViewerError;

    #[test]
    fn invalid_config_joins_messages() {
        let error = ViewerError::InvalidConfig(vec!["a must be > 0".into(), "b too big".into()]);
        assert_eq!(
            error.to_string(),
            "invalid configuration: a must be > 0; b too big"
        );
    }

    #[test]
    fn check_passes_empty_list() {
        assert!(ViewerError::check(Vec::new()).is_ok());
        assert!(matches!(
            ViewerError::check(vec!["x".into()]),
            Err(ViewerError::InvalidConfig(list)) if list.len() == 1
        ));
    }

    #[test]
    fn io_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let error: ViewerError = io.into();
        assert_eq!(error.to_string(), "I/O error: gone");
    }
}
