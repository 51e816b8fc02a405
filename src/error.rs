use thiserror::Error;

use crate::domain::error::DomainError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("parse error: {0}")]
    Parse(String),
}

impl Error {
    /// The domain rejection behind this error, if any.
    #[must_use]
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            Self::Domain(e) => Some(e),
            _ => None,
        }
    }

    /// True for persistence-layer faults: the ledger is unchanged and the
    /// caller may retry the whole operation.
    #[must_use]
    pub fn is_storage_failure(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Storage(_) | Self::Parse(_))
    }
}

impl From<diesel::result::Error> for Error {
    fn from(err: diesel::result::Error) -> Self {
        Error::Storage(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::id::MarketId;

    #[test]
    fn domain_errors_are_not_storage_failures() {
        let err = Error::from(DomainError::MarketNotActive {
            market_id: MarketId::new(3),
        });
        assert!(!err.is_storage_failure());
        assert!(matches!(
            err.as_domain(),
            Some(DomainError::MarketNotActive { .. })
        ));
        assert_eq!(err.to_string(), "market 3 is not active");
    }

    #[test]
    fn diesel_errors_become_storage_failures() {
        let err = Error::from(diesel::result::Error::NotFound);
        assert!(err.is_storage_failure());
        assert!(err.as_domain().is_none());
    }

    #[test]
    fn config_error_messages() {
        let err = ConfigError::InvalidValue {
            field: "database.pool_size",
            reason: "must be at least 1".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid value for database.pool_size: must be at least 1"
        );
    }
}
