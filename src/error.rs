use thiserror::Error;

/// Problems found while validating a [`VizConfig`](crate::config::VizConfig).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("line {line} references unknown station '{station}'")]
    UnknownStation { line: usize, station: String },
    #[error("line {line} has category {category}, expected 1..=16")]
    CategoryOutOfRange { line: usize, category: u8 },
    #[error("station id '{0}' is used more than once")]
    DuplicateStation(String),
    #[error("station table has no 'central' station")]
    MissingCentral,
    #[error("{0} must be positive")]
    NonPositive(&'static str),
    #[error("{0} must lie in [0, 1]")]
    NotAProbability(&'static str),
}
