use thiserror::Error;

/// Why a candidate employee record was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is missing")]
    MissingField { field: &'static str },

    #[error("full name must have exactly three words (surname, given name, patronymic), got {tokens}")]
    BadNameFormat { tokens: usize },

    #[error("full name may only contain English letters: {token:?}")]
    BadNameCharset { token: String },

    #[error("birth date must use the YYYY-MM-DD format: {input:?}")]
    BadDateFormat { input: String },

    #[error("gender must be 'Male' or 'Female': {input:?}")]
    BadGender { input: String },
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    #[error("statement failed: {0}")]
    StatementFailed(String),

    #[error("backend not compiled in: {0}")]
    BackendUnavailable(String),

    #[error("unexpected row shape: {0}")]
    Decode(String),
}

#[derive(Debug, Error)]
pub enum BenchmarkError {
    #[error("could not create index: {0}")]
    IndexCreateFailed(#[source] StorageError),

    #[error("could not drop index: {0}")]
    IndexDropFailed(#[source] StorageError),

    #[error("row counts differ between runs: {without} without index, {with} with index")]
    ResultMismatch { without: usize, with: usize },

    #[error("probe query failed: {0}")]
    Query(#[source] StorageError),

    #[error("target prefix must be an ASCII letter: {0:?}")]
    InvalidTarget(char),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("minority count {minority} exceeds total count {total}")]
    MinorityExceedsTotal { total: usize, minority: usize },
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("batch size must be greater than zero")]
    InvalidBatchSize,

    #[error("batch {batch_index} failed, load aborted: {source}")]
    Aborted {
        batch_index: usize,
        #[source]
        source: StorageError,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}
