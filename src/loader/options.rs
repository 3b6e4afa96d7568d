use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

use crate::errors::ConfigError;

/// What to do when one chunk's insert fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchFailurePolicy {
    /// Record the failure (the chunk itself is rolled back) and keep going with the
    /// next chunk. Rows from other chunks stay committed.
    #[default]
    Continue,
    /// Stop at the first failed chunk. Chunks before it stay committed.
    Abort,
}

impl FromStr for BatchFailurePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "continue" | "skip" => Ok(Self::Continue),
            "abort" | "stop" => Ok(Self::Abort),
            _ => Err(ConfigError::InvalidValue { key: "failure_policy", value: s.to_string() }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub batch_size: usize,
    pub failure_policy: BatchFailurePolicy,
    /// Log a progress line every N chunks; `None` logs only the summary.
    pub progress_every: Option<usize>,
}

impl LoadOptions {
    pub const DEFAULT_BATCH_SIZE: usize = 100_000;
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            batch_size: Self::DEFAULT_BATCH_SIZE,
            failure_policy: BatchFailurePolicy::default(),
            progress_every: Some(1),
        }
    }
}

/// Reported to the caller after each chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadProgress {
    pub batch_index: usize,
    pub loaded: usize,
    pub planned: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchFailure {
    pub batch_index: usize,
    /// Position of the chunk's first record in the input.
    pub offset: usize,
    pub size: usize,
    pub cause: String,
}

#[derive(Debug, Default, Serialize)]
pub struct LoadReport {
    pub planned: usize,
    pub loaded: usize,
    pub batches: usize,
    pub failed: Vec<BatchFailure>,
    pub elapsed: Duration,
}

impl LoadReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty() && self.loaded == self.planned
    }

    pub fn skipped(&self) -> usize {
        self.failed.iter().map(|f| f.size).sum()
    }
}
