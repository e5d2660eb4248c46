use std::io;

use thiserror::Error;

/// Library-wide error type for cadence operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Config file missing at the given path.
    #[error("Config file not found: {0}")]
    ConfigMissing(String),

    /// Config file is not valid JSON.
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// A time-of-day field could not be parsed.
    #[error("Invalid {field} '{value}': expected a 12-hour clock time like '05:00 PM'")]
    InvalidTime { field: &'static str, value: String },

    /// Commit window starts after it ends. Overnight windows are rejected.
    #[error("Invalid commit window for '{repo}': starting_time {start} is after ending_time {end}")]
    InvalidWindow { repo: String, start: String, end: String },

    /// Commit range minimum exceeds maximum.
    #[error("Invalid commit range for '{repo}': minimum_commits {min} exceeds maximum_commits {max}")]
    InvalidCommitRange { repo: String, min: u32, max: u32 },

    /// Repository task lists no target folders.
    #[error("Repository '{0}' lists no target folders")]
    NoTargetFolders(String),

    /// Requested repository is not present in the config.
    #[error("Repository '{0}' not found in config")]
    RepositoryNotInConfig(String),

    /// Required environment variable is not set.
    #[error("Environment variable {0} is not set")]
    EnvironmentVariableMissing(String),

    /// Content generator transport or API failure.
    #[error("Content generator error: {message}")]
    GeneratorError { message: String, status: Option<u16> },

    /// Git execution failed.
    #[error("Git error running '{command}': {details}")]
    GitError { command: String, details: String },
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }
}
