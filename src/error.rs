use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// A value found in the configuration had the wrong TOML shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMismatch {
    /// What was being checked, e.g. "`script` field"
    pub subject: String,
    /// Human readable description of the accepted shape
    pub expected: &'static str,
    /// TOML type name of the value that was actually found
    pub found: &'static str,
}

impl TypeMismatch {
    pub fn new(subject: impl Into<String>, expected: &'static str, found: &toml::Value) -> Self {
        Self {
            subject: subject.into(),
            expected,
            found: found.type_str(),
        }
    }
}

impl fmt::Display for TypeMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} must be {}, but got {}",
            self.subject, self.expected, self.found
        )
    }
}

/// Errors raised while validating a single job entry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JobError {
    #[error("{0}")]
    Type(TypeMismatch),

    #[error("`{0}` field is required")]
    MissingField(&'static str),
}

/// Every job entry that failed validation, reported together
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidJobs {
    pub failures: Vec<(String, JobError)>,
}

impl InvalidJobs {
    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Names of the failed jobs, in the order they were reported
    pub fn names(&self) -> Vec<&str> {
        self.failures.iter().map(|(name, _)| name.as_str()).collect()
    }
}

impl fmt::Display for InvalidJobs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} invalid job(s):", self.failures.len())?;
        for (name, cause) in &self.failures {
            write!(f, "\n  - {}: {}", name, cause)?;
        }
        Ok(())
    }
}

impl std::error::Error for InvalidJobs {}

/// Main error type for ppcli
#[derive(Error, Debug)]
pub enum PpcliError {
    #[error("{} does not exist", .0.display())]
    NotFound(PathBuf),

    #[error("{} is not a valid TOML file: {source}", .path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("No {scope} scope defined in {}", .path.display())]
    MissingScope { scope: &'static str, path: PathBuf },

    #[error("{0}")]
    Type(TypeMismatch),

    #[error("{0}")]
    InvalidJobs(#[from] InvalidJobs),

    #[error("Invalid job name: {0}")]
    InvalidName(String),

    #[error("{0}")]
    InvalidSelection(String),

    #[error("Failed to load dotenv file {}: {source}", .path.display())]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },

    #[error("Invalid inline environment assignment: {0}")]
    InlineEnv(#[source] dotenvy::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to spawn shell for job '{job}': {source}")]
    Spawn {
        job: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, PpcliError>;
