use serde::{Serialize, Deserialize};
use std::fmt;

use crate::catalog::selector::SelectError;

/// Unified error type for everything outside the pure streak/selection core.
/// Store, config, migration and coach calls all return Result<T, SparkError>.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SparkError {
    pub message: String,
    pub stage: String,
    pub account: Option<String>,
    pub context: Option<String>,
    pub source: Option<String>,
}

impl SparkError {
    /// Create a new error with stage and message
    pub fn new<S: Into<String>>(message: S, stage: &'static str) -> Self {
        SparkError {
            message: message.into(),
            stage: stage.to_string(),
            account: None,
            context: None,
            source: None,
        }
    }

    /// Attach the account the failing operation was running for
    pub fn with_account<S: Into<String>>(mut self, account: S) -> Self {
        self.account = Some(account.into());
        self
    }

    /// Add additional context information
    pub fn with_context<S: Into<String>>(mut self, context: S) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Add source error information
    pub fn with_source<S: Into<String>>(mut self, source: S) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl fmt::Display for SparkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.stage, self.message)?;
        if let Some(ref account) = self.account {
            write!(f, " (account: {})", account)?;
        }
        if let Some(ref context) = self.context {
            write!(f, " (context: {})", context)?;
        }
        if let Some(ref source) = self.source {
            write!(f, " (source: {})", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for SparkError {}

impl From<anyhow::Error> for SparkError {
    fn from(err: anyhow::Error) -> Self {
        SparkError::new(format!("{:#}", err), "unknown").with_source("anyhow")
    }
}

impl From<std::io::Error> for SparkError {
    fn from(err: std::io::Error) -> Self {
        SparkError::new(format!("I/O error: {}", err), "io").with_source("std::io")
    }
}

impl From<serde_json::Error> for SparkError {
    fn from(err: serde_json::Error) -> Self {
        SparkError::new(format!("JSON error: {}", err), "json_parse").with_source("serde_json")
    }
}

impl From<toml::de::Error> for SparkError {
    fn from(err: toml::de::Error) -> Self {
        SparkError::new(format!("TOML error: {}", err), "config").with_source("toml")
    }
}

impl From<tokio::time::error::Elapsed> for SparkError {
    fn from(_: tokio::time::error::Elapsed) -> Self {
        SparkError::new("Operation timed out", "timeout").with_source("tokio::time")
    }
}

impl From<SelectError> for SparkError {
    fn from(err: SelectError) -> Self {
        SparkError::new(err.to_string(), "selection")
    }
}
