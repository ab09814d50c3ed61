//! Structured error types shared across the dslo crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`DsloError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (identifiers, line numbers, paths).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the extraction engine.
///
/// Oracle infeasibility and non-unique optima are expected outcomes and are
/// reported through tagged results, never through this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum DsloError {
    /// Structural invariant violations (unknown nodes, id collisions, empty edges).
    #[error("graph error: {0}")]
    Graph(ErrorInfo),
    /// Failures of the optimisation oracle other than infeasibility.
    #[error("oracle error: {0}")]
    Oracle(ErrorInfo),
    /// Unreadable input or unwritable output.
    #[error("io error: {0}")]
    Io(ErrorInfo),
    /// Invalid run parameters.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// Serialization and schema errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl DsloError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            DsloError::Graph(info)
            | DsloError::Oracle(info)
            | DsloError::Io(info)
            | DsloError::Config(info)
            | DsloError::Serde(info) => info,
        }
    }

    /// Wraps a [`std::io::Error`] together with the path that produced it.
    pub fn io(code: impl Into<String>, path: impl fmt::Display, err: std::io::Error) -> Self {
        DsloError::Io(ErrorInfo::new(code, err.to_string()).with_context("path", path))
    }
}
