//! Structured error types shared across hazard crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Code, message and diagnostics carried by a [`HazardError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Kebab-case code, stable across releases (`coeffs-unknown-imt`).
    pub code: String,
    /// What went wrong, for people.
    pub message: String,
    /// Offending names and values, e.g. `imt=SA(0.2)` or `sites=0`.
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Suggested remedy, when one is known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Payload with no context or hint.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Records one diagnostic `key=value`; a repeated key keeps the last value.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Suggests how the caller can fix the input.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Every failure the hazard crates report, grouped by family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum HazardError {
    /// A model or context maker asked for something outside the vocabulary.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// An input had the wrong shape to build the requested object.
    #[error("type error: {0}")]
    Type(ErrorInfo),
    /// Malformed textual input.
    #[error("parse error: {0}")]
    Parse(ErrorInfo),
    /// A keyed lookup (IMT, coefficient, context field, model) failed.
    #[error("lookup error: {0}")]
    Lookup(ErrorInfo),
    /// A surface could not answer a geometry query.
    #[error("geometry error: {0}")]
    Geometry(ErrorInfo),
    /// Site filtering discarded every site.
    #[error("filter error: {0}")]
    Filter(ErrorInfo),
    /// A model produced output inconsistent with its inputs.
    #[error("model error: {0}")]
    Model(ErrorInfo),
    /// Serialization and configuration loading errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            let pairs: Vec<String> = self
                .context
                .iter()
                .map(|(key, value)| format!("{key}={value}"))
                .collect();
            write!(f, " | context: [{}]", pairs.join(", "))?;
        }
        match &self.hint {
            Some(hint) => write!(f, " | hint: {hint}"),
            None => Ok(()),
        }
    }
}

impl HazardError {
    /// Payload shared by all families.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            HazardError::Config(info)
            | HazardError::Type(info)
            | HazardError::Parse(info)
            | HazardError::Lookup(info)
            | HazardError::Geometry(info)
            | HazardError::Filter(info)
            | HazardError::Model(info)
            | HazardError::Serde(info) => info,
        }
    }

    /// Returns the human readable message without code or context decoration.
    pub fn message(&self) -> &str {
        &self.info().message
    }
}
