//! Errors raised while validating and normalizing field queries.

use std::collections::BTreeMap;
use thiserror::Error;

/// Top-level error type for the crate.
///
/// Every input problem is detected at the normalization boundary, before any kernel runs.
/// Numerically degenerate geometries are not errors, the kernels resolve them to a defined field.
#[derive(Debug, Error)]
pub enum FieldError {
    /// A key required by the chosen source type was not supplied.
    #[error("missing input key: '{key}'")]
    MissingInput { key: &'static str },

    /// The `source_type` tag does not name one of the supported sources.
    #[error("unknown source type '{0}', expected one of Box, Cylinder, Sphere, Dipole, Circular, Line")]
    UnknownSourceType(String),

    /// Explicit batch inputs disagree on the batch length.
    #[error("bad array input lengths: {lengths:?}")]
    LengthMismatch { lengths: BTreeMap<&'static str, usize> },

    /// An input is present but its value cannot describe a valid source.
    #[error("bad value for '{key}': {reason}")]
    BadValue { key: &'static str, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl FieldError {
    pub(crate) fn bad_value(key: &'static str, reason: impl Into<String>) -> Self {
        FieldError::BadValue {
            key,
            reason: reason.into(),
        }
    }
}
