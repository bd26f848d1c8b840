//! Entry points computing B and H for a batch of sources and observers.

use crate::config::EvaluationConfig;
use crate::error::FieldError;
use crate::frame;
use crate::input::FieldQuery;
use crate::magnetic::{self, FieldSample};
use crate::query::{BatchQuery, NormalizedBatch};
use log::debug;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fmt;

/// Which field a query returns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Field {
    /// Magnetic flux density in mT.
    B,
    /// Magnetic field strength in kA/m.
    H,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Field::B => write!(f, "B [mT]"),
            Field::H => write!(f, "H [kA/m]"),
        }
    }
}

/// Result of a field query, one vector per batch entry.
///
/// A squeezed batch of length one is returned as [FieldOutput::Single].
#[derive(Clone, Debug, PartialEq)]
pub enum FieldOutput {
    Single(Vector3<f64>),
    Batch(Vec<Vector3<f64>>),
}

impl FieldOutput {
    pub fn as_slice(&self) -> &[Vector3<f64>] {
        match self {
            FieldOutput::Single(value) => std::slice::from_ref(value),
            FieldOutput::Batch(values) => values,
        }
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    pub fn into_vec(self) -> Vec<Vector3<f64>> {
        match self {
            FieldOutput::Single(value) => vec![value],
            FieldOutput::Batch(values) => values,
        }
    }
}

/// Flux density B in mT.
pub fn get_b(query: &BatchQuery) -> Result<FieldOutput, FieldError> {
    get_field(Field::B, query)
}

/// Field strength H in kA/m.
pub fn get_h(query: &BatchQuery) -> Result<FieldOutput, FieldError> {
    get_field(Field::H, query)
}

pub fn get_field(field: Field, query: &BatchQuery) -> Result<FieldOutput, FieldError> {
    get_field_with_config(field, query, &EvaluationConfig::default())
}

pub fn get_field_with_config(
    field: Field,
    query: &BatchQuery,
    config: &EvaluationConfig,
) -> Result<FieldOutput, FieldError> {
    let batch = query.normalize()?;
    Ok(evaluate(field, &batch, config))
}

/// B for a query in keyword form.
pub fn get_bv(query: FieldQuery) -> Result<FieldOutput, FieldError> {
    get_b(&BatchQuery::try_from(query)?)
}

/// H for a query in keyword form.
pub fn get_hv(query: FieldQuery) -> Result<FieldOutput, FieldError> {
    get_h(&BatchQuery::try_from(query)?)
}

/// Evaluates a normalised batch.
///
/// Observers are moved into the source frames, the kernel of the source family runs there,
/// and the samples are rotated back before the requested field is extracted.
pub fn evaluate(field: Field, batch: &NormalizedBatch, config: &EvaluationConfig) -> FieldOutput {
    debug!(
        "computing {} of {} {} instances",
        field,
        batch.len(),
        batch.source.source_type()
    );
    let local = frame::observers_to_local(&batch.poses, &batch.observers, config.batch_size);
    let mut samples = magnetic::evaluate_local(&batch.source, &local, config);
    frame::samples_to_global(&batch.poses, &mut samples, config.batch_size);
    assemble(field, &samples, batch.squeeze)
}

/// Extracts B or H from the samples and applies the squeeze rule.
pub fn assemble(field: Field, samples: &[FieldSample], squeeze: bool) -> FieldOutput {
    let values: Vec<Vector3<f64>> = samples
        .iter()
        .map(|sample| match field {
            Field::B => sample.b,
            Field::H => sample.h(),
        })
        .collect();
    if squeeze && values.len() == 1 {
        FieldOutput::Single(values[0])
    } else {
        FieldOutput::Batch(values)
    }
}
