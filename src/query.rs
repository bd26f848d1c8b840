//! Typed batch queries and their normalisation.

use crate::error::FieldError;
use crate::frame::Pose;
use crate::input::{record_batch_length, Param};
use crate::source::{Source, SourceBatch};
use log::debug;
use nalgebra::{UnitQuaternion, Vector3};
use std::collections::{BTreeMap, BTreeSet};

/// A request to evaluate the field of one source family at a batch of observers.
///
/// Position and orientation place the source in the global frame, they default to the origin
/// and the identity rotation. With `squeeze` set, a batch of length one is returned as a single
/// vector.
#[derive(Clone, Debug, PartialEq)]
pub struct BatchQuery {
    pub source: Source,
    pub observer: Param<Vector3<f64>>,
    pub position: Option<Param<Vector3<f64>>>,
    pub orientation: Option<Param<UnitQuaternion<f64>>>,
    pub squeeze: bool,
}

impl BatchQuery {
    pub fn new(source: Source, observer: impl Into<Param<Vector3<f64>>>) -> Self {
        BatchQuery {
            source,
            observer: observer.into(),
            position: None,
            orientation: None,
            squeeze: true,
        }
    }

    pub fn with_position(mut self, position: impl Into<Param<Vector3<f64>>>) -> Self {
        self.position = Some(position.into());
        self
    }

    pub fn with_orientation(mut self, orientation: impl Into<Param<UnitQuaternion<f64>>>) -> Self {
        self.orientation = Some(orientation.into());
        self
    }

    pub fn with_squeeze(mut self, squeeze: bool) -> Self {
        self.squeeze = squeeze;
        self
    }

    /// Validates the query and brings every input to a common batch length.
    ///
    /// All explicitly batched inputs must agree on their length `N`, single instances are
    /// tiled to `N`. Without any explicit batch, `N = 1`.
    pub fn normalize(&self) -> Result<NormalizedBatch, FieldError> {
        self.source.validate()?;

        let mut lengths = BTreeMap::new();
        record_batch_length(&mut lengths, "observer", &self.observer);
        if let Some(position) = &self.position {
            record_batch_length(&mut lengths, "position", position);
        }
        if let Some(orientation) = &self.orientation {
            record_batch_length(&mut lengths, "orientation", orientation);
        }
        self.source.record_batch_lengths(&mut lengths);
        let n = batch_length(lengths)?;
        debug!("normalised {} query to {} instances", self.source.source_type(), n);

        let positions = match &self.position {
            Some(position) => position.tile(n),
            None => vec![Vector3::zeros(); n],
        };
        let orientations = match &self.orientation {
            Some(orientation) => orientation.tile(n),
            None => vec![UnitQuaternion::identity(); n],
        };
        let poses = positions
            .into_iter()
            .zip(orientations)
            .map(|(position, orientation)| Pose::new(position, orientation))
            .collect();

        Ok(NormalizedBatch {
            observers: self.observer.tile(n),
            poses,
            source: self.source.tile(n),
            squeeze: self.squeeze,
        })
    }
}

/// Resolves the common batch length from the lengths of all explicit batches.
fn batch_length(lengths: BTreeMap<&'static str, usize>) -> Result<usize, FieldError> {
    let distinct: BTreeSet<usize> = lengths.values().copied().collect();
    match distinct.len() {
        0 => Ok(1),
        1 => Ok(*lengths.values().next().unwrap_or(&1)),
        _ => Err(FieldError::LengthMismatch { lengths }),
    }
}

/// A query with all inputs expanded to the same batch length.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizedBatch {
    pub observers: Vec<Vector3<f64>>,
    pub poses: Vec<Pose>,
    pub source: SourceBatch,
    pub squeeze: bool,
}

impl NormalizedBatch {
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}
