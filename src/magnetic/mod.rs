//! Magnetic field kernels of the supported sources.
//!
//! Every kernel works in the local frame of its source and returns one [FieldSample] per
//! batch entry. The samples carry the polarization found at the observer, so that H can be
//! derived from B afterwards.

extern crate nalgebra;
use crate::config::EvaluationConfig;
use crate::constant::MT_TO_KA_PER_M;
use crate::source::{LinePathBatch, SourceBatch};
use log::debug;
use nalgebra::{UnitQuaternion, Vector3};
use rayon::prelude::*;
use std::fmt;
use std::ops::{Add, Sub};

pub mod coil;
pub mod cuboid;
pub mod cylinder;
pub mod dipole;
pub mod line;
pub mod sphere;

/// The field of a single source instance at a single observer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FieldSample {
    /// Magnetic flux density B along x,y,z in units of mT.
    pub b: Vector3<f64>,

    /// Polarization of the magnet material at the observer, in units of mT.
    /// Zero outside of magnets and for current sources.
    pub polarization: Vector3<f64>,
}

impl FieldSample {
    /// A sample outside of any magnetized material.
    pub fn outside(b: Vector3<f64>) -> Self {
        FieldSample {
            b,
            polarization: Vector3::zeros(),
        }
    }

    /// A sample inside a magnet of the given polarization.
    pub fn inside(b: Vector3<f64>, polarization: Vector3<f64>) -> Self {
        FieldSample { b, polarization }
    }

    /// Magnetic field strength H in units of kA/m.
    pub fn h(&self) -> Vector3<f64> {
        (self.b - self.polarization) * MT_TO_KA_PER_M
    }

    pub fn rotated(&self, rotation: &UnitQuaternion<f64>) -> Self {
        FieldSample {
            b: rotation.transform_vector(&self.b),
            polarization: rotation.transform_vector(&self.polarization),
        }
    }
}

impl Default for FieldSample {
    fn default() -> Self {
        FieldSample::outside(Vector3::zeros())
    }
}

impl Add for FieldSample {
    type Output = FieldSample;
    fn add(self, other: FieldSample) -> FieldSample {
        FieldSample {
            b: self.b + other.b,
            polarization: self.polarization + other.polarization,
        }
    }
}

impl Sub for FieldSample {
    type Output = FieldSample;
    fn sub(self, other: FieldSample) -> FieldSample {
        FieldSample {
            b: self.b - other.b,
            polarization: self.polarization - other.polarization,
        }
    }
}

impl fmt::Display for FieldSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?},{:?},{:?})", self.b[0], self.b[1], self.b[2])
    }
}

/// Evaluates a batch of sources at observers given in the respective source frames.
///
/// `observers` must have the batch length of `source`.
pub fn evaluate_local(
    source: &SourceBatch,
    observers: &[Vector3<f64>],
    config: &EvaluationConfig,
) -> Vec<FieldSample> {
    debug!(
        "evaluating {} {} instances",
        observers.len(),
        source.source_type()
    );
    let min_len = config.batch_size.max(1);
    let tolerance = config.edge_tolerance;
    match source {
        SourceBatch::Box {
            magnetization,
            dimension,
        } => observers
            .par_iter()
            .zip(magnetization)
            .zip(dimension)
            .with_min_len(min_len)
            .map(|((observer, polarization), size)| {
                cuboid::cuboid_field(observer, polarization, size, tolerance)
            })
            .collect(),
        SourceBatch::Cylinder {
            magnetization,
            dimension,
        } => observers
            .par_iter()
            .zip(magnetization)
            .zip(dimension)
            .with_min_len(min_len)
            .map(|((observer, polarization), size)| {
                cylinder::cylinder_field(observer, polarization, size, tolerance)
            })
            .collect(),
        SourceBatch::Sphere {
            magnetization,
            diameter,
        } => observers
            .par_iter()
            .zip(magnetization)
            .zip(diameter)
            .with_min_len(min_len)
            .map(|((observer, polarization), diameter)| {
                sphere::sphere_field(observer, polarization, *diameter)
            })
            .collect(),
        SourceBatch::Dipole { moment } => observers
            .par_iter()
            .zip(moment)
            .with_min_len(min_len)
            .map(|(observer, moment)| FieldSample::outside(dipole::dipole_field(observer, moment)))
            .collect(),
        SourceBatch::Circular { current, diameter } => observers
            .par_iter()
            .zip(current)
            .zip(diameter)
            .with_min_len(min_len)
            .map(|((observer, current), diameter)| {
                FieldSample::outside(coil::loop_field(observer, *current, *diameter, tolerance))
            })
            .collect(),
        SourceBatch::Line { current, path } => match path {
            LinePathBatch::Segment { start, end } => observers
                .par_iter()
                .zip(current)
                .zip(start)
                .zip(end)
                .with_min_len(min_len)
                .map(|(((observer, current), start), end)| {
                    FieldSample::outside(line::segment_field(
                        observer, *current, start, end, tolerance,
                    ))
                })
                .collect(),
            LinePathBatch::Vertices(vertices) => observers
                .par_iter()
                .zip(current)
                .zip(vertices)
                .with_min_len(min_len)
                .map(|((observer, current), vertices)| {
                    FieldSample::outside(line::polyline_field(
                        observer, *current, vertices, tolerance,
                    ))
                })
                .collect(),
        },
    }
}
