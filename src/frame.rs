//! Local reference frames of placed sources.

extern crate nalgebra;
extern crate rayon;
use crate::magnetic::FieldSample;
use nalgebra::{Unit, UnitQuaternion, Vector3};
use rayon::prelude::*;

/// Position and orientation of a source in the global frame.
///
/// A point `p_local` in the source frame sits at `position + orientation * p_local` globally.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub position: Vector3<f64>,
    pub orientation: UnitQuaternion<f64>,
}

impl Default for Pose {
    fn default() -> Self {
        Pose {
            position: Vector3::zeros(),
            orientation: UnitQuaternion::identity(),
        }
    }
}

impl Pose {
    pub fn new(position: Vector3<f64>, orientation: UnitQuaternion<f64>) -> Self {
        Pose {
            position,
            orientation,
        }
    }

    /// Maps a global point into the source frame.
    pub fn to_local(&self, point: &Vector3<f64>) -> Vector3<f64> {
        self.orientation
            .inverse_transform_vector(&(point - self.position))
    }

    /// Maps a point of the source frame into the global frame.
    pub fn to_global(&self, point: &Vector3<f64>) -> Vector3<f64> {
        self.orientation.transform_vector(point) + self.position
    }

    /// Rotates a field vector from the source frame into the global frame.
    pub fn vector_to_global(&self, vector: &Vector3<f64>) -> Vector3<f64> {
        self.orientation.transform_vector(vector)
    }
}

/// Rotation by `angle` (radians) about `axis`. A zero axis gives the identity.
pub fn orientation_from_angle_axis(angle: f64, axis: &Vector3<f64>) -> UnitQuaternion<f64> {
    match Unit::try_new(*axis, 0.0) {
        Some(axis) => UnitQuaternion::from_axis_angle(&axis, angle),
        None => UnitQuaternion::identity(),
    }
}

/// Expresses every observer in the frame of its source instance.
pub fn observers_to_local(
    poses: &[Pose],
    observers: &[Vector3<f64>],
    batch_size: usize,
) -> Vec<Vector3<f64>> {
    poses
        .par_iter()
        .zip(observers)
        .with_min_len(batch_size.max(1))
        .map(|(pose, observer)| pose.to_local(observer))
        .collect()
}

/// Rotates field samples from the source frames back into the global frame.
pub fn samples_to_global(poses: &[Pose], samples: &mut [FieldSample], batch_size: usize) {
    samples
        .par_iter_mut()
        .zip(poses)
        .with_min_len(batch_size.max(1))
        .for_each(|(sample, pose)| *sample = sample.rotated(&pose.orientation));
}
