//! Keyword-style inputs and the broadcasting rules applied to them.
//!
//! Every input has a declared rank. A value one rank below the declared rank is a single
//! instance shared by the whole batch, a value at the declared rank is an explicit batch.
//! [Param] captures that distinction in the type, so broadcasting never has to guess.

use crate::error::FieldError;
use crate::query::BatchQuery;
use crate::source::{CylinderDimension, LinePath, Source, SourceType};
use log::warn;
use nalgebra::{Quaternion, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A per-instance input of a batched field query.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Param<T> {
    /// A single instance, tiled up to the batch length.
    One(T),
    /// An explicit batch with one value per instance.
    Many(Vec<T>),
}

impl<T> Param<T> {
    /// Length of an explicit batch, `None` for a single instance.
    pub fn batch_len(&self) -> Option<usize> {
        match self {
            Param::One(_) => None,
            Param::Many(values) => Some(values.len()),
        }
    }

    /// All values held by the input, without tiling.
    pub fn values(&self) -> &[T] {
        match self {
            Param::One(value) => std::slice::from_ref(value),
            Param::Many(values) => values,
        }
    }

    /// Converts every value, keeping the single/batch distinction.
    pub fn try_map<U, E, F>(self, mut f: F) -> Result<Param<U>, E>
    where
        F: FnMut(T) -> Result<U, E>,
    {
        match self {
            Param::One(value) => Ok(Param::One(f(value)?)),
            Param::Many(values) => Ok(Param::Many(
                values.into_iter().map(f).collect::<Result<Vec<U>, E>>()?,
            )),
        }
    }
}

impl<T: Clone> Param<T> {
    /// Replicates a single instance `n` times. Explicit batches are passed through unchanged,
    /// their length has already been checked against `n`.
    pub fn tile(&self, n: usize) -> Vec<T> {
        match self {
            Param::One(value) => vec![value.clone(); n],
            Param::Many(values) => values.clone(),
        }
    }
}

impl<T> From<T> for Param<T> {
    fn from(value: T) -> Self {
        Param::One(value)
    }
}

impl<T> From<Vec<T>> for Param<T> {
    fn from(values: Vec<T>) -> Self {
        Param::Many(values)
    }
}

/// Notes the length of `param` if it is an explicit batch.
pub(crate) fn record_batch_length<T>(
    lengths: &mut BTreeMap<&'static str, usize>,
    key: &'static str,
    param: &Param<T>,
) {
    if let Some(n) = param.batch_len() {
        lengths.insert(key, n);
    }
}

/// A field query in keyword form.
///
/// All keys are optional at the type level. Which ones are mandatory depends on `source_type`,
/// and is checked when the query is converted into a [BatchQuery]. Orientations are quaternions
/// in scalar-last order `[x, y, z, w]`.
///
/// Units: lengths in mm, `magnetization` as polarization in mT, `moment` in mT mm³, `current` in A.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observer: Option<Param<Vector3<f64>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Param<Vector3<f64>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Param<[f64; 4]>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub squeeze: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub magnetization: Option<Param<Vector3<f64>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimension: Option<Param<Vec<f64>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diameter: Option<Param<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moment: Option<Param<Vector3<f64>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<Param<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment_start: Option<Param<Vector3<f64>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment_end: Option<Param<Vector3<f64>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertices: Option<Param<Vec<Vector3<f64>>>>,
}

impl FieldQuery {
    /// Source specific keys that are present in the query.
    fn source_keys(&self) -> Vec<&'static str> {
        let present = [
            ("magnetization", self.magnetization.is_some()),
            ("dimension", self.dimension.is_some()),
            ("diameter", self.diameter.is_some()),
            ("moment", self.moment.is_some()),
            ("current", self.current.is_some()),
            ("segment_start", self.segment_start.is_some()),
            ("segment_end", self.segment_end.is_some()),
            ("vertices", self.vertices.is_some()),
        ];
        present
            .iter()
            .filter(|(_, is_present)| *is_present)
            .map(|(key, _)| *key)
            .collect()
    }

    fn warn_irrelevant_keys(&self, source_type: SourceType) {
        let accepted = source_type.accepted_keys();
        for key in self.source_keys() {
            if !accepted.contains(&key) {
                warn!(
                    "ignoring input '{}', it is not used by {} sources",
                    key, source_type
                );
            }
        }
    }
}

fn required<T>(key: &'static str, value: Option<T>) -> Result<T, FieldError> {
    value.ok_or(FieldError::MissingInput { key })
}

fn box_dimension(row: Vec<f64>) -> Result<Vector3<f64>, FieldError> {
    match row.as_slice() {
        [a, b, c] => Ok(Vector3::new(*a, *b, *c)),
        _ => Err(FieldError::bad_value(
            "dimension",
            format!("Box dimension needs 3 edge lengths, got {} values", row.len()),
        )),
    }
}

/// Decodes one Cylinder `dimension` row.
///
/// Accepted widths:
/// - 2: `(diameter, height)`, a solid cylinder;
/// - 3: `(inner_diameter, outer_diameter, height)`, a ring;
/// - 5: `(inner_radius, outer_radius, phi1, phi2, height)`;
/// - 6: `(inner_radius, outer_radius, phi1, phi2, z1, z2)`.
///
/// The sector forms take angles in degrees and must span the full circle.
fn cylinder_dimension(row: Vec<f64>) -> Result<CylinderDimension, FieldError> {
    match *row.as_slice() {
        [diameter, height] => Ok(CylinderDimension::Solid { diameter, height }),
        [inner_diameter, outer_diameter, height] => Ok(CylinderDimension::Ring {
            inner_diameter,
            outer_diameter,
            height,
            z_center: 0.0,
        }),
        [inner_radius, outer_radius, phi1, phi2, height] => {
            full_circle(phi1, phi2)?;
            Ok(CylinderDimension::Ring {
                inner_diameter: 2.0 * inner_radius,
                outer_diameter: 2.0 * outer_radius,
                height,
                z_center: 0.0,
            })
        }
        [inner_radius, outer_radius, phi1, phi2, z1, z2] => {
            full_circle(phi1, phi2)?;
            Ok(CylinderDimension::Ring {
                inner_diameter: 2.0 * inner_radius,
                outer_diameter: 2.0 * outer_radius,
                height: z2 - z1,
                z_center: (z1 + z2) / 2.0,
            })
        }
        _ => Err(FieldError::bad_value(
            "dimension",
            format!(
                "Cylinder dimension needs 2, 3, 5 or 6 values per row, got {}",
                row.len()
            ),
        )),
    }
}

fn full_circle(phi1: f64, phi2: f64) -> Result<(), FieldError> {
    if ((phi2 - phi1) - 360.0).abs() <= 1e-9 {
        Ok(())
    } else {
        Err(FieldError::bad_value(
            "dimension",
            format!(
                "cylinder sectors are not supported, got angles {} to {} degrees",
                phi1, phi2
            ),
        ))
    }
}

/// Builds a rotation from a scalar-last quaternion `[x, y, z, w]`, normalising it.
pub fn orientation_from_quat(quat: [f64; 4]) -> Result<UnitQuaternion<f64>, FieldError> {
    let [x, y, z, w] = quat;
    let q = Quaternion::new(w, x, y, z);
    let norm = q.norm();
    if norm == 0.0 || !norm.is_finite() {
        return Err(FieldError::bad_value(
            "orientation",
            format!("quaternion {:?} cannot be normalised", quat),
        ));
    }
    Ok(UnitQuaternion::from_quaternion(q))
}

impl std::convert::TryFrom<FieldQuery> for BatchQuery {
    type Error = FieldError;

    fn try_from(query: FieldQuery) -> Result<Self, FieldError> {
        let source_type: SourceType = required("source_type", query.source_type.as_deref())?.parse()?;
        let observer = required("observer", query.observer.clone())?;
        query.warn_irrelevant_keys(source_type);

        let source = match source_type {
            SourceType::Box => Source::Box {
                magnetization: required("magnetization", query.magnetization)?,
                dimension: required("dimension", query.dimension)?.try_map(box_dimension)?,
            },
            SourceType::Cylinder => Source::Cylinder {
                magnetization: required("magnetization", query.magnetization)?,
                dimension: required("dimension", query.dimension)?.try_map(cylinder_dimension)?,
            },
            SourceType::Sphere => Source::Sphere {
                magnetization: required("magnetization", query.magnetization)?,
                diameter: required("diameter", query.diameter)?,
            },
            SourceType::Dipole => Source::Dipole {
                moment: required("moment", query.moment)?,
            },
            SourceType::Circular => Source::Circular {
                current: required("current", query.current)?,
                diameter: required("diameter", query.diameter)?,
            },
            SourceType::Line => {
                let current = required("current", query.current)?;
                let path = match (query.vertices, query.segment_start, query.segment_end) {
                    (Some(vertices), None, None) => LinePath::Vertices(vertices),
                    (Some(_), _, _) => {
                        return Err(FieldError::bad_value(
                            "vertices",
                            "cannot be combined with segment_start or segment_end",
                        ))
                    }
                    (None, start, end) => LinePath::Segment {
                        start: required("segment_start", start)?,
                        end: required("segment_end", end)?,
                    },
                };
                Source::Line { current, path }
            }
        };

        let orientation = match query.orientation {
            Some(orientation) => Some(orientation.try_map(orientation_from_quat)?),
            None => None,
        };

        Ok(BatchQuery {
            source,
            observer,
            position: query.position,
            orientation,
            squeeze: query.squeeze.unwrap_or(true),
        })
    }
}
