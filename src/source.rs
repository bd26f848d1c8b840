//! Descriptions of the supported field sources.
//!
//! A [Source] holds the per-instance parameters of one source family, each either a single
//! value or an explicit batch. Geometry is given in the source's local frame, centred on the
//! source. Tiling a [Source] to the batch length yields a [SourceBatch] the kernels consume.

use crate::error::FieldError;
use crate::input::{record_batch_length, Param};
use nalgebra::Vector3;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Tag naming a source family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SourceType {
    Box,
    Cylinder,
    Sphere,
    Dipole,
    Circular,
    Line,
}

impl SourceType {
    pub const ALL: [SourceType; 6] = [
        SourceType::Box,
        SourceType::Cylinder,
        SourceType::Sphere,
        SourceType::Dipole,
        SourceType::Circular,
        SourceType::Line,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SourceType::Box => "Box",
            SourceType::Cylinder => "Cylinder",
            SourceType::Sphere => "Sphere",
            SourceType::Dipole => "Dipole",
            SourceType::Circular => "Circular",
            SourceType::Line => "Line",
        }
    }

    /// Source specific keyword inputs read for this family.
    pub fn accepted_keys(&self) -> &'static [&'static str] {
        match self {
            SourceType::Box | SourceType::Cylinder => &["magnetization", "dimension"],
            SourceType::Sphere => &["magnetization", "diameter"],
            SourceType::Dipole => &["moment"],
            SourceType::Circular => &["current", "diameter"],
            SourceType::Line => &["current", "segment_start", "segment_end", "vertices"],
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for SourceType {
    type Err = FieldError;

    fn from_str(tag: &str) -> Result<Self, FieldError> {
        SourceType::ALL
            .iter()
            .find(|source_type| source_type.name() == tag)
            .copied()
            .ok_or_else(|| FieldError::UnknownSourceType(tag.to_string()))
    }
}

/// Size of a cylinder, with or without a concentric bore. All lengths in mm.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CylinderDimension {
    Solid {
        diameter: f64,
        height: f64,
    },
    Ring {
        inner_diameter: f64,
        outer_diameter: f64,
        height: f64,
        /// Position of the mid-plane on the local z axis.
        z_center: f64,
    },
}

impl CylinderDimension {
    fn validate(&self) -> Result<(), FieldError> {
        match *self {
            CylinderDimension::Solid { diameter, height } => {
                check_size("dimension", diameter)?;
                check_size("dimension", height)
            }
            CylinderDimension::Ring {
                inner_diameter,
                outer_diameter,
                height,
                z_center,
            } => {
                if !z_center.is_finite() {
                    return Err(FieldError::bad_value(
                        "dimension",
                        format!("{} is not a finite axial position", z_center),
                    ));
                }
                check_size("dimension", inner_diameter)?;
                check_size("dimension", outer_diameter)?;
                check_size("dimension", height)?;
                if inner_diameter > outer_diameter {
                    return Err(FieldError::bad_value(
                        "dimension",
                        format!(
                            "inner diameter {} exceeds outer diameter {}",
                            inner_diameter, outer_diameter
                        ),
                    ));
                }
                Ok(())
            }
        }
    }
}

/// Geometry of a line current.
#[derive(Clone, Debug, PartialEq)]
pub enum LinePath {
    /// Straight segments, one per instance, current flowing from `start` to `end`.
    Segment {
        start: Param<Vector3<f64>>,
        end: Param<Vector3<f64>>,
    },
    /// Polylines, one list of at least two vertices per instance.
    Vertices(Param<Vec<Vector3<f64>>>),
}

/// A source family together with its (possibly batched) parameters.
///
/// Units: lengths in mm, `magnetization` is the remanent polarization in mT,
/// `moment` is given in mT mm³ and `current` in A.
#[derive(Clone, Debug, PartialEq)]
pub enum Source {
    /// Cuboid with edge lengths `dimension` along the local axes.
    Box {
        magnetization: Param<Vector3<f64>>,
        dimension: Param<Vector3<f64>>,
    },
    /// Cylinder or ring with its symmetry axis along local z.
    Cylinder {
        magnetization: Param<Vector3<f64>>,
        dimension: Param<CylinderDimension>,
    },
    Sphere {
        magnetization: Param<Vector3<f64>>,
        diameter: Param<f64>,
    },
    Dipole {
        moment: Param<Vector3<f64>>,
    },
    /// Circular current loop in the local xy plane.
    Circular {
        current: Param<f64>,
        diameter: Param<f64>,
    },
    Line {
        current: Param<f64>,
        path: LinePath,
    },
}

fn check_size(key: &'static str, value: f64) -> Result<(), FieldError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(FieldError::bad_value(
            key,
            format!("{} is not a finite non-negative length", value),
        ))
    }
}

impl Source {
    pub fn source_type(&self) -> SourceType {
        match self {
            Source::Box { .. } => SourceType::Box,
            Source::Cylinder { .. } => SourceType::Cylinder,
            Source::Sphere { .. } => SourceType::Sphere,
            Source::Dipole { .. } => SourceType::Dipole,
            Source::Circular { .. } => SourceType::Circular,
            Source::Line { .. } => SourceType::Line,
        }
    }

    /// Rejects parameters that cannot describe a physical source.
    pub(crate) fn validate(&self) -> Result<(), FieldError> {
        match self {
            Source::Box { dimension, .. } => {
                for size in dimension.values() {
                    for edge in size.iter() {
                        check_size("dimension", *edge)?;
                    }
                }
            }
            Source::Cylinder { dimension, .. } => {
                for size in dimension.values() {
                    size.validate()?;
                }
            }
            Source::Sphere { diameter, .. } | Source::Circular { diameter, .. } => {
                for d in diameter.values() {
                    check_size("diameter", *d)?;
                }
            }
            Source::Dipole { .. } => {}
            Source::Line { path, .. } => {
                if let LinePath::Vertices(vertices) = path {
                    if let Some(short) = vertices.values().iter().find(|v| v.len() < 2) {
                        return Err(FieldError::bad_value(
                            "vertices",
                            format!("a polyline needs at least 2 vertices, got {}", short.len()),
                        ));
                    }
                }
            }
        }
        Ok(())
    }

    /// Notes the lengths of all explicitly batched parameters.
    pub(crate) fn record_batch_lengths(&self, lengths: &mut BTreeMap<&'static str, usize>) {
        match self {
            Source::Box {
                magnetization,
                dimension,
            } => {
                record_batch_length(lengths, "magnetization", magnetization);
                record_batch_length(lengths, "dimension", dimension);
            }
            Source::Cylinder {
                magnetization,
                dimension,
            } => {
                record_batch_length(lengths, "magnetization", magnetization);
                record_batch_length(lengths, "dimension", dimension);
            }
            Source::Sphere {
                magnetization,
                diameter,
            } => {
                record_batch_length(lengths, "magnetization", magnetization);
                record_batch_length(lengths, "diameter", diameter);
            }
            Source::Dipole { moment } => record_batch_length(lengths, "moment", moment),
            Source::Circular { current, diameter } => {
                record_batch_length(lengths, "current", current);
                record_batch_length(lengths, "diameter", diameter);
            }
            Source::Line { current, path } => {
                record_batch_length(lengths, "current", current);
                match path {
                    LinePath::Segment { start, end } => {
                        record_batch_length(lengths, "segment_start", start);
                        record_batch_length(lengths, "segment_end", end);
                    }
                    LinePath::Vertices(vertices) => {
                        record_batch_length(lengths, "vertices", vertices)
                    }
                }
            }
        }
    }

    /// Expands every parameter to `n` instances.
    pub(crate) fn tile(&self, n: usize) -> SourceBatch {
        match self {
            Source::Box {
                magnetization,
                dimension,
            } => SourceBatch::Box {
                magnetization: magnetization.tile(n),
                dimension: dimension.tile(n),
            },
            Source::Cylinder {
                magnetization,
                dimension,
            } => SourceBatch::Cylinder {
                magnetization: magnetization.tile(n),
                dimension: dimension.tile(n),
            },
            Source::Sphere {
                magnetization,
                diameter,
            } => SourceBatch::Sphere {
                magnetization: magnetization.tile(n),
                diameter: diameter.tile(n),
            },
            Source::Dipole { moment } => SourceBatch::Dipole {
                moment: moment.tile(n),
            },
            Source::Circular { current, diameter } => SourceBatch::Circular {
                current: current.tile(n),
                diameter: diameter.tile(n),
            },
            Source::Line { current, path } => SourceBatch::Line {
                current: current.tile(n),
                path: match path {
                    LinePath::Segment { start, end } => LinePathBatch::Segment {
                        start: start.tile(n),
                        end: end.tile(n),
                    },
                    LinePath::Vertices(vertices) => LinePathBatch::Vertices(vertices.tile(n)),
                },
            },
        }
    }
}

/// [LinePath] expanded to the batch length.
#[derive(Clone, Debug, PartialEq)]
pub enum LinePathBatch {
    Segment {
        start: Vec<Vector3<f64>>,
        end: Vec<Vector3<f64>>,
    },
    Vertices(Vec<Vec<Vector3<f64>>>),
}

/// [Source] expanded to the batch length, one entry per instance in every field.
#[derive(Clone, Debug, PartialEq)]
pub enum SourceBatch {
    Box {
        magnetization: Vec<Vector3<f64>>,
        dimension: Vec<Vector3<f64>>,
    },
    Cylinder {
        magnetization: Vec<Vector3<f64>>,
        dimension: Vec<CylinderDimension>,
    },
    Sphere {
        magnetization: Vec<Vector3<f64>>,
        diameter: Vec<f64>,
    },
    Dipole {
        moment: Vec<Vector3<f64>>,
    },
    Circular {
        current: Vec<f64>,
        diameter: Vec<f64>,
    },
    Line {
        current: Vec<f64>,
        path: LinePathBatch,
    },
}

impl SourceBatch {
    pub fn source_type(&self) -> SourceType {
        match self {
            SourceBatch::Box { .. } => SourceType::Box,
            SourceBatch::Cylinder { .. } => SourceType::Cylinder,
            SourceBatch::Sphere { .. } => SourceType::Sphere,
            SourceBatch::Dipole { .. } => SourceType::Dipole,
            SourceBatch::Circular { .. } => SourceType::Circular,
            SourceBatch::Line { .. } => SourceType::Line,
        }
    }
}
