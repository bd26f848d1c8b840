//! Uniformly magnetized spheres

use super::dipole::dipole_field;
use super::FieldSample;
use crate::constant::PI;
use nalgebra::Vector3;

/// Field of a sphere centred on the origin.
///
/// Outside, including the surface, the field equals that of a dipole with the total moment
/// of the sphere. Inside it is homogeneous, `B = 2/3 J`.
pub fn sphere_field(
    observer: &Vector3<f64>,
    polarization: &Vector3<f64>,
    diameter: f64,
) -> FieldSample {
    let radius = diameter.abs() / 2.0;
    if radius == 0.0 {
        return FieldSample::default();
    }
    if observer.norm() < radius {
        FieldSample::inside(polarization * 2.0 / 3.0, *polarization)
    } else {
        let moment = polarization * (4.0 / 3.0 * PI * radius.powi(3));
        FieldSample::outside(dipole_field(observer, &moment))
    }
}
