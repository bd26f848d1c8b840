//! Point dipoles

use crate::constant::PI;
use nalgebra::Vector3;

/// Flux density of a point dipole at the origin.
///
/// `moment` is given as mu0 m in units of mT mm³, the result is in mT.
/// The field is defined as zero at the dipole location itself.
pub fn dipole_field(observer: &Vector3<f64>, moment: &Vector3<f64>) -> Vector3<f64> {
    let r2 = observer.norm_squared();
    if r2 == 0.0 {
        return Vector3::zeros();
    }
    let r = r2.sqrt();
    (3.0 * moment.dot(observer) / r2 * observer - moment) / (4.0 * PI * r2 * r)
}
