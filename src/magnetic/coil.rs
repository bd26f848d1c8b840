//! Magnetic field from a circular current loop

extern crate nalgebra;

use crate::constant::MU0_OVER_4PI;
use crate::maths::cel;
use nalgebra::Vector3;

/// Calculates the flux density of a circular loop in the local xy plane, centred on the origin.
///
/// The current is positive if it circulates right-handed about local z.
/// On the wire itself the field is set to zero.
///
/// # Arguments
///
/// `observer`: position of the observer in the loop frame, mm
///
/// `current`: current in the loop, A
///
/// `diameter`: diameter of the loop, mm
///
/// `tolerance`: relative distance to the wire below which the observer counts as on the wire
pub fn loop_field(
    observer: &Vector3<f64>,
    current: f64,
    diameter: f64,
    tolerance: f64,
) -> Vector3<f64> {
    let radius = diameter.abs() / 2.0;
    if current == 0.0 || radius == 0.0 {
        return Vector3::zeros();
    }

    let rho = observer.xy().norm();
    let r = rho / radius;
    let z = observer.z / radius;
    if (r - 1.0).abs() <= tolerance && z.abs() <= tolerance {
        return Vector3::zeros();
    }

    let q2 = (1.0 + r).powi(2) + z * z;
    let kc = (((1.0 - r).powi(2) + z * z) / q2).sqrt();
    let b0 = 4.0 * MU0_OVER_4PI * current / radius / (q2 * q2.sqrt());

    let b_rho = b0 * z * cel(kc, kc * kc, -1.0, 1.0);
    let b_z = b0 * cel(kc, kc * kc, 1.0 + r, 1.0 - r);

    if rho == 0.0 {
        Vector3::new(0.0, 0.0, b_z)
    } else {
        Vector3::new(b_rho * observer.x / rho, b_rho * observer.y / rho, b_z)
    }
}
