//! Uniformly magnetized cylinders and cylinder rings
//!
//! The polarization is split into its axial and diametral parts. The axial part is evaluated
//! with the Derby-Olbert closed form, the diametral part from the surface charges on the mantle,
//! whose azimuthal integrals reduce to generalized complete elliptic integrals.
//! All lengths are scaled by the cylinder radius.

use super::FieldSample;
use crate::constant::PI;
use crate::maths::{cel, quarter_period_trapezoid};
use crate::source::CylinderDimension;
use nalgebra::Vector3;

/// Below this scaled distance from the axis the mantle integrals are evaluated by quadrature,
/// their closed form loses precision as the observer approaches the axis.
const NEAR_AXIS: f64 = 0.1;

const NEAR_AXIS_INTERVALS: usize = 32;

/// Field of a cylinder or ring, symmetry axis along local z.
///
/// A solid cylinder is centred on the origin, a ring on `z_center` along the axis.
pub fn cylinder_field(
    observer: &Vector3<f64>,
    polarization: &Vector3<f64>,
    dimension: &CylinderDimension,
    tolerance: f64,
) -> FieldSample {
    match *dimension {
        CylinderDimension::Solid { diameter, height } => {
            solid_cylinder_field(observer, polarization, diameter, height, tolerance)
        }
        CylinderDimension::Ring {
            inner_diameter,
            outer_diameter,
            height,
            z_center,
        } => ring_field(
            &(observer - Vector3::new(0.0, 0.0, z_center)),
            polarization,
            inner_diameter,
            outer_diameter,
            height,
            tolerance,
        ),
    }
}

/// Field of a ring centred on the origin, the difference of two solid cylinders.
///
/// Both rims of the inner and outer mantle give zero. The outer mantle and the end caps take
/// the exterior limit like a solid cylinder, the inner mantle takes the limit from the bore.
fn ring_field(
    observer: &Vector3<f64>,
    polarization: &Vector3<f64>,
    inner_diameter: f64,
    outer_diameter: f64,
    height: f64,
    tolerance: f64,
) -> FieldSample {
    let inner_radius = inner_diameter.abs() / 2.0;
    let outer_radius = outer_diameter.abs() / 2.0;
    if inner_radius == 0.0 {
        return solid_cylinder_field(observer, polarization, outer_diameter, height, tolerance);
    }
    if inner_radius >= outer_radius || height == 0.0 {
        return FieldSample::default();
    }

    let half_height = height.abs() / 2.0;
    let rho = observer.xy().norm();
    let on_inner_mantle = (rho - inner_radius).abs() <= tolerance * inner_radius;
    let on_outer_mantle = (rho - outer_radius).abs() <= tolerance * outer_radius;
    let on_end_plane =
        (observer.z.abs() - half_height).abs() <= tolerance * half_height.max(outer_radius);
    if (on_inner_mantle || on_outer_mantle) && on_end_plane {
        return FieldSample::default();
    }

    let wall = solid_cylinder_field(observer, polarization, outer_diameter, height, tolerance)
        - solid_cylinder_field(observer, polarization, inner_diameter, height, tolerance);
    if on_inner_mantle && observer.z.abs() < half_height {
        // The inner cylinder was taken from outside. Its interior B differs by the tangential
        // polarization, B_r is continuous.
        let radial = Vector3::new(observer.x / rho, observer.y / rho, 0.0);
        let tangential = polarization - radial * polarization.dot(&radial);
        return FieldSample::outside(wall.b - tangential);
    }
    wall
}

/// Field of a solid cylinder.
///
/// The mantle and the end caps count as outside, on the rims the field is set to zero.
pub fn solid_cylinder_field(
    observer: &Vector3<f64>,
    polarization: &Vector3<f64>,
    diameter: f64,
    height: f64,
    tolerance: f64,
) -> FieldSample {
    let radius = diameter.abs() / 2.0;
    let half_height = height.abs() / 2.0 / radius;
    if radius == 0.0 || half_height == 0.0 || polarization.iter().all(|j| *j == 0.0) {
        return FieldSample::default();
    }

    let rho = observer.xy().norm();
    let mut r = rho / radius;
    let z = observer.z / radius;
    if (r - 1.0).abs() <= tolerance {
        r = 1.0;
    }
    let on_end_plane = (z.abs() - half_height).abs() <= tolerance * half_height.max(1.0);
    if r == 1.0 && on_end_plane {
        return FieldSample::default();
    }

    let (cos_phi, sin_phi) = if rho == 0.0 {
        (1.0, 0.0)
    } else {
        (observer.x / rho, observer.y / rho)
    };
    let j_r = polarization.x * cos_phi + polarization.y * sin_phi;
    let j_phi = polarization.y * cos_phi - polarization.x * sin_phi;

    let (b_r, b_z) = axial_field(r, z, half_height, polarization.z);
    let (h_r, h_phi, h_z) = diametral_field(r, z, half_height, j_r, j_phi);
    let mut b_r = b_r + h_r;
    let mut b_phi = h_phi;
    let mut b_z = b_z + h_z;

    let inside = r < 1.0 && z.abs() < half_height;
    if inside {
        b_r += j_r;
        b_phi += j_phi;
    } else if r == 1.0 && z.abs() < half_height {
        // On the mantle the closed forms give the mean of the interior and exterior limits.
        b_r += j_r / 2.0;
        b_z -= polarization.z / 2.0;
    }

    let b = Vector3::new(
        b_r * cos_phi - b_phi * sin_phi,
        b_r * sin_phi + b_phi * cos_phi,
        b_z,
    );
    if inside {
        FieldSample::inside(b, *polarization)
    } else {
        FieldSample::outside(b)
    }
}

/// B of the axial polarization `j_z`, radial and axial components.
fn axial_field(r: f64, z: f64, half_height: f64, j_z: f64) -> (f64, f64) {
    if j_z == 0.0 {
        return (0.0, 0.0);
    }
    let r_plus = 1.0 + r;
    let r_minus = 1.0 - r;
    let gamma = r_minus / r_plus;

    let mut b_r = 0.0;
    let mut b_z = 0.0;
    for &(zeta, sign) in [(z + half_height, 1.0), (z - half_height, -1.0)].iter() {
        let norm = (zeta * zeta + r_plus * r_plus).sqrt();
        let kc = (zeta * zeta + r_minus * r_minus).sqrt() / norm;
        b_r += sign / norm * cel(kc, 1.0, 1.0, -1.0);
        b_z += sign * zeta / norm * cel(kc, gamma * gamma, 1.0, gamma);
    }
    (j_z / PI * b_r, j_z / PI * b_z / r_plus)
}

/// mu0 H of the diametral polarization, radial, azimuthal and axial components.
///
/// `j_r` and `j_phi` are the components of the diametral polarization along the radial and
/// azimuthal unit vectors at the observer.
fn diametral_field(r: f64, z: f64, half_height: f64, j_r: f64, j_phi: f64) -> (f64, f64, f64) {
    if j_r == 0.0 && j_phi == 0.0 {
        return (0.0, 0.0, 0.0);
    }
    let r_plus = 1.0 + r;

    let mut radial = 0.0;
    let mut azimuthal = 0.0;
    let mut axial = 0.0;
    for &(w, sign) in [(z + half_height, 1.0), (z - half_height, -1.0)].iter() {
        let q2 = r_plus * r_plus + w * w;
        let q = q2.sqrt();
        let kc = (((r - 1.0).powi(2) + w * w) / q2).sqrt();
        let (i_r, i_phi) = if r < NEAR_AXIS {
            mantle_integrals_near_axis(r, 4.0 * r / q2)
        } else {
            mantle_integrals(r, kc)
        };
        let scale = w / (r_plus * r_plus * q);
        radial += sign * 4.0 * scale * i_r;
        azimuthal -= sign * 16.0 * scale * i_phi;
        axial -= sign * 4.0 / q * cel(kc, 1.0, -1.0, 1.0);
    }
    (
        j_r * radial / (4.0 * PI),
        j_phi * azimuthal / (4.0 * PI),
        j_r * axial / (4.0 * PI),
    )
}

/// Azimuthal integrals of the mantle charges, in terms of `cel`.
///
/// With `t = sin²θ`, `n = 4r/(1+r)²` and `m = 4r/q²` these are
/// `∫ N(t) / ((1 - n t) sqrt(1 - m t)) dθ` with `N = -4t² + (2r+4)t - (1+r)` for the radial
/// and `N = t(1 - t)` for the azimuthal integral, both over `θ ∈ [0, π/2]`.
fn mantle_integrals(r: f64, kc: f64) -> (f64, f64) {
    let r_plus = 1.0 + r;
    let n = 4.0 * r / (r_plus * r_plus);
    let p = ((r - 1.0) / r_plus).powi(2);
    // The pole term carries a factor that vanishes with p, so it is dropped on the mantle.
    let pole = if p > 0.0 { cel(kc, p, 1.0, 1.0) } else { 0.0 };

    let alpha = 4.0 / n;
    let beta = (alpha - 2.0 * r - 4.0) / n;
    let gamma = -r_plus - beta;
    let radial = cel(kc, 1.0, beta, alpha + beta) + gamma * pole;

    let alpha = 1.0 / n;
    let beta = (1.0 - n) / (n * n);
    let azimuthal = cel(kc, 1.0, beta, alpha + beta) - beta * pole;
    (radial, azimuthal)
}

/// Same integrals as [mantle_integrals], by quadrature.
fn mantle_integrals_near_axis(r: f64, m: f64) -> (f64, f64) {
    let r_plus = 1.0 + r;
    let n = 4.0 * r / (r_plus * r_plus);
    let denominator = |t: f64| (1.0 - n * t) * (1.0 - m * t).sqrt();
    let radial = quarter_period_trapezoid(
        |theta| {
            let t = theta.sin().powi(2);
            (-4.0 * t * t + (2.0 * r + 4.0) * t - r_plus) / denominator(t)
        },
        NEAR_AXIS_INTERVALS,
    );
    let azimuthal = quarter_period_trapezoid(
        |theta| {
            let t = theta.sin().powi(2);
            t * (1.0 - t) / denominator(t)
        },
        NEAR_AXIS_INTERVALS,
    );
    (radial, azimuthal)
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::magnetic::dipole::dipole_field;
    use assert_approx_eq::assert_approx_eq;

    const TOLERANCE: f64 = 1e-12;

    fn solid(diameter: f64, height: f64) -> CylinderDimension {
        CylinderDimension::Solid { diameter, height }
    }

    #[test]
    fn test_axial_centre() {
        let j = Vector3::new(0.0, 0.0, 1000.0);
        let sample = cylinder_field(&Vector3::zeros(), &j, &solid(2.0, 2.0), TOLERANCE);
        assert_approx_eq!(sample.b[2], 1000.0 / 2.0_f64.sqrt(), 1e-9);
        assert_approx_eq!(sample.b[0], 0.0, 1e-12);
        assert_eq!(sample.polarization, j);
    }

    #[test]
    fn test_diametral_centre() {
        let j = Vector3::new(1000.0, 0.0, 0.0);
        let sample = cylinder_field(&Vector3::zeros(), &j, &solid(2.0, 2.0), TOLERANCE);
        // mu0 H = -J b / (2 sqrt(1 + b²)) at the centre, with b = h / d.
        assert_approx_eq!(sample.b[0], 1000.0 * (1.0 - 1.0 / (2.0 * 2.0_f64.sqrt())), 1e-6);
        assert_approx_eq!(sample.b[1], 0.0, 1e-9);
        assert_approx_eq!(sample.b[2], 0.0, 1e-9);
    }

    #[test]
    fn test_on_axis_outside() {
        let (radius, half_height, z) = (1.5, 2.0, 3.5_f64);
        let j_z = 800.0;
        let sample = cylinder_field(
            &Vector3::new(0.0, 0.0, z),
            &Vector3::new(0.0, 0.0, j_z),
            &solid(2.0 * radius, 2.0 * half_height),
            TOLERANCE,
        );
        let expected = j_z / 2.0
            * ((z + half_height) / ((z + half_height).powi(2) + radius * radius).sqrt()
                - (z - half_height) / ((z - half_height).powi(2) + radius * radius).sqrt());
        assert_approx_eq!(sample.b[2], expected, 1e-9);
    }

    /// Compares against direct integration of the surface charges.
    #[test]
    fn test_reference_values() {
        let j = Vector3::new(1.0, 2.0, 3.0);
        let dimension = solid(2.0, 1.6);
        let cases = [
            (Vector3::new(1.5, 0.7, 0.4), Vector3::new(0.415941, 0.069249, -0.123401)),
            (Vector3::new(0.3, 0.2, 1.8), Vector3::new(0.018043, -0.060782, 0.367673)),
            (Vector3::new(0.05, 0.02, 2.0), Vector3::new(-0.034846, -0.083296, 0.264942)),
            (Vector3::new(2.0, -1.0, -0.3), Vector3::new(-0.070356, -0.052185, -0.098751)),
        ];
        for (pos, expected) in cases.iter() {
            let sample = cylinder_field(pos, &j, &dimension, TOLERANCE);
            for i in 0..3 {
                assert_approx_eq!(sample.b[i], expected[i], 1e-5);
            }
        }
    }

    #[test]
    fn test_reference_values_inside() {
        let j = Vector3::new(1.0, 2.0, 3.0);
        let dimension = solid(2.0, 1.6);
        // mu0 H from direct integration, B adds J inside.
        let cases = [
            (Vector3::new(0.6, 0.3, 0.2), Vector3::new(-0.265261, -0.620384, -0.845394)),
            (Vector3::new(0.05, 0.0, 0.3), Vector3::new(-0.281669, -0.593782, -1.212895)),
        ];
        for (pos, h) in cases.iter() {
            let sample = cylinder_field(pos, &j, &dimension, TOLERANCE);
            let expected = h + j;
            for i in 0..3 {
                assert_approx_eq!(sample.b[i], expected[i], 1e-5);
            }
            assert_eq!(sample.polarization, j);
        }
    }

    #[test]
    fn test_far_field_is_dipolar() {
        let j = Vector3::new(300.0, -200.0, 500.0);
        let (diameter, height) = (2.0, 3.0);
        let volume = PI * (diameter / 2.0_f64).powi(2) * height;
        for pos in [Vector3::new(80.0, 60.0, 120.0), Vector3::new(0.05, 0.0, 150.0)].iter() {
            let sample = cylinder_field(pos, &j, &solid(diameter, height), TOLERANCE);
            let expected = dipole_field(pos, &(j * volume));
            for i in 0..3 {
                assert_approx_eq!(sample.b[i], expected[i], 1e-3 * expected.norm());
            }
        }
    }

    #[test]
    fn test_mantle_takes_exterior_limit() {
        let j = Vector3::new(1.0, 2.0, 3.0);
        let dimension = solid(2.0, 1.6);
        let on_mantle = cylinder_field(&Vector3::new(1.0, 0.0, 0.3), &j, &dimension, TOLERANCE);
        let outside = cylinder_field(&Vector3::new(1.0 + 1e-7, 0.0, 0.3), &j, &dimension, TOLERANCE);
        let inside = cylinder_field(&Vector3::new(1.0 - 1e-7, 0.0, 0.3), &j, &dimension, TOLERANCE);
        for i in 0..3 {
            assert_approx_eq!(on_mantle.b[i], outside.b[i], 1e-5);
        }
        assert_eq!(on_mantle.polarization, Vector3::zeros());
        // B_r is continuous, the tangential components jump by J_phi and J_z.
        assert_approx_eq!(inside.b[0], outside.b[0], 1e-5);
        assert_approx_eq!(inside.b[1] - outside.b[1], j[1], 1e-5);
        assert_approx_eq!(inside.b[2] - outside.b[2], j[2], 1e-5);
    }

    #[test]
    fn test_rim_is_zero() {
        let j = Vector3::new(1.0, 2.0, 3.0);
        let sample = cylinder_field(&Vector3::new(0.0, 1.0, 0.8), &j, &solid(2.0, 1.6), TOLERANCE);
        assert_eq!(sample, FieldSample::default());
    }

    #[test]
    fn test_ring_is_difference_of_cylinders() {
        let j = Vector3::new(100.0, 0.0, 400.0);
        let ring = CylinderDimension::Ring {
            inner_diameter: 1.0,
            outer_diameter: 3.0,
            height: 2.0,
            z_center: 0.0,
        };
        // In the bore the observer is outside of the material.
        let pos = Vector3::new(0.1, 0.2, 0.3);
        let sample = cylinder_field(&pos, &j, &ring, TOLERANCE);
        let outer = solid_cylinder_field(&pos, &j, 3.0, 2.0, TOLERANCE);
        let inner = solid_cylinder_field(&pos, &j, 1.0, 2.0, TOLERANCE);
        assert_eq!(sample.polarization, Vector3::zeros());
        for i in 0..3 {
            assert_approx_eq!(sample.b[i], outer.b[i] - inner.b[i], 1e-12);
        }
        // Inside the material the polarization is present.
        let in_wall = cylinder_field(&Vector3::new(1.0, 0.0, 0.0), &j, &ring, TOLERANCE);
        assert_eq!(in_wall.polarization, j);
    }

    #[test]
    fn test_degenerate_cylinders_are_zero() {
        let pos = Vector3::new(0.1, 0.2, 0.3);
        let j = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(cylinder_field(&pos, &j, &solid(0.0, 1.0), TOLERANCE), FieldSample::default());
        assert_eq!(cylinder_field(&pos, &j, &solid(1.0, 0.0), TOLERANCE), FieldSample::default());
        let hollow = CylinderDimension::Ring {
            inner_diameter: 0.0,
            outer_diameter: 2.0,
            height: 1.0,
            z_center: 0.0,
        };
        assert_eq!(
            cylinder_field(&pos, &j, &hollow, TOLERANCE),
            cylinder_field(&pos, &j, &solid(2.0, 1.0), TOLERANCE)
        );
    }

    fn thick_ring(z_center: f64) -> CylinderDimension {
        CylinderDimension::Ring {
            inner_diameter: 1.0,
            outer_diameter: 3.0,
            height: 2.0,
            z_center,
        }
    }

    #[test]
    fn test_ring_rims_are_zero() {
        let j = Vector3::new(100.0, 0.0, 400.0);
        let rims = [
            Vector3::new(0.5, 0.0, 1.0),
            Vector3::new(0.0, -0.5, -1.0),
            Vector3::new(1.5, 0.0, 1.0),
            Vector3::new(0.0, 1.5, -1.0),
        ];
        for pos in rims.iter() {
            assert_eq!(cylinder_field(pos, &j, &thick_ring(0.0), TOLERANCE), FieldSample::default());
        }
    }

    #[test]
    fn test_ring_inner_mantle_takes_bore_limit() {
        let j = Vector3::new(100.0, 0.0, 400.0);
        let ring = thick_ring(0.0);
        let on_mantle = cylinder_field(&Vector3::new(0.5, 0.0, 0.3), &j, &ring, TOLERANCE);
        let bore = cylinder_field(&Vector3::new(0.5 - 1e-7, 0.0, 0.3), &j, &ring, TOLERANCE);
        let wall = cylinder_field(&Vector3::new(0.5 + 1e-7, 0.0, 0.3), &j, &ring, TOLERANCE);
        assert_eq!(on_mantle.polarization, Vector3::zeros());
        assert_eq!(bore.polarization, Vector3::zeros());
        assert_eq!(wall.polarization, j);
        for i in 0..3 {
            assert_approx_eq!(on_mantle.b[i], bore.b[i], 1e-4);
        }
        assert_approx_eq!(on_mantle.b[2], -138.83, 2e-2);
        // Across the inner mantle B_z jumps by J_z, B_r is continuous.
        assert_approx_eq!(wall.b[2] - bore.b[2], j[2], 1e-4);
        assert_approx_eq!(wall.b[0], bore.b[0], 1e-4);
    }

    #[test]
    fn test_ring_outer_mantle_takes_exterior_limit() {
        let j = Vector3::new(100.0, 50.0, 400.0);
        let ring = thick_ring(0.0);
        let on_mantle = cylinder_field(&Vector3::new(0.0, 1.5, -0.4), &j, &ring, TOLERANCE);
        let outside = cylinder_field(&Vector3::new(0.0, 1.5 + 1e-7, -0.4), &j, &ring, TOLERANCE);
        assert_eq!(on_mantle.polarization, Vector3::zeros());
        for i in 0..3 {
            assert_approx_eq!(on_mantle.b[i], outside.b[i], 1e-4);
        }
    }

    #[test]
    fn test_ring_offset_along_axis() {
        let j = Vector3::new(100.0, -30.0, 400.0);
        let pos = Vector3::new(0.7, 0.4, 2.1);
        let shifted = cylinder_field(&pos, &j, &thick_ring(1.5), TOLERANCE);
        let centred = cylinder_field(&(pos - Vector3::new(0.0, 0.0, 1.5)), &j, &thick_ring(0.0), TOLERANCE);
        assert_eq!(shifted, centred);
        assert_eq!(
            cylinder_field(&Vector3::new(0.5, 0.0, 2.5), &j, &thick_ring(1.5), TOLERANCE),
            FieldSample::default()
        );
    }
}
