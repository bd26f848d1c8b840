//! Mathematical utilities

use crate::constant::PI;
extern crate nalgebra;
use nalgebra::Vector3;

/// Iteration stops once successive AGM terms agree to this relative precision.
/// The result is accurate to roughly the square of this value.
const CEL_TOLERANCE: f64 = 1.0e-8;

const CEL_MAX_ITERATIONS: usize = 64;

/// Generalized complete elliptic integral after Bulirsch,
///
/// `cel(kc, p, c, s) = ∫_0^{π/2} (c cos²φ + s sin²φ) / ((cos²φ + p sin²φ) sqrt(cos²φ + kc² sin²φ)) dφ`.
///
/// The complete integrals of all three kinds are special cases, e.g. `K = cel(kc, 1, 1, 1)`
/// and `E = cel(kc, 1, 1, kc²)` with `kc = sqrt(1 - k²)`. For `p <= 0` the Cauchy principal
/// value is returned.
///
/// # Arguments
///
/// `kc`: complementary modulus, must be non-zero.
///
/// `p`: characteristic parameter.
///
/// `c`, `s`: weights of the cos² and sin² terms of the numerator.
///
/// See R. Bulirsch, "Numerical calculation of elliptic integrals and elliptic functions III",
/// Numer. Math. 13, 305-315 (1969).
pub fn cel(kc: f64, p: f64, c: f64, s: f64) -> f64 {
    let mut qc = kc.abs();
    let mut a = c;
    let mut b = s;
    let mut p = p;
    let mut e = qc;
    let mut em = 1.0;

    if p > 0.0 {
        p = p.sqrt();
        b /= p;
    } else {
        let mut f = qc * qc;
        let mut q = 1.0 - f;
        let g = 1.0 - p;
        f -= p;
        q *= b - a * p;
        p = (f / g).sqrt();
        a = (a - b) / g;
        b = -q / (g * g * p) + a * p;
    }

    for _ in 0..CEL_MAX_ITERATIONS {
        let f = a;
        a += b / p;
        let g = e / p;
        b += f * g;
        b += b;
        p += g;
        let g = em;
        em += qc;
        if (g - qc).abs() <= g * CEL_TOLERANCE {
            break;
        }
        qc = 2.0 * e.sqrt();
        e = qc * em;
    }
    PI / 2.0 * (b + a * em) / (em * (em + p))
}

/// Integrates `f(θ)` over `θ ∈ [0, π/2]` with the trapezoidal rule.
///
/// Intended for integrands that depend on `sin²θ` only. These are even and π-periodic,
/// for which the trapezoidal rule converges exponentially with the number of `intervals`.
pub fn quarter_period_trapezoid<F>(f: F, intervals: usize) -> f64
where
    F: Fn(f64) -> f64,
{
    let h = PI / 2.0 / intervals as f64;
    let interior: f64 = (1..intervals).map(|i| f(i as f64 * h)).sum();
    h * (interior + 0.5 * (f(0.0) + f(PI / 2.0)))
}

/// Get the minimum distance between a point and the line through a segment.
///
/// Returns `(axial, distance_squared)`: `axial` is the component of `pos - line_point` along the
/// _normalized_ direction `dir`, `distance_squared` the squared distance to the line.
///
/// # Arguments
///
/// `pos`: position of the point
///
/// `line_point`: a point on the line
///
/// `dir`: _normalized_ vector pointing along the line.
pub fn get_relative_coordinates_line_point(
    pos: &Vector3<f64>,
    line_point: &Vector3<f64>,
    dir: &Vector3<f64>,
) -> (f64, f64) {
    let rela_cood = pos - line_point;
    let axial = rela_cood.dot(dir);
    let distance_squared = dir.cross(&rela_cood).norm_squared();
    (axial, distance_squared)
}
