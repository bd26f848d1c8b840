//! Uniformly magnetized cuboids
//!
//! The magnetization is replaced by surface charges `σ = J·n` on the six faces. Each face is a
//! uniformly charged rectangle whose field has a closed form: the normal component is the solid
//! angle under which the rectangle is seen, the tangential components are logarithms.

use super::FieldSample;
use crate::constant::PI;
use nalgebra::Vector3;

/// Field of a cuboid centred on the origin with edges `dimension` along the local axes.
///
/// Faces count as outside. On edges and corners the field is singular and set to zero.
pub fn cuboid_field(
    observer: &Vector3<f64>,
    polarization: &Vector3<f64>,
    dimension: &Vector3<f64>,
    tolerance: f64,
) -> FieldSample {
    let half = dimension.abs() / 2.0;
    if half.iter().any(|a| *a == 0.0) || polarization.iter().all(|j| *j == 0.0) {
        return FieldSample::default();
    }

    let snap = tolerance * half.max();
    let boundaries = (0..3)
        .filter(|&i| (observer[i].abs() - half[i]).abs() <= snap)
        .count();
    let within = (0..3).all(|i| observer[i].abs() <= half[i] + snap);
    if boundaries >= 2 && within {
        return FieldSample::default();
    }

    let mut h: Vector3<f64> = Vector3::zeros();
    for normal in 0..3 {
        if polarization[normal] == 0.0 {
            continue;
        }
        let (j, k) = ((normal + 1) % 3, (normal + 2) % 3);
        let u = [-half[j] - observer[j], half[j] - observer[j]];
        let v = [-half[k] - observer[k], half[k] - observer[k]];
        for &side in [1.0, -1.0].iter() {
            let charge = side * polarization[normal];
            let distance = observer[normal] - side * half[normal];
            let (h_normal, h_u, h_v) = charged_rectangle(distance, side, u, v);
            h[normal] += charge * h_normal;
            h[j] += charge * h_u;
            h[k] += charge * h_v;
        }
    }
    h /= 4.0 * PI;

    let inside = (0..3).all(|i| observer[i].abs() < half[i]);
    if inside {
        FieldSample::inside(h + polarization, *polarization)
    } else {
        FieldSample::outside(h)
    }
}

/// Field of a rectangle with unit charge density, without the factor 1/4π.
///
/// `distance` is the signed distance of the observer from the plane of the rectangle along its
/// normal. `u` and `v` are the limits of the rectangle along the two tangential axes, relative
/// to the observer. Observers in the plane see the limit taken on the `outward` side.
/// Returns the normal and the two tangential components.
fn charged_rectangle(distance: f64, outward: f64, u: [f64; 2], v: [f64; 2]) -> (f64, f64, f64) {
    let sign = if distance > 0.0 {
        1.0
    } else if distance < 0.0 {
        -1.0
    } else {
        outward
    };
    let d2 = distance * distance;
    let d = distance.abs();

    let mut solid_angle = 0.0;
    for (iu, u_corner) in u.iter().enumerate() {
        for (iv, v_corner) in v.iter().enumerate() {
            let r = (d2 + u_corner * u_corner + v_corner * v_corner).sqrt();
            let corner = if iu == iv { 1.0 } else { -1.0 };
            solid_angle += corner * (u_corner * v_corner).atan2(d * r);
        }
    }

    let along_u = log_difference(d2 + u[1] * u[1], v) - log_difference(d2 + u[0] * u[0], v);
    let along_v = log_difference(d2 + v[1] * v[1], u) - log_difference(d2 + v[0] * v[0], u);
    (sign * solid_angle, along_u, along_v)
}

/// `asinh(w[1]/s) - asinh(w[0]/s)` for `s = sqrt(s2)`, written as a logarithm that does not
/// cancel for negative `w`. Requires `w[0] <= w[1]`.
fn log_difference(s2: f64, w: [f64; 2]) -> f64 {
    let r0 = (s2 + w[0] * w[0]).sqrt();
    let r1 = (s2 + w[1] * w[1]).sqrt();
    if w[0] >= 0.0 {
        ((w[1] + r1) / (w[0] + r0)).ln()
    } else if w[1] <= 0.0 {
        ((r0 - w[0]) / (r1 - w[1])).ln()
    } else {
        ((w[1] + r1) * (r0 - w[0]) / s2).ln()
    }
}
