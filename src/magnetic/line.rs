//! Straight current segments and polylines

use crate::constant::MU0_OVER_4PI;
use crate::maths::get_relative_coordinates_line_point;
use nalgebra::Vector3;

/// Biot-Savart field of a straight segment carrying `current` (A) from `start` to `end` (mm).
///
/// The field vanishes on the supporting line of the segment, which includes the segment itself.
/// A segment of zero length carries no field.
pub fn segment_field(
    observer: &Vector3<f64>,
    current: f64,
    start: &Vector3<f64>,
    end: &Vector3<f64>,
    tolerance: f64,
) -> Vector3<f64> {
    let delta = end - start;
    let length = delta.norm();
    if current == 0.0 || length == 0.0 {
        return Vector3::zeros();
    }
    let dir = delta / length;
    let (axial, distance_squared) = get_relative_coordinates_line_point(observer, start, &dir);
    if distance_squared <= (tolerance * length).powi(2) {
        return Vector3::zeros();
    }

    let to_start = (observer - start).norm();
    let to_end = (observer - end).norm();
    // Difference of the cosines of the angles under which the segment ends are seen.
    let cosines = axial / to_start - (axial - length) / to_end;
    let azimuth = dir.cross(&(observer - start));
    azimuth * (MU0_OVER_4PI * current * cosines / distance_squared)
}

/// Sum of the fields of the segments joining consecutive `vertices`.
pub fn polyline_field(
    observer: &Vector3<f64>,
    current: f64,
    vertices: &[Vector3<f64>],
    tolerance: f64,
) -> Vector3<f64> {
    vertices
        .windows(2)
        .map(|pair| segment_field(observer, current, &pair[0], &pair[1], tolerance))
        .sum()
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    const TOLERANCE: f64 = 1e-12;

    #[test]
    fn test_long_wire() {
        let field = segment_field(
            &Vector3::new(2.0, 0.0, 0.0),
            10.0,
            &Vector3::new(0.0, 0.0, -1e4),
            &Vector3::new(0.0, 0.0, 1e4),
            TOLERANCE,
        );
        // mu0 I / (2 pi rho)
        assert_approx_eq!(field.y, 0.2 * 10.0 / 2.0, 1e-6);
        assert_approx_eq!(field.x, 0.0, 1e-15);
        assert_approx_eq!(field.z, 0.0, 1e-15);
    }

    #[test]
    fn test_finite_segment_on_bisector() {
        let (half_length, distance, current) = (1.5, 2.0_f64, 4.0);
        let field = segment_field(
            &Vector3::new(0.0, -distance, 0.0),
            current,
            &Vector3::new(-half_length, 0.0, 0.0),
            &Vector3::new(half_length, 0.0, 0.0),
            TOLERANCE,
        );
        let expected = MU0_OVER_4PI * current / distance * 2.0 * half_length
            / (half_length.powi(2) + distance.powi(2)).sqrt();
        assert_approx_eq!(field.z, -expected, 1e-12);
    }

    #[test]
    fn test_square_loop_centre() {
        let side = 2.0;
        let current = 3.0;
        let vertices = vec![
            Vector3::new(-1.0, -1.0, 0.0),
            Vector3::new(1.0, -1.0, 0.0),
            Vector3::new(1.0, 1.0, 0.0),
            Vector3::new(-1.0, 1.0, 0.0),
            Vector3::new(-1.0, -1.0, 0.0),
        ];
        let field = polyline_field(&Vector3::zeros(), current, &vertices, TOLERANCE);
        // 2 sqrt(2) mu0 I / (pi a)
        let expected = 2.0 * 2.0_f64.sqrt() * 4.0 * MU0_OVER_4PI * current / side;
        assert_approx_eq!(field.z, expected, 1e-12);
    }

    #[test]
    fn test_zero_on_supporting_line() {
        let start = Vector3::new(0.0, 0.0, 0.0);
        let end = Vector3::new(1.0, 1.0, 1.0);
        for t in [-1.0, 0.0, 0.5, 1.0, 3.0].iter() {
            let field = segment_field(&(end * *t), 1.0, &start, &end, TOLERANCE);
            assert_eq!(field, Vector3::zeros());
        }
    }

    #[test]
    fn test_degenerate_segments() {
        let pos = Vector3::new(1.0, 2.0, 3.0);
        let point = Vector3::new(0.5, 0.5, 0.5);
        assert_eq!(segment_field(&pos, 1.0, &point, &point, TOLERANCE), Vector3::zeros());
        assert_eq!(
            segment_field(&pos, 0.0, &Vector3::zeros(), &point, TOLERANCE),
            Vector3::zeros()
        );
    }
}
