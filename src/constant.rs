//! Physical constants and unit conversions.
//!
//! Lengths are in millimetres, flux densities and polarizations in millitesla,
//! field strengths in kiloampere per metre and currents in ampere.

/// Mathematical constant pi
pub const PI: f64 = std::f64::consts::PI;

/// Vacuum permeability divided by 4 pi, in units of mT mm / A.
pub const MU0_OVER_4PI: f64 = 0.1;

/// Converts a flux density in mT into a field strength in kA/m, `1 / mu0`.
pub const MT_TO_KA_PER_M: f64 = 10.0 / (4.0 * PI);
