//! Analytic magnetic fields of permanent magnets and current distributions.
//!
//! A query names a source family, its parameters and a batch of observers. Inputs are
//! broadcast to a common batch length, observers are moved into the source frames, the field
//! kernels run in parallel and the results are rotated back into the global frame.
//!
//! Units: lengths in mm, B and polarizations in mT, H in kA/m, currents in A.

pub mod config;
pub mod constant;
pub mod error;
pub mod field;
pub mod fileinput;
pub mod frame;
pub mod input;
pub mod integration_tests;
pub mod magnetic;
pub mod maths;
pub mod output;
pub mod query;
pub mod source;
