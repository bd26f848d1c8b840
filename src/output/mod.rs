//! Writes evaluated fields, together with their observers, to files or streams.

pub mod file;
