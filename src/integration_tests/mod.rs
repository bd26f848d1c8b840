//! Integration tests running complete queries through normalisation, kernels and assembly.

pub mod consistency;
pub mod keyword_queries;
pub mod placement;
