//! Integration tests for queries given in keyword form
//!
//! Queries are parsed from YAML the same way a query file would be.
