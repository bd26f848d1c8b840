//! Integration tests comparing different source families that describe the same physics.
