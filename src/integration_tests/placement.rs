//! Integration tests for sources placed with a position and orientation
