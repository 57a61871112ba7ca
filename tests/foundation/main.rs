//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: Value, Path, Error, and persistent collections.

mod errors;
mod paths;
