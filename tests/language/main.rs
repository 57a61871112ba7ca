//! Integration tests for Layer 1: Language
//!
//! Tests for the scanner, token rules, parser, and term evaluation.

mod parser;
mod terms;
