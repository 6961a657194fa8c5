//! Property-based tests for result merging.
