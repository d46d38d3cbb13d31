//! Criterion harness crate. See the `benches/` directory.
