//! # Integration Tests
//!
//! Cross-crate scenarios wiring registry, dispatch service, and client
//! drivers together the way the runtime binary does.

pub mod concurrency;
