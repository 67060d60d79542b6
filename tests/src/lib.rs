//! # Relay Test Suite
//!
//! Unified test crate for cross-crate scenarios.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── exchange.rs     # End-to-end request/response properties
//!     └── concurrency.rs  # Many-client correlation and registry churn
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p relay-tests
//!
//! # By category
//! cargo test -p relay-tests integration::exchange::
//! cargo test -p relay-tests integration::concurrency::
//! ```

#![allow(unused_imports)]
#![allow(dead_code)]

pub mod integration;
