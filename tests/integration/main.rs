//! Integration tests for the Keto client.
//!
//! These tests drive the whole path from flags and environment through
//! resolution and client construction to a request. Servers are local:
//! wiremock for REST and plain TCP listeners for gRPC connection behavior.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test integration
//! ```

mod client_tests;
mod common;
mod resolve_tests;
