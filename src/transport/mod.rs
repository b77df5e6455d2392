//! Transport layer for Keto communication.
//!
//! This module provides the transport implementations behind
//! [`AuthClient`]:
//!
//! - gRPC transport (via tonic) - default, one eagerly opened connection
//! - REST transport (via reqwest) - lazily connected, close is a no-op
//! - Mock transport - for testing without network
//!
//! Most users go through [`Client`](crate::Client), which picks the
//! transport from a [`ConnectionConfig`](crate::config::ConnectionConfig).
//!
//! ## Feature Flags
//!
//! - `grpc` (default): Enable gRPC transport
//! - `rest` (default): Enable REST transport

mod traits;

#[cfg(feature = "grpc")]
mod grpc;

#[cfg(feature = "grpc")]
mod proto;

#[cfg(feature = "rest")]
mod rest;

mod mock;

pub use traits::{AuthClient, CheckRequest, ExpandRequest, Transport};

pub use mock::{MockTransport, MockTree};

#[cfg(feature = "grpc")]
pub use grpc::GrpcTransport;

#[cfg(feature = "rest")]
pub use rest::RestTransport;
