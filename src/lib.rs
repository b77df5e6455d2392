//! # Keto Client
//!
//! Client for the check and expand APIs of an Ory Keto authorization
//! server, over gRPC or REST.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use keto_client::config::{Mode, ProcessEnvironment, RemoteFlags};
//! use keto_client::Client;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), keto_client::Error> {
//!     // Flags with their defaults; KETO_* variables override them
//!     let flags = RemoteFlags::builder().client_type("rest").build();
//!     let client = Client::from_flags(&flags, &ProcessEnvironment, Mode::ReadOnly).await?;
//!
//!     let allowed = client.check("alice", "view", "documents", "doc1", 0).await?;
//!     println!("{}", if allowed { "Allowed" } else { "Denied" });
//!
//!     if let Some(tree) = client.expand("viewers", "documents", "doc1", 0).await? {
//!         println!("{} leaves", tree.leaf_subject_ids().len());
//!     }
//!
//!     client.close();
//!     Ok(())
//! }
//! ```
//!
//! ## Key Concepts
//!
//! - **Argument Order**: `check(subject, relation, namespace, object, max_depth)`
//! - **Denial ≠ Error**: `check()` returns `Ok(false)` for a denial, not `Err`
//! - **Empty ≠ Error**: `expand()` returns `Ok(None)` when the server has no tree
//! - **Error Stages**: configuration, connection, request and conversion
//!   failures are distinct [`ErrorKind`]s
//!
//! ## Features
//!
//! - `grpc` (default): Enable gRPC transport via tonic
//! - `rest` (default): Enable REST transport via reqwest
//! - `rustls` (default): Use rustls for TLS
//! - `native-tls`: Use native TLS (OpenSSL on Linux, Secure Transport on macOS)
//! - `cli` (default): Build the `keto` command-line binary

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

// Core modules
pub mod client;
pub mod config;
pub mod error;
pub mod expand;
pub mod types;

// Transport layer
pub mod transport;

#[cfg(any(feature = "grpc", feature = "rest"))]
mod user_agent;

// Re-export main types at crate root for convenience
pub use client::Client;
pub use config::{ClientType, ConnectionConfig, Mode, RemoteFlags};
pub use error::{Error, ErrorKind, Result};
pub use transport::{AuthClient, Transport};
pub use types::{ExpandTree, NodeType, SubjectRef, SubjectSet};
