//! Transport trait definitions and common types.
//!
//! This module defines the capability set every transport offers: check,
//! expand and close.

use crate::types::ExpandTree;
use crate::Error;

// ============================================================================
// Transport Enum
// ============================================================================

/// Concrete transport behind an [`AuthClient`].
///
/// ## Example
///
/// ```rust
/// use keto_client::Transport;
///
/// let transport = Transport::Grpc;
/// assert!(transport.is_grpc());
/// assert_eq!(transport.to_string(), "gRPC");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    /// gRPC over plaintext HTTP/2.
    Grpc,
    /// JSON over HTTP/1.1.
    Rest,
    /// In-memory mock for testing without network.
    Mock,
}

impl Transport {
    /// Returns `true` if this is the gRPC transport.
    pub fn is_grpc(&self) -> bool {
        matches!(self, Transport::Grpc)
    }

    /// Returns `true` if this is the REST transport.
    pub fn is_rest(&self) -> bool {
        matches!(self, Transport::Rest)
    }

    /// Returns `true` if this is the mock transport.
    pub fn is_mock(&self) -> bool {
        matches!(self, Transport::Mock)
    }
}

impl std::fmt::Display for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Transport::Grpc => write!(f, "gRPC"),
            Transport::Rest => write!(f, "REST"),
            Transport::Mock => write!(f, "Mock"),
        }
    }
}

// ============================================================================
// Requests
// ============================================================================

/// A point query: does `subject` hold `relation` on `namespace:object`?
///
/// `max_depth` is sent as given. Zero or negative values ask the server to
/// use its configured default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckRequest {
    /// The subject ID to check.
    pub subject: String,
    /// The relation to check.
    pub relation: String,
    /// Namespace of the object.
    pub namespace: String,
    /// The object.
    pub object: String,
    /// Maximum depth of the server-side search.
    pub max_depth: i32,
}

impl CheckRequest {
    /// Creates a check request.
    pub fn new(
        subject: impl Into<String>,
        relation: impl Into<String>,
        namespace: impl Into<String>,
        object: impl Into<String>,
        max_depth: i32,
    ) -> Self {
        Self {
            subject: subject.into(),
            relation: relation.into(),
            namespace: namespace.into(),
            object: object.into(),
            max_depth,
        }
    }
}

/// A tree expansion of the subject set `namespace:object#relation`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandRequest {
    /// The relation to expand.
    pub relation: String,
    /// Namespace of the object.
    pub namespace: String,
    /// The object.
    pub object: String,
    /// Maximum depth of the returned tree.
    pub max_depth: i32,
}

impl ExpandRequest {
    /// Creates an expand request.
    pub fn new(
        relation: impl Into<String>,
        namespace: impl Into<String>,
        object: impl Into<String>,
        max_depth: i32,
    ) -> Self {
        Self {
            relation: relation.into(),
            namespace: namespace.into(),
            object: object.into(),
            max_depth,
        }
    }
}

// ============================================================================
// AuthClient Trait
// ============================================================================

/// The capability set shared by every transport.
///
/// Each call performs exactly one round trip; implementations neither cache
/// nor retry. The caller enforces the overall timeout.
#[async_trait::async_trait]
pub trait AuthClient: Send + Sync {
    /// Returns whether the subject holds the relation on the object.
    async fn check(&self, request: &CheckRequest) -> Result<bool, Error>;

    /// Returns the normalized expand tree, or `None` if the subject set has
    /// no members.
    async fn expand(&self, request: &ExpandRequest) -> Result<Option<ExpandTree>, Error>;

    /// Releases the transport's resources.
    ///
    /// Called at most once by [`Client`](crate::Client), but implementations
    /// tolerate repeated calls.
    fn close(&mut self);

    /// Returns the transport type.
    fn transport_type(&self) -> Transport;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_predicates() {
        assert!(Transport::Grpc.is_grpc());
        assert!(Transport::Rest.is_rest());
        assert!(Transport::Mock.is_mock());
        assert!(!Transport::Rest.is_grpc());
    }

    #[test]
    fn test_transport_display() {
        assert_eq!(Transport::Grpc.to_string(), "gRPC");
        assert_eq!(Transport::Rest.to_string(), "REST");
        assert_eq!(Transport::Mock.to_string(), "Mock");
    }

    #[test]
    fn test_request_constructors() {
        let check = CheckRequest::new("alice", "view", "documents", "doc1", 0);
        assert_eq!(check.subject, "alice");
        assert_eq!(check.namespace, "documents");
        assert_eq!(check.max_depth, 0);

        let expand = ExpandRequest::new("viewers", "documents", "doc1", -1);
        assert_eq!(expand.relation, "viewers");
        assert_eq!(expand.max_depth, -1);
    }
}
