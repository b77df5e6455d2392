//! Mock transport implementation for testing.
//!
//! This module provides a mock transport that operates entirely in-memory,
//! allowing tests to run without network dependencies.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use super::traits::{AuthClient, CheckRequest, ExpandRequest, Transport};
use crate::expand::{normalize, WireTree};
use crate::types::{ExpandTree, NodeType, SubjectRef};
use crate::Error;

/// Mock transport for testing.
///
/// Responses are scripted up front. Clones share state, so a test can keep
/// one handle for inspection after handing another to a [`Client`](crate::Client).
///
/// ## Example
///
/// ```rust
/// use keto_client::transport::MockTransport;
///
/// let mock = MockTransport::new();
/// mock.set_allowed(true);
/// assert_eq!(mock.request_count(), 0);
/// ```
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<MockState>,
}

#[derive(Default)]
struct MockState {
    allowed: AtomicBool,
    tree: RwLock<Option<MockTree>>,
    failure: RwLock<Option<Error>>,
    never_respond: AtomicBool,
    last_check: RwLock<Option<CheckRequest>>,
    last_expand: RwLock<Option<ExpandRequest>>,
    request_count: AtomicU64,
    close_count: AtomicU64,
}

impl std::fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockTransport")
            .field("request_count", &self.request_count())
            .field("close_count", &self.close_count())
            .finish_non_exhaustive()
    }
}

impl MockTransport {
    /// Creates a mock that denies every check and expands to nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the result of every subsequent check.
    pub fn set_allowed(&self, allowed: bool) {
        self.state.allowed.store(allowed, Ordering::Relaxed);
    }

    /// Sets the wire tree returned by every subsequent expand.
    ///
    /// The tree is normalized on each call, as a real transport would.
    pub fn set_tree(&self, tree: MockTree) {
        *self.state.tree.write() = Some(tree);
    }

    /// Makes subsequent expands return the empty result.
    pub fn clear_tree(&self) {
        *self.state.tree.write() = None;
    }

    /// Sets a failure to simulate on the next request.
    pub fn set_failure(&self, error: Error) {
        *self.state.failure.write() = Some(error);
    }

    /// Clears any simulated failure.
    pub fn clear_failure(&self) {
        *self.state.failure.write() = None;
    }

    /// Makes every subsequent request wait forever.
    pub fn set_never_respond(&self, never_respond: bool) {
        self.state.never_respond.store(never_respond, Ordering::Relaxed);
    }

    /// Returns the number of requests made.
    pub fn request_count(&self) -> u64 {
        self.state.request_count.load(Ordering::Relaxed)
    }

    /// Returns the number of times the transport was closed.
    pub fn close_count(&self) -> u64 {
        self.state.close_count.load(Ordering::Relaxed)
    }

    /// Returns the most recent check request.
    pub fn last_check(&self) -> Option<CheckRequest> {
        self.state.last_check.read().clone()
    }

    /// Returns the most recent expand request.
    pub fn last_expand(&self) -> Option<ExpandRequest> {
        self.state.last_expand.read().clone()
    }

    /// Counts the request, then fails or stalls as scripted.
    async fn begin_request(&self) -> Result<(), Error> {
        self.state.request_count.fetch_add(1, Ordering::Relaxed);

        let failure = self.state.failure.write().take();
        if let Some(error) = failure {
            return Err(error);
        }

        if self.state.never_respond.load(Ordering::Relaxed) {
            std::future::pending::<()>().await;
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl AuthClient for MockTransport {
    async fn check(&self, request: &CheckRequest) -> Result<bool, Error> {
        *self.state.last_check.write() = Some(request.clone());
        self.begin_request().await?;
        Ok(self.state.allowed.load(Ordering::Relaxed))
    }

    async fn expand(&self, request: &ExpandRequest) -> Result<Option<ExpandTree>, Error> {
        *self.state.last_expand.write() = Some(request.clone());
        self.begin_request().await?;

        let tree = self.state.tree.read().clone();
        tree.as_ref().map(normalize).transpose()
    }

    fn close(&mut self) {
        self.state.close_count.fetch_add(1, Ordering::Relaxed);
    }

    fn transport_type(&self) -> Transport {
        Transport::Mock
    }
}

// ============================================================================
// Mock Wire Tree
// ============================================================================

/// Wire tree scripted into a [`MockTransport`].
///
/// Unlike [`ExpandTree`] it can express malformed input: leaves that claim
/// children and nodes without a subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockTree {
    node_type: NodeType,
    subject: Option<SubjectRef>,
    children: Vec<MockTree>,
}

impl MockTree {
    /// Creates a node with the given children, even for a leaf.
    pub fn node(node_type: NodeType, subject: SubjectRef, children: Vec<MockTree>) -> Self {
        Self {
            node_type,
            subject: Some(subject),
            children,
        }
    }

    /// Creates a childless leaf.
    pub fn leaf(subject: SubjectRef) -> Self {
        Self::node(NodeType::Leaf, subject, Vec::new())
    }

    /// Creates a node that carries no subject.
    pub fn without_subject(node_type: NodeType, children: Vec<MockTree>) -> Self {
        Self {
            node_type,
            subject: None,
            children,
        }
    }
}

impl WireTree for MockTree {
    fn node_type(&self) -> Result<NodeType, Error> {
        Ok(self.node_type)
    }

    fn subject(&self) -> Result<SubjectRef, Error> {
        self.subject
            .clone()
            .ok_or_else(|| Error::conversion("node carries no subject"))
    }

    fn children(&self) -> &[Self] {
        &self.children
    }
}
