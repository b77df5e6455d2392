//! gRPC transport implementation using tonic.
//!
//! Speaks the `ory.keto.relation_tuples.v1alpha2` check and expand services
//! over a single plaintext HTTP/2 connection. The connection is opened
//! eagerly in [`GrpcTransport::connect`] and torn down by
//! [`AuthClient::close`].

use std::time::Duration;

use tonic::transport::{Channel, Endpoint};
use tonic::Code;

use super::proto;
use super::proto::check_service_client::CheckServiceClient;
use super::proto::expand_service_client::ExpandServiceClient;
use crate::config::RemoteAddress;
use crate::expand::{normalize, tree_too_deep, WireTree};
use crate::transport::traits::{AuthClient, CheckRequest, ExpandRequest, Transport};
use crate::types::{ExpandTree, NodeType, SubjectRef, SubjectSet};
use crate::user_agent;
use crate::Error;

/// gRPC transport client using tonic.
#[derive(Debug)]
pub struct GrpcTransport {
    address: RemoteAddress,
    channel: Option<Channel>,
}

impl GrpcTransport {
    /// Opens a connection to `address`.
    ///
    /// Blocks until the connection is established. Fails with a
    /// timeout-flavored [`ErrorKind::Connection`](crate::ErrorKind::Connection)
    /// error if that takes longer than `timeout`.
    pub async fn connect(address: &RemoteAddress, timeout: Duration) -> Result<Self, Error> {
        let endpoint = Endpoint::from_shared(format!("http://{address}"))
            .map_err(|e| {
                Error::configuration(format!("invalid gRPC endpoint {address}: {e}"))
                    .with_source(e)
            })?
            .connect_timeout(timeout)
            .user_agent(user_agent::user_agent())
            .map_err(|e| {
                Error::configuration(format!("invalid user agent: {e}")).with_source(e)
            })?;

        tracing::debug!(%address, ?timeout, "opening gRPC connection");

        let channel = match tokio::time::timeout(timeout, endpoint.connect()).await {
            Ok(Ok(channel)) => channel,
            Ok(Err(e)) => {
                tracing::warn!(%address, error = %e, "could not open gRPC connection");
                return Err(Error::connection(format!(
                    "could not open grpc connection to {address}: {e}"
                ))
                .with_operation("connect")
                .with_source(e));
            }
            Err(_) => {
                tracing::warn!(%address, ?timeout, "gRPC connection timed out");
                return Err(Error::connection_timeout(format!(
                    "could not open grpc connection to {address}: \
                     timed out after {timeout:?}"
                ))
                .with_operation("connect"));
            }
        };

        Ok(Self {
            address: address.clone(),
            channel: Some(channel),
        })
    }

    /// Returns the address this transport is connected to.
    pub fn address(&self) -> &RemoteAddress {
        &self.address
    }

    /// Returns `true` until the transport is closed.
    pub fn is_open(&self) -> bool {
        self.channel.is_some()
    }

    fn channel(&self, operation: &'static str) -> Result<Channel, Error> {
        self.channel.clone().ok_or_else(|| {
            Error::connection("grpc connection is closed").with_operation(operation)
        })
    }
}

#[async_trait::async_trait]
impl AuthClient for GrpcTransport {
    async fn check(&self, request: &CheckRequest) -> Result<bool, Error> {
        let mut client = CheckServiceClient::new(self.channel("check")?);

        tracing::debug!(
            address = %self.address,
            namespace = %request.namespace,
            object = %request.object,
            relation = %request.relation,
            subject = %request.subject,
            max_depth = request.max_depth,
            "sending gRPC check"
        );

        let response = client
            .check(tonic::Request::new(check_request_to_proto(request)))
            .await
            .map_err(|status| map_status(status, "check request failed").with_operation("check"))?;

        Ok(response.into_inner().allowed)
    }

    async fn expand(&self, request: &ExpandRequest) -> Result<Option<ExpandTree>, Error> {
        let mut client = ExpandServiceClient::new(self.channel("expand")?);

        tracing::debug!(
            address = %self.address,
            namespace = %request.namespace,
            object = %request.object,
            relation = %request.relation,
            max_depth = request.max_depth,
            "sending gRPC expand"
        );

        let response = client
            .expand(tonic::Request::new(proto::ExpandRequest {
                subject: Some(proto::Subject {
                    r#ref: Some(proto::subject::Ref::Set(proto::SubjectSet {
                        namespace: request.namespace.clone(),
                        object: request.object.clone(),
                        relation: request.relation.clone(),
                    })),
                }),
                max_depth: request.max_depth,
                snaptoken: String::new(),
            }))
            .await
            .map_err(|status| {
                if is_nesting_limit(&status) {
                    tree_too_deep().with_operation("expand").with_source(status)
                } else {
                    map_status(status, "could not request expand tree").with_operation("expand")
                }
            })?;

        response.into_inner().tree.as_ref().map(normalize).transpose()
    }

    fn close(&mut self) {
        if self.channel.take().is_some() {
            tracing::debug!(address = %self.address, "closed gRPC connection");
        }
    }

    fn transport_type(&self) -> Transport {
        Transport::Grpc
    }
}

// ============================================================================
// Wire Conversion
// ============================================================================

#[allow(deprecated)]
fn check_request_to_proto(request: &CheckRequest) -> proto::CheckRequest {
    let subject = proto::Subject {
        r#ref: Some(proto::subject::Ref::Id(request.subject.clone())),
    };

    // Older servers only read the flat fields, newer ones prefer the tuple
    proto::CheckRequest {
        namespace: request.namespace.clone(),
        object: request.object.clone(),
        relation: request.relation.clone(),
        subject: Some(subject.clone()),
        tuple: Some(proto::RelationTuple {
            namespace: request.namespace.clone(),
            object: request.object.clone(),
            relation: request.relation.clone(),
            subject: Some(subject),
        }),
        latest: false,
        snaptoken: String::new(),
        max_depth: request.max_depth,
    }
}

impl WireTree for proto::SubjectTree {
    fn node_type(&self) -> Result<NodeType, Error> {
        let node_type = proto::NodeType::try_from(self.node_type).map_err(|_| {
            Error::conversion(format!("unknown node type {}", self.node_type))
        })?;

        Ok(match node_type {
            proto::NodeType::Unspecified => NodeType::Unspecified,
            proto::NodeType::Union => NodeType::Union,
            proto::NodeType::Exclusion => NodeType::Exclusion,
            proto::NodeType::Intersection => NodeType::Intersection,
            proto::NodeType::Leaf => NodeType::Leaf,
            proto::NodeType::TupleToSubjectSet => NodeType::TupleToSubjectSet,
            proto::NodeType::ComputedSubjectSet => NodeType::ComputedSubjectSet,
            proto::NodeType::Not => NodeType::Not,
        })
    }

    #[allow(deprecated)]
    fn subject(&self) -> Result<SubjectRef, Error> {
        let subject = self
            .tuple
            .as_ref()
            .and_then(|tuple| tuple.subject.as_ref())
            .or(self.subject.as_ref())
            .and_then(|subject| subject.r#ref.as_ref());

        match subject {
            Some(proto::subject::Ref::Set(set)) => Ok(SubjectRef::Set(SubjectSet::new(
                set.namespace.clone(),
                set.object.clone(),
                set.relation.clone(),
            ))),
            Some(proto::subject::Ref::Id(id)) => Ok(SubjectRef::Id(id.clone())),
            None => Err(Error::conversion("node carries no subject")),
        }
    }

    fn children(&self) -> &[Self] {
        &self.children
    }
}

// ============================================================================
// Error Mapping
// ============================================================================

/// prost refuses messages nested deeper than 100 levels and tonic reports
/// that as an `Internal` status.
fn is_nesting_limit(status: &tonic::Status) -> bool {
    status.code() == Code::Internal && status.message().contains("recursion limit reached")
}

/// Maps a gRPC status to a request error carrying the server's diagnostic.
fn map_status(status: tonic::Status, context: &str) -> Error {
    let code = status.code();
    let error = Error::request(format!(
        "{context}: {} ({code:?})",
        status.message()
    ));
    tracing::warn!(?code, message = status.message(), "{context}");

    let error = if code == Code::DeadlineExceeded {
        error.with_timeout()
    } else {
        error
    };
    error.with_source(status)
}
