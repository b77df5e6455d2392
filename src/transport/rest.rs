//! REST transport implementation using reqwest.
//!
//! Talks to the Keto read API (`GET /check`, `GET /expand`). The HTTP client
//! is prepared in [`RestTransport::new`] without any network I/O; the first
//! request opens the connection.

use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;
use url::Url;

use crate::config::RemoteAddress;
use crate::expand::{normalize, tree_too_deep, WireTree};
use crate::transport::traits::{AuthClient, CheckRequest, ExpandRequest, Transport};
use crate::types::{ExpandTree, NodeType, SubjectRef, SubjectSet};
use crate::user_agent;
use crate::Error;

/// Query parameter carrying the maximum search depth.
const MAX_DEPTH_PARAM: &str = "max-depth";

// ============================================================================
// REST Transport
// ============================================================================

/// REST transport using reqwest.
#[derive(Clone)]
pub struct RestTransport {
    client: reqwest::Client,
    base_url: Url,
}

impl std::fmt::Debug for RestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestTransport")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl RestTransport {
    /// Prepares a client for the server at `address`.
    ///
    /// `timeout` bounds both connection setup and each whole request.
    pub fn new(address: &RemoteAddress, timeout: Duration) -> Result<Self, Error> {
        let base_url = Url::parse(&format!("http://{address}/")).map_err(|e| {
            Error::configuration(format!("invalid REST endpoint {address}: {e}")).with_source(e)
        })?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .user_agent(user_agent::user_agent())
            .build()
            .map_err(|e| {
                Error::connection(format!("could not create HTTP client: {e}")).with_source(e)
            })?;

        tracing::debug!(base_url = %base_url, ?timeout, "prepared REST client");

        Ok(Self { client, base_url })
    }

    /// Returns the base URL requests are sent to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds `{base_url}{path}?{params}`.
    fn url(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, Error> {
        let mut url = self.base_url.join(path).map_err(|e| {
            Error::configuration(format!("invalid URL path {path:?}: {e}")).with_source(e)
        })?;
        url.query_pairs_mut().extend_pairs(params);
        Ok(url)
    }

    /// Sends a GET and returns the response, whatever its status.
    async fn get(&self, url: Url) -> Result<reqwest::Response, Error> {
        tracing::debug!(url = %url, "sending REST request");
        self.client.get(url).send().await.map_err(map_reqwest_error)
    }
}

// ============================================================================
// API Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
struct CheckResponseDto {
    allowed: bool,
}

/// Expand tree as delivered by the REST API.
#[derive(Debug, Clone, Deserialize)]
struct ExpandTreeDto {
    #[serde(rename = "type")]
    node_type: String,
    #[serde(default)]
    subject_id: Option<String>,
    #[serde(default)]
    subject_set: Option<SubjectSetDto>,
    #[serde(default)]
    tuple: Option<RelationTupleDto>,
    #[serde(default)]
    children: Vec<ExpandTreeDto>,
}

#[derive(Debug, Clone, Deserialize)]
struct SubjectSetDto {
    namespace: String,
    object: String,
    relation: String,
}

#[derive(Debug, Clone, Deserialize)]
struct RelationTupleDto {
    #[serde(default)]
    subject_id: Option<String>,
    #[serde(default)]
    subject_set: Option<SubjectSetDto>,
}

impl From<&SubjectSetDto> for SubjectSet {
    fn from(dto: &SubjectSetDto) -> Self {
        SubjectSet::new(dto.namespace.clone(), dto.object.clone(), dto.relation.clone())
    }
}

impl WireTree for ExpandTreeDto {
    fn node_type(&self) -> Result<NodeType, Error> {
        self.node_type.parse()
    }

    fn subject(&self) -> Result<SubjectRef, Error> {
        let tuple = self.tuple.as_ref();
        let set = self
            .subject_set
            .as_ref()
            .or_else(|| tuple.and_then(|t| t.subject_set.as_ref()));
        let id = self
            .subject_id
            .as_ref()
            .or_else(|| tuple.and_then(|t| t.subject_id.as_ref()));

        match (set, id) {
            (Some(set), _) => Ok(SubjectRef::Set(set.into())),
            (None, Some(id)) => Ok(SubjectRef::Id(id.clone())),
            (None, None) => Err(Error::conversion("node carries no subject")),
        }
    }

    fn children(&self) -> &[Self] {
        &self.children
    }
}

// ============================================================================
// AuthClient Implementation
// ============================================================================

#[async_trait::async_trait]
impl AuthClient for RestTransport {
    async fn check(&self, request: &CheckRequest) -> Result<bool, Error> {
        let max_depth = request.max_depth.to_string();
        let url = self.url(
            "check",
            &[
                ("namespace", request.namespace.as_str()),
                ("object", request.object.as_str()),
                ("relation", request.relation.as_str()),
                ("subject_id", request.subject.as_str()),
                (MAX_DEPTH_PARAM, max_depth.as_str()),
            ],
        )?;

        let response = self
            .get(url)
            .await
            .map_err(|e| e.with_operation("check"))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| map_reqwest_error(e).with_operation("check"))?;

        // Keto answers a denied check with 403 and a regular body
        if status.is_success() || status == StatusCode::FORBIDDEN {
            if let Ok(dto) = serde_json::from_str::<CheckResponseDto>(&body) {
                return Ok(dto.allowed);
            }
            if status.is_success() {
                return Err(Error::request(format!(
                    "check request failed: malformed response body: {body}"
                ))
                .with_operation("check"));
            }
        }

        Err(map_status_error(status.as_u16(), &body, "check request failed").with_operation("check"))
    }

    async fn expand(&self, request: &ExpandRequest) -> Result<Option<ExpandTree>, Error> {
        let max_depth = request.max_depth.to_string();
        let url = self.url(
            "expand",
            &[
                ("namespace", request.namespace.as_str()),
                ("object", request.object.as_str()),
                ("relation", request.relation.as_str()),
                (MAX_DEPTH_PARAM, max_depth.as_str()),
            ],
        )?;

        let response = self
            .get(url)
            .await
            .map_err(|e| e.with_operation("expand"))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| map_reqwest_error(e).with_operation("expand"))?;

        if !status.is_success() {
            return Err(map_status_error(status.as_u16(), &body, "expand request failed")
                .with_operation("expand"));
        }

        let tree: Option<ExpandTreeDto> = serde_json::from_str(&body).map_err(|e| {
            let error = if is_nesting_limit(&e) {
                tree_too_deep()
            } else {
                Error::request(format!("expand request failed: malformed response body: {e}"))
            };
            error.with_operation("expand").with_source(e)
        })?;

        tree.as_ref().map(normalize).transpose()
    }

    fn close(&mut self) {
        // reqwest owns its pool and releases it on drop
    }

    fn transport_type(&self) -> Transport {
        Transport::Rest
    }
}

// ============================================================================
// Error Mapping
// ============================================================================

/// Maps reqwest errors to request errors.
fn map_reqwest_error(e: reqwest::Error) -> Error {
    tracing::warn!(error = %e, "REST request failed");
    if e.is_timeout() {
        Error::request_timeout(format!("request timed out: {e}")).with_source(e)
    } else if e.is_connect() {
        Error::request(format!("connection failed: {e}")).with_source(e)
    } else {
        Error::request(format!("HTTP error: {e}")).with_source(e)
    }
}

/// serde_json refuses documents nested deeper than 128 levels.
fn is_nesting_limit(e: &serde_json::Error) -> bool {
    e.is_syntax() && e.to_string().starts_with("recursion limit exceeded")
}

/// Maps a non-success HTTP status to a request error.
///
/// Keto wraps errors as `{"error": {"message": ...}}`; plain `message` and
/// `error` strings are accepted too.
fn map_status_error(status: u16, body: &str, context: &str) -> Error {
    let detail = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .pointer("/error/message")
                .or_else(|| value.get("message"))
                .or_else(|| value.get("error"))
                .and_then(|m| m.as_str())
                .map(str::to_owned)
        })
        .unwrap_or_else(|| body.trim().to_owned());

    tracing::warn!(status, detail = %detail, "{context}");

    if detail.is_empty() {
        Error::request(format!("{context}: HTTP {status}"))
    } else {
        Error::request(format!("{context}: HTTP {status}: {detail}"))
    }
}

// ============================================================================
// Tests
// ============================================================================


// Wiremock-based async tests
#[cfg(test)]
mod wiremock_tests {
    use super::*;
    use crate::expand::MAX_TREE_DEPTH;
    use crate::ErrorKind;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_test_transport(server: &MockServer, timeout: Duration) -> RestTransport {
        let address: RemoteAddress = server.address().to_string().parse().unwrap();
        RestTransport::new(&address, timeout).unwrap()
    }

    fn check_request() -> CheckRequest {
        CheckRequest::new("alice", "view", "documents", "doc1", 0)
    }

    fn expand_request() -> ExpandRequest {
        ExpandRequest::new("viewers", "documents", "doc1", 5)
    }

    #[tokio::test]
    async fn test_check_allowed() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/check"))
            .and(query_param("namespace", "documents"))
            .and(query_param("object", "doc1"))
            .and(query_param("relation", "view"))
            .and(query_param("subject_id", "alice"))
            .and(query_param("max-depth", "0"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"allowed": true})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let transport = create_test_transport(&server, Duration::from_secs(5));
        assert!(transport.check(&check_request()).await.unwrap());
    }

    #[tokio::test]
    async fn test_check_denied_with_forbidden() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/check"))
            .respond_with(
                ResponseTemplate::new(403).set_body_json(serde_json::json!({"allowed": false})),
            )
            .mount(&server)
            .await;

        let transport = create_test_transport(&server, Duration::from_secs(5));
        assert!(!transport.check(&check_request()).await.unwrap());
    }

    #[tokio::test]
    async fn test_check_forbidden_without_decision() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/check"))
            .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
                "error": {"code": 403, "message": "access denied by proxy"}
            })))
            .mount(&server)
            .await;

        let transport = create_test_transport(&server, Duration::from_secs(5));
        let err = transport.check(&check_request()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Request);
        assert!(err.message().contains("access denied by proxy"));
    }

    #[tokio::test]
    async fn test_check_server_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/check"))
            .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
                "error": {"code": 500, "message": "database unreachable"}
            })))
            .mount(&server)
            .await;

        let transport = create_test_transport(&server, Duration::from_secs(5));
        let err = transport.check(&check_request()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Request);
        assert_eq!(err.operation(), Some("check"));
        assert!(err.message().contains("database unreachable"));
        assert!(!err.is_timeout());
    }

    #[tokio::test]
    async fn test_check_malformed_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/check"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let transport = create_test_transport(&server, Duration::from_secs(5));
        let err = transport.check(&check_request()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Request);
    }

    #[tokio::test]
    async fn test_check_timeout() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/check"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"allowed": true}))
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let transport = create_test_transport(&server, Duration::from_millis(200));
        let err = transport.check(&check_request()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Request);
        assert!(err.is_timeout());
    }

    #[tokio::test]
    async fn test_expand_tree() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/expand"))
            .and(query_param("namespace", "documents"))
            .and(query_param("object", "doc1"))
            .and(query_param("relation", "viewers"))
            .and(query_param("max-depth", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "type": "union",
                "subject_set": {"namespace": "documents", "object": "doc1", "relation": "viewers"},
                "children": [
                    {"type": "leaf", "subject_id": "alice"},
                    {"type": "leaf", "subject_id": "bob", "children": [
                        {"type": "leaf", "subject_id": "carol"}
                    ]}
                ]
            })))
            .mount(&server)
            .await;

        let transport = create_test_transport(&server, Duration::from_secs(5));
        let tree = transport.expand(&expand_request()).await.unwrap().unwrap();

        assert_eq!(tree.node_type(), NodeType::Union);
        assert_eq!(
            tree.subject(),
            &SubjectRef::set("documents", "doc1", "viewers")
        );
        assert_eq!(tree.leaf_subject_ids(), vec!["alice", "bob"]);
        assert!(tree.children().iter().all(|c| c.children().is_empty()));
    }

    #[tokio::test]
    async fn test_expand_null_is_empty() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/expand"))
            .respond_with(ResponseTemplate::new(200).set_body_string("null"))
            .mount(&server)
            .await;

        let transport = create_test_transport(&server, Duration::from_secs(5));
        assert_eq!(transport.expand(&expand_request()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_expand_unknown_node_type() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/expand"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "type": "xor",
                "subject_id": "alice"
            })))
            .mount(&server)
            .await;

        let transport = create_test_transport(&server, Duration::from_secs(5));
        let err = transport.expand(&expand_request()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conversion);
    }

    /// A union chain `edges` levels deep ending in a leaf for alice.
    fn union_chain(edges: usize) -> String {
        let mut body = r#"{"type":"leaf","subject_id":"alice"}"#.to_string();
        for _ in 0..edges {
            body = format!(
                r#"{{"type":"union","subject_set":{{"namespace":"groups","object":"g","relation":"member"}},"children":[{body}]}}"#
            );
        }
        body
    }

    #[tokio::test]
    async fn test_expand_depth_ceiling() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/expand"))
            .and(query_param("object", "deepest"))
            .respond_with(ResponseTemplate::new(200).set_body_string(union_chain(MAX_TREE_DEPTH)))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/expand"))
            .and(query_param("object", "too-deep"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(union_chain(MAX_TREE_DEPTH + 1)),
            )
            .mount(&server)
            .await;

        let transport = create_test_transport(&server, Duration::from_secs(5));

        let request = ExpandRequest::new("member", "groups", "deepest", 0);
        let tree = transport.expand(&request).await.unwrap().unwrap();
        assert_eq!(tree.depth(), MAX_TREE_DEPTH);

        let request = ExpandRequest::new("member", "groups", "too-deep", 0);
        let err = transport.expand(&request).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conversion);
        assert_eq!(err.operation(), Some("expand"));
    }

    #[tokio::test]
    async fn test_expand_past_json_nesting_limit() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/expand"))
            .respond_with(ResponseTemplate::new(200).set_body_string(union_chain(100)))
            .mount(&server)
            .await;

        let transport = create_test_transport(&server, Duration::from_secs(5));
        let err = transport.expand(&expand_request()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conversion);
        assert_eq!(err.operation(), Some("expand"));
        assert!(err.message().contains("deeper than"));
    }

    #[tokio::test]
    async fn test_expand_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/expand"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "error": {"code": 404, "message": "Unknown namespace"}
            })))
            .mount(&server)
            .await;

        let transport = create_test_transport(&server, Duration::from_secs(5));
        let err = transport.expand(&expand_request()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Request);
        assert_eq!(err.operation(), Some("expand"));
        assert!(err.message().contains("Unknown namespace"));
    }

    #[tokio::test]
    async fn test_close_is_noop() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/check"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"allowed": true})),
            )
            .mount(&server)
            .await;

        let mut transport = create_test_transport(&server, Duration::from_secs(5));
        transport.close();
        transport.close();
        assert!(transport.check(&check_request()).await.unwrap());
    }
}
