//! End-to-end client tests against local servers.

use std::time::{Duration, Instant};

use keto_client::config::{Mode, RemoteFlags};
use keto_client::{Client, ErrorKind, NodeType, SubjectRef, Transport};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{closed_address, env, rest_env, rest_flags, SilentServer};

#[tokio::test]
async fn test_rest_check_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/check"))
        .and(query_param("subject_id", "alice"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"allowed": true})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::from_flags(&rest_flags(&server, 5), &env(&[]), Mode::ReadOnly)
        .await
        .unwrap();
    assert_eq!(client.transport_type(), Transport::Rest);
    assert!(client.check("alice", "view", "documents", "doc1", 0).await.unwrap());
    client.close();
}

#[tokio::test]
async fn test_rest_selected_by_environment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/check"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(serde_json::json!({"allowed": false})),
        )
        .mount(&server)
        .await;

    // Flags say gRPC on the default port; the environment wins
    let client = Client::from_flags(&RemoteFlags::default(), &rest_env(&server), Mode::ReadOnly)
        .await
        .unwrap();
    assert!(!client.check("bob", "view", "documents", "doc1", 0).await.unwrap());
}

#[tokio::test]
async fn test_rest_expand_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/expand"))
        .and(query_param("max-depth", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "type": "union",
            "subject_set": {"namespace": "documents", "object": "doc1", "relation": "viewers"},
            "children": [
                {"type": "leaf", "subject_id": "alice"},
                {"type": "leaf", "subject_id": "bob"}
            ]
        })))
        .mount(&server)
        .await;

    let client = Client::from_flags(&rest_flags(&server, 5), &env(&[]), Mode::ReadOnly)
        .await
        .unwrap();
    let tree = client
        .expand("viewers", "documents", "doc1", 5)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(tree.node_type(), NodeType::Union);
    assert_eq!(tree.children().len(), 2);
    assert_eq!(tree.children()[0].subject(), &SubjectRef::id("alice"));
    assert_eq!(tree.children()[1].subject(), &SubjectRef::id("bob"));
}

#[tokio::test]
async fn test_rest_slow_server_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/check"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"allowed": true}))
                .set_delay(Duration::from_secs(10)),
        )
        .mount(&server)
        .await;

    let client = Client::from_flags(&rest_flags(&server, 1), &env(&[]), Mode::ReadOnly)
        .await
        .unwrap();

    let started = Instant::now();
    let err = client
        .check("alice", "view", "documents", "doc1", 0)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Request);
    assert!(err.is_timeout());
    assert!(started.elapsed() < Duration::from_secs(3));
}

#[cfg(feature = "grpc")]
#[tokio::test]
async fn test_grpc_unreachable_is_connection_error() {
    let flags = RemoteFlags::builder()
        .read_remote(closed_address().await)
        .timeout_secs(2)
        .build();

    let err = Client::from_flags(&flags, &env(&[]), Mode::ReadOnly)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Connection);
    assert!(err.message().starts_with("could not open client"));
}

#[cfg(feature = "grpc")]
#[tokio::test]
async fn test_grpc_silent_server_times_out() {
    let server = SilentServer::start().await;
    let flags = RemoteFlags::builder()
        .read_remote(server.address.clone())
        .timeout_secs(1)
        .build();

    let started = Instant::now();
    let result = match Client::from_flags(&flags, &env(&[]), Mode::ReadOnly).await {
        Ok(client) => client
            .check("alice", "view", "documents", "doc1", 0)
            .await
            .map(|_| ()),
        Err(e) => Err(e),
    };

    // Depending on when HTTP/2 gives up, either the dial or the call times out
    let err = result.unwrap_err();
    assert!(matches!(
        err.kind(),
        ErrorKind::Connection | ErrorKind::Request
    ));
    assert!(err.is_timeout());
    assert!(started.elapsed() < Duration::from_secs(4));
}
