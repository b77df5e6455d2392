//! Flag and environment resolution as seen from the public API.

use std::time::Duration;

use keto_client::config::{
    resolve, Mode, RemoteFlags, ENV_CLIENT_TIMEOUT, ENV_CLIENT_TYPE, ENV_READ_REMOTE,
    ENV_WRITE_REMOTE,
};
use keto_client::{Client, ClientType, ErrorKind};

use crate::common::env;

#[test]
fn test_defaults() {
    let config = resolve(&RemoteFlags::default(), &env(&[]), Mode::ReadOnly).unwrap();
    assert_eq!(config.client_type(), ClientType::Grpc);
    assert_eq!(config.address().to_string(), "127.0.0.1:4466");
    assert_eq!(config.timeout(), Duration::from_secs(30));

    let config = resolve(&RemoteFlags::default(), &env(&[]), Mode::ReadWrite).unwrap();
    assert_eq!(config.address().to_string(), "127.0.0.1:4467");
}

#[test]
fn test_environment_overrides_every_flag() {
    let flags = RemoteFlags::builder()
        .read_remote("flag-host:1")
        .write_remote("flag-host:2")
        .client_type("grpc")
        .timeout_secs(10)
        .build();
    let env = env(&[
        (ENV_READ_REMOTE, "[::1]:4466"),
        (ENV_WRITE_REMOTE, "keto.internal:4467"),
        (ENV_CLIENT_TYPE, "rest"),
        (ENV_CLIENT_TIMEOUT, "3"),
    ]);

    let read = resolve(&flags, &env, Mode::ReadOnly).unwrap();
    assert_eq!(read.address().host(), "::1");
    assert_eq!(read.address().port(), "4466");
    assert_eq!(read.client_type(), ClientType::Rest);
    assert_eq!(read.timeout(), Duration::from_secs(3));

    let write = resolve(&flags, &env, Mode::ReadWrite).unwrap();
    assert_eq!(write.address().host(), "keto.internal");
}

#[test]
fn test_invalid_settings_are_configuration_errors() {
    let cases: &[(&str, &str)] = &[
        (ENV_READ_REMOTE, ""),
        (ENV_READ_REMOTE, "localhost"),
        (ENV_READ_REMOTE, ":4466"),
        (ENV_READ_REMOTE, "localhost:"),
        (ENV_CLIENT_TIMEOUT, "thirty"),
        (ENV_CLIENT_TIMEOUT, "0"),
        (ENV_CLIENT_TYPE, "soap"),
    ];

    for &(name, value) in cases {
        let err = resolve(&RemoteFlags::default(), &env(&[(name, value)]), Mode::ReadOnly)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration, "{name}={value:?}");
    }
}

#[test]
fn test_unknown_client_type_is_named() {
    let err = resolve(
        &RemoteFlags::default(),
        &env(&[(ENV_CLIENT_TYPE, "soap")]),
        Mode::ReadOnly,
    )
    .unwrap_err();
    assert!(err.to_string().contains("soap"));
}

#[tokio::test]
async fn test_empty_address_never_reaches_the_factory() {
    // A gRPC connect would fail with a connection error instead
    let err = Client::from_flags(
        &RemoteFlags::default(),
        &env(&[(ENV_READ_REMOTE, "")]),
        Mode::ReadOnly,
    )
    .await
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
}
