//! The Keto client facade.
//!
//! [`Client`] owns exactly one transport for the lifetime of a command:
//!
//! ```text
//! flags + env ──resolve──▶ ConnectionConfig ──connect──▶ Client
//!                                                          │
//!                                   check / expand ◀───────┤
//!                                                          ▼
//!                                                  close (or Drop)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use keto_client::config::{Mode, ProcessEnvironment, RemoteFlags};
//! use keto_client::Client;
//!
//! # async fn example() -> Result<(), keto_client::Error> {
//! let client =
//!     Client::from_flags(&RemoteFlags::default(), &ProcessEnvironment, Mode::ReadOnly).await?;
//! let allowed = client.check("alice", "view", "documents", "doc1", 0).await?;
//! client.close();
//! # let _ = allowed;
//! # Ok(())
//! # }
//! ```

use std::future::Future;
use std::time::Duration;

use crate::config::{resolve, ClientType, ConnectionConfig, Environment, Mode, RemoteFlags};
use crate::transport::{AuthClient, CheckRequest, ExpandRequest, Transport};
use crate::types::ExpandTree;
use crate::Error;

/// A connected Keto client.
///
/// Every call is bounded by the configured timeout. When it elapses the call
/// fails with a [`Request`](crate::ErrorKind::Request) error whose
/// [`is_timeout`](Error::is_timeout) is `true`, and any partial response is
/// discarded.
///
/// The transport is released exactly once: by [`Client::close`], or when the
/// client is dropped on any other path.
pub struct Client {
    transport: Box<dyn AuthClient>,
    timeout: Duration,
    closed: bool,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("transport", &self.transport.transport_type())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Builds the client for `config`.
    ///
    /// A gRPC client connects eagerly and fails with a
    /// [`Connection`](crate::ErrorKind::Connection) error if the server is
    /// not reachable within the timeout. A REST client does no I/O here.
    pub async fn connect(config: &ConnectionConfig) -> Result<Self, Error> {
        tracing::debug!(
            client_type = %config.client_type(),
            address = %config.address(),
            "opening client"
        );

        let transport = match config.client_type() {
            ClientType::Grpc => connect_grpc(config).await,
            ClientType::Rest => connect_rest(config),
        }
        .map_err(open_failed)?;

        Ok(Self::from_boxed(transport, config.timeout()))
    }

    /// Resolves `flags` against `env` and connects.
    ///
    /// Configuration errors are reported before any network attempt.
    pub async fn from_flags<E>(flags: &RemoteFlags, env: &E, mode: Mode) -> Result<Self, Error>
    where
        E: Environment + ?Sized,
    {
        let config = resolve(flags, env, mode)?;
        Self::connect(&config).await
    }

    /// Wraps an existing transport.
    ///
    /// ```rust
    /// use std::time::Duration;
    /// use keto_client::transport::MockTransport;
    /// use keto_client::{Client, Transport};
    ///
    /// let client = Client::with_transport(MockTransport::new(), Duration::from_secs(1));
    /// assert_eq!(client.transport_type(), Transport::Mock);
    /// ```
    pub fn with_transport(transport: impl AuthClient + 'static, timeout: Duration) -> Self {
        Self::from_boxed(Box::new(transport), timeout)
    }

    fn from_boxed(transport: Box<dyn AuthClient>, timeout: Duration) -> Self {
        Self {
            transport,
            timeout,
            closed: false,
        }
    }

    /// Returns the transport in use.
    pub fn transport_type(&self) -> Transport {
        self.transport.transport_type()
    }

    /// Returns the timeout applied to each call.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Checks whether `subject` holds `relation` on `namespace:object`.
    ///
    /// `max_depth` is passed to the server unvalidated.
    pub async fn check(
        &self,
        subject: &str,
        relation: &str,
        namespace: &str,
        object: &str,
        max_depth: i32,
    ) -> Result<bool, Error> {
        let request = CheckRequest::new(subject, relation, namespace, object, max_depth);
        self.bounded("check", self.transport.check(&request)).await
    }

    /// Expands the subject set `namespace:object#relation`.
    ///
    /// Returns `None` if the server sent no tree.
    pub async fn expand(
        &self,
        relation: &str,
        namespace: &str,
        object: &str,
        max_depth: i32,
    ) -> Result<Option<ExpandTree>, Error> {
        let request = ExpandRequest::new(relation, namespace, object, max_depth);
        self.bounded("expand", self.transport.expand(&request)).await
    }

    /// Closes the client, releasing the transport.
    pub fn close(mut self) {
        self.release();
    }

    async fn bounded<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = Result<T, Error>>,
    ) -> Result<T, Error> {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(operation, timeout = ?self.timeout, "request timed out");
                Err(Error::request_timeout(format!(
                    "no response within {:?}",
                    self.timeout
                ))
                .with_operation(operation))
            }
        }
    }

    fn release(&mut self) {
        if !self.closed {
            self.closed = true;
            self.transport.close();
            tracing::debug!(transport = %self.transport.transport_type(), "client closed");
        }
    }
}

impl Drop for Client {
    fn drop(&mut self) {
        self.release();
    }
}

// ============================================================================
// Client Factory
// ============================================================================

#[cfg(feature = "grpc")]
async fn connect_grpc(config: &ConnectionConfig) -> Result<Box<dyn AuthClient>, Error> {
    let transport =
        crate::transport::GrpcTransport::connect(config.address(), config.timeout()).await?;
    Ok(Box::new(transport))
}

#[cfg(not(feature = "grpc"))]
async fn connect_grpc(_config: &ConnectionConfig) -> Result<Box<dyn AuthClient>, Error> {
    Err(Error::configuration(
        "client type 'grpc' is not available: built without the `grpc` feature",
    ))
}

#[cfg(feature = "rest")]
fn connect_rest(config: &ConnectionConfig) -> Result<Box<dyn AuthClient>, Error> {
    let transport = crate::transport::RestTransport::new(config.address(), config.timeout())?;
    Ok(Box::new(transport))
}

#[cfg(not(feature = "rest"))]
fn connect_rest(_config: &ConnectionConfig) -> Result<Box<dyn AuthClient>, Error> {
    Err(Error::configuration(
        "client type 'rest' is not available: built without the `rest` feature",
    ))
}

/// Prefixes a construction failure, keeping its kind and timeout flag.
fn open_failed(err: Error) -> Error {
    let wrapped = Error::new(err.kind(), format!("could not open client: {}", err.message()))
        .with_operation("connect");
    let wrapped = if err.is_timeout() {
        wrapped.with_timeout()
    } else {
        wrapped
    };
    wrapped.with_source(err)
}
