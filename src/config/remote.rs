//! Endpoint resolution: flag values plus environment overrides.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use super::{Environment, RemoteAddress};
use crate::Error;

/// Flag name of the client timeout, in seconds.
pub const FLAG_CLIENT_TIMEOUT: &str = "client-timeout";
/// Flag name of the client type.
pub const FLAG_CLIENT_TYPE: &str = "client-type";
/// Flag name of the read API address.
pub const FLAG_READ_REMOTE: &str = "read-remote";
/// Flag name of the write API address.
pub const FLAG_WRITE_REMOTE: &str = "write-remote";

/// Environment variable overriding [`FLAG_CLIENT_TYPE`].
pub const ENV_CLIENT_TYPE: &str = "KETO_CLIENT_TYPE";
/// Environment variable overriding [`FLAG_READ_REMOTE`].
pub const ENV_READ_REMOTE: &str = "KETO_READ_REMOTE";
/// Environment variable overriding [`FLAG_WRITE_REMOTE`].
pub const ENV_WRITE_REMOTE: &str = "KETO_WRITE_REMOTE";
/// Environment variable overriding [`FLAG_CLIENT_TIMEOUT`].
pub const ENV_CLIENT_TIMEOUT: &str = "KETO_CLIENT_TIMEOUT";

/// Default read API address.
pub const DEFAULT_READ_REMOTE: &str = "127.0.0.1:4466";
/// Default write API address.
pub const DEFAULT_WRITE_REMOTE: &str = "127.0.0.1:4467";
/// Default client timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: i64 = 30;

/// Wire protocol used to talk to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClientType {
    /// Binary RPC over HTTP/2 (default).
    #[default]
    Grpc,
    /// HTTP/JSON.
    Rest,
}

impl ClientType {
    /// Returns the name accepted by [`FLAG_CLIENT_TYPE`].
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientType::Grpc => "grpc",
            ClientType::Rest => "rest",
        }
    }
}

impl fmt::Display for ClientType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClientType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "grpc" => Ok(ClientType::Grpc),
            "rest" => Ok(ClientType::Rest),
            other => Err(Error::configuration(format!(
                "unknown client type '{other}', expected one of: grpc, rest"
            ))),
        }
    }
}

/// Which endpoint a command talks to.
///
/// Check and expand only read, so they always resolve the read endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Resolve the read API address.
    ReadOnly,
    /// Resolve the write API address.
    ReadWrite,
}

/// Raw connection flag values as given on the command line.
///
/// Values are kept as strings (and a signed timeout) so that validation
/// happens in one place, after environment overrides are applied.
///
/// ## Example
///
/// ```rust
/// use keto_client::config::RemoteFlags;
///
/// let flags = RemoteFlags::builder()
///     .read_remote("keto.example.com:4466")
///     .client_type("rest")
///     .build();
/// assert_eq!(flags.write_remote, "127.0.0.1:4467");
/// assert_eq!(flags.timeout_secs, 30);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, bon::Builder)]
pub struct RemoteFlags {
    /// Address of the read API.
    #[builder(into, default = DEFAULT_READ_REMOTE.to_string())]
    pub read_remote: String,

    /// Address of the write API.
    #[builder(into, default = DEFAULT_WRITE_REMOTE.to_string())]
    pub write_remote: String,

    /// Client type name, `grpc` or `rest`.
    #[builder(into, default = ClientType::default().as_str().to_string())]
    pub client_type: String,

    /// Timeout in seconds.
    #[builder(default = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: i64,
}

impl Default for RemoteFlags {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// A validated, transport-specific connection target.
///
/// Produced by [`resolve`]; immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    client_type: ClientType,
    address: RemoteAddress,
    timeout: Duration,
}

impl ConnectionConfig {
    /// Creates a configuration from already validated parts.
    ///
    /// Returns a configuration error if `timeout` is zero.
    pub fn new(
        client_type: ClientType,
        address: RemoteAddress,
        timeout: Duration,
    ) -> Result<Self, Error> {
        if timeout.is_zero() {
            return Err(Error::configuration("timeout must be strictly positive"));
        }
        Ok(Self {
            client_type,
            address,
            timeout,
        })
    }

    /// Returns the selected wire protocol.
    pub fn client_type(&self) -> ClientType {
        self.client_type
    }

    /// Returns the remote address.
    pub fn address(&self) -> &RemoteAddress {
        &self.address
    }

    /// Returns the timeout bounding connection setup and each request.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Resolves flags and environment overrides into a [`ConnectionConfig`].
///
/// For each setting the flag value is the default and a set environment
/// variable overrides it. Validation runs after all overrides are applied:
///
/// 1. the address must not be empty,
/// 2. the address must split into a non-empty host and port,
/// 3. a timeout override must be an integer, and the timeout must be positive,
/// 4. the client type must be `grpc` or `rest`.
///
/// All failures are [`ErrorKind::Configuration`](crate::ErrorKind::Configuration).
///
/// ## Example
///
/// ```rust
/// use keto_client::config::{resolve, ClientType, Mode, RemoteFlags};
///
/// let flags = RemoteFlags::default();
/// let env = [("KETO_CLIENT_TYPE", "rest")];
///
/// let config = resolve(&flags, &env, Mode::ReadOnly).unwrap();
/// assert_eq!(config.client_type(), ClientType::Rest);
/// assert_eq!(config.address().port(), "4466");
/// ```
pub fn resolve<E>(flags: &RemoteFlags, env: &E, mode: Mode) -> Result<ConnectionConfig, Error>
where
    E: Environment + ?Sized,
{
    let (remote, env_name, label) = match mode {
        Mode::ReadOnly => (&flags.read_remote, ENV_READ_REMOTE, "read"),
        Mode::ReadWrite => (&flags.write_remote, ENV_WRITE_REMOTE, "write"),
    };
    let remote = env.var(env_name).unwrap_or_else(|| remote.clone());
    if remote.is_empty() {
        return Err(Error::configuration(format!("{label} address is empty")));
    }
    let address: RemoteAddress = remote.parse()?;

    let timeout_secs = match env.var(ENV_CLIENT_TIMEOUT) {
        Some(value) => value.trim().parse::<i64>().map_err(|e| {
            Error::configuration(format!(
                "timeout set in {ENV_CLIENT_TIMEOUT} is not a valid integer: {value:?}"
            ))
            .with_source(e)
        })?,
        None => flags.timeout_secs,
    };
    let timeout_secs = u64::try_from(timeout_secs)
        .ok()
        .filter(|secs| *secs > 0)
        .ok_or_else(|| {
            Error::configuration(format!(
                "timeout must be a positive number of seconds, got {timeout_secs}"
            ))
        })?;

    let client_type = env
        .var(ENV_CLIENT_TYPE)
        .unwrap_or_else(|| flags.client_type.clone());
    let client_type: ClientType = client_type.parse()?;

    tracing::debug!(
        %client_type,
        %address,
        timeout_secs,
        ?mode,
        "resolved remote endpoint"
    );

    ConnectionConfig::new(client_type, address, Duration::from_secs(timeout_secs))
}
