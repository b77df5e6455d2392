//! Connection configuration for the Keto client.
//!
//! This module turns command-line flag values and environment overrides into
//! a validated [`ConnectionConfig`]:
//! - [`RemoteFlags`]: raw flag values with their defaults
//! - [`Environment`]: where overrides are read from
//! - [`resolve`]: the precedence and validation rules
//! - [`RemoteAddress`]: `host:port` parsing, including bracketed IPv6

mod address;
mod env;
mod remote;

pub use address::RemoteAddress;
pub use env::{Environment, ProcessEnvironment};
pub use remote::{
    resolve, ClientType, ConnectionConfig, Mode, RemoteFlags, DEFAULT_READ_REMOTE,
    DEFAULT_TIMEOUT_SECS, DEFAULT_WRITE_REMOTE, ENV_CLIENT_TIMEOUT, ENV_CLIENT_TYPE,
    ENV_READ_REMOTE, ENV_WRITE_REMOTE, FLAG_CLIENT_TIMEOUT, FLAG_CLIENT_TYPE, FLAG_READ_REMOTE,
    FLAG_WRITE_REMOTE,
};
