//! Error types for the Keto client.
//!
//! Every failure is surfaced as an [`Error`] whose [`ErrorKind`] tells the
//! caller which stage failed:
//!
//! | ErrorKind       | Stage                                              |
//! |-----------------|----------------------------------------------------|
//! | `Configuration` | flag or environment value rejected, before any I/O |
//! | `Connection`    | transport could not be constructed                 |
//! | `Request`       | a single check or expand call failed               |
//! | `Conversion`    | the received expand tree could not be normalized   |
//!
//! Nothing in this crate retries. Timeouts keep their stage's kind and are
//! flagged separately, see [`Error::is_timeout`].

#[allow(clippy::module_inception)]
mod error;
mod kind;

pub use error::Error;
pub use kind::ErrorKind;

/// A specialized `Result` type for Keto client operations.
pub type Result<T> = std::result::Result<T, Error>;
