//! Error kind enumeration for categorizing client errors.

/// Categorization of client errors.
///
/// This enum provides a stable interface for matching on error types. None
/// of the kinds are retried by the client; they all terminate the current
/// invocation.
///
/// | ErrorKind       | Raised by                    | User action                  |
/// |-----------------|------------------------------|------------------------------|
/// | `Configuration` | endpoint resolution          | Fix flag or environment      |
/// | `Connection`    | client construction          | Check the remote is reachable|
/// | `Request`       | check / expand               | Inspect the server response  |
/// | `Conversion`    | expand tree reconstruction   | Server sent a malformed tree |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A flag or environment value was missing or invalid.
    ///
    /// Reported before any network attempt.
    #[error("configuration error")]
    Configuration,

    /// The transport could not be constructed (dial failure, connect
    /// timeout, invalid endpoint).
    #[error("connection error")]
    Connection,

    /// A single check or expand call failed.
    ///
    /// Covers network errors, non-success HTTP statuses, non-OK gRPC
    /// statuses, request timeouts and undecodable payloads.
    #[error("request error")]
    Request,

    /// The received expand tree could not be converted to the canonical
    /// model.
    ///
    /// The server answered; the tree it sent has an unknown node type, a
    /// node without a subject, or too many levels.
    #[error("conversion error")]
    Conversion,
}

impl ErrorKind {
    /// Returns `true` if the failure happened before any network I/O.
    #[inline]
    pub fn is_local(&self) -> bool {
        matches!(self, ErrorKind::Configuration)
    }
}
