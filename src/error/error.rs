//! Main error type for the Keto client.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

use super::ErrorKind;

/// The error type for all client operations.
///
/// ## Error Structure
///
/// ```text
/// Error
/// ├── kind: ErrorKind          (stage that failed, for matching)
/// ├── operation: Option        ("check", "expand", "connect", ...)
/// ├── message: String          (human-readable description)
/// ├── timeout: bool            (the stage ran out of time)
/// └── source: Option           (underlying transport diagnostic)
/// ```
///
/// ## Example
///
/// ```rust
/// use keto_client::{Error, ErrorKind};
///
/// fn report(err: &Error) {
///     match err.kind() {
///         ErrorKind::Configuration => eprintln!("fix your flags: {err}"),
///         ErrorKind::Request if err.is_timeout() => eprintln!("server too slow: {err}"),
///         _ => eprintln!("Could not make request: {err}"),
///     }
/// }
/// ```
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Cow<'static, str>,
    operation: Option<Cow<'static, str>>,
    timeout: bool,
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl Error {
    /// Creates a new error with the given kind and message.
    ///
    /// # Example
    ///
    /// ```rust
    /// use keto_client::{Error, ErrorKind};
    ///
    /// let err = Error::new(ErrorKind::Configuration, "read address is empty");
    /// assert_eq!(err.kind(), ErrorKind::Configuration);
    /// ```
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            operation: None,
            timeout: false,
            source: None,
        }
    }

    /// Returns the error kind for categorization.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the human-readable message without the kind prefix.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the operation that failed, if recorded.
    #[inline]
    pub fn operation(&self) -> Option<&str> {
        self.operation.as_deref()
    }

    /// Returns `true` if the failing stage exceeded the configured timeout.
    ///
    /// A timed-out check keeps [`ErrorKind::Request`]; a timed-out dial keeps
    /// [`ErrorKind::Connection`].
    #[inline]
    pub fn is_timeout(&self) -> bool {
        self.timeout
    }

    /// Records the operation that failed.
    #[must_use]
    pub fn with_operation(mut self, operation: impl Into<Cow<'static, str>>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    /// Sets the source error for this error.
    #[must_use]
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    /// Marks this error as caused by an elapsed timeout.
    #[must_use]
    pub fn with_timeout(mut self) -> Self {
        self.timeout = true;
        self
    }

    // Convenience constructors for each stage

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Creates a connection error.
    pub fn connection(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Connection, message)
    }

    /// Creates a connection error for a dial that did not finish in time.
    pub fn connection_timeout(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Connection, message).with_timeout()
    }

    /// Creates a request error.
    pub fn request(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Request, message)
    }

    /// Creates a request error for a call that did not finish in time.
    pub fn request_timeout(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Request, message).with_timeout()
    }

    /// Creates a conversion error.
    pub fn conversion(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Conversion, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.kind)?;

        if let Some(ref operation) = self.operation {
            write!(f, "{}: ", operation)?;
        }

        write!(f, "{}", self.message)
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::request(format!("malformed JSON payload: {}", err)).with_source(err)
    }
}
