//! Remote endpoint addresses in `host:port` form.

use std::fmt;
use std::str::FromStr;

use crate::Error;

/// A validated `host:port` pair.
///
/// Parsing follows the usual network address rules: the host and port are
/// separated by the last colon, and an IPv6 host must be bracketed
/// (`[::1]:4466`). Both components must be non-empty.
///
/// ## Example
///
/// ```rust
/// use keto_client::config::RemoteAddress;
///
/// let addr: RemoteAddress = "[::1]:4466".parse().unwrap();
/// assert_eq!(addr.host(), "::1");
/// assert_eq!(addr.port(), "4466");
/// assert_eq!(addr.to_string(), "[::1]:4466");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RemoteAddress {
    host: String,
    port: String,
}

impl RemoteAddress {
    /// Returns the host component, without brackets.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port component.
    pub fn port(&self) -> &str {
        &self.port
    }
}

impl FromStr for RemoteAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (host, port) = split_host_port(s).map_err(|reason| {
            Error::configuration(format!(
                "remote address must consist of <host>:<port> or [<host>]:<port> in case of IPv6: \
                 address {s:?}: {reason}"
            ))
        })?;

        if host.is_empty() {
            return Err(Error::configuration(format!(
                "remote address {s:?} contains no host"
            )));
        }
        if port.is_empty() {
            return Err(Error::configuration(format!(
                "remote address {s:?} contains no port"
            )));
        }

        Ok(Self {
            host: host.to_owned(),
            port: port.to_owned(),
        })
    }
}

impl fmt::Display for RemoteAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

/// Splits `host:port` or `[host]:port` into its components.
///
/// Empty components are returned as-is; callers decide whether they are
/// acceptable.
fn split_host_port(s: &str) -> Result<(&str, &str), &'static str> {
    let Some(last_colon) = s.rfind(':') else {
        return Err("missing port in address");
    };

    // Byte offsets after which no stray brackets may appear.
    let (host, open_from, close_from) = if s.starts_with('[') {
        let Some(end) = s.find(']') else {
            return Err("missing ']' in address");
        };
        if end + 1 == s.len() {
            return Err("missing port in address");
        }
        if end + 1 != last_colon {
            return Err(if s.as_bytes()[end + 1] == b':' {
                "too many colons in address"
            } else {
                "missing port in address"
            });
        }
        (&s[1..end], 1, end + 1)
    } else {
        let host = &s[..last_colon];
        if host.contains(':') {
            return Err("too many colons in address");
        }
        (host, 0, 0)
    };

    if s[open_from..].contains('[') {
        return Err("unexpected '[' in address");
    }
    if s[close_from..].contains(']') {
        return Err("unexpected ']' in address");
    }

    Ok((host, &s[last_colon + 1..]))
}
