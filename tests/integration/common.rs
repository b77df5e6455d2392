//! Common test harness for Keto client integration tests.

use std::collections::HashMap;

use keto_client::config::{RemoteFlags, ENV_CLIENT_TYPE, ENV_READ_REMOTE};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use wiremock::MockServer;

/// Builds an environment map from pairs.
pub fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

/// Flags pointing at `server` over REST, with a short timeout.
pub fn rest_flags(server: &MockServer, timeout_secs: i64) -> RemoteFlags {
    RemoteFlags::builder()
        .read_remote(server.address().to_string())
        .client_type("rest")
        .timeout_secs(timeout_secs)
        .build()
}

/// Environment that points the client at `server` over REST, overriding
/// whatever the flags say.
pub fn rest_env(server: &MockServer) -> HashMap<String, String> {
    let address = server.address().to_string();
    env(&[(ENV_READ_REMOTE, address.as_str()), (ENV_CLIENT_TYPE, "rest")])
}

/// A TCP listener that accepts connections and never writes a byte.
pub struct SilentServer {
    /// `127.0.0.1:<port>` of the listener.
    pub address: String,
    task: JoinHandle<()>,
}

impl SilentServer {
    /// Starts the listener on an ephemeral port.
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap().to_string();
        let task = tokio::spawn(async move {
            let mut sockets = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                sockets.push(socket);
            }
        });
        Self { address, task }
    }
}

impl Drop for SilentServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Returns an address on which nothing listens.
pub async fn closed_address() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap().to_string();
    drop(listener);
    address
}
