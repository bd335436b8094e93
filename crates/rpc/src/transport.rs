use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::RpcError;

/// Transport layer for ZeroMQ connections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "address")]
pub enum Transport {
    /// Inter-process communication via Unix domain sockets.
    /// Fastest option for same-host communication.
    Ipc(String),

    /// TCP transport for distributed deployment.
    Tcp { host: String, port: u16 },
}

impl Transport {
    /// Create an IPC transport with the given socket name.
    ///
    /// The name is used as a path component under `/tmp/comics-rpc/`.
    pub fn ipc(name: &str) -> Self {
        Self::Ipc(name.to_string())
    }

    /// Create a TCP transport with the given host and port.
    pub fn tcp(host: impl Into<String>, port: u16) -> Self {
        Self::Tcp {
            host: host.into(),
            port,
        }
    }

    /// Parse a `host:port` address, as read from the service-address env vars.
    pub fn parse(address: &str) -> Result<Self, RpcError> {
        let (host, port) = address
            .rsplit_once(':')
            .ok_or_else(|| RpcError::Config(format!("invalid address {address:?}, expected host:port")))?;
        let port: u16 = port
            .parse()
            .map_err(|_| RpcError::Config(format!("invalid port in address {address:?}")))?;
        Ok(Self::tcp(host, port))
    }

    /// Generate the ZeroMQ endpoint address string.
    pub fn endpoint(&self) -> String {
        match self {
            Self::Ipc(name) => format!("ipc:///tmp/comics-rpc/{name}.sock"),
            Self::Tcp { host, port } => format!("tcp://{host}:{port}"),
        }
    }

    /// Ensure the directory backing an IPC socket exists. No-op for TCP.
    pub fn ensure_ipc_dir(&self) -> std::io::Result<()> {
        if let Self::Ipc(_) = self {
            std::fs::create_dir_all(PathBuf::from("/tmp/comics-rpc"))?;
        }
        Ok(())
    }

    /// Remove a stale socket file left behind by a previous, uncleanly-stopped
    /// process. No-op for TCP.
    pub fn remove_stale_socket(&self) -> std::io::Result<()> {
        if let Self::Ipc(name) = self {
            let path = PathBuf::from(format!("/tmp/comics-rpc/{name}.sock"));
            if path.exists() {
                std::fs::remove_file(path)?;
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.endpoint())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ipc_endpoint() {
        let t = Transport::ipc("broker");
        assert_eq!(t.endpoint(), "ipc:///tmp/comics-rpc/broker.sock");
    }

    #[test]
    fn tcp_endpoint() {
        let t = Transport::tcp("127.0.0.1", 5555);
        assert_eq!(t.endpoint(), "tcp://127.0.0.1:5555");
    }

    #[test]
    fn display_matches_endpoint() {
        let t = Transport::tcp("localhost", 9090);
        assert_eq!(t.to_string(), t.endpoint());
    }

    #[test]
    fn parses_host_colon_port() {
        let t = Transport::parse("words:81").unwrap();
        assert_eq!(t, Transport::tcp("words", 81));
    }

    #[test]
    fn rejects_address_without_port() {
        assert!(Transport::parse("words").is_err());
    }
}
