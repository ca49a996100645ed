use std::net::SocketAddr;

use crate::client::constants::DEFAULT_PORT;

/// The GameQuery endpoint exposed by the mod inside the game client
#[derive(Clone, Debug)]
pub struct GameQueryServer {
    pub host: String,
    pub port: u16,
}

impl GameQueryServer {
    pub fn new(host: String, port: u16) -> Self {
        GameQueryServer { host, port }
    }

    /// Endpoint on the default GameQuery port
    pub fn localhost() -> Self {
        GameQueryServer::new("localhost".to_string(), DEFAULT_PORT)
    }

    /// Resolve the endpoint address for connecting
    /// Prefers IPv4 but falls back to IPv6 if IPv4 is not available
    pub async fn addr(&self) -> Result<SocketAddr, std::io::Error> {
        let addr = format!("{}:{}", self.host, self.port);
        let addrs: Vec<SocketAddr> = tokio::net::lookup_host(&addr).await?.collect();

        // Prefer IPv4, but accept IPv6 if no IPv4 address is available
        addrs
            .iter()
            .find(|a| a.is_ipv4())
            .or_else(|| addrs.first())
            .copied()
            .ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("Could not resolve address: {}", addr),
                )
            })
    }
}

impl std::fmt::Display for GameQueryServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}
