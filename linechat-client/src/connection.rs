//! Connection setup
//!
//! Resolves the server address and opens the TCP channel. Only the first
//! resolved address is tried.

use std::io;
use std::net::SocketAddr;

use dns_lookup::{getaddrinfo, AddrInfoHints, SockType};
use tokio::net::TcpStream;
use tracing::{debug, info};

use linechat_utils::{LinechatError, Result};

/// Resolve `host` and `service` to the first stream address
///
/// `service` is a port number or a service name such as `http`. No address
/// family is preferred. `getaddrinfo` blocks, so it runs on the blocking pool.
pub async fn resolve(host: &str, service: &str) -> Result<SocketAddr> {
    let query = (host.to_string(), service.to_string());
    let first = tokio::task::spawn_blocking(move || -> io::Result<Option<SocketAddr>> {
        let hints = AddrInfoHints {
            socktype: SockType::Stream.into(),
            ..AddrInfoHints::default()
        };
        let mut addrs = getaddrinfo(Some(&query.0), Some(&query.1), Some(hints))?;
        addrs.next().transpose().map(|info| info.map(|info| info.sockaddr))
    })
    .await
    .map_err(|e| LinechatError::internal(format!("resolver task failed: {}", e)))?;

    let addr = first
        .map_err(|source| LinechatError::Resolve {
            host: host.to_string(),
            source,
        })?
        .ok_or_else(|| {
            LinechatError::connection(format!("No address found for {}:{}", host, service))
        })?;

    debug!(%addr, "resolved {}:{}", host, service);
    Ok(addr)
}

/// Connect to `host:service`
///
/// Resolution or connect failure is final; alternate addresses are not
/// retried.
pub async fn connect_to(host: &str, service: &str) -> Result<TcpStream> {
    let addr = resolve(host, service).await?;

    let stream = TcpStream::connect(addr)
        .await
        .map_err(|e| LinechatError::connection(format!("Failed to connect to {}: {}", addr, e)))?;

    info!(%addr, "connected");
    Ok(stream)
}
