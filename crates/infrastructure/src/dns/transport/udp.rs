//! UDP Transport for DNS queries (RFC 1035 §4.2.1)
//!
//! Messages are sent as-is (no framing), one ephemeral socket per exchange.
//! The whole round trip, send and receive, shares one timeout.

use super::{DnsTransport, TransportResponse};
use async_trait::async_trait;
use dnsv4_domain::DomainError;
use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::debug;

/// Maximum UDP DNS response size with EDNS(0)
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

/// DNS over UDP transport
pub struct UdpTransport {
    server_addr: SocketAddr,
}

impl UdpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    pub fn server_addr(&self) -> SocketAddr {
        self.server_addr
    }

    async fn round_trip(&self, message_bytes: &[u8]) -> Result<Vec<u8>, DomainError> {
        let bind_addr: SocketAddr = if self.server_addr.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };

        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|e| self.io_error("bind", e))?;

        // connected socket: the kernel drops datagrams from other sources
        socket
            .connect(self.server_addr)
            .await
            .map_err(|e| self.io_error("connect", e))?;

        let bytes_sent = socket
            .send(message_bytes)
            .await
            .map_err(|e| self.io_error("send", e))?;

        debug!(server = %self.server_addr, bytes_sent, "UDP query sent");

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];
        loop {
            let bytes_received = socket
                .recv(&mut recv_buf)
                .await
                .map_err(|e| self.io_error("receive", e))?;

            match validate_response_id(message_bytes, &recv_buf[..bytes_received], self.server_addr)
            {
                Ok(()) => {
                    recv_buf.truncate(bytes_received);
                    debug!(server = %self.server_addr, bytes_received, "UDP response received");
                    return Ok(recv_buf);
                }
                // stale or spoofed datagram, keep waiting until the deadline
                Err(e) => debug!(server = %self.server_addr, error = %e, "Discarding UDP datagram"),
            }
        }
    }

    fn io_error(&self, action: &str, e: io::Error) -> DomainError {
        let server = self.server_addr.to_string();
        match e.kind() {
            io::ErrorKind::ConnectionRefused => DomainError::TransportConnectionRefused { server },
            io::ErrorKind::ConnectionReset => DomainError::TransportConnectionReset { server },
            _ => DomainError::IoError(format!("UDP {} to {} failed: {}", action, server, e)),
        }
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let bytes = tokio::time::timeout(timeout, self.round_trip(message_bytes))
            .await
            .map_err(|_| DomainError::TransportTimeout {
                server: self.server_addr.to_string(),
            })??;

        Ok(TransportResponse {
            bytes,
            protocol_used: "UDP",
        })
    }

    fn protocol_name(&self) -> &'static str {
        "UDP"
    }
}

/// Check that a response carries the id of the query it answers
pub fn validate_response_id(
    query: &[u8],
    response: &[u8],
    server: SocketAddr,
) -> Result<(), DomainError> {
    if query.len() < 2 || response.len() < 2 {
        return Err(DomainError::InvalidDnsResponse(format!(
            "message from {} too short to carry an id",
            server
        )));
    }

    let query_id = u16::from_be_bytes([query[0], query[1]]);
    let response_id = u16::from_be_bytes([response[0], response[1]]);
    if query_id != response_id {
        return Err(DomainError::InvalidDnsResponse(format!(
            "id mismatch from {}: expected {:#06x}, got {:#06x}",
            server, query_id, response_id
        )));
    }

    Ok(())
}

#[cfg(test)]
#[path = "udp_test.rs"]
mod tests;
