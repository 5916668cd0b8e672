use super::message_codec::MessageCodec;
use super::response_parser::ResponseParser;
use crate::dns::transport::udp::UdpTransport;
use crate::dns::transport::DnsTransport;
use async_trait::async_trait;
use dnsv4_application::ports::UpstreamExchange;
use dnsv4_domain::DomainError;
use hickory_proto::op::Message;
use std::net::SocketAddr;
use std::time::Duration;
use tracing::debug;

/// Upstream exchange over plain UDP.
///
/// Stateless apart from the server address; each exchange opens its own
/// socket, so concurrent callers never share one.
pub struct UdpUpstream {
    transport: UdpTransport,
    server: String,
}

impl UdpUpstream {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self {
            transport: UdpTransport::new(server_addr),
            server: server_addr.to_string(),
        }
    }
}

#[async_trait]
impl UpstreamExchange for UdpUpstream {
    async fn exchange(&self, query: &Message, timeout: Duration) -> Result<Message, DomainError> {
        let request_bytes = MessageCodec::encode(query)?;
        let response = self.transport.send(&request_bytes, timeout).await?;
        let reply = ResponseParser::parse(&response.bytes)?;

        debug!(
            server = %self.server,
            protocol = response.protocol_used,
            id = reply.id(),
            rcode = ResponseParser::rcode_to_status(reply.response_code()),
            answers = reply.answers().len(),
            truncated = reply.truncated(),
            "Upstream reply"
        );

        Ok(reply)
    }

    fn server(&self) -> &str {
        &self.server
    }
}
