use crate::dns::forwarding::MessageCodec;
use dnsv4_application::ports::DnsHandler;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, error};

/// Bridges raw datagrams to the transport-independent `DnsHandler`.
#[derive(Clone)]
pub struct DnsServerHandler {
    handler: Arc<dyn DnsHandler>,
}

impl DnsServerHandler {
    pub fn new(handler: Arc<dyn DnsHandler>) -> Self {
        Self { handler }
    }

    /// Handle one datagram. `None` means nothing is sent back.
    pub async fn handle_raw(&self, query_buf: &[u8], client: SocketAddr) -> Option<Vec<u8>> {
        let request = match MessageCodec::decode_query(query_buf) {
            Ok(request) => request,
            Err(e) => {
                debug!(client = %client, error = %e, "Dropping undecodable datagram");
                return None;
            }
        };

        if let Some(question) = request.queries().first() {
            debug!(
                domain = %question.name(),
                record_type = %question.query_type(),
                client = %client,
                "DNS query received"
            );
        }

        let response = self.handler.handle(&request).await?;

        match MessageCodec::encode(&response) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                error!(client = %client, error = %e, "Failed to serialize response");
                None
            }
        }
    }
}
