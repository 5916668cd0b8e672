//! Wire format conversion for whole DNS messages via `hickory-proto`.

use dnsv4_domain::DomainError;
use hickory_proto::op::Message;
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};

/// DNS header is always 12 bytes
pub const DNS_HEADER_LEN: usize = 12;

pub struct MessageCodec;

impl MessageCodec {
    /// Serialize a Message to wire format bytes
    pub fn encode(message: &Message) -> Result<Vec<u8>, DomainError> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);

        message.emit(&mut encoder).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to serialize DNS message: {}", e))
        })?;

        Ok(buf)
    }

    /// Parse an inbound client query
    pub fn decode_query(bytes: &[u8]) -> Result<Message, DomainError> {
        if bytes.len() < DNS_HEADER_LEN {
            return Err(DomainError::MalformedQuery(format!(
                "{} bytes is shorter than a DNS header",
                bytes.len()
            )));
        }

        Message::from_vec(bytes)
            .map_err(|e| DomainError::MalformedQuery(format!("Failed to parse DNS query: {}", e)))
    }
}
