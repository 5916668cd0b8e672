use super::message_codec::DNS_HEADER_LEN;
use dnsv4_domain::DomainError;
use hickory_proto::op::{Message, MessageType, ResponseCode};

pub struct ResponseParser;

impl ResponseParser {
    /// Parse an upstream reply; anything that is not a DNS response is an error
    pub fn parse(response_bytes: &[u8]) -> Result<Message, DomainError> {
        if response_bytes.len() < DNS_HEADER_LEN {
            return Err(DomainError::InvalidDnsResponse(format!(
                "{} bytes is shorter than a DNS header",
                response_bytes.len()
            )));
        }

        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        if message.message_type() != MessageType::Response {
            return Err(DomainError::InvalidDnsResponse(
                "QR bit not set on upstream reply".to_string(),
            ));
        }

        Ok(message)
    }

    pub fn rcode_to_status(rcode: ResponseCode) -> &'static str {
        match rcode {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::FormErr => "FORMERR",
            _ => "UNKNOWN",
        }
    }
}
