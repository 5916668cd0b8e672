use std::collections::HashMap;
use std::net::IpAddr;

use crate::config::LocalDnsRecord;
use crate::dns_query::{normalize_name, DnsQuery, QueryType};
use crate::errors::DomainError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalAnswer {
    pub addresses: Vec<IpAddr>,
    pub ttl: u32,
}

/// Static name-to-address overrides consulted before going upstream.
///
/// Filled once at startup, read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct LocalRecords {
    entries: HashMap<(String, QueryType), LocalAnswer>,
}

impl LocalRecords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one configured record.
    ///
    /// A records need an IPv4 address and AAAA records an IPv6 one; anything
    /// else is rejected and leaves the table unchanged.
    pub fn insert(&mut self, record: &LocalDnsRecord) -> Result<(), DomainError> {
        let ip: IpAddr = record
            .ip
            .parse()
            .map_err(|_| DomainError::InvalidIpAddress(record.ip.clone()))?;

        let query_type = match record.record_type.to_ascii_uppercase().as_str() {
            "A" => QueryType::A,
            "AAAA" => QueryType::AAAA,
            other => return Err(DomainError::UnsupportedRecordType(other.to_string())),
        };

        let family_matches = matches!(
            (query_type, ip),
            (QueryType::A, IpAddr::V4(_)) | (QueryType::AAAA, IpAddr::V6(_))
        );
        if !family_matches {
            return Err(DomainError::InvalidIpAddress(format!(
                "{} is not valid for a {} record",
                ip, query_type
            )));
        }

        let name = normalize_name(&record.hostname);
        if name.is_empty() {
            return Err(DomainError::InvalidDomainName(record.hostname.clone()));
        }

        let ttl = record.ttl_or_default();
        let answer = self
            .entries
            .entry((name, query_type))
            .or_insert_with(|| LocalAnswer {
                addresses: Vec::new(),
                ttl,
            });
        answer.addresses.push(ip);
        answer.ttl = answer.ttl.min(ttl);
        Ok(())
    }

    pub fn lookup(&self, query: &DnsQuery) -> Option<&LocalAnswer> {
        if self.entries.is_empty() {
            return None;
        }
        self.entries
            .get(&(query.normalized_name(), query.query_type))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
