//! dnsv4 domain layer: configuration, query classification and decisions.
pub mod config;
pub mod disposition;
pub mod dns_query;
pub mod errors;
pub mod local_records;

pub use config::{CliOverrides, Config, ConfigError, LocalDnsRecord, LoggingConfig};
pub use disposition::Disposition;
pub use dns_query::{DnsQuery, QueryType};
pub use errors::DomainError;
pub use local_records::{LocalAnswer, LocalRecords};
