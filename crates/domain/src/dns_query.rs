use std::fmt;
use std::sync::Arc;

/// The only distinction the proxy cares about when deciding what to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryType {
    A,
    AAAA,
    /// Any other type, carrying the raw RR type code
    Other(u16),
}

impl QueryType {
    pub const A_CODE: u16 = 1;
    pub const AAAA_CODE: u16 = 28;

    pub fn from_code(code: u16) -> Self {
        match code {
            Self::A_CODE => QueryType::A,
            Self::AAAA_CODE => QueryType::AAAA,
            other => QueryType::Other(other),
        }
    }

    pub fn code(&self) -> u16 {
        match self {
            QueryType::A => Self::A_CODE,
            QueryType::AAAA => Self::AAAA_CODE,
            QueryType::Other(code) => *code,
        }
    }

    pub fn is_aaaa(&self) -> bool {
        matches!(self, QueryType::AAAA)
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryType::A => f.write_str("A"),
            QueryType::AAAA => f.write_str("AAAA"),
            QueryType::Other(code) => write!(f, "TYPE{}", code),
        }
    }
}

/// First question of an inbound message, already classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsQuery {
    pub name: Arc<str>,
    pub query_type: QueryType,
}

impl DnsQuery {
    pub fn new(name: impl Into<Arc<str>>, query_type: QueryType) -> Self {
        Self {
            name: name.into(),
            query_type,
        }
    }

    /// Same name, type A. Used to check for IPv4 before answering AAAA.
    pub fn probe(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            query_type: QueryType::A,
        }
    }

    /// Lowercase name without the trailing root dot
    pub fn normalized_name(&self) -> String {
        normalize_name(&self.name)
    }
}

pub fn normalize_name(name: &str) -> String {
    name.trim_end_matches('.').to_ascii_lowercase()
}
