//! dnsv4 application layer: ports and the per-query use case.
pub mod ports;
pub mod use_cases;
