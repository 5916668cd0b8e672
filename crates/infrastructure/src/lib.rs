//! dnsv4 infrastructure: upstream transport and the wire-level server adapter.
pub mod dns;
