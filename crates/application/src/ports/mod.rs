mod dns_handler;
mod upstream_exchange;

pub use dns_handler::DnsHandler;
pub use upstream_exchange::UpstreamExchange;
