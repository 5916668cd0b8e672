pub mod handle_dns_query;
pub mod reply;

pub use handle_dns_query::HandleDnsQueryUseCase;
