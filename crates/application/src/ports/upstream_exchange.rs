use async_trait::async_trait;
use dnsv4_domain::DomainError;
use hickory_proto::op::Message;
use std::time::Duration;

/// One request/response round trip with the upstream resolver.
///
/// Implementations are shared by every in-flight query, so `exchange` must
/// be safe to call concurrently through `&self`.
#[async_trait]
pub trait UpstreamExchange: Send + Sync {
    async fn exchange(&self, query: &Message, timeout: Duration) -> Result<Message, DomainError>;

    /// Address of the upstream, for logs
    fn server(&self) -> &str;
}
