use async_trait::async_trait;
use hickory_proto::op::Message;

#[async_trait]
pub trait DnsHandler: Send + Sync {
    /// Produce the reply for one inbound query.
    ///
    /// `None` means the query is dropped and the client gets nothing back.
    async fn handle(&self, request: &Message) -> Option<Message>;
}
