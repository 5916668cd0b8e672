use super::reply;
use crate::ports::{DnsHandler, UpstreamExchange};
use async_trait::async_trait;
use dnsv4_domain::{Config, Disposition, DnsQuery, DomainError, LocalRecords};
use hickory_proto::op::{Message, Query};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Decides, per query, between relaying, answering locally and suppressing
/// AAAA in favour of IPv4.
///
/// Holds nothing mutable: every call works on its own locals, so one
/// instance serves all concurrent queries.
pub struct HandleDnsQueryUseCase {
    upstream: Arc<dyn UpstreamExchange>,
    local_records: Arc<LocalRecords>,
    proxy_only: bool,
    timeout: Duration,
}

impl HandleDnsQueryUseCase {
    pub fn new(upstream: Arc<dyn UpstreamExchange>, config: &Config) -> Self {
        Self {
            upstream,
            local_records: Arc::new(LocalRecords::new()),
            proxy_only: config.proxy_only,
            timeout: config.query_timeout(),
        }
    }

    pub fn with_local_records(mut self, local_records: Arc<LocalRecords>) -> Self {
        self.local_records = local_records;
        self
    }

    /// First step of the decision, no network involved.
    pub fn decide(&self, query: &DnsQuery) -> Disposition {
        if self.proxy_only {
            return Disposition::Forwarded(query.clone());
        }

        if let Some(answer) = self.local_records.lookup(query) {
            return Disposition::Answered(answer.clone());
        }

        if query.query_type.is_aaaa() {
            return Disposition::ForwardedProbe(query.probe());
        }

        Disposition::Forwarded(query.clone())
    }

    pub async fn execute(&self, request: &Message) -> Option<Message> {
        let start = Instant::now();

        let Some((query, question)) = reply::first_question(request) else {
            debug!(id = request.id(), "Query without question, answering FORMERR");
            return Some(reply::format_error(request));
        };

        if request.queries().len() > 1 {
            debug!(
                domain = %query.name,
                questions = request.queries().len(),
                "Multiple questions, deciding on the first only"
            );
        }

        let disposition = match self.decide(&query) {
            Disposition::ForwardedProbe(probe) => {
                if self.has_ipv4(request, question, &probe).await {
                    Disposition::Suppressed
                } else {
                    Disposition::Forwarded(query.clone())
                }
            }
            decided => decided,
        };

        let response = match &disposition {
            Disposition::Answered(answer) => Some(reply::local_answer(request, question, answer)),
            Disposition::Suppressed => Some(reply::suppressed(request)),
            // a probe has been resolved above, so only the forward remains
            Disposition::Forwarded(_) | Disposition::ForwardedProbe(_) => {
                self.forward(request, &query).await
            }
        };

        debug!(
            domain = %query.name,
            record_type = %query.query_type,
            disposition = disposition.as_str(),
            answered = response.is_some(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "Query handled"
        );

        response
    }

    /// Ask upstream for A. Any failure counts as "no IPv4".
    async fn has_ipv4(
        &self,
        request: &Message,
        question: &Query,
        probe: &DnsQuery,
    ) -> bool {
        let probe_message = reply::probe_query(request, question);

        match self.exchange(&probe_message).await {
            Ok(probe_reply) => reply::has_ipv4_answer(&probe_reply),
            Err(e) => {
                warn!(
                    error = %e,
                    domain = %probe.name,
                    upstream = %self.upstream.server(),
                    "A probe failed, forwarding AAAA as-is"
                );
                false
            }
        }
    }

    /// Upstream round trip, bounded here as well as inside the adapter
    async fn exchange(&self, message: &Message) -> Result<Message, DomainError> {
        tokio::time::timeout(self.timeout, self.upstream.exchange(message, self.timeout))
            .await
            .map_err(|_| DomainError::TransportTimeout {
                server: self.upstream.server().to_string(),
            })?
    }

    async fn forward(&self, request: &Message, query: &DnsQuery) -> Option<Message> {
        match self.exchange(request).await {
            Ok(upstream_reply) => Some(upstream_reply),
            Err(e) => {
                warn!(
                    error = %e,
                    domain = %query.name,
                    record_type = %query.query_type,
                    upstream = %self.upstream.server(),
                    "Upstream exchange failed, dropping query"
                );
                None
            }
        }
    }
}

#[async_trait]
impl DnsHandler for HandleDnsQueryUseCase {
    async fn handle(&self, request: &Message) -> Option<Message> {
        self.execute(request).await
    }
}
