use dnsv4_application::ports::DnsHandler;
use dnsv4_application::use_cases::HandleDnsQueryUseCase;
use dnsv4_domain::{Config, LocalDnsRecord, LocalRecords};
use dnsv4_infrastructure::dns::{DnsServerHandler, UdpUpstream};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

pub struct DnsServices {
    pub handler: DnsServerHandler,
}

impl DnsServices {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let upstream_addr = Self::resolve_upstream(&config.upstream).await?;
        let upstream = Arc::new(UdpUpstream::new(upstream_addr));
        let local_records = Arc::new(Self::build_local_records(&config.local_records));

        let use_case = HandleDnsQueryUseCase::new(upstream, config).with_local_records(local_records);
        let handler = DnsServerHandler::new(Arc::new(use_case) as Arc<dyn DnsHandler>);

        info!(
            upstream = %upstream_addr,
            proxy_only = config.proxy_only,
            timeout_ms = config.query_timeout_ms,
            "DNS services initialized"
        );

        Ok(Self { handler })
    }

    async fn resolve_upstream(upstream: &str) -> anyhow::Result<SocketAddr> {
        if let Ok(addr) = upstream.parse::<SocketAddr>() {
            return Ok(addr);
        }

        tokio::net::lookup_host(upstream)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to resolve upstream {}: {}", upstream, e))?
            .next()
            .ok_or_else(|| anyhow::anyhow!("Upstream {} resolved to no address", upstream))
    }

    fn build_local_records(records: &[LocalDnsRecord]) -> LocalRecords {
        let mut table = LocalRecords::new();
        let mut error_count = 0;

        for record in records {
            match table.insert(record) {
                Ok(()) => info!(
                    hostname = %record.hostname,
                    ip = %record.ip,
                    record_type = %record.record_type,
                    ttl = record.ttl_or_default(),
                    "Loaded local DNS record"
                ),
                Err(e) => {
                    warn!(
                        hostname = %record.hostname,
                        ip = %record.ip,
                        record_type = %record.record_type,
                        error = %e,
                        "Invalid local DNS record, skipping"
                    );
                    error_count += 1;
                }
            }
        }

        if error_count > 0 {
            warn!(count = error_count, "Failed to load {} local DNS record(s)", error_count);
        }

        table
    }
}
