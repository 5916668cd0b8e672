use clap::Parser;
use dnsv4_domain::CliOverrides;
use tracing::info;

mod bootstrap;
mod di;
mod server;

#[derive(Parser, Debug)]
#[command(name = "dnsv4")]
#[command(version)]
#[command(about = "DNS forwarder that answers AAAA with nothing when IPv4 exists")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Upstream resolver (host:port) [default: 1.1.1.1:53]
    #[arg(long, value_name = "HOST:PORT")]
    upstream: Option<String>,

    /// Listen address (host:port) [default: 127.0.0.1:53]
    #[arg(long, value_name = "HOST:PORT")]
    listen: Option<String>,

    /// Relay every query unchanged
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    proxy_only: Option<bool>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            upstream: self.upstream.clone(),
            listen: self.listen.clone(),
            proxy_only: self.proxy_only,
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = bootstrap::load_config(cli.config.as_deref(), cli.overrides())?;

    bootstrap::init_logging(&config);

    info!("Starting dnsv4 v{}", env!("CARGO_PKG_VERSION"));
    info!(
        config_file = cli.config.as_deref().unwrap_or("<none>"),
        upstream = %config.upstream,
        listen = %config.listen,
        proxy_only = config.proxy_only,
        local_records = config.local_records.len(),
        "Configuration loaded"
    );

    let dns_services = di::DnsServices::new(&config).await?;

    server::start_dns_server(&config.listen, dns_services.handler).await?;

    info!("Server shutdown complete");
    Ok(())
}
