use serde::Serialize;
use std::time::Duration;

use super::errors::ConfigError;
use super::file::ConfigFile;
use super::local_records::LocalDnsRecord;
use super::logging::LoggingConfig;

pub const DEFAULT_UPSTREAM: &str = "1.1.1.1:53";
pub const DEFAULT_LISTEN: &str = "127.0.0.1:53";
pub const DEFAULT_QUERY_TIMEOUT_MS: u64 = 1000;

/// Effective configuration for the proxy.
///
/// Built once at startup and never mutated afterwards; the handler and the
/// listener only ever see it behind a shared reference.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Config {
    /// Upstream resolver, `host:port`
    pub upstream: String,

    /// Local listen address, `host:port`
    pub listen: String,

    /// Relay every query untouched, no AAAA suppression
    pub proxy_only: bool,

    /// Budget for each upstream exchange (probe and forward alike)
    pub query_timeout_ms: u64,

    pub logging: LoggingConfig,

    pub local_records: Vec<LocalDnsRecord>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            upstream: DEFAULT_UPSTREAM.to_string(),
            listen: DEFAULT_LISTEN.to_string(),
            proxy_only: false,
            query_timeout_ms: DEFAULT_QUERY_TIMEOUT_MS,
            logging: LoggingConfig::default(),
            local_records: Vec::new(),
        }
    }
}

impl Config {
    /// Build the effective configuration.
    ///
    /// Layers, lowest precedence first:
    /// 1. Built-in defaults
    /// 2. The config file at `path`, if one was given
    /// 3. Command-line values the user actually passed
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = path {
            config.apply_file(ConfigFile::read(path)?);
        }

        config.apply_cli_overrides(cli_overrides);
        config.validate()?;
        Ok(config)
    }

    /// Overwrite every field the file sets
    pub fn apply_file(&mut self, file: ConfigFile) {
        if let Some(upstream) = file.upstream {
            self.upstream = upstream;
        }
        if let Some(listen) = file.listen {
            self.listen = listen;
        }
        if let Some(proxy_only) = file.proxy_only {
            self.proxy_only = proxy_only;
        }
        if let Some(timeout) = file.query_timeout_ms {
            self.query_timeout_ms = timeout;
        }
        if let Some(level) = file.logging.and_then(|l| l.level) {
            self.logging.level = level;
        }
        if let Some(records) = file.local_records {
            self.local_records = records;
        }
    }

    /// Apply command-line overrides to configuration
    pub fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(upstream) = overrides.upstream {
            self.upstream = upstream;
        }
        if let Some(listen) = overrides.listen {
            self.listen = listen;
        }
        if let Some(proxy_only) = overrides.proxy_only {
            self.proxy_only = proxy_only;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_host_port("upstream", &self.upstream)?;
        validate_host_port("listen", &self.listen)?;

        if self.query_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "query_timeout_ms must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }
}

/// Values given explicitly on the command line.
///
/// `None` means the flag was not passed, so the lower layers win.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub upstream: Option<String>,
    pub listen: Option<String>,
    pub proxy_only: Option<bool>,
    pub log_level: Option<String>,
}

fn validate_host_port(field: &str, value: &str) -> Result<(), ConfigError> {
    let invalid = |reason: &str| {
        ConfigError::Validation(format!("{} '{}' is invalid: {}", field, value, reason))
    };

    let (host, port) = value
        .rsplit_once(':')
        .ok_or_else(|| invalid("expected host:port"))?;

    let host = host.trim_start_matches('[').trim_end_matches(']');
    if host.is_empty() {
        return Err(invalid("missing host"));
    }

    port.parse::<u16>().map_err(|_| invalid("bad port"))?;
    Ok(())
}
