use serde::Deserialize;

use super::errors::ConfigError;
use super::local_records::LocalDnsRecord;

/// One layer of configuration as read from a TOML file.
///
/// Every key is optional: a key that is absent leaves the value from the
/// previous layer untouched when the file is applied.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ConfigFile {
    #[serde(default)]
    pub upstream: Option<String>,

    #[serde(default)]
    pub listen: Option<String>,

    #[serde(default)]
    pub proxy_only: Option<bool>,

    #[serde(default)]
    pub query_timeout_ms: Option<u64>,

    #[serde(default)]
    pub logging: Option<LoggingSection>,

    #[serde(default)]
    pub local_records: Option<Vec<LocalDnsRecord>>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct LoggingSection {
    #[serde(default)]
    pub level: Option<String>,
}

impl ConfigFile {
    /// Read and parse a config file from disk.
    pub fn read(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}
