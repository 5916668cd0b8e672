pub mod errors;
pub mod file;
pub mod local_records;
pub mod logging;
pub mod root;

pub use errors::ConfigError;
pub use file::ConfigFile;
pub use local_records::LocalDnsRecord;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
