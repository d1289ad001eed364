mod settings;

pub use settings::{LogFormat, LoggingConfig, Settings, UrlConfig};
