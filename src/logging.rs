//! Relay logging: `RUST_LOG` filter, compact or JSON lines on stderr
//!
//! stdout is reserved for the CLI's JSON results.

use tracing_subscriber::{fmt, EnvFilter};

/// Set to `1` for JSON log lines
pub const LOG_JSON_VAR: &str = "FOLIO_LOG_JSON";

/// Filter used when `RUST_LOG` is unset; request spans come from `TraceLayer`
pub const DEFAULT_FILTER: &str = "info,tower_http=debug";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

impl LogFormat {
    fn from_flag(flag: Option<&str>) -> Self {
        match flag {
            Some("1") => LogFormat::Json,
            _ => LogFormat::Compact,
        }
    }

    pub fn from_env() -> Self {
        Self::from_flag(std::env::var(LOG_JSON_VAR).ok().as_deref())
    }
}

pub fn init_logging() {
    init_logging_with(LogFormat::from_env());
}

/// Install the global subscriber. Later calls are ignored.
pub fn init_logging_with(format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    let _ = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_one_selects_json() {
        assert_eq!(LogFormat::from_flag(Some("1")), LogFormat::Json);
        assert_eq!(LogFormat::from_flag(Some("true")), LogFormat::Compact);
        assert_eq!(LogFormat::from_flag(None), LogFormat::Compact);
    }

    #[test]
    fn repeated_init_is_harmless() {
        init_logging_with(LogFormat::Compact);
        init_logging_with(LogFormat::Json);
    }
}
