use crate::config::TelemetryConfig;
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

/// Failure to set up desk logging.
#[derive(Debug)]
pub enum TelemetryError {
    /// Neither `RUST_LOG` nor `APP_LOG_LEVEL` produced a usable filter.
    InvalidFilter { directive: String, source: ParseError },
    /// A global subscriber was already installed.
    Install(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::InvalidFilter { directive, .. } => {
                write!(f, "APP_LOG_LEVEL '{directive}' is not a valid tracing filter")
            }
            TelemetryError::Install(_) => write!(f, "desk log subscriber could not be installed"),
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::InvalidFilter { source, .. } => Some(source),
            TelemetryError::Install(err) => Some(err.as_ref()),
        }
    }
}

/// Build the filter used by [`init`]: `RUST_LOG` wins, then the configured level.
pub fn env_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.log_level).map_err(|source| {
            TelemetryError::InvalidFilter {
                directive: config.log_level.clone(),
                source,
            }
        }),
    }
}

/// Install the global subscriber. Logs go to stderr so stdout carries command output only.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = env_filter(config)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Install)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_filter_rejects_malformed_level() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        let config = TelemetryConfig {
            log_level: "visitor_desk=[".to_string(),
        };
        match env_filter(&config) {
            Err(err @ TelemetryError::InvalidFilter { .. }) => {
                assert_eq!(
                    err.to_string(),
                    "APP_LOG_LEVEL 'visitor_desk=[' is not a valid tracing filter"
                );
                assert!(std::error::Error::source(&err).is_some());
            }
            other => panic!("expected invalid filter error, got {other:?}"),
        }
    }
}
