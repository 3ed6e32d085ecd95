use std::env;
use std::fmt;
use std::sync::Arc;

use chrono::FixedOffset;

use crate::workflows::visitors::{
    Clock, DecisionPolicy, DeskSettings, IdSequence, VisitorRegistry,
};

/// Distinguishes runtime behavior for different stages of the desk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub desk: DeskConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let decision_maker =
            env::var("DESK_DECISION_MAKER").unwrap_or_else(|_| "Mr. Adeyemi".to_string());

        let id_prefix = env::var("DESK_ID_PREFIX").unwrap_or_else(|_| "VMS".to_string());
        if id_prefix.trim().is_empty() {
            return Err(ConfigError::EmptyIdPrefix);
        }

        let id_start = env::var("DESK_ID_START")
            .unwrap_or_else(|_| "1001".to_string())
            .trim()
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidIdStart)?;

        let utc_offset_minutes = env::var("DESK_UTC_OFFSET_MINUTES")
            .unwrap_or_else(|_| "0".to_string())
            .trim()
            .parse::<i32>()
            .map_err(|_| ConfigError::InvalidUtcOffset)?;

        let allow_redecide = match env::var("DESK_ALLOW_REDECIDE") {
            Ok(raw) => parse_flag("DESK_ALLOW_REDECIDE", &raw)?,
            Err(_) => false,
        };

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let desk = DeskConfig {
            decision_maker,
            id_prefix: id_prefix.trim().to_string(),
            id_start,
            utc_offset_minutes,
            allow_redecide,
        };
        desk.display_offset()?;

        Ok(Self {
            environment,
            desk,
            telemetry: TelemetryConfig { log_level },
        })
    }
}

fn parse_flag(name: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidFlag { name }),
    }
}

/// Settings controlling the registry and the decision-maker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeskConfig {
    pub decision_maker: String,
    pub id_prefix: String,
    pub id_start: u64,
    pub utc_offset_minutes: i32,
    pub allow_redecide: bool,
}

impl DeskConfig {
    pub fn display_offset(&self) -> Result<FixedOffset, ConfigError> {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or(ConfigError::InvalidUtcOffset)
    }

    pub fn decision_policy(&self) -> DecisionPolicy {
        if self.allow_redecide {
            DecisionPolicy::AllowRedecide
        } else {
            DecisionPolicy::PendingOnly
        }
    }

    pub fn settings(&self) -> Result<DeskSettings, ConfigError> {
        Ok(DeskSettings {
            decision_maker: self.decision_maker.clone(),
            display_offset: self.display_offset()?,
        })
    }

    pub fn registry(&self, clock: Arc<dyn Clock>) -> VisitorRegistry {
        VisitorRegistry::with_settings(
            clock,
            IdSequence {
                prefix: self.id_prefix.clone(),
                start: self.id_start,
            },
            self.decision_policy(),
        )
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    EmptyIdPrefix,
    InvalidIdStart,
    InvalidUtcOffset,
    InvalidFlag { name: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyIdPrefix => write!(f, "DESK_ID_PREFIX must not be empty"),
            ConfigError::InvalidIdStart => write!(f, "DESK_ID_START must be a valid u64"),
            ConfigError::InvalidUtcOffset => write!(
                f,
                "DESK_UTC_OFFSET_MINUTES must be whole minutes strictly between -1440 and 1440"
            ),
            ConfigError::InvalidFlag { name } => {
                write!(f, "{name} must be one of true/false, yes/no, on/off, 1/0")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
