use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::workflows::diet_plan::assessment::AssessmentMode;
use crate::workflows::diet_plan::composer::{ComposerConfig, ComposerConfigError};
use crate::workflows::diet_plan::service::EngineConfig;

/// Distinguishes runtime behavior for different stages of the service.
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
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub engine: EngineConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let telemetry = TelemetryConfig {
            log_level,
            ansi: environment == AppEnvironment::Development,
            with_target: environment == AppEnvironment::Production,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry,
            engine: engine_from_env()?,
        })
    }
}

fn engine_from_env() -> Result<EngineConfig, ConfigError> {
    let defaults = ComposerConfig::default();

    let assessment_mode = match env::var("PLAN_ASSESSMENT_MODE") {
        Ok(raw) => AssessmentMode::from_str(&raw).ok_or(ConfigError::InvalidAssessmentMode(raw))?,
        Err(_) => AssessmentMode::default(),
    };

    let composer = ComposerConfig {
        secondary_blend: flag("PLAN_SECONDARY_BLEND", defaults.secondary_blend)?,
        secondary_blend_threshold: number(
            "PLAN_SECONDARY_BLEND_THRESHOLD",
            defaults.secondary_blend_threshold,
        )?,
        personalization: flag("PLAN_PERSONALIZATION", defaults.personalization)?,
        seasonal_adjustments: flag("PLAN_SEASONAL_ADJUSTMENTS", defaults.seasonal_adjustments)?,
        health_adjustments: flag("PLAN_HEALTH_ADJUSTMENTS", defaults.health_adjustments)?,
        meal_counts: defaults.meal_counts,
    };
    composer.validate().map_err(ConfigError::Composer)?;

    let selection_seed = match env::var("PLAN_SELECTION_SEED") {
        Ok(raw) => Some(raw.trim().parse::<u64>().map_err(|_| ConfigError::InvalidNumber {
            name: "PLAN_SELECTION_SEED",
            value: raw,
        })?),
        Err(_) => None,
    };

    Ok(EngineConfig {
        assessment_mode,
        composer,
        selection_seed,
    })
}

fn flag(name: &'static str, default: bool) -> Result<bool, ConfigError> {
    let Ok(raw) = env::var(name) else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag { name, value: raw }),
    }
}

fn number(name: &'static str, default: f64) -> Result<f64, ConfigError> {
    let Ok(raw) = env::var(name) else {
        return Ok(default);
    };
    raw.trim()
        .parse::<f64>()
        .map_err(|_| ConfigError::InvalidNumber { name, value: raw })
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing output controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub ansi: bool,
    pub with_target: bool,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidAssessmentMode(String),
    InvalidFlag { name: &'static str, value: String },
    InvalidNumber { name: &'static str, value: String },
    Composer(ComposerConfigError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidAssessmentMode(value) => write!(
                f,
                "PLAN_ASSESSMENT_MODE must be 'basic' or 'enhanced', got '{value}'"
            ),
            ConfigError::InvalidFlag { name, value } => {
                write!(f, "{name} must be a boolean flag, got '{value}'")
            }
            ConfigError::InvalidNumber { name, value } => {
                write!(f, "{name} must be numeric, got '{value}'")
            }
            ConfigError::Composer(err) => write!(f, "invalid plan composer settings: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::Composer(source) => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidAssessmentMode(_)
            | ConfigError::InvalidFlag { .. }
            | ConfigError::InvalidNumber { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for name in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "PLAN_ASSESSMENT_MODE",
            "PLAN_SECONDARY_BLEND",
            "PLAN_SECONDARY_BLEND_THRESHOLD",
            "PLAN_PERSONALIZATION",
            "PLAN_SEASONAL_ADJUSTMENTS",
            "PLAN_HEALTH_ADJUSTMENTS",
            "PLAN_SELECTION_SEED",
        ] {
            env::remove_var(name);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert!(config.telemetry.ansi);
        assert_eq!(config.engine, EngineConfig::default());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
    }

    #[test]
    fn reads_engine_flags() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("PLAN_ASSESSMENT_MODE", "basic");
        env::set_var("PLAN_SECONDARY_BLEND", "off");
        env::set_var("PLAN_SECONDARY_BLEND_THRESHOLD", "25.5");
        env::set_var("PLAN_SELECTION_SEED", "7");

        let config = AppConfig::load().expect("config loads");

        assert_eq!(config.engine.assessment_mode, AssessmentMode::Basic);
        assert!(!config.engine.composer.secondary_blend);
        assert_eq!(config.engine.composer.secondary_blend_threshold, 25.5);
        assert!(config.engine.composer.personalization);
        assert_eq!(config.engine.selection_seed, Some(7));
        reset_env();
    }

    #[test]
    fn rejects_malformed_engine_flags() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("PLAN_PERSONALIZATION", "sometimes");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidFlag {
                name: "PLAN_PERSONALIZATION",
                ..
            })
        ));

        reset_env();
        env::set_var("PLAN_SECONDARY_BLEND_THRESHOLD", "150");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::Composer(ComposerConfigError::BlendThreshold(_)))
        ));
        reset_env();
    }
}
