use crate::workflows::segmentation::{
    load_lexicon, SegmentationConfig, SegmentationConfigError, ThresholdPolicy, Thresholds,
};
use crate::workflows::segmentation::recommender::DEFAULT_TOP_N;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

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
    pub segmentation: SegmentationSettings,
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

        let thresholds = Thresholds::new(
            threshold_var("SEGMENT_THRESHOLD_PRODUCTIVITY")?,
            threshold_var("SEGMENT_THRESHOLD_SOCIAL")?,
        );
        let top_n = match env::var("SEGMENT_TOP_N") {
            Ok(raw) => match raw.trim().parse::<usize>() {
                Ok(value) if value > 0 => value,
                _ => return Err(ConfigError::InvalidTopN { value: raw }),
            },
            Err(_) => DEFAULT_TOP_N,
        };
        let lexicon_path = env::var("SEGMENT_LEXICON_PATH")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            segmentation: SegmentationSettings {
                thresholds,
                top_n,
                lexicon_path,
            },
        })
    }
}

fn threshold_var(name: &'static str) -> Result<f64, ConfigError> {
    let Ok(raw) = env::var(name) else {
        return Ok(crate::workflows::segmentation::policy::DEFAULT_THRESHOLD);
    };
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && (0.0..=1.0).contains(&value) => Ok(value),
        _ => Err(ConfigError::InvalidThreshold {
            variable: name,
            value: raw,
        }),
    }
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

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Environment overrides for the segmentation rule set.
#[derive(Debug, Clone)]
pub struct SegmentationSettings {
    pub thresholds: Thresholds,
    pub top_n: usize,
    pub lexicon_path: Option<PathBuf>,
}

impl SegmentationSettings {
    /// Standard rule set with the environment's thresholds, depth and optional
    /// lexicon file applied.
    pub fn segmentation_config(&self) -> Result<SegmentationConfig, ConfigError> {
        let mut config = SegmentationConfig::standard()
            .with_thresholds(ThresholdPolicy::Fixed(self.thresholds))
            .with_top_n(self.top_n);

        if let Some(path) = &self.lexicon_path {
            let lexicon = load_lexicon(path).map_err(|source| ConfigError::Lexicon {
                path: path.clone(),
                source,
            })?;
            config = config.with_lexicon(lexicon);
        }

        Ok(config)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost {
        source: std::net::AddrParseError,
    },
    InvalidThreshold {
        variable: &'static str,
        value: String,
    },
    InvalidTopN {
        value: String,
    },
    Lexicon {
        path: PathBuf,
        source: SegmentationConfigError,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidThreshold { variable, value } => {
                write!(f, "{variable} must be a number within 0-1 (got '{value}')")
            }
            ConfigError::InvalidTopN { value } => {
                write!(f, "SEGMENT_TOP_N must be a positive integer (got '{value}')")
            }
            ConfigError::Lexicon { path, source } => {
                write!(f, "unable to load lexicon {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort
            | ConfigError::InvalidThreshold { .. }
            | ConfigError::InvalidTopN { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::Lexicon { source, .. } => Some(source),
        }
    }
}
