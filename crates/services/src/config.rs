use std::env;
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::trivia::{BATCH_SIZE, MAX_BATCH_SIZE, OpenTdbConfig};

/// Which identity client backs sign-in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IdentityBackend {
    #[default]
    Local,
    Firebase,
}

impl FromStr for IdentityBackend {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "firebase" => Ok(Self::Firebase),
            _ => Err(ConfigError::UnknownIdentity(raw.to_string())),
        }
    }
}

impl fmt::Display for IdentityBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentityBackend::Local => write!(f, "local"),
            IdentityBackend::Firebase => write!(f, "firebase"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub trivia: OpenTdbConfig,
    pub batch_size: u8,
    pub identity: IdentityBackend,
}

impl AppConfig {
    /// Read `QUIZ_TRIVIA_URL`, `QUIZ_BATCH_SIZE` and `QUIZ_IDENTITY`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for any variable that is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let trivia = OpenTdbConfig::from_env()?;
        let batch_size = batch_size_or_default(env::var("QUIZ_BATCH_SIZE").ok().as_deref())?;
        let identity = match env::var("QUIZ_IDENTITY") {
            Ok(raw) => raw.parse()?,
            Err(_) => IdentityBackend::default(),
        };
        Ok(Self {
            trivia,
            batch_size,
            identity,
        })
    }
}

/// Unset or blank values fall back to `BATCH_SIZE`.
fn batch_size_or_default(raw: Option<&str>) -> Result<u8, ConfigError> {
    match raw {
        Some(raw) if !raw.trim().is_empty() => parse_batch_size(raw),
        _ => Ok(BATCH_SIZE),
    }
}

/// # Errors
///
/// Returns `ConfigError::InvalidBatchSize` outside `1..=MAX_BATCH_SIZE`.
pub fn parse_batch_size(raw: &str) -> Result<u8, ConfigError> {
    raw.trim()
        .parse::<u8>()
        .ok()
        .filter(|value| (1..=MAX_BATCH_SIZE).contains(value))
        .ok_or_else(|| ConfigError::InvalidBatchSize {
            raw: raw.to_string(),
            max: MAX_BATCH_SIZE,
        })
}
