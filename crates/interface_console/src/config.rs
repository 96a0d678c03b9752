//! Console configuration

use serde::Deserialize;
use validator::Validate;

use core_kernel::{CoreError, LecturerId};

/// Console configuration
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Log level or filter directive, used when `RUST_LOG` is unset
    #[validate(length(min = 1))]
    pub log_level: String,
    /// Emit logs as JSON lines instead of human-readable text
    pub log_json: bool,
    /// Events buffered per notification subscriber
    #[validate(range(min = 1, max = 65536))]
    pub notification_capacity: usize,
    /// Load the demo lecturers and claims at startup
    pub seed_demo_data: bool,
    /// Lecturer whose desk the demo drives
    #[validate(range(min = 1))]
    pub current_lecturer_id: u32,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_json: false,
            notification_capacity: 64,
            seed_demo_data: true,
            current_lecturer_id: 1,
        }
    }
}

impl ConsoleConfig {
    /// Loads configuration from `CLAIMS_`-prefixed environment variables
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, CoreError> {
        let source = config::Config::builder()
            .add_source(config::Environment::with_prefix("CLAIMS").try_parsing(true))
            .build()
            .map_err(|err| CoreError::configuration(err.to_string()))?;
        Self::from_source(source)
    }

    /// Deserializes and validates an assembled configuration source
    ///
    /// # Errors
    ///
    /// `Configuration` if a value has the wrong type or is out of range.
    pub fn from_source(source: config::Config) -> Result<Self, CoreError> {
        let config: Self = source
            .try_deserialize()
            .map_err(|err| CoreError::configuration(err.to_string()))?;
        config.check()?;
        Ok(config)
    }

    /// Loads `.env` if present, then reads and validates the environment
    ///
    /// Called before tracing is installed, so problems are returned rather
    /// than logged.
    pub fn load() -> Result<Self, CoreError> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// Checks field ranges
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate()
            .map_err(|errors| CoreError::configuration(errors.to_string()))
    }

    pub fn current_lecturer(&self) -> LecturerId {
        LecturerId::new(self.current_lecturer_id)
    }
}
