use serde::Deserialize;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub lending: LendingConfig,
    pub collections: CollectionsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Lending policy
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LendingConfig {
    /// Due-date horizon for printed-book borrows, in days
    pub loan_period_days: i64,
}

/// Names of the store's logical collections. Configurable because legacy
/// deployments kept books in a collection called `products`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CollectionsConfig {
    pub users: String,
    pub books: String,
    pub transactions: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for LendingConfig {
    fn default() -> Self {
        Self {
            loan_period_days: 14,
        }
    }
}

impl Default for CollectionsConfig {
    fn default() -> Self {
        Self {
            users: "users".to_string(),
            books: "books".to_string(),
            transactions: "transactions".to_string(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
