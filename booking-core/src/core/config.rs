use chrono_tz::Tz;

/// Engine configuration
///
/// # Environment variables
///
/// Every item can be overridden through the environment:
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | DATABASE_PATH | booking.db | SQLite database file |
/// | BUSINESS_TIMEZONE | UTC | Timezone for "today" calculations |
/// | LOG_LEVEL | info | Tracing level filter |
/// | ENVIRONMENT | development | Runtime environment |
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database file path
    pub db_path: String,
    /// Business timezone name (IANA), e.g. `Europe/Madrid`
    pub business_timezone: String,
    /// Log level: trace | debug | info | warn | error
    pub log_level: String,
    /// Runtime environment: development | staging | production
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset. `.env` files are honored.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self {
            db_path: std::env::var("DATABASE_PATH").unwrap_or_else(|_| "booking.db".into()),
            business_timezone: std::env::var("BUSINESS_TIMEZONE").unwrap_or_else(|_| "UTC".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// Parsed business timezone, falling back to UTC on an invalid name
    pub fn timezone(&self) -> Tz {
        self.business_timezone.parse().unwrap_or_else(|_| {
            tracing::warn!(
                "Invalid BUSINESS_TIMEZONE '{}', falling back to UTC",
                self.business_timezone
            );
            Tz::UTC
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: "booking.db".into(),
            business_timezone: "UTC".into(),
            log_level: "info".into(),
            environment: "development".into(),
        }
    }
}
