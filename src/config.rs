use std::env;
use std::fmt;

/// Startup configuration problems. The process refuses to start on any of these.
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str, String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{} must be set", key),
            ConfigError::Invalid(key, value) => write!(f, "{} has an invalid value: {}", key, value),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Upper bound for `TOKEN_TTL_SECS`: 30 days.
pub const MAX_TOKEN_TTL_SECS: i64 = 30 * 24 * 60 * 60;

/// bcrypt's accepted cost range (mirrors the crate-private `bcrypt::MIN_COST`/`bcrypt::MAX_COST`).
pub const BCRYPT_MIN_COST: u32 = 4;
pub const BCRYPT_MAX_COST: u32 = 31;

pub struct Config {
    /// `None` means the in-memory store is used.
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub server_port: u16,
    pub server_host: String,
    pub jwt_secret: String,
    pub token_ttl_secs: i64,
    pub bcrypt_cost: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret = env::var("JWT_SECRET")
            .ok()
            .filter(|secret| !secret.is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        Ok(Self {
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
            database_max_connections: parse_var("DATABASE_MAX_CONNECTIONS", 5)?,
            server_port: parse_var("SERVER_PORT", 3000)?,
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            jwt_secret,
            token_ttl_secs: parse_ranged("TOKEN_TTL_SECS", 3600, 1..=MAX_TOKEN_TTL_SECS)?,
            bcrypt_cost: parse_ranged(
                "BCRYPT_COST",
                bcrypt::DEFAULT_COST,
                BCRYPT_MIN_COST..=BCRYPT_MAX_COST,
            )?,
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}

fn parse_var<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid(key, value)),
        Err(_) => Ok(default),
    }
}

fn parse_ranged<T>(
    key: &'static str,
    default: T,
    range: std::ops::RangeInclusive<T>,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialOrd + std::fmt::Display,
{
    let value = parse_var(key, default)?;
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::Invalid(key, value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazy_static::lazy_static;
    use std::sync::Mutex;

    lazy_static! {
        static ref ENV_LOCK: Mutex<()> = Mutex::new(());
    }

    const KEYS: [&str; 7] = [
        "JWT_SECRET",
        "DATABASE_URL",
        "DATABASE_MAX_CONNECTIONS",
        "SERVER_PORT",
        "SERVER_HOST",
        "TOKEN_TTL_SECS",
        "BCRYPT_COST",
    ];

    fn clear_env() {
        for key in KEYS {
            env::remove_var(key);
        }
    }

    #[test]
    fn test_config_from_env() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        env::set_var("JWT_SECRET", "test-secret");

        let config = Config::from_env().unwrap();

        assert_eq!(config.jwt_secret, "test-secret");
        assert_eq!(config.database_url, None);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.server_host, "127.0.0.1");
        assert_eq!(config.token_ttl_secs, 3600);
        assert_eq!(config.bcrypt_cost, bcrypt::DEFAULT_COST);

        env::set_var("DATABASE_URL", "postgres://test");
        env::set_var("SERVER_PORT", "8080");
        env::set_var("SERVER_HOST", "0.0.0.0");

        let config = Config::from_env().unwrap();

        assert_eq!(config.database_url.as_deref(), Some("postgres://test"));
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.server_url(), "http://0.0.0.0:8080");
        clear_env();
    }

    #[test]
    fn test_missing_jwt_secret_refuses_to_start() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();

        assert_eq!(
            Config::from_env().err(),
            Some(ConfigError::Missing("JWT_SECRET"))
        );

        env::set_var("JWT_SECRET", "");
        assert_eq!(
            Config::from_env().err(),
            Some(ConfigError::Missing("JWT_SECRET"))
        );
        clear_env();
    }

    #[test]
    fn test_invalid_port_is_reported() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        env::set_var("JWT_SECRET", "test-secret");
        env::set_var("SERVER_PORT", "not-a-port");

        assert_eq!(
            Config::from_env().err(),
            Some(ConfigError::Invalid("SERVER_PORT", "not-a-port".into()))
        );
        clear_env();
    }

    #[test]
    fn test_out_of_range_numbers_are_reported() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let cases = vec![
            ("TOKEN_TTL_SECS", "0"),
            ("TOKEN_TTL_SECS", "-5"),
            ("TOKEN_TTL_SECS", "9223372036854775807"),
            ("BCRYPT_COST", "3"),
            ("BCRYPT_COST", "99"),
        ];

        for (key, value) in cases {
            clear_env();
            env::set_var("JWT_SECRET", "test-secret");
            env::set_var(key, value);

            assert_eq!(
                Config::from_env().err(),
                Some(ConfigError::Invalid(key, value.to_string())),
                "{}={}",
                key,
                value
            );
        }

        clear_env();
        env::set_var("JWT_SECRET", "test-secret");
        env::set_var("TOKEN_TTL_SECS", MAX_TOKEN_TTL_SECS.to_string());
        env::set_var("BCRYPT_COST", BCRYPT_MIN_COST.to_string());
        let config = Config::from_env().unwrap();
        assert_eq!(config.token_ttl_secs, MAX_TOKEN_TTL_SECS);
        assert_eq!(config.bcrypt_cost, BCRYPT_MIN_COST);
        clear_env();
    }
}
