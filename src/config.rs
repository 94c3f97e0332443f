//! Application configuration, read from environment variables.

use std::path::PathBuf;

/// Deployment environment. Drives log format and cookie `Secure` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn from_env() -> Self {
        match std::env::var("ENVIRONMENT").as_deref() {
            Ok("production") => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn is_production(self) -> bool {
        self == Environment::Production
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

/// Where the seeded admin password comes from.
#[derive(Debug, Clone)]
pub enum AdminPassword {
    /// Already a bcrypt hash (ADMIN_PASSWORD_HASH).
    Hash(String),
    /// Plain text, hashed once at boot (ADMIN_PASSWORD).
    Plain(String),
}

/// Longest session lifetime accepted from SESSION_TTL_HOURS (one year).
pub const MAX_SESSION_TTL_HOURS: i64 = 24 * 365;

pub const DEFAULT_ADMIN_USERNAME: &str = "akaanakbaik";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub username: String,
    pub password: AdminPassword,
}

impl AdminSeed {
    /// True when neither ADMIN_PASSWORD_HASH nor ADMIN_PASSWORD was supplied.
    pub fn uses_default_password(&self) -> bool {
        matches!(&self.password, AdminPassword::Plain(p) if p == DEFAULT_ADMIN_PASSWORD)
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub admin: AdminSeed,
    pub bcrypt_cost: u32,
    pub session_ttl_hours: i64,
    pub session_check_period_secs: u64,
    pub static_dir: Option<PathBuf>,
    pub body_limit_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            host: "127.0.0.1".to_string(),
            port: 5000,
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
                "http://localhost:5173".to_string(),
            ],
            admin: AdminSeed {
                username: DEFAULT_ADMIN_USERNAME.to_string(),
                password: AdminPassword::Plain(DEFAULT_ADMIN_PASSWORD.to_string()),
            },
            bcrypt_cost: 10,
            session_ttl_hours: 24,
            session_check_period_secs: 24 * 60 * 60,
            static_dir: None,
            body_limit_bytes: 2 * 1024 * 1024,
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.trim().parse().ok())
}

impl AppConfig {
    /// Defaults overlaid with whatever the environment provides.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        // ALLOWED_ORIGINS (comma-separated) wins over FRONTEND_ORIGIN.
        let allowed_origins = std::env::var("ALLOWED_ORIGINS")
            .ok()
            .map(|s| {
                s.split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|origins| !origins.is_empty())
            .or_else(|| std::env::var("FRONTEND_ORIGIN").ok().map(|o| vec![o]))
            .unwrap_or(defaults.allowed_origins);

        let password = if let Ok(hash) = std::env::var("ADMIN_PASSWORD_HASH") {
            AdminPassword::Hash(hash)
        } else if let Ok(plain) = std::env::var("ADMIN_PASSWORD") {
            AdminPassword::Plain(plain)
        } else {
            defaults.admin.password
        };

        Self {
            environment: Environment::from_env(),
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: env_parse("PORT").unwrap_or(defaults.port),
            allowed_origins,
            admin: AdminSeed {
                username: std::env::var("ADMIN_USERNAME").unwrap_or(defaults.admin.username),
                password,
            },
            bcrypt_cost: env_parse("BCRYPT_COST").unwrap_or(defaults.bcrypt_cost),
            session_ttl_hours: env_parse("SESSION_TTL_HOURS")
                .filter(|h: &i64| *h > 0)
                .map(|h| h.min(MAX_SESSION_TTL_HOURS))
                .unwrap_or(defaults.session_ttl_hours),
            session_check_period_secs: env_parse("SESSION_CHECK_PERIOD_SECS")
                .filter(|s: &u64| *s > 0)
                .unwrap_or(defaults.session_check_period_secs),
            static_dir: std::env::var("STATIC_DIR")
                .ok()
                .filter(|s| !s.is_empty())
                .map(PathBuf::from),
            body_limit_bytes: env_parse("BODY_LIMIT_BYTES").unwrap_or(defaults.body_limit_bytes),
        }
    }

    /// Session cookies are `Secure` only in production.
    pub fn cookie_secure(&self) -> bool {
        self.environment.is_production()
    }

    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.session_ttl_hours.clamp(1, MAX_SESSION_TTL_HOURS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_documented_values() {
        let config = AppConfig::default();
        assert_eq!(config.port, 5000);
        assert_eq!(config.admin.username, "akaanakbaik");
        assert!(config.admin.uses_default_password());
        assert_eq!(config.session_ttl(), chrono::Duration::hours(24));
        assert!(!config.cookie_secure());
        assert!(config.static_dir.is_none());
    }

    #[test]
    fn test_session_ttl_is_clamped() {
        let config = AppConfig {
            session_ttl_hours: 3_000_000_000,
            ..AppConfig::default()
        };
        assert_eq!(
            config.session_ttl(),
            chrono::Duration::hours(MAX_SESSION_TTL_HOURS)
        );

        let config = AppConfig {
            session_ttl_hours: -5,
            ..AppConfig::default()
        };
        assert_eq!(config.session_ttl(), chrono::Duration::hours(1));
    }

    #[test]
    fn test_hashed_password_is_not_default() {
        let seed = AdminSeed {
            username: "owner".to_string(),
            password: AdminPassword::Hash("$2b$10$abc".to_string()),
        };
        assert!(!seed.uses_default_password());
    }

    #[test]
    fn test_environment_strings() {
        assert_eq!(Environment::Production.as_str(), "production");
        assert!(Environment::Production.is_production());
        assert!(!Environment::Development.is_production());
    }
}
