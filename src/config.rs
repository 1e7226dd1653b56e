use std::env;

use crate::constants::STORE_CAPACITY;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub admin_password: Option<String>,
    pub password_pepper: String,
    pub store_capacity: usize,
    pub environment: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            admin_password: None,
            password_pepper: String::new(),
            store_capacity: STORE_CAPACITY,
            environment: "development".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        // An empty ADMIN_PASS means the admin menu is open
        let admin_password = env::var("ADMIN_PASS").ok().filter(|p| !p.is_empty());

        let password_pepper = env::var("PASSWORD_PEPPER").unwrap_or_default();
        if password_pepper.is_empty() {
            tracing::warn!("PASSWORD_PEPPER is not set, password hashes are unkeyed");
        }

        let store_capacity = Self::parse_capacity(env::var("STORE_CAPACITY").ok().as_deref())?;

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        Ok(Config {
            admin_password,
            password_pepper,
            store_capacity,
            environment,
        })
    }

    fn parse_capacity(raw: Option<&str>) -> Result<usize, String> {
        let Some(raw) = raw else {
            return Ok(STORE_CAPACITY);
        };

        match raw.trim().parse::<usize>() {
            Ok(n) if (1..=STORE_CAPACITY).contains(&n) => Ok(n),
            _ => Err(format!(
                "Invalid STORE_CAPACITY: expected 1..={}, got '{}'",
                STORE_CAPACITY, raw
            )),
        }
    }

    /// Whether the admin menu asks for a password
    pub fn admin_locked(&self) -> bool {
        self.admin_password.is_some()
    }
}
