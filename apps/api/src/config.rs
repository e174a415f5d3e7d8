use anyhow::{Context, Result};

const DEFAULT_LLM_MODEL: &str = "claude-sonnet-4-5";

/// Deployment flavour. Controls whether internal error detail is echoed to clients.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Environment {
    Development,
    #[default]
    Production,
}

impl Environment {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" | "local" => Environment::Development,
            _ => Environment::Production,
        }
    }

    pub fn is_development(self) -> bool {
        self == Environment::Development
    }
}

/// Application configuration loaded from environment variables.
/// Startup fails if `DATABASE_URL` is missing; everything else has a default.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Absent key means the chat endpoint runs in rule-based mode.
    pub anthropic_api_key: Option<String>,
    pub llm_model: String,
    pub port: u16,
    pub rust_log: String,
    pub environment: Environment,
    /// Allowed browser origin for the SPA. Unset = permissive CORS.
    pub cors_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            llm_model: optional_env("LLM_MODEL").unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            environment: optional_env("APP_ENV")
                .map(|v| Environment::parse(&v))
                .unwrap_or_default(),
            cors_origin: optional_env("CORS_ORIGIN"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Treats an empty value the same as an unset one.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parse_development_aliases() {
        assert_eq!(Environment::parse("development"), Environment::Development);
        assert_eq!(Environment::parse(" DEV "), Environment::Development);
        assert_eq!(Environment::parse("local"), Environment::Development);
    }

    #[test]
    fn test_environment_parse_defaults_to_production() {
        assert_eq!(Environment::parse("production"), Environment::Production);
        assert_eq!(Environment::parse("staging"), Environment::Production);
        assert!(!Environment::default().is_development());
    }
}
