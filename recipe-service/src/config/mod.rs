use secrecy::{ExposeSecret, Secret};
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_OPENAI_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CORS_ORIGINS: &str = "https://hungie.vercel.app,https://hungie.app,https://*.hungie.app";

#[derive(Debug, Clone)]
pub struct RecipeConfig {
    pub common: core_config::Config,
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub openai: OpenAiConfig,
    pub substitutions: SubstitutionsConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
    Test,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to the bundled SQLite recipe database.
    pub path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// `None` disables every AI-backed feature.
    pub api_key: Option<Secret<String>>,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct SubstitutionsConfig {
    /// Optional JSON file replacing the embedded substitution table.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl RecipeConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env, PORT and APP__ prefix)
        let common_config = core_config::Config::load()?;

        let environment: Environment = get_env("ENVIRONMENT", Some("development"))?
            .parse()
            .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?;

        let timeout_secs = get_env(
            "OPENAI_TIMEOUT_SECS",
            Some(&DEFAULT_OPENAI_TIMEOUT_SECS.to_string()),
        )?
        .parse()
        .map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!("OPENAI_TIMEOUT_SECS is invalid: {}", e))
        })?;

        Ok(RecipeConfig {
            common: common_config,
            environment,
            database: DatabaseConfig {
                path: database_path(&get_env("DATABASE_URL", Some("hungie.db"))?),
            },
            openai: OpenAiConfig {
                api_key: optional_env("OPENAI_API_KEY").map(Secret::new),
                model: get_env("OPENAI_MODEL", Some(DEFAULT_OPENAI_MODEL))?,
                base_url: get_env("OPENAI_BASE_URL", Some(DEFAULT_OPENAI_BASE_URL))?
                    .trim_end_matches('/')
                    .to_string(),
                timeout_secs,
            },
            substitutions: SubstitutionsConfig {
                path: optional_env("SUBSTITUTIONS_PATH").map(PathBuf::from),
            },
            cors: CorsConfig {
                allowed_origins: split_list(&get_env(
                    "CORS_ALLOWED_ORIGINS",
                    Some(DEFAULT_CORS_ORIGINS),
                )?),
            },
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    pub fn ai_enabled(&self) -> bool {
        self.openai
            .api_key
            .as_ref()
            .is_some_and(|key| !key.expose_secret().is_empty())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            "test" => Ok(Environment::Test),
            _ => Err(format!("Invalid ENVIRONMENT: {}", s)),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Environment::Development => "development",
            Environment::Production => "production",
            Environment::Test => "test",
        };
        f.write_str(name)
    }
}

/// Accepts a bare path or a `sqlite://` / `sqlite:` URL.
fn database_path(value: &str) -> PathBuf {
    let path = value
        .strip_prefix("sqlite://")
        .or_else(|| value.strip_prefix("sqlite:"))
        .unwrap_or(value);
    PathBuf::from(path)
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn optional_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn get_env(key: &str, default: Option<&str>) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => match default {
            Some(def) => Ok(def.to_string()),
            None => Err(AppError::ConfigError(anyhow::anyhow!(
                "{} is required but not set",
                key
            ))),
        },
    }
}
