use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;

const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Config {
    /// Load the shared settings.
    ///
    /// The port comes from `APP__PORT`, then the platform-assigned `PORT`
    /// (Railway, Render, Heroku), then 8080.
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let platform_port =
            std::env::var("PORT").unwrap_or_else(|_| DEFAULT_PORT.to_string());

        let config = Cfg::builder()
            .set_default("port", platform_port)?
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
