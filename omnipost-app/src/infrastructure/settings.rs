use std::path::PathBuf;

use anyhow::{Result, anyhow};

#[derive(Debug, Clone)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub log_level: String,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let data_dir = match std::env::var("OMNIPOST_DATA_DIR") {
            Ok(raw) => {
                let raw = raw.trim();
                if raw.is_empty() {
                    return Err(anyhow!("OMNIPOST_DATA_DIR must not be empty"));
                }
                PathBuf::from(raw)
            }
            Err(_) => default_data_dir(),
        };

        let gemini_api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        let gemini_model = std::env::var("GEMINI_MODEL")
            .unwrap_or_else(|_| omnipost_ai::DEFAULT_MODEL.to_string());

        let log_level = std::env::var("LOG_LEVEL")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            data_dir,
            gemini_api_key,
            gemini_model,
            log_level,
        })
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("omnipost"))
        .unwrap_or_else(|| PathBuf::from("./omnipost_data"))
}
