use crate::prompts::{IMAGE_ASPECT_RATIOS, VOICE_OPTIONS};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_chat_model")]
    pub chat_model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_top_p")]
    pub top_p: f32,

    #[serde(default = "default_image_model")]
    pub image_model: String,

    #[serde(default = "default_aspect_ratio")]
    pub aspect_ratio: String,

    #[serde(default = "default_speech_model")]
    pub speech_model: String,

    #[serde(default = "default_voice")]
    pub voice: String,

    /// Rate of the raw PCM the speech model returns. The API sends no header,
    /// so this has to match the model.
    #[serde(default = "default_speech_sample_rate")]
    pub speech_sample_rate: u32,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default = "default_autoplay")]
    pub autoplay: bool,
}

fn default_api_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta/openai".to_string()
}

fn default_chat_model() -> String {
    "gemini-3-pro-preview".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_top_p() -> f32 {
    0.95
}

fn default_image_model() -> String {
    "gemini-2.5-flash-image".to_string()
}

fn default_aspect_ratio() -> String {
    "16:9".to_string()
}

fn default_speech_model() -> String {
    "gemini-2.5-flash-preview-tts".to_string()
}

fn default_voice() -> String {
    "nova".to_string()
}

fn default_speech_sample_rate() -> u32 {
    24000
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("channelkit-media")
}

fn default_autoplay() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_key: String::new(),
            chat_model: default_chat_model(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            image_model: default_image_model(),
            aspect_ratio: default_aspect_ratio(),
            speech_model: default_speech_model(),
            voice: default_voice(),
            speech_sample_rate: default_speech_sample_rate(),
            output_dir: default_output_dir(),
            autoplay: default_autoplay(),
        }
    }
}

impl Config {
    /// Load configuration from the default location (~/.config/channelkit/config.json)
    ///
    /// `API_KEY` or `GEMINI_API_KEY` in the environment take precedence over the stored key.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        let mut config = if !config_path.exists() {
            tracing::info!(
                "Config file not found at {:?}, creating default config",
                config_path
            );
            let config = Self::default();
            config.save()?;
            config
        } else {
            let config = Self::from_file(&config_path)?;
            tracing::info!("Loaded config from {:?}", config_path);
            config
        };

        if let Some(key) = ["API_KEY", "GEMINI_API_KEY"]
            .iter()
            .find_map(|name| std::env::var(name).ok().filter(|v| !v.is_empty()))
        {
            tracing::debug!("Using API key from environment");
            config.api_key = key;
        }

        Ok(config)
    }

    fn from_file(path: &std::path::Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        // Create parent directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(&config_path, contents)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        tracing::info!("Saved config to {:?}", config_path);
        Ok(())
    }

    /// Get the path to the configuration file
    fn config_path() -> Result<PathBuf> {
        let config_dir = if let Ok(dir) = std::env::var("XDG_CONFIG_HOME") {
            PathBuf::from(dir)
        } else {
            let home = std::env::var("HOME").context("HOME environment variable not set")?;
            PathBuf::from(home).join(".config")
        };

        Ok(config_dir.join("channelkit").join("config.json"))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_url.is_empty() {
            return Err(anyhow::anyhow!("api_url cannot be empty"));
        }

        if self.api_key.is_empty() {
            return Err(anyhow::anyhow!(
                "api_key is empty; set it in the config file or export API_KEY"
            ));
        }

        for (name, model) in [
            ("chat_model", &self.chat_model),
            ("image_model", &self.image_model),
            ("speech_model", &self.speech_model),
        ] {
            if model.is_empty() {
                return Err(anyhow::anyhow!("{} cannot be empty", name));
            }
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(anyhow::anyhow!("temperature must be between 0.0 and 2.0"));
        }

        if !(0.0..=1.0).contains(&self.top_p) {
            return Err(anyhow::anyhow!("top_p must be between 0.0 and 1.0"));
        }

        if !IMAGE_ASPECT_RATIOS.iter().any(|(id, _)| *id == self.aspect_ratio) {
            return Err(anyhow::anyhow!(
                "aspect_ratio must be one of: {}",
                IMAGE_ASPECT_RATIOS
                    .iter()
                    .map(|(id, _)| *id)
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
        }

        if !VOICE_OPTIONS
            .iter()
            .any(|(id, _)| id.eq_ignore_ascii_case(&self.voice))
        {
            return Err(anyhow::anyhow!(
                "voice must be one of: {}",
                VOICE_OPTIONS
                    .iter()
                    .map(|(id, _)| *id)
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
        }

        if self.speech_sample_rate == 0 {
            return Err(anyhow::anyhow!("speech_sample_rate must be positive"));
        }

        Ok(())
    }
}
