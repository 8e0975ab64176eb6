use crate::error::{AdvisoryError, Result};
use dialoguer::{Input, Password};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub data: DataConfig,
    #[serde(default)]
    pub climate: ClimateConfig,
    pub geocoding: Option<GeocodingConfig>,
}

/// Paths to the two frozen startup artifacts. Both must load successfully
/// before the service accepts requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataConfig {
    pub dataset_path: PathBuf,
    pub model_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClimateConfig {
    /// Reference timezone anchoring month boundaries in the archive data.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default = "default_climate_timeout")]
    pub timeout_secs: u64,
}

fn default_timezone() -> String {
    "Africa/Nairobi".to_string()
}

fn default_climate_timeout() -> u64 {
    10
}

impl Default for ClimateConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            timeout_secs: default_climate_timeout(),
        }
    }
}

#[derive(Clone, Deserialize, Serialize)]
pub struct GeocodingConfig {
    pub api_key: String,
    #[serde(default = "default_geocoding_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_geocoding_timeout() -> u64 {
    5
}

fn default_enabled() -> bool {
    true
}

impl std::fmt::Debug for GeocodingConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeocodingConfig")
            .field("api_key", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .field("enabled", &self.enabled)
            .finish()
    }
}

impl Config {
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p,
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            return Err(AdvisoryError::Config(format!(
                "Config file not found at {:?}. Run `agroadvisor init` to set up.",
                config_path
            )));
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| AdvisoryError::Config(format!("Failed to read config: {}", e)))?;

        // Substitute environment variables
        let config_str = Self::substitute_env_vars(&config_str);

        let config: Config = serde_yaml::from_str(&config_str)
            .map_err(|e| AdvisoryError::Config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        // Try current directory first
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        // Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("agroadvisor").join("config.yaml");
            if xdg_config.exists() {
                return Ok(xdg_config);
            }
        }

        // Return XDG path as the default (will trigger "not found" in load)
        let default_path = dirs::config_dir()
            .ok_or_else(|| AdvisoryError::Config("Cannot determine config directory".into()))?
            .join("agroadvisor")
            .join("config.yaml");
        Ok(default_path)
    }

    /// Default path for writing new config files (~/.config/agroadvisor/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| AdvisoryError::Config("Cannot determine config directory".into()))?
            .join("agroadvisor");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    /// Returns the loaded Config and the path it was written to.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("No configuration found. Let's set up AgroAdvisor!");
        println!();

        // --- Reference data ---
        println!("Reference data");
        let dataset_path: String = Input::new()
            .with_prompt("  Historical dataset CSV")
            .default("data/crop_recommendation.csv".into())
            .interact_text()
            .map_err(|e| AdvisoryError::Config(format!("Input error: {}", e)))?;

        let model_path: String = Input::new()
            .with_prompt("  Classifier artifact JSON")
            .default("data/crop_model.json".into())
            .interact_text()
            .map_err(|e| AdvisoryError::Config(format!("Input error: {}", e)))?;

        println!();

        // --- Climate archive ---
        println!("Climate archive");
        let timezone: String = Input::new()
            .with_prompt("  Reference timezone")
            .default(default_timezone())
            .interact_text()
            .map_err(|e| AdvisoryError::Config(format!("Input error: {}", e)))?;

        println!();

        // --- OpenWeatherMap geocoding (optional) ---
        println!("OpenWeatherMap geocoding (leave API key blank to skip)");
        let owm_api_key: String = Password::new()
            .with_prompt("  API key")
            .allow_empty_password(true)
            .interact()
            .map_err(|e| AdvisoryError::Config(format!("Input error: {}", e)))?;

        let geocoding = if owm_api_key.is_empty() {
            None
        } else {
            Some(GeocodingConfig {
                api_key: owm_api_key,
                timeout_secs: default_geocoding_timeout(),
                enabled: true,
            })
        };

        println!();

        let config = Config {
            data: DataConfig {
                dataset_path: PathBuf::from(dataset_path),
                model_path: PathBuf::from(model_path),
            },
            climate: ClimateConfig {
                timezone,
                timeout_secs: default_climate_timeout(),
            },
            geocoding,
        };

        // Write to default config path
        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| AdvisoryError::Config(format!("Failed to serialize config: {}", e)))?;

        // Write with a header comment
        let content = format!(
            "# AgroAdvisor Configuration\n# Generated by `agroadvisor init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        // Find all ${VAR_NAME} patterns and substitute
        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data: DataConfig {
                dataset_path: PathBuf::from("data/crop_recommendation.csv"),
                model_path: PathBuf::from("data/crop_model.json"),
            },
            climate: ClimateConfig::default(),
            geocoding: None,
        }
    }
}
