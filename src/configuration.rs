use config::Config;
use serde::Deserialize;
use std::path::PathBuf;

const CONFIGURATION_FILE: &str = "configuration/base";

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Settings {
    #[serde(rename = "download")]
    pub download_cfg: DownloadSettings,
    #[serde(rename = "telemetry")]
    pub telemetry_cfg: TelemetrySettings,
}

impl Settings {
    /// Layers compiled defaults, an optional `configuration/base.yml` and
    /// `APP_`-prefixed environment variables, in that order.
    pub fn new() -> Result<Self, config::ConfigError> {
        Config::builder()
            .set_default("download.output_dir", ".")?
            .set_default("download.file_extension", "mp3")?
            .set_default("telemetry.log_filter", "warn")?
            .add_source(config::File::with_name(CONFIGURATION_FILE).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct DownloadSettings {
    pub output_dir: PathBuf,
    #[serde(deserialize_with = "extension_format::deserialize")]
    pub file_extension: String,
}

impl Default for DownloadSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            file_extension: "mp3".to_string(),
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct TelemetrySettings {
    pub log_filter: String,
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            log_filter: "warn".to_string(),
        }
    }
}

mod extension_format {
    use serde::{Deserialize, Deserializer, de::Error};

    // Accepts "mp3" as well as ".mp3".
    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let extension = s.trim().trim_start_matches('.');
        if extension.is_empty() || extension.contains(['/', '\\']) {
            return Err(D::Error::custom(format!("{:?} is not a valid file extension", s)));
        }
        Ok(extension.to_string())
    }
}
