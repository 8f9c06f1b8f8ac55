use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub camera: CameraConfig,
    pub detection: DetectionConfig,
    pub stream: StreamConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub index: u32,
    /// Selfie-view correction; the frame is flipped horizontally before
    /// landmark extraction.
    pub mirror: bool,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    pub model_path: String,
    pub min_detection_confidence: f32,
    pub min_tracking_confidence: f32,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// Sleep between published records; bounds CPU usage and publish rate.
    pub publish_interval_ms: u64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            index: 0,
            mirror: true,
        }
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            model_path: "hand_landmark.onnx".to_string(),
            min_detection_confidence: 0.5,
            min_tracking_confidence: 0.5,
        }
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            publish_interval_ms: 50,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl AppConfig {
    const PATH: &'static str = "config.json";

    pub fn load() -> Result<Self> {
        let config = if Path::new(Self::PATH).exists() {
            let content = fs::read_to_string(Self::PATH)?;
            match serde_json::from_str::<AppConfig>(&content) {
                Ok(c) => {
                    log::info!("loaded configuration from {}", Self::PATH);
                    c
                }
                Err(e) => {
                    log::warn!("error parsing {}: {}. Using defaults.", Self::PATH, e);
                    Self::default()
                }
            }
        } else {
            log::info!("no {} found, creating defaults", Self::PATH);
            Self::default()
        };

        // Save back so newly added fields show up in the file
        config.save()?;

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(Self::PATH, content)?;
        Ok(())
    }
}
