//! Application configuration.
//!
//! Loaded from a TOML file when one is given; every section has defaults so
//! a missing file or missing keys still yield a runnable configuration.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::db::Role;
use crate::detect::Device;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub paths: PathsConfig,
    pub database: DatabaseConfig,
    pub detect: DetectConfig,
    pub training: TrainingConfig,
    pub system: SystemConfig,
    pub default_users: Vec<DefaultUser>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PathsConfig {
    pub data_dir: PathBuf,
    pub models_dir: PathBuf,
    pub uploads_dir: PathBuf,
    pub results_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            models_dir: PathBuf::from("models"),
            uploads_dir: PathBuf::from("uploads"),
            results_dir: PathBuf::from("results"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/aquadetect.db"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DetectConfig {
    pub default_model: String,
    pub img_size: u32,
    pub conf_threshold: f32,
    pub iou_threshold: f32,
    pub max_detections: u32,
    pub classes: Vec<String>,
}

impl Default for DetectConfig {
    fn default() -> Self {
        Self {
            default_model: "aquadetect_base.pt".to_string(),
            img_size: 640,
            conf_threshold: 0.25,
            iou_threshold: 0.45,
            max_detections: 1000,
            classes: [
                "fish",
                "coral",
                "turtle",
                "shark",
                "jellyfish",
                "dolphin",
                "submarine",
                "diver",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub epochs: u32,
    pub batch_size: u32,
    pub img_size: u32,
    pub learning_rate: f64,
    pub workers: u32,
    pub patience: u32,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            epochs: 100,
            batch_size: 16,
            img_size: 640,
            learning_rate: 0.01,
            workers: 4,
            patience: 50,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SystemConfig {
    pub device: Device,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            device: Device::Cpu,
        }
    }
}

/// Account created on first run when the users table is empty.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DefaultUser {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
    pub role: Role,
}

impl AppConfig {
    /// Parse a TOML configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
        let raw = fs::read_to_string(path.as_ref()).with_context(|| {
            format!("failed to read config file {}", path.as_ref().display())
        })?;
        toml::from_str(&raw).with_context(|| {
            format!("failed to parse config file {}", path.as_ref().display())
        })
    }

    /// Load `path` if it exists, defaults otherwise.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
        if path.as_ref().is_file() {
            Self::load(path)
        } else {
            Ok(Self::with_default_users())
        }
    }

    /// Defaults plus the two stock accounts of a fresh install.
    pub fn with_default_users() -> AppConfig {
        AppConfig {
            default_users: vec![
                DefaultUser {
                    username: "admin".to_string(),
                    password: "admin123".to_string(),
                    email: Some("admin@aquadetect.local".to_string()),
                    role: Role::Admin,
                },
                DefaultUser {
                    username: "user".to_string(),
                    password: "user123".to_string(),
                    email: Some("user@aquadetect.local".to_string()),
                    role: Role::User,
                },
            ],
            ..AppConfig::default()
        }
    }

    /// Create every configured directory, parents included.
    pub fn ensure_dirs(&self) -> Result<()> {
        for dir in [
            &self.paths.data_dir,
            &self.paths.models_dir,
            &self.paths.uploads_dir,
            &self.paths.results_dir,
        ] {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create directory {}", dir.display()))?;
        }
        Ok(())
    }
}
