//! # Settings Repository
//!
//! Process-wide launch settings, kept in a single YAML file
//! `settings.yaml` next to the todo database.
//!
//! ## YAML Format
//!
//! ```yaml
//! has_launched_before: true
//! updated_at: "2025-05-08T12:00:00Z"
//! ```
//!
//! A missing or unreadable file means the app has never completed a sync.
//! File access goes through `tokio::fs` so the runtime's workers never block.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, info, warn};

use crate::storage::traits::LaunchSettings;

/// File name of the settings file inside the data directory
pub const SETTINGS_FILE: &str = "settings.yaml";

/// Contents of `settings.yaml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Set once the first remote sync has been persisted
    #[serde(default)]
    pub has_launched_before: bool,
    /// When the settings were last written
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// YAML-file backed launch settings
#[derive(Clone)]
pub struct SettingsRepository {
    data_dir: PathBuf,
}

impl SettingsRepository {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn settings_path(&self) -> PathBuf {
        self.data_dir.join(SETTINGS_FILE)
    }

    /// Load settings, falling back to defaults when the file is absent
    pub async fn load(&self) -> Result<AppSettings> {
        let path = self.settings_path();
        let yaml_content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No settings file at {:?}, using defaults", path);
                return Ok(AppSettings::default());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read settings file {:?}", path));
            }
        };

        let settings: AppSettings = serde_yaml::from_str(&yaml_content)
            .with_context(|| format!("Failed to parse settings file {:?}", path))?;
        Ok(settings)
    }

    /// Write settings with a temp file and rename
    pub async fn save(&self, settings: &AppSettings) -> Result<()> {
        if !fs::try_exists(&self.data_dir).await.unwrap_or(false) {
            fs::create_dir_all(&self.data_dir)
                .await
                .with_context(|| format!("Failed to create data directory {:?}", self.data_dir))?;
            info!("Created data directory: {:?}", self.data_dir);
        }

        let path = self.settings_path();
        let yaml_content = serde_yaml::to_string(settings)?;

        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, yaml_content).await?;
        fs::rename(&temp_path, &path).await?;

        debug!("Saved settings to {:?}", path);
        Ok(())
    }
}

#[async_trait]
impl LaunchSettings for SettingsRepository {
    async fn is_first_launch(&self) -> bool {
        match self.load().await {
            Ok(settings) => !settings.has_launched_before,
            Err(e) => {
                warn!("Treating launch as first launch: {:#}", e);
                true
            }
        }
    }

    async fn set_first_launch(&self, first_launch: bool) -> Result<()> {
        let settings = AppSettings {
            has_launched_before: !first_launch,
            updated_at: Some(Utc::now().to_rfc3339()),
        };
        self.save(&settings).await?;
        info!("Marked first launch as {}", first_launch);
        Ok(())
    }
}
