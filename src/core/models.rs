use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use log::info;
use serde::Serialize;
use time::format_description::well_known::Rfc3339;

use crate::core::db::{AppDb, ModelRecord, ModelRepository, NewModelRecord};

/// Manages the weights files under the models directory together with
/// their catalogue rows.
#[derive(Debug, Clone)]
pub struct ModelStore {
    db: AppDb,
    models_dir: PathBuf,
}

#[derive(Debug, Serialize)]
struct ModelInfo<'a> {
    name: &'a str,
    version: &'a str,
    file_path: &'a Path,
    classes: &'a [String],
    description: Option<&'a str>,
    author: Option<&'a str>,
    created_at: String,
}

impl ModelStore {
    pub fn new<P: AsRef<Path>>(db: AppDb, models_dir: P) -> Self {
        Self {
            db,
            models_dir: models_dir.as_ref().to_path_buf(),
        }
    }

    /// Copy a weights file into the models directory and register it.
    /// The managed copy is named `{name}_v{version}.{ext}`.
    pub async fn add_model(
        &self,
        source: &Path,
        name: &str,
        version: &str,
        classes: Vec<String>,
        description: Option<String>,
        author: Option<String>,
    ) -> anyhow::Result<ModelRecord> {
        if !source.is_file() {
            anyhow::bail!("Weights file not found: {}", source.display());
        }
        if self.db.get_model_by_name(name, Some(version)).await?.is_some() {
            anyhow::bail!("Model {name} v{version} is already registered");
        }
        let ext = source
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("pt");
        fs::create_dir_all(&self.models_dir).with_context(|| {
            format!("Failed to create models directory {}", self.models_dir.display())
        })?;
        let dest = self.models_dir.join(format!("{name}_v{version}.{ext}"));
        fs::copy(source, &dest).with_context(|| {
            format!("Failed to copy {} to {}", source.display(), dest.display())
        })?;

        let record = self
            .db
            .add_model_record(&NewModelRecord {
                name: name.to_string(),
                version: version.to_string(),
                file_path: dest.clone(),
                classes,
                description,
                author,
            })
            .await;
        match record {
            Ok(record) => {
                info!("registered model {name} v{version} at {}", dest.display());
                Ok(record)
            }
            Err(e) => {
                // Keep the directory consistent with the catalogue.
                let _ = fs::remove_file(&dest);
                Err(e)
            }
        }
    }

    pub async fn list_models(&self) -> anyhow::Result<Vec<ModelRecord>> {
        self.db.get_models().await
    }

    pub async fn find_model(
        &self,
        name: &str,
        version: Option<&str>,
    ) -> anyhow::Result<Option<ModelRecord>> {
        self.db.get_model_by_name(name, version).await
    }

    pub async fn search(&self, keyword: &str) -> anyhow::Result<Vec<ModelRecord>> {
        self.db.search_models(keyword).await
    }

    /// Remove the catalogue row, and the managed weights file when
    /// `delete_file` is set.
    pub async fn delete_model(
        &self,
        record: ModelRecord,
        delete_file: bool,
    ) -> anyhow::Result<()> {
        let file_path = record.file_path.clone();
        let label = format!("{} v{}", record.name, record.version);
        self.db.delete_model_record(record).await?;
        if delete_file && file_path.is_file() {
            fs::remove_file(&file_path).with_context(|| {
                format!("Failed to delete weights file {}", file_path.display())
            })?;
        }
        info!("deleted model {label}");
        Ok(())
    }

    /// Write the model's metadata as pretty JSON.
    pub fn export_model_info(&self, record: &ModelRecord, dest: &Path) -> anyhow::Result<()> {
        let info = ModelInfo {
            name: &record.name,
            version: &record.version,
            file_path: &record.file_path,
            classes: &record.classes,
            description: record.description.as_deref(),
            author: record.author.as_deref(),
            created_at: record.created_at.format(&Rfc3339)?,
        };
        let json = serde_json::to_string_pretty(&info)?;
        fs::write(dest, json)
            .with_context(|| format!("Failed to write model info to {}", dest.display()))?;
        Ok(())
    }
}
