//! Training, validation and export around a [`Detector`] backend, with
//! run bookkeeping in the training log table.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::config::TrainingConfig;
use crate::core::db::{
    AppDb, NewTrainingLog, TrainingLogRepository, TrainingStatus, User,
};

use super::{Detector, Device, ExportFormat, TrainMetrics, TrainSpec, ValMetrics};

/// One training request; `None` fields fall back to the configured
/// defaults.
#[derive(Debug, Clone)]
pub struct TrainRequest<'a> {
    pub data_config: PathBuf,
    pub project_name: String,
    pub epochs: Option<u32>,
    pub batch_size: Option<u32>,
    pub img_size: Option<u32>,
    pub learning_rate: Option<f64>,
    pub user: Option<&'a User>,
}

pub struct TrainingRunner<D: Detector> {
    detector: D,
    db: AppDb,
    defaults: TrainingConfig,
    device: Device,
    output_dir: PathBuf,
}

impl<D: Detector> TrainingRunner<D> {
    pub fn new(
        detector: D,
        db: AppDb,
        defaults: TrainingConfig,
        device: Device,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            detector,
            db,
            defaults,
            device,
            output_dir: output_dir.into(),
        }
    }

    /// Run one training job to completion.
    ///
    /// The detector call itself is blocking; callers run this future on a
    /// context that may block (a dedicated worker task or thread). The run
    /// is bracketed by a training-log row that ends up `completed` or
    /// `failed`.
    pub async fn run(&mut self, request: &TrainRequest<'_>) -> Result<TrainMetrics> {
        let spec = TrainSpec {
            data_config: request.data_config.clone(),
            epochs: request.epochs.unwrap_or(self.defaults.epochs),
            batch_size: request.batch_size.unwrap_or(self.defaults.batch_size),
            img_size: request.img_size.unwrap_or(self.defaults.img_size),
            learning_rate: request.learning_rate.unwrap_or(self.defaults.learning_rate),
            patience: self.defaults.patience,
            project_name: request.project_name.clone(),
            output_dir: self.output_dir.clone(),
        };

        let log_id = self
            .db
            .start_training_log(&NewTrainingLog {
                user_id: request.user.map(|u| u.id),
                model_name: spec.project_name.clone(),
                dataset_path: spec.data_config.display().to_string(),
                epochs: spec.epochs as i64,
                batch_size: spec.batch_size as i64,
            })
            .await?;

        log::info!(
            "training {} for {} epoch(s), batch {}",
            spec.project_name,
            spec.epochs,
            spec.batch_size
        );
        match self.detector.train(&spec, self.device) {
            Ok(metrics) => {
                self.db
                    .finish_training_log(log_id, TrainingStatus::Completed, Some(metrics.final_map))
                    .await?;
                log::info!(
                    "training {} completed, mAP {:.4}",
                    spec.project_name,
                    metrics.final_map
                );
                Ok(metrics)
            }
            Err(e) => {
                log::error!("training {} failed: {e:#}", spec.project_name);
                if let Err(db_err) = self
                    .db
                    .finish_training_log(log_id, TrainingStatus::Failed, None)
                    .await
                {
                    log::error!("failed to mark training log failed: {db_err:#}");
                }
                Err(e)
            }
        }
    }

    /// Evaluate weights against a dataset.
    pub fn validate(&self, weights: &Path, data_config: &Path) -> Result<ValMetrics> {
        let metrics = self.detector.validate(weights, data_config)?;
        log::info!(
            "validation of {}: mAP50 {:.4}, mAP50-95 {:.4}",
            weights.display(),
            metrics.map50,
            metrics.map50_95
        );
        Ok(metrics)
    }

    /// Export weights to another format, returning the produced path.
    pub fn export(&self, weights: &Path, format: ExportFormat) -> Result<PathBuf> {
        let out = self.detector.export(weights, format)?;
        log::info!("exported {} as {}", weights.display(), out.display());
        Ok(out)
    }
}
