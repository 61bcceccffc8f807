//! Inference front-end over a [`Detector`] backend.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result, ensure};

use crate::config::DetectConfig;
use crate::core::db::{AppDb, InferenceLogRepository, NewInferenceLog, User};

use super::{Detection, Detector, Device, PredictOptions};

/// Result of one prediction call.
#[derive(Debug, Clone)]
pub struct PredictionReport {
    pub detections: Vec<Detection>,
    pub inference_time: Duration,
}

/// Handle owning the currently-loaded model and its inference parameters.
///
/// There is exactly one writer per engine: load_model and set_parameters
/// take `&mut self`, and the engine is handed to whichever component runs
/// inference rather than living in process-wide state.
pub struct InferenceEngine<D: Detector> {
    detector: D,
    db: AppDb,
    current_weights: Option<PathBuf>,
    confidence: f32,
    iou: f32,
    device: Device,
}

impl<D: Detector> InferenceEngine<D> {
    pub fn new(detector: D, db: AppDb, config: &DetectConfig, device: Device) -> Self {
        Self {
            detector,
            db,
            current_weights: None,
            confidence: config.conf_threshold,
            iou: config.iou_threshold,
            device,
        }
    }

    pub fn current_weights(&self) -> Option<&Path> {
        self.current_weights.as_deref()
    }

    pub fn is_loaded(&self) -> bool {
        self.detector.is_loaded()
    }

    /// Validate the weights path and delegate loading to the backend.
    pub fn load_model(&mut self, weights: &Path) -> Result<()> {
        ensure!(!weights.as_os_str().is_empty(), "model path is empty");
        ensure!(weights.is_file(), "model file not found: {}", weights.display());
        let known_ext = weights
            .extension()
            .map(|e| {
                let e = e.to_string_lossy().to_lowercase();
                matches!(e.as_str(), "pt" | "pth" | "onnx")
            })
            .unwrap_or(false);
        if !known_ext {
            log::warn!("unusual model file extension: {}", weights.display());
        }

        log::info!(
            "loading model {} on {} via {}",
            weights.display(),
            self.device.as_str(),
            self.detector.name()
        );
        self.detector
            .load(weights)
            .with_context(|| format!("failed to load model {}", weights.display()))?;
        self.current_weights = Some(weights.to_path_buf());
        log::info!("model loaded: {}", weights.display());
        Ok(())
    }

    /// Adjust inference thresholds; `None` keeps the current value.
    pub fn set_parameters(&mut self, confidence: Option<f32>, iou: Option<f32>) {
        if let Some(conf) = confidence {
            self.confidence = conf;
        }
        if let Some(iou) = iou {
            self.iou = iou;
        }
    }

    /// Run inference on one image file and record an inference-log row.
    pub async fn predict_image(
        &self,
        user: Option<&User>,
        image_path: &Path,
    ) -> Result<PredictionReport> {
        ensure!(self.detector.is_loaded(), "model not loaded");

        let img = image::open(image_path)
            .with_context(|| format!("failed to open image {}", image_path.display()))?;

        let opts = PredictOptions {
            confidence: self.confidence,
            iou: self.iou,
            device: self.device,
        };
        let start = Instant::now();
        let detections = self.detector.predict(&img, &opts)?;
        let inference_time = start.elapsed();

        let model_name = self
            .current_weights
            .as_deref()
            .and_then(|p| p.file_stem())
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.detector.name().to_string());
        let log_entry = NewInferenceLog {
            user_id: user.map(|u| u.id),
            model_name,
            source_type: "image".to_string(),
            source_path: image_path.display().to_string(),
            detections: detections.len() as i64,
            inference_time: inference_time.as_secs_f64(),
        };
        // A failed log write must not fail the prediction itself.
        if let Err(e) = self.db.record_inference(&log_entry).await {
            log::error!("failed to record inference log: {e:#}");
        }

        log::info!(
            "inference on {}: {} detection(s) in {:.3}s",
            image_path.display(),
            detections.len(),
            inference_time.as_secs_f64()
        );
        Ok(PredictionReport { detections, inference_time })
    }
}
