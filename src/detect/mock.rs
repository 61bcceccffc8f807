//! Deterministic fixture backend.
//!
//! Stands in for a real detection library in tests and demos: returns a
//! canned set of detections filtered by the confidence threshold, and
//! fakes training/export through real filesystem side effects so callers
//! can verify paths.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, ensure};
use image::DynamicImage;

use super::{
    BoundingBox, Detection, Detector, Device, ExportFormat, PredictOptions, TrainMetrics,
    TrainSpec, ValMetrics,
};

#[derive(Debug, Clone)]
pub struct MockDetector {
    weights: Option<PathBuf>,
    canned: Vec<Detection>,
}

impl MockDetector {
    pub fn new() -> Self {
        Self {
            weights: None,
            canned: vec![
                Detection {
                    class_id: 0,
                    class_name: "fish".to_string(),
                    confidence: 0.91,
                    bbox: BoundingBox { x1: 10.0, y1: 20.0, x2: 110.0, y2: 90.0 },
                },
                Detection {
                    class_id: 2,
                    class_name: "turtle".to_string(),
                    confidence: 0.40,
                    bbox: BoundingBox { x1: 200.0, y1: 40.0, x2: 320.0, y2: 160.0 },
                },
            ],
        }
    }

    /// Replace the canned detections returned by `predict`.
    pub fn with_detections(mut self, detections: Vec<Detection>) -> Self {
        self.canned = detections;
        self
    }
}

impl Default for MockDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for MockDetector {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn load(&mut self, weights: &Path) -> Result<()> {
        ensure!(weights.is_file(), "weights file not found: {}", weights.display());
        self.weights = Some(weights.to_path_buf());
        Ok(())
    }

    fn is_loaded(&self) -> bool {
        self.weights.is_some()
    }

    fn predict(&self, _image: &DynamicImage, opts: &PredictOptions) -> Result<Vec<Detection>> {
        ensure!(self.is_loaded(), "no weights loaded");
        Ok(self
            .canned
            .iter()
            .filter(|d| d.confidence >= opts.confidence)
            .cloned()
            .collect())
    }

    fn train(&mut self, spec: &TrainSpec, _device: Device) -> Result<TrainMetrics> {
        ensure!(
            spec.data_config.is_file(),
            "dataset config not found: {}",
            spec.data_config.display()
        );
        let weights_dir = spec.output_dir.join(&spec.project_name).join("weights");
        fs::create_dir_all(&weights_dir)
            .with_context(|| format!("failed to create {}", weights_dir.display()))?;
        let weights_path = weights_dir.join("best.pt");
        fs::write(&weights_path, b"mock-weights")
            .with_context(|| format!("failed to write {}", weights_path.display()))?;
        self.weights = Some(weights_path.clone());
        Ok(TrainMetrics { final_map: 0.5, weights_path })
    }

    fn validate(&self, weights: &Path, data_config: &Path) -> Result<ValMetrics> {
        ensure!(weights.is_file(), "weights file not found: {}", weights.display());
        ensure!(
            data_config.is_file(),
            "dataset config not found: {}",
            data_config.display()
        );
        Ok(ValMetrics { map50: 0.8, map50_95: 0.5, precision: 0.75, recall: 0.7 })
    }

    fn export(&self, weights: &Path, format: ExportFormat) -> Result<PathBuf> {
        ensure!(weights.is_file(), "weights file not found: {}", weights.display());
        let out = weights.with_extension(format.extension());
        fs::copy(weights, &out)
            .with_context(|| format!("failed to write {}", out.display()))?;
        Ok(out)
    }
}
