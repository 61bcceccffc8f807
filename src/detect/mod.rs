//! Detection-model collaborator.
//!
//! The model itself (architecture, training loop, inference kernels) lives
//! behind the [`Detector`] trait; this crate only manages loading,
//! parameters, delegation and logging around it.

pub mod engine;
pub mod mock;
pub mod training;

use std::path::{Path, PathBuf};

use anyhow::Result;
use image::DynamicImage;
use serde::{Deserialize, Serialize};

pub use engine::{InferenceEngine, PredictionReport};
pub use mock::MockDetector;
pub use training::{TrainRequest, TrainingRunner};

/// Compute device a backend should run on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    Cpu,
    Cuda,
}

impl Device {
    pub fn as_str(self) -> &'static str {
        match self {
            Device::Cpu => "cpu",
            Device::Cuda => "cuda",
        }
    }
}

/// Axis-aligned box in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

/// One detected object.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub class_id: usize,
    pub class_name: String,
    pub confidence: f32,
    pub bbox: BoundingBox,
}

#[derive(Debug, Clone, Copy)]
pub struct PredictOptions {
    pub confidence: f32,
    pub iou: f32,
    pub device: Device,
}

/// Fully-resolved parameters for one training run.
#[derive(Debug, Clone)]
pub struct TrainSpec {
    pub data_config: PathBuf,
    pub epochs: u32,
    pub batch_size: u32,
    pub img_size: u32,
    pub learning_rate: f64,
    pub patience: u32,
    pub project_name: String,
    pub output_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct TrainMetrics {
    pub final_map: f64,
    pub weights_path: PathBuf,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ValMetrics {
    pub map50: f64,
    pub map50_95: f64,
    pub precision: f64,
    pub recall: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Onnx,
    TorchScript,
}

impl ExportFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            ExportFormat::Onnx => "onnx",
            ExportFormat::TorchScript => "torchscript",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Onnx => "onnx",
            ExportFormat::TorchScript => "torchscript",
        }
    }
}

/// Backend seam for the pretrained detection-model library.
///
/// Implementations own their weights and internal state; callers hold one
/// backend per engine and never share it across threads without external
/// coordination.
pub trait Detector: Send {
    /// Backend identifier, used in logs.
    fn name(&self) -> &'static str;

    /// Load weights from disk, replacing any previously-loaded model.
    fn load(&mut self, weights: &Path) -> Result<()>;

    fn is_loaded(&self) -> bool;

    /// Run inference on one decoded image.
    fn predict(&self, image: &DynamicImage, opts: &PredictOptions) -> Result<Vec<Detection>>;

    /// Run one training job to completion. Blocking; callers are expected
    /// to invoke this from a dedicated worker context.
    fn train(&mut self, spec: &TrainSpec, device: Device) -> Result<TrainMetrics>;

    /// Evaluate the given weights against a dataset.
    fn validate(&self, weights: &Path, data_config: &Path) -> Result<ValMetrics>;

    /// Export weights to another serialization format, returning the
    /// produced path.
    fn export(&self, weights: &Path, format: ExportFormat) -> Result<PathBuf>;
}
