//! Label-preserving dataset augmentation.
//!
//! The orchestrator walks a directory of images with matching label files,
//! applies the selected transforms to each pair, and writes the results
//! under deterministic names. Geometric transforms remap the label
//! coordinates through [`coords`]; photometric transforms copy the labels
//! through unchanged.

pub mod coords;
pub mod image_ops;
pub mod labels;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::thread::JoinHandle;

use anyhow::{Context, Result};
use image::DynamicImage;

use labels::{parse_annotations, serialize_annotations};

/// The fixed set of supported transforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformKind {
    HorizontalFlip,
    VerticalFlip,
    Rotate90,
    Rotate180,
    GaussianNoise,
    Brightness,
    Contrast,
    GaussianBlur,
}

impl TransformKind {
    /// All transforms in their canonical application order.
    pub const ALL: [TransformKind; 8] = [
        TransformKind::HorizontalFlip,
        TransformKind::VerticalFlip,
        TransformKind::Rotate90,
        TransformKind::Rotate180,
        TransformKind::GaussianNoise,
        TransformKind::Brightness,
        TransformKind::Contrast,
        TransformKind::GaussianBlur,
    ];

    /// Stable name, used in output filenames.
    pub fn name(self) -> &'static str {
        match self {
            TransformKind::HorizontalFlip => "horizontal_flip",
            TransformKind::VerticalFlip => "vertical_flip",
            TransformKind::Rotate90 => "rotate_90",
            TransformKind::Rotate180 => "rotate_180",
            TransformKind::GaussianNoise => "gaussian_noise",
            TransformKind::Brightness => "brightness",
            TransformKind::Contrast => "contrast",
            TransformKind::GaussianBlur => "gaussian_blur",
        }
    }

    pub fn from_name(name: &str) -> Option<TransformKind> {
        TransformKind::ALL.into_iter().find(|k| k.name() == name)
    }

    /// Geometric transforms change spatial layout and therefore require the
    /// label coordinates to be recomputed.
    pub fn is_geometric(self) -> bool {
        matches!(
            self,
            TransformKind::HorizontalFlip
                | TransformKind::VerticalFlip
                | TransformKind::Rotate90
                | TransformKind::Rotate180
        )
    }
}

/// Which transforms a batch should apply. One explicit flag per transform;
/// iteration follows [`TransformKind::ALL`] so runs are deterministic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformPlan {
    pub horizontal_flip: bool,
    pub vertical_flip: bool,
    pub rotate_90: bool,
    pub rotate_180: bool,
    pub gaussian_noise: bool,
    pub brightness: bool,
    pub contrast: bool,
    pub gaussian_blur: bool,
}

impl TransformPlan {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with(mut self, kind: TransformKind) -> Self {
        match kind {
            TransformKind::HorizontalFlip => self.horizontal_flip = true,
            TransformKind::VerticalFlip => self.vertical_flip = true,
            TransformKind::Rotate90 => self.rotate_90 = true,
            TransformKind::Rotate180 => self.rotate_180 = true,
            TransformKind::GaussianNoise => self.gaussian_noise = true,
            TransformKind::Brightness => self.brightness = true,
            TransformKind::Contrast => self.contrast = true,
            TransformKind::GaussianBlur => self.gaussian_blur = true,
        }
        self
    }

    pub fn is_enabled(&self, kind: TransformKind) -> bool {
        match kind {
            TransformKind::HorizontalFlip => self.horizontal_flip,
            TransformKind::VerticalFlip => self.vertical_flip,
            TransformKind::Rotate90 => self.rotate_90,
            TransformKind::Rotate180 => self.rotate_180,
            TransformKind::GaussianNoise => self.gaussian_noise,
            TransformKind::Brightness => self.brightness,
            TransformKind::Contrast => self.contrast,
            TransformKind::GaussianBlur => self.gaussian_blur,
        }
    }

    pub fn enabled(&self) -> impl Iterator<Item = TransformKind> + '_ {
        TransformKind::ALL.into_iter().filter(|k| self.is_enabled(*k))
    }

    pub fn is_empty(&self) -> bool {
        self.enabled().next().is_none()
    }
}

/// Aggregate outcome of one batch run.
///
/// For uncancelled runs `success + failed` equals the number of discovered
/// candidate images.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub success: usize,
    pub failed: usize,
    pub errors: Vec<String>,
}

/// Cooperative cancellation flag, checked once between images.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Events emitted by a batch running on a worker thread.
#[derive(Debug, Clone)]
pub enum BatchEvent {
    Progress {
        current: usize,
        total: usize,
        message: String,
    },
    Finished(BatchReport),
    Failed(String),
}

const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "bmp"];

/// One augmentation batch over an image/label directory pair.
///
/// Processing is strictly sequential: one image at a time, one transform at
/// a time within an image. The progress callback is invoked exactly once
/// per discovered image, always from the executing context.
#[derive(Debug, Clone)]
pub struct AugmentBatch {
    image_dir: PathBuf,
    label_dir: PathBuf,
    output_image_dir: PathBuf,
    output_label_dir: PathBuf,
    plan: TransformPlan,
}

impl AugmentBatch {
    pub fn new(
        image_dir: impl Into<PathBuf>,
        label_dir: impl Into<PathBuf>,
        output_image_dir: impl Into<PathBuf>,
        output_label_dir: impl Into<PathBuf>,
        plan: TransformPlan,
    ) -> Self {
        Self {
            image_dir: image_dir.into(),
            label_dir: label_dir.into(),
            output_image_dir: output_image_dir.into(),
            output_label_dir: output_label_dir.into(),
            plan,
        }
    }

    /// Run the batch to completion without progress reporting.
    pub fn run(&self) -> Result<BatchReport> {
        self.run_with(None, None)
    }

    /// Run the batch, invoking `progress(current, total, message)` once per
    /// discovered image.
    pub fn run_with_progress<F>(&self, mut progress: F) -> Result<BatchReport>
    where
        F: FnMut(usize, usize, &str),
    {
        self.run_with(Some(&mut progress), None)
    }

    /// Run the batch with optional progress reporting and cancellation.
    ///
    /// Per-item and per-transform failures are collected into the report;
    /// the only error this returns is a failure to create the output
    /// directories, since no progress is possible without them.
    pub fn run_with(
        &self,
        mut progress: Option<&mut dyn FnMut(usize, usize, &str)>,
        cancel: Option<&CancelToken>,
    ) -> Result<BatchReport> {
        fs::create_dir_all(&self.output_image_dir).with_context(|| {
            format!(
                "failed to create output image directory {}",
                self.output_image_dir.display()
            )
        })?;
        fs::create_dir_all(&self.output_label_dir).with_context(|| {
            format!(
                "failed to create output label directory {}",
                self.output_label_dir.display()
            )
        })?;

        let image_files = self.discover_images()?;
        if image_files.is_empty() {
            log::error!("image folder is empty: {}", self.image_dir.display());
            return Ok(BatchReport {
                success: 0,
                failed: 0,
                errors: vec!["image folder is empty".to_string()],
            });
        }

        let total = image_files.len();
        let mut report = BatchReport::default();

        for (idx, file_name) in image_files.iter().enumerate() {
            let idx = idx + 1;

            if let Some(token) = cancel {
                if token.is_cancelled() {
                    let msg = format!("batch cancelled after {} of {} images", idx - 1, total);
                    log::warn!("{msg}");
                    report.errors.push(msg);
                    break;
                }
            }

            let img_path = self.image_dir.join(file_name);
            let stem = Path::new(file_name)
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| file_name.clone());
            let suffix = Path::new(file_name)
                .extension()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            let label_path = self.label_dir.join(format!("{stem}.txt"));

            if !label_path.is_file() {
                let msg = format!("label file not found: {}", label_path.display());
                log::warn!("{msg}");
                report.errors.push(msg.clone());
                report.failed += 1;
                if let Some(cb) = progress.as_mut() {
                    cb(idx, total, &msg);
                }
                continue;
            }

            let loaded = image::open(&img_path)
                .map_err(anyhow::Error::from)
                .and_then(|img| {
                    let content = fs::read_to_string(&label_path)?;
                    Ok((img, content))
                });
            let (img, label_content) = match loaded {
                Ok(pair) => pair,
                Err(e) => {
                    let msg = format!("failed to read {file_name}: {e}");
                    log::error!("{msg}");
                    report.errors.push(msg.clone());
                    report.failed += 1;
                    if let Some(cb) = progress.as_mut() {
                        cb(idx, total, &msg);
                    }
                    continue;
                }
            };

            let mut applied = 0usize;
            for kind in self.plan.enabled() {
                match self.apply_one(&img, &label_content, &stem, &suffix, kind) {
                    Ok(()) => applied += 1,
                    Err(e) => {
                        let msg =
                            format!("transform {} failed for {file_name}: {e:#}", kind.name());
                        log::error!("{msg}");
                        report.errors.push(msg);
                    }
                }
            }

            let msg = if applied > 0 {
                report.success += 1;
                format!("applied {applied} transform(s) to {file_name}")
            } else {
                report.failed += 1;
                format!("no transforms applied to {file_name}")
            };
            log::info!("{msg}");
            if let Some(cb) = progress.as_mut() {
                cb(idx, total, &msg);
            }
        }

        log::info!(
            "augmentation finished: {} succeeded, {} failed",
            report.success,
            report.failed
        );
        Ok(report)
    }

    /// Run the batch on a dedicated worker thread.
    ///
    /// Progress and the final report arrive over the returned channel; the
    /// token cancels cooperatively between images. The channel is the only
    /// cross-thread communication point.
    pub fn spawn(self) -> (JoinHandle<()>, Receiver<BatchEvent>, CancelToken) {
        let (sender, receiver) = mpsc::channel();
        let token = CancelToken::new();
        let worker_token = token.clone();
        let handle = std::thread::spawn(move || {
            let progress_sender = sender.clone();
            let mut forward = |current: usize, total: usize, message: &str| {
                // The receiver may have gone away; the batch still runs to
                // completion.
                let _ = progress_sender.send(BatchEvent::Progress {
                    current,
                    total,
                    message: message.to_string(),
                });
            };
            let result = self.run_with(Some(&mut forward), Some(&worker_token));
            let _ = match result {
                Ok(report) => sender.send(BatchEvent::Finished(report)),
                Err(e) => sender.send(BatchEvent::Failed(format!("{e:#}"))),
            };
        });
        (handle, receiver, token)
    }

    /// List candidate image filenames in natural order.
    fn discover_images(&self) -> Result<Vec<String>> {
        let entries = fs::read_dir(&self.image_dir).with_context(|| {
            format!("failed to list image directory {}", self.image_dir.display())
        })?;
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            let matches = Path::new(&name)
                .extension()
                .map(|ext| {
                    let ext = ext.to_string_lossy().to_lowercase();
                    IMAGE_EXTENSIONS.contains(&ext.as_str())
                })
                .unwrap_or(false);
            if matches {
                names.push(name);
            }
        }
        names.sort_by_cached_key(|name| natural_key(name));
        Ok(names)
    }

    fn apply_one(
        &self,
        img: &DynamicImage,
        label_content: &str,
        stem: &str,
        suffix: &str,
        kind: TransformKind,
    ) -> Result<()> {
        let augmented = image_ops::apply(img, kind);

        let label_out = if kind.is_geometric() {
            let remapped: Vec<_> = parse_annotations(label_content)
                .iter()
                .map(|ann| coords::remap(ann, kind))
                .collect();
            serialize_annotations(&remapped)
        } else {
            // Photometric transforms leave the labels byte-for-byte intact.
            label_content.to_string()
        };

        let img_name = if suffix.is_empty() {
            format!("{stem}_{}", kind.name())
        } else {
            format!("{stem}_{}.{suffix}", kind.name())
        };
        let img_out_path = self.output_image_dir.join(img_name);
        augmented
            .save(&img_out_path)
            .with_context(|| format!("failed to write image {}", img_out_path.display()))?;

        let label_out_path = self
            .output_label_dir
            .join(format!("{stem}_{}.txt", kind.name()));
        fs::write(&label_out_path, label_out)
            .with_context(|| format!("failed to write label {}", label_out_path.display()))?;
        Ok(())
    }
}

/// Sort key that compares embedded digit runs numerically, so
/// `image_2.jpg` orders before `image_10.jpg`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum NatSegment {
    Num(u128),
    Text(String),
}

fn natural_key(name: &str) -> Vec<NatSegment> {
    let mut segments = Vec::new();
    let mut run = String::new();
    let mut run_is_digit = false;

    let mut flush = |run: &mut String, is_digit: bool, segments: &mut Vec<NatSegment>| {
        if run.is_empty() {
            return;
        }
        let segment = if is_digit {
            // Digit runs too long for u128 fall back to text comparison.
            run.parse::<u128>()
                .map(NatSegment::Num)
                .unwrap_or_else(|_| NatSegment::Text(run.clone()))
        } else {
            NatSegment::Text(run.to_lowercase())
        };
        segments.push(segment);
        run.clear();
    };

    for ch in name.chars() {
        let is_digit = ch.is_ascii_digit();
        if is_digit != run_is_digit {
            flush(&mut run, run_is_digit, &mut segments);
            run_is_digit = is_digit;
        }
        run.push(ch);
    }
    flush(&mut run, run_is_digit, &mut segments);
    segments
}
