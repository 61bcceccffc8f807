use clap::Parser;
use std::path::PathBuf;

use aquadetect::{AugmentBatch, TransformPlan};

#[derive(Parser)]
#[command(name = "aquadetect")]
#[command(about = "Augment an object detection dataset without breaking its labels")]
struct Cli {
    /// Directory containing the source images
    #[arg(long, value_name = "DIR")]
    images: PathBuf,

    /// Directory containing the matching label files
    #[arg(long, value_name = "DIR")]
    labels: PathBuf,

    /// Output directory for augmented images
    #[arg(long, value_name = "DIR")]
    out_images: PathBuf,

    /// Output directory for augmented label files
    #[arg(long, value_name = "DIR")]
    out_labels: PathBuf,

    /// Mirror left-right
    #[arg(long)]
    horizontal_flip: bool,

    /// Mirror top-bottom
    #[arg(long)]
    vertical_flip: bool,

    /// Rotate 90 degrees counter-clockwise
    #[arg(long)]
    rotate_90: bool,

    /// Rotate 180 degrees
    #[arg(long)]
    rotate_180: bool,

    /// Add gaussian pixel noise
    #[arg(long)]
    gaussian_noise: bool,

    /// Brighten the image
    #[arg(long)]
    brightness: bool,

    /// Increase contrast
    #[arg(long)]
    contrast: bool,

    /// Apply gaussian blur
    #[arg(long)]
    gaussian_blur: bool,

    /// Enable all transforms
    #[arg(long)]
    all: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn plan(&self) -> TransformPlan {
        if self.all {
            return TransformPlan {
                horizontal_flip: true,
                vertical_flip: true,
                rotate_90: true,
                rotate_180: true,
                gaussian_noise: true,
                brightness: true,
                contrast: true,
                gaussian_blur: true,
            };
        }
        TransformPlan {
            horizontal_flip: self.horizontal_flip,
            vertical_flip: self.vertical_flip,
            rotate_90: self.rotate_90,
            rotate_180: self.rotate_180,
            gaussian_noise: self.gaussian_noise,
            brightness: self.brightness,
            contrast: self.contrast,
            gaussian_blur: self.gaussian_blur,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Cli::parse();

    let plan = args.plan();
    if plan.is_empty() {
        anyhow::bail!("no transforms selected, pass --all or at least one transform flag");
    }

    if args.verbose {
        let enabled: Vec<_> = plan.enabled().map(|k| k.name()).collect();
        println!("Transforms: {}", enabled.join(", "));
        println!("Images: {:?}", args.images);
        println!("Labels: {:?}", args.labels);
    }

    let batch = AugmentBatch::new(
        args.images,
        args.labels,
        args.out_images,
        args.out_labels,
        plan,
    );
    let report = batch.run_with_progress(|current, total, message| {
        println!("[{current}/{total}] {message}");
    })?;

    println!("\n=== Augmentation Results ===");
    println!("Succeeded: {}", report.success);
    println!("Failed: {}", report.failed);
    if !report.errors.is_empty() {
        println!("\nErrors:");
        for error in &report.errors {
            println!("  {error}");
        }
    }

    Ok(())
}
