use std::fs;
use std::path::{Path, PathBuf};

use aquadetect::core::db::AppDb;
use image::{ImageBuffer, Rgb};
use tempfile::TempDir;

/// A dataset layout on disk: `images/` and `labels/` inputs plus empty
/// output directory paths. The temp dir must be kept alive.
pub struct TestDataset {
    pub dir: TempDir,
    pub image_dir: PathBuf,
    pub label_dir: PathBuf,
    pub out_image_dir: PathBuf,
    pub out_label_dir: PathBuf,
}

impl TestDataset {
    pub fn empty() -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let image_dir = dir.path().join("images");
        let label_dir = dir.path().join("labels");
        fs::create_dir_all(&image_dir).expect("Failed to create image dir");
        fs::create_dir_all(&label_dir).expect("Failed to create label dir");
        let out_image_dir = dir.path().join("out_images");
        let out_label_dir = dir.path().join("out_labels");
        Self {
            dir,
            image_dir,
            label_dir,
            out_image_dir,
            out_label_dir,
        }
    }

    /// Write a small solid-color image plus a centered box label for each
    /// given stem.
    pub fn with_pairs(stems: &[&str]) -> Self {
        let ds = Self::empty();
        for stem in stems {
            ds.add_image(stem);
            ds.add_label(stem, CENTER_BOX_LABEL);
        }
        ds
    }

    pub fn add_image(&self, stem: &str) {
        write_test_image(&self.image_dir.join(format!("{stem}.png")), 16, 16);
    }

    pub fn add_label(&self, stem: &str, content: &str) {
        fs::write(self.label_dir.join(format!("{stem}.txt")), content)
            .expect("Failed to write label file");
    }

    pub fn out_image(&self, name: &str) -> PathBuf {
        self.out_image_dir.join(name)
    }

    pub fn out_label(&self, name: &str) -> PathBuf {
        self.out_label_dir.join(name)
    }
}

/// One box centered in the image, class 0.
pub const CENTER_BOX_LABEL: &str = "0 0.500000 0.500000 0.200000 0.200000\n";

pub fn write_test_image(path: &Path, width: u32, height: u32) {
    let img = ImageBuffer::from_fn(width, height, |x, y| {
        Rgb([(x * 16) as u8, (y * 16) as u8, 128u8])
    });
    img.save_with_format(path, image::ImageFormat::Png)
        .expect("Failed to save test image");
}

/// Fresh in-memory database with the schema applied.
pub async fn test_db() -> AppDb {
    AppDb::open_in_memory()
        .await
        .expect("Failed to open in-memory database")
}

/// Write a small fake weights file and return its path.
pub fn write_fake_weights(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, b"fake-weights").expect("Failed to write weights file");
    path
}
