pub mod augment;
pub mod config;
pub mod core;
pub mod detect;

pub use augment::{
    AugmentBatch, BatchEvent, BatchReport, CancelToken, TransformKind, TransformPlan,
};
pub use config::AppConfig;
pub use detect::{Detection, Detector, InferenceEngine};
