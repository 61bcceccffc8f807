#![allow(dead_code)]

mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from aquadetect for tests
pub use aquadetect::augment::{AugmentBatch, BatchEvent, BatchReport, TransformKind, TransformPlan};
pub use aquadetect::core::db::{
    AppDb, FeedbackRepository, FeedbackStatus, InferenceLogRepository, LoginLogRepository,
    ModelRecord, ModelRepository, NewFeedback, NewInferenceLog, NewTrainingLog, Role,
    TrainingLogRepository, TrainingStatus, UserRepository, UserStatus, UserUpdate,
};
