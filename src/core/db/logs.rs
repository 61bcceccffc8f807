use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    Success,
    Failed,
}

impl LoginOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            LoginOutcome::Success => "success",
            LoginOutcome::Failed => "failed",
        }
    }
}

impl TryFrom<&str> for LoginOutcome {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> anyhow::Result<Self> {
        match value {
            "success" => Ok(LoginOutcome::Success),
            "failed" => Ok(LoginOutcome::Failed),
            other => Err(anyhow::anyhow!("unknown login outcome: {other}")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoginLog {
    pub id: i64,
    pub user_id: Option<i64>,
    pub username: String,
    pub ip_address: String,
    pub outcome: LoginOutcome,
    pub login_time: OffsetDateTime,
    pub(super) _guard: (),
}

#[derive(Debug, Clone)]
pub struct NewInferenceLog {
    pub user_id: Option<i64>,
    pub model_name: String,
    pub source_type: String,
    pub source_path: String,
    pub detections: i64,
    pub inference_time: f64,
}

#[derive(Debug, Clone)]
pub struct InferenceLog {
    pub id: i64,
    pub user_id: Option<i64>,
    pub model_name: String,
    pub source_type: String,
    pub source_path: String,
    pub detections: i64,
    pub inference_time: f64,
    pub created_at: OffsetDateTime,
    pub(super) _guard: (),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainingStatus {
    Running,
    Completed,
    Failed,
}

impl TrainingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TrainingStatus::Running => "running",
            TrainingStatus::Completed => "completed",
            TrainingStatus::Failed => "failed",
        }
    }
}

impl TryFrom<&str> for TrainingStatus {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> anyhow::Result<Self> {
        match value {
            "running" => Ok(TrainingStatus::Running),
            "completed" => Ok(TrainingStatus::Completed),
            "failed" => Ok(TrainingStatus::Failed),
            other => Err(anyhow::anyhow!("unknown training status: {other}")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewTrainingLog {
    pub user_id: Option<i64>,
    pub model_name: String,
    pub dataset_path: String,
    pub epochs: i64,
    pub batch_size: i64,
}

#[derive(Debug, Clone)]
pub struct TrainingLog {
    pub id: i64,
    pub user_id: Option<i64>,
    pub model_name: String,
    pub dataset_path: String,
    pub epochs: i64,
    pub batch_size: i64,
    pub status: TrainingStatus,
    pub started_at: OffsetDateTime,
    pub finished_at: Option<OffsetDateTime>,
    pub final_map: Option<f64>,
    pub(super) _guard: (),
}

pub trait LoginLogRepository {
    fn record_login(
        &self,
        user_id: Option<i64>,
        username: &str,
        ip_address: &str,
        outcome: LoginOutcome,
    ) -> impl Future<Output = anyhow::Result<()>>;
    fn get_login_logs(&self, limit: i64) -> impl Future<Output = anyhow::Result<Vec<LoginLog>>>;
}

pub trait InferenceLogRepository {
    fn record_inference(
        &self,
        entry: &NewInferenceLog,
    ) -> impl Future<Output = anyhow::Result<i64>>;
    fn get_inference_logs(
        &self,
        user_id: Option<i64>,
        limit: i64,
    ) -> impl Future<Output = anyhow::Result<Vec<InferenceLog>>>;
}

pub trait TrainingLogRepository {
    /// Insert a `running` row and return its id.
    fn start_training_log(
        &self,
        entry: &NewTrainingLog,
    ) -> impl Future<Output = anyhow::Result<i64>>;
    fn finish_training_log(
        &self,
        id: i64,
        status: TrainingStatus,
        final_map: Option<f64>,
    ) -> impl Future<Output = anyhow::Result<()>>;
    fn get_training_logs(
        &self,
        user_id: Option<i64>,
        limit: i64,
    ) -> impl Future<Output = anyhow::Result<Vec<TrainingLog>>>;
}
