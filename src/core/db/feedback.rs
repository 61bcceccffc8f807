use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackStatus {
    Pending,
    Resolved,
    Dismissed,
}

impl FeedbackStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            FeedbackStatus::Pending => "pending",
            FeedbackStatus::Resolved => "resolved",
            FeedbackStatus::Dismissed => "dismissed",
        }
    }
}

impl TryFrom<&str> for FeedbackStatus {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> anyhow::Result<Self> {
        match value {
            "pending" => Ok(FeedbackStatus::Pending),
            "resolved" => Ok(FeedbackStatus::Resolved),
            "dismissed" => Ok(FeedbackStatus::Dismissed),
            other => Err(anyhow::anyhow!("unknown feedback status: {other}")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Feedback {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub content: String,
    pub category: Option<String>,
    pub email: Option<String>,
    pub status: FeedbackStatus,
    pub response: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: Option<OffsetDateTime>,
    pub(super) _guard: (),
}

#[derive(Debug, Clone)]
pub struct NewFeedback {
    pub user_id: i64,
    pub title: String,
    pub content: String,
    pub category: Option<String>,
    pub email: Option<String>,
}

pub trait FeedbackRepository {
    fn submit_feedback(
        &self,
        feedback: &NewFeedback,
    ) -> impl Future<Output = anyhow::Result<Feedback>>;
    fn get_feedbacks(&self, limit: i64) -> impl Future<Output = anyhow::Result<Vec<Feedback>>>;
    fn get_user_feedbacks(
        &self,
        user_id: i64,
        limit: i64,
    ) -> impl Future<Output = anyhow::Result<Vec<Feedback>>>;
    fn update_feedback_status(
        &self,
        feedback: &Feedback,
        status: FeedbackStatus,
        response: Option<&str>,
    ) -> impl Future<Output = anyhow::Result<Feedback>>;
    fn delete_feedback(&self, feedback: Feedback) -> impl Future<Output = anyhow::Result<()>>;
}
