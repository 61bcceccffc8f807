use std::path::PathBuf;

use time::OffsetDateTime;

/// One model in the repository: a weights file on disk plus its metadata
/// row.
#[derive(Debug, Clone)]
pub struct ModelRecord {
    pub id: i64,
    pub name: String,
    pub version: String,
    pub file_path: PathBuf,
    pub classes: Vec<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    pub created_at: OffsetDateTime,
    pub(super) _guard: (),
}

#[derive(Debug, Clone)]
pub struct NewModelRecord {
    pub name: String,
    pub version: String,
    pub file_path: PathBuf,
    pub classes: Vec<String>,
    pub description: Option<String>,
    pub author: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ModelUpdate {
    pub description: Option<Option<String>>,
    pub author: Option<Option<String>>,
    pub classes: Option<Vec<String>>,
}

pub trait ModelRepository {
    fn get_models(&self) -> impl Future<Output = anyhow::Result<Vec<ModelRecord>>>;
    fn get_model_by_id(
        &self,
        id: i64,
    ) -> impl Future<Output = anyhow::Result<Option<ModelRecord>>>;
    /// Latest version when `version` is `None`.
    fn get_model_by_name(
        &self,
        name: &str,
        version: Option<&str>,
    ) -> impl Future<Output = anyhow::Result<Option<ModelRecord>>>;
    fn search_models(
        &self,
        keyword: &str,
    ) -> impl Future<Output = anyhow::Result<Vec<ModelRecord>>>;
    fn add_model_record(
        &self,
        model: &NewModelRecord,
    ) -> impl Future<Output = anyhow::Result<ModelRecord>>;
    fn update_model(
        &self,
        model: &ModelRecord,
        update: &ModelUpdate,
    ) -> impl Future<Output = anyhow::Result<ModelRecord>>;
    fn delete_model_record(
        &self,
        model: ModelRecord,
    ) -> impl Future<Output = anyhow::Result<()>>;
}
