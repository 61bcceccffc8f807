mod feedback;
mod logs;
mod model;
mod user;

use std::path::{Path, PathBuf};

use anyhow::Context;
use sqlx::{
    Row,
    sqlite::{
        SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteRow,
        SqliteSynchronous,
    },
};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

pub use feedback::{Feedback, FeedbackRepository, FeedbackStatus, NewFeedback};
pub use logs::{
    InferenceLog, InferenceLogRepository, LoginLog, LoginLogRepository, LoginOutcome,
    NewInferenceLog, NewTrainingLog, TrainingLog, TrainingLogRepository, TrainingStatus,
};
pub use model::{ModelRecord, ModelRepository, ModelUpdate, NewModelRecord};
pub use user::{Role, User, UserRepository, UserStatus, UserUpdate};

const SCHEMA: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        email TEXT,
        role TEXT NOT NULL DEFAULT 'user',
        status TEXT NOT NULL DEFAULT 'active',
        created_at TEXT NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS models (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        version TEXT NOT NULL,
        file_path TEXT NOT NULL,
        classes TEXT NOT NULL,
        description TEXT,
        author TEXT,
        created_at TEXT NOT NULL,
        UNIQUE (name, version)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS login_logs (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER REFERENCES users (id) ON DELETE SET NULL,
        username TEXT NOT NULL,
        ip_address TEXT NOT NULL,
        outcome TEXT NOT NULL,
        login_time TEXT NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS inference_logs (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER REFERENCES users (id) ON DELETE SET NULL,
        model_name TEXT NOT NULL,
        source_type TEXT NOT NULL,
        source_path TEXT NOT NULL,
        detections INTEGER NOT NULL,
        inference_time REAL NOT NULL,
        created_at TEXT NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS training_logs (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER REFERENCES users (id) ON DELETE SET NULL,
        model_name TEXT NOT NULL,
        dataset_path TEXT NOT NULL,
        epochs INTEGER NOT NULL,
        batch_size INTEGER NOT NULL,
        status TEXT NOT NULL,
        started_at TEXT NOT NULL,
        finished_at TEXT,
        final_map REAL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS feedback (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL REFERENCES users (id) ON DELETE CASCADE,
        title TEXT NOT NULL,
        content TEXT NOT NULL,
        category TEXT,
        email TEXT,
        status TEXT NOT NULL DEFAULT 'pending',
        response TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT
    )"#,
];

/// Handle to the application database. Cheap to clone; all clones share
/// one connection pool.
#[derive(Debug, Clone)]
pub struct AppDb {
    pool: SqlitePool,
}

impl AppDb {
    pub async fn open<P: AsRef<Path>>(db_file: P) -> anyhow::Result<Self> {
        let db_file = db_file.as_ref();
        if let Some(parent) = db_file.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create database directory {:?}", parent)
                })?;
            }
        }

        let connect_opts = SqliteConnectOptions::new()
            .filename(db_file)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connect_opts)
            .await
            .with_context(|| format!("Failed to open database {:?}", db_file))?;

        let db = Self { pool };
        db.init_schema().await?;
        Ok(db)
    }

    /// In-memory database, used by tests.
    pub async fn open_in_memory() -> anyhow::Result<Self> {
        let connect_opts = SqliteConnectOptions::new()
            .in_memory(true)
            .foreign_keys(true);
        // A single connection that never expires: every in-memory
        // connection is its own database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(connect_opts)
            .await?;
        let db = Self { pool };
        db.init_schema().await?;
        Ok(db)
    }

    async fn init_schema(&self) -> anyhow::Result<()> {
        for stmt in SCHEMA {
            sqlx::query(stmt)
                .execute(&self.pool)
                .await
                .context("Failed to initialize database schema")?;
        }
        Ok(())
    }

    pub async fn count_users(&self) -> anyhow::Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("n")?)
    }

    pub(crate) async fn insert_user(
        &self,
        username: &str,
        password_hash: &str,
        email: Option<&str>,
        role: Role,
    ) -> anyhow::Result<User> {
        let created_at = now_rfc3339()?;
        let row = sqlx::query(
            r#"INSERT INTO users (username, password_hash, email, role, status, created_at)
            VALUES (?, ?, ?, ?, 'active', ?)
            RETURNING id, username, email, role, status, created_at"#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(email)
        .bind(role.as_str())
        .bind(&created_at)
        .fetch_one(&self.pool)
        .await
        .with_context(|| format!("Failed to insert user {:?}", username))?;
        user_from_row(&row)
    }

    pub(crate) async fn get_password_hash(&self, user_id: i64) -> anyhow::Result<String> {
        let row = sqlx::query("SELECT password_hash FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("password_hash")?)
    }

    pub(crate) async fn set_password_hash(
        &self,
        user_id: i64,
        password_hash: &str,
    ) -> anyhow::Result<()> {
        sqlx::query("UPDATE users SET password_hash = ? WHERE id = ?")
            .bind(password_hash)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

fn now_rfc3339() -> anyhow::Result<String> {
    Ok(OffsetDateTime::now_utc().format(&Rfc3339)?)
}

fn parse_rfc3339(value: &str) -> anyhow::Result<OffsetDateTime> {
    OffsetDateTime::parse(value, &Rfc3339)
        .with_context(|| format!("Invalid timestamp in database: {value:?}"))
}

fn user_from_row(row: &SqliteRow) -> anyhow::Result<User> {
    let role: String = row.try_get("role")?;
    let status: String = row.try_get("status")?;
    let created_at: String = row.try_get("created_at")?;
    Ok(User {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        email: row.try_get("email")?,
        role: Role::try_from(role.as_str())?,
        status: UserStatus::try_from(status.as_str())?,
        created_at: parse_rfc3339(&created_at)?,
        _guard: (),
    })
}

fn model_from_row(row: &SqliteRow) -> anyhow::Result<ModelRecord> {
    let file_path: String = row.try_get("file_path")?;
    let classes: String = row.try_get("classes")?;
    let created_at: String = row.try_get("created_at")?;
    Ok(ModelRecord {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        version: row.try_get("version")?,
        file_path: PathBuf::from(file_path),
        classes: serde_json::from_str(&classes)
            .with_context(|| format!("Invalid class list in database: {classes:?}"))?,
        description: row.try_get("description")?,
        author: row.try_get("author")?,
        created_at: parse_rfc3339(&created_at)?,
        _guard: (),
    })
}

fn login_log_from_row(row: &SqliteRow) -> anyhow::Result<LoginLog> {
    let outcome: String = row.try_get("outcome")?;
    let login_time: String = row.try_get("login_time")?;
    Ok(LoginLog {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        username: row.try_get("username")?,
        ip_address: row.try_get("ip_address")?,
        outcome: LoginOutcome::try_from(outcome.as_str())?,
        login_time: parse_rfc3339(&login_time)?,
        _guard: (),
    })
}

fn inference_log_from_row(row: &SqliteRow) -> anyhow::Result<InferenceLog> {
    let created_at: String = row.try_get("created_at")?;
    Ok(InferenceLog {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        model_name: row.try_get("model_name")?,
        source_type: row.try_get("source_type")?,
        source_path: row.try_get("source_path")?,
        detections: row.try_get("detections")?,
        inference_time: row.try_get("inference_time")?,
        created_at: parse_rfc3339(&created_at)?,
        _guard: (),
    })
}

fn training_log_from_row(row: &SqliteRow) -> anyhow::Result<TrainingLog> {
    let status: String = row.try_get("status")?;
    let started_at: String = row.try_get("started_at")?;
    let finished_at: Option<String> = row.try_get("finished_at")?;
    Ok(TrainingLog {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        model_name: row.try_get("model_name")?,
        dataset_path: row.try_get("dataset_path")?,
        epochs: row.try_get("epochs")?,
        batch_size: row.try_get("batch_size")?,
        status: TrainingStatus::try_from(status.as_str())?,
        started_at: parse_rfc3339(&started_at)?,
        finished_at: finished_at.as_deref().map(parse_rfc3339).transpose()?,
        final_map: row.try_get("final_map")?,
        _guard: (),
    })
}

fn feedback_from_row(row: &SqliteRow) -> anyhow::Result<Feedback> {
    let status: String = row.try_get("status")?;
    let created_at: String = row.try_get("created_at")?;
    let updated_at: Option<String> = row.try_get("updated_at")?;
    Ok(Feedback {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        category: row.try_get("category")?,
        email: row.try_get("email")?,
        status: FeedbackStatus::try_from(status.as_str())?,
        response: row.try_get("response")?,
        created_at: parse_rfc3339(&created_at)?,
        updated_at: updated_at.as_deref().map(parse_rfc3339).transpose()?,
        _guard: (),
    })
}

impl UserRepository for AppDb {
    async fn get_users(&self) -> anyhow::Result<Vec<User>> {
        sqlx::query(
            "SELECT id, username, email, role, status, created_at FROM users ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?
        .iter()
        .map(user_from_row)
        .collect()
    }

    async fn get_user_by_id(&self, id: i64) -> anyhow::Result<Option<User>> {
        sqlx::query("SELECT id, username, email, role, status, created_at FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .as_ref()
            .map(user_from_row)
            .transpose()
    }

    async fn get_user_by_username(&self, username: &str) -> anyhow::Result<Option<User>> {
        sqlx::query(
            "SELECT id, username, email, role, status, created_at FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?
        .as_ref()
        .map(user_from_row)
        .transpose()
    }

    async fn update_user(&self, user: &User, update: &UserUpdate) -> anyhow::Result<User> {
        let email = match &update.email {
            Some(email) => email.clone(),
            None => user.email.clone(),
        };
        let row = sqlx::query(
            r#"UPDATE users SET
                email = ?,
                role = COALESCE(?, role),
                status = COALESCE(?, status)
            WHERE id = ?
            RETURNING id, username, email, role, status, created_at"#,
        )
        .bind(email)
        .bind(update.role.map(Role::as_str))
        .bind(update.status.map(UserStatus::as_str))
        .bind(user.id)
        .fetch_one(&self.pool)
        .await
        .with_context(|| format!("Failed to update user {:?}", user.username))?;
        user_from_row(&row)
    }

    async fn delete_user(&self, user: User) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(user.id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

impl ModelRepository for AppDb {
    async fn get_models(&self) -> anyhow::Result<Vec<ModelRecord>> {
        sqlx::query(
            r#"SELECT id, name, version, file_path, classes, description, author, created_at
            FROM models ORDER BY name ASC, id ASC"#,
        )
        .fetch_all(&self.pool)
        .await?
        .iter()
        .map(model_from_row)
        .collect()
    }

    async fn get_model_by_id(&self, id: i64) -> anyhow::Result<Option<ModelRecord>> {
        sqlx::query(
            r#"SELECT id, name, version, file_path, classes, description, author, created_at
            FROM models WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .as_ref()
        .map(model_from_row)
        .transpose()
    }

    async fn get_model_by_name(
        &self,
        name: &str,
        version: Option<&str>,
    ) -> anyhow::Result<Option<ModelRecord>> {
        let row = match version {
            Some(version) => {
                sqlx::query(
                    r#"SELECT id, name, version, file_path, classes, description, author, created_at
                    FROM models WHERE name = ? AND version = ?"#,
                )
                .bind(name)
                .bind(version)
                .fetch_optional(&self.pool)
                .await?
            }
            None => {
                sqlx::query(
                    r#"SELECT id, name, version, file_path, classes, description, author, created_at
                    FROM models WHERE name = ? ORDER BY id DESC LIMIT 1"#,
                )
                .bind(name)
                .fetch_optional(&self.pool)
                .await?
            }
        };
        row.as_ref().map(model_from_row).transpose()
    }

    async fn search_models(&self, keyword: &str) -> anyhow::Result<Vec<ModelRecord>> {
        let pattern = format!("%{keyword}%");
        sqlx::query(
            r#"SELECT id, name, version, file_path, classes, description, author, created_at
            FROM models
            WHERE name LIKE ? OR COALESCE(description, '') LIKE ?
            ORDER BY name ASC, id ASC"#,
        )
        .bind(&pattern)
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await?
        .iter()
        .map(model_from_row)
        .collect()
    }

    async fn add_model_record(&self, model: &NewModelRecord) -> anyhow::Result<ModelRecord> {
        let classes = serde_json::to_string(&model.classes)?;
        let file_path = model.file_path.to_string_lossy();
        let created_at = now_rfc3339()?;
        let row = sqlx::query(
            r#"INSERT INTO models (name, version, file_path, classes, description, author, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING id, name, version, file_path, classes, description, author, created_at"#,
        )
        .bind(&model.name)
        .bind(&model.version)
        .bind(file_path.as_ref())
        .bind(&classes)
        .bind(&model.description)
        .bind(&model.author)
        .bind(&created_at)
        .fetch_one(&self.pool)
        .await
        .with_context(|| {
            format!("Failed to register model {} v{}", model.name, model.version)
        })?;
        model_from_row(&row)
    }

    async fn update_model(
        &self,
        model: &ModelRecord,
        update: &ModelUpdate,
    ) -> anyhow::Result<ModelRecord> {
        let description = match &update.description {
            Some(description) => description.clone(),
            None => model.description.clone(),
        };
        let author = match &update.author {
            Some(author) => author.clone(),
            None => model.author.clone(),
        };
        let classes = update
            .classes
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;
        let row = sqlx::query(
            r#"UPDATE models SET
                description = ?,
                author = ?,
                classes = COALESCE(?, classes)
            WHERE id = ?
            RETURNING id, name, version, file_path, classes, description, author, created_at"#,
        )
        .bind(description)
        .bind(author)
        .bind(classes)
        .bind(model.id)
        .fetch_one(&self.pool)
        .await
        .with_context(|| format!("Failed to update model {:?}", model.name))?;
        model_from_row(&row)
    }

    async fn delete_model_record(&self, model: ModelRecord) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM models WHERE id = ?")
            .bind(model.id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

impl LoginLogRepository for AppDb {
    async fn record_login(
        &self,
        user_id: Option<i64>,
        username: &str,
        ip_address: &str,
        outcome: LoginOutcome,
    ) -> anyhow::Result<()> {
        let login_time = now_rfc3339()?;
        sqlx::query(
            r#"INSERT INTO login_logs (user_id, username, ip_address, outcome, login_time)
            VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(user_id)
        .bind(username)
        .bind(ip_address)
        .bind(outcome.as_str())
        .bind(&login_time)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_login_logs(&self, limit: i64) -> anyhow::Result<Vec<LoginLog>> {
        sqlx::query(
            r#"SELECT id, user_id, username, ip_address, outcome, login_time
            FROM login_logs ORDER BY id DESC LIMIT ?"#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?
        .iter()
        .map(login_log_from_row)
        .collect()
    }
}

impl InferenceLogRepository for AppDb {
    async fn record_inference(&self, entry: &NewInferenceLog) -> anyhow::Result<i64> {
        let created_at = now_rfc3339()?;
        let row = sqlx::query(
            r#"INSERT INTO inference_logs
                (user_id, model_name, source_type, source_path, detections, inference_time, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING id"#,
        )
        .bind(entry.user_id)
        .bind(&entry.model_name)
        .bind(&entry.source_type)
        .bind(&entry.source_path)
        .bind(entry.detections)
        .bind(entry.inference_time)
        .bind(&created_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.try_get("id")?)
    }

    async fn get_inference_logs(
        &self,
        user_id: Option<i64>,
        limit: i64,
    ) -> anyhow::Result<Vec<InferenceLog>> {
        let rows = match user_id {
            Some(user_id) => {
                sqlx::query(
                    r#"SELECT id, user_id, model_name, source_type, source_path,
                        detections, inference_time, created_at
                    FROM inference_logs WHERE user_id = ? ORDER BY id DESC LIMIT ?"#,
                )
                .bind(user_id)
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query(
                    r#"SELECT id, user_id, model_name, source_type, source_path,
                        detections, inference_time, created_at
                    FROM inference_logs ORDER BY id DESC LIMIT ?"#,
                )
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
        };
        rows.iter().map(inference_log_from_row).collect()
    }
}

impl TrainingLogRepository for AppDb {
    async fn start_training_log(&self, entry: &NewTrainingLog) -> anyhow::Result<i64> {
        let started_at = now_rfc3339()?;
        let row = sqlx::query(
            r#"INSERT INTO training_logs
                (user_id, model_name, dataset_path, epochs, batch_size, status, started_at)
            VALUES (?, ?, ?, ?, ?, 'running', ?)
            RETURNING id"#,
        )
        .bind(entry.user_id)
        .bind(&entry.model_name)
        .bind(&entry.dataset_path)
        .bind(entry.epochs)
        .bind(entry.batch_size)
        .bind(&started_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.try_get("id")?)
    }

    async fn finish_training_log(
        &self,
        id: i64,
        status: TrainingStatus,
        final_map: Option<f64>,
    ) -> anyhow::Result<()> {
        let finished_at = now_rfc3339()?;
        sqlx::query(
            "UPDATE training_logs SET status = ?, finished_at = ?, final_map = ? WHERE id = ?",
        )
        .bind(status.as_str())
        .bind(&finished_at)
        .bind(final_map)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_training_logs(
        &self,
        user_id: Option<i64>,
        limit: i64,
    ) -> anyhow::Result<Vec<TrainingLog>> {
        let rows = match user_id {
            Some(user_id) => {
                sqlx::query(
                    r#"SELECT id, user_id, model_name, dataset_path, epochs, batch_size,
                        status, started_at, finished_at, final_map
                    FROM training_logs WHERE user_id = ? ORDER BY id DESC LIMIT ?"#,
                )
                .bind(user_id)
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query(
                    r#"SELECT id, user_id, model_name, dataset_path, epochs, batch_size,
                        status, started_at, finished_at, final_map
                    FROM training_logs ORDER BY id DESC LIMIT ?"#,
                )
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
        };
        rows.iter().map(training_log_from_row).collect()
    }
}

impl FeedbackRepository for AppDb {
    async fn submit_feedback(&self, feedback: &NewFeedback) -> anyhow::Result<Feedback> {
        let created_at = now_rfc3339()?;
        let row = sqlx::query(
            r#"INSERT INTO feedback (user_id, title, content, category, email, status, created_at)
            VALUES (?, ?, ?, ?, ?, 'pending', ?)
            RETURNING id, user_id, title, content, category, email,
                status, response, created_at, updated_at"#,
        )
        .bind(feedback.user_id)
        .bind(&feedback.title)
        .bind(&feedback.content)
        .bind(&feedback.category)
        .bind(&feedback.email)
        .bind(&created_at)
        .fetch_one(&self.pool)
        .await
        .context("Failed to submit feedback")?;
        feedback_from_row(&row)
    }

    async fn get_feedbacks(&self, limit: i64) -> anyhow::Result<Vec<Feedback>> {
        sqlx::query(
            r#"SELECT id, user_id, title, content, category, email,
                status, response, created_at, updated_at
            FROM feedback ORDER BY id DESC LIMIT ?"#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?
        .iter()
        .map(feedback_from_row)
        .collect()
    }

    async fn get_user_feedbacks(&self, user_id: i64, limit: i64) -> anyhow::Result<Vec<Feedback>> {
        sqlx::query(
            r#"SELECT id, user_id, title, content, category, email,
                status, response, created_at, updated_at
            FROM feedback WHERE user_id = ? ORDER BY id DESC LIMIT ?"#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?
        .iter()
        .map(feedback_from_row)
        .collect()
    }

    async fn update_feedback_status(
        &self,
        feedback: &Feedback,
        status: FeedbackStatus,
        response: Option<&str>,
    ) -> anyhow::Result<Feedback> {
        let updated_at = now_rfc3339()?;
        let row = sqlx::query(
            r#"UPDATE feedback SET
                status = ?,
                response = COALESCE(?, response),
                updated_at = ?
            WHERE id = ?
            RETURNING id, user_id, title, content, category, email,
                status, response, created_at, updated_at"#,
        )
        .bind(status.as_str())
        .bind(response)
        .bind(&updated_at)
        .bind(feedback.id)
        .fetch_one(&self.pool)
        .await?;
        feedback_from_row(&row)
    }

    async fn delete_feedback(&self, feedback: Feedback) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM feedback WHERE id = ?")
            .bind(feedback.id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
