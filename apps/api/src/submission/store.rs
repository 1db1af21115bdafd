//! Persistence collaborator for submissions.
//!
//! Handlers only see `Arc<dyn SubmissionStore>`: Postgres in production,
//! `UnavailableStore` when no database is configured, and an in-memory
//! store in tests.

use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::models::submission::{NewSubmission, SubmissionRow, SubmissionSummaryRow};

/// Most rows the admin listing ever returns.
pub const ADMIN_LIST_LIMIT: i64 = 200;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("persistence is not configured")]
    Unavailable,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait SubmissionStore: Send + Sync {
    async fn insert(&self, submission: NewSubmission) -> Result<SubmissionRow, StoreError>;

    async fn fetch(&self, id: Uuid) -> Result<Option<SubmissionRow>, StoreError>;

    /// Newest first.
    async fn list_recent(&self, limit: i64) -> Result<Vec<SubmissionSummaryRow>, StoreError>;
}

// ────────────────────────────────────────────────────────────────────────────
// PostgreSQL
// ────────────────────────────────────────────────────────────────────────────

pub struct PgSubmissionStore {
    pool: PgPool,
}

impl PgSubmissionStore {
    pub fn new(pool: PgPool) -> Self {
        PgSubmissionStore { pool }
    }

    /// Creates `quiz_responses` and its listing index when missing. Run once at startup.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS quiz_responses (
                id          uuid PRIMARY KEY,
                quiz_id     text NOT NULL,
                name        text NOT NULL,
                email       text,
                phone       text,
                answers     jsonb NOT NULL,
                score       integer NOT NULL,
                level       text NOT NULL,
                report      text NOT NULL,
                created_at  timestamptz NOT NULL DEFAULT now()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS quiz_responses_created_at_idx ON quiz_responses (created_at DESC)",
        )
        .execute(&self.pool)
        .await?;

        info!("quiz_responses schema ready");
        Ok(())
    }
}

#[async_trait]
impl SubmissionStore for PgSubmissionStore {
    async fn insert(&self, submission: NewSubmission) -> Result<SubmissionRow, StoreError> {
        Ok(sqlx::query_as::<_, SubmissionRow>(
            r#"
            INSERT INTO quiz_responses
                (id, quiz_id, name, email, phone, answers, score, level, report)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&submission.quiz_id)
        .bind(&submission.name)
        .bind(&submission.email)
        .bind(&submission.phone)
        .bind(submission.answers.to_json())
        .bind(submission.score)
        .bind(&submission.level)
        .bind(&submission.report)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<SubmissionRow>, StoreError> {
        Ok(
            sqlx::query_as::<_, SubmissionRow>("SELECT * FROM quiz_responses WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<SubmissionSummaryRow>, StoreError> {
        Ok(sqlx::query_as::<_, SubmissionSummaryRow>(
            r#"
            SELECT id, quiz_id, name, email, phone, score, level, created_at
            FROM quiz_responses
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// No database configured
// ────────────────────────────────────────────────────────────────────────────

/// Stands in when `DATABASE_URL` is unset. Every call fails with `StoreError::Unavailable`.
pub struct UnavailableStore;

#[async_trait]
impl SubmissionStore for UnavailableStore {
    async fn insert(&self, _submission: NewSubmission) -> Result<SubmissionRow, StoreError> {
        Err(StoreError::Unavailable)
    }

    async fn fetch(&self, _id: Uuid) -> Result<Option<SubmissionRow>, StoreError> {
        Err(StoreError::Unavailable)
    }

    async fn list_recent(&self, _limit: i64) -> Result<Vec<SubmissionSummaryRow>, StoreError> {
        Err(StoreError::Unavailable)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory (tests)
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
#[derive(Default)]
pub struct MemoryStore {
    rows: tokio::sync::Mutex<Vec<SubmissionRow>>,
}

#[cfg(test)]
impl MemoryStore {
    pub async fn rows(&self) -> Vec<SubmissionRow> {
        self.rows.lock().await.clone()
    }
}

#[cfg(test)]
#[async_trait]
impl SubmissionStore for MemoryStore {
    async fn insert(&self, submission: NewSubmission) -> Result<SubmissionRow, StoreError> {
        let mut rows = self.rows.lock().await;
        // Strictly increasing timestamps keep list ordering stable within a test.
        let created_at = chrono::Utc::now() + chrono::Duration::milliseconds(rows.len() as i64);
        let row = SubmissionRow {
            id: Uuid::new_v4(),
            quiz_id: submission.quiz_id,
            name: submission.name,
            email: submission.email,
            phone: submission.phone,
            answers: submission.answers.to_json(),
            score: submission.score,
            level: submission.level,
            report: submission.report,
            created_at,
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<SubmissionRow>, StoreError> {
        Ok(self.rows.lock().await.iter().find(|r| r.id == id).cloned())
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<SubmissionSummaryRow>, StoreError> {
        let rows = self.rows.lock().await;
        let mut summaries: Vec<SubmissionSummaryRow> = rows.iter().map(SubmissionSummaryRow::from).collect();
        summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        summaries.truncate(limit.max(0) as usize);
        Ok(summaries)
    }
}
