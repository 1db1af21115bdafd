use anyhow::Context;
use axum::{
    extract::{Path, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::admin::{authorize, filename_slug, rebuild_document};
use crate::engine::scoring::Level;
use crate::errors::AppError;
use crate::layout::render_pdf;
use crate::models::submission::SubmissionRow;
use crate::state::AppState;
use crate::submission::contact::admin_link;
use crate::submission::store::ADMIN_LIST_LIMIT;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSubmission {
    pub id: Uuid,
    pub quiz_id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub score: i32,
    pub level: String,
    /// Display label, `None` for a level string this build does not know.
    pub level_label: Option<&'static str>,
    pub created_at: DateTime<Utc>,
    /// Chat link to the respondent; `None` without a usable phone.
    pub whatsapp_url: Option<String>,
}

async fn fetch_row(state: &AppState, id: Uuid) -> Result<SubmissionRow, AppError> {
    state
        .store
        .fetch(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Submission {id} not found")))
}

/// GET /api/v1/admin/submissions
pub async fn handle_list_submissions(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<AdminSubmission>>, AppError> {
    authorize(state.config.admin_password.as_deref(), &headers)?;

    let rows = state.store.list_recent(ADMIN_LIST_LIMIT).await?;
    let submissions = rows
        .into_iter()
        .map(|row| {
            let quiz_title = state
                .catalog
                .resolve_stored(&row.quiz_id)
                .map(|(quiz, _)| quiz.title.clone())
                .unwrap_or_else(|| row.quiz_id.clone());
            let whatsapp_url = row
                .phone
                .as_deref()
                .and_then(|phone| admin_link(phone, &row.name, &quiz_title));
            AdminSubmission {
                id: row.id,
                quiz_id: row.quiz_id,
                name: row.name,
                email: row.email,
                phone: row.phone,
                score: row.score,
                level_label: Level::parse(&row.level).map(Level::label),
                level: row.level,
                created_at: row.created_at,
                whatsapp_url,
            }
        })
        .collect();

    Ok(Json(submissions))
}

/// GET /api/v1/admin/submissions/:id/report
pub async fn handle_get_report(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    authorize(state.config.admin_password.as_deref(), &headers)?;

    let row = fetch_row(&state, id).await?;
    let disposition = format!(
        "attachment; filename=\"relatorio-{}.txt\"",
        filename_slug(&row.name)
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        row.report,
    )
        .into_response())
}

/// GET /api/v1/admin/submissions/:id/report/pdf
pub async fn handle_get_report_pdf(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    authorize(state.config.admin_password.as_deref(), &headers)?;

    let row = fetch_row(&state, id).await?;
    let doc = rebuild_document(&state.catalog, &row);
    let config = state.page_config.clone();
    let bytes = tokio::task::spawn_blocking(move || render_pdf(&doc, &config))
        .await
        .context("PDF rendering task failed")??;

    let disposition = format!(
        "attachment; filename=\"relatorio-{}.pdf\"",
        filename_slug(&row.name)
    );

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}
