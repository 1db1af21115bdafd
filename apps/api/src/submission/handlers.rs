use axum::{extract::State, Json};
use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::engine::evaluate_closed;
use crate::engine::open_text::analyze_open_quiz;
use crate::engine::scoring::Level;
use crate::errors::AppError;
use crate::models::submission::{
    NewSubmission, StoredAnswers, StoredClosedAnswer, StoredOpenAnswer, SubmissionRow,
};
use crate::notify::{spawn_notification, SubmissionNotice};
use crate::report::{build_report, ReportInput};
use crate::state::AppState;
use crate::submission::contact::respondent_link;
use crate::submission::validate::{
    validate_closed, validate_open, ClosedSubmissionRequest, OpenSubmissionRequest,
    ValidClosedSubmission, ValidOpenSubmission,
};

/// Brasília time (UTC-3, no daylight saving) used in notification mails.
const NOTICE_UTC_OFFSET_SECS: i32 = 3 * 3600;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    pub id: Uuid,
    pub level: Level,
    pub quiz_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp_url: Option<String>,
}

/// POST /api/v1/submissions
pub async fn handle_submit_closed(
    State(state): State<AppState>,
    Json(req): Json<ClosedSubmissionRequest>,
) -> Result<Json<SubmissionResponse>, AppError> {
    let ValidClosedSubmission {
        quiz,
        contact,
        answers,
    } = validate_closed(&state.catalog, &req)?;

    let result = evaluate_closed(quiz, answers);
    let report = build_report(&contact.name, quiz, ReportInput::Closed(&result)).render_text();
    let stored = StoredAnswers::Closed(
        result
            .answers
            .iter()
            .map(|a| StoredClosedAnswer {
                id: a.question.id.clone(),
                value: a.value.get(),
            })
            .collect(),
    );

    let row = record_submission(
        &state,
        NewSubmission {
            quiz_id: quiz.id.clone(),
            name: contact.name,
            email: contact.email,
            phone: contact.phone,
            answers: stored,
            score: result.total_score as i32,
            level: result.level.as_str().to_string(),
            report,
        },
        &quiz.title,
    )
    .await?;

    Ok(Json(SubmissionResponse {
        id: row.id,
        level: result.level,
        quiz_title: quiz.title.clone(),
        whatsapp_url: None,
    }))
}

/// POST /api/v1/submissions/open
pub async fn handle_submit_open(
    State(state): State<AppState>,
    Json(req): Json<OpenSubmissionRequest>,
) -> Result<Json<SubmissionResponse>, AppError> {
    let ValidOpenSubmission {
        quiz,
        contact,
        answers,
    } = validate_open(&state.catalog, &req)?;

    let result = analyze_open_quiz(quiz, &answers);
    let report = build_report(&contact.name, quiz, ReportInput::Open(&result)).render_text();
    let stored = StoredAnswers::Open(
        result
            .analyses
            .iter()
            .map(|a| StoredOpenAnswer {
                id: a.question_id.clone(),
                text: a.text.clone(),
                score: a.score,
            })
            .collect(),
    );

    let row = record_submission(
        &state,
        NewSubmission {
            quiz_id: quiz.open_variant_id(),
            name: contact.name,
            email: contact.email,
            phone: contact.phone,
            answers: stored,
            score: result.total_score as i32,
            level: result.level.as_str().to_string(),
            report,
        },
        &quiz.title,
    )
    .await?;

    let whatsapp_url = state
        .config
        .whatsapp_number
        .as_deref()
        .map(|number| respondent_link(number, &quiz.title, &row.name, &row.id.to_string()));

    Ok(Json(SubmissionResponse {
        id: row.id,
        level: result.level,
        quiz_title: quiz.title.clone(),
        whatsapp_url,
    }))
}

/// Inserts the record, then fires the notification mail without waiting on it.
async fn record_submission(
    state: &AppState,
    submission: NewSubmission,
    quiz_title: &str,
) -> Result<SubmissionRow, AppError> {
    let row = state.store.insert(submission).await?;
    info!(
        id = %row.id,
        quiz = %row.quiz_id,
        score = row.score,
        level = %row.level,
        "Submission recorded"
    );

    spawn_notification(
        state.notifier.clone(),
        SubmissionNotice {
            name: row.name.clone(),
            email: row.email.clone(),
            phone: row.phone.clone(),
            quiz_title: quiz_title.to_string(),
            created_at: format_notice_time(row.created_at),
            admin_url: state.config.admin_dashboard_url.clone(),
        },
    );

    Ok(row)
}

/// `dd/mm/yyyy HH:MM` in Brasília time.
pub fn format_notice_time(at: DateTime<Utc>) -> String {
    const FORMAT: &str = "%d/%m/%Y %H:%M";
    match FixedOffset::west_opt(NOTICE_UTC_OFFSET_SECS) {
        Some(offset) => at.with_timezone(&offset).format(FORMAT).to_string(),
        None => at.format(FORMAT).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_notice_time_uses_brasilia_offset() {
        let at = Utc.with_ymd_and_hms(2026, 1, 5, 2, 30, 0).unwrap();
        assert_eq!(format_notice_time(at), "04/01/2026 23:30");
    }

    #[test]
    fn test_response_omits_missing_whatsapp_url() {
        let response = SubmissionResponse {
            id: Uuid::nil(),
            level: Level::MuitoAlto,
            quiz_title: "Teste".to_string(),
            whatsapp_url: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["level"], "muito-alto");
        assert_eq!(json["quizTitle"], "Teste");
        assert!(json.get("whatsappUrl").is_none());
    }
}
