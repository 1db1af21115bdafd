//! Read-only admin surface over persisted submissions.
//!
//! Every route checks the `x-admin-password` header against `ADMIN_PASSWORD`.
//! PDF exports rebuild the structured report from the stored raw answers so
//! the layout carries headings and score bars; records whose quiz left the
//! catalog fall back to their stored text.

pub mod handlers;

use std::collections::BTreeMap;

use axum::http::HeaderMap;

use crate::engine::open_text::analyze_open_quiz;
use crate::engine::scoring::AnswerValue;
use crate::engine::{evaluate_closed, ClosedAnswer};
use crate::errors::AppError;
use crate::models::submission::{StoredAnswers, SubmissionRow};
use crate::quiz::{Catalog, QuizDefinition, QuizVariant};
use crate::report::{build_report, Item, ReportDocument, ReportInput, Section, DISCLAIMER};
use crate::submission::handlers::format_notice_time;

pub const ADMIN_PASSWORD_HEADER: &str = "x-admin-password";

/// Rejects the request unless the header matches the configured password.
/// With no password configured nothing is authorized.
pub fn authorize(expected: Option<&str>, headers: &HeaderMap) -> Result<(), AppError> {
    let expected = expected.ok_or(AppError::Unauthorized)?;
    let given = headers
        .get(ADMIN_PASSWORD_HEADER)
        .and_then(|v| v.to_str().ok());
    if given == Some(expected) {
        Ok(())
    } else {
        Err(AppError::Unauthorized)
    }
}

/// `relatorio-<slug>.txt` style slug: lowercase ASCII letters, digits and dashes.
pub fn filename_slug(name: &str) -> String {
    let slug: String = name
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .collect();
    if slug.is_empty() {
        "quiz".to_string()
    } else {
        slug
    }
}

/// Structured report for a stored record, dated with its creation time.
pub fn rebuild_document(catalog: &Catalog, row: &SubmissionRow) -> ReportDocument {
    let rebuilt = catalog
        .resolve_stored(&row.quiz_id)
        .and_then(|(quiz, variant)| rebuild_from_answers(quiz, variant, row));

    match rebuilt {
        Some(mut doc) => {
            if let Some(identification) = doc.sections.first_mut() {
                identification.items.push(Item::Line(format!(
                    "Data: {}",
                    format_notice_time(row.created_at)
                )));
            }
            doc
        }
        None => stored_text_document(row),
    }
}

fn rebuild_from_answers(
    quiz: &QuizDefinition,
    variant: QuizVariant,
    row: &SubmissionRow,
) -> Option<ReportDocument> {
    match (variant, StoredAnswers::from_json(&row.answers)?) {
        (QuizVariant::Open, StoredAnswers::Open(items)) => {
            let texts: BTreeMap<String, String> =
                items.into_iter().map(|a| (a.id, a.text)).collect();
            let result = analyze_open_quiz(quiz, &texts);
            Some(build_report(&row.name, quiz, ReportInput::Open(&result)))
        }
        (QuizVariant::Closed, StoredAnswers::Closed(items)) => {
            let answers = items
                .iter()
                .map(|a| {
                    Some(ClosedAnswer {
                        question: quiz.question(&a.id)?,
                        value: AnswerValue::new(i64::from(a.value))?,
                    })
                })
                .collect::<Option<Vec<_>>>()?;
            let result = evaluate_closed(quiz, answers);
            Some(build_report(&row.name, quiz, ReportInput::Closed(&result)))
        }
        _ => None,
    }
}

/// First stored line becomes the title; blank lines and the disclaimer are dropped.
fn stored_text_document(row: &SubmissionRow) -> ReportDocument {
    let mut lines = row.report.lines().map(str::trim_end);
    let title = lines
        .next()
        .filter(|l| !l.is_empty())
        .unwrap_or("Relatório")
        .to_string();
    let items = lines
        .filter(|l| !l.trim().is_empty() && *l != DISCLAIMER)
        .map(|l| Item::Line(l.to_string()))
        .collect();

    ReportDocument {
        title,
        sections: vec![Section {
            heading: format!("Respostas de {}", row.name),
            items,
        }],
        footer: DISCLAIMER.to_string(),
    }
}
