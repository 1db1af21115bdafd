//! Payload validation for both submission forms.
//!
//! Everything is checked here before the scoring core runs. A validated
//! submission carries catalog references and typed answer values, so the
//! core never sees an unknown question or an out-of-range value.

use std::collections::{BTreeMap, HashSet};

use serde::Deserialize;
use thiserror::Error;

use crate::engine::scoring::AnswerValue;
use crate::engine::ClosedAnswer;
use crate::quiz::{Catalog, QuizDefinition};
use crate::submission::contact::phone_digits;

/// Free-text answers shorter than this (after trimming) count as unanswered.
pub const MIN_OPEN_ANSWER_CHARS: usize = 3;

#[derive(Debug, Error, PartialEq)]
pub enum SubmissionError {
    #[error("quiz '{0}' does not exist")]
    UnknownQuiz(String),

    #[error("name is required")]
    MissingName,

    #[error("an e-mail or phone is required")]
    MissingContact,

    #[error("phone must have 10 or 11 digits")]
    InvalidPhone,

    #[error("quiz '{0}' has no free-text version")]
    NoOpenVariant(String),

    #[error("expected {expected} answers, got {got}")]
    WrongAnswerCount { expected: usize, got: usize },

    #[error("question '{0}' is not part of this quiz")]
    UnknownQuestion(String),

    #[error("question '{0}' was answered more than once")]
    DuplicateAnswer(String),

    #[error("value {value} for question '{question}' is outside 0..=4")]
    ValueOutOfRange { question: String, value: i64 },

    #[error("question '{0}' needs an answer of at least 3 characters")]
    Unanswered(String),
}

impl SubmissionError {
    /// Stable machine-readable name of the rule that failed.
    pub fn rule(&self) -> &'static str {
        match self {
            SubmissionError::UnknownQuiz(_) => "unknown_quiz",
            SubmissionError::MissingName => "name_required",
            SubmissionError::MissingContact => "contact_required",
            SubmissionError::InvalidPhone => "phone_invalid",
            SubmissionError::NoOpenVariant(_) => "open_variant_missing",
            SubmissionError::WrongAnswerCount { .. } => "answer_count",
            SubmissionError::UnknownQuestion(_) => "unknown_question",
            SubmissionError::DuplicateAnswer(_) => "duplicate_answer",
            SubmissionError::ValueOutOfRange { .. } => "value_out_of_range",
            SubmissionError::Unanswered(_) => "unanswered_question",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Request bodies
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseItem {
    pub id: String,
    /// Kept wide so out-of-range values reach validation instead of failing deserialization.
    pub value: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosedSubmissionRequest {
    pub quiz_id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub responses: Vec<ResponseItem>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenSubmissionRequest {
    pub quiz_id: String,
    pub name: String,
    pub phone: String,
    /// Question id → answer text.
    pub answers: BTreeMap<String, String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Validated submissions
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ValidClosedSubmission<'q> {
    pub quiz: &'q QuizDefinition,
    pub contact: Contact,
    pub answers: Vec<ClosedAnswer<'q>>,
}

#[derive(Debug, Clone)]
pub struct ValidOpenSubmission<'q> {
    pub quiz: &'q QuizDefinition,
    pub contact: Contact,
    pub answers: BTreeMap<String, String>,
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn required_name(name: &str) -> Result<String, SubmissionError> {
    non_empty(Some(name)).ok_or(SubmissionError::MissingName)
}

pub fn validate_closed<'q>(
    catalog: &'q Catalog,
    req: &ClosedSubmissionRequest,
) -> Result<ValidClosedSubmission<'q>, SubmissionError> {
    let quiz = catalog
        .by_id(&req.quiz_id)
        .ok_or_else(|| SubmissionError::UnknownQuiz(req.quiz_id.clone()))?;

    let name = required_name(&req.name)?;
    let email = non_empty(req.email.as_deref());
    let phone = non_empty(req.phone.as_deref());
    if email.is_none() && phone.is_none() {
        return Err(SubmissionError::MissingContact);
    }

    if req.responses.len() != quiz.total_questions {
        return Err(SubmissionError::WrongAnswerCount {
            expected: quiz.total_questions,
            got: req.responses.len(),
        });
    }

    let mut seen = HashSet::new();
    let mut answers = Vec::with_capacity(req.responses.len());
    for item in &req.responses {
        let question = quiz
            .question(&item.id)
            .ok_or_else(|| SubmissionError::UnknownQuestion(item.id.clone()))?;
        if !seen.insert(item.id.as_str()) {
            return Err(SubmissionError::DuplicateAnswer(item.id.clone()));
        }
        let value = AnswerValue::new(item.value).ok_or_else(|| SubmissionError::ValueOutOfRange {
            question: item.id.clone(),
            value: item.value,
        })?;
        answers.push(ClosedAnswer { question, value });
    }

    Ok(ValidClosedSubmission {
        quiz,
        contact: Contact { name, email, phone },
        answers,
    })
}

pub fn validate_open<'q>(
    catalog: &'q Catalog,
    req: &OpenSubmissionRequest,
) -> Result<ValidOpenSubmission<'q>, SubmissionError> {
    let quiz = catalog
        .by_id(&req.quiz_id)
        .ok_or_else(|| SubmissionError::UnknownQuiz(req.quiz_id.clone()))?;
    if !quiz.has_open_variant() {
        return Err(SubmissionError::NoOpenVariant(quiz.id.clone()));
    }

    let name = required_name(&req.name)?;
    let phone = phone_digits(&req.phone).ok_or(SubmissionError::InvalidPhone)?;

    if let Some(unknown) = req.answers.keys().find(|id| quiz.open_question(id).is_none()) {
        return Err(SubmissionError::UnknownQuestion(unknown.clone()));
    }
    for question in &quiz.open_questions {
        let answered = req
            .answers
            .get(&question.id)
            .map(|text| text.trim().chars().count() >= MIN_OPEN_ANSWER_CHARS)
            .unwrap_or(false);
        if !answered {
            return Err(SubmissionError::Unanswered(question.id.clone()));
        }
    }

    Ok(ValidOpenSubmission {
        quiz,
        contact: Contact {
            name,
            email: None,
            phone: Some(phone),
        },
        answers: req.answers.clone(),
    })
}
