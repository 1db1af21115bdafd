use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// One row of `quiz_responses`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SubmissionRow {
    pub id: Uuid,
    /// Catalog id, prefixed with `aberto-` for free-text submissions.
    pub quiz_id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Raw submitted answers, see `StoredAnswers`.
    pub answers: Value,
    pub score: i32,
    pub level: String,
    pub report: String,
    pub created_at: DateTime<Utc>,
}

/// Listing projection for the admin view; the report body is left out.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SubmissionSummaryRow {
    pub id: Uuid,
    pub quiz_id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub score: i32,
    pub level: String,
    pub created_at: DateTime<Utc>,
}

impl From<&SubmissionRow> for SubmissionSummaryRow {
    fn from(row: &SubmissionRow) -> Self {
        SubmissionSummaryRow {
            id: row.id,
            quiz_id: row.quiz_id.clone(),
            name: row.name.clone(),
            email: row.email.clone(),
            phone: row.phone.clone(),
            score: row.score,
            level: row.level.clone(),
            created_at: row.created_at,
        }
    }
}

/// Everything needed to insert a record. `id` and `created_at` are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub quiz_id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub answers: StoredAnswers,
    pub score: i32,
    pub level: String,
    pub report: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredClosedAnswer {
    pub id: String,
    pub value: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredOpenAnswer {
    pub id: String,
    pub text: String,
    pub score: u8,
}

/// JSON shape of `quiz_responses.answers`: `[{id, value}]` or `[{id, text, score}]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredAnswers {
    Open(Vec<StoredOpenAnswer>),
    Closed(Vec<StoredClosedAnswer>),
}

impl StoredAnswers {
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Array(Vec::new()))
    }

    pub fn from_json(value: &Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_closed_answers_round_trip() {
        let answers = StoredAnswers::Closed(vec![
            StoredClosedAnswer {
                id: "ans-base-1".to_string(),
                value: 3,
            },
            StoredClosedAnswer {
                id: "ans-sutil-2".to_string(),
                value: 0,
            },
        ]);
        let json = answers.to_json();
        assert_eq!(json, json!([{"id": "ans-base-1", "value": 3}, {"id": "ans-sutil-2", "value": 0}]));
        assert_eq!(StoredAnswers::from_json(&json), Some(answers));
    }

    #[test]
    fn test_open_answers_round_trip() {
        let answers = StoredAnswers::Open(vec![StoredOpenAnswer {
            id: "ven-open-1".to_string(),
            text: "Aceito e espero o cliente voltar".to_string(),
            score: 4,
        }]);
        let json = answers.to_json();
        assert_eq!(StoredAnswers::from_json(&json), Some(answers));
    }

    #[test]
    fn test_unknown_shape_is_rejected() {
        assert_eq!(StoredAnswers::from_json(&json!({"x": 1})), None);
    }
}
