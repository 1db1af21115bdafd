// Quiz definitions: closed-form pools, open (free-text) questions, and the
// narrative tables the report builder reads. Everything here is immutable
// configuration built once at startup by `catalog::Catalog::builtin`.

pub mod catalog;
pub mod handlers;
pub mod narrative;

use serde::{Deserialize, Serialize};

use crate::engine::scoring::LevelScale;
use crate::quiz::narrative::Narrative;

pub use catalog::Catalog;

/// Highest value any closed-form option may carry. Options span 0..=MAX_OPTION_VALUE.
pub const MAX_OPTION_VALUE: u8 = 4;

/// Prefix stored in `quiz_responses.quiz_id` for free-text submissions.
pub const OPEN_VARIANT_PREFIX: &str = "aberto-";

// ────────────────────────────────────────────────────────────────────────────
// Closed-form questions
// ────────────────────────────────────────────────────────────────────────────

/// Coarseness bucket of a closed question. Exactly one `Base` question per quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Segment {
    Base,
    Sutil,
    Moderado,
    Intenso,
}

/// How the adaptive selector picks the next question for a quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionStrategy {
    /// Prefer questions sharing a tag with the two highest-averaging tags so far.
    TagAffinity,
    /// Pick the sutil/moderado/intenso bucket from the running average answer value.
    Segment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizOption {
    pub label: String,
    pub value: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: String,
    pub text: String,
    pub options: Vec<QuizOption>,
    pub segment: Segment,
    pub tags: Vec<String>,
}

impl QuizQuestion {
    /// Label of the option carrying `value`, if the question defines one.
    pub fn option_label(&self, value: u8) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.label.as_str())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Free-text questions
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenQuizQuestion {
    pub id: String,
    pub text: String,
    pub placeholder: String,
    pub tags: Vec<String>,
    /// Never sent to clients; consumed by the open-text analyzer only.
    #[serde(skip_serializing)]
    pub negative_keywords: Vec<String>,
    #[serde(skip_serializing)]
    pub positive_keywords: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Quiz definition
// ────────────────────────────────────────────────────────────────────────────

/// Landing-page copy shown before the wizard starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizCopy {
    pub subtitle: String,
    pub description: String,
    pub hook_line: String,
    pub urgency_line: String,
    pub social_proof: String,
}

#[derive(Debug, Clone)]
pub struct QuizDefinition {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub copy: QuizCopy,
    /// Number of closed questions asked per session. Must not exceed the pool size.
    pub total_questions: usize,
    pub strategy: SelectionStrategy,
    pub question_pool: Vec<QuizQuestion>,
    /// Empty when the quiz has no free-text version.
    pub open_questions: Vec<OpenQuizQuestion>,
    pub narrative: Narrative,
}

impl QuizDefinition {
    pub fn question(&self, id: &str) -> Option<&QuizQuestion> {
        self.question_pool.iter().find(|q| q.id == id)
    }

    pub fn open_question(&self, id: &str) -> Option<&OpenQuizQuestion> {
        self.open_questions.iter().find(|q| q.id == id)
    }

    /// The question every closed session starts with.
    pub fn base_question(&self) -> Option<&QuizQuestion> {
        self.question_pool
            .iter()
            .find(|q| q.segment == Segment::Base)
    }

    pub fn has_open_variant(&self) -> bool {
        !self.open_questions.is_empty()
    }

    /// Band scale for closed submissions (`total_questions × MAX_OPTION_VALUE`).
    pub fn level_scale(&self) -> LevelScale {
        LevelScale::for_questions(self.total_questions)
    }

    /// Band scale for free-text submissions (one 0–4 score per open question).
    pub fn open_level_scale(&self) -> LevelScale {
        LevelScale::for_questions(self.open_questions.len())
    }

    /// Human label for a tag, falling back to the raw tag.
    pub fn tag_label<'a>(&'a self, tag: &'a str) -> &'a str {
        self.narrative
            .tag_labels
            .get(tag)
            .map(String::as_str)
            .unwrap_or(tag)
    }

    /// Identifier persisted for free-text submissions of this quiz.
    pub fn open_variant_id(&self) -> String {
        format!("{OPEN_VARIANT_PREFIX}{}", self.id)
    }
}

/// Which form of a quiz a stored record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizVariant {
    Closed,
    Open,
}

impl QuizVariant {
    /// Splits a stored `quiz_id` into the catalog id and the variant it denotes.
    pub fn parse_stored_id(stored: &str) -> (&str, QuizVariant) {
        match stored.strip_prefix(OPEN_VARIANT_PREFIX) {
            Some(base) => (base, QuizVariant::Open),
            None => (stored, QuizVariant::Closed),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Public views
// ────────────────────────────────────────────────────────────────────────────

/// Catalog entry as listed on the landing page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSummary {
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(flatten)]
    pub copy: QuizCopy,
    pub total_questions: usize,
    pub has_open_variant: bool,
}

/// Everything a client needs to run either wizard. Keyword lists stay server-side.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizView {
    #[serde(flatten)]
    pub summary: QuizSummary,
    pub strategy: SelectionStrategy,
    pub question_pool: Vec<QuizQuestion>,
    pub open_questions: Vec<OpenQuizQuestion>,
}

impl From<&QuizDefinition> for QuizSummary {
    fn from(quiz: &QuizDefinition) -> Self {
        QuizSummary {
            id: quiz.id.clone(),
            slug: quiz.slug.clone(),
            title: quiz.title.clone(),
            copy: quiz.copy.clone(),
            total_questions: quiz.total_questions,
            has_open_variant: quiz.has_open_variant(),
        }
    }
}

impl From<&QuizDefinition> for QuizView {
    fn from(quiz: &QuizDefinition) -> Self {
        QuizView {
            summary: QuizSummary::from(quiz),
            strategy: quiz.strategy,
            question_pool: quiz.question_pool.clone(),
            open_questions: quiz.open_questions.clone(),
        }
    }
}
