//! Built-in quiz catalog and its load-time invariants.
//!
//! `Catalog::builtin()` runs once in `main`; a definition that breaks an
//! invariant aborts startup instead of surfacing as a runtime failure in the
//! adaptive selector or the scorer.

mod ansiedade;
mod comunicacao;
mod options;
mod vendas;

use std::collections::{BTreeMap, HashSet};

use thiserror::Error;

use crate::engine::open_text::normalize;
use crate::quiz::{
    OpenQuizQuestion, QuizDefinition, QuizOption, QuizQuestion, QuizVariant, Segment,
    MAX_OPTION_VALUE,
};

#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("duplicate quiz id or slug '{0}'")]
    DuplicateQuiz(String),

    #[error("quiz '{quiz}' must have exactly one base question, found {found}")]
    BaseQuestion { quiz: String, found: usize },

    #[error("quiz '{quiz}' defines question '{question}' more than once")]
    DuplicateQuestion { quiz: String, question: String },

    #[error("question '{question}' in quiz '{quiz}' has option value {value} outside 0..={max}", max = MAX_OPTION_VALUE)]
    OptionOutOfRange {
        quiz: String,
        question: String,
        value: u8,
    },

    #[error("question '{question}' in quiz '{quiz}' must offer each value 0..={max} exactly once", max = MAX_OPTION_VALUE)]
    OptionScale { quiz: String, question: String },

    #[error("quiz '{quiz}' asks {total} questions but its pool only holds {pool}")]
    PoolTooSmall {
        quiz: String,
        total: usize,
        pool: usize,
    },

    #[error("open question '{question}' in quiz '{quiz}' has a keyword that normalizes to nothing")]
    EmptyKeyword { quiz: String, question: String },

    #[error("tag '{tag}' in quiz '{quiz}' has no label")]
    MissingTagLabel { quiz: String, tag: String },

    #[error("quiz '{quiz}' must define 3 recommendations per level")]
    RecommendationCount { quiz: String },
}

/// Immutable set of quiz definitions, shared through `AppState`.
#[derive(Debug, Clone)]
pub struct Catalog {
    quizzes: Vec<QuizDefinition>,
}

impl Catalog {
    /// The three product quizzes: anxiety, communication and sales.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_definitions(vec![
            ansiedade::definition(),
            comunicacao::definition(),
            vendas::definition(),
        ])
    }

    pub fn from_definitions(quizzes: Vec<QuizDefinition>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for quiz in &quizzes {
            if !seen.insert(quiz.id.clone()) {
                return Err(CatalogError::DuplicateQuiz(quiz.id.clone()));
            }
            if quiz.slug != quiz.id && !seen.insert(quiz.slug.clone()) {
                return Err(CatalogError::DuplicateQuiz(quiz.slug.clone()));
            }
            validate_definition(quiz)?;
        }
        Ok(Catalog { quizzes })
    }

    pub fn all(&self) -> &[QuizDefinition] {
        &self.quizzes
    }

    pub fn by_id(&self, id: &str) -> Option<&QuizDefinition> {
        self.quizzes.iter().find(|q| q.id == id)
    }

    pub fn by_slug(&self, slug: &str) -> Option<&QuizDefinition> {
        self.quizzes.iter().find(|q| q.slug == slug)
    }

    /// Resolves a persisted `quiz_id` (possibly prefixed for free text).
    pub fn resolve_stored(&self, stored_id: &str) -> Option<(&QuizDefinition, QuizVariant)> {
        let (id, variant) = QuizVariant::parse_stored_id(stored_id);
        self.by_id(id).map(|quiz| (quiz, variant))
    }
}

fn validate_definition(quiz: &QuizDefinition) -> Result<(), CatalogError> {
    let bases = quiz
        .question_pool
        .iter()
        .filter(|q| q.segment == Segment::Base)
        .count();
    if bases != 1 {
        return Err(CatalogError::BaseQuestion {
            quiz: quiz.id.clone(),
            found: bases,
        });
    }

    if quiz.total_questions == 0 || quiz.total_questions > quiz.question_pool.len() {
        return Err(CatalogError::PoolTooSmall {
            quiz: quiz.id.clone(),
            total: quiz.total_questions,
            pool: quiz.question_pool.len(),
        });
    }

    let mut ids = HashSet::new();
    for question in &quiz.question_pool {
        if !ids.insert(question.id.as_str()) {
            return Err(CatalogError::DuplicateQuestion {
                quiz: quiz.id.clone(),
                question: question.id.clone(),
            });
        }
        if let Some(bad) = question.options.iter().find(|o| o.value > MAX_OPTION_VALUE) {
            return Err(CatalogError::OptionOutOfRange {
                quiz: quiz.id.clone(),
                question: question.id.clone(),
                value: bad.value,
            });
        }
        let mut values: Vec<u8> = question.options.iter().map(|o| o.value).collect();
        values.sort_unstable();
        if !values.into_iter().eq(0..=MAX_OPTION_VALUE) {
            return Err(CatalogError::OptionScale {
                quiz: quiz.id.clone(),
                question: question.id.clone(),
            });
        }
    }

    for question in &quiz.open_questions {
        if !ids.insert(question.id.as_str()) {
            return Err(CatalogError::DuplicateQuestion {
                quiz: quiz.id.clone(),
                question: question.id.clone(),
            });
        }
        let empty_keyword = question
            .negative_keywords
            .iter()
            .chain(&question.positive_keywords)
            .any(|kw| normalize(kw).is_empty());
        if empty_keyword {
            return Err(CatalogError::EmptyKeyword {
                quiz: quiz.id.clone(),
                question: question.id.clone(),
            });
        }
    }

    let tags = quiz
        .question_pool
        .iter()
        .flat_map(|q| &q.tags)
        .chain(quiz.open_questions.iter().flat_map(|q| &q.tags));
    for tag in tags {
        if !quiz.narrative.tag_labels.contains_key(tag) {
            return Err(CatalogError::MissingTagLabel {
                quiz: quiz.id.clone(),
                tag: tag.clone(),
            });
        }
    }

    let recs = &quiz.narrative.recommendations;
    if [&recs.baixo, &recs.moderado, &recs.alto, &recs.muito_alto]
        .iter()
        .any(|r| r.len() != 3)
    {
        return Err(CatalogError::RecommendationCount {
            quiz: quiz.id.clone(),
        });
    }

    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Builders shared by the definition files
// ────────────────────────────────────────────────────────────────────────────

fn closed(
    id: &str,
    text: &str,
    options: Vec<QuizOption>,
    segment: Segment,
    tags: &[&str],
) -> QuizQuestion {
    QuizQuestion {
        id: id.to_string(),
        text: text.to_string(),
        options,
        segment,
        tags: strings(tags),
    }
}

fn open(
    id: &str,
    text: &str,
    placeholder: &str,
    tags: &[&str],
    negative: &[&str],
    positive: &[&str],
) -> OpenQuizQuestion {
    OpenQuizQuestion {
        id: id.to_string(),
        text: text.to_string(),
        placeholder: placeholder.to_string(),
        tags: strings(tags),
        negative_keywords: strings(negative),
        positive_keywords: strings(positive),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn table(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn tips(pairs: &[(&str, [&str; 2])]) -> BTreeMap<String, Vec<String>> {
    pairs
        .iter()
        .map(|(tag, items)| (tag.to_string(), strings(items)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::SelectionStrategy;

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = Catalog::builtin().expect("builtin catalog must satisfy its invariants");
        assert_eq!(catalog.all().len(), 3);
        for quiz in catalog.all() {
            assert_eq!(quiz.total_questions, 5);
            assert_eq!(quiz.question_pool.len(), 13);
            assert_eq!(quiz.open_questions.len(), 5);
            assert!(quiz.base_question().is_some());
        }
    }

    #[test]
    fn test_each_quiz_declares_a_strategy() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(
            catalog.by_id("ansiedade").unwrap().strategy,
            SelectionStrategy::Segment
        );
        assert_eq!(
            catalog.by_id("vendas").unwrap().strategy,
            SelectionStrategy::TagAffinity
        );
    }

    #[test]
    fn test_resolve_stored_open_id() {
        let catalog = Catalog::builtin().unwrap();
        let (quiz, variant) = catalog.resolve_stored("aberto-comunicacao").unwrap();
        assert_eq!(quiz.id, "comunicacao");
        assert_eq!(variant, QuizVariant::Open);
        assert!(catalog.resolve_stored("aberto-inexistente").is_none());
    }

    #[test]
    fn test_rejects_pool_smaller_than_session() {
        let mut quiz = ansiedade::definition();
        quiz.total_questions = quiz.question_pool.len() + 1;
        let err = Catalog::from_definitions(vec![quiz]).unwrap_err();
        assert!(matches!(err, CatalogError::PoolTooSmall { .. }));
    }

    #[test]
    fn test_rejects_second_base_question() {
        let mut quiz = vendas::definition();
        quiz.question_pool[1].segment = Segment::Base;
        let err = Catalog::from_definitions(vec![quiz]).unwrap_err();
        assert_eq!(
            err,
            CatalogError::BaseQuestion {
                quiz: "vendas".to_string(),
                found: 2
            }
        );
    }

    #[test]
    fn test_rejects_option_value_above_four() {
        let mut quiz = comunicacao::definition();
        quiz.question_pool[3].options[4].value = 5;
        let err = Catalog::from_definitions(vec![quiz]).unwrap_err();
        assert!(matches!(err, CatalogError::OptionOutOfRange { value: 5, .. }));
    }

    #[test]
    fn test_rejects_option_scale_with_gaps() {
        let mut quiz = vendas::definition();
        quiz.question_pool[2].options.retain(|o| o.value == 0 || o.value == 4);
        let err = Catalog::from_definitions(vec![quiz]).unwrap_err();
        assert!(matches!(err, CatalogError::OptionScale { .. }));
    }

    #[test]
    fn test_rejects_repeated_option_value() {
        let mut quiz = ansiedade::definition();
        quiz.question_pool[5].options[1].value = 2;
        let err = Catalog::from_definitions(vec![quiz]).unwrap_err();
        assert!(matches!(err, CatalogError::OptionScale { .. }));
    }

    #[test]
    fn test_rejects_question_without_options() {
        let mut quiz = comunicacao::definition();
        quiz.question_pool[0].options.clear();
        let err = Catalog::from_definitions(vec![quiz]).unwrap_err();
        assert!(matches!(err, CatalogError::OptionScale { .. }));
    }

    #[test]
    fn test_rejects_keyword_without_letters() {
        let mut quiz = ansiedade::definition();
        quiz.open_questions[0].negative_keywords.push("!!".to_string());
        let err = Catalog::from_definitions(vec![quiz]).unwrap_err();
        assert!(matches!(err, CatalogError::EmptyKeyword { .. }));
    }

    #[test]
    fn test_rejects_unlabelled_tag() {
        let mut quiz = vendas::definition();
        quiz.question_pool[2].tags.push("misterio".to_string());
        let err = Catalog::from_definitions(vec![quiz]).unwrap_err();
        assert!(matches!(err, CatalogError::MissingTagLabel { .. }));
    }

    #[test]
    fn test_rejects_duplicate_quiz() {
        let err =
            Catalog::from_definitions(vec![vendas::definition(), vendas::definition()]).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateQuiz("vendas".to_string()));
    }
}
