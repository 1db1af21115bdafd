//! Open-Text Analyzer.
//!
//! Scores a free-text answer 0–4 from keyword hits with a deliberate
//! negative bias: short (evasive) and keyword-free (neutral) answers are
//! read as concern, never as a clean zero. The band thresholds and the
//! long-answer override below are the product's observable contract.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::engine::scoring::{get_level, Level};
use crate::engine::tags::{rank_tags, TagScore};
use crate::quiz::{OpenQuizQuestion, QuizDefinition, MAX_OPTION_VALUE};

/// Trimmed answers shorter than this are treated as evasive.
pub const EVASIVE_MAX_CHARS: usize = 15;
const EVASIVE_SCORE: u8 = 3;
const NEUTRAL_SCORE: u8 = 2;
/// Raw answers longer than this with at most one positive hit never score below 2.
const LONG_ANSWER_CHARS: usize = 100;

/// Lower-cases, strips diacritics, turns everything outside `[a-z0-9]` into
/// spaces and collapses runs of whitespace.
pub fn normalize(text: &str) -> String {
    let folded: String = text
        .to_lowercase()
        .nfd()
        .filter(|c| !('\u{0300}'..='\u{036f}').contains(c))
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                c
            } else {
                ' '
            }
        })
        .collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Words, adjacent-word bigrams and the whole normalized text.
fn search_pool(normalized: &str) -> Vec<String> {
    let words: Vec<&str> = normalized.split(' ').filter(|w| !w.is_empty()).collect();
    let mut pool: Vec<String> = words.iter().map(|w| w.to_string()).collect();
    pool.extend(words.windows(2).map(|pair| format!("{} {}", pair[0], pair[1])));
    pool.push(normalized.to_string());
    pool
}

/// Keywords (in catalog spelling) found by substring containment in the pool.
fn matched_keywords(keywords: &[String], pool: &[String]) -> Vec<String> {
    keywords
        .iter()
        .filter(|kw| {
            let needle = normalize(kw);
            !needle.is_empty() && pool.iter().any(|entry| entry.contains(&needle))
        })
        .cloned()
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenAnswerAnalysis {
    pub question_id: String,
    pub text: String,
    pub negative_hits: Vec<String>,
    pub positive_hits: Vec<String>,
    pub score: u8,
    pub tags: Vec<String>,
}

impl OpenAnswerAnalysis {
    pub fn is_evasive(&self) -> bool {
        self.text.trim().chars().count() < EVASIVE_MAX_CHARS
    }
}

pub fn analyze_open_answer(question: &OpenQuizQuestion, text: &str) -> OpenAnswerAnalysis {
    let normalized = normalize(text);
    let pool = search_pool(&normalized);
    let negative_hits = matched_keywords(&question.negative_keywords, &pool);
    let positive_hits = matched_keywords(&question.positive_keywords, &pool);

    let score = score_answer(text, negative_hits.len(), positive_hits.len());

    OpenAnswerAnalysis {
        question_id: question.id.clone(),
        text: text.to_string(),
        negative_hits,
        positive_hits,
        score,
        tags: question.tags.clone(),
    }
}

fn score_answer(text: &str, negative: usize, positive: usize) -> u8 {
    if text.trim().chars().count() < EVASIVE_MAX_CHARS {
        return EVASIVE_SCORE;
    }
    if negative == 0 && positive == 0 {
        return NEUTRAL_SCORE;
    }

    let ratio = negative as f64 / (negative + positive) as f64;
    let mut score = match ratio {
        r if r >= 0.8 => 4,
        r if r >= 0.6 => 3,
        r if r >= 0.4 => 2,
        r if r >= 0.2 => 1,
        _ => 0,
    };

    if text.chars().count() > LONG_ANSWER_CHARS && positive <= 1 && score < NEUTRAL_SCORE {
        score = NEUTRAL_SCORE;
    }

    score.min(MAX_OPTION_VALUE)
}

// ────────────────────────────────────────────────────────────────────────────
// Whole submission
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenQuizResult {
    pub analyses: Vec<OpenAnswerAnalysis>,
    pub total_score: u32,
    pub level: Level,
    pub tag_ranking: Vec<TagScore>,
}

impl OpenQuizResult {
    pub fn total_negative_hits(&self) -> usize {
        self.analyses.iter().map(|a| a.negative_hits.len()).sum()
    }
}

/// Analyzes every open question of `quiz`, in catalog order. Missing answers count as empty.
pub fn analyze_open_quiz(quiz: &QuizDefinition, answers: &BTreeMap<String, String>) -> OpenQuizResult {
    let analyses: Vec<OpenAnswerAnalysis> = quiz
        .open_questions
        .iter()
        .map(|q| {
            let text = answers.get(&q.id).map(String::as_str).unwrap_or("");
            analyze_open_answer(q, text)
        })
        .collect();

    let total_score = analyses.iter().map(|a| a.score as u32).sum();
    let level = get_level(total_score, &quiz.open_level_scale());
    let tag_ranking = rank_tags(analyses.iter().map(|a| (a.tags.as_slice(), a.score)));

    OpenQuizResult {
        analyses,
        total_score,
        level,
        tag_ranking,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::Catalog;

    fn question(negative: &[&str], positive: &[&str]) -> OpenQuizQuestion {
        OpenQuizQuestion {
            id: "q1".to_string(),
            text: "Como você reage?".to_string(),
            placeholder: String::new(),
            tags: vec!["sono".to_string()],
            negative_keywords: negative.iter().map(|s| s.to_string()).collect(),
            positive_keywords: positive.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_normalize_strips_accents_and_punctuation() {
        assert_eq!(normalize("  Não SEI, é   difícil!! "), "nao sei e dificil");
        assert_eq!(normalize("Coração\tpreocupação"), "coracao preocupacao");
        assert_eq!(normalize("!!"), "");
    }

    #[test]
    fn test_short_answers_score_three() {
        let q = question(&["medo"], &["calmo"]);
        assert_eq!(analyze_open_answer(&q, "ok").score, 3);
        assert_eq!(analyze_open_answer(&q, "maybe").score, 3);
        // Keyword content does not matter below the evasive threshold.
        assert_eq!(analyze_open_answer(&q, "calmo").score, 3);
        assert_eq!(analyze_open_answer(&q, "   medo       ").score, 3);
    }

    #[test]
    fn test_no_keywords_scores_two() {
        let q = question(&["medo"], &["calmo"]);
        let a = analyze_open_answer(&q, "Eu costumo sair para caminhar no parque");
        assert!(a.negative_hits.is_empty() && a.positive_hits.is_empty());
        assert_eq!(a.score, 2);
    }

    #[test]
    fn test_positive_only_scores_zero() {
        let q = question(&["medo"], &["calmo", "tranquilo"]);
        let a = analyze_open_answer(&q, "Fico calmo e tranquilo quase sempre");
        assert_eq!(a.positive_hits.len(), 2);
        assert_eq!(a.score, 0);
    }

    #[test]
    fn test_ratio_bands() {
        let q = question(&["medo", "trava", "panico", "suor"], &["calmo"]);
        // 4 negative, 1 positive -> 0.8
        let a = analyze_open_answer(&q, "medo trava pânico suor mas calmo");
        assert_eq!(a.score, 4);
        // 1 negative, 1 positive -> 0.5
        let a = analyze_open_answer(&q, "tenho medo, depois fico calmo");
        assert_eq!(a.score, 2);
    }

    #[test]
    fn test_matching_ignores_accents_and_uses_substrings() {
        let q = question(&["preocupação", "não sei"], &[]);
        let a = analyze_open_answer(&q, "Sinto PREOCUPACOES e nao sei o que fazer");
        assert_eq!(a.negative_hits, vec!["não sei".to_string()]);

        let a = analyze_open_answer(&q, "Vivo em preocupação constante comigo");
        assert_eq!(a.negative_hits, vec!["preocupação".to_string()]);
        assert_eq!(a.score, 4);
    }

    #[test]
    fn test_long_answer_override_boundary() {
        let q = question(&["medo"], &["calmo"]);
        let filler = |len: usize| {
            let mut text = String::from("fico calmo ");
            while text.chars().count() < len {
                text.push('a');
            }
            text
        };

        let long = filler(120);
        assert_eq!(long.chars().count(), 120);
        let a = analyze_open_answer(&q, &long);
        assert_eq!((a.negative_hits.len(), a.positive_hits.len()), (0, 1));
        assert_eq!(a.score, 2);

        let at_limit = filler(100);
        assert_eq!(analyze_open_answer(&q, &at_limit).score, 0);
    }

    #[test]
    fn test_override_needs_at_most_one_positive() {
        let q = question(&[], &["calmo", "sereno"]);
        let mut text = String::from("fico calmo e sereno ");
        text.push_str(&"x".repeat(110));
        assert_eq!(analyze_open_answer(&q, &text).score, 0);
    }

    #[test]
    fn test_evasive_quiz_scores_three_everywhere() {
        let catalog = Catalog::builtin().unwrap();
        for quiz in catalog.all() {
            let answers: BTreeMap<String, String> = quiz
                .open_questions
                .iter()
                .map(|q| (q.id.clone(), "maybe".to_string()))
                .collect();
            let result = analyze_open_quiz(quiz, &answers);
            assert!(result.analyses.iter().all(|a| a.score == 3));
            assert_eq!(result.total_score, 15);
            assert_eq!(result.level, Level::Alto);
        }
    }

    #[test]
    fn test_open_quiz_ranks_tags_by_answer_score() {
        let catalog = Catalog::builtin().unwrap();
        let quiz = catalog.by_id("vendas").unwrap();
        let mut answers = BTreeMap::new();
        for q in &quiz.open_questions {
            answers.insert(q.id.clone(), "Eu pergunto, escuto e entendo o cliente com calma".to_string());
        }
        answers.insert(
            "ven-open-5".to_string(),
            "Evito prospectar, tenho medo de rejeição e procrastino".to_string(),
        );
        let result = analyze_open_quiz(quiz, &answers);
        assert_eq!(result.analyses.len(), 5);
        let top: Vec<&str> = result.tag_ranking.iter().take(2).map(|t| t.tag.as_str()).collect();
        assert_eq!(top, vec!["mentalidade", "prospeccao"]);
        assert!(result.total_negative_hits() >= 3);
    }
}
