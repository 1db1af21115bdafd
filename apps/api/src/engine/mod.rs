// Scoring core: pure functions over catalog data. Nothing in here touches
// I/O, so handlers call it inline and tests drive it directly.

pub mod open_text;
pub mod scoring;
pub mod selector;
pub mod tags;

use crate::engine::scoring::{calculate_score, get_level, AnswerValue, Level};
use crate::engine::tags::{rank_tags, TagScore};
use crate::quiz::{QuizDefinition, QuizQuestion};

/// One answered closed question, already resolved against the catalog.
#[derive(Debug, Clone, Copy)]
pub struct ClosedAnswer<'q> {
    pub question: &'q QuizQuestion,
    pub value: AnswerValue,
}

impl ClosedAnswer<'_> {
    /// Text of the chosen option, or the raw value if the question has no such option.
    pub fn choice_label(&self) -> String {
        self.question
            .option_label(self.value.get())
            .map(str::to_string)
            .unwrap_or_else(|| self.value.get().to_string())
    }
}

#[derive(Debug, Clone)]
pub struct ClosedResult<'q> {
    pub answers: Vec<ClosedAnswer<'q>>,
    pub total_score: u32,
    pub level: Level,
    pub tag_ranking: Vec<TagScore>,
}

/// Scores a complete closed-form session. Callers validate the answer set first.
pub fn evaluate_closed<'q>(quiz: &QuizDefinition, answers: Vec<ClosedAnswer<'q>>) -> ClosedResult<'q> {
    let values: Vec<AnswerValue> = answers.iter().map(|a| a.value).collect();
    let total_score = calculate_score(&values);
    let level = get_level(total_score, &quiz.level_scale());
    let tag_ranking = rank_tags(
        answers
            .iter()
            .map(|a| (a.question.tags.as_slice(), a.value.get())),
    );

    ClosedResult {
        answers,
        total_score,
        level,
        tag_ranking,
    }
}
