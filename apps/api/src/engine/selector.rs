//! Adaptive Selector: picks the next closed question for a running session.
//!
//! The flow is client-held state. `AnswerFlow::from_steps` re-validates it
//! on every call so the selector only ever sees a well-formed flow: known
//! ids, no repeats, base question first, length within `total_questions`.
//!
//! Randomness is injected (`R: Rng`) so tests can seed it.

use std::collections::{HashMap, HashSet};

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use thiserror::Error;

use crate::engine::scoring::AnswerValue;
use crate::engine::tags::{rank_tags, top_tags};
use crate::quiz::{QuizDefinition, QuizQuestion, Segment, SelectionStrategy};

/// How many top-ranked tags steer tag-affinity selection.
const PREFERRED_TAGS: usize = 2;
/// Running-average cut-offs for segment selection.
const SUTIL_MAX_AVERAGE: f64 = 1.4;
const MODERADO_MAX_AVERAGE: f64 = 2.6;

#[derive(Debug, Error, PartialEq)]
pub enum FlowError {
    #[error("question '{0}' is not part of this quiz")]
    UnknownQuestion(String),

    #[error("question '{0}' appears more than once in the flow")]
    DuplicateQuestion(String),

    #[error("flow has {len} questions but the quiz asks only {max}")]
    TooLong { len: usize, max: usize },

    #[error("the flow must start with the base question '{0}'")]
    MustStartWithBase(String),

    #[error("value {value} for question '{question}' is outside 0..=4")]
    ValueOutOfRange { question: String, value: i64 },
}

/// One entry of a client-submitted flow.
#[derive(Debug, Clone, Deserialize)]
pub struct FlowStep {
    pub id: String,
    #[serde(default)]
    pub value: Option<i64>,
}

/// Ordered questions presented so far plus the values chosen for them.
#[derive(Debug, Clone, Default)]
pub struct AnswerFlow {
    questions: Vec<String>,
    answers: HashMap<String, AnswerValue>,
}

impl AnswerFlow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a flow from untrusted client steps, enforcing every flow invariant.
    pub fn from_steps(quiz: &QuizDefinition, steps: &[FlowStep]) -> Result<Self, FlowError> {
        let mut flow = AnswerFlow::new();
        for (position, step) in steps.iter().enumerate() {
            if position == 0 {
                if let Some(base) = quiz.base_question() {
                    if step.id != base.id {
                        return Err(FlowError::MustStartWithBase(base.id.clone()));
                    }
                }
            }
            flow.push(quiz, &step.id)?;
            if let Some(raw) = step.value {
                let value = AnswerValue::new(raw).ok_or_else(|| FlowError::ValueOutOfRange {
                    question: step.id.clone(),
                    value: raw,
                })?;
                flow.record(&step.id, value);
            }
        }
        Ok(flow)
    }

    /// Appends a question to the flow.
    pub fn push(&mut self, quiz: &QuizDefinition, question_id: &str) -> Result<(), FlowError> {
        if quiz.question(question_id).is_none() {
            return Err(FlowError::UnknownQuestion(question_id.to_string()));
        }
        if self.contains(question_id) {
            return Err(FlowError::DuplicateQuestion(question_id.to_string()));
        }
        if self.questions.len() >= quiz.total_questions {
            return Err(FlowError::TooLong {
                len: self.questions.len() + 1,
                max: quiz.total_questions,
            });
        }
        self.questions.push(question_id.to_string());
        Ok(())
    }

    /// Records the value chosen for a question already in the flow. Ignored otherwise.
    pub fn record(&mut self, question_id: &str, value: AnswerValue) {
        if self.contains(question_id) {
            self.answers.insert(question_id.to_string(), value);
        }
    }

    pub fn contains(&self, question_id: &str) -> bool {
        self.questions.iter().any(|q| q == question_id)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn value(&self, question_id: &str) -> Option<AnswerValue> {
        self.answers.get(question_id).copied()
    }

    /// Answered questions in flow order.
    pub fn answered<'q>(
        &'q self,
        quiz: &'q QuizDefinition,
    ) -> impl Iterator<Item = (&'q QuizQuestion, AnswerValue)> + 'q {
        self.questions.iter().filter_map(move |id| {
            let value = self.value(id)?;
            quiz.question(id).map(|q| (q, value))
        })
    }
}

/// Chooses the next question, or `None` once the flow holds `total_questions`.
///
/// An empty flow always gets the base question. Afterwards candidates come
/// from the quiz's declared strategy; when that yields nothing, every unused
/// non-base question is eligible. The catalog guarantees the pool is large
/// enough, so a non-complete flow always gets a question.
pub fn select_next_question<'q, R>(
    quiz: &'q QuizDefinition,
    flow: &AnswerFlow,
    rng: &mut R,
) -> Option<&'q QuizQuestion>
where
    R: Rng + ?Sized,
{
    if flow.len() >= quiz.total_questions {
        return None;
    }
    if flow.is_empty() {
        return quiz.base_question();
    }

    let unused: Vec<&QuizQuestion> = quiz
        .question_pool
        .iter()
        .filter(|q| q.segment != Segment::Base && !flow.contains(&q.id))
        .collect();

    let candidates = match quiz.strategy {
        SelectionStrategy::TagAffinity => tag_affinity_candidates(quiz, flow, &unused),
        SelectionStrategy::Segment => segment_candidates(quiz, flow, &unused),
    };

    let pool = if candidates.is_empty() { &unused } else { &candidates };
    pool.choose(rng).copied()
}

fn tag_affinity_candidates<'q>(
    quiz: &QuizDefinition,
    flow: &AnswerFlow,
    unused: &[&'q QuizQuestion],
) -> Vec<&'q QuizQuestion> {
    let ranking = rank_tags(
        flow.answered(quiz)
            .map(|(q, value)| (q.tags.as_slice(), value.get())),
    );
    let preferred: HashSet<&str> = top_tags(&ranking, PREFERRED_TAGS).into_iter().collect();

    unused
        .iter()
        .filter(|q| q.tags.iter().any(|t| preferred.contains(t.as_str())))
        .copied()
        .collect()
}

fn segment_candidates<'q>(
    quiz: &QuizDefinition,
    flow: &AnswerFlow,
    unused: &[&'q QuizQuestion],
) -> Vec<&'q QuizQuestion> {
    let target = target_segment(running_average(quiz, flow));
    unused
        .iter()
        .filter(|q| q.segment == target)
        .copied()
        .collect()
}

fn running_average(quiz: &QuizDefinition, flow: &AnswerFlow) -> f64 {
    let (sum, count) = flow
        .answered(quiz)
        .fold((0u32, 0u32), |(sum, count), (_, v)| (sum + v.get() as u32, count + 1));
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}

fn target_segment(average: f64) -> Segment {
    if average <= SUTIL_MAX_AVERAGE {
        Segment::Sutil
    } else if average <= MODERADO_MAX_AVERAGE {
        Segment::Moderado
    } else {
        Segment::Intenso
    }
}
