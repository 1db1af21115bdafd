use serde::{Deserialize, Serialize};

use crate::quiz::MAX_OPTION_VALUE;

/// Severity band derived from a total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Level {
    Baixo,
    Moderado,
    Alto,
    MuitoAlto,
}

impl Level {
    pub const ALL: [Level; 4] = [Level::Baixo, Level::Moderado, Level::Alto, Level::MuitoAlto];

    /// Value persisted in `quiz_responses.level`.
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Baixo => "baixo",
            Level::Moderado => "moderado",
            Level::Alto => "alto",
            Level::MuitoAlto => "muito-alto",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Level::Baixo => "Baixo",
            Level::Moderado => "Moderado",
            Level::Alto => "Alto",
            Level::MuitoAlto => "Muito alto",
        }
    }

    pub fn parse(s: &str) -> Option<Level> {
        Level::ALL.into_iter().find(|l| l.as_str() == s)
    }
}

/// A closed-form answer value, guaranteed to lie in 0..=MAX_OPTION_VALUE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct AnswerValue(u8);

impl AnswerValue {
    pub fn new(raw: i64) -> Option<Self> {
        u8::try_from(raw)
            .ok()
            .filter(|v| *v <= MAX_OPTION_VALUE)
            .map(AnswerValue)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for AnswerValue {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        AnswerValue::new(value as i64)
            .ok_or_else(|| format!("answer value {value} outside 0..={MAX_OPTION_VALUE}"))
    }
}

impl From<AnswerValue> for u8 {
    fn from(value: AnswerValue) -> Self {
        value.0
    }
}

/// Total score of a set of answers: the plain sum of their values.
pub fn calculate_score(values: &[AnswerValue]) -> u32 {
    values.iter().map(|v| v.get() as u32).sum()
}

/// Band thresholds for one quiz form, derived from its maximum possible score.
///
/// A score lands in band `k` (0-based) when `score <= (k + 1) × max / 4`,
/// so five questions give `≤5 / ≤10 / ≤15 / rest` and twelve give
/// `≤12 / ≤24 / ≤36 / rest`. Comparisons are done on `score × 4` to stay exact
/// when `max` is not divisible by four.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelScale {
    max_score: u32,
}

impl LevelScale {
    pub fn for_questions(question_count: usize) -> Self {
        LevelScale {
            max_score: question_count as u32 * MAX_OPTION_VALUE as u32,
        }
    }

    pub fn max_score(&self) -> u32 {
        self.max_score
    }

    pub fn level(&self, score: u32) -> Level {
        let scaled = score.saturating_mul(4);
        Level::ALL[..3]
            .iter()
            .zip(1u32..)
            .find(|(_, band)| scaled <= band * self.max_score)
            .map(|(level, _)| *level)
            .unwrap_or(Level::MuitoAlto)
    }
}

/// Band of `score` on `scale`.
pub fn get_level(score: u32, scale: &LevelScale) -> Level {
    scale.level(score)
}
