use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::engine::selector::{select_next_question, AnswerFlow, FlowStep};
use crate::errors::AppError;
use crate::quiz::{QuizDefinition, QuizQuestion, QuizSummary, QuizView};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct NextQuestionRequest {
    #[serde(default)]
    pub flow: Vec<FlowStep>,
}

#[derive(Serialize)]
pub struct NextQuestionResponse {
    /// `null` once the flow already holds every question of the session.
    pub question: Option<QuizQuestion>,
    /// Questions still to be shown, the returned one included.
    pub remaining: usize,
}

fn find_quiz<'a>(state: &'a AppState, slug: &str) -> Result<&'a QuizDefinition, AppError> {
    state
        .catalog
        .by_slug(slug)
        .ok_or_else(|| AppError::NotFound(format!("Quiz '{slug}' not found")))
}

/// GET /api/v1/quizzes
pub async fn handle_list_quizzes(State(state): State<AppState>) -> Json<Vec<QuizSummary>> {
    Json(state.catalog.all().iter().map(QuizSummary::from).collect())
}

/// GET /api/v1/quizzes/:slug
pub async fn handle_get_quiz(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<QuizView>, AppError> {
    let quiz = find_quiz(&state, &slug)?;
    Ok(Json(QuizView::from(quiz)))
}

/// POST /api/v1/quizzes/:slug/next
pub async fn handle_next_question(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(req): Json<NextQuestionRequest>,
) -> Result<Json<NextQuestionResponse>, AppError> {
    let quiz = find_quiz(&state, &slug)?;
    let flow = AnswerFlow::from_steps(quiz, &req.flow)?;

    let question = select_next_question(quiz, &flow, &mut rand::thread_rng()).cloned();

    Ok(Json(NextQuestionResponse {
        question,
        remaining: quiz.total_questions - flow.len(),
    }))
}
