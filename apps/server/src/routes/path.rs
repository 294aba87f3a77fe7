//! Learning path endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use vocab_core::{LearningPathPlanner, WordStore};

use crate::error::Result;
use crate::models::*;
use crate::AppState;

const DEFAULT_QUEUE_LIMIT: usize = 20;

/// GET /api/path/stats
pub async fn stats(State(state): State<AppState>) -> Result<Json<PathStats>> {
    let words = state.store.load_words()?;
    let planner = LearningPathPlanner::new(&words, state.clock.now());
    Ok(Json(planner.stats()))
}

/// GET /api/path/recommendation
pub async fn recommendation(State(state): State<AppState>) -> Result<Json<Recommendation>> {
    let words = state.store.load_words()?;
    let planner = LearningPathPlanner::new(&words, state.clock.now());
    Ok(Json(planner.recommendation()))
}

/// GET /api/path/queues
pub async fn queues(
    State(state): State<AppState>,
    Query(query): Query<QueuesQuery>,
) -> Result<Json<QueuesResponse>> {
    let limit = query.limit.unwrap_or(DEFAULT_QUEUE_LIMIT);
    let words = state.store.load_words()?;
    let planner = LearningPathPlanner::new(&words, state.clock.now());

    let owned = |queue: Vec<&Word>| queue.into_iter().cloned().collect::<Vec<_>>();
    Ok(Json(QueuesResponse {
        preview: owned(planner.preview_queue(limit)),
        quiz: owned(planner.quiz_queue(limit)),
        deep_learn: owned(planner.deep_learn_queue(limit)),
    }))
}
