//! Score endpoint

use axum::{
    extract::{Query, State},
    Json,
};
use vocab_core::{ScoreEstimator, ScoreInputs, WordStore};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// Response time assumed when the client has not measured one.
const DEFAULT_RESPONSE_TIME_SECS: f64 = 10.0;

/// GET /api/score
pub async fn estimate(
    State(state): State<AppState>,
    Query(query): Query<ScoreQuery>,
) -> Result<Json<ScoreReport>> {
    let avg_response_time_secs = query
        .avg_response_time_secs
        .unwrap_or(DEFAULT_RESPONSE_TIME_SECS);
    if !avg_response_time_secs.is_finite() || avg_response_time_secs < 0.0 {
        return Err(ApiError::BadRequest(
            "avg_response_time_secs must be a non-negative number".to_string(),
        ));
    }

    let words = state.store.load_words()?;
    let inputs = ScoreInputs::from_words(&words, avg_response_time_secs);
    let report = ScoreEstimator.report(
        &inputs,
        state.settings.target_score,
        query.words_per_day.unwrap_or(0),
        query.days_remaining.unwrap_or(0),
    );
    Ok(Json(report))
}
