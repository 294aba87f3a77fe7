//! Word collection endpoints

use axum::{extract::State, Json};
use vocab_core::{Quality, Sm2, WordStore};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// GET /api/words
pub async fn list(State(state): State<AppState>) -> Result<Json<WordListResponse>> {
    let words = state.store.load_words()?;
    Ok(Json(WordListResponse {
        total: words.len(),
        words,
    }))
}

/// POST /api/words
pub async fn import(
    State(state): State<AppState>,
    Json(request): Json<ImportWordsRequest>,
) -> Result<Json<ImportWordsResponse>> {
    if let Some(bad) = request
        .words
        .iter()
        .position(|w| w.term.trim().is_empty() || w.definition.trim().is_empty())
    {
        return Err(ApiError::BadRequest(format!(
            "word {bad} needs both a term and a definition"
        )));
    }

    let words: Vec<Word> = request.words.into_iter().map(NewWord::into_word).collect();
    state.store.save_words(&words)?;
    let total = state.store.load_words()?.len();
    tracing::info!(imported = words.len(), total, "imported words");

    Ok(Json(ImportWordsResponse {
        imported: words.len(),
        total,
    }))
}

/// POST /api/words/review
pub async fn review(
    State(state): State<AppState>,
    Json(request): Json<ReviewRequest>,
) -> Result<Json<ReviewResponse>> {
    let quality = match (request.quality, request.knew_it) {
        (Some(value), _) => Quality::new(value)
            .ok_or_else(|| ApiError::BadRequest(format!("quality must be 0-5, got {value}")))?,
        (None, Some(knew_it)) => Quality::from_knew_it(knew_it),
        (None, None) => {
            return Err(ApiError::BadRequest(
                "either quality or knew_it is required".to_string(),
            ))
        }
    };

    let word = state.store.get_word(request.word_id)?;
    let sm2 = Sm2::default();
    let now = state.clock.now();
    let updated = sm2.apply_response(&word, quality, now);
    state.store.save_word(&updated)?;

    let next_due = updated.state.next_review_date.unwrap_or(now);
    let days_to_mastery = sm2.estimated_days_to_mastery(&updated);
    Ok(Json(ReviewResponse {
        word: updated,
        next_due,
        days_to_mastery,
    }))
}

/// GET /api/words/due
///
/// Words whose SM-2 review is due now.
pub async fn due(State(state): State<AppState>) -> Result<Json<WordListResponse>> {
    let now = state.clock.now();
    let words: Vec<Word> = state
        .store
        .load_words()?
        .into_iter()
        .filter(|w| w.state.is_due_for_review(now))
        .collect();
    Ok(Json(WordListResponse {
        total: words.len(),
        words,
    }))
}
