//! Daily session endpoints

use axum::{extract::State, Json};
use rand::rngs::StdRng;
use rand::SeedableRng;
use vocab_core::{DailySession, LearningPathPlanner, Submission, WordStore};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::state::ActiveSession;
use crate::AppState;

/// POST /api/session
///
/// Plans a session from the current word collection and starts it. A finished
/// session is replaced; one still in progress is not.
pub async fn start(State(state): State<AppState>) -> Result<Json<SessionResponse>> {
    let mut engine = state.engine.lock().await;
    if engine.session.as_ref().is_some_and(|s| !s.is_complete()) {
        return Err(ApiError::Conflict(
            "a session is already in progress".to_string(),
        ));
    }

    let words = state.store.load_words()?;
    let now = state.clock.now();
    let config = LearningPathPlanner::new(&words, now).build_session(
        state.settings.preview_count,
        state.settings.quiz_goal,
        &mut engine.rng,
    );
    tracing::info!(
        preview = config.preview_words.len(),
        quiz = config.quiz_words.len(),
        deep = config.deep_learn_word.is_some(),
        "starting session"
    );

    let rng = StdRng::from_rng(&mut engine.rng);
    let session = engine.session.insert(DailySession::start(
        config,
        state.store.clone(),
        state.clock.clone(),
        rng,
    ));
    Ok(Json(SessionResponse::from_session(session, None)))
}

/// GET /api/session
pub async fn current(State(state): State<AppState>) -> Result<Json<SessionResponse>> {
    with_session(&state, |_| Ok(None)).await
}

/// POST /api/session/preview/next
pub async fn preview_next(State(state): State<AppState>) -> Result<Json<SessionResponse>> {
    with_session(&state, |session| {
        session.advance_preview();
        Ok(None)
    })
    .await
}

/// POST /api/session/quiz/answer
///
/// An option id the question does not offer, or the wrong kind of answer for
/// the question, is rejected without being scored.
pub async fn quiz_answer(
    State(state): State<AppState>,
    Json(request): Json<QuizAnswerRequest>,
) -> Result<Json<SessionResponse>> {
    let submission = match (request.option_id, request.text) {
        (Some(id), _) => Submission::Option(id),
        (None, Some(text)) => Submission::Text(text),
        (None, None) => {
            return Err(ApiError::BadRequest(
                "either option_id or text is required".to_string(),
            ))
        }
    };
    with_session(&state, |session| {
        session
            .submit(submission)
            .map(Some)
            .ok_or_else(|| not_accepted("the current question"))
    })
    .await
}

/// POST /api/session/quiz/next
pub async fn quiz_next(State(state): State<AppState>) -> Result<Json<SessionResponse>> {
    with_session(&state, |session| {
        session.proceed();
        Ok(None)
    })
    .await
}

/// POST /api/session/deep/answer
pub async fn deep_answer(
    State(state): State<AppState>,
    Json(request): Json<DeepAnswerRequest>,
) -> Result<Json<SessionResponse>> {
    with_session(&state, |session| {
        session
            .submit_deep(request.option_id)
            .map(Some)
            .ok_or_else(|| not_accepted("the deep-moment question"))
    })
    .await
}

/// POST /api/session/deep/skip
pub async fn deep_skip(State(state): State<AppState>) -> Result<Json<SessionResponse>> {
    with_session(&state, |session| {
        session.skip_deep();
        Ok(None)
    })
    .await
}

/// POST /api/session/finish
pub async fn finish(State(state): State<AppState>) -> Result<Json<SessionResponse>> {
    with_session(&state, |session| {
        session.finish();
        Ok(None)
    })
    .await
}

async fn with_session<F>(state: &AppState, f: F) -> Result<Json<SessionResponse>>
where
    F: FnOnce(&mut ActiveSession) -> Result<Option<AnswerValidation>>,
{
    let mut engine = state.engine.lock().await;
    let session = engine
        .session
        .as_mut()
        .ok_or_else(|| ApiError::NotFound("no active session".to_string()))?;
    let answer = f(session)?;
    let response = SessionResponse::from_session(session, answer);
    for error in &response.store_errors {
        tracing::warn!(%error, "session continued after a storage failure");
    }
    Ok(Json(response))
}

fn not_accepted(target: &str) -> ApiError {
    ApiError::BadRequest(format!("answer does not fit {target}"))
}
