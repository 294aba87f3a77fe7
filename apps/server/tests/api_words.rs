//! Word collection API tests.

mod common;

use axum::http::StatusCode;
use chrono::Duration;
use pretty_assertions::assert_eq;
use uuid::Uuid;
use vocab_core::{LearningStage, WordStore};

use common::fixtures;
use common::TestContext;

#[tokio::test]
async fn test_health_check() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    response.assert_text("OK");
}

#[tokio::test]
async fn test_import_then_list() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/words")
        .json(&fixtures::import_request(&[
            fixtures::new_word("laconic"),
            fixtures::new_word("ephemeral"),
        ]))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["imported"], 2);
    assert_eq!(body["total"], 2);

    let response = server.get("/api/words").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["total"], 2);
    let words = body["words"].as_array().unwrap();
    assert!(words.iter().all(|w| w["learning_stage"] == "unseen"));
    assert!(words.iter().all(|w| w["status"] == "new"));
}

#[tokio::test]
async fn test_import_rejects_blank_definition() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let mut blank = fixtures::new_word("laconic");
    blank.definition = "   ".to_string();

    let response = server
        .post("/api/words")
        .json(&fixtures::import_request(&[fixtures::new_word("terse"), blank]))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "bad_request");
    assert!(ctx.store.load_words().unwrap().is_empty());
}

#[tokio::test]
async fn test_review_knew_it_schedules_next_day() {
    let word = fixtures::word("laconic");
    let ctx = TestContext::with_words(vec![word.clone()]);
    let server = ctx.server();

    let response = server
        .post("/api/words/review")
        .json(&fixtures::swipe_request(&word, true))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["word"]["repetitions"], 1);
    assert_eq!(body["word"]["interval_days"], 1);
    assert_eq!(body["word"]["times_correct"], 1);
    let next_due: chrono::DateTime<chrono::Utc> =
        serde_json::from_value(body["next_due"].clone()).unwrap();
    assert_eq!(next_due, ctx.now() + Duration::days(1));

    let stored = ctx.store.get_word(word.id).unwrap();
    assert_eq!(stored.state.repetitions, 1);
    assert_eq!(stored.state.times_reviewed, 1);
}

#[tokio::test]
async fn test_review_failure_resets_repetitions() {
    let mut word = fixtures::word("laconic");
    word.state.repetitions = 3;
    word.state.interval_days = 17;
    let ctx = TestContext::with_words(vec![word.clone()]);
    let server = ctx.server();

    let response = server
        .post("/api/words/review")
        .json(&fixtures::quality_request(&word, 1))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["word"]["repetitions"], 0);
    assert_eq!(body["word"]["interval_days"], 1);
}

#[tokio::test]
async fn test_long_perfect_streak_keeps_scheduling() {
    let word = fixtures::word("laconic");
    let ctx = TestContext::with_words(vec![word.clone()]);
    let server = ctx.server();

    for _ in 0..40 {
        server
            .post("/api/words/review")
            .json(&fixtures::quality_request(&word, 5))
            .await
            .assert_status_ok();
    }

    let stored = ctx.store.get_word(word.id).unwrap();
    assert_eq!(stored.state.repetitions, 40);
    assert_eq!(stored.state.interval_days, 36_500);
    assert_eq!(
        stored.state.next_review_date,
        Some(ctx.now() + Duration::days(36_500))
    );
}

#[tokio::test]
async fn test_review_rejects_bad_quality() {
    let word = fixtures::word("laconic");
    let ctx = TestContext::with_words(vec![word.clone()]);
    let server = ctx.server();

    let response = server
        .post("/api/words/review")
        .json(&fixtures::quality_request(&word, 9))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_review_requires_a_grade() {
    let word = fixtures::word("laconic");
    let ctx = TestContext::with_words(vec![word.clone()]);
    let server = ctx.server();

    let response = server
        .post("/api/words/review")
        .json(&serde_json::json!({ "word_id": word.id }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_review_unknown_word_is_not_found() {
    let ctx = TestContext::with_words(vec![fixtures::word("laconic")]);
    let server = ctx.server();

    let response = server
        .post("/api/words/review")
        .json(&serde_json::json!({ "word_id": Uuid::new_v4(), "knew_it": true }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_due_words_follow_the_clock() {
    let word = fixtures::word("laconic");
    let ctx = TestContext::with_words(vec![word.clone()]);
    let server = ctx.server();

    // Never reviewed, so due immediately.
    let body: serde_json::Value = server.get("/api/words/due").await.json();
    assert_eq!(body["total"], 1);

    server
        .post("/api/words/review")
        .json(&fixtures::swipe_request(&word, true))
        .await
        .assert_status_ok();

    let body: serde_json::Value = server.get("/api/words/due").await.json();
    assert_eq!(body["total"], 0);

    ctx.advance_days(1);
    let body: serde_json::Value = server.get("/api/words/due").await.json();
    assert_eq!(body["total"], 1);
    assert_eq!(body["words"][0]["id"], word.id.to_string());
}

#[tokio::test]
async fn test_review_does_not_move_learning_stage() {
    let word = fixtures::word("laconic");
    let ctx = TestContext::with_words(vec![word.clone()]);
    let server = ctx.server();

    server
        .post("/api/words/review")
        .json(&fixtures::quality_request(&word, 5))
        .await
        .assert_status_ok();

    let stored = ctx.store.get_word(word.id).unwrap();
    assert_eq!(stored.state.learning_stage, LearningStage::Unseen);
}
