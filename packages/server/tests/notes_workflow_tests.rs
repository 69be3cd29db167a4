//! End-to-end runs of the notes workflow against mock capabilities.

mod common;

use common::*;
use coursegen_core::domains::courses::{GenerateNotesEvent, SkipReason};
use coursegen_core::domains::notes::{
    generate_course_notes, run_notes_batch, GenerateNotesResult, OutcomeStatus, StatusUpdate,
};
use coursegen_core::kernel::test_dependencies::{
    MockCourseStatusStore, MockGeneration, MockNoteStore, MockTextGenerator,
};
use coursegen_core::kernel::TestDependencies;
use serde_json::json;

fn event(value: serde_json::Value) -> GenerateNotesEvent {
    serde_json::from_value(value).unwrap()
}

#[tokio::test]
async fn full_event_generates_stores_and_marks_ready() {
    let test_deps = TestDependencies::new().with_clock(1_000).with_concurrency(2);
    let deps = test_deps.server_deps();

    let result = generate_course_notes(&notes_event(5), &deps).await;

    let batch = result.batch().expect("batch ran");
    assert_eq!(batch.outcomes.len(), 5);
    assert_eq!(batch.succeeded(), 5);
    assert_eq!(batch.status_update, StatusUpdate::Success);

    let stored = test_deps.note_store.stored();
    assert_eq!(stored.len(), 5);
    assert!(stored.iter().all(|n| n.course_id == course_id()));

    let ready_calls = test_deps.course_status.calls();
    assert_eq!(ready_calls, vec![course_id()]);

    // Every prompt carries its chapter's JSON
    let prompts = test_deps.text_generator.calls();
    for position in 0..5 {
        let title = chapter_title(position);
        assert!(prompts.iter().any(|p| p.contains(&title)), "missing {}", title);
    }
    assert!(test_deps.text_generator.max_in_flight() <= 2);
}

#[tokio::test]
async fn every_call_uses_the_configured_generation_options() {
    let test_deps = TestDependencies::new();
    let deps = test_deps.server_deps();

    run_notes_batch(request(3), &deps).await;

    let options = test_deps.text_generator.options_seen();
    assert_eq!(options.len(), 3);
    for seen in options {
        assert_eq!(seen, deps.generation_options);
        assert_eq!(seen.max_output_tokens, 8192);
    }
}

#[tokio::test]
async fn skipped_events_touch_nothing() {
    let cases = [
        (json!({}), SkipReason::NoCourseData),
        (json!({ "course": [] }), SkipReason::NoCourseData),
        (
            study_material_event_json(json!("course-123"), json!([])),
            SkipReason::MissingRequiredData,
        ),
        (
            study_material_event_json(json!(null), json!([chapter_json(0)])),
            SkipReason::MissingRequiredData,
        ),
    ];

    for (payload, expected) in cases {
        let test_deps = TestDependencies::new();
        let result = generate_course_notes(&event(payload.clone()), &test_deps.server_deps()).await;

        assert_eq!(
            result,
            GenerateNotesResult::Skipped { reason: expected },
            "payload: {}",
            payload
        );
        assert_eq!(result.status_update(), StatusUpdate::Skipped);
        assert_eq!(test_deps.text_generator.call_count(), 0);
        assert_eq!(test_deps.note_store.insert_attempts(), 0);
        assert_eq!(test_deps.course_status.call_count(), 0);
    }
}

#[tokio::test]
async fn course_is_marked_ready_even_when_every_chapter_fails() {
    let test_deps = TestDependencies::new()
        .with_text_generator(MockTextGenerator::new().fail_when_prompt_contains("", "quota exceeded"));
    let deps = test_deps.server_deps();

    let batch = run_notes_batch(request(4), &deps).await;

    assert_eq!(batch.failed(), 4);
    assert!(batch
        .outcomes
        .iter()
        .all(|o| o.error.as_deref() == Some("Generation failed: quota exceeded")));
    assert_eq!(test_deps.course_status.call_count(), 1);
    assert_eq!(batch.status_update, StatusUpdate::Success);
}

#[tokio::test]
async fn status_write_failure_is_reported_not_raised() {
    let test_deps =
        TestDependencies::new().with_course_status(MockCourseStatusStore::failing("DbTimeout"));
    let deps = test_deps.server_deps();

    let result = generate_course_notes(&notes_event(2), &deps).await;

    assert_eq!(result.status_update(), StatusUpdate::Failed("DbTimeout".into()));
    let batch = result.batch().unwrap();
    assert_eq!(batch.succeeded(), 2);
    assert_eq!(test_deps.course_status.call_count(), 1);
}

#[tokio::test]
async fn empty_and_malformed_responses_fail_their_chapters() {
    let generator = MockTextGenerator::new()
        .when_prompt_contains(chapter_title(0), MockGeneration::Empty)
        .when_prompt_contains(chapter_title(2), MockGeneration::Malformed);
    let test_deps = TestDependencies::new().with_text_generator(generator);
    let deps = test_deps.server_deps();

    let batch = run_notes_batch(request(3), &deps).await;

    let statuses: Vec<OutcomeStatus> = batch.outcomes.iter().map(|o| o.status).collect();
    assert_eq!(
        statuses,
        vec![OutcomeStatus::Failed, OutcomeStatus::Success, OutcomeStatus::Failed]
    );
    assert_eq!(batch.outcomes[0].error.as_deref(), Some("No AI response"));
    assert_eq!(batch.outcomes[2].error.as_deref(), Some("No AI response"));
    assert_eq!(test_deps.note_store.stored().len(), 1);
}

#[tokio::test]
async fn store_outage_fails_chapters_but_still_reconciles() {
    let test_deps =
        TestDependencies::new().with_note_store(MockNoteStore::new().fail_all("connection refused"));
    let deps = test_deps.server_deps();

    let batch = run_notes_batch(request(3), &deps).await;

    assert_eq!(batch.failed(), 3);
    assert_eq!(
        batch.outcomes[1].error.as_deref(),
        Some("Failed to save notes: connection refused")
    );
    assert_eq!(batch.status_update, StatusUpdate::Success);
}

#[tokio::test]
async fn completed_result_serializes_to_completion_payload() {
    let test_deps = TestDependencies::new()
        .with_clock(42_000)
        .with_text_generator(MockTextGenerator::new().fail_when_prompt_contains(chapter_title(1), ""));
    let deps = test_deps.server_deps();

    let result = generate_course_notes(&notes_event(2), &deps).await;

    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({
            "notesResult": [
                { "chapterId": 42_000, "status": "success" },
                { "chapterId": 42_001, "status": "failed", "error": "Generation failed: Unknown error" }
            ],
            "updateCourseStatusResult": { "status": "Success" }
        })
    );
}
