//! Pipeline integration tests
//!
//! Ingestion → classification → aggregation against stand-in classifiers.

mod helpers;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use ctriage_common::categories::ALL_CATEGORIES;
use ctriage_common::CategoryCount;
use ctriage_web::pipeline::{classify_single, classify_upload, PaneKind, PipelineError, Workspace};
use ctriage_web::services::MAX_BATCH_LINES;
use helpers::{FailingClassifier, GatedClassifier, StubClassifier};

fn numbered_lines(count: usize) -> String {
    (0..count).map(|i| format!("Great video number {}\n", i)).collect()
}

#[tokio::test]
async fn test_batch_preserves_length_and_order() {
    let classifier = StubClassifier::default();

    for size in [1, 2, 17, 199, MAX_BATCH_LINES] {
        let workspace = Workspace::new();
        let outcome = classify_upload(&workspace, &classifier, &numbered_lines(size))
            .await
            .unwrap();
        let state = outcome.state.unwrap();

        assert_eq!(state.results.len(), size);
        for (i, result) in state.results.iter().enumerate() {
            assert_eq!(result.original_text, format!("Great video number {}", i));
        }
    }
}

#[tokio::test]
async fn test_oversized_upload_forwards_first_200() {
    let classifier = StubClassifier::default();
    let workspace = Workspace::new();
    let content = format!("comment\n{}", numbered_lines(260));

    let outcome = classify_upload(&workspace, &classifier, &content).await.unwrap();

    assert!(outcome.ingestion.header_dropped);
    assert_eq!(outcome.ingestion.truncated, 60);
    assert_eq!(*classifier.batch_sizes.lock().unwrap(), vec![MAX_BATCH_LINES]);

    let state = outcome.state.unwrap();
    assert_eq!(state.results.first().unwrap().original_text, "Great video number 0");
    assert_eq!(state.results.last().unwrap().original_text, "Great video number 199");
}

#[tokio::test]
async fn test_header_example_forwards_quoted_line() {
    let classifier = StubClassifier::default();
    let workspace = Workspace::new();

    let outcome = classify_upload(&workspace, &classifier, "comment\n\"Great job!\"\n")
        .await
        .unwrap();

    assert_eq!(outcome.ingestion.comments, vec!["\"Great job!\"".to_string()]);
}

#[tokio::test]
async fn test_empty_upload_skips_classifier() {
    let classifier = StubClassifier::default();
    let workspace = Workspace::new();

    let outcome = classify_upload(&workspace, &classifier, "comment\n\n").await.unwrap();

    assert!(outcome.state.is_none());
    assert_eq!(classifier.calls(), 0);
}

#[tokio::test]
async fn test_blank_single_comment_is_noop() {
    let classifier = StubClassifier::default();
    let workspace = Workspace::new();

    let outcome = classify_single(&workspace, &classifier, "   ").await.unwrap();

    assert!(outcome.is_none());
    assert_eq!(classifier.calls(), 0);
    assert!(workspace.single.snapshot().await.results.is_empty());
}

#[tokio::test]
async fn test_single_comment_updates_only_single_pane() {
    let classifier = StubClassifier::default();
    let workspace = Workspace::new();

    let state = classify_single(&workspace, &classifier, "You idiot")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(state.results.len(), 1);
    assert_eq!(state.results[0].category.as_str(), "hate_abuse");
    assert!(workspace.batch.snapshot().await.results.is_empty());
}

#[tokio::test]
async fn test_resubmission_replaces_results() {
    let classifier = StubClassifier::default();
    let workspace = Workspace::new();

    classify_upload(&workspace, &classifier, "a\nb\nc\n").await.unwrap();
    classify_upload(&workspace, &classifier, "a\nb\nc\n").await.unwrap();

    assert_eq!(classifier.calls(), 2);
    assert_eq!(workspace.batch.snapshot().await.results.len(), 3);
}

#[tokio::test]
async fn test_stats_and_filter_over_results() {
    let classifier = StubClassifier::default();
    let workspace = Workspace::new();
    let content = "Love it\nSo good\nwatch your back\nYou idiot\nweird one\n";

    let state = classify_upload(&workspace, &classifier, content)
        .await
        .unwrap()
        .state
        .unwrap();

    assert_eq!(
        state.stats()[0],
        CategoryCount { category: "praise".to_string(), count: 2 }
    );
    assert_eq!(state.stats().len(), 4);
    assert!(state.stats().iter().any(|c| c.category == "sarcasm" && c.count == 1));

    let abuse = state.filtered("hate_abuse");
    assert_eq!(abuse.len(), 1);
    assert_eq!(abuse[0].original_text, "You idiot");
    assert_eq!(state.filtered(ALL_CATEGORIES), state.results);
}

#[tokio::test]
async fn test_failure_keeps_previous_results() {
    let workspace = Workspace::new();
    let stub = StubClassifier::default();
    let before = classify_upload(&workspace, &stub, "Love it\nYou idiot\n")
        .await
        .unwrap()
        .state
        .unwrap();

    let failing = FailingClassifier::default();
    let result = classify_upload(&workspace, &failing, "New comment\n").await;

    assert!(matches!(result, Err(PipelineError::Classification { .. })));
    assert_eq!(failing.calls.load(Ordering::SeqCst), 1);

    let after = workspace.batch.snapshot().await;
    assert_eq!(after.results, before.results);
    assert_eq!(after.stats(), before.stats());
    assert_eq!(after.batch_id, before.batch_id);
    assert!(after.last_error.as_deref().unwrap().contains("connection refused"));
    assert!(!workspace.batch.is_busy());
}

#[tokio::test]
async fn test_concurrent_submission_on_same_pane_is_rejected() {
    let workspace = Arc::new(Workspace::new());
    let classifier = Arc::new(GatedClassifier::new());

    let first = {
        let workspace = Arc::clone(&workspace);
        let classifier = Arc::clone(&classifier);
        tokio::spawn(async move {
            classify_upload(&workspace, classifier.as_ref(), "one\ntwo\n").await
        })
    };

    classifier.entered.notified().await;
    assert!(workspace.batch.is_busy());

    let second = classify_upload(&workspace, classifier.as_ref(), "three\n").await;
    assert!(matches!(second, Err(PipelineError::Busy(PaneKind::Batch))));

    // The single pane has its own flag
    assert!(!workspace.single.is_busy());

    classifier.release.notify_one();
    let outcome = first.await.unwrap().unwrap();
    assert_eq!(outcome.state.unwrap().results.len(), 2);
    assert!(!workspace.batch.is_busy());
}
