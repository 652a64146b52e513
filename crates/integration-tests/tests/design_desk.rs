//! Design desk flows against the in-memory service.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use merchdesk_admin::{DesignDesk, DeskError, GatewayCall, GatewayError, InMemoryGateway};
use merchdesk_core::{DesignDraft, DraftMode, ValidationError};
use merchdesk_integration_tests::fixtures;

async fn desk_with(tags: &[&str]) -> (DesignDesk<InMemoryGateway>, InMemoryGateway) {
    let gateway = fixtures::gateway();
    gateway.insert_design(fixtures::design("Wave", tags)).await;
    let desk = DesignDesk::open(gateway.clone()).await;
    (desk, gateway)
}

// ============================================================================
// Draft isolation
// ============================================================================

#[tokio::test]
async fn edit_toggle_changes_only_the_edit_draft() {
    let (mut desk, _) = desk_with(&["A", "B"]).await;
    desk.toggle_tag("Mine");

    let design = desk.designs()[0].clone();
    desk.begin_edit(&design);
    desk.toggle_tag("A");

    assert_eq!(desk.buffer().edit_draft().tags.to_vec(), vec!["B"]);
    assert_eq!(desk.buffer().create_draft().tags.to_vec(), vec!["Mine"]);
}

#[tokio::test]
async fn toggling_twice_is_identity() {
    let (mut desk, _) = desk_with(&[]).await;
    desk.toggle_tag("Summer");
    desk.toggle_tag("Beach");
    let before = desk.draft().tags.clone();

    desk.toggle_tag("Night");
    desk.toggle_tag("Night");
    desk.toggle_tag("Summer");
    desk.toggle_tag("Summer");

    assert_eq!(desk.draft().tags.len(), before.len());
    assert!(desk.draft().tags.contains("Summer"));
    assert!(desk.draft().tags.contains("Beach"));
    assert!(!desk.draft().tags.contains("Night"));
}

#[tokio::test]
async fn cancel_returns_to_untouched_create_draft() {
    let (mut desk, _) = desk_with(&["A"]).await;
    desk.set_title("Half done");

    let design = desk.designs()[0].clone();
    desk.begin_edit(&design);
    desk.set_title("Edited title");
    desk.cancel_edit().unwrap();

    assert_eq!(desk.buffer().mode(), DraftMode::Create);
    assert_eq!(desk.draft().title, "Half done");
    assert_eq!(desk.buffer().edit_draft(), &DesignDraft::default());
}

// ============================================================================
// Submission
// ============================================================================

#[tokio::test]
async fn blank_image_is_rejected_without_a_request() {
    let (mut desk, gateway) = desk_with(&[]).await;
    desk.set_title("Nothing uploaded");
    desk.draft_mut().images = vec![String::new()];

    let err = desk.submit().await.unwrap_err();

    assert!(matches!(
        err,
        DeskError::Validation(ValidationError::EmptyImageSet)
    ));
    assert_eq!(gateway.mutation_count().await, 0);
    assert_eq!(desk.draft().title, "Nothing uploaded");
}

#[tokio::test]
async fn create_round_trip_resets_and_lists() {
    let (mut desk, gateway) = desk_with(&[]).await;
    desk.set_title("Sunrise");
    desk.toggle_tag("Summer");
    let upload = desk.begin_upload();
    desk.finish_upload(upload, vec!["https://cdn.test/sunrise.png".to_string()]);

    desk.submit().await.unwrap();

    assert_eq!(desk.draft(), &DesignDraft::default());
    let titles: Vec<&str> = desk.designs().iter().map(|d| d.record.title.as_str()).collect();
    assert_eq!(titles, vec!["Wave", "Sunrise"]);
    let stored = gateway.designs().await;
    assert_eq!(stored[1].record.tags, vec!["Summer".to_string()]);
    assert_eq!(stored[1].record.images, vec!["https://cdn.test/sunrise.png".to_string()]);
}

#[tokio::test]
async fn transport_failure_keeps_the_draft() {
    let (mut desk, gateway) = desk_with(&["A"]).await;
    let design = desk.designs()[0].clone();
    desk.begin_edit(&design);
    desk.toggle_tag("B");
    gateway.fail_on(GatewayCall::UpdateDesign).await;

    let err = desk.submit().await.unwrap_err();

    assert!(matches!(err, DeskError::Gateway(GatewayError::Status { .. })));
    assert!(desk.buffer().is_editing());
    assert_eq!(desk.draft().tags.to_vec(), vec!["A", "B"]);

    gateway.clear_failures().await;
    desk.submit().await.unwrap();
    assert_eq!(gateway.designs().await[0].record.tags, vec!["A", "B"]);
}

// ============================================================================
// Stale responses
// ============================================================================

#[tokio::test]
async fn response_after_mode_switch_is_dropped() {
    let (mut desk, gateway) = desk_with(&["A"]).await;
    desk.set_title("New one");
    desk.draft_mut().images = vec!["https://cdn.test/new.png".to_string()];
    let pending = desk.prepare_submit().unwrap();

    let design = desk.designs()[0].clone();
    desk.begin_edit(&design);
    let outcome = pending.send(&gateway).await;
    let err = desk.complete_submit(&pending, outcome).await.unwrap_err();

    assert!(matches!(err, DeskError::StaleResponse(_)));
    assert!(desk.buffer().is_editing());
    assert_eq!(desk.buffer().create_draft().title, "New one");
    // The record was stored, but the list was not refetched for it
    assert_eq!(gateway.designs().await.len(), 2);
    assert_eq!(desk.designs().len(), 1);
}

#[tokio::test]
async fn only_the_newest_submission_applies() {
    let (mut desk, gateway) = desk_with(&[]).await;
    desk.set_title("Draft");
    desk.draft_mut().images = vec!["https://cdn.test/d.png".to_string()];

    let first = desk.prepare_submit().unwrap();
    let second = desk.prepare_submit().unwrap();

    let outcome = first.send(&gateway).await;
    assert!(desk.complete_submit(&first, outcome).await.is_err());
    assert_eq!(desk.draft().title, "Draft");

    let outcome = second.send(&gateway).await;
    desk.complete_submit(&second, outcome).await.unwrap();
    assert_eq!(desk.draft().title, "");
}

#[tokio::test]
async fn upload_started_mid_submission_does_not_void_it() {
    let (mut desk, gateway) = desk_with(&[]).await;
    desk.set_title("Tide");
    desk.draft_mut().images = vec!["https://cdn.test/tide.png".to_string()];

    let pending = desk.prepare_submit().unwrap();
    let upload = desk.begin_upload();
    let outcome = pending.send(&gateway).await;
    desk.complete_submit(&pending, outcome).await.unwrap();

    assert_eq!(desk.draft(), &DesignDraft::default());
    assert_eq!(desk.designs().len(), 2);
    assert_eq!(gateway.calls(GatewayCall::ListDesigns).await, 2);
    // The upload was for the draft that has just been saved and cleared
    assert!(!desk.finish_upload(upload, vec!["https://cdn.test/late.png".to_string()]));
    assert!(desk.draft().images.is_empty());
}

#[tokio::test]
async fn upload_lands_in_the_draft_that_started_it() {
    let (mut desk, _) = desk_with(&["A"]).await;
    let design = desk.designs()[0].clone();
    desk.begin_edit(&design);

    let upload = desk.begin_upload();
    assert!(desk.finish_upload(upload, vec!["https://cdn.test/replacement.png".to_string()]));
    assert_eq!(desk.draft().images, vec!["https://cdn.test/replacement.png"]);
    assert!(desk.buffer().create_draft().images.is_empty());

    let late = desk.begin_upload();
    desk.cancel_edit().unwrap();
    assert!(!desk.finish_upload(late, vec!["https://cdn.test/late.png".to_string()]));
    assert!(desk.draft().images.is_empty());
}

#[tokio::test]
async fn empty_upload_is_ignored() {
    let (mut desk, _) = desk_with(&[]).await;
    desk.draft_mut().images = vec!["https://cdn.test/kept.png".to_string()];
    let upload = desk.begin_upload();
    assert!(!desk.finish_upload(upload, Vec::new()));
    assert_eq!(desk.draft().images, vec!["https://cdn.test/kept.png"]);
}

// ============================================================================
// Lists
// ============================================================================

#[tokio::test]
async fn delete_refreshes_the_list() {
    let (mut desk, gateway) = desk_with(&[]).await;
    gateway.insert_design(fixtures::design("Second", &[])).await;
    desk.refresh().await;
    let id = desk.designs()[0].id.clone();

    desk.delete(&id).await.unwrap();

    assert_eq!(desk.designs().len(), 1);
    assert_eq!(desk.designs()[0].record.title, "Second");
}

#[tokio::test]
async fn failed_list_fetch_is_not_fatal() {
    let gateway = fixtures::gateway();
    gateway.fail_on(GatewayCall::ListDesigns).await;
    gateway.fail_on(GatewayCall::ListCategories).await;

    let desk = DesignDesk::open(gateway).await;

    assert!(desk.designs().is_empty());
    assert!(desk.categories().is_empty());
}
