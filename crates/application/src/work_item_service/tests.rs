use std::sync::Arc;

use serde_json::{Value, json};

use youtrack_mcp_core::{AppError, RemoteError};
use youtrack_mcp_domain::{
    AllowList, NewWorkItem, WorkDate, WorkDuration, WorkItem, WorkItemPatch,
};

use crate::test_support::{FakeTracker, TrackerCall, issue_with_fields, state_field, status};
use crate::{ValidationPolicy, WorkItemValidator};

use super::WorkItemService;

fn open_issue() -> Value {
    issue_with_fields("0-5", json!([state_field("State", "Open", false)]))
}

fn service_with(tracker: FakeTracker, allow_list: AllowList) -> (WorkItemService, Arc<FakeTracker>) {
    let tracker = Arc::new(tracker);
    let validator = WorkItemValidator::new(tracker.clone(), allow_list, ValidationPolicy::default());
    (WorkItemService::new(tracker.clone(), validator), tracker)
}

fn new_work_item(issue_id: &str) -> NewWorkItem {
    NewWorkItem {
        issue_id: issue_id.to_owned(),
        duration: WorkDuration::parse("1h 30m"),
        text: Some("incident review".to_owned()),
        work_type: None,
        date: Some(WorkDate::from_millis(1_705_276_800_000)),
    }
}

async fn create_payloads(tracker: &FakeTracker) -> Vec<Value> {
    tracker
        .recorded()
        .await
        .into_iter()
        .filter_map(|call| match call {
            TrackerCall::CreateWorkItem { payload, .. } => Some(payload),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn create_uses_presentation_encoding_first() {
    let (service, tracker) = service_with(
        FakeTracker::default().with_issue("DEVOPS-1", open_issue()),
        AllowList::Unrestricted,
    );

    let created = service.create_work_item(new_work_item("DEVOPS-1")).await;

    assert_eq!(
        created.ok().and_then(|item| item.id),
        Some("8-1".to_owned())
    );
    assert_eq!(
        create_payloads(&tracker).await,
        vec![json!({
            "duration": { "presentation": "1h 30m" },
            "text": "incident review",
            "date": 1_705_276_800_000_i64,
        })]
    );
}

#[tokio::test]
async fn bad_request_falls_back_to_next_encoding() {
    let (service, tracker) = service_with(
        FakeTracker::default()
            .with_issue("DEVOPS-1", open_issue())
            .with_create_responses(vec![
                Err(status(400, "invalid duration")),
                Ok(json!({ "id": "8-2", "text": "incident review" })),
            ]),
        AllowList::Unrestricted,
    );

    let created = service.create_work_item(new_work_item("DEVOPS-1")).await;

    assert_eq!(
        created.ok().and_then(|item| item.id),
        Some("8-2".to_owned())
    );
    let durations: Vec<Value> = create_payloads(&tracker)
        .await
        .into_iter()
        .map(|payload| payload["duration"].clone())
        .collect();
    assert_eq!(
        durations,
        vec![json!({ "presentation": "1h 30m" }), json!("1h 30m")]
    );
}

#[tokio::test]
async fn non_bad_request_failure_stops_fallback() {
    let (service, tracker) = service_with(
        FakeTracker::default()
            .with_issue("DEVOPS-1", open_issue())
            .with_create_responses(vec![Err(status(500, "boom"))]),
        AllowList::Unrestricted,
    );

    let result = service.create_work_item(new_work_item("DEVOPS-1")).await;

    let Err(AppError::Remote(message)) = result else {
        unreachable!("expected a remote error");
    };
    assert!(message.contains("500"));
    assert_eq!(create_payloads(&tracker).await.len(), 1);
}

#[tokio::test]
async fn transport_failure_stops_fallback_and_keeps_cause() {
    let (service, tracker) = service_with(
        FakeTracker::default()
            .with_issue("DEVOPS-1", open_issue())
            .with_create_responses(vec![Err(RemoteError::Transport(
                "connection reset".to_owned(),
            ))]),
        AllowList::Unrestricted,
    );

    let result = service.create_work_item(new_work_item("DEVOPS-1")).await;

    let Err(AppError::Remote(message)) = result else {
        unreachable!("expected a remote error");
    };
    assert!(message.contains("connection reset"));
    assert_eq!(create_payloads(&tracker).await.len(), 1);
}

#[tokio::test]
async fn accepted_create_with_empty_body_succeeds() {
    let (service, tracker) = service_with(
        FakeTracker::default()
            .with_issue("DEVOPS-1", open_issue())
            .with_create_responses(vec![Ok(Value::Null)]),
        AllowList::Unrestricted,
    );

    let created = service.create_work_item(new_work_item("DEVOPS-1")).await;

    assert_eq!(created.ok(), Some(WorkItem::default()));
    assert_eq!(create_payloads(&tracker).await.len(), 1);
}

#[tokio::test]
async fn exhausted_encodings_report_last_rejection() {
    let (service, tracker) = service_with(
        FakeTracker::default()
            .with_issue("DEVOPS-1", open_issue())
            .with_create_responses(vec![
                Err(status(400, "first")),
                Err(status(400, "second")),
                Err(status(400, "third")),
            ]),
        AllowList::Unrestricted,
    );

    let result = service.create_work_item(new_work_item("DEVOPS-1")).await;

    let Err(AppError::Remote(message)) = result else {
        unreachable!("expected a remote error");
    };
    assert!(message.contains("after 3 attempts"));
    assert!(message.contains("third"));
    let payloads = create_payloads(&tracker).await;
    assert_eq!(payloads.len(), 3);
    assert_eq!(payloads[2]["duration"], json!({ "minutes": 90 }));
}

#[tokio::test]
async fn denied_parent_ticket_makes_no_remote_calls() {
    let (service, tracker) = service_with(
        FakeTracker::default().with_issue("DEVOPS-9", open_issue()),
        AllowList::from_tickets(vec!["DEVOPS-1".to_owned(), "DEVOPS-2".to_owned()]),
    );

    let result = service.create_work_item(new_work_item("DEVOPS-9")).await;

    assert!(matches!(result, Err(AppError::Validation(_))));
    assert!(tracker.recorded().await.is_empty());
}

#[tokio::test]
async fn resolved_parent_is_never_written() {
    let (service, tracker) = service_with(
        FakeTracker::default().with_issue(
            "DEVOPS-1",
            issue_with_fields("0-5", json!([state_field("State", "Fixed", true)])),
        ),
        AllowList::Unrestricted,
    );

    let result = service.create_work_item(new_work_item("DEVOPS-1")).await;

    assert!(matches!(result, Err(AppError::Validation(_))));
    assert!(create_payloads(&tracker).await.is_empty());
}

#[tokio::test]
async fn empty_patch_reads_instead_of_writing() {
    let (service, tracker) = service_with(FakeTracker::default(), AllowList::Unrestricted);

    let item = service
        .update_work_item("DEVOPS-1", "8-1", WorkItemPatch::default())
        .await;

    assert_eq!(
        item.ok().and_then(|item| item.text),
        Some("existing".to_owned())
    );
    assert_eq!(
        tracker.recorded().await,
        vec![TrackerCall::FetchWorkItem {
            issue_id: "DEVOPS-1".to_owned(),
            work_item_id: "8-1".to_owned(),
        }]
    );
}

#[tokio::test]
async fn update_sends_only_provided_fields() {
    let (service, tracker) = service_with(FakeTracker::default(), AllowList::Unrestricted);

    let patch = WorkItemPatch {
        duration: Some("2h".to_owned()),
        text: Some("updated".to_owned()),
        ..WorkItemPatch::default()
    };
    let item = service.update_work_item("DEVOPS-1", "8-1", patch).await;

    assert_eq!(
        item.ok().and_then(|item| item.text),
        Some("updated".to_owned())
    );
    assert_eq!(
        tracker.recorded().await,
        vec![TrackerCall::UpdateWorkItem {
            work_item_id: "8-1".to_owned(),
            payload: json!({ "duration": { "presentation": "2h" }, "text": "updated" }),
        }]
    );
}

#[tokio::test]
async fn accepted_update_never_reports_failure() {
    let (service, _) = service_with(
        FakeTracker::default().with_update_response(Ok(Value::Null)),
        AllowList::Unrestricted,
    );
    let patch = WorkItemPatch {
        text: Some("updated".to_owned()),
        ..WorkItemPatch::default()
    };

    let item = service.update_work_item("DEVOPS-1", "8-1", patch.clone()).await;
    assert_eq!(item.ok(), Some(WorkItem::default()));

    let (service, _) = service_with(
        FakeTracker::default().with_update_response(Ok(json!({ "id": 42 }))),
        AllowList::Unrestricted,
    );
    assert!(service.update_work_item("DEVOPS-1", "8-1", patch).await.is_ok());
}

#[tokio::test]
async fn listing_and_deleting_skip_validation() {
    let (service, tracker) = service_with(
        FakeTracker::default().with_work_item_list(Ok(json!([
            { "id": "8-1", "text": "a" },
            { "id": "8-2", "text": "b" },
        ]))),
        AllowList::DenyAll {
            reason: "unreadable".to_owned(),
        },
    );

    let items = service
        .list_work_items("DEVOPS-1")
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(items.len(), 2);

    assert!(service.delete_work_item("DEVOPS-1", "8-2").await.is_ok());
    assert_eq!(
        tracker
            .count(|call| matches!(call, TrackerCall::FetchIssue { .. }))
            .await,
        0
    );
}

#[tokio::test]
async fn missing_work_item_maps_to_not_found() {
    let (service, _) = service_with(
        FakeTracker::default().with_work_item_list(Err(RemoteError::Status {
            status: 404,
            body: "Issue not found".to_owned(),
        })),
        AllowList::Unrestricted,
    );

    let result = service.list_work_items("NOPE-1").await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}
