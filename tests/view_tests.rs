//! End-to-end tests of the list and detail views over an in-memory backend.

mod common;

use common::mocks::MockBackend;
use common::{approved_record, display, pending_record, rejected_record, setup, setup_with};
use mentor_review::model::{ReviewAction, ReviewStatus, StatusFilter};
use mentor_review::types::AppError;
use mentor_review::views::{NotificationKind, RowControls};
use mentor_review::{
    ActionOutcome, DetailState, ListState, RegistrationDetailView, RegistrationListView,
    StatusUpdate,
};
use parking_lot::Mutex;
use std::sync::Arc;

#[tokio::test]
async fn test_approve_scenario_from_pending_to_approved() {
    let (backend, coordinator) = setup(vec![pending_record("R1", "Asha Rao")]);
    let list = RegistrationListView::new(coordinator, &display());

    assert_eq!(list.load().await, ListState::Ready);
    let rows = list.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].status, ReviewStatus::Pending);
    assert_eq!(rows[0].controls, RowControls::Available);

    let outcome = list.approve("R1").await;
    assert_eq!(outcome, ActionOutcome::Completed);
    assert_eq!(backend.approve_calls(), 1);
    // initial load plus the re-fetch after the confirmed action
    assert_eq!(backend.list_calls(), 2);

    let rows = list.rows();
    assert_eq!(rows[0].status, ReviewStatus::Approved);
    assert_eq!(rows[0].controls, RowControls::Hidden);

    let toasts = list.notifications().active();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].kind, NotificationKind::Success);
    assert_eq!(toasts[0].message, "Mentor registration approved successfully");
}

#[tokio::test]
async fn test_concurrent_approves_issue_one_request() {
    let (backend, coordinator) =
        setup_with(MockBackend::new(vec![pending_record("R1", "Asha Rao")]).with_action_gate());
    let list = RegistrationListView::new(coordinator.clone(), &display());
    list.load().await;

    let first = tokio::spawn({
        let list = list.clone();
        async move { list.approve("R1").await }
    });

    // wait until the first call is parked inside the backend
    backend.entered.notified().await;
    assert_eq!(list.row_controls("R1"), RowControls::Processing);
    assert_eq!(list.row_controls("R1").label(), Some("Processing…"));

    let second = list.approve("R1").await;
    assert_eq!(second, ActionOutcome::Suppressed);

    backend.release_actions(1);
    assert_eq!(first.await.unwrap(), ActionOutcome::Completed);

    assert_eq!(backend.approve_calls(), 1);
    assert!(!coordinator.is_busy("R1"));
    assert_eq!(list.row_controls("R1"), RowControls::Hidden);
}

#[tokio::test]
async fn test_other_rows_stay_interactive_while_one_is_busy() {
    let (backend, coordinator) = setup_with(
        MockBackend::new(vec![
            pending_record("R1", "Asha Rao"),
            pending_record("R2", "Vikram Iyer"),
        ])
        .with_action_gate(),
    );
    let list = RegistrationListView::new(coordinator, &display());
    list.load().await;

    let pending = tokio::spawn({
        let list = list.clone();
        async move { list.approve("R1").await }
    });
    backend.entered.notified().await;

    assert_eq!(list.row_controls("R1"), RowControls::Processing);
    assert_eq!(list.row_controls("R2"), RowControls::Available);

    backend.release_actions(1);
    pending.await.unwrap();
}

#[tokio::test]
async fn test_blank_reject_reason_never_calls_backend() {
    let (backend, coordinator) = setup(vec![pending_record("R1", "Asha Rao")]);
    let list = RegistrationListView::new(coordinator, &display());
    list.load().await;

    for reason in ["", "   "] {
        let outcome = list.reject("R1", reason).await;
        assert_eq!(
            outcome,
            ActionOutcome::Invalid("Please provide a reason for rejection".to_string())
        );
    }
    assert_eq!(backend.reject_calls(), 0);
    assert_eq!(backend.list_calls(), 1);
    assert_eq!(list.row_controls("R1"), RowControls::Available);
}

#[tokio::test]
async fn test_failed_action_surfaces_backend_message() {
    let (backend, coordinator) = setup(vec![pending_record("R1", "Asha Rao")]);
    backend.fail_actions_with(409, Some("Registration already processed"));
    let list = RegistrationListView::new(coordinator, &display());
    list.load().await;

    let outcome = list.approve("R1").await;
    assert_eq!(
        outcome,
        ActionOutcome::Failed(
            "Failed to approve registration: Registration already processed".to_string()
        )
    );
    // no re-fetch after a failed action
    assert_eq!(backend.list_calls(), 1);
    assert_eq!(list.row_controls("R1"), RowControls::Available);

    let toasts = list.notifications().active();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].kind, NotificationKind::Error);
}

#[tokio::test]
async fn test_failed_action_without_message_uses_generic_text() {
    let (backend, coordinator) = setup(vec![pending_record("R1", "Asha Rao")]);
    backend.fail_actions_with(500, None);
    let list = RegistrationListView::new(coordinator, &display());
    list.load().await;

    match list.reject("R1", "KYC unreadable").await {
        ActionOutcome::Failed(message) => {
            assert_eq!(
                message,
                "Failed to reject registration. Something went wrong. Please try again."
            );
        }
        other => panic!("unexpected outcome {:?}", other),
    }
}

#[tokio::test]
async fn test_initial_fetch_failure_is_inline_and_not_retried() {
    let (backend, coordinator) = setup_with(MockBackend::failing());
    let list = RegistrationListView::new(coordinator, &display());

    match list.load().await {
        ListState::Failed(message) => assert!(message.contains("Unable to reach the server")),
        other => panic!("unexpected state {:?}", other),
    }
    assert_eq!(backend.list_calls(), 1);
    assert!(list.rows().is_empty());
}

#[tokio::test]
async fn test_filter_search_and_counts() {
    let (_backend, coordinator) = setup(vec![
        pending_record("R1", "Asha Rao"),
        approved_record("R2", "Vikram Iyer"),
        rejected_record("R3", "Meera Nair"),
        pending_record("R4", "Rahul Mehta"),
    ]);
    let list = RegistrationListView::new(coordinator, &display());
    list.load().await;

    let counts = list.counts();
    assert_eq!(
        (counts.all, counts.pending, counts.approved, counts.rejected),
        (4, 2, 1, 1)
    );

    list.set_filter(StatusFilter::Only(ReviewStatus::Pending));
    let names: Vec<_> = list.rows().into_iter().map(|r| r.name).collect();
    assert_eq!(names, ["Asha Rao", "Rahul Mehta"]);

    list.set_search("MEHTA");
    let rows = list.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].registration_id, "MR-R4");

    list.set_filter(StatusFilter::All);
    list.set_search("mr-r3");
    let rows = list.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].status, ReviewStatus::Rejected);
    assert_eq!(rows[0].controls, RowControls::Hidden);
}

#[tokio::test]
async fn test_pagination_clamps_page() {
    let records = (1..=12)
        .map(|i| pending_record(&format!("R{:02}", i), &format!("Applicant {:02}", i)))
        .collect();
    let (_backend, coordinator) = setup(records);
    let list = RegistrationListView::new(coordinator, &display());
    list.load().await;

    let page = list.page();
    assert_eq!((page.page, page.total_pages, page.items.len()), (1, 2, 10));

    list.set_page(9);
    let page = list.page();
    assert_eq!((page.page, page.items.len()), (2, 2));
}

#[tokio::test]
async fn test_list_teardown_abandons_fetch() {
    let (backend, coordinator) = setup_with(
        MockBackend::new(vec![pending_record("R1", "Asha Rao")]).with_list_gate(),
    );
    let list = RegistrationListView::new(coordinator, &display());

    let loading = tokio::spawn({
        let list = list.clone();
        async move { list.load().await }
    });
    backend.entered.notified().await;

    list.teardown();
    assert_eq!(loading.await.unwrap(), ListState::Loading);

    backend.release_lists(1);
    tokio::task::yield_now().await;
    assert_eq!(list.state(), ListState::Loading);
    assert!(list.registrations().is_empty());

    // reloads after teardown are no-ops
    assert_eq!(list.reload().await, ListState::Loading);
    assert_eq!(backend.list_calls(), 1);
}

#[tokio::test]
async fn test_detail_not_found_never_panics() {
    let (_backend, coordinator) = setup(vec![pending_record("R1", "Asha Rao")]);
    let detail = RegistrationDetailView::new(coordinator, &display(), "does-not-exist");

    assert_eq!(detail.load().await, DetailState::NotFound);
    assert!(!detail.approve_enabled());
    assert!(detail.registration().is_none());
}

#[tokio::test]
async fn test_detail_accepts_either_id() {
    let (_backend, coordinator) = setup(vec![pending_record("R1", "Asha Rao")]);

    for key in ["R1", "MR-R1", "  MR-R1 "] {
        let detail = RegistrationDetailView::new(coordinator.clone(), &display(), key);
        match detail.load().await {
            DetailState::Ready(registration) => assert_eq!(registration.id, "R1"),
            other => panic!("unexpected state for {:?}: {:?}", key, other),
        }
    }
}

#[tokio::test]
async fn test_detail_reject_refetches_then_calls_back_then_toasts() {
    let (backend, coordinator) = setup(vec![pending_record("R1", "Asha Rao")]);
    let updates: Arc<Mutex<Vec<StatusUpdate>>> = Arc::default();
    let toasts_at_callback: Arc<Mutex<Option<usize>>> = Arc::default();

    let detail = RegistrationDetailView::new(coordinator, &display(), "MR-R1");
    let notifications = detail.notifications().clone();
    let detail = detail.on_status_update({
        let updates = updates.clone();
        let toasts_at_callback = toasts_at_callback.clone();
        move |update| {
            *toasts_at_callback.lock() = Some(notifications.active().len());
            updates.lock().push(update);
        }
    });

    detail.load().await;
    assert!(detail.approve_enabled());

    detail.open_reject_modal();
    detail.set_reject_reason("  KYC document unreadable ");
    let outcome = detail.confirm_reject().await;

    assert_eq!(outcome, ActionOutcome::Completed);
    assert_eq!(backend.reject_calls(), 1);
    assert_eq!(backend.last_reason().as_deref(), Some("KYC document unreadable"));
    assert_eq!(backend.list_calls(), 2);

    let updates = updates.lock();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].registration_id, "MR-R1");
    assert_eq!(updates[0].action, ReviewAction::Reject);
    assert_eq!(updates[0].status, Some(ReviewStatus::Rejected));

    // callback ran before the success toast was queued
    assert_eq!(*toasts_at_callback.lock(), Some(0));
    let toasts = detail.notifications().active();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].message, "Mentor registration rejected");

    assert!(!detail.reject_modal().open);
    assert!(!detail.approve_enabled());
    assert_eq!(
        detail.registration().map(|r| r.status()),
        Some(ReviewStatus::Rejected)
    );
}

#[tokio::test]
async fn test_detail_approve_disabled_for_approved() {
    let (backend, coordinator) = setup(vec![approved_record("R1", "Asha Rao")]);
    let detail = RegistrationDetailView::new(coordinator, &display(), "R1");
    detail.load().await;

    assert!(!detail.approve_enabled());
    assert!(!detail.reject_enabled());
    assert_eq!(backend.approve_calls(), 0);
}

#[tokio::test]
async fn test_refetch_failure_after_action_still_completes() {
    let (backend, coordinator) = setup(vec![pending_record("R1", "Asha Rao")]);
    let detail = RegistrationDetailView::new(coordinator, &display(), "R1");
    detail.load().await;

    backend.fail_lists_with(AppError::Backend {
        status: 503,
        message: Some("Maintenance".to_string()),
    });
    assert_eq!(detail.approve().await, ActionOutcome::Completed);
    assert_eq!(detail.state(), DetailState::Failed("Maintenance".to_string()));
}

#[tokio::test]
async fn test_settled_rows_refuse_actions_without_request() {
    let (backend, coordinator) = setup(vec![
        approved_record("R1", "Asha Rao"),
        rejected_record("R2", "Vikram Iyer"),
    ]);
    let list = RegistrationListView::new(coordinator, &display());
    list.load().await;

    assert_eq!(
        list.approve("R1").await,
        ActionOutcome::Invalid("Registration MR-R1 is already approved".to_string())
    );
    assert_eq!(
        list.reject("MR-R2", "Duplicate application").await,
        ActionOutcome::Invalid("Registration MR-R2 is already rejected".to_string())
    );
    assert!(matches!(list.approve("R9").await, ActionOutcome::Invalid(_)));

    assert_eq!(backend.approve_calls(), 0);
    assert_eq!(backend.reject_calls(), 0);
    assert_eq!(backend.list_calls(), 1);
    let toasts = list.notifications().active();
    assert_eq!(toasts.len(), 2);
    assert!(toasts.iter().all(|t| t.kind == NotificationKind::Error));
}

#[tokio::test]
async fn test_detail_refuses_actions_on_settled_registration() {
    let (backend, coordinator) = setup(vec![approved_record("R1", "Asha Rao")]);
    let detail = RegistrationDetailView::new(coordinator, &display(), "R1");
    detail.load().await;

    assert_eq!(
        detail.approve().await,
        ActionOutcome::Invalid("Registration MR-R1 is already approved".to_string())
    );

    assert!(!detail.open_reject_modal());
    assert!(!detail.reject_modal().open);
    detail.set_reject_reason("Duplicate application");
    assert_eq!(
        detail.confirm_reject().await,
        ActionOutcome::Invalid("Reject confirmation is not open".to_string())
    );

    assert_eq!(backend.approve_calls(), 0);
    assert_eq!(backend.reject_calls(), 0);
    assert_eq!(backend.list_calls(), 1);
}

#[tokio::test]
async fn test_confirm_without_open_modal_sends_nothing() {
    let (backend, coordinator) = setup(vec![pending_record("R1", "Asha Rao")]);
    let detail = RegistrationDetailView::new(coordinator, &display(), "R1");
    detail.load().await;

    detail.set_reject_reason("KYC document unreadable");
    assert!(matches!(detail.confirm_reject().await, ActionOutcome::Invalid(_)));

    assert!(detail.open_reject_modal());
    detail.close_reject_modal();
    assert!(matches!(detail.confirm_reject().await, ActionOutcome::Invalid(_)));
    assert_eq!(backend.reject_calls(), 0);
}

#[tokio::test]
async fn test_teardown_during_action_drops_the_result() {
    let (backend, coordinator) =
        setup_with(MockBackend::new(vec![pending_record("R1", "Asha Rao")]).with_action_gate());
    let callbacks = Arc::new(Mutex::new(0usize));
    let detail = RegistrationDetailView::new(coordinator.clone(), &display(), "R1")
        .on_status_update({
            let callbacks = callbacks.clone();
            move |_| *callbacks.lock() += 1
        });
    detail.load().await;

    let approving = tokio::spawn({
        let detail = detail.clone();
        async move { detail.approve().await }
    });
    backend.entered.notified().await;

    detail.teardown();
    backend.release_actions(1);

    assert_eq!(approving.await.unwrap(), ActionOutcome::Cancelled);
    assert_eq!(backend.approve_calls(), 1);
    // no re-fetch once torn down
    assert_eq!(backend.list_calls(), 1);
    assert!(detail.notifications().active().is_empty());
    assert_eq!(*callbacks.lock(), 0);
    assert!(!coordinator.is_busy("R1"));
}

#[tokio::test]
async fn test_list_teardown_during_action_skips_refetch() {
    let (backend, coordinator) =
        setup_with(MockBackend::new(vec![pending_record("R1", "Asha Rao")]).with_action_gate());
    let list = RegistrationListView::new(coordinator, &display());
    list.load().await;

    let approving = tokio::spawn({
        let list = list.clone();
        async move { list.approve("R1").await }
    });
    backend.entered.notified().await;

    list.teardown();
    backend.release_actions(1);

    assert_eq!(approving.await.unwrap(), ActionOutcome::Cancelled);
    assert_eq!(backend.list_calls(), 1);
    assert!(list.notifications().active().is_empty());
    assert_eq!(list.rows()[0].status, ReviewStatus::Pending);
}

#[tokio::test]
async fn test_bad_date_format_still_renders_rows() {
    let (_backend, coordinator) = setup(vec![pending_record("R1", "Asha Rao")]);
    let mut display = display();
    display.date_format = "%Q".to_string();
    let list = RegistrationListView::new(coordinator, &display);
    list.load().await;

    assert_eq!(list.rows()[0].applied_on, "2024-03-12");
}
