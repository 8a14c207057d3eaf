use std::time::Duration;

use dux::api::ApiError;
use dux::console::{FetchController, LoadMode, LoadPhase, Notifier, Severity};
use dux::models::UserRecord;

fn user(id: &str, username: &str, role: &str) -> UserRecord {
    UserRecord {
        id: id.to_string(),
        username: username.to_string(),
        first_name: None,
        last_name: None,
        email: None,
        profile_image: None,
        role: role.to_string(),
    }
}

fn notifier() -> Notifier {
    Notifier::new(Duration::from_secs(60))
}

#[test]
fn test_initial_load_sets_loading_phase() {
    let mut fetch = FetchController::new();
    fetch.begin(LoadMode::Initial);
    assert_eq!(fetch.phase(), LoadPhase::Loading);
    assert!(fetch.is_loading());
    assert!(!fetch.is_refreshing());
}

#[test]
fn test_refresh_sets_refreshing_phase() {
    let mut fetch = FetchController::new();
    fetch.begin(LoadMode::Refresh);
    assert_eq!(fetch.phase(), LoadPhase::Refreshing);
    assert!(!fetch.is_loading());
}

#[test]
fn test_success_replaces_collection_wholesale() {
    let mut fetch = FetchController::new();
    let mut notifier = notifier();

    let t1 = fetch.begin(LoadMode::Initial);
    assert!(fetch.complete(t1, Ok(vec![user("1", "alice", "user")]), &mut notifier));
    assert_eq!(fetch.users().len(), 1);
    assert!(fetch.has_loaded());
    assert!(fetch.last_refreshed().is_some());

    let t2 = fetch.begin(LoadMode::Refresh);
    assert!(fetch.complete(t2, Ok(vec![user("2", "bob", "admin"), user("3", "carol", "editor")]), &mut notifier));
    // No merge: the old snapshot is gone.
    assert_eq!(fetch.users().len(), 2);
    assert!(fetch.users().iter().all(|u| u.username != "alice"));
    assert_eq!(fetch.phase(), LoadPhase::Idle);
}

#[test]
fn test_failure_keeps_stale_rows_and_notifies() {
    // Scenario: list fetch fails -> table still shows previously loaded
    // rows, error notification shown, loading flags cleared.
    let mut fetch = FetchController::new();
    let mut notifier = notifier();

    let t1 = fetch.begin(LoadMode::Initial);
    fetch.complete(t1, Ok(vec![user("1", "alice", "user")]), &mut notifier);

    let t2 = fetch.begin(LoadMode::Refresh);
    fetch.complete(t2, Err(ApiError::Status(500)), &mut notifier);

    assert_eq!(fetch.users().len(), 1);
    assert_eq!(fetch.users()[0].username, "alice");
    assert_eq!(fetch.phase(), LoadPhase::Idle);
    let notice = notifier.current().expect("failure must surface a notice");
    assert_eq!(notice.severity, Severity::Error);
}

#[test]
fn test_initial_failure_leaves_empty_collection_and_clears_flags() {
    let mut fetch = FetchController::new();
    let mut notifier = notifier();
    let t = fetch.begin(LoadMode::Initial);
    fetch.complete(t, Err(ApiError::Status(502)), &mut notifier);
    assert!(fetch.users().is_empty());
    assert!(!fetch.has_loaded());
    assert_eq!(fetch.phase(), LoadPhase::Idle);
    assert!(notifier.current().is_some());
}

#[test]
fn test_superseded_load_is_discarded() {
    // A refresh begun while the initial load is pending wins; the earlier
    // response must not clobber the newer one.
    let mut fetch = FetchController::new();
    let mut notifier = notifier();

    let stale = fetch.begin(LoadMode::Initial);
    let fresh = fetch.begin(LoadMode::Refresh);

    assert!(fetch.complete(fresh, Ok(vec![user("2", "bob", "admin")]), &mut notifier));
    assert!(!fetch.complete(stale, Ok(vec![user("1", "alice", "user")]), &mut notifier));

    assert_eq!(fetch.users().len(), 1);
    assert_eq!(fetch.users()[0].username, "bob");
}

#[test]
fn test_stale_failure_is_discarded_without_notice() {
    let mut fetch = FetchController::new();
    let mut notifier = notifier();

    let stale = fetch.begin(LoadMode::Initial);
    let fresh = fetch.begin(LoadMode::Refresh);
    fetch.complete(fresh, Ok(vec![user("1", "alice", "user")]), &mut notifier);

    assert!(!fetch.complete(stale, Err(ApiError::Status(500)), &mut notifier));
    assert!(notifier.current().is_none());
}
