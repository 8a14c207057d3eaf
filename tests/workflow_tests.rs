use std::time::Duration;

use dux::api::ApiError;
use dux::console::{CommitOutcome, Notifier, RoleChangeWorkflow, Severity};
use dux::models::{Role, UserRecord};

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

fn workflow() -> RoleChangeWorkflow {
    RoleChangeWorkflow::new("protected-user")
}

fn notifier() -> Notifier {
    Notifier::new(Duration::from_secs(60))
}

#[test]
fn test_open_creates_draft_initialized_to_current_role() {
    let mut wf = workflow();
    assert!(wf.open(&user("1", "bob", "admin")));
    let draft = wf.draft().expect("draft should exist");
    assert_eq!(draft.username, "bob");
    assert_eq!(draft.current_role, Role::Admin);
    assert_eq!(draft.proposed_role, Role::Admin);
}

#[test]
fn test_protected_account_trigger_is_a_no_op() {
    // Scenario: trigger role-change on the protected user -> no draft.
    let mut wf = workflow();
    assert!(!wf.open(&user("1", "protected-user", "admin")));
    assert!(wf.is_idle());
    assert!(wf.draft().is_none());
}

#[test]
fn test_protected_check_is_case_insensitive() {
    let mut wf = workflow();
    assert!(!wf.open(&user("1", "Protected-User", "admin")));
    assert!(wf.draft().is_none());
}

#[test]
fn test_single_draft_slot() {
    let mut wf = workflow();
    assert!(wf.open(&user("1", "bob", "admin")));
    assert!(!wf.open(&user("2", "alice", "user")));
    assert_eq!(wf.draft().unwrap().username, "bob");
}

#[test]
fn test_confirm_unreachable_without_a_change() {
    let mut wf = workflow();
    wf.open(&user("1", "bob", "admin"));
    assert!(!wf.can_confirm());
    assert!(wf.begin_commit().is_none());
    // Proposing the current role back keeps confirm disabled.
    wf.propose(Role::Admin);
    assert!(!wf.can_confirm());
}

#[test]
fn test_commit_success_notifies_then_idles() {
    let mut wf = workflow();
    let mut notifier = notifier();

    wf.open(&user("1", "bob", "admin"));
    wf.propose(Role::Editor);
    assert!(wf.can_confirm());

    let request = wf.begin_commit().expect("commit should start");
    assert_eq!(request.user_id, "1");
    assert_eq!(request.role, Role::Editor);
    // Draft survives while the remote call is in flight.
    assert!(wf.draft().is_some());

    let outcome = wf.complete_commit(Ok(()), &mut notifier);
    assert_eq!(outcome, CommitOutcome::Saved);
    assert!(wf.is_idle());
    let notice = notifier.current().expect("success notice expected");
    assert_eq!(notice.severity, Severity::Success);
    assert!(notice.message.contains("bob"));
    assert!(notice.message.contains("editor"));
}

#[test]
fn test_commit_failure_discards_draft_and_notifies() {
    let mut wf = workflow();
    let mut notifier = notifier();

    wf.open(&user("1", "bob", "admin"));
    wf.propose(Role::User);
    wf.begin_commit().unwrap();

    let outcome = wf.complete_commit(Err(ApiError::Status(503)), &mut notifier);
    assert_eq!(outcome, CommitOutcome::Failed);
    // No automatic retry: the draft is gone, the operator must reopen.
    assert!(wf.is_idle());
    assert!(wf.draft().is_none());
    assert_eq!(notifier.current().unwrap().severity, Severity::Error);
}

#[test]
fn test_cancel_discards_silently() {
    let mut wf = workflow();
    let mut notifier = notifier();
    wf.open(&user("1", "bob", "admin"));
    wf.propose(Role::User);
    wf.cancel();
    assert!(wf.is_idle());
    assert!(notifier.current().is_none());
    // A new draft can open afterwards.
    assert!(wf.open(&user("2", "alice", "user")));
}

#[test]
fn test_complete_without_commit_is_ignored() {
    let mut wf = workflow();
    let mut notifier = notifier();
    assert_eq!(wf.complete_commit(Ok(()), &mut notifier), CommitOutcome::NotCommitting);
    assert!(notifier.current().is_none());

    wf.open(&user("1", "bob", "admin"));
    // Still Open, not Committing.
    assert_eq!(wf.complete_commit(Ok(()), &mut notifier), CommitOutcome::NotCommitting);
    assert!(wf.draft().is_some());
}

#[test]
fn test_propose_outside_open_is_rejected() {
    let mut wf = workflow();
    assert!(!wf.propose(Role::Admin));
    wf.open(&user("1", "bob", "admin"));
    wf.propose(Role::Editor);
    wf.begin_commit().unwrap();
    // Committing: the scratch value is locked in.
    assert!(!wf.propose(Role::User));
}
