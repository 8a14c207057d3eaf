//! End-to-end console scenarios driven synchronously: the suspension
//! points (network calls) are replaced by feeding completion events by
//! hand, exactly as the async glue does.

use std::time::Duration;

use dux::api::ApiError;
use dux::console::{CommitOutcome, Console, LoadMode, Severity};
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

fn console() -> Console {
    Console::new("protected-user", Duration::from_secs(60))
}

#[test]
fn test_successful_role_change_notifies_before_table_updates() {
    let mut console = console();

    // Initial load: bob is an admin.
    let ticket = console.fetch.begin(LoadMode::Initial);
    console.fetch.complete(
        ticket,
        Ok(vec![user("1", "alice", "user"), user("2", "bob", "admin")]),
        &mut console.notifier,
    );

    // Operator opens the dialog and proposes editor.
    let bob = console.fetch.users()[1].clone();
    assert!(console.workflow.open(&bob));
    console.workflow.propose(Role::Editor);
    let request = console.workflow.begin_commit().expect("change is confirmable");

    // Remote accepts.
    let outcome = console.workflow.complete_commit(Ok(()), &mut console.notifier);
    assert_eq!(outcome, CommitOutcome::Saved);

    // The success notice is visible before the refresh even starts; the
    // table still shows the stale role at this point.
    assert_eq!(console.notifier.current().unwrap().severity, Severity::Success);
    assert_eq!(console.fetch.users()[1].role, "admin");

    // Follow-up refresh lands and the table reflects the remote truth.
    let ticket = console.fetch.begin(LoadMode::Refresh);
    console.fetch.complete(
        ticket,
        Ok(vec![user("1", "alice", "user"), user("2", "bob", "editor")]),
        &mut console.notifier,
    );
    assert_eq!(console.fetch.users()[1].role, "editor");
    assert_eq!(request.role, Role::Editor);
    // The refresh did not overwrite the success notice.
    assert_eq!(console.notifier.current().unwrap().severity, Severity::Success);
}

#[test]
fn test_protected_role_is_unchanged_by_any_trigger_sequence() {
    let mut console = console();

    let ticket = console.fetch.begin(LoadMode::Initial);
    console.fetch.complete(
        ticket,
        Ok(vec![user("1", "protected-user", "admin"), user("2", "bob", "user")]),
        &mut console.notifier,
    );

    // Repeated triggers on the protected record never create a draft,
    // never reach commit, and never emit a notice.
    for _ in 0..3 {
        let protected = console.fetch.users()[0].clone();
        assert!(!console.workflow.open(&protected));
        assert!(console.workflow.begin_commit().is_none());
    }
    assert!(console.notifier.current().is_none());
    assert_eq!(console.fetch.users()[0].role, "admin");

    // A normal user is still editable afterwards.
    let bob = console.fetch.users()[1].clone();
    assert!(console.workflow.open(&bob));
}

#[test]
fn test_failed_commit_leaves_console_interactive() {
    let mut console = console();

    let ticket = console.fetch.begin(LoadMode::Initial);
    console.fetch.complete(ticket, Ok(vec![user("1", "bob", "admin")]), &mut console.notifier);

    let bob = console.fetch.users()[0].clone();
    console.workflow.open(&bob);
    console.workflow.propose(Role::User);
    console.workflow.begin_commit().unwrap();
    let outcome = console
        .workflow
        .complete_commit(Err(ApiError::Status(500)), &mut console.notifier);
    assert_eq!(outcome, CommitOutcome::Failed);

    // Exactly one notice, workflow idle, fetch idle, rows intact.
    assert_eq!(console.notifier.current().unwrap().severity, Severity::Error);
    assert!(console.workflow.is_idle());
    assert!(!console.fetch.is_loading() && !console.fetch.is_refreshing());
    assert_eq!(console.fetch.users().len(), 1);

    // The operator can reopen immediately.
    assert!(console.workflow.open(&bob));
}
