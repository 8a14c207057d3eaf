//! Async choreography between the console core and the remote directory.
//! The lock is never held across an await: each operation transitions
//! state, releases the lock for the network call, then feeds the
//! completion event back in.

use crate::api;
use crate::console::{CommitOutcome, LoadMode};
use crate::models::AppState;

/// Run one full load cycle in the given mode. All failures end up in the
/// notifier; this never returns an error.
pub async fn load_directory(state: &AppState, mode: LoadMode) {
    let ticket = {
        let mut console = state.console.lock().unwrap();
        console.fetch.begin(mode)
    };
    let outcome = api::load_users(&state.client, &state.api_base_url, &state.api_token).await;
    let mut console = state.console.lock().unwrap();
    let crate::console::Console { fetch, notifier, .. } = &mut *console;
    fetch.complete(ticket, outcome, notifier);
}

/// First-hit load: fetch once in Initial mode if nothing has ever been
/// loaded, otherwise do nothing.
pub async fn ensure_loaded(state: &AppState) {
    let needs_load = {
        let console = state.console.lock().unwrap();
        !console.fetch.has_loaded() && !console.fetch.is_loading()
    };
    if needs_load {
        load_directory(state, LoadMode::Initial).await;
    }
}

/// Drive a pending draft through commit: issue the remote call, feed the
/// result back, and on success trigger the follow-up refresh. The success
/// notice is posted by the workflow before the refresh is issued, so the
/// operator sees "saved" first.
pub async fn commit_role_change(state: &AppState) -> CommitOutcome {
    let request = {
        let mut console = state.console.lock().unwrap();
        match console.workflow.begin_commit() {
            Some(req) => req,
            None => return CommitOutcome::NotCommitting,
        }
    };
    let result = api::update_user_role(
        &state.client,
        &state.api_base_url,
        &state.api_token,
        &request.user_id,
        request.role,
    )
    .await;
    let outcome = {
        let mut console = state.console.lock().unwrap();
        let crate::console::Console { workflow, notifier, .. } = &mut *console;
        workflow.complete_commit(result, notifier)
    };
    if outcome == CommitOutcome::Saved {
        load_directory(state, LoadMode::Refresh).await;
    }
    outcome
}
