//! Framework-independent console core: the fetch lifecycle, the derived
//! filter/search/pagination pipeline, the role-change workflow, and the
//! single-slot notification channel. Both the CLI and the web UI drive
//! this module; neither surface owns any directory state of its own.

pub mod fetch;
pub mod filter;
pub mod notify;
pub mod paginate;
pub mod view;
pub mod workflow;

pub use fetch::{FetchController, LoadMode, LoadPhase, LoadTicket};
pub use filter::filter_users;
pub use notify::{Notice, Notifier, Severity};
pub use paginate::{page_count, page_slice};
pub use view::{PageView, ViewState};
pub use workflow::{CommitOutcome, RoleChangeDraft, RoleChangeRequest, RoleChangeWorkflow, WorkflowState};

use std::time::Duration;

/// Bundles the stateful console pieces behind one lock.
pub struct Console {
    pub fetch: FetchController,
    pub workflow: RoleChangeWorkflow,
    pub notifier: Notifier,
}

impl Console {
    pub fn new(protected_username: impl Into<String>, notification_ttl: Duration) -> Self {
        Console {
            fetch: FetchController::new(),
            workflow: RoleChangeWorkflow::new(protected_username),
            notifier: Notifier::new(notification_ttl),
        }
    }
}
