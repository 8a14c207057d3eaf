use crate::api::ApiError;
use crate::console::notify::Notifier;
use crate::models::{Role, UserRecord};

/// The in-progress, uncommitted role change. Created when the dialog
/// opens, destroyed on cancel or commit; holds the target by id/username
/// rather than a deep copy of the record.
#[derive(Debug, Clone)]
pub struct RoleChangeDraft {
    pub user_id: String,
    pub username: String,
    pub current_role: Role,
    pub proposed_role: Role,
}

/// What the caller must send to the remote directory for a commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleChangeRequest {
    pub user_id: String,
    pub username: String,
    pub role: Role,
}

#[derive(Debug, Default)]
pub enum WorkflowState {
    #[default]
    Idle,
    Open(RoleChangeDraft),
    Committing(RoleChangeDraft),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Remote accepted the change; the caller must now issue a refresh
    /// fetch. The success notice is already posted at this point, so the
    /// operator sees "saved" before the table visibly updates.
    Saved,
    /// Remote rejected or the transport failed; the draft is gone and the
    /// operator must reopen to retry.
    Failed,
    /// No commit was pending (superseded or torn down); nothing changed.
    NotCommitting,
}

/// Single-draft role-change state machine: Idle -> Open -> Committing ->
/// Idle. The protected account and the single-draft slot are both guarded
/// here, not just in the UI.
#[derive(Debug)]
pub struct RoleChangeWorkflow {
    state: WorkflowState,
    protected_username: String,
}

impl RoleChangeWorkflow {
    pub fn new(protected_username: impl Into<String>) -> Self {
        RoleChangeWorkflow {
            state: WorkflowState::Idle,
            protected_username: protected_username.into(),
        }
    }

    /// The protected account is identified by a reserved username, not by
    /// its role.
    pub fn is_protected(&self, username: &str) -> bool {
        username.eq_ignore_ascii_case(&self.protected_username)
    }

    pub fn protected_username(&self) -> &str {
        &self.protected_username
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, WorkflowState::Idle)
    }

    pub fn draft(&self) -> Option<&RoleChangeDraft> {
        match &self.state {
            WorkflowState::Open(d) | WorkflowState::Committing(d) => Some(d),
            WorkflowState::Idle => None,
        }
    }

    /// Open a draft for `user`. A no-op (returns `false`) for the
    /// protected account and while another draft exists; the guard runs
    /// before any state transition.
    pub fn open(&mut self, user: &UserRecord) -> bool {
        if self.is_protected(&user.username) {
            tracing::debug!(username = %user.username, "Ignoring role-change trigger on protected account");
            return false;
        }
        if !self.is_idle() {
            return false;
        }
        self.state = WorkflowState::Open(RoleChangeDraft {
            user_id: user.id.clone(),
            username: user.username.clone(),
            current_role: user.role(),
            proposed_role: user.role(),
        });
        true
    }

    /// Update the scratch role on an open draft.
    pub fn propose(&mut self, role: Role) -> bool {
        match &mut self.state {
            WorkflowState::Open(draft) => {
                draft.proposed_role = role;
                true
            }
            _ => false,
        }
    }

    /// Confirm is only reachable when the proposed role actually differs
    /// from the current one.
    pub fn can_confirm(&self) -> bool {
        match &self.state {
            WorkflowState::Open(draft) => draft.proposed_role != draft.current_role,
            _ => false,
        }
    }

    /// Open -> Committing. Returns the remote call to issue, or `None`
    /// when the confirm precondition does not hold.
    pub fn begin_commit(&mut self) -> Option<RoleChangeRequest> {
        if !self.can_confirm() {
            return None;
        }
        let draft = match std::mem::take(&mut self.state) {
            WorkflowState::Open(d) => d,
            other => {
                // can_confirm already ruled these out
                self.state = other;
                return None;
            }
        };
        let request = RoleChangeRequest {
            user_id: draft.user_id.clone(),
            username: draft.username.clone(),
            role: draft.proposed_role,
        };
        self.state = WorkflowState::Committing(draft);
        Some(request)
    }

    /// Feed the remote result back in. Both paths discard the draft and
    /// land in Idle; success posts its notice before the caller issues the
    /// follow-up refresh.
    pub fn complete_commit(&mut self, outcome: Result<(), ApiError>, notifier: &mut Notifier) -> CommitOutcome {
        let draft = match std::mem::take(&mut self.state) {
            WorkflowState::Committing(d) => d,
            other => {
                self.state = other;
                return CommitOutcome::NotCommitting;
            }
        };
        match outcome {
            Ok(()) => {
                notifier.success(format!("Updated {} to {}", draft.username, draft.proposed_role));
                CommitOutcome::Saved
            }
            Err(e) => {
                tracing::error!(%e, username = %draft.username, "Role update failed");
                notifier.error(format!("Failed to update {}: {}", draft.username, e));
                CommitOutcome::Failed
            }
        }
    }

    /// Cancel/close from Open: discard silently, no remote call, no
    /// notice. Ignored while a commit is in flight.
    pub fn cancel(&mut self) {
        if matches!(self.state, WorkflowState::Open(_)) {
            self.state = WorkflowState::Idle;
        }
    }
}
