use chrono::{DateTime, Utc};

use crate::api::ApiError;
use crate::console::notify::Notifier;
use crate::models::UserRecord;

/// How a load was requested. `Initial` drives the skeleton presentation;
/// `Refresh` keeps the current rows visible while the fetch is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    Initial,
    Refresh,
}

/// At most one load is pending at a time; the two pending states are
/// mutually exclusive by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    #[default]
    Idle,
    Loading,
    Refreshing,
}

/// Handed out by [`FetchController::begin`]; a completion is only applied
/// when its ticket still matches the latest `begin`. A superseded or
/// torn-down load's response is discarded instead of clobbering state it
/// no longer owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Owns the authoritative local snapshot of the user collection and the
/// load lifecycle around it. The snapshot has exactly one writer (this
/// controller); everything else reads.
#[derive(Debug, Default)]
pub struct FetchController {
    users: Vec<UserRecord>,
    phase: LoadPhase,
    generation: u64,
    loaded: bool,
    last_refreshed: Option<DateTime<Utc>>,
}

impl FetchController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> &[UserRecord] {
        &self.users
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == LoadPhase::Loading
    }

    pub fn is_refreshing(&self) -> bool {
        self.phase == LoadPhase::Refreshing
    }

    /// Whether any fetch has ever succeeded.
    pub fn has_loaded(&self) -> bool {
        self.loaded
    }

    pub fn last_refreshed(&self) -> Option<DateTime<Utc>> {
        self.last_refreshed
    }

    /// Start a load. A begin while another load is pending supersedes it:
    /// the earlier ticket goes stale and its completion will be discarded
    /// (last write to the collection wins).
    pub fn begin(&mut self, mode: LoadMode) -> LoadTicket {
        self.generation += 1;
        self.phase = match mode {
            LoadMode::Initial => LoadPhase::Loading,
            LoadMode::Refresh => LoadPhase::Refreshing,
        };
        LoadTicket(self.generation)
    }

    /// Feed a fetch result back in. Returns `false` when the ticket was
    /// stale and the outcome was discarded. On success the snapshot is
    /// replaced wholesale; on failure the stale snapshot stays (stale rows
    /// beat an empty table) and a failure notice is posted. Either way the
    /// pending flag clears — a fetch never leaves the console spinning.
    pub fn complete(
        &mut self,
        ticket: LoadTicket,
        outcome: Result<Vec<UserRecord>, ApiError>,
        notifier: &mut Notifier,
    ) -> bool {
        if ticket.0 != self.generation {
            tracing::debug!(ticket = ticket.0, generation = self.generation, "Discarding stale fetch result");
            return false;
        }
        self.phase = LoadPhase::Idle;
        match outcome {
            Ok(users) => {
                self.users = users;
                self.loaded = true;
                self.last_refreshed = Some(Utc::now());
            }
            Err(e) => {
                tracing::error!(%e, "User directory fetch failed");
                notifier.error(format!("Failed to load users: {}", e));
            }
        }
        true
    }
}
