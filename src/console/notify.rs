use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Info => "info",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub message: String,
    pub severity: Severity,
    posted_at: Instant,
}

impl Notice {
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.posted_at)
    }
}

/// Single-slot status mailbox. A new notice replaces whatever is showing
/// (last write wins, no queueing); notices expire after a fixed TTL unless
/// dismissed first.
#[derive(Debug)]
pub struct Notifier {
    slot: Option<Notice>,
    ttl: Duration,
}

impl Notifier {
    pub fn new(ttl: Duration) -> Self {
        Notifier { slot: None, ttl }
    }

    pub fn post(&mut self, severity: Severity, message: impl Into<String>) {
        self.slot = Some(Notice {
            message: message.into(),
            severity,
            posted_at: Instant::now(),
        });
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.post(Severity::Success, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.post(Severity::Error, message);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.post(Severity::Info, message);
    }

    /// The notice currently showing, ignoring expiry.
    pub fn current(&self) -> Option<&Notice> {
        self.slot.as_ref()
    }

    /// The notice currently showing as of `now`; expired notices are
    /// dropped on the way out.
    pub fn current_at(&mut self, now: Instant) -> Option<&Notice> {
        if let Some(notice) = &self.slot {
            if notice.age(now) >= self.ttl {
                self.slot = None;
            }
        }
        self.slot.as_ref()
    }

    /// Manual dismiss; also cancels the pending auto-dismiss.
    pub fn dismiss(&mut self) {
        self.slot = None;
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}
