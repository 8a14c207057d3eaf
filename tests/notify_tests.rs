use std::time::{Duration, Instant};

use dux::console::{Notifier, Severity};

#[test]
fn test_single_slot_last_write_wins() {
    let mut notifier = Notifier::new(Duration::from_secs(60));
    notifier.success("first");
    notifier.error("second");
    let notice = notifier.current().expect("a notice should be showing");
    assert_eq!(notice.message, "second");
    assert_eq!(notice.severity, Severity::Error);
}

#[test]
fn test_notice_survives_until_ttl() {
    let mut notifier = Notifier::new(Duration::from_secs(60));
    notifier.info("hello");
    assert!(notifier.current_at(Instant::now()).is_some());
}

#[test]
fn test_notice_expires_after_ttl() {
    let mut notifier = Notifier::new(Duration::ZERO);
    notifier.success("gone in a blink");
    assert!(notifier.current_at(Instant::now()).is_none());
    // Dropped for good, not just hidden.
    assert!(notifier.current().is_none());
}

#[test]
fn test_manual_dismiss_clears_the_slot() {
    let mut notifier = Notifier::new(Duration::from_secs(60));
    notifier.error("problem");
    notifier.dismiss();
    assert!(notifier.current().is_none());
    assert!(notifier.current_at(Instant::now()).is_none());
}

#[test]
fn test_severity_labels() {
    assert_eq!(Severity::Success.as_str(), "success");
    assert_eq!(Severity::Error.as_str(), "error");
    assert_eq!(Severity::Info.as_str(), "info");
}
