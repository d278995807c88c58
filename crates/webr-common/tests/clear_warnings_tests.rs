//! Clearing touches the global warning set, so it lives in its own test binary.

use webr_common::warning::{clear_warnings, has_warned, warn_once};

#[test]
fn test_clear_warnings_forgets_messages() {
    warn_once("test-clear", "to be cleared");
    assert!(has_warned("test-clear", "to be cleared"));

    clear_warnings();
    assert!(!has_warned("test-clear", "to be cleared"));

    warn_once("test-clear", "to be cleared");
    assert!(has_warned("test-clear", "to be cleared"));
}
