//! Banner timing tests
//!
//! The dismissal deadline is 3000 ms from the most recent raise; a newer
//! banner restarts it. Times are injected, no sleeping.

mod common;

use common::{MockAudioDevice, MockShare};
use soundbite::controller::banner::{DEFAULT_TEXT, DISMISS_AFTER};
use soundbite::controller::{ScreenController, MSG_RECORD_FIRST, MSG_RECORD_TO_SHARE};
use std::time::{Duration, Instant};

fn controller() -> ScreenController<MockAudioDevice, MockShare> {
    ScreenController::new(MockAudioDevice::new(), MockShare::new())
}

#[test]
fn test_banner_dismissed_after_3000_ms() {
    let mut ctrl = controller();
    let t0 = Instant::now();

    ctrl.play(None, t0);
    assert!(ctrl.banner().visible());

    ctrl.tick(t0 + Duration::from_millis(2999));
    assert!(ctrl.banner().visible(), "Still inside the dismissal window");

    ctrl.tick(t0 + DISMISS_AFTER);
    assert!(!ctrl.banner().visible(), "Dismissed once the deadline passes");
    assert_eq!(
        ctrl.banner().text(),
        DEFAULT_TEXT,
        "Dismissal restores the placeholder text"
    );
}

#[test]
fn test_newer_banner_restarts_the_deadline() {
    let mut ctrl = controller();
    let t0 = Instant::now();

    ctrl.play(None, t0);
    assert_eq!(ctrl.banner().text(), MSG_RECORD_FIRST);

    // 2 s later a different condition raises a new banner.
    let t1 = t0 + Duration::from_millis(2000);
    ctrl.share(t1);
    assert_eq!(ctrl.banner().text(), MSG_RECORD_TO_SHARE);

    // The first banner's deadline passes; the newer one must survive.
    ctrl.tick(t0 + Duration::from_millis(3500));
    assert!(
        ctrl.banner().visible(),
        "Superseding banner restarts the timer instead of stacking"
    );

    ctrl.tick(t1 + DISMISS_AFTER);
    assert!(!ctrl.banner().visible());
}

#[test]
fn test_tick_without_banner_is_a_no_op() {
    let mut ctrl = controller();
    let t0 = Instant::now();

    ctrl.tick(t0 + Duration::from_secs(60));

    assert!(!ctrl.banner().visible());
    assert_eq!(ctrl.banner().text(), DEFAULT_TEXT);
}
