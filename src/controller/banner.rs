//! Transient notification banner
//!
//! A banner raised at time T dismisses itself at T + 3000 ms. Raising a
//! new banner restarts the deadline; deadlines never stack. Dismissal is
//! driven by the frame loop calling [`Banner::tick`], so there is no timer
//! thread to cancel on teardown.

use std::time::{Duration, Instant};

/// How long a banner stays visible after its most recent raise.
pub const DISMISS_AFTER: Duration = Duration::from_millis(3000);

/// Placeholder text restored after dismissal.
pub const DEFAULT_TEXT: &str = "This is custom Flash message";

#[derive(Debug, Clone)]
pub struct Banner {
    visible: bool,
    text: String,
    raised_at: Option<Instant>,
}

impl Banner {
    pub fn new() -> Self {
        Self {
            visible: false,
            text: DEFAULT_TEXT.to_string(),
            raised_at: None,
        }
    }

    /// Show a message, restarting the dismissal deadline.
    pub fn raise(&mut self, text: impl Into<String>, now: Instant) {
        self.visible = true;
        self.text = text.into();
        self.raised_at = Some(now);
    }

    /// Dismiss the banner once the deadline has passed. Returns true if
    /// this call dismissed it.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(raised_at) = self.raised_at else {
            return false;
        };

        if now.duration_since(raised_at) < DISMISS_AFTER {
            return false;
        }

        self.visible = false;
        self.text = DEFAULT_TEXT.to_string();
        self.raised_at = None;
        true
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Default for Banner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_starts_hidden() {
        let banner = Banner::new();
        assert!(!banner.visible());
        assert_eq!(banner.text(), DEFAULT_TEXT);
    }

    #[test]
    fn test_raise_makes_visible() {
        let mut banner = Banner::new();
        banner.raise("hello", Instant::now());
        assert!(banner.visible());
        assert_eq!(banner.text(), "hello");
    }

    #[test]
    fn test_tick_before_deadline_keeps_banner() {
        let mut banner = Banner::new();
        let t0 = Instant::now();
        banner.raise("hello", t0);

        assert!(!banner.tick(t0 + Duration::from_millis(2999)));
        assert!(banner.visible());
    }

    #[test]
    fn test_tick_after_deadline_dismisses() {
        let mut banner = Banner::new();
        let t0 = Instant::now();
        banner.raise("hello", t0);

        assert!(banner.tick(t0 + DISMISS_AFTER));
        assert!(!banner.visible());
        assert_eq!(banner.text(), DEFAULT_TEXT);
    }

    #[test]
    fn test_new_raise_restarts_deadline() {
        let mut banner = Banner::new();
        let t0 = Instant::now();
        banner.raise("first", t0);
        banner.raise("second", t0 + Duration::from_millis(2000));

        // The first deadline would have fired here; the second must not.
        assert!(!banner.tick(t0 + Duration::from_millis(3500)));
        assert!(banner.visible());
        assert_eq!(banner.text(), "second");

        assert!(banner.tick(t0 + Duration::from_millis(5000)));
        assert!(!banner.visible());
    }
}
