//! Layout chrome state: navbar scroll styling, mobile drawer, splash screen.

use std::time::{Duration, Instant};

use serde::Serialize;

use crate::carousel::AUTO_ADVANCE;

/// Scroll offset (px) past which the navbar switches to its solid style.
pub const NAVBAR_SCROLL_THRESHOLD: f64 = 50.0;

/// How long the splash screen stays up before closing itself.
pub const SPLASH_DURATION: Duration = Duration::from_millis(2500);

/// Session-storage key marking the splash screen as already shown.
pub const SPLASH_SESSION_KEY: &str = "splash_shown";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavbarState {
    pub scrolled: bool,
    pub drawer_open: bool,
}

impl NavbarState {
    pub fn on_scroll(&mut self, offset: f64) {
        self.scrolled = offset > NAVBAR_SCROLL_THRESHOLD;
    }

    pub fn toggle_drawer(&mut self) {
        self.drawer_open = !self.drawer_open;
    }

    /// Following a link closes the drawer.
    pub fn navigate(&mut self) {
        self.drawer_open = false;
    }
}

/// Splash screen shown once per browser session.
#[derive(Debug, Clone)]
pub struct SplashScreen {
    visible: bool,
    opened_at: Instant,
}

impl SplashScreen {
    /// `already_shown` is the session flag read at page load.
    pub fn new(already_shown: bool, now: Instant) -> Self {
        Self {
            visible: !already_shown,
            opened_at: now,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Close automatically after [`SPLASH_DURATION`].
    pub fn tick(&mut self, now: Instant) {
        if self.visible && now.saturating_duration_since(self.opened_at) >= SPLASH_DURATION {
            self.visible = false;
        }
    }

    pub fn dismiss(&mut self) {
        self.visible = false;
    }

    /// Value to persist under [`SPLASH_SESSION_KEY`]: once the splash has
    /// been closed, later page loads in the session skip it.
    pub fn session_flag(&self) -> bool {
        !self.visible
    }
}

/// Timing settings the client chrome reads from shared page props.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChromeSettings {
    pub navbar_scroll_threshold: f64,
    pub carousel_interval_ms: u64,
    pub splash_duration_ms: u64,
    pub splash_session_key: &'static str,
}

impl Default for ChromeSettings {
    fn default() -> Self {
        Self {
            navbar_scroll_threshold: NAVBAR_SCROLL_THRESHOLD,
            carousel_interval_ms: AUTO_ADVANCE.as_millis() as u64,
            splash_duration_ms: SPLASH_DURATION.as_millis() as u64,
            splash_session_key: SPLASH_SESSION_KEY,
        }
    }
}
