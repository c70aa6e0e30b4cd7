//! Hero image carousel state: timer-driven auto-advance that pauses while
//! the visitor interacts with it.

use std::time::{Duration, Instant};

/// Time each slide stays on screen.
pub const AUTO_ADVANCE: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct HeroCarousel {
    len: usize,
    index: usize,
    paused: bool,
    interval: Duration,
    last_change: Instant,
}

impl HeroCarousel {
    pub fn new(len: usize, now: Instant) -> Self {
        Self::with_interval(len, AUTO_ADVANCE, now)
    }

    pub fn with_interval(len: usize, interval: Duration, now: Instant) -> Self {
        Self {
            len,
            index: 0,
            paused: false,
            interval,
            last_change: now,
        }
    }

    pub fn current(&self) -> usize {
        self.index
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Advance when the interval has elapsed. Returns whether the slide changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.paused || self.len < 2 {
            return false;
        }
        if now.saturating_duration_since(self.last_change) < self.interval {
            return false;
        }
        self.index = (self.index + 1) % self.len;
        self.last_change = now;
        true
    }

    /// Stop auto-advancing (pointer enter, touch start).
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume auto-advancing; the current slide gets a full interval.
    pub fn resume(&mut self, now: Instant) {
        self.paused = false;
        self.last_change = now;
    }

    pub fn next(&mut self, now: Instant) {
        if self.len > 0 {
            self.go_to((self.index + 1) % self.len, now);
        }
    }

    pub fn prev(&mut self, now: Instant) {
        if self.len > 0 {
            self.go_to((self.index + self.len - 1) % self.len, now);
        }
    }

    /// Jump to `index` (indicator dot click). Out-of-range indices are ignored.
    pub fn go_to(&mut self, index: usize, now: Instant) {
        if index < self.len {
            self.index = index;
            self.last_change = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_after_interval_and_wraps() {
        let t0 = Instant::now();
        let mut c = HeroCarousel::new(3, t0);
        assert!(!c.tick(t0 + Duration::from_secs(4)));
        assert!(c.tick(t0 + AUTO_ADVANCE));
        assert!(c.tick(t0 + AUTO_ADVANCE * 2));
        assert!(c.tick(t0 + AUTO_ADVANCE * 3));
        assert_eq!(c.current(), 0);
    }

    #[test]
    fn paused_carousel_holds_its_slide() {
        let t0 = Instant::now();
        let mut c = HeroCarousel::new(3, t0);
        c.pause();
        assert!(!c.tick(t0 + Duration::from_secs(60)));
        c.resume(t0 + Duration::from_secs(60));
        assert!(!c.tick(t0 + Duration::from_secs(62)));
        assert!(c.tick(t0 + Duration::from_secs(65)));
        assert_eq!(c.current(), 1);
    }

    #[test]
    fn manual_navigation_restarts_timer() {
        let t0 = Instant::now();
        let mut c = HeroCarousel::new(4, t0);
        c.prev(t0 + Duration::from_secs(4));
        assert_eq!(c.current(), 3);
        assert!(!c.tick(t0 + Duration::from_secs(6)));
        c.go_to(9, t0);
        assert_eq!(c.current(), 3);
        c.next(t0);
        assert_eq!(c.current(), 0);
    }

    #[test]
    fn single_slide_never_moves() {
        let t0 = Instant::now();
        let mut c = HeroCarousel::new(1, t0);
        assert!(!c.tick(t0 + Duration::from_secs(100)));
    }
}
