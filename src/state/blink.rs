use std::time::{Duration, Instant};

/// Visibility flag for the drawn caret. Toggles only while running; stopping
/// forces it off.
#[derive(Debug, Clone)]
pub struct CaretBlink {
    visible: bool,
    running: bool,
    interval: Duration,
    last_toggle: Instant,
}

impl CaretBlink {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            visible: false,
            running: false,
            interval,
            last_toggle: now,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Restarts the cycle from the visible phase.
    pub fn start(&mut self, now: Instant) {
        self.running = true;
        self.visible = true;
        self.last_toggle = now;
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.visible = false;
    }

    /// Applies every toggle that fell due since the last one. Returns true when
    /// the flag changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.running || self.interval.is_zero() {
            return false;
        }
        let elapsed = now.saturating_duration_since(self.last_toggle);
        let steps = elapsed.as_millis() / self.interval.as_millis().max(1);
        if steps == 0 {
            return false;
        }
        self.last_toggle += self.interval * steps as u32;
        if steps % 2 == 1 {
            self.visible = !self.visible;
            return true;
        }
        false
    }
}
