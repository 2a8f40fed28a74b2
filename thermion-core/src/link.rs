//! Gateway link health tracking
//!
//! The panel pings once a second; the gateway answers with pongs. Three
//! silent timeout windows in a row mean the link is down and the display
//! should say so instead of showing stale temperatures.

/// How often the panel sends a ping
pub const PING_INTERVAL_MS: u32 = 1000;
/// Silence window after which a pong counts as missed
pub const PONG_TIMEOUT_MS: u32 = 3000;
/// Consecutive missed pongs before the link is considered down
pub const MAX_MISSED_PONGS: u8 = 3;

/// Link health as seen by the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkStatus {
    /// Gateway is answering pings
    Up,
    /// Too many pings went unanswered
    Down,
}

/// Tracks pong arrivals against elapsed time
///
/// Driven by the transmit task: `update_time` on its tick, pong arrivals
/// whenever the receive task signals one.
#[derive(Debug, Clone)]
pub struct LinkMonitor {
    /// Missed pong count
    missed_pongs: u8,
    /// Time since last pong (ms)
    time_since_pong_ms: u32,
}

impl Default for LinkMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkMonitor {
    /// Create a new link monitor
    ///
    /// Starts optimistic: the link counts as up until pongs actually go
    /// missing.
    pub fn new() -> Self {
        Self {
            missed_pongs: 0,
            time_since_pong_ms: 0,
        }
    }

    /// Record a pong received
    pub fn pong_received(&mut self) {
        self.missed_pongs = 0;
        self.time_since_pong_ms = 0;
    }

    /// Update time tracking
    ///
    /// # Arguments
    /// - `delta_ms`: Time elapsed since last update
    pub fn update_time(&mut self, delta_ms: u32) {
        self.time_since_pong_ms = self.time_since_pong_ms.saturating_add(delta_ms);

        if self.time_since_pong_ms >= PONG_TIMEOUT_MS {
            self.missed_pongs = self.missed_pongs.saturating_add(1);
            self.time_since_pong_ms = 0;
        }
    }

    /// Current link health
    pub fn status(&self) -> LinkStatus {
        if self.missed_pongs >= MAX_MISSED_PONGS {
            LinkStatus::Down
        } else {
            LinkStatus::Up
        }
    }

    /// Check if the link is healthy
    pub fn is_up(&self) -> bool {
        self.status() == LinkStatus::Up
    }

    /// Get number of missed pongs
    pub fn missed_pongs(&self) -> u8 {
        self.missed_pongs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_up() {
        let monitor = LinkMonitor::new();
        assert_eq!(monitor.status(), LinkStatus::Up);
    }

    #[test]
    fn test_down_after_missed_pongs() {
        let mut monitor = LinkMonitor::new();

        // Miss 3 pongs
        for _ in 0..3 {
            monitor.update_time(PONG_TIMEOUT_MS);
        }

        assert_eq!(monitor.status(), LinkStatus::Down);
        assert!(!monitor.is_up());
    }

    #[test]
    fn test_pong_resets_counter() {
        let mut monitor = LinkMonitor::new();

        // Miss 2 pongs
        monitor.update_time(PONG_TIMEOUT_MS);
        monitor.update_time(PONG_TIMEOUT_MS);
        assert_eq!(monitor.missed_pongs(), 2);

        // Receive pong
        monitor.pong_received();
        assert_eq!(monitor.missed_pongs(), 0);
        assert!(monitor.is_up());
    }

    #[test]
    fn test_partial_window_not_a_miss() {
        let mut monitor = LinkMonitor::new();
        monitor.update_time(PONG_TIMEOUT_MS - 1);
        assert_eq!(monitor.missed_pongs(), 0);

        // The next tick tips it over
        monitor.update_time(1);
        assert_eq!(monitor.missed_pongs(), 1);
    }

    #[test]
    fn test_recovers_after_down() {
        let mut monitor = LinkMonitor::new();
        for _ in 0..5 {
            monitor.update_time(PONG_TIMEOUT_MS);
        }
        assert_eq!(monitor.status(), LinkStatus::Down);

        monitor.pong_received();
        assert_eq!(monitor.status(), LinkStatus::Up);
    }

    #[test]
    fn test_time_saturates() {
        let mut monitor = LinkMonitor::new();
        monitor.update_time(u32::MAX);
        monitor.update_time(u32::MAX);
        // One miss per update at most, and no overflow panic
        assert_eq!(monitor.missed_pongs(), 2);
    }
}
