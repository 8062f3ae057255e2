use alloc::format;
use alloc::string::String;
use serde::{Deserialize, Serialize};

/// Seconds counter advanced by the host once per second.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chronometer {
    seconds: u64,
    running: bool,
}

impl Chronometer {
    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Counts one second, returns whether the clock was running.
    pub fn tick(&mut self) -> bool {
        if self.running {
            self.seconds += 1;
        }
        self.running
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.seconds
    }
}

/// `MM:SS`, minutes keep growing past an hour.
pub fn format_elapsed(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_only_while_running() {
        let mut clock = Chronometer::default();
        assert!(!clock.tick());

        clock.start();
        assert!(clock.tick());
        assert!(clock.tick());
        clock.stop();
        assert!(!clock.tick());

        assert_eq!(clock.elapsed_secs(), 2);
    }

    #[test]
    fn reset_clears_and_stops() {
        let mut clock = Chronometer::default();
        clock.start();
        clock.tick();
        clock.reset();

        assert_eq!(clock.elapsed_secs(), 0);
        assert!(!clock.is_running());
    }

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_elapsed(0), "00:00");
        assert_eq!(format_elapsed(59), "00:59");
        assert_eq!(format_elapsed(61), "01:01");
        assert_eq!(format_elapsed(3725), "62:05");
    }
}
