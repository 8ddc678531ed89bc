use std::time::{Duration, Instant};

pub const STEP_INTERVAL: Duration = Duration::from_millis(80);
pub const STEP_PERCENT: u8 = 2;
pub const MESSAGE_INTERVAL: Duration = Duration::from_millis(700);

/// Highest value shown while the analysis is still outstanding.
pub const IN_FLIGHT_CAP: u8 = 99;

pub const MESSAGES: [&str; 6] = [
    "Crunching your keystrokes...",
    "Analyzing your typing habits...",
    "Finding your peak performance...",
    "Calculating your accuracy...",
    "Discovering your persona...",
    "Generating your story...",
];

/// Timer-paced progress that only reaches 100% once the real result is in.
#[derive(Debug, Clone)]
pub struct ProgressIndicator {
    percent: u8,
    message_index: usize,
    started: Instant,
    steps_taken: u32,
    rotations: u32,
    complete: bool,
}

impl ProgressIndicator {
    pub fn new(now: Instant) -> Self {
        Self {
            percent: 0,
            message_index: 0,
            started: now,
            steps_taken: 0,
            rotations: 0,
            complete: false,
        }
    }

    pub fn percent(&self) -> u8 {
        self.percent
    }

    pub fn message(&self) -> &'static str {
        MESSAGES[self.message_index]
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// The analysis answered; jump to 100%.
    pub fn complete(&mut self) {
        self.complete = true;
        self.percent = 100;
    }

    pub fn tick(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.started);

        let steps = (elapsed.as_millis() / STEP_INTERVAL.as_millis()) as u32;
        if steps > self.steps_taken {
            let gained = (steps - self.steps_taken).saturating_mul(STEP_PERCENT as u32);
            let cap: u32 = if self.complete {
                100
            } else {
                IN_FLIGHT_CAP as u32
            };
            self.percent = (self.percent as u32 + gained).min(cap) as u8;
            self.steps_taken = steps;
        }

        let rotations = (elapsed.as_millis() / MESSAGE_INTERVAL.as_millis()) as u32;
        if rotations > self.rotations {
            self.message_index =
                (self.message_index + (rotations - self.rotations) as usize) % MESSAGES.len();
            self.rotations = rotations;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_two_percent_per_step() {
        let t0 = Instant::now();
        let mut p = ProgressIndicator::new(t0);
        p.tick(t0 + Duration::from_millis(79));
        assert_eq!(p.percent(), 0);
        p.tick(t0 + Duration::from_millis(80));
        assert_eq!(p.percent(), 2);
        p.tick(t0 + Duration::from_millis(800));
        assert_eq!(p.percent(), 20);
    }

    #[test]
    fn caps_below_full_while_in_flight() {
        let t0 = Instant::now();
        let mut p = ProgressIndicator::new(t0);
        p.tick(t0 + Duration::from_secs(30));
        assert_eq!(p.percent(), IN_FLIGHT_CAP);
        assert!(!p.is_complete());
        p.complete();
        assert_eq!(p.percent(), 100);
        p.tick(t0 + Duration::from_secs(31));
        assert_eq!(p.percent(), 100);
    }

    #[test]
    fn messages_rotate_and_wrap() {
        let t0 = Instant::now();
        let mut p = ProgressIndicator::new(t0);
        assert_eq!(p.message(), MESSAGES[0]);
        p.tick(t0 + Duration::from_millis(700));
        assert_eq!(p.message(), MESSAGES[1]);
        p.tick(t0 + Duration::from_millis(700 * 7));
        assert_eq!(p.message(), MESSAGES[1]);
    }
}
