use std::time::{Duration, Instant};

use crate::navigation::{Direction, SlideChange};
use crate::slides::Axis;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Exit,
    Enter,
}

/// Emitted by [`SlideTransition::tick`] when a phase boundary is crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionEvent {
    None,
    /// The old slide is fully off screen.
    ExitComplete,
    Finished,
}

/// Smooth-step easing on 0..=1.
pub fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// An in-flight slide change: the old slide leaves along its own axis, then
/// the new one arrives along its axis.
#[derive(Debug, Clone)]
pub struct SlideTransition {
    pub change: SlideChange,
    pub exit_axis: Axis,
    pub enter_axis: Axis,
    phase: Phase,
    phase_started: Instant,
    phase_duration: Duration,
}

impl SlideTransition {
    pub fn new(
        change: SlideChange,
        exit_axis: Axis,
        enter_axis: Axis,
        total: Duration,
        now: Instant,
    ) -> Self {
        Self {
            change,
            exit_axis,
            enter_axis,
            phase: Phase::Exit,
            phase_started: now,
            phase_duration: total / 2,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Linear progress through the current phase.
    pub fn progress(&self, now: Instant) -> f64 {
        if self.phase_duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.phase_started);
        (elapsed.as_secs_f64() / self.phase_duration.as_secs_f64()).min(1.0)
    }

    pub fn tick(&mut self, now: Instant) -> TransitionEvent {
        if self.progress(now) < 1.0 {
            return TransitionEvent::None;
        }
        match self.phase {
            Phase::Exit => {
                self.phase = Phase::Enter;
                self.phase_started = now;
                TransitionEvent::ExitComplete
            }
            Phase::Enter => TransitionEvent::Finished,
        }
    }

    /// Index of the slide currently on screen.
    pub fn visible_slide(&self) -> usize {
        match self.phase {
            Phase::Exit => self.change.from,
            Phase::Enter => self.change.to,
        }
    }

    /// Signed displacement of the visible slide as a fraction of the
    /// viewport along its axis; negative is left/up.
    pub fn offset(&self, now: Instant) -> (Axis, f64) {
        let eased = ease_in_out(self.progress(now));
        let sign = match self.change.direction {
            Direction::Forward => 1.0,
            Direction::Backward => -1.0,
        };
        match self.phase {
            // forward: leaves towards -100%
            Phase::Exit => (self.exit_axis, -sign * eased),
            // forward: arrives from +100%
            Phase::Enter => (self.enter_axis, sign * (1.0 - eased)),
        }
    }

    /// Opacity-like fade for the visible slide, 0..=1.
    pub fn visibility(&self, now: Instant) -> f64 {
        let eased = ease_in_out(self.progress(now));
        match self.phase {
            Phase::Exit => 1.0 - eased,
            Phase::Enter => eased,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forward() -> SlideChange {
        SlideChange {
            from: 1,
            to: 2,
            direction: Direction::Forward,
        }
    }

    #[test]
    fn easing_endpoints() {
        assert_eq!(ease_in_out(0.0), 0.0);
        assert_eq!(ease_in_out(0.5), 0.5);
        assert_eq!(ease_in_out(1.0), 1.0);
        assert_eq!(ease_in_out(3.0), 1.0);
    }

    #[test]
    fn phases_emit_exit_then_finished() {
        let t0 = Instant::now();
        let mut tr = SlideTransition::new(
            forward(),
            Axis::Vertical,
            Axis::Horizontal,
            Duration::from_millis(500),
            t0,
        );
        assert_eq!(tr.visible_slide(), 1);
        assert_eq!(tr.tick(t0 + Duration::from_millis(100)), TransitionEvent::None);

        let mid = t0 + Duration::from_millis(250);
        assert_eq!(tr.tick(mid), TransitionEvent::ExitComplete);
        assert_eq!(tr.phase(), Phase::Enter);
        assert_eq!(tr.visible_slide(), 2);

        assert_eq!(tr.tick(mid + Duration::from_millis(100)), TransitionEvent::None);
        assert_eq!(
            tr.tick(mid + Duration::from_millis(250)),
            TransitionEvent::Finished
        );
    }

    #[test]
    fn offsets_follow_direction_and_axis() {
        let t0 = Instant::now();
        let tr = SlideTransition::new(
            forward(),
            Axis::Vertical,
            Axis::Horizontal,
            Duration::from_millis(500),
            t0,
        );
        assert_eq!(tr.offset(t0), (Axis::Vertical, -0.0));
        let (axis, off) = tr.offset(t0 + Duration::from_millis(250));
        assert_eq!(axis, Axis::Vertical);
        assert_eq!(off, -1.0);

        let mut back = SlideTransition::new(
            SlideChange {
                from: 2,
                to: 1,
                direction: Direction::Backward,
            },
            Axis::Horizontal,
            Axis::Vertical,
            Duration::from_millis(500),
            t0,
        );
        back.tick(t0 + Duration::from_millis(250));
        let (axis, off) = back.offset(t0 + Duration::from_millis(250));
        assert_eq!(axis, Axis::Vertical);
        assert_eq!(off, -1.0);
    }

    #[test]
    fn zero_duration_completes_immediately() {
        let t0 = Instant::now();
        let mut tr = SlideTransition::new(
            forward(),
            Axis::Vertical,
            Axis::Vertical,
            Duration::ZERO,
            t0,
        );
        assert_eq!(tr.tick(t0), TransitionEvent::ExitComplete);
        assert_eq!(tr.tick(t0), TransitionEvent::Finished);
    }
}
