use std::time::{Duration, Instant};

use crossterm::event::KeyCode;
use tracing::debug;

use crate::config::Config;
use crate::scroll::{CanNavigate, ScrollMetrics};

/// Lines scrolled when a wheel notch or swipe is held back by the gate.
const GESTURE_SCROLL_LINES: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideChange {
    pub from: usize,
    pub to: usize,
    pub direction: Direction,
}

/// What the caller should do in response to an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavResponse {
    Changed(SlideChange),
    /// Scroll the visible slide's content by this many lines.
    Scroll(i32),
    Ignored,
}

impl From<Option<SlideChange>> for NavResponse {
    fn from(change: Option<SlideChange>) -> Self {
        change.map_or(NavResponse::Ignored, NavResponse::Changed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigationSettings {
    pub wheel_threshold: f64,
    pub wheel_debounce: Duration,
    pub swipe_threshold: f64,
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for NavigationSettings {
    fn from(cfg: &Config) -> Self {
        Self {
            wheel_threshold: cfg.wheel_threshold,
            wheel_debounce: Duration::from_millis(cfg.wheel_debounce_ms),
            swipe_threshold: cfg.swipe_threshold,
        }
    }
}

/// Trailing-edge debounce over wheel deltas: every event replaces the
/// pending one and restarts the timer.
#[derive(Debug, Clone, Default)]
pub struct WheelDebouncer {
    pending: Option<(f64, Instant)>,
}

impl WheelDebouncer {
    pub fn push(&mut self, delta: f64, now: Instant, wait: Duration) {
        self.pending = Some((delta, now + wait));
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The settled delta, once its quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<f64> {
        match self.pending {
            Some((delta, due)) if now >= due => {
                self.pending = None;
                Some(delta)
            }
            _ => None,
        }
    }
}

/// Slide traversal state for the wrapped sequence.
///
/// The controller only ever moves one slide per lock cycle: a change engages
/// the lock and nothing but [`NavigationController::complete_transition`]
/// releases it. Input arriving while locked is dropped.
#[derive(Debug, Clone)]
pub struct NavigationController {
    slide_count: usize,
    current: usize,
    direction: Direction,
    animating: bool,
    can_navigate: CanNavigate,
    settings: NavigationSettings,
    wheel: WheelDebouncer,
    touch_start: Option<(f64, f64)>,
}

impl NavigationController {
    pub fn new(slide_count: usize, settings: NavigationSettings) -> Self {
        Self {
            slide_count,
            current: 0,
            direction: Direction::Forward,
            animating: false,
            can_navigate: CanNavigate::default(),
            settings,
            wheel: WheelDebouncer::default(),
            touch_start: None,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn can_navigate(&self) -> CanNavigate {
        self.can_navigate
    }

    pub fn can_go_next(&self) -> bool {
        !self.animating && self.current + 1 < self.slide_count
    }

    pub fn can_go_previous(&self) -> bool {
        !self.animating && self.current > 0
    }

    pub fn go_to_slide(&mut self, target: usize) -> Option<SlideChange> {
        if self.animating {
            debug!(target, "navigation dropped while animating");
            return None;
        }
        if target >= self.slide_count || target == self.current {
            return None;
        }
        let direction = if target > self.current {
            Direction::Forward
        } else {
            Direction::Backward
        };
        let change = SlideChange {
            from: self.current,
            to: target,
            direction,
        };
        self.direction = direction;
        self.animating = true;
        self.current = target;
        // Content of the entering slide has not been measured yet.
        self.can_navigate = CanNavigate::default();
        Some(change)
    }

    pub fn go_next(&mut self) -> Option<SlideChange> {
        self.go_to_slide(self.current + 1)
    }

    pub fn go_previous(&mut self) -> Option<SlideChange> {
        match self.current.checked_sub(1) {
            Some(target) => self.go_to_slide(target),
            None => None,
        }
    }

    pub fn go_first(&mut self) -> Option<SlideChange> {
        self.go_to_slide(0)
    }

    pub fn go_last(&mut self) -> Option<SlideChange> {
        self.go_to_slide(self.slide_count.saturating_sub(1))
    }

    /// The exiting slide has finished leaving; input is accepted again.
    pub fn complete_transition(&mut self) {
        self.animating = false;
    }

    /// Re-evaluate the gate from the visible slide's scroll position.
    pub fn update_scroll_boundary(&mut self, metrics: ScrollMetrics) {
        self.can_navigate = CanNavigate::from(metrics);
    }

    pub fn on_key(&mut self, code: KeyCode) -> NavResponse {
        match code {
            KeyCode::Right | KeyCode::Char(' ') => self.go_next().into(),
            KeyCode::Left => self.go_previous().into(),
            KeyCode::Down => {
                if self.can_navigate.down {
                    self.go_next().into()
                } else {
                    NavResponse::Scroll(1)
                }
            }
            KeyCode::Up => {
                if self.can_navigate.up {
                    self.go_previous().into()
                } else {
                    NavResponse::Scroll(-1)
                }
            }
            KeyCode::Home => self.go_first().into(),
            KeyCode::End => self.go_last().into(),
            _ => NavResponse::Ignored,
        }
    }

    /// Feed one wheel event. Positive deltas point down the sequence.
    pub fn on_wheel(&mut self, delta: f64, now: Instant) -> NavResponse {
        let blocked = (delta > 0.0 && !self.can_navigate.down)
            || (delta < 0.0 && !self.can_navigate.up);
        if blocked {
            self.wheel.cancel();
            return NavResponse::Scroll(GESTURE_SCROLL_LINES * delta.signum() as i32);
        }
        self.wheel.push(delta, now, self.settings.wheel_debounce);
        NavResponse::Ignored
    }

    /// Fire the wheel debounce if its quiet period is over.
    pub fn poll(&mut self, now: Instant) -> NavResponse {
        let Some(delta) = self.wheel.poll(now) else {
            return NavResponse::Ignored;
        };
        if delta > self.settings.wheel_threshold {
            self.go_next().into()
        } else if delta < -self.settings.wheel_threshold {
            self.go_previous().into()
        } else {
            NavResponse::Ignored
        }
    }

    pub fn has_pending_wheel(&self) -> bool {
        self.wheel.is_pending()
    }

    pub fn on_touch_start(&mut self, x: f64, y: f64) {
        self.touch_start = Some((x, y));
    }

    /// Resolve a swipe. The axis with the larger displacement wins, ties
    /// going horizontal; leftward and upward swipes advance.
    pub fn on_touch_end(&mut self, x: f64, y: f64) -> NavResponse {
        let Some((start_x, start_y)) = self.touch_start.take() else {
            return NavResponse::Ignored;
        };
        let diff_x = start_x - x;
        let diff_y = start_y - y;
        let threshold = self.settings.swipe_threshold;

        if diff_y.abs() > diff_x.abs() {
            if diff_y.abs() <= threshold {
                return NavResponse::Ignored;
            }
            if diff_y > 0.0 {
                if self.can_navigate.down {
                    self.go_next().into()
                } else {
                    NavResponse::Scroll(GESTURE_SCROLL_LINES)
                }
            } else if self.can_navigate.up {
                self.go_previous().into()
            } else {
                NavResponse::Scroll(-GESTURE_SCROLL_LINES)
            }
        } else if diff_x > threshold {
            self.go_next().into()
        } else if diff_x < -threshold {
            self.go_previous().into()
        } else {
            NavResponse::Ignored
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn controller() -> NavigationController {
        NavigationController::new(11, NavigationSettings::default())
    }

    fn overflowing(offset: u16) -> ScrollMetrics {
        ScrollMetrics {
            offset,
            content_height: 40,
            viewport_height: 20,
        }
    }

    #[test]
    fn go_to_slide_out_of_range_is_noop() {
        let mut nav = controller();
        assert_eq!(nav.go_to_slide(11), None);
        assert_eq!(nav.go_to_slide(usize::MAX), None);
        assert_eq!(nav.go_previous(), None);
        assert_eq!(nav.current_index(), 0);
        assert!(!nav.is_animating());
    }

    #[test]
    fn go_to_current_slide_is_noop() {
        let mut nav = controller();
        assert_eq!(nav.go_to_slide(0), None);
        assert!(!nav.is_animating());
    }

    #[test]
    fn direction_follows_target() {
        let mut nav = controller();
        let change = nav.go_to_slide(4).unwrap();
        assert_eq!(change.direction, Direction::Forward);
        assert_eq!((change.from, change.to), (0, 4));
        nav.complete_transition();
        let change = nav.go_to_slide(2).unwrap();
        assert_eq!(change.direction, Direction::Backward);
        assert_eq!(nav.direction(), Direction::Backward);
    }

    #[test]
    fn lock_drops_rapid_input() {
        let mut nav = controller();
        assert!(nav.go_next().is_some());
        for _ in 0..5 {
            assert_eq!(nav.go_next(), None);
        }
        assert_eq!(nav.current_index(), 1);
        nav.complete_transition();
        assert!(nav.go_next().is_some());
        assert_eq!(nav.current_index(), 2);
    }

    #[test]
    fn affordances_disabled_at_ends_and_while_animating() {
        let mut nav = controller();
        assert!(!nav.can_go_previous());
        assert!(nav.can_go_next());
        nav.go_last();
        assert!(!nav.can_go_next());
        assert!(!nav.can_go_previous());
        nav.complete_transition();
        assert_eq!(nav.current_index(), 10);
        assert!(!nav.can_go_next());
        assert!(nav.can_go_previous());
    }

    #[test]
    fn gate_blocks_down_until_bottom() {
        let mut nav = controller();
        nav.update_scroll_boundary(overflowing(0));
        assert_eq!(nav.on_key(KeyCode::Down), NavResponse::Scroll(1));
        assert_eq!(nav.current_index(), 0);

        nav.update_scroll_boundary(overflowing(20));
        assert_matches!(nav.on_key(KeyCode::Down), NavResponse::Changed(_));
        assert_eq!(nav.current_index(), 1);
    }

    #[test]
    fn gate_blocks_up_until_top() {
        let mut nav = controller();
        nav.go_to_slide(3);
        nav.complete_transition();
        nav.update_scroll_boundary(overflowing(20));
        assert_eq!(nav.on_key(KeyCode::Up), NavResponse::Scroll(-1));
        assert_eq!(nav.current_index(), 3);
        nav.update_scroll_boundary(overflowing(0));
        assert_matches!(nav.on_key(KeyCode::Up), NavResponse::Changed(_));
        assert_eq!(nav.current_index(), 2);
    }

    #[test]
    fn left_right_space_ignore_gate() {
        let mut nav = controller();
        nav.update_scroll_boundary(overflowing(5));
        assert_matches!(nav.on_key(KeyCode::Right), NavResponse::Changed(_));
        nav.complete_transition();
        nav.update_scroll_boundary(overflowing(5));
        assert_matches!(nav.on_key(KeyCode::Char(' ')), NavResponse::Changed(_));
        nav.complete_transition();
        nav.update_scroll_boundary(overflowing(5));
        assert_matches!(nav.on_key(KeyCode::Left), NavResponse::Changed(_));
        assert_eq!(nav.current_index(), 1);
    }

    #[test]
    fn home_and_end_jump() {
        let mut nav = controller();
        assert_matches!(
            nav.on_key(KeyCode::End),
            NavResponse::Changed(SlideChange { to: 10, .. })
        );
        nav.complete_transition();
        assert_matches!(
            nav.on_key(KeyCode::Home),
            NavResponse::Changed(SlideChange {
                to: 0,
                direction: Direction::Backward,
                ..
            })
        );
    }

    #[test]
    fn horizontal_swipe_wins_over_small_vertical() {
        let mut nav = controller();
        nav.on_touch_start(200.0, 100.0);
        assert_matches!(nav.on_touch_end(140.0, 90.0), NavResponse::Changed(_));
        assert_eq!(nav.current_index(), 1);

        nav.complete_transition();
        nav.on_touch_start(140.0, 100.0);
        assert_matches!(nav.on_touch_end(200.0, 110.0), NavResponse::Changed(_));
        assert_eq!(nav.current_index(), 0);
    }

    #[test]
    fn short_swipes_do_nothing() {
        let mut nav = controller();
        for (dx, dy) in [(40.0, 0.0), (-40.0, 0.0), (0.0, 40.0), (0.0, -40.0), (50.0, 0.0)] {
            nav.on_touch_start(100.0, 100.0);
            assert_eq!(nav.on_touch_end(100.0 - dx, 100.0 - dy), NavResponse::Ignored);
        }
        assert_eq!(nav.current_index(), 0);
    }

    #[test]
    fn vertical_swipe_respects_gate() {
        let mut nav = controller();
        nav.update_scroll_boundary(overflowing(0));
        nav.on_touch_start(100.0, 200.0);
        assert_eq!(nav.on_touch_end(100.0, 100.0), NavResponse::Scroll(3));
        assert_eq!(nav.current_index(), 0);

        nav.update_scroll_boundary(overflowing(20));
        nav.on_touch_start(100.0, 200.0);
        assert_matches!(nav.on_touch_end(100.0, 100.0), NavResponse::Changed(_));
    }

    #[test]
    fn touch_end_without_start_is_ignored() {
        let mut nav = controller();
        assert_eq!(nav.on_touch_end(0.0, 0.0), NavResponse::Ignored);
    }

    #[test]
    fn wheel_burst_advances_once() {
        let mut nav = controller();
        let t0 = Instant::now();
        for ms in [0, 10, 20] {
            let at = t0 + Duration::from_millis(ms);
            assert_eq!(nav.on_wheel(40.0, at), NavResponse::Ignored);
            assert_eq!(nav.poll(at), NavResponse::Ignored);
        }
        assert_eq!(nav.poll(t0 + Duration::from_millis(60)), NavResponse::Ignored);
        assert_matches!(
            nav.poll(t0 + Duration::from_millis(70)),
            NavResponse::Changed(_)
        );
        assert_eq!(nav.current_index(), 1);
        assert_eq!(nav.poll(t0 + Duration::from_millis(200)), NavResponse::Ignored);
    }

    #[test]
    fn wheel_uses_last_delta_of_burst() {
        let mut nav = controller();
        let t0 = Instant::now();
        nav.on_wheel(40.0, t0);
        nav.on_wheel(10.0, t0 + Duration::from_millis(10));
        assert_eq!(nav.poll(t0 + Duration::from_millis(100)), NavResponse::Ignored);
        assert_eq!(nav.current_index(), 0);
    }

    #[test]
    fn wheel_into_gate_scrolls_instead() {
        let mut nav = controller();
        nav.update_scroll_boundary(overflowing(0));
        let t0 = Instant::now();
        assert_eq!(nav.on_wheel(40.0, t0), NavResponse::Scroll(3));
        assert!(!nav.has_pending_wheel());
        assert_eq!(nav.on_wheel(-40.0, t0), NavResponse::Ignored);
        assert!(nav.has_pending_wheel());
    }

    #[test]
    fn ten_steps_reach_the_summary() {
        let mut nav = controller();
        for _ in 0..10 {
            assert!(nav.go_next().is_some());
            nav.complete_transition();
        }
        assert_eq!(nav.current_index(), 10);
        assert_eq!(nav.go_next(), None);
        assert!(!nav.can_go_next());
    }
}
