//! The wrapped slide deck: navigation controller, the visible slide's
//! scroll viewport and the running transition, wired to terminal input.

use std::time::{Duration, Instant};

use crossterm::event::KeyCode;
use ratatui::layout::Rect;
use tracing::debug;

use crate::config::Config;
use crate::navigation::{NavResponse, NavigationController, NavigationSettings, SlideChange};
use crate::particles::{ParticleField, STEP};
use crate::payload::StatisticsPayload;
use crate::scroll::SlideViewport;
use crate::slides::{SlideKind, SLIDES};
use crate::transition::{SlideTransition, TransitionEvent};
use crate::ui::slides;
use crate::ui::wrapped::{Hit, WrappedLayout};

pub struct WrappedExperience {
    nav: NavigationController,
    viewport: SlideViewport,
    transition: Option<SlideTransition>,
    /// Scroll offset the exiting slide had when it started to leave.
    exit_offset: u16,
    transition_duration: Duration,
    layout: WrappedLayout,
    config: Config,
    press: Option<(u16, u16)>,
    confetti: Option<ParticleField>,
    particle_clock: Instant,
}

impl WrappedExperience {
    pub fn new(config: &Config, area: Rect, data: &StatisticsPayload, now: Instant) -> Self {
        let mut exp = Self {
            nav: NavigationController::new(SLIDES.len(), NavigationSettings::from(config)),
            viewport: SlideViewport::default(),
            transition: None,
            exit_offset: 0,
            transition_duration: config.transition_duration(),
            layout: WrappedLayout::new(area),
            config: config.clone(),
            press: None,
            confetti: None,
            particle_clock: now,
        };
        exp.remeasure(data);
        exp
    }

    pub fn nav(&self) -> &NavigationController {
        &self.nav
    }

    pub fn viewport(&self) -> &SlideViewport {
        &self.viewport
    }

    pub fn transition(&self) -> Option<&SlideTransition> {
        self.transition.as_ref()
    }

    pub fn layout(&self) -> &WrappedLayout {
        &self.layout
    }

    pub fn confetti(&self) -> Option<&ParticleField> {
        self.confetti.as_ref()
    }

    pub fn current_index(&self) -> usize {
        self.nav.current_index()
    }

    pub fn current_slide(&self) -> SlideKind {
        SLIDES[self.nav.current_index()].kind
    }

    /// Index of the slide actually on screen, which lags the current index
    /// while the previous slide is still leaving.
    pub fn visible_slide(&self) -> usize {
        self.transition
            .as_ref()
            .map_or(self.nav.current_index(), SlideTransition::visible_slide)
    }

    pub fn visible_scroll_offset(&self) -> u16 {
        match &self.transition {
            Some(t) if t.visible_slide() != self.nav.current_index() => self.exit_offset,
            _ => self.viewport.offset(),
        }
    }

    pub fn resize(&mut self, area: Rect, data: &StatisticsPayload) {
        self.layout = WrappedLayout::new(area);
        self.remeasure(data);
    }

    /// Lay the current slide out at the present width and refresh the gate.
    fn remeasure(&mut self, data: &StatisticsPayload) {
        let slide = self.layout.slide;
        let content = slides::build(self.current_slide(), data, slide.width);
        self.viewport.measure(content.height(), slide.height);
        self.nav.update_scroll_boundary(self.viewport.metrics());
    }

    fn apply(&mut self, response: NavResponse, data: &StatisticsPayload, now: Instant) {
        match response {
            NavResponse::Changed(change) => self.start_transition(change, data, now),
            NavResponse::Scroll(lines) => {
                self.viewport.scroll_by(lines);
                self.nav.update_scroll_boundary(self.viewport.metrics());
            }
            NavResponse::Ignored => {}
        }
    }

    fn start_transition(&mut self, change: SlideChange, data: &StatisticsPayload, now: Instant) {
        debug!(from = change.from, to = change.to, direction = ?change.direction, "slide change");
        self.exit_offset = self.viewport.offset();
        self.transition = Some(SlideTransition::new(
            change,
            SLIDES[change.from].axis,
            SLIDES[change.to].axis,
            self.transition_duration,
            now,
        ));
        self.confetti = None;
        self.viewport.reset();
        self.remeasure(data);
        // A zero-length animation settles without waiting for a tick.
        if self.transition_duration.is_zero() {
            self.advance_transition(now);
        }
    }

    fn advance_transition(&mut self, now: Instant) {
        loop {
            let Some(transition) = self.transition.as_mut() else {
                return;
            };
            match transition.tick(now) {
                TransitionEvent::None => return,
                TransitionEvent::ExitComplete => {
                    self.nav.complete_transition();
                    if self.current_slide() == SlideKind::Summary {
                        self.confetti =
                            Some(ParticleField::burst(self.layout.slide.width, self.layout.slide.height));
                        self.particle_clock = now;
                    }
                }
                TransitionEvent::Finished => {
                    self.transition = None;
                    return;
                }
            }
        }
    }

    pub fn on_key(&mut self, code: KeyCode, data: &StatisticsPayload, now: Instant) {
        let response = match code {
            KeyCode::PageDown => NavResponse::Scroll(self.layout.slide.height.max(1) as i32),
            KeyCode::PageUp => NavResponse::Scroll(-(self.layout.slide.height.max(1) as i32)),
            other => self.nav.on_key(other),
        };
        self.apply(response, data, now);
    }

    /// One wheel notch; terminals report direction only.
    pub fn on_wheel(&mut self, down: bool, data: &StatisticsPayload, now: Instant) {
        let step = self.config.wheel_step_units;
        let delta = if down { step } else { -step };
        let response = self.nav.on_wheel(delta, now);
        self.apply(response, data, now);
    }

    pub fn on_mouse_down(&mut self, column: u16, row: u16) {
        self.press = Some((column, row));
        let (x, y) = self.config.cells_to_units(column as i32, row as i32);
        self.nav.on_touch_start(x, y);
    }

    /// A release on the press cell is a click; anywhere else ends a swipe.
    pub fn on_mouse_up(&mut self, column: u16, row: u16, data: &StatisticsPayload, now: Instant) {
        let press = self.press.take();
        let (x, y) = self.config.cells_to_units(column as i32, row as i32);
        let swipe = self.nav.on_touch_end(x, y);
        if press == Some((column, row)) {
            let response = match self.layout.hit(column, row) {
                Some(Hit::Rail(index)) => self.nav.go_to_slide(index).into(),
                Some(Hit::Previous) => self.nav.go_previous().into(),
                Some(Hit::Next) => self.nav.go_next().into(),
                None => NavResponse::Ignored,
            };
            self.apply(response, data, now);
        } else {
            self.apply(swipe, data, now);
        }
    }

    pub fn on_tick(&mut self, data: &StatisticsPayload, now: Instant) {
        let settled = self.nav.poll(now);
        self.apply(settled, data, now);
        self.advance_transition(now);

        let step = Duration::from_secs_f64(STEP);
        if let Some(field) = self.confetti.as_mut() {
            while now.saturating_duration_since(self.particle_clock) >= step {
                field.update();
                self.particle_clock += step;
            }
            if !field.is_active() {
                self.confetti = None;
            }
        }
    }
}
