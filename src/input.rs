use raylib::prelude::*;
use crate::constants::*;
use crate::layout::{HitMap, Target};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Forward,
    Backward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Up,
    Down,
    PageUp,
    PageDown,
}

impl NavKey {
    pub fn step(self) -> Step {
        match self {
            NavKey::Down | NavKey::PageDown => Step::Forward,
            NavKey::Up | NavKey::PageUp => Step::Backward,
        }
    }
}

/// Platform events the slide deck reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Wheel { delta_y: f32 },
    TouchStart { y: f32 },
    TouchEnd { y: f32 },
    Key(NavKey),
    IndicatorClick(usize),
    PrevButton,
    NextButton,
    /// Activation of a link; `href` is taken verbatim from the deck file.
    Anchor(String),
}

/// Whether the platform should still run its own handling of an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultAction {
    Allowed,
    Prevented,
}

/// One step per wheel gesture: after an accepted event, further events are
/// dropped until the cooldown has elapsed, which swallows momentum scrolling.
#[derive(Debug, Default)]
pub struct WheelGate {
    last_accepted: Option<f64>,
}

impl WheelGate {
    pub fn accept(&mut self, now: f64, delta_y: f32) -> Option<Step> {
        if let Some(last) = self.last_accepted {
            if now - last < WHEEL_COOLDOWN {
                return None;
            }
        }
        self.last_accepted = Some(now);
        Some(if delta_y > 0.0 { Step::Forward } else { Step::Backward })
    }
}

#[derive(Debug, Default)]
pub struct SwipeTracker {
    start_y: f32,
}

impl SwipeTracker {
    pub fn begin(&mut self, y: f32) {
        self.start_y = y;
    }

    /// Upward swipes move forward, downward swipes backward.
    pub fn end(&self, y: f32) -> Option<Step> {
        let dy = y - self.start_y;
        if dy.abs() <= SWIPE_THRESHOLD {
            None
        } else if dy < 0.0 {
            Some(Step::Forward)
        } else {
            Some(Step::Backward)
        }
    }
}

/// Translates raylib's polled input state into deck inputs.
#[derive(Debug, Default)]
pub struct PlatformInput {
    touching: bool,
    last_touch_y: f32,
}

impl PlatformInput {
    pub fn poll(&mut self, rl: &RaylibHandle, hits: &HitMap) -> Vec<Input> {
        let mut inputs = Vec::new();

        let wheel = rl.get_mouse_wheel_move();
        if wheel != 0.0 {
            // raylib reports scrolling up as positive, the opposite of a DOM deltaY
            inputs.push(Input::Wheel { delta_y: -wheel });
        }

        let touching = rl.get_touch_point_count() > 0;
        if touching {
            self.last_touch_y = rl.get_touch_position(0).y;
        }
        match (self.touching, touching) {
            (false, true) => inputs.push(Input::TouchStart { y: self.last_touch_y }),
            (true, false) => inputs.push(Input::TouchEnd { y: self.last_touch_y }),
            _ => {}
        }
        self.touching = touching;

        for (key, nav) in [
            (KeyboardKey::KEY_DOWN, NavKey::Down),
            (KeyboardKey::KEY_PAGE_DOWN, NavKey::PageDown),
            (KeyboardKey::KEY_UP, NavKey::Up),
            (KeyboardKey::KEY_PAGE_UP, NavKey::PageUp),
        ] {
            if rl.is_key_pressed(key) {
                inputs.push(Input::Key(nav));
            }
        }

        if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
            if let Some(target) = hits.hit_test(rl.get_mouse_position()) {
                inputs.push(click_input(target));
            }
        }

        inputs
    }
}

pub fn click_input(target: &Target) -> Input {
    match target {
        Target::Indicator(index) => Input::IndicatorClick(*index),
        Target::Prev => Input::PrevButton,
        Target::Next => Input::NextButton,
        Target::Link(href) => Input::Anchor(href.clone()),
    }
}
