use log::{debug, warn};
use crate::constants::*;
use crate::input::{DefaultAction, Input, Step, SwipeTracker, WheelGate};
use crate::slide::Slide;
use crate::state::DeckState;

/// Position marker paired with the panel of the same index.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Indicator {
    pub current: bool,
}

/// Slide navigation: which panel is active, the transition in flight, and
/// the filters applied to raw navigation input.
pub struct SlideDeck {
    slides: Vec<Slide>,
    indicators: Vec<Indicator>,
    current: usize,
    state: DeckState,
    clock: f64,
    wheel: WheelGate,
    swipe: SwipeTracker,
}

impl SlideDeck {
    /// The first panel starts active. Indicator and panel counts are not checked against each other.
    pub fn new(mut slides: Vec<Slide>, indicator_count: usize) -> Self {
        let mut indicators = vec![Indicator::default(); indicator_count];
        if let Some(first) = slides.first_mut() {
            first.active = true;
        }
        if let Some(first) = indicators.first_mut() {
            first.current = true;
        }
        Self {
            slides,
            indicators,
            current: 0,
            state: DeckState::Settled,
            clock: 0.0,
            wheel: WheelGate::default(),
            swipe: SwipeTracker::default(),
        }
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn indicators(&self) -> &[Indicator] {
        &self.indicators
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn state(&self) -> DeckState {
        self.state
    }

    pub fn is_animating(&self) -> bool {
        self.state.is_animating()
    }

    /// Fraction of the settle delay elapsed, while a transition runs.
    pub fn transition_progress(&self) -> Option<f32> {
        match self.state {
            DeckState::Transitioning { elapsed, .. } => Some((elapsed / SETTLE_DELAY).min(1.0)),
            DeckState::Settled => None,
        }
    }

    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.slides.iter().position(|s| s.id() == id)
    }

    /// Starts a transition to `index`. Returns false, changing nothing, when `index`
    /// is already current, a transition is running, or no such panel exists.
    pub fn go_to(&mut self, index: usize) -> bool {
        if index == self.current || self.state.is_animating() {
            return false;
        }
        if index >= self.slides.len() {
            warn!("No slide at index {}", index);
            return false;
        }

        let from = self.current;
        self.slides[from].active = false;
        self.slides[from].exiting = true;
        self.slides[index].active = true;

        if let Some(indicator) = self.indicators.get_mut(from) {
            indicator.current = false;
        }
        if let Some(indicator) = self.indicators.get_mut(index) {
            indicator.current = true;
        }

        self.current = index;
        self.state = DeckState::Transitioning { from, elapsed: 0.0 };
        debug!("Slide {} -> {}", from, index);
        true
    }

    pub fn next(&mut self) -> bool {
        let count = self.slides.len();
        if count == 0 {
            return false;
        }
        self.go_to((self.current + 1) % count)
    }

    pub fn prev(&mut self) -> bool {
        let count = self.slides.len();
        if count == 0 {
            return false;
        }
        self.go_to((self.current + count - 1) % count)
    }

    fn step(&mut self, step: Step) -> bool {
        match step {
            Step::Forward => self.next(),
            Step::Backward => self.prev(),
        }
    }

    /// Advances the deck clock; settles the running transition once the delay has passed.
    pub fn update(&mut self, dt: f32) {
        self.clock += dt as f64;

        if let DeckState::Transitioning { from, elapsed } = self.state {
            let elapsed = elapsed + dt;
            if elapsed >= SETTLE_DELAY {
                if let Some(slide) = self.slides.get_mut(from) {
                    slide.exiting = false;
                }
                self.state = DeckState::Settled;
                debug!("Slide {} settled", self.current);
            } else {
                self.state = DeckState::Transitioning { from, elapsed };
            }
        }
    }

    /// Applies one input. Inputs arriving mid-transition are dropped, not queued.
    pub fn handle_input(&mut self, input: Input) -> DefaultAction {
        match input {
            Input::Wheel { delta_y } => {
                if let Some(step) = self.wheel.accept(self.clock, delta_y) {
                    self.step(step);
                }
                DefaultAction::Prevented
            }
            Input::TouchStart { y } => {
                self.swipe.begin(y);
                DefaultAction::Allowed
            }
            Input::TouchEnd { y } => {
                if let Some(step) = self.swipe.end(y) {
                    self.step(step);
                }
                DefaultAction::Allowed
            }
            Input::Key(key) => {
                self.step(key.step());
                DefaultAction::Allowed
            }
            Input::IndicatorClick(index) => {
                self.go_to(index);
                DefaultAction::Allowed
            }
            Input::PrevButton => {
                self.prev();
                DefaultAction::Allowed
            }
            Input::NextButton => {
                self.next();
                DefaultAction::Allowed
            }
            Input::Anchor(href) => {
                let target = href.strip_prefix('#').and_then(|id| self.position_of(id));
                match target {
                    Some(index) => {
                        self.go_to(index);
                        DefaultAction::Prevented
                    }
                    None => DefaultAction::Allowed,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SlideContent;
    use crate::input::NavKey;

    fn slides(count: usize) -> Vec<Slide> {
        (0..count)
            .map(|i| {
                Slide::new(SlideContent {
                    id: format!("slide-{i}"),
                    title: format!("Slide {i}"),
                    subtitle: None,
                    body: Vec::new(),
                    links: Vec::new(),
                    typewriter: false,
                    typewriter_text: None,
                })
            })
            .collect()
    }

    fn deck(count: usize) -> SlideDeck {
        SlideDeck::new(slides(count), count)
    }

    fn flags(deck: &SlideDeck) -> Vec<(bool, bool)> {
        deck.slides().iter().map(|s| (s.active, s.exiting)).collect()
    }

    fn current_markers(deck: &SlideDeck) -> Vec<bool> {
        deck.indicators().iter().map(|i| i.current).collect()
    }

    #[test]
    fn starts_on_first_slide() {
        let deck = deck(3);
        assert_eq!(deck.current(), 0);
        assert_eq!(flags(&deck), [(true, false), (false, false), (false, false)]);
        assert_eq!(current_markers(&deck), [true, false, false]);
        assert_eq!(deck.state(), DeckState::Settled);
    }

    #[test]
    fn next_runs_a_transition_then_settles() {
        let mut deck = deck(3);
        assert!(deck.next());
        assert_eq!(deck.current(), 1);
        assert_eq!(flags(&deck), [(false, true), (true, false), (false, false)]);
        assert_eq!(current_markers(&deck), [false, true, false]);
        assert!(deck.is_animating());

        deck.update(0.6);
        assert!(deck.slides()[0].exiting);
        assert!(deck.is_animating());

        deck.update(0.03);
        assert_eq!(flags(&deck), [(false, false), (true, false), (false, false)]);
        assert!(!deck.is_animating());
    }

    #[test]
    fn full_settle_delay_in_one_tick() {
        let mut deck = deck(3);
        deck.next();
        deck.update(SETTLE_DELAY);
        assert_eq!(deck.state(), DeckState::Settled);
        assert!(!deck.slides()[0].exiting);
    }

    #[test]
    fn go_to_current_index_changes_nothing() {
        let mut deck = deck(3);
        let before = (flags(&deck), current_markers(&deck), deck.state());
        assert!(!deck.go_to(0));
        assert_eq!((flags(&deck), current_markers(&deck), deck.state()), before);
    }

    #[test]
    fn go_to_is_ignored_while_animating() {
        let mut deck = deck(4);
        deck.go_to(2);
        let before = (flags(&deck), current_markers(&deck), deck.current());
        for target in 0..4 {
            assert!(!deck.go_to(target));
        }
        assert!(!deck.next());
        assert!(!deck.prev());
        assert_eq!((flags(&deck), current_markers(&deck), deck.current()), before);

        // Dropped, not queued
        deck.update(SETTLE_DELAY);
        assert_eq!(deck.current(), 2);
        assert!(!deck.is_animating());
    }

    #[test]
    fn next_then_prev_returns_home() {
        for count in 1..6 {
            for start in 0..count {
                let mut deck = deck(count);
                deck.go_to(start);
                deck.update(SETTLE_DELAY);
                deck.next();
                deck.update(SETTLE_DELAY);
                deck.prev();
                deck.update(SETTLE_DELAY);
                assert_eq!(deck.current(), start, "count {count}, start {start}");
            }
        }
    }

    #[test]
    fn navigation_wraps_around() {
        let mut deck = deck(3);
        deck.prev();
        assert_eq!(deck.current(), 2);
        deck.update(SETTLE_DELAY);
        deck.next();
        assert_eq!(deck.current(), 0);
    }

    #[test]
    fn out_of_range_index_is_ignored() {
        let mut deck = deck(3);
        assert!(!deck.go_to(7));
        assert_eq!(deck.current(), 0);
        assert!(!deck.is_animating());
    }

    #[test]
    fn empty_deck_never_navigates() {
        let mut deck = deck(0);
        assert!(!deck.next());
        assert!(!deck.prev());
        assert!(!deck.go_to(0));
        assert_eq!(deck.handle_input(Input::Wheel { delta_y: 3.0 }), DefaultAction::Prevented);
        deck.update(1.0);
        assert_eq!(deck.current(), 0);
    }

    #[test]
    fn missing_indicators_are_skipped() {
        let mut deck = SlideDeck::new(slides(3), 1);
        assert!(deck.go_to(2));
        assert_eq!(current_markers(&deck), [false]);
        deck.update(SETTLE_DELAY);
        assert!(deck.go_to(0));
        assert_eq!(current_markers(&deck), [true]);
    }

    #[test]
    fn wheel_steps_are_rate_limited() {
        let mut deck = deck(3);
        assert_eq!(deck.handle_input(Input::Wheel { delta_y: 10.0 }), DefaultAction::Prevented);
        assert_eq!(deck.current(), 1);

        deck.update(0.3);
        assert_eq!(deck.handle_input(Input::Wheel { delta_y: 10.0 }), DefaultAction::Prevented);
        assert_eq!(deck.current(), 1);

        deck.update(0.4);
        deck.handle_input(Input::Wheel { delta_y: 10.0 });
        assert_eq!(deck.current(), 2);
    }

    #[test]
    fn negative_wheel_goes_back() {
        let mut deck = deck(3);
        deck.handle_input(Input::Wheel { delta_y: -4.0 });
        assert_eq!(deck.current(), 2);
    }

    #[test]
    fn swipes_follow_direction_and_threshold() {
        let mut deck = deck(3);
        deck.handle_input(Input::TouchStart { y: 400.0 });
        deck.handle_input(Input::TouchEnd { y: 350.0 });
        assert_eq!(deck.current(), 1);
        deck.update(SETTLE_DELAY);

        deck.handle_input(Input::TouchStart { y: 400.0 });
        deck.handle_input(Input::TouchEnd { y: 450.0 });
        assert_eq!(deck.current(), 0);
        deck.update(SETTLE_DELAY);

        deck.handle_input(Input::TouchStart { y: 400.0 });
        deck.handle_input(Input::TouchEnd { y: 420.0 });
        assert_eq!(deck.current(), 0);
        assert!(!deck.is_animating());
    }

    #[test]
    fn keys_buttons_and_indicators_navigate() {
        let mut deck = deck(4);
        deck.handle_input(Input::Key(NavKey::PageDown));
        assert_eq!(deck.current(), 1);
        deck.update(SETTLE_DELAY);
        deck.handle_input(Input::Key(NavKey::Up));
        assert_eq!(deck.current(), 0);
        deck.update(SETTLE_DELAY);
        deck.handle_input(Input::IndicatorClick(3));
        assert_eq!(deck.current(), 3);
        deck.update(SETTLE_DELAY);
        deck.handle_input(Input::NextButton);
        assert_eq!(deck.current(), 0);
        deck.update(SETTLE_DELAY);
        deck.handle_input(Input::PrevButton);
        assert_eq!(deck.current(), 3);
    }

    #[test]
    fn anchors_to_known_panels_are_intercepted() {
        let mut deck = deck(3);
        assert_eq!(deck.handle_input(Input::Anchor("#slide-2".into())), DefaultAction::Prevented);
        assert_eq!(deck.current(), 2);
        deck.update(SETTLE_DELAY);

        assert_eq!(deck.handle_input(Input::Anchor("#nowhere".into())), DefaultAction::Allowed);
        assert_eq!(deck.handle_input(Input::Anchor("slide-1".into())), DefaultAction::Allowed);
        assert_eq!(deck.handle_input(Input::Anchor("https://example.com".into())), DefaultAction::Allowed);
        assert_eq!(deck.current(), 2);
    }

    #[test]
    fn transition_progress_tracks_elapsed_time() {
        let mut deck = deck(2);
        assert_eq!(deck.transition_progress(), None);
        deck.next();
        assert_eq!(deck.transition_progress(), Some(0.0));
        deck.update(SETTLE_DELAY / 2.0);
        let progress = deck.transition_progress().unwrap();
        assert!((progress - 0.5).abs() < 1e-6);
        deck.update(SETTLE_DELAY);
        assert_eq!(deck.transition_progress(), None);
    }
}
