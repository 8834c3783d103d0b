#[derive(Debug, PartialEq, Clone, Copy)]
pub enum DeckState {
    Settled,                                     // Exactly one panel is active
    Transitioning { from: usize, elapsed: f32 }, // Panel `from` is exiting
}

impl DeckState {
    /// The deck ignores navigation while this holds.
    pub fn is_animating(&self) -> bool {
        matches!(self, DeckState::Transitioning { .. })
    }
}
