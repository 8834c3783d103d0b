use raylib::prelude::*;
use crate::constants::*;
use crate::deck::SlideDeck;
use crate::surface::{Surface, with_alpha};
use crate::typewriter::Typewriter;

const INDICATOR_RADIUS: f32 = 5.0;
const INDICATOR_SPACING: f32 = 24.0;
const INDICATOR_MARGIN: f32 = 36.0;   // From the right edge
const BUTTON_SIZE: Vector2 = Vector2 { x: 72.0, y: 32.0 };
const BUTTON_MARGIN: f32 = 24.0;
const BUTTON_TEXT_SIZE: f32 = 16.0;

/// Something clickable in the current frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    Indicator(usize),
    Prev,
    Next,
    Link(String),
}

/// Clickable regions of the last rendered frame, in logical pixels.
#[derive(Debug, Default)]
pub struct HitMap {
    regions: Vec<(Rectangle, Target)>,
}

impl HitMap {
    pub fn clear(&mut self) {
        self.regions.clear();
    }

    pub fn push(&mut self, rect: Rectangle, target: Target) {
        self.regions.push((rect, target));
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn regions(&self) -> &[(Rectangle, Target)] {
        &self.regions
    }

    /// Regions pushed later are drawn on top, so they win.
    pub fn hit_test(&self, point: Vector2) -> Option<&Target> {
        self.regions
            .iter()
            .rev()
            .find(|(rect, _)| contains(rect, point))
            .map(|(_, target)| target)
    }
}

fn contains(rect: &Rectangle, point: Vector2) -> bool {
    point.x >= rect.x
        && point.x <= rect.x + rect.width
        && point.y >= rect.y
        && point.y <= rect.y + rect.height
}

/// Centres of the indicator dots: a column centred on the right edge.
pub fn indicator_positions(size: Vector2, count: usize) -> Vec<Vector2> {
    let column = (count.max(1) - 1) as f32 * INDICATOR_SPACING;
    let top = (size.y - column) * 0.5;
    (0..count)
        .map(|i| Vector2::new(size.x - INDICATOR_MARGIN, top + i as f32 * INDICATOR_SPACING))
        .collect()
}

pub fn prev_button(size: Vector2) -> Rectangle {
    Rectangle::new(
        size.x - 2.0 * (BUTTON_SIZE.x + BUTTON_MARGIN),
        size.y - BUTTON_SIZE.y - BUTTON_MARGIN,
        BUTTON_SIZE.x,
        BUTTON_SIZE.y,
    )
}

pub fn next_button(size: Vector2) -> Rectangle {
    Rectangle::new(
        size.x - (BUTTON_SIZE.x + BUTTON_MARGIN),
        size.y - BUTTON_SIZE.y - BUTTON_MARGIN,
        BUTTON_SIZE.x,
        BUTTON_SIZE.y,
    )
}

/// Paints the visible panels, the exiting one beneath the active one. Only the
/// active panel's links are clickable.
pub fn draw_panels(
    surface: &mut impl Surface,
    deck: &SlideDeck,
    typewriter: Option<&Typewriter>,
    hits: &mut HitMap,
) {
    let progress = deck.transition_progress();
    let heading = |index: usize| typewriter.filter(|t| t.target() == index).map(Typewriter::visible);

    for (i, slide) in deck.slides().iter().enumerate() {
        if slide.exiting {
            if let Some(look) = slide.appearance(progress) {
                slide.draw(surface, look, heading(i), None);
            }
        }
    }

    let current = deck.current();
    if let Some(slide) = deck.slides().get(current) {
        if let Some(look) = slide.appearance(progress) {
            slide.draw(surface, look, heading(current), Some(hits));
        }
    }
}

/// Paints the indicator column and the prev/next buttons, registering them in `hits`.
pub fn draw_controls(surface: &mut impl Surface, deck: &SlideDeck, hits: &mut HitMap) {
    let size = surface.size();

    for (i, (center, indicator)) in indicator_positions(size, deck.indicators().len())
        .into_iter()
        .zip(deck.indicators())
        .enumerate()
    {
        let (radius, color) = if indicator.current {
            (INDICATOR_RADIUS + 1.5, ACCENT_COLOR)
        } else {
            (INDICATOR_RADIUS, with_alpha(TEXT_COLOR, 0.35))
        };
        surface.fill_circle(center, radius, color);
        let reach = INDICATOR_SPACING * 0.5;
        hits.push(
            Rectangle::new(center.x - reach, center.y - reach, 2.0 * reach, 2.0 * reach),
            Target::Indicator(i),
        );
    }

    for (rect, label, target) in [
        (prev_button(size), "PREV", Target::Prev),
        (next_button(size), "NEXT", Target::Next),
    ] {
        surface.fill_rect(rect, CONTROL_FILL);
        let width = surface.text_width(label, BUTTON_TEXT_SIZE);
        surface.draw_text(
            label,
            Vector2::new(
                rect.x + (rect.width - width) * 0.5,
                rect.y + (rect.height - BUTTON_TEXT_SIZE) * 0.5,
            ),
            BUTTON_TEXT_SIZE,
            TEXT_COLOR,
        );
        hits.push(rect, target);
    }
}
