use raylib::prelude::*;
use crate::config::SlideContent;
use crate::constants::*;
use crate::layout::{HitMap, Target};
use crate::surface::{Surface, with_alpha};

const TITLE_SIZE: f32 = 56.0;
const SUBTITLE_SIZE: f32 = 26.0;
const BODY_SIZE: f32 = 22.0;
const LINK_SIZE: f32 = 22.0;
const LINE_GAP: f32 = 12.0;
const SECTION_GAP: f32 = 28.0;
const LINK_SPACING: f32 = 36.0;
const LEFT_MARGIN: f32 = 0.12; // Fraction of the width

/// Opacity and vertical offset of a panel in the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Appearance {
    pub opacity: f32,
    pub offset_y: f32,
}

impl Appearance {
    pub const SETTLED: Appearance = Appearance { opacity: 1.0, offset_y: 0.0 };
}

/// One full-screen panel. `active` and `exiting` mirror the two transition classes.
#[derive(Debug, Clone, PartialEq)]
pub struct Slide {
    pub content: SlideContent,
    pub active: bool,
    pub exiting: bool,
}

impl Slide {
    pub fn new(content: SlideContent) -> Self {
        Self { content, active: false, exiting: false }
    }

    pub fn id(&self) -> &str {
        &self.content.id
    }

    /// `progress` is the fraction of the settle delay elapsed, `None` when the deck is settled.
    /// Returns `None` for hidden panels.
    pub fn appearance(&self, progress: Option<f32>) -> Option<Appearance> {
        let eased = progress.map(|p| ease::cubic_out(p.clamp(0.0, 1.0), 0.0, 1.0, 1.0));
        match (self.active, self.exiting, eased) {
            (true, _, None) => Some(Appearance::SETTLED),
            (true, _, Some(t)) => Some(Appearance {
                opacity: t,
                offset_y: (1.0 - t) * TRANSITION_TRAVEL,
            }),
            (false, true, Some(t)) => Some(Appearance {
                opacity: 1.0 - t,
                offset_y: -t * TRANSITION_TRAVEL,
            }),
            _ => None,
        }
    }

    /// Paints the panel. `heading` replaces the title (typewriter output); links register
    /// in `hits` when given.
    pub fn draw(
        &self,
        surface: &mut impl Surface,
        look: Appearance,
        heading: Option<&str>,
        mut hits: Option<&mut HitMap>,
    ) {
        let size = surface.size();
        let content = &self.content;
        let x = size.x * LEFT_MARGIN;

        let mut height = TITLE_SIZE;
        if content.subtitle.is_some() {
            height += LINE_GAP + SUBTITLE_SIZE;
        }
        if !content.body.is_empty() {
            height += SECTION_GAP + content.body.len() as f32 * (BODY_SIZE + LINE_GAP) - LINE_GAP;
        }
        if !content.links.is_empty() {
            height += SECTION_GAP + LINK_SIZE;
        }
        let mut y = (size.y - height) * 0.5 + look.offset_y;

        let title = heading.unwrap_or(&content.title);
        surface.draw_text(title, Vector2::new(x, y), TITLE_SIZE, with_alpha(TEXT_COLOR, look.opacity));
        y += TITLE_SIZE;

        if let Some(subtitle) = &content.subtitle {
            y += LINE_GAP;
            surface.draw_text(subtitle, Vector2::new(x, y), SUBTITLE_SIZE, with_alpha(ACCENT_COLOR, look.opacity));
            y += SUBTITLE_SIZE;
        }

        if !content.body.is_empty() {
            y += SECTION_GAP;
            for line in &content.body {
                surface.draw_text(line, Vector2::new(x, y), BODY_SIZE, with_alpha(MUTED_TEXT_COLOR, look.opacity));
                y += BODY_SIZE + LINE_GAP;
            }
            y -= LINE_GAP;
        }

        if !content.links.is_empty() {
            y += SECTION_GAP;
            let mut link_x = x;
            for link in &content.links {
                let width = surface.text_width(&link.label, LINK_SIZE);
                let color = with_alpha(ACCENT_COLOR, look.opacity);
                surface.draw_text(&link.label, Vector2::new(link_x, y), LINK_SIZE, color);
                surface.stroke_line(
                    Vector2::new(link_x, y + LINK_SIZE + 2.0),
                    Vector2::new(link_x + width, y + LINK_SIZE + 2.0),
                    with_alpha(ACCENT_COLOR, look.opacity * 0.5),
                );
                if let Some(hits) = hits.as_deref_mut() {
                    hits.push(Rectangle::new(link_x, y, width, LINK_SIZE + 4.0), Target::Link(link.href.clone()));
                }
                link_x += width + LINK_SPACING;
            }
        }
    }
}
