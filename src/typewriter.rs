use log::debug;
use crate::constants::*;
use crate::slide::Slide;

/// One-shot reveal of a panel heading, one character at a time.
///
/// After the initial delay, step `k` shows the first `k` characters; steps are
/// one character delay apart. The step after the full text is shown is a
/// terminal no-op, after which nothing is scheduled again.
#[derive(Debug)]
pub struct Typewriter {
    target: usize,
    source: String,
    shown: usize,              // Characters revealed
    next_step: usize,
    countdown: Option<f32>,    // None once finished
}

impl Typewriter {
    /// Captures the source text of the first panel marked for the effect, if any.
    pub fn attach(slides: &[Slide]) -> Option<Self> {
        let (target, slide) = slides.iter().enumerate().find(|(_, s)| s.content.typewriter)?;
        let source = slide
            .content
            .typewriter_text
            .clone()
            .unwrap_or_else(|| slide.content.title.clone());
        debug!("Typewriter attached to '{}'", slide.id());
        Some(Self::new(target, source))
    }

    pub fn new(target: usize, source: String) -> Self {
        Self {
            target,
            source,
            shown: 0,
            next_step: 0,
            countdown: Some(TYPEWRITER_INITIAL_DELAY),
        }
    }

    /// Index of the panel whose heading is replaced.
    pub fn target(&self) -> usize {
        self.target
    }

    pub fn is_finished(&self) -> bool {
        self.countdown.is_none()
    }

    pub fn visible(&self) -> &str {
        match self.source.char_indices().nth(self.shown) {
            Some((end, _)) => &self.source[..end],
            None => &self.source,
        }
    }

    pub fn update(&mut self, dt: f32) {
        let Some(countdown) = self.countdown else {
            return;
        };
        // Overshoot carries into the next step, so a long frame runs every step that fell due
        let mut remaining = countdown - dt.max(0.0);
        while remaining <= 0.0 {
            match self.fire() {
                Some(delay) => remaining += delay,
                None => {
                    self.countdown = None;
                    debug!("Typewriter finished");
                    return;
                }
            }
        }
        self.countdown = Some(remaining);
    }

    /// Runs the due step. Returns the delay before the next one, `None` for the terminal step.
    fn fire(&mut self) -> Option<f32> {
        let total = self.source.chars().count();
        if self.next_step > total {
            return None;
        }
        self.shown = self.next_step;
        self.next_step += 1;
        Some(if self.shown < total { TYPEWRITER_CHAR_DELAY } else { 0.0 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SlideContent;

    fn slide(id: &str, title: &str, typewriter: bool, typewriter_text: Option<&str>) -> Slide {
        Slide::new(SlideContent {
            id: id.into(),
            title: title.into(),
            subtitle: None,
            body: Vec::new(),
            links: Vec::new(),
            typewriter,
            typewriter_text: typewriter_text.map(str::to_string),
        })
    }

    #[test]
    fn reveals_one_character_per_step() {
        let mut tw = Typewriter::new(0, "Hi".into());
        assert_eq!(tw.visible(), "");

        tw.update(0.36); // 360ms: first step shows nothing yet
        assert_eq!(tw.visible(), "");
        assert!(!tw.is_finished());

        tw.update(0.05); // 410ms
        assert_eq!(tw.visible(), "");

        tw.update(0.02); // 430ms
        assert_eq!(tw.visible(), "H");

        tw.update(0.05); // 480ms
        assert_eq!(tw.visible(), "H");

        tw.update(0.02); // 500ms
        assert_eq!(tw.visible(), "Hi");
        assert!(tw.is_finished());

        tw.update(5.0);
        assert_eq!(tw.visible(), "Hi");
    }

    #[test]
    fn nothing_before_initial_delay() {
        let mut tw = Typewriter::new(0, "Hello".into());
        tw.update(0.3);
        assert_eq!(tw.visible(), "");
        assert!(!tw.is_finished());
    }

    #[test]
    fn long_frame_catches_up() {
        let mut tw = Typewriter::new(0, "Hello".into());
        tw.update(10.0);
        assert_eq!(tw.visible(), "Hello");
        assert!(tw.is_finished());
    }

    #[test]
    fn multibyte_text_is_split_on_characters() {
        let mut tw = Typewriter::new(0, "héé".into());
        tw.update(0.36);
        tw.update(0.07);
        tw.update(0.07);
        assert_eq!(tw.visible(), "hé");
    }

    #[test]
    fn empty_source_finishes_after_initial_delay() {
        let mut tw = Typewriter::new(0, String::new());
        tw.update(0.36);
        assert_eq!(tw.visible(), "");
        assert!(tw.is_finished());
    }

    #[test]
    fn attach_prefers_explicit_text_over_title() {
        let slides = vec![
            slide("intro", "Intro", false, None),
            slide("home", "Ada Starling", true, Some("Ada")),
            slide("later", "Later", true, None),
        ];
        let tw = Typewriter::attach(&slides).unwrap();
        assert_eq!(tw.target(), 1);
        assert_eq!(tw.source, "Ada");

        let slides = vec![slide("home", "Ada Starling", true, None)];
        assert_eq!(Typewriter::attach(&slides).unwrap().source, "Ada Starling");
    }

    #[test]
    fn attach_without_target_is_a_no_op() {
        let slides = vec![slide("home", "Home", false, None)];
        assert!(Typewriter::attach(&slides).is_none());
        assert!(Typewriter::attach(&[]).is_none());
    }
}
