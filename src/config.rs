use std::collections::HashSet;
use std::fs;
use std::path::Path;
use anyhow::{Context, Result};
use log::warn;
use serde::Deserialize;

/// Deck shipped inside the binary.
pub const BUILTIN_DECK: &str = include_str!("../decks/portfolio.toml");

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Link {
    pub label: String,
    pub href: String,
}

/// Content of one panel, as written in the deck file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SlideContent {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub body: Vec<String>,
    #[serde(default)]
    pub links: Vec<Link>,
    /// Marks the panel whose heading is typed in at startup.
    #[serde(default)]
    pub typewriter: bool,
    /// Text to type instead of the title.
    #[serde(default)]
    pub typewriter_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DeckFile {
    #[serde(default)]
    pub slides: Vec<SlideContent>,
}

impl DeckFile {
    pub fn parse(raw: &str) -> Result<Self> {
        let deck: DeckFile = toml::from_str(raw).context("Invalid deck file")?;
        deck.check();
        Ok(deck)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read deck file {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("Failed to load deck {}", path.display()))
    }

    pub fn builtin() -> Result<Self> {
        Self::parse(BUILTIN_DECK)
    }

    /// Loads `path` if given, the built-in deck otherwise.
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Self::builtin(),
        }
    }

    // Anomalies the deck tolerates: they only make some navigation unreachable
    fn check(&self) {
        if self.slides.is_empty() {
            warn!("Deck has no slides, only the background will be shown");
        }
        let mut seen = HashSet::new();
        for slide in &self.slides {
            if !seen.insert(slide.id.as_str()) {
                warn!("Duplicate slide id '{}', links resolve to the first one", slide.id);
            }
        }
        let typed = self.slides.iter().filter(|s| s.typewriter).count();
        if typed > 1 {
            warn!("{} slides request the typewriter effect, only the first gets it", typed);
        }
    }
}
