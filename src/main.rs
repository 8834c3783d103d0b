use std::path::PathBuf;
use anyhow::{Result, anyhow};
use clap::Parser;
use log::info;
use raylib::prelude::*;

mod config;
mod constants;
mod deck;
mod input;
mod layout;
mod slide;
mod starfield;
mod state;
mod surface;
mod typewriter;

use crate::config::DeckFile;
use crate::constants::*;
use crate::deck::SlideDeck;
use crate::input::{DefaultAction, Input, PlatformInput};
use crate::layout::{HitMap, draw_controls, draw_panels};
use crate::slide::Slide;
use crate::starfield::{Starfield, Viewport};
use crate::surface::RaylibSurface;
use crate::typewriter::Typewriter;

/// Presentation deck over an animated starfield.
#[derive(Parser, Debug)]
#[command(name = "stardeck", version, about)]
struct Args {
    /// Deck file (TOML). The built-in deck is shown when omitted.
    deck: Option<PathBuf>,

    /// Initial window width
    #[arg(long, default_value_t = WINDOW_WIDTH)]
    width: i32,

    /// Initial window height
    #[arg(long, default_value_t = WINDOW_HEIGHT)]
    height: i32,

    #[arg(long, default_value_t = FPS)]
    fps: u32,

    /// Seed for the star field, random when omitted
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    // --- Load Slides ---
    let deck_file = DeckFile::load_or_builtin(args.deck.as_deref())?;
    let slides: Vec<Slide> = deck_file.slides.into_iter().map(Slide::new).collect();
    let indicator_count = slides.len();
    let mut typewriter = Typewriter::attach(&slides);
    let mut deck = SlideDeck::new(slides, indicator_count);
    info!("Loaded {} slides", deck.slides().len());

    let (mut rl, thread) = raylib::init()
        .size(args.width, args.height)
        .title("Stardeck")
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(args.fps);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    let mut starfield = Starfield::new(args.seed);
    starfield.resize(current_viewport(&rl));
    let mut framebuffer = create_framebuffer(&mut rl, &thread, &starfield)?;

    let mut platform = PlatformInput::default();
    let mut hits = HitMap::default();

    // --- Main Loop ---
    while !rl.window_should_close() {
        let dt = rl.get_frame_time();

        if rl.is_window_resized() {
            starfield.resize(current_viewport(&rl));
            framebuffer = create_framebuffer(&mut rl, &thread, &starfield)?;
        }

        // 1. Input, hit-tested against the regions of the previous frame
        for input in platform.poll(&rl, &hits) {
            let external = match &input {
                Input::Anchor(href) => Some(href.clone()),
                _ => None,
            };
            if deck.handle_input(input) == DefaultAction::Allowed {
                if let Some(href) = external {
                    info!("Link target {} is not a slide", href);
                }
            }
        }

        // 2. Timers
        deck.update(dt);
        if let Some(typewriter) = typewriter.as_mut() {
            typewriter.update(dt);
        }

        // 3. Render into the device-resolution framebuffer
        hits.clear();
        if let Some(fb) = framebuffer.as_mut() {
            let viewport = starfield.viewport();
            let size = Vector2::new(viewport.width, viewport.height);
            let scale = starfield.scale();

            let mut d = rl.begin_texture_mode(&thread, fb);
            let mut surface = RaylibSurface::new(&mut d, scale, size);
            starfield.frame(&mut surface);
            draw_panels(&mut surface, &deck, typewriter.as_ref(), &mut hits);
            draw_controls(&mut surface, &deck, &mut hits);
        }

        // 4. Present it at window size; render textures are stored upside down
        let mut d = rl.begin_drawing(&thread);
        d.clear_background(PAGE_BACKGROUND);
        if let Some(fb) = framebuffer.as_ref() {
            let sw = d.get_screen_width() as f32;
            let sh = d.get_screen_height() as f32;
            d.draw_texture_pro(
                fb,
                Rectangle::new(0.0, 0.0, fb.width() as f32, -(fb.height() as f32)),
                Rectangle::new(0.0, 0.0, sw, sh),
                Vector2::new(0.0, 0.0),
                0.0,
                Color::WHITE,
            );
        }
    }

    Ok(())
}

fn current_viewport(rl: &RaylibHandle) -> Viewport {
    Viewport::new(
        rl.get_screen_width() as f32,
        rl.get_screen_height() as f32,
        rl.get_window_scale_dpi().x,
    )
}

/// Render target matching the starfield's surface size; `None` while the window has no area.
fn create_framebuffer(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    starfield: &Starfield,
) -> Result<Option<RenderTexture2D>> {
    let (width, height) = starfield.surface_size();
    if width == 0 || height == 0 {
        return Ok(None);
    }
    let framebuffer = rl
        .load_render_texture(thread, width, height)
        .map_err(|e| anyhow!("Failed to create {}x{} framebuffer: {}", width, height, e))?;
    Ok(Some(framebuffer))
}
