use std::f32::consts::TAU;
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use raylib::prelude::*;
use crate::constants::*;
use crate::surface::{Surface, with_alpha};

/// Window size in logical pixels plus the platform's device pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub pixel_ratio: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, pixel_ratio: f32) -> Self {
        Self { width: width.max(0.0), height: height.max(0.0), pixel_ratio }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub position: Vector2,
    pub z: f32,          // Depth factor, scales speed and radius
    pub r: f32,
    pub velocity: Vector2,
    pub twinkle: f32,    // Phase in radians
}

impl Star {
    fn random(rng: &mut impl Rng, width: f32, height: f32) -> Self {
        Self {
            position: Vector2::new(rng.random_range(0.0..width), rng.random_range(0.0..height)),
            z: rng.random_range(0.4..1.0),
            r: rng.random_range(0.2..1.8),
            velocity: Vector2::new(rng.random_range(-0.06..0.06), rng.random_range(-0.06..0.06)),
            twinkle: rng.random_range(0.0..TAU),
        }
    }

    /// Moves one frame forward, teleporting across edges, and returns the twinkle alpha.
    fn advance(&mut self, width: f32, height: f32) -> f32 {
        self.position.x += self.velocity.x * self.z;
        self.position.y += self.velocity.y * self.z;
        self.position.x = wrap(self.position.x, width);
        self.position.y = wrap(self.position.y, height);

        self.twinkle += TWINKLE_STEP;
        TWINKLE_BASE_ALPHA + self.twinkle.sin() * TWINKLE_AMPLITUDE
    }
}

fn wrap(value: f32, extent: f32) -> f32 {
    if value < -WRAP_MARGIN {
        extent + WRAP_MARGIN
    } else if value > extent + WRAP_MARGIN {
        -WRAP_MARGIN
    } else {
        value
    }
}

/// Number of stars for a viewport: proportional to its area, capped.
pub fn star_count(width: f32, height: f32) -> usize {
    let area = width.max(0.0) as f64 * height.max(0.0) as f64;
    ((area * STAR_DENSITY).floor() as usize).min(MAX_STARS)
}

pub struct Starfield {
    stars: Vec<Star>,
    viewport: Viewport,
    scale: f32,
    surface_size: (u32, u32),
    rng: StdRng,
}

impl Starfield {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            stars: Vec::new(),
            viewport: Viewport::new(0.0, 0.0, 1.0),
            scale: 1.0,
            surface_size: (0, 0),
            rng,
        }
    }

    /// Adopts a new viewport and regenerates every star.
    pub fn resize(&mut self, viewport: Viewport) {
        let ratio = if viewport.pixel_ratio > 0.0 { viewport.pixel_ratio } else { 1.0 };
        self.scale = ratio.min(MAX_PIXEL_RATIO);
        self.viewport = viewport;
        self.surface_size = (
            (viewport.width * self.scale).floor() as u32,
            (viewport.height * self.scale).floor() as u32,
        );
        self.regenerate();
        info!(
            "Starfield resized to {}x{} ({}x{} px), {} stars",
            viewport.width, viewport.height, self.surface_size.0, self.surface_size.1, self.stars.len()
        );
    }

    pub fn regenerate(&mut self) {
        let (width, height) = (self.viewport.width, self.viewport.height);
        let count = star_count(width, height);
        self.stars.clear();
        for _ in 0..count {
            self.stars.push(Star::random(&mut self.rng, width, height));
        }
    }

    /// Scale from logical to surface pixels.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Size of the backing surface in device pixels.
    pub fn surface_size(&self) -> (u32, u32) {
        self.surface_size
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Advances and paints one frame. Called once per display refresh.
    pub fn frame(&mut self, surface: &mut impl Surface) {
        surface.clear(PAGE_BACKGROUND);
        if self.viewport.is_empty() {
            return;
        }
        let (width, height) = (self.viewport.width, self.viewport.height);

        surface.fill_radial_gradient(
            Vector2::new(width * GRADIENT_CENTER.0, height * GRADIENT_CENTER.1),
            width.max(height),
            GRADIENT_INNER,
            GRADIENT_OUTER,
        );

        for star in self.stars.iter_mut() {
            let alpha = star.advance(width, height);
            surface.fill_circle(star.position, star.r * star.z, with_alpha(STAR_COLOR, alpha));
        }

        self.draw_links(surface);
    }

    // Neighbours are taken from creation order, not from space: a star is only
    // ever linked to the LINK_WINDOW - 1 stars created right after it.
    fn draw_links(&self, surface: &mut impl Surface) {
        let max_dist2 = LINK_DISTANCE * LINK_DISTANCE;
        for (i, a) in self.stars.iter().enumerate() {
            let end = (i + LINK_WINDOW).min(self.stars.len());
            for b in &self.stars[i + 1..end] {
                let dx = a.position.x - b.position.x;
                let dy = a.position.y - b.position.y;
                let dist2 = dx * dx + dy * dy;
                if dist2 < max_dist2 {
                    let alpha = LINK_MAX_ALPHA * (1.0 - dist2 / max_dist2);
                    surface.stroke_line(a.position, b.position, with_alpha(LINK_COLOR, alpha));
                }
            }
        }
    }

    #[cfg(test)]
    fn set_stars(&mut self, stars: Vec<Star>) {
        self.stars = stars;
    }
}
