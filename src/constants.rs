use raylib::prelude::Color;

pub const WINDOW_WIDTH: i32 = 1280;           // Default window width (logical pixels)
pub const WINDOW_HEIGHT: i32 = 720;           // Default window height (logical pixels)
pub const FPS: u32 = 60;                      // Target frames per second

// --- Starfield ---
pub const STAR_DENSITY: f64 = 0.00012;        // Stars per square pixel
pub const MAX_STARS: usize = 500;
pub const MAX_PIXEL_RATIO: f32 = 2.0;
pub const WRAP_MARGIN: f32 = 10.0;            // Stars leave the viewport this far before wrapping
pub const TWINKLE_STEP: f32 = 0.02;           // Radians per frame
pub const TWINKLE_BASE_ALPHA: f32 = 0.6;
pub const TWINKLE_AMPLITUDE: f32 = 0.3;
pub const LINK_WINDOW: usize = 40;            // A star is compared with the next 39 stars
pub const LINK_DISTANCE: f32 = 110.0;
pub const LINK_MAX_ALPHA: f32 = 0.08;
pub const GRADIENT_CENTER: (f32, f32) = (0.7, 0.1);

pub const PAGE_BACKGROUND: Color = Color::new(4, 6, 12, 255);
pub const GRADIENT_INNER: Color = Color::new(10, 20, 45, 179); // 70% opacity
pub const GRADIENT_OUTER: Color = Color::new(7, 11, 20, 179);
pub const STAR_COLOR: Color = Color::new(83, 243, 255, 255);
pub const LINK_COLOR: Color = Color::new(154, 77, 255, 255);

// --- Slides ---
pub const SETTLE_DELAY: f32 = 0.62;           // Must match the panel transition duration (seconds)
pub const WHEEL_COOLDOWN: f64 = 0.65;         // Minimum time between accepted wheel steps (seconds)
pub const SWIPE_THRESHOLD: f32 = 40.0;        // Vertical touch travel needed for a swipe (pixels)
pub const TRANSITION_TRAVEL: f32 = 40.0;      // Vertical offset of entering/exiting panels (pixels)

pub const TEXT_COLOR: Color = Color::new(230, 236, 255, 255);
pub const MUTED_TEXT_COLOR: Color = Color::new(150, 162, 190, 255);
pub const ACCENT_COLOR: Color = STAR_COLOR;
pub const CONTROL_FILL: Color = Color::new(20, 30, 60, 200);

// --- Typewriter ---
pub const TYPEWRITER_INITIAL_DELAY: f32 = 0.35;
pub const TYPEWRITER_CHAR_DELAY: f32 = 0.07;
