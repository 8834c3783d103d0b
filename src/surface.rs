use std::ffi::CString;
use raylib::prelude::*;

/// Drawing operations the visual layer needs. Coordinates are logical pixels.
pub trait Surface {
    fn clear(&mut self, color: Color);
    fn fill_rect(&mut self, rect: Rectangle, color: Color);
    /// Gradient from `inner` at `center` to `outer` at `radius`, continuing as `outer` beyond it.
    fn fill_radial_gradient(&mut self, center: Vector2, radius: f32, inner: Color, outer: Color);
    fn fill_circle(&mut self, center: Vector2, radius: f32, color: Color);
    fn stroke_line(&mut self, from: Vector2, to: Vector2, color: Color);
    fn draw_text(&mut self, text: &str, position: Vector2, size: f32, color: Color);
    fn text_width(&self, text: &str, size: f32) -> f32;

    /// Logical size of the surface.
    fn size(&self) -> Vector2;
}

/// Copy of `color` with its alpha replaced by `alpha` in [0, 1].
pub fn with_alpha(color: Color, alpha: f32) -> Color {
    Color::new(color.r, color.g, color.b, (alpha.clamp(0.0, 1.0) * 255.0).round() as u8)
}

/// Surface over a raylib draw handle. Every coordinate is multiplied by `scale`,
/// so callers keep drawing in logical pixels whatever the pixel ratio.
pub struct RaylibSurface<'a, D: RaylibDraw> {
    d: &'a mut D,
    scale: f32,
    size: Vector2,
}

impl<'a, D: RaylibDraw> RaylibSurface<'a, D> {
    pub fn new(d: &'a mut D, scale: f32, size: Vector2) -> Self {
        Self { d, scale, size }
    }

    fn point(&self, p: Vector2) -> Vector2 {
        Vector2::new(p.x * self.scale, p.y * self.scale)
    }
}

impl<D: RaylibDraw> Surface for RaylibSurface<'_, D> {
    fn clear(&mut self, color: Color) {
        self.d.clear_background(color);
    }

    fn fill_rect(&mut self, rect: Rectangle, color: Color) {
        let s = self.scale;
        self.d.draw_rectangle_rec(
            Rectangle::new(rect.x * s, rect.y * s, rect.width * s, rect.height * s),
            color,
        );
    }

    fn fill_radial_gradient(&mut self, center: Vector2, radius: f32, inner: Color, outer: Color) {
        // Outside the circle the gradient keeps its last stop
        let size = self.size;
        self.fill_rect(Rectangle::new(0.0, 0.0, size.x, size.y), outer);
        let c = self.point(center);
        self.d.draw_circle_gradient(c.x as i32, c.y as i32, radius * self.scale, inner, outer);
    }

    fn fill_circle(&mut self, center: Vector2, radius: f32, color: Color) {
        let c = self.point(center);
        self.d.draw_circle_v(c, radius * self.scale, color);
    }

    fn stroke_line(&mut self, from: Vector2, to: Vector2, color: Color) {
        let (a, b) = (self.point(from), self.point(to));
        self.d.draw_line_ex(a, b, self.scale, color);
    }

    fn draw_text(&mut self, text: &str, position: Vector2, size: f32, color: Color) {
        let p = self.point(position);
        let font_size = (size * self.scale).round() as i32;
        self.d.draw_text(text, p.x as i32, p.y as i32, font_size, color);
    }

    fn text_width(&self, text: &str, size: f32) -> f32 {
        let Ok(c_text) = CString::new(text) else {
            return 0.0;
        };
        let font_size = (size * self.scale).round() as i32;
        // MeasureText only reads the default font's glyph table
        let width = unsafe { raylib::ffi::MeasureText(c_text.as_ptr(), font_size) };
        width as f32 / self.scale
    }

    fn size(&self) -> Vector2 {
        self.size
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_alpha_keeps_rgb_and_clamps() {
        let c = with_alpha(Color::new(83, 243, 255, 255), 0.5);
        assert_eq!((c.r, c.g, c.b, c.a), (83, 243, 255, 128));
        assert_eq!(with_alpha(c, 2.0).a, 255);
        assert_eq!(with_alpha(c, -1.0).a, 0);
    }
}
