use horloge_engine::coords::{Rect, Vec2};
use horloge_engine::paint::Color;
use horloge_engine::scene::{DrawList, Stroke, ZIndex};
use horloge_engine::text::{FontId, FontSystem};

/// Drawing surface for one frame.
///
/// Wraps the frame's `DrawList`: every call lands on its own z layer, so later
/// calls paint over earlier ones. Also carries the pointer state so controls
/// can pick hover and pressed visuals while painting.
pub struct Painter<'a> {
    draw_list: &'a mut DrawList,
    fonts: &'a FontSystem,
    /// Physical pixels per logical pixel for this frame.
    pub scale: f32,
    z: i32,
    /// Pointer position in logical pixels; `None` outside the window.
    pub mouse_pos: Option<Vec2>,
    /// True while the primary button is held.
    pub mouse_pressed: bool,
}

impl<'a> Painter<'a> {
    pub fn new(draw_list: &'a mut DrawList, fonts: &'a FontSystem, scale: f32) -> Self {
        Self { draw_list, fonts, scale, z: 0, mouse_pos: None, mouse_pressed: false }
    }

    /// Starts numbering layers just above `z`.
    pub fn above(mut self, z: ZIndex) -> Self {
        self.z = z.0 + 1;
        self
    }

    pub fn with_pointer(mut self, pos: Option<Vec2>, pressed: bool) -> Self {
        self.mouse_pos = pos;
        self.mouse_pressed = pressed;
        self
    }

    // ── input queries ─────────────────────────────────────────────────────

    #[inline]
    pub fn is_hovered(&self, rect: Rect) -> bool {
        self.mouse_pos.is_some_and(|p| rect.contains(p))
    }

    #[inline]
    pub fn is_pressed(&self, rect: Rect) -> bool {
        self.mouse_pressed && self.is_hovered(rect)
    }

    // ── text measurement ──────────────────────────────────────────────────

    /// Measures `text` at the renderer's physical scale, so centering matches
    /// where glyphs actually land.
    pub fn measure_text(&self, text: &str, font: FontId, size: f32) -> Vec2 {
        self.fonts.measure_text_scaled(text, font, size, self.scale)
    }

    // ── drawing ───────────────────────────────────────────────────────────

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let z = self.next_z();
        self.draw_list.push_rect(z, rect, color);
    }

    pub fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        let z = self.next_z();
        self.draw_list.push_line(z, from, to, width, color);
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, fill: Color, border: Option<Stroke>) {
        let z = self.next_z();
        self.draw_list.push_circle(z, center, radius, fill, border);
    }

    /// Single line of text with its top-left corner at `origin`.
    pub fn text(&mut self, text: &str, font: FontId, size: f32, color: Color, origin: Vec2) {
        let z = self.next_z();
        self.draw_list.push_text(z, text, font, size, color, origin);
    }

    /// Text centered on `center`. Returns the measured size.
    pub fn text_centered(
        &mut self,
        text: &str,
        font: FontId,
        size: f32,
        color: Color,
        center: Vec2,
    ) -> Vec2 {
        let extent = self.measure_text(text, font, size);
        let origin = Vec2::new(center.x - extent.x * 0.5, center.y - extent.y * 0.5);
        self.text(text, font, size, color, origin);
        extent
    }

    /// The layer the next call would use.
    #[inline]
    pub fn current_z(&self) -> ZIndex {
        ZIndex(self.z)
    }

    fn next_z(&mut self) -> ZIndex {
        let z = ZIndex(self.z);
        self.z += 1;
        z
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use horloge_engine::scene::DrawCmd;

    #[test]
    fn each_call_gets_its_own_layer() {
        let mut dl = DrawList::new();
        let fonts = FontSystem::new();
        {
            let mut p = Painter::new(&mut dl, &fonts, 1.0).above(ZIndex(2));
            p.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::BLACK);
            p.line(Vec2::zero(), Vec2::new(1.0, 1.0), 2.0, Color::RED);
            assert_eq!(p.current_z(), ZIndex(5));
        }
        let zs: Vec<i32> = dl.items().iter().map(|i| i.key.z.0).collect();
        assert_eq!(zs, vec![3, 4]);
        assert!(matches!(dl.items()[1].cmd, DrawCmd::Line(_)));
    }

    #[test]
    fn pressed_requires_hover() {
        let mut dl = DrawList::new();
        let fonts = FontSystem::new();
        let rect = Rect::new(10.0, 10.0, 20.0, 20.0);

        let p = Painter::new(&mut dl, &fonts, 1.0).with_pointer(Some(Vec2::new(0.0, 0.0)), true);
        assert!(!p.is_hovered(rect));
        assert!(!p.is_pressed(rect));

        let p = p.with_pointer(Some(Vec2::new(15.0, 15.0)), true);
        assert!(p.is_pressed(rect));

        let p = p.with_pointer(None, true);
        assert!(!p.is_hovered(rect));
    }
}
