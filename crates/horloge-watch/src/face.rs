use horloge_engine::coords::Vec2;
use horloge_engine::paint::Color;
use horloge_engine::scene::{DrawList, Stroke, ZIndex};

use crate::config::WatchConfig;

const RING_LAYER: ZIndex = ZIndex(0);
const TICK_LAYER: ZIndex = ZIndex(1);
const DOT_LAYER: ZIndex = ZIndex(2);

/// Tick marks run from `radius - TICK_OUTER_INSET` in to `radius - TICK_INNER_INSET`.
const TICK_OUTER_INSET: f32 = 10.0;
const TICK_INNER_INSET: f32 = 30.0;

/// The static part of the watch: ring, hour ticks and center dot.
///
/// Recorded once and replayed into every frame with `DrawList::append`.
#[derive(Debug)]
pub struct Face {
    list: DrawList,
}

impl Face {
    pub fn build(cfg: &WatchConfig) -> Self {
        let mut list = DrawList::new();
        let p = &cfg.palette;

        // Stroke centered on the radius.
        list.push_circle(
            RING_LAYER,
            cfg.center,
            cfg.radius + cfg.ring_width * 0.5,
            Color::TRANSPARENT,
            Some(Stroke::new(cfg.ring_width, p.ring)),
        );

        for (from, to) in tick_segments(cfg.center, cfg.radius) {
            list.push_line(TICK_LAYER, from, to, cfg.tick_width, p.ticks);
        }

        list.push_solid_circle(DOT_LAYER, cfg.center, cfg.center_dot_radius, p.center_dot);

        Self { list }
    }

    #[inline]
    pub fn draw_list(&self) -> &DrawList {
        &self.list
    }

    /// Topmost layer used by the face. Per-frame content goes above it.
    #[inline]
    pub fn top(&self) -> ZIndex {
        DOT_LAYER
    }
}

/// The twelve hour ticks, outer end first, starting at 12 o'clock and going
/// clockwise in 30° steps.
pub fn tick_segments(center: Vec2, radius: f32) -> [(Vec2, Vec2); 12] {
    std::array::from_fn(|h| {
        let angle = h as f64 * 30.0;
        let outer = center + Vec2::from_dial_angle(angle, radius - TICK_OUTER_INSET);
        let inner = center + Vec2::from_dial_angle(angle, radius - TICK_INNER_INSET);
        (outer, inner)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use horloge_engine::scene::DrawCmd;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-3 && (a.y - b.y).abs() < 1e-3
    }

    #[test]
    fn twelve_oclock_tick_points_straight_up() {
        let c = Vec2::new(200.0, 200.0);
        let (outer, inner) = tick_segments(c, 160.0)[0];
        assert!(close(outer, Vec2::new(200.0, 50.0)));
        assert!(close(inner, Vec2::new(200.0, 70.0)));
    }

    #[test]
    fn three_oclock_tick_points_right() {
        let c = Vec2::new(200.0, 200.0);
        let (outer, inner) = tick_segments(c, 160.0)[3];
        assert!(close(outer, Vec2::new(350.0, 200.0)));
        assert!(close(inner, Vec2::new(330.0, 200.0)));
    }

    #[test]
    fn every_tick_is_twenty_pixels_long() {
        for (outer, inner) in tick_segments(Vec2::new(200.0, 200.0), 160.0) {
            assert!(((outer - inner).length() - 20.0).abs() < 1e-3);
        }
    }

    #[test]
    fn face_records_ring_ticks_and_dot() {
        let face = Face::build(&WatchConfig::default());
        let items = face.draw_list().items();
        assert_eq!(items.len(), 14);

        let lines = items.iter().filter(|i| matches!(i.cmd, DrawCmd::Line(_))).count();
        assert_eq!(lines, 12);

        let Some(DrawCmd::Circle(dot)) = items.last().map(|i| &i.cmd) else {
            panic!("center dot should be recorded last");
        };
        assert_eq!(dot.radius, 6.0);
        assert_eq!(face.top(), ZIndex(2));
    }
}
