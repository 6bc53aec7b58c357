use horloge_engine::coords::{Rect, Vec2};
use horloge_engine::text::FontId;

use crate::config::WatchConfig;
use crate::painter::Painter;

/// What a button does when clicked.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Action {
    Start,
    Stop,
}

/// A flat push button.
///
/// Visual state (hover, press) is read from the `Painter` while painting, so
/// the button keeps no retained state.
#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub label: &'static str,
    pub rect: Rect,
    pub action: Action,
}

impl Button {
    const BORDER: f32 = 1.0;

    /// A click is a primary release with the pointer inside the button.
    pub fn hit(&self, pos: Vec2) -> bool {
        self.rect.contains(pos)
    }

    pub fn paint(&self, painter: &mut Painter<'_>, font: Option<FontId>, cfg: &WatchConfig) {
        let p = &cfg.palette;
        let bg = if painter.is_pressed(self.rect) {
            p.button_press
        } else if painter.is_hovered(self.rect) {
            p.button_hover
        } else {
            p.button
        };

        painter.fill_rect(self.rect, p.button_border);
        painter.fill_rect(self.rect.inset(Self::BORDER), bg);

        if let Some(font) = font {
            painter.text_centered(self.label, font, cfg.button_font_size, p.button_text, self.rect.center());
        }
    }
}

/// The Start / Stop row.
#[derive(Debug, Clone, PartialEq)]
pub struct Controls {
    pub buttons: [Button; 2],
}

impl Controls {
    pub fn new(cfg: &WatchConfig) -> Self {
        let cx = cfg.width * 0.5;
        let at = |dx: f32| Rect::centered(Vec2::new(cx + dx, cfg.buttons_y), cfg.button_size);
        Self {
            buttons: [
                Button { label: "Start", rect: at(-60.0), action: Action::Start },
                Button { label: "Stop", rect: at(60.0), action: Action::Stop },
            ],
        }
    }

    /// Action of the button under `pos`, if any.
    pub fn hit(&self, pos: Vec2) -> Option<Action> {
        self.buttons.iter().find(|b| b.hit(pos)).map(|b| b.action)
    }

    pub fn paint(&self, painter: &mut Painter<'_>, font: Option<FontId>, cfg: &WatchConfig) {
        for b in &self.buttons {
            b.paint(painter, font, cfg);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buttons_straddle_the_center() {
        let c = Controls::new(&WatchConfig::default());
        assert_eq!(c.buttons[0].rect.center(), Vec2::new(140.0, 488.0));
        assert_eq!(c.buttons[1].rect.center(), Vec2::new(260.0, 488.0));
    }

    #[test]
    fn hit_test_picks_the_right_button() {
        let c = Controls::new(&WatchConfig::default());
        assert_eq!(c.hit(Vec2::new(140.0, 488.0)), Some(Action::Start));
        assert_eq!(c.hit(Vec2::new(260.0, 480.0)), Some(Action::Stop));
        assert_eq!(c.hit(Vec2::new(200.0, 488.0)), None);
        assert_eq!(c.hit(Vec2::new(140.0, 200.0)), None);
    }

    #[test]
    fn right_and_bottom_edges_are_outside() {
        let c = Controls::new(&WatchConfig::default());
        let r = c.buttons[0].rect;
        assert!(!c.buttons[0].hit(r.max()));
        assert!(c.buttons[0].hit(r.origin));
    }
}
