use horloge_engine::coords::Vec2;
use horloge_engine::paint::Color;
use horloge_time::HandAngles;

use crate::config::Palette;
use crate::painter::Painter;

/// One hand, computed from a sample and dropped after drawing.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HandDescriptor {
    pub length: f32,
    /// Degrees clockwise from 12 o'clock.
    pub angle_deg: f64,
    pub width: f32,
    pub color: Color,
}

impl HandDescriptor {
    /// Endpoint of the hand in screen space (+Y down).
    pub fn tip(&self, center: Vec2) -> Vec2 {
        center + Vec2::from_dial_angle(self.angle_deg, self.length)
    }

    /// Round-capped segment from `center` to the tip.
    pub fn paint(&self, painter: &mut Painter<'_>, center: Vec2) {
        painter.line(center, self.tip(center), self.width, self.color);
    }
}

/// The three hands for one sample.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HandSet {
    pub hour: HandDescriptor,
    pub minute: HandDescriptor,
    pub second: HandDescriptor,
}

impl HandSet {
    /// Hands with the default proportions and colors.
    pub fn from_angles(angles: &HandAngles, radius: f32) -> Self {
        Self::with_palette(angles, radius, &Palette::default())
    }

    pub fn with_palette(angles: &HandAngles, radius: f32, palette: &Palette) -> Self {
        Self {
            hour: HandDescriptor {
                length: radius * 0.5,
                angle_deg: angles.hour,
                width: 6.0,
                color: palette.hour_hand,
            },
            minute: HandDescriptor {
                length: radius * 0.75,
                angle_deg: angles.minute,
                width: 4.0,
                color: palette.minute_hand,
            },
            second: HandDescriptor {
                length: radius * 0.9,
                angle_deg: angles.second,
                width: 2.0,
                color: palette.second_hand,
            },
        }
    }

    /// Paint order: hour, minute, second on top.
    pub fn iter(&self) -> impl Iterator<Item = &HandDescriptor> {
        [&self.hour, &self.minute, &self.second].into_iter()
    }

    pub fn paint(&self, painter: &mut Painter<'_>, center: Vec2) {
        for hand in self.iter() {
            hand.paint(painter, center);
        }
    }
}
