use std::time::Duration;

use horloge_engine::coords::Vec2;
use horloge_engine::paint::Color;

/// Colors used by the watch.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub ring: Color,
    pub ticks: Color,
    pub center_dot: Color,
    pub hour_hand: Color,
    pub minute_hand: Color,
    pub second_hand: Color,
    pub text: Color,

    pub button_border: Color,
    pub button: Color,
    pub button_hover: Color,
    pub button_press: Color,
    pub button_text: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            ring: Color::BLACK,
            ticks: Color::BLACK,
            center_dot: Color::BLACK,
            hour_hand: Color::BLACK,
            minute_hand: Color::BLACK,
            second_hand: Color::RED,
            text: Color::BLACK,

            button_border: Color::from_u8(0x6e, 0x6e, 0x6e, 0xff),
            button: Color::from_u8(0xe4, 0xe4, 0xe4, 0xff),
            button_hover: Color::from_u8(0xf2, 0xf2, 0xf2, 0xff),
            button_press: Color::from_u8(0xc8, 0xc8, 0xc8, 0xff),
            button_text: Color::BLACK,
        }
    }
}

/// Geometry, timing and colors of the watch window.
///
/// All lengths are logical pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct WatchConfig {
    pub title: String,
    pub width: f32,
    pub height: f32,

    pub center: Vec2,
    pub radius: f32,
    pub ring_width: f32,
    pub tick_width: f32,
    pub center_dot_radius: f32,

    /// Vertical centers of the time and date labels.
    pub time_label_y: f32,
    pub date_label_y: f32,
    pub time_font_size: f32,
    pub date_font_size: f32,

    /// Vertical center of the Start / Stop row; buttons sit at `width / 2 ± 60`.
    pub buttons_y: f32,
    pub button_size: Vec2,
    pub button_font_size: f32,

    /// Delay between ticks while running.
    pub interval: Duration,

    pub palette: Palette,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            title: "Horloge".to_string(),
            width: 400.0,
            height: 520.0,

            center: Vec2::new(200.0, 200.0),
            radius: 160.0,
            ring_width: 3.0,
            tick_width: 3.0,
            center_dot_radius: 6.0,

            time_label_y: 420.0,
            date_label_y: 448.0,
            time_font_size: 18.0,
            date_font_size: 12.0,

            buttons_y: 488.0,
            button_size: Vec2::new(80.0, 28.0),
            button_font_size: 13.0,

            interval: Duration::from_millis(50),

            palette: Palette::default(),
        }
    }
}
