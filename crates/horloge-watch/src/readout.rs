use horloge_engine::coords::Vec2;
use horloge_engine::text::FontId;
use horloge_time::{TimeSample, format};

use crate::config::WatchConfig;
use crate::painter::Painter;

/// The digital time and date lines under the face.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Readout {
    pub time: String,
    pub date: String,
}

impl Readout {
    pub fn from_sample(sample: &TimeSample) -> Self {
        Self { time: format::digital(sample), date: format::date_line(sample) }
    }

    /// Paints both lines centered on the window's vertical axis. Without a
    /// font nothing is drawn.
    pub fn paint(&self, painter: &mut Painter<'_>, font: Option<FontId>, cfg: &WatchConfig) {
        let Some(font) = font else { return };
        let cx = cfg.width * 0.5;
        let color = cfg.palette.text;

        painter.text_centered(&self.time, font, cfg.time_font_size, color, Vec2::new(cx, cfg.time_label_y));
        painter.text_centered(&self.date, font, cfg.date_font_size, color, Vec2::new(cx, cfg.date_label_y));
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use horloge_engine::scene::DrawList;
    use horloge_engine::text::FontSystem;

    use super::*;

    fn sample() -> TimeSample {
        let date = NaiveDate::from_ymd_opt(2025, 10, 14).unwrap();
        TimeSample::new(date, 13, 5, 9, 0).unwrap()
    }

    #[test]
    fn formats_both_lines() {
        let r = Readout::from_sample(&sample());
        assert_eq!(r.time, "01:05:09 PM");
        assert_eq!(r.date, "Tuesday, 14 October 2025");
    }

    #[test]
    fn missing_font_draws_nothing() {
        let mut dl = DrawList::new();
        let fonts = FontSystem::new();
        {
            let mut p = Painter::new(&mut dl, &fonts, 1.0);
            Readout::from_sample(&sample()).paint(&mut p, None, &WatchConfig::default());
        }
        assert!(dl.is_empty());
    }
}
