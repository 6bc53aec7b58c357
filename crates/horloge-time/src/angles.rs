use crate::TimeSample;

/// Hand angles in degrees, clockwise from 12 o'clock.
///
/// All three angles are in `[0, 360)`. They are kept in `f64`: at 59.999999 s
/// the second angle rounds up to exactly 360.0 in `f32`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HandAngles {
    pub hour: f64,
    pub minute: f64,
    pub second: f64,
}

impl HandAngles {
    pub fn from_sample(s: &TimeSample) -> Self {
        let secs = f64::from(s.second());
        let mins = f64::from(s.minute());
        let hours = f64::from(s.hour() % 12);

        Self {
            // Sub-second fraction keeps the second hand sweeping smoothly.
            second: (secs + s.fraction()) * 6.0,
            minute: (mins + secs / 60.0) * 6.0,
            hour: (hours + mins / 60.0 + secs / 3600.0) * 30.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn sample(h: u32, m: u32, s: u32, us: u32) -> TimeSample {
        let date = NaiveDate::from_ymd_opt(2025, 10, 14).unwrap();
        TimeSample::new(date, h, m, s, us).unwrap()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn midnight_is_all_zero() {
        let a = HandAngles::from_sample(&sample(0, 0, 0, 0));
        assert_eq!(a, HandAngles { hour: 0.0, minute: 0.0, second: 0.0 });
    }

    #[test]
    fn noon_matches_midnight() {
        let a = HandAngles::from_sample(&sample(12, 0, 0, 0));
        assert_eq!(a.hour, 0.0);
    }

    #[test]
    fn afternoon_example() {
        let a = HandAngles::from_sample(&sample(13, 5, 9, 0));
        assert!(close(a.hour, (1.0 + 5.0 / 60.0 + 9.0 / 3600.0) * 30.0));
        assert!((a.hour - 32.6).abs() < 0.05);
        assert!(close(a.minute, (5.0 + 9.0 / 60.0) * 6.0));
        assert!(close(a.second, 54.0));
    }

    #[test]
    fn second_includes_fraction() {
        let a = HandAngles::from_sample(&sample(3, 0, 30, 500_000));
        assert!(close(a.second, 30.5 * 6.0));
    }

    #[test]
    fn every_angle_stays_below_full_turn() {
        for h in [0, 11, 12, 23] {
            for m in [0, 30, 59] {
                for s in [0, 59] {
                    for us in [0, 999_999] {
                        let a = HandAngles::from_sample(&sample(h, m, s, us));
                        for v in [a.hour, a.minute, a.second] {
                            assert!((0.0..360.0).contains(&v), "{h}:{m}:{s}.{us} -> {v}");
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn minute_strictly_increases_within_a_minute() {
        let mut prev = -1.0;
        for s in 0..60 {
            let a = HandAngles::from_sample(&sample(7, 42, s, 0));
            assert!(a.minute > prev, "second {s}");
            prev = a.minute;
        }
    }
}
