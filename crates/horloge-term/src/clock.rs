use std::future::Future;
use std::io::{self, Write};
use std::time::Duration;

use anyhow::Context;
use chrono::{Local, Timelike};
use horloge_time::{TimeSample, format};

use crate::screen;

/// Printed on its own line when the loop is interrupted.
pub const FAREWELL: &str = "Watch stopped.";

const TITLE: &str = "HORLOGE";

/// Inner width of the box, border excluded.
const INNER: usize = 20;

const NANOS_PER_SEC: u32 = 1_000_000_000;

/// Time left until the next whole second, given the nanoseconds already
/// elapsed in the current one. Always in (0, 1] s.
///
/// chrono reports a leap second as `subsec_nanos >= 1e9`; that clamps to 1 ns.
pub fn until_next_second(subsec_nanos: u32) -> Duration {
    let elapsed = subsec_nanos.min(NANOS_PER_SEC - 1);
    Duration::from_nanos(u64::from(NANOS_PER_SEC - elapsed))
}

/// The five lines of the clock box: top border, title, divider, time, bottom.
pub fn render_box(sample: &TimeSample) -> Vec<String> {
    let rule = "═".repeat(INNER);
    vec![
        format!("╔{rule}╗"),
        format!("║{}║", centered(TITLE)),
        format!("╠{rule}╣"),
        format!("║{}║", centered(&format::digital(sample))),
        format!("╚{rule}╝"),
    ]
}

/// Pads `text` to `INNER` columns; the odd column goes to the right.
fn centered(text: &str) -> String {
    let len = text.chars().count().min(INNER);
    let left = (INNER - len) / 2;
    let right = INNER - len - left;
    format!("{}{text}{}", " ".repeat(left), " ".repeat(right))
}

/// Redraws the box every second until `shutdown` resolves, then prints
/// [`FAREWELL`].
///
/// A write failure on `out` or a failing `shutdown` ends the loop with an error.
pub async fn run_until<W, F>(out: &mut W, shutdown: F) -> anyhow::Result<()>
where
    W: Write,
    F: Future<Output = io::Result<()>>,
{
    tokio::pin!(shutdown);
    let mut frames: u64 = 0;

    loop {
        let now = Local::now();
        let sample = TimeSample::from_datetime(&now.naive_local());

        screen::draw(out, &render_box(&sample)).context("failed to draw clock")?;
        frames += 1;

        let wait = until_next_second(now.nanosecond());
        log::trace!("frame {frames}; next in {wait:?}");

        tokio::select! {
            biased;
            res = &mut shutdown => {
                res.context("failed to listen for interrupt")?;
                break;
            }
            _ = tokio::time::sleep(wait) => {}
        }
    }

    log::debug!("interrupted after {frames} frames");
    writeln!(out, "\n{FAREWELL}").context("failed to print farewell")?;
    out.flush().context("failed to flush stdout")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn sample(h: u32, m: u32, s: u32) -> TimeSample {
        let date = NaiveDate::from_ymd_opt(2025, 10, 14).unwrap();
        TimeSample::new(date, h, m, s, 0).unwrap()
    }

    // ── until_next_second ──

    #[test]
    fn on_the_second_waits_a_full_second() {
        assert_eq!(until_next_second(0), Duration::from_secs(1));
    }

    #[test]
    fn mid_second_waits_the_remainder() {
        assert_eq!(until_next_second(250_000_000), Duration::from_millis(750));
        assert_eq!(until_next_second(999_999_999), Duration::from_nanos(1));
    }

    #[test]
    fn leap_second_clamps_to_smallest_wait() {
        assert_eq!(until_next_second(1_000_000_000), Duration::from_nanos(1));
        assert_eq!(until_next_second(1_999_999_999), Duration::from_nanos(1));
    }

    #[test]
    fn wait_is_always_within_one_second() {
        for n in (0..=2_000_000_000u32).step_by(7_919_311) {
            let d = until_next_second(n);
            assert!(d > Duration::ZERO && d <= Duration::from_secs(1), "{n} -> {d:?}");
        }
    }

    // ── render_box ──

    #[test]
    fn box_layout() {
        let lines = render_box(&sample(13, 5, 9));
        assert_eq!(
            lines,
            vec![
                "╔════════════════════╗",
                "║      HORLOGE       ║",
                "╠════════════════════╣",
                "║    01:05:09 PM     ║",
                "╚════════════════════╝",
            ]
        );
    }

    #[test]
    fn every_line_has_equal_width() {
        for (h, m, s) in [(0, 0, 0), (9, 59, 59), (12, 0, 0), (23, 1, 2)] {
            let lines = render_box(&sample(h, m, s));
            assert_eq!(lines.len(), 5);
            for line in &lines {
                assert_eq!(line.chars().count(), INNER + 2, "{line:?}");
            }
        }
    }

    #[test]
    fn midnight_reads_twelve_am() {
        let lines = render_box(&sample(0, 0, 0));
        assert!(lines[3].contains("12:00:00 AM"));
    }

    // ── run_until ──

    #[tokio::test]
    async fn interrupt_after_first_frame_prints_farewell() {
        let mut out = Vec::new();
        run_until(&mut out, async { Ok(()) }).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("HORLOGE").count(), 1);
        assert!(text.ends_with("\nWatch stopped.\n"));
    }

    #[tokio::test]
    async fn failing_signal_listener_is_an_error() {
        let mut out = Vec::new();
        let failing = async { Err(io::Error::other("no signal handler")) };
        let err = run_until(&mut out, failing).await.unwrap_err();
        assert!(format!("{err:#}").contains("no signal handler"));
    }
}
