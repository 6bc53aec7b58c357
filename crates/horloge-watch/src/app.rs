use std::time::{Duration, Instant};

use winit::dpi::LogicalSize;

use horloge_engine::coords::Vec2;
use horloge_engine::core::{App as EngineApp, AppControl, FrameCtx};
use horloge_engine::device::GpuInit;
use horloge_engine::input::{Key, MouseButton};
use horloge_engine::render::Renderers;
use horloge_engine::scene::DrawList;
use horloge_engine::text::{FontId, FontSystem};
use horloge_engine::window::{CursorIcon, Runtime, RuntimeConfig};
use horloge_time::{HandAngles, LocalClock, TimeSource};

use crate::config::WatchConfig;
use crate::controls::{Action, Controls};
use crate::face::Face;
use crate::fonts;
use crate::hands::HandSet;
use crate::painter::Painter;
use crate::readout::Readout;
use crate::state::WatchState;

// ── Watch ─────────────────────────────────────────────────────────────────

/// Top-level watch builder.
///
/// ```rust,ignore
/// Watch::new()
///     .title("Horloge")
///     .interval(Duration::from_millis(50))
///     .run()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct Watch {
    config: WatchConfig,
}

impl Watch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.config.title = t.into();
        self
    }

    /// Delay between ticks while running.
    pub fn interval(mut self, interval: Duration) -> Self {
        self.config.interval = interval;
        self
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: WatchConfig) -> Self {
        self.config = config;
        self
    }

    /// Opens the window and blocks until it is closed.
    pub fn run(self) -> anyhow::Result<()> {
        let runtime = RuntimeConfig {
            title: self.config.title.clone(),
            initial_size: LogicalSize::new(f64::from(self.config.width), f64::from(self.config.height)),
            resizable: false,
        };

        let app = WatchApp::new(self.config, LocalClock, Instant::now());
        Runtime::run(runtime, GpuInit::default(), app)
    }
}

// ── WatchApp ──────────────────────────────────────────────────────────────

/// Implements the engine's `App`: input handling, frame composition, render.
struct WatchApp<S: TimeSource> {
    cfg: WatchConfig,
    state: WatchState,
    source: S,

    face: Face,
    controls: Controls,
    fonts: FontSystem,
    font: Option<FontId>,

    frame_list: DrawList,
    renderers: Renderers,
}

impl<S: TimeSource> WatchApp<S> {
    fn new(cfg: WatchConfig, source: S, now: Instant) -> Self {
        let mut fonts = FontSystem::new();
        let font = fonts::load_system_font(&mut fonts);
        Self::with_fonts(cfg, source, now, fonts, font)
    }

    fn with_fonts(
        cfg: WatchConfig,
        source: S,
        now: Instant,
        fonts: FontSystem,
        font: Option<FontId>,
    ) -> Self {
        Self {
            state: WatchState::new(cfg.interval, now),
            face: Face::build(&cfg),
            controls: Controls::new(&cfg),
            cfg,
            source,
            fonts,
            font,
            frame_list: DrawList::new(),
            renderers: Renderers::new(),
        }
    }

    /// Applies a button action or shortcut. Returns `Exit` for Escape.
    fn handle_input(
        &mut self,
        now: Instant,
        keys: impl Fn(Key) -> bool,
        click: Option<Vec2>,
    ) -> AppControl {
        if keys(Key::Escape) {
            log::debug!("escape pressed; closing");
            return AppControl::Exit;
        }
        if keys(Key::Space) {
            self.state.toggle(now);
        }

        match click.and_then(|pos| self.controls.hit(pos)) {
            Some(Action::Start) => {
                self.state.start(now);
            }
            Some(Action::Stop) => {
                self.state.stop();
            }
            None => {}
        }
        AppControl::Continue
    }

    /// Records the frame: cached face, then hands, readout and buttons.
    fn compose(&mut self, scale: f32, pointer: Option<Vec2>, pressed: bool) {
        self.frame_list.clear();
        self.frame_list.append(self.face.draw_list());

        let cfg = &self.cfg;
        let mut painter = Painter::new(&mut self.frame_list, &self.fonts, scale)
            .above(self.face.top())
            .with_pointer(pointer, pressed);

        if let Some(sample) = self.state.sample() {
            let angles = HandAngles::from_sample(sample);
            HandSet::with_palette(&angles, cfg.radius, &cfg.palette).paint(&mut painter, cfg.center);
            Readout::from_sample(sample).paint(&mut painter, self.font, cfg);
        }

        self.controls.paint(&mut painter, self.font, cfg);
    }
}

impl<S: TimeSource> EngineApp for WatchApp<S> {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let now = ctx.time.now;
        let pointer = ctx.input.pointer_pos.map(|(x, y)| Vec2::new(x, y));

        let click = pointer.filter(|_| ctx.input_frame.released(MouseButton::Left));
        let frame = ctx.input_frame;
        if self.handle_input(now, |k| frame.key_pressed(k), click) == AppControl::Exit {
            return AppControl::Exit;
        }

        self.state.begin_frame(now, &self.source);

        let pressed = ctx.input.button_down(MouseButton::Left);
        self.compose(ctx.window.scale_factor(), pointer, pressed);

        let over_button = pointer.is_some_and(|p| self.controls.hit(p).is_some());
        ctx.window.set_cursor(if over_button { CursorIcon::Pointer } else { CursorIcon::Default });

        // ── render ────────────────────────────────────────────────────────
        let dl = &mut self.frame_list;
        let fonts = &self.fonts;
        let renderers = &mut self.renderers;
        let control = ctx.render(self.cfg.palette.background, |rctx, target| {
            renderers.render(rctx, target, dl, fonts);
        });

        // Re-arm only once the frame is drawn.
        if let Some(deadline) = self.state.end_frame(Instant::now()) {
            ctx.runtime.redraw_at(deadline);
        }

        control
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use horloge_engine::scene::DrawCmd;
    use horloge_time::TimeSample;

    use super::*;

    fn fixed() -> TimeSample {
        let date = NaiveDate::from_ymd_opt(2025, 10, 14).unwrap();
        TimeSample::new(date, 13, 5, 9, 0).unwrap()
    }

    fn app(now: Instant) -> WatchApp<fn() -> TimeSample> {
        WatchApp::with_fonts(WatchConfig::default(), fixed as fn() -> TimeSample, now, FontSystem::new(), None)
    }

    fn no_keys(_: Key) -> bool {
        false
    }

    #[test]
    fn frame_contains_face_hands_and_buttons() {
        let now = Instant::now();
        let mut a = app(now);
        a.state.begin_frame(now, &a.source);
        a.compose(1.0, None, false);

        let items = a.frame_list.items();
        let lines = items.iter().filter(|i| matches!(i.cmd, DrawCmd::Line(_))).count();
        let rects = items.iter().filter(|i| matches!(i.cmd, DrawCmd::Rect(_))).count();
        assert_eq!(lines, 12 + 3);
        assert_eq!(rects, 4);
        // No font loaded: no text commands at all.
        assert!(!items.iter().any(|i| matches!(i.cmd, DrawCmd::Text(_))));
    }

    #[test]
    fn hands_paint_above_the_face() {
        let now = Instant::now();
        let mut a = app(now);
        a.state.begin_frame(now, &a.source);
        a.compose(1.0, None, false);

        let top = a.face.top();
        let hand_layers: Vec<_> = a
            .frame_list
            .items()
            .iter()
            .filter(|i| matches!(&i.cmd, DrawCmd::Line(l) if l.width != 3.0))
            .map(|i| i.key.z)
            .collect();
        assert_eq!(hand_layers.len(), 3);
        assert!(hand_layers.iter().all(|z| *z > top));
    }

    #[test]
    fn recompose_does_not_accumulate() {
        let now = Instant::now();
        let mut a = app(now);
        a.state.begin_frame(now, &a.source);
        a.compose(1.0, None, false);
        let n = a.frame_list.len();
        a.compose(1.0, None, false);
        assert_eq!(a.frame_list.len(), n);
    }

    #[test]
    fn stop_click_then_start_click() {
        let now = Instant::now();
        let mut a = app(now);
        let stop = a.controls.buttons[1].rect.center();
        let start = a.controls.buttons[0].rect.center();

        a.handle_input(now, no_keys, Some(stop));
        assert!(!a.state.is_running());
        assert_eq!(a.state.deadline(), None);

        a.handle_input(now, no_keys, Some(start));
        assert!(a.state.is_running());
        assert_eq!(a.state.deadline(), Some(now));
    }

    #[test]
    fn space_toggles_and_escape_exits() {
        let now = Instant::now();
        let mut a = app(now);

        assert_eq!(a.handle_input(now, |k| k == Key::Space, None), AppControl::Continue);
        assert!(!a.state.is_running());

        assert_eq!(a.handle_input(now, |k| k == Key::Escape, None), AppControl::Exit);
    }

    #[test]
    fn click_outside_buttons_changes_nothing() {
        let now = Instant::now();
        let mut a = app(now);
        a.handle_input(now, no_keys, Some(Vec2::new(200.0, 200.0)));
        assert!(a.state.is_running());
    }
}
