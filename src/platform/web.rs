//! Browser host
//!
//! Frames come from `requestAnimationFrame`, cues play through `<audio>`
//! elements and frames are painted on a 2D canvas. Each scheduled frame gets
//! its own one-shot closure carrying its ticket, so a callback that fires after
//! a cancel or restart delivers an old ticket and is ignored by the loop.
//! The scheduler keeps that closure until it is cancelled or superseded.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlAudioElement, HtmlCanvasElement, KeyboardEvent};

use crate::audio::{AudioError, Cue, Notifier};
use crate::autopilot;
use crate::game_loop::{FrameHandle, FrameScheduler, FrameTicket, GameLoop};
use crate::renderer::colors;
use crate::renderer::{Canvas, Frame, Overlay};
use crate::settings::Settings;
use crate::sim::{SeededGaps, SessionState};

pub type WebGame = GameLoop<RafScheduler>;

type FrameCallback = Closure<dyn FnMut(f64)>;

/// `requestAnimationFrame`-backed scheduler
///
/// Owns the closure behind the outstanding request so a cancelled frame frees
/// it. The closure that most recently fired is parked in `fired` until the
/// next request, since it is still on the stack when it schedules its
/// successor.
pub struct RafScheduler {
    game: Weak<RefCell<WebGame>>,
    autopilot: bool,
    pending: Option<(FrameHandle, FrameCallback)>,
    fired: Option<FrameCallback>,
}

impl RafScheduler {
    pub fn new(game: Weak<RefCell<WebGame>>, autopilot: bool) -> Self {
        Self {
            game,
            autopilot,
            pending: None,
            fired: None,
        }
    }
}

impl FrameScheduler for RafScheduler {
    fn schedule(&mut self, ticket: FrameTicket) -> FrameHandle {
        // Whatever was pending has either fired (and may be running right now) or been cancelled
        self.fired = self.pending.take().map(|(_, callback)| callback);

        let Some(window) = web_sys::window() else {
            log::warn!("No window - frame not scheduled");
            return FrameHandle(0);
        };

        let game = self.game.clone();
        let autopilot = self.autopilot;
        let callback: FrameCallback = Closure::once(move |_time: f64| {
            let Some(game) = game.upgrade() else { return };
            let Ok(mut game) = game.try_borrow_mut() else {
                log::warn!("Game busy - dropping frame {}", ticket.sequence);
                return;
            };
            if autopilot && autopilot::wants_jump(game.session()) {
                game.request_jump();
            }
            game.on_frame(ticket);
        });

        match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
            Ok(id) => {
                let handle = FrameHandle(id as u64);
                self.pending = Some((handle, callback));
                handle
            }
            Err(e) => {
                log::warn!("requestAnimationFrame failed: {:?}", e);
                FrameHandle(0)
            }
        }
    }

    fn cancel(&mut self, handle: FrameHandle) {
        if let Some(window) = web_sys::window() {
            let _ = window.cancel_animation_frame(handle.0 as i32);
        }
        if self.pending.as_ref().is_some_and(|(h, _)| *h == handle) {
            self.pending = None;
        }
    }
}

/// Plays cues through throwaway `<audio>` elements
pub struct HtmlAudioNotifier {
    volume: f32,
}

impl HtmlAudioNotifier {
    pub fn new(settings: &Settings) -> Self {
        Self {
            volume: settings.volume(),
        }
    }
}

impl Notifier for HtmlAudioNotifier {
    fn play(&mut self, cue: Cue) -> Result<(), AudioError> {
        if self.volume <= 0.0 {
            return Ok(());
        }
        let audio = HtmlAudioElement::new_with_src(cue.asset_path())
            .map_err(|e| AudioError::Playback(format!("{:?}", e)))?;
        audio.set_volume(self.volume as f64);
        let promise = audio
            .play()
            .map_err(|e| AudioError::Playback(format!("{:?}", e)))?;

        // Autoplay policies reject asynchronously; nothing to do but note it
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = wasm_bindgen_futures::JsFuture::from(promise).await {
                log::warn!("Audio play failed: {:?}", e);
            }
        });
        Ok(())
    }
}

/// Paints frames on a `<canvas>` 2D context
pub struct Canvas2d {
    ctx: CanvasRenderingContext2d,
    show_overlay: bool,
}

impl Canvas2d {
    pub fn from_element_id(id: &str, show_overlay: bool) -> Option<Self> {
        let canvas: HtmlCanvasElement = web_sys::window()?
            .document()?
            .get_element_by_id(id)?
            .dyn_into()
            .ok()?;
        let ctx = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { ctx, show_overlay })
    }

    fn fill(&self, color: [f32; 4], x: f32, y: f32, w: f32, h: f32) {
        self.ctx.set_fill_style_str(&colors::css(color));
        self.ctx.fill_rect(x as f64, y as f64, w as f64, h as f64);
    }
}

impl Canvas for Canvas2d {
    fn draw(&mut self, frame: &Frame) {
        let (w, h) = (frame.width, frame.height);
        self.ctx.clear_rect(0.0, 0.0, w as f64, h as f64);
        self.fill(colors::SKY, 0.0, 0.0, w, h);

        for segment in frame.segments.iter().filter(|s| !s.is_empty()) {
            self.fill(
                colors::OBSTACLE,
                segment.left(),
                segment.top(),
                segment.size.x,
                segment.size.y,
            );
        }
        let body = frame.body;
        self.fill(colors::BODY, body.left(), body.top(), body.size.x, body.size.y);

        self.ctx.set_fill_style_str("#ffffff");
        self.ctx.set_font("bold 20px monospace");
        let _ = self.ctx.fill_text(&frame.score.to_string(), 16.0, 32.0);

        if !self.show_overlay {
            return;
        }
        let Some((title, subtitle)) = frame.overlay.lines() else {
            return;
        };
        let tint = match frame.overlay {
            Overlay::Won { .. } => colors::OVERLAY_WIN,
            _ => colors::OVERLAY_DIM,
        };
        self.fill(tint, 0.0, 0.0, w, h);
        self.ctx.set_fill_style_str("#ffffff");
        self.ctx.set_text_align("center");
        self.ctx.set_font("bold 32px sans-serif");
        let _ = self.ctx.fill_text(title, (w / 2.0) as f64, (h / 2.0 - 10.0) as f64);
        self.ctx.set_font("18px sans-serif");
        let _ = self.ctx.fill_text(&subtitle, (w / 2.0) as f64, (h / 2.0 + 24.0) as f64);
        self.ctx.set_text_align("start");
    }
}

/// Jump while playing; start from the title screen or after a finished game
fn activate(game: &Rc<RefCell<WebGame>>) {
    let Ok(mut game) = game.try_borrow_mut() else { return };
    let state = game.state();
    if state == SessionState::Playing {
        game.request_jump();
    } else if state == SessionState::Idle || state.is_finished() {
        game.start();
    }
}

/// Build the game and wire it to the page
pub fn run() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    log::info!("Flappy Can starting...");

    let settings = Settings::load();
    let gaps = match settings.seed {
        Some(seed) => SeededGaps::new(seed),
        None => SeededGaps::from_entropy(),
    };
    log::info!("Gap seed: {}", gaps.seed());

    let game: Rc<RefCell<WebGame>> = Rc::new_cyclic(|weak| {
        let mut game = GameLoop::new(RafScheduler::new(weak.clone(), settings.autopilot), gaps)
            .with_notifier(HtmlAudioNotifier::new(&settings));
        match Canvas2d::from_element_id("canvas", settings.show_overlay) {
            Some(canvas) => game = game.with_canvas(canvas),
            None => log::warn!("No 2D canvas with id 'canvas' - drawing disabled"),
        }
        RefCell::new(game)
    });
    game.borrow_mut().redraw();

    let Some(window) = web_sys::window() else { return };
    let target: web_sys::EventTarget = window
        .document()
        .and_then(|d| d.get_element_by_id("canvas"))
        .map(Into::into)
        .unwrap_or_else(|| window.clone().into());

    for event in ["mousedown", "touchstart"] {
        let game = game.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |e: web_sys::Event| {
            e.prevent_default();
            activate(&game);
        });
        let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        closure.forget();
    }

    {
        let game = game.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |e: KeyboardEvent| {
            if matches!(e.code().as_str(), "Space" | "Enter" | "ArrowUp") {
                e.prevent_default();
                activate(&game);
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Page going away: no frame may tick after this
    {
        let closure = Closure::<dyn FnMut(_)>::new(move |_e: web_sys::Event| {
            if let Ok(mut game) = game.try_borrow_mut() {
                game.stop();
                log::info!("Stopped on pagehide");
            }
        });
        let _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
