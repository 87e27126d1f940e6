//! Turkey Catch entry point
//!
//! Web: wires the browser frame loop, input and HUD around the simulation.
//! Native: runs headless demo rounds driven by the autopilot.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, PointerEvent};

    use turkey_catch::persistence::{LocalStorage, MemoryStore};
    use turkey_catch::platform::{Controls, FrameClock};
    use turkey_catch::sim::{
        EndReason, FrameSnapshot, GameEvent, GamePhase, GameSession, ItemKind, Viewport, tick,
    };
    use turkey_catch::{HighScore, Tuning};

    /// Game instance holding all state
    struct Game {
        session: GameSession,
        controls: Controls,
        clock: FrameClock,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        canvas_size: (f32, f32),
    }

    impl Game {
        /// Match the backing store to the viewport (device pixels, capped at 2x)
        fn fit_canvas(&mut self, viewport: &Viewport) {
            if self.canvas_size == (viewport.width, viewport.height) {
                return;
            }
            let dpr = web_sys::window()
                .map(|w| w.device_pixel_ratio())
                .unwrap_or(1.0)
                .clamp(1.0, 2.0);
            self.canvas
                .set_width((viewport.width as f64 * dpr).floor() as u32);
            self.canvas
                .set_height((viewport.height as f64 * dpr).floor() as u32);
            let _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
            self.canvas_size = (viewport.width, viewport.height);
        }

        fn frame(&mut self, time: f64) {
            let viewport = read_viewport();
            self.fit_canvas(&viewport);

            let dt = self.clock.advance(time);
            let input = self.controls.tick_input();
            tick(&mut self.session, &input, &viewport, dt);

            for event in self.session.drain_events() {
                if let GameEvent::PhaseChanged(change) = event {
                    match change.phase {
                        GamePhase::Ended => show_overlay(
                            change.reason.unwrap_or(EndReason::Time),
                            change.score,
                            change.high_score,
                        ),
                        GamePhase::Running => hide_overlay(),
                        GamePhase::Idle => {}
                    }
                }
            }

            let snapshot = self.session.snapshot();
            draw(&self.ctx, &viewport, &snapshot);
            update_hud(&snapshot);
        }

        fn restart(&mut self) {
            self.controls.clear();
            self.session.reset();
        }
    }

    /// Drawable size plus the strip hidden by an on-screen keyboard
    fn read_viewport() -> Viewport {
        let Some(window) = web_sys::window() else {
            return Viewport::new(0.0, 0.0, 0.0);
        };
        let inner_w = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        let inner_h = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);

        let (height, safe_bottom) = match window.visual_viewport() {
            Some(vv) => (vv.height(), (inner_h - vv.height() - vv.offset_top()).max(0.0)),
            None => (inner_h, 0.0),
        };
        Viewport::new(
            inner_w.floor() as f32,
            height.floor() as f32,
            safe_bottom as f32,
        )
    }

    fn draw(ctx: &CanvasRenderingContext2d, viewport: &Viewport, snapshot: &FrameSnapshot) {
        let (w, h) = (viewport.width as f64, viewport.height as f64);
        ctx.set_fill_style_str("#0b1020");
        ctx.fill_rect(0.0, 0.0, w, h);

        // Static starfield
        ctx.set_global_alpha(0.22);
        ctx.set_fill_style_str("#ffffff");
        if w >= 1.0 && h >= 1.0 {
            for i in 0..36u32 {
                let x = (i * 97) as f64 % w;
                let y = (i * 173) as f64 % h;
                ctx.fill_rect(x, y, 2.0, 2.0);
            }
        }
        ctx.set_global_alpha(1.0);

        let pos = snapshot.catcher_pos;
        let size = snapshot.catcher_size;
        ctx.set_fill_style_str("#f7b500");
        ctx.fill_rect(
            (pos.x - size.x / 2.0) as f64,
            (pos.y - size.y / 2.0) as f64,
            size.x as f64,
            size.y as f64,
        );

        for item in &snapshot.items {
            let color = match item.kind {
                ItemKind::Reward => "#2dff8f",
                ItemKind::Bomb => "#ff3b3b",
            };
            ctx.set_fill_style_str(color);
            ctx.begin_path();
            let _ = ctx.arc(
                item.pos.x as f64,
                item.pos.y as f64,
                (item.size / 2.0) as f64,
                0.0,
                std::f64::consts::TAU,
            );
            ctx.fill();
        }
    }

    fn set_text(id: &str, text: &str) {
        let document = web_sys::window().and_then(|w| w.document());
        if let Some(el) = document.and_then(|d| d.get_element_by_id(id)) {
            el.set_text_content(Some(text));
        }
    }

    fn update_hud(snapshot: &FrameSnapshot) {
        set_text("time", &snapshot.countdown.to_string());
        set_text("score", &snapshot.score.to_string());
        set_text("best", &snapshot.high_score.to_string());
    }

    fn show_overlay(reason: EndReason, score: u64, high_score: u64) {
        let title = match reason {
            EndReason::Bomb => "BOOM!",
            EndReason::Time => "TIME UP",
        };
        set_text("endTitle", title);
        set_text("endScore", &score.to_string());
        set_text("endBest", &high_score.to_string());
        let document = web_sys::window().and_then(|w| w.document());
        if let Some(el) = document.and_then(|d| d.get_element_by_id("overlay")) {
            let _ = el.class_list().add_1("show");
        }
    }

    fn hide_overlay() {
        let document = web_sys::window().and_then(|w| w.document());
        if let Some(el) = document.and_then(|d| d.get_element_by_id("overlay")) {
            let _ = el.class_list().remove_1("show");
        }
    }

    /// End-of-round card, hidden until `show_overlay` adds the `show` class
    fn create_overlay(document: &web_sys::Document) -> Result<(), JsValue> {
        let overlay = document.create_element("div")?;
        overlay.set_class_name("overlay");
        overlay.set_id("overlay");
        overlay.set_inner_html(
            r#"<div class="card">
  <h1 id="endTitle">TIME UP</h1>
  <p>Score: <b id="endScore">0</b></p>
  <p>High: <b id="endBest">0</b></p>
  <button id="endRestart">RESTART</button>
</div>"#,
        );
        let body = document
            .body()
            .ok_or_else(|| JsValue::from_str("no body"))?;
        body.append_child(&overlay)?;
        Ok(())
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Turkey Catch starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("c")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let high_score = match LocalStorage::open() {
            Some(storage) => HighScore::load(Box::new(storage)),
            None => HighScore::load(Box::new(MemoryStore::new())),
        };

        let tuning = Tuning::default();
        let seed = js_sys::Date::now() as u64;
        let mut session = GameSession::new(seed, read_viewport(), tuning, high_score);
        session.start();

        let mut clock = FrameClock::new(tuning.max_dt);
        if let Some(perf) = window.performance() {
            clock.start(perf.now());
        }

        let game = Rc::new(RefCell::new(Game {
            session,
            controls: Controls::new(),
            clock,
            canvas: canvas.clone(),
            ctx,
            canvas_size: (0.0, 0.0),
        }));
        log::info!("Game initialized with seed: {}", seed);

        if let Err(e) = create_overlay(&document) {
            log::warn!("Failed to create end overlay: {:?}", e);
        }

        setup_input_handlers(&canvas, game.clone());
        setup_restart_buttons(game.clone());

        request_animation_frame(game);
        log::info!("Turkey Catch running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        // Keyboard (held state)
        for (event_name, pressed) in [("keydown", true), ("keyup", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().controls.key(&event.key(), pressed) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer drag
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut g = game.borrow_mut();
                g.controls.pointer_down(event.client_x() as f32);
                let target = g.controls.drag_target();
                g.session.set_catcher_target(target);
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                // Keep the page from scrolling under a drag
                event.prevent_default();
                let mut g = game.borrow_mut();
                g.controls.pointer_move(event.client_x() as f32);
                let target = g.controls.drag_target();
                g.session.set_catcher_target(target);
            });
            let _ = canvas
                .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                let mut g = game.borrow_mut();
                g.controls.pointer_up();
                g.session.set_catcher_target(None);
            });
            let _ = window
                .add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur: no keyup/pointerup will arrive, release everything
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                g.controls.clear();
                g.session.set_catcher_target(None);
                log::debug!("Controls released (window blur)");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_buttons(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        for id in ["restart", "endRestart"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    game.borrow_mut().restart();
                    log::info!("Round restarted");
                });
                let _ = btn
                    .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless demo: `turkey-catch [seed] [rounds]`
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use turkey_catch::sim::{GamePhase, GameSession, Viewport, autopilot, tick};
    use turkey_catch::{HighScore, Tuning};

    /// 60 Hz frames
    const FRAME_DT: f32 = 1.0 / 60.0;

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(2024);
    let rounds: u32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(3);

    log::info!("Turkey Catch (native) starting...");
    log::info!("Native mode runs autopilot demo rounds - build for wasm32 to play");

    let viewport = Viewport::new(800.0, 600.0, 0.0);
    let mut session = GameSession::new(seed, viewport, Tuning::default(), HighScore::in_memory());
    session.start();

    for round in 1..=rounds {
        while session.phase == GamePhase::Running {
            let input = autopilot::steer(&session);
            tick(&mut session, &input, &viewport, FRAME_DT);
        }
        session.drain_events();

        let reason = session.end_reason.map(|r| r.as_str()).unwrap_or("-");
        println!(
            "round {round}: score {} ({reason} at {:.2}s), high score {}",
            session.score,
            session.elapsed,
            session.high_score()
        );

        if round < rounds {
            session.reset();
        }
    }
}
