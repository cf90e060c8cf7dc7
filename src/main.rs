//! Sock Pair Panic entry point
//!
//! Wires the simulation to the browser: canvas sizing, the animation frame
//! loop, pointer input, overlay buttons and audio cues. The simulation
//! itself lives in the library crate and never touches the DOM.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, PointerEvent};

    use sock_pair_panic::audio::{AudioManager, SoundEffect};
    use sock_pair_panic::effects::Confetti;
    use sock_pair_panic::sim::{self, GameEvent, GameState, Viewport};
    use sock_pair_panic::{Settings, render, ui};

    /// Page-level state wrapped around the simulation.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum PageState {
        Menu,
        Playing,
        GameOver,
    }

    /// Everything one browser session owns.
    struct Game {
        state: GameState,
        confetti: Confetti,
        audio: AudioManager,
        settings: Settings,
        page: PageState,
        last_time: f64,
        raf_handle: Option<i32>,
    }

    impl Game {
        fn new() -> Self {
            let settings = Settings::load();
            let audio = AudioManager::new(&settings);
            let seed = js_sys::Date::now() as u64;
            Self {
                state: GameState::new(seed),
                confetti: Confetti::new(seed ^ 0x5eed),
                audio,
                settings,
                page: PageState::Menu,
                last_time: 0.0,
                raf_handle: None,
            }
        }

        /// Fresh session. The caller schedules the first frame.
        fn restart(&mut self, seed: u64) {
            self.state = GameState::new(seed);
            self.confetti.clear();
            self.last_time = 0.0;
            log::info!("Game started with seed: {}", seed);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Sock Pair Panic starting...");

        let game = Rc::new(RefCell::new(Game::new()));

        size_canvas_to_window();
        setup_resize_handler();
        setup_pointer_handlers(game.clone());
        setup_buttons(game.clone());

        ui::set_mute_label(game.borrow().settings.muted);
        ui::show_menu();

        log::info!("Sock Pair Panic ready");
    }

    fn canvas() -> Option<HtmlCanvasElement> {
        web_sys::window()?
            .document()?
            .get_element_by_id("game-canvas")?
            .dyn_into()
            .ok()
    }

    fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
        canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into().ok())
    }

    fn size_canvas_to_window() {
        let Some(window) = web_sys::window() else { return };
        let Some(canvas) = canvas() else { return };
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
        canvas.set_width(w as u32);
        canvas.set_height(h as u32);
    }

    fn setup_resize_handler() {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::<dyn FnMut()>::new(size_canvas_to_window);
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_pointer_handlers(game: Rc<RefCell<Game>>) {
        let Some(canvas) = canvas() else {
            log::warn!("No canvas found, pointer input disabled");
            return;
        };

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut g = game.borrow_mut();
                if g.page != PageState::Playing {
                    return;
                }
                // First gesture is also what unlocks a suspended AudioContext
                g.audio.resume();
                let p = Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
                sim::pointer_down(&mut g.state, p);
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut g = game.borrow_mut();
                if g.page != PageState::Playing {
                    return;
                }
                let p = Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
                sim::pointer_move(&mut g.state, p);
            });
            let _ = canvas
                .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Leaving the canvas drops the sock the same as lifting the pointer
        for name in ["pointerup", "pointerleave"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                sim::pointer_up(&mut game.borrow_mut().state);
            });
            let _ =
                canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("start-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                start_game(&game);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("again-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                start_game(&game);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("stop-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                stop_game(&game);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("mute-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                toggle_mute(&game);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn start_game(game: &Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            cancel_pending_frame(&mut g);
            let seed = js_sys::Date::now() as u64;
            g.restart(seed);
            g.page = PageState::Playing;
            g.audio.resume();
            g.audio.start_music();
        }
        ui::show_playing();
        schedule_frame(game.clone());
    }

    fn stop_game(game: &Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            g.page = PageState::Menu;
            sim::pointer_up(&mut g.state);
            g.audio.stop_music();
            cancel_pending_frame(&mut g);
        }
        ui::show_menu();
        log::info!("Back to menu");
    }

    fn toggle_mute(game: &Rc<RefCell<Game>>) {
        let mut g = game.borrow_mut();
        let muted = g.settings.toggle_mute();
        g.settings.save();
        let settings = g.settings.clone();
        g.audio.apply_settings(&settings);
        ui::set_mute_label(muted);
    }

    fn cancel_pending_frame(g: &mut Game) {
        if let Some(handle) = g.raf_handle.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(handle);
            }
        }
    }

    fn schedule_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let cb_game = game.clone();
        let closure = Closure::once(move |time: f64| {
            game_loop(cb_game, time);
        });
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(handle) => game.borrow_mut().raf_handle = Some(handle),
            Err(_) => log::warn!("requestAnimationFrame failed"),
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let keep_running = {
            let mut g = game.borrow_mut();
            g.raf_handle = None;
            if g.page != PageState::Playing {
                return;
            }

            // Delta from rAF timestamps, capped so a backgrounded tab does
            // not dump one giant step on the sim when it wakes up
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) as f32).min(100.0)
            } else {
                16.0
            };
            g.last_time = time;

            // The sim only advances on frames that can also draw; without
            // the canvas and its context this frame is a no-op and the
            // next one retries
            let surface = canvas().and_then(|canvas| {
                let ctx = context_2d(&canvas)?;
                Some((canvas, ctx))
            });

            if let Some((canvas, ctx)) = surface {
                let view = Viewport::new(canvas.width() as f32, canvas.height() as f32);

                sim::tick(&mut g.state, view, dt);

                for event in g.state.take_events() {
                    match event {
                        GameEvent::ScoreChanged { score } => ui::set_score(score),
                        GameEvent::Matched { pos, color } => {
                            g.audio.play(SoundEffect::Thud);
                            g.audio.play(SoundEffect::Pop);
                            g.confetti.burst(pos, color);
                        }
                        GameEvent::Spawned => g.audio.play(SoundEffect::Falling),
                        GameEvent::GameOver { score } => {
                            g.audio.stop_music();
                            g.audio.play(SoundEffect::GameOver);
                            g.page = PageState::GameOver;
                            ui::show_game_over(score);
                            log::info!("Game over at score {}", score);
                        }
                    }
                }

                g.audio.music_tick();
                g.confetti.tick(dt);
                render::draw_frame(&ctx, &g.state, &g.confetti, view);
            } else {
                log::debug!("Canvas or context unavailable, skipping frame");
            }

            g.page == PageState::Playing
        };

        if keep_running {
            schedule_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Sock Pair Panic (native) starting...");
    log::info!("The playable build targets wasm, serve it with `trunk serve`");

    headless_session();
}

/// Run one unattended session to sanity-check the simulation.
#[cfg(not(target_arch = "wasm32"))]
fn headless_session() {
    use sock_pair_panic::sim::{GameState, Viewport, tick};

    let mut state = GameState::new(2024);
    let view = Viewport::new(800.0, 600.0);
    let mut frames = 0u32;
    while state.phase == sock_pair_panic::GamePhase::Playing && frames < 36_000 {
        tick(&mut state, view, 16.7);
        state.take_events();
        frames += 1;
    }
    log::info!(
        "Headless session ended after {} frames with {} socks piled, score {}",
        frames,
        state.socks.len(),
        state.score
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
