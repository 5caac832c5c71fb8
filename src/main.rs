//! Turbo Rush entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{KeyboardEvent, TouchEvent};

    use turbo_rush::consts::SIM_DT;
    use turbo_rush::present::instance_bytes;
    use turbo_rush::sim::RunPhase;
    use turbo_rush::{BestScore, Driver, Tuning};

    // The three.js scene registers `window.turboRushRender(bytes, frameJson)`.
    // `bytes` is a view into wasm memory and must be copied if kept.
    #[wasm_bindgen(inline_js = "
        export function publish_frame(bytes, frame) {
            if (typeof window.turboRushRender === 'function') {
                window.turboRushRender(bytes, frame);
            }
        }
    ")]
    extern "C" {
        fn publish_frame(bytes: &[u8], frame: &str);
    }

    /// Browser-side wrapper around the driver
    struct Game {
        driver: Driver,
        last_time: f64,
    }

    impl Game {
        fn new(driver: Driver) -> Self {
            Self {
                driver,
                last_time: 0.0,
            }
        }

        fn start(&mut self) {
            let seed = js_sys::Date::now() as u64;
            self.driver.start_run(seed);
            set_class("menu", "hidden");
            set_class("game-over", "hidden");
            set_class("hud", "");
        }

        /// Advance simulation and hand the result to the renderer
        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            self.last_time = time;

            let before = self.driver.phase();
            let events = self.driver.advance(dt);

            let frame = self.driver.render_frame(&events);
            match serde_json::to_string(&frame) {
                Ok(json) => {
                    let instances = self.driver.instances();
                    publish_frame(instance_bytes(&instances), &json);
                }
                Err(e) => log::warn!("Failed to serialize frame: {}", e),
            }

            self.update_hud(before);
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, before: RunPhase) {
            let state = &self.driver.state;
            set_text("hud-score", &state.score.to_string());
            set_text("hud-balls", &state.collectibles.to_string());
            set_text("hud-speed", &format!("{:.0}", state.speed));
            set_text("hud-best", &self.driver.best_score().to_string());

            let phase = self.driver.phase();
            if phase == before {
                return;
            }
            match phase {
                RunPhase::Paused => set_class("pause-menu", ""),
                RunPhase::Running => set_class("pause-menu", "hidden"),
                RunPhase::GameOver => {
                    set_text("final-score", &state.score.to_string());
                    set_class("game-over", "");
                }
                RunPhase::Ready => set_class("menu", ""),
            }
        }
    }

    fn set_text(id: &str, text: &str) {
        let document = web_sys::window().and_then(|w| w.document());
        if let Some(el) = document.and_then(|d| d.get_element_by_id(id)) {
            el.set_text_content(Some(text));
        }
    }

    fn set_class(id: &str, class: &str) {
        let document = web_sys::window().and_then(|w| w.document());
        if let Some(el) = document.and_then(|d| d.get_element_by_id(id)) {
            let _ = el.set_attribute("class", class);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Turbo Rush starting...");

        let tuning = Tuning::load();
        let best = BestScore::load();
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(Driver::new(seed, tuning, best))));

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(game.clone());
        setup_buttons(game.clone());
        setup_auto_pause(game.clone());

        set_text("hud-best", &game.borrow().driver.best_score().to_string());
        set_class("loading", "hidden");

        request_animation_frame(game);

        log::info!("Turbo Rush running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let key = event.key();
                let idle = matches!(g.driver.phase(), RunPhase::Ready | RunPhase::GameOver);
                if idle && (key == "Enter" || key == " ") {
                    g.start();
                    return;
                }
                if g.driver.key_down(&key) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                if let Some(touch) = event.touches().get(0) {
                    game.borrow_mut().driver.touch_start(touch.client_x() as f32);
                }
            });
            let _ = window
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end (swipe)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                if let Some(touch) = event.changed_touches().get(0) {
                    game.borrow_mut().driver.touch_end(touch.client_x() as f32);
                }
            });
            let _ = window
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn on_click(id: &str, game: Rc<RefCell<Game>>, action: fn(&mut Game)) {
        let document = web_sys::window().and_then(|w| w.document());
        if let Some(btn) = document.and_then(|d| d.get_element_by_id(id)) {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                action(&mut game.borrow_mut());
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        on_click("start-btn", game.clone(), Game::start);
        on_click("restart-btn", game.clone(), Game::start);
        on_click("resume-btn", game.clone(), |g| g.driver.request_pause());
        on_click("exit-btn", game, |g| {
            g.driver.exit_to_menu();
            set_class("pause-menu", "hidden");
            set_class("game-over", "hidden");
            set_class("hud", "hidden");
            set_class("menu", "");
        });
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    game.borrow_mut().driver.auto_pause();
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().driver.auto_pause();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
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

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Turbo Rush (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - use the web build to play");

    let mut args = std::env::args().skip(1);
    let tuning = match args.next() {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => Tuning::from_json_or_default(&json),
            Err(e) => {
                log::warn!("Could not read tuning file {}: {}", path, e);
                Tuning::default()
            }
        },
        None => Tuning::default(),
    };
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(12345);

    run_demo(seed, tuning);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
use turbo_rush::{BestScore, Driver, Tuning};

/// Let the autopilot play one run at 60 fps for up to five minutes
#[cfg(not(target_arch = "wasm32"))]
fn run_demo(seed: u64, tuning: Tuning) {
    use turbo_rush::sim::{RunPhase, SimEvent};

    const FRAME_DT: f32 = 1.0 / 60.0;
    const MAX_FRAMES: u32 = 60 * 300;

    let mut driver = Driver::new(seed, tuning, BestScore::load());
    driver.toggle_autopilot();
    driver.start_run(seed);

    let mut pickups = 0u32;
    let mut frames = 0u32;
    while frames < MAX_FRAMES && driver.phase() == RunPhase::Running {
        let events = driver.advance(FRAME_DT);
        pickups += events
            .iter()
            .filter(|e| matches!(e, SimEvent::Collected { .. }))
            .count() as u32;
        frames += 1;
    }

    let state = &driver.state;
    println!(
        "seed {}: {:.1}s, phase {:?}, score {}, balls {} ({} pickup events), speed {:.1}",
        seed,
        frames as f32 * FRAME_DT,
        state.phase,
        state.score,
        state.collectibles,
        pickups,
        state.speed
    );
}
