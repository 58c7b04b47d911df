//! Boomerang Platformer entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use boomerang_platformer::Settings;
    use boomerang_platformer::Tuning;
    use boomerang_platformer::consts::*;
    use boomerang_platformer::platform::{InputTracker, client_to_arena};
    use boomerang_platformer::renderer::CanvasRenderer;
    use boomerang_platformer::sim::{GameEvent, GamePhase, Session, tick};

    /// Game instance holding all state
    struct Game {
        state: Session,
        renderer: CanvasRenderer,
        input: InputTracker,
        settings: Settings,
        accumulator: f32,
        last_time: f64,
        last_lives: Option<u8>,
    }

    impl Game {
        fn new(state: Session, renderer: CanvasRenderer, settings: Settings) -> Self {
            Self {
                state,
                renderer,
                input: InputTracker::new(),
                settings,
                accumulator: 0.0,
                last_time: 0.0,
                last_lives: None,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            if self.input.take_new_game() {
                let seed = self.settings.session_seed(js_sys::Date::now() as u64);
                self.state.reseed(seed);
                log::info!("Started new game with seed: {}", seed);
            }

            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input.take_tick_input();
                tick(&mut self.state, &input);
                self.accumulator -= SIM_DT;
                substeps += 1;
            }
            // Drop the backlog instead of spiralling after a long stall
            if substeps == MAX_SUBSTEPS {
                self.accumulator = 0.0;
            }

            for event in self.state.drain_events() {
                self.handle_event(event);
            }
        }

        fn handle_event(&mut self, event: GameEvent) {
            match event {
                GameEvent::GameOver => {
                    if let Some(window) = web_sys::window() {
                        let _ = window.alert_with_message("Game Over! Restarting...");
                    }
                    // The alert blocks; don't replay the blocked time
                    self.accumulator = 0.0;
                    self.last_time = 0.0;
                    self.input.release_all();
                }
                GameEvent::LifeLost { remaining } => log::info!("Life lost, {} left", remaining),
                GameEvent::EnemyKilled { index } => log::debug!("Enemy {} killed", index),
                other => log::trace!("{:?}", other),
            }
        }

        fn render(&self) {
            self.renderer.render(&self.state.sprites());
            if self.state.phase == GamePhase::Paused {
                self.renderer.overlay("Paused");
            }
        }

        fn update_hud(&mut self) {
            let lives = self.state.lives();
            if self.last_lives == Some(lives) {
                return;
            }
            self.last_lives = Some(lives);
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            if let Some(el) = document.get_element_by_id("livesDisplay") {
                el.set_text_content(Some(&format!("Lives: {}", lives)));
            }
        }

        /// Pause from a focus-loss event, never unpause
        fn auto_pause(&mut self, reason: &str) {
            self.input.release_all();
            if self.settings.pause_on_blur && self.state.phase == GamePhase::Playing {
                self.input.request_pause();
                log::info!("Auto-paused ({})", reason);
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Boomerang Platformer starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document available");
            return;
        };

        let Some(canvas) = document
            .get_element_by_id("game")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No <canvas id=\"game\"> element");
            return;
        };

        let Some(renderer) = CanvasRenderer::new(&canvas) else {
            log::error!("Canvas has no 2D context");
            return;
        };

        let settings = Settings::load();
        // Write back so fields added since the last visit are stored with defaults
        settings.save();
        let seed = settings.session_seed(js_sys::Date::now() as u64);
        let state = match Session::new(seed, settings.layout, Tuning::default()) {
            Ok(state) => state,
            Err(e) => {
                log::error!("Cannot start session: {}", e);
                return;
            }
        };
        log::info!(
            "Game initialized with seed: {} (layout {})",
            seed,
            settings.layout.as_str()
        );

        let game = Rc::new(RefCell::new(Game::new(state, renderer, settings)));

        setup_input_handlers(&canvas, game.clone());
        setup_auto_pause(game.clone());

        request_animation_frame(game);

        log::info!("Boomerang Platformer running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().input.key_down(&event.key()) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().input.key_up(&event.key()) {
                    event.prevent_default();
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse click throws toward the pointer
        {
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = canvas_clone.get_bounding_client_rect();
                let target = client_to_arena(
                    Vec2::new(event.client_x() as f32, event.client_y() as f32),
                    Vec2::new(rect.left() as f32, rect.top() as f32),
                    Vec2::new(rect.width() as f32, rect.height() as f32),
                    Vec2::new(ARENA_WIDTH, ARENA_HEIGHT),
                );
                game.borrow_mut().input.click(target);
            });
            let _ = canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
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
                    game.borrow_mut().auto_pause("tab hidden");
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
                game.borrow_mut().auto_pause("window blur");
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
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
            g.update_hud();
        }

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
    log::info!("Boomerang Platformer (native) starting...");
    log::info!("Native mode runs a headless scripted session - serve the wasm build to play");

    // Usage: boomerang-platformer [seed] [ticks] [rooftops|ledges] [runs]
    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    let ticks = args.next().and_then(|s| s.parse().ok()).unwrap_or(1800);
    let layout = args.next().and_then(|s| s.parse().ok()).unwrap_or_default();
    let runs = args.next().and_then(|s| s.parse().ok()).unwrap_or(1);

    headless::run(seed, ticks, layout, runs);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use boomerang_platformer::Tuning;
    use boomerang_platformer::sim::{GameEvent, LayoutPreset, Session, TickInput, tick};

    /// Ticks between scripted throws
    const THROW_EVERY: u64 = 45;

    /// Scripted input: patrol back and forth, hop now and then, and throw at
    /// the nearest live enemy.
    fn scripted_input(state: &Session) -> TickInput {
        let t = state.time_ticks;
        let heading_right = (t / 240) % 2 == 0;
        let hand = state.player.hand();
        let throw_at = (t % THROW_EVERY == 0)
            .then(|| {
                state
                    .enemies
                    .iter()
                    .filter(|e| e.alive)
                    .map(|e| e.body.center())
                    .min_by(|a, b| a.distance_squared(hand).total_cmp(&b.distance_squared(hand)))
            })
            .flatten();

        TickInput {
            left: !heading_right,
            right: heading_right,
            jump: t % 120 == 60,
            throw_at,
            pause: false,
        }
    }

    /// Play `runs` sessions of `ticks` each, seeds `seed`, `seed + 1`, ...
    pub fn run(seed: u64, ticks: u64, layout: LayoutPreset, runs: u64) {
        let mut state = match Session::new(seed, layout, Tuning::default()) {
            Ok(state) => state,
            Err(e) => {
                log::error!("Cannot start session: {}", e);
                return;
            }
        };

        for run in 0..runs.max(1) {
            if run > 0 {
                // Reuse the session's collections for the next seed
                state.reseed(seed.wrapping_add(run));
                state.drain_events();
            }
            play(&mut state, ticks);
        }
    }

    fn play(state: &mut Session, ticks: u64) {
        log::info!(
            "Headless run: seed {}, {} ticks, layout {}",
            state.seed,
            ticks,
            state.layout.as_str()
        );

        let mut kills = 0usize;
        let mut resets = 0usize;
        for _ in 0..ticks {
            let input = scripted_input(state);
            tick(state, &input);
            for event in state.drain_events() {
                match event {
                    GameEvent::EnemyKilled { index } => {
                        kills += 1;
                        log::info!("t={} enemy {} killed", state.time_ticks, index);
                    }
                    GameEvent::LifeLost { remaining } => {
                        log::info!("t={} life lost, {} left", state.time_ticks, remaining);
                    }
                    GameEvent::SessionReset => resets += 1,
                    other => log::debug!("t={} {:?}", state.time_ticks, other),
                }
            }
        }

        let player = state.player.body.pos;
        println!(
            "seed {}: {} kills, {} resets, {} lives, {} enemies left, player at ({:.1}, {:.1})",
            state.seed,
            kills,
            resets,
            state.lives(),
            state.alive_enemies(),
            player.x,
            player.y
        );
        match serde_json::to_string(&state.snapshot()) {
            Ok(json) => log::debug!("final snapshot: {}", json),
            Err(e) => log::warn!("Failed to serialize snapshot: {}", e),
        }
    }
}
