//! CF Keeper entry point
//!
//! The browser build wires the DOM to the driver. The native build has no
//! renderer; it plays a few games on autopilot and logs how they went.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::fmt::Write as _;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlElement, MouseEvent, TouchEvent};

    use cf_keeper::clock::FrameTicket;
    use cf_keeper::consts::{HIGH_SCORE_KEY, TOAST_DURATION_SECS};
    use cf_keeper::highscores::LocalStorageStore;
    use cf_keeper::sim::{GameEvent, GamePhase, GameSession, PlayArea};
    use cf_keeper::{GameDriver, Settings};

    /// Game instance holding all state
    struct Game {
        driver: GameDriver<LocalStorageStore>,
        document: Document,
        /// Outstanding requestAnimationFrame id
        raf_handle: Option<i32>,
        /// Outstanding toast auto-clear setTimeout id
        toast_timeout: Option<i32>,
    }

    impl Game {
        fn element(&self, id: &str) -> Option<HtmlElement> {
            self.document
                .get_element_by_id(id)
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        }

        /// Match the simulation bounds to the arena element
        fn sync_play_area(&mut self) {
            if let Some(arena) = self.element("arena") {
                let area = PlayArea::new(arena.client_width() as f32, arena.client_height() as f32);
                self.driver.resize(area);
            }
        }

        /// Write the current view into the DOM
        fn render(&self) {
            let view = self.driver.session().view();

            if let Some(logo) = self.element("logo") {
                let _ = logo.style().set_property(
                    "transform",
                    &format!("translate({}px, {}px)", view.entity.pos.x, view.entity.pos.y),
                );
            }

            if let Some(el) = self.element("score") {
                el.set_text_content(Some(&view.score.to_string()));
            }
            if let Some(el) = self.element("high-score") {
                el.set_text_content(Some(&view.high_score.to_string()));
            }

            if let Some(el) = self.element("particles") {
                let mut html = String::new();
                for p in view.particles {
                    let _ = write!(
                        html,
                        r#"<div class="particle" style="transform: translate({}px, {}px) scale({}); opacity: {}">{}</div>"#,
                        p.pos.x,
                        p.pos.y,
                        p.scale(),
                        p.opacity(),
                        p.text
                    );
                }
                el.set_inner_html(&html);
            }

            if let Some(el) = self.element("toast") {
                el.set_text_content(view.toast);
                let _ = el.class_list().toggle_with_force("hidden", view.toast.is_none());
            }

            if let Some(el) = self.element("arena") {
                let _ = el
                    .style()
                    .set_property("--backdrop-period", &format!("{}s", view.backdrop_period_secs));
            }

            let screens = [
                ("start-screen", view.phase == GamePhase::Start),
                ("game-over-screen", view.phase == GamePhase::GameOver),
                ("logo", view.phase == GamePhase::Playing),
            ];
            for (id, visible) in screens {
                if let Some(el) = self.element(id) {
                    let _ = el.class_list().toggle_with_force("hidden", !visible);
                }
            }

            if let Some(el) = self.element("game-over-message") {
                el.set_text_content(view.game_over_message);
            }
        }

        /// Cancel any queued frame (external teardown)
        fn cancel_frame(&mut self) {
            if let (Some(handle), Some(window)) = (self.raf_handle.take(), web_sys::window()) {
                let _ = window.cancel_animation_frame(handle);
            }
        }
    }

    fn now_secs() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now() / 1000.0)
            .unwrap_or_else(|| js_sys::Date::now() / 1000.0)
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("CF Keeper starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document available");
            return;
        };

        let mut settings = Settings::load();
        let seed = settings.seed_or_insert(|| js_sys::Date::now() as u64);
        log::info!("Game initialized with seed: {}", seed);

        let mut session = GameSession::new(LocalStorageStore::new(HIGH_SCORE_KEY), seed);
        session.apply_settings(&settings);

        let game = Rc::new(RefCell::new(Game {
            driver: GameDriver::new(session),
            document,
            raf_handle: None,
            toast_timeout: None,
        }));

        {
            let mut g = game.borrow_mut();
            g.sync_play_area();
            g.render();
        }

        setup_input_handlers(game.clone());
        setup_buttons(game.clone());
        setup_teardown(game);

        log::info!("CF Keeper running!");
    }

    fn start_game(game: &Rc<RefCell<Game>>) {
        let ticket = {
            let mut g = game.borrow_mut();
            g.sync_play_area();
            let ticket = g.driver.start(now_secs());
            handle_events(game, &mut g);
            g.render();
            ticket
        };
        if let Some(ticket) = ticket {
            request_animation_frame(game.clone(), ticket);
        }
    }

    fn tap(game: &Rc<RefCell<Game>>) {
        let mut g = game.borrow_mut();
        if g.driver.tap(now_secs()) {
            handle_events(game, &mut g);
            g.render();
        }
    }

    /// React to simulation events: schedule toast clears
    fn handle_events(game: &Rc<RefCell<Game>>, g: &mut Game) {
        for event in g.driver.drain_events() {
            match event {
                GameEvent::Milestone { .. } => schedule_toast_clear(game, g),
                GameEvent::GameOver { score, new_record } => {
                    log::info!("Final score {} (record: {})", score, new_record);
                }
                _ => {}
            }
        }
    }

    /// Replace any pending toast clear with a fresh one
    fn schedule_toast_clear(game: &Rc<RefCell<Game>>, g: &mut Game) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Some(handle) = g.toast_timeout.take() {
            window.clear_timeout_with_handle(handle);
        }

        let game = game.clone();
        let closure = Closure::once(move || {
            let mut g = game.borrow_mut();
            g.toast_timeout = None;
            g.driver.poll_timers(now_secs());
            g.render();
        });
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            (TOAST_DURATION_SECS * 1000.0) as i32,
        ) {
            Ok(handle) => g.toast_timeout = Some(handle),
            Err(e) => log::warn!("Could not schedule toast clear: {:?}", e),
        }
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>, ticket: FrameTicket) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let g = game.clone();
        let closure = Closure::once(move |_time: f64| {
            game_loop(g, ticket);
        });
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(handle) => game.borrow_mut().raf_handle = Some(handle),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, ticket: FrameTicket) {
        let next = {
            let mut g = game.borrow_mut();
            g.raf_handle = None;
            g.sync_play_area();
            let next = g.driver.frame(ticket, now_secs());
            handle_events(&game, &mut g);
            g.render();
            next
        };

        if let Some(ticket) = next {
            request_animation_frame(game, ticket);
        }
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(logo) = game.borrow().element("logo") else {
            log::error!("Missing #logo element");
            return;
        };

        // Mouse
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                event.stop_propagation();
                tap(&game);
            });
            let _ = logo.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                event.stop_propagation();
                tap(&game);
            });
            let _ = logo.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        for id in ["start-button", "restart-button"] {
            let Some(button) = game.borrow().element(id) else {
                log::warn!("Missing #{} element", id);
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                start_game(&game);
            });
            let _ = button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Stop the loop when the page goes away
    fn setup_teardown(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut g = game.borrow_mut();
            g.driver.stop(now_secs());
            g.cancel_frame();
            if let (Some(handle), Some(window)) = (g.toast_timeout.take(), web_sys::window()) {
                window.clear_timeout_with_handle(handle);
            }
            handle_events(&game, &mut g);
            // Shown again if the page comes back from the back/forward cache
            g.render();
            log::info!("Stopped (page hidden)");
        });
        let _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("CF Keeper (native) starting...");
    log::info!("Native mode has no renderer - run with `trunk serve` for the web version");

    autopilot::run(5);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless games through the real driver, tapping whenever the logo sinks
/// into the lower half. The chance of a slip grows with the score.
#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use cf_keeper::sim::{GameEvent, GameSession, PlayArea};
    use cf_keeper::{GameDriver, MemoryStore, Settings};

    const FRAME_SECS: f64 = 1.0 / 60.0;

    pub fn run(games: u32) {
        let mut settings = Settings::load();
        let seed = settings.seed_or_insert(|| 0x5eed);
        let mut session = GameSession::new(MemoryStore::new(), seed);
        session.apply_settings(&settings);

        let mut driver = GameDriver::new(session);
        driver.resize(PlayArea::new(800.0, 600.0));
        let mut reflexes = Pcg32::seed_from_u64(seed.wrapping_add(1));
        let mut now = 0.0;

        for game in 1..=games {
            let Some(mut ticket) = driver.start(now) else {
                log::warn!("Game {} did not start", game);
                continue;
            };

            // One slip and the bot stops reacting for the rest of the game
            let mut asleep = false;
            loop {
                now += FRAME_SECS;
                let view = driver.session().view();
                let sinking = view.entity.vel.y > 0.0 && view.entity.pos.y > 300.0;
                let slip = 0.02 + view.score as f64 * 0.004;
                if sinking && !asleep {
                    if reflexes.random_bool(slip.min(1.0)) {
                        asleep = true;
                    } else {
                        driver.tap(now);
                    }
                }

                match driver.frame(ticket, now) {
                    Some(next) => ticket = next,
                    None => break,
                }
            }

            for event in driver.drain_events() {
                match event {
                    GameEvent::Milestone { score, message, .. } => {
                        log::info!("  [{}] {}", score, message)
                    }
                    GameEvent::GameOver { score, new_record } => log::info!(
                        "Game {}: {} points{}",
                        game,
                        score,
                        if new_record { " (new record)" } else { "" }
                    ),
                    _ => {}
                }
            }
            if let Some(msg) = driver.session().game_over_message() {
                log::info!("  {}", msg);
            }

            // Let any toast expire between games
            now += 5.0;
            driver.poll_timers(now);
        }

        log::info!("Best score: {}", driver.session().high_score());
    }
}
