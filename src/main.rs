//! Jump Invaders entry point
//!
//! On the web: finds the canvas, wires keyboard listeners and runs the
//! `requestAnimationFrame` loop. Natively: plays a short scripted demo
//! headlessly and logs what happened.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use jump_invaders::Game;
    use jump_invaders::audio::AudioManager;
    use jump_invaders::platform::map_key;
    use jump_invaders::renderer::CanvasSurface;
    use jump_invaders::settings::Settings;

    /// Everything one page needs between frames
    struct App {
        game: Game,
        surface: CanvasSurface,
        audio: AudioManager,
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialised".into());
        }

        log::info!("Jump Invaders starting...");

        let settings = Settings::load();
        log_settings(&settings);

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id(&settings.canvas_id)
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()
            .map_err(|_| JsValue::from_str("not a canvas"))?;

        let surface = CanvasSurface::new(&canvas)?;
        let audio = AudioManager::new(&settings);
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let game = Game::new(surface.field_size(), seed, settings);

        let app = Rc::new(RefCell::new(App {
            game,
            surface,
            audio,
        }));

        setup_input_handlers(&window, app.clone())?;
        request_animation_frame(app);

        log::info!("Jump Invaders running!");
        Ok(())
    }

    fn log_settings(settings: &Settings) {
        match settings.to_json() {
            Ok(json) => log::debug!("Settings: {}", json),
            Err(e) => log::warn!("Settings not printable: {}", e),
        }
    }

    fn setup_input_handlers(window: &web_sys::Window, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        // Key down
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = map_key(&event.key(), event.key_code()) {
                    // Keep arrows and space from scrolling the page
                    event.prevent_default();
                    app.borrow_mut().game.press(key);
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Key up
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = map_key(&event.key(), event.key_code()) {
                    event.prevent_default();
                    app.borrow_mut().game.release(key);
                }
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Window blur: key-up events are lost while unfocused
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app.borrow_mut().game.release_all();
                log::info!("Window lost focus, released keys");
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            log::error!("No window, game loop stopped");
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(app);
        });
        if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {:?}", e);
        }
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>) {
        {
            let mut guard = app.borrow_mut();
            let App {
                game,
                surface,
                audio,
            } = &mut *guard;
            game.frame(surface, audio);
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Jump Invaders (native) starting...");
    log::info!("Native mode runs a headless demo - serve the wasm build to play");

    demo::run(demo::FRAMES);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use jump_invaders::Game;
    use jump_invaders::audio::{AudioSink, SoundEffect};
    use jump_invaders::renderer::HeadlessSurface;
    use jump_invaders::settings::Settings;
    use jump_invaders::sim::Key;

    pub const FRAMES: u64 = 1_800;

    const FIELD: glam::Vec2 = glam::Vec2::new(310.0, 410.0);

    #[derive(Default)]
    struct CountingAudio {
        fire: usize,
    }

    impl AudioSink for CountingAudio {
        fn play(&mut self, effect: SoundEffect) {
            match effect {
                SoundEffect::Fire => self.fire += 1,
            }
        }
    }

    /// Held keys for a frame of the demo: sweep left and right, hop now and
    /// then, and tap fire every few frames
    fn scripted_keys(frame: u64) -> [(Key, bool); 4] {
        let heading_left = (frame / 120) % 2 == 0;
        [
            (Key::Left, heading_left),
            (Key::Right, !heading_left),
            (Key::Up, frame % 90 < 2),
            (Key::Fire, frame % 8 < 4),
        ]
    }

    pub fn run(frames: u64) {
        let settings = Settings::load();
        match settings.to_json() {
            Ok(json) => log::debug!("Settings: {}", json),
            Err(e) => log::warn!("Settings not printable: {}", e),
        }
        let seed = settings.seed.unwrap_or(0x1a_2b_3c);
        let mut game = Game::new(FIELD, seed, settings);
        let mut surface = HeadlessSurface::new();
        let mut audio = CountingAudio::default();

        for frame in 0..frames {
            for (key, down) in scripted_keys(frame) {
                game.input_mut().set(key, down);
            }
            game.frame(&mut surface, &mut audio);

            if game.world().player().is_none() {
                log::info!("Player down after {} frames", frame + 1);
                break;
            }
        }

        let world = game.world();
        log::info!(
            "Demo finished at frame {}: {} invaders left, tank active: {}, {} volleys, {} rects last frame",
            world.frame(),
            world.invader_count(),
            world.tank_active(),
            audio.fire,
            surface.rects.len()
        );
    }
}
