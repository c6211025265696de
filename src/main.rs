//! Slime Jump entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, PointerEvent};

    use slime_jump::renderer::{CanvasSurface, DrawSurface, Viewport, load_sprite_sheet, replay};
    use slime_jump::{Game, GameError, Settings};

    /// Game plus the surface it draws on
    struct App {
        game: Game,
        surface: CanvasSurface,
    }

    pub async fn run() -> Result<(), GameError> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {}", e).into());
        }

        log::info!("Slime Jump starting...");

        let window = web_sys::window().ok_or_else(|| GameError::Context("no window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| GameError::Context("no document".into()))?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| GameError::MissingElement("canvas".into()))?
            .dyn_into()
            .map_err(|_| GameError::Context("#canvas is not a canvas".into()))?;

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let mut game = Game::new(seed, settings.clone());

        let sprite_sheet = game.start(load_sprite_sheet(&settings.sprite_sheet_url).await)?;
        let surface = CanvasSurface::new(canvas.clone(), sprite_sheet)?;
        let app = Rc::new(RefCell::new(App { game, surface }));

        setup_input_handlers(&canvas, app.clone());
        request_animation_frame(app);

        log::info!("Slime Jump running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Pointer down starts charging
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.prevent_default();
                app.borrow_mut().game.set_pointer_held(true);
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Any of these releases the jump
        for name in ["pointerup", "pointerleave", "pointercancel"] {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                app.borrow_mut().game.set_pointer_held(false);
            });
            let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut a = app.borrow_mut();
                match event.key().as_str() {
                    "d" | "D" => {
                        let on = a.game.toggle_debug_overlay();
                        a.game.settings.save();
                        log::info!("Debug overlay: {}", on);
                    }
                    "Escape" => a.game.stop(),
                    _ => {}
                }
            });
            if let Some(window) = web_sys::window() {
                let _ = window
                    .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            }
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();
            let viewport = Viewport::new(a.surface.width(), a.surface.height());
            let Some(commands) = a.game.frame(time, viewport) else {
                return;
            };
            replay(&commands, &mut a.surface);
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    match wasm_game::run().await {
        Ok(()) => {}
        // Game::start already reported it
        Err(slime_jump::GameError::SpriteSheet { .. }) => {}
        Err(e) => log::error!("Slime Jump failed to start: {}", e),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Slime Jump (native) starting...");
    log::info!("Native mode is a headless demo - serve the wasm build for the real game");

    run_headless_demo();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Charge for 1.5 s, release, and let the jump play out at 60 fps
#[cfg(not(target_arch = "wasm32"))]
fn run_headless_demo() {
    use slime_jump::renderer::Viewport;
    use slime_jump::sim::jump_distance;
    use slime_jump::{Game, Settings};

    const FRAME_MS: f64 = 1000.0 / 60.0;

    let mut game = Game::new(0x51_1E, Settings::default());
    if game.start(Ok(())).is_err() {
        return;
    }

    let viewport = Viewport::new(800.0, 600.0);
    let mut phase = game.state.phase;
    let mut peak_power = 0.0f32;
    let mut draw_calls = 0usize;

    for frame in 1..=180u32 {
        game.set_pointer_held(frame <= 90);
        let Some(commands) = game.frame(frame as f64 * FRAME_MS, viewport) else {
            break;
        };
        draw_calls += commands.len();
        peak_power = peak_power.max(game.state.slime.power);

        if game.state.phase != phase {
            log::info!(
                "frame {:>3}: {} -> {}",
                frame,
                phase.as_str(),
                game.state.phase.as_str()
            );
            phase = game.state.phase;
        }
    }

    log::info!(
        "Peak power {:.2}, jump distance {:.1} px, {} draw calls, final phase {}",
        peak_power,
        jump_distance(peak_power),
        draw_calls,
        game.state.phase.as_str()
    );
}
