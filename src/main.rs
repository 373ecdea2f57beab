//! Castle Pop entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, TouchEvent};

    use castle_pop::audio::{AudioManager, SoundEffect, haptic_pulse};
    use castle_pop::consts::POP_HAPTIC_MS;
    use castle_pop::renderer::{build_scene, draw};
    use castle_pop::sim::{self, SceneBounds, SceneState};
    use castle_pop::Settings;
    use glam::Vec2;

    /// App instance holding all state
    struct App {
        state: SceneState,
        settings: Settings,
        audio: AudioManager,
        ctx: CanvasRenderingContext2d,
        canvas: HtmlCanvasElement,
        last_time: f64,
        /// Cleared on teardown; the frame loop stops re-registering
        active: bool,
    }

    impl App {
        /// One scheduler invocation: clamp the elapsed delta, advance the
        /// scene, repaint, refresh the HUD
        fn frame(&mut self, time: f64) {
            let elapsed = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            self.last_time = time;

            sim::tick(&mut self.state, sim::frame_delta(elapsed));
            self.render();
            self.update_hud();
        }

        fn render(&self) {
            let cmds = build_scene(&self.state, self.settings.effective_wobble());
            draw::execute(&self.ctx, &cmds);
        }

        /// Update HUD elements in the DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.state.score.to_string()));
            }
            if let Some(el) = document.get_element_by_id("toggle-btn") {
                let label = if self.state.is_running() { "Stop" } else { "Start" };
                el.set_text_content(Some(label));
            }
        }

        /// Pop attempt at scene coordinates
        fn tap(&mut self, x: f32, y: f32) {
            self.audio.resume();
            if sim::pop_at(&mut self.state, Vec2::new(x, y)).is_some() {
                let played = self.audio.play(SoundEffect::Pop);
                if !played && self.settings.haptics {
                    haptic_pulse(POP_HAPTIC_MS);
                }
            }
        }

        /// Adopt the canvas' current CSS size
        fn resize_to_canvas(&mut self) {
            let (w, h) = size_canvas(&self.canvas, &self.ctx);
            self.state.resize(SceneBounds::new(w, h));
        }
    }

    /// Size the backing store for the devicePixelRatio and scale the
    /// context so drawing happens in CSS pixel coordinates
    fn size_canvas(canvas: &HtmlCanvasElement, ctx: &CanvasRenderingContext2d) -> (f32, f32) {
        let window = web_sys::window().unwrap();
        let dpr = window.device_pixel_ratio();
        let css_w = canvas.client_width();
        let css_h = canvas.client_height();
        canvas.set_width((css_w as f64 * dpr) as u32);
        canvas.set_height((css_h as f64 * dpr) as u32);
        let _ = ctx.scale(dpr, dpr);
        (css_w as f32, css_h as f32)
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("failed to init logger");

        log::info!("Castle Pop starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
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

        let (width, height) = size_canvas(&canvas, &ctx);

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let mut state = SceneState::new(seed, SceneBounds::new(width, height));
        state.max_particles = settings.max_particles();

        let mut audio = AudioManager::new();
        audio.set_volume(settings.volume);
        audio.set_muted(!settings.sound);

        let app = Rc::new(RefCell::new(App {
            state,
            settings,
            audio,
            ctx,
            canvas: canvas.clone(),
            last_time: 0.0,
            active: true,
        }));

        setup_input_handlers(&canvas, app.clone());
        setup_controls(app.clone());
        setup_auto_stop(app.clone());
        setup_resize(app.clone());

        request_frame(app);

        log::info!("Castle Pop running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Touch taps
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let rect = canvas_clone.get_bounding_client_rect();
                    let x = touch.client_x() as f32 - rect.left() as f32;
                    let y = touch.client_y() as f32 - rect.top() as f32;
                    app.borrow_mut().tap(x, y);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse taps (desktop testing)
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                app.borrow_mut()
                    .tap(event.offset_x() as f32, event.offset_y() as f32);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_controls(app: Rc<RefCell<App>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        // Start/stop toggle
        if let Some(btn) = document.get_element_by_id("toggle-btn") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut a = app.borrow_mut();
                a.audio.resume();
                if a.state.is_running() {
                    a.state.stop();
                } else {
                    a.state.start();
                }
                a.audio.play(SoundEffect::Toggle);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Reset
        if let Some(btn) = document.get_element_by_id("reset-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().state.reset();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_stop(app: Rc<RefCell<App>>) {
        let document = web_sys::window().unwrap().document().unwrap();
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                let mut a = app.borrow_mut();
                if a.state.is_running() {
                    a.state.stop();
                    log::info!("auto-stopped (tab hidden)");
                }
            }
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            app.borrow_mut().resize_to_canvas();
        });
        let _ =
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| frame_loop(app, time));
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();

            // Clean stop: no further callback once torn down or the canvas
            // has left the document
            if !a.canvas.is_connected() {
                a.active = false;
            }
            if !a.active {
                log::info!("frame loop stopped");
                return;
            }

            a.frame(time);
        }
        request_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use castle_pop::audio::{AudioManager, SoundEffect, haptic_pulse};
    use castle_pop::consts::POP_HAPTIC_MS;
    use castle_pop::sim::{self, SceneBounds, SceneState};
    use castle_pop::Settings;

    env_logger::init();
    log::info!("Castle Pop (native) starting...");

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let settings = Settings::load();
    let mut state = SceneState::new(seed, SceneBounds::new(480.0, 800.0));
    state.max_particles = settings.max_particles();
    let audio = AudioManager::new();

    // Headless demo: run the minigame for ten simulated seconds, tapping
    // the oldest balloon once a second
    state.start();
    let dt = sim::frame_delta(1.0 / 60.0);
    for i in 0..600 {
        sim::tick(&mut state, dt);
        if i % 60 == 59 {
            if let Some(target) = state.balloons.first().map(|b| b.pos) {
                if let Some(hit) = sim::pop_at(&mut state, target) {
                    log::info!("popped balloon {} at ({:.0},{:.0})", hit.balloon_id, hit.pos.x, hit.pos.y);
                    if !audio.play(SoundEffect::Pop) && settings.haptics {
                        haptic_pulse(POP_HAPTIC_MS);
                    }
                }
            }
        }
    }
    state.stop();

    log::info!(
        "demo finished: score {}, {} balloons aloft, {} confetti in flight",
        state.score,
        state.balloon_count(),
        state.particles.len()
    );

    state.reset();
    log::info!("scene reset: score {}, {} balloons", state.score, state.balloon_count());
}
