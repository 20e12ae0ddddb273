pub mod canvas;
pub mod runner;

use std::cell::{Cell, RefCell};

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlCanvasElement;

pub use canvas::CanvasSurface;
pub use runner::BackgroundRunner;

/// Id of the canvas element the host page provides.
pub const CANVAS_ID: &str = "pcb-bg";

thread_local! {
    static RUNNER: RefCell<Option<BackgroundRunner>> = RefCell::new(None);
    static FRAME: RefCell<Option<Closure<dyn FnMut()>>> = RefCell::new(None);
    // One animation-frame request in flight at most.
    static SCHEDULED: Cell<bool> = Cell::new(false);
}

fn with_runner<R>(f: impl FnOnce(&mut BackgroundRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| cell.borrow_mut().as_mut().map(f))
}

fn request_frame() -> Result<(), JsValue> {
    if SCHEDULED.with(Cell::get) {
        return Ok(());
    }
    let window = web_sys::window().ok_or("no window")?;
    FRAME.with(|cell| match cell.borrow().as_ref() {
        Some(callback) => {
            window.request_animation_frame(callback.as_ref().unchecked_ref())?;
            SCHEDULED.with(|s| s.set(true));
            Ok(())
        }
        None => Ok(()),
    })
}

/// Entry point. Finds the canvas, builds the first board and starts the loop.
/// A page without the canvas simply gets no background.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    let Some(canvas) = document
        .get_element_by_id(CANVAS_ID)
        .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
    else {
        log::info!("no #{} canvas; background disabled", CANVAS_ID);
        return Ok(());
    };

    let seed = (js_sys::Math::random() * (1u64 << 53) as f64) as u64;
    let mut runner = BackgroundRunner::new(window.clone(), document, canvas, seed)?;
    runner.resize()?;
    runner.start();
    RUNNER.with(|cell| *cell.borrow_mut() = Some(runner));

    let on_resize = Closure::wrap(Box::new(|| {
        if let Some(Err(err)) = with_runner(|r| r.resize()) {
            log::warn!("resize failed: {:?}", err);
        }
    }) as Box<dyn FnMut()>);
    window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
    on_resize.forget();

    let on_frame = Closure::wrap(Box::new(|| {
        SCHEDULED.with(|s| s.set(false));
        if with_runner(|r| r.tick()).unwrap_or(false) {
            if let Err(err) = request_frame() {
                log::warn!("requestAnimationFrame failed: {:?}", err);
            }
        }
    }) as Box<dyn FnMut()>);
    FRAME.with(|cell| *cell.borrow_mut() = Some(on_frame));
    request_frame()?;

    log::info!("pcb background: initialized");
    Ok(())
}

/// Pause the animation, e.g. when the visitor prefers reduced motion.
#[wasm_bindgen]
pub fn pcb_stop() {
    with_runner(|r| r.stop());
}

/// Resume a paused animation.
#[wasm_bindgen]
pub fn pcb_start() -> Result<(), JsValue> {
    if with_runner(|r| r.start()).unwrap_or(false) {
        request_frame()?;
    }
    Ok(())
}

/// Whether the animation loop is running.
#[wasm_bindgen]
pub fn pcb_is_running() -> bool {
    with_runner(|r| r.is_running()).unwrap_or(false)
}
