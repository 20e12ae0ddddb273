use pcb_engine::{Animator, BoardConfig, Rng, Viewport};
use wasm_bindgen::JsValue;
use web_sys::{Document, HtmlCanvasElement, Window};

use crate::canvas::{bake_offscreen, CanvasSurface};

/// Binds an [`Animator`] to the page canvas.
///
/// `lib.rs` keeps one runner in a `thread_local!` and forwards the resize
/// listener and animation-frame callback into it.
pub struct BackgroundRunner {
    animator: Animator<HtmlCanvasElement>,
    rng: Rng,
    window: Window,
    document: Document,
    canvas: HtmlCanvasElement,
    surface: CanvasSurface,
}

impl BackgroundRunner {
    pub fn new(window: Window, document: Document, canvas: HtmlCanvasElement, seed: u64) -> Result<Self, JsValue> {
        let surface = CanvasSurface::new(&canvas)?;
        Ok(Self {
            animator: Animator::new(BoardConfig::default()),
            rng: Rng::new(seed),
            window,
            document,
            canvas,
            surface,
        })
    }

    /// Current window size in CSS pixels.
    fn viewport(&self) -> Result<Viewport, JsValue> {
        let width = self.window.inner_width()?.as_f64().ok_or("innerWidth is not a number")?;
        let height = self.window.inner_height()?.as_f64().ok_or("innerHeight is not a number")?;
        Ok(Viewport::new(width as f32, height as f32))
    }

    /// Match the canvas to the window and regenerate everything.
    pub fn resize(&mut self) -> Result<(), JsValue> {
        let viewport = self.viewport()?;
        self.canvas.set_width(viewport.width as u32);
        self.canvas.set_height(viewport.height as u32);
        self.surface.set_size(viewport);

        let document = &self.document;
        self.animator.resize(viewport, &mut self.rng, |paths, viewport, style| {
            match bake_offscreen(document, paths, viewport, style) {
                Ok(layer) => Some(layer),
                Err(err) => {
                    log::warn!("offscreen canvas failed: {:?}", err);
                    None
                }
            }
        });
        Ok(())
    }

    /// Draw one frame. Returns whether to request another.
    pub fn tick(&mut self) -> bool {
        self.animator.frame(&mut self.surface, &mut self.rng)
    }

    /// Returns `true` if the loop was stopped and needs a frame scheduled.
    pub fn start(&mut self) -> bool {
        self.animator.start()
    }

    pub fn stop(&mut self) {
        self.animator.stop();
    }

    pub fn is_running(&self) -> bool {
        self.animator.is_running()
    }
}
