use std::f64::consts::TAU;
use std::rc::Rc;

use glam::Vec2;
use pcb_engine::{bake_traces, Dot, Path, Stroke, Surface, TraceStyle, Viewport};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

/// `Surface` over a 2D canvas context. Layers are offscreen canvases.
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasSurface {
    /// Wrap `canvas`, which must support a "2d" context.
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or("2d context not supported")?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self {
            ctx,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
        })
    }

    /// Track the canvas size after it was changed.
    pub fn set_size(&mut self, viewport: Viewport) {
        self.width = viewport.width as f64;
        self.height = viewport.height as f64;
    }
}

impl Surface for CanvasSurface {
    type Layer = HtmlCanvasElement;

    fn clear(&mut self) {
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
    }

    fn composite(&mut self, layer: &HtmlCanvasElement) {
        let _ = self.ctx.draw_image_with_html_canvas_element(layer, 0.0, 0.0);
    }

    fn stroke_polyline(&mut self, points: &[Vec2], stroke: &Stroke) {
        let [first, rest @ ..] = points else {
            return;
        };
        if rest.is_empty() {
            return;
        }
        self.ctx.set_stroke_style_str(&stroke.color.to_css());
        self.ctx.set_line_width(stroke.width as f64);
        self.ctx.set_line_join("round");
        self.ctx.set_line_cap("round");
        self.ctx.begin_path();
        self.ctx.move_to(first.x as f64, first.y as f64);
        for p in rest {
            self.ctx.line_to(p.x as f64, p.y as f64);
        }
        self.ctx.stroke();
    }

    fn fill_dot(&mut self, dot: &Dot) {
        let css = dot.color.to_css();
        if dot.glow > 0.0 {
            self.ctx.set_shadow_blur(dot.glow as f64);
            self.ctx.set_shadow_color(&css);
        }
        self.ctx.set_fill_style_str(&css);
        self.ctx.begin_path();
        let _ = self.ctx.arc(dot.center.x as f64, dot.center.y as f64, dot.radius as f64, 0.0, TAU);
        self.ctx.fill();
        if dot.glow > 0.0 {
            self.ctx.set_shadow_blur(0.0);
        }
    }
}

/// Create an offscreen canvas of `viewport` size and bake every trace into it.
pub fn bake_offscreen(
    document: &Document,
    paths: &[Rc<Path>],
    viewport: Viewport,
    style: &TraceStyle,
) -> Result<HtmlCanvasElement, JsValue> {
    let canvas = document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()?;
    canvas.set_width(viewport.width as u32);
    canvas.set_height(viewport.height as u32);

    let mut surface = CanvasSurface::new(&canvas)?;
    bake_traces(&mut surface, paths, style);
    Ok(canvas)
}
