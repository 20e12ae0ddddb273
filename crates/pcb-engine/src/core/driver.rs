use std::rc::Rc;

use crate::api::config::BoardConfig;
use crate::core::rng::RandomSource;
use crate::core::scene::Scene;
use crate::geometry::grid::Viewport;
use crate::geometry::path::Path;
use crate::render::surface::Surface;
use crate::render::traces::{TraceLayer, TraceStyle};

/// Radians of pulse phase advanced per frame for waiting markers.
const PULSE_RATE: f32 = 0.06;

/// Owns the scene and the baked trace layer, and runs one frame at a time.
///
/// The host calls [`Animator::frame`] from its display-refresh callback and
/// reschedules only while it returns `true`. `L` is the backend's offscreen
/// buffer type.
pub struct Animator<L> {
    config: BoardConfig,
    scene: Scene,
    layer: Option<TraceLayer<L>>,
    running: bool,
    frame: u64,
    generation: u64,
}

impl<L> Animator<L> {
    pub fn new(config: BoardConfig) -> Self {
        Self {
            config,
            scene: Scene::new(),
            layer: None,
            running: false,
            frame: 0,
            generation: 0,
        }
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn layer(&self) -> Option<&TraceLayer<L>> {
        self.layer.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Frames drawn since creation.
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Number of trace bakes so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Mark the loop as running. Returns `true` if it was stopped, in which
    /// case the host must schedule a frame.
    pub fn start(&mut self) -> bool {
        let was_stopped = !self.running;
        self.running = true;
        if was_stopped {
            log::info!("animator started");
        }
        was_stopped
    }

    /// Stop the loop; the next `frame` call draws nothing and asks not to be
    /// rescheduled.
    pub fn stop(&mut self) {
        if self.running {
            log::info!("animator stopped after {} frames", self.frame);
        }
        self.running = false;
    }

    /// Replace the whole population for `viewport` and rebake the trace layer.
    ///
    /// `bake` receives the new traces and returns the offscreen buffer they
    /// were drawn into, or `None` if the backend could not create one. The
    /// previous scene and layer are dropped either way.
    pub fn resize<R, F>(&mut self, viewport: Viewport, rng: &mut R, bake: F)
    where
        R: RandomSource + ?Sized,
        F: FnOnce(&[Rc<Path>], Viewport, &TraceStyle) -> Option<L>,
    {
        self.layer = None;
        self.scene = Scene::populate(viewport, &self.config, rng);
        self.generation += 1;

        let style = self.config.trace_style();
        self.layer = bake(self.scene.paths(), viewport, &style)
            .map(|buffer| TraceLayer::new(buffer, viewport, self.generation));
        if self.layer.is_none() {
            log::warn!("trace layer unavailable for {}x{}", viewport.width, viewport.height);
        }
    }

    /// Draw one frame: clear, composite traces, nodes, then update and draw
    /// every wisp. Returns whether the host should schedule another frame.
    pub fn frame<S, R>(&mut self, surface: &mut S, rng: &mut R) -> bool
    where
        S: Surface<Layer = L> + ?Sized,
        R: RandomSource + ?Sized,
    {
        if !self.running {
            return false;
        }

        surface.clear();
        if let Some(layer) = &self.layer {
            surface.composite(layer.buffer());
        }
        self.scene.draw_nodes(surface, &self.config);

        let style = self.config.wisp_style();
        let pulse = pulse_at(self.frame);
        self.scene.animate_wisps(surface, rng, &style, pulse);

        self.frame += 1;
        true
    }
}

/// Waiting-marker intensity for a frame, oscillating in [0, 1].
pub fn pulse_at(frame: u64) -> f32 {
    let phase = (frame % 100_000) as f32 * PULSE_RATE;
    0.5 + 0.5 * phase.sin()
}
