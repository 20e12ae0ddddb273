//! Static trace layer: every trace drawn once per population.

use std::rc::Rc;

use glam::Vec2;

use super::surface::{Dot, Rgba, Stroke, Surface};
use crate::geometry::grid::Viewport;
use crate::geometry::path::Path;

/// How baked traces look.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceStyle {
    pub stroke: Stroke,
    /// Pad drawn at both ends of each trace.
    pub pad_radius: f32,
    pub pad_color: Rgba,
}

/// Draw every trace with a pad at each end. Called once per bake; the
/// per-frame loop only composites the result.
pub fn bake_traces<S: Surface + ?Sized>(surface: &mut S, paths: &[Rc<Path>], style: &TraceStyle) {
    for path in paths {
        let points = path.polyline();
        surface.stroke_polyline(&points, &style.stroke);

        let ends = match points.as_slice() {
            [] => Vec::new(),
            [only] => vec![*only],
            [first, .., last] => vec![*first, *last],
        };
        for center in ends {
            draw_pad(surface, center, style);
        }
    }
}

fn draw_pad<S: Surface + ?Sized>(surface: &mut S, center: Vec2, style: &TraceStyle) {
    surface.fill_dot(&Dot {
        center,
        radius: style.pad_radius,
        color: style.pad_color,
        glow: 0.0,
    });
}

/// The owned offscreen buffer holding baked traces.
///
/// Replaced wholesale on every bake; never drawn into after creation.
#[derive(Debug)]
pub struct TraceLayer<L> {
    buffer: L,
    viewport: Viewport,
    generation: u64,
}

impl<L> TraceLayer<L> {
    pub fn new(buffer: L, viewport: Viewport, generation: u64) -> Self {
        Self {
            buffer,
            viewport,
            generation,
        }
    }

    pub fn buffer(&self) -> &L {
        &self.buffer
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Bake counter at the time this layer was created.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
