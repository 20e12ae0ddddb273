//! Drawing contract between the engine and a concrete backend.
//!
//! The engine never touches the DOM. Everything it paints goes through
//! [`Surface`], which the web bridge implements on top of a 2D canvas
//! context. Tests use a recording implementation instead.

use glam::Vec2;

/// Straight-alpha sRGB color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Opacity in [0, 1].
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 1.0)
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// CSS color string, e.g. `rgba(0, 255, 170, 0.5)`.
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Line style. Joins and caps are always round.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Rgba,
    pub width: f32,
}

/// A filled circle, optionally with a soft glow around it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dot {
    pub center: Vec2,
    pub radius: f32,
    pub color: Rgba,
    /// Blur radius of the glow; 0 disables it.
    pub glow: f32,
}

/// A 2D drawing target.
///
/// `Layer` is a pre-rendered image the surface can composite in one call;
/// for a canvas backend this is an offscreen canvas.
pub trait Surface {
    type Layer;

    /// Erase everything to transparent.
    fn clear(&mut self);

    /// Copy a pre-rendered layer over the surface at the origin.
    fn composite(&mut self, layer: &Self::Layer);

    /// Stroke a connected polyline. Fewer than two points draws nothing.
    fn stroke_polyline(&mut self, points: &[Vec2], stroke: &Stroke);

    fn fill_dot(&mut self, dot: &Dot);
}

/// A surface that records every call, for tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingSurface {
    pub calls: Vec<DrawCall>,
}

#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum DrawCall {
    Clear,
    Composite(u32),
    Polyline(Vec<Vec2>, Stroke),
    Dot(Dot),
}

#[cfg(test)]
impl RecordingSurface {
    pub(crate) fn dots(&self) -> Vec<Dot> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Dot(d) => Some(*d),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn polylines(&self) -> Vec<Vec<Vec2>> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Polyline(points, _) => Some(points.clone()),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
impl Surface for RecordingSurface {
    type Layer = u32;

    fn clear(&mut self) {
        self.calls.push(DrawCall::Clear);
    }

    fn composite(&mut self, layer: &u32) {
        self.calls.push(DrawCall::Composite(*layer));
    }

    fn stroke_polyline(&mut self, points: &[Vec2], stroke: &Stroke) {
        if points.len() >= 2 {
            self.calls.push(DrawCall::Polyline(points.to_vec(), *stroke));
        }
    }

    fn fill_dot(&mut self, dot: &Dot) {
        self.calls.push(DrawCall::Dot(*dot));
    }
}
