use crate::components::wisp::{WispStyle, WispTuning};
use crate::geometry::generator::PathGenerator;
use crate::geometry::grid::Viewport;
use crate::render::surface::{Rgba, Stroke};
use crate::render::traces::TraceStyle;

/// Tunables for the board. The web bridge uses the defaults as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardConfig {
    /// Spacing between trace vertices in CSS pixels (default: 40).
    pub grid_pitch: u32,
    /// Trace stroke color and opacity.
    pub trace_color: Rgba,
    pub trace_width: f32,
    /// Radius of the pads at each trace end.
    pub pad_radius: f32,
    pub pad_color: Rgba,
    /// Wisp fill color.
    pub wisp_color: Rgba,
    pub wisp_radius: f32,
    pub wisp_finished_radius: f32,
    pub wisp_glow: f32,
    pub waiting_radius: f32,
    pub waiting_alpha: f32,
    /// Mean wisp travel per frame in pixels (default: 1.6).
    pub base_speed: f32,
    pub speed_spread: f32,
    pub max_delay_frames: u32,
    /// Frames a wisp rests at the trace end (default: 90).
    pub hold_frames: u32,
    pub turn_chance: f32,
    pub min_steps: u32,
    pub max_steps: u32,
    /// Viewport area, in px², that earns one trace.
    pub area_per_path: f32,
    /// Trace count floor for non-empty viewports.
    pub min_paths: usize,
    pub wisps_per_path: f32,
    /// Origin nodes as fractions of the viewport.
    pub node_placements: Vec<[f32; 2]>,
    pub node_color: Rgba,
    pub node_radius: f32,
    pub node_glow: f32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            grid_pitch: 40,
            trace_color: Rgba::new(56, 189, 148, 0.16),
            trace_width: 1.5,
            pad_radius: 2.5,
            pad_color: Rgba::new(56, 189, 148, 0.35),
            wisp_color: Rgba::opaque(124, 255, 203),
            wisp_radius: 2.0,
            wisp_finished_radius: 3.5,
            wisp_glow: 12.0,
            waiting_radius: 2.5,
            waiting_alpha: 0.35,
            base_speed: 1.6,
            speed_spread: 0.6,
            max_delay_frames: 240,
            hold_frames: 90,
            turn_chance: 0.28,
            min_steps: 5,
            max_steps: 14,
            area_per_path: 16_000.0,
            min_paths: 24,
            wisps_per_path: 0.6,
            node_placements: vec![
                [0.12, 0.22],
                [0.86, 0.18],
                [0.50, 0.48],
                [0.20, 0.80],
                [0.78, 0.76],
                [0.36, 0.34],
            ],
            node_color: Rgba::opaque(124, 255, 203),
            node_radius: 4.0,
            node_glow: 16.0,
        }
    }
}

impl BoardConfig {
    pub fn path_generator(&self) -> PathGenerator {
        PathGenerator::new()
            .with_pitch(self.grid_pitch)
            .with_steps(self.min_steps, self.max_steps)
            .with_turn_chance(self.turn_chance)
    }

    pub fn wisp_tuning(&self) -> WispTuning {
        WispTuning {
            base_speed: self.base_speed,
            speed_spread: self.speed_spread,
            max_delay_frames: self.max_delay_frames,
            hold_frames: self.hold_frames,
        }
    }

    pub fn wisp_style(&self) -> WispStyle {
        WispStyle {
            color: self.wisp_color,
            radius: self.wisp_radius,
            finished_radius: self.wisp_finished_radius,
            glow: self.wisp_glow,
            waiting_radius: self.waiting_radius,
            waiting_alpha: self.waiting_alpha,
        }
    }

    pub fn trace_style(&self) -> TraceStyle {
        TraceStyle {
            stroke: Stroke {
                color: self.trace_color,
                width: self.trace_width,
            },
            pad_radius: self.pad_radius,
            pad_color: self.pad_color,
        }
    }

    /// Trace count for a viewport: proportional to area, floored at
    /// `min_paths`. Empty viewports get none.
    pub fn path_count(&self, viewport: Viewport) -> usize {
        if viewport.is_empty() {
            return 0;
        }
        let by_area = (viewport.area() / self.area_per_path.max(1.0)).round() as usize;
        by_area.max(self.min_paths)
    }

    /// Wisp count for a trace count; at least one while any trace exists.
    pub fn wisp_count(&self, paths: usize) -> usize {
        if paths == 0 {
            return 0;
        }
        ((paths as f32 * self.wisps_per_path).round() as usize).max(1)
    }
}
