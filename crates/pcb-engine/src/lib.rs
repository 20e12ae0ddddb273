pub mod api;
pub mod core;
pub mod components;
pub mod geometry;
pub mod render;

// Re-export key types at crate root for convenience
pub use api::config::BoardConfig;
pub use crate::core::driver::{Animator, pulse_at};
pub use crate::core::rng::{RandomSource, Rng};
pub use crate::core::scene::Scene;
pub use components::wisp::{Wisp, WispState, WispStyle, WispTuning};
pub use geometry::generator::PathGenerator;
pub use geometry::grid::{layout_origin_nodes, Bounds, Direction, GridPoint, OriginNode, Viewport};
pub use geometry::path::{Path, Segment};
pub use render::surface::{Dot, Rgba, Stroke, Surface};
pub use render::traces::{bake_traces, TraceLayer, TraceStyle};
