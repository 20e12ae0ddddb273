use std::rc::Rc;

use crate::api::config::BoardConfig;
use crate::components::wisp::{Wisp, WispStyle};
use crate::core::rng::RandomSource;
use crate::geometry::grid::{layout_origin_nodes, OriginNode, Viewport};
use crate::geometry::path::Path;
use crate::render::surface::{Dot, Surface};

/// Everything generated for one viewport: origin nodes, traces and the wisps
/// riding them. Rebuilt from scratch on every resize.
#[derive(Debug, Default)]
pub struct Scene {
    viewport: Viewport,
    nodes: Vec<OriginNode>,
    paths: Vec<Rc<Path>>,
    wisps: Vec<Wisp>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a full population for `viewport`.
    pub fn populate<R: RandomSource + ?Sized>(viewport: Viewport, config: &BoardConfig, rng: &mut R) -> Self {
        if viewport.is_empty() {
            return Self {
                viewport,
                ..Self::default()
            };
        }

        let nodes = layout_origin_nodes(&config.node_placements, viewport, config.grid_pitch);
        if nodes.is_empty() {
            return Self {
                viewport,
                ..Self::default()
            };
        }

        let generator = config.path_generator();
        let bounds = viewport.bounds();
        let path_count = config.path_count(viewport);
        let paths: Vec<Rc<Path>> = (0..path_count)
            .map(|_| {
                let node = &nodes[rng.below(nodes.len() as u32) as usize];
                Rc::new(generator.generate(node, bounds, rng))
            })
            .collect();

        let tuning = config.wisp_tuning();
        let wisps: Vec<Wisp> = (0..config.wisp_count(paths.len()))
            .map(|_| {
                let path = &paths[rng.below(paths.len() as u32) as usize];
                Wisp::new(Rc::clone(path), tuning, rng)
            })
            .collect();

        log::debug!(
            "scene populated: {}x{}, {} nodes, {} traces, {} wisps",
            viewport.width,
            viewport.height,
            nodes.len(),
            paths.len(),
            wisps.len()
        );

        Self {
            viewport,
            nodes,
            paths,
            wisps,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn nodes(&self) -> &[OriginNode] {
        &self.nodes
    }

    pub fn paths(&self) -> &[Rc<Path>] {
        &self.paths
    }

    pub fn wisps(&self) -> &[Wisp] {
        &self.wisps
    }

    /// Draw every origin node with its glow.
    pub fn draw_nodes<S: Surface + ?Sized>(&self, surface: &mut S, config: &BoardConfig) {
        for node in &self.nodes {
            surface.fill_dot(&Dot {
                center: node.point.to_vec2(),
                radius: config.node_radius,
                color: config.node_color,
                glow: config.node_glow,
            });
        }
    }

    /// Update then draw each wisp in turn.
    pub fn animate_wisps<S, R>(&mut self, surface: &mut S, rng: &mut R, style: &WispStyle, pulse: f32)
    where
        S: Surface + ?Sized,
        R: RandomSource + ?Sized,
    {
        for wisp in &mut self.wisps {
            wisp.update(rng);
            wisp.draw(surface, style, pulse);
        }
    }
}
