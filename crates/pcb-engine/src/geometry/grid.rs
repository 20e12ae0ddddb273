//! Grid coordinates, viewport bounds and origin-node placement.

use glam::Vec2;

/// A pixel coordinate snapped to the grid pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPoint {
    pub x: i32,
    pub y: i32,
}

impl GridPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Snap a free position to the nearest multiple of `pitch` on both axes.
    pub fn snap(pos: Vec2, pitch: u32) -> Self {
        let p = pitch.max(1) as f32;
        Self {
            x: ((pos.x / p).round() * p) as i32,
            y: ((pos.y / p).round() * p) as i32,
        }
    }

    /// The neighbour one `pitch` away in `dir`.
    pub fn step(self, dir: Direction, pitch: u32) -> Self {
        let (dx, dy) = dir.delta();
        let p = pitch as i32;
        Self {
            x: self.x + dx * p,
            y: self.y + dy * p,
        }
    }

    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x as f32, self.y as f32)
    }
}

/// Drawable area in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> f32 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.area() <= 0.0
    }

    /// Integer bounds a generated point must stay within.
    pub fn bounds(&self) -> Bounds {
        Bounds {
            width: self.width.max(0.0).floor() as i32,
            height: self.height.max(0.0).floor() as i32,
        }
    }
}

/// Closed rectangle [0, width] x [0, height].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, p: GridPoint) -> bool {
        p.x >= 0 && p.x <= self.width && p.y >= 0 && p.y <= self.height
    }
}

/// Cardinal walk direction in screen space (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    East,
    South,
    West,
    North,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::East, Self::South, Self::West, Self::North];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
            Self::North => (0, -1),
        }
    }

    /// Quarter turn clockwise on screen.
    pub fn turn_right(self) -> Self {
        match self {
            Self::East => Self::South,
            Self::South => Self::West,
            Self::West => Self::North,
            Self::North => Self::East,
        }
    }

    /// Quarter turn counter-clockwise on screen.
    pub fn turn_left(self) -> Self {
        match self {
            Self::East => Self::North,
            Self::North => Self::West,
            Self::West => Self::South,
            Self::South => Self::East,
        }
    }
}

/// Anchor point traces start from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OriginNode {
    pub index: usize,
    pub point: GridPoint,
}

/// Place one node per fractional placement, scaled to the viewport and
/// snapped to the grid. Nodes never land outside the viewport bounds.
pub fn layout_origin_nodes(placements: &[[f32; 2]], viewport: Viewport, pitch: u32) -> Vec<OriginNode> {
    let bounds = viewport.bounds();
    let p = pitch.max(1) as i32;
    // Largest on-grid coordinate still inside the bounds.
    let max_x = bounds.width / p * p;
    let max_y = bounds.height / p * p;

    placements
        .iter()
        .enumerate()
        .map(|(index, frac)| {
            let raw = Vec2::new(frac[0] * viewport.width, frac[1] * viewport.height);
            let snapped = GridPoint::snap(raw, pitch);
            OriginNode {
                index,
                point: GridPoint::new(snapped.x.clamp(0, max_x), snapped.y.clamp(0, max_y)),
            }
        })
        .collect()
}
