//! Random-walk trace generation on the grid.

use crate::core::rng::RandomSource;

use super::grid::{Bounds, Direction, OriginNode};
use super::path::Path;

/// Grows axis-aligned traces out of origin nodes.
///
/// Each trace walks a random number of grid steps. At every step it may turn
/// a quarter left or right, never back on itself, and it stops as soon as the
/// next step would leave the bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct PathGenerator {
    pub pitch: u32,
    pub min_steps: u32,
    pub max_steps: u32,
    /// Probability of turning before each step.
    pub turn_chance: f32,
}

impl Default for PathGenerator {
    fn default() -> Self {
        Self {
            pitch: 40,
            min_steps: 5,
            max_steps: 14,
            turn_chance: 0.28,
        }
    }
}

impl PathGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    // -- Builder pattern --

    pub fn with_pitch(mut self, pitch: u32) -> Self {
        self.pitch = pitch;
        self
    }

    pub fn with_steps(mut self, min: u32, max: u32) -> Self {
        self.min_steps = min;
        self.max_steps = max.max(min);
        self
    }

    pub fn with_turn_chance(mut self, chance: f32) -> Self {
        self.turn_chance = chance;
        self
    }

    /// Walk a new trace from `origin`. The result always holds the origin point.
    pub fn generate<R: RandomSource + ?Sized>(&self, origin: &OriginNode, bounds: Bounds, rng: &mut R) -> Path {
        let steps = rng.range_inclusive(self.min_steps, self.max_steps);
        let mut dir = Direction::ALL[rng.below(Direction::ALL.len() as u32) as usize];

        let mut points = Vec::with_capacity(steps as usize + 1);
        let mut current = origin.point;
        points.push(current);

        for _ in 0..steps {
            if rng.chance(self.turn_chance) {
                dir = if rng.chance(0.5) { dir.turn_left() } else { dir.turn_right() };
            }
            let next = current.step(dir, self.pitch);
            if !bounds.contains(next) {
                break;
            }
            points.push(next);
            current = next;
        }

        Path::new(points, origin.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::{Rng, ScriptedRng};
    use crate::geometry::grid::GridPoint;
    use glam::Vec2;

    fn node(x: i32, y: i32) -> OriginNode {
        OriginNode {
            index: 3,
            point: GridPoint::new(x, y),
        }
    }

    #[test]
    fn forced_single_step_east() {
        let generator = PathGenerator::new().with_pitch(10).with_steps(1, 1);
        // direction draw 0.0 -> East; turn draw 0.99 -> straight
        let mut rng = ScriptedRng::new(&[0.0, 0.99]);
        let path = generator.generate(&node(0, 0), Bounds::new(100, 100), &mut rng);

        assert_eq!(path.points(), &[GridPoint::new(0, 0), GridPoint::new(10, 0)]);
        assert_eq!(path.total_length(), 10.0);
        assert_eq!(path.point_at(5.0), Vec2::new(5.0, 0.0));
        assert_eq!(path.origin_index(), 3);
    }

    #[test]
    fn stops_at_the_edge() {
        let generator = PathGenerator::new().with_pitch(10).with_steps(5, 5);
        // West from the left edge: first step already exits
        let mut rng = ScriptedRng::new(&[0.5, 0.99]);
        let path = generator.generate(&node(0, 50), Bounds::new(100, 100), &mut rng);
        assert_eq!(path.points(), &[GridPoint::new(0, 50)]);
        assert_eq!(path.total_length(), 0.0);
    }

    #[test]
    fn turn_goes_left_or_right() {
        let generator = PathGenerator::new().with_pitch(10).with_steps(2, 2);
        // East, straight, then turn (0.0 < 0.28) to the right (0.9 >= 0.5)
        let mut rng = ScriptedRng::new(&[0.0, 0.99, 0.0, 0.9]);
        let path = generator.generate(&node(50, 50), Bounds::new(100, 100), &mut rng);
        assert_eq!(
            path.points(),
            &[GridPoint::new(50, 50), GridPoint::new(60, 50), GridPoint::new(60, 60)]
        );
    }

    #[test]
    fn generated_paths_are_manhattan_and_in_bounds() {
        let generator = PathGenerator::new().with_pitch(40);
        let bounds = Bounds::new(800, 600);
        let mut rng = Rng::new(1234);
        for i in 0..500 {
            let origin = node((i % 20) * 40, (i % 15) * 40);
            let path = generator.generate(&origin, bounds, &mut rng);
            assert!(!path.points().is_empty());
            assert!(path.points().len() <= 15);
            for p in path.points() {
                assert!(bounds.contains(*p), "{:?} out of bounds", p);
            }
            for pair in path.points().windows(2) {
                let dx = (pair[1].x - pair[0].x).abs();
                let dy = (pair[1].y - pair[0].y).abs();
                assert!(
                    (dx == 40 && dy == 0) || (dx == 0 && dy == 40),
                    "non-manhattan step {:?} -> {:?}",
                    pair[0],
                    pair[1]
                );
            }
        }
    }

    #[test]
    fn never_reverses() {
        let generator = PathGenerator::new().with_pitch(40).with_turn_chance(1.0);
        let bounds = Bounds::new(4000, 4000);
        let mut rng = Rng::new(77);
        for _ in 0..200 {
            let path = generator.generate(&node(2000, 2000), bounds, &mut rng);
            for triple in path.points().windows(3) {
                assert_ne!(triple[0], triple[2], "walk doubled back");
            }
        }
    }
}
