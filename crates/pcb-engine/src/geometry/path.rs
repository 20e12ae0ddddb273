//! Polyline traces with precomputed arc-length tables.

use glam::Vec2;

use super::grid::GridPoint;

/// One straight piece of a trace, with its running length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Vec2,
    pub delta: Vec2,
    pub length: f32,
    /// Length of the trace up to and including this segment.
    pub cumulative: f32,
}

/// An immutable trace: grid points plus the segment table used for sampling.
///
/// `segments.len() == points.len().saturating_sub(1)` and the last segment's
/// `cumulative` equals `total_length`.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    points: Vec<GridPoint>,
    segments: Vec<Segment>,
    total_length: f32,
    origin_index: usize,
}

impl Path {
    pub fn new(points: Vec<GridPoint>, origin_index: usize) -> Self {
        let mut segments = Vec::with_capacity(points.len().saturating_sub(1));
        let mut total_length = 0.0;
        for pair in points.windows(2) {
            let start = pair[0].to_vec2();
            let delta = pair[1].to_vec2() - start;
            let length = delta.length();
            total_length += length;
            segments.push(Segment {
                start,
                delta,
                length,
                cumulative: total_length,
            });
        }
        Self {
            points,
            segments,
            total_length,
            origin_index,
        }
    }

    pub fn points(&self) -> &[GridPoint] {
        &self.points
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn total_length(&self) -> f32 {
        self.total_length
    }

    /// Index of the origin node this trace grew from.
    pub fn origin_index(&self) -> usize {
        self.origin_index
    }

    pub fn first(&self) -> Option<GridPoint> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<GridPoint> {
        self.points.last().copied()
    }

    /// Points as floats, ready to stroke.
    pub fn polyline(&self) -> Vec<Vec2> {
        self.points.iter().map(|p| p.to_vec2()).collect()
    }

    /// Position `distance` units along the trace.
    ///
    /// Clamps to the first point at or below zero and to the last point at or
    /// beyond `total_length`. An empty path samples to the origin.
    pub fn point_at(&self, distance: f32) -> Vec2 {
        let (Some(first), Some(last)) = (self.first(), self.last()) else {
            return Vec2::ZERO;
        };
        if self.segments.is_empty() || distance <= 0.0 {
            return first.to_vec2();
        }
        if distance >= self.total_length {
            return last.to_vec2();
        }

        // First segment whose running length reaches `distance`.
        let idx = self
            .segments
            .partition_point(|s| s.cumulative < distance)
            .min(self.segments.len() - 1);
        let seg = &self.segments[idx];
        let before = if idx == 0 {
            0.0
        } else {
            self.segments[idx - 1].cumulative
        };
        let denom = if seg.length > 0.0 { seg.length } else { 1.0 };
        seg.start + seg.delta * ((distance - before) / denom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-4
    }

    fn l_shape() -> Path {
        // 30 east, then 40 south
        Path::new(
            vec![GridPoint::new(0, 0), GridPoint::new(30, 0), GridPoint::new(30, 40)],
            0,
        )
    }

    #[test]
    fn segment_table_matches_points() {
        let path = l_shape();
        assert_eq!(path.segments().len(), 2);
        assert_eq!(path.segments()[0].cumulative, 30.0);
        assert_eq!(path.segments()[1].cumulative, 70.0);
        assert_eq!(path.total_length(), 70.0);
        assert_eq!(path.segments()[1].start, Vec2::new(30.0, 0.0));
        assert_eq!(path.segments()[1].delta, Vec2::new(0.0, 40.0));
    }

    #[test]
    fn clamps_below_zero_and_past_end() {
        let path = l_shape();
        for d in [-100.0, -0.001, 0.0] {
            assert_eq!(path.point_at(d), Vec2::new(0.0, 0.0));
        }
        for d in [70.0, 70.5, 1e6] {
            assert_eq!(path.point_at(d), Vec2::new(30.0, 40.0));
        }
    }

    #[test]
    fn interpolates_within_segment() {
        let path = l_shape();
        assert!(approx(path.point_at(15.0), Vec2::new(15.0, 0.0)));
        assert!(approx(path.point_at(50.0), Vec2::new(30.0, 20.0)));
    }

    #[test]
    fn segment_boundaries_hit_endpoints() {
        let path = l_shape();
        for seg in path.segments() {
            let end = seg.start + seg.delta;
            assert!(approx(path.point_at(seg.cumulative), end), "at {}", seg.cumulative);
        }
    }

    #[test]
    fn single_point_path_samples_its_point() {
        let path = Path::new(vec![GridPoint::new(40, 80)], 2);
        assert!(path.segments().is_empty());
        assert_eq!(path.total_length(), 0.0);
        for d in [-5.0, 0.0, 5.0, 1000.0] {
            assert_eq!(path.point_at(d), Vec2::new(40.0, 80.0));
        }
    }

    #[test]
    fn empty_path_samples_origin() {
        let path = Path::new(Vec::new(), 0);
        assert_eq!(path.point_at(3.0), Vec2::ZERO);
        assert_eq!(path.total_length(), 0.0);
    }

    #[test]
    fn zero_length_segment_does_not_divide_by_zero() {
        let path = Path::new(
            vec![
                GridPoint::new(0, 0),
                GridPoint::new(0, 0),
                GridPoint::new(10, 0),
            ],
            0,
        );
        assert_eq!(path.total_length(), 10.0);
        let p = path.point_at(5.0);
        assert!(p.is_finite());
        assert!(approx(p, Vec2::new(5.0, 0.0)));
    }
}
