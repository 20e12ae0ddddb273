//! Wisps: light packets that run along a trace, pause at its end, and start over.

use std::rc::Rc;

use glam::Vec2;

use crate::core::rng::RandomSource;
use crate::geometry::path::Path;
use crate::render::surface::{Dot, Rgba, Surface};

/// Lifecycle of a wisp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WispState {
    /// Counting down its start delay at the trace origin.
    Waiting,
    /// Travelling along the trace.
    Moving,
    /// Parked at the trace end for the hold period.
    Finished,
}

/// Motion parameters shared by every wisp in a population.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WispTuning {
    /// Mean travel per frame, in pixels.
    pub base_speed: f32,
    /// Half-width of the random speed band around `base_speed`.
    pub speed_spread: f32,
    /// Start delays are drawn from [0, max_delay_frames].
    pub max_delay_frames: u32,
    /// Frames spent parked at the trace end.
    pub hold_frames: u32,
}

impl WispTuning {
    /// Floor that keeps travel strictly forward.
    pub const MIN_SPEED: f32 = 0.05;
}

/// How wisps are painted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WispStyle {
    pub color: Rgba,
    pub radius: f32,
    pub finished_radius: f32,
    pub glow: f32,
    pub waiting_radius: f32,
    /// Peak opacity of the waiting marker; scaled by the pulse.
    pub waiting_alpha: f32,
}

/// One animated packet, bound to a single trace for its whole life.
#[derive(Debug, Clone)]
pub struct Wisp {
    path: Rc<Path>,
    tuning: WispTuning,
    state: WispState,
    distance: f32,
    speed: f32,
    delay: u32,
    hold: u32,
    position: Vec2,
}

impl Wisp {
    /// A fresh wisp in `Waiting` with randomized speed and delay.
    pub fn new<R: RandomSource + ?Sized>(path: Rc<Path>, tuning: WispTuning, rng: &mut R) -> Self {
        let position = path.point_at(0.0);
        let mut wisp = Self {
            path,
            tuning,
            state: WispState::Waiting,
            distance: 0.0,
            speed: tuning.base_speed,
            delay: 0,
            hold: 0,
            position,
        };
        wisp.reset(rng);
        wisp
    }

    /// Override the randomized motion.
    pub fn with_motion(mut self, speed: f32, delay: u32) -> Self {
        self.speed = speed.max(WispTuning::MIN_SPEED);
        self.delay = delay;
        self
    }

    pub fn state(&self) -> WispState {
        self.state
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn delay(&self) -> u32 {
        self.delay
    }

    pub fn hold(&self) -> u32 {
        self.hold
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn path(&self) -> &Rc<Path> {
        &self.path
    }

    fn reset<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        self.speed = rng
            .spread(self.tuning.base_speed, self.tuning.speed_spread)
            .max(WispTuning::MIN_SPEED);
        self.delay = rng.below(self.tuning.max_delay_frames + 1);
        self.distance = 0.0;
        self.hold = 0;
        self.state = WispState::Waiting;
        self.position = self.path.point_at(0.0);
    }

    /// Advance one frame. Degenerate traces (no length) never animate.
    pub fn update<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        if self.path.total_length() <= 0.0 {
            return;
        }

        match self.state {
            WispState::Waiting => {
                if self.delay > 0 {
                    self.delay -= 1;
                    return;
                }
                self.distance = 0.0;
                self.position = self.path.point_at(0.0);
                self.state = WispState::Moving;
                self.advance();
            }
            WispState::Moving => self.advance(),
            WispState::Finished => {
                if self.hold > 0 {
                    self.hold -= 1;
                } else {
                    self.reset(rng);
                }
            }
        }
    }

    fn advance(&mut self) {
        let total = self.path.total_length();
        self.distance += self.speed;
        if self.distance >= total {
            self.distance = total;
            self.position = self.path.point_at(total);
            self.state = WispState::Finished;
            self.hold = self.tuning.hold_frames;
        } else {
            self.position = self.path.point_at(self.distance);
        }
    }

    /// Paint the wisp. `pulse` in [0, 1] modulates the waiting marker.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, style: &WispStyle, pulse: f32) {
        let dot = match self.state {
            WispState::Waiting => Dot {
                center: self.position,
                radius: style.waiting_radius,
                color: style.color.with_alpha(style.waiting_alpha * pulse.clamp(0.0, 1.0)),
                glow: 0.0,
            },
            WispState::Moving => Dot {
                center: self.position,
                radius: style.radius,
                color: style.color,
                glow: style.glow,
            },
            WispState::Finished => Dot {
                center: self.position,
                radius: style.finished_radius,
                color: style.color,
                glow: style.glow,
            },
        };
        surface.fill_dot(&dot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::{Rng, ScriptedRng};
    use crate::geometry::grid::GridPoint;
    use crate::render::surface::RecordingSurface;

    const TUNING: WispTuning = WispTuning {
        base_speed: 1.6,
        speed_spread: 0.6,
        max_delay_frames: 240,
        hold_frames: 90,
    };

    fn style() -> WispStyle {
        WispStyle {
            color: Rgba::opaque(124, 255, 203),
            radius: 2.0,
            finished_radius: 3.5,
            glow: 12.0,
            waiting_radius: 2.5,
            waiting_alpha: 0.35,
        }
    }

    fn east_ten() -> Rc<Path> {
        Rc::new(Path::new(vec![GridPoint::new(0, 0), GridPoint::new(10, 0)], 0))
    }

    #[test]
    fn new_wisp_is_waiting_with_randomized_motion() {
        let mut rng = Rng::new(5);
        for _ in 0..100 {
            let w = Wisp::new(east_ten(), TUNING, &mut rng);
            assert_eq!(w.state(), WispState::Waiting);
            assert_eq!(w.distance(), 0.0);
            assert!(w.speed() >= 0.99 && w.speed() <= 2.21, "speed {}", w.speed());
            assert!(w.delay() <= 240);
        }
    }

    #[test]
    fn fast_wisp_finishes_on_first_update() {
        let mut rng = ScriptedRng::new(&[0.5]);
        let mut w = Wisp::new(east_ten(), TUNING, &mut rng).with_motion(100.0, 0);
        w.update(&mut rng);

        assert_eq!(w.state(), WispState::Finished);
        assert_eq!(w.distance(), 10.0);
        assert_eq!(w.position(), Vec2::new(10.0, 0.0));
        assert_eq!(w.hold(), 90);
    }

    #[test]
    fn delay_counts_down_before_moving() {
        let mut rng = ScriptedRng::new(&[0.5]);
        let mut w = Wisp::new(east_ten(), TUNING, &mut rng).with_motion(1.0, 2);
        w.update(&mut rng);
        w.update(&mut rng);
        assert_eq!(w.state(), WispState::Waiting);
        assert_eq!(w.delay(), 0);
        assert_eq!(w.position(), Vec2::ZERO);

        w.update(&mut rng);
        assert_eq!(w.state(), WispState::Moving);
        assert_eq!(w.distance(), 1.0);
        assert_eq!(w.position(), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn hold_then_reset() {
        let mut rng = ScriptedRng::new(&[0.5]);
        let mut w = Wisp::new(east_ten(), TUNING, &mut rng).with_motion(100.0, 0);
        w.update(&mut rng);
        assert_eq!(w.state(), WispState::Finished);
        w.hold = 1;

        w.update(&mut rng);
        assert_eq!(w.hold(), 0);
        assert_eq!(w.state(), WispState::Finished);
        assert_eq!(w.position(), Vec2::new(10.0, 0.0));

        // 0.5 -> speed at the band center, delay 120
        w.update(&mut rng);
        assert_eq!(w.state(), WispState::Waiting);
        assert_eq!(w.distance(), 0.0);
        assert_eq!(w.position(), Vec2::ZERO);
        assert!((w.speed() - 1.6).abs() < 1e-6);
        assert_eq!(w.delay(), 120);
    }

    #[test]
    fn distance_is_monotonic_and_bounded() {
        let path = Rc::new(Path::new(
            vec![
                GridPoint::new(0, 0),
                GridPoint::new(40, 0),
                GridPoint::new(40, 40),
                GridPoint::new(80, 40),
            ],
            0,
        ));
        let mut rng = Rng::new(11);
        let mut w = Wisp::new(path.clone(), TUNING, &mut rng).with_motion(3.3, 0);
        let mut last = 0.0;
        loop {
            w.update(&mut rng);
            assert!(w.distance() <= path.total_length());
            match w.state() {
                WispState::Moving => {
                    assert!(w.distance() >= last);
                    last = w.distance();
                }
                WispState::Finished => break,
                WispState::Waiting => unreachable!("no delay configured"),
            }
        }
        assert_eq!(w.distance(), path.total_length());
        assert_eq!(w.position(), Vec2::new(80.0, 40.0));
    }

    #[test]
    fn degenerate_path_never_leaves_waiting() {
        let path = Rc::new(Path::new(vec![GridPoint::new(40, 40)], 0));
        let mut rng = Rng::new(3);
        let mut w = Wisp::new(path, TUNING, &mut rng).with_motion(5.0, 0);
        for _ in 0..1_000 {
            w.update(&mut rng);
            assert_eq!(w.state(), WispState::Waiting);
        }
        assert_eq!(w.position(), Vec2::new(40.0, 40.0));
    }

    #[test]
    fn draw_size_depends_on_state() {
        let mut rng = ScriptedRng::new(&[0.5]);
        let mut surface = RecordingSurface::default();
        let mut w = Wisp::new(east_ten(), TUNING, &mut rng).with_motion(4.0, 0);

        w.draw(&mut surface, &style(), 1.0);
        w.update(&mut rng);
        w.draw(&mut surface, &style(), 1.0);
        w.update(&mut rng);
        w.update(&mut rng);
        w.draw(&mut surface, &style(), 1.0);

        let dots = surface.dots();
        assert_eq!(dots.len(), 3);
        assert_eq!(dots[0].radius, 2.5);
        assert!((dots[0].color.a - 0.35).abs() < 1e-6);
        assert_eq!(dots[0].glow, 0.0);
        assert_eq!(dots[1].radius, 2.0);
        assert_eq!(dots[1].center, Vec2::new(4.0, 0.0));
        assert_eq!(dots[2].radius, 3.5);
        assert_eq!(dots[2].center, Vec2::new(10.0, 0.0));
    }
}
