//! Copper nets drawn on top of the board and the signal dots that run
//! along some of them.

use glam::{Vec2, Vec3};

pub struct Net {
    pub name: &'static str,
    /// Manhattan polyline in board (x, z) coordinates.
    pub points: &'static [[f32; 2]],
    pub color: &'static str,
    /// Nominal width in board units.
    pub width: f32,
    /// Whether a signal dot travels this net.
    pub animated: bool,
}

pub const TRACE_HEIGHT: f32 = 0.02;
pub const SIGNAL_HEIGHT: f32 = 0.04;
/// Fraction of a path covered per second.
pub const SIGNAL_SPEED: f32 = 0.8;

pub static NETS: [Net; 5] = [
    Net { name: "VCC", points: &[[-5.0, -4.0], [-5.0, -1.0], [-1.0, -1.0], [-1.0, 0.0], [0.0, 0.0]], color: "#ff6b6b", width: 0.06, animated: false },
    Net { name: "CLK", points: &[[3.0, -1.5], [3.0, -0.8], [0.8, -0.8], [0.8, 0.0], [0.0, 0.0]], color: "#00ff88", width: 0.04, animated: true },
    Net { name: "DATA0", points: &[[0.0, 0.0], [0.0, 1.0], [2.0, 1.0], [2.0, 2.0], [4.0, 2.0]], color: "#00ccff", width: 0.04, animated: true },
    Net { name: "UART", points: &[[0.0, 0.0], [0.5, 0.0], [0.5, -3.0], [5.0, -3.0], [5.0, -4.0]], color: "#ffaa00", width: 0.04, animated: true },
    Net { name: "COM", points: &[[0.0, 0.0], [-2.0, 0.0], [-2.0, 1.0], [-4.0, 1.0]], color: "#4a4a4a", width: 0.08, animated: false },
];

/// Plated holes at the main junctions.
pub static VIAS: [[f32; 2]; 4] = [[-1.0, -1.0], [0.8, -0.8], [0.5, -3.0], [-2.0, 1.0]];

/// A polyline parameterised by arc length, so equal steps of progress
/// cover equal distances regardless of segment lengths.
#[derive(Debug, Clone)]
pub struct SignalPath {
    points: Vec<Vec2>,
    /// Cumulative length at each point; `cumulative[0] == 0`.
    cumulative: Vec<f32>,
}

impl SignalPath {
    pub fn new(points: &[[f32; 2]]) -> Self {
        let points: Vec<Vec2> = points.iter().map(|p| Vec2::from(*p)).collect();
        let mut cumulative = Vec::with_capacity(points.len());
        let mut total = 0.0;
        for (i, p) in points.iter().enumerate() {
            if i > 0 {
                total += p.distance(points[i - 1]);
            }
            cumulative.push(total);
        }
        Self { points, cumulative }
    }

    pub fn length(&self) -> f32 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Point at `progress` in [0, 1); values outside wrap around.
    pub fn point_at(&self, progress: f32) -> Vec2 {
        let total = self.length();
        let Some(first) = self.points.first().copied() else {
            return Vec2::ZERO;
        };
        if total <= f32::EPSILON {
            return first;
        }
        let distance = progress.rem_euclid(1.0) * total;
        let seg = self.cumulative.partition_point(|c| *c <= distance).clamp(1, self.points.len() - 1);
        let (a, b) = (self.points[seg - 1], self.points[seg]);
        let span = self.cumulative[seg] - self.cumulative[seg - 1];
        if span <= f32::EPSILON {
            return b;
        }
        a.lerp(b, (distance - self.cumulative[seg - 1]) / span)
    }
}

/// One travelling dot.
#[derive(Debug, Clone)]
pub struct SignalDot {
    pub path: SignalPath,
    pub offset: f32,
}

impl SignalDot {
    /// Position after `elapsed` seconds. Pure in `elapsed`, so the loop
    /// can restart at any time.
    pub fn position(&self, elapsed: f32) -> Vec3 {
        let p = self.path.point_at(elapsed * SIGNAL_SPEED + self.offset);
        Vec3::new(p.x, SIGNAL_HEIGHT, p.y)
    }
}

pub fn signal_dots() -> Vec<SignalDot> {
    NETS.iter()
        .filter(|n| n.animated)
        .enumerate()
        .map(|(i, n)| SignalDot { path: SignalPath::new(n.points), offset: i as f32 * 0.3 })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_nets_carry_signals() {
        let dots = signal_dots();
        assert_eq!(dots.len(), 3);
        assert_eq!(dots.iter().map(|d| d.offset).collect::<Vec<_>>(), vec![0.0, 0.3, 0.6]);
    }

    #[test]
    fn endpoints_and_wrap() {
        let path = SignalPath::new(&[[0.0, 0.0], [1.0, 0.0], [1.0, 3.0]]);
        assert_eq!(path.length(), 4.0);
        assert_eq!(path.point_at(0.0), Vec2::ZERO);
        assert_eq!(path.point_at(1.0), Vec2::ZERO);
        assert!((path.point_at(-0.25) - Vec2::new(1.0, 2.0)).length() < 1e-5);
    }

    #[test]
    fn speed_is_constant_across_segments_of_different_length() {
        let path = SignalPath::new(&[[0.0, 0.0], [1.0, 0.0], [1.0, 3.0]]);
        let step = 0.01;
        let mut prev = path.point_at(0.0);
        for i in 1..99 {
            let p = path.point_at(i as f32 * step);
            let travelled = p.distance(prev);
            // A step straddling the corner cuts it, so allow the diagonal.
            assert!(travelled <= 0.04 + 1e-4 && travelled >= 0.04 / 2f32.sqrt() - 1e-4, "step {i}: {travelled}");
            prev = p;
        }
    }

    #[test]
    fn dots_sit_on_their_nets() {
        for dot in signal_dots() {
            for t in [0.0, 0.37, 1.9, 12.5] {
                let p = dot.position(t);
                assert_eq!(p.y, SIGNAL_HEIGHT);
                let on_some_segment = dot.path.points.windows(2).any(|w| {
                    let (a, b) = (w[0], w[1]);
                    let q = Vec2::new(p.x, p.z);
                    (q.distance(a) + q.distance(b) - a.distance(b)).abs() < 1e-3
                });
                assert!(on_some_segment);
            }
        }
    }

    #[test]
    fn single_point_path_stays_put() {
        let path = SignalPath::new(&[[2.0, 3.0]]);
        assert_eq!(path.point_at(0.7), Vec2::new(2.0, 3.0));
        assert_eq!(SignalPath::new(&[]).point_at(0.2), Vec2::ZERO);
    }
}
