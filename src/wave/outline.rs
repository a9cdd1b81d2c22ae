use serde::Serialize;
use std::f64::consts::PI;

/// A point in the overlay's own coordinate space: x grows rightwards, y grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A closed polygon: the last point implicitly connects back to the first one.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Outline {
    points: Vec<Point>,
}

impl Outline {
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.points.clear();
    }

    /// The sampled curve, without the leading anchor and the two bottom corners.
    pub fn curve(&self) -> &[Point] {
        match self.points.len() {
            0..=3 => &[],
            len => &self.points[1..len - 2],
        }
    }
}

/// The overlay's bounding frame, relative to the scroll surface's content origin.
///
/// The overlay sits right above the surface so `y` is negative and `y + height` is always zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverlayFrame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// The width of the surface the wave spans, along with the derived angular frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    width: f64,
    cycle: f64,
}

impl Surface {
    /// Widest surface an outline is sampled over, one point per whole pixel.
    pub const MAX_WIDTH: f64 = 1_000_000.0;

    /// Returns `None` for widths the wave can't be laid over (zero, negative, NaN, infinite, or
    /// wider than [`Surface::MAX_WIDTH`]).
    pub fn new(width: f64) -> Option<Self> {
        if !width.is_finite() || width <= 0.0 || width > Self::MAX_WIDTH {
            return None;
        }
        Some(Self { width, cycle: 2.0 * PI / width })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    /// Angular frequency: one full period across the surface's width.
    pub fn cycle(&self) -> f64 {
        self.cycle
    }
}

/// A snapshot of the wave's geometry for a single frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveShape {
    pub amplitude: f64,
    pub cycle: f64,
    pub phase: f64,
    pub baseline: f64,
    /// Half the overlay height.
    pub height: f64,
}

impl WaveShape {
    pub fn top_y(&self, x: f64) -> f64 {
        self.amplitude * (self.cycle * x + self.phase).sin() + self.baseline
    }

    /// The trailing wave, a fixed `π / (4 · cycle)` ahead of the top one.
    pub fn bottom_y(&self, x: f64) -> f64 {
        let forward = PI / (self.cycle * 4.0);
        self.amplitude * (self.cycle * x + self.phase + forward).cos() + self.baseline
    }

    pub fn overlay_height(&self) -> f64 {
        2.0 * self.height
    }

    pub fn overlay_frame(&self, width: f64) -> OverlayFrame {
        let height = self.overlay_height();
        OverlayFrame { x: 0.0, y: -height, width, height }
    }

    pub fn top_outline(&self, width: f64) -> Outline {
        self.outline(width, |x| self.top_y(x))
    }

    pub fn bottom_outline(&self, width: f64) -> Outline {
        self.outline(width, |x| self.bottom_y(x))
    }

    fn outline<F>(&self, width: f64, curve: F) -> Outline
    where
        F: Fn(f64) -> f64,
    {
        let samples = width.max(0.0).floor() as usize;
        let bottom = self.overlay_height();
        let mut points = Vec::with_capacity(samples.saturating_add(4));
        points.push(Point::new(0.0, self.baseline));
        points.extend((0..=samples).map(|x| {
            let x = x as f64;
            Point::new(x, curve(x))
        }));
        points.push(Point::new(width, bottom));
        points.push(Point::new(0.0, bottom));
        Outline { points }
    }
}
