//! Small 2D helpers shared by both renderers.

use std::f64::consts::TAU;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn lerp(self, other: Point, t: f64) -> Point {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    /// Point on a circle of `radius` around `self`.
    pub fn polar(self, radius: f64, angle: f64) -> Point {
        Point::new(self.x + radius * angle.cos(), self.y + radius * angle.sin())
    }
}

/// Evaluate the quadratic Bezier `p0 -> control -> p1` at `t`.
pub fn quadratic_bezier(p0: Point, control: Point, p1: Point, t: f64) -> Point {
    let u = 1.0 - t;
    Point::new(
        u * u * p0.x + 2.0 * u * t * control.x + t * t * p1.x,
        u * u * p0.y + 2.0 * u * t * control.y + t * t * p1.y,
    )
}

/// Control point bending the segment `a -> b` sideways by `amount * |ab|`.
///
/// A positive `amount` bends to the left of the travel direction.
pub fn curve_control(a: Point, b: Point, amount: f64) -> Point {
    let mid = a.lerp(b, 0.5);
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    // perpendicular of (dx, dy) has the same length as the segment
    Point::new(mid.x - dy * amount, mid.y + dx * amount)
}

/// Wrap `value` into `[0, extent)`. A non-positive extent collapses to zero.
pub fn wrap(value: f64, extent: f64) -> f64 {
    if extent <= 0.0 || !value.is_finite() {
        return 0.0;
    }
    let wrapped = value.rem_euclid(extent);
    // rem_euclid can round up to `extent` for tiny negative inputs
    if wrapped >= extent {
        0.0
    } else {
        wrapped
    }
}

/// Fold `value` back into `[0, 1]` as if it bounced off both ends.
pub fn reflect_unit(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let folded = value.rem_euclid(2.0);
    let reflected = if folded > 1.0 { 2.0 - folded } else { folded };
    reflected.clamp(0.0, 1.0)
}

/// Vertices of a regular polygon centred on `center`.
pub fn regular_polygon(center: Point, radius: f64, sides: usize, rotation: f64) -> Vec<Point> {
    (0..sides)
        .map(|i| center.polar(radius, rotation + TAU * i as f64 / sides as f64))
        .collect()
}

/// Direction of travel of an [`Oscillator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Reverse,
}

impl Direction {
    pub fn sign(self) -> f64 {
        match self {
            Direction::Forward => 1.0,
            Direction::Reverse => -1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Direction::Forward => Direction::Reverse,
            Direction::Reverse => Direction::Forward,
        }
    }
}

/// A scalar bouncing inside `[0, 1]`.
///
/// Each step moves `value` by `speed` in the current direction. Reaching or
/// crossing a bound clamps to it and flips the direction in the same step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oscillator {
    pub value: f64,
    pub direction: Direction,
    pub speed: f64,
}

impl Oscillator {
    pub fn new(value: f64, direction: Direction, speed: f64) -> Self {
        Self {
            value: value.clamp(0.0, 1.0),
            direction,
            speed,
        }
    }

    /// Advance one step. Returns `true` when the direction flipped.
    pub fn step(&mut self) -> bool {
        let next = self.value + self.speed * self.direction.sign();
        if next >= 1.0 {
            self.value = 1.0;
            self.direction = Direction::Reverse;
            true
        } else if next <= 0.0 {
            self.value = 0.0;
            self.direction = Direction::Forward;
            true
        } else {
            self.value = next;
            false
        }
    }
}
