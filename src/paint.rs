//! Drawing surface abstraction.
//!
//! Renderers describe each frame as a stream of 2D vector operations. The
//! browser build forwards them to a `CanvasRenderingContext2d`; tests record
//! them.

use std::fmt;

use crate::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Same colour with alpha replaced, clamped to `[0, 1]`.
    pub fn alpha(self, a: f64) -> Self {
        Self {
            a: if a.is_finite() { a.clamp(0.0, 1.0) } else { 0.0 },
            ..self
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {:.3})", self.r, self.g, self.b, self.a)
    }
}

/// Laboratory accent red.
pub const ACCENT: Rgba = Rgba::rgb(188, 0, 45);
pub const INK: Rgba = Rgba::rgb(0, 0, 0);
pub const PAPER: Rgba = Rgba::rgb(250, 250, 250);

/// The subset of the 2D canvas API the renderers need.
pub trait Painter {
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgba);

    fn set_stroke(&mut self, color: Rgba, width: f64);
    fn set_fill(&mut self, color: Rgba);
    /// An empty slice restores solid strokes.
    fn set_line_dash(&mut self, segments: &[f64]);

    fn begin_path(&mut self);
    fn move_to(&mut self, p: Point);
    fn line_to(&mut self, p: Point);
    fn quadratic_curve_to(&mut self, control: Point, end: Point);
    fn arc(&mut self, center: Point, radius: f64, start: f64, end: f64);
    fn close_path(&mut self);
    fn stroke(&mut self);
    fn fill(&mut self);

    /// Fill a disc with a radial gradient from `center` (offset 0) to
    /// `radius` (offset 1).
    fn fill_radial_gradient(&mut self, center: Point, radius: f64, stops: &[(f64, Rgba)]);

    fn line(&mut self, from: Point, to: Point) {
        self.begin_path();
        self.move_to(from);
        self.line_to(to);
        self.stroke();
    }

    fn stroke_circle(&mut self, center: Point, radius: f64) {
        self.begin_path();
        self.arc(center, radius, 0.0, std::f64::consts::TAU);
        self.stroke();
    }

    fn fill_circle(&mut self, center: Point, radius: f64) {
        self.begin_path();
        self.arc(center, radius, 0.0, std::f64::consts::TAU);
        self.fill();
    }

    fn stroke_polygon(&mut self, points: &[Point]) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.begin_path();
        self.move_to(*first);
        for p in rest {
            self.line_to(*p);
        }
        self.close_path();
        self.stroke();
    }
}
