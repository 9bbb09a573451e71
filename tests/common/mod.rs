#![allow(dead_code)]

use lab_canvas::geometry::Point;
use lab_canvas::paint::{Painter, Rgba};

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    FillRect { w: f64, h: f64, color: Rgba },
    Stroke(Rgba, f64),
    Fill(Rgba),
    Dash(Vec<f64>),
    Begin,
    MoveTo(Point),
    LineTo(Point),
    Quad(Point, Point),
    Arc(Point, f64),
    Close,
    StrokePath,
    FillPath,
    Gradient(Point, f64),
}

/// Painter that records every call.
#[derive(Debug, Default)]
pub struct Recorder {
    pub ops: Vec<Op>,
}

impl Recorder {
    pub fn count(&self, pred: impl Fn(&Op) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }

    pub fn arcs(&self) -> Vec<(Point, f64)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Arc(c, r) => Some((*c, *r)),
                _ => None,
            })
            .collect()
    }

    /// Vertices of every path that was closed, in drawing order.
    pub fn closed_paths(&self) -> Vec<Vec<Point>> {
        let mut paths = Vec::new();
        let mut current = Vec::new();
        for op in &self.ops {
            match op {
                Op::Begin => current.clear(),
                Op::MoveTo(p) | Op::LineTo(p) => current.push(*p),
                Op::Close => paths.push(std::mem::take(&mut current)),
                _ => {}
            }
        }
        paths
    }
}

impl Painter for Recorder {
    fn fill_rect(&mut self, _x: f64, _y: f64, w: f64, h: f64, color: Rgba) {
        self.ops.push(Op::FillRect { w, h, color });
    }
    fn set_stroke(&mut self, color: Rgba, width: f64) {
        self.ops.push(Op::Stroke(color, width));
    }
    fn set_fill(&mut self, color: Rgba) {
        self.ops.push(Op::Fill(color));
    }
    fn set_line_dash(&mut self, segments: &[f64]) {
        self.ops.push(Op::Dash(segments.to_vec()));
    }
    fn begin_path(&mut self) {
        self.ops.push(Op::Begin);
    }
    fn move_to(&mut self, p: Point) {
        self.ops.push(Op::MoveTo(p));
    }
    fn line_to(&mut self, p: Point) {
        self.ops.push(Op::LineTo(p));
    }
    fn quadratic_curve_to(&mut self, control: Point, end: Point) {
        self.ops.push(Op::Quad(control, end));
    }
    fn arc(&mut self, center: Point, radius: f64, _start: f64, _end: f64) {
        self.ops.push(Op::Arc(center, radius));
    }
    fn close_path(&mut self) {
        self.ops.push(Op::Close);
    }
    fn stroke(&mut self) {
        self.ops.push(Op::StrokePath);
    }
    fn fill(&mut self) {
        self.ops.push(Op::FillPath);
    }
    fn fill_radial_gradient(&mut self, center: Point, radius: f64, _stops: &[(f64, Rgba)]) {
        self.ops.push(Op::Gradient(center, radius));
    }
}
