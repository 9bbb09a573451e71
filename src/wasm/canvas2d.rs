use js_sys::Array;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::geometry::Point;
use crate::paint::{Painter, Rgba};

// Canvas calls only throw for negative radii or non-finite values, which
// are filtered out before they get here, so results are dropped.
impl Painter for CanvasRenderingContext2d {
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgba) {
        self.set_fill_style_str(&color.to_string());
        CanvasRenderingContext2d::fill_rect(self, x, y, width, height);
    }

    fn set_stroke(&mut self, color: Rgba, width: f64) {
        self.set_stroke_style_str(&color.to_string());
        self.set_line_width(width);
    }

    fn set_fill(&mut self, color: Rgba) {
        self.set_fill_style_str(&color.to_string());
    }

    fn set_line_dash(&mut self, segments: &[f64]) {
        let dash: Array = segments.iter().map(|&s| JsValue::from_f64(s)).collect();
        CanvasRenderingContext2d::set_line_dash(self, &dash).ok();
    }

    fn begin_path(&mut self) {
        CanvasRenderingContext2d::begin_path(self);
    }

    fn move_to(&mut self, p: Point) {
        CanvasRenderingContext2d::move_to(self, p.x, p.y);
    }

    fn line_to(&mut self, p: Point) {
        CanvasRenderingContext2d::line_to(self, p.x, p.y);
    }

    fn quadratic_curve_to(&mut self, control: Point, end: Point) {
        CanvasRenderingContext2d::quadratic_curve_to(self, control.x, control.y, end.x, end.y);
    }

    fn arc(&mut self, center: Point, radius: f64, start: f64, end: f64) {
        CanvasRenderingContext2d::arc(self, center.x, center.y, radius.max(0.0), start, end).ok();
    }

    fn close_path(&mut self) {
        CanvasRenderingContext2d::close_path(self);
    }

    fn stroke(&mut self) {
        CanvasRenderingContext2d::stroke(self);
    }

    fn fill(&mut self) {
        CanvasRenderingContext2d::fill(self);
    }

    fn fill_radial_gradient(&mut self, center: Point, radius: f64, stops: &[(f64, Rgba)]) {
        let radius = radius.max(0.0);
        let Ok(gradient) =
            self.create_radial_gradient(center.x, center.y, 0.0, center.x, center.y, radius)
        else {
            return;
        };
        for (offset, color) in stops {
            gradient
                .add_color_stop(*offset as f32, &color.to_string())
                .ok();
        }
        self.set_fill_style_canvas_gradient(&gradient);
        CanvasRenderingContext2d::begin_path(self);
        CanvasRenderingContext2d::arc(self, center.x, center.y, radius, 0.0, std::f64::consts::TAU)
            .ok();
        CanvasRenderingContext2d::fill(self);
    }
}
