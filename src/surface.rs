// Drawing seam between the simulation and whatever it paints onto. The
// browser build draws onto a 2D canvas context; tests record the calls.

use crate::color::Color;
use glm::DVec2;
use std::f64::consts::PI;
use web_sys::CanvasRenderingContext2d;

pub trait Surface {
    fn clear(&mut self, width: f64, height: f64);
    fn fill_circle(&mut self, center: &DVec2, radius: f64, color: Color, alpha: f64);
    fn stroke_line(&mut self, from: &DVec2, to: &DVec2, width: f64, color: Color, alpha: f64);
}

impl Surface for CanvasRenderingContext2d {
    fn clear(&mut self, width: f64, height: f64) {
        self.clear_rect(0.0, 0.0, width, height);
    }

    fn fill_circle(&mut self, center: &DVec2, radius: f64, color: Color, alpha: f64) {
        self.begin_path();
        // arc only fails on a negative radius, which never reaches here
        if self.arc(center.x, center.y, radius, 0.0, PI * 2.0).is_err() {
            return;
        }
        self.set_fill_style_str(&color.css_rgba(alpha));
        self.fill();
    }

    fn stroke_line(&mut self, from: &DVec2, to: &DVec2, width: f64, color: Color, alpha: f64) {
        self.begin_path();
        self.set_stroke_style_str(&color.css_rgba(alpha));
        self.set_line_width(width);
        self.move_to(from.x, from.y);
        self.line_to(to.x, to.y);
        self.stroke();
    }
}

#[cfg(test)]
pub mod recording {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum DrawCall {
        Clear { width: f64, height: f64 },
        Circle { center: DVec2, radius: f64, alpha: f64 },
        Line { from: DVec2, to: DVec2, width: f64, alpha: f64 },
    }

    #[derive(Debug, Default)]
    pub struct RecordingSurface {
        pub calls: Vec<DrawCall>,
    }

    impl RecordingSurface {
        pub fn circles(&self) -> usize {
            self.calls
                .iter()
                .filter(|c| matches!(c, DrawCall::Circle { .. }))
                .count()
        }

        pub fn lines(&self) -> Vec<&DrawCall> {
            self.calls
                .iter()
                .filter(|c| matches!(c, DrawCall::Line { .. }))
                .collect()
        }
    }

    impl Surface for RecordingSurface {
        fn clear(&mut self, width: f64, height: f64) {
            self.calls.push(DrawCall::Clear { width, height });
        }

        fn fill_circle(&mut self, center: &DVec2, radius: f64, _color: Color, alpha: f64) {
            self.calls.push(DrawCall::Circle {
                center: *center,
                radius,
                alpha,
            });
        }

        fn stroke_line(&mut self, from: &DVec2, to: &DVec2, width: f64, _color: Color, alpha: f64) {
            self.calls.push(DrawCall::Line {
                from: *from,
                to: *to,
                width,
                alpha,
            });
        }
    }
}
