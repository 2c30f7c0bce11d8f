//! Chart layers: a mark, its own data table, and its channel encoding.

use crate::chart::encoding::{DiscreteScale, Encoding};
use crate::table::Table;

/// Point marker shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkShape {
    /// Filled circle.
    #[default]
    Circle,
    /// Filled upward triangle.
    Triangle,
}

/// Default point area (Vega-style area units; radius = sqrt(area / pi)).
pub const DEFAULT_POINT_AREA: f64 = 60.0;

/// Mark kind for a layer.
#[derive(Debug, Clone)]
pub enum Mark {
    /// Point markers, with shape and area driven by the layer's shape/size
    /// channel through discrete scales.
    Point {
        /// Shape per shape-channel label.
        shape: DiscreteScale<MarkShape>,
        /// Area (in area units) per size-channel label.
        area: DiscreteScale<f64>,
    },
    /// A reference line perpendicular to the axis it is encoded on.
    Rule {
        /// Dash pattern (on, off) in pixels; None for a solid line.
        dash: Option<(f32, f32)>,
        /// Stroke width in pixels.
        width: f32,
    },
    /// A text label placed at the encoded position.
    Text {
        /// The literal label text.
        text: String,
        /// Horizontal pixel offset from the encoded position.
        dx: f32,
        /// Vertical pixel offset from the encoded position.
        dy: f32,
        /// Font size in pixels.
        font_size: f32,
        /// Bold weight.
        bold: bool,
    },
}

impl Mark {
    /// Uniform circles at the default area.
    #[must_use]
    pub fn point() -> Self {
        Mark::Point {
            shape: DiscreteScale::fixed(MarkShape::Circle),
            area: DiscreteScale::fixed(DEFAULT_POINT_AREA),
        }
    }

    /// Points whose shape and area depend on the shape/size channel labels.
    #[must_use]
    pub fn point_scaled(shape: DiscreteScale<MarkShape>, area: DiscreteScale<f64>) -> Self {
        Mark::Point { shape, area }
    }

    /// A solid reference line.
    #[must_use]
    pub fn rule() -> Self {
        Mark::Rule { dash: None, width: 1.0 }
    }

    /// A dashed reference line.
    #[must_use]
    pub fn dashed_rule(on: f32, off: f32) -> Self {
        Mark::Rule { dash: Some((on, off)), width: 1.0 }
    }

    /// A text label.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Mark::Text { text: text.into(), dx: 0.0, dy: 0.0, font_size: 12.0, bold: false }
    }

    /// Set the pixel offset of a text mark.
    #[must_use]
    pub fn offset(mut self, new_dx: f32, new_dy: f32) -> Self {
        if let Mark::Text { ref mut dx, ref mut dy, .. } = self {
            *dx = new_dx;
            *dy = new_dy;
        }
        self
    }

    /// Set a text mark to bold.
    #[must_use]
    pub fn bold(mut self) -> Self {
        if let Mark::Text { ref mut bold, .. } = self {
            *bold = true;
        }
        self
    }
}

/// One chart layer. Later layers draw on top of earlier ones.
#[derive(Debug, Clone)]
pub struct Layer {
    /// The mark kind.
    pub mark: Mark,
    /// The layer's own data table.
    pub table: Table,
    /// Channel bindings into `table`.
    pub encoding: Encoding,
}

impl Layer {
    /// Create a layer.
    #[must_use]
    pub fn new(mark: Mark, table: Table, encoding: Encoding) -> Self {
        Self { mark, table, encoding }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_defaults() {
        let Mark::Point { shape, area } = Mark::point() else {
            panic!("expected point mark");
        };
        assert_eq!(shape.get("anything"), MarkShape::Circle);
        assert_eq!(area.get("anything"), DEFAULT_POINT_AREA);
    }

    #[test]
    fn test_dashed_rule() {
        let Mark::Rule { dash, .. } = Mark::dashed_rule(4.0, 4.0) else {
            panic!("expected rule mark");
        };
        assert_eq!(dash, Some((4.0, 4.0)));
    }

    #[test]
    fn test_text_offset_and_bold() {
        let Mark::Text { dx, dy, bold, .. } = Mark::text("label").offset(6.0, -8.0).bold() else {
            panic!("expected text mark");
        };
        assert_eq!((dx, dy), (6.0, -8.0));
        assert!(bold);
    }

    #[test]
    fn test_offset_is_noop_on_rule() {
        let Mark::Rule { dash, .. } = Mark::rule().offset(1.0, 1.0) else {
            panic!("expected rule mark");
        };
        assert!(dash.is_none());
    }
}
