//! Layout resolution: project a composed chart into positioned marks.
//!
//! Both output paths (vector SVG and the raster PNG fallback) consume the
//! same [`Scene`], so scale math and color assignment live here exactly
//! once.

use std::f64::consts::PI;

use crate::chart::{AxisDomain, BuiltChart, Mark, MarkShape, ScaleKind};
use crate::color::{category10, Rgba};
use crate::error::Result;
use crate::scale::{BandScale, LinearScale, LogScale, Scale};
use crate::table::Value;

/// Left margin, leaves room for band labels and the y-axis title.
const MARGIN_LEFT: f64 = 90.0;
/// Right margin, leaves room for the legend.
const MARGIN_RIGHT: f64 = 130.0;
/// Top margin, leaves room for the title.
const MARGIN_TOP: f64 = 44.0;
/// Bottom margin, leaves room for tick labels and the x-axis title.
const MARGIN_BOTTOM: f64 = 54.0;

/// The plotting panel in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Panel {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

/// One axis tick: pixel position along the axis plus its label.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Pixel position along the axis.
    pub position: f64,
    /// Label text.
    pub label: String,
}

/// Guide metadata for one axis.
#[derive(Debug, Clone, Default)]
pub struct AxisGuide {
    /// Axis title, if set on the chart.
    pub title: Option<String>,
    /// Ticks in axis order.
    pub ticks: Vec<Tick>,
}

/// One legend entry for the color channel.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    /// Category label.
    pub label: String,
    /// Swatch color.
    pub color: Rgba,
}

/// A mark projected to pixel coordinates.
#[derive(Debug, Clone)]
pub enum PlacedMark {
    /// A point marker.
    Point {
        /// Center x.
        x: f64,
        /// Center y.
        y: f64,
        /// Radius in pixels.
        radius: f64,
        /// Marker shape.
        shape: MarkShape,
        /// Fill color.
        color: Rgba,
        /// Tooltip rows as (field, value) pairs.
        tooltip: Vec<(String, String)>,
    },
    /// A reference line spanning the panel.
    Segment {
        /// Start x.
        x1: f64,
        /// Start y.
        y1: f64,
        /// End x.
        x2: f64,
        /// End y.
        y2: f64,
        /// Stroke color.
        color: Rgba,
        /// Stroke width in pixels.
        width: f32,
        /// Dash pattern (on, off), None for solid.
        dash: Option<(f32, f32)>,
    },
    /// A text label.
    Label {
        /// Anchor x.
        x: f64,
        /// Baseline y.
        y: f64,
        /// Label text.
        text: String,
        /// Font size in pixels.
        font_size: f32,
        /// Bold weight.
        bold: bool,
        /// Fill color.
        color: Rgba,
    },
}

/// A fully laid-out chart, ready for any renderer.
#[derive(Debug, Clone)]
pub struct Scene {
    /// Total width in pixels.
    pub width: u32,
    /// Total height in pixels.
    pub height: u32,
    /// The plotting panel.
    pub panel: Panel,
    /// Chart title, if set.
    pub title: Option<String>,
    /// X axis guide.
    pub x_guide: AxisGuide,
    /// Y axis guide.
    pub y_guide: AxisGuide,
    /// Legend title (the color column name), if a color channel is bound.
    pub legend_title: Option<String>,
    /// Legend entries in color assignment order.
    pub legend: Vec<LegendEntry>,
    /// Marks in draw order.
    pub marks: Vec<PlacedMark>,
}

/// One axis projection instantiated against a pixel range.
enum Projection {
    Linear(LinearScale),
    Log(LogScale),
    Band(BandScale),
}

impl Projection {
    fn from_domain(domain: &AxisDomain, range: (f64, f64)) -> Result<Self> {
        match domain {
            AxisDomain::Continuous { kind: ScaleKind::Log, min, max } => {
                Ok(Projection::Log(LogScale::new((*min, *max), range)?))
            }
            AxisDomain::Continuous { min, max, .. } => {
                Ok(Projection::Linear(LinearScale::new((*min, *max), range)?))
            }
            AxisDomain::Band { categories } => {
                Ok(Projection::Band(BandScale::new(categories.clone(), range)?))
            }
        }
    }

    /// Project one table value, or `None` if the value does not fit the
    /// projection (text on a continuous axis, unknown band category).
    fn project(&self, value: &Value) -> Option<f64> {
        match self {
            Projection::Linear(s) => Some(s.scale(value.as_f64()?)),
            Projection::Log(s) => Some(s.scale(value.as_f64()?)),
            Projection::Band(s) => s.position(value.as_str()?),
        }
    }
}

/// Resolve a composed chart into a scene.
///
/// # Errors
///
/// Fails if an axis domain cannot back a scale; the compositor makes this
/// unreachable for charts it produced.
pub fn resolve(chart: &BuiltChart) -> Result<Scene> {
    let width = f64::from(chart.width);
    let height = f64::from(chart.height);
    let panel = Panel {
        x: MARGIN_LEFT,
        y: MARGIN_TOP,
        width: (width - MARGIN_LEFT - MARGIN_RIGHT).max(1.0),
        height: (height - MARGIN_TOP - MARGIN_BOTTOM).max(1.0),
    };

    let x_proj = Projection::from_domain(&chart.x_domain, (panel.x, panel.x + panel.width))?;
    // Screen y grows downward; the data axis grows upward.
    let y_proj = Projection::from_domain(&chart.y_domain, (panel.y + panel.height, panel.y))?;

    let x_guide = AxisGuide { title: chart.xlab.clone(), ticks: ticks_for(&chart.x_domain, &x_proj) };
    let y_guide = AxisGuide { title: chart.ylab.clone(), ticks: ticks_for(&chart.y_domain, &y_proj) };

    let colors = ColorAssignment::from_chart(chart);

    let mut marks = Vec::new();
    for layer in &chart.layers {
        match &layer.mark {
            Mark::Point { shape, area } => {
                place_points(layer, shape, area, &x_proj, &y_proj, &colors, &mut marks);
            }
            Mark::Rule { dash, width: stroke } => {
                place_rule(layer, *dash, *stroke, &panel, &x_proj, &y_proj, &mut marks);
            }
            Mark::Text { text, dx, dy, font_size, bold } => {
                place_text(
                    layer, text, *dx, *dy, *font_size, *bold, &panel, &x_proj, &y_proj, &mut marks,
                );
            }
        }
    }

    Ok(Scene {
        width: chart.width,
        height: chart.height,
        panel,
        title: chart.title.clone(),
        x_guide,
        y_guide,
        legend: colors.legend(),
        legend_title: colors.field,
        marks,
    })
}

/// Categorical color assignment: unique color-column labels, sorted, mapped
/// through the categorical palette.
struct ColorAssignment {
    field: Option<String>,
    labels: Vec<String>,
}

impl ColorAssignment {
    fn from_chart(chart: &BuiltChart) -> Self {
        let mut field = None;
        let mut labels: Vec<String> = Vec::new();
        for layer in &chart.layers {
            let Some(column) = &layer.encoding.color else { continue };
            field.get_or_insert_with(|| column.clone());
            if let Some(values) = layer.table.get(column) {
                for value in values {
                    if let Some(label) = value.as_str() {
                        if !labels.contains(&label.to_string()) {
                            labels.push(label.to_string());
                        }
                    }
                }
            }
        }
        labels.sort();
        Self { field, labels }
    }

    fn get(&self, label: Option<&str>) -> Rgba {
        match label {
            Some(label) => {
                let index = self.labels.iter().position(|l| l == label).unwrap_or(0);
                category10(index)
            }
            None => Rgba::BLACK,
        }
    }

    fn legend(&self) -> Vec<LegendEntry> {
        self.labels
            .iter()
            .enumerate()
            .map(|(i, label)| LegendEntry { label: label.clone(), color: category10(i) })
            .collect()
    }
}

/// Radius in pixels for a point of the given area (area units).
#[must_use]
pub fn area_to_radius(area: f64) -> f64 {
    (area.max(0.0) / PI).sqrt()
}

fn place_points(
    layer: &crate::chart::Layer,
    shape: &crate::chart::DiscreteScale<MarkShape>,
    area: &crate::chart::DiscreteScale<f64>,
    x_proj: &Projection,
    y_proj: &Projection,
    colors: &ColorAssignment,
    marks: &mut Vec<PlacedMark>,
) {
    let table = &layer.table;
    let enc = &layer.encoding;
    let x_col = enc.x.as_ref().and_then(|c| table.get(&c.field));
    let y_col = enc.y.as_ref().and_then(|c| table.get(&c.field));
    let color_col = enc.color.as_ref().and_then(|c| table.get(c));
    let shape_col = enc.shape.as_ref().and_then(|c| table.get(c));
    let size_col = enc.size.as_ref().and_then(|c| table.get(c));

    for row in 0..table.nrow() {
        let Some(x) = x_col.and_then(|c| c.get(row)).and_then(|v| x_proj.project(v)) else {
            continue;
        };
        let Some(y) = y_col.and_then(|c| c.get(row)).and_then(|v| y_proj.project(v)) else {
            continue;
        };

        let color_label = color_col.and_then(|c| c.get(row)).and_then(Value::as_str);
        let shape_label = shape_col.and_then(|c| c.get(row)).and_then(Value::as_str);
        let size_label = size_col.and_then(|c| c.get(row)).and_then(Value::as_str);

        let tooltip = enc
            .tooltip
            .iter()
            .filter_map(|field| {
                let value = table.get(field)?.get(row)?;
                Some((field.clone(), format_value(value)))
            })
            .collect();

        marks.push(PlacedMark::Point {
            x,
            y,
            radius: area_to_radius(area.get(size_label.unwrap_or(""))),
            shape: shape.get(shape_label.unwrap_or("")),
            color: colors.get(color_label),
            tooltip,
        });
    }
}

fn place_rule(
    layer: &crate::chart::Layer,
    dash: Option<(f32, f32)>,
    stroke: f32,
    panel: &Panel,
    x_proj: &Projection,
    y_proj: &Projection,
    marks: &mut Vec<PlacedMark>,
) {
    let table = &layer.table;
    let enc = &layer.encoding;

    if let Some(channel) = &enc.x {
        if let Some(column) = table.get(&channel.field) {
            for value in column {
                if let Some(x) = x_proj.project(value) {
                    marks.push(PlacedMark::Segment {
                        x1: x,
                        y1: panel.y,
                        x2: x,
                        y2: panel.y + panel.height,
                        color: Rgba::BLACK,
                        width: stroke,
                        dash,
                    });
                }
            }
        }
    }
    if let Some(channel) = &enc.y {
        if let Some(column) = table.get(&channel.field) {
            for value in column {
                if let Some(y) = y_proj.project(value) {
                    marks.push(PlacedMark::Segment {
                        x1: panel.x,
                        y1: y,
                        x2: panel.x + panel.width,
                        y2: y,
                        color: Rgba::BLACK,
                        width: stroke,
                        dash,
                    });
                }
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn place_text(
    layer: &crate::chart::Layer,
    text: &str,
    dx: f32,
    dy: f32,
    font_size: f32,
    bold: bool,
    panel: &Panel,
    x_proj: &Projection,
    y_proj: &Projection,
    marks: &mut Vec<PlacedMark>,
) {
    let table = &layer.table;
    let enc = &layer.encoding;

    let project = |channel: &Option<crate::chart::PositionChannel>, proj: &Projection| {
        channel
            .as_ref()
            .and_then(|c| table.get(&c.field))
            .and_then(|col| col.first())
            .and_then(|v| proj.project(v))
    };

    // An unbound coordinate falls back to the top-left panel corner, which
    // keeps unanchored labels out of the data region's center.
    let x = project(&enc.x, x_proj).unwrap_or(panel.x + 4.0);
    let y = project(&enc.y, y_proj).unwrap_or(panel.y + f64::from(font_size) + 4.0);

    marks.push(PlacedMark::Label {
        x: x + f64::from(dx),
        y: y + f64::from(dy),
        text: text.to_string(),
        font_size,
        bold,
        color: Rgba::BLACK,
    });
}

fn ticks_for(domain: &AxisDomain, proj: &Projection) -> Vec<Tick> {
    match (domain, proj) {
        (AxisDomain::Band { categories }, Projection::Band(scale)) => categories
            .iter()
            .filter_map(|c| {
                scale.position(c).map(|position| Tick { position, label: c.clone() })
            })
            .collect(),
        (AxisDomain::Continuous { kind: ScaleKind::Log, min, max }, Projection::Log(scale)) => {
            log_decades(*min, *max)
                .into_iter()
                .map(|v| Tick { position: scale.scale(v), label: format_tick(v) })
                .collect()
        }
        (AxisDomain::Continuous { min, max, .. }, Projection::Linear(scale)) => {
            linear_ticks(*min, *max)
                .into_iter()
                .map(|v| Tick { position: scale.scale(v), label: format_tick(v) })
                .collect()
        }
        _ => Vec::new(),
    }
}

/// Powers of ten covering `[min, max]`, clamped to the domain. The epsilon
/// keeps exact decade endpoints from being dropped to float noise.
fn log_decades(min: f64, max: f64) -> Vec<f64> {
    let lo = (min.log10() - 1e-9).ceil() as i32;
    let hi = (max.log10() + 1e-9).floor() as i32;
    (lo..=hi).map(|e| 10f64.powi(e)).collect()
}

/// Round tick values at a 1/2/5 step covering `[min, max]`.
fn linear_ticks(min: f64, max: f64) -> Vec<f64> {
    let span = max - min;
    if span <= 0.0 || !span.is_finite() {
        return vec![min];
    }
    let raw_step = span / 5.0;
    let magnitude = 10f64.powf(raw_step.log10().floor());
    let residual = raw_step / magnitude;
    let step = if residual < 1.5 {
        magnitude
    } else if residual < 3.5 {
        2.0 * magnitude
    } else if residual < 7.5 {
        5.0 * magnitude
    } else {
        10.0 * magnitude
    };

    let mut ticks = Vec::new();
    let mut v = (min / step).ceil() * step;
    while v <= max + step * 1e-9 {
        ticks.push(v);
        v += step;
    }
    ticks
}

/// Format a tick value without trailing noise: `0.001`, `0.5`, `10`, `1000`.
fn format_tick(v: f64) -> String {
    if v == v.trunc() && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

/// Format a table value for tooltips.
fn format_value(value: &Value) -> String {
    match value {
        Value::Num(n) => format_tick(*n),
        Value::Text(s) => s.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;
    use crate::pipeline::{build_chart, ChartConfig, ChartVariant};
    use approx::assert_relative_eq;

    fn burtin_scene(variant: ChartVariant) -> Scene {
        let chart =
            build_chart(&Dataset::burtin(), &ChartConfig::burtin(variant)).expect("builds");
        resolve(&chart).expect("resolves")
    }

    #[test]
    fn test_scene_dimensions_and_panel() {
        let scene = burtin_scene(ChartVariant::ShapeEncoded);
        assert_eq!((scene.width, scene.height), (700, 400));
        assert!(scene.panel.x > 0.0 && scene.panel.y > 0.0);
        assert!(scene.panel.x + scene.panel.width < 700.0);
        assert!(scene.panel.y + scene.panel.height < 400.0);
    }

    #[test]
    fn test_scene_mark_census() {
        let scene = burtin_scene(ChartVariant::ShapeEncoded);
        let points = scene.marks.iter().filter(|m| matches!(m, PlacedMark::Point { .. })).count();
        let segments =
            scene.marks.iter().filter(|m| matches!(m, PlacedMark::Segment { .. })).count();
        let labels = scene.marks.iter().filter(|m| matches!(m, PlacedMark::Label { .. })).count();
        assert_eq!((points, segments, labels), (48, 1, 1));
    }

    #[test]
    fn test_points_inside_panel() {
        let scene = burtin_scene(ChartVariant::ShapeEncoded);
        for mark in &scene.marks {
            if let PlacedMark::Point { x, y, .. } = mark {
                assert!(*x >= scene.panel.x && *x <= scene.panel.x + scene.panel.width);
                assert!(*y >= scene.panel.y && *y <= scene.panel.y + scene.panel.height);
            }
        }
    }

    #[test]
    fn test_color_assignment_is_sorted() {
        // "negative" sorts before "positive", so negative gets the first
        // palette color.
        let scene = burtin_scene(ChartVariant::ShapeEncoded);
        assert_eq!(scene.legend.len(), 2);
        assert_eq!(scene.legend[0].label, "negative");
        assert_eq!(scene.legend[0].color, category10(0));
        assert_eq!(scene.legend[1].label, "positive");
        assert_eq!(scene.legend[1].color, category10(1));
        assert_eq!(scene.legend_title.as_deref(), Some("gram_stain"));
    }

    #[test]
    fn test_focus_points_are_larger_triangles() {
        let scene = burtin_scene(ChartVariant::ShapeEncoded);
        let mut triangle_radius = None;
        let mut circle_radius = None;
        for mark in &scene.marks {
            if let PlacedMark::Point { radius, shape, .. } = mark {
                match shape {
                    MarkShape::Triangle => triangle_radius = Some(*radius),
                    MarkShape::Circle => circle_radius = Some(*radius),
                }
            }
        }
        let (t, c) = (triangle_radius.expect("triangles"), circle_radius.expect("circles"));
        assert!(t > c);
        assert_relative_eq!(t, (150.0f64 / PI).sqrt());
        assert_relative_eq!(c, (60.0f64 / PI).sqrt());
    }

    #[test]
    fn test_rule_spans_panel_vertically() {
        let scene = burtin_scene(ChartVariant::ShapeEncoded);
        let segment = scene
            .marks
            .iter()
            .find_map(|m| match m {
                PlacedMark::Segment { x1, y1, x2, y2, dash, .. } => Some((x1, y1, y2, dash, x2)),
                _ => None,
            })
            .expect("rule present");
        let (x1, y1, y2, dash, x2) = segment;
        assert_eq!(x1, x2);
        assert_relative_eq!(*y1, scene.panel.y);
        assert_relative_eq!(*y2, scene.panel.y + scene.panel.height);
        assert_eq!(*dash, Some((4.0, 4.0)));
    }

    #[test]
    fn test_rule_is_horizontal_when_mic_on_y() {
        let scene = burtin_scene(ChartVariant::SimpleScatter);
        let horizontal = scene.marks.iter().any(|m| {
            matches!(m, PlacedMark::Segment { y1, y2, .. } if (y1 - y2).abs() < 1e-9)
        });
        assert!(horizontal);
    }

    #[test]
    fn test_label_offset_applied() {
        let scene = burtin_scene(ChartVariant::ShapeEncoded);
        let rule_x = scene
            .marks
            .iter()
            .find_map(|m| match m {
                PlacedMark::Segment { x1, .. } => Some(*x1),
                _ => None,
            })
            .expect("rule present");
        let label = scene
            .marks
            .iter()
            .find_map(|m| match m {
                PlacedMark::Label { x, text, bold, .. } => Some((*x, text.clone(), *bold)),
                _ => None,
            })
            .expect("label present");
        assert_relative_eq!(label.0, rule_x + 6.0);
        assert!(label.1.contains("0.03"));
        assert!(label.2);
    }

    #[test]
    fn test_log_ticks_are_decades() {
        let scene = burtin_scene(ChartVariant::ShapeEncoded);
        let labels: Vec<&str> = scene.x_guide.ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["0.001", "0.01", "0.1", "1", "10", "100"]);
    }

    #[test]
    fn test_band_ticks_in_order() {
        let scene = burtin_scene(ChartVariant::ShapeEncoded);
        let labels: Vec<&str> = scene.y_guide.ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["Penicillin", "Streptomycin", "Neomycin"]);
        // First band sits at the top of the panel.
        assert!(scene.y_guide.ticks[0].position < scene.y_guide.ticks[2].position);
    }

    #[test]
    fn test_tooltip_rows() {
        let scene = burtin_scene(ChartVariant::ShapeEncoded);
        let PlacedMark::Point { tooltip, .. } = &scene.marks[0] else {
            panic!("expected a point first");
        };
        let fields: Vec<&str> = tooltip.iter().map(|(f, _)| f.as_str()).collect();
        assert_eq!(fields, vec!["species", "antibiotic", "mic", "gram_stain"]);
    }

    #[test]
    fn test_linear_tick_steps() {
        let ticks = linear_ticks(0.0, 2.0);
        assert!(ticks.len() >= 4);
        assert_relative_eq!(ticks[1] - ticks[0], ticks[2] - ticks[1]);
    }

    #[test]
    fn test_format_tick() {
        assert_eq!(format_tick(1000.0), "1000");
        assert_eq!(format_tick(0.03), "0.03");
        assert_eq!(format_tick(0.001), "0.001");
    }

    #[test]
    fn test_area_to_radius() {
        assert_relative_eq!(area_to_radius(PI), 1.0);
        assert_eq!(area_to_radius(-5.0), 0.0);
    }
}
