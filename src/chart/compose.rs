//! Compositor: overlay layers into one chart with shared axis domains.
//!
//! Later layers draw on top of earlier ones. Per axis, the domains of all
//! contributing layers are unioned rather than recomputed per layer, so a
//! reference line at 0.03 lands on the same scale as the points it
//! annotates.

use crate::chart::encoding::{PositionChannel, ScaleKind};
use crate::chart::layer::Layer;
use crate::error::{Error, Result};
use crate::table::Value;

/// A resolved axis domain shared by every layer bound to that axis.
#[derive(Debug, Clone, PartialEq)]
pub enum AxisDomain {
    /// Continuous axis (linear or log) with unioned extent.
    Continuous {
        /// Linear or Log (never Band).
        kind: ScaleKind,
        /// Smallest value across contributing layers.
        min: f64,
        /// Largest value across contributing layers.
        max: f64,
    },
    /// Categorical axis; categories in first-seen order across layers.
    Band {
        /// Ordered category labels.
        categories: Vec<String>,
    },
}

/// Chart builder: ordered layers plus top-level metadata.
#[derive(Debug, Clone, Default)]
pub struct Chart {
    layers: Vec<Layer>,
    title: Option<String>,
    xlab: Option<String>,
    ylab: Option<String>,
    width: u32,
    height: u32,
}

impl Chart {
    /// Create an empty chart at the default 700x400.
    #[must_use]
    pub fn new() -> Self {
        Self { width: 700, height: 400, ..Self::default() }
    }

    /// Append a layer. Later layers draw on top.
    #[must_use]
    pub fn layer(mut self, layer: Layer) -> Self {
        self.layers.push(layer);
        self
    }

    /// Set the title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the x-axis label.
    #[must_use]
    pub fn xlab(mut self, label: impl Into<String>) -> Self {
        self.xlab = Some(label.into());
        self
    }

    /// Set the y-axis label.
    #[must_use]
    pub fn ylab(mut self, label: impl Into<String>) -> Self {
        self.ylab = Some(label.into());
        self
    }

    /// Set dimensions in pixels.
    #[must_use]
    pub fn dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Compose the chart: validate bindings, resolve shared axis domains.
    ///
    /// # Errors
    ///
    /// Fails on an empty layer list, zero dimensions, encodings referencing
    /// absent columns, mixed scale kinds on one axis, an axis no layer
    /// binds, or non-positive values routed to a log axis.
    pub fn build(self) -> Result<BuiltChart> {
        if self.layers.is_empty() {
            return Err(Error::Composition("no layers specified".to_string()));
        }
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidDimensions { width: self.width, height: self.height });
        }

        for layer in &self.layers {
            layer.encoding.validate(&layer.table)?;
        }

        let x_domain = resolve_axis(&self.layers, Axis::X)?;
        let y_domain = resolve_axis(&self.layers, Axis::Y)?;

        Ok(BuiltChart {
            layers: self.layers,
            title: self.title,
            xlab: self.xlab,
            ylab: self.ylab,
            width: self.width,
            height: self.height,
            x_domain,
            y_domain,
        })
    }
}

/// A composed chart ready for rendering.
#[derive(Debug, Clone)]
pub struct BuiltChart {
    /// Layers in draw order.
    pub layers: Vec<Layer>,
    /// Title, if set.
    pub title: Option<String>,
    /// X-axis label, if set.
    pub xlab: Option<String>,
    /// Y-axis label, if set.
    pub ylab: Option<String>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Shared x-axis domain.
    pub x_domain: AxisDomain,
    /// Shared y-axis domain.
    pub y_domain: AxisDomain,
}

#[derive(Debug, Clone, Copy)]
enum Axis {
    X,
    Y,
}

impl Axis {
    fn name(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
        }
    }

    fn channel(self, layer: &Layer) -> Option<&PositionChannel> {
        match self {
            Axis::X => layer.encoding.x.as_ref(),
            Axis::Y => layer.encoding.y.as_ref(),
        }
    }
}

fn resolve_axis(layers: &[Layer], axis: Axis) -> Result<AxisDomain> {
    let mut kind: Option<ScaleKind> = None;
    let mut min = f64::MAX;
    let mut max = f64::MIN;
    let mut categories: Vec<String> = Vec::new();
    let mut bound = false;

    for layer in layers {
        let Some(channel) = axis.channel(layer) else {
            continue;
        };
        bound = true;

        match kind {
            None => kind = Some(channel.scale),
            Some(existing) if existing != channel.scale => {
                return Err(Error::ScaleDomain(format!(
                    "{} axis mixes {:?} and {:?} scales",
                    axis.name(),
                    existing,
                    channel.scale
                )));
            }
            Some(_) => {}
        }

        // Encoding::validate ran before resolution; the column exists.
        let column = layer.table.get(&channel.field).unwrap_or_default();

        match channel.scale {
            ScaleKind::Band => {
                for value in column {
                    if let Value::Text(label) = value {
                        if !categories.contains(label) {
                            categories.push(label.clone());
                        }
                    }
                }
            }
            ScaleKind::Linear | ScaleKind::Log => {
                for value in column {
                    let Some(v) = value.as_f64() else { continue };
                    if channel.scale == ScaleKind::Log && v <= 0.0 {
                        return Err(Error::ScaleDomain(format!(
                            "{} axis is log-scaled but column {:?} contains {v}",
                            axis.name(),
                            channel.field
                        )));
                    }
                    if v.is_finite() {
                        min = min.min(v);
                        max = max.max(v);
                    }
                }
            }
        }
    }

    if !bound {
        return Err(Error::UnboundAxis { axis: axis.name() });
    }

    match kind {
        Some(ScaleKind::Band) => Ok(AxisDomain::Band { categories }),
        Some(k) => {
            // Degenerate extent: widen so scale construction stays valid.
            if (max - min).abs() < f64::EPSILON {
                if k == ScaleKind::Log {
                    min /= 10.0;
                    max *= 10.0;
                } else {
                    min -= 1.0;
                    max += 1.0;
                }
            }
            Ok(AxisDomain::Continuous { kind: k, min, max })
        }
        None => Err(Error::UnboundAxis { axis: axis.name() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::encoding::Encoding;
    use crate::chart::layer::Mark;
    use crate::table::Table;

    fn point_layer() -> Layer {
        let mut table = Table::new();
        table.add_num_column("mic", &[0.001, 870.0]);
        table.add_text_column("antibiotic", &["Penicillin", "Neomycin"]);
        Layer::new(
            Mark::point(),
            table,
            Encoding::new().x("mic", ScaleKind::Log).y("antibiotic", ScaleKind::Band),
        )
    }

    fn rule_layer(threshold: f64) -> Layer {
        let mut table = Table::new();
        table.add_num_column("threshold", &[threshold]);
        Layer::new(Mark::rule(), table, Encoding::new().x("threshold", ScaleKind::Log))
    }

    #[test]
    fn test_build_resolves_shared_domains() {
        let chart = Chart::new().layer(point_layer()).layer(rule_layer(0.03)).build().expect("ok");

        assert_eq!(
            chart.x_domain,
            AxisDomain::Continuous { kind: ScaleKind::Log, min: 0.001, max: 870.0 }
        );
        assert_eq!(
            chart.y_domain,
            AxisDomain::Band { categories: vec!["Penicillin".into(), "Neomycin".into()] }
        );
    }

    #[test]
    fn test_rule_extends_shared_domain() {
        // A threshold outside the data extent widens the shared scale.
        let chart =
            Chart::new().layer(point_layer()).layer(rule_layer(2000.0)).build().expect("ok");
        let AxisDomain::Continuous { max, .. } = chart.x_domain else {
            panic!("expected continuous x");
        };
        assert_eq!(max, 2000.0);
    }

    #[test]
    fn test_layer_order_preserved() {
        let chart = Chart::new().layer(point_layer()).layer(rule_layer(0.03)).build().expect("ok");
        assert!(matches!(chart.layers[0].mark, Mark::Point { .. }));
        assert!(matches!(chart.layers[1].mark, Mark::Rule { .. }));
    }

    #[test]
    fn test_build_no_layers() {
        assert!(matches!(Chart::new().build(), Err(Error::Composition(_))));
    }

    #[test]
    fn test_build_zero_dimensions() {
        let result = Chart::new().layer(point_layer()).dimensions(0, 400).build();
        assert!(matches!(result, Err(Error::InvalidDimensions { .. })));
    }

    #[test]
    fn test_build_rejects_log_of_zero() {
        let mut table = Table::new();
        table.add_num_column("mic", &[0.0, 1.0]);
        table.add_text_column("antibiotic", &["a", "b"]);
        let layer = Layer::new(
            Mark::point(),
            table,
            Encoding::new().x("mic", ScaleKind::Log).y("antibiotic", ScaleKind::Band),
        );

        assert!(matches!(Chart::new().layer(layer).build(), Err(Error::ScaleDomain(_))));
    }

    #[test]
    fn test_build_rejects_mixed_scale_kinds() {
        let mut table = Table::new();
        table.add_num_column("mic", &[1.0]);
        table.add_text_column("antibiotic", &["a"]);
        let linear = Layer::new(
            Mark::point(),
            table.clone(),
            Encoding::new().x("mic", ScaleKind::Linear).y("antibiotic", ScaleKind::Band),
        );
        let log = Layer::new(
            Mark::rule(),
            table,
            Encoding::new().x("mic", ScaleKind::Log).y("antibiotic", ScaleKind::Band),
        );

        assert!(matches!(
            Chart::new().layer(linear).layer(log).build(),
            Err(Error::ScaleDomain(_))
        ));
    }

    #[test]
    fn test_build_rejects_unbound_axis() {
        // Rule binds x only; nothing binds y.
        let result = Chart::new().layer(rule_layer(0.03)).build();
        assert!(matches!(result, Err(Error::UnboundAxis { axis: "y" })));
    }

    #[test]
    fn test_build_rejects_unknown_column() {
        let layer = Layer::new(Mark::point(), Table::new(), Encoding::new().x("mic", ScaleKind::Log));
        assert!(matches!(Chart::new().layer(layer).build(), Err(Error::UnknownColumn { .. })));
    }

    #[test]
    fn test_degenerate_log_domain_widens() {
        let mut table = Table::new();
        table.add_num_column("mic", &[0.03]);
        table.add_text_column("antibiotic", &["a"]);
        let layer = Layer::new(
            Mark::point(),
            table,
            Encoding::new().x("mic", ScaleKind::Log).y("antibiotic", ScaleKind::Band),
        );

        let chart = Chart::new().layer(layer).build().expect("ok");
        let AxisDomain::Continuous { min, max, .. } = chart.x_domain else {
            panic!("expected continuous x");
        };
        assert!(min < 0.03 && max > 0.03);
    }
}
