//! Annotator: threshold rule and label layers from authored constants.
//!
//! Pure functions of the [`AnnotationSpec`]; no dependency on the
//! observations. The layers bind the same axis the primary layer puts MIC
//! on, so the compositor resolves them onto one shared scale.

use crate::chart::encoding::{Encoding, ScaleKind};
use crate::chart::layer::{Layer, Mark};
use crate::table::Table;

/// Which positional axis carries the MIC values being annotated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MicAxis {
    /// MIC on the x axis; the rule is vertical.
    X,
    /// MIC on the y axis; the rule is horizontal.
    Y,
}

/// An authored annotation: a threshold line and a nearby label.
#[derive(Debug, Clone)]
pub struct AnnotationSpec {
    /// Threshold value on the MIC axis. Authored constant, never derived
    /// from the data.
    pub threshold: f64,
    /// Label text placed near the line.
    pub label: String,
    /// Axis the threshold lives on.
    pub axis: MicAxis,
    /// Label pixel offset from the threshold position.
    pub offset: (f32, f32),
    /// Optional category anchoring the label on the opposing band axis.
    pub anchor: Option<String>,
}

/// Column name carrying the threshold in annotation layer tables.
const THRESHOLD_COLUMN: &str = "threshold";
/// Column name carrying the anchor category, when present.
const ANCHOR_COLUMN: &str = "anchor";

impl AnnotationSpec {
    /// The built-in chart's annotation: Gram-positive MIC threshold at
    /// 0.03 µg/mL, labeled to the right of the line.
    #[must_use]
    pub fn burtin() -> Self {
        Self {
            threshold: 0.03,
            label: "Gram-positive MIC \u{2272} 0.03 \u{b5}g/mL".to_string(),
            axis: MicAxis::X,
            offset: (6.0, -8.0),
            anchor: Some("Penicillin".to_string()),
        }
    }

    /// Place the annotation on the other MIC axis.
    #[must_use]
    pub fn on_axis(mut self, axis: MicAxis) -> Self {
        self.axis = axis;
        self
    }

    /// Anchor (or un-anchor) the label on the opposing band axis.
    #[must_use]
    pub fn anchored(mut self, anchor: Option<&str>) -> Self {
        self.anchor = anchor.map(str::to_string);
        self
    }

    /// The dashed reference-line layer.
    #[must_use]
    pub fn rule_layer(&self) -> Layer {
        let mut table = Table::new();
        table.add_num_column(THRESHOLD_COLUMN, &[self.threshold]);

        let encoding = match self.axis {
            MicAxis::X => Encoding::new().x(THRESHOLD_COLUMN, ScaleKind::Log),
            MicAxis::Y => Encoding::new().y(THRESHOLD_COLUMN, ScaleKind::Log),
        };

        Layer::new(Mark::dashed_rule(4.0, 4.0), table, encoding)
    }

    /// The label layer, offset from the threshold position.
    #[must_use]
    pub fn text_layer(&self) -> Layer {
        let mut table = Table::new();
        table.add_num_column(THRESHOLD_COLUMN, &[self.threshold]);

        let mut encoding = match self.axis {
            MicAxis::X => Encoding::new().x(THRESHOLD_COLUMN, ScaleKind::Log),
            MicAxis::Y => Encoding::new().y(THRESHOLD_COLUMN, ScaleKind::Log),
        };

        if let Some(anchor) = &self.anchor {
            table.add_text_column(ANCHOR_COLUMN, &[anchor.as_str()]);
            encoding = match self.axis {
                MicAxis::X => encoding.y(ANCHOR_COLUMN, ScaleKind::Band),
                MicAxis::Y => encoding.x(ANCHOR_COLUMN, ScaleKind::Band),
            };
        }

        let mark = Mark::text(self.label.clone()).offset(self.offset.0, self.offset.1).bold();
        Layer::new(mark, table, encoding)
    }

    /// Both annotation layers in draw order: line first, label on top.
    #[must_use]
    pub fn layers(&self) -> [Layer; 2] {
        [self.rule_layer(), self.text_layer()]
    }
}
