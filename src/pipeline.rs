//! The parameterized chart pipeline.
//!
//! One configuration-driven path from a wide [`Dataset`] to a composed
//! [`BuiltChart`]: melt, encode, annotate, compose. The three layout
//! variants that used to be three near-identical scripts differ only in the
//! [`ChartVariant`] they select.

use crate::chart::{
    AnnotationSpec, BuiltChart, Chart, DiscreteScale, Encoding, MicAxis, ScaleKind,
};
use crate::chart::{Layer, Mark, MarkShape, DEFAULT_POINT_AREA};
use crate::dataset::{Dataset, BURTIN_TITLE};
use crate::error::Result;
use crate::reshape::{melt, observations_table, Jitter, DEFAULT_JITTER, OTHER_GROUP};

/// MIC axis title.
pub const MIC_AXIS_LABEL: &str = "MIC (\u{3bc}g/mL)";
/// Antibiotic axis title.
pub const ANTIBIOTIC_AXIS_LABEL: &str = "Antibiotic";

/// Point area for the focus antibiotic's markers (area units).
pub const FOCUS_POINT_AREA: f64 = 150.0;

/// Layout variant of the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartVariant {
    /// MIC on a log x axis, antibiotics on a band y axis; the focus
    /// antibiotic drawn as larger triangles.
    ShapeEncoded,
    /// MIC on a log x axis, antibiotics as jittered positions on a
    /// continuous y axis; uniform markers.
    Jittered,
    /// Antibiotics on a band x axis, MIC on a log y axis; uniform markers.
    SimpleScatter,
}

/// Configuration for one chart build.
#[derive(Debug, Clone)]
pub struct ChartConfig {
    /// Chart title.
    pub title: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Layout variant.
    pub variant: ChartVariant,
    /// The antibiotic under study; drives the highlight partition.
    pub focus: String,
    /// Jitter half-range for the jittered variant.
    pub jitter: f64,
    /// Jitter seed; None draws a fresh layout each render.
    pub jitter_seed: Option<u64>,
    /// Optional threshold annotation. Its MIC axis and anchor are adapted
    /// to the selected variant.
    pub annotation: Option<AnnotationSpec>,
}

impl ChartConfig {
    /// The built-in chart configuration in the requested variant.
    #[must_use]
    pub fn burtin(variant: ChartVariant) -> Self {
        Self {
            title: BURTIN_TITLE.to_string(),
            width: 700,
            height: 400,
            variant,
            focus: "Penicillin".to_string(),
            jitter: DEFAULT_JITTER,
            jitter_seed: None,
            annotation: Some(AnnotationSpec::burtin()),
        }
    }

    /// Fix the jitter seed for reproducible layouts.
    #[must_use]
    pub fn seeded(mut self, seed: u64) -> Self {
        self.jitter_seed = Some(seed);
        self
    }
}

/// Build a composed chart from a dataset and a configuration.
///
/// Each call is a fresh, one-shot computation; nothing is cached between
/// renders.
///
/// # Errors
///
/// Propagates validation failures from the dataset, the reshaper, the
/// encodings, and the compositor.
pub fn build_chart(dataset: &Dataset, config: &ChartConfig) -> Result<BuiltChart> {
    dataset.validate()?;

    let focus = config.focus.clone();
    let mut observations = melt(dataset, |antibiotic| antibiotic == focus)?;

    if config.variant == ChartVariant::Jittered {
        let mut jitter = match config.jitter_seed {
            Some(seed) => Jitter::with_seed(config.jitter, seed),
            None => Jitter::new(config.jitter),
        };
        jitter.apply(dataset.antibiotics(), &mut observations)?;
    }

    let table = observations_table(&observations);
    let tooltip = ["species", "antibiotic", "mic", "gram_stain"];

    let (mark, encoding, mic_axis) = match config.variant {
        ChartVariant::ShapeEncoded => {
            let shape = DiscreteScale::new(
                &[config.focus.as_str(), OTHER_GROUP],
                &[MarkShape::Triangle, MarkShape::Circle],
                MarkShape::Circle,
            );
            let area = DiscreteScale::new(
                &[config.focus.as_str(), OTHER_GROUP],
                &[FOCUS_POINT_AREA, DEFAULT_POINT_AREA],
                DEFAULT_POINT_AREA,
            );
            let encoding = Encoding::new()
                .x("mic", ScaleKind::Log)
                .y("antibiotic", ScaleKind::Band)
                .color("gram_stain")
                .shape("highlight")
                .size("highlight")
                .tooltip(&tooltip);
            (Mark::point_scaled(shape, area), encoding, MicAxis::X)
        }
        ChartVariant::Jittered => {
            let encoding = Encoding::new()
                .x("mic", ScaleKind::Log)
                .y("position", ScaleKind::Linear)
                .color("gram_stain")
                .tooltip(&tooltip);
            (Mark::point(), encoding, MicAxis::X)
        }
        ChartVariant::SimpleScatter => {
            let encoding = Encoding::new()
                .x("antibiotic", ScaleKind::Band)
                .y("mic", ScaleKind::Log)
                .color("gram_stain")
                .tooltip(&tooltip);
            (Mark::point(), encoding, MicAxis::Y)
        }
    };

    let mut chart = Chart::new()
        .title(config.title.clone())
        .dimensions(config.width, config.height)
        .layer(Layer::new(mark, table, encoding));

    chart = match config.variant {
        ChartVariant::ShapeEncoded | ChartVariant::Jittered => {
            chart.xlab(MIC_AXIS_LABEL).ylab(ANTIBIOTIC_AXIS_LABEL)
        }
        ChartVariant::SimpleScatter => chart.xlab(ANTIBIOTIC_AXIS_LABEL).ylab(MIC_AXIS_LABEL),
    };

    if let Some(annotation) = &config.annotation {
        // The label can only anchor on a band axis; the jittered variant
        // has none.
        let annotation = match config.variant {
            ChartVariant::ShapeEncoded => annotation.clone().on_axis(mic_axis),
            ChartVariant::Jittered | ChartVariant::SimpleScatter => {
                annotation.clone().on_axis(mic_axis).anchored(None)
            }
        };
        for layer in annotation.layers() {
            chart = chart.layer(layer);
        }
    }

    chart.build()
}
