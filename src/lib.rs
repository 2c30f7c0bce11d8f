//! # mic-viz
//!
//! Antibiotic potency visualization: a layered-chart pipeline over the
//! classic 16-species MIC (minimum inhibitory concentration) table.
//!
//! The crate reshapes a wide MIC table into long-form observations, binds
//! them to visual channels, overlays authored threshold annotations, and
//! renders the composed chart to SVG (with hover tooltips), PNG, or a full
//! HTML report page.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mic_viz::prelude::*;
//!
//! let chart = build_chart(
//!     &Dataset::burtin(),
//!     &ChartConfig::burtin(ChartVariant::ShapeEncoded),
//! )?;
//! let scene = render::resolve(&chart)?;
//! output::svg::write_to_file(&scene, "chart.svg")?;
//! ```
//!
//! Lower MIC means greater potency; the MIC axis is log-scaled, so values
//! must be strictly positive. The pipeline validates this at every stage
//! and fails fast with a named species and antibiotic.

#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in graphics/visualization code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color types and the categorical palette.
pub mod color;

/// Scale functions for data-to-visual mappings.
pub mod scale;

/// Minimal columnar tables carried by chart layers.
pub mod table;

// ============================================================================
// Data Modules
// ============================================================================

/// The wide-form MIC dataset and the built-in 16-species table.
pub mod dataset;

/// Wide-to-long reshaping, highlight partitioning, and jitter.
pub mod reshape;

// ============================================================================
// Chart Modules
// ============================================================================

/// Declarative chart model: encodings, layers, annotations, composition.
pub mod chart;

/// The configuration-driven pipeline from dataset to composed chart.
pub mod pipeline;

// ============================================================================
// Rendering Modules
// ============================================================================

/// RGBA raster buffer.
pub mod raster;

/// Chart layout and software rasterization.
pub mod render;

/// Output encoders (SVG, PNG, HTML page).
pub mod output;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for mic-viz operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types for convenient imports.
///
/// ```rust,ignore
/// use mic_viz::prelude::*;
/// ```
pub mod prelude {
    pub use crate::chart::{AnnotationSpec, BuiltChart, Chart, Encoding, Layer, Mark, ScaleKind};
    pub use crate::color::Rgba;
    pub use crate::dataset::{Dataset, GramStain, Record};
    pub use crate::error::{Error, Result};
    pub use crate::output::{Page, PngEncoder};
    pub use crate::pipeline::{build_chart, ChartConfig, ChartVariant};
    pub use crate::raster::Raster;
    pub use crate::render::Scene;
    pub use crate::reshape::{melt, Jitter, Observation};
    pub use crate::scale::{BandScale, LinearScale, LogScale, Scale};
}
