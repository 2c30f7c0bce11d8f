//! Declarative chart model: encodings, layers, annotations, composition.
//!
//! A chart is an ordered stack of layers over shared axis scales. Each layer
//! carries its own small table and a channel encoding; the compositor unions
//! scale domains so annotation layers line up with the data they annotate.

mod annotate;
mod compose;
mod encoding;
mod layer;

pub use annotate::{AnnotationSpec, MicAxis};
pub use compose::{AxisDomain, BuiltChart, Chart};
pub use encoding::{DiscreteScale, Encoding, PositionChannel, ScaleKind};
pub use layer::{Layer, Mark, MarkShape, DEFAULT_POINT_AREA};
