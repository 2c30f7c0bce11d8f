//! Chart layout and software rasterization.

mod primitives;
mod scene;

pub use primitives::{draw_circle, draw_dashed_line, draw_line, draw_triangle};
pub use scene::{area_to_radius, resolve, AxisGuide, LegendEntry, Panel, PlacedMark, Scene, Tick};
