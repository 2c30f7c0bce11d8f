//! Output encoders: vector SVG, raster PNG, and the HTML report page.

mod page;
mod png;
pub mod svg;

pub use page::{ChartBlock, Page};
pub use png::{rasterize, PngEncoder};
