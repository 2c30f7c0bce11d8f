//! Raster PNG output.
//!
//! Rasterizes a resolved [`Scene`] into an RGBA buffer and encodes it with
//! the `png` crate. The raster path draws gridlines, axes, marks, and
//! legend swatches; text (title, tick labels) is vector-only.

use crate::color::Rgba;
use crate::error::Result;
use crate::raster::Raster;
use crate::render::{draw_circle, draw_dashed_line, draw_line, draw_triangle, PlacedMark, Scene};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

const GRID_COLOR: Rgba = Rgba::rgb(221, 221, 221);
const AXIS_COLOR: Rgba = Rgba::rgb(136, 136, 136);

/// Rasterize a scene into an RGBA buffer.
///
/// # Errors
///
/// Returns an error if the scene dimensions are invalid.
pub fn rasterize(scene: &Scene) -> Result<Raster> {
    let mut raster = Raster::new(scene.width, scene.height)?;
    raster.clear(Rgba::WHITE);

    let panel = scene.panel;
    let (px, py) = (panel.x as i32, panel.y as i32);
    let (px2, py2) = ((panel.x + panel.width) as i32, (panel.y + panel.height) as i32);

    for tick in &scene.x_guide.ticks {
        let x = tick.position as i32;
        draw_line(&mut raster, x, py, x, py2, GRID_COLOR);
    }
    for tick in &scene.y_guide.ticks {
        let y = tick.position as i32;
        draw_line(&mut raster, px, y, px2, y, GRID_COLOR);
    }

    // Domain lines.
    draw_line(&mut raster, px, py2, px2, py2, AXIS_COLOR);
    draw_line(&mut raster, px, py, px, py2, AXIS_COLOR);

    for mark in &scene.marks {
        match mark {
            PlacedMark::Point { x, y, radius, shape, color, .. } => match shape {
                crate::chart::MarkShape::Circle => {
                    draw_circle(&mut raster, *x as i32, *y as i32, radius.round() as i32, *color);
                }
                crate::chart::MarkShape::Triangle => {
                    draw_triangle(&mut raster, *x, *y, *radius, *color);
                }
            },
            PlacedMark::Segment { x1, y1, x2, y2, color, dash, .. } => match dash {
                Some((on, off)) => {
                    draw_dashed_line(&mut raster, *x1, *y1, *x2, *y2, *on, *off, *color);
                }
                None => {
                    draw_line(
                        &mut raster,
                        *x1 as i32,
                        *y1 as i32,
                        *x2 as i32,
                        *y2 as i32,
                        *color,
                    );
                }
            },
            // No font rasterizer; labels appear in the vector output only.
            PlacedMark::Label { .. } => {}
        }
    }

    let mut swatch_y = (panel.y + 8.0) as u32;
    let swatch_x = (panel.x + panel.width + 24.0) as u32;
    for entry in &scene.legend {
        raster.fill_rect(swatch_x, swatch_y, 10, 10, entry.color);
        swatch_y += 18;
    }

    Ok(raster)
}

/// PNG encoder for raster output.
pub struct PngEncoder;

impl PngEncoder {
    /// Encode a raster to PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if PNG encoding fails.
    pub fn to_bytes(raster: &Raster) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();

        {
            let mut encoder = png::Encoder::new(&mut buffer, raster.width(), raster.height());
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);

            let mut writer = encoder.write_header()?;
            writer.write_image_data(&raster.rgba_bytes())?;
        }

        Ok(buffer)
    }

    /// Write a raster to a PNG file.
    ///
    /// # Errors
    ///
    /// Returns an error if file creation or PNG encoding fails.
    pub fn write_to_file<P: AsRef<Path>>(raster: &Raster, path: P) -> Result<()> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);

        let mut encoder = png::Encoder::new(writer, raster.width(), raster.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header()?;
        writer.write_image_data(&raster.rgba_bytes())?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;
    use crate::pipeline::{build_chart, ChartConfig, ChartVariant};
    use crate::render::resolve;

    fn burtin_raster() -> Raster {
        let chart = build_chart(
            &Dataset::burtin(),
            &ChartConfig::burtin(ChartVariant::ShapeEncoded),
        )
        .expect("builds");
        rasterize(&resolve(&chart).expect("resolves")).expect("rasterizes")
    }

    #[test]
    fn test_rasterize_dimensions() {
        let raster = burtin_raster();
        assert_eq!((raster.width(), raster.height()), (700, 400));
    }

    #[test]
    fn test_rasterize_draws_marks() {
        let raster = burtin_raster();
        // Something other than background and gridlines got drawn.
        let mut colored = 0;
        for y in 0..raster.height() {
            for x in 0..raster.width() {
                let p = raster.get_pixel(x, y).expect("in bounds");
                if p != Rgba::WHITE && p != GRID_COLOR && p != AXIS_COLOR {
                    colored += 1;
                }
            }
        }
        assert!(colored > 200, "colored pixels: {colored}");
    }

    #[test]
    fn test_png_magic_bytes() {
        let bytes = PngEncoder::to_bytes(&burtin_raster()).expect("encodes");
        assert_eq!(&bytes[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
    }

    #[test]
    fn test_png_write_to_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("chart.png");
        PngEncoder::write_to_file(&burtin_raster(), &path).expect("writes");
        let bytes = std::fs::read(&path).expect("readable");
        assert_eq!(&bytes[0..4], &[137, 80, 78, 71]);
    }
}
