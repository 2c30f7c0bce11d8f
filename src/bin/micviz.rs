//! Renders the antibiotic-potency chart in all three layout variants.
//!
//! Usage: `micviz [OUTPUT_DIR]` (default `out/`). Writes an SVG and a PNG
//! per variant plus the full HTML report page built around the
//! shape-encoded chart.

use mic_viz::dataset::{Dataset, BURTIN_CAPTION, BURTIN_INTRO, BURTIN_TITLE};
use mic_viz::output::{rasterize, svg, Page, PngEncoder};
use mic_viz::pipeline::{build_chart, ChartConfig, ChartVariant};
use mic_viz::render::resolve;
use mic_viz::Result;
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let out_dir: PathBuf = std::env::args().nth(1).unwrap_or_else(|| "out".to_string()).into();
    std::fs::create_dir_all(&out_dir)?;

    let dataset = Dataset::burtin();
    let variants = [
        (ChartVariant::ShapeEncoded, "mic_shape_encoded"),
        (ChartVariant::Jittered, "mic_jittered"),
        (ChartVariant::SimpleScatter, "mic_scatter"),
    ];

    let mut page_svg = None;
    for (variant, stem) in variants {
        // Fixed seed so repeated runs produce identical jittered layouts.
        let config = ChartConfig::burtin(variant).seeded(1951);
        let chart = build_chart(&dataset, &config)?;
        let scene = resolve(&chart)?;

        let svg_path = out_dir.join(format!("{stem}.svg"));
        svg::write_to_file(&scene, &svg_path)?;
        report(&svg_path);

        let png_path = out_dir.join(format!("{stem}.png"));
        PngEncoder::write_to_file(&rasterize(&scene)?, &png_path)?;
        report(&png_path);

        if variant == ChartVariant::ShapeEncoded {
            page_svg = Some(svg::render(&scene));
        }
    }

    if let Some(chart_svg) = page_svg {
        let page = Page::with_svg(BURTIN_TITLE, BURTIN_INTRO, chart_svg, BURTIN_CAPTION);
        let page_path = out_dir.join("report.html");
        page.write_to_file(&page_path)?;
        report(&page_path);
    }

    Ok(())
}

fn report(path: &Path) {
    println!("wrote {}", path.display());
}
