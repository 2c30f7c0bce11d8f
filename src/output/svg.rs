//! Vector SVG output.
//!
//! Renders a resolved [`Scene`] to a standalone SVG document: gridlines,
//! axes, marks with hover tooltips (`<title>` children), legend, and title.

use crate::chart::MarkShape;
use crate::color::Rgba;
use crate::error::Result;
use crate::render::{PlacedMark, Scene, Tick};
use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::Write;
use std::path::Path;

const GRID_COLOR: Rgba = Rgba::rgb(221, 221, 221);
const AXIS_COLOR: Rgba = Rgba::rgb(136, 136, 136);
const TEXT_COLOR: Rgba = Rgba::rgb(51, 51, 51);
const TICK_LENGTH: f64 = 5.0;
const FONT: &str = "sans-serif";

/// Render a scene to an SVG document string.
#[must_use]
pub fn render(scene: &Scene) -> String {
    let mut svg = String::with_capacity(16 * 1024);

    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        scene.width, scene.height, scene.width, scene.height
    );
    let _ = writeln!(svg, r#"  <rect width="100%" height="100%" fill="{}"/>"#, css(Rgba::WHITE));

    write_grid(&mut svg, scene);
    write_axes(&mut svg, scene);
    for mark in &scene.marks {
        write_mark(&mut svg, mark);
    }
    write_legend(&mut svg, scene);

    if let Some(title) = &scene.title {
        let _ = writeln!(
            svg,
            r#"  <text x="{x}" y="24" font-size="16" font-weight="bold" fill="{fill}" text-anchor="middle" font-family="{FONT}">{text}</text>"#,
            x = f64::from(scene.width) / 2.0,
            fill = css(TEXT_COLOR),
            text = escape_xml(title),
        );
    }

    svg.push_str("</svg>\n");
    svg
}

/// Write a scene to an SVG file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_to_file<P: AsRef<Path>>(scene: &Scene, path: P) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(render(scene).as_bytes())?;
    Ok(())
}

fn write_grid(svg: &mut String, scene: &Scene) {
    let panel = scene.panel;
    for Tick { position, .. } in &scene.x_guide.ticks {
        let _ = writeln!(
            svg,
            r#"  <line x1="{position}" y1="{y1}" x2="{position}" y2="{y2}" stroke="{stroke}" stroke-width="1"/>"#,
            y1 = panel.y,
            y2 = panel.y + panel.height,
            stroke = css(GRID_COLOR),
        );
    }
    for Tick { position, .. } in &scene.y_guide.ticks {
        let _ = writeln!(
            svg,
            r#"  <line x1="{x1}" y1="{position}" x2="{x2}" y2="{position}" stroke="{stroke}" stroke-width="1"/>"#,
            x1 = panel.x,
            x2 = panel.x + panel.width,
            stroke = css(GRID_COLOR),
        );
    }
}

fn write_axes(svg: &mut String, scene: &Scene) {
    let panel = scene.panel;
    let baseline = panel.y + panel.height;

    // Domain lines.
    let _ = writeln!(
        svg,
        r#"  <line x1="{x1}" y1="{baseline}" x2="{x2}" y2="{baseline}" stroke="{stroke}" stroke-width="1"/>"#,
        x1 = panel.x,
        x2 = panel.x + panel.width,
        stroke = css(AXIS_COLOR),
    );
    let _ = writeln!(
        svg,
        r#"  <line x1="{x}" y1="{y1}" x2="{x}" y2="{baseline}" stroke="{stroke}" stroke-width="1"/>"#,
        x = panel.x,
        y1 = panel.y,
        stroke = css(AXIS_COLOR),
    );

    for Tick { position, label } in &scene.x_guide.ticks {
        let _ = writeln!(
            svg,
            r#"  <line x1="{position}" y1="{baseline}" x2="{position}" y2="{y2}" stroke="{stroke}" stroke-width="1"/>"#,
            y2 = baseline + TICK_LENGTH,
            stroke = css(AXIS_COLOR),
        );
        let _ = writeln!(
            svg,
            r#"  <text x="{position}" y="{y}" font-size="11" fill="{fill}" text-anchor="middle" font-family="{FONT}">{text}</text>"#,
            y = baseline + TICK_LENGTH + 12.0,
            fill = css(TEXT_COLOR),
            text = escape_xml(label),
        );
    }
    for Tick { position, label } in &scene.y_guide.ticks {
        let _ = writeln!(
            svg,
            r#"  <line x1="{x1}" y1="{position}" x2="{x2}" y2="{position}" stroke="{stroke}" stroke-width="1"/>"#,
            x1 = panel.x - TICK_LENGTH,
            x2 = panel.x,
            stroke = css(AXIS_COLOR),
        );
        let _ = writeln!(
            svg,
            r#"  <text x="{x}" y="{y}" font-size="11" fill="{fill}" text-anchor="end" font-family="{FONT}">{text}</text>"#,
            x = panel.x - TICK_LENGTH - 4.0,
            y = position + 4.0,
            fill = css(TEXT_COLOR),
            text = escape_xml(label),
        );
    }

    if let Some(title) = &scene.x_guide.title {
        let _ = writeln!(
            svg,
            r#"  <text x="{x}" y="{y}" font-size="12" fill="{fill}" text-anchor="middle" font-family="{FONT}">{text}</text>"#,
            x = panel.x + panel.width / 2.0,
            y = f64::from(scene.height) - 10.0,
            fill = css(TEXT_COLOR),
            text = escape_xml(title),
        );
    }
    if let Some(title) = &scene.y_guide.title {
        let cx = 18.0;
        let cy = panel.y + panel.height / 2.0;
        let _ = writeln!(
            svg,
            r#"  <text x="{cx}" y="{cy}" font-size="12" fill="{fill}" text-anchor="middle" font-family="{FONT}" transform="rotate(-90 {cx} {cy})">{text}</text>"#,
            fill = css(TEXT_COLOR),
            text = escape_xml(title),
        );
    }
}

fn write_mark(svg: &mut String, mark: &PlacedMark) {
    match mark {
        PlacedMark::Point { x, y, radius, shape, color, tooltip } => {
            let title = tooltip_title(tooltip);
            match shape {
                MarkShape::Circle => {
                    let _ = writeln!(
                        svg,
                        r#"  <circle cx="{x}" cy="{y}" r="{radius}" fill="{fill}">{title}</circle>"#,
                        fill = css(*color),
                    );
                }
                MarkShape::Triangle => {
                    let points = triangle_points(*x, *y, *radius);
                    let _ = writeln!(
                        svg,
                        r#"  <polygon points="{points}" fill="{fill}">{title}</polygon>"#,
                        fill = css(*color),
                    );
                }
            }
        }
        PlacedMark::Segment { x1, y1, x2, y2, color, width, dash } => {
            let dash_attr = dash
                .map(|(on, off)| format!(r#" stroke-dasharray="{on},{off}""#))
                .unwrap_or_default();
            let _ = writeln!(
                svg,
                r#"  <line x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}" stroke="{stroke}" stroke-width="{width}"{dash_attr}/>"#,
                stroke = css(*color),
            );
        }
        PlacedMark::Label { x, y, text, font_size, bold, color } => {
            let weight = if *bold { " font-weight=\"bold\"" } else { "" };
            let _ = writeln!(
                svg,
                r#"  <text x="{x}" y="{y}" font-size="{font_size}" fill="{fill}"{weight} font-family="{FONT}">{text}</text>"#,
                fill = css(*color),
                text = escape_xml(text),
            );
        }
    }
}

fn write_legend(svg: &mut String, scene: &Scene) {
    if scene.legend.is_empty() {
        return;
    }
    let x = scene.panel.x + scene.panel.width + 24.0;
    let mut y = scene.panel.y + 8.0;

    if let Some(title) = &scene.legend_title {
        let _ = writeln!(
            svg,
            r#"  <text x="{x}" y="{y}" font-size="12" font-weight="bold" fill="{fill}" font-family="{FONT}">{text}</text>"#,
            fill = css(TEXT_COLOR),
            text = escape_xml(title),
        );
        y += 18.0;
    }
    for entry in &scene.legend {
        let _ = writeln!(
            svg,
            r#"  <rect x="{x}" y="{ry}" width="10" height="10" fill="{fill}"/>"#,
            ry = y - 9.0,
            fill = css(entry.color),
        );
        let _ = writeln!(
            svg,
            r#"  <text x="{tx}" y="{y}" font-size="11" fill="{fill}" font-family="{FONT}">{text}</text>"#,
            tx = x + 16.0,
            fill = css(TEXT_COLOR),
            text = escape_xml(&entry.label),
        );
        y += 18.0;
    }
}

/// Vertices of the upward triangle inscribed in the circle of `radius`.
fn triangle_points(cx: f64, cy: f64, radius: f64) -> String {
    let half = radius * 3f64.sqrt() / 2.0;
    format!(
        "{cx},{top} {left},{bottom} {right},{bottom}",
        top = cy - radius,
        left = cx - half,
        right = cx + half,
        bottom = cy + radius / 2.0,
    )
}

fn tooltip_title(tooltip: &[(String, String)]) -> String {
    if tooltip.is_empty() {
        return String::new();
    }
    let body = tooltip
        .iter()
        .map(|(field, value)| format!("{}: {}", escape_xml(field), escape_xml(value)))
        .collect::<Vec<_>>()
        .join("&#10;");
    format!("<title>{body}</title>")
}

fn css(color: Rgba) -> String {
    if color.a == 255 {
        format!("rgb({},{},{})", color.r, color.g, color.b)
    } else {
        format!("rgba({},{},{},{:.3})", color.r, color.g, color.b, f32::from(color.a) / 255.0)
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;
    use crate::pipeline::{build_chart, ChartConfig, ChartVariant};
    use crate::render::resolve;

    fn burtin_svg(variant: ChartVariant) -> String {
        let chart =
            build_chart(&Dataset::burtin(), &ChartConfig::burtin(variant)).expect("builds");
        render(&resolve(&chart).expect("resolves"))
    }

    #[test]
    fn test_svg_document_shell() {
        let svg = burtin_svg(ChartVariant::ShapeEncoded);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>\n"));
        assert!(svg.contains(r#"width="700""#));
        assert!(svg.contains(r#"height="400""#));
    }

    #[test]
    fn test_svg_contains_marks() {
        let svg = burtin_svg(ChartVariant::ShapeEncoded);
        // 16 Penicillin triangles, 32 other-antibiotic circles.
        assert_eq!(svg.matches("<polygon").count(), 16);
        assert_eq!(svg.matches("<circle").count(), 32);
    }

    #[test]
    fn test_svg_tooltips_present() {
        let svg = burtin_svg(ChartVariant::ShapeEncoded);
        assert_eq!(svg.matches("<title>").count(), 48);
        assert!(svg.contains("species: Staphylococcus aureus"));
        assert!(svg.contains("mic: 0.001"));
    }

    #[test]
    fn test_svg_dashed_rule() {
        let svg = burtin_svg(ChartVariant::ShapeEncoded);
        assert!(svg.contains(r#"stroke-dasharray="4,4""#));
    }

    #[test]
    fn test_svg_annotation_label() {
        let svg = burtin_svg(ChartVariant::ShapeEncoded);
        assert!(svg.contains("Gram-positive MIC"));
        assert!(svg.contains(r#"font-weight="bold""#));
    }

    #[test]
    fn test_svg_title_and_axis_labels() {
        let svg = burtin_svg(ChartVariant::ShapeEncoded);
        assert!(svg.contains("Penicillin&#x2019;s Edge") || svg.contains("Edge Against"));
        assert!(svg.contains("MIC (\u{3bc}g/mL)"));
        assert!(svg.contains("Antibiotic"));
    }

    #[test]
    fn test_svg_legend() {
        let svg = burtin_svg(ChartVariant::ShapeEncoded);
        assert!(svg.contains(">negative</text>"));
        assert!(svg.contains(">positive</text>"));
    }

    #[test]
    fn test_svg_escapes_species_names() {
        // "Salmonella (Eberthella) typhosa" carries parens, fine; make sure
        // ampersands in arbitrary labels are escaped.
        assert_eq!(escape_xml("A & B <C>"), "A &amp; B &lt;C&gt;");
    }

    #[test]
    fn test_write_to_file() {
        let chart = build_chart(
            &Dataset::burtin(),
            &ChartConfig::burtin(ChartVariant::SimpleScatter),
        )
        .expect("builds");
        let scene = resolve(&chart).expect("resolves");

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("chart.svg");
        write_to_file(&scene, &path).expect("writes");

        let content = std::fs::read_to_string(&path).expect("readable");
        assert!(content.contains("</svg>"));
    }
}
