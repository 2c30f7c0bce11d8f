//! HTML page presenter.
//!
//! Assembles the final document: title, markdown body, the chart, and a
//! caption. The chart slot takes either an inline SVG document or PNG
//! bytes, which are embedded as a base64 data URI.

use crate::error::Result;
use base64::{engine::general_purpose::STANDARD, Engine};
use pulldown_cmark::{html, Parser};
use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// The chart block of a page.
#[derive(Debug, Clone)]
pub enum ChartBlock {
    /// An SVG document, inlined verbatim.
    Vector(String),
    /// PNG bytes, embedded as a data URI.
    Raster(Vec<u8>),
}

/// A report page: title, markdown body, chart, caption.
#[derive(Debug, Clone)]
pub struct Page {
    title: String,
    body_markup: String,
    chart: ChartBlock,
    caption: String,
}

impl Page {
    /// Create a page around an inline SVG chart.
    #[must_use]
    pub fn with_svg(
        title: impl Into<String>,
        body_markup: impl Into<String>,
        svg: String,
        caption: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            body_markup: body_markup.into(),
            chart: ChartBlock::Vector(svg),
            caption: caption.into(),
        }
    }

    /// Create a page around an embedded PNG chart.
    #[must_use]
    pub fn with_png(
        title: impl Into<String>,
        body_markup: impl Into<String>,
        png: Vec<u8>,
        caption: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            body_markup: body_markup.into(),
            chart: ChartBlock::Raster(png),
            caption: caption.into(),
        }
    }

    /// Render the page to an HTML document.
    #[must_use]
    pub fn render(&self) -> String {
        let mut page = String::with_capacity(32 * 1024);
        let title = escape_html(&self.title);

        let _ = write!(
            page,
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n\
             <meta charset=\"utf-8\">\n\
             <title>{title}</title>\n\
             <style>\n{STYLE}</style>\n\
             </head>\n<body>\n<main>\n"
        );

        let _ = writeln!(page, "<h1>{title}</h1>");
        let _ = writeln!(page, "{}", markdown_to_html(&self.body_markup));

        page.push_str("<figure>\n");
        match &self.chart {
            ChartBlock::Vector(svg) => page.push_str(svg),
            ChartBlock::Raster(bytes) => {
                let _ = writeln!(
                    page,
                    r#"<img src="data:image/png;base64,{}" alt="{title}">"#,
                    STANDARD.encode(bytes)
                );
            }
        }
        let _ = writeln!(page, "<figcaption>{}</figcaption>", markdown_to_html(&self.caption));
        page.push_str("</figure>\n");

        page.push_str("</main>\n</body>\n</html>\n");
        page
    }

    /// Write the page to an HTML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(self.render().as_bytes())?;
        Ok(())
    }
}

const STYLE: &str = "\
body { font-family: sans-serif; margin: 0; background: #fafafa; }\n\
main { max-width: 760px; margin: 0 auto; padding: 2rem 1rem; }\n\
h1 { font-size: 1.5rem; }\n\
figure { margin: 1.5rem 0; }\n\
figcaption { font-size: 0.85rem; color: #555; margin-top: 0.5rem; }\n";

fn markdown_to_html(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len() * 2);
    html::push_html(&mut out, Parser::new(markup));
    out
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
