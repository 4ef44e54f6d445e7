use std::fmt::Write as _;

use indexmap::IndexMap;

use crate::error::ChartResult;
use crate::render::{Color, RenderFrame, Renderer, TextHAlign};

/// Serializes each canvas into a standalone SVG document.
///
/// Documents are kept in the order the widget emitted their canvases, which
/// is the order a host page would stack them in.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    documents: IndexMap<String, String>,
}

impl SvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn document(&self, canvas_id: &str) -> Option<&str> {
        self.documents.get(canvas_id).map(String::as_str)
    }

    pub fn canvas_ids(&self) -> impl Iterator<Item = &str> {
        self.documents.keys().map(String::as_str)
    }

    /// All documents concatenated, in canvas order.
    #[must_use]
    pub fn to_markup(&self) -> String {
        self.documents.values().map(String::as_str).collect()
    }
}

impl Renderer for SvgRenderer {
    fn begin_pass(&mut self) {
        self.documents.clear();
    }

    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.documents
            .insert(frame.canvas_id.clone(), frame_to_svg(frame));
        Ok(())
    }
}

fn frame_to_svg(frame: &RenderFrame) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail; results are ignored below.
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" id="{}" width="{}" height="{}">"#,
        escape_xml(&frame.canvas_id),
        frame.viewport.width,
        frame.viewport.height
    );

    for path in &frame.paths {
        let _ = write!(out, r#"<path d="{}" fill="{}""#, path.path.to_svg(), paint(path.fill));
        if let Some(stroke) = path.stroke {
            let _ = write!(out, r#" stroke="{}""#, paint(stroke));
        }
        out.push_str("/>\n");
    }
    for rect in &frame.rects {
        let _ = writeln!(
            out,
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            paint(rect.fill)
        );
    }
    for line in &frame.lines {
        let _ = writeln!(
            out,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"/>"#,
            line.x1,
            line.y1,
            line.x2,
            line.y2,
            paint(line.color),
            line.stroke_width
        );
    }
    for text in &frame.texts {
        let anchor = match text.h_align {
            TextHAlign::Left => "start",
            TextHAlign::Center => "middle",
            TextHAlign::Right => "end",
        };
        let _ = writeln!(
            out,
            r#"<text x="{}" y="{}" font-size="{}" text-anchor="{anchor}" fill="{}">{}</text>"#,
            text.x,
            text.y,
            text.font_size_px,
            paint(text.color),
            escape_xml(&text.text)
        );
    }

    out.push_str("</svg>\n");
    out
}

fn paint(color: Color) -> String {
    if color.alpha < 1.0 {
        format!(
            "rgba({}, {}, {}, {})",
            (color.red * 255.0).round(),
            (color.green * 255.0).round(),
            (color.blue * 255.0).round(),
            color.alpha
        )
    } else {
        color.to_css()
    }
}

pub(crate) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}
