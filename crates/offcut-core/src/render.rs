//! SVG drawing of a visualizer canvas.

use crate::config::CanvasConfig;
use crate::packer::{format_utilization, utilization};
use crate::types::Rectangle;
use std::fmt::{self, Write};

const MARGIN: f64 = 20.0;
const FOOTER: f64 = 30.0;

/// Draws the canvas border, every rectangle with its label, and a
/// utilization footer.
pub fn render_svg(rectangles: &[Rectangle], canvas: &CanvasConfig) -> Result<String, fmt::Error> {
    let mut svg = String::new();
    let svg_width = canvas.width + 2.0 * MARGIN;
    let svg_height = canvas.height + 2.0 * MARGIN + FOOTER;

    writeln!(&mut svg, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(
        &mut svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        svg_width, svg_height, svg_width, svg_height
    )?;
    writeln!(
        &mut svg,
        r##"  <rect width="100%" height="100%" fill="#f5f5f5"/>"##
    )?;
    writeln!(
        &mut svg,
        r##"  <rect x="{}" y="{}" width="{}" height="{}" fill="#fff" stroke="#333" stroke-width="2"/>"##,
        MARGIN, MARGIN, canvas.width, canvas.height
    )?;

    for rect in rectangles {
        let x = MARGIN + rect.x;
        let y = MARGIN + rect.y;

        writeln!(
            &mut svg,
            r##"  <rect x="{}" y="{}" width="{}" height="{}" fill="{}" stroke="#333" stroke-width="1" opacity="0.8"/>"##,
            x,
            y,
            rect.width,
            rect.height,
            escape(&rect.color)
        )?;
        writeln!(
            &mut svg,
            r##"  <text x="{}" y="{}" font-family="Arial" font-size="10" fill="#fff" text-anchor="middle">{}</text>"##,
            x + rect.width / 2.0,
            y + rect.height / 2.0 + 3.0,
            escape(&rect.label)
        )?;
    }

    writeln!(
        &mut svg,
        r##"  <text x="{}" y="{}" font-family="Arial" font-size="12" fill="#666">Pieces: {} | Utilization: {}%</text>"##,
        MARGIN,
        MARGIN + canvas.height + FOOTER - 8.0,
        rectangles.len(),
        format_utilization(utilization(rectangles, canvas))
    )?;
    writeln!(&mut svg, "</svg>")?;

    Ok(svg)
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_each_rectangle() {
        let canvas = CanvasConfig::unscaled(600.0, 400.0);
        let rects = vec![
            Rectangle {
                x: 0.0,
                y: 0.0,
                width: 300.0,
                height: 200.0,
                label: "Shelf <A>".to_string(),
                color: "#4CAF50".to_string(),
            },
            Rectangle {
                x: 300.0,
                y: 0.0,
                width: 300.0,
                height: 200.0,
                label: "Piece 2".to_string(),
                color: "#2196F3".to_string(),
            },
        ];

        let svg = render_svg(&rects, &canvas).unwrap();

        assert!(svg.starts_with("<?xml"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains("Shelf &lt;A&gt;"));
        assert!(svg.contains(r##"fill="#2196F3""##));
        assert!(svg.contains("Pieces: 2 | Utilization: 50.00%"));
    }

    #[test]
    fn test_empty_canvas() {
        let svg = render_svg(&[], &CanvasConfig::default()).unwrap();
        assert!(svg.contains("Pieces: 0 | Utilization: 0.00%"));
    }
}
