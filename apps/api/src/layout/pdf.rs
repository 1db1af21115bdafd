//! Serializes laid-out pages through `printpdf`.
//!
//! Only the two built-in Helvetica faces are used, so no font files ship with
//! the service and the widths in `font_metrics` match what viewers draw.

use anyhow::{Context, Result};
use printpdf::{
    BuiltinFont, Color, Greyscale, IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Pt, Rect,
};

use crate::layout::font_metrics::{FontFace, PageConfig};
use crate::layout::paginate::{DrawOp, Page};

const LAYER_NAME: &str = "Relatório";

fn builtin_font(face: FontFace) -> BuiltinFont {
    match face {
        FontFace::Regular => BuiltinFont::Helvetica,
        FontFace::Bold => BuiltinFont::HelveticaBold,
    }
}

fn mm(points: f32) -> Mm {
    Mm::from(Pt(points))
}

fn gray(level: f32) -> Color {
    Color::Greyscale(Greyscale::new(level, None))
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl Fonts {
    fn get(&self, face: FontFace) -> &IndirectFontRef {
        match face {
            FontFace::Regular => &self.regular,
            FontFace::Bold => &self.bold,
        }
    }
}

fn draw_page(layer: &PdfLayerReference, fonts: &Fonts, page: &Page) {
    for op in &page.ops {
        match op {
            DrawOp::Text {
                x,
                y,
                size,
                face,
                gray: level,
                text,
            } => {
                layer.set_fill_color(gray(*level));
                layer.use_text(text.as_str(), *size, mm(*x), mm(*y), fonts.get(*face));
            }
            DrawOp::Rect {
                x,
                y,
                width,
                height,
                gray: level,
            } => {
                layer.set_fill_color(gray(*level));
                layer.add_rect(Rect::new(mm(*x), mm(*y), mm(x + width), mm(y + height)));
            }
        }
    }
}

/// Serializes pages into a complete PDF file titled `title`.
pub fn write_pdf(pages: &[Page], config: &PageConfig, title: &str) -> Result<Vec<u8>> {
    let (width, height) = (mm(config.width_pt), mm(config.height_pt));
    let (doc, first_page, first_layer) = PdfDocument::new(title, width, height, LAYER_NAME);

    let fonts = Fonts {
        regular: doc
            .add_builtin_font(builtin_font(FontFace::Regular))
            .context("failed to register Helvetica")?,
        bold: doc
            .add_builtin_font(builtin_font(FontFace::Bold))
            .context("failed to register Helvetica-Bold")?,
    };

    for (index, page) in pages.iter().enumerate() {
        let (page_index, layer_index) = if index == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(width, height, LAYER_NAME)
        };
        let layer = doc.get_page(page_index).get_layer(layer_index);
        draw_page(&layer, &fonts, page);
    }

    doc.save_to_bytes().context("failed to serialize PDF")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font_metrics::default_page_config;

    fn text_page(text: &str) -> Page {
        Page {
            ops: vec![
                DrawOp::Text {
                    x: 48.0,
                    y: 700.0,
                    size: 11.0,
                    face: FontFace::Regular,
                    gray: 0.0,
                    text: text.to_string(),
                },
                DrawOp::Rect {
                    x: 48.0,
                    y: 680.0,
                    width: 140.0,
                    height: 8.0,
                    gray: 0.9,
                },
            ],
        }
    }

    #[test]
    fn test_faces_map_to_helvetica_family() {
        assert!(matches!(builtin_font(FontFace::Regular), BuiltinFont::Helvetica));
        assert!(matches!(builtin_font(FontFace::Bold), BuiltinFont::HelveticaBold));
    }

    #[test]
    fn test_points_convert_to_millimetres() {
        assert!((mm(72.0).0 - 25.4).abs() < 1e-3);
    }

    #[test]
    fn test_pdf_envelope() {
        let bytes = write_pdf(&[text_page("Olá, ação")], &default_page_config(), "Relatório").unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        let tail = String::from_utf8_lossy(&bytes[bytes.len().saturating_sub(32)..]).into_owned();
        assert!(tail.contains("%%EOF"), "tail: {tail:?}");
    }

    #[test]
    fn test_every_page_is_written() {
        let config = default_page_config();
        let one = write_pdf(&[text_page("um")], &config, "R").unwrap();
        let three = write_pdf(
            &[text_page("um"), text_page("dois"), text_page("três")],
            &config,
            "R",
        )
        .unwrap();
        assert!(three.len() > one.len());
    }
}
