//! Places a `ReportDocument` on fixed-size pages.
//!
//! Coordinates are PDF user space: origin bottom-left, y grows upward. The
//! cursor walks down from the top margin; any block that would cross the
//! bottom margin starts a new page.

use serde::Serialize;

use crate::layout::font_metrics::{get_metrics, FontFace, PageConfig};
use crate::report::{Item, ReportDocument};

const BULLET_INDENT: f32 = 14.0;
const NUMBER_INDENT: f32 = 18.0;
const DETAIL_INDENT: f32 = 24.0;
const SECTION_GAP: f32 = 14.0;
const BAR_LABEL_GAP: f32 = 8.0;

/// Grey levels (0 = black, 1 = white).
const INK: f32 = 0.06;
const MUTED: f32 = 0.3;
const BAR_TRACK: f32 = 0.9;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawOp {
    Text {
        x: f32,
        y: f32,
        size: f32,
        face: FontFace,
        gray: f32,
        text: String,
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        gray: f32,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

struct Cursor<'c> {
    config: &'c PageConfig,
    pages: Vec<Page>,
    current: Page,
    y: f32,
}

impl<'c> Cursor<'c> {
    fn new(config: &'c PageConfig) -> Self {
        Cursor {
            config,
            pages: Vec::new(),
            current: Page::default(),
            y: config.height_pt - config.margin_pt,
        }
    }

    /// Starts a new page unless `height` more points fit on this one.
    fn reserve(&mut self, height: f32) {
        let floor = self.config.margin_pt;
        let at_top = self.current.ops.is_empty();
        if !at_top && self.y - height < floor {
            self.pages.push(std::mem::take(&mut self.current));
            self.y = self.config.height_pt - self.config.margin_pt;
        }
    }

    fn gap(&mut self, points: f32) {
        if !self.current.ops.is_empty() {
            self.y -= points;
        }
    }

    /// Wraps `text` into the column starting at `indent` and draws it line by line.
    /// `marker` is drawn left of the first line, hanging in the indent.
    fn paragraph(&mut self, text: &str, face: FontFace, size: f32, gray: f32, indent: f32, marker: Option<&str>) {
        let metrics = get_metrics(face);
        let leading = size * self.config.line_spacing;
        let left = self.config.margin_pt + indent;
        let width = self.config.text_width_pt() - indent;

        for (index, line) in metrics.wrap(text, size, width).into_iter().enumerate() {
            self.reserve(leading);
            self.y -= leading;
            if index == 0 {
                if let Some(marker) = marker {
                    let marker_x = left - metrics.measure_str(marker, size) - 4.0;
                    self.text(marker_x, face, size, gray, marker.to_string());
                }
            }
            self.text(left, face, size, gray, line);
        }
    }

    fn text(&mut self, x: f32, face: FontFace, size: f32, gray: f32, text: String) {
        self.current.ops.push(DrawOp::Text {
            x,
            y: self.y,
            size,
            face,
            gray,
            text,
        });
    }

    fn bar(&mut self, label: &str, value: f64, max: f64) {
        let size = self.config.body_size;
        let leading = size * self.config.line_spacing;
        let bar_h = self.config.bar_height_pt;
        self.reserve(leading + bar_h + BAR_LABEL_GAP);

        self.y -= leading;
        let left = self.config.margin_pt;
        self.text(left, FontFace::Regular, size, INK, label.to_string());

        let track_y = self.y - bar_h - 4.0;
        let track_w = self.config.bar_width_pt;
        let ratio = if max > 0.0 { (value / max).clamp(0.0, 1.0) } else { 0.0 };
        self.current.ops.push(DrawOp::Rect {
            x: left,
            y: track_y,
            width: track_w,
            height: bar_h,
            gray: BAR_TRACK,
        });
        if ratio > 0.0 {
            self.current.ops.push(DrawOp::Rect {
                x: left,
                y: track_y,
                width: track_w * ratio as f32,
                height: bar_h,
                gray: INK,
            });
        }
        self.current.ops.push(DrawOp::Text {
            x: left + track_w + 8.0,
            y: track_y,
            size: self.config.footer_size,
            face: FontFace::Regular,
            gray: MUTED,
            text: format!("{value:.1}/{max:.0}"),
        });
        self.y = track_y - BAR_LABEL_GAP;
    }

    fn finish(mut self) -> Vec<Page> {
        if !self.current.ops.is_empty() || self.pages.is_empty() {
            self.pages.push(self.current);
        }
        self.pages
    }
}

/// Lays the document out on as many pages as it needs. Always returns at least one page.
pub fn paginate(doc: &ReportDocument, config: &PageConfig) -> Vec<Page> {
    let mut cursor = Cursor::new(config);

    cursor.paragraph(&doc.title, FontFace::Bold, config.title_size, INK, 0.0, None);

    for section in &doc.sections {
        cursor.gap(SECTION_GAP);
        // Keep a heading with at least its first body line.
        cursor.reserve(
            (config.heading_size + config.body_size) * config.line_spacing,
        );
        cursor.paragraph(&section.heading, FontFace::Bold, config.heading_size, INK, 0.0, None);

        for item in &section.items {
            match item {
                Item::Line(text) => {
                    cursor.paragraph(text, FontFace::Regular, config.body_size, MUTED, 0.0, None)
                }
                Item::Bullet(text) => cursor.paragraph(
                    text,
                    FontFace::Regular,
                    config.body_size,
                    MUTED,
                    BULLET_INDENT,
                    Some("•"),
                ),
                Item::Numbered { index, text } => cursor.paragraph(
                    text,
                    FontFace::Bold,
                    config.body_size,
                    INK,
                    NUMBER_INDENT,
                    Some(&format!("{index}.")),
                ),
                Item::Detail(text) => cursor.paragraph(
                    text,
                    FontFace::Regular,
                    config.body_size,
                    MUTED,
                    DETAIL_INDENT,
                    None,
                ),
                Item::Bar { label, value, max } => cursor.bar(label, *value, *max),
            }
        }
    }

    cursor.gap(SECTION_GAP);
    cursor.paragraph(&doc.footer, FontFace::Regular, config.footer_size, MUTED, 0.0, None);
    cursor.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font_metrics::default_page_config;
    use crate::report::Section;

    fn doc_with(items: Vec<Item>) -> ReportDocument {
        ReportDocument {
            title: "Relatório".to_string(),
            sections: vec![Section {
                heading: "RESUMO".to_string(),
                items,
            }],
            footer: "Rodapé".to_string(),
        }
    }

    fn text_ops(page: &Page) -> impl Iterator<Item = (&f32, &f32, &String)> {
        page.ops.iter().filter_map(|op| match op {
            DrawOp::Text { x, y, text, .. } => Some((x, y, text)),
            DrawOp::Rect { .. } => None,
        })
    }

    #[test]
    fn test_short_document_fits_one_page() {
        let config = default_page_config();
        let pages = paginate(&doc_with(vec![Item::Line("Uma linha.".to_string())]), &config);
        assert_eq!(pages.len(), 1);
        let texts: Vec<&String> = text_ops(&pages[0]).map(|(_, _, t)| t).collect();
        assert_eq!(texts, vec!["Relatório", "RESUMO", "Uma linha.", "Rodapé"]);
    }

    #[test]
    fn test_long_document_breaks_pages_within_margins() {
        let config = default_page_config();
        let items = (0..120)
            .map(|i| Item::Bullet(format!("Observação número {i} sobre o padrão identificado.")))
            .collect();
        let pages = paginate(&doc_with(items), &config);
        assert!(pages.len() >= 3, "got {} pages", pages.len());
        for page in &pages {
            for (_, y, _) in text_ops(page) {
                assert!(*y >= config.margin_pt - 1e-3);
                assert!(*y <= config.height_pt - config.margin_pt);
            }
        }
    }

    #[test]
    fn test_bar_fill_is_proportional() {
        let config = default_page_config();
        let pages = paginate(
            &doc_with(vec![Item::Bar {
                label: "Sono".to_string(),
                value: 3.0,
                max: 4.0,
            }]),
            &config,
        );
        let rects: Vec<f32> = pages[0]
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Rect { width, .. } => Some(*width),
                DrawOp::Text { .. } => None,
            })
            .collect();
        assert_eq!(rects.len(), 2);
        assert!((rects[0] - config.bar_width_pt).abs() < 1e-3);
        assert!((rects[1] - config.bar_width_pt * 0.75).abs() < 1e-3);
    }

    #[test]
    fn test_zero_bar_draws_only_track() {
        let config = default_page_config();
        let pages = paginate(
            &doc_with(vec![Item::Bar {
                label: "Foco".to_string(),
                value: 0.0,
                max: 4.0,
            }]),
            &config,
        );
        let rects = pages[0]
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Rect { .. }))
            .count();
        assert_eq!(rects, 1);
    }

    #[test]
    fn test_long_unbroken_answer_stays_inside_right_margin() {
        let config = default_page_config();
        let token = format!("https://exemplo.com.br/{}", "a".repeat(150));
        let pages = paginate(
            &doc_with(vec![
                Item::Detail(format!("Resposta: \"{token}\"")),
                Item::Numbered {
                    index: 1,
                    text: "x".repeat(300),
                },
            ]),
            &config,
        );
        let right_edge = config.width_pt - config.margin_pt;
        for page in &pages {
            for op in &page.ops {
                if let DrawOp::Text {
                    x, size, face, text, ..
                } = op
                {
                    let end = x + get_metrics(*face).measure_str(text, *size);
                    assert!(end <= right_edge + 1e-3, "'{text}' ends at {end}, margin {right_edge}");
                }
            }
        }
    }

    #[test]
    fn test_markers_hang_left_of_text() {
        let config = default_page_config();
        let pages = paginate(&doc_with(vec![Item::Bullet("Ponto".to_string())]), &config);
        let ops: Vec<(&f32, &f32, &String)> = text_ops(&pages[0]).collect();
        let marker = ops.iter().find(|(_, _, t)| t.as_str() == "•").unwrap();
        let body = ops.iter().find(|(_, _, t)| t.as_str() == "Ponto").unwrap();
        assert!(marker.0 < body.0);
        assert_eq!(marker.1, body.1);
    }
}
