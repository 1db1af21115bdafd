//! Report Builder output: a structured document that renders both to the
//! stored plain-text report and to the paginated PDF.

mod builder;

pub use builder::{build_report, ReportInput};

use serde::Serialize;

/// Shown at the bottom of every report.
pub const DISCLAIMER: &str =
    "Este relatório é informativo e não substitui avaliação profissional.";

/// Verbatim free-text answers are cut to this many characters in the detail section.
pub const ANSWER_EXCERPT_CHARS: usize = 200;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Item {
    Line(String),
    Bullet(String),
    Numbered { index: usize, text: String },
    /// Indented continuation under a numbered entry.
    Detail(String),
    /// Category score drawn as a horizontal bar, `value` out of `max`.
    Bar { label: String, value: f64, max: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub heading: String,
    pub items: Vec<Item>,
}

impl Section {
    fn new(heading: &str) -> Self {
        Section {
            heading: heading.to_string(),
            items: Vec::new(),
        }
    }

    fn push(&mut self, item: Item) -> &mut Self {
        self.items.push(item);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportDocument {
    pub title: String,
    pub sections: Vec<Section>,
    pub footer: String,
}

impl ReportDocument {
    /// Plain-text rendering persisted in `quiz_responses.report`.
    pub fn render_text(&self) -> String {
        let mut lines = vec![self.title.clone(), String::new()];

        for section in &self.sections {
            lines.push(format!("{}:", section.heading));
            for item in &section.items {
                lines.push(match item {
                    Item::Line(text) => text.clone(),
                    Item::Bullet(text) => format!("• {text}"),
                    Item::Numbered { index, text } => format!("{index}. {text}"),
                    Item::Detail(text) => format!("   {text}"),
                    Item::Bar { label, value, max } => {
                        format!("{label}: {} {value:.1}/{max:.0}", text_bar(*value, *max))
                    }
                });
            }
            lines.push(String::new());
        }

        lines.push(self.footer.clone());
        lines.join("\n")
    }
}

/// Ten-cell bar such as `[######----]`.
fn text_bar(value: f64, max: f64) -> String {
    const CELLS: usize = 10;
    let ratio = if max > 0.0 { (value / max).clamp(0.0, 1.0) } else { 0.0 };
    let filled = (ratio * CELLS as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(CELLS - filled))
}

/// Cuts `text` to `limit` characters, appending `...` when something was dropped.
pub fn excerpt(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(limit).collect();
    cut.push_str("...");
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_bar_scales_to_ten_cells() {
        assert_eq!(text_bar(0.0, 4.0), "[----------]");
        assert_eq!(text_bar(2.0, 4.0), "[#####-----]");
        assert_eq!(text_bar(4.0, 4.0), "[##########]");
        assert_eq!(text_bar(9.0, 4.0), "[##########]");
    }

    #[test]
    fn test_excerpt_keeps_short_text() {
        assert_eq!(excerpt("curto", 200), "curto");
    }

    #[test]
    fn test_excerpt_counts_chars_not_bytes() {
        let text = "ç".repeat(250);
        let cut = excerpt(&text, 200);
        assert_eq!(cut.chars().count(), 203);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn test_render_text_layout() {
        let mut section = Section::new("RESUMO");
        section
            .push(Item::Line("Tudo certo.".to_string()))
            .push(Item::Bullet("Um ponto.".to_string()))
            .push(Item::Numbered {
                index: 1,
                text: "Pergunta".to_string(),
            })
            .push(Item::Detail("Resposta: sim".to_string()))
            .push(Item::Bar {
                label: "Sono".to_string(),
                value: 3.0,
                max: 4.0,
            });
        let doc = ReportDocument {
            title: "Relatório".to_string(),
            sections: vec![section],
            footer: DISCLAIMER.to_string(),
        };
        let expected = "Relatório\n\nRESUMO:\nTudo certo.\n• Um ponto.\n1. Pergunta\n   Resposta: sim\nSono: [########--] 3.0/4\n\n".to_string()
            + DISCLAIMER;
        assert_eq!(doc.render_text(), expected);
    }
}
