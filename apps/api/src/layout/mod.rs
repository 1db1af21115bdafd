// Document renderer: report → positioned pages → PDF bytes.
// Rendering is CPU-bound; async callers run it inside tokio::task::spawn_blocking.

pub mod font_metrics;
pub mod paginate;
pub mod pdf;

pub use font_metrics::{default_page_config, PageConfig};

use anyhow::Result;

use crate::report::ReportDocument;

/// Lays out and serializes a report as a standalone PDF file.
pub fn render_pdf(doc: &ReportDocument, config: &PageConfig) -> Result<Vec<u8>> {
    let pages = paginate::paginate(doc, config);
    pdf::write_pdf(&pages, config, &doc.title)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::open_text::analyze_open_quiz;
    use crate::quiz::Catalog;
    use crate::report::{build_report, ReportInput};

    #[test]
    fn test_render_full_open_report() {
        let catalog = Catalog::builtin().unwrap();
        let quiz = catalog.by_id("ansiedade").unwrap();
        let answers = quiz
            .open_questions
            .iter()
            .map(|q| (q.id.clone(), "Acordo várias vezes de madrugada pensando no trabalho e fico exausto".repeat(4)))
            .collect();
        let result = analyze_open_quiz(quiz, &answers);
        let doc = build_report("Daniela", quiz, ReportInput::Open(&result));
        let bytes = render_pdf(&doc, &default_page_config()).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }
}
