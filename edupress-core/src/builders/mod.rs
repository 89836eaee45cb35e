//! Document builders.
//!
//! Each builder reads one normalized content shape and issues layout
//! primitives to a fresh [`PaginatedCanvas`]. Builders never share a canvas.

mod assessment;
mod exam;
mod flashcards;
mod labels;
mod lesson;
mod text_sheet;

pub use assessment::{AssessmentDocumentBuilder, ASSESSMENT_LINES_PER_MARK, ASSESSMENT_MIN_LINES};
pub use exam::{ExamDocumentBuilder, EXAM_LINES_PER_MARK, EXAM_MIN_LINES};
pub use flashcards::FlashcardDocumentBuilder;
pub use labels::{ExamLabels, LabelSet};
pub use lesson::LessonDocumentBuilder;
pub use text_sheet::build_text_sheet;

use crate::content::NormalizedContent;
use crate::document::DocumentSettings;
use crate::error::Result;
use crate::layout::{DocumentArtifact, PageGeometry, PaginatedCanvas, PlaceOptions, TextBlock};

/// Renders one content shape into a finished document.
pub trait DocumentBuilder {
    /// Download name for the finished file
    fn file_name(&self) -> String;

    /// Document title written to the PDF metadata
    fn title(&self) -> String;

    fn render(&self, canvas: &mut PaginatedCanvas) -> Result<()>;

    fn build(&self, settings: &DocumentSettings) -> Result<DocumentArtifact> {
        let mut canvas = PaginatedCanvas::new(PageGeometry::default(), settings.clone());
        canvas.set_title(self.title());
        self.render(&mut canvas)?;
        canvas.finish(sanitize_file_name(&self.file_name()))
    }
}

/// Pick the builder for `content` and run it on its own canvas.
pub fn build_document(
    content: &NormalizedContent,
    settings: &DocumentSettings,
) -> Result<DocumentArtifact> {
    match content {
        NormalizedContent::Lesson(plan) => LessonDocumentBuilder::new(plan).build(settings),
        NormalizedContent::Flashcards(set) => FlashcardDocumentBuilder::new(set).build(settings),
        NormalizedContent::Assessment(assessment) => {
            AssessmentDocumentBuilder::new(assessment).build(settings)
        }
        NormalizedContent::Exam(exam) => ExamDocumentBuilder::new(exam).build(settings),
    }
}

/// Replace anything outside `[A-Za-z0-9._-]` with an underscore.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Place a wrapped block one line at a time so long text can cross pages.
pub(crate) fn place_flowing(canvas: &mut PaginatedCanvas, block: TextBlock, gap: f64) {
    let count = block.lines.len();
    for (i, line) in block.lines.iter().enumerate() {
        let single = TextBlock {
            lines: vec![line.clone()],
            ..block.clone()
        };
        let options = if i + 1 == count {
            PlaceOptions::gap(gap)
        } else {
            PlaceOptions::default()
        };
        canvas.place_with(single, options);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::Font;

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(
            sanitize_file_name("Science and Technology_LessonPlan_2025/01/14.pdf"),
            "Science_and_Technology_LessonPlan_2025_01_14.pdf"
        );
        assert_eq!(sanitize_file_name("Zvirimo:Tsumo?.pdf"), "Zvirimo_Tsumo_.pdf");
    }

    #[test]
    fn test_place_flowing_crosses_pages() {
        let text = "word ".repeat(2000);
        let block = TextBlock::new(&text, Font::Helvetica, 10.0, 15.0, 180.0);
        let lines = block.line_count();
        let mut canvas = PaginatedCanvas::new(PageGeometry::default(), DocumentSettings::uncompressed());
        place_flowing(&mut canvas, block, 5.0);

        assert!(canvas.page_count() > 1);
        assert_eq!(canvas.placements().len(), lines);
        assert!(canvas.placements().iter().all(|p| !p.overflow));
    }
}
