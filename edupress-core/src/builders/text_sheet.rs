use super::{place_flowing, sanitize_file_name};
use crate::document::DocumentSettings;
use crate::error::Result;
use crate::layout::{DocumentArtifact, PageGeometry, PaginatedCanvas, PlaceOptions, TextBlock};
use crate::text::Font;

/// Render plain text under a bold title, breaking pages as needed.
///
/// Used for reference papers that are stored as text rather than as a file.
pub fn build_text_sheet(
    title: &str,
    content: &str,
    settings: &DocumentSettings,
) -> Result<DocumentArtifact> {
    let geometry = PageGeometry::default();
    let mut canvas = PaginatedCanvas::new(geometry, settings.clone());
    canvas.set_title(title);

    canvas.set_cursor(10.0);
    let heading = TextBlock::centered(title, Font::HelveticaBold, 16.0, geometry.center_x(), 170.0)
        .with_line_height(7.0);
    canvas.place_with(heading, PlaceOptions::gap(6.0));

    let body = TextBlock::new(content, Font::Helvetica, 10.0, 15.0, 180.0);
    place_flowing(&mut canvas, body, 0.0);

    canvas.finish(sanitize_file_name(&format!("{title}.pdf")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_sheet_is_one_page() {
        let artifact = build_text_sheet(
            "Grade 7 Mathematics Paper 1",
            "1. Write 0.25 as a fraction.\n2. Find 15% of 60.",
            &DocumentSettings::uncompressed(),
        )
        .unwrap();

        assert_eq!(artifact.page_count, 1);
        assert_eq!(artifact.file_name, "Grade_7_Mathematics_Paper_1.pdf");
        assert!(artifact.contains_text("2. Find 15% of 60."));
    }

    #[test]
    fn test_long_sheet_breaks_pages() {
        let content: Vec<String> = (1..=120).map(|i| format!("{i}. Question line")).collect();
        let artifact = build_text_sheet("Past Paper", &content.join("\n"), &DocumentSettings::uncompressed())
            .unwrap();

        assert!(artifact.page_count >= 3);
        let last = artifact.placements.last().unwrap();
        assert_eq!(last.text, "120. Question line");
        assert!(artifact.placements.iter().all(|p| p.bottom() <= 280.0 + 1e-6));
    }
}
