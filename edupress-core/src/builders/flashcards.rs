use super::DocumentBuilder;
use crate::content::{Flashcard, FlashcardSet};
use crate::error::Result;
use crate::graphics::Color;
use crate::layout::{
    Frame, PaginatedCanvas, PlaceOptions, Primitive, Rule, Stroke, TextBlock,
};
use crate::text::Font;

pub const CARD_WIDTH: f64 = 85.0;
pub const CARD_HEIGHT: f64 = 55.0;
const CARD_LEFT: f64 = 20.0;
const FIRST_CARD_TOP: f64 = 30.0;
const PAIR_GAP: f64 = 5.0;
const CARD_TEXT_SIZE: f64 = 12.0;
const MIN_CARD_TEXT_SIZE: f64 = 7.0;
/// Room for card text below the corner label.
const CARD_TEXT_HEIGHT: f64 = CARD_HEIGHT - 8.0;
const BORDER_WIDTH: f64 = 0.3;

/// Fold-and-cut study cards: the question box sits left of the answer box
/// with a dashed fold line between them.
pub struct FlashcardDocumentBuilder<'a> {
    set: &'a FlashcardSet,
}

impl<'a> FlashcardDocumentBuilder<'a> {
    pub fn new(set: &'a FlashcardSet) -> Self {
        Self { set }
    }

    /// Text wrapped inside a card and centred both ways. Long text steps the
    /// font down, then drops the lines that still do not fit.
    fn card_text(text: &str, font: Font, card_left: f64) -> (f64, Primitive) {
        let wrap = |size: f64| {
            TextBlock::centered(text, font, size, card_left + CARD_WIDTH / 2.0, CARD_WIDTH - 10.0)
        };

        let mut size = CARD_TEXT_SIZE;
        let mut block = wrap(size);
        while block.height() > CARD_TEXT_HEIGHT && size > MIN_CARD_TEXT_SIZE {
            size -= 1.0;
            block = wrap(size);
        }

        let max_lines = (CARD_TEXT_HEIGHT / block.line_height).floor() as usize;
        if block.lines.len() > max_lines {
            block.lines.truncate(max_lines);
            if let Some(last) = block.lines.last_mut() {
                last.push_str("...");
            }
        }

        let offset = (CARD_HEIGHT - block.height()) / 2.0;
        (offset, block.into())
    }

    fn corner_label(text: &str, x: f64) -> (f64, Primitive) {
        let label = TextBlock::single(text, Font::Helvetica, 6.0, x).with_color(Color::gray8(150));
        (1.0, label.into())
    }

    /// One front/back pair as a single unit so it never straddles a page.
    pub fn card_pair(card: &Flashcard) -> Primitive {
        let back_left = CARD_LEFT + CARD_WIDTH;
        let fold = Rule::vertical(back_left, CARD_HEIGHT)
            .with_stroke(Stroke::new(BORDER_WIDTH).dashed(3.0, 3.0));

        Primitive::cluster(
            CARD_HEIGHT,
            vec![
                Self::card_text(&card.front, Font::HelveticaBold, CARD_LEFT),
                Self::card_text(&card.back, Font::Helvetica, back_left),
                (0.0, Frame::outline(CARD_LEFT, CARD_WIDTH, CARD_HEIGHT, BORDER_WIDTH).into()),
                (0.0, Frame::outline(back_left, CARD_WIDTH, CARD_HEIGHT, BORDER_WIDTH).into()),
                (0.0, fold.into()),
                Self::corner_label("FRONT (Question)", CARD_LEFT + 2.0),
                Self::corner_label("BACK (Answer) - FOLD HERE", back_left + 2.0),
            ],
        )
    }
}

impl DocumentBuilder for FlashcardDocumentBuilder<'_> {
    fn file_name(&self) -> String {
        format!("{}_Flashcards.pdf", self.set.topic)
    }

    fn title(&self) -> String {
        format!("Flashcards: {}", self.set.topic)
    }

    fn render(&self, canvas: &mut PaginatedCanvas) -> Result<()> {
        let set = self.set;
        let geometry = *canvas.geometry();
        canvas.set_subject(&set.subject);

        canvas.set_cursor(9.0);
        canvas.place(TextBlock::centered(
            &format!("Flashcards: {} ({})", set.topic, set.grade),
            Font::HelveticaBold,
            16.0,
            geometry.center_x(),
            geometry.content_width(),
        ));
        canvas.place(TextBlock::centered(
            &format!("{} - Generated by ZimEd Planner", set.subject),
            Font::Helvetica,
            10.0,
            geometry.center_x(),
            geometry.content_width(),
        ));
        if canvas.cursor() < FIRST_CARD_TOP {
            canvas.set_cursor(FIRST_CARD_TOP);
        }

        for card in &set.cards {
            canvas.place_with(Self::card_pair(card), PlaceOptions::gap(PAIR_GAP));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::normalize_flashcards;
    use crate::document::DocumentSettings;
    use crate::layout::PlacementKind;
    use serde_json::json;

    fn set(count: usize) -> FlashcardSet {
        let cards: Vec<_> = (0..count)
            .map(|i| json!({"front": format!("What is {i} + {i}?"), "back": format!("{}", i * 2)}))
            .collect();
        normalize_flashcards(&json!({
            "topic": "Addition",
            "grade": "Grade 3",
            "subject": "Mathematics",
            "cards": cards,
        }))
    }

    #[test]
    fn test_four_pairs_per_page() {
        let set = set(9);
        let artifact = FlashcardDocumentBuilder::new(&set)
            .build(&DocumentSettings::uncompressed())
            .unwrap();

        let pairs: Vec<_> = artifact
            .placements
            .iter()
            .filter(|p| p.kind == PlacementKind::Cluster)
            .collect();
        assert_eq!(pairs.len(), 9);
        // 30, 90, 150, 210 on the first page; 20, 80, 140, 200 after that
        assert_eq!(pairs[0].top, 30.0);
        assert_eq!(pairs[3].top, 210.0);
        assert_eq!(pairs[4].page, 1);
        assert_eq!(pairs[4].top, 20.0);
        assert_eq!(artifact.page_count, 3);
        assert!(pairs.iter().all(|p| p.bottom() <= 280.0));
    }

    #[test]
    fn test_pair_carries_both_sides() {
        let set = set(1);
        let pair = FlashcardDocumentBuilder::card_pair(&set.cards[0]);
        let text = pair.text();
        assert!(text.starts_with("What is 0 + 0? | 0"));
        assert!(text.contains("FRONT (Question)"));
        assert!(text.contains("BACK (Answer) - FOLD HERE"));
        assert_eq!(pair.height(), CARD_HEIGHT);
    }

    #[test]
    fn test_long_text_stays_inside_card() {
        let long = "Explain how the water cycle moves water between rivers, clouds and the ground. ".repeat(12);
        let card = Flashcard {
            id: "1".to_string(),
            front: long,
            back: "Short".to_string(),
        };
        let Primitive::Cluster { children, .. } = FlashcardDocumentBuilder::card_pair(&card) else {
            panic!("card pair is a cluster");
        };

        let (offset, front) = &children[0];
        let Primitive::Text(block) = front else {
            panic!("front is text");
        };
        assert!(block.size < CARD_TEXT_SIZE);
        assert!(*offset >= 0.0);
        assert!(offset + block.height() <= CARD_HEIGHT);
        assert!(block.lines.last().unwrap().ends_with("..."));

        let (_, back) = &children[1];
        let Primitive::Text(block) = back else {
            panic!("back is text");
        };
        assert_eq!(block.size, CARD_TEXT_SIZE);
    }

    #[test]
    fn test_no_cards_is_title_only() {
        let set = set(0);
        let artifact = FlashcardDocumentBuilder::new(&set)
            .build(&DocumentSettings::uncompressed())
            .unwrap();
        assert_eq!(artifact.page_count, 1);
        assert!(artifact.contains_text("Flashcards: Addition (Grade 3)"));
        assert_eq!(artifact.file_name, "Addition_Flashcards.pdf");
    }
}
