use crate::text::Font;

/// Advance widths for printable ASCII (U+0020..=U+007E), in 1/1000 of the
/// font size, taken from the Adobe core font AFM files.
type WidthTable = [u16; 95];

#[rustfmt::skip]
const HELVETICA: WidthTable = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: WidthTable = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

#[rustfmt::skip]
const TIMES_ROMAN: WidthTable = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 278, 278, 564, 564, 564, 444,
    921, 722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722,
    556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, 333, 278, 333, 469, 500,
    333, 444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, 500, 500,
    500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, 480, 200, 480, 541,
];

#[rustfmt::skip]
const TIMES_BOLD: WidthTable = [
    250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 570, 570, 570, 500,
    930, 722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944, 722, 778,
    611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667, 333, 278, 333, 581, 500,
    333, 500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833, 556, 500,
    556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444, 394, 220, 394, 520,
];

#[rustfmt::skip]
const TIMES_ITALIC: WidthTable = [
    250, 333, 420, 500, 500, 833, 778, 214, 333, 333, 500, 675, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 675, 675, 675, 500,
    920, 611, 611, 667, 722, 611, 611, 722, 722, 333, 444, 667, 556, 833, 667, 722,
    611, 722, 611, 500, 556, 722, 611, 833, 611, 556, 556, 389, 278, 389, 422, 500,
    333, 500, 500, 444, 500, 444, 278, 500, 500, 278, 278, 444, 278, 722, 500, 500,
    500, 500, 389, 389, 278, 500, 444, 667, 444, 444, 389, 400, 275, 400, 541,
];

const COURIER_WIDTH: u16 = 600;
const BULLET: char = '\u{2022}';

fn table_for(font: Font) -> Option<&'static WidthTable> {
    match font {
        Font::Helvetica | Font::HelveticaOblique => Some(&HELVETICA),
        Font::HelveticaBold => Some(&HELVETICA_BOLD),
        Font::TimesRoman => Some(&TIMES_ROMAN),
        Font::TimesBold => Some(&TIMES_BOLD),
        Font::TimesItalic => Some(&TIMES_ITALIC),
        Font::Courier => None,
    }
}

fn default_width(font: Font) -> u16 {
    match font {
        Font::Helvetica | Font::HelveticaOblique => 556,
        Font::HelveticaBold => 611,
        Font::TimesRoman | Font::TimesBold | Font::TimesItalic => 500,
        Font::Courier => COURIER_WIDTH,
    }
}

/// Width of one character in 1/1000 units.
pub fn char_width(ch: char, font: Font) -> u16 {
    let Some(table) = table_for(font) else {
        return COURIER_WIDTH;
    };

    match ch {
        ' '..='~' => table[ch as usize - 0x20],
        BULLET => 350,
        _ => default_width(font),
    }
}

/// Measure the width of a text string in a given font and size
pub fn measure_text(text: &str, font: Font, font_size: f64) -> f64 {
    let width_units: u32 = text.chars().map(|ch| char_width(ch, font) as u32).sum();

    (width_units as f64 / 1000.0) * font_size
}

/// Measure the width of a single character
pub fn measure_char(ch: char, font: Font, font_size: f64) -> f64 {
    (char_width(ch, font) as f64 / 1000.0) * font_size
}

/// Split text into words, preserving spaces
pub fn split_into_words(text: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut start = 0;
    let mut in_space = false;

    for (i, ch) in text.char_indices() {
        if ch.is_whitespace() {
            if !in_space {
                if i > start {
                    words.push(&text[start..i]);
                }
                start = i;
                in_space = true;
            }
        } else if in_space {
            if i > start {
                words.push(&text[start..i]);
            }
            start = i;
            in_space = false;
        }
    }

    if start < text.len() {
        words.push(&text[start..]);
    }

    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_text_helvetica() {
        // H 722 + e 556 + l 222 + l 222 + o 556 = 2278 units
        let width = measure_text("Hello", Font::Helvetica, 12.0);
        assert!((width - 27.336).abs() < 0.01);
    }

    #[test]
    fn test_measure_text_courier_is_monospace() {
        assert_eq!(measure_text("ABC", Font::Courier, 10.0), 18.0);
        assert_eq!(measure_text("iii", Font::Courier, 10.0), 18.0);
    }

    #[test]
    fn test_bold_is_wider() {
        let regular = measure_text("Lesson development", Font::Helvetica, 10.0);
        let bold = measure_text("Lesson development", Font::HelveticaBold, 10.0);
        assert!(bold > regular);
    }

    #[test]
    fn test_oblique_matches_regular() {
        assert_eq!(
            measure_text("Answer all questions.", Font::Helvetica, 10.0),
            measure_text("Answer all questions.", Font::HelveticaOblique, 10.0)
        );
    }

    #[test]
    fn test_non_ascii_characters() {
        assert_eq!(char_width('\u{2022}', Font::Helvetica), 350);
        assert_eq!(char_width('\u{00E9}', Font::TimesRoman), 500);
        assert_eq!(char_width('\u{2022}', Font::Courier), 600);
    }

    #[test]
    fn test_measure_char() {
        let width = measure_char('W', Font::TimesBold, 10.0);
        assert!((width - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_split_into_words() {
        assert_eq!(
            split_into_words("Hello  world test"),
            vec!["Hello", "  ", "world", " ", "test"]
        );
        assert_eq!(split_into_words("   "), vec!["   "]);
        assert!(split_into_words("").is_empty());
    }
}
