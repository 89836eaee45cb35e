use crate::text::{measure_char, measure_text, split_into_words, Font};

/// Break `text` into lines no wider than `max_width` (same unit as
/// [`measure_text`], i.e. points at `font_size`).
///
/// Embedded newlines always start a new line, so a blank paragraph yields an
/// empty line. Words are filled greedily; a single word wider than the line
/// is split between characters. The result always holds at least one line.
pub fn wrap_text(text: &str, font: Font, font_size: f64, max_width: f64) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        wrap_paragraph(
            paragraph.trim_end_matches('\r'),
            font,
            font_size,
            max_width,
            &mut lines,
        );
    }

    lines
}

fn wrap_paragraph(
    paragraph: &str,
    font: Font,
    font_size: f64,
    max_width: f64,
    lines: &mut Vec<String>,
) {
    let mut current = String::new();
    let mut current_width = 0.0;

    for word in split_into_words(paragraph) {
        let word_width = measure_text(word, font, font_size);

        if word.chars().all(char::is_whitespace) {
            if !current.is_empty() {
                current.push_str(word);
                current_width += word_width;
            }
            continue;
        }

        if !current.is_empty() && current_width + word_width > max_width {
            lines.push(current.trim_end().to_string());
            current.clear();
            current_width = 0.0;
        }

        if word_width <= max_width {
            current.push_str(word);
            current_width += word_width;
            continue;
        }

        for ch in word.chars() {
            let ch_width = measure_char(ch, font, font_size);
            if !current.is_empty() && current_width + ch_width > max_width {
                lines.push(std::mem::take(&mut current));
                current_width = 0.0;
            }
            current.push(ch);
            current_width += ch_width;
        }
    }

    lines.push(current.trim_end().to_string());
}
