mod encoding;
mod font;
mod metrics;
mod wrap;

pub use encoding::{encode_win_ansi, pdf_literal};
pub use font::Font;
pub use metrics::{char_width, measure_char, measure_text, split_into_words};
pub use wrap::wrap_text;
