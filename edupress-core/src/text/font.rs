/// The standard Type 1 fonts used by the document builders.
///
/// Standard fonts are available in every PDF reader and are never embedded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Font {
    /// Helvetica (sans-serif)
    Helvetica,
    /// Helvetica Bold
    HelveticaBold,
    /// Helvetica Oblique (italic)
    HelveticaOblique,
    /// Times Roman (serif)
    TimesRoman,
    /// Times Bold
    TimesBold,
    /// Times Italic
    TimesItalic,
    /// Courier (monospace)
    Courier,
}

impl Font {
    /// PostScript name used both as `/BaseFont` and as the resource key.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            Font::Helvetica => "Helvetica",
            Font::HelveticaBold => "Helvetica-Bold",
            Font::HelveticaOblique => "Helvetica-Oblique",
            Font::TimesRoman => "Times-Roman",
            Font::TimesBold => "Times-Bold",
            Font::TimesItalic => "Times-Italic",
            Font::Courier => "Courier",
        }
    }

    pub fn is_bold(&self) -> bool {
        matches!(self, Font::HelveticaBold | Font::TimesBold)
    }

    pub fn all() -> [Font; 7] {
        [
            Font::Helvetica,
            Font::HelveticaBold,
            Font::HelveticaOblique,
            Font::TimesRoman,
            Font::TimesBold,
            Font::TimesItalic,
            Font::Courier,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_font_pdf_names() {
        assert_eq!(Font::Helvetica.pdf_name(), "Helvetica");
        assert_eq!(Font::HelveticaBold.pdf_name(), "Helvetica-Bold");
        assert_eq!(Font::HelveticaOblique.pdf_name(), "Helvetica-Oblique");
        assert_eq!(Font::TimesRoman.pdf_name(), "Times-Roman");
        assert_eq!(Font::TimesBold.pdf_name(), "Times-Bold");
        assert_eq!(Font::TimesItalic.pdf_name(), "Times-Italic");
        assert_eq!(Font::Courier.pdf_name(), "Courier");
    }

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<&str> = Font::all().iter().map(Font::pdf_name).collect();
        assert_eq!(names.len(), 7);
    }

    #[test]
    fn test_is_bold() {
        assert!(Font::HelveticaBold.is_bold());
        assert!(Font::TimesBold.is_bold());
        assert!(!Font::TimesItalic.is_bold());
    }
}
