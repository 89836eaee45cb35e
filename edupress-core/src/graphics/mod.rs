mod color;
mod dash;

pub use color::Color;
pub use dash::LineDashPattern;

use crate::text::{pdf_literal, Font};
use std::collections::BTreeSet;
use std::fmt::{self, Write};

/// Accumulates content-stream operators for one page.
///
/// Coordinates are PDF user space: points, origin at the bottom-left.
#[derive(Clone, Debug)]
pub struct GraphicsContext {
    operations: String,
    fill_color: Color,
    stroke_color: Color,
    line_width: f64,
    fonts: BTreeSet<Font>,
}

impl Default for GraphicsContext {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphicsContext {
    pub fn new() -> Self {
        Self {
            operations: String::new(),
            fill_color: Color::black(),
            stroke_color: Color::black(),
            line_width: 1.0,
            fonts: BTreeSet::new(),
        }
    }

    fn op(&mut self, args: fmt::Arguments<'_>) {
        // Writing into a String cannot fail.
        let _ = self.operations.write_fmt(args);
        self.operations.push('\n');
    }

    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.op(format_args!("{x:.2} {y:.2} m"));
        self
    }

    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.op(format_args!("{x:.2} {y:.2} l"));
        self
    }

    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> &mut Self {
        self.op(format_args!("{x:.2} {y:.2} {width:.2} {height:.2} re"));
        self
    }

    pub fn stroke(&mut self) -> &mut Self {
        self.apply_stroke_color();
        self.operations.push_str("S\n");
        self
    }

    pub fn fill(&mut self) -> &mut Self {
        self.apply_fill_color();
        self.operations.push_str("f\n");
        self
    }

    pub fn fill_stroke(&mut self) -> &mut Self {
        self.apply_fill_color();
        self.apply_stroke_color();
        self.operations.push_str("B\n");
        self
    }

    pub fn set_stroke_color(&mut self, color: Color) -> &mut Self {
        self.stroke_color = color;
        self
    }

    pub fn set_fill_color(&mut self, color: Color) -> &mut Self {
        self.fill_color = color;
        self
    }

    pub fn set_line_width(&mut self, width: f64) -> &mut Self {
        self.line_width = width;
        self.op(format_args!("{width:.2} w"));
        self
    }

    pub fn set_line_dash_pattern(&mut self, pattern: &LineDashPattern) -> &mut Self {
        let operator = pattern.to_pdf_operator();
        self.op(format_args!("{operator}"));
        self
    }

    pub fn save_state(&mut self) -> &mut Self {
        self.operations.push_str("q\n");
        self
    }

    pub fn restore_state(&mut self) -> &mut Self {
        self.operations.push_str("Q\n");
        self
    }

    /// Show one line of text with its baseline starting at (x, y), painted
    /// in the current fill color.
    pub fn show_text(&mut self, font: Font, size: f64, x: f64, y: f64, text: &str) -> &mut Self {
        self.fonts.insert(font);
        self.apply_fill_color();
        self.operations.push_str("BT\n");
        self.op(format_args!("/{} {size:.1} Tf", font.pdf_name()));
        self.op(format_args!("{x:.2} {y:.2} Td"));
        let literal = pdf_literal(text);
        self.op(format_args!("{literal} Tj"));
        self.operations.push_str("ET\n");
        self
    }

    fn apply_stroke_color(&mut self) {
        match self.stroke_color {
            Color::Rgb(r, g, b) => self.op(format_args!("{r:.3} {g:.3} {b:.3} RG")),
            Color::Gray(g) => self.op(format_args!("{g:.3} G")),
        }
    }

    fn apply_fill_color(&mut self) {
        match self.fill_color {
            Color::Rgb(r, g, b) => self.op(format_args!("{r:.3} {g:.3} {b:.3} rg")),
            Color::Gray(g) => self.op(format_args!("{g:.3} g")),
        }
    }

    pub fn fill_color(&self) -> Color {
        self.fill_color
    }

    pub fn stroke_color(&self) -> Color {
        self.stroke_color
    }

    pub fn line_width(&self) -> f64 {
        self.line_width
    }

    /// Fonts referenced by `Tf` operators so far, in a stable order.
    pub fn used_fonts(&self) -> impl Iterator<Item = Font> + '_ {
        self.fonts.iter().copied()
    }

    pub fn operations(&self) -> &str {
        &self.operations
    }
}
