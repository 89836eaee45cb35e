use crate::graphics::{Color, GraphicsContext, LineDashPattern};
use crate::layout::geometry::mm_to_pt;
use crate::page::Page;
use crate::text::Font;

/// Line appearance for frames and rules. Widths are in millimetres.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub width: f64,
    pub color: Color,
    pub dash: Option<LineDashPattern>,
}

impl Stroke {
    pub fn new(width: f64) -> Self {
        Self {
            width,
            color: Color::black(),
            dash: None,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn dashed(mut self, dash: f64, gap: f64) -> Self {
        self.dash = Some(LineDashPattern::dashed(dash, gap));
        self
    }
}

impl Default for Stroke {
    fn default() -> Self {
        Self::new(0.1)
    }
}

/// Draws onto one page using top-down millimetre coordinates.
pub(crate) struct Painter<'a> {
    graphics: &'a mut GraphicsContext,
    page_height: f64,
}

impl<'a> Painter<'a> {
    pub(crate) fn new(page: &'a mut Page, page_height: f64) -> Self {
        Self {
            graphics: page.graphics(),
            page_height,
        }
    }

    fn flip(&self, y: f64) -> f64 {
        mm_to_pt(self.page_height - y)
    }

    fn apply_stroke(&mut self, stroke: &Stroke) {
        self.graphics
            .set_line_width(mm_to_pt(stroke.width))
            .set_stroke_color(stroke.color);
        if let Some(dash) = &stroke.dash {
            self.graphics
                .set_line_dash_pattern(&dash.scaled(mm_to_pt(1.0)));
        }
    }

    pub(crate) fn text(&mut self, font: Font, size: f64, x: f64, baseline: f64, color: Color, text: &str) {
        let y = self.flip(baseline);
        self.graphics
            .set_fill_color(color)
            .show_text(font, size, mm_to_pt(x), y, text);
    }

    pub(crate) fn rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        stroke: Option<&Stroke>,
        fill: Option<Color>,
    ) {
        if stroke.is_none() && fill.is_none() {
            return;
        }

        let bottom = self.flip(y + height);
        self.graphics.save_state();
        if let Some(stroke) = stroke {
            self.apply_stroke(stroke);
        }
        if let Some(color) = fill {
            self.graphics.set_fill_color(color);
        }
        self.graphics
            .rect(mm_to_pt(x), bottom, mm_to_pt(width), mm_to_pt(height));
        match (stroke.is_some(), fill.is_some()) {
            (true, true) => self.graphics.fill_stroke(),
            (false, true) => self.graphics.fill(),
            _ => self.graphics.stroke(),
        };
        self.graphics.restore_state();
    }

    pub(crate) fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: &Stroke) {
        let (start_y, end_y) = (self.flip(y1), self.flip(y2));
        self.graphics.save_state();
        self.apply_stroke(stroke);
        self.graphics
            .move_to(mm_to_pt(x1), start_y)
            .line_to(mm_to_pt(x2), end_y)
            .stroke();
        self.graphics.restore_state();
    }
}
