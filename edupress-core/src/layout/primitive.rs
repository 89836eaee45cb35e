use crate::graphics::Color;
use crate::layout::geometry::{mm_to_pt, pt_to_mm};
use crate::layout::paint::{Painter, Stroke};
use crate::layout::table::TableRow;
use crate::layout::PlacementKind;
use crate::text::{measure_text, wrap_text, Font};

/// Millimetres per point, for turning a font size into a glyph box height.
const MM_PER_PT: f64 = 25.4 / 72.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Line height used when a block does not set one: half the point size, in
/// millimetres (10 pt text advances 5 mm per line).
pub fn default_line_height(font_size: f64) -> f64 {
    font_size * 0.5
}

/// Pre-wrapped lines of text in a single font.
///
/// `x` and `width` describe the box the lines are aligned within.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub lines: Vec<String>,
    pub font: Font,
    /// Font size in points
    pub size: f64,
    /// Distance between baselines in millimetres
    pub line_height: f64,
    pub x: f64,
    pub width: f64,
    pub align: Align,
    pub color: Color,
}

impl TextBlock {
    /// Wrap `text` to `width` millimetres starting at `x`.
    pub fn new(text: &str, font: Font, size: f64, x: f64, width: f64) -> Self {
        Self {
            lines: wrap_text(text, font, size, mm_to_pt(width)),
            font,
            size,
            line_height: default_line_height(size),
            x,
            width,
            align: Align::Left,
            color: Color::black(),
        }
    }

    /// One unwrapped line whose box is exactly as wide as the text.
    pub fn single(text: &str, font: Font, size: f64, x: f64) -> Self {
        let width = pt_to_mm(measure_text(text, font, size));
        Self {
            lines: vec![text.to_string()],
            font,
            size,
            line_height: default_line_height(size),
            x,
            width,
            align: Align::Left,
            color: Color::black(),
        }
    }

    /// Wrapped to `width` and centred on `center_x`.
    pub fn centered(text: &str, font: Font, size: f64, center_x: f64, width: f64) -> Self {
        Self::new(text, font, size, center_x - width / 2.0, width).with_align(Align::Center)
    }

    /// One line ending at `right_x`.
    pub fn right_aligned(text: &str, font: Font, size: f64, right_x: f64) -> Self {
        let mut block = Self::single(text, font, size, right_x);
        block.x = right_x - block.width;
        block.align = Align::Right;
        block
    }

    pub fn with_line_height(mut self, line_height: f64) -> Self {
        self.line_height = line_height;
        self
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn height(&self) -> f64 {
        self.lines.len() as f64 * self.line_height
    }

    pub fn text(&self) -> String {
        self.lines.join(" ")
    }

    pub(crate) fn paint(&self, painter: &mut Painter<'_>, top: f64) {
        let glyph_height = self.size * MM_PER_PT;
        let ascent = glyph_height * 0.8;

        for (i, line) in self.lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let line_width = pt_to_mm(measure_text(line, self.font, self.size));
            let x = match self.align {
                Align::Left => self.x,
                Align::Center => self.x + (self.width - line_width) / 2.0,
                Align::Right => self.x + self.width - line_width,
            };
            let line_top = top + self.line_height * i as f64;
            let baseline = line_top + (self.line_height - glyph_height) / 2.0 + ascent;
            painter.text(self.font, self.size, x, baseline, self.color, line);
        }
    }
}

/// Rectangle outline and/or fill.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub x: f64,
    pub width: f64,
    pub height: f64,
    pub stroke: Option<Stroke>,
    pub fill: Option<Color>,
}

impl Frame {
    pub fn outline(x: f64, width: f64, height: f64, line_width: f64) -> Self {
        Self {
            x,
            width,
            height,
            stroke: Some(Stroke::new(line_width)),
            fill: None,
        }
    }

    pub fn with_fill(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }
}

/// A straight line inside a reserved slot of `height` millimetres.
/// Endpoints are relative to the slot's top edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub height: f64,
    pub stroke: Stroke,
}

impl Rule {
    /// Horizontal writing line at the top of a `spacing`-tall slot.
    pub fn horizontal(x_start: f64, x_end: f64, spacing: f64) -> Self {
        Self {
            from: (x_start, 0.0),
            to: (x_end, 0.0),
            height: spacing,
            stroke: Stroke::default(),
        }
    }

    /// Vertical line running the full height of its slot.
    pub fn vertical(x: f64, length: f64) -> Self {
        Self {
            from: (x, 0.0),
            to: (x, length),
            height: length,
            stroke: Stroke::default(),
        }
    }

    /// Move a horizontal line `offset` millimetres down inside its slot.
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.from.1 = offset;
        self.to.1 = offset;
        self
    }

    pub fn with_stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = stroke;
        self
    }
}

/// Everything the canvas knows how to place.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Text(TextBlock),
    Frame(Frame),
    Rule(Rule),
    /// One table row; never split across pages
    Row(TableRow),
    /// Children drawn at offsets from a shared top edge, placed as one unit
    Cluster {
        height: f64,
        children: Vec<(f64, Primitive)>,
    },
    /// Vertical whitespace
    Space(f64),
}

impl Primitive {
    pub fn cluster(height: f64, children: Vec<(f64, Primitive)>) -> Self {
        Primitive::Cluster { height, children }
    }

    pub fn height(&self) -> f64 {
        match self {
            Primitive::Text(block) => block.height(),
            Primitive::Frame(frame) => frame.height,
            Primitive::Rule(rule) => rule.height,
            Primitive::Row(row) => row.height(),
            Primitive::Cluster { height, .. } => *height,
            Primitive::Space(height) => *height,
        }
    }

    pub fn kind(&self) -> PlacementKind {
        match self {
            Primitive::Text(_) => PlacementKind::Text,
            Primitive::Frame(_) => PlacementKind::Frame,
            Primitive::Rule(_) => PlacementKind::Rule,
            Primitive::Row(_) => PlacementKind::Row,
            Primitive::Cluster { .. } => PlacementKind::Cluster,
            Primitive::Space(_) => PlacementKind::Space,
        }
    }

    /// Readable text carried by the primitive, for the placement trace.
    pub fn text(&self) -> String {
        match self {
            Primitive::Text(block) => block.text(),
            Primitive::Row(row) => row.text(),
            Primitive::Cluster { children, .. } => children
                .iter()
                .map(|(_, child)| child.text())
                .filter(|text| !text.is_empty())
                .collect::<Vec<_>>()
                .join(" | "),
            Primitive::Frame(_) | Primitive::Rule(_) | Primitive::Space(_) => String::new(),
        }
    }

    pub(crate) fn paint(&self, painter: &mut Painter<'_>, top: f64) {
        match self {
            Primitive::Text(block) => block.paint(painter, top),
            Primitive::Frame(frame) => painter.rect(
                frame.x,
                top,
                frame.width,
                frame.height,
                frame.stroke.as_ref(),
                frame.fill,
            ),
            Primitive::Rule(rule) => painter.line(
                rule.from.0,
                top + rule.from.1,
                rule.to.0,
                top + rule.to.1,
                &rule.stroke,
            ),
            Primitive::Row(row) => row.paint(painter, top),
            Primitive::Cluster { children, .. } => {
                for (offset, child) in children {
                    child.paint(painter, top + offset);
                }
            }
            Primitive::Space(_) => {}
        }
    }
}

impl From<TextBlock> for Primitive {
    fn from(block: TextBlock) -> Self {
        Primitive::Text(block)
    }
}

impl From<Frame> for Primitive {
    fn from(frame: Frame) -> Self {
        Primitive::Frame(frame)
    }
}

impl From<Rule> for Primitive {
    fn from(rule: Rule) -> Self {
        Primitive::Rule(rule)
    }
}

impl From<TableRow> for Primitive {
    fn from(row: TableRow) -> Self {
        Primitive::Row(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_text_block_height_follows_lines() {
        let block = TextBlock::new("one\ntwo\nthree", Font::Helvetica, 10.0, 15.0, 180.0);
        assert_eq!(block.line_count(), 3);
        assert_eq!(block.height(), 15.0);
        assert_eq!(Primitive::from(block).height(), 15.0);
    }

    #[test]
    fn test_text_block_wraps_to_width() {
        let text = "Learners will collect leaves from the school garden and sort them by shape";
        let block = TextBlock::new(text, Font::Helvetica, 10.0, 10.0, 40.0);
        assert!(block.line_count() > 1);
        assert_eq!(block.text(), text);
    }

    #[test]
    fn test_right_aligned_ends_at_edge() {
        let block = TextBlock::right_aligned("[5]", Font::Helvetica, 10.0, 190.0);
        assert!((block.x + block.width - 190.0).abs() < 1e-9);
        assert_eq!(block.align, Align::Right);
    }

    #[test]
    fn test_centered_box() {
        let block = TextBlock::centered("SECTION A", Font::HelveticaBold, 12.0, 105.0, 190.0);
        assert_eq!(block.x, 10.0);
        assert_eq!(block.width, 190.0);
        assert_eq!(block.align, Align::Center);
    }

    #[test]
    fn test_rule_slot_height() {
        let rule = Rule::horizontal(20.0, 190.0, 8.0).with_offset(2.0);
        assert_eq!(rule.from, (20.0, 2.0));
        assert_eq!(rule.to, (190.0, 2.0));
        assert_eq!(Primitive::from(rule).height(), 8.0);
    }

    #[test]
    fn test_cluster_text_and_height() {
        let cluster = Primitive::cluster(
            40.0,
            vec![
                (0.0, TextBlock::single("EVALUATION:", Font::HelveticaBold, 10.0, 10.0).into()),
                (5.0, Frame::outline(10.0, 190.0, 35.0, 0.1).into()),
            ],
        );
        assert_eq!(cluster.height(), 40.0);
        assert_eq!(cluster.kind(), PlacementKind::Cluster);
        assert_eq!(cluster.text(), "EVALUATION:");
    }

    #[test]
    fn test_space_has_no_text() {
        let space = Primitive::Space(5.0);
        assert_eq!(space.height(), 5.0);
        assert!(space.text().is_empty());
    }
}
