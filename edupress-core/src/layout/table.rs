//! Grid tables whose rows are laid out up front.
//!
//! Every cell is wrapped to its column width when the row is added, so a row
//! knows its own height before the canvas decides where it goes. Rows are
//! placed as single units and never split across pages.

use crate::error::{PressError, Result};
use crate::graphics::Color;
use crate::layout::geometry::mm_to_pt;
use crate::layout::paint::{Painter, Stroke};
use crate::layout::primitive::{default_line_height, TextBlock};
use crate::text::{wrap_text, Font};

/// Options for table rendering. Lengths are in millimetres.
#[derive(Debug, Clone)]
pub struct TableOptions {
    pub border_width: f64,
    pub border_color: Color,
    pub cell_padding: f64,
    /// Font for table text
    pub font: Font,
    /// Font size in points
    pub font_size: f64,
    pub line_height: f64,
    pub text_color: Color,
    /// Header row styling
    pub header_style: Option<HeaderStyle>,
}

/// Header row styling options
#[derive(Debug, Clone)]
pub struct HeaderStyle {
    pub background_color: Color,
    pub text_color: Color,
    pub font: Font,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            border_width: 0.1,
            border_color: Color::black(),
            cell_padding: 2.0,
            font: Font::Helvetica,
            font_size: 10.0,
            line_height: default_line_height(10.0),
            text_color: Color::black(),
            header_style: None,
        }
    }
}

/// Content of one cell before layout.
#[derive(Debug, Clone, PartialEq)]
pub struct TableCell {
    content: String,
    font: Option<Font>,
    colspan: usize,
}

impl TableCell {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            font: None,
            colspan: 1,
        }
    }

    /// A label cell in Helvetica Bold.
    pub fn label(content: impl Into<String>) -> Self {
        Self::new(content).with_font(Font::HelveticaBold)
    }

    pub fn with_font(mut self, font: Font) -> Self {
        self.font = Some(font);
        self
    }

    pub fn with_colspan(mut self, colspan: usize) -> Self {
        self.colspan = colspan.max(1);
        self
    }
}

/// A cell after wrapping, positioned relative to the table's left edge.
#[derive(Debug, Clone, PartialEq)]
struct LaidOutCell {
    x: f64,
    width: f64,
    text: TextBlock,
    fill: Option<Color>,
}

/// One laid-out row. Its height is the tallest cell plus padding.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    cells: Vec<LaidOutCell>,
    height: f64,
    is_header: bool,
    padding: f64,
    border: Stroke,
}

impl TableRow {
    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn is_header(&self) -> bool {
        self.is_header
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn cell_text(&self, index: usize) -> Option<String> {
        self.cells.get(index).map(|cell| cell.text.text())
    }

    pub fn text(&self) -> String {
        self.cells
            .iter()
            .map(|cell| cell.text.text())
            .collect::<Vec<_>>()
            .join(" | ")
    }

    pub(crate) fn paint(&self, painter: &mut Painter<'_>, top: f64) {
        for cell in &self.cells {
            painter.rect(cell.x, top, cell.width, self.height, Some(&self.border), cell.fill);
            cell.text.paint(painter, top + self.padding);
        }
    }
}

/// Represents a simple grid table
#[derive(Debug, Clone)]
pub struct Table {
    x: f64,
    column_widths: Vec<f64>,
    column_fonts: Vec<Option<Font>>,
    options: TableOptions,
    header: Option<TableRow>,
    rows: Vec<TableRow>,
}

impl Table {
    /// Create a new table at `x` with the given column widths
    pub fn new(x: f64, column_widths: Vec<f64>) -> Self {
        let column_fonts = vec![None; column_widths.len()];
        Self {
            x,
            column_widths,
            column_fonts,
            options: TableOptions::default(),
            header: None,
            rows: Vec::new(),
        }
    }

    /// Set table options. Applies to rows added afterwards.
    pub fn set_options(&mut self, options: TableOptions) -> &mut Self {
        self.options = options;
        self
    }

    /// Use `font` for every body cell in column `index`.
    pub fn set_column_font(&mut self, index: usize, font: Font) -> &mut Self {
        if let Some(slot) = self.column_fonts.get_mut(index) {
            *slot = Some(font);
        }
        self
    }

    pub fn width(&self) -> f64 {
        self.column_widths.iter().sum()
    }

    pub fn column_count(&self) -> usize {
        self.column_widths.len()
    }

    pub fn header(&self) -> Option<&TableRow> {
        self.header.as_ref()
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// Add the header row, repeated on every page the table continues onto
    pub fn add_header_row(&mut self, cells: Vec<String>) -> Result<&mut Self> {
        if cells.len() != self.column_widths.len() {
            return Err(PressError::InvalidStructure(
                "Header cells count doesn't match column count".to_string(),
            ));
        }

        let style = self.options.header_style.clone();
        let cells = cells
            .into_iter()
            .map(|content| {
                let font = style.as_ref().map_or(Font::HelveticaBold, |s| s.font);
                TableCell::new(content).with_font(font)
            })
            .collect();
        let row = self.layout_row(cells, true);
        self.header = Some(row);
        Ok(self)
    }

    /// Add a data row
    pub fn add_row(&mut self, cells: Vec<String>) -> Result<&mut Self> {
        self.add_custom_row(cells.into_iter().map(TableCell::new).collect())
    }

    /// Add a row of styled cells; spans must cover every column exactly
    pub fn add_custom_row(&mut self, cells: Vec<TableCell>) -> Result<&mut Self> {
        let spanned: usize = cells.iter().map(|cell| cell.colspan).sum();
        if spanned != self.column_widths.len() {
            return Err(PressError::InvalidStructure(format!(
                "Row spans {spanned} columns but the table has {}",
                self.column_widths.len()
            )));
        }

        let row = self.layout_row(cells, false);
        self.rows.push(row);
        Ok(self)
    }

    fn layout_row(&self, cells: Vec<TableCell>, is_header: bool) -> TableRow {
        let options = &self.options;
        let padding = options.cell_padding;
        let header_style = options.header_style.as_ref().filter(|_| is_header);

        let mut laid_out = Vec::with_capacity(cells.len());
        let mut column = 0;
        let mut x = self.x;

        for cell in cells {
            let span_end = (column + cell.colspan).min(self.column_widths.len());
            let width: f64 = self.column_widths[column..span_end].iter().sum();
            let font = cell
                .font
                .or(if is_header { None } else { self.column_fonts[column] })
                .unwrap_or(options.font);
            let color = header_style.map_or(options.text_color, |s| s.text_color);
            let inner_width = (width - 2.0 * padding).max(1.0);

            let text = TextBlock {
                lines: wrap_text(&cell.content, font, options.font_size, mm_to_pt(inner_width)),
                font,
                size: options.font_size,
                line_height: options.line_height,
                x: x + padding,
                width: inner_width,
                align: Default::default(),
                color,
            };

            laid_out.push(LaidOutCell {
                x,
                width,
                text,
                fill: header_style.map(|s| s.background_color),
            });
            x += width;
            column = span_end;
        }

        let tallest = laid_out
            .iter()
            .map(|cell| cell.text.height())
            .fold(0.0, f64::max);

        TableRow {
            cells: laid_out,
            height: tallest + 2.0 * padding,
            is_header,
            padding,
            border: Stroke::new(options.border_width).with_color(options.border_color),
        }
    }
}
