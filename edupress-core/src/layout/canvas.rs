//! Cursor-driven pagination.
//!
//! A [`PaginatedCanvas`] owns the pages of one document while it is being
//! built. Callers hand it primitives in reading order; the canvas decides
//! which page each one lands on and where, and keeps a trace of every
//! placement for inspection.

use crate::document::{Document, DocumentSettings};
use crate::error::Result;
use crate::layout::artifact::{DocumentArtifact, Placement};
use crate::layout::geometry::PageGeometry;
use crate::layout::paint::{Painter, Stroke};
use crate::layout::primitive::{Primitive, Rule};
use crate::layout::table::Table;
use crate::page::Page;
use tracing::{debug, info, warn};

/// Tolerance for floating point comparisons against the page edge.
const EPSILON: f64 = 1e-6;

/// Per-placement options.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlaceOptions {
    /// Extra space after the primitive, in millimetres
    pub gap: f64,
    /// Place at the cursor even if the primitive runs past the bottom edge
    pub allow_overflow: bool,
}

impl PlaceOptions {
    pub fn gap(gap: f64) -> Self {
        Self {
            gap,
            allow_overflow: false,
        }
    }

    pub fn overflowing(mut self) -> Self {
        self.allow_overflow = true;
        self
    }
}

/// Layout state for a single document build.
pub struct PaginatedCanvas {
    geometry: PageGeometry,
    settings: DocumentSettings,
    title: Option<String>,
    subject: Option<String>,
    author: Option<String>,
    pages: Vec<Page>,
    cursor: f64,
    running_header: Option<(Primitive, f64)>,
    placements: Vec<Placement>,
}

impl Default for PaginatedCanvas {
    fn default() -> Self {
        Self::new(PageGeometry::default(), DocumentSettings::default())
    }
}

impl PaginatedCanvas {
    /// Create a canvas holding one empty page with the cursor at the top margin.
    pub fn new(geometry: PageGeometry, settings: DocumentSettings) -> Self {
        Self {
            geometry,
            settings,
            title: None,
            subject: None,
            author: None,
            pages: vec![Page::from_mm(geometry.width, geometry.height)],
            cursor: geometry.top_margin,
            running_header: None,
            placements: Vec::new(),
        }
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub fn set_subject(&mut self, subject: impl Into<String>) {
        self.subject = Some(subject.into());
    }

    pub fn set_author(&mut self, author: impl Into<String>) {
        self.author = Some(author.into());
    }

    /// Height the primitive will occupy. Depends only on its content.
    pub fn measure_height(&self, primitive: &Primitive) -> f64 {
        primitive.height()
    }

    /// 0-based index of the page currently being written.
    pub fn page_index(&self) -> usize {
        self.pages.len() - 1
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn cursor(&self) -> f64 {
        self.cursor
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Space left between the cursor and the usable bottom edge.
    pub fn remaining(&self) -> f64 {
        self.geometry.usable_bottom() - self.cursor
    }

    pub fn fits(&self, height: f64) -> bool {
        self.cursor + height <= self.geometry.usable_bottom() + EPSILON
    }

    pub fn at_page_top(&self) -> bool {
        self.cursor <= self.geometry.top_margin + EPSILON
    }

    /// Place with no trailing gap. Returns the top edge the primitive was drawn at.
    pub fn place(&mut self, primitive: impl Into<Primitive>) -> f64 {
        self.place_with(primitive, PlaceOptions::default())
    }

    pub fn place_with(&mut self, primitive: impl Into<Primitive>, options: PlaceOptions) -> f64 {
        let primitive = primitive.into();
        let height = self.measure_height(&primitive);

        if let Primitive::Space(_) = primitive {
            // Whitespace never opens a page; it only pushes the cursor.
            let top = self.cursor;
            self.cursor = (self.cursor + height + options.gap).min(self.geometry.usable_bottom());
            return top;
        }

        let mut overflow = false;
        if !self.fits(height) {
            if options.allow_overflow {
                overflow = true;
            } else if height > self.geometry.usable_height() + EPSILON {
                if !self.at_page_top() {
                    self.new_page();
                }
                overflow = true;
                warn!(
                    page = self.page_index(),
                    height,
                    usable = self.geometry.usable_height(),
                    "primitive taller than a page, placing with overflow"
                );
            } else {
                self.new_page();
            }
        }

        let top = self.cursor;
        self.draw(&primitive, top, overflow);
        self.cursor = top + height + options.gap;
        top
    }

    /// Place a section header, first breaking if the header plus `reserve`
    /// millimetres of following content would not fit.
    pub fn start_section(&mut self, header: impl Into<Primitive>, reserve: f64) -> f64 {
        self.start_section_with(header, reserve, PlaceOptions::default())
    }

    pub fn start_section_with(
        &mut self,
        header: impl Into<Primitive>,
        reserve: f64,
        options: PlaceOptions,
    ) -> f64 {
        let header = header.into();
        if !self.fits(header.height() + reserve) && !self.at_page_top() {
            self.new_page();
        }
        self.place_with(header, options)
    }

    /// Open a fresh page and move the cursor to its top margin.
    pub fn new_page(&mut self) {
        debug!(
            from_page = self.page_index(),
            cursor = self.cursor,
            "page break"
        );
        self.pages
            .push(Page::from_mm(self.geometry.width, self.geometry.height));
        self.cursor = self.geometry.top_margin;

        if let Some((header, top)) = self.running_header.clone() {
            self.stamp(&header, top);
        }
    }

    /// Break when the cursor has moved past `y`. Returns whether a page was opened.
    pub fn break_if_below(&mut self, y: f64) -> bool {
        if self.cursor > y + EPSILON {
            self.new_page();
            true
        } else {
            false
        }
    }

    pub fn set_cursor(&mut self, y: f64) {
        self.cursor = y;
    }

    pub fn advance(&mut self, dy: f64) {
        self.cursor += dy;
    }

    /// Draw at an absolute position on the current page. The cursor is left alone.
    pub fn stamp(&mut self, primitive: &Primitive, top: f64) {
        self.draw(primitive, top, false);
    }

    /// Stamp `header` at `top` on every page opened from now on.
    pub fn set_running_header(&mut self, header: impl Into<Primitive>, top: f64) {
        self.running_header = Some((header.into(), top));
    }

    pub fn clear_running_header(&mut self) {
        self.running_header = None;
    }

    /// Place a table row by row. The header row is kept with the first body
    /// row and repeated at the top of every page the table continues onto.
    pub fn place_table(&mut self, table: &Table) {
        let header = table.header();
        let header_height = header.map_or(0.0, |row| row.height());

        if let Some(header) = header {
            let first = table.rows().first().map_or(0.0, |row| row.height());
            if !self.fits(header_height + first) && !self.at_page_top() {
                self.new_page();
            }
            self.place(header.clone());
        }

        for row in table.rows() {
            let repeat_header = header_height + row.height() <= self.geometry.usable_height();
            if !self.fits(row.height()) && repeat_header {
                self.new_page();
                if let Some(header) = header {
                    self.place(header.clone());
                }
            }
            self.place(row.clone());
        }
    }

    /// Fill the rest of the current page with writing lines `spacing` apart.
    /// Returns the number of lines drawn.
    pub fn fill_ruled_page(&mut self, spacing: f64, x_start: f64, x_end: f64, stroke: &Stroke) -> usize {
        let mut count = 0;
        while self.fits(spacing) {
            self.place(Rule::horizontal(x_start, x_end, spacing).with_stroke(stroke.clone()));
            count += 1;
        }
        count
    }

    fn draw(&mut self, primitive: &Primitive, top: f64, overflow: bool) {
        let page_index = self.page_index();
        let page_height = self.geometry.height;
        if let Some(page) = self.pages.last_mut() {
            let mut painter = Painter::new(page, page_height);
            primitive.paint(&mut painter, top);
        }

        self.placements.push(Placement {
            page: page_index,
            top,
            height: primitive.height(),
            kind: primitive.kind(),
            text: primitive.text(),
            overflow,
        });
    }

    /// Write the accumulated pages as a PDF. Consumes the canvas.
    pub fn finish(self, file_name: impl Into<String>) -> Result<DocumentArtifact> {
        let mut document = Document::with_settings(&self.settings);
        if let Some(title) = self.title {
            document.set_title(title);
        }
        if let Some(subject) = self.subject {
            document.set_subject(subject);
        }
        if let Some(author) = self.author {
            document.set_author(author);
        }

        let page_count = self.pages.len();
        for page in self.pages {
            document.add_page(page);
        }

        let mut bytes = Vec::new();
        document.write(&mut bytes)?;

        let file_name = file_name.into();
        info!(
            file = %file_name,
            pages = page_count,
            bytes = bytes.len(),
            "document finished"
        );

        Ok(DocumentArtifact {
            file_name,
            mime_type: DocumentArtifact::MIME_TYPE,
            bytes,
            page_count,
            placements: self.placements,
        })
    }
}
