use crate::graphics::GraphicsContext;
use crate::text::Font;

/// Points per millimetre (72 pt per inch, 25.4 mm per inch).
pub const POINTS_PER_MM: f64 = 72.0 / 25.4;

/// A single page: its media size in points and the drawing operations
/// painted onto it.
#[derive(Clone, Debug)]
pub struct Page {
    width: f64,
    height: f64,
    graphics: GraphicsContext,
}

impl Page {
    /// Creates a new page with the specified width and height in points.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            graphics: GraphicsContext::new(),
        }
    }

    /// Creates a page sized in millimetres.
    pub fn from_mm(width: f64, height: f64) -> Self {
        Self::new(width * POINTS_PER_MM, height * POINTS_PER_MM)
    }

    /// Creates a new A4 page (210 x 297 mm).
    pub fn a4() -> Self {
        Self::from_mm(210.0, 297.0)
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn graphics(&mut self) -> &mut GraphicsContext {
        &mut self.graphics
    }

    pub fn used_fonts(&self) -> impl Iterator<Item = Font> + '_ {
        self.graphics.used_fonts()
    }

    pub(crate) fn generate_content(&self) -> Vec<u8> {
        self.graphics.operations().as_bytes().to_vec()
    }
}
