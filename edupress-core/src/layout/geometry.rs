use crate::page::POINTS_PER_MM;

/// Millimetres to PDF points.
pub fn mm_to_pt(mm: f64) -> f64 {
    mm * POINTS_PER_MM
}

/// PDF points to millimetres.
pub fn pt_to_mm(pt: f64) -> f64 {
    pt / POINTS_PER_MM
}

/// Fixed page frame the canvas paginates against. All values in millimetres,
/// measured from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f64,
    pub height: f64,
    /// Cursor position on a fresh page
    pub top_margin: f64,
    /// Distance from the bottom edge nothing may cross
    pub bottom_margin: f64,
    pub left_margin: f64,
    pub right_margin: f64,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}

impl PageGeometry {
    /// Portrait A4 with the usable bottom edge at 280 mm.
    pub fn a4() -> Self {
        Self {
            width: 210.0,
            height: 297.0,
            top_margin: 20.0,
            bottom_margin: 17.0,
            left_margin: 10.0,
            right_margin: 10.0,
        }
    }

    pub fn usable_bottom(&self) -> f64 {
        self.height - self.bottom_margin
    }

    pub fn usable_height(&self) -> f64 {
        self.usable_bottom() - self.top_margin
    }

    pub fn content_width(&self) -> f64 {
        self.width - self.left_margin - self.right_margin
    }

    pub fn center_x(&self) -> f64 {
        self.width / 2.0
    }

    pub fn right_edge(&self) -> f64 {
        self.width - self.right_margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a4_frame() {
        let geometry = PageGeometry::default();
        assert_eq!(geometry.usable_bottom(), 280.0);
        assert_eq!(geometry.usable_height(), 260.0);
        assert_eq!(geometry.content_width(), 190.0);
        assert_eq!(geometry.center_x(), 105.0);
        assert_eq!(geometry.right_edge(), 200.0);
    }

    #[test]
    fn test_unit_conversion() {
        assert!((mm_to_pt(25.4) - 72.0).abs() < 1e-9);
        assert!((pt_to_mm(mm_to_pt(37.5)) - 37.5).abs() < 1e-9);
    }
}
