//! Page layout in millimetres.
//!
//! Builders describe what goes on the page as [`Primitive`]s and hand them to
//! a [`PaginatedCanvas`], which owns the cursor and all page-break decisions.

mod artifact;
mod canvas;
mod geometry;
mod paint;
mod primitive;
mod table;

pub use artifact::{DocumentArtifact, Placement, PlacementKind};
pub use canvas::{PaginatedCanvas, PlaceOptions};
pub use geometry::{mm_to_pt, pt_to_mm, PageGeometry};
pub use paint::Stroke;
pub use primitive::{default_line_height, Align, Frame, Primitive, Rule, TextBlock};
pub use table::{HeaderStyle, Table, TableCell, TableOptions, TableRow};
