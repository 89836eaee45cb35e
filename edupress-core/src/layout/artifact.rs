use crate::error::Result;
use serde::Serialize;
use std::path::Path;

/// What a placement drew.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlacementKind {
    Text,
    Frame,
    Rule,
    Row,
    Cluster,
    Space,
}

/// Where one primitive ended up. `top` and `height` are in millimetres from
/// the top edge of page `page` (0-based).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placement {
    pub page: usize,
    pub top: f64,
    pub height: f64,
    pub kind: PlacementKind,
    pub text: String,
    /// The primitive runs past the usable bottom edge
    pub overflow: bool,
}

impl Placement {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// A finished document: PDF bytes plus the layout trace that produced them.
#[derive(Debug, Clone)]
pub struct DocumentArtifact {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
    pub page_count: usize,
    pub placements: Vec<Placement>,
}

impl DocumentArtifact {
    pub const MIME_TYPE: &'static str = "application/pdf";

    pub fn placements_on(&self, page: usize) -> impl Iterator<Item = &Placement> + '_ {
        self.placements.iter().filter(move |p| p.page == page)
    }

    /// First placement whose text contains `needle`.
    pub fn find(&self, needle: &str) -> Option<&Placement> {
        self.placements.iter().find(|p| p.text.contains(needle))
    }

    pub fn find_all<'a>(&'a self, needle: &'a str) -> impl Iterator<Item = &'a Placement> + 'a {
        self.placements.iter().filter(move |p| p.text.contains(needle))
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.find(needle).is_some()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Write the PDF bytes to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, &self.bytes)?;
        Ok(())
    }
}
