//! Built-in past papers registered in every new library.

use anyhow::{Context, Result};
use edupress::library::Library;
use serde::Deserialize;

const DEFAULT_PAPERS: &str = include_str!("../data/default_papers.json");

#[derive(Debug, Deserialize)]
pub struct DefaultPaper {
    pub title: String,
    pub grade: String,
    pub subject: String,
    pub content: String,
}

pub fn default_papers() -> Result<Vec<DefaultPaper>> {
    serde_json::from_str(DEFAULT_PAPERS).context("bundled default papers are malformed")
}

/// A library of `capacity` bytes holding the built-in papers.
pub fn seeded_library(capacity: u64) -> Result<Library> {
    let mut library = Library::with_capacity(capacity);
    for paper in default_papers()? {
        library.add_reference_text(&paper.title, &paper.content);
    }
    Ok(library)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_papers_parse() {
        let papers = default_papers().unwrap();
        assert!(!papers.is_empty());
        assert!(papers.iter().all(|p| !p.content.is_empty() && !p.grade.is_empty()));
    }

    #[test]
    fn test_seeded_library_lists_defaults_first() {
        let library = seeded_library(1024).unwrap();
        let listing = library.list();
        assert_eq!(listing[0].id, "default-0");
        assert!(listing.iter().all(|d| d.is_default));
        assert_eq!(library.used_bytes(), 0);
    }
}
