//! # edupress
//!
//! Print-ready PDF assembly for classroom documents: lesson plans, flashcard
//! sheets, topic tests and end-of-term exam papers.
//!
//! ## Features
//!
//! - **Normalization**: loosely-shaped JSON content is coerced into complete,
//!   renderable structures with fallbacks for anything missing
//! - **Pagination**: a single top-down cursor over A4 pages, with page breaks,
//!   running headers and repeated table headers
//! - **Builders**: one builder per document kind, each producing a
//!   [`DocumentArtifact`] with its bytes and a record of every placement
//! - **Generation contract**: prompts and reply decoding for an external
//!   content service
//! - **Library**: a capacity-bounded store of past papers
//!
//! ## Quick Start
//!
//! ```rust
//! use edupress::{build_document, normalize, ContentKind, DocumentSettings, Result};
//! use serde_json::json;
//!
//! # fn main() -> Result<()> {
//! let raw = json!({
//!     "topic": "Fractions",
//!     "cards": [{ "front": "1/2 + 1/4", "back": "3/4" }]
//! });
//! let content = normalize(ContentKind::Flashcards, &raw);
//! let artifact = build_document(&content, &DocumentSettings::default())?;
//!
//! assert_eq!(artifact.file_name, "Fractions_Flashcards.pdf");
//! assert_eq!(artifact.page_count, 1);
//! # Ok(())
//! # }
//! ```
//!
//! ### Low-level documents
//!
//! ```rust
//! use edupress::{Document, Page};
//!
//! let mut doc = Document::new();
//! doc.set_title("Blank");
//! doc.add_page(Page::a4());
//!
//! let mut bytes = Vec::new();
//! doc.write(&mut bytes).unwrap();
//! assert!(bytes.starts_with(b"%PDF"));
//! ```
//!
//! ## Modules
//!
//! - [`content`] - content shapes and normalization
//! - [`layout`] - primitives, tables and the paginated canvas
//! - [`builders`] - one builder per document kind
//! - [`generation`] - requests, prompts and reply decoding
//! - [`library`] - reference document storage
//! - [`document`], [`page`], [`graphics`], [`text`], [`writer`] - PDF output

pub mod builders;
pub mod content;
pub mod document;
pub mod error;
pub mod generation;
pub mod graphics;
pub mod layout;
pub mod library;
pub mod objects;
pub mod page;
pub mod text;
pub mod writer;

pub use builders::{build_document, build_text_sheet, DocumentBuilder};
pub use content::{normalize, ContentKind, NormalizedContent};
pub use document::{Document, DocumentMetadata, DocumentSettings};
pub use error::{PressError, Result};
pub use generation::{build_prompt, decode_response, GenerationRequest, Prompt};
pub use graphics::{Color, GraphicsContext};
pub use layout::{DocumentArtifact, PageGeometry, PaginatedCanvas, Placement, PlacementKind};
pub use library::{Library, LibraryDocument};
pub use page::Page;
pub use text::Font;

/// Current version of edupress
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
