//! Reference document library.
//!
//! Holds uploaded past papers as opaque bytes within a fixed byte budget,
//! next to built-in papers stored as text and rendered on request.

use crate::builders::build_text_sheet;
use crate::document::DocumentSettings;
use crate::error::{PressError, Result};
use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info};

/// Largest single upload accepted, in bytes.
pub const MAX_DOCUMENT_BYTES: u64 = 5 * 1024 * 1024;

/// File extensions accepted for upload.
pub const ALLOWED_EXTENSIONS: [&str; 5] = ["pdf", "doc", "docx", "xls", "xlsx"];

pub const CATEGORY_PAST_PAPERS: &str = "Past Papers";

/// Warning shown when an upload does not fit in the remaining capacity.
pub const STORAGE_FULL_MESSAGE: &str = "Storage full! Please delete some old files.";

/// Warning shown when an upload is rejected by type or size.
pub const INVALID_UPLOAD_MESSAGE: &str = "No valid files. PDF/Word/Excel max 5MB.";

const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// Listing entry for one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryDocument {
    pub id: String,
    pub name: String,
    pub category: String,
    pub upload_date: String,
    #[serde(rename = "size")]
    pub size_label: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub is_default: bool,
}

/// A document's bytes ready for download.
#[derive(Debug, Clone)]
pub struct LibraryFile {
    pub document: LibraryDocument,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
enum Body {
    Bytes(Vec<u8>),
    ReferenceText(String),
}

#[derive(Debug, Clone)]
struct Entry {
    document: LibraryDocument,
    body: Body,
}

/// Size label in megabytes with two decimals, e.g. "1.50 MB".
pub fn size_label(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / 1024.0 / 1024.0)
}

/// Whether `name` carries one of the accepted extensions.
pub fn has_allowed_extension(name: &str) -> bool {
    name.rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
}

pub struct Library {
    capacity: u64,
    settings: DocumentSettings,
    defaults: Vec<Entry>,
    documents: Vec<Entry>,
    next_id: u64,
}

impl Library {
    /// An empty library that stores at most `capacity` bytes of uploads.
    pub fn with_capacity(capacity: u64) -> Self {
        Self {
            capacity,
            settings: DocumentSettings::default(),
            defaults: Vec::new(),
            documents: Vec::new(),
            next_id: 1,
        }
    }

    /// Settings used when rendering built-in papers.
    pub fn set_render_settings(&mut self, settings: DocumentSettings) {
        self.settings = settings;
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Bytes taken by uploads. Built-in papers do not count.
    pub fn used_bytes(&self) -> u64 {
        self.documents
            .iter()
            .map(|entry| match &entry.body {
                Body::Bytes(bytes) => bytes.len() as u64,
                Body::ReferenceText(_) => 0,
            })
            .sum()
    }

    /// Register a built-in paper kept as text. It is read-only.
    pub fn add_reference_text(&mut self, title: &str, content: &str) -> LibraryDocument {
        let document = LibraryDocument {
            id: format!("default-{}", self.defaults.len()),
            name: title.to_string(),
            category: CATEGORY_PAST_PAPERS.to_string(),
            upload_date: "System".to_string(),
            size_label: "20 KB".to_string(),
            mime_type: "application/pdf".to_string(),
            is_default: true,
        };
        self.defaults.push(Entry {
            document: document.clone(),
            body: Body::ReferenceText(content.to_string()),
        });
        document
    }

    /// Store an upload.
    ///
    /// Fails with [`PressError::UnsupportedDocument`] for a disallowed
    /// extension or a file over [`MAX_DOCUMENT_BYTES`], and with
    /// [`PressError::CapacityExceeded`] if it would not fit.
    pub fn add(&mut self, name: &str, mime_type: Option<&str>, bytes: Vec<u8>) -> Result<LibraryDocument> {
        let size = bytes.len() as u64;
        if !has_allowed_extension(name) {
            return Err(PressError::UnsupportedDocument(format!(
                "{name}: only PDF, Word and Excel files are accepted"
            )));
        }
        if size > MAX_DOCUMENT_BYTES {
            return Err(PressError::UnsupportedDocument(format!(
                "{name}: {} exceeds the 5 MB limit",
                size_label(size)
            )));
        }

        let available = self.capacity.saturating_sub(self.used_bytes());
        if size > available {
            return Err(PressError::CapacityExceeded {
                needed: size,
                available,
            });
        }

        let document = LibraryDocument {
            id: format!("doc-{}", self.next_id),
            name: name.to_string(),
            category: CATEGORY_PAST_PAPERS.to_string(),
            upload_date: Utc::now().format("%Y-%m-%d").to_string(),
            size_label: size_label(size),
            mime_type: mime_type
                .filter(|m| !m.trim().is_empty())
                .unwrap_or(FALLBACK_MIME_TYPE)
                .to_string(),
            is_default: false,
        };
        self.next_id += 1;

        info!(id = %document.id, name, size, "document stored");
        self.documents.push(Entry {
            document: document.clone(),
            body: Body::Bytes(bytes),
        });
        Ok(document)
    }

    /// Built-in papers first, then uploads in the order they were added.
    pub fn list(&self) -> Vec<LibraryDocument> {
        self.defaults
            .iter()
            .chain(&self.documents)
            .map(|entry| entry.document.clone())
            .collect()
    }

    fn find(&self, id: &str) -> Option<&Entry> {
        self.defaults
            .iter()
            .chain(&self.documents)
            .find(|entry| entry.document.id == id)
    }

    /// Fetch a document's bytes. Built-in papers are rendered to PDF here.
    pub fn get(&self, id: &str) -> Result<LibraryFile> {
        let entry = self
            .find(id)
            .ok_or_else(|| PressError::NotFound(format!("library document '{id}'")))?;

        match &entry.body {
            Body::Bytes(bytes) => Ok(LibraryFile {
                document: entry.document.clone(),
                file_name: entry.document.name.clone(),
                bytes: bytes.clone(),
            }),
            Body::ReferenceText(content) => {
                debug!(id, "rendering built-in paper");
                let artifact = build_text_sheet(&entry.document.name, content, &self.settings)?;
                Ok(LibraryFile {
                    document: entry.document.clone(),
                    file_name: format!("{}.pdf", entry.document.name),
                    bytes: artifact.bytes,
                })
            }
        }
    }

    /// Delete an upload. Built-in papers cannot be removed.
    pub fn remove(&mut self, id: &str) -> Result<LibraryDocument> {
        if self.defaults.iter().any(|entry| entry.document.id == id) {
            return Err(PressError::ReadOnly(format!("library document '{id}'")));
        }

        let index = self
            .documents
            .iter()
            .position(|entry| entry.document.id == id)
            .ok_or_else(|| PressError::NotFound(format!("library document '{id}'")))?;
        let entry = self.documents.remove(index);
        info!(id, "document removed");
        Ok(entry.document)
    }
}

impl Default for Library {
    fn default() -> Self {
        Self::with_capacity(MAX_DOCUMENT_BYTES)
    }
}
