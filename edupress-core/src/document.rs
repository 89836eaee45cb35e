use crate::error::Result;
use crate::page::Page;
use crate::writer::PdfWriter;
use chrono::{DateTime, Utc};
use std::path::Path;

/// A PDF document that can contain multiple pages and metadata.
///
/// # Example
///
/// ```rust
/// use edupress::{Document, Page};
///
/// let mut doc = Document::new();
/// doc.set_title("Fractions Assessment");
/// doc.add_page(Page::a4());
///
/// let mut bytes = Vec::new();
/// doc.write(&mut bytes).unwrap();
/// assert!(bytes.starts_with(b"%PDF-1.7"));
/// ```
pub struct Document {
    pub(crate) pages: Vec<Page>,
    pub(crate) metadata: DocumentMetadata,
    pub(crate) compress: bool,
}

/// Metadata for a PDF document.
#[derive(Debug, Clone)]
pub struct DocumentMetadata {
    /// Document title
    pub title: Option<String>,
    /// Document author
    pub author: Option<String>,
    /// Document subject
    pub subject: Option<String>,
    /// Document keywords
    pub keywords: Option<String>,
    /// Software that created the original document
    pub creator: Option<String>,
    /// Software that produced the PDF
    pub producer: Option<String>,
    /// Date and time the document was created
    pub creation_date: Option<DateTime<Utc>>,
    /// Date and time the document was last modified
    pub modification_date: Option<DateTime<Utc>>,
}

impl Default for DocumentMetadata {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            title: None,
            author: None,
            subject: None,
            keywords: None,
            creator: Some("edupress".to_string()),
            producer: Some(format!("edupress v{}", env!("CARGO_PKG_VERSION"))),
            creation_date: Some(now),
            modification_date: Some(now),
        }
    }
}

/// Output settings shared by every document a builder emits.
#[derive(Debug, Clone)]
pub struct DocumentSettings {
    /// Deflate page content streams (requires the `compression` feature)
    pub compress: bool,
    pub creator: String,
    pub producer: String,
    /// Fixed timestamp for reproducible output; `None` stamps the build time
    pub timestamp: Option<DateTime<Utc>>,
}

impl Default for DocumentSettings {
    fn default() -> Self {
        Self {
            compress: cfg!(feature = "compression"),
            creator: "ZimEd Planner".to_string(),
            producer: format!("edupress v{}", env!("CARGO_PKG_VERSION")),
            timestamp: None,
        }
    }
}

impl DocumentSettings {
    pub fn uncompressed() -> Self {
        Self {
            compress: false,
            ..Self::default()
        }
    }
}

impl Document {
    /// Creates a new empty PDF document.
    pub fn new() -> Self {
        Self {
            pages: Vec::new(),
            metadata: DocumentMetadata::default(),
            compress: cfg!(feature = "compression"),
        }
    }

    pub fn with_settings(settings: &DocumentSettings) -> Self {
        let mut doc = Self::new();
        doc.compress = settings.compress;
        doc.metadata.creator = Some(settings.creator.clone());
        doc.metadata.producer = Some(settings.producer.clone());
        if let Some(timestamp) = settings.timestamp {
            doc.metadata.creation_date = Some(timestamp);
            doc.metadata.modification_date = Some(timestamp);
        }
        doc
    }

    /// Adds a page to the document.
    pub fn add_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Sets the document title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.metadata.title = Some(title.into());
    }

    /// Sets the document author.
    pub fn set_author(&mut self, author: impl Into<String>) {
        self.metadata.author = Some(author.into());
    }

    /// Sets the document subject.
    pub fn set_subject(&mut self, subject: impl Into<String>) {
        self.metadata.subject = Some(subject.into());
    }

    /// Sets the document keywords.
    pub fn set_keywords(&mut self, keywords: impl Into<String>) {
        self.metadata.keywords = Some(keywords.into());
    }

    /// Sets both creation and modification dates.
    pub fn set_timestamp(&mut self, date: DateTime<Utc>) {
        self.metadata.creation_date = Some(date);
        self.metadata.modification_date = Some(date);
    }

    pub fn metadata(&self) -> &DocumentMetadata {
        &self.metadata
    }

    /// Saves the document to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut writer = PdfWriter::new(path)?;
        writer.write_document(self)
    }

    /// Writes the document into a byte buffer.
    pub fn write(&self, buffer: &mut Vec<u8>) -> Result<()> {
        let mut writer = PdfWriter::new_with_writer(buffer);
        writer.write_document(self)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
