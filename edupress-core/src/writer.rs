use crate::document::Document;
use crate::error::Result;
use crate::objects::{Dictionary, Object, ObjectId, Stream};
use crate::page::Page;
use crate::text::Font;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet};
use std::io::{BufWriter, Write};
use std::path::Path;

const CATALOG_ID: u32 = 1;
const PAGES_ID: u32 = 2;
const FIRST_FONT_ID: u32 = 3;

/// Serializes a [`Document`] as PDF 1.7.
///
/// Object numbers are assigned in a fixed order (catalog, page tree, fonts,
/// page/content pairs, info) so identical documents produce identical bytes.
pub struct PdfWriter<W: Write> {
    writer: W,
    xref_positions: BTreeMap<u32, u64>,
    current_position: u64,
}

impl<W: Write> PdfWriter<W> {
    pub fn new_with_writer(writer: W) -> Self {
        Self {
            writer,
            xref_positions: BTreeMap::new(),
            current_position: 0,
        }
    }

    pub fn write_document(&mut self, document: &Document) -> Result<()> {
        self.write_header()?;

        let fonts: BTreeSet<Font> = document.pages.iter().flat_map(|page| page.used_fonts()).collect();
        let font_ids: BTreeMap<Font, ObjectId> = fonts
            .iter()
            .enumerate()
            .map(|(i, font)| (*font, ObjectId::new(FIRST_FONT_ID + i as u32, 0)))
            .collect();
        let first_page_id = FIRST_FONT_ID + font_ids.len() as u32;

        let catalog_id = self.write_catalog()?;
        self.write_page_tree(document, first_page_id)?;
        self.write_fonts(&font_ids)?;
        self.write_pages(document, first_page_id, &font_ids)?;

        let info_id = ObjectId::new(first_page_id + document.pages.len() as u32 * 2, 0);
        self.write_info(document, info_id)?;

        let xref_position = self.current_position;
        self.write_xref()?;
        self.write_trailer(catalog_id, info_id, xref_position)?;

        self.writer.flush()?;
        Ok(())
    }

    fn write_header(&mut self) -> Result<()> {
        self.write_bytes(b"%PDF-1.7\n")?;
        // Binary comment to ensure file is treated as binary
        self.write_bytes(&[b'%', 0xE2, 0xE3, 0xCF, 0xD3, b'\n'])?;
        Ok(())
    }

    fn write_catalog(&mut self) -> Result<ObjectId> {
        let catalog_id = ObjectId::new(CATALOG_ID, 0);

        let mut catalog = Dictionary::new();
        catalog.set("Type", Object::name("Catalog"));
        catalog.set("Pages", ObjectId::new(PAGES_ID, 0));

        self.write_object(catalog_id, &Object::Dictionary(catalog))?;
        Ok(catalog_id)
    }

    fn write_page_tree(&mut self, document: &Document, first_page_id: u32) -> Result<()> {
        let kids: Vec<Object> = (0..document.pages.len() as u32)
            .map(|i| Object::Reference(ObjectId::new(first_page_id + i * 2, 0)))
            .collect();

        let mut pages_dict = Dictionary::new();
        pages_dict.set("Type", Object::name("Pages"));
        pages_dict.set("Kids", kids);
        pages_dict.set("Count", document.pages.len());

        self.write_object(ObjectId::new(PAGES_ID, 0), &Object::Dictionary(pages_dict))
    }

    fn write_fonts(&mut self, font_ids: &BTreeMap<Font, ObjectId>) -> Result<()> {
        for (font, id) in font_ids {
            let mut font_dict = Dictionary::new();
            font_dict.set("Type", Object::name("Font"));
            font_dict.set("Subtype", Object::name("Type1"));
            font_dict.set("BaseFont", Object::name(font.pdf_name()));
            font_dict.set("Encoding", Object::name("WinAnsiEncoding"));
            self.write_object(*id, &Object::Dictionary(font_dict))?;
        }
        Ok(())
    }

    fn write_pages(
        &mut self,
        document: &Document,
        first_page_id: u32,
        font_ids: &BTreeMap<Font, ObjectId>,
    ) -> Result<()> {
        for (i, page) in document.pages.iter().enumerate() {
            let page_id = ObjectId::new(first_page_id + i as u32 * 2, 0);
            let content_id = ObjectId::new(first_page_id + i as u32 * 2 + 1, 0);

            self.write_page(page_id, content_id, page, font_ids)?;
            self.write_page_content(content_id, page, document.compress)?;
        }
        Ok(())
    }

    fn write_page(
        &mut self,
        page_id: ObjectId,
        content_id: ObjectId,
        page: &Page,
        font_ids: &BTreeMap<Font, ObjectId>,
    ) -> Result<()> {
        let mut page_dict = Dictionary::new();
        page_dict.set("Type", Object::name("Page"));
        page_dict.set("Parent", ObjectId::new(PAGES_ID, 0));
        page_dict.set(
            "MediaBox",
            vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(page.width()),
                Object::Real(page.height()),
            ],
        );
        page_dict.set("Contents", content_id);

        // Only the fonts this page actually shows text with
        let mut font_dict = Dictionary::new();
        for font in page.used_fonts() {
            if let Some(id) = font_ids.get(&font) {
                font_dict.set(font.pdf_name(), *id);
            }
        }
        let mut resources = Dictionary::new();
        resources.set("Font", font_dict);
        page_dict.set("Resources", resources);

        self.write_object(page_id, &Object::Dictionary(page_dict))
    }

    fn write_page_content(&mut self, content_id: ObjectId, page: &Page, compress: bool) -> Result<()> {
        #[allow(unused_mut)]
        let mut stream = Stream::new(page.generate_content());

        #[cfg(feature = "compression")]
        {
            if compress {
                stream.compress_flate()?;
            }
        }
        #[cfg(not(feature = "compression"))]
        let _ = compress;

        self.write_object(content_id, &stream.into_object())
    }

    fn write_info(&mut self, document: &Document, info_id: ObjectId) -> Result<()> {
        let metadata = &document.metadata;
        let mut info_dict = Dictionary::new();

        let text_fields = [
            ("Title", &metadata.title),
            ("Author", &metadata.author),
            ("Subject", &metadata.subject),
            ("Keywords", &metadata.keywords),
            ("Creator", &metadata.creator),
            ("Producer", &metadata.producer),
        ];
        for (key, value) in text_fields {
            if let Some(value) = value {
                info_dict.set(key, value.as_str());
            }
        }

        if let Some(creation_date) = metadata.creation_date {
            info_dict.set("CreationDate", format_pdf_date(creation_date));
        }
        if let Some(mod_date) = metadata.modification_date {
            info_dict.set("ModDate", format_pdf_date(mod_date));
        }

        self.write_object(info_id, &Object::Dictionary(info_dict))
    }
}

impl PdfWriter<BufWriter<std::fs::File>> {
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::create(path)?;
        Ok(Self::new_with_writer(BufWriter::new(file)))
    }
}

impl<W: Write> PdfWriter<W> {
    fn write_object(&mut self, id: ObjectId, object: &Object) -> Result<()> {
        self.xref_positions.insert(id.number(), self.current_position);

        let header = format!("{} {} obj\n", id.number(), id.generation());
        self.write_bytes(header.as_bytes())?;
        self.write_object_value(object)?;
        self.write_bytes(b"\nendobj\n")?;
        Ok(())
    }

    fn write_object_value(&mut self, object: &Object) -> Result<()> {
        match object {
            Object::Null => self.write_bytes(b"null")?,
            Object::Boolean(b) => self.write_bytes(if *b { b"true" } else { b"false" })?,
            Object::Integer(i) => self.write_bytes(i.to_string().as_bytes())?,
            Object::Real(f) => self.write_bytes(format_real(*f).as_bytes())?,
            Object::String(s) => {
                let literal = crate::text::pdf_literal(s);
                self.write_bytes(literal.as_bytes())?;
            }
            Object::Name(n) => {
                self.write_bytes(b"/")?;
                self.write_bytes(n.as_bytes())?;
            }
            Object::Array(arr) => {
                self.write_bytes(b"[")?;
                for (i, obj) in arr.iter().enumerate() {
                    if i > 0 {
                        self.write_bytes(b" ")?;
                    }
                    self.write_object_value(obj)?;
                }
                self.write_bytes(b"]")?;
            }
            Object::Dictionary(dict) => {
                self.write_bytes(b"<<")?;
                for (key, value) in dict.entries() {
                    self.write_bytes(b"\n/")?;
                    self.write_bytes(key.as_bytes())?;
                    self.write_bytes(b" ")?;
                    self.write_object_value(value)?;
                }
                self.write_bytes(b"\n>>")?;
            }
            Object::Stream(dict, data) => {
                self.write_object_value(&Object::Dictionary(dict.clone()))?;
                self.write_bytes(b"\nstream\n")?;
                self.write_bytes(data)?;
                self.write_bytes(b"\nendstream")?;
            }
            Object::Reference(id) => {
                let ref_str = format!("{} {} R", id.number(), id.generation());
                self.write_bytes(ref_str.as_bytes())?;
            }
        }
        Ok(())
    }

    fn write_xref(&mut self) -> Result<()> {
        let max_obj_num = self.xref_positions.keys().max().copied().unwrap_or(0);

        self.write_bytes(format!("xref\n0 {}\n", max_obj_num + 1).as_bytes())?;
        self.write_bytes(b"0000000000 65535 f \n")?;

        for obj_num in 1..=max_obj_num {
            let entry = match self.xref_positions.get(&obj_num) {
                Some(position) => format!("{position:010} 00000 n \n"),
                None => "0000000000 00000 f \n".to_string(),
            };
            self.write_bytes(entry.as_bytes())?;
        }

        Ok(())
    }

    fn write_trailer(
        &mut self,
        catalog_id: ObjectId,
        info_id: ObjectId,
        xref_position: u64,
    ) -> Result<()> {
        let max_obj_num = self.xref_positions.keys().max().copied().unwrap_or(0);

        let mut trailer = Dictionary::new();
        trailer.set("Size", Object::Integer(max_obj_num as i64 + 1));
        trailer.set("Root", catalog_id);
        trailer.set("Info", info_id);

        self.write_bytes(b"trailer\n")?;
        self.write_object_value(&Object::Dictionary(trailer))?;
        self.write_bytes(b"\nstartxref\n")?;
        self.write_bytes(xref_position.to_string().as_bytes())?;
        self.write_bytes(b"\n%%EOF\n")?;

        Ok(())
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.writer.write_all(data)?;
        self.current_position += data.len() as u64;
        Ok(())
    }
}

fn format_real(value: f64) -> String {
    let formatted = format!("{value:.6}");
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Format a DateTime as a PDF date string (D:YYYYMMDDHHmmSSOHH'mm)
fn format_pdf_date(date: DateTime<Utc>) -> String {
    let formatted = date.format("D:%Y%m%d%H%M%S");
    format!("{formatted}+00'00")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentSettings;
    use chrono::TimeZone;

    fn fixed_document(pages: usize) -> Document {
        let settings = DocumentSettings {
            timestamp: Some(Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap()),
            ..DocumentSettings::uncompressed()
        };
        let mut doc = Document::with_settings(&settings);
        doc.set_title("Test (draft)");
        for _ in 0..pages {
            let mut page = Page::a4();
            page.graphics()
                .show_text(Font::Helvetica, 10.0, 28.35, 800.0, "Hello");
            doc.add_page(page);
        }
        doc
    }

    fn render(doc: &Document) -> Vec<u8> {
        let mut buffer = Vec::new();
        PdfWriter::new_with_writer(&mut buffer)
            .write_document(doc)
            .unwrap();
        buffer
    }

    #[test]
    fn test_write_header() {
        let mut buffer = Vec::new();
        let mut writer = PdfWriter::new_with_writer(&mut buffer);
        writer.write_header().unwrap();

        assert!(buffer.starts_with(b"%PDF-1.7\n"));
        assert_eq!(buffer.len(), 15);
        assert_eq!(buffer[9], b'%');
        assert_eq!(buffer[14], b'\n');
    }

    #[test]
    fn test_document_structure() {
        let bytes = render(&fixed_document(2));
        let text = String::from_utf8_lossy(&bytes);

        assert!(text.contains("/Type /Catalog"));
        assert!(text.contains("/Type /Pages"));
        assert!(text.contains("/Count 2"));
        assert!(text.contains("/Kids [4 0 R 6 0 R]"));
        assert!(text.contains("/BaseFont /Helvetica"));
        assert!(text.contains("/Encoding /WinAnsiEncoding"));
        assert!(text.contains("/Title (Test \\(draft\\))"));
        assert!(text.contains("/CreationDate (D:20250301093000+00'00)"));
        assert!(text.contains("(Hello) Tj"));
        assert!(text.contains("trailer"));
        assert!(text.ends_with("%%EOF\n"));
    }

    #[test]
    fn test_only_used_fonts_are_written() {
        let bytes = render(&fixed_document(1));
        let text = String::from_utf8_lossy(&bytes);

        assert_eq!(text.matches("/Type /Font").count(), 1);
        assert!(!text.contains("/BaseFont /Times-Roman"));
    }

    #[test]
    fn test_xref_covers_every_object() {
        let bytes = render(&fixed_document(3));
        let text = String::from_utf8_lossy(&bytes);

        // catalog, pages, one font, three page/content pairs, info
        assert!(text.contains("xref\n0 11\n"));
        assert!(text.contains("/Size 11"));
    }

    #[test]
    fn test_output_is_deterministic() {
        let first = render(&fixed_document(2));
        let second = render(&fixed_document(2));
        assert_eq!(first, second);
    }

    #[test]
    fn test_format_real() {
        assert_eq!(format_real(595.275591), "595.275591");
        assert_eq!(format_real(842.0), "842");
        assert_eq!(format_real(0.5), "0.5");
    }

    #[test]
    fn test_format_pdf_date() {
        let date = Utc.with_ymd_and_hms(2024, 11, 5, 14, 3, 9).unwrap();
        assert_eq!(format_pdf_date(date), "D:20241105140309+00'00");
    }
}
