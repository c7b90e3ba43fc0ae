//! PDF Writer
//!
//! File generation for composed documents:
//! - Object numbering and cross-reference table
//! - File structure (header, body, xref, trailer)
//! - Flate compression of content and raw image streams

use super::content::ContentStream;
use super::document::PdfDocument;
use super::error::{PdfError, PdfResult};
use super::objects::{PdfDictionary, PdfObject, PdfSerializer, PdfStream};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::Write;

/// PDF version written in the header
const PDF_VERSION: &str = "1.4";

/// Low-level PDF file writer
pub struct PdfWriter<W: Write> {
    writer: W,
    /// Current byte position
    position: u64,
    /// Byte offset of each written object, indexed by object number - 1
    offsets: Vec<Option<u64>>,
    next_obj_num: u32,
    compress: bool,
}

impl<W: Write> PdfWriter<W> {
    pub fn new(writer: W, compress: bool) -> Self {
        Self {
            writer,
            position: 0,
            offsets: Vec::new(),
            next_obj_num: 1,
            compress,
        }
    }

    fn write_bytes(&mut self, data: &[u8]) -> PdfResult<()> {
        self.writer.write_all(data)?;
        self.position += data.len() as u64;
        Ok(())
    }

    fn write_str(&mut self, s: &str) -> PdfResult<()> {
        self.write_bytes(s.as_bytes())
    }

    /// Allocate a new object number
    pub fn allocate_object(&mut self) -> u32 {
        let num = self.next_obj_num;
        self.next_obj_num += 1;
        self.offsets.push(None);
        num
    }

    /// Write the PDF header
    pub fn write_header(&mut self) -> PdfResult<()> {
        self.write_str(&format!("%PDF-{}\n", PDF_VERSION))?;
        // Binary marker
        self.write_bytes(&[b'%', 0xE2, 0xE3, 0xCF, 0xD3, b'\n'])
    }

    fn record_offset(&mut self, obj_num: u32) -> PdfResult<()> {
        let slot = self
            .offsets
            .get_mut(obj_num as usize - 1)
            .ok_or_else(|| PdfError::InvalidDocument(format!("object {} not allocated", obj_num)))?;
        *slot = Some(self.position);
        Ok(())
    }

    /// Write an indirect object
    pub fn write_object(&mut self, obj_num: u32, object: &PdfObject) -> PdfResult<()> {
        self.record_offset(obj_num)?;
        self.write_str(&format!("{} 0 obj\n", obj_num))?;

        let mut serializer = PdfSerializer::new(Vec::new());
        serializer.write_object(object)?;
        self.write_bytes(&serializer.into_inner())?;

        self.write_str("\nendobj\n")
    }

    /// Write a stream object, compressing it if enabled
    pub fn write_stream_object(&mut self, obj_num: u32, mut stream: PdfStream) -> PdfResult<()> {
        if self.compress && !stream.compressed {
            let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(&stream.data)?;
            stream.data = encoder.finish()?;
            stream.compressed = true;
            stream.dict.insert("Filter", PdfObject::name("FlateDecode"));
        }
        stream
            .dict
            .insert("Length", PdfObject::Integer(stream.data.len() as i64));

        self.record_offset(obj_num)?;
        self.write_str(&format!("{} 0 obj\n", obj_num))?;

        let mut serializer = PdfSerializer::new(Vec::new());
        serializer.write_stream(&stream)?;
        self.write_bytes(&serializer.into_inner())?;

        self.write_str("\nendobj\n")
    }

    /// Write the cross-reference table and trailer
    pub fn write_xref_and_trailer(&mut self, catalog_ref: u32, info_ref: u32) -> PdfResult<()> {
        let xref_offset = self.position;
        let size = self.next_obj_num;

        let mut table = String::new();
        table.push_str("xref\n");
        table.push_str(&format!("0 {}\n", size));
        table.push_str("0000000000 65535 f \n");
        for offset in &self.offsets {
            match offset {
                Some(offset) => table.push_str(&format!("{:010} 00000 n \n", offset)),
                None => table.push_str("0000000000 65535 f \n"),
            }
        }
        self.write_str(&table)?;

        self.write_str("trailer\n")?;
        let mut trailer = PdfDictionary::new();
        trailer.insert("Size", PdfObject::Integer(size as i64));
        trailer.insert("Root", PdfObject::Reference(catalog_ref));
        trailer.insert("Info", PdfObject::Reference(info_ref));

        let mut serializer = PdfSerializer::new(Vec::new());
        serializer.write_object(&PdfObject::Dictionary(trailer))?;
        self.write_bytes(&serializer.into_inner())?;

        self.write_str(&format!("\nstartxref\n{}\n%%EOF\n", xref_offset))
    }

    /// Flush and return the inner writer
    pub fn finish(mut self) -> PdfResult<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Write a composed document
pub fn write_document<W: Write>(document: &PdfDocument, writer: W) -> PdfResult<W> {
    if document.pages.is_empty() {
        return Err(PdfError::InvalidDocument("No pages to export".to_string()));
    }

    let mut pdf = PdfWriter::new(writer, document.compress);
    pdf.write_header()?;

    let catalog_ref = pdf.allocate_object();
    let pages_ref = pdf.allocate_object();
    let info_ref = pdf.allocate_object();

    let mut catalog = PdfDictionary::new().with_type("Catalog");
    catalog.insert("Pages", PdfObject::Reference(pages_ref));
    pdf.write_object(catalog_ref, &PdfObject::Dictionary(catalog))?;

    pdf.write_object(
        info_ref,
        &PdfObject::Dictionary(document.info.to_dictionary()),
    )?;

    let layout = &document.layout;
    let media_box = PdfObject::Array(vec![
        PdfObject::Integer(0),
        PdfObject::Integer(0),
        PdfObject::Real(layout.width),
        PdfObject::Real(layout.height),
    ]);

    let mut page_refs = Vec::with_capacity(document.pages.len());
    for page in &document.pages {
        let page_ref = pdf.allocate_object();
        let content_ref = pdf.allocate_object();
        page_refs.push(page_ref);

        let mut content = ContentStream::new();
        let mut xobjects = PdfDictionary::new();
        for (index, placed) in page.images.iter().enumerate() {
            let name = format!("Im{}", index + 1);
            let image_ref = pdf.allocate_object();
            pdf.write_stream_object(image_ref, placed.image.to_xobject())?;
            xobjects.insert(name.clone(), PdfObject::Reference(image_ref));
            content.draw_image(&name, placed.rect);
        }

        pdf.write_stream_object(content_ref, PdfStream::new(content.into_bytes()))?;

        let mut resources = PdfDictionary::new();
        resources.insert("XObject", PdfObject::Dictionary(xobjects));
        resources.insert(
            "ProcSet",
            PdfObject::Array(vec![PdfObject::name("PDF"), PdfObject::name("ImageC")]),
        );

        let mut page_dict = PdfDictionary::new().with_type("Page");
        page_dict.insert("Parent", PdfObject::Reference(pages_ref));
        page_dict.insert("MediaBox", media_box.clone());
        page_dict.insert("Resources", PdfObject::Dictionary(resources));
        page_dict.insert("Contents", PdfObject::Reference(content_ref));
        pdf.write_object(page_ref, &PdfObject::Dictionary(page_dict))?;
    }

    let mut pages = PdfDictionary::new().with_type("Pages");
    pages.insert(
        "Kids",
        PdfObject::Array(page_refs.iter().map(|&r| PdfObject::Reference(r)).collect()),
    );
    pages.insert("Count", PdfObject::Integer(page_refs.len() as i64));
    pdf.write_object(pages_ref, &PdfObject::Dictionary(pages))?;

    pdf.write_xref_and_trailer(catalog_ref, info_ref)?;
    pdf.finish()
}
