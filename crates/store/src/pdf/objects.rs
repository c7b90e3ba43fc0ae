//! PDF Object Model
//!
//! The subset of PDF object types the exporter emits, and their
//! serialization.

use std::collections::BTreeMap;
use std::io::{self, Write};

/// PDF object types
#[derive(Debug, Clone, PartialEq)]
pub enum PdfObject {
    Integer(i64),
    Real(f64),
    String(PdfString),
    /// Name object (starts with /)
    Name(String),
    Array(Vec<PdfObject>),
    Dictionary(PdfDictionary),
    /// Indirect reference to object `n 0 R`
    Reference(u32),
}

impl PdfObject {
    /// Create a name object
    pub fn name(s: impl Into<String>) -> Self {
        PdfObject::Name(s.into())
    }

    /// Create a text string object
    pub fn text(s: &str) -> Self {
        PdfObject::String(PdfString::text(s))
    }
}

/// PDF string encoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PdfString {
    /// Literal string enclosed in parentheses
    Literal(Vec<u8>),
    /// Hexadecimal string enclosed in angle brackets
    Hex(Vec<u8>),
}

impl PdfString {
    /// Encode a text string
    ///
    /// ASCII text is written as a literal. Anything else becomes UTF-16BE
    /// with a byte order mark, in hex.
    pub fn text(s: &str) -> Self {
        if s.is_ascii() {
            PdfString::Literal(s.as_bytes().to_vec())
        } else {
            let mut bytes = vec![0xFE, 0xFF];
            for unit in s.encode_utf16() {
                bytes.extend_from_slice(&unit.to_be_bytes());
            }
            PdfString::Hex(bytes)
        }
    }
}

/// PDF dictionary with keys in sorted order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdfDictionary {
    entries: BTreeMap<String, PdfObject>,
}

impl PdfDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key-value pair
    pub fn insert(&mut self, key: impl Into<String>, value: PdfObject) {
        self.entries.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&PdfObject> {
        self.entries.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &PdfObject)> {
        self.entries.iter()
    }

    /// Set the Type entry
    pub fn with_type(mut self, type_name: &str) -> Self {
        self.insert("Type", PdfObject::name(type_name));
        self
    }
}

/// PDF stream (dictionary + data)
#[derive(Debug, Clone, PartialEq)]
pub struct PdfStream {
    pub dict: PdfDictionary,
    pub data: Vec<u8>,
    /// Whether the data already carries a filter
    pub compressed: bool,
}

impl PdfStream {
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            dict: PdfDictionary::new(),
            data,
            compressed: false,
        }
    }
}

/// Serializer for PDF objects
pub struct PdfSerializer<W: Write> {
    writer: W,
}

impl<W: Write> PdfSerializer<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write a PDF object
    pub fn write_object(&mut self, obj: &PdfObject) -> io::Result<()> {
        match obj {
            PdfObject::Integer(n) => write!(self.writer, "{}", n),
            PdfObject::Real(n) => write!(self.writer, "{}", format_real(*n)),
            PdfObject::String(s) => self.write_string(s),
            PdfObject::Name(name) => self.write_name(name),
            PdfObject::Array(arr) => {
                write!(self.writer, "[")?;
                for (i, obj) in arr.iter().enumerate() {
                    if i > 0 {
                        write!(self.writer, " ")?;
                    }
                    self.write_object(obj)?;
                }
                write!(self.writer, "]")
            }
            PdfObject::Dictionary(dict) => self.write_dictionary(dict),
            PdfObject::Reference(obj_num) => write!(self.writer, "{} 0 R", obj_num),
        }
    }

    /// Write a stream: dictionary, then raw data
    pub fn write_stream(&mut self, stream: &PdfStream) -> io::Result<()> {
        self.write_dictionary(&stream.dict)?;
        write!(self.writer, "\nstream\n")?;
        self.writer.write_all(&stream.data)?;
        write!(self.writer, "\nendstream")
    }

    fn write_string(&mut self, s: &PdfString) -> io::Result<()> {
        match s {
            PdfString::Literal(data) => {
                write!(self.writer, "(")?;
                for &byte in data {
                    match byte {
                        b'(' | b')' | b'\\' => write!(self.writer, "\\{}", byte as char)?,
                        0x0A => write!(self.writer, "\\n")?,
                        0x0D => write!(self.writer, "\\r")?,
                        0x20..=0x7E => write!(self.writer, "{}", byte as char)?,
                        _ => write!(self.writer, "\\{:03o}", byte)?,
                    }
                }
                write!(self.writer, ")")
            }
            PdfString::Hex(data) => {
                write!(self.writer, "<")?;
                for byte in data {
                    write!(self.writer, "{:02X}", byte)?;
                }
                write!(self.writer, ">")
            }
        }
    }

    fn write_name(&mut self, name: &str) -> io::Result<()> {
        write!(self.writer, "/")?;
        for byte in name.bytes() {
            match byte {
                b'#' | b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%' => {
                    write!(self.writer, "#{:02X}", byte)?
                }
                0x21..=0x7E => write!(self.writer, "{}", byte as char)?,
                _ => write!(self.writer, "#{:02X}", byte)?,
            }
        }
        Ok(())
    }

    fn write_dictionary(&mut self, dict: &PdfDictionary) -> io::Result<()> {
        write!(self.writer, "<<")?;
        for (key, value) in dict.iter() {
            write!(self.writer, " ")?;
            self.write_name(key)?;
            write!(self.writer, " ")?;
            self.write_object(value)?;
        }
        write!(self.writer, " >>")
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Format a real number without trailing zeros
pub(crate) fn format_real(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{:.0}", n)
    } else {
        let s = format!("{:.4}", n);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn serialize(obj: &PdfObject) -> String {
        let mut serializer = PdfSerializer::new(Vec::new());
        serializer.write_object(obj).unwrap();
        String::from_utf8(serializer.into_inner()).unwrap()
    }

    #[test]
    fn test_serialize_numbers() {
        assert_eq!(serialize(&PdfObject::Integer(42)), "42");
        assert_eq!(serialize(&PdfObject::Real(612.0)), "612");
        assert_eq!(serialize(&PdfObject::Real(0.75)), "0.75");
    }

    #[test]
    fn test_serialize_strings() {
        assert_eq!(serialize(&PdfObject::text("a (b)")), "(a \\(b\\))");
        assert_eq!(serialize(&PdfObject::text("é")), "<FEFF00E9>");
    }

    #[test]
    fn test_serialize_name_escapes_delimiters() {
        assert_eq!(serialize(&PdfObject::name("Type")), "/Type");
        assert_eq!(serialize(&PdfObject::name("A B")), "/A#20B");
    }

    #[test]
    fn test_serialize_dictionary_sorted() {
        let mut dict = PdfDictionary::new().with_type("Page");
        dict.insert("Parent", PdfObject::Reference(2));
        dict.insert("Kids", PdfObject::Array(vec![PdfObject::Integer(1), PdfObject::Integer(2)]));
        assert_eq!(
            serialize(&PdfObject::Dictionary(dict)),
            "<< /Kids [1 2] /Parent 2 0 R /Type /Page >>"
        );
    }

    #[test]
    fn test_serialize_stream() {
        let mut serializer = PdfSerializer::new(Vec::new());
        serializer.write_stream(&PdfStream::new(b"q Q".to_vec())).unwrap();
        let out = String::from_utf8(serializer.into_inner()).unwrap();
        assert_eq!(out, "<< >>\nstream\nq Q\nendstream");
    }
}
