//! PDF Image Handling
//!
//! Captured bitmaps become image XObjects:
//! - JPEG data is passed through with DCTDecode
//! - RGB pixels are written raw and compressed with the page streams

use super::objects::{PdfDictionary, PdfObject, PdfStream};
use super::raster::{RasterError, RasterImage, RasterResult};

/// Image compression filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFilter {
    /// DCT (JPEG) compression
    DCTDecode,
}

impl ImageFilter {
    pub fn pdf_name(&self) -> &'static str {
        match self {
            ImageFilter::DCTDecode => "DCTDecode",
        }
    }
}

/// An image ready to be written as an XObject
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageXObject {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    /// Filter already applied to `data`
    pub filter: Option<ImageFilter>,
}

impl ImageXObject {
    /// Validate a captured bitmap and wrap it
    pub fn from_raster(image: RasterImage) -> RasterResult<Self> {
        match image {
            RasterImage::Rgb {
                width,
                height,
                pixels,
            } => {
                if width == 0 || height == 0 {
                    return Err(RasterError::InvalidImage(format!(
                        "empty bitmap {}x{}",
                        width, height
                    )));
                }
                let expected = width as usize * height as usize * 3;
                if pixels.len() != expected {
                    return Err(RasterError::InvalidImage(format!(
                        "expected {} RGB bytes for {}x{}, got {}",
                        expected,
                        width,
                        height,
                        pixels.len()
                    )));
                }
                Ok(Self {
                    width,
                    height,
                    data: pixels,
                    filter: None,
                })
            }
            RasterImage::Jpeg(data) => {
                let (width, height) = parse_jpeg_dimensions(&data)?;
                Ok(Self {
                    width,
                    height,
                    data,
                    filter: Some(ImageFilter::DCTDecode),
                })
            }
        }
    }

    /// Convert to a PDF XObject stream
    pub fn to_xobject(&self) -> PdfStream {
        let mut dict = PdfDictionary::new().with_type("XObject");

        dict.insert("Subtype", PdfObject::name("Image"));
        dict.insert("Width", PdfObject::Integer(self.width as i64));
        dict.insert("Height", PdfObject::Integer(self.height as i64));
        dict.insert("BitsPerComponent", PdfObject::Integer(8));
        dict.insert("ColorSpace", PdfObject::name("DeviceRGB"));

        if let Some(filter) = self.filter {
            dict.insert("Filter", PdfObject::name(filter.pdf_name()));
        }

        PdfStream {
            dict,
            data: self.data.clone(),
            compressed: self.filter.is_some(),
        }
    }
}

/// Parse a JPEG header to extract dimensions
fn parse_jpeg_dimensions(data: &[u8]) -> RasterResult<(u32, u32)> {
    if data.len() < 2 || data[0] != 0xFF || data[1] != 0xD8 {
        return Err(RasterError::InvalidImage("not a JPEG".to_string()));
    }

    let mut pos = 2;
    while pos + 1 < data.len() {
        if data[pos] != 0xFF {
            return Err(RasterError::InvalidImage("invalid JPEG marker".to_string()));
        }

        // Fill bytes may precede the marker code
        while pos + 1 < data.len() && data[pos + 1] == 0xFF {
            pos += 1;
        }
        let marker = data[pos + 1];
        pos += 2;

        // Standalone markers carry no length
        if marker == 0xD8 || marker == 0x01 || (0xD0..=0xD7).contains(&marker) {
            continue;
        }
        if marker == 0xD9 {
            break;
        }

        if pos + 2 > data.len() {
            break;
        }
        let length = ((data[pos] as usize) << 8) | (data[pos + 1] as usize);

        // SOF markers contain the dimensions
        let is_sof = matches!(marker, 0xC0..=0xCF) && !matches!(marker, 0xC4 | 0xC8 | 0xCC);
        if is_sof {
            if pos + 7 > data.len() {
                break;
            }
            let height = ((data[pos + 3] as u32) << 8) | (data[pos + 4] as u32);
            let width = ((data[pos + 5] as u32) << 8) | (data[pos + 6] as u32);
            if width == 0 || height == 0 {
                return Err(RasterError::InvalidImage("JPEG has no dimensions".to_string()));
            }
            return Ok((width, height));
        }

        pos += length;
    }

    Err(RasterError::InvalidImage(
        "could not find image dimensions in JPEG".to_string(),
    ))
}
