//! Photo embedding
//!
//! JPEG data passes through untouched under `DCTDecode`. PNG data is
//! re-wrapped: the concatenated IDAT chunks are already a zlib stream with
//! PNG row filters, which `FlateDecode` with predictor 15 understands.
//! Only non-interlaced 8-bit grey or RGB PNGs qualify for that.

use lopdf::{dictionary, Dictionary, Stream};
use zeladoria_types::ImageKind;

/// An image ready to become a PDF XObject
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedImage {
    pub width: u32,
    pub height: u32,
    color_space: &'static str,
    filter: Filter,
    data: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Filter {
    Dct,
    PngFlate { colors: u8 },
}

impl EmbeddedImage {
    /// Prepare photo bytes for embedding, or `None` if the encoding is not
    /// one the report can carry.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        match ImageKind::detect(bytes)? {
            ImageKind::Jpeg => jpeg(bytes),
            ImageKind::Png => png(bytes),
        }
    }

    /// Width over height
    pub fn aspect(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }

    pub fn into_stream(self) -> Stream {
        let mut dict = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => i64::from(self.width),
            "Height" => i64::from(self.height),
            "ColorSpace" => self.color_space,
            "BitsPerComponent" => 8,
        };
        match self.filter {
            Filter::Dct => dict.set("Filter", "DCTDecode"),
            Filter::PngFlate { colors } => {
                dict.set("Filter", "FlateDecode");
                let params: Dictionary = dictionary! {
                    "Predictor" => 15,
                    "Colors" => i64::from(colors),
                    "BitsPerComponent" => 8,
                    "Columns" => i64::from(self.width),
                };
                dict.set("DecodeParms", params);
            }
        }
        Stream::new(dict, self.data).with_compression(false)
    }
}

// ── JPEG ─────────────────────────────────────────────────────────────

fn jpeg(bytes: &[u8]) -> Option<EmbeddedImage> {
    let mut pos = 2;
    loop {
        while *bytes.get(pos)? == 0xFF && bytes.get(pos + 1) == Some(&0xFF) {
            pos += 1;
        }
        if *bytes.get(pos)? != 0xFF {
            return None;
        }
        let marker = *bytes.get(pos + 1)?;
        pos += 2;

        if marker == 0x01 || (0xD0..=0xD9).contains(&marker) {
            continue;
        }

        let length = usize::from(be16(bytes, pos)?);
        let is_frame = (0xC0..=0xCF).contains(&marker) && !matches!(marker, 0xC4 | 0xC8 | 0xCC);
        if is_frame {
            let height = be16(bytes, pos + 3)?;
            let width = be16(bytes, pos + 5)?;
            let components = *bytes.get(pos + 7)?;
            let color_space = match components {
                1 => "DeviceGray",
                3 => "DeviceRGB",
                4 => "DeviceCMYK",
                _ => return None,
            };
            if width == 0 || height == 0 {
                return None;
            }
            return Some(EmbeddedImage {
                width: u32::from(width),
                height: u32::from(height),
                color_space,
                filter: Filter::Dct,
                data: bytes.to_vec(),
            });
        }
        pos += length;
    }
}

fn be16(bytes: &[u8], pos: usize) -> Option<u16> {
    Some(u16::from_be_bytes([*bytes.get(pos)?, *bytes.get(pos + 1)?]))
}

// ── PNG ──────────────────────────────────────────────────────────────

fn png(bytes: &[u8]) -> Option<EmbeddedImage> {
    let mut pos = 8;
    let mut header = None;
    let mut data = Vec::new();

    while pos + 8 <= bytes.len() {
        let length = u32::from_be_bytes(bytes[pos..pos + 4].try_into().ok()?) as usize;
        let kind = &bytes[pos + 4..pos + 8];
        let body = bytes.get(pos + 8..pos + 8 + length)?;
        match kind {
            b"IHDR" if body.len() >= 13 => header = Some(body.to_vec()),
            b"IDAT" => data.extend_from_slice(body),
            b"IEND" => break,
            _ => {}
        }
        // chunk body is followed by a 4 byte CRC
        pos += 12 + length;
    }

    let header = header?;
    let width = u32::from_be_bytes(header[0..4].try_into().ok()?);
    let height = u32::from_be_bytes(header[4..8].try_into().ok()?);
    let (bit_depth, color_type, interlace) = (header[8], header[9], header[12]);

    let (color_space, colors) = match color_type {
        0 => ("DeviceGray", 1),
        2 => ("DeviceRGB", 3),
        _ => return None,
    };
    if bit_depth != 8 || interlace != 0 || width == 0 || height == 0 || data.is_empty() {
        return None;
    }

    Some(EmbeddedImage {
        width,
        height,
        color_space,
        filter: Filter::PngFlate { colors },
        data,
    })
}
