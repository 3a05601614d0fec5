//! TIFF fixtures written byte by byte
//!
//! Pages are stored as a single strip, uncompressed or deflate-compressed,
//! in a little-endian classic TIFF.

#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};

use byteorder::{LittleEndian, WriteBytesExt};
use flate2::write::ZlibEncoder;
use flate2::Compression;

const SHORT: u16 = 3;
const LONG: u16 = 4;

/// One page of a fixture
#[derive(Debug, Clone)]
pub struct Page {
    pub width: u32,
    pub height: u32,
    pub samples: u16,
    pub bits_per_sample: u16,
    pub sample_format: u16,
    /// Little-endian sample bytes in row-major order
    pub data: Vec<u8>,
}

impl Page {
    /// Grayscale uint8 page
    pub fn gray8(width: u32, height: u32, data: Vec<u8>) -> Self {
        assert_eq!(data.len(), (width * height) as usize);
        Page { width, height, samples: 1, bits_per_sample: 8, sample_format: 1, data }
    }

    /// Grayscale uint8 page where every pixel is `value`
    pub fn filled(width: u32, height: u32, value: u8) -> Self {
        Self::gray8(width, height, vec![value; (width * height) as usize])
    }

    /// Grayscale uint16 page
    pub fn gray16(width: u32, height: u32, values: &[u16]) -> Self {
        assert_eq!(values.len(), (width * height) as usize);
        let mut data = Vec::new();
        for v in values {
            data.write_u16::<LittleEndian>(*v).unwrap();
        }
        Page { width, height, samples: 1, bits_per_sample: 16, sample_format: 1, data }
    }

    /// Grayscale float32 page
    pub fn float32(width: u32, height: u32, values: &[f32]) -> Self {
        assert_eq!(values.len(), (width * height) as usize);
        let mut data = Vec::new();
        for v in values {
            data.write_f32::<LittleEndian>(*v).unwrap();
        }
        Page { width, height, samples: 1, bits_per_sample: 32, sample_format: 3, data }
    }

    /// Interleaved RGB uint8 page
    pub fn rgb8(width: u32, height: u32, data: Vec<u8>) -> Self {
        assert_eq!(data.len(), (width * height * 3) as usize);
        Page { width, height, samples: 3, bits_per_sample: 8, sample_format: 1, data }
    }
}

struct Entry {
    tag: u16,
    field_type: u16,
    values: Vec<u32>,
}

impl Entry {
    fn short(tag: u16, values: Vec<u32>) -> Self {
        Entry { tag, field_type: SHORT, values }
    }

    fn long(tag: u16, value: u32) -> Self {
        Entry { tag, field_type: LONG, values: vec![value] }
    }

    fn value_size(&self) -> usize {
        let unit = if self.field_type == SHORT { 2 } else { 4 };
        unit * self.values.len()
    }

    fn write_values(&self, out: &mut Vec<u8>) {
        for v in &self.values {
            if self.field_type == SHORT {
                out.write_u16::<LittleEndian>(*v as u16).unwrap();
            } else {
                out.write_u32::<LittleEndian>(*v).unwrap();
            }
        }
    }
}

/// Build a TIFF file holding `pages`
pub fn build_tiff(pages: &[Page], deflate: bool) -> Vec<u8> {
    let mut buffer = Vec::new();

    // TIFF header (little-endian); first IFD offset patched below
    buffer.extend_from_slice(b"II");
    buffer.write_u16::<LittleEndian>(42).unwrap();
    buffer.write_u32::<LittleEndian>(0).unwrap();
    let mut next_offset_position = 4;

    for page in pages {
        let strip = if deflate {
            let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(&page.data).unwrap();
            encoder.finish().unwrap()
        } else {
            page.data.clone()
        };

        let strip_offset = buffer.len() as u32;
        buffer.extend_from_slice(&strip);
        pad_to_word(&mut buffer);

        let samples = vec![page.samples as u32; page.samples as usize];
        let entries = vec![
            Entry::long(256, page.width),
            Entry::long(257, page.height),
            Entry::short(258, vec![page.bits_per_sample as u32; page.samples as usize]),
            Entry::short(259, vec![if deflate { 8 } else { 1 }]),
            Entry::short(262, vec![if page.samples >= 3 { 2 } else { 1 }]),
            Entry::long(273, strip_offset),
            Entry::short(277, vec![page.samples as u32]),
            Entry::long(278, page.height),
            Entry::long(279, strip.len() as u32),
            Entry::short(339, samples.iter().map(|_| page.sample_format as u32).collect()),
        ];

        // Values that do not fit in the 4-byte field go before the IFD
        let mut external_offsets = Vec::new();
        for entry in &entries {
            if entry.value_size() > 4 {
                external_offsets.push(Some(buffer.len() as u32));
                entry.write_values(&mut buffer);
                pad_to_word(&mut buffer);
            } else {
                external_offsets.push(None);
            }
        }

        let ifd_offset = buffer.len() as u32;
        patch_u32(&mut buffer, next_offset_position, ifd_offset);

        buffer.write_u16::<LittleEndian>(entries.len() as u16).unwrap();
        for (entry, external) in entries.iter().zip(&external_offsets) {
            buffer.write_u16::<LittleEndian>(entry.tag).unwrap();
            buffer.write_u16::<LittleEndian>(entry.field_type).unwrap();
            buffer.write_u32::<LittleEndian>(entry.values.len() as u32).unwrap();
            match external {
                Some(offset) => buffer.write_u32::<LittleEndian>(*offset).unwrap(),
                None => {
                    let mut field = Vec::new();
                    entry.write_values(&mut field);
                    field.resize(4, 0);
                    buffer.extend_from_slice(&field);
                }
            }
        }

        next_offset_position = buffer.len();
        buffer.write_u32::<LittleEndian>(0).unwrap();
    }

    buffer
}

/// Write a fixture file into `dir`
pub fn write_tiff(dir: &Path, name: &str, pages: &[Page]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, build_tiff(pages, false)).unwrap();
    path
}

/// Write a deflate-compressed fixture file into `dir`
pub fn write_deflate_tiff(dir: &Path, name: &str, pages: &[Page]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, build_tiff(pages, true)).unwrap();
    path
}

fn pad_to_word(buffer: &mut Vec<u8>) {
    if buffer.len() % 2 == 1 {
        buffer.push(0);
    }
}

fn patch_u32(buffer: &mut [u8], position: usize, value: u32) {
    buffer[position..position + 4].copy_from_slice(&value.to_le_bytes());
}
