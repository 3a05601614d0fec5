//! TIFF handle backed by the `tiff` crate decoder

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::{debug, info};
use tiff::decoder::Decoder;
use tiff::tags::Tag;

use crate::array::dtype::{sample_format, DataType};
use crate::array::pixel::PixelArray;
use crate::errors::{ReaderError, ReaderResult};
use crate::io::seekable::SeekableReader;
use crate::tiff::handle::{PageInfo, SeriesInfo, TiffHandle};
use crate::tiff::series::group_pages;

/// An opened TIFF file
///
/// The header and first IFD are parsed on open; the remaining IFDs are
/// scanned the first time the series are requested. Pixel data is only
/// decoded by `decode_page`.
pub struct TiffFile {
    /// Path or label of the source
    name: String,
    /// Decoder over the source; `None` once closed
    decoder: Option<Decoder<Box<dyn SeekableReader>>>,
    /// Page layouts, filled by the first scan
    pages: Option<Vec<PageInfo>>,
}

impl TiffFile {
    /// Opens a TIFF file from the given path
    ///
    /// # Arguments
    /// * `path` - Path to the TIFF file
    ///
    /// # Returns
    /// The opened file, or the I/O or decoder error raised while opening it
    pub fn open(path: &Path) -> ReaderResult<Self> {
        info!("Opening TIFF file: {}", path.display());
        let file = File::open(path)?;
        let reader = BufReader::with_capacity(1024 * 1024, file); // 1MB buffer

        Self::from_reader(Box::new(reader), &path.display().to_string())
    }

    /// Opens a TIFF file from an already open reader
    ///
    /// # Arguments
    /// * `reader` - Reader positioned anywhere in a complete TIFF file
    /// * `name` - Name used in log and error messages
    pub fn from_reader(reader: Box<dyn SeekableReader>, name: &str) -> ReaderResult<Self> {
        let decoder = Decoder::new(reader)?;
        debug!("Parsed TIFF header of {}", name);

        Ok(TiffFile {
            name: name.to_string(),
            decoder: Some(decoder),
            pages: None,
        })
    }

    /// Whether the decoder has been released
    pub fn is_closed(&self) -> bool {
        self.decoder.is_none()
    }

    /// Layout of every page in the file, in IFD order
    pub fn pages(&mut self) -> ReaderResult<Vec<PageInfo>> {
        if let Some(pages) = &self.pages {
            return Ok(pages.clone());
        }

        let pages = scan_pages(self.decoder_mut()?)?;
        debug!("Scanned {} pages in {}", pages.len(), self.name);
        self.pages = Some(pages.clone());
        Ok(pages)
    }

    fn decoder_mut(&mut self) -> ReaderResult<&mut Decoder<Box<dyn SeekableReader>>> {
        let name = &self.name;
        self.decoder
            .as_mut()
            .ok_or_else(|| ReaderError::Closed(format!("{} is closed and can no longer be read.", name)))
    }
}

/// Walk the IFD chain from the first image, recording each page layout
fn scan_pages(decoder: &mut Decoder<Box<dyn SeekableReader>>) -> ReaderResult<Vec<PageInfo>> {
    decoder.seek_to_image(0)?;

    let mut pages = Vec::new();
    loop {
        pages.push(current_page(decoder, pages.len())?);
        if !decoder.more_images() {
            break;
        }
        decoder.next_image()?;
    }
    Ok(pages)
}

/// Layout of the image the decoder is positioned on
fn current_page(decoder: &mut Decoder<Box<dyn SeekableReader>>, index: usize) -> ReaderResult<PageInfo> {
    let (width, height) = decoder.dimensions()?;

    let samples = match decoder.find_tag(Tag::SamplesPerPixel)? {
        Some(value) => value.into_u32()? as usize,
        None => 1,
    };
    // One value per sample; a single-sample tag decodes as a scalar
    let bits_per_sample = decoder
        .find_tag_unsigned_vec::<u16>(Tag::BitsPerSample)?
        .and_then(|bits| bits.first().copied())
        .unwrap_or(1);
    let format = decoder
        .find_tag_unsigned_vec::<u16>(Tag::SampleFormat)?
        .and_then(|formats| formats.first().copied())
        .unwrap_or(sample_format::UINT);

    let dtype = DataType::from_tiff_format(bits_per_sample, format)?;

    let mut shape = vec![height as usize, width as usize];
    if samples > 1 {
        shape.push(samples);
    }

    debug!("Page {}: shape {:?}, dtype {}", index, shape, dtype);
    Ok(PageInfo { index, shape, dtype })
}

impl TiffHandle for TiffFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn series(&mut self) -> ReaderResult<Vec<SeriesInfo>> {
        let pages = self.pages()?;
        Ok(group_pages(&pages))
    }

    fn decode_page(&mut self, page: usize) -> ReaderResult<PixelArray> {
        let pages = self.pages()?;
        let info = pages
            .iter()
            .find(|p| p.index == page)
            .ok_or(ReaderError::IndexOutOfBounds { index: page, len: pages.len() })?;

        debug!("Decoding page {} of {}", page, self.name);
        let decoder = self.decoder_mut()?;
        decoder.seek_to_image(page)?;
        let result = decoder.read_image()?;

        PixelArray::from_decoding_result(result, &info.shape)
    }

    fn close(&mut self) -> ReaderResult<()> {
        if self.decoder.take().is_some() {
            info!("Closed TIFF file: {}", self.name);
        }
        Ok(())
    }
}
