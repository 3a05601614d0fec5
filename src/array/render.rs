//! Conversion of materialized pages to images

use image::{DynamicImage, GrayImage, ImageBuffer, Luma, RgbImage, RgbaImage};
use ndarray::ArrayD;

use crate::array::pixel::PixelArray;
use crate::errors::{ReaderError, ReaderResult};

/// Render a page as an image
///
/// Two-dimensional uint8 and uint16 arrays become grayscale images; a
/// `[height, width, 3|4]` uint8 array becomes RGB or RGBA.
///
/// # Arguments
/// * `array` - A single computed page
///
/// # Returns
/// The image, or an error for layouts without an image equivalent
pub fn to_dynamic_image(array: &PixelArray) -> ReaderResult<DynamicImage> {
    let unsupported = || {
        ReaderError::UnsupportedDataType(format!(
            "cannot render a {} array of shape {:?} as an image",
            array.dtype(),
            array.shape()
        ))
    };

    let image = match (array, array.shape()) {
        (PixelArray::UInt8(data), &[height, width]) => {
            let buffer = GrayImage::from_raw(width as u32, height as u32, row_major(data))
                .ok_or_else(unsupported)?;
            DynamicImage::ImageLuma8(buffer)
        }
        (PixelArray::UInt16(data), &[height, width]) => {
            let buffer: ImageBuffer<Luma<u16>, Vec<u16>> =
                ImageBuffer::from_raw(width as u32, height as u32, row_major(data))
                    .ok_or_else(unsupported)?;
            DynamicImage::ImageLuma16(buffer)
        }
        (PixelArray::UInt8(data), &[height, width, 3]) => {
            let buffer = RgbImage::from_raw(width as u32, height as u32, row_major(data))
                .ok_or_else(unsupported)?;
            DynamicImage::ImageRgb8(buffer)
        }
        (PixelArray::UInt8(data), &[height, width, 4]) => {
            let buffer = RgbaImage::from_raw(width as u32, height as u32, row_major(data))
                .ok_or_else(unsupported)?;
            DynamicImage::ImageRgba8(buffer)
        }
        _ => return Err(unsupported()),
    };

    Ok(image)
}

fn row_major<T: Copy>(data: &ArrayD<T>) -> Vec<T> {
    data.iter().copied().collect()
}
