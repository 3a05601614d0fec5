//! Writing materialized arrays to disk
//!
//! Supports CSV, JSON and NumPy NPY output for arrays of any rank.

use std::fmt::Display;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use log::{debug, info};
use ndarray::ArrayD;

use crate::array::pixel::{dispatch_pixel_array, PixelArray};
use crate::errors::{ReaderError, ReaderResult};

/// File format for array output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayFormat {
    Csv,
    Json,
    Npy,
}

impl ArrayFormat {
    pub fn name(&self) -> &'static str {
        match self {
            ArrayFormat::Csv => "csv",
            ArrayFormat::Json => "json",
            ArrayFormat::Npy => "npy",
        }
    }
}

impl FromStr for ArrayFormat {
    type Err = ReaderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ArrayFormat::Csv),
            "json" => Ok(ArrayFormat::Json),
            "npy" => Ok(ArrayFormat::Npy),
            _ => Err(ReaderError::GenericError(format!("Unsupported array format: {}", s))),
        }
    }
}

/// Save an array to a file in the given format
///
/// # Arguments
/// * `array` - Materialized array to save
/// * `path` - Destination file
/// * `format` - Output format
///
/// # Returns
/// Result indicating success or an error
pub fn save_array(array: &PixelArray, path: &Path, format: ArrayFormat) -> ReaderResult<()> {
    info!("Saving {:?} {} array to {} as {}", array.shape(), array.dtype(), path.display(), format.name());

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    match format {
        ArrayFormat::Csv => dispatch_pixel_array!(array, inner => write_csv(inner, &mut writer))?,
        ArrayFormat::Json => {
            dispatch_pixel_array!(array, inner => write_json(inner, array, &mut writer))?
        }
        ArrayFormat::Npy => write_npy(array, &mut writer)?,
    }

    writer.flush()?;
    Ok(())
}

/// Write one CSV row per index of the leading axes
///
/// The last axis becomes the columns; a 0-d or 1-d array is a single row.
fn write_csv<T: Display, W: Write>(array: &ArrayD<T>, writer: &mut W) -> ReaderResult<()> {
    let columns = array.shape().last().copied().unwrap_or(1).max(1);

    write!(writer, "index")?;
    for x in 0..columns {
        write!(writer, ",{}", x)?;
    }
    writeln!(writer)?;

    let mut row = 0;
    let mut column = 0;
    for value in array.iter() {
        if column == 0 {
            write!(writer, "{}", row)?;
        }
        write!(writer, ",{}", value)?;
        column += 1;
        if column == columns {
            writeln!(writer)?;
            column = 0;
            row += 1;
        }
    }

    debug!("Wrote {} CSV rows", row);
    Ok(())
}

/// Element types that can be written as a JSON number
trait JsonNumber {
    fn write_number<W: Write>(&self, writer: &mut W) -> ReaderResult<()>;
}

macro_rules! json_integer {
    ($($t:ty),*) => {
        $(impl JsonNumber for $t {
            fn write_number<W: Write>(&self, writer: &mut W) -> ReaderResult<()> {
                write!(writer, "{}", self)?;
                Ok(())
            }
        })*
    };
}

macro_rules! json_float {
    ($($t:ty),*) => {
        $(impl JsonNumber for $t {
            // JSON has no NaN or infinity
            fn write_number<W: Write>(&self, writer: &mut W) -> ReaderResult<()> {
                if self.is_finite() {
                    write!(writer, "{}", self)?;
                } else {
                    write!(writer, "null")?;
                }
                Ok(())
            }
        })*
    };
}

json_integer!(u8, u16, u32, u64, i8, i16, i32, i64);
json_float!(f32, f64);

fn write_json<T: JsonNumber, W: Write>(
    array: &ArrayD<T>,
    source: &PixelArray,
    writer: &mut W,
) -> ReaderResult<()> {
    let dims: Vec<String> = array.shape().iter().map(|d| d.to_string()).collect();

    writeln!(writer, "{{")?;
    writeln!(writer, "  \"shape\": [{}],", dims.join(", "))?;
    writeln!(writer, "  \"dtype\": \"{}\",", source.dtype())?;
    write!(writer, "  \"data\": [")?;

    for (i, value) in array.iter().enumerate() {
        if i > 0 {
            write!(writer, ", ")?;
        }
        value.write_number(writer)?;
    }

    writeln!(writer, "]")?;
    writeln!(writer, "}}")?;
    Ok(())
}

/// Write an NPY version 1.0 file in C order
fn write_npy<W: Write>(array: &PixelArray, writer: &mut W) -> ReaderResult<()> {
    let header = npy_header(array);

    writer.write_all(b"\x93NUMPY")?;
    writer.write_all(&[0x01, 0x00])?;
    writer.write_all(&(header.len() as u16).to_le_bytes())?;
    writer.write_all(header.as_bytes())?;
    writer.write_all(&array.to_le_bytes())?;
    Ok(())
}

/// Build the padded NPY header dictionary
///
/// Magic, version, length field and header together are a multiple of 64
/// bytes, with the header ending in a newline.
pub(crate) fn npy_header(array: &PixelArray) -> String {
    let shape = match array.shape() {
        [] => "()".to_string(),
        [single] => format!("({},)", single),
        dims => {
            let dims: Vec<String> = dims.iter().map(|d| d.to_string()).collect();
            format!("({})", dims.join(", "))
        }
    };

    let dict = format!(
        "{{'descr': '{}', 'fortran_order': False, 'shape': {}, }}",
        array.dtype().npy_descr(),
        shape
    );

    // 6 magic + 2 version + 2 length + dict + newline
    let unpadded = 10 + dict.len() + 1;
    let padding = (64 - unpadded % 64) % 64;
    format!("{}{}\n", dict, " ".repeat(padding))
}
