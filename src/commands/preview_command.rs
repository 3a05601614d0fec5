//! Page preview command
//!
//! This module implements the command that decodes a single page of the
//! stack and saves it as an image file.

use clap::ArgMatches;
use log::info;

use crate::array::render::to_dynamic_image;
use crate::commands::command_traits::Command;
use crate::commands::input_arg;
use crate::config::Config;
use crate::errors::{ReaderError, ReaderResult};
use crate::reader::TiffStackReader;

/// Command for rendering one page as an image
pub struct PreviewCommand {
    /// File path or glob pattern
    input: String,
    /// Destination image; the format follows the extension
    output: String,
    /// Index of the page across the whole stack
    page: usize,
}

impl PreviewCommand {
    /// Create a new preview command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `_config` - Settings loaded for this run
    ///
    /// # Returns
    /// A new PreviewCommand instance or an error
    pub fn new(args: &ArgMatches, _config: &Config) -> ReaderResult<Self> {
        let output = args.get_one::<String>("preview")
            .cloned()
            .ok_or_else(|| ReaderError::GenericError("Missing output image path for preview".to_string()))?;

        let page = match args.get_one::<String>("page") {
            Some(value) => value.parse::<usize>()
                .map_err(|_| ReaderError::GenericError(format!("Invalid page index: {}", value)))?,
            None => 0,
        };

        Ok(PreviewCommand {
            input: input_arg(args)?,
            output,
            page,
        })
    }
}

impl Command for PreviewCommand {
    fn execute(&self) -> ReaderResult<()> {
        info!("Rendering page {} of {} to {}", self.page, self.input, self.output);

        let reader = TiffStackReader::open(self.input.as_str())?;
        reader.scope(|reader| {
            let array = reader.read()?;

            // A single page is returned without a stacking axis
            let page = if array.num_chunks() > 1 {
                array.index(self.page)?
            } else if self.page == 0 {
                array
            } else {
                return Err(ReaderError::IndexOutOfBounds { index: self.page, len: 1 });
            };

            let image = to_dynamic_image(&page.compute()?)?;
            image.save(&self.output)?;
            info!("Saved {}x{} preview", image.width(), image.height());
            Ok(())
        })
    }
}
