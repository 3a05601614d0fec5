//! Array export command
//!
//! This module implements the command that materializes the combined
//! array and writes it as CSV, JSON or NPY.

use std::path::Path;

use clap::ArgMatches;
use log::info;

use crate::array::export::{save_array, ArrayFormat};
use crate::commands::command_traits::Command;
use crate::commands::input_arg;
use crate::config::Config;
use crate::errors::{ReaderError, ReaderResult};
use crate::reader::TiffStackReader;
use crate::utils::progress::ProgressTracker;

/// Command for writing the computed array to a file
pub struct ExportCommand {
    /// File path or glob pattern
    input: String,
    /// Destination file
    output: String,
    /// Output format
    format: ArrayFormat,
    /// Whether to draw a progress bar
    progress: bool,
}

impl ExportCommand {
    /// Create a new export command
    ///
    /// The format comes from `--array-format`, falling back to the
    /// configured default.
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `config` - Settings loaded for this run
    ///
    /// # Returns
    /// A new ExportCommand instance or an error
    pub fn new(args: &ArgMatches, config: &Config) -> ReaderResult<Self> {
        let output = args.get_one::<String>("export")
            .cloned()
            .ok_or_else(|| ReaderError::GenericError("Missing output file path for export".to_string()))?;

        let format = match args.get_one::<String>("array-format") {
            Some(name) => name.parse()?,
            None => config.array_format,
        };

        Ok(ExportCommand {
            input: input_arg(args)?,
            output,
            format,
            progress: config.progress,
        })
    }
}

impl Command for ExportCommand {
    fn execute(&self) -> ReaderResult<()> {
        info!("Exporting {} to {} as {}", self.input, self.output, self.format.name());

        let reader = TiffStackReader::open(self.input.as_str())?;
        reader.scope(|reader| {
            let array = reader.read()?;

            let progress = ProgressTracker::new(array.num_chunks() as u64, "Decoding pages", self.progress);
            let data = array.compute_with_progress(&mut || progress.increment(1))?;
            progress.finish();

            save_array(&data, Path::new(&self.output), self.format)?;
            info!("Exported {} pages with shape {:?}", progress.position(), data.shape());
            Ok(())
        })
    }
}
