//! Stack summary command
//!
//! This module implements the default command, which opens the input and
//! describes the combined lazy array without decoding any pixels.

use clap::ArgMatches;
use log::{debug, info};

use crate::commands::command_traits::Command;
use crate::commands::input_arg;
use crate::config::Config;
use crate::errors::ReaderResult;
use crate::reader::{TiffStackReader, MIME_TYPE};

/// Command for describing the array a TIFF input resolves to
pub struct InfoCommand {
    /// File path or glob pattern
    input: String,
    /// Whether to list every chunk of the array
    verbose: bool,
}

impl InfoCommand {
    /// Create a new info command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `_config` - Settings loaded for this run
    ///
    /// # Returns
    /// A new InfoCommand instance or an error
    pub fn new(args: &ArgMatches, _config: &Config) -> ReaderResult<Self> {
        Ok(InfoCommand {
            input: input_arg(args)?,
            verbose: args.get_flag("verbose"),
        })
    }
}

impl Command for InfoCommand {
    fn execute(&self) -> ReaderResult<()> {
        info!("Describing {}", self.input);

        let reader = TiffStackReader::open(self.input.as_str())?;
        reader.scope(|reader| {
            let array = reader.read()?;

            println!("{}", reader);
            println!("  Content type: {}", MIME_TYPE);
            println!("  Files: {}", reader.file_count());
            println!("  Array: {}", array);
            println!("  Shape: {:?}", array.shape());
            println!("  Data type: {}", array.dtype());
            println!("  Size: {} bytes", array.nbytes());

            if self.verbose && array.num_chunks() > 1 {
                for i in 0..array.len() {
                    debug!("  Page {}: {}", i, array.index(i)?);
                }
            }
            Ok(())
        })
    }
}
