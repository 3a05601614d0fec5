//! CLI command implementations
//!
//! This module contains implementations of various commands
//! supported by the CLI application using the Command pattern.

pub mod cli;
pub mod command_traits;
pub mod info_command;
pub mod export_command;
pub mod preview_command;

pub use cli::build_cli;
pub use command_traits::{Command, CommandFactory};
pub use info_command::InfoCommand;
pub use export_command::ExportCommand;
pub use preview_command::PreviewCommand;

use clap::ArgMatches;

use crate::config::Config;
use crate::errors::{ReaderError, ReaderResult};

/// Factory for creating command instances based on CLI arguments
///
/// This factory examines the command-line arguments and creates
/// the appropriate command instance for execution.
pub struct TiffStackCommandFactory;

impl TiffStackCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        TiffStackCommandFactory
    }
}

impl Default for TiffStackCommandFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CommandFactory<'a> for TiffStackCommandFactory {
    fn create_command(&self, args: &ArgMatches, config: &'a Config) -> ReaderResult<Box<dyn Command + 'a>> {
        if args.get_one::<String>("export").is_some() {
            Ok(Box::new(ExportCommand::new(args, config)?))
        } else if args.get_one::<String>("preview").is_some() {
            Ok(Box::new(PreviewCommand::new(args, config)?))
        } else {
            // Default to the info command
            Ok(Box::new(InfoCommand::new(args, config)?))
        }
    }
}

/// Read the required input argument
pub(crate) fn input_arg(args: &ArgMatches) -> ReaderResult<String> {
    args.get_one::<String>("input")
        .cloned()
        .ok_or_else(|| ReaderError::GenericError("Missing input file or pattern".to_string()))
}
