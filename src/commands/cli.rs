//! Command-line definition

use clap::{Arg, ArgAction, Command as ClapCommand};

/// Build the argument parser for the `tiffstack` binary
pub fn build_cli() -> ClapCommand {
    ClapCommand::new("tiffstack")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Maurice Schilpp")
        .about("Expose TIFF files, or a glob of them, as one lazily evaluated array")
        .arg(
            Arg::new("input")
                .help("Input TIFF file or glob pattern")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Configuration file (defaults to ./tiffstack.toml when present)")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("export")
                .short('e')
                .long("export")
                .help("Compute the array and write it to this file")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("array-format")
                .long("array-format")
                .help("Format for array output (csv, json, npy)")
                .value_name("FORMAT")
                .required(false),
        )
        .arg(
            Arg::new("preview")
                .short('p')
                .long("preview")
                .help("Render one page to this image file")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("page")
                .long("page")
                .help("Page to render with --preview, counted across all files")
                .value_name("INDEX")
                .default_value("0")
                .required(false),
        )
}
