mod app;
mod cli;
mod diff;
mod error;
mod geometry;
mod logging;
mod model;
mod navigation;
mod offsets;
mod partition;
mod render;
mod session;
mod source;
mod terminal;
mod text;

use anyhow::Result;

pub use crate::{
    cli::{CliOptions, parse_cli_options},
    error::HexcompareError,
};
use crate::{logging::install_tracing, source::FileSource, terminal::start_interactive_comparison};

pub fn run(options: CliOptions) -> Result<()> {
    install_tracing()?;

    let primary = FileSource::open(&options.primary_path)?;
    let secondary = FileSource::open(&options.secondary_path)?;

    start_interactive_comparison(primary, secondary)
}
