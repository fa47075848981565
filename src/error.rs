use std::{io, path::PathBuf};

use thiserror::Error;

use crate::geometry::{MIN_TERMINAL_HEIGHT, MIN_TERMINAL_WIDTH};

#[derive(Error, Debug)]
pub enum HexcompareError {
    #[error(
        "Terminal dimensions are too small to proceed ({width}w x {height}h). \
         Increase the size to a minimum of {min_width}w x {min_height}h.",
        min_width = MIN_TERMINAL_WIDTH,
        min_height = MIN_TERMINAL_HEIGHT
    )]
    TerminalTooSmall { width: u16, height: u16 },
    #[error("Failed to open file \"{}\".", .path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Your terminal does not seem to handle colors.")]
    ColorUnsupported,
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
