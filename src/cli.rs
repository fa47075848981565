use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "hexcompare",
    version,
    about = "Compares two binary files byte for byte in an interactive terminal UI.",
    after_help = r#"Examples:
  hexcompare old.bin new.bin
  hexcompare firmware.img

Key bindings:
  arrow keys       move between blocks (overview) / scroll rows (full view)
  page up/down     scroll rows
  mouse click      jump to a block (double click opens the full view)
  v                toggle overview / full view
  m                toggle hex / ASCII bytes
  q / esc          quit"#
)]
struct Cli {
    /// First file to compare
    file1: PathBuf,
    /// Second file to compare (defaults to the first file)
    file2: Option<PathBuf>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CliOptions {
    pub(crate) primary_path: PathBuf,
    pub(crate) secondary_path: PathBuf,
}

impl Cli {
    /// Without a second path the first file is compared against itself.
    fn into_options(self) -> CliOptions {
        let secondary_path = self.file2.unwrap_or_else(|| self.file1.clone());
        CliOptions {
            primary_path: self.file1,
            secondary_path,
        }
    }
}

/// Parses the process arguments; clap errors are returned for the caller to print.
pub fn parse_cli_options() -> Result<CliOptions, clap::Error> {
    Cli::try_parse().map(Cli::into_options)
}
