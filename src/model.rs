use std::fmt::{self, Display};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum DisplayMode {
    /// Block grid over the whole file pair, with a few hex rows below it.
    Overview,
    /// Full-height hex/ASCII rows.
    Detail,
}

impl DisplayMode {
    pub(crate) fn toggled(self) -> Self {
        match self {
            DisplayMode::Overview => DisplayMode::Detail,
            DisplayMode::Detail => DisplayMode::Overview,
        }
    }
}

impl Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayMode::Overview => write!(f, "overview"),
            DisplayMode::Detail => write!(f, "detail"),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ByteFormat {
    Hex,
    Ascii,
}

impl ByteFormat {
    pub(crate) fn toggled(self) -> Self {
        match self {
            ByteFormat::Hex => ByteFormat::Ascii,
            ByteFormat::Ascii => ByteFormat::Hex,
        }
    }
}

impl Display for ByteFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ByteFormat::Hex => write!(f, "hex"),
            ByteFormat::Ascii => write!(f, "ascii"),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct ViewModel {
    pub(crate) current_offset: u64,
    pub(crate) mode: DisplayMode,
    pub(crate) byte_format: ByteFormat,
}

impl Default for ViewModel {
    fn default() -> Self {
        Self {
            current_offset: 0,
            mode: DisplayMode::Overview,
            byte_format: ByteFormat::Ascii,
        }
    }
}
