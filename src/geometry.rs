use crate::error::HexcompareError;

/// Columns reserved on each side of the block grid and the hex rows.
pub(crate) const SIDE_MARGIN: usize = 2;
/// Rows taken by the title bar, footer, file-name header and hex rows in Overview mode.
pub(crate) const VERTICAL_CHROME: usize = 11;
/// First screen row of the Overview block grid.
pub(crate) const GRID_TOP_ROW: usize = 2;
/// `0x` prefix plus the trailing space of an offset gutter entry.
pub(crate) const GUTTER_EXTRA: usize = 3;

pub(crate) const MIN_TERMINAL_WIDTH: u16 = 10;
pub(crate) const MIN_TERMINAL_HEIGHT: u16 = 16;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct GridGeometry {
    pub(crate) terminal_width: usize,
    pub(crate) terminal_height: usize,
    pub(crate) grid_width: usize,
    pub(crate) grid_height: usize,
}

impl GridGeometry {
    pub(crate) fn compute(width: u16, height: u16) -> Result<Self, HexcompareError> {
        if width < MIN_TERMINAL_WIDTH || height < MIN_TERMINAL_HEIGHT {
            return Err(HexcompareError::TerminalTooSmall { width, height });
        }

        let terminal_width = width as usize;
        let terminal_height = height as usize;

        Ok(Self {
            terminal_width,
            terminal_height,
            grid_width: terminal_width - SIDE_MARGIN * 2,
            grid_height: terminal_height - VERTICAL_CHROME,
        })
    }

    pub(crate) fn total_blocks(&self) -> usize {
        self.grid_width * self.grid_height
    }
}

/// Hex digits needed to print `largest_file_size`, which sizes the offset gutter.
pub(crate) fn offset_digit_count(largest_file_size: u64) -> usize {
    format!("{largest_file_size:X}").len()
}

/// Layout of the hex/ASCII rows shared by the Overview footer and Detail mode.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct DetailLayout {
    pub(crate) offset_digits: usize,
    pub(crate) hex_columns: usize,
    pub(crate) offset_jump: u64,
}

impl DetailLayout {
    pub(crate) fn new(terminal_width: usize, largest_file_size: u64) -> Self {
        let offset_digits = offset_digit_count(largest_file_size);
        let hex_columns =
            terminal_width.saturating_sub(offset_digits + GUTTER_EXTRA + SIDE_MARGIN * 2);

        Self {
            offset_digits,
            hex_columns,
            offset_jump: (hex_columns / 4) as u64,
        }
    }

    /// Bytes advanced by one scroll command, and bytes drawn per hex row.
    pub(crate) fn row_step(&self) -> u64 {
        self.offset_jump.saturating_sub(1)
    }

    /// Screen column of the first primary-file byte cell.
    pub(crate) fn data_start_column(&self) -> usize {
        SIDE_MARGIN + self.offset_digits + GUTTER_EXTRA
    }

    /// Distance between a primary-file byte cell and the matching secondary-file cell.
    pub(crate) fn secondary_column_shift(&self) -> usize {
        self.offset_jump as usize * 2 + 1
    }
}
