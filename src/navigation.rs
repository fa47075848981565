use tracing::debug;

use crate::{
    geometry::{DetailLayout, GRID_TOP_ROW, GridGeometry, SIDE_MARGIN},
    model::{DisplayMode, ViewModel},
    offsets::OffsetIndex,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Command {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    ScrollLineUp,
    ScrollLineDown,
    ScrollPageUp,
    ScrollPageDown,
    ToggleMode,
    ToggleFormat,
    JumpToOffset(u64),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ClickKind {
    Single,
    Double,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum ScrollDirection {
    Up,
    Down,
}

/// Translates commands into new view state for one grid layout.
pub(crate) struct Navigator<'a> {
    geometry: &'a GridGeometry,
    offsets: &'a OffsetIndex,
    detail: DetailLayout,
    largest_file_size: u64,
}

impl<'a> Navigator<'a> {
    pub(crate) fn new(
        geometry: &'a GridGeometry,
        offsets: &'a OffsetIndex,
        largest_file_size: u64,
    ) -> Self {
        Self {
            geometry,
            offsets,
            detail: DetailLayout::new(geometry.terminal_width, largest_file_size),
            largest_file_size,
        }
    }

    pub(crate) fn apply(&self, view: &mut ViewModel, command: Command) {
        match command {
            Command::MoveLeft | Command::MoveUp => {
                let current_block = self.offsets.locate(view.current_offset);
                let target_block = self.shifted_block(current_block, command);
                self.jump(view, self.offsets.start(target_block));
            }
            Command::MoveRight | Command::MoveDown => {
                let current_block = self.offsets.locate(view.current_offset);
                let target_block = self.shifted_block(current_block, command);
                // Stays put on the last block.
                if target_block != current_block {
                    self.jump(view, self.offsets.start(target_block));
                }
            }
            Command::ScrollLineUp | Command::ScrollPageUp => {
                view.current_offset =
                    self.scrolled_offset(view.current_offset, ScrollDirection::Up);
            }
            Command::ScrollLineDown | Command::ScrollPageDown => {
                view.current_offset =
                    self.scrolled_offset(view.current_offset, ScrollDirection::Down);
            }
            Command::ToggleMode => view.mode = view.mode.toggled(),
            Command::ToggleFormat => view.byte_format = view.byte_format.toggled(),
            Command::JumpToOffset(offset) => self.jump(view, offset),
        }
    }

    fn jump(&self, view: &mut ViewModel, offset: u64) {
        if offset < self.largest_file_size {
            view.current_offset = offset;
        } else {
            debug!(offset, "ignoring jump past end of file");
        }
    }

    fn shifted_block(&self, current: usize, command: Command) -> usize {
        let last_block = self.offsets.len().saturating_sub(1);
        let row_length = self.geometry.grid_width;

        match command {
            Command::MoveLeft => current.saturating_sub(1),
            Command::MoveRight => (current + 1).min(last_block),
            Command::MoveUp => current.saturating_sub(row_length),
            Command::MoveDown => (current + row_length).min(last_block),
            _ => current,
        }
    }

    /// Moves by `offset_jump - 1` bytes, the width of one hex row.
    fn scrolled_offset(&self, offset: u64, direction: ScrollDirection) -> u64 {
        let offset_jump = self.detail.offset_jump;
        if self.detail.row_step() == 0 {
            return offset;
        }

        match direction {
            ScrollDirection::Up => match offset.checked_sub(offset_jump) {
                Some(rewound) => rewound + 1,
                None => 0,
            },
            ScrollDirection::Down => {
                if offset.saturating_add(offset_jump) >= self.largest_file_size {
                    offset
                } else {
                    offset + offset_jump - 1
                }
            }
        }
    }

    /// Block under a screen cell of the Overview grid, if any.
    pub(crate) fn block_at(&self, column: usize, row: usize) -> Option<usize> {
        let grid_columns = SIDE_MARGIN..SIDE_MARGIN + self.geometry.grid_width;
        let grid_rows = GRID_TOP_ROW..GRID_TOP_ROW + self.geometry.grid_height;
        if !grid_columns.contains(&column) || !grid_rows.contains(&row) {
            return None;
        }

        let index = self.geometry.grid_width * (row - GRID_TOP_ROW) + (column - SIDE_MARGIN);
        (index < self.offsets.len()).then_some(index)
    }

    pub(crate) fn click_commands(
        &self,
        mode: DisplayMode,
        column: usize,
        row: usize,
        kind: ClickKind,
    ) -> Vec<Command> {
        if mode != DisplayMode::Overview {
            return Vec::new();
        }

        let Some(block) = self.block_at(column, row) else {
            return Vec::new();
        };

        let mut commands = vec![Command::JumpToOffset(self.offsets.start(block))];
        if kind == ClickKind::Double {
            commands.push(Command::ToggleMode);
        }
        commands
    }
}
