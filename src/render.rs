use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use crate::{
    diff::BlockStatus,
    error::HexcompareError,
    geometry::{DetailLayout, GRID_TOP_ROW, SIDE_MARGIN},
    model::{ByteFormat, DisplayMode},
    session::Session,
    text::{char_count, printable_ascii, truncate_to_width},
};

/// Rows between the file-name header and the footer while in Overview mode.
const OVERVIEW_HEX_ROWS: usize = 5;

fn title_bar_style() -> Style {
    Style::default().fg(Color::Black).bg(Color::White)
}

fn block_style(status: BlockStatus) -> Style {
    match status {
        BlockStatus::Same => Style::default().fg(Color::White).bg(Color::Blue),
        BlockStatus::Different => Style::default().fg(Color::White).bg(Color::Red),
        BlockStatus::Empty => Style::default().fg(Color::Black).bg(Color::Cyan),
    }
}

fn active_block_style() -> Style {
    Style::default().fg(Color::Black).bg(Color::Yellow)
}

/// Fixed-size grid of styled cells, flattened into lines once painting is done.
struct ScreenCanvas {
    columns: usize,
    cells: Vec<Vec<(char, Style)>>,
}

impl ScreenCanvas {
    fn new(columns: usize, rows: usize) -> Self {
        Self {
            columns,
            cells: vec![vec![(' ', Style::default()); columns]; rows],
        }
    }

    fn put(&mut self, row: usize, column: usize, text: &str, style: Style) {
        let Some(cells) = self.cells.get_mut(row) else {
            return;
        };

        for (cell, ch) in cells.iter_mut().skip(column).zip(text.chars()) {
            *cell = (ch, style);
        }
    }

    fn fill_row(&mut self, row: usize, style: Style) {
        let blank = " ".repeat(self.columns);
        self.put(row, 0, &blank, style);
    }

    fn into_lines(self) -> Vec<Line<'static>> {
        self.cells
            .into_iter()
            .map(|row| {
                let mut spans: Vec<Span<'static>> = Vec::new();
                let mut run = String::new();
                let mut run_style = Style::default();

                for (ch, style) in row {
                    if style != run_style && !run.is_empty() {
                        spans.push(Span::styled(std::mem::take(&mut run), run_style));
                    }
                    run_style = style;
                    run.push(ch);
                }
                if !run.is_empty() {
                    spans.push(Span::styled(run, run_style));
                }

                Line::from(spans)
            })
            .collect()
    }
}

fn footer_text(mode: DisplayMode, byte_format: ByteFormat) -> String {
    let format_hint = match byte_format {
        ByteFormat::Ascii => "Hex Mode: m",
        ByteFormat::Hex => "ASCII Mode: m",
    };
    let mode_hint = match mode {
        DisplayMode::Overview => "Full View: v | Page & Arrow Keys to Move",
        DisplayMode::Detail => "Mixed View: v | Arrow Keys to Move",
    };

    format!("Quit: q | {format_hint} | {mode_hint}")
}

fn paint_bars(canvas: &mut ScreenCanvas, session: &Session, columns: usize, rows: usize) {
    let style = title_bar_style().add_modifier(Modifier::BOLD);
    let footer_row = rows - 1;
    canvas.fill_row(0, style);
    canvas.fill_row(footer_row, style);

    let offset_text = format!(" 0x{:04x}", session.view.current_offset);
    let offset_column = columns.saturating_sub(char_count(&offset_text) + SIDE_MARGIN);
    let title = format!(
        "hexcompare: {} vs. {}",
        session.primary_name(),
        session.secondary_name()
    );
    let title_width = offset_column.saturating_sub(SIDE_MARGIN);

    canvas.put(0, SIDE_MARGIN, &truncate_to_width(&title, title_width), style);
    canvas.put(0, offset_column, &offset_text, style);
    canvas.put(
        footer_row,
        SIDE_MARGIN,
        &footer_text(session.view.mode, session.view.byte_format),
        style,
    );
}

fn paint_block_grid(canvas: &mut ScreenCanvas, session: &Session) {
    let grid_width = session.index.geometry.grid_width;

    for block in 0..session.index.partition.total_blocks {
        canvas.put(
            block / grid_width + GRID_TOP_ROW,
            block % grid_width + SIDE_MARGIN,
            " ",
            block_style(session.index.cache.status(block)),
        );
    }

    let active = session.current_block();
    canvas.put(
        active / grid_width + GRID_TOP_ROW,
        active % grid_width + SIDE_MARGIN,
        " ",
        active_block_style(),
    );
}

fn paint_file_names(
    canvas: &mut ScreenCanvas,
    session: &Session,
    row: usize,
    layout: &DetailLayout,
) {
    let column = layout.data_start_column();
    canvas.put(
        row,
        column,
        &format!(" {}   ", session.primary_basename()),
        title_bar_style(),
    );
    canvas.put(
        row,
        column + layout.secondary_column_shift(),
        &format!(" {}   ", session.secondary_basename()),
        title_bar_style(),
    );
}

/// Colour of one side's byte cell, given the byte at the same offset on the other side.
fn byte_status(own: Option<u8>, other: Option<u8>) -> BlockStatus {
    match (own, other) {
        (None, _) => BlockStatus::Empty,
        (Some(_), None) => BlockStatus::Different,
        (Some(own), Some(other)) if own == other => BlockStatus::Same,
        (Some(_), Some(_)) => BlockStatus::Different,
    }
}

fn byte_cell_text(byte: Option<u8>, byte_format: ByteFormat) -> String {
    match (byte, byte_format) {
        (None, _) => "  ".to_string(),
        (Some(byte), ByteFormat::Hex) => format!("{byte:02x}"),
        (Some(byte), ByteFormat::Ascii) => format!(" {}", printable_ascii(byte)),
    }
}

fn paint_hex_rows(
    canvas: &mut ScreenCanvas,
    session: &mut Session,
    rows: std::ops::Range<usize>,
    layout: &DetailLayout,
) -> Result<(), HexcompareError> {
    let first_offset = session.view.current_offset;
    let byte_format = session.view.byte_format;
    let bytes_per_row = layout.row_step() as usize;
    let (primary, secondary) = session.read_windows(first_offset, rows.len() * bytes_per_row)?;
    let data_column = layout.data_start_column();
    let secondary_shift = layout.secondary_column_shift();

    for (row_index, row) in rows.enumerate() {
        let row_offset = first_offset + (row_index * bytes_per_row) as u64;
        canvas.put(
            row,
            SIDE_MARGIN,
            &format!("0x{row_offset:0width$x} ", width = layout.offset_digits),
            title_bar_style(),
        );

        for position in 0..bytes_per_row {
            let index = row_index * bytes_per_row + position;
            let primary_byte = primary.get(index).copied();
            let secondary_byte = secondary.get(index).copied();
            let column = data_column + position * 2;
            let emphasis = if position % 2 == 1 {
                Modifier::BOLD
            } else {
                Modifier::empty()
            };

            canvas.put(
                row,
                column,
                &byte_cell_text(primary_byte, byte_format),
                block_style(byte_status(primary_byte, secondary_byte)).add_modifier(emphasis),
            );
            canvas.put(
                row,
                column + secondary_shift,
                &byte_cell_text(secondary_byte, byte_format),
                block_style(byte_status(secondary_byte, primary_byte)).add_modifier(emphasis),
            );
        }
    }

    Ok(())
}

/// Paints the whole screen for the session's current view.
pub(crate) fn render_frame(session: &mut Session) -> Result<Vec<Line<'static>>, HexcompareError> {
    let columns = session.index.geometry.terminal_width;
    let rows = session.index.geometry.terminal_height;
    let layout = DetailLayout::new(columns, session.largest_file_size());
    let mut canvas = ScreenCanvas::new(columns, rows);

    paint_bars(&mut canvas, session, columns, rows);

    match session.view.mode {
        DisplayMode::Overview => {
            paint_block_grid(&mut canvas, session);
            let hex_start = rows - 2 - OVERVIEW_HEX_ROWS;
            paint_file_names(&mut canvas, session, hex_start - 1, &layout);
            paint_hex_rows(&mut canvas, session, hex_start..rows - 2, &layout)?;
        }
        DisplayMode::Detail => {
            paint_file_names(&mut canvas, session, GRID_TOP_ROW, &layout);
            paint_hex_rows(&mut canvas, session, GRID_TOP_ROW + 1..rows - 2, &layout)?;
        }
    }

    Ok(canvas.into_lines())
}
