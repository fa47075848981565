use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::{
    model::DisplayMode,
    navigation::{ClickKind, Command},
    session::Session,
};

const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(400);

#[derive(Clone, Debug, Default)]
pub(crate) struct KeypressOutcome {
    pub(crate) should_quit: bool,
}

/// Turns consecutive left-button presses on one cell into single or double clicks.
#[derive(Clone, Debug, Default)]
pub(crate) struct ClickTracker {
    last_press: Option<(Instant, u16, u16)>,
}

impl ClickTracker {
    pub(crate) fn register(&mut self, at: Instant, column: u16, row: u16) -> ClickKind {
        let is_double = self.last_press.is_some_and(|(previous, last_column, last_row)| {
            last_column == column
                && last_row == row
                && at.saturating_duration_since(previous) <= DOUBLE_CLICK_WINDOW
        });

        if is_double {
            self.last_press = None;
            ClickKind::Double
        } else {
            self.last_press = Some((at, column, row));
            ClickKind::Single
        }
    }
}

fn command_for_key(key: KeyEvent, mode: DisplayMode) -> Option<Command> {
    match (key.code, mode) {
        (KeyCode::Left, DisplayMode::Overview) => Some(Command::MoveLeft),
        (KeyCode::Right, DisplayMode::Overview) => Some(Command::MoveRight),
        (KeyCode::Up, DisplayMode::Overview) => Some(Command::MoveUp),
        (KeyCode::Down, DisplayMode::Overview) => Some(Command::MoveDown),
        (KeyCode::Up, DisplayMode::Detail) => Some(Command::ScrollLineUp),
        (KeyCode::Down, DisplayMode::Detail) => Some(Command::ScrollLineDown),
        (KeyCode::PageUp, _) => Some(Command::ScrollPageUp),
        (KeyCode::PageDown, _) => Some(Command::ScrollPageDown),
        (KeyCode::Char('m'), _) => Some(Command::ToggleFormat),
        (KeyCode::Char('v'), _) => Some(Command::ToggleMode),
        _ => None,
    }
}

fn is_quit_key(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('c') | KeyCode::Char('C') => key.modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Char('q') | KeyCode::Esc => true,
        _ => false,
    }
}

pub(crate) fn handle_keypress(key: KeyEvent, session: &mut Session) -> KeypressOutcome {
    if is_quit_key(&key) {
        return KeypressOutcome { should_quit: true };
    }

    if let Some(command) = command_for_key(key, session.view.mode) {
        session.apply(command);
    }

    KeypressOutcome::default()
}

pub(crate) fn handle_mouse(mouse: MouseEvent, session: &mut Session, clicks: &mut ClickTracker) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }

    let kind = clicks.register(Instant::now(), mouse.column, mouse.row);
    session.click(mouse.column as usize, mouse.row as usize, kind);
}

#[cfg(test)]
mod tests {
    use super::{
        ClickTracker, DOUBLE_CLICK_WINDOW, command_for_key, handle_keypress, handle_mouse,
    };
    use crate::{
        model::{ByteFormat, DisplayMode},
        navigation::{ClickKind, Command},
        session::Session,
        source::memory_source,
    };
    use crossterm::event::{
        KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    };
    use std::time::{Duration, Instant};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn session() -> Session {
        Session::new(
            memory_source("a.bin", vec![3; 500]),
            memory_source("b.bin", vec![3; 500]),
            14,
            16,
        )
        .expect("session should build")
    }

    #[test]
    fn arrows_move_blocks_in_overview_and_scroll_in_detail() {
        assert_eq!(
            command_for_key(key(KeyCode::Up), DisplayMode::Overview),
            Some(Command::MoveUp)
        );
        assert_eq!(
            command_for_key(key(KeyCode::Down), DisplayMode::Detail),
            Some(Command::ScrollLineDown)
        );
        assert_eq!(command_for_key(key(KeyCode::Left), DisplayMode::Detail), None);
        assert_eq!(
            command_for_key(key(KeyCode::PageDown), DisplayMode::Overview),
            Some(Command::ScrollPageDown)
        );
    }

    #[test]
    fn quit_keys_end_the_session() {
        let mut session = session();

        for quit in [
            key(KeyCode::Char('q')),
            key(KeyCode::Esc),
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        ] {
            assert!(handle_keypress(quit, &mut session).should_quit);
        }
        assert!(!handle_keypress(key(KeyCode::Char('c')), &mut session).should_quit);
    }

    #[test]
    fn toggle_keys_update_view() {
        let mut session = session();

        handle_keypress(key(KeyCode::Char('m')), &mut session);
        handle_keypress(key(KeyCode::Char('v')), &mut session);

        assert_eq!(session.view.byte_format, ByteFormat::Hex);
        assert_eq!(session.view.mode, DisplayMode::Detail);
    }

    #[test]
    fn second_press_on_same_cell_is_a_double_click() {
        let mut clicks = ClickTracker::default();
        let start = Instant::now();

        assert_eq!(clicks.register(start, 4, 3), ClickKind::Single);
        assert_eq!(
            clicks.register(start + Duration::from_millis(100), 4, 3),
            ClickKind::Double
        );
        assert_eq!(
            clicks.register(start + Duration::from_millis(200), 4, 3),
            ClickKind::Single
        );
    }

    #[test]
    fn slow_or_moved_press_is_a_single_click() {
        let mut clicks = ClickTracker::default();
        let start = Instant::now();

        clicks.register(start, 4, 3);
        assert_eq!(
            clicks.register(start + DOUBLE_CLICK_WINDOW + Duration::from_millis(1), 4, 3),
            ClickKind::Single
        );
        assert_eq!(
            clicks.register(start + DOUBLE_CLICK_WINDOW + Duration::from_millis(2), 5, 3),
            ClickKind::Single
        );
    }

    #[test]
    fn left_press_on_grid_jumps_to_block() {
        let mut session = session();
        let mut clicks = ClickTracker::default();
        let press = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 7,
            row: 4,
            modifiers: KeyModifiers::NONE,
        };

        handle_mouse(press, &mut session, &mut clicks);
        assert_eq!(session.view.current_offset, 250);

        let scroll = MouseEvent {
            kind: MouseEventKind::ScrollDown,
            ..press
        };
        handle_mouse(scroll, &mut session, &mut clicks);
        assert_eq!(session.view.current_offset, 250);
    }
}
