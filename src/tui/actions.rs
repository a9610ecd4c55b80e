use crossterm::event::{self, KeyCode, KeyModifiers};

use super::app::{App, Mode};
use super::keymap::Action;

/// Handle text editing operations on a buffer with UTF-8 aware cursor movement.
fn handle_text_input(buffer: &mut String, cursor: &mut usize, key: event::KeyEvent) {
    match key.code {
        KeyCode::Left => {
            if *cursor > 0 {
                let mut new_pos = *cursor - 1;
                while new_pos > 0 && !buffer.is_char_boundary(new_pos) {
                    new_pos -= 1;
                }
                *cursor = new_pos;
            }
        }
        KeyCode::Right => {
            if *cursor < buffer.len() {
                let mut new_pos = *cursor + 1;
                while new_pos < buffer.len() && !buffer.is_char_boundary(new_pos) {
                    new_pos += 1;
                }
                *cursor = new_pos;
            }
        }
        KeyCode::Home => *cursor = 0,
        KeyCode::End => *cursor = buffer.len(),
        KeyCode::Backspace | KeyCode::Char('h')
            if key.code == KeyCode::Backspace || key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            if *cursor > 0 {
                let mut del_start = *cursor - 1;
                while del_start > 0 && !buffer.is_char_boundary(del_start) {
                    del_start -= 1;
                }
                buffer.drain(del_start..*cursor);
                *cursor = del_start;
            }
        }
        KeyCode::Delete => {
            if *cursor < buffer.len() {
                let mut del_end = *cursor + 1;
                while del_end < buffer.len() && !buffer.is_char_boundary(del_end) {
                    del_end += 1;
                }
                buffer.drain(*cursor..del_end);
            }
        }
        KeyCode::Char(c) => {
            if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT {
                buffer.insert(*cursor, c);
                *cursor += c.len_utf8();
            }
        }
        _ => {}
    }
}

/// Result of applying an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyResult {
    Continue,
    Quit,
}

/// Apply an action to the application state.
///
/// Returns `ApplyResult::Quit` if the application should exit.
pub fn apply_action(app: &mut App, action: Action) -> ApplyResult {
    match action {
        Action::Cancel => match app.mode {
            Mode::Edit => app.cancel_edit(),
            Mode::Command => {
                app.mode = Mode::Normal;
                app.command_buffer.clear();
                app.command_cursor = 0;
            }
            Mode::Normal => app.status_message.clear(),
        },

        Action::EnterEdit => app.enter_edit_mode(),
        Action::CommitEdit(then) => app.commit_edit(then),
        Action::EnterCommand => {
            app.mode = Mode::Command;
            app.command_buffer.clear();
            app.command_cursor = 0;
        }
        Action::ExecuteCommand => {
            if app.execute_command() {
                return ApplyResult::Quit;
            }
        }
        Action::ClearCell => app.clear_current_cell(),

        Action::Navigate(key) => app.navigate(key),
        Action::Page(dir) => {
            let delta = app.visible_rows as i32 * dir;
            app.move_cursor(0, delta);
        }
        Action::HomeCol => app.home_col(),
        Action::EndCol => app.end_col(),
        Action::GotoFirst => app.goto_first(),
        Action::OpenGotoPrompt => {
            app.mode = Mode::Command;
            app.command_buffer = "goto ".to_string();
            app.command_cursor = app.command_buffer.len();
        }

        Action::NextSheet => app.next_sheet(),
        Action::PrevSheet => app.prev_sheet(),
        Action::NewSheet => app.new_sheet(),
        Action::ToggleStyle(attribute) => app.toggle_style(attribute),

        Action::Export => app.export_csv(None),
        Action::IncColWidth => app.increase_column_width(),
        Action::DecColWidth => app.decrease_column_width(),
        Action::Help => app.open_help_modal(),
    }
    ApplyResult::Continue
}

pub fn handle_edit_text(app: &mut App, key: event::KeyEvent) {
    handle_text_input(&mut app.edit_buffer, &mut app.edit_cursor, key);
}

pub fn handle_command_text(app: &mut App, key: event::KeyEvent) {
    handle_text_input(&mut app.command_buffer, &mut app.command_cursor, key);
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellsheet_core::{CellId, NavKey, StyleAttribute};
    use crossterm::event::KeyEvent;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    #[test]
    fn text_input_is_utf8_aware() {
        let mut buffer = String::new();
        let mut cursor = 0;
        for c in ['a', 'é', 'b'] {
            handle_text_input(&mut buffer, &mut cursor, key(KeyCode::Char(c)));
        }
        assert_eq!(buffer, "aéb");

        handle_text_input(&mut buffer, &mut cursor, key(KeyCode::Left));
        handle_text_input(&mut buffer, &mut cursor, key(KeyCode::Backspace));
        assert_eq!(buffer, "ab");
        assert_eq!(cursor, 1);

        handle_text_input(&mut buffer, &mut cursor, key(KeyCode::Delete));
        assert_eq!(buffer, "a");
    }

    #[test]
    fn text_input_ignores_control_chords() {
        let mut buffer = String::from("x");
        let mut cursor = 1;
        handle_text_input(
            &mut buffer,
            &mut cursor,
            KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL),
        );
        assert_eq!(buffer, "x");
    }

    #[test]
    fn edit_then_tab_commits_and_moves_right() {
        let mut app = App::new();
        apply_action(&mut app, Action::EnterEdit);
        assert_eq!(app.mode, Mode::Edit);
        for c in "=2+3".chars() {
            handle_edit_text(&mut app, key(KeyCode::Char(c)));
        }
        apply_action(&mut app, Action::CommitEdit(NavKey::Tab));

        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.cursor, CellId::new(1, 0));
        assert_eq!(app.cell_display(CellId::new(0, 0)), "5");
    }

    #[test]
    fn cancel_discards_edit() {
        let mut app = App::new();
        apply_action(&mut app, Action::EnterEdit);
        handle_edit_text(&mut app, key(KeyCode::Char('z')));
        apply_action(&mut app, Action::Cancel);
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.cell_display(CellId::new(0, 0)), "");
    }

    #[test]
    fn command_mode_round_trip() {
        let mut app = App::new();
        apply_action(&mut app, Action::EnterCommand);
        for c in "q".chars() {
            handle_command_text(&mut app, key(KeyCode::Char(c)));
        }
        assert_eq!(apply_action(&mut app, Action::ExecuteCommand), ApplyResult::Quit);
    }

    #[test]
    fn goto_prompt_prefills_command() {
        let mut app = App::new();
        apply_action(&mut app, Action::OpenGotoPrompt);
        assert_eq!(app.mode, Mode::Command);
        assert_eq!(app.command_buffer, "goto ");
        assert_eq!(app.command_cursor, 5);
    }

    #[test]
    fn toggle_style_action() {
        let mut app = App::new();
        apply_action(&mut app, Action::ToggleStyle(StyleAttribute::FontStyle));
        assert_eq!(
            app.cell_style(CellId::new(0, 0))
                .and_then(|s| s.get(&StyleAttribute::FontStyle))
                .map(String::as_str),
            Some("italic")
        );
    }
}
