//! Keymap translation layer.
//!
//! This keeps key handling separate from app behavior.
//! - Vim keymap: hjkl navigation, `:` commands, modal editing.
//! - Emacs keymap is "strict": vim-style letter keys are not active.

use cellsheet_core::{NavKey, StyleAttribute};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::str::FromStr;

use super::app::Mode;

/// Available keybinding schemes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Keymap {
    /// Vim-style keybindings (hjkl, :commands, modal editing).
    Vim,
    /// Emacs-style keybindings (C-n/p/f/b, M-x commands).
    Emacs,
}

impl Keymap {
    pub fn name(&self) -> &'static str {
        match self {
            Keymap::Vim => "vim",
            Keymap::Emacs => "emacs",
        }
    }

    pub fn status_hint(&self) -> &'static str {
        match self {
            Keymap::Vim => {
                "hjkl:move  i:edit  Tab:next  [/]:sheet  N:new sheet  B/I/U:style  :export  :q:quit  ?:help"
            }
            Keymap::Emacs => {
                "C-n/p/f/b:move  Enter:edit  M-n/M-p:sheet  M-b/M-i/M-u:style  M-x:cmd  C-g:cancel  F1:help"
            }
        }
    }
}

impl FromStr for Keymap {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vim" => Ok(Keymap::Vim),
            "emacs" => Ok(Keymap::Emacs),
            other => Err(format!("Unknown keymap '{}', falling back to vim", other)),
        }
    }
}

/// Resolve the requested keymap name. Unknown names fall back to vim with a
/// warning.
pub fn load_keymap(requested: Option<&str>) -> (Keymap, Vec<String>) {
    match requested.map(str::parse::<Keymap>) {
        None => (Keymap::Vim, Vec::new()),
        Some(Ok(keymap)) => (keymap, Vec::new()),
        Some(Err(warning)) => (Keymap::Vim, vec![warning]),
    }
}

/// Everything a key can ask the app to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Cancel,
    EnterEdit,
    /// Commit the edit buffer, then move focus with the given key.
    CommitEdit(NavKey),
    EnterCommand,
    ExecuteCommand,
    ClearCell,
    Navigate(NavKey),
    Page(i32),
    HomeCol,
    EndCol,
    GotoFirst,
    OpenGotoPrompt,
    NextSheet,
    PrevSheet,
    NewSheet,
    ToggleStyle(StyleAttribute),
    Export,
    IncColWidth,
    DecColWidth,
    Help,
}

/// Translate a key event to an action based on the current keymap and mode.
///
/// Returns `None` if the key has no binding in the current context.
pub fn translate(keymap: Keymap, mode: Mode, key: KeyEvent) -> Option<Action> {
    match keymap {
        Keymap::Vim => translate_vim(mode, key),
        Keymap::Emacs => translate_emacs(mode, key),
    }
}

/// Bindings shared by both keymaps while editing a cell.
fn translate_edit(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Esc => Some(Action::Cancel),
        KeyCode::Char('g') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Cancel),
        KeyCode::Enter => Some(Action::CommitEdit(NavKey::Enter)),
        KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => {
            Some(Action::CommitEdit(NavKey::BackTab))
        }
        KeyCode::Tab => Some(Action::CommitEdit(NavKey::Tab)),
        KeyCode::BackTab => Some(Action::CommitEdit(NavKey::BackTab)),
        _ => None,
    }
}

fn translate_command(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Esc => Some(Action::Cancel),
        KeyCode::Char('g') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Cancel),
        KeyCode::Enter => Some(Action::ExecuteCommand),
        _ => None,
    }
}

fn translate_vim(mode: Mode, key: KeyEvent) -> Option<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match mode {
        Mode::Normal => match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some(Action::Navigate(NavKey::Up)),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::Navigate(NavKey::Down)),
            KeyCode::Left | KeyCode::Char('h') => Some(Action::Navigate(NavKey::Left)),
            KeyCode::Right | KeyCode::Char('l') => Some(Action::Navigate(NavKey::Right)),
            KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => {
                Some(Action::Navigate(NavKey::BackTab))
            }
            KeyCode::Tab => Some(Action::Navigate(NavKey::Tab)),
            KeyCode::BackTab => Some(Action::Navigate(NavKey::BackTab)),

            KeyCode::PageUp if ctrl => Some(Action::PrevSheet),
            KeyCode::PageDown if ctrl => Some(Action::NextSheet),
            KeyCode::PageUp => Some(Action::Page(-1)),
            KeyCode::PageDown => Some(Action::Page(1)),
            KeyCode::Home if ctrl => Some(Action::GotoFirst),
            KeyCode::Home | KeyCode::Char('0') => Some(Action::HomeCol),
            KeyCode::End | KeyCode::Char('$') => Some(Action::EndCol),
            KeyCode::Char('g') => Some(Action::GotoFirst),
            KeyCode::Char('G') => Some(Action::OpenGotoPrompt),

            KeyCode::Enter | KeyCode::Char('i') | KeyCode::Char('a') => Some(Action::EnterEdit),
            KeyCode::Char('x') | KeyCode::Delete => Some(Action::ClearCell),
            KeyCode::Char(':') => Some(Action::EnterCommand),

            KeyCode::Char(']') => Some(Action::NextSheet),
            KeyCode::Char('[') => Some(Action::PrevSheet),
            KeyCode::Char('N') => Some(Action::NewSheet),

            KeyCode::Char('B') => Some(Action::ToggleStyle(StyleAttribute::FontWeight)),
            KeyCode::Char('I') => Some(Action::ToggleStyle(StyleAttribute::FontStyle)),
            KeyCode::Char('U') => Some(Action::ToggleStyle(StyleAttribute::TextDecoration)),

            KeyCode::Char('E') => Some(Action::Export),
            KeyCode::Char('+') | KeyCode::Char('>') => Some(Action::IncColWidth),
            KeyCode::Char('-') | KeyCode::Char('<') => Some(Action::DecColWidth),
            KeyCode::Char('?') | KeyCode::F(1) => Some(Action::Help),
            _ => None,
        },
        Mode::Edit => translate_edit(key),
        Mode::Command => translate_command(key),
    }
}

fn translate_emacs(mode: Mode, key: KeyEvent) -> Option<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    match mode {
        Mode::Normal => match key.code {
            KeyCode::Char('g') if ctrl => Some(Action::Cancel),
            KeyCode::Esc => Some(Action::Cancel),

            KeyCode::Up => Some(Action::Navigate(NavKey::Up)),
            KeyCode::Down => Some(Action::Navigate(NavKey::Down)),
            KeyCode::Left => Some(Action::Navigate(NavKey::Left)),
            KeyCode::Right => Some(Action::Navigate(NavKey::Right)),
            KeyCode::Char('p') if ctrl => Some(Action::Navigate(NavKey::Up)),
            KeyCode::Char('n') if ctrl => Some(Action::Navigate(NavKey::Down)),
            KeyCode::Char('b') if ctrl => Some(Action::Navigate(NavKey::Left)),
            KeyCode::Char('f') if ctrl => Some(Action::Navigate(NavKey::Right)),
            KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => {
                Some(Action::Navigate(NavKey::BackTab))
            }
            KeyCode::Tab => Some(Action::Navigate(NavKey::Tab)),
            KeyCode::BackTab => Some(Action::Navigate(NavKey::BackTab)),

            KeyCode::Char('v') if ctrl => Some(Action::Page(1)),
            KeyCode::Char('v') if alt => Some(Action::Page(-1)),
            KeyCode::PageUp if ctrl => Some(Action::PrevSheet),
            KeyCode::PageDown if ctrl => Some(Action::NextSheet),
            KeyCode::PageUp => Some(Action::Page(-1)),
            KeyCode::PageDown => Some(Action::Page(1)),
            KeyCode::Char('a') if ctrl => Some(Action::HomeCol),
            KeyCode::Char('e') if ctrl => Some(Action::EndCol),
            KeyCode::Home => Some(Action::HomeCol),
            KeyCode::End => Some(Action::EndCol),
            KeyCode::Char('<') if alt => Some(Action::GotoFirst),
            KeyCode::Char('g') if alt => Some(Action::OpenGotoPrompt),

            KeyCode::Enter => Some(Action::EnterEdit),
            KeyCode::Char('d') if ctrl => Some(Action::ClearCell),
            KeyCode::Delete => Some(Action::ClearCell),
            KeyCode::Char('x') if alt => Some(Action::EnterCommand),

            KeyCode::Char('n') if alt => Some(Action::NextSheet),
            KeyCode::Char('p') if alt => Some(Action::PrevSheet),
            KeyCode::Char('t') if alt => Some(Action::NewSheet),

            KeyCode::Char('b') if alt => Some(Action::ToggleStyle(StyleAttribute::FontWeight)),
            KeyCode::Char('i') if alt => Some(Action::ToggleStyle(StyleAttribute::FontStyle)),
            KeyCode::Char('u') if alt => Some(Action::ToggleStyle(StyleAttribute::TextDecoration)),

            KeyCode::Char('s') if ctrl => Some(Action::Export),
            KeyCode::Char('=') if alt => Some(Action::IncColWidth),
            KeyCode::Char('-') if alt => Some(Action::DecColWidth),
            KeyCode::F(1) => Some(Action::Help),
            _ => None,
        },
        Mode::Edit => translate_edit(key),
        Mode::Command => translate_command(key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn key_with(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_load_keymap_names() {
        assert_eq!(load_keymap(None), (Keymap::Vim, vec![]));
        assert_eq!(load_keymap(Some("Emacs")), (Keymap::Emacs, vec![]));
        let (keymap, warnings) = load_keymap(Some("nano"));
        assert_eq!(keymap, Keymap::Vim);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_vim_normal_bindings() {
        assert_eq!(
            translate(Keymap::Vim, Mode::Normal, key(KeyCode::Char('j'))),
            Some(Action::Navigate(NavKey::Down))
        );
        assert_eq!(
            translate(Keymap::Vim, Mode::Normal, key(KeyCode::Char(']'))),
            Some(Action::NextSheet)
        );
        assert_eq!(
            translate(Keymap::Vim, Mode::Normal, key(KeyCode::Char('B'))),
            Some(Action::ToggleStyle(StyleAttribute::FontWeight))
        );
        assert_eq!(translate(Keymap::Vim, Mode::Normal, key(KeyCode::Char('q'))), None);
    }

    #[test]
    fn test_edit_mode_commit_keys_move_focus() {
        for keymap in [Keymap::Vim, Keymap::Emacs] {
            assert_eq!(
                translate(keymap, Mode::Edit, key(KeyCode::Enter)),
                Some(Action::CommitEdit(NavKey::Enter))
            );
            assert_eq!(
                translate(keymap, Mode::Edit, key(KeyCode::Tab)),
                Some(Action::CommitEdit(NavKey::Tab))
            );
            assert_eq!(
                translate(keymap, Mode::Edit, key(KeyCode::BackTab)),
                Some(Action::CommitEdit(NavKey::BackTab))
            );
            assert_eq!(translate(keymap, Mode::Edit, key(KeyCode::Char('j'))), None);
        }
    }

    #[test]
    fn test_emacs_is_strict() {
        assert_eq!(translate(Keymap::Emacs, Mode::Normal, key(KeyCode::Char('j'))), None);
        assert_eq!(
            translate(
                Keymap::Emacs,
                Mode::Normal,
                key_with(KeyCode::Char('n'), KeyModifiers::CONTROL)
            ),
            Some(Action::Navigate(NavKey::Down))
        );
        assert_eq!(
            translate(
                Keymap::Emacs,
                Mode::Normal,
                key_with(KeyCode::Char('x'), KeyModifiers::ALT)
            ),
            Some(Action::EnterCommand)
        );
    }
}
