//! Application state and logic.
//!
//! [`App`] owns the [`Workbook`] plus everything the terminal surface needs
//! around it: the focused cell, viewport, editing buffers and status line.
//! Like Vim, the app operates in different [`Mode`]s.

use cellsheet_core::{
    CellId, ERROR_MARKER, NavKey, StoredValue, StyleAttribute, StyleMap, Workbook, navigate,
    parse_cell_id,
};
use cellsheet_engine::engine::{GRID_COLS, GRID_ROWS};
use std::path::Path;
use tracing::{debug, warn};

use super::keymap::Keymap;
use crate::config::{DEFAULT_COL_WIDTH, MAX_COL_WIDTH, MIN_COL_WIDTH};

/// Modal editing state for the application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Navigate the grid, execute single-key commands.
    Normal,
    /// Edit the contents of the focused cell.
    Edit,
    /// Enter ex-style commands (`:export`, `:q`, etc.).
    Command,
}

pub struct App {
    pub workbook: Workbook,
    /// Focused cell
    pub cursor: CellId,
    /// Viewport offset (column)
    pub viewport_col: usize,
    /// Viewport offset (row)
    pub viewport_row: usize,
    /// Number of visible columns
    pub visible_cols: usize,
    /// Number of visible rows
    pub visible_rows: usize,
    /// Column width for display
    pub col_width: usize,
    pub mode: Mode,
    /// Edit buffer for cell editing
    pub edit_buffer: String,
    /// Cursor position within edit buffer (byte offset)
    pub edit_cursor: usize,
    /// Command buffer for command mode
    pub command_buffer: String,
    /// Cursor position within command buffer (byte offset)
    pub command_cursor: usize,
    pub status_message: String,
    pub help_modal: bool,
    pub help_scroll: usize,
    pub keymap: Keymap,
}

impl App {
    pub fn new() -> Self {
        App::with_workbook(Workbook::new(), Keymap::Vim, DEFAULT_COL_WIDTH)
    }

    pub fn with_workbook(workbook: Workbook, keymap: Keymap, col_width: usize) -> Self {
        App {
            workbook,
            cursor: CellId::new(0, 0),
            viewport_col: 0,
            viewport_row: 0,
            visible_cols: 6,
            visible_rows: 20,
            col_width: col_width.clamp(MIN_COL_WIDTH, MAX_COL_WIDTH),
            mode: Mode::Normal,
            edit_buffer: String::new(),
            edit_cursor: 0,
            command_buffer: String::new(),
            command_cursor: 0,
            status_message: String::new(),
            help_modal: false,
            help_scroll: 0,
            keymap,
        }
    }

    /// The cell style commands apply to.
    pub fn focus(&self) -> Option<CellId> {
        Some(self.cursor)
    }

    /// Text shown in a cell of the current sheet.
    pub fn cell_display(&self, id: CellId) -> String {
        self.workbook.current_sheet().display(id)
    }

    pub fn cell_style(&self, id: CellId) -> Option<&StyleMap> {
        self.workbook.current_sheet().style(id)
    }

    /// Move focus with a navigation key. Moves off the grid are ignored.
    pub fn navigate(&mut self, key: NavKey) {
        if let Some(next) = navigate(self.cursor, key) {
            self.cursor = next;
            self.update_viewport();
        }
    }

    /// Move by a delta, clamped to the grid edges.
    pub fn move_cursor(&mut self, dx: i32, dy: i32) {
        let col = (self.cursor.col as i64 + dx as i64).clamp(0, GRID_COLS as i64 - 1);
        let row = (self.cursor.row as i64 + dy as i64).clamp(0, GRID_ROWS as i64 - 1);
        self.cursor = CellId::new(col as usize, row as usize);
        self.update_viewport();
    }

    pub fn home_col(&mut self) {
        self.cursor = CellId::new(0, self.cursor.row);
        self.update_viewport();
    }

    pub fn end_col(&mut self) {
        self.cursor = CellId::new(GRID_COLS - 1, self.cursor.row);
        self.update_viewport();
    }

    pub fn goto_first(&mut self) {
        self.cursor = CellId::new(0, 0);
        self.update_viewport();
    }

    /// Update viewport to keep cursor visible
    pub fn update_viewport(&mut self) {
        let visible_cols = self.visible_cols.max(1);
        let visible_rows = self.visible_rows.max(1);

        if self.cursor.col < self.viewport_col {
            self.viewport_col = self.cursor.col;
        } else if self.cursor.col >= self.viewport_col + visible_cols {
            self.viewport_col = self.cursor.col + 1 - visible_cols;
        }

        if self.cursor.row < self.viewport_row {
            self.viewport_row = self.cursor.row;
        } else if self.cursor.row >= self.viewport_row + visible_rows {
            self.viewport_row = self.cursor.row + 1 - visible_rows;
        }
    }

    pub fn goto_cell(&mut self, name: &str) {
        match parse_cell_id(name) {
            Ok(id) if id.in_grid() => {
                self.cursor = id;
                self.update_viewport();
                self.status_message = format!("Jumped to {}", id);
            }
            Ok(_) => self.status_message = "Cell out of range".to_string(),
            Err(e) => self.status_message = e.to_string(),
        }
    }

    /// Enter edit mode with the focused cell's input text.
    pub fn enter_edit_mode(&mut self) {
        self.edit_buffer = self
            .workbook
            .current_sheet()
            .value(self.cursor)
            .map(StoredValue::input_text)
            .unwrap_or_default();
        self.edit_cursor = self.edit_buffer.len();
        self.mode = Mode::Edit;
    }

    pub fn cancel_edit(&mut self) {
        self.mode = Mode::Normal;
        self.edit_buffer.clear();
        self.edit_cursor = 0;
    }

    /// Store the edit buffer in the focused cell, recalculate, then move
    /// focus with `then`.
    pub fn commit_edit(&mut self, then: NavKey) {
        let input = std::mem::take(&mut self.edit_buffer);
        self.edit_cursor = 0;
        self.mode = Mode::Normal;

        let updates = self.workbook.set_cell_input(self.cursor, &input);
        let errors = updates.iter().filter(|u| u.display == ERROR_MARKER).count();
        self.status_message = match errors {
            0 => String::new(),
            1 => "1 formula evaluated to an error".to_string(),
            n => format!("{} formulas evaluated to an error", n),
        };
        self.navigate(then);
    }

    pub fn clear_current_cell(&mut self) {
        self.workbook.set_cell_input(self.cursor, "");
    }

    /// Make sheet `index` (zero-based) current and re-render it.
    pub fn switch_sheet(&mut self, index: usize) {
        match self.workbook.switch_to(index) {
            Ok(()) => {
                self.status_message = format!("Switched to {}", self.workbook.current_sheet().name)
            }
            Err(e) => self.status_message = e.to_string(),
        }
    }

    pub fn next_sheet(&mut self) {
        let count = self.workbook.sheets().len();
        self.switch_sheet((self.workbook.current_index() + 1) % count);
    }

    pub fn prev_sheet(&mut self) {
        let count = self.workbook.sheets().len();
        self.switch_sheet((self.workbook.current_index() + count - 1) % count);
    }

    pub fn new_sheet(&mut self) {
        self.workbook.create_sheet();
        self.status_message = format!("Created {}", self.workbook.current_sheet().name);
    }

    pub fn toggle_style(&mut self, attribute: StyleAttribute) {
        let focus = self.focus();
        if self.workbook.toggle_style(&focus, attribute).is_none() {
            self.status_message = format!("{} cannot be toggled", attribute);
        }
    }

    /// Set (or with an empty value, clear) a style attribute on the focused
    /// cell.
    pub fn set_style(&mut self, attribute: StyleAttribute, value: &str) {
        let focus = self.focus();
        if let Some(id) = self.workbook.apply_style(&focus, attribute, value) {
            self.status_message = if value.is_empty() {
                format!("Cleared {} on {}", attribute, id)
            } else {
                format!("Set {}: {} on {}", attribute, value, id)
            };
        }
    }

    pub fn import_csv(&mut self, path: &Path) {
        match self.workbook.import_csv_file(path) {
            Ok(_) => {
                self.status_message = format!(
                    "Imported {} into {}",
                    path.display(),
                    self.workbook.current_sheet().name
                );
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "CSV import failed");
                self.status_message = format!("Error: {}", e);
            }
        }
    }

    /// Export the current sheet, to `<SheetName>.csv` when no path is given.
    pub fn export_csv(&mut self, path: Option<&Path>) {
        match self.workbook.export_csv_file(path) {
            Ok(written) => self.status_message = format!("Exported to {}", written.display()),
            Err(e) => {
                warn!(error = %e, "CSV export failed");
                self.status_message = format!("Error: {}", e);
            }
        }
    }

    pub fn increase_column_width(&mut self) {
        self.col_width = (self.col_width + 1).min(MAX_COL_WIDTH);
        self.status_message = format!("Column width: {}", self.col_width);
    }

    pub fn decrease_column_width(&mut self) {
        self.col_width = self.col_width.saturating_sub(1).max(MIN_COL_WIDTH);
        self.status_message = format!("Column width: {}", self.col_width);
    }

    pub fn open_help_modal(&mut self) {
        self.help_modal = true;
        self.help_scroll = 0;
    }

    pub fn close_help_modal(&mut self) {
        self.help_modal = false;
    }

    pub fn scroll_help_by(&mut self, delta: i32) {
        self.help_scroll = self.help_scroll.saturating_add_signed(delta as isize);
    }

    /// Run the command buffer. Returns true when the app should quit.
    pub fn execute_command(&mut self) -> bool {
        let cmd = self.command_buffer.trim().to_string();
        self.command_buffer.clear();
        self.command_cursor = 0;
        self.mode = Mode::Normal;
        debug!(command = %cmd, "executing command");

        let (command, args) = match cmd.split_once(' ') {
            Some((command, args)) => (command, args.trim()),
            None => (cmd.as_str(), ""),
        };

        match command {
            "" => {}
            "q" | "q!" | "quit" => return true,
            "goto" | "g" => {
                if args.is_empty() {
                    self.status_message = "Usage: :goto CELL (e.g., :goto B12)".to_string();
                } else {
                    self.goto_cell(args);
                }
            }
            "sheet" => match args.parse::<usize>() {
                Ok(n) if n >= 1 => self.switch_sheet(n - 1),
                _ => self.status_message = "Usage: :sheet N (1-based)".to_string(),
            },
            "newsheet" | "tabnew" => self.new_sheet(),
            "import" | "e" => {
                if args.is_empty() {
                    self.status_message = "Usage: :import <file.csv>".to_string();
                } else {
                    self.import_csv(Path::new(args));
                }
            }
            "export" | "w" => {
                let path = (!args.is_empty()).then(|| Path::new(args));
                self.export_csv(path);
            }
            "bold" | "b" => self.toggle_style(StyleAttribute::FontWeight),
            "italic" | "i" => self.toggle_style(StyleAttribute::FontStyle),
            "underline" | "u" => self.toggle_style(StyleAttribute::TextDecoration),
            "align" => match args {
                "" | "left" | "center" | "right" => self.set_style(StyleAttribute::TextAlign, args),
                _ => self.status_message = "Usage: :align left|center|right".to_string(),
            },
            "color" | "fg" => self.set_style(StyleAttribute::Color, args),
            "bg" => self.set_style(StyleAttribute::BackgroundColor, args),
            "font" => self.set_style(StyleAttribute::FontFamily, args),
            "size" => {
                if !args.is_empty() && args.bytes().all(|b| b.is_ascii_digit()) {
                    self.set_style(StyleAttribute::FontSize, &format!("{}px", args));
                } else {
                    self.set_style(StyleAttribute::FontSize, args);
                }
            }
            "style" => {
                let (name, value) = args.split_once(' ').unwrap_or((args, ""));
                match name.parse::<StyleAttribute>() {
                    Ok(attribute) => self.set_style(attribute, value.trim()),
                    Err(e) => self.status_message = e,
                }
            }
            "colwidth" | "cw" => match args.parse::<usize>() {
                Ok(width) => {
                    self.col_width = width.clamp(MIN_COL_WIDTH, MAX_COL_WIDTH);
                    self.status_message = format!("Column width: {}", self.col_width);
                }
                Err(_) => self.status_message = "Usage: :colwidth N".to_string(),
            },
            "help" | "h" => self.open_help_modal(),
            other => self.status_message = format!("Unknown command: {}", other),
        }
        false
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
