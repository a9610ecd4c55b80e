//! UI rendering

use super::app::{App, Mode};
use super::help::{get_commands_help, get_formula_help, get_help_text};
use cellsheet_core::{CellId, ERROR_MARKER, StyleAttribute, StyleMap};
use cellsheet_engine::engine::{GRID_COLS, GRID_ROWS};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
};
use std::str::FromStr;

pub(crate) const FORMULA_BAR_HEIGHT: u16 = 3;
pub(crate) const GRID_MIN_HEIGHT: u16 = 10;
pub(crate) const TABS_HEIGHT: u16 = 1;
pub(crate) const STATUS_BAR_HEIGHT: u16 = 1;
pub(crate) const ROW_HEADER_WIDTH: u16 = 4;
pub(crate) const GRID_COLUMN_SPACING: u16 = 1;

pub(crate) fn split_main_chunks(area: Rect) -> [Rect; 4] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(FORMULA_BAR_HEIGHT),
            Constraint::Min(GRID_MIN_HEIGHT),
            Constraint::Length(TABS_HEIGHT),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2], chunks[3]]
}

/// Map a terminal position inside the grid block to the cell drawn there.
pub(crate) fn grid_cell_at(
    app: &App,
    grid_area: Rect,
    mouse_col: u16,
    mouse_row: u16,
) -> Option<CellId> {
    if grid_area.width < 3 || grid_area.height < 4 {
        return None;
    }

    let inner_x = grid_area.x.saturating_add(1);
    let inner_y = grid_area.y.saturating_add(1);
    let inner_right = inner_x.saturating_add(grid_area.width.saturating_sub(2));
    let inner_bottom = inner_y.saturating_add(grid_area.height.saturating_sub(2));

    if mouse_col < inner_x
        || mouse_col >= inner_right
        || mouse_row < inner_y
        || mouse_row >= inner_bottom
    {
        return None;
    }

    // Header row contains column letters, not data cells.
    if mouse_row == inner_y {
        return None;
    }

    let rel_row = (mouse_row - inner_y - 1) as usize;
    if rel_row >= app.visible_rows {
        return None;
    }
    let row = app.viewport_row + rel_row;
    if row >= GRID_ROWS {
        return None;
    }

    let first_cell_x = inner_x + ROW_HEADER_WIDTH + GRID_COLUMN_SPACING;
    if mouse_col < first_cell_x {
        return None;
    }

    let stride = app.col_width + GRID_COLUMN_SPACING as usize;
    let rel_x = (mouse_col - first_cell_x) as usize;
    let offset = rel_x / stride;
    if rel_x % stride >= app.col_width || offset >= app.visible_cols {
        return None;
    }
    let col = app.viewport_col + offset;
    (col < GRID_COLS).then(|| CellId::new(col, row))
}

/// Draw the application UI
pub fn draw(f: &mut Frame, app: &mut App) {
    let [formula_area, grid_area, tabs_area, status_area] = split_main_chunks(f.area());

    // Update visible dimensions based on actual size
    let available_width = grid_area.width.saturating_sub(ROW_HEADER_WIDTH + 2) as usize;
    let available_height = grid_area.height.saturating_sub(3) as usize; // header + borders

    app.visible_cols = (available_width / (app.col_width + 1)).max(1);
    app.visible_rows = available_height.max(1);
    app.update_viewport();

    draw_formula_bar(f, app, formula_area);
    draw_grid(f, app, grid_area);
    draw_sheet_tabs(f, app, tabs_area);
    draw_status_bar(f, app, status_area);

    if app.help_modal {
        draw_help_modal(f, app);
    }
}

fn draw_formula_bar(f: &mut Frame, app: &App, area: Rect) {
    let cell_name = app.cursor.to_string();

    let content = match app.mode {
        Mode::Edit => {
            let (before, after) = app.edit_buffer.split_at(app.edit_cursor);
            format!("{}: {}│{}", cell_name, before, after)
        }
        Mode::Command => {
            let (before, after) = app.command_buffer.split_at(app.command_cursor);
            format!(":{}│{}", before, after)
        }
        Mode::Normal => match app.workbook.current_sheet().value(app.cursor) {
            Some(value) => format!("{}: {}", cell_name, value.input_text()),
            None => format!("{}: (empty)", cell_name),
        },
    };

    // Font settings have no terminal rendering; show them alongside the input.
    let font = app
        .cell_style(app.cursor)
        .map(|style| {
            [StyleAttribute::FontFamily, StyleAttribute::FontSize]
                .iter()
                .filter_map(|attr| style.get(attr).map(String::as_str))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|s| !s.is_empty());
    let content = match font {
        Some(font) if app.mode == Mode::Normal => format!("{}  [{}]", content, font),
        _ => content,
    };

    let title = match app.mode {
        Mode::Edit => " Edit ",
        Mode::Command => " Command ",
        Mode::Normal => " Cell ",
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(match app.mode {
            Mode::Edit => Color::Yellow,
            Mode::Command => Color::Cyan,
            Mode::Normal => Color::White,
        }));

    let paragraph = Paragraph::new(content).block(block);
    f.render_widget(paragraph, area);
}

/// Terminal rendering of a cell's style map.
pub(crate) fn cell_style(style: &StyleMap) -> (Style, Alignment) {
    let mut out = Style::default();
    let mut alignment = Alignment::Left;

    for (attribute, value) in style {
        let value = value.trim();
        match attribute {
            StyleAttribute::FontWeight => {
                let heavy = value.parse::<u16>().map(|w| w >= 600).unwrap_or(false);
                if value == "bold" || value == "bolder" || heavy {
                    out = out.add_modifier(Modifier::BOLD);
                }
            }
            StyleAttribute::FontStyle => {
                if value == "italic" || value == "oblique" {
                    out = out.add_modifier(Modifier::ITALIC);
                }
            }
            StyleAttribute::TextDecoration => {
                if value.contains("underline") {
                    out = out.add_modifier(Modifier::UNDERLINED);
                }
                if value.contains("line-through") {
                    out = out.add_modifier(Modifier::CROSSED_OUT);
                }
            }
            StyleAttribute::TextAlign => {
                alignment = match value {
                    "center" => Alignment::Center,
                    "right" => Alignment::Right,
                    _ => Alignment::Left,
                };
            }
            StyleAttribute::Color => {
                if let Ok(color) = Color::from_str(value) {
                    out = out.fg(color);
                }
            }
            StyleAttribute::BackgroundColor => {
                if let Ok(color) = Color::from_str(value) {
                    out = out.bg(color);
                }
            }
            StyleAttribute::FontFamily | StyleAttribute::FontSize => {}
        }
    }

    (out, alignment)
}

fn draw_grid(f: &mut Frame, app: &App, area: Rect) {
    let cols = app.viewport_col..(app.viewport_col + app.visible_cols).min(GRID_COLS);
    let rows = app.viewport_row..(app.viewport_row + app.visible_rows).min(GRID_ROWS);

    let header_style = |active: bool| {
        if active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    };

    let mut header_cells = vec![Cell::from(" ")]; // Corner
    for col in cols.clone() {
        header_cells.push(
            Cell::from(CellId::col_letter(col).to_string())
                .style(header_style(col == app.cursor.col)),
        );
    }
    let header = Row::new(header_cells).height(1);

    let mut table_rows = Vec::new();
    for row in rows {
        let mut cells = vec![
            Cell::from(format!("{}", row + 1)).style(header_style(row == app.cursor.row)),
        ];

        for col in cols.clone() {
            let id = CellId::new(col, row);
            let display = app.cell_display(id);
            let (mut style, alignment) = app
                .cell_style(id)
                .map(cell_style)
                .unwrap_or((Style::default(), Alignment::Left));

            if id == app.cursor {
                style = style
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD);
            } else if display == ERROR_MARKER {
                style = style.fg(Color::Red);
            }

            cells.push(Cell::from(Line::from(display).alignment(alignment)).style(style));
        }

        table_rows.push(Row::new(cells));
    }

    let mut widths = vec![Constraint::Length(ROW_HEADER_WIDTH)];
    widths.extend(cols.map(|_| Constraint::Length(app.col_width as u16)));

    let title = format!(" {} ", app.workbook.current_sheet().name);
    let table = Table::new(table_rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title))
        .column_spacing(GRID_COLUMN_SPACING);

    f.render_widget(table, area);
}

/// Width of a sheet tab label, padded by one space on each side.
fn tab_width(name: &str) -> u16 {
    u16::try_from(name.chars().count() + 2).unwrap_or(u16::MAX)
}

/// Index of the sheet whose tab is drawn at the given terminal position.
pub(crate) fn sheet_tab_at(
    app: &App,
    tabs_area: Rect,
    mouse_col: u16,
    mouse_row: u16,
) -> Option<usize> {
    if mouse_row < tabs_area.y
        || mouse_row >= tabs_area.bottom()
        || mouse_col < tabs_area.x
        || mouse_col >= tabs_area.right()
    {
        return None;
    }
    let mut start = tabs_area.x;
    for (index, sheet) in app.workbook.sheets().iter().enumerate() {
        let end = start.saturating_add(tab_width(&sheet.name));
        if mouse_col < start {
            return None;
        }
        if mouse_col < end {
            return Some(index);
        }
        start = end.saturating_add(1);
    }
    None
}

fn draw_sheet_tabs(f: &mut Frame, app: &App, area: Rect) {
    let current = app.workbook.current_index();
    let active = Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let spans: Vec<Span> = app
        .workbook
        .sheets()
        .iter()
        .enumerate()
        .flat_map(|(index, sheet)| {
            let style = if index == current {
                active
            } else {
                Style::default().fg(Color::Gray)
            };
            [
                Span::styled(format!(" {} ", sheet.name), style),
                Span::raw(" "),
            ]
        })
        .collect();
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let message = app.status_message.as_str();
    let (status, color) = match message {
        "" => (
            format!("[{}]  |  {}", app.keymap.name(), app.keymap.status_hint()),
            Color::DarkGray,
        ),
        m if m.starts_with("Error") => (m.to_string(), Color::Red),
        m => (m.to_string(), Color::Yellow),
    };
    f.render_widget(
        Paragraph::new(Span::styled(status, Style::default().fg(color))),
        area,
    );
}

/// Area covering `percent` of `area` in each direction, centered.
fn popup_area(area: Rect, percent: u16) -> Rect {
    let scale = |len: u16| (u32::from(len) * u32::from(percent.min(100)) / 100) as u16;
    let width = scale(area.width);
    let height = scale(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Help lines: section headings in bold yellow, indented entries plain.
fn help_lines(app: &App) -> Vec<Line<'static>> {
    let heading = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    [
        get_help_text(app.keymap),
        get_commands_help(),
        get_formula_help(),
    ]
    .into_iter()
    .enumerate()
    .flat_map(|(i, section)| {
        let gap = (i > 0).then(|| Line::from(""));
        gap.into_iter().chain(section.into_iter().map(move |text| {
            if text.is_empty() || text.starts_with("  ") {
                Line::from(text)
            } else {
                Line::styled(text, heading)
            }
        }))
    })
    .collect()
}

fn draw_help_modal(f: &mut Frame, app: &App) {
    let area = popup_area(f.area(), 88);
    let lines = help_lines(app);

    let max_scroll = lines.len().saturating_sub(area.height.saturating_sub(2) as usize);
    let scroll_y = u16::try_from(app.help_scroll.min(max_scroll)).unwrap_or(u16::MAX);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Help ({}) ", app.keymap.name()))
        .border_style(Style::default().fg(Color::Green));
    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().fg(Color::White).bg(Color::Black))
        .scroll((scroll_y, 0))
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}
