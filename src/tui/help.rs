//! Help text content for the help modal

use super::keymap::Keymap;

/// Get keybinding help text for the current keymap
pub fn get_help_text(keymap: Keymap) -> Vec<String> {
    match keymap {
        Keymap::Vim => vec![
            "Navigation:",
            "  h/j/k/l      Move left/down/up/right",
            "  Arrow keys   Move cursor",
            "  Tab/S-Tab    Next/previous column",
            "  PageUp/Down  Scroll by page",
            "  0/$          First/last column",
            "  g            Go to A1",
            "  G            Open goto prompt",
            "",
            "Editing:",
            "  i / Enter    Edit cell",
            "  Enter        Commit and move down",
            "  Tab/S-Tab    Commit and move right/left",
            "  x / Delete   Clear cell",
            "  Esc          Cancel edit",
            "",
            "Sheets:",
            "  ] / [        Next/previous sheet",
            "  N            New sheet",
            "",
            "Style:",
            "  B / I / U    Toggle bold/italic/underline",
            "",
            "Other:",
            "  :            Enter command mode",
            "  E            Export current sheet",
            "  +/-          Adjust column width",
            "  ?            This help",
        ]
        .into_iter()
        .map(str::to_string)
        .collect(),
        Keymap::Emacs => vec![
            "Navigation:",
            "  C-n/C-p      Move down/up",
            "  C-f/C-b      Move right/left",
            "  Arrow keys   Move cursor",
            "  Tab/S-Tab    Next/previous column",
            "  C-v/M-v      Page down/up",
            "  C-a/C-e      First/last column",
            "  M-<          Go to A1",
            "  M-g          Open goto prompt",
            "",
            "Editing:",
            "  Enter        Edit cell",
            "  Enter        Commit and move down",
            "  Tab/S-Tab    Commit and move right/left",
            "  C-d/Delete   Clear cell",
            "  C-g / Esc    Cancel",
            "",
            "Sheets:",
            "  M-n/M-p      Next/previous sheet",
            "  M-t          New sheet",
            "",
            "Style:",
            "  M-b/M-i/M-u  Toggle bold/italic/underline",
            "",
            "Other:",
            "  M-x          Enter command mode",
            "  C-s          Export current sheet",
            "  M-=/M--      Adjust column width",
            "  F1           This help",
        ]
        .into_iter()
        .map(str::to_string)
        .collect(),
    }
}

pub fn get_commands_help() -> Vec<String> {
    vec![
        "Commands:",
        "  :q                    Quit",
        "  :goto CELL            Jump to a cell (e.g. :goto B12)",
        "  :sheet N              Switch to sheet N (1-based)",
        "  :newsheet             Add a sheet and switch to it",
        "  :import FILE          Replace the current sheet with a CSV file",
        "  :export [FILE]        Write the current sheet (default <Sheet>.csv)",
        "  :bold :italic :underline   Toggle a style",
        "  :align left|center|right",
        "  :color C  :bg C       Text/background color (empty clears)",
        "  :font NAME  :size N   Font family and size",
        "  :style ATTR [VALUE]   Set any style attribute by CSS name",
        "  :colwidth N           Set column width",
        "  :help                 This help",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

pub fn get_formula_help() -> Vec<String> {
    vec![
        "Formulas:",
        "  =1+2*3                Arithmetic with + - * / and parentheses",
        "  =A1+B2                Cell references (A-Z, rows 1-100)",
        "  =SUM(A1:B5)           Sum of a rectangular range",
        "  Empty or non-numeric cells count as 0.",
        "  Any failure shows #ERROR!",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}
