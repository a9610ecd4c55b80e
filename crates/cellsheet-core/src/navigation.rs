//! Focus movement rules for the grid surface.
//!
//! Moves never wrap: a request that would leave the 26 x 100 grid is a no-op.

use cellsheet_engine::engine::CellId;

/// Keys that move focus between cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavKey {
    Up,
    Down,
    Left,
    Right,
    /// Tab: one cell right.
    Tab,
    /// Shift+Tab: one cell left.
    BackTab,
    /// Enter: one row down.
    Enter,
}

/// The cell focus moves to, or `None` when it stays put.
pub fn navigate(from: CellId, key: NavKey) -> Option<CellId> {
    let (dx, dy) = match key {
        NavKey::Up => (0, -1),
        NavKey::Down | NavKey::Enter => (0, 1),
        NavKey::Left | NavKey::BackTab => (-1, 0),
        NavKey::Right | NavKey::Tab => (1, 0),
    };
    from.offset(dx, dy)
}
