//! Terminal user interface.

mod actions;
mod app;
mod help;
mod input;
mod keymap;
mod ui;

pub use app::App;
pub use keymap::{Keymap, load_keymap};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use std::io;

/// Take over the terminal and run the event loop until the user quits.
pub fn run(app: &mut App) -> io::Result<()> {
    let mut terminal = ratatui::init();
    if let Err(e) = execute!(io::stdout(), EnableMouseCapture) {
        ratatui::restore();
        return Err(e);
    }

    let result = input::run_app(&mut terminal, app);

    let _ = execute!(io::stdout(), DisableMouseCapture);
    ratatui::restore();
    result
}
