use std::io::stdout;

use anyhow::Result;
use crossterm::{
    cursor::SetCursorStyle,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

pub struct TerminalGuard {
    pub terminal: Terminal<CrosstermBackend<std::io::Stdout>>,
    mouse: bool,
}

impl TerminalGuard {
    pub fn new(mouse: bool) -> Result<Self> {
        install_panic_hook(mouse);
        enable_raw_mode()?;
        let mut out = stdout();
        execute!(out, EnterAlternateScreen, SetCursorStyle::SteadyBar)?;
        if mouse {
            execute!(out, EnableMouseCapture)?;
        }
        let backend = CrosstermBackend::new(out);
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal, mouse })
    }
}

fn restore(mouse: bool) {
    let mut out = stdout();
    if mouse {
        let _ = execute!(out, DisableMouseCapture);
    }
    let _ = execute!(out, LeaveAlternateScreen, SetCursorStyle::DefaultUserShape);
    let _ = disable_raw_mode();
}

// Leave the alternate screen before the default hook prints the panic.
fn install_panic_hook(mouse: bool) {
    let prev = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore(mouse);
        prev(info);
    }));
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore(self.mouse);
        let _ = self.terminal.show_cursor();
    }
}
