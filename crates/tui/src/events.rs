use std::time::{Duration, Instant};

use crossterm::event::{self, Event, MouseButton, MouseEventKind};
use ratatui::{backend::Backend, Terminal};

use crate::{app::App, ui};

pub fn run<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> anyhow::Result<()> {
    let mut last_draw = Instant::now();
    let heartbeat = Duration::from_millis(500);
    loop {
        if app.dirty || last_draw.elapsed() >= heartbeat {
            terminal.draw(|f| ui::draw(f, app))?;
            app.dirty = false;
            last_draw = Instant::now();
        }
        if app.cursor_visible() {
            let _ = terminal.show_cursor();
        } else {
            let _ = terminal.hide_cursor();
        }

        if event::poll(Duration::from_millis(120))? {
            match event::read()? {
                Event::Key(key) => {
                    app.on_key(key);
                }
                Event::Paste(s) => app.paste(&s),
                Event::Resize(_, _) => {
                    app.dirty = true;
                }
                Event::Mouse(me) => {
                    if let MouseEventKind::Down(MouseButton::Left) = me.kind {
                        app.on_click(me.column, me.row);
                    }
                }
                _ => {}
            }
        }

        app.on_tick();

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
