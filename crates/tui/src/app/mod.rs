use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::Rect;
use spin_core::{Phase, Session, SessionError};
use tracing::{debug, info};

use crate::strings;

pub mod grid;
pub mod input;

pub use grid::GridCursor;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    Input,
    Grid,
}

#[derive(Clone)]
pub struct ConfirmState {
    pub action: ConfirmAction,
}

#[derive(Clone)]
pub enum ConfirmAction {
    Reset,
}

/// Blocking message; the next key press only dismisses it.
pub struct Notice {
    pub message: String,
}

pub struct App {
    pub session: Session,
    pub input: String,
    pub input_cursor: usize,
    pub focus: Focus,
    pub grid_cursor: GridCursor,
    pub grid_area: Option<Rect>,
    pub confirm: Option<ConfirmState>,
    pub notice: Option<Notice>,
    pub flash: Option<String>,
    pub show_help: bool,
    pub should_quit: bool,
    pub dirty: bool,
    flash_at: Option<Instant>,
}

const FLASH_FOR: Duration = Duration::from_secs(3);

impl App {
    pub fn new(mut session: Session) -> Self {
        session.start();
        Self {
            session,
            input: String::new(),
            input_cursor: 0,
            focus: Focus::Input,
            grid_cursor: GridCursor::default(),
            grid_area: None,
            confirm: None,
            notice: None,
            flash: None,
            show_help: false,
            should_quit: false,
            dirty: true,
            flash_at: None,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.session.phase() == Phase::Ready
    }

    /// The input owns the terminal cursor only when keys would reach it.
    pub fn cursor_visible(&self) -> bool {
        matches!(self.focus, Focus::Input)
            && self.is_ready()
            && self.notice.is_none()
            && self.confirm.is_none()
            && !self.show_help
    }

    pub fn paste(&mut self, text: &str) {
        if self.cursor_visible() {
            self.insert_text(text);
            self.dirty = true;
        }
    }

    fn set_flash(&mut self, s: String) {
        self.flash = Some(s);
        self.flash_at = Some(Instant::now());
    }

    pub fn submit(&mut self) {
        let text = self.input.clone();
        match self.session.submit_text(&text) {
            Ok(p) => {
                info!(target: "tui", "submit: added {}", p);
                self.clear_input();
                self.focus = Focus::Input;
                self.set_flash(strings::added(p.value()));
            }
            Err(SessionError::Rejected(r)) => {
                info!(target: "tui", "submit: rejected {:?}: {}", text, r);
                self.notice = Some(Notice {
                    message: strings::rejection_message(&text, &r),
                });
            }
            Err(SessionError::NotReady) => {
                debug!(target: "tui", "submit ignored while loading");
            }
        }
        self.dirty = true;
    }

    pub fn tap(&mut self, value: i64) {
        match self.session.tap_grid_value(value) {
            Ok(p) => {
                info!(target: "tui", "tap: added {}", p);
                self.grid_cursor = {
                    let (row, col) = grid::coords_of(p);
                    GridCursor { row, col }
                };
                self.set_flash(strings::added(p.value()));
            }
            Err(e) => {
                debug!(target: "tui", "tap {} ignored: {}", value, e);
            }
        }
        self.dirty = true;
    }

    pub fn undo(&mut self) {
        match self.session.undo() {
            Ok(Some(p)) => {
                info!(target: "tui", "undo: removed {}", p);
                self.set_flash(strings::undone(p.value()));
            }
            Ok(None) => self.set_flash(strings::NOTHING_TO_UNDO.to_string()),
            Err(e) => debug!(target: "tui", "undo ignored: {}", e),
        }
        self.dirty = true;
    }

    pub fn request_reset(&mut self) {
        if self.is_ready() {
            self.confirm = Some(ConfirmState {
                action: ConfirmAction::Reset,
            });
            self.dirty = true;
        }
    }

    pub fn on_click(&mut self, x: u16, y: u16) {
        if !self.is_ready() || self.confirm.is_some() || self.show_help {
            return;
        }
        if self.notice.take().is_some() {
            self.dirty = true;
            return;
        }
        let Some(inner) = self.grid_inner() else {
            return;
        };
        if let Some(v) = grid::hit(inner, x, y) {
            self.tap(v);
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if !matches!(key.kind, KeyEventKind::Press) {
            return;
        }
        self.dirty = true;

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.notice.take().is_some() {
            return;
        }

        if self.show_help {
            self.show_help = false;
            return;
        }

        if let Some(confirm) = self.confirm.take() {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => match confirm.action {
                    ConfirmAction::Reset => {
                        if self.session.reset().is_ok() {
                            info!(target: "tui", "reset confirmed");
                            self.set_flash("History cleared".to_string());
                        }
                    }
                },
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {}
                _ => self.confirm = Some(confirm),
            }
            return;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::F(1) => self.show_help = true,
            KeyCode::Char('?') => self.show_help = true,
            _ if !self.is_ready() => {}
            KeyCode::Char('z') if ctrl => self.undo(),
            KeyCode::Char('r') if ctrl => self.request_reset(),
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = match self.focus {
                    Focus::Input => Focus::Grid,
                    Focus::Grid => Focus::Input,
                };
            }
            _ => match self.focus {
                Focus::Input => self.on_input_key(key),
                Focus::Grid => self.on_grid_key(key),
            },
        }
    }

    fn on_input_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Enter => self.submit(),
            KeyCode::Backspace => self.delete_left_grapheme(),
            KeyCode::Delete => self.delete_right_grapheme(),
            KeyCode::Left => self.move_cursor_left(),
            KeyCode::Right => self.move_cursor_right(),
            KeyCode::Home => self.move_cursor_start(),
            KeyCode::End => self.move_cursor_end(),
            KeyCode::Char('a') if ctrl => self.move_cursor_start(),
            KeyCode::Char('e') if ctrl => self.move_cursor_end(),
            KeyCode::Char('u') if ctrl => self.kill_to_start(),
            KeyCode::Char('k') if ctrl => self.kill_to_end(),
            KeyCode::Char(ch) if !ctrl => {
                let mut buf = [0u8; 4];
                let s = ch.encode_utf8(&mut buf);
                self.insert_text(s);
            }
            _ => {}
        }
    }

    fn on_grid_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.grid_move(-1, 0),
            KeyCode::Down => self.grid_move(1, 0),
            KeyCode::Left => self.grid_move(0, -1),
            KeyCode::Right => self.grid_move(0, 1),
            KeyCode::Enter | KeyCode::Char(' ') => {
                let v = self.grid_selected();
                self.tap(v);
            }
            KeyCode::Char('u') => self.undo(),
            KeyCode::Char('r') => self.request_reset(),
            KeyCode::Char(ch) if ch.is_ascii_digit() => {
                self.focus = Focus::Input;
                self.on_input_key(key);
            }
            _ => {}
        }
    }

    pub fn on_tick(&mut self) {
        if self.session.poll() {
            self.dirty = true;
        }
        if self.flash_at.is_some_and(|t| t.elapsed() >= FLASH_FOR) {
            self.flash = None;
            self.flash_at = None;
            self.dirty = true;
        }
    }
}
