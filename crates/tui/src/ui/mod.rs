use std::collections::BTreeSet;

use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use spin_core::{Pocket, HIGHLIGHT_WINDOW, MAX_HISTORY};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::app::{grid, App, ConfirmAction, Focus};
use crate::strings::{
    build_status_line, confirm_reset_message, help_lines_ascii, HISTORY_EMPTY, INPUT_HINT,
    LOADING, NOTICE_DISMISS, TITLE_CONFIRM, TITLE_GRID, TITLE_HELP, TITLE_HISTORY, TITLE_INPUT,
    TITLE_NOTICE,
};
use crate::theme::THEME;

const GRID_W: u16 = grid::COLS * grid::CELL_W + 2;
const GRID_H: u16 = grid::ROWS + 2;

pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(GRID_H),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(f.area());

    let grid_area = Rect {
        width: chunks[0].width.min(GRID_W),
        ..chunks[0]
    };
    app.grid_area = Some(grid_area);

    draw_grid(f, grid_area, app);
    draw_history(f, chunks[1], app);
    draw_status(f, chunks[2], app);
    draw_input(f, chunks[3], app);

    if let Some(confirm) = &app.confirm {
        draw_confirm(f, f.area(), confirm, app);
    }
    if let Some(notice) = &app.notice {
        draw_notice(f, f.area(), &notice.message);
    }
    if app.show_help {
        draw_help(f, f.area());
    }
}

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(THEME.border_focus)
    } else {
        Style::default().fg(THEME.border_inactive)
    }
}

fn pocket_style(p: Pocket, active: bool) -> Style {
    if active {
        Style::default()
            .fg(THEME.active_fg)
            .bg(THEME.active_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(THEME.pocket_fg)
            .bg(THEME.pocket_bg(p.colour()))
    }
}

fn draw_grid(f: &mut Frame, area: Rect, app: &App) {
    let focused = matches!(app.focus, Focus::Grid);
    let block = Block::default()
        .title(Span::styled(
            TITLE_GRID,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(border_style(focused));

    // Nothing is known until the load lands; never paint an empty wheel in its place.
    let Some(active) = app.session.active_set() else {
        let para = Paragraph::new(Line::from(Span::styled(
            LOADING,
            Style::default().fg(THEME.dim),
        )))
        .block(block);
        f.render_widget(para, area);
        return;
    };
    let latest = app.session.history().and_then(|h| h.latest());

    let lines = (0..grid::ROWS)
        .map(|row| grid_row(row, &active, latest, focused.then_some(app.grid_cursor)))
        .collect::<Vec<Line>>();
    let para = Paragraph::new(lines).block(block);
    f.render_widget(para, area);
}

fn grid_row(
    row: u16,
    active: &BTreeSet<Pocket>,
    latest: Option<Pocket>,
    cursor: Option<grid::GridCursor>,
) -> Line<'static> {
    let mut spans: Vec<Span> = Vec::new();
    for col in 0..grid::COLS {
        let Ok(p) = Pocket::new(grid::value_at(row, col)) else {
            continue;
        };
        // zero spans all rows; label it once in the middle
        let label = if col == 0 && row != 1 {
            String::new()
        } else {
            p.to_string()
        };
        let mut style = pocket_style(p, active.contains(&p));
        if latest == Some(p) {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        let under_cursor = cursor.is_some_and(|c| c.col == col && (col == 0 || c.row == row));
        if under_cursor {
            style = style.bg(THEME.cursor_bg).fg(Color::Black);
        }
        spans.push(Span::styled(
            format!("{:^w$}", label, w = grid::CELL_W as usize),
            style,
        ));
    }
    Line::from(spans)
}

fn draw_history(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(TITLE_HISTORY)
        .borders(Borders::ALL)
        .border_style(border_style(false));
    let line = match app.session.history() {
        None => Line::from(Span::styled(LOADING, Style::default().fg(THEME.dim))),
        Some(h) if h.is_empty() => {
            Line::from(Span::styled(HISTORY_EMPTY, Style::default().fg(THEME.dim)))
        }
        Some(h) => {
            let mut spans: Vec<Span> = Vec::new();
            for (i, p) in h.iter().enumerate() {
                let style = if i < HIGHLIGHT_WINDOW {
                    pocket_style(p, false).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(THEME.dim)
                };
                spans.push(Span::styled(format!("{:>3}", p.value()), style));
                spans.push(Span::raw(if i + 1 == HIGHLIGHT_WINDOW { " | " } else { " " }));
            }
            Line::from(spans)
        }
    };
    let para = Paragraph::new(line).block(block).wrap(Wrap { trim: false });
    f.render_widget(para, area);
}

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    let focus = match app.focus {
        Focus::Input => "Input",
        Focus::Grid => "Grid",
    };
    let len = app.session.history().map(|h| h.len());
    let tips = build_status_line(
        focus,
        len,
        MAX_HISTORY,
        !app.session.is_degraded(),
        app.flash.as_deref(),
        area.width,
    );
    let para = Paragraph::new(Line::from(Span::styled(
        tips,
        Style::default().fg(THEME.dim),
    )));
    f.render_widget(para, area);
}

fn draw_input(f: &mut Frame, area: Rect, app: &App) {
    let focused = matches!(app.focus, Focus::Input);
    let block = Block::default()
        .title(TITLE_INPUT)
        .borders(Borders::ALL)
        .border_style(border_style(focused));

    let para = if app.input.is_empty() {
        Paragraph::new(Line::from(Span::styled(
            INPUT_HINT,
            Style::default().fg(THEME.dim),
        )))
        .block(block)
    } else {
        Paragraph::new(app.input.clone()).block(block)
    };
    f.render_widget(para, area);

    if app.cursor_visible() {
        let prefix: String = app.input.graphemes(true).take(app.input_cursor).collect();
        let col = UnicodeWidthStr::width(prefix.as_str()) as u16;
        let max_x = area.x + area.width.saturating_sub(2);
        f.set_cursor_position(Position::new((area.x + 1 + col).min(max_x), area.y + 1));
    }
}

fn draw_help(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(70, 70, area);
    let block = Block::default()
        .title(Span::styled(
            TITLE_HELP,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL);
    let lines = help_lines_ascii()
        .iter()
        .map(|s| Line::from(*s))
        .collect::<Vec<Line>>();
    let para = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(Clear, popup_area);
    f.render_widget(para, popup_area);
}

fn draw_confirm(f: &mut Frame, area: Rect, confirm: &crate::app::ConfirmState, app: &App) {
    let popup_area = centered_rect(60, 30, area);
    let block = Block::default()
        .title(Span::styled(
            TITLE_CONFIRM,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL);
    let mut lines = Vec::new();
    match confirm.action {
        ConfirmAction::Reset => {
            let len = app.session.history().map(|h| h.len()).unwrap_or(0);
            lines.push(Line::from(confirm_reset_message(len)));
        }
    }
    let para = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(Clear, popup_area);
    f.render_widget(para, popup_area);
}

fn draw_notice(f: &mut Frame, area: Rect, message: &str) {
    let popup_area = centered_rect(50, 30, area);
    let block = Block::default()
        .title(Span::styled(
            TITLE_NOTICE,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL);
    let lines = vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled(NOTICE_DISMISS, Style::default().fg(THEME.dim))),
    ];
    let para = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(Clear, popup_area);
    f.render_widget(para, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    let horiz = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vert[1]);
    horiz[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use ratatui::{backend::TestBackend, Terminal};
    use spin_core::{MemoryStore, Session, Store, HISTORY_KEY};

    fn screen(app: &mut App) -> String {
        let backend = TestBackend::new(80, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buf = terminal.backend().buffer().clone();
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn loading_screen_hides_the_wheel() {
        let store: Arc<dyn Store> = Arc::new(MemoryStore::new().with(HISTORY_KEY, "[5]"));
        let mut app = App::new(Session::new(store));
        let s = screen(&mut app);
        assert!(s.contains(LOADING));
        // 33 only ever appears as a grid cell
        assert!(!s.contains("33"));
    }

    #[test]
    fn loading_status_does_not_report_an_empty_saved_history() {
        let store: Arc<dyn Store> = Arc::new(MemoryStore::new().with(HISTORY_KEY, "[5,6,7]"));
        let mut app = App::new(Session::new(store));
        let s = screen(&mut app);
        assert!(!s.contains("Hist:0/"));
        assert!(!s.contains("Saved"));
        assert!(s.contains("Hist:-/30"));

        app.session.wait_ready();
        let s = screen(&mut app);
        assert!(s.contains("Hist:3/30"));
        assert!(s.contains("Saved"));
    }

    #[test]
    fn ready_screen_shows_grid_and_history() {
        let store: Arc<dyn Store> = Arc::new(MemoryStore::new().with(HISTORY_KEY, "[5,12]"));
        let mut session = Session::new(store);
        session.wait_ready();
        let mut app = App::new(session);
        let s = screen(&mut app);
        assert!(s.contains(TITLE_GRID.trim()));
        assert!(s.contains("36"));
        assert!(s.contains("  5  12"));
        assert!(app.grid_area.is_some());
    }

    #[test]
    fn active_cells_use_the_highlight_style() {
        let active: BTreeSet<Pocket> = [Pocket::new(3).unwrap()].into_iter().collect();
        let line = grid_row(0, &active, None, None);
        let three = &line.spans[1];
        assert_eq!(three.content.trim(), "3");
        assert_eq!(three.style.bg, Some(THEME.active_bg));
        let six = &line.spans[2];
        assert_eq!(six.style.bg, Some(THEME.pocket_black));
    }
}
