use ratatui::style::Color;
use spin_core::Colour;

pub struct Theme {
    pub border_focus: Color,
    pub border_inactive: Color,
    pub pocket_red: Color,
    pub pocket_black: Color,
    pub pocket_green: Color,
    pub pocket_fg: Color,
    pub active_fg: Color,
    pub active_bg: Color,
    pub cursor_bg: Color,
    pub dim: Color,
}

pub const THEME: Theme = Theme {
    border_focus: Color::Cyan,
    border_inactive: Color::DarkGray,
    pocket_red: Color::Red,
    pocket_black: Color::DarkGray,
    pocket_green: Color::Green,
    pocket_fg: Color::White,
    active_fg: Color::Black,
    active_bg: Color::Yellow,
    cursor_bg: Color::Cyan,
    dim: Color::DarkGray,
};

impl Theme {
    pub fn pocket_bg(&self, c: Colour) -> Color {
        match c {
            Colour::Red => self.pocket_red,
            Colour::Black => self.pocket_black,
            Colour::Green => self.pocket_green,
        }
    }
}
