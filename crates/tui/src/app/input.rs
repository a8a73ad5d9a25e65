use unicode_segmentation::UnicodeSegmentation;

use super::App;

impl App {
    // Single-line field: pasted newlines are dropped.
    pub fn insert_text(&mut self, s: &str) {
        let s: String = s.chars().filter(|c| !c.is_control()).collect();
        if s.is_empty() {
            return;
        }
        let parts: Vec<&str> = self.input.graphemes(true).collect();
        let idx = self.input_cursor.min(parts.len());
        let mut new_input = String::new();
        for g in &parts[..idx] {
            new_input.push_str(g);
        }
        new_input.push_str(&s);
        for g in &parts[idx..] {
            new_input.push_str(g);
        }
        self.input = new_input;
        let added = s.graphemes(true).count();
        self.input_cursor = (idx + added).min(self.input.graphemes(true).count());
    }

    pub fn delete_left_grapheme(&mut self) {
        if self.input_cursor == 0 {
            return;
        }
        let mut parts: Vec<&str> = self.input.graphemes(true).collect();
        let idx = self.input_cursor.min(parts.len());
        parts.remove(idx - 1);
        self.input = parts.concat();
        self.input_cursor = idx - 1;
    }

    pub fn delete_right_grapheme(&mut self) {
        let mut parts: Vec<&str> = self.input.graphemes(true).collect();
        let idx = self.input_cursor.min(parts.len());
        if idx < parts.len() {
            parts.remove(idx);
            self.input = parts.concat();
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.input_cursor = self.input_cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        let len = self.input.graphemes(true).count();
        if self.input_cursor < len {
            self.input_cursor += 1;
        }
    }

    pub fn move_cursor_start(&mut self) {
        self.input_cursor = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.input_cursor = self.input.graphemes(true).count();
    }

    pub fn kill_to_start(&mut self) {
        let parts: Vec<&str> = self.input.graphemes(true).collect();
        let idx = self.input_cursor.min(parts.len());
        self.input = parts[idx..].concat();
        self.input_cursor = 0;
    }

    pub fn kill_to_end(&mut self) {
        let parts: Vec<&str> = self.input.graphemes(true).collect();
        let idx = self.input_cursor.min(parts.len());
        self.input = parts[..idx].concat();
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
        self.input_cursor = 0;
    }
}
