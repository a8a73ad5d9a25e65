// Centralized UI strings and labels. ASCII-friendly by default.

use spin_core::Rejection;
use unicode_width::UnicodeWidthStr;

pub const INPUT_HINT: &str = "Type 0-36, Enter to add";

// UI block titles (keep surrounding spaces for visual padding)
pub const TITLE_GRID: &str = " Wheel ";
pub const TITLE_HISTORY: &str = " History ";
pub const TITLE_INPUT: &str = " Number ";
pub const TITLE_HELP: &str = " Help / Shortcuts ";
pub const TITLE_CONFIRM: &str = " Confirm ";
pub const TITLE_NOTICE: &str = " Not added ";

pub const LOADING: &str = "Loading history...";
pub const HISTORY_EMPTY: &str = "No numbers yet";
pub const NOTHING_TO_UNDO: &str = "Nothing to undo";
pub const NOTICE_DISMISS: &str = "Press any key to continue.";

pub fn confirm_reset_message(len: usize) -> String {
    format!(
        "Clear all {} recorded numbers? Press Y to confirm, N/Esc to cancel.",
        len
    )
}

pub fn rejection_message(text: &str, r: &Rejection) -> String {
    let shown = text.trim();
    match r {
        Rejection::NotANumber if shown.is_empty() => "Enter a number first.".to_string(),
        Rejection::NotANumber => format!("\"{}\" is not a number.", shown),
        Rejection::NotAWholeNumber => format!("\"{}\" is not a whole number.", shown),
        Rejection::OutOfRange(_) => format!("\"{}\" is outside 0-36.", shown),
    }
}

pub fn added(n: u8) -> String {
    format!("Added {}", n)
}

pub fn undone(n: u8) -> String {
    format!("Removed {}", n)
}

// Build the status bar line with width-aware compaction.
// - focus: "Input" or "Grid"
// - history_len / max: entries recorded and the bound; None while loading
// - saved: false while the last write failed
// - flash: last action feedback, shown first
pub fn build_status_line(
    focus: &str,
    history_len: Option<usize>,
    max: usize,
    saved: bool,
    flash: Option<&str>,
    max_width: u16,
) -> String {
    let mut segments: Vec<String> = Vec::new();
    if let Some(f) = flash {
        segments.push(f.to_string());
    }
    match history_len {
        Some(n) => {
            segments.push(format!("[{}] Hist:{}/{}", focus, n, max));
            segments.push(if saved { "Saved" } else { "Memory only" }.to_string());
        }
        None => {
            segments.push(format!("[{}] Hist:-/{}", focus, max));
            segments.push("Loading".to_string());
        }
    }
    // Hints ordered by importance; will be appended if space allows.
    let hints: [&str; 4] = [
        "Tab: grid/input",
        "Ctrl+Z: undo",
        "Ctrl+R: reset",
        "?: help",
    ];
    for h in hints {
        segments.push(h.to_string());
    }

    let sep = "  |  ";
    let mut out = String::new();
    let mut used = 0usize;
    for (i, seg) in segments.iter().enumerate() {
        let segw = UnicodeWidthStr::width(seg.as_str());
        let addw = segw
            + if i == 0 {
                0
            } else {
                UnicodeWidthStr::width(sep)
            };
        if used + addw > max_width as usize {
            break;
        }
        if i > 0 {
            out.push_str(sep);
            used += UnicodeWidthStr::width(sep);
        }
        out.push_str(seg);
        used += segw;
    }
    out
}

// ASCII help lines content; UI maps to styled lines.
pub fn help_lines_ascii() -> &'static [&'static str] {
    &[
        "Basic",
        "  Enter: Add typed number    Esc/Ctrl-C: Quit",
        "Input Editing",
        "  Left/Right: Cursor move    Backspace/Delete: Delete prev/next char",
        "  Home/End or Ctrl+A/E: Start/end    Ctrl+U/K: Kill to start/end",
        "Grid",
        "  Tab: Switch input/grid    Arrows: Move    Enter/Space: Add number",
        "  Mouse click: Add number    Highlighted: seen in the last 9 spins",
        "History",
        "  Ctrl+Z: Undo last    Ctrl+R: Reset (asks first)",
        "Help",
        "  ?: Open/close this panel    F1: Open/close this panel",
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_line_drops_hints_that_do_not_fit() {
        let full = build_status_line("Input", Some(3), 30, true, None, 200);
        assert!(full.starts_with("[Input] Hist:3/30  |  Saved"));
        assert!(full.ends_with("?: help"));

        let narrow = build_status_line("Grid", Some(3), 30, false, Some("Added 7"), 30);
        assert_eq!(narrow, "Added 7  |  [Grid] Hist:3/30");
    }

    #[test]
    fn status_line_while_loading_claims_nothing() {
        let s = build_status_line("Input", None, 30, true, None, 200);
        assert!(s.starts_with("[Input] Hist:-/30  |  Loading"));
        assert!(!s.contains("Saved"));
    }

    #[test]
    fn rejection_messages_quote_the_input() {
        assert_eq!(
            rejection_message(" 3.5 ", &Rejection::NotAWholeNumber),
            "\"3.5\" is not a whole number."
        );
        assert_eq!(
            rejection_message("", &Rejection::NotANumber),
            "Enter a number first."
        );
        assert_eq!(
            rejection_message("99", &Rejection::OutOfRange(99)),
            "\"99\" is outside 0-36."
        );
    }
}
