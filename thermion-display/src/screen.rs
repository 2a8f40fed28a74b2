//! Screen buffer types
//!
//! Provides a character-based screen buffer for text-mode displays.

use heapless::String;

/// Number of character rows on the panel display
pub const SCREEN_ROWS: usize = 8;

/// Number of character columns on the panel display
pub const SCREEN_COLS: usize = 21;

/// Line buffer capacity in bytes
///
/// The degree sign is two bytes in UTF-8, so a full line can take more
/// bytes than it has columns.
pub const LINE_LEN: usize = SCREEN_COLS * 2;

/// Screen buffer for text-mode displays
///
/// Holds one frame of text that can be pushed to any `DisplayBackend`
/// implementation. The dirty flag tracks whether the buffer has changed
/// since it was last presented.
#[derive(Clone)]
pub struct Screen {
    /// Current display content
    lines: [String<LINE_LEN>; SCREEN_ROWS],
    /// Whether the screen needs to be redrawn
    dirty: bool,
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    /// Create a new empty screen
    pub fn new() -> Self {
        Self {
            lines: core::array::from_fn(|_| String::new()),
            dirty: true,
        }
    }

    /// Clear the entire screen
    pub fn clear(&mut self) {
        for line in &mut self.lines {
            line.clear();
        }
        self.dirty = true;
    }

    /// Set the content of a specific row
    ///
    /// Text longer than the display is wide is truncated.
    pub fn set_line(&mut self, row: usize, text: &str) {
        if row < SCREEN_ROWS {
            self.lines[row].clear();
            // Truncate to whole characters, never mid-glyph
            let end = text
                .char_indices()
                .nth(SCREEN_COLS)
                .map(|(idx, _)| idx)
                .unwrap_or(text.len());
            let _ = self.lines[row].push_str(&text[..end]);
            self.dirty = true;
        }
    }

    /// Set the content of a specific row, centered horizontally
    pub fn set_line_centered(&mut self, row: usize, text: &str) {
        let width = text.chars().count();
        let pad = SCREEN_COLS.saturating_sub(width) / 2;

        let mut line: String<LINE_LEN> = String::new();
        for _ in 0..pad {
            let _ = line.push(' ');
        }
        let _ = line.push_str(text);
        self.set_line(row, &line);
    }

    /// Get the content of a specific row
    ///
    /// Rows outside the screen read as empty.
    pub fn line(&self, row: usize) -> &str {
        self.lines.get(row).map(|s| s.as_str()).unwrap_or("")
    }

    /// Check if screen needs redrawing
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark screen as clean (after rendering)
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Get all lines as an iterator
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|s| s.as_str())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Screen {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Screen[");
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "{}", line.as_str());
        }
        defmt::write!(f, "]");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_read_line() {
        let mut screen = Screen::new();
        screen.set_line(0, "Hello");
        assert_eq!(screen.line(0), "Hello");
        assert_eq!(screen.line(1), "");
    }

    #[test]
    fn test_out_of_range_row_ignored() {
        let mut screen = Screen::new();
        screen.set_line(SCREEN_ROWS, "nope");
        assert_eq!(screen.line(SCREEN_ROWS), "");
    }

    #[test]
    fn test_long_line_truncated() {
        let mut screen = Screen::new();
        screen.set_line(0, "abcdefghijklmnopqrstuvwxyz");
        assert_eq!(screen.line(0).len(), SCREEN_COLS);
        assert_eq!(screen.line(0), "abcdefghijklmnopqrstu");
    }

    #[test]
    fn test_truncation_keeps_whole_degree_sign() {
        let mut screen = Screen::new();
        // 20 ASCII chars then a two-byte degree sign on the boundary
        screen.set_line(0, "12345678901234567890°x");
        assert_eq!(screen.line(0), "12345678901234567890°");
        assert_eq!(screen.line(0).chars().count(), SCREEN_COLS);
    }

    #[test]
    fn test_centered_line() {
        let mut screen = Screen::new();
        screen.set_line_centered(0, "Hi");
        // (21 - 2) / 2 = 9 leading spaces
        assert_eq!(screen.line(0), "         Hi");
    }

    #[test]
    fn test_centered_line_wider_than_screen() {
        let mut screen = Screen::new();
        screen.set_line_centered(0, "abcdefghijklmnopqrstuvwxyz");
        assert_eq!(screen.line(0), "abcdefghijklmnopqrstu");
    }

    #[test]
    fn test_dirty_lifecycle() {
        let mut screen = Screen::new();
        assert!(screen.is_dirty());

        screen.mark_clean();
        assert!(!screen.is_dirty());

        screen.set_line(0, "update");
        assert!(screen.is_dirty());

        screen.mark_clean();
        screen.clear();
        assert!(screen.is_dirty());
    }

    #[test]
    fn test_lines_iterator() {
        let mut screen = Screen::new();
        screen.set_line(0, "first");
        screen.set_line(7, "last");

        let lines: heapless::Vec<&str, 8> = screen.lines().collect();
        assert_eq!(lines.len(), SCREEN_ROWS);
        assert_eq!(lines[0], "first");
        assert_eq!(lines[7], "last");
    }
}
