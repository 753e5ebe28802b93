use unicode_width::UnicodeWidthChar;

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

/// Single-line text input with a character-based cursor.
#[derive(Debug, Default, Clone)]
pub struct InputField {
    value: String,
    cursor: usize,
}

impl InputField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Replace the contents and put the cursor at the end.
    pub fn set(&mut self, value: &str) {
        self.value = value.to_string();
        self.cursor = self.value.chars().count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub fn insert(&mut self, c: char) {
        let byte_pos = char_to_byte_index(&self.value, self.cursor);
        self.value.insert(byte_pos, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let byte_pos = char_to_byte_index(&self.value, self.cursor);
            self.value.remove(byte_pos);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.value.chars().count() {
            let byte_pos = char_to_byte_index(&self.value, self.cursor);
            self.value.remove(byte_pos);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.value.chars().count());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    /// The part of the input that fits in `width` terminal columns, scrolled
    /// so the cursor stays visible, and the cursor column within that slice.
    ///
    /// Columns are display widths, so wide (CJK, emoji) characters count twice.
    pub fn visible_window(&self, width: usize) -> (String, usize) {
        if width == 0 {
            return (String::new(), 0);
        }

        let widths: Vec<usize> = self
            .value
            .chars()
            .map(|c| c.width().unwrap_or(0))
            .collect();

        // Leftmost start that still leaves one cell for the cursor
        let mut start = self.cursor;
        let mut cursor_col = 0;
        while start > 0 && cursor_col + widths[start - 1] < width {
            start -= 1;
            cursor_col += widths[start];
        }

        let mut used = 0;
        let visible: String = self
            .value
            .chars()
            .zip(&widths)
            .skip(start)
            .take_while(|(_, w)| {
                used += **w;
                used <= width
            })
            .map(|(c, _)| c)
            .collect();

        (visible, cursor_col)
    }
}
