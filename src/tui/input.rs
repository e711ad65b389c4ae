// Single line text field with a character cursor.
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Default, Clone)]
pub struct InputLine {
    buffer: String,
    cursor_position: usize,
}

impl InputLine {
    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor_position
    }

    /// Terminal columns taken by the text left of the cursor.
    pub fn cursor_column(&self) -> usize {
        let byte_index = self.byte_index();
        self.buffer[..byte_index].width()
    }

    fn byte_index(&self) -> usize {
        self.buffer
            .char_indices()
            .map(|(i, _)| i)
            .nth(self.cursor_position)
            .unwrap_or(self.buffer.len())
    }

    fn clamp_cursor(&self, new_cursor_pos: usize) -> usize {
        new_cursor_pos.clamp(0, self.buffer.chars().count())
    }

    pub fn move_cursor_left(&mut self) {
        let cursor_moved_left = self.cursor_position.saturating_sub(1);
        self.cursor_position = self.clamp_cursor(cursor_moved_left);
    }

    pub fn move_cursor_right(&mut self) {
        let cursor_moved_right = self.cursor_position.saturating_add(1);
        self.cursor_position = self.clamp_cursor(cursor_moved_right);
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor_position = self.buffer.chars().count();
    }

    pub fn enter_char(&mut self, new_char: char) {
        let byte_index = self.byte_index();
        self.buffer.insert(byte_index, new_char);
        self.move_cursor_right();
    }

    /// Backspace.
    pub fn delete_char(&mut self) {
        if self.cursor_position != 0 {
            let current_index = self.cursor_position;
            let before = self.buffer.chars().take(current_index - 1);
            let after = self.buffer.chars().skip(current_index);
            self.buffer = before.chain(after).collect();
            self.move_cursor_left();
        }
    }

    /// Delete key.
    pub fn delete_char_forward(&mut self) {
        if self.cursor_position < self.buffer.chars().count() {
            let current_index = self.cursor_position;
            let before = self.buffer.chars().take(current_index);
            let after = self.buffer.chars().skip(current_index + 1);
            self.buffer = before.chain(after).collect();
        }
    }
}
