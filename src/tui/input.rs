//! tui/input: single-line text field with a cursor.

use super::keymap::Key;

#[derive(Debug, Default, Clone)]
pub struct TextInput {
    chars: Vec<char>,
    cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> String {
        self.chars.iter().collect()
    }

    /// Replace the content and move the cursor to the end.
    pub fn set_value(&mut self, s: &str) {
        self.chars = s.chars().collect();
        self.cursor = self.chars.len();
    }

    pub fn clear(&mut self) {
        self.set_value("");
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Apply an editing key. Returns false for keys the field does not use.
    pub fn handle_key(&mut self, key: Key) -> bool {
        match key {
            Key::Char(c) => {
                self.chars.insert(self.cursor, c);
                self.cursor += 1;
            }
            Key::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    self.chars.remove(self.cursor);
                }
            }
            Key::Delete => {
                if self.cursor < self.chars.len() {
                    self.chars.remove(self.cursor);
                }
            }
            Key::Left => self.cursor = self.cursor.saturating_sub(1),
            Key::Right => self.cursor = (self.cursor + 1).min(self.chars.len()),
            Key::Home | Key::Ctrl('a') => self.cursor = 0,
            Key::End => self.cursor = self.chars.len(),
            Key::Ctrl('u') => {
                self.chars.drain(..self.cursor);
                self.cursor = 0;
            }
            _ => return false,
        }
        true
    }

    /// Text with a block cursor, e.g. `> ab█c`.
    pub fn render(&self, placeholder: &str) -> String {
        if self.chars.is_empty() {
            return format!("> █{}", placeholder);
        }
        let mut out = String::from("> ");
        for (i, c) in self.chars.iter().enumerate() {
            if i == self.cursor {
                out.push('█');
            }
            out.push(*c);
        }
        if self.cursor == self.chars.len() {
            out.push('█');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(s: &str) -> TextInput {
        let mut t = TextInput::new();
        for c in s.chars() {
            t.handle_key(Key::Char(c));
        }
        t
    }

    #[test]
    fn typing_and_editing() {
        let mut t = typed("bukcet");
        assert_eq!(t.value(), "bukcet");

        // fix the typo in the middle
        for _ in 0..3 {
            t.handle_key(Key::Left);
        }
        t.handle_key(Key::Backspace);
        t.handle_key(Key::Right);
        t.handle_key(Key::Char('k'));
        assert_eq!(t.value(), "bucket");

        t.handle_key(Key::Home);
        t.handle_key(Key::Delete);
        assert_eq!(t.value(), "ucket");
        assert_eq!(t.cursor(), 0);
        t.handle_key(Key::End);
        assert_eq!(t.cursor(), 5);
    }

    #[test]
    fn unicode_and_kill_line() {
        let mut t = typed("ключ");
        assert_eq!(t.cursor(), 4);
        t.handle_key(Key::Left);
        t.handle_key(Key::Ctrl('u'));
        assert_eq!(t.value(), "ч");
        assert!(!t.handle_key(Key::Enter));
    }

    #[test]
    fn set_value_and_render() {
        let mut t = TextInput::new();
        assert_eq!(t.render("Enter name..."), "> █Enter name...");
        t.set_value("abc");
        assert_eq!(t.render(""), "> abc█");
        t.handle_key(Key::Left);
        assert_eq!(t.render(""), "> ab█c");
        t.clear();
        assert_eq!(t.value(), "");
    }
}
