/// Endless cursor over the characters of the mosaic text.
///
/// Advances by one character per drawn glyph and wraps after the last one.
#[derive(Clone, Debug)]
pub struct TextCursor {
    chars: Vec<char>,
    position: usize,
    consumed: usize,
}

impl TextCursor {
    /// Returns `None` for empty text, which has nothing to cycle over.
    pub fn new(text: &str) -> Option<Self> {
        let chars: Vec<char> = text.chars().collect();
        if chars.is_empty() {
            return None;
        }
        Some(Self { chars, position: 0, consumed: 0 })
    }

    pub fn next_char(&mut self) -> char {
        let ch = self.chars[self.position];
        self.position = (self.position + 1) % self.chars.len();
        self.consumed += 1;
        ch
    }

    /// Index of the character the next call to [`TextCursor::next_char`] returns.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Total characters handed out, counting wraps.
    pub fn consumed(&self) -> usize {
        self.consumed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_has_no_cursor() {
        assert!(TextCursor::new("").is_none());
    }

    #[test]
    fn wraps_after_last_char() {
        let mut cursor = TextCursor::new("AB").unwrap();
        let drawn: String = (0..5).map(|_| cursor.next_char()).collect();
        assert_eq!(drawn, "ABABA");
        assert_eq!(cursor.position(), 1);
        assert_eq!(cursor.consumed(), 5);
    }

    #[test]
    fn cycles_by_char_not_byte() {
        let mut cursor = TextCursor::new("é→").unwrap();
        let drawn: String = (0..3).map(|_| cursor.next_char()).collect();
        assert_eq!(drawn, "é→é");
    }

    #[test]
    fn fresh_cursor_has_consumed_nothing() {
        let cursor = TextCursor::new("xyz").unwrap();
        assert_eq!((cursor.position(), cursor.consumed()), (0, 0));
    }
}
