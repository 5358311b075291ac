use std::sync::Arc;

/// A character cursor over an input string.
///
/// Cloning is cheap (the characters are shared), so callers can save a cursor, try something
/// and restore it afterwards.
#[derive(Debug, Clone)]
pub struct Cursor {
    chars: Arc<[char]>,
    /// Number of characters consumed so far.
    position: usize,
}

impl Cursor {
    pub fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            position: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Moves the cursor to an earlier (or later) saved position.
    pub fn set_position(&mut self, position: usize) {
        self.position = position.min(self.chars.len());
    }

    pub fn has_next(&self) -> bool {
        self.position < self.chars.len()
    }

    pub fn has_previous(&self) -> bool {
        self.position > 1
    }

    pub fn next(&mut self) -> Option<char> {
        let c = self.chars.get(self.position).copied()?;
        self.position += 1;
        Some(c)
    }

    /// Steps back one character, returning the character that is now current.
    pub fn previous(&mut self) -> Option<char> {
        if !self.has_previous() {
            return None;
        }

        self.position -= 1;
        self.peek()
    }

    /// The most recently consumed character.
    pub fn peek(&self) -> Option<char> {
        self.position.checked_sub(1).and_then(|i| self.chars.get(i).copied())
    }

    pub fn peek_next(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    pub fn peek_previous(&self) -> Option<char> {
        self.position.checked_sub(2).and_then(|i| self.chars.get(i).copied())
    }

    /// Consumes up to `amount` characters. Returns an empty string at the end of the input.
    pub fn consume_number(&mut self, amount: usize) -> String {
        let end = (self.position + amount).min(self.chars.len());
        let out = self.chars[self.position..end].iter().collect();
        self.position = end;
        out
    }

    pub fn consume_remaining(&mut self) -> String {
        self.consume_number(self.chars.len() - self.position)
    }

    /// Consumes characters while `predicate` holds. Returns `None` if nothing matched.
    pub fn consume_while(&mut self, predicate: impl Fn(char) -> bool) -> Option<String> {
        let mut result: Option<String> = None;

        while let Some(c) = self.peek_next() {
            if !predicate(c) {
                break;
            }

            result.get_or_insert_with(String::new).push(c);
            self.position += 1;
        }

        result
    }

    /// Skips immediate spaces. Returns whether anything was skipped.
    pub fn skip_whitespace(&mut self) -> bool {
        if self.peek_next() != Some(' ') {
            return false;
        }

        while self.peek_next() == Some(' ') {
            self.position += 1;
        }

        true
    }
}
