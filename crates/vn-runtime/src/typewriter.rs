/// Delay between revealed characters.
pub const TYPING_SPEED_MS: u64 = 40;

/// Character-by-character reveal of one page of text. Driven by the host's
/// timer through [`Typewriter::tick`]; holds no timer of its own.
#[derive(Debug, Clone, Default)]
pub struct Typewriter {
    full_text: String,
    total_chars: usize,
    revealed_chars: usize,
}

impl Typewriter {
    pub fn start(&mut self, text: &str) {
        self.full_text = text.to_string();
        self.total_chars = text.chars().count();
        self.revealed_chars = 0;
    }

    /// Shows `text` fully at once.
    pub fn show_instant(&mut self, text: &str) {
        self.start(text);
        self.revealed_chars = self.total_chars;
    }

    pub fn is_typing(&self) -> bool {
        self.revealed_chars < self.total_chars
    }

    /// Reveals one more character. Returns false when nothing changed.
    pub fn tick(&mut self) -> bool {
        if !self.is_typing() {
            return false;
        }
        self.revealed_chars += 1;
        true
    }

    /// Completes the reveal immediately. Returns whether a reveal was running.
    pub fn skip(&mut self) -> bool {
        let was_typing = self.is_typing();
        self.revealed_chars = self.total_chars;
        was_typing
    }

    pub fn visible_text(&self) -> &str {
        match self.full_text.char_indices().nth(self.revealed_chars) {
            Some((offset, _)) => &self.full_text[..offset],
            None => &self.full_text,
        }
    }

    pub fn full_text(&self) -> &str {
        &self.full_text
    }
}
