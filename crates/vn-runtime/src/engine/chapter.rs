use super::*;

impl VnEngine {
    /// Jumps to `index` and shows its line. The jump discards the back stack,
    /// so it cannot be rewound past.
    pub fn jump_to_chapter(&mut self, index: usize) -> Result<EngineOutput, VnError> {
        if index >= self.script.len() {
            return Err(VnError::new(
                "ENGINE_CHAPTER_OUT_OF_RANGE",
                format!(
                    "Chapter index {} is outside the script ({} lines).",
                    index,
                    self.script.len()
                ),
            ));
        }

        self.script_index = index;
        self.page_queue.clear();
        self.back_stack.clear();
        self.last_speaker = None;
        match self.chapter_history {
            ChapterHistoryPolicy::Clear => self.history.clear(),
            ChapterHistoryPolicy::TruncateFromTarget => {
                self.history.retain(|entry| entry.index < index)
            }
            ChapterHistoryPolicy::Keep => {}
        }

        tracing::debug!(index, policy = ?self.chapter_history, "chapter jump");
        Ok(self.advance())
    }

    pub fn jump_to_chapter_title(&mut self, title: &str) -> Result<EngineOutput, VnError> {
        let Some(index) = self
            .chapters
            .iter()
            .find(|entry| entry.title == title)
            .map(|entry| entry.index)
        else {
            return Err(VnError::new(
                "ENGINE_CHAPTER_NOT_FOUND",
                format!("No chapter titled \"{}\".", title),
            ));
        };
        self.jump_to_chapter(index)
    }
}
