use super::*;

impl VnEngine {
    /// Steps back to the previously shown page. The restored step is the
    /// cached snapshot, shown instantly; nothing is re-paginated. Returns
    /// `None` when already at the first shown step.
    pub fn rewind(&mut self) -> Option<RenderedStep> {
        if self.back_stack.len() <= 1 {
            return None;
        }

        let current = self.back_stack.pop()?;
        let previous = self.back_stack.last()?;

        if current.script_index != previous.script_index {
            self.history.pop();
            self.last_speaker = previous.step.speaker.clone();
        }

        self.script_index = previous.script_index;
        self.page_queue = previous.page_queue.clone();

        tracing::debug!(
            script_index = self.script_index,
            line = previous.step.script_index,
            depth = self.back_stack.len(),
            "rewind"
        );

        Some(RenderedStep {
            step: previous.step.clone(),
            reveal: Reveal::Instant,
            pages_left: self.page_queue.len(),
        })
    }
}
