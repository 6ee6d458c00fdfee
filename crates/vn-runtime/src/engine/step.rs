use super::*;

impl VnEngine {
    /// Moves one step forward: the next queued page of the current line, or
    /// else the next script line. At the end of the script this is a no-op
    /// that reports [`EngineOutput::End`].
    pub fn advance(&mut self) -> EngineOutput {
        let step = match self.next_queued_page() {
            Some(step) => step,
            None => match self.load_next_line() {
                Some(step) => step,
                None => return EngineOutput::End,
            },
        };

        tracing::debug!(
            script_index = self.script_index,
            line = step.script_index,
            continuation = step.is_continuation,
            pages_left = self.page_queue.len(),
            "advance"
        );

        self.back_stack.push(BackStackFrame {
            script_index: self.script_index,
            page_queue: self.page_queue.clone(),
            step: step.clone(),
        });

        EngineOutput::Step(RenderedStep {
            step,
            reveal: Reveal::Typed,
            pages_left: self.page_queue.len(),
        })
    }

    fn next_queued_page(&mut self) -> Option<ResolvedStep> {
        let previous = self.back_stack.last()?;
        let page = self.page_queue.pop_front()?;
        Some(previous.step.with_page(page))
    }

    fn load_next_line(&mut self) -> Option<ResolvedStep> {
        let line = self.script.get(self.script_index)?.clone();
        let index = self.script_index;
        self.script_index += 1;
        self.page_queue.clear();

        let speaker = match line.explicit_speaker() {
            Some(speaker) => Some(speaker.to_string()),
            None => self.last_speaker.clone(),
        };
        self.last_speaker = speaker.clone();

        self.history.push(HistoryEntry {
            index,
            speaker: speaker.clone().unwrap_or_default(),
            text: line.text.clone().unwrap_or_default(),
        });

        let mut step = ResolvedStep::from_line(index, &line, speaker);
        if let Some(text) = line.text.as_deref().filter(|text| !text.is_empty()) {
            let mut pages = VecDeque::from(self.paginate_text(text));
            step.text = pages.pop_front();
            self.page_queue = pages;
        }
        Some(step)
    }

    fn paginate_text(&self, text: &str) -> Vec<String> {
        let Some(measure) = &self.measure else {
            return vec![text.to_string()];
        };
        let height = measure.box_height();
        if height.is_nan() || height <= self.min_pagination_height {
            return vec![text.to_string()];
        }
        paginate(text, height, measure.as_ref())
    }
}
