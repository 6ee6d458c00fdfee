use vn_runtime::PlayerAction;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum Overlay {
    #[default]
    None,
    Log,
    Chapters,
}

#[derive(Debug, Default)]
pub(crate) struct TuiUiState {
    pub(crate) overlay: Overlay,
    pub(crate) chapter_cursor: usize,
    pub(crate) log_scroll: usize,
    /// Transcript rows the log view showed on the last draw.
    pub(crate) log_rows: usize,
    pub(crate) ended: bool,
    pub(crate) help_visible: bool,
    pub(crate) status: String,
}

impl TuiUiState {
    pub(crate) fn note_action(&mut self, action: &PlayerAction) {
        match action {
            PlayerAction::Shown(_) => {
                self.ended = false;
                self.status.clear();
            }
            PlayerAction::Completed => {}
            PlayerAction::AtEnd => {
                self.ended = true;
                self.status = "end of script".to_string();
            }
            PlayerAction::AtStart => {
                self.status = "already at the first line".to_string();
            }
        }
    }

    pub(crate) fn open_chapters(&mut self, chapter_count: usize) {
        if chapter_count == 0 {
            self.status = "no chapters".to_string();
            return;
        }
        self.overlay = Overlay::Chapters;
        self.chapter_cursor = self.chapter_cursor.min(chapter_count - 1);
    }

    /// Opens the log scrolled to its newest entries.
    pub(crate) fn open_log(&mut self) {
        self.overlay = Overlay::Log;
        self.log_scroll = 0;
    }

    pub(crate) fn close_overlay(&mut self) {
        self.overlay = Overlay::None;
    }

    /// `item_count` is the length of the list behind the open overlay.
    pub(crate) fn move_up(&mut self, item_count: usize) {
        match self.overlay {
            Overlay::Chapters => self.chapter_cursor = self.chapter_cursor.saturating_sub(1),
            Overlay::Log => {
                let oldest = item_count.saturating_sub(self.log_rows);
                self.log_scroll = (self.log_scroll + 1).min(oldest);
            }
            Overlay::None => {}
        }
    }

    pub(crate) fn move_down(&mut self, item_count: usize) {
        match self.overlay {
            Overlay::Chapters => {
                let last = item_count.saturating_sub(1);
                self.chapter_cursor = (self.chapter_cursor + 1).min(last);
            }
            Overlay::Log => self.log_scroll = self.log_scroll.saturating_sub(1),
            Overlay::None => {}
        }
    }

    /// Resets per-session view state after restart or load.
    pub(crate) fn reset_view(&mut self) {
        self.overlay = Overlay::None;
        self.chapter_cursor = 0;
        self.log_scroll = 0;
        self.ended = false;
    }
}
