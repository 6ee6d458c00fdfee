use super::*;

/// Usable box heights at or below this are treated as degenerate and the
/// text is shown unpaginated.
pub const MIN_PAGINATION_HEIGHT: f64 = 60.0;
pub const SNAPSHOT_SCHEMA_V1: &str = "vn-snapshot.v1";

/// What a chapter jump does to the transcript.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChapterHistoryPolicy {
    /// Start the new chapter with an empty log.
    #[default]
    Clear,
    /// Drop entries for lines at or after the jump target.
    TruncateFromTarget,
    /// Leave the log untouched.
    Keep,
}

#[derive(Clone)]
pub struct VnEngineOptions {
    pub script: Script,
    pub measure: Option<Arc<dyn TextMeasure>>,
    pub chapter_history: ChapterHistoryPolicy,
    pub min_pagination_height: f64,
}

impl VnEngineOptions {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            measure: None,
            chapter_history: ChapterHistoryPolicy::default(),
            min_pagination_height: MIN_PAGINATION_HEIGHT,
        }
    }
}

pub struct VnEngine {
    pub(super) script: Script,
    pub(super) chapters: Vec<ChapterEntry>,
    pub(super) measure: Option<Arc<dyn TextMeasure>>,
    pub(super) chapter_history: ChapterHistoryPolicy,
    pub(super) min_pagination_height: f64,

    pub(super) script_index: usize,
    pub(super) page_queue: VecDeque<String>,
    pub(super) back_stack: Vec<BackStackFrame>,
    pub(super) history: Vec<HistoryEntry>,
    pub(super) last_speaker: Option<String>,
}

impl VnEngine {
    pub fn new(options: VnEngineOptions) -> Self {
        let chapters = options.script.chapters();
        Self {
            script: options.script,
            chapters,
            measure: options.measure,
            chapter_history: options.chapter_history,
            min_pagination_height: options.min_pagination_height,
            script_index: 0,
            page_queue: VecDeque::new(),
            back_stack: Vec::new(),
            history: Vec::new(),
            last_speaker: None,
        }
    }

    /// Shows the first step. Does nothing once playback has started.
    pub fn start(&mut self) -> EngineOutput {
        if let Some(frame) = self.back_stack.last() {
            return EngineOutput::Step(RenderedStep {
                step: frame.step.clone(),
                reveal: Reveal::Instant,
                pages_left: self.page_queue.len(),
            });
        }
        self.advance()
    }

    pub fn script(&self) -> &Script {
        &self.script
    }

    pub fn chapters(&self) -> &[ChapterEntry] {
        &self.chapters
    }

    pub fn script_index(&self) -> usize {
        self.script_index
    }

    pub fn pages_left(&self) -> usize {
        self.page_queue.len()
    }

    pub fn back_stack_len(&self) -> usize {
        self.back_stack.len()
    }

    pub fn last_speaker(&self) -> Option<&str> {
        self.last_speaker.as_deref()
    }

    pub fn current_step(&self) -> Option<&ResolvedStep> {
        self.back_stack.last().map(|frame| &frame.step)
    }

    pub fn is_started(&self) -> bool {
        !self.back_stack.is_empty()
    }

    pub fn is_at_end(&self) -> bool {
        self.page_queue.is_empty() && self.script_index >= self.script.len()
    }

    pub fn can_rewind(&self) -> bool {
        self.back_stack.len() > 1
    }

    /// Every visited line, including text-less scene beats.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Log view: visited lines that carry text.
    pub fn transcript(&self) -> Vec<&HistoryEntry> {
        self.history
            .iter()
            .filter(|entry| !entry.text.is_empty())
            .collect()
    }
}
