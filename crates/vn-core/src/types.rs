use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Speaker sentinel for narration: no name plate, no portrait.
pub const NARRATOR: &str = "Narrator";

/// One authored script entry. Every field is optional; a line with neither
/// speaker nor text is a pure scene beat.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptLine {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chapter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

impl ScriptLine {
    /// Explicit speaker tag, treating an empty string as absent.
    pub fn explicit_speaker(&self) -> Option<&str> {
        self.speaker.as_deref().filter(|speaker| !speaker.is_empty())
    }

    pub fn has_text(&self) -> bool {
        self.text.as_deref().is_some_and(|text| !text.is_empty())
    }
}

/// A renderable unit: one page of one script line with its speaker resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedStep {
    pub script_index: usize,
    pub speaker: Option<String>,
    pub text: Option<String>,
    pub emotion: Option<String>,
    pub bg: Option<String>,
    pub scene: Option<String>,
    pub chapter: Option<String>,
    pub special: Option<String>,
    pub position: Option<String>,
    pub is_continuation: bool,
    pub clear_chars: bool,
}

impl ResolvedStep {
    pub fn from_line(script_index: usize, line: &ScriptLine, speaker: Option<String>) -> Self {
        let clear_chars = speaker
            .as_deref()
            .map_or(true, |speaker| speaker == NARRATOR);
        Self {
            script_index,
            speaker,
            text: line.text.clone(),
            emotion: line.emotion.clone(),
            bg: line.bg.clone(),
            scene: line.scene.clone(),
            chapter: line.chapter.clone(),
            special: line.special.clone(),
            position: line.position.clone(),
            is_continuation: false,
            clear_chars,
        }
    }

    /// Same step showing a later page of its line.
    pub fn with_page(&self, page: String) -> Self {
        Self {
            text: Some(page),
            is_continuation: true,
            ..self.clone()
        }
    }

    /// Name shown on the name plate; narration and missing speakers show none.
    pub fn display_name(&self) -> Option<&str> {
        self.speaker
            .as_deref()
            .filter(|speaker| !speaker.is_empty() && *speaker != NARRATOR)
    }

    pub fn text_or_empty(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}

/// Transcript record, one per visited script line (full text, not per page).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub index: usize,
    pub speaker: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterEntry {
    pub index: usize,
    pub title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Reveal {
    Typed,
    Instant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedStep {
    pub step: ResolvedStep,
    pub reveal: Reveal,
    pub pages_left: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineOutput {
    Step(RenderedStep),
    End,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackStackFrame {
    pub script_index: usize,
    pub page_queue: VecDeque<String>,
    pub step: ResolvedStep,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineSnapshot {
    pub schema_version: String,
    pub script_len: usize,
    pub script_index: usize,
    pub page_queue: VecDeque<String>,
    pub back_stack: Vec<BackStackFrame>,
    pub history: Vec<HistoryEntry>,
    pub last_speaker: Option<String>,
}
