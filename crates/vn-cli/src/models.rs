use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use vn_core::EngineSnapshot;

use crate::{BoxArgs, ChapterHistoryArg};

pub(crate) const PLAYER_STATE_SCHEMA: &str = "player-state.v1";
pub(crate) const DEFAULT_STATE_FILE: &str = ".vn/save.json";
pub(crate) const DEFAULT_COLUMNS: usize = 60;
pub(crate) const DEFAULT_ROWS: usize = 3;
/// A one-row grid falls under the engine's pagination threshold, which would
/// hand the box a whole line it cannot show.
pub(crate) const MIN_ROWS: usize = 2;

#[derive(Debug, Clone)]
pub(crate) struct LoadedScript {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) scripts_json: BTreeMap<String, String>,
}

/// Settings that must match between the run that saved a state and the run
/// that resumes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PlayerSettings {
    pub(crate) columns: usize,
    pub(crate) rows: usize,
    #[serde(default)]
    pub(crate) chapter_history: ChapterHistoryArg,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            rows: DEFAULT_ROWS,
            chapter_history: ChapterHistoryArg::default(),
        }
    }
}

impl PlayerSettings {
    pub(crate) fn clamped(self) -> Self {
        Self {
            columns: self.columns.max(1),
            rows: self.rows.max(MIN_ROWS),
            ..self
        }
    }
}

impl From<&BoxArgs> for PlayerSettings {
    fn from(args: &BoxArgs) -> Self {
        let defaults = Self::default();
        Self {
            columns: args.columns.unwrap_or(defaults.columns),
            rows: args.rows.unwrap_or(defaults.rows),
            chapter_history: args.chapter_history.unwrap_or(defaults.chapter_history),
        }
        .clamped()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PlayerStateV1 {
    pub(crate) schema_version: String,
    pub(crate) script_id: String,
    pub(crate) settings: PlayerSettings,
    pub(crate) snapshot: EngineSnapshot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineCommandAction {
    NotHandled,
    Continue,
    Quit,
}

pub(crate) struct SessionContext<'a> {
    pub(crate) state_file: &'a str,
    pub(crate) script: &'a LoadedScript,
    pub(crate) settings: PlayerSettings,
}
