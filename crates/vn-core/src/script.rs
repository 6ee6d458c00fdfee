use serde::{Deserialize, Serialize};

use crate::cast::Cast;
use crate::types::{ChapterEntry, ScriptLine};

/// On-disk shape of a script file: either a bare list of lines or a document
/// carrying a title and cast table alongside the lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScriptDocument {
    Lines(Vec<ScriptLine>),
    Full {
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        cast: Cast,
        lines: Vec<ScriptLine>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    pub title: Option<String>,
    pub cast: Cast,
    pub lines: Vec<ScriptLine>,
}

impl From<ScriptDocument> for Script {
    fn from(document: ScriptDocument) -> Self {
        match document {
            ScriptDocument::Lines(lines) => Self {
                lines,
                ..Self::default()
            },
            ScriptDocument::Full { title, cast, lines } => Self { title, cast, lines },
        }
    }
}

impl Script {
    pub fn new(lines: Vec<ScriptLine>) -> Self {
        Self {
            lines,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ScriptLine> {
        self.lines.get(index)
    }

    pub fn chapters(&self) -> Vec<ChapterEntry> {
        self.lines
            .iter()
            .enumerate()
            .filter_map(|(index, line)| {
                line.chapter
                    .as_ref()
                    .filter(|title| !title.is_empty())
                    .map(|title| ChapterEntry {
                        index,
                        title: title.clone(),
                    })
            })
            .collect()
    }

    /// Appends another script part; the first title seen wins.
    pub fn append(&mut self, other: Script) {
        if self.title.is_none() {
            self.title = other.title;
        }
        self.cast.merge(other.cast);
        self.lines.extend(other.lines);
    }
}
