use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{ResolvedStep, NARRATOR};

pub const DEFAULT_EMOTION: &str = "normal";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Side {
    #[default]
    Left,
    Right,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterDef {
    #[serde(default)]
    pub name_color: Option<String>,
    #[serde(default)]
    pub side: Side,
    #[serde(default)]
    pub sprites: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Portrait<'a> {
    pub sprite: &'a str,
    pub side: Side,
}

/// Speaker table. Lookups never fail: unknown speakers or emotions simply
/// resolve to no portrait.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cast {
    pub characters: BTreeMap<String, CharacterDef>,
}

impl Cast {
    pub fn get(&self, speaker: &str) -> Option<&CharacterDef> {
        if speaker == NARRATOR {
            return None;
        }
        self.characters.get(speaker)
    }

    pub fn portrait_for(&self, step: &ResolvedStep) -> Option<Portrait<'_>> {
        if step.clear_chars {
            return None;
        }
        let character = self.get(step.speaker.as_deref()?)?;
        let emotion = step.emotion.as_deref().unwrap_or(DEFAULT_EMOTION);
        let sprite = character.sprites.get(emotion)?;
        Some(Portrait {
            sprite: sprite.as_str(),
            side: character.side,
        })
    }

    pub fn name_color(&self, speaker: &str) -> Option<&str> {
        self.get(speaker)?.name_color.as_deref()
    }

    /// Adds characters from `other`; entries already present are kept.
    pub fn merge(&mut self, other: Cast) {
        for (name, character) in other.characters {
            self.characters.entry(name).or_insert(character);
        }
    }
}
