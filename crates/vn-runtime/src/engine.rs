use std::collections::VecDeque;
use std::sync::Arc;

use vn_core::{
    BackStackFrame, ChapterEntry, EngineOutput, EngineSnapshot, HistoryEntry, RenderedStep,
    ResolvedStep, Reveal, Script, VnError,
};

use crate::measure::TextMeasure;
use crate::paginate::paginate;

mod chapter;
mod lifecycle;
mod rewind;
mod snapshot;
mod step;

pub use lifecycle::{
    ChapterHistoryPolicy, VnEngine, VnEngineOptions, MIN_PAGINATION_HEIGHT, SNAPSHOT_SCHEMA_V1,
};


#[cfg(test)]
mod snapshot_tests;
