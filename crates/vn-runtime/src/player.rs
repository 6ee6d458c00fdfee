use vn_core::{EngineOutput, RenderedStep, Reveal, VnError};

use crate::engine::VnEngine;
use crate::typewriter::Typewriter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerAction {
    Shown(RenderedStep),
    /// A running reveal was completed instead of moving on.
    Completed,
    AtEnd,
    AtStart,
}

/// Engine plus the text reveal in front of it. Input arriving while a page is
/// still being typed finishes the reveal rather than moving the engine, and
/// any navigation cancels a reveal in flight.
pub struct Player {
    engine: VnEngine,
    typewriter: Typewriter,
    current: Option<RenderedStep>,
}

impl Player {
    pub fn new(engine: VnEngine) -> Self {
        let mut player = Self {
            engine,
            typewriter: Typewriter::default(),
            current: None,
        };
        player.sync_from_engine();
        player
    }

    pub fn start(&mut self) -> PlayerAction {
        let output = self.engine.start();
        self.show_output(output)
    }

    pub fn next(&mut self) -> PlayerAction {
        if self.typewriter.skip() {
            return PlayerAction::Completed;
        }
        let output = self.engine.advance();
        self.show_output(output)
    }

    pub fn back(&mut self) -> PlayerAction {
        self.typewriter.skip();
        match self.engine.rewind() {
            Some(rendered) => self.show(rendered),
            None => PlayerAction::AtStart,
        }
    }

    pub fn jump_to_chapter(&mut self, index: usize) -> Result<PlayerAction, VnError> {
        self.typewriter.skip();
        let output = self.engine.jump_to_chapter(index)?;
        Ok(self.show_output(output))
    }

    /// Advances the reveal by one character; returns whether anything changed.
    pub fn tick(&mut self) -> bool {
        self.typewriter.tick()
    }

    pub fn is_typing(&self) -> bool {
        self.typewriter.is_typing()
    }

    pub fn visible_text(&self) -> &str {
        self.typewriter.visible_text()
    }

    pub fn current(&self) -> Option<&RenderedStep> {
        self.current.as_ref()
    }

    pub fn engine(&self) -> &VnEngine {
        &self.engine
    }

    /// Swaps in another engine (restart, load) and shows its current step
    /// without a reveal.
    pub fn replace_engine(&mut self, engine: VnEngine) {
        self.engine = engine;
        self.sync_from_engine();
    }

    fn sync_from_engine(&mut self) {
        self.current = self.engine.current_step().map(|step| RenderedStep {
            step: step.clone(),
            reveal: Reveal::Instant,
            pages_left: self.engine.pages_left(),
        });
        let text = self
            .current
            .as_ref()
            .map(|rendered| rendered.step.text_or_empty())
            .unwrap_or("");
        self.typewriter.show_instant(text);
    }

    fn show_output(&mut self, output: EngineOutput) -> PlayerAction {
        match output {
            EngineOutput::Step(rendered) => self.show(rendered),
            EngineOutput::End => PlayerAction::AtEnd,
        }
    }

    fn show(&mut self, rendered: RenderedStep) -> PlayerAction {
        match rendered.reveal {
            Reveal::Typed => self.typewriter.start(rendered.step.text_or_empty()),
            Reveal::Instant => self.typewriter.show_instant(rendered.step.text_or_empty()),
        }
        self.current = Some(rendered.clone());
        PlayerAction::Shown(rendered)
    }
}
