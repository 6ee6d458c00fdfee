use std::path::Path;
use std::sync::Arc;

use vn_api::{
    create_engine_from_json, resume_engine_from_json, CreateEngineFromJsonOptions,
    ResumeEngineFromJsonOptions,
};
use vn_core::{EngineOutput, RenderedStep, Reveal, VnError};
use vn_runtime::{GridMeasure, TextMeasure, VnEngine};

use crate::{
    load_player_state, load_source_by_ref, save_player_state, LoadedScript, PlayerSettings,
    PlayerStateV1, PLAYER_STATE_SCHEMA,
};

pub(crate) fn measure_for(settings: &PlayerSettings) -> Arc<dyn TextMeasure> {
    Arc::new(GridMeasure::new(settings.columns, settings.rows))
}

pub(crate) fn create_engine_for_script(
    script: &LoadedScript,
    settings: &PlayerSettings,
) -> Result<VnEngine, VnError> {
    create_engine_from_json(CreateEngineFromJsonOptions {
        scripts_json: script.scripts_json.clone(),
        measure: Some(measure_for(settings)),
        chapter_history: settings.chapter_history.into(),
    })
}

pub(crate) fn resume_engine_for_state(
    script: &LoadedScript,
    state: &PlayerStateV1,
) -> Result<VnEngine, VnError> {
    resume_engine_from_json(ResumeEngineFromJsonOptions {
        scripts_json: script.scripts_json.clone(),
        snapshot: state.snapshot.clone(),
        measure: Some(measure_for(&state.settings)),
        chapter_history: state.settings.chapter_history.into(),
    })
}

pub(crate) fn save_engine_state(
    path: &Path,
    engine: &VnEngine,
    script_id: &str,
    settings: &PlayerSettings,
) -> Result<(), VnError> {
    let state = PlayerStateV1 {
        schema_version: PLAYER_STATE_SCHEMA.to_string(),
        script_id: script_id.to_string(),
        settings: *settings,
        snapshot: engine.snapshot()?,
    };
    save_player_state(path, &state)
}

pub(crate) fn load_engine_from_state_for_ref(
    path: &Path,
) -> Result<(LoadedScript, PlayerStateV1, VnEngine), VnError> {
    let state = load_player_state(path)?;
    let script = load_source_by_ref(&state.script_id)?;
    let engine = resume_engine_for_state(&script, &state)?;
    Ok((script, state, engine))
}

pub(crate) fn load_engine_from_state_for_script(
    path: &Path,
    script: &LoadedScript,
) -> Result<(PlayerStateV1, VnEngine), VnError> {
    let state = load_player_state(path)?;
    if state.script_id != script.id {
        return Err(VnError::new(
            "TUI_STATE_SCRIPT_MISMATCH",
            format!(
                "State script mismatch. expected={} actual={}",
                script.id, state.script_id
            ),
        ));
    }
    let engine = resume_engine_for_state(script, &state)?;
    Ok((state, engine))
}

/// The step currently on screen, shown again without a reveal.
pub(crate) fn current_output(engine: &VnEngine) -> EngineOutput {
    match engine.current_step() {
        Some(step) => EngineOutput::Step(RenderedStep {
            step: step.clone(),
            reveal: Reveal::Instant,
            pages_left: engine.pages_left(),
        }),
        None => EngineOutput::End,
    }
}
