use std::path::Path;

use vn_api::load_script_from_json_map;
use vn_core::{EngineOutput, VnError};
use vn_runtime::VnEngine;

use crate::{
    chapter_lines, create_engine_for_script, current_output, emit_response,
    load_engine_from_state_for_ref, load_player_state, load_source_by_path, load_source_by_ref,
    log_lines, output_lines, resume_engine_for_state, save_engine_state, AgentArgs, AgentCommand,
    ChapterArgs, ChaptersArgs, LogArgs, PlayerSettings, StartArgs, StepArgs,
};

pub(super) fn run_agent(args: AgentArgs) -> Result<i32, VnError> {
    match args.command {
        AgentCommand::Start(args) => run_start(args),
        AgentCommand::Next(args) => run_next(args),
        AgentCommand::Back(args) => run_back(args),
        AgentCommand::Chapter(args) => run_chapter(args),
        AgentCommand::Chapters(args) => run_chapters(args),
        AgentCommand::Log(args) => run_log(args),
    }
}

pub(super) fn run_start(args: StartArgs) -> Result<i32, VnError> {
    let script = load_source_by_path(&args.script)?;
    let settings = PlayerSettings::from(&args.box_args);
    let mut engine = create_engine_for_script(&script, &settings)?;
    let output = engine.start();
    save_and_emit(&engine, &output, &args.state_out, &script.id, &settings)
}

pub(super) fn run_next(args: StepArgs) -> Result<i32, VnError> {
    run_state_transition(&args.state_in, &args.state_out, |engine| {
        Ok(engine.advance())
    })
}

pub(super) fn run_back(args: StepArgs) -> Result<i32, VnError> {
    run_state_transition(&args.state_in, &args.state_out, |engine| {
        Ok(match engine.rewind() {
            Some(rendered) => EngineOutput::Step(rendered),
            None => current_output(engine),
        })
    })
}

pub(super) fn run_chapter(args: ChapterArgs) -> Result<i32, VnError> {
    run_state_transition(&args.state_in, &args.state_out, |engine| {
        match (args.index, args.title.as_deref()) {
            (Some(index), _) => engine.jump_to_chapter(index),
            (None, Some(title)) => engine.jump_to_chapter_title(title),
            (None, None) => Err(VnError::new(
                "CLI_CHAPTER_TARGET",
                "Either --index or --title is required.",
            )),
        }
    })
}

pub(super) fn run_chapters(args: ChaptersArgs) -> Result<i32, VnError> {
    let source = load_source_by_path(&args.script)?;
    let script = load_script_from_json_map(&source.scripts_json)?;
    emit_response(chapter_lines(&script.chapters()), None);
    Ok(0)
}

pub(super) fn run_log(args: LogArgs) -> Result<i32, VnError> {
    let (_script, _state, engine) = load_engine_from_state_for_ref(Path::new(&args.state_in))?;
    emit_response(log_lines(&engine.transcript()), None);
    Ok(0)
}

fn run_state_transition(
    state_in: &str,
    state_out: &str,
    transition: impl FnOnce(&mut VnEngine) -> Result<EngineOutput, VnError>,
) -> Result<i32, VnError> {
    let state = load_player_state(Path::new(state_in))?;
    let script = load_source_by_ref(&state.script_id)?;
    let mut engine = resume_engine_for_state(&script, &state)?;
    let output = transition(&mut engine)?;
    save_and_emit(&engine, &output, state_out, &state.script_id, &state.settings)
}

fn save_and_emit(
    engine: &VnEngine,
    output: &EngineOutput,
    state_out: &str,
    script_id: &str,
    settings: &PlayerSettings,
) -> Result<i32, VnError> {
    save_engine_state(Path::new(state_out), engine, script_id, settings)?;
    emit_response(
        output_lines(output, &engine.script().cast),
        Some(state_out),
    );
    Ok(0)
}
