use std::ffi::OsString;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use vn_core::VnError;

mod agent;
mod cli_args;
mod error_map;
mod line_tui;
mod models;
mod session_ops;
mod source_loader;
mod state_store;
mod step_emitter;
mod tui;
mod tui_actions;
mod tui_render;
mod tui_state;

pub(crate) use cli_args::{
    AgentArgs, AgentCommand, BoxArgs, ChapterArgs, ChapterHistoryArg, ChaptersArgs, Cli, LogArgs,
    Mode, PlayArgs, StartArgs, StepArgs,
};
pub(crate) use error_map::{
    emit_error, json_string, map_cli_source_path, map_cli_source_read, map_cli_source_scan,
    map_cli_state_encode, map_cli_state_invalid, map_cli_state_read, map_cli_state_write,
    map_tui_io,
};
pub(crate) use line_tui::run_tui_line_mode;
pub(crate) use models::{
    LineCommandAction, LoadedScript, PlayerSettings, PlayerStateV1, SessionContext,
    DEFAULT_STATE_FILE, PLAYER_STATE_SCHEMA,
};
pub(crate) use session_ops::{
    create_engine_for_script, current_output, load_engine_from_state_for_ref,
    load_engine_from_state_for_script, resume_engine_for_state, save_engine_state,
};
pub(crate) use source_loader::{load_source_by_path, load_source_by_ref};
pub(crate) use state_store::{load_player_state, save_player_state};
pub(crate) use step_emitter::{chapter_lines, emit_response, log_lines, output_lines};

/// Log filter variable; stdout carries the agent protocol so logs go to stderr.
const LOG_ENV: &str = "VN_LOG";

pub fn run_cli_from_args<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(error) => {
            let _ = error.print();
            return error.exit_code();
        }
    };
    init_tracing();
    match run(cli) {
        Ok(code) => code,
        Err(error) => emit_error(error),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run(cli: Cli) -> Result<i32, VnError> {
    match cli.command {
        Mode::Agent(args) => agent::run_agent(args),
        Mode::Play(args) => run_play(args),
    }
}

fn run_play(args: PlayArgs) -> Result<i32, VnError> {
    let state_file = args
        .state_file
        .unwrap_or_else(|| DEFAULT_STATE_FILE.to_string());
    let script = load_source_by_path(&args.script)?;
    let settings = PlayerSettings::from(&args.box_args);
    let engine = create_engine_for_script(&script, &settings)?;
    let context = SessionContext {
        state_file: &state_file,
        script: &script,
        settings,
    };

    tui::run_tui_ratatui_mode(&context, engine)
}

#[cfg(test)]
mod tests;
#[cfg(test)]
pub(crate) use tests::cli_test_support;
