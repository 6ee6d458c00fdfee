use super::*;
use std::io::Cursor;

use vn_core::EngineOutput;

pub(crate) mod cli_test_support {
    use std::fs;
    use std::path::{Path, PathBuf};
    use std::time::{SystemTime, UNIX_EPOCH};

    pub(crate) fn temp_path(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time should be monotonic")
            .as_nanos();
        std::env::temp_dir().join(format!("vn-cli-{}-{}", name, nanos))
    }

    pub(crate) fn write_file(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("parent should be created");
        }
        fs::write(path, content).expect("file should be written");
    }

    fn demos_root() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("demos")
    }

    pub(crate) fn demo_script_path(name: &str) -> String {
        demos_root().join(name).to_string_lossy().to_string()
    }

    pub(crate) fn demo_script_dir() -> String {
        demos_root().join("story").to_string_lossy().to_string()
    }
}

use cli_test_support::*;

fn run_line_session(script: &LoadedScript, state_file: &str, input: &str) -> String {
    let context = SessionContext {
        state_file,
        script,
        settings: PlayerSettings::default(),
    };
    let mut engine =
        create_engine_for_script(script, &context.settings).expect("engine should build");
    let mut reader = Cursor::new(input.as_bytes().to_vec());
    let mut writer = Vec::new();
    let code = line_tui::run_tui_line_mode_with_io(&context, &mut engine, &mut reader, &mut writer)
        .expect("line mode should run");
    assert_eq!(code, 0);
    String::from_utf8(writer).expect("utf-8 output")
}

#[test]
fn save_and_load_player_state_roundtrip_and_schema_validation() {
    let script = load_source_by_path(&demo_script_path("prologue.json")).expect("script");
    let settings = PlayerSettings {
        columns: 40,
        rows: 2,
        chapter_history: ChapterHistoryArg::Keep,
    };
    let mut engine = create_engine_for_script(&script, &settings).expect("engine");
    engine.start();

    let state_path = temp_path("player-state.json");
    let state = PlayerStateV1 {
        schema_version: PLAYER_STATE_SCHEMA.to_string(),
        script_id: script.id.clone(),
        settings,
        snapshot: engine.snapshot().expect("snapshot"),
    };
    save_player_state(&state_path, &state).expect("save should pass");
    let loaded = load_player_state(&state_path).expect("load should pass");
    assert_eq!(loaded.script_id, script.id);
    assert_eq!(loaded.settings, settings);
    assert_eq!(loaded.snapshot, state.snapshot);

    let one_row = PlayerStateV1 {
        settings: PlayerSettings { rows: 1, ..settings },
        ..state.clone()
    };
    save_player_state(&state_path, &one_row).expect("save should pass");
    let loaded = load_player_state(&state_path).expect("load should pass");
    assert_eq!(loaded.settings.rows, models::MIN_ROWS);

    let bad_schema = PlayerStateV1 {
        schema_version: "player-state.v0".to_string(),
        ..state
    };
    save_player_state(&state_path, &bad_schema).expect("save should pass");
    let error = load_player_state(&state_path).expect_err("schema should be rejected");
    assert_eq!(error.code, "CLI_STATE_SCHEMA");

    write_file(&state_path, "{");
    let error = load_player_state(&state_path).expect_err("invalid json should fail");
    assert_eq!(error.code, "CLI_STATE_INVALID");

    let error =
        load_player_state(&temp_path("missing-state.json")).expect_err("missing should fail");
    assert_eq!(error.code, "CLI_STATE_NOT_FOUND");
}

#[test]
fn player_settings_default_and_clamp_box_args() {
    let settings = PlayerSettings::from(&BoxArgs {
        columns: Some(0),
        rows: None,
        chapter_history: Some(ChapterHistoryArg::Truncate),
    });
    assert_eq!(settings.columns, 1);
    assert_eq!(settings.rows, models::DEFAULT_ROWS);
    assert_eq!(settings.chapter_history, ChapterHistoryArg::Truncate);
    assert_eq!(
        vn_runtime::ChapterHistoryPolicy::from(settings.chapter_history),
        vn_runtime::ChapterHistoryPolicy::TruncateFromTarget
    );

    let one_row = PlayerSettings::from(&BoxArgs {
        columns: None,
        rows: Some(1),
        chapter_history: None,
    });
    assert_eq!(one_row.rows, models::MIN_ROWS);
    assert_eq!(one_row.columns, models::DEFAULT_COLUMNS);
}

#[test]
fn run_cli_agent_commands_return_exit_codes() {
    let state_1 = temp_path("cli-agent-1.json");
    let state_2 = temp_path("cli-agent-2.json");
    let script = demo_script_path("prologue.json");

    let code = run_cli_from_args([
        "vn-cli",
        "agent",
        "start",
        "--script",
        script.as_str(),
        "--state-out",
        state_1.to_str().expect("utf-8 path"),
    ]);
    assert_eq!(code, 0);
    assert!(state_1.exists());

    let code = run_cli_from_args([
        "vn-cli",
        "agent",
        "next",
        "--state-in",
        state_1.to_str().expect("utf-8 path"),
        "--state-out",
        state_2.to_str().expect("utf-8 path"),
    ]);
    assert_eq!(code, 0);
    let state = load_player_state(&state_2).expect("state");
    assert_eq!(state.snapshot.script_index, 2);

    let code = run_cli_from_args([
        "vn-cli",
        "agent",
        "chapter",
        "--state-in",
        state_2.to_str().expect("utf-8 path"),
        "--state-out",
        state_2.to_str().expect("utf-8 path"),
        "--title",
        "Missing",
    ]);
    assert_eq!(code, 1);

    let code = run_cli_from_args(["vn-cli", "agent", "chapters", "--script", script.as_str()]);
    assert_eq!(code, 0);

    let code = run_cli_from_args(["vn-cli", "agent", "next"]);
    assert_ne!(code, 0);
}

#[test]
fn run_cli_play_reports_missing_script() {
    let code = run_cli_from_args([
        "vn-cli",
        "play",
        "--script",
        temp_path("missing-play-script").to_str().expect("utf-8 path"),
    ]);
    assert_eq!(code, 1);
}

#[test]
fn line_mode_steps_back_and_shows_log() {
    let script = load_source_by_path(&demo_script_path("prologue.json")).expect("script");
    let state_file = temp_path("line-mode-state.json");
    let output = run_line_session(
        &script,
        state_file.to_str().expect("utf-8 path"),
        "\n:next\n:back\n:log\n:quit\n",
    );

    assert!(output.starts_with("Harbor Lights\n"));
    assert!(output.contains("The ferry horn sounded twice across the bay."));
    assert!(output.contains("Mira: You actually came."));
    assert!(output.contains("Narrator: The ferry horn sounded twice across the bay."));
    assert!(output.contains("Narrator: Gulls wheeled over the empty pier."));
    assert!(output.trim_end().ends_with("bye"));
}

#[test]
fn line_mode_reports_end_and_unknown_commands() {
    let script = load_source_by_path(&demo_script_path("prologue.json")).expect("script");
    let state_file = temp_path("line-mode-end.json");
    let input = format!("{}:dance\n", "\n".repeat(12));
    let output = run_line_session(&script, state_file.to_str().expect("utf-8 path"), &input);

    assert!(output.contains("(more...)"));
    assert!(output.contains("[bg: harbor_dusk]"));
    assert!(output.contains("[scene: lighthouse_flash] [fx: flash]"));
    assert!(output.contains("[END]"));
    assert!(output.contains("unknown command: :dance"));
}

#[test]
fn line_mode_chapter_commands_and_save_load() {
    let script = load_source_by_path(&demo_script_dir()).expect("script");
    let state_file = temp_path("line-mode-chapters.json");
    let state_str = state_file.to_str().expect("utf-8 path");
    let engine = create_engine_for_script(&script, &PlayerSettings::default()).expect("engine");
    let night = engine
        .chapters()
        .iter()
        .find(|entry| entry.title == "The Long Night")
        .map(|entry| entry.index)
        .expect("chapter should exist");

    let input = format!(":chapters\n:chapter {}\n:save\n:restart\n:load\n:chapter x\n", night);
    let output = run_line_session(&script, state_str, &input);

    assert!(output.starts_with("Harbor Lights: Two Nights\n"));
    assert!(output.contains(&format!("  [{}] The Long Night", night)));
    assert!(output.contains("Hours passed. The lamp turned and turned."));
    assert!(output.contains(&format!("saved: {}", state_str)));
    assert!(output.contains("restarted"));
    assert!(output.contains(&format!("loaded: {}", state_str)));
    assert!(output.contains("error: TUI_CHAPTER_PARSE"));

    let state = load_player_state(&state_file).expect("state");
    assert_eq!(state.snapshot.script_index, night + 1);
}

#[test]
fn handle_line_cmd_does_not_claim_free_text() {
    let script = load_source_by_path(&demo_script_path("prologue.json")).expect("script");
    let context = SessionContext {
        state_file: "unused.json",
        script: &script,
        settings: PlayerSettings::default(),
    };
    let mut engine = create_engine_for_script(&script, &context.settings).expect("engine");
    let mut lines = Vec::new();
    let action = line_tui::handle_line_cmd("hello", &context, &mut engine, &mut |line: String| {
        lines.push(line)
    })
    .expect("command should not fail");
    assert_eq!(action, LineCommandAction::NotHandled);
    assert!(lines.is_empty());

    let action = line_tui::handle_line_cmd(":next", &context, &mut engine, &mut |line: String| {
        lines.push(line)
    })
    .expect("next should work");
    assert_eq!(action, LineCommandAction::Continue);
    assert!(matches!(current_output(&engine), EngineOutput::Step(_)));
}
