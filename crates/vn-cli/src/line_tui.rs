use std::io::{self, BufRead, Write};
use std::path::Path;

use vn_core::{EngineOutput, RenderedStep, VnError};
use vn_runtime::VnEngine;

use crate::{
    create_engine_for_script, load_engine_from_state_for_script, map_tui_io, save_engine_state,
    LineCommandAction, SessionContext,
};

const LINE_HELP: &str =
    "commands: <enter>/:next :back :log :chapters :chapter N :save :load :restart :help :quit";

pub(crate) fn run_tui_line_mode(
    context: &SessionContext<'_>,
    engine: &mut VnEngine,
) -> Result<i32, VnError> {
    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut writer = io::stdout();
    run_tui_line_mode_with_io(context, engine, &mut reader, &mut writer)
}

pub(crate) fn run_tui_line_mode_with_io(
    context: &SessionContext<'_>,
    engine: &mut VnEngine,
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
) -> Result<i32, VnError> {
    let title = engine
        .script()
        .title
        .clone()
        .unwrap_or_else(|| context.script.title.clone());
    writeln!(writer, "{}", title).map_err(map_tui_io)?;
    writeln!(writer, "{}", LINE_HELP).map_err(map_tui_io)?;

    let first = engine.start();
    write_output(writer, &first)?;

    loop {
        let Some(raw) = prompt_input_from("> ", reader, writer)? else {
            return Ok(0);
        };
        let mut lines = Vec::new();
        let mut emit = |line: String| lines.push(line);
        let action = handle_line_cmd(raw.trim(), context, engine, &mut emit);
        for line in lines {
            writeln!(writer, "{}", line).map_err(map_tui_io)?;
        }
        match action {
            Ok(LineCommandAction::Quit) => return Ok(0),
            Ok(LineCommandAction::Continue) => {}
            Ok(LineCommandAction::NotHandled) => {
                writeln!(writer, "unknown command: {}", raw.trim()).map_err(map_tui_io)?;
            }
            Err(error) => {
                writeln!(writer, "error: {}", error).map_err(map_tui_io)?;
            }
        }
    }
}

pub(crate) fn handle_line_cmd(
    raw: &str,
    context: &SessionContext<'_>,
    engine: &mut VnEngine,
    emit: &mut dyn FnMut(String),
) -> Result<LineCommandAction, VnError> {
    if let Some(argument) = raw.strip_prefix(":chapter ") {
        let index = argument.trim().parse::<usize>().map_err(|_| {
            VnError::new(
                "TUI_CHAPTER_PARSE",
                format!("Invalid chapter index: {}", argument.trim()),
            )
        })?;
        let output = engine.jump_to_chapter(index)?;
        emit_output(emit, &output);
        return Ok(LineCommandAction::Continue);
    }

    match raw {
        "" | ":next" => {
            let output = engine.advance();
            emit_output(emit, &output);
            Ok(LineCommandAction::Continue)
        }
        ":back" => {
            match engine.rewind() {
                Some(rendered) => emit_step(emit, &rendered),
                None => emit("(already at the first line)".to_string()),
            }
            Ok(LineCommandAction::Continue)
        }
        ":log" => {
            let transcript = engine.transcript();
            if transcript.is_empty() {
                emit("(log is empty)".to_string());
            }
            for entry in transcript {
                if entry.speaker.is_empty() {
                    emit(entry.text.clone());
                } else {
                    emit(format!("{}: {}", entry.speaker, entry.text));
                }
            }
            Ok(LineCommandAction::Continue)
        }
        ":chapters" => {
            if engine.chapters().is_empty() {
                emit("(no chapters)".to_string());
            }
            for entry in engine.chapters() {
                emit(format!("  [{}] {}", entry.index, entry.title));
            }
            Ok(LineCommandAction::Continue)
        }
        ":help" => {
            emit(LINE_HELP.to_string());
            Ok(LineCommandAction::Continue)
        }
        ":save" => {
            save_engine_state(
                Path::new(context.state_file),
                engine,
                &context.script.id,
                &context.settings,
            )?;
            emit(format!("saved: {}", context.state_file));
            Ok(LineCommandAction::Continue)
        }
        ":load" => {
            let (_state, resumed) =
                load_engine_from_state_for_script(Path::new(context.state_file), context.script)?;
            *engine = resumed;
            emit(format!("loaded: {}", context.state_file));
            emit_output(emit, &crate::current_output(engine));
            Ok(LineCommandAction::Continue)
        }
        ":restart" => {
            let mut restarted = create_engine_for_script(context.script, &context.settings)?;
            let output = restarted.start();
            std::mem::swap(engine, &mut restarted);
            emit("restarted".to_string());
            emit_output(emit, &output);
            Ok(LineCommandAction::Continue)
        }
        ":quit" => {
            emit("bye".to_string());
            Ok(LineCommandAction::Quit)
        }
        _ => Ok(LineCommandAction::NotHandled),
    }
}

pub(crate) fn format_step(rendered: &RenderedStep) -> Vec<String> {
    let step = &rendered.step;
    let mut lines = vec![String::new()];
    let scene = [("bg", &step.bg), ("scene", &step.scene), ("fx", &step.special)]
        .into_iter()
        .filter_map(|(label, value)| value.as_ref().map(|value| format!("[{}: {}]", label, value)))
        .collect::<Vec<_>>();
    if !scene.is_empty() {
        lines.push(scene.join(" "));
    }
    let text = step.text_or_empty();
    if !text.is_empty() {
        match step.display_name() {
            Some(name) => lines.push(format!("{}: {}", name, text)),
            None => lines.push(text.to_string()),
        }
    }
    if rendered.pages_left > 0 {
        lines.push("  (more...)".to_string());
    }
    lines
}

fn emit_step(emit: &mut dyn FnMut(String), rendered: &RenderedStep) {
    for line in format_step(rendered) {
        emit(line);
    }
}

fn emit_output(emit: &mut dyn FnMut(String), output: &EngineOutput) {
    match output {
        EngineOutput::Step(rendered) => emit_step(emit, rendered),
        EngineOutput::End => emit("[END]".to_string()),
    }
}

fn write_output(writer: &mut dyn Write, output: &EngineOutput) -> Result<(), VnError> {
    let mut lines = Vec::new();
    emit_output(&mut |line: String| lines.push(line), output);
    for line in lines {
        writeln!(writer, "{}", line).map_err(map_tui_io)?;
    }
    Ok(())
}

/// Reads one command line. Returns `None` once input is exhausted.
pub(crate) fn prompt_input_from(
    prefix: &str,
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
) -> Result<Option<String>, VnError> {
    write!(writer, "{}", prefix).map_err(map_tui_io)?;
    writer.flush().map_err(map_tui_io)?;
    let mut input = String::new();
    if reader.read_line(&mut input).map_err(map_tui_io)? == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim_end_matches(&['\r', '\n'][..]).to_string()))
}
