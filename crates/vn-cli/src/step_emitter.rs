use vn_core::{Cast, ChapterEntry, EngineOutput, HistoryEntry, Reveal, Side};

use crate::json_string;

pub(crate) fn output_lines(output: &EngineOutput, cast: &Cast) -> Vec<String> {
    let EngineOutput::Step(rendered) = output else {
        return vec!["EVENT:END".to_string()];
    };
    let step = &rendered.step;

    let mut lines = vec!["EVENT:STEP".to_string()];
    lines.push(format!("INDEX:{}", step.script_index));
    lines.push(format!(
        "SPEAKER_JSON:{}",
        step.speaker
            .as_deref()
            .map(json_string)
            .unwrap_or_else(|| "null".to_string())
    ));
    lines.push(format!("TEXT_JSON:{}", json_string(step.text_or_empty())));
    for (key, value) in [
        ("BG", &step.bg),
        ("SCENE", &step.scene),
        ("EMOTION", &step.emotion),
        ("SPECIAL", &step.special),
    ] {
        if let Some(value) = value {
            lines.push(format!("{}:{}", key, value));
        }
    }
    if let Some(portrait) = cast.portrait_for(step) {
        let side = match portrait.side {
            Side::Left => "left",
            Side::Right => "right",
        };
        lines.push(format!("PORTRAIT:{}|{}", portrait.sprite, side));
    }
    lines.push(format!("CONTINUATION:{}", step.is_continuation));
    lines.push(format!("PAGES_LEFT:{}", rendered.pages_left));
    lines.push(format!(
        "REVEAL:{}",
        match rendered.reveal {
            Reveal::Typed => "typed",
            Reveal::Instant => "instant",
        }
    ));
    lines
}

pub(crate) fn log_lines(entries: &[&HistoryEntry]) -> Vec<String> {
    entries
        .iter()
        .map(|entry| {
            format!(
                "LOG:{}|{}",
                json_string(&entry.speaker),
                json_string(&entry.text)
            )
        })
        .collect()
}

pub(crate) fn chapter_lines(chapters: &[ChapterEntry]) -> Vec<String> {
    chapters
        .iter()
        .map(|entry| format!("CHAPTER:{}|{}", entry.index, json_string(&entry.title)))
        .collect()
}

/// Prints one agent response: `RESULT:OK`, the body lines, then `STATE_OUT`.
pub(crate) fn emit_response(body: Vec<String>, state_out: Option<&str>) {
    println!("RESULT:OK");
    for line in body {
        println!("{}", line);
    }
    println!("STATE_OUT:{}", state_out.unwrap_or("NONE"));
}
