use std::collections::BTreeMap;
use std::sync::Arc;

use vn_core::{EngineSnapshot, Script, ScriptDocument, VnError};
use vn_runtime::{ChapterHistoryPolicy, TextMeasure, VnEngine, VnEngineOptions};

#[derive(Clone)]
pub struct CreateEngineFromJsonOptions {
    pub scripts_json: BTreeMap<String, String>,
    pub measure: Option<Arc<dyn TextMeasure>>,
    pub chapter_history: ChapterHistoryPolicy,
}

#[derive(Clone)]
pub struct ResumeEngineFromJsonOptions {
    pub scripts_json: BTreeMap<String, String>,
    pub snapshot: EngineSnapshot,
    pub measure: Option<Arc<dyn TextMeasure>>,
    pub chapter_history: ChapterHistoryPolicy,
}

pub fn parse_script_json(path: &str, raw: &str) -> Result<Script, VnError> {
    let document: ScriptDocument = serde_json::from_str(raw).map_err(|error| {
        VnError::new(
            "SCRIPT_JSON_INVALID",
            format!("Invalid script \"{}\": {}", path, error),
        )
    })?;
    Ok(Script::from(document))
}

/// Parses every script part and concatenates them in path order.
pub fn load_script_from_json_map(
    scripts_json: &BTreeMap<String, String>,
) -> Result<Script, VnError> {
    let mut script = Script::default();
    for (path, raw) in scripts_json {
        script.append(parse_script_json(path, raw)?);
    }

    if script.is_empty() {
        return Err(VnError::new(
            "SCRIPT_EMPTY",
            "Script sources contain no lines.",
        ));
    }

    tracing::debug!(
        parts = scripts_json.len(),
        lines = script.len(),
        chapters = script.chapters().len(),
        "loaded script"
    );
    Ok(script)
}

/// Builds an engine that has not shown anything yet; call `start()` on it.
pub fn create_engine_from_json(
    options: CreateEngineFromJsonOptions,
) -> Result<VnEngine, VnError> {
    let script = load_script_from_json_map(&options.scripts_json)?;
    Ok(VnEngine::new(VnEngineOptions {
        measure: options.measure,
        chapter_history: options.chapter_history,
        ..VnEngineOptions::new(script)
    }))
}

pub fn resume_engine_from_json(
    options: ResumeEngineFromJsonOptions,
) -> Result<VnEngine, VnError> {
    let mut engine = create_engine_from_json(CreateEngineFromJsonOptions {
        scripts_json: options.scripts_json,
        measure: options.measure,
        chapter_history: options.chapter_history,
    })?;
    engine.resume(options.snapshot)?;
    Ok(engine)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vn_core::EngineOutput;
    use vn_runtime::GridMeasure;

    fn map(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn create(scripts_json: BTreeMap<String, String>) -> Result<VnEngine, VnError> {
        create_engine_from_json(CreateEngineFromJsonOptions {
            scripts_json,
            measure: None,
            chapter_history: ChapterHistoryPolicy::default(),
        })
    }

    #[test]
    fn parse_script_json_reports_path_on_error() {
        let error = parse_script_json("broken.json", "{").expect_err("invalid json");
        assert_eq!(error.code, "SCRIPT_JSON_INVALID");
        assert!(error.message.contains("broken.json"));
    }

    #[test]
    fn load_script_from_json_map_concatenates_parts_in_path_order() {
        let scripts = map(&[
            (
                "02-act.json",
                r#"[{"chapter":"Act","speaker":"B","text":"act"}]"#,
            ),
            (
                "01-prologue.json",
                r#"{"title":"Demo","lines":[{"chapter":"Prologue","speaker":"A","text":"hi"}]}"#,
            ),
        ]);
        let script = load_script_from_json_map(&scripts).expect("load should pass");
        assert_eq!(script.title.as_deref(), Some("Demo"));
        let titles = script
            .chapters()
            .into_iter()
            .map(|entry| entry.title)
            .collect::<Vec<_>>();
        assert_eq!(titles, vec!["Prologue".to_string(), "Act".to_string()]);
    }

    #[test]
    fn load_script_from_json_map_rejects_empty_sources() {
        let error = load_script_from_json_map(&map(&[("empty.json", "[]")]))
            .expect_err("no lines should fail");
        assert_eq!(error.code, "SCRIPT_EMPTY");

        let error =
            load_script_from_json_map(&BTreeMap::new()).expect_err("no files should fail");
        assert_eq!(error.code, "SCRIPT_EMPTY");
    }

    #[test]
    fn create_engine_from_json_builds_unstarted_engine() {
        let mut engine = create(map(&[(
            "main.json",
            r#"[{"speaker":"A","text":"Hello"},{"text":"again"}]"#,
        )]))
        .expect("engine should build");
        assert!(!engine.is_started());

        let EngineOutput::Step(first) = engine.start() else {
            panic!("first step expected");
        };
        assert_eq!(first.step.text.as_deref(), Some("Hello"));
    }

    #[test]
    fn resume_engine_from_json_restores_position() {
        let scripts = map(&[(
            "main.json",
            r#"[{"speaker":"A","text":"abcdefghijkl"},{"text":"two"}]"#,
        )]);
        let measure: Arc<dyn TextMeasure> = Arc::new(GridMeasure::new(4, 2));
        let mut engine = create_engine_from_json(CreateEngineFromJsonOptions {
            scripts_json: scripts.clone(),
            measure: Some(measure.clone()),
            chapter_history: ChapterHistoryPolicy::default(),
        })
        .expect("engine should build");
        engine.start();
        let snapshot = engine.snapshot().expect("snapshot should succeed");

        let mut resumed = resume_engine_from_json(ResumeEngineFromJsonOptions {
            scripts_json: scripts,
            snapshot,
            measure: Some(measure),
            chapter_history: ChapterHistoryPolicy::default(),
        })
        .expect("resume should succeed");
        assert_eq!(resumed.pages_left(), 1);
        let EngineOutput::Step(next) = resumed.advance() else {
            panic!("second page expected");
        };
        assert_eq!(next.step.text.as_deref(), Some("ijkl"));
    }
}
