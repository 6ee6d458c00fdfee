use super::runtime_test_support::*;
use super::*;

fn lines() -> Vec<vn_core::ScriptLine> {
    vec![
        line(Some("A"), Some("A very long paragraph")),
        line(None, Some("short")),
        line(Some("B"), Some("tail")),
    ]
}

#[test]
fn snapshot_requires_a_started_engine() {
    let engine = engine_from_lines(lines());
    let error = engine.snapshot().expect_err("unstarted snapshot should fail");
    assert_eq!(error.code, "SNAPSHOT_NOT_STARTED");
}

#[test]
fn snapshot_resume_roundtrip_preserves_navigation() {
    let mut engine = paged_engine_from_lines(lines());
    expect_step(engine.advance());
    expect_step(engine.advance());
    let snapshot = engine.snapshot().expect("snapshot");
    assert_eq!(snapshot.schema_version, SNAPSHOT_SCHEMA_V1);

    let mut resumed = paged_engine_from_lines(lines());
    resumed.resume(snapshot).expect("resume");
    assert_eq!(resumed.current_step(), engine.current_step());
    assert_eq!(resumed.pages_left(), engine.pages_left());
    assert_eq!(resumed.history(), engine.history());

    let rewound = resumed.rewind().expect("rewind after resume");
    assert_eq!(rewound.step.text.as_deref(), Some("A very l"));

    let from_original = drive_engine_to_end(&mut engine);
    expect_step(resumed.advance());
    let from_resumed = drive_engine_to_end(&mut resumed);
    assert_eq!(from_original, from_resumed);
}

#[test]
fn snapshot_survives_json_roundtrip() {
    let mut engine = paged_engine_from_lines(lines());
    expect_step(engine.advance());
    let snapshot = engine.snapshot().expect("snapshot");
    let json = serde_json::to_string(&snapshot).expect("serialize");
    let decoded: EngineSnapshot = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(decoded, snapshot);
}

#[test]
fn resume_rejects_unknown_schema() {
    let mut engine = engine_from_lines(lines());
    expect_step(engine.advance());
    let mut snapshot = engine.snapshot().expect("snapshot");
    snapshot.schema_version = "vn-snapshot.v0".to_string();
    let error = engine.resume(snapshot).expect_err("schema should fail");
    assert_eq!(error.code, "SNAPSHOT_SCHEMA");
}

#[test]
fn resume_rejects_snapshot_from_another_script() {
    let mut engine = engine_from_lines(lines());
    expect_step(engine.advance());
    let snapshot = engine.snapshot().expect("snapshot");

    let mut other = engine_from_lines(vec![line(Some("A"), Some("x"))]);
    let error = other.resume(snapshot).expect_err("length mismatch should fail");
    assert_eq!(error.code, "SNAPSHOT_SCRIPT_MISMATCH");
}

#[test]
fn resume_rejects_inconsistent_or_out_of_range_state() {
    let mut engine = engine_from_lines(lines());
    expect_step(engine.advance());
    let snapshot = engine.snapshot().expect("snapshot");

    let mut empty_stack = snapshot.clone();
    empty_stack.back_stack.clear();
    let error = engine.resume(empty_stack).expect_err("empty stack");
    assert_eq!(error.code, "SNAPSHOT_STATE_INCONSISTENT");

    let mut moved = snapshot.clone();
    moved.script_index = 2;
    let error = engine.resume(moved).expect_err("position mismatch");
    assert_eq!(error.code, "SNAPSHOT_STATE_INCONSISTENT");

    let mut out_of_range = snapshot;
    out_of_range.history[0].index = 99;
    let error = engine.resume(out_of_range).expect_err("bad history index");
    assert_eq!(error.code, "SNAPSHOT_INDEX_RANGE");
}
