// crates/story-spoiler-client/tests/client/audit_tests.rs
// ============================================================================
// Module: Audit Sink Tests
// Description: JSON-line output of the file audit sink.
// ============================================================================

use std::fs;

use serde_json::Value;
use story_spoiler_client::AuditSink;
use story_spoiler_client::AuthAuditEvent;
use story_spoiler_client::FileAuditSink;
use story_spoiler_client::HttpAuditEvent;
use story_spoiler_client::HttpAuditEventParams;
use story_spoiler_client::NoopAuditSink;
use story_spoiler_client::ScenarioAuditEvent;

#[test]
fn file_sink_appends_one_json_line_per_event() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("audit.jsonl");
    let sink = FileAuditSink::new(&path).expect("file sink");

    sink.record_auth(&AuthAuditEvent::new("reader", None));
    sink.record_http(&HttpAuditEvent::new(HttpAuditEventParams {
        method: "GET".to_string(),
        path: "/api/Story/All".to_string(),
        status: Some(200),
        error: None,
        latency_ms: 12,
        request_bytes: 0,
        response_bytes: 2,
    }));
    sink.record_scenario(&ScenarioAuditEvent::new(
        3,
        "list_all_stories",
        Some("expected status 200, got 500".to_string()),
        15,
    ));

    let content = fs::read_to_string(&path).expect("read audit log");
    let lines: Vec<Value> =
        content.lines().map(|line| serde_json::from_str(line).expect("json line")).collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0]["event"], "authentication");
    assert_eq!(lines[1]["event"], "http_request");
    assert_eq!(lines[1]["status"], 200);
    assert_eq!(lines[2]["event"], "scenario_result");
    assert_eq!(lines[2]["outcome"], "error");
    assert_eq!(lines[2]["order"], 3);
}

#[test]
fn file_sink_appends_across_instances() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("audit.jsonl");

    FileAuditSink::new(&path).expect("first sink").record_auth(&AuthAuditEvent::new("a", None));
    FileAuditSink::new(&path)
        .expect("second sink")
        .record_auth(&AuthAuditEvent::new("b", Some("rejected")));

    let content = fs::read_to_string(&path).expect("read audit log");
    assert_eq!(content.lines().count(), 2);
}

#[test]
fn noop_sink_accepts_every_event_kind() {
    let sink = NoopAuditSink;
    sink.record_auth(&AuthAuditEvent::new("reader", None));
    sink.record_scenario(&ScenarioAuditEvent::new(1, "create_story", None, 1));
}
