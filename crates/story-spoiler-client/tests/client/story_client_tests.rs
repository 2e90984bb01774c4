// crates/story-spoiler-client/tests/client/story_client_tests.rs
// ============================================================================
// Module: StoryClient Tests
// Description: Bearer attachment, body encoding, URL building, and transport errors.
// ============================================================================

use std::time::Duration;

use serde_json::Value;
use serde_json::json;
use story_spoiler_client::ApiRequest;
use story_spoiler_client::ClientError;
use story_spoiler_client::ClientOptions;
use story_spoiler_client::RequestExecutor;
use story_spoiler_client::StatusCode;
use story_spoiler_client::StoryClient;
use story_spoiler_client::endpoint_url;
use story_spoiler_core::ApiPath;
use story_spoiler_core::SessionToken;
use story_spoiler_core::StoryDto;
use story_spoiler_core::StoryId;
use url::Url;

use crate::common::RecordingAuditSink;
use crate::common::Scripted;
use crate::common::spawn_scripted;
use crate::common::unreachable_base_url;

// ============================================================================
// SECTION: Request Execution
// ============================================================================

#[test]
fn execute_attaches_bearer_token_and_json_body() {
    let (base, server) =
        spawn_scripted(vec![Scripted::json(200, &json!({ "msg": "Successfully edited" }))]);
    let client = StoryClient::new(
        base,
        SessionToken::new("tok-123"),
        &ClientOptions::default(),
        RecordingAuditSink::shared(),
    )
    .expect("client");

    let story = StoryDto::new("Edited story line", "Edited description", "");
    let request = ApiRequest::put(ApiPath::story_edit(&StoryId::new("abc"))).with_json(&story).unwrap();
    let response = client.execute(&request).expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.body().contains("Successfully edited"));

    let captured = server.join().expect("server thread");
    assert_eq!(captured[0].method, "PUT");
    assert_eq!(captured[0].url, "/api/Story/Edit/abc");
    assert_eq!(captured[0].authorization.as_deref(), Some("Bearer tok-123"));
    assert_eq!(captured[0].content_type.as_deref(), Some("application/json"));
    let body: Value = serde_json::from_str(&captured[0].body).unwrap();
    assert_eq!(
        body,
        json!({ "title": "Edited story line", "description": "Edited description", "url": "" })
    );
}

#[test]
fn every_request_reuses_the_same_token() {
    let (base, server) = spawn_scripted(vec![
        Scripted::json(200, &json!([])),
        Scripted::json(400, &json!({ "msg": "Unable to delete this story spoiler!" })),
    ]);
    let client = StoryClient::new(
        base,
        SessionToken::new("tok-xyz"),
        &ClientOptions::default(),
        RecordingAuditSink::shared(),
    )
    .expect("client");

    client.execute(&ApiRequest::get(ApiPath::story_all())).unwrap();
    client.execute(&ApiRequest::delete(ApiPath::story_delete(&StoryId::new("1235")))).unwrap();

    let captured = server.join().expect("server thread");
    assert_eq!(captured.len(), 2);
    for request in &captured {
        assert_eq!(request.authorization.as_deref(), Some("Bearer tok-xyz"));
    }
    assert!(captured[0].body.is_empty());
    assert_eq!(captured[1].method, "DELETE");
}

#[test]
fn error_statuses_are_returned_as_responses() {
    let (base, server) =
        spawn_scripted(vec![Scripted::json(404, &json!({ "msg": "No spoilers..." }))]);
    let client = StoryClient::new(
        base,
        SessionToken::new("tok"),
        &ClientOptions::default(),
        RecordingAuditSink::shared(),
    )
    .expect("client");

    let request = ApiRequest::put(ApiPath::story_edit(&StoryId::new("1234")));
    let response = client.execute(&request).expect("404 is still a response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    server.join().expect("server thread");
}

#[test]
fn executor_trait_dispatches_to_client() {
    let (base, server) = spawn_scripted(vec![Scripted::json(200, &json!([{ "title": "t" }]))]);
    let client = StoryClient::new(
        base,
        SessionToken::new("tok"),
        &ClientOptions {
            timeout: Some(Duration::from_secs(5)),
        },
        RecordingAuditSink::shared(),
    )
    .expect("client");

    let executor: &dyn RequestExecutor = &client;
    let response = executor.execute(&ApiRequest::get(ApiPath::story_all())).unwrap();
    let stories: Vec<StoryDto> = response.decode().unwrap();
    assert_eq!(stories.len(), 1);
    server.join().expect("server thread");
}

// ============================================================================
// SECTION: Audit Events
// ============================================================================

#[test]
fn exchanges_are_audited_without_the_token() {
    let (base, server) = spawn_scripted(vec![Scripted::json(
        201,
        &json!({ "msg": "Successfully created!", "storyId": "s-1" }),
    )]);
    let audit = RecordingAuditSink::shared();
    let client = StoryClient::new(
        base,
        SessionToken::new("secret-bearer"),
        &ClientOptions::default(),
        audit.clone(),
    )
    .expect("client");

    let story = StoryDto::new("New Story Line", "Description for the Exam", "");
    let request = ApiRequest::post(ApiPath::story_create()).with_json(&story).unwrap();
    client.execute(&request).unwrap();
    server.join().expect("server thread");

    let events = audit.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["event"], "http_request");
    assert_eq!(events[0]["method"], "POST");
    assert_eq!(events[0]["path"], "/api/Story/Create");
    assert_eq!(events[0]["status"], 201);
    assert_eq!(events[0]["outcome"], "ok");
    assert_eq!(events[0]["request_bytes"], request.body().map_or(0, <[u8]>::len));
    assert!(!events[0].to_string().contains("secret-bearer"));
}

#[test]
fn unreachable_service_is_transport_error_and_audited() {
    let audit = RecordingAuditSink::shared();
    let client = StoryClient::new(
        unreachable_base_url(),
        SessionToken::new("tok"),
        &ClientOptions::default(),
        audit.clone(),
    )
    .expect("client");

    let err = client.execute(&ApiRequest::get(ApiPath::story_all())).unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));

    let events = audit.events();
    assert_eq!(events[0]["outcome"], "error");
    assert!(events[0]["error"].is_string());
}

// ============================================================================
// SECTION: URL Building
// ============================================================================

#[test]
fn endpoint_url_encodes_identifier_segments() {
    let base = Url::parse("http://stories.test").unwrap();
    let url = endpoint_url(&base, &ApiPath::story_edit(&StoryId::new("a b/c"))).unwrap();
    assert_eq!(url.as_str(), "http://stories.test/api/Story/Edit/a%20b%2Fc");
}

#[test]
fn endpoint_url_keeps_base_path_prefix_and_drops_query() {
    let base = Url::parse("https://stories.test/gateway/?debug=1#top").unwrap();
    let url = endpoint_url(&base, &ApiPath::story_all()).unwrap();
    assert_eq!(url.as_str(), "https://stories.test/gateway/api/Story/All");
}

#[test]
fn endpoint_url_rejects_non_hierarchical_base() {
    let base = Url::parse("mailto:someone@stories.test").unwrap();
    let err = endpoint_url(&base, &ApiPath::story_all()).unwrap_err();
    assert!(matches!(err, ClientError::InvalidUrl(_)));
}
