// system-tests/tests/helpers/story_stub.rs
// ============================================================================
// Module: Story Service Stub
// Description: In-memory Story Spoiler service on a loopback tiny_http server.
// Purpose: Run the full suite end to end without a deployed service.
// Dependencies: tiny_http, serde_json, url
// ============================================================================

//! ## Overview
//! The stub implements the authentication endpoint and the four story
//! endpoints with the status codes and messages of the real service. Story
//! endpoints require `Authorization: Bearer <token>` and answer 401 otherwise.
//! The server thread stops when the handle is dropped.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::thread;
use std::thread::JoinHandle;

use serde_json::Value;
use serde_json::json;
use tiny_http::Header;
use tiny_http::Method;
use tiny_http::Request;
use tiny_http::Response;
use tiny_http::Server;
use url::Url;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Account accepted by the stub.
pub const STUB_USERNAME: &str = "stub-reader";
/// Password accepted by the stub.
pub const STUB_PASSWORD: &str = "stub-password";
/// Token issued by the stub in [`AuthMode::Issue`].
pub const STUB_TOKEN: &str = "stub-session-token";

/// How the authentication endpoint answers valid credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// Issue [`STUB_TOKEN`] as `accessToken`.
    Issue,
    /// Answer 200 with a body that carries no `accessToken`.
    Malformed,
}

/// Request observed by the stub.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub body: String,
}

/// Mutable service state.
#[derive(Default)]
struct StubState {
    next_id: u64,
    stories: BTreeMap<String, Value>,
    requests: Vec<RecordedRequest>,
}

/// Handle for a running stub service.
pub struct StoryStub {
    base_url: Url,
    server: Arc<Server>,
    state: Arc<Mutex<StubState>>,
    join: Option<JoinHandle<()>>,
}

impl StoryStub {
    /// Starts a stub service on an ephemeral loopback port.
    pub fn spawn(mode: AuthMode) -> Result<Self, String> {
        let server = Arc::new(Server::http("127.0.0.1:0").map_err(|err| err.to_string())?);
        let base_url = Url::parse(&format!("http://{}", server.server_addr()))
            .map_err(|err| err.to_string())?;
        let state = Arc::new(Mutex::new(StubState::default()));
        let join = {
            let server = Arc::clone(&server);
            let state = Arc::clone(&state);
            thread::spawn(move || {
                for request in server.incoming_requests() {
                    handle(request, mode, &state);
                }
            })
        };
        Ok(Self {
            base_url,
            server,
            state,
            join: Some(join),
        })
    }

    /// Returns the service base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().map_or_else(|_| Vec::new(), |state| state.requests.clone())
    }

    /// Returns the stored stories.
    pub fn stories(&self) -> Vec<Value> {
        self.state
            .lock()
            .map_or_else(|_| Vec::new(), |state| state.stories.values().cloned().collect())
    }
}

impl Drop for StoryStub {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

// ============================================================================
// SECTION: Routing
// ============================================================================

fn handle(mut request: Request, mode: AuthMode, state: &Mutex<StubState>) {
    let mut body = String::new();
    let _ = request.as_reader().read_to_string(&mut body);
    let method = request.method().clone();
    let path = request.url().to_string();
    let authorization = request
        .headers()
        .iter()
        .find(|header| header.field.equiv("Authorization"))
        .map(|header| header.value.as_str().to_string());

    let (status, payload) = match state.lock() {
        Ok(mut state) => {
            state.requests.push(RecordedRequest {
                method: method.to_string(),
                path: path.clone(),
                authorization: authorization.clone(),
                body: body.clone(),
            });
            route(&mut state, &method, &path, authorization.as_deref(), &body, mode)
        }
        Err(_) => (500, json!({"msg": "stub state poisoned"})),
    };

    let mut response = Response::from_string(payload.to_string()).with_status_code(status);
    if let Ok(header) = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]) {
        response = response.with_header(header);
    }
    let _ = request.respond(response);
}

fn route(
    state: &mut StubState,
    method: &Method,
    path: &str,
    authorization: Option<&str>,
    body: &str,
    mode: AuthMode,
) -> (u16, Value) {
    if *method == Method::Post && path == "/api/User/Authentication" {
        return authenticate(body, mode);
    }
    if authorization != Some(format!("Bearer {STUB_TOKEN}").as_str()) {
        return (401, json!({"msg": "Unauthorized"}));
    }
    match (method, path) {
        (Method::Post, "/api/Story/Create") => create(state, body),
        (Method::Get, "/api/Story/All") => {
            (200, Value::Array(state.stories.values().cloned().collect()))
        }
        (Method::Put, _) => path
            .strip_prefix("/api/Story/Edit/")
            .map_or_else(not_found, |id| edit(state, id, body)),
        (Method::Delete, _) => path
            .strip_prefix("/api/Story/Delete/")
            .map_or_else(not_found, |id| delete(state, id)),
        _ => not_found(),
    }
}

fn not_found() -> (u16, Value) {
    (404, json!({"msg": "Not Found"}))
}

// ============================================================================
// SECTION: Handlers
// ============================================================================

fn authenticate(body: &str, mode: AuthMode) -> (u16, Value) {
    let Ok(credentials) = serde_json::from_str::<Value>(body) else {
        return (400, json!({"msg": "invalid body"}));
    };
    if credentials["username"] != STUB_USERNAME || credentials["password"] != STUB_PASSWORD {
        return (401, json!({"msg": "Invalid credentials"}));
    }
    match mode {
        AuthMode::Issue => (200, json!({"username": STUB_USERNAME, "accessToken": STUB_TOKEN})),
        AuthMode::Malformed => (200, json!({"username": STUB_USERNAME})),
    }
}

/// Returns the story when title and description are present and non-empty.
fn parse_story(body: &str) -> Option<Value> {
    let story: Value = serde_json::from_str(body).ok()?;
    let present = |field: &str| story[field].as_str().is_some_and(|value| !value.is_empty());
    (present("title") && present("description")).then_some(story)
}

fn create(state: &mut StubState, body: &str) -> (u16, Value) {
    let Some(mut story) = parse_story(body) else {
        return (400, json!({"errors": {"Description": ["The Description field is required."]}}));
    };
    state.next_id += 1;
    let id = format!("stub-{}", state.next_id);
    story["id"] = json!(id);
    state.stories.insert(id.clone(), story);
    (201, json!({"msg": "Successfully created!", "storyId": id}))
}

fn edit(state: &mut StubState, id: &str, body: &str) -> (u16, Value) {
    if !state.stories.contains_key(id) {
        return (404, json!({"msg": "No spoilers..."}));
    }
    let Some(mut story) = parse_story(body) else {
        return (400, json!({"msg": "invalid story"}));
    };
    story["id"] = json!(id);
    state.stories.insert(id.to_string(), story);
    (200, json!({"msg": "Successfully edited"}))
}

fn delete(state: &mut StubState, id: &str) -> (u16, Value) {
    if state.stories.remove(id).is_some() {
        (200, json!({"msg": "Deleted successfully!"}))
    } else {
        (400, json!({"msg": "Unable to delete this story spoiler!"}))
    }
}
