// crates/story-spoiler-client/tests/common/mod.rs
// ============================================================================
// Module: Client Test Utilities
// Description: Loopback HTTP servers and recording audit sinks.
// ============================================================================

use std::net::TcpListener;
use std::sync::Arc;
use std::sync::Mutex;
use std::thread;
use std::thread::JoinHandle;

use serde_json::Value;
use story_spoiler_client::AuditSink;
use story_spoiler_client::AuthAuditEvent;
use story_spoiler_client::HttpAuditEvent;
use story_spoiler_client::ScenarioAuditEvent;
use tiny_http::Header;
use tiny_http::Response;
use tiny_http::Server;
use url::Url;

// ============================================================================
// SECTION: Scripted Server
// ============================================================================

/// Request observed by a scripted server.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub url: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

/// Canned response served by a scripted server.
pub struct Scripted {
    pub status: u16,
    pub body: String,
}

impl Scripted {
    pub fn json(status: u16, body: &Value) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }

    pub fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }
}

/// Serves the scripted responses in order, one per request, then exits.
pub fn spawn_scripted(responses: Vec<Scripted>) -> (Url, JoinHandle<Vec<CapturedRequest>>) {
    let server = Server::http("127.0.0.1:0").expect("http server");
    let base = Url::parse(&format!("http://{}", server.server_addr())).expect("base url");
    let handle = thread::spawn(move || {
        let mut captured = Vec::new();
        for scripted in responses {
            let Ok(mut request) = server.recv() else {
                break;
            };
            let mut body = String::new();
            let _ = request.as_reader().read_to_string(&mut body);
            captured.push(CapturedRequest {
                method: request.method().to_string(),
                url: request.url().to_string(),
                authorization: header_value(&request, "Authorization"),
                content_type: header_value(&request, "Content-Type"),
                body,
            });
            let response = Response::from_string(scripted.body)
                .with_status_code(scripted.status)
                .with_header(
                    Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).unwrap(),
                );
            request.respond(response).expect("respond");
        }
        captured
    });
    (base, handle)
}

fn header_value(request: &tiny_http::Request, name: &'static str) -> Option<String> {
    request
        .headers()
        .iter()
        .find(|header| header.field.equiv(name))
        .map(|header| header.value.as_str().to_string())
}

/// Returns a loopback URL with nothing listening on it.
pub fn unreachable_base_url() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    Url::parse(&format!("http://{addr}")).expect("base url")
}

// ============================================================================
// SECTION: Recording Audit Sink
// ============================================================================

/// Audit sink that keeps every event as JSON.
#[derive(Default)]
pub struct RecordingAuditSink {
    events: Mutex<Vec<Value>>,
}

impl RecordingAuditSink {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<Value> {
        self.events.lock().expect("events lock").clone()
    }

    fn push<T: serde::Serialize>(&self, event: &T) {
        let value = serde_json::to_value(event).expect("serialize event");
        self.events.lock().expect("events lock").push(value);
    }
}

impl AuditSink for RecordingAuditSink {
    fn record_http(&self, event: &HttpAuditEvent) {
        self.push(event);
    }

    fn record_auth(&self, event: &AuthAuditEvent) {
        self.push(event);
    }

    fn record_scenario(&self, event: &ScenarioAuditEvent) {
        self.push(event);
    }
}
