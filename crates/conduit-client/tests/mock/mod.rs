//! In-process Conduit server for tests.

#![allow(dead_code)]

use axum::{
    Form, Router,
    extract::{Path, State},
    http::{HeaderMap, header::CONTENT_TYPE},
    routing::post,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

pub const FULL_CAPABILITIES: &str = r#"{"result":{
    "authentication":["token","session"],
    "signatures":["consign"],
    "input":["json","urlencoded"],
    "output":["json","human"]
}}"#;

/// A request as the server saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub content_type: Option<String>,
    pub form: HashMap<String, String>,
}

impl Recorded {
    pub fn params(&self) -> serde_json::Value {
        serde_json::from_str(&self.form["params"]).unwrap()
    }
}

#[derive(Clone)]
enum Reply {
    /// Answer with each body in turn, repeating the last one.
    Bodies(Vec<String>),
    /// Answer with `{"result": <params>}`, copying the params text verbatim.
    Echo,
}

#[derive(Default)]
struct MockState {
    replies: HashMap<String, Reply>,
    recorded: Mutex<Vec<Recorded>>,
}

impl MockState {
    fn calls_to(&self, method: &str) -> usize {
        self.recorded
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.method == method)
            .count()
    }
}

#[derive(Default)]
pub struct MockBuilder {
    replies: HashMap<String, Reply>,
}

impl MockBuilder {
    pub fn reply(self, method: &str, body: &str) -> Self {
        self.replies_in_turn(method, &[body])
    }

    pub fn replies_in_turn(mut self, method: &str, bodies: &[&str]) -> Self {
        let bodies = bodies.iter().map(|b| (*b).to_owned()).collect();
        let reply = Reply::Bodies(bodies);
        self.replies.insert(method.to_owned(), reply);
        self
    }

    pub fn echo(mut self, method: &str) -> Self {
        self.replies.insert(method.to_owned(), Reply::Echo);
        self
    }

    pub async fn start(self) -> MockConduit {
        let state = Arc::new(MockState {
            replies: self.replies,
            recorded: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/api/{method}", post(handle))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        MockConduit {
            host: format!("http://{addr}"),
            state,
        }
    }
}

pub struct MockConduit {
    pub host: String,
    state: Arc<MockState>,
}

impl MockConduit {
    pub fn builder() -> MockBuilder {
        MockBuilder::default()
    }

    /// A server with full capabilities and a `conduit.connect` answering
    /// session `sk1` / connection 42.
    pub fn compatible() -> MockBuilder {
        Self::builder()
            .reply("conduit.getcapabilities", FULL_CAPABILITIES)
            .reply(
                "conduit.connect",
                r#"{"result":{"sessionKey":"sk1","connectionID":42,"userPHID":"PHID-USER-1"}}"#,
            )
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.recorded.lock().unwrap().clone()
    }

    pub fn requests_for(&self, method: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method)
            .collect()
    }
}

async fn handle(
    State(state): State<Arc<MockState>>,
    Path(method): Path<String>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> String {
    let recorded = Recorded {
        method: method.clone(),
        content_type: headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned),
        form,
    };
    let params = recorded.form.get("params").cloned();
    let previous = state.calls_to(&method);
    state.recorded.lock().unwrap().push(recorded);

    match state.replies.get(&method) {
        Some(Reply::Bodies(bodies)) => bodies[previous.min(bodies.len() - 1)].clone(),
        Some(Reply::Echo) => format!(
            r#"{{"result":{}}}"#,
            params.unwrap_or_else(|| "null".to_owned())
        ),
        None => format!(
            r#"{{"result":null,"error_code":"ERR-CONDUIT-CALL","error_info":"Conduit method '{method}' does not exist."}}"#
        ),
    }
}
