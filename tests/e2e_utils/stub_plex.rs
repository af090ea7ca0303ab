#![cfg(test)]
#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ServerBuilder;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Shared state for a stub playing both plex.tv and the Plex server.
pub struct StubPlexState {
    /// Preferences served from `/:/prefs`
    pub prefs: HashMap<String, String>,
    /// Tokens the library probe accepts
    pub valid_tokens: Vec<String>,
    /// Password `/users/sign_in.json` expects
    pub password: String,
    /// Token handed out on the next successful sign-in
    pub next_token: String,
    pub sign_ins: usize,
    pub probes: usize,
}

impl StubPlexState {
    pub fn new(prefs: &[(&str, &str)]) -> Self {
        Self {
            prefs: prefs
                .iter()
                .map(|(id, value)| (id.to_string(), value.to_string()))
                .collect(),
            valid_tokens: Vec::new(),
            password: "password".to_string(),
            next_token: "fresh-token".to_string(),
            sign_ins: 0,
            probes: 0,
        }
    }
}

pub struct StubPlex {
    addr: SocketAddr,
    pub state: Arc<Mutex<StubPlexState>>,
    _server_handle: JoinHandle<()>,
}

impl StubPlex {
    pub async fn start(state: StubPlexState) -> Result<Self, Box<dyn std::error::Error>> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(state));
        let shared = state.clone();

        let server_handle = tokio::spawn(async move {
            loop {
                match listener.accept().await {
                    Ok((stream, _)) => {
                        let io = TokioIo::new(stream);
                        let shared = shared.clone();

                        tokio::spawn(async move {
                            let service_fn = service_fn(move |req| {
                                let shared = shared.clone();
                                async move {
                                    Ok::<_, hyper::Error>(handle_request(req, shared).await)
                                }
                            });

                            let _ = ServerBuilder::new(TokioExecutor::new())
                                .serve_connection(io, service_fn)
                                .await;
                        });
                    }
                    Err(_) => break,
                }
            }
        });

        Ok(Self {
            addr,
            state,
            _server_handle: server_handle,
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn sign_in_url(&self) -> String {
        format!("http://{}/users/sign_in.json", self.addr)
    }

    pub fn sign_ins(&self) -> usize {
        self.state.lock().unwrap().sign_ins
    }

    pub fn probes(&self) -> usize {
        self.state.lock().unwrap().probes
    }

    pub fn pref(&self, id: &str) -> Option<String> {
        self.state.lock().unwrap().prefs.get(id).cloned()
    }
}

async fn handle_request(
    req: Request<Incoming>,
    state: Arc<Mutex<StubPlexState>>,
) -> Response<Full<Bytes>> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = req.uri().query().unwrap_or("").to_string();
    let body = req
        .into_body()
        .collect()
        .await
        .map(|collected| collected.to_bytes())
        .unwrap_or_default();

    match (method, path.as_str()) {
        (Method::POST, "/users/sign_in.json") => {
            let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap_or_default();
            let login = parsed["user"]["login"].as_str().unwrap_or("");
            let password = parsed["user"]["password"].as_str().unwrap_or("");

            let mut state = state.lock().unwrap();
            state.sign_ins += 1;
            if login.is_empty() || password != state.password {
                return empty_status(StatusCode::UNAUTHORIZED);
            }

            let token = state.next_token.clone();
            state.valid_tokens.push(token.clone());
            json_status(
                StatusCode::CREATED,
                serde_json::json!({"user": {"authentication_token": token}}),
            )
        }
        (Method::GET, "/library/sections") => {
            let mut state = state.lock().unwrap();
            state.probes += 1;
            if authorized(&query, &state) {
                empty_status(StatusCode::OK)
            } else {
                empty_status(StatusCode::UNAUTHORIZED)
            }
        }
        (Method::GET, "/:/prefs") => {
            let state = state.lock().unwrap();
            if !authorized(&query, &state) {
                return empty_status(StatusCode::UNAUTHORIZED);
            }
            let settings: Vec<serde_json::Value> = state
                .prefs
                .iter()
                .map(|(id, value)| serde_json::json!({"id": id, "value": value}))
                .collect();
            json_status(
                StatusCode::OK,
                serde_json::json!({"MediaContainer": {"Setting": settings}}),
            )
        }
        (Method::PUT, "/:/prefs") => {
            let mut state = state.lock().unwrap();
            if !authorized(&query, &state) {
                return empty_status(StatusCode::UNAUTHORIZED);
            }
            for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
                if key != "X-Plex-Token" {
                    state.prefs.insert(key.into_owned(), value.into_owned());
                }
            }
            empty_status(StatusCode::OK)
        }
        _ => empty_status(StatusCode::NOT_FOUND),
    }
}

fn authorized(query: &str, state: &StubPlexState) -> bool {
    url::form_urlencoded::parse(query.as_bytes())
        .any(|(key, value)| key == "X-Plex-Token" && state.valid_tokens.contains(&value.into_owned()))
}

fn json_status(status: StatusCode, payload: serde_json::Value) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header(hyper::header::CONTENT_TYPE, "application/json")
        .body(Full::new(Bytes::from(payload.to_string())))
        .unwrap()
}

fn empty_status(status: StatusCode) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .body(Full::new(Bytes::new()))
        .unwrap()
}
