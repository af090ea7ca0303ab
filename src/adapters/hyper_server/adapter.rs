use std::sync::Arc;

use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper::header::{CONTENT_TYPE, HOST};
use hyper::{Method, Request, Response, StatusCode};
use serde::Serialize;
use tracing::error;

use super::status_page;
use crate::domain::RelayService;

type Body = Full<Bytes>;

#[derive(Debug, PartialEq, Eq)]
enum Route {
    Index,
    ChangePort(u16),
    ChangeCustomUrl(String),
    NotFound,
}

impl Route {
    fn parse(path: &str) -> Route {
        if path == "/" {
            return Route::Index;
        }
        if let Some(rest) = path.strip_prefix("/change-port/") {
            // A non-integer segment does not match the route.
            return match rest.parse::<u16>() {
                Ok(port) => Route::ChangePort(port),
                Err(_) => Route::NotFound,
            };
        }
        if let Some(rest) = path.strip_prefix("/change-custom-url/") {
            if rest.is_empty() {
                return Route::NotFound;
            }
            return Route::ChangeCustomUrl(rest.to_string());
        }
        Route::NotFound
    }
}

#[derive(Serialize)]
struct ChangeResponse {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    current_urls: Option<Vec<String>>,
}

pub struct HyperRelayAdapter {
    service: Arc<RelayService>,
}

impl HyperRelayAdapter {
    pub fn new(service: Arc<RelayService>) -> Self {
        Self { service }
    }

    pub async fn handle(&self, req: Request<Incoming>) -> Response<Body> {
        if req.method() != Method::GET {
            return empty_status(StatusCode::METHOD_NOT_ALLOWED);
        }

        match Route::parse(req.uri().path()) {
            Route::Index => {
                let host = req
                    .headers()
                    .get(HOST)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("localhost:4201");
                html_response(status_page::render(self.service.config(), host))
            }
            Route::ChangePort(port) => match self.service.change_port(port).await {
                Ok(message) => json_response(
                    StatusCode::OK,
                    &ChangeResponse {
                        success: true,
                        message,
                        current_urls: None,
                    },
                ),
                Err(err) => failure_response(err),
            },
            Route::ChangeCustomUrl(raw) => match self.service.change_custom_url(&raw).await {
                Ok(outcome) => {
                    let message = if outcome.updated {
                        format!("updated port of the existing entry for {}", raw)
                    } else {
                        format!("added new custom URL {}", raw)
                    };
                    json_response(
                        StatusCode::OK,
                        &ChangeResponse {
                            success: true,
                            message,
                            current_urls: Some(outcome.urls),
                        },
                    )
                }
                Err(err) => failure_response(err),
            },
            Route::NotFound => empty_status(StatusCode::NOT_FOUND),
        }
    }
}

fn failure_response(err: crate::domain::RelayError) -> Response<Body> {
    error!("request failed: {}", err);
    json_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        &ChangeResponse {
            success: false,
            message: err.to_string(),
            current_urls: None,
        },
    )
}

fn json_response(status: StatusCode, payload: &ChangeResponse) -> Response<Body> {
    let body = serde_json::to_string(payload).unwrap_or_default();
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "application/json")
        .body(Full::new(Bytes::from(body)))
        .unwrap()
}

fn html_response(html: String) -> Response<Body> {
    Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, "text/html; charset=utf-8")
        .body(Full::new(Bytes::from(html)))
        .unwrap()
}

fn empty_status(status: StatusCode) -> Response<Body> {
    Response::builder()
        .status(status)
        .body(Full::new(Bytes::new()))
        .unwrap()
}
