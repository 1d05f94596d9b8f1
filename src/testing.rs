//! Shared helpers for client tests against a local `wiremock` server.

use tokio::net::TcpListener;
use wiremock::{MockServer, Request};

/// `/api` base URL on a mock server.
pub(crate) fn api_base(server: &MockServer) -> String {
    format!("{}/api", server.uri())
}

/// A base URL nothing listens on.
pub(crate) async fn closed_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/api")
}

/// Requests the server saw, as `METHOD /path` in arrival order.
pub(crate) async fn request_lines(server: &MockServer) -> Vec<String> {
    received(server)
        .await
        .iter()
        .map(|r| format!("{} {}", r.method, r.url.path()))
        .collect()
}

pub(crate) async fn received(server: &MockServer) -> Vec<Request> {
    server.received_requests().await.unwrap_or_default()
}

/// `Authorization` header of a received request, if any.
pub(crate) fn authorization(request: &Request) -> Option<String> {
    request
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
