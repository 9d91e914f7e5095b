//! Request construction. Nothing here touches the network.

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Request};

pub const NOTIFY_PATH: &str = "/api/v1/notify";
pub const HEALTH_PATH: &str = "/health";

const APPLICATION_JSON: &str = "application/json";

/// `POST {base_url}/api/v1/notify` with bearer auth and a JSON body.
///
/// `base_url` is expected to be normalized already (no trailing slash).
pub fn build_notify_request(
    http: &Client,
    base_url: &str,
    token: &str,
    body: Vec<u8>,
) -> reqwest::Result<Request> {
    http.post(format!("{base_url}{NOTIFY_PATH}"))
        .bearer_auth(token)
        .header(CONTENT_TYPE, APPLICATION_JSON)
        .body(body)
        .build()
}

/// `GET {base_url}/health`. The endpoint is public but the token is sent
/// anyway so proxies see the same caller.
pub fn build_health_request(
    http: &Client,
    base_url: &str,
    token: &str,
) -> reqwest::Result<Request> {
    http.get(format!("{base_url}{HEALTH_PATH}"))
        .bearer_auth(token)
        .header(ACCEPT, APPLICATION_JSON)
        .build()
}

pub(crate) fn normalize_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}
