#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, Response};
use axum::Router;
use serde_json::{json, Value};
use server::{AppContext, Config};
use url::Url;
use wiremock::matchers::{header as header_eq, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_TOKEN: &str = "abc123";

pub fn test_config(joke_api_url: &str, csrf_enforce: bool) -> Config {
    Config {
        bind: "127.0.0.1:0".parse().expect("valid socket address"),
        joke_api_url: Url::parse(joke_api_url).expect("valid joke api url"),
        csrf_enforce,
    }
}

pub fn test_app(upstream: &MockServer) -> Router {
    let config = test_config(&upstream.uri(), true);
    server::app(AppContext::new(config).expect("app context should build"))
}

/// Makes the fake joke API answer `term` with the given jokes.
pub async fn mock_search(upstream: &MockServer, term: &str, jokes: &[&str]) {
    let results: Vec<Value> = jokes
        .iter()
        .enumerate()
        .map(|(i, joke)| json!({"id": format!("joke-{i}"), "joke": joke}))
        .collect();
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("term", term))
        .and(header_eq("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "current_page": 1,
            "limit": 20,
            "results": results,
            "search_term": term,
            "status": 200,
            "total_jokes": jokes.len(),
            "total_pages": 1,
        })))
        .mount(upstream)
        .await;
}

/// POST /api/submit/ carrying `token` both as cookie and header, when given.
pub fn submit_request(body: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/submit/")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder
            .header(header::COOKIE, format!("csrftoken={token}"))
            .header("X-CSRFToken", token);
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("request should build")
}

pub async fn body_json(response: Response<Body>) -> anyhow::Result<Value> {
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}
