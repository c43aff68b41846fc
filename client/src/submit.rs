use std::sync::Arc;

use reqwest::cookie::{CookieStore, Jar};
use reqwest::{Client, Response};
use serde_json::Value;
use shared::{
    CsrfTokenResponse, SubmitRequest, CSRF_COOKIE_NAME, CSRF_HEADER_NAME, CSRF_PATH, SUBMIT_PATH,
};
use tracing::{debug, error, info};
use url::Url;

use crate::error::{Error, Result};

/// Posts search terms to the joke backend.
///
/// The cookie jar plays the role of the browser's cookie storage: whatever
/// `csrftoken` it holds for the base URL is echoed back in the `X-CSRFToken`
/// header. Clones share the connection pool and the jar.
#[derive(Clone)]
pub struct SubmitClient {
    http: Client,
    jar: Arc<Jar>,
    base_url: Url,
}

impl SubmitClient {
    pub fn new(base_url: Url) -> Result<Self> {
        let jar = Arc::new(Jar::default());
        let http = Client::builder().cookie_provider(jar.clone()).build()?;
        Ok(Self::with_http(http, jar, base_url))
    }

    /// `http` should have been built with `jar` as its cookie provider,
    /// otherwise cookies set by the server never reach [`Self::csrf_token`].
    pub fn with_http(http: Client, jar: Arc<Jar>, base_url: Url) -> Self {
        Self {
            http,
            jar,
            base_url,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn set_csrf_token(&self, token: &str) {
        let cookie = format!("{CSRF_COOKIE_NAME}={token}; Path=/");
        self.jar.add_cookie_str(&cookie, &self.base_url);
    }

    pub fn csrf_token(&self) -> Option<String> {
        let header = self.jar.cookies(&self.base_url)?;
        let header = header.to_str().ok()?;
        csrf_token_from_cookie_header(header)
    }

    /// Asks the server for a token cookie and returns the token the jar ends up with.
    pub async fn fetch_csrf_token(&self) -> Result<String> {
        let result = self.try_fetch_csrf_token().await;
        if let Err(ref error) = result {
            error!(?error, base_url = %self.base_url, "CSRF token request failed");
        }
        result
    }

    async fn try_fetch_csrf_token(&self) -> Result<String> {
        let url = self.base_url.join(CSRF_PATH)?;
        let response = self.http.get(url).send().await?;
        let payload: CsrfTokenResponse = read_json(response).await?;
        match self.csrf_token() {
            Some(token) => Ok(token),
            None => {
                debug!("No csrftoken cookie stored, keeping the token from the body");
                self.set_csrf_token(&payload.csrf_token);
                Ok(payload.csrf_token)
            }
        }
    }

    /// Sends `{"searchTerm": search_term}` to `/api/submit/` and returns the
    /// response body as untyped JSON.
    pub async fn submit(&self, search_term: &str) -> Result<Value> {
        let result = self.try_submit(search_term).await;
        match result {
            Ok(_) => info!(search_term, "Joke submission succeeded"),
            Err(ref error) => error!(?error, search_term, "Joke submission failed"),
        }
        result
    }

    async fn try_submit(&self, search_term: &str) -> Result<Value> {
        let url = self.base_url.join(SUBMIT_PATH)?;
        let mut request = self
            .http
            .post(url)
            .json(&SubmitRequest::new(search_term));
        match self.csrf_token() {
            Some(token) => request = request.header(CSRF_HEADER_NAME, token),
            None => debug!("No csrftoken cookie, sending without {CSRF_HEADER_NAME}"),
        }
        let response = request.send().await?;
        read_json(response).await
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::Status { status, body });
    }
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Picks the `csrftoken` value out of a `Cookie` header such as
/// `sessionid=x; csrftoken=abc123`.
pub fn csrf_token_from_cookie_header(header: &str) -> Option<String> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == CSRF_COOKIE_NAME)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
