//! Double submit CSRF protection.
//!
//! `/api/csrf/` hands out a random token in the `csrftoken` cookie. Unsafe
//! requests must repeat that token in the `X-CSRFToken` header.

use axum::extract::Request;
use axum::http::Method;
use axum::middleware::Next;
use axum::response::Response;
use axum::Extension;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use rand::Rng;
use shared::{CSRF_COOKIE_NAME, CSRF_HEADER_NAME};
use tracing::debug;

use crate::error::{Error, Result};
use crate::AppContext;

const SAFE_METHODS: &[Method] = &[Method::GET, Method::HEAD, Method::OPTIONS, Method::TRACE];

pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::thread_rng().gen();
    hex::encode(bytes)
}

pub fn token_cookie(token: String) -> Cookie<'static> {
    Cookie::build((CSRF_COOKIE_NAME, token))
        .path("/")
        .same_site(SameSite::Lax)
        .build()
}

fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes().zip(b.bytes()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

pub async fn protect(
    Extension(app_context): Extension<AppContext>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Result<Response> {
    if !app_context.config.csrf_enforce || SAFE_METHODS.contains(request.method()) {
        return Ok(next.run(request).await);
    }

    let Some(header_token) = request
        .headers()
        .get(CSRF_HEADER_NAME)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
    else {
        return Err(Error::forbidden("no csrf token in headers"));
    };
    let Some(cookie_token) = jar.get(CSRF_COOKIE_NAME) else {
        return Err(Error::forbidden("no csrf cookie"));
    };
    if !constant_time_eq(header_token, cookie_token.value()) {
        return Err(Error::forbidden("csrf token mismatch"));
    }

    debug!(method = %request.method(), uri = %request.uri(), "CSRF token accepted");
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_tokens_are_distinct_hex() {
        let a = generate_token();
        let b = generate_token();
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[test]
    fn constant_time_eq_compares_contents() {
        assert!(constant_time_eq("abc123", "abc123"));
        assert!(!constant_time_eq("abc123", "abc124"));
        assert!(!constant_time_eq("abc123", "abc1234"));
    }

    #[test]
    fn token_cookie_is_site_wide() {
        let cookie = token_cookie("abc123".to_string());
        assert_eq!(cookie.name(), "csrftoken");
        assert_eq!(cookie.value(), "abc123");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    }
}
