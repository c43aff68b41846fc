use serde::{Deserialize, Serialize};

/// Path of the joke submission endpoint, relative to the site root.
pub const SUBMIT_PATH: &str = "/api/submit/";

/// Path that hands out a fresh CSRF token cookie.
pub const CSRF_PATH: &str = "/api/csrf/";

pub const CSRF_COOKIE_NAME: &str = "csrftoken";
pub const CSRF_HEADER_NAME: &str = "X-CSRFToken";

pub const SEARCH_TERM_MAX_LEN: usize = 500;

pub const NOT_FUNNY: &str = "According to my joke API, that's just not funny.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitRequest {
    #[serde(rename = "searchTerm")]
    pub search_term: String,
}

impl SubmitRequest {
    pub fn new(search_term: impl Into<String>) -> Self {
        Self {
            search_term: search_term.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsrfTokenResponse {
    #[serde(rename = "csrfToken")]
    pub csrf_token: String,
}
