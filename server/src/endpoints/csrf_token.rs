use axum::routing::get;
use axum::{Json, Router};
use axum_extra::extract::cookie::CookieJar;
use axum_macros::debug_handler;
use shared::CsrfTokenResponse;
use tracing::debug;

use crate::csrf::{generate_token, token_cookie};

pub fn routes() -> Router {
    Router::new().route("/csrf/", get(issue_csrf_token))
}

#[debug_handler]
async fn issue_csrf_token(jar: CookieJar) -> (CookieJar, Json<CsrfTokenResponse>) {
    let token = generate_token();
    debug!("Issuing new CSRF token");
    (
        jar.add(token_cookie(token.clone())),
        Json(CsrfTokenResponse { csrf_token: token }),
    )
}
