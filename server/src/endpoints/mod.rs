use axum::{middleware, routing, Router};

use crate::csrf;

mod csrf_token;
mod submit;

async fn health() -> &'static str {
    "OK"
}

pub fn health_check() -> Router {
    Router::new().route("/health", routing::get(health))
}

pub fn routers_api() -> Router {
    submit::routes()
        .merge(csrf_token::routes())
        .route_layer(middleware::from_fn(csrf::protect))
}
