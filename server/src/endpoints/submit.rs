use axum::routing::post;
use axum::{Extension, Json, Router};
use axum_macros::debug_handler;
use shared::{SubmitRequest, NOT_FUNNY, SEARCH_TERM_MAX_LEN};
use tracing::{debug, info};

use crate::dadjoke;
use crate::error::{Error, Result};
use crate::AppContext;

pub fn routes() -> Router {
    Router::new().route("/submit/", post(submit))
}

fn validate_submit(payload: &SubmitRequest) -> Result<()> {
    let mut errors: Vec<(&'static str, &'static str)> = Vec::new();
    if payload.search_term.trim().is_empty() {
        errors.push(("searchTerm", "searchTerm must not be blank"));
    }
    if payload.search_term.chars().count() > SEARCH_TERM_MAX_LEN {
        errors.push(("searchTerm", "searchTerm must have at most 500 characters"));
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(Error::unprocessable_entity(errors))
    }
}

#[debug_handler]
async fn submit(
    Extension(app_context): Extension<AppContext>,
    Json(input): Json<SubmitRequest>,
) -> Result<Json<String>> {
    validate_submit(&input)?;
    debug!(search_term = %input.search_term, "Searching jokes");
    let response = dadjoke::search(
        &app_context.http,
        &app_context.config.joke_api_url,
        &input.search_term,
    )
    .await
    .map_err(Error::Upstream)?;
    let joke = match response.pick() {
        Some(joke) => {
            info!(search_term = %input.search_term, total_jokes = response.total_jokes, "Joke found");
            joke.to_string()
        }
        None => {
            info!(search_term = %input.search_term, "No joke found");
            NOT_FUNNY.to_string()
        }
    };
    Ok(Json(joke))
}
