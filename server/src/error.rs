use std::borrow::Cow;
use std::collections::HashMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{error, warn};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(serde::Serialize)]
struct ErrorsPayload {
    errors: HashMap<Cow<'static, str>, Vec<Cow<'static, str>>>,
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("csrf_verification_failed")]
    Forbidden { reason: &'static str },
    #[error("invalid_payload")]
    UnprocessableEntity {
        errors: HashMap<Cow<'static, str>, Vec<Cow<'static, str>>>,
    },
    #[error("upstream_unavailable")]
    Upstream(anyhow::Error),
    #[error("internal_server_error")]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    pub fn unprocessable_entity<K, V>(errors: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<Cow<'static, str>>,
        V: Into<Cow<'static, str>>,
    {
        let mut error_map = HashMap::new();

        for (key, val) in errors {
            error_map
                .entry(key.into())
                .or_insert_with(Vec::new)
                .push(val.into());
        }

        Self::UnprocessableEntity { errors: error_map }
    }

    pub fn forbidden(reason: &'static str) -> Self {
        Self::Forbidden { reason }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Error::Anyhow(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Forbidden { .. } => StatusCode::FORBIDDEN,
            Error::UnprocessableEntity { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Error::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::UnprocessableEntity { ref errors } => {
                warn!(errors = ?errors, "Unprocessable entity");
                let t = (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(ErrorsPayload {
                        errors: errors.clone(),
                    }),
                );
                return t.into_response();
            }
            Self::Forbidden { reason } => {
                warn!(reason = %reason, "CSRF verification failed");
            }
            Self::Upstream(ref e) => {
                error!(error = ?e, "Joke API request failed");
            }
            Self::Anyhow(ref e) => {
                error!(error = %e, "Internal server error");
            }
        }

        (self.status_code(), self.to_string()).into_response()
    }
}
