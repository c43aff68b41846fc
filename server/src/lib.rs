use axum::{Extension, Router};
use clap::{ArgAction, Parser};
use std::{net::SocketAddr, sync::Arc};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use url::Url;

pub mod csrf;
pub mod dadjoke;
pub mod endpoints;
pub mod error;

const USER_AGENT: &str = concat!("joke-server/", env!("CARGO_PKG_VERSION"));

#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    pub http: reqwest::Client,
}

impl AppContext {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            config: Arc::new(config),
            http,
        })
    }
}

#[derive(Parser, Clone, Debug)]
#[command(version)]
pub struct Config {
    #[arg(long, env = "APP_BIND", default_value = "[::]:8000")]
    pub bind: SocketAddr,

    #[arg(
        long,
        help = "Base URL of the dad joke search API",
        env = "JOKE_API_URL",
        default_value = "https://icanhazdadjoke.com"
    )]
    pub joke_api_url: Url,

    #[arg(
        long,
        help = "Reject unsafe requests whose X-CSRFToken header does not match the csrftoken cookie",
        env = "CSRF_ENFORCE",
        default_value_t = true,
        action = ArgAction::Set
    )]
    pub csrf_enforce: bool,
}

pub fn app(app_context: AppContext) -> Router {
    Router::new()
        .nest("/api", endpoints::routers_api())
        .merge(endpoints::health_check())
        .layer(Extension(app_context))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
