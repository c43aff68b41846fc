use anyhow::Context;
use clap::Parser;
use client::SubmitClient;
use secrecy::{ExposeSecret, SecretString};
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Parser, Debug)]
#[command(version, about = "Ask the joke backend for a joke about something")]
struct Args {
    #[arg(long, env = "JOKE_ENDPOINT", default_value = "http://localhost:8000")]
    endpoint: Url,

    /// Token to send as X-CSRFToken; fetched from the server when absent.
    #[arg(long, env = "JOKE_CSRF_TOKEN")]
    csrf_token: Option<SecretString>,

    search_term: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    info!(endpoint = %args.endpoint, "Using endpoint");
    let client = SubmitClient::new(args.endpoint.clone())?;

    match args.csrf_token {
        Some(token) => client.set_csrf_token(token.expose_secret()),
        None => {
            client
                .fetch_csrf_token()
                .await
                .context("Failed to obtain a CSRF token")?;
        }
    }

    let payload = client
        .submit(&args.search_term)
        .await
        .with_context(|| format!("Submission of {:?} failed", args.search_term))?;
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}
