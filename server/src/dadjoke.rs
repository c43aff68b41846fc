use anyhow::Result;
use rand::seq::SliceRandom;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

#[derive(Debug, Deserialize)]
pub struct Joke {
    pub id: String,
    pub joke: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<Joke>,
    pub total_jokes: u64,
}

impl SearchResponse {
    /// One of the returned jokes at random, `None` when nothing matched.
    pub fn pick(&self) -> Option<&str> {
        if self.total_jokes == 0 {
            return None;
        }
        self.results
            .choose(&mut rand::thread_rng())
            .map(|joke| joke.joke.as_str())
    }
}

pub async fn search(client: &Client, api_url: &Url, term: &str) -> Result<SearchResponse> {
    let response = client
        .get(api_url.join("search")?)
        .header(ACCEPT, "application/json")
        .query(&[("term", term)])
        .send()
        .await?
        .error_for_status()?;
    let payload = response.json::<SearchResponse>().await?;
    Ok(payload)
}
