use color_eyre::eyre::{Result, WrapErr};
use hyper::ext::ReasonPhrase;
use reqwest::{
    blocking::{Client, Response},
    StatusCode,
};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::movie::Movie;

const FILMS_ENDPOINT: &str = "/films?fields=title,description,release_date";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to query Ghibli API: {0}")]
    Transport(#[from] reqwest::Error),
    /// `status_line` is the code and reason phrase as the server sent them,
    /// e.g. `500 Internal Server Error`.
    #[error("got unexpected status {status_line}")]
    UnexpectedStatus {
        status: StatusCode,
        status_line: String,
    },
    #[error("failed to decode json returned by Ghibli API: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Fetches the film list from the Ghibli API.
pub struct MovieFetcher {
    client: Client,
    base_url: String,
}

impl MovieFetcher {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .build()
            .wrap_err("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Requests `/films` once and decodes the body into movies, keeping the
    /// order of the JSON array.
    pub fn get_movies(&self) -> Result<Vec<Movie>, FetchError> {
        let url = format!("{}{}", self.base_url, FILMS_ENDPOINT);
        debug!(%url, "requesting films");

        let response = self.client.get(&url).send()?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::UnexpectedStatus {
                status,
                status_line: status_line(&response),
            });
        }

        // Reading the body consumes the response, which releases the
        // connection on every return path.
        let body = response.bytes()?;
        let movies = decode_movies(&body)?;

        debug!(count = movies.len(), "decoded films");
        Ok(movies)
    }
}

/// Rebuilds the status line from the response. hyper only records the
/// reason phrase when it differs from the canonical one.
fn status_line(response: &Response) -> String {
    let status = response.status();
    let reason = response
        .extensions()
        .get::<ReasonPhrase>()
        .map(|reason| String::from_utf8_lossy(reason.as_bytes()).into_owned())
        .filter(|reason| !reason.is_empty())
        .or_else(|| status.canonical_reason().map(str::to_string));

    match reason {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}

/// Decodes the first JSON value in `body`. A `null` list is empty, a `null`
/// element is a default movie, and anything after the first value is ignored.
fn decode_movies(body: &[u8]) -> Result<Vec<Movie>, serde_json::Error> {
    let mut deserializer = serde_json::Deserializer::from_slice(body);
    let movies = Option::<Vec<Option<Movie>>>::deserialize(&mut deserializer)?
        .unwrap_or_default()
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect();
    Ok(movies)
}
