//! Boundary downloads.
//!
//! Requests are blocking and issued one at a time; a slow host stalls the
//! composition until the client's own timeout fires.

use formats::{BoundaryDocument, GeoJsonError};
use reqwest::blocking::Client;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("invalid GeoJSON: {0}")]
    GeoJson(#[from] GeoJsonError),

    #[error("offline, not fetching {url}")]
    Offline { url: String },
}

/// `err` followed by each of its sources, joined with `": "`. A source whose
/// text already appears earlier in the chain is skipped.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut cause = err.source();
    while let Some(e) = cause {
        let text = e.to_string();
        if !out.contains(&text) {
            out.push_str(": ");
            out.push_str(&text);
        }
        cause = e.source();
    }
    out
}

pub trait BoundaryFetcher {
    fn fetch(&self, url: &str) -> Result<BoundaryDocument, FetchError>;
}

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl BoundaryFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<BoundaryDocument, FetchError> {
        debug!("GET {url}");
        let resp = self.client.get(url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let body = resp.text()?;
        Ok(BoundaryDocument::from_geojson_str(&body)?)
    }
}

/// Refuses every request. Inline boundaries still render.
#[derive(Debug, Default, Copy, Clone)]
pub struct OfflineFetcher;

impl BoundaryFetcher for OfflineFetcher {
    fn fetch(&self, url: &str) -> Result<BoundaryDocument, FetchError> {
        Err(FetchError::Offline {
            url: url.to_string(),
        })
    }
}
