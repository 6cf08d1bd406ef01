//! Download of the published cumulative CSVs.
//!
//! One blocking GET per quantity; the response body is saved verbatim to the
//! local cache so a later `--offline` run (or manual inspection) can reuse it.

use std::fs;
use std::path::{Path, PathBuf};

use reqwest::blocking::Client;
use reqwest::StatusCode;

use crate::domain::Quantity;

const BASE_URL: &str = "https://covid.ourworldindata.org/data/ecdc";

/// Typed fetch failure.
///
/// Callers that want to retry can use [`FetchError::is_transient`]; the app
/// itself treats every variant as fatal for the run.
#[derive(Debug)]
pub enum FetchError {
    /// The request never produced a response (DNS, connect, TLS, ...).
    Transport { url: String, source: reqwest::Error },
    /// The server answered with a non-success status.
    Status { url: String, status: StatusCode },
    /// Reading the body or writing the cache file failed.
    Io { path: PathBuf, source: std::io::Error },
}

impl FetchError {
    /// Whether retrying the same request could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Transport { .. } => true,
            FetchError::Status { status, .. } => status.is_server_error(),
            FetchError::Io { .. } => false,
        }
    }
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Transport { url, source } => {
                write!(f, "Request to {url} failed: {source}")
            }
            FetchError::Status { url, status } => {
                write!(f, "Request to {url} failed with status {status}.")
            }
            FetchError::Io { path, source } => {
                write!(f, "Failed to write cache file '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Transport { source, .. } => Some(source),
            FetchError::Status { .. } => None,
            FetchError::Io { source, .. } => Some(source),
        }
    }
}

/// Local cache path for a quantity's input file.
pub fn cached_path(data_dir: &Path, quantity: Quantity) -> PathBuf {
    data_dir.join(quantity.file_name())
}

/// Download the CSV for `quantity` and save it under `data_dir`.
///
/// Returns the cache path on success. `data_dir` is created on demand.
pub fn fetch_quantity_file(
    client: &Client,
    quantity: Quantity,
    data_dir: &Path,
) -> Result<PathBuf, FetchError> {
    fs::create_dir_all(data_dir).map_err(|source| FetchError::Io {
        path: data_dir.to_path_buf(),
        source,
    })?;

    let url = format!("{BASE_URL}/{}", quantity.file_name());
    let path = cached_path(data_dir, quantity);

    let resp = client
        .get(&url)
        .send()
        .map_err(|source| FetchError::Transport {
            url: url.clone(),
            source,
        })?;

    let status = resp.status();
    if !status.is_success() {
        return Err(FetchError::Status { url, status });
    }

    let body = resp.bytes().map_err(|source| FetchError::Transport {
        url: url.clone(),
        source,
    })?;

    fs::write(&path, &body).map_err(|source| FetchError::Io {
        path: path.clone(),
        source,
    })?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_path_uses_the_quantity_file_name() {
        let path = cached_path(Path::new("data"), Quantity::Deaths);
        assert_eq!(path, PathBuf::from("data/total_deaths.csv"));
    }

    #[test]
    fn transient_classification() {
        let status_5xx = FetchError::Status {
            url: "http://example".to_string(),
            status: StatusCode::BAD_GATEWAY,
        };
        assert!(status_5xx.is_transient());

        let status_404 = FetchError::Status {
            url: "http://example".to_string(),
            status: StatusCode::NOT_FOUND,
        };
        assert!(!status_404.is_transient());

        let io = FetchError::Io {
            path: PathBuf::from("data"),
            source: std::io::Error::other("disk full"),
        };
        assert!(!io.is_transient());
    }
}
