use crate::constants::DOWNLOAD_TIMEOUT_SECS;
use crate::error::{ConvertError, Result};
use std::time::Duration;

fn download_error(url: &str, reason: impl ToString) -> ConvertError {
    ConvertError::Download {
        url: url.to_string(),
        reason: reason.to_string(),
    }
}

/// Fetches a URL into memory, rejecting non-success HTTP statuses.
///
/// The request timeout is bounded so a dead remote cannot hang the whole
/// batch.
///
/// # Arguments
/// * `url` - The URL to fetch
///
/// # Returns
/// * `Ok(bytes)` - The response body
/// * `Err(ConvertError::Download)` - On connection failure or non-2xx status
pub async fn fetch_url_async(url: &str) -> Result<Vec<u8>> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(DOWNLOAD_TIMEOUT_SECS))
        .build()
        .map_err(|e| download_error(url, format!("failed to create HTTP client: {}", e)))?;

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| download_error(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(download_error(url, format!("HTTP status {}", status)));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| download_error(url, format!("failed to read response body: {}", e)))?;

    Ok(bytes.to_vec())
}

pub fn fetch_url_sync(url: &str) -> Result<Vec<u8>> {
    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| download_error(url, format!("failed to create runtime: {}", e)))?;

    runtime.block_on(fetch_url_async(url))
}
