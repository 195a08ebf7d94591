//! Product-page fetch collaborator.
//!
//! One GET with a browser-like header set, a bounded timeout, and redirect
//! following. A non-2xx response is a terminal condition for the request;
//! retry policy, if any, belongs to the caller.

use std::time::Duration;

use crate::error::ScrapeError;

/// Build the shared HTTP client used for all product-page fetches.
///
/// Redirects are followed (retailer PDPs bounce through locale redirects)
/// and the timeout bounds the whole request including body read.
///
/// # Errors
///
/// Returns [`ScrapeError::Http`] if the TLS backend cannot be initialized.
pub fn build_http_client(timeout_secs: u64) -> Result<reqwest::Client, ScrapeError> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()?;
    Ok(client)
}

/// Fetch the HTML body of a product page.
///
/// # Errors
///
/// Returns [`ScrapeError::Http`] on transport failure or timeout, and
/// [`ScrapeError::UnexpectedStatus`] on a non-2xx response.
pub async fn fetch_page(
    client: &reqwest::Client,
    url: &str,
    user_agent: &str,
) -> Result<String, ScrapeError> {
    let response = client
        .get(url)
        .header(reqwest::header::USER_AGENT, user_agent)
        .header(
            reqwest::header::ACCEPT,
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        )
        .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.5")
        .header(reqwest::header::CONNECTION, "keep-alive")
        .header("Upgrade-Insecure-Requests", "1")
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(ScrapeError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_owned(),
        });
    }

    Ok(response.text().await?)
}
