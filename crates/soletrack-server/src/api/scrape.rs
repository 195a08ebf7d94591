use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Deserialize;
use soletrack_core::ScrapedProduct;
use soletrack_scraper::{ProductScraper, Retailer};

use super::{ApiError, AppState};
use crate::middleware::RequestId;

#[derive(Debug, Deserialize)]
pub(super) struct ScrapeRequest {
    url: String,
}

/// `POST /scrape/{retailer}` — run the extraction pipeline against one
/// product page.
///
/// URL syntax and retailer-shape violations are rejected with 400 before
/// any fetch happens; a fetch failure is the only core error and maps to
/// 500. Extraction itself always yields a best-effort result, returned as
/// the bare `{variants, price_history, images}` body.
pub(super) async fn scrape_product(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(retailer): Path<String>,
    Json(body): Json<ScrapeRequest>,
) -> Result<Json<ScrapedProduct>, ApiError> {
    let Some(retailer) = Retailer::from_slug(&retailer) else {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            format!("unsupported retailer: {retailer}"),
        ));
    };

    if !soletrack_scraper::retailer::is_valid_http_url(&body.url) {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "invalid URL format",
        ));
    }

    if !retailer.profile().is_product_url(&body.url) {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            format!(
                "URL does not appear to be a {} product page",
                retailer.slug()
            ),
        ));
    }

    let scraper = ProductScraper::new(
        state.http.clone(),
        retailer,
        state.config.fetch_user_agent.clone(),
    );

    match scraper.scrape(&body.url).await {
        Ok(product) => Ok(Json(product)),
        Err(err) => {
            tracing::error!(retailer = retailer.slug(), url = %body.url, error = %err, "scrape failed");
            Err(ApiError::new(
                req_id.0,
                "scrape_failed",
                format!("failed to scrape {} page: {err}", retailer.slug()),
            ))
        }
    }
}
