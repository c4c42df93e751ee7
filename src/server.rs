//! HTTP surface: one route.
//!
//! `POST /api/scrape` takes `{"url": "..."}` and answers with the extracted
//! record. Only a failed fetch produces an error response; a page the engine
//! could not read still yields 200 with placeholder fields, and the form on
//! the other side asks the shop owner to fill in the gaps.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::scrape_product;

#[derive(Clone)]
pub struct AppState {
    pub client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
pub struct ScrapeRequest {
    pub url: String,
}

/// Failure payload, emitted only when the fetch itself fails.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/scrape", post(scrape))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn scrape(
    State(state): State<AppState>,
    Json(request): Json<ScrapeRequest>,
) -> impl IntoResponse {
    info!(url = %request.url, "scrape request");

    match scrape_product(&state.client, &request.url).await {
        Ok(product) => {
            info!(
                title = %product.title,
                platform = ?product.platform,
                discounted = ?product.discounted_price,
                "extraction finished"
            );
            (StatusCode::OK, Json(product)).into_response()
        }
        Err(err) => {
            warn!(url = %request.url, %err, "fetch failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Erro ao buscar dados".to_string(),
                }),
            )
                .into_response()
        }
    }
}
