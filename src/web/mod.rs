//! HTTP surface: marketing pages, demo previews, checkout API

pub mod api;
pub mod pages;

use crate::billing::{BillingProvider, StripeClient};
use crate::business::BusinessStore;
use crate::config::{AppConfig, SiteConfig};
use crate::domain::DomainChecker;
use crate::error::{LocwebError, Result};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Shared handler state; cheap to clone
#[derive(Clone)]
pub struct AppState {
    pub site: Arc<SiteConfig>,
    pub base_url: String,
    pub publishable_key: String,
    pub store: BusinessStore,
    pub checker: Arc<DomainChecker>,
    pub billing: Arc<dyn BillingProvider>,
}

impl AppState {
    /// Wire the production collaborators from configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let billing = StripeClient::new(&config.stripe, config.server.base_url.clone())?;

        Ok(Self {
            site: Arc::new(config.site.clone()),
            base_url: config.server.base_url.clone(),
            publishable_key: config.stripe.publishable_key.clone(),
            store: BusinessStore::new(config.server.businesses_dir.clone()),
            checker: Arc::new(DomainChecker::with_config(config.check.clone())),
            billing: Arc::new(billing),
        })
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    let business_files = ServeDir::new(state.store.root().to_path_buf());

    Router::new()
        .route("/", get(pages::landing))
        .route("/master", get(pages::master))
        .route("/web/:slug", get(pages::preview))
        .route("/buy", get(pages::buy))
        .route("/buy/success", get(pages::buy_success))
        .route("/buy/cancel", get(pages::buy_cancel))
        .route("/terms", get(pages::terms))
        .route("/privacy", get(pages::privacy))
        .route("/refund-policy", get(pages::refund_policy))
        .route("/health", get(api::health))
        .route("/api/domains", get(api::domains))
        .route("/api/checkout", post(api::checkout))
        .route("/api/portal", post(api::portal))
        .nest_service("/businesses", business_files)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until the process is stopped
pub async fn serve(config: AppConfig) -> Result<()> {
    let state = AppState::from_config(&config)?;
    if config.stripe.secret_key.is_empty() {
        tracing::warn!("STRIPE_SECRET_KEY is not set; checkout requests will be rejected");
    }

    let app = router(state);
    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(
        %addr,
        businesses_dir = %config.server.businesses_dir.display(),
        base_url = %config.server.base_url,
        "locweb ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

impl IntoResponse for LocwebError {
    fn into_response(self) -> Response {
        if self.is_client_error() {
            let body = Json(json!({ "error": self.to_string() }));
            return (StatusCode::BAD_REQUEST, body).into_response();
        }

        tracing::error!(error = %self, "Request failed");
        let body = Json(json!({ "error": "Internal server error" }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(err: LocwebError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn server_errors_hide_details() {
        let (status, body) = body_of(LocwebError::io(
            "permission denied",
            Some("/srv/businesses/joes/index.html".to_string()),
        ))
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Internal server error" }));

        let (status, body) = body_of(LocwebError::Template {
            message: "missing field `rating`".to_string(),
        })
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.to_string().contains("rating"));
    }

    #[tokio::test]
    async fn validation_errors_keep_their_message() {
        let (status, body) = body_of(LocwebError::validation("bus or name is required")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "bus or name is required");
    }
}
