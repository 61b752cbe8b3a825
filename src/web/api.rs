use crate::billing::{CheckoutRequest, CheckoutSession, PortalRequest};
use crate::business::display_name;
use crate::domain::DomainValidator;
use crate::error::{LocwebError, Result};
use crate::types::{AvailabilityResult, BusinessProfile};
use crate::web::AppState;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Default, Deserialize)]
pub struct DomainsQuery {
    pub bus: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub category: String,
}

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Domain suggestions for a stored business (`bus`) or ad-hoc attributes
pub async fn domains(
    State(state): State<AppState>,
    Query(query): Query<DomainsQuery>,
) -> Result<Json<Vec<AvailabilityResult>>> {
    let profile = match query.bus.as_deref().filter(|s| !s.is_empty()) {
        Some(slug) => {
            let name = display_name(slug);
            match state.store.load(slug)? {
                Some(record) => record.profile(&name),
                None => BusinessProfile::new(name),
            }
        }
        None => {
            let name = query
                .name
                .filter(|n| !n.trim().is_empty())
                .ok_or_else(|| LocwebError::validation("bus or name is required"))?;
            BusinessProfile::new(name)
                .with_city(query.city)
                .with_street(query.street)
                .with_category(query.category)
        }
    };

    Ok(Json(state.checker.suggest(&profile).await))
}

/// Create an embedded checkout session for the chosen domain
pub async fn checkout(
    State(state): State<AppState>,
    Json(mut request): Json<CheckoutRequest>,
) -> Response {
    if !request.selected_domain.trim().is_empty() {
        match DomainValidator::new().validate(&request.selected_domain) {
            Ok(validated) => request.selected_domain = validated.full_domain,
            Err(e) => return error_response(StatusCode::BAD_REQUEST, e.to_string()),
        }
    }

    match state.billing.create_checkout_session(&request).await {
        Ok(CheckoutSession {
            session_id,
            client_secret,
        }) => Json(json!({ "clientSecret": client_secret, "sessionId": session_id })).into_response(),
        Err(e) => {
            tracing::error!(
                provider = state.billing.name(),
                business = %request.business_slug,
                error = %e,
                "Checkout session creation failed"
            );
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to create checkout session")
        }
    }
}

/// Link to the hosted subscription management portal
pub async fn portal(State(state): State<AppState>, Json(request): Json<PortalRequest>) -> Response {
    match state.billing.create_portal_session(&request).await {
        Ok(url) => Json(json!({ "url": url })).into_response(),
        Err(LocwebError::Validation { message }) => error_response(StatusCode::BAD_REQUEST, message),
        Err(e) => {
            tracing::error!(provider = state.billing.name(), error = %e, "Portal session creation failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to create portal session")
        }
    }
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}
