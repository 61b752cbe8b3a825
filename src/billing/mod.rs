//! Hosted checkout and subscription portal sessions
//!
//! Nothing is stored locally: every session lives at the payment provider and
//! carries the business slug and chosen domain as metadata.

pub mod stripe;

pub use stripe::StripeClient;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// What the visitor chose on the checkout page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    #[serde(default)]
    pub business_slug: String,
    #[serde(default)]
    pub customer_email: String,
    #[serde(default)]
    pub selected_domain: String,
}

/// Embedded checkout session handle returned to the browser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSession {
    pub session_id: String,
    pub client_secret: Option<String>,
}

/// Request for a link to the subscription management portal
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalRequest {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub return_url: Option<String>,
}

/// Trait for payment providers
#[async_trait]
pub trait BillingProvider: Send + Sync {
    /// Create a subscription checkout: one-time setup fee plus monthly hosting
    async fn create_checkout_session(&self, request: &CheckoutRequest) -> Result<CheckoutSession>;

    /// Create a portal session and return its URL
    async fn create_portal_session(&self, request: &PortalRequest) -> Result<String>;

    /// Get the provider name
    fn name(&self) -> &'static str;
}
