//! Stripe REST client (form-encoded requests, bearer secret key)

use crate::billing::{BillingProvider, CheckoutRequest, CheckoutSession, PortalRequest};
use crate::config::StripeConfig;
use crate::error::{LocwebError, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// Stripe provider implementation
pub struct StripeClient {
    client: Client,
    secret_key: String,
    api_base: String,
    setup_price_id: Option<String>,
    monthly_price_id: Option<String>,
    /// Public site URL checkout and portal sessions return to
    site_base_url: String,
}

impl StripeClient {
    pub fn new(config: &StripeConfig, site_base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("locweb/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            secret_key: config.secret_key.clone(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            setup_price_id: config.setup_price_id.clone(),
            monthly_price_id: config.monthly_price_id.clone(),
            site_base_url: site_base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!("{}/v1{}", self.api_base, endpoint)
    }

    /// Form fields for an embedded subscription checkout
    pub fn checkout_form(&self, request: &CheckoutRequest) -> Result<Vec<(String, String)>> {
        let (setup_price, monthly_price) = match (&self.setup_price_id, &self.monthly_price_id) {
            (Some(setup), Some(monthly)) => (setup.clone(), monthly.clone()),
            _ => return Err(LocwebError::config("Stripe price IDs not configured")),
        };

        let mut form = vec![
            ("ui_mode".to_string(), "embedded".to_string()),
            ("mode".to_string(), "subscription".to_string()),
            ("payment_method_types[0]".to_string(), "card".to_string()),
            ("line_items[0][price]".to_string(), setup_price),
            ("line_items[0][quantity]".to_string(), "1".to_string()),
            ("line_items[1][price]".to_string(), monthly_price),
            ("line_items[1][quantity]".to_string(), "1".to_string()),
        ];

        if !request.customer_email.is_empty() {
            form.push(("customer_email".to_string(), request.customer_email.clone()));
        }

        for prefix in ["subscription_data[metadata]", "metadata"] {
            form.push((format!("{prefix}[businessSlug]"), request.business_slug.clone()));
            form.push((format!("{prefix}[selectedDomain]"), request.selected_domain.clone()));
        }

        form.push((
            "return_url".to_string(),
            format!(
                "{}/buy/success?session_id={{CHECKOUT_SESSION_ID}}",
                self.site_base_url
            ),
        ));

        Ok(form)
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder, url: &str) -> Result<T> {
        let response = builder.bearer_auth(&self.secret_key).send().await?;

        let status = response.status();
        if !status.is_success() {
            let error = response.json::<StripeErrorEnvelope>().await.ok().map(|e| e.error);
            let message = error
                .as_ref()
                .and_then(|e| e.message.clone())
                .unwrap_or_else(|| format!("Stripe request failed ({})", status));
            let code = error.and_then(|e| e.code);

            tracing::warn!(status = %status, url = %url, code = ?code, "Stripe request rejected");
            return Err(LocwebError::payment(message, code));
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl BillingProvider for StripeClient {
    async fn create_checkout_session(&self, request: &CheckoutRequest) -> Result<CheckoutSession> {
        let form = self.checkout_form(request)?;
        let url = self.build_url("/checkout/sessions");

        let session: StripeCheckoutSession =
            self.send(self.client.post(&url).form(&form), &url).await?;

        tracing::info!(
            session_id = %session.id,
            business = %request.business_slug,
            domain = %request.selected_domain,
            "Checkout session created"
        );

        Ok(CheckoutSession {
            session_id: session.id,
            client_secret: session.client_secret,
        })
    }

    async fn create_portal_session(&self, request: &PortalRequest) -> Result<String> {
        let session_id = request.session_id.as_deref().filter(|s| !s.is_empty());
        let customer_id = request.customer_id.as_deref().filter(|s| !s.is_empty());

        let customer = match (session_id, customer_id) {
            (Some(session_id), _) => {
                if !is_stripe_id(session_id) {
                    return Err(LocwebError::validation("Invalid sessionId"));
                }
                let url = self.build_url(&format!(
                    "/checkout/sessions/{}",
                    urlencoding::encode(session_id)
                ));
                let session: StripeCheckoutSession = self.send(self.client.get(&url), &url).await?;
                session
                    .customer_id()
                    .ok_or_else(|| LocwebError::validation("Could not find customer for this session"))?
            }
            (None, Some(customer_id)) => customer_id.to_string(),
            (None, None) => {
                return Err(LocwebError::validation("sessionId or customerId is required"));
            }
        };

        let return_url = request
            .return_url
            .clone()
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| self.site_base_url.clone());

        let url = self.build_url("/billing_portal/sessions");
        let form = [("customer", customer.as_str()), ("return_url", return_url.as_str())];
        let portal: StripePortalSession = self.send(self.client.post(&url).form(&form), &url).await?;

        tracing::info!(customer = %customer, "Billing portal session created");
        Ok(portal.url)
    }

    fn name(&self) -> &'static str {
        "stripe"
    }
}

/// Stripe object ids look like `cs_test_a1B2`
fn is_stripe_id(id: &str) -> bool {
    id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

// Stripe API structures
#[derive(Debug, Deserialize)]
struct StripeCheckoutSession {
    id: String,
    #[serde(default)]
    client_secret: Option<String>,
    /// Either an id or an expanded customer object
    #[serde(default)]
    customer: Option<serde_json::Value>,
}

impl StripeCheckoutSession {
    fn customer_id(&self) -> Option<String> {
        match self.customer.as_ref()? {
            serde_json::Value::String(id) => Some(id.clone()),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct StripePortalSession {
    url: String,
}

#[derive(Debug, Deserialize)]
struct StripeErrorEnvelope {
    error: StripeError,
}

#[derive(Debug, Deserialize)]
struct StripeError {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
}
