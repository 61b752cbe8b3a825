//! Server-rendered pages

use crate::business::display_name;
use crate::error::Result;
use crate::pricing::{full_monthly_price, monthly_price, upfront_price};
use crate::types::{AvailabilityResult, BusinessProfile};
use crate::web::AppState;
use askama::Template;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use chrono::{Datelike, Utc};
use serde::Deserialize;

fn render<T: Template>(template: &T) -> Result<Html<String>> {
    Ok(Html(template.render()?))
}

fn current_year() -> i32 {
    Utc::now().year()
}

/// One entry in the demo site list
pub struct BusinessLink {
    pub slug: String,
    pub href: String,
    pub name: String,
}

#[derive(Template)]
#[template(path = "landing.html")]
pub struct LandingTemplate {
    pub company_name: String,
    pub upfront_price: String,
    pub monthly_price: String,
    pub refund_days: u32,
    pub contact_email: String,
    pub year: i32,
}

pub async fn landing(State(state): State<AppState>) -> Result<Html<String>> {
    render(&LandingTemplate {
        company_name: state.site.company_name.clone(),
        upfront_price: upfront_price(&state.site),
        monthly_price: full_monthly_price(&state.site),
        refund_days: state.site.refund_days,
        contact_email: state.site.contact_email.clone(),
        year: current_year(),
    })
}

#[derive(Template)]
#[template(path = "master.html")]
pub struct MasterTemplate {
    pub company_name: String,
    pub businesses: Vec<BusinessLink>,
    pub year: i32,
}

pub async fn master(State(state): State<AppState>) -> Result<Html<String>> {
    let businesses = state
        .store
        .list_slugs()
        .into_iter()
        .map(|slug| BusinessLink {
            href: format!("/web/{}", urlencoding::encode(&slug)),
            name: display_name(&slug),
            slug,
        })
        .collect();

    render(&MasterTemplate {
        company_name: state.site.company_name.clone(),
        businesses,
        year: current_year(),
    })
}

#[derive(Template)]
#[template(path = "preview.html")]
pub struct PreviewTemplate {
    pub company_name: String,
    pub business_name: String,
    pub buy_href: String,
    pub html: String,
}

#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub company_name: String,
    pub business_name: String,
}

/// Demo site inside a sandboxed frame under an upgrade banner
pub async fn preview(State(state): State<AppState>, Path(slug): Path<String>) -> Result<Response> {
    let business_name = display_name(&slug);

    let html = match state.store.preview_html(&slug) {
        Ok(html) => html,
        Err(e) if e.is_client_error() => {
            tracing::debug!(slug = %slug, error = %e, "Rejected demo slug");
            None
        }
        Err(e) => return Err(e),
    };

    let Some(html) = html else {
        tracing::debug!(slug = %slug, "Demo site not found");
        let page = render(&NotFoundTemplate {
            company_name: state.site.company_name.clone(),
            business_name,
        })?;
        return Ok((StatusCode::NOT_FOUND, page).into_response());
    };

    let page = render(&PreviewTemplate {
        company_name: state.site.company_name.clone(),
        business_name,
        buy_href: format!("/buy?bus={}", urlencoding::encode(&slug)),
        html,
    })?;
    Ok(page.into_response())
}

#[derive(Debug, Default, Deserialize)]
pub struct BuyQuery {
    pub bus: Option<String>,
    pub canceled: Option<String>,
}

#[derive(Template)]
#[template(path = "buy.html")]
pub struct BuyTemplate {
    pub company_name: String,
    pub business_name: String,
    pub slug: String,
    pub demo_index_href: String,
    pub demo_href: String,
    pub address: String,
    pub phone: String,
    pub strong_rating: bool,
    pub rating: f64,
    pub reviews: u64,
    pub photo_count: usize,
    pub domains: Vec<AvailabilityResult>,
    pub selected_domain: String,
    pub upfront_price: String,
    pub monthly_price: String,
    pub refund_days: u32,
    pub publishable_key: String,
    pub canceled: bool,
}

/// Checkout page: pitch, preview, domain choice and embedded payment
pub async fn buy(State(state): State<AppState>, Query(query): Query<BuyQuery>) -> Result<Html<String>> {
    let slug = query.bus.unwrap_or_default();
    let business_name = display_name(&slug);

    let record = if slug.is_empty() {
        None
    } else {
        state.store.load(&slug)?
    };

    let domains = if business_name.trim().is_empty() {
        Vec::new()
    } else {
        let profile = record
            .as_ref()
            .map(|r| r.profile(&business_name))
            .unwrap_or_else(|| BusinessProfile::new(business_name.clone()));
        state.checker.suggest(&profile).await
    };

    let selected_domain = domains
        .iter()
        .find(|d| d.available)
        .map(|d| d.domain.clone())
        .unwrap_or_default();

    let encoded = urlencoding::encode(&slug).into_owned();
    let record = record.unwrap_or_default();

    render(&BuyTemplate {
        company_name: state.site.company_name.clone(),
        business_name,
        demo_index_href: format!("/businesses/{encoded}/index.html"),
        demo_href: format!("/web/{encoded}"),
        slug,
        address: record.address().to_string(),
        phone: record.phone().to_string(),
        strong_rating: record.has_strong_rating(),
        rating: record.rating.unwrap_or_default(),
        reviews: record.user_ratings_total.unwrap_or_default(),
        photo_count: record.photo_count(),
        domains,
        selected_domain,
        upfront_price: upfront_price(&state.site),
        monthly_price: monthly_price(&state.site),
        refund_days: state.site.refund_days,
        publishable_key: state.publishable_key.clone(),
        canceled: query.canceled.is_some(),
    })
}

#[derive(Debug, Default, Deserialize)]
pub struct SuccessQuery {
    pub session_id: Option<String>,
}

#[derive(Template)]
#[template(path = "buy_success.html")]
pub struct SuccessTemplate {
    pub company_name: String,
    pub company_url: String,
    pub contact_email: String,
    pub session_id: String,
}

pub async fn buy_success(
    State(state): State<AppState>,
    Query(query): Query<SuccessQuery>,
) -> Result<Html<String>> {
    render(&SuccessTemplate {
        company_name: state.site.company_name.clone(),
        company_url: state.site.company_url.clone(),
        contact_email: state.site.contact_email.clone(),
        session_id: query.session_id.unwrap_or_default(),
    })
}

#[derive(Template)]
#[template(path = "buy_cancel.html")]
pub struct CancelTemplate {
    pub company_name: String,
    pub contact_email: String,
    pub refund_days: u32,
}

pub async fn buy_cancel(State(state): State<AppState>) -> Result<Html<String>> {
    render(&CancelTemplate {
        company_name: state.site.company_name.clone(),
        contact_email: state.site.contact_email.clone(),
        refund_days: state.site.refund_days,
    })
}

/// Facts every legal page draws from
#[derive(Template)]
#[template(path = "legal.html")]
pub struct LegalTemplate {
    pub title: String,
    pub company_name: String,
    pub company_url: String,
    pub contact_email: String,
    pub upfront_price: String,
    pub monthly_price: String,
    pub refund_days: u32,
    pub last_updated: String,
    pub page: LegalPage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegalPage {
    Terms,
    Privacy,
    Refund,
}

fn legal(state: &AppState, page: LegalPage) -> Result<Html<String>> {
    let title = match page {
        LegalPage::Terms => "Terms of Service",
        LegalPage::Privacy => "Privacy Policy",
        LegalPage::Refund => "Refund Policy",
    };

    render(&LegalTemplate {
        title: title.to_string(),
        company_name: state.site.company_name.clone(),
        company_url: state.site.company_url.clone(),
        contact_email: state.site.contact_email.clone(),
        upfront_price: upfront_price(&state.site),
        monthly_price: monthly_price(&state.site),
        refund_days: state.site.refund_days,
        last_updated: Utc::now().format("%B %Y").to_string(),
        page,
    })
}

pub async fn terms(State(state): State<AppState>) -> Result<Html<String>> {
    legal(&state, LegalPage::Terms)
}

pub async fn privacy(State(state): State<AppState>) -> Result<Html<String>> {
    legal(&state, LegalPage::Privacy)
}

pub async fn refund_policy(State(state): State<AppState>) -> Result<Html<String>> {
    legal(&state, LegalPage::Refund)
}
