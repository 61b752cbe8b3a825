//! LocWeb - checkout site for curated local-business websites
//!
//! Serves demo previews of generated business sites, suggests `.com` domains
//! for each business and checks whether they resolve, then sells the site
//! through an embedded subscription checkout.

pub mod billing;
pub mod business;
pub mod config;
pub mod domain;
pub mod error;
pub mod pricing;
pub mod telemetry;
pub mod types;
pub mod web;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{LocwebError, Result};
pub use types::{AvailabilityResult, BusinessProfile, CheckConfig};

// Re-export main functionality
pub use domain::{generate_candidates, DomainChecker};
pub use web::{router, AppState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
