//! Core types and structures for locweb

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Business attributes a set of domain candidates is derived from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessProfile {
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub category: String,
}

impl BusinessProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = city.into();
        self
    }

    pub fn with_street(mut self, street: impl Into<String>) -> Self {
        self.street = street.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }
}

/// Outcome of a single availability lookup.
///
/// Transient: produced per request and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityResult {
    pub domain: String,
    pub available: bool,
}

impl AvailabilityResult {
    pub fn new(domain: impl Into<String>, available: bool) -> Self {
        Self {
            domain: domain.into(),
            available,
        }
    }

    /// Label shown next to the domain on the checkout page
    pub fn label(&self) -> &'static str {
        if self.available {
            "Likely Available"
        } else {
            "Taken"
        }
    }
}

impl std::fmt::Display for AvailabilityResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.domain, self.label())
    }
}

/// Configuration for domain checking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Probing stops once this many candidates are classified available
    pub target_available: usize,
    /// Lookups allowed in flight at once; 1 means strictly sequential
    pub lookup_concurrency: usize,
    pub lookup_timeout: Duration,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            target_available: 3,
            lookup_concurrency: 1,
            lookup_timeout: Duration::from_secs(5),
        }
    }
}
