//! Business record as written by the site generator (`data.json`)

use crate::types::BusinessProfile;
use serde::{Deserialize, Serialize};

/// One address component of a place (`locality`, `route`, ...)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddressComponent {
    #[serde(default)]
    pub long_name: String,
    #[serde(default)]
    pub short_name: String,
    #[serde(default)]
    pub types: Vec<String>,
}

/// Read-only business document keyed by slug.
///
/// Every field is optional; fields not listed here are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BusinessRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub vicinity: Option<String>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub formatted_phone_number: Option<String>,
    #[serde(default)]
    pub international_phone_number: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<u64>,
    #[serde(default)]
    pub photos: Vec<serde_json::Value>,
    #[serde(default)]
    pub address_components: Option<Vec<AddressComponent>>,
    #[serde(default)]
    pub types: Vec<String>,
}

/// City and street used for domain ideas
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BusinessLocation {
    pub city: String,
    pub street: String,
}

impl BusinessRecord {
    /// Short address, falling back to the formatted one
    pub fn address(&self) -> &str {
        non_empty(&self.vicinity)
            .or_else(|| non_empty(&self.formatted_address))
            .unwrap_or("")
    }

    pub fn phone(&self) -> &str {
        non_empty(&self.formatted_phone_number)
            .or_else(|| non_empty(&self.international_phone_number))
            .unwrap_or("")
    }

    pub fn photo_count(&self) -> usize {
        self.photos.len()
    }

    /// Ratings of 4.0 and up are worth showing off
    pub fn has_strong_rating(&self) -> bool {
        self.rating.map_or(false, |rating| rating >= 4.0)
    }

    /// First place type, e.g. `restaurant`
    pub fn category(&self) -> &str {
        self.types.first().map(String::as_str).unwrap_or("")
    }

    /// Derive city and street from address components, or failing that from
    /// the flat address string.
    pub fn location(&self) -> BusinessLocation {
        if let Some(components) = &self.address_components {
            let city = components
                .iter()
                .find(|c| c.types.iter().any(|t| t == "locality"))
                .map(|c| c.long_name.clone())
                .unwrap_or_default();

            let street = components
                .iter()
                .find(|c| c.types.iter().any(|t| t == "route"))
                .map(|c| {
                    first_two_words(&c.long_name)
                        .chars()
                        .filter(|ch| ch.is_ascii_alphanumeric() || ch.is_whitespace())
                        .collect()
                })
                .unwrap_or_default();

            return BusinessLocation { city, street };
        }

        let parts: Vec<&str> = self.address().split(',').collect();
        if parts.len() < 2 {
            return BusinessLocation::default();
        }

        let city = part_from_end(&parts, 3)
            .or_else(|| part_from_end(&parts, 2))
            .unwrap_or_default();

        let without_digits: String = parts[0].chars().filter(|ch| !ch.is_ascii_digit()).collect();
        let street = first_two_words(without_digits.trim())
            .chars()
            .filter(|ch| ch.is_ascii_alphanumeric())
            .collect();

        BusinessLocation { city, street }
    }

    /// Generator input for this business under a display name
    pub fn profile(&self, display_name: &str) -> BusinessProfile {
        let location = self.location();
        BusinessProfile::new(display_name)
            .with_city(location.city)
            .with_street(location.street)
            .with_category(self.category())
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// `n`-th part counting from the end (1 = last), trimmed, if non-empty
fn part_from_end(parts: &[&str], n: usize) -> Option<String> {
    let index = parts.len().checked_sub(n)?;
    let part = parts[index].trim();
    (!part.is_empty()).then(|| part.to_string())
}

/// First two space-separated words, joined by a single space
fn first_two_words(value: &str) -> String {
    value.split(' ').take(2).collect::<Vec<_>>().join(" ")
}
