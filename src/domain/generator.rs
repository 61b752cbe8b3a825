//! Deterministic domain candidate generation from business attributes

use crate::domain::{BUSINESS_SUFFIXES, CANDIDATE_TLD};
use crate::types::BusinessProfile;
use std::collections::HashSet;

/// Lowercase `input` and keep only `[a-z0-9]`.
///
/// Nothing is inserted in place of removed characters, so `"Joe's Pizza"`
/// becomes `"joespizza"`.
pub fn normalize_label(input: &str) -> String {
    input
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

/// Remove one trailing business suffix (`cafe`, `pub`, ...) from a normalized name.
///
/// When several suffixes match the longest one wins, which is the same as
/// taking the leftmost match anchored at the end.
pub fn strip_business_suffix(name: &str) -> String {
    BUSINESS_SUFFIXES
        .iter()
        .filter(|suffix| name.ends_with(*suffix))
        .max_by_key(|suffix| suffix.len())
        .map(|suffix| name[..name.len() - suffix.len()].to_string())
        .unwrap_or_else(|| name.to_string())
}

/// Derives an ordered, de-duplicated list of `.com` candidates
#[derive(Debug, Clone, Default)]
pub struct CandidateGenerator;

impl CandidateGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generate candidates for a business.
    ///
    /// Pure and deterministic: identical profiles give identical lists.
    pub fn generate(&self, profile: &BusinessProfile) -> Vec<String> {
        let name = normalize_label(&profile.name);
        let city = normalize_label(&profile.city);
        let street = normalize_label(&profile.street);
        let category = normalize_label(&profile.category);
        let short = strip_business_suffix(&name);
        let stripped = short != name;

        let mut labels = vec![name.clone()];
        if stripped {
            labels.push(short.clone());
        }

        if !category.is_empty() {
            if stripped {
                labels.push(format!("{short}{category}"));
            } else {
                labels.push(format!("{name}{category}"));
                labels.push(format!("the{name}{category}"));
            }
        }

        if !city.is_empty() {
            labels.push(format!("{name}{city}"));
            labels.push(format!("{short}{city}"));
            labels.push(format!("{name}in{city}"));
        }

        if street.len() > 3 && street.len() < 12 {
            labels.push(format!("{short}{street}"));
        }

        labels.push(format!("visit{short}"));

        labels.extend([
            format!("{short}spot"),
            format!("{short}place"),
            format!("{short}house"),
            format!("{short}spot{city}"),
            format!("{short}go"),
            format!("{short}now"),
            format!("{name}now"),
            format!("{short}hub"),
            format!("{short}central"),
        ]);

        let candidates: Vec<String> = labels
            .into_iter()
            .filter(|label| !label.is_empty())
            .map(|label| format!("{label}.{CANDIDATE_TLD}"))
            .unique()
            .collect();

        tracing::debug!(
            business = %profile.name,
            candidates = candidates.len(),
            "Generated domain candidates"
        );

        candidates
    }
}

/// Convenience wrapper around [`CandidateGenerator::generate`]
pub fn generate_candidates(name: &str, city: &str, street: &str, category: &str) -> Vec<String> {
    let profile = BusinessProfile::new(name)
        .with_city(city)
        .with_street(street)
        .with_category(category);
    CandidateGenerator::new().generate(&profile)
}

/// Order-preserving uniqueness: first occurrence wins
trait IteratorExt<T>: Iterator<Item = T> + Sized {
    fn unique(self) -> std::vec::IntoIter<T>
    where
        T: Eq + std::hash::Hash + Clone,
    {
        let mut seen = HashSet::new();
        let mut unique_items = Vec::new();

        for item in self {
            if seen.insert(item.clone()) {
                unique_items.push(item);
            }
        }

        unique_items.into_iter()
    }
}

impl<T, I> IteratorExt<T> for I where I: Iterator<Item = T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_label() {
        assert_eq!(normalize_label("Joe's Pizza"), "joespizza");
        assert_eq!(normalize_label("  Main St. #4 "), "mainst4");
        assert_eq!(normalize_label("Café Olé"), "cafol");
        assert_eq!(normalize_label(""), "");
    }

    #[test]
    fn test_strip_business_suffix() {
        assert_eq!(strip_business_suffix("lucysdiner"), "lucys");
        assert_eq!(strip_business_suffix("pizzeriaroma"), "pizzeriaroma");
        assert_eq!(strip_business_suffix("romapizzeria"), "roma");
        assert_eq!(strip_business_suffix("joespizza"), "joespizza");
        // only one suffix is removed
        assert_eq!(strip_business_suffix("pubbar"), "pub");
    }

    #[test]
    fn test_unstripped_name_with_everything() {
        let candidates = generate_candidates("Joe's Pizza", "Springfield", "Main Street", "restaurant");
        assert_eq!(
            candidates,
            vec![
                "joespizza.com",
                "joespizzarestaurant.com",
                "thejoespizzarestaurant.com",
                "joespizzaspringfield.com",
                "joespizzainspringfield.com",
                "joespizzamainstreet.com",
                "visitjoespizza.com",
                "joespizzaspot.com",
                "joespizzaplace.com",
                "joespizzahouse.com",
                "joespizzaspotspringfield.com",
                "joespizzago.com",
                "joespizzanow.com",
                "joespizzahub.com",
                "joespizzacentral.com",
            ]
        );
    }

    #[test]
    fn test_stripped_name_uses_short_variants() {
        let candidates = generate_candidates("Roma Pizzeria", "", "", "restaurant");
        assert_eq!(candidates[0], "romapizzeria.com");
        assert_eq!(candidates[1], "roma.com");
        assert_eq!(candidates[2], "romarestaurant.com");
        assert!(!candidates.contains(&"theromapizzeriarestaurant.com".to_string()));
        assert!(candidates.contains(&"visitroma.com".to_string()));
        assert!(candidates.contains(&"romapizzerianow.com".to_string()));
        assert!(candidates.contains(&"romanow.com".to_string()));
    }

    #[test]
    fn test_pizzeria_prefix_is_not_a_suffix() {
        let candidates = generate_candidates("Pizzeria Roma", "", "", "");
        assert_eq!(candidates[0], "pizzeriaroma.com");
        assert!(!candidates.contains(&"pizzeria.com".to_string()));
        assert!(candidates.contains(&"visitpizzeriaroma.com".to_string()));
    }

    #[test]
    fn test_street_length_bounds() {
        let short_street = generate_candidates("Lucy", "", "Elm", "");
        assert!(!short_street.contains(&"lucyelm.com".to_string()));

        let four = generate_candidates("Lucy", "", "Oaks", "");
        assert!(four.contains(&"lucyoaks.com".to_string()));

        let eleven = generate_candidates("Lucy", "", "Washington1", "");
        assert!(eleven.contains(&"lucywashington1.com".to_string()));

        let twelve = generate_candidates("Lucy", "", "Washington St", "");
        assert!(!twelve.iter().any(|c| c.contains("washington")));
    }

    #[test]
    fn test_no_duplicates() {
        let inputs = [
            ("Bar", "Bar", "Bar Street", "bar"),
            ("Joe's Pizza", "Springfield", "Main Street", "restaurant"),
            ("Sunrise Cafe", "", "", "cafe"),
            ("", "", "", ""),
        ];
        for (name, city, street, category) in inputs {
            let candidates = generate_candidates(name, city, street, category);
            let unique: HashSet<_> = candidates.iter().collect();
            assert_eq!(unique.len(), candidates.len(), "duplicates for {name:?}");
        }
    }

    #[test]
    fn test_empty_labels_are_dropped() {
        let candidates = generate_candidates("!!!", "", "", "");
        assert!(candidates.iter().all(|c| c.len() > ".com".len()));
        assert!(candidates.contains(&"visit.com".to_string()));
        assert!(!candidates.contains(&".com".to_string()));
    }

    #[test]
    fn test_generation_is_idempotent() {
        let first = generate_candidates("Sunrise Bakery", "Newton", "Walnut Street", "bakery");
        let second = generate_candidates("Sunrise Bakery", "Newton", "Walnut Street", "bakery");
        assert_eq!(first, second);
    }
}
