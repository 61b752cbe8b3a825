//! Domain suggestion module: candidate generation and availability checking

pub mod checker;
pub mod generator;
pub mod resolver;
pub mod validator;

// Re-export main functionality
pub use checker::{partition_available, DomainChecker};
pub use generator::{generate_candidates, CandidateGenerator};
pub use resolver::{NameResolver, SystemResolver};
pub use validator::DomainValidator;

/// TLD every generated candidate uses
pub const CANDIDATE_TLD: &str = "com";

/// Trailing words dropped from a business name to form its short variant
pub const BUSINESS_SUFFIXES: &[&str] = &[
    "restaurant", "cafe", "bar", "grill", "pizzeria", "bakery", "deli", "pub", "eatery", "kitchen",
    "diner", "bistro",
];
