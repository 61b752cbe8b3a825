//! Validation for domains typed in by a visitor at checkout

use crate::error::{LocwebError, Result};
use regex::Regex;

const MAX_DOMAIN_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// Checks the free-text "other domain" field before it reaches the
/// payment provider's metadata.
#[derive(Debug, Clone, Default)]
pub struct DomainValidator;

/// A domain that passed validation, lowercased and without a trailing dot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedDomain {
    pub name: String,
    pub tld: String,
    pub full_domain: String,
}

impl DomainValidator {
    pub fn new() -> Self {
        Self
    }

    /// Normalize and validate, e.g. `" Shop.Example.COM. "` becomes `shop.example.com`
    pub fn validate(&self, input: &str) -> Result<ValidatedDomain> {
        let domain = input.trim().trim_end_matches('.').to_lowercase();

        if domain.is_empty() {
            return Err(LocwebError::validation("Domain name cannot be empty"));
        }
        if domain.len() > MAX_DOMAIN_LEN {
            return Err(LocwebError::validation(format!(
                "Domain name too long (max {MAX_DOMAIN_LEN} characters)"
            )));
        }

        let Some((name, tld)) = domain.rsplit_once('.') else {
            return Err(LocwebError::validation(format!(
                "'{domain}' needs an extension such as .com"
            )));
        };

        let label_re = Regex::new(r"^[a-z0-9]([a-z0-9-]*[a-z0-9])?$")
            .map_err(|e| LocwebError::internal(e.to_string()))?;
        let tld_re = Regex::new(r"^[a-z]{2,63}$").map_err(|e| LocwebError::internal(e.to_string()))?;

        if !tld_re.is_match(tld) {
            return Err(LocwebError::validation(format!("'.{tld}' is not a valid extension")));
        }

        for label in name.split('.') {
            if label.len() > MAX_LABEL_LEN {
                return Err(LocwebError::validation(format!(
                    "Domain label too long (max {MAX_LABEL_LEN} characters)"
                )));
            }
            if !label_re.is_match(label) {
                return Err(LocwebError::validation(format!(
                    "'{domain}' is not a valid domain name"
                )));
            }
        }

        Ok(ValidatedDomain {
            name: name.to_string(),
            tld: tld.to_string(),
            full_domain: domain,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_and_normalizes() {
        let validator = DomainValidator::new();

        let domain = validator.validate("  JoesPizza.COM. ").unwrap();
        assert_eq!(domain.full_domain, "joespizza.com");
        assert_eq!(domain.name, "joespizza");
        assert_eq!(domain.tld, "com");

        let domain = validator.validate("shop.joes-pizza.co").unwrap();
        assert_eq!(domain.name, "shop.joes-pizza");
    }

    #[test]
    fn rejects_malformed_input() {
        let validator = DomainValidator::new();

        for input in [
            "",
            "   ",
            "joespizza",
            "not a domain",
            "-joes.com",
            "joes-.com",
            "joes..com",
            ".com",
            "joes.c",
            "joes.c0m",
            "joe's.com",
        ] {
            let err = validator.validate(input).unwrap_err();
            assert!(err.is_client_error(), "{input:?} should be rejected");
        }
    }

    #[test]
    fn enforces_length_limits() {
        let validator = DomainValidator::new();

        let long_label = format!("{}.com", "a".repeat(64));
        assert!(validator.validate(&long_label).is_err());

        let max_label = format!("{}.com", "a".repeat(63));
        assert!(validator.validate(&max_label).is_ok());

        let long_domain = format!("{}.com", vec!["a".repeat(60); 5].join("."));
        assert!(validator.validate(&long_domain).is_err());
    }
}
