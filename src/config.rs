//! Application configuration, constructed once at startup and passed down

use crate::error::{LocwebError, Result};
use crate::types::CheckConfig;
use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Business facts shown across the site: pricing, contact, refund window
#[derive(Debug, Clone, PartialEq)]
pub struct SiteConfig {
    pub contact_email: String,
    pub contact_phone: String,
    pub upfront_amount: f64,
    pub monthly_amount: f64,
    pub currency: String,
    pub display_upfront: bool,
    pub display_monthly: bool,
    pub refund_days: u32,
    pub company_name: String,
    pub company_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            contact_email: "smolsky.lev@gmail.com".to_string(),
            contact_phone: String::new(),
            upfront_amount: 45.0,
            monthly_amount: 5.0,
            currency: "USD".to_string(),
            display_upfront: true,
            display_monthly: true,
            refund_days: 30,
            company_name: "LocWeb".to_string(),
            company_url: "https://locweb.vercel.app".to_string(),
        }
    }
}

/// Settings controlling the HTTP server binding
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Public URL the site is reachable at, used for checkout return links
    pub base_url: String,
    pub businesses_dir: PathBuf,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self.host.parse().map_err(|_| {
            LocwebError::config(format!(
                "LOCWEB_HOST must parse to an IPv4 or IPv6 address, got '{}'",
                self.host
            ))
        })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            businesses_dir: PathBuf::from("public/businesses"),
        }
    }
}

/// Stripe credentials and price identifiers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StripeConfig {
    pub secret_key: String,
    pub publishable_key: String,
    pub setup_price_id: Option<String>,
    pub monthly_price_id: Option<String>,
    pub api_base: String,
}

/// Tracing controls
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryConfig {
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Top-level configuration for the application
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub site: SiteConfig,
    pub server: ServerConfig,
    pub stripe: StripeConfig,
    pub check: CheckConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load `.env` if present, then read the process environment
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let site_defaults = SiteConfig::default();
        let site = SiteConfig {
            contact_email: get("LOCWEB_CONTACT_EMAIL").unwrap_or(site_defaults.contact_email),
            contact_phone: get("LOCWEB_CONTACT_PHONE").unwrap_or(site_defaults.contact_phone),
            upfront_amount: parse_or("LOCWEB_UPFRONT_AMOUNT", get("LOCWEB_UPFRONT_AMOUNT"), site_defaults.upfront_amount)?,
            monthly_amount: parse_or("LOCWEB_MONTHLY_AMOUNT", get("LOCWEB_MONTHLY_AMOUNT"), site_defaults.monthly_amount)?,
            currency: get("LOCWEB_CURRENCY")
                .map(|c| c.trim().to_uppercase())
                .unwrap_or(site_defaults.currency),
            display_upfront: parse_or("LOCWEB_DISPLAY_UPFRONT", get("LOCWEB_DISPLAY_UPFRONT"), true)?,
            display_monthly: parse_or("LOCWEB_DISPLAY_MONTHLY", get("LOCWEB_DISPLAY_MONTHLY"), true)?,
            refund_days: parse_or("LOCWEB_REFUND_DAYS", get("LOCWEB_REFUND_DAYS"), site_defaults.refund_days)?,
            company_name: get("LOCWEB_COMPANY_NAME").unwrap_or(site_defaults.company_name),
            company_url: get("LOCWEB_COMPANY_URL").unwrap_or(site_defaults.company_url),
        };

        for (key, amount) in [
            ("LOCWEB_UPFRONT_AMOUNT", site.upfront_amount),
            ("LOCWEB_MONTHLY_AMOUNT", site.monthly_amount),
        ] {
            if !amount.is_finite() || amount < 0.0 {
                return Err(LocwebError::config(format!(
                    "{} must be a non-negative number, got {}",
                    key, amount
                )));
            }
        }

        let server_defaults = ServerConfig::default();
        let server = ServerConfig {
            host: get("LOCWEB_HOST").unwrap_or(server_defaults.host),
            port: parse_or("LOCWEB_PORT", get("LOCWEB_PORT"), server_defaults.port)?,
            base_url: get("LOCWEB_BASE_URL")
                .or_else(|| get("NEXT_PUBLIC_BASE_URL"))
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(server_defaults.base_url),
            businesses_dir: get("LOCWEB_BUSINESSES_DIR")
                .map(PathBuf::from)
                .unwrap_or(server_defaults.businesses_dir),
        };

        let stripe = StripeConfig {
            secret_key: get("STRIPE_SECRET_KEY").unwrap_or_default(),
            publishable_key: get("STRIPE_PUBLISHABLE_KEY")
                .or_else(|| get("NEXT_PUBLIC_STRIPE_PUBLISHABLE_KEY"))
                .unwrap_or_default(),
            setup_price_id: get("STRIPE_SETUP_PRICE_ID"),
            monthly_price_id: get("STRIPE_MONTHLY_PRICE_ID"),
            api_base: get("STRIPE_API_BASE")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| "https://api.stripe.com".to_string()),
        };

        let check_defaults = CheckConfig::default();
        let check = CheckConfig {
            target_available: parse_or("LOCWEB_TARGET_AVAILABLE", get("LOCWEB_TARGET_AVAILABLE"), check_defaults.target_available)?,
            lookup_concurrency: parse_or("LOCWEB_LOOKUP_CONCURRENCY", get("LOCWEB_LOOKUP_CONCURRENCY"), check_defaults.lookup_concurrency)?,
            lookup_timeout: get("LOCWEB_LOOKUP_TIMEOUT_SECS")
                .map(|v| parse_value::<u64>("LOCWEB_LOOKUP_TIMEOUT_SECS", &v).map(Duration::from_secs))
                .transpose()?
                .unwrap_or(check_defaults.lookup_timeout),
        };

        if check.lookup_concurrency == 0 {
            return Err(LocwebError::config("LOCWEB_LOOKUP_CONCURRENCY must be at least 1"));
        }

        let telemetry = TelemetryConfig {
            log_level: get("LOCWEB_LOG").unwrap_or_else(|| TelemetryConfig::default().log_level),
        };

        Ok(Self {
            site,
            server,
            stripe,
            check,
            telemetry,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            site: SiteConfig::default(),
            server: ServerConfig::default(),
            stripe: StripeConfig {
                api_base: "https://api.stripe.com".to_string(),
                ..StripeConfig::default()
            },
            check: CheckConfig::default(),
            telemetry: TelemetryConfig::default(),
        }
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| LocwebError::config(format!("{} has an invalid value '{}'", key, value)))
}

fn parse_or<T: FromStr>(key: &str, value: Option<String>, default: T) -> Result<T> {
    match value {
        Some(v) => parse_value(key, &v),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_match_published_offer() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.site, SiteConfig::default());
        assert_eq!(config.site.upfront_amount, 45.0);
        assert_eq!(config.site.monthly_amount, 5.0);
        assert_eq!(config.site.refund_days, 30);
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.stripe.api_base, "https://api.stripe.com");
        assert_eq!(config.check.target_available, 3);
        assert_eq!(config.check.lookup_concurrency, 1);
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("LOCWEB_UPFRONT_AMOUNT", "99.5"),
            ("LOCWEB_CURRENCY", "eur"),
            ("LOCWEB_REFUND_DAYS", "14"),
            ("LOCWEB_BASE_URL", "https://example.test/"),
            ("STRIPE_SETUP_PRICE_ID", "price_setup"),
            ("LOCWEB_LOOKUP_TIMEOUT_SECS", "2"),
            ("LOCWEB_DISPLAY_MONTHLY", "false"),
        ])
        .unwrap();

        assert_eq!(config.site.upfront_amount, 99.5);
        assert_eq!(config.site.currency, "EUR");
        assert_eq!(config.site.refund_days, 14);
        assert!(!config.site.display_monthly);
        assert_eq!(config.server.base_url, "https://example.test");
        assert_eq!(config.stripe.setup_price_id.as_deref(), Some("price_setup"));
        assert_eq!(config.stripe.monthly_price_id, None);
        assert_eq!(config.check.lookup_timeout, Duration::from_secs(2));
    }

    #[test]
    fn rejects_invalid_numbers() {
        let err = config_from(&[("LOCWEB_PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("LOCWEB_PORT"));

        assert!(config_from(&[("LOCWEB_LOOKUP_CONCURRENCY", "0")]).is_err());
        assert!(config_from(&[("LOCWEB_MONTHLY_AMOUNT", "-1")]).is_err());
    }

    #[test]
    fn rejects_non_finite_prices() {
        for value in ["NaN", "inf", "-inf"] {
            let err = config_from(&[("LOCWEB_UPFRONT_AMOUNT", value)]).unwrap_err();
            assert!(err.to_string().contains("LOCWEB_UPFRONT_AMOUNT"), "{value}");
        }
        assert!(config_from(&[("LOCWEB_MONTHLY_AMOUNT", "NaN")]).is_err());
    }

    #[test]
    fn socket_addr_accepts_localhost() {
        let server = ServerConfig {
            host: "localhost".to_string(),
            port: 8080,
            ..ServerConfig::default()
        };
        assert_eq!(server.socket_addr().unwrap().to_string(), "127.0.0.1:8080");

        let bad = ServerConfig {
            host: "not an ip".to_string(),
            ..ServerConfig::default()
        };
        assert!(bad.socket_addr().is_err());
    }
}
