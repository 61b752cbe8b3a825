//! Name resolution backends used by the availability checker

use crate::error::{LocwebError, Result};
use async_trait::async_trait;
use std::net::IpAddr;
use std::time::Duration;
use tokio::time::timeout;

/// Trait for name resolution backends
#[async_trait]
pub trait NameResolver: Send + Sync {
    /// Resolve a domain to its addresses.
    ///
    /// Implementations must report a definite "no such host" answer as
    /// [`LocwebError::NameNotFound`] so the checker can tell it apart from
    /// transport failures.
    async fn resolve(&self, domain: &str) -> Result<Vec<IpAddr>>;

    /// Get the backend name
    fn name(&self) -> &'static str;
}

/// Resolver backed by the operating system's resolver (`getaddrinfo`)
pub struct SystemResolver {
    timeout: Duration,
}

impl SystemResolver {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Whether an OS resolver error message means NXDOMAIN.
    ///
    /// The standard library surfaces `getaddrinfo` failures only as text, so
    /// the platform spellings of `EAI_NONAME` are matched here. "No address
    /// associated with hostname" (`EAI_NODATA`) does not match: the name
    /// exists without address records.
    pub fn is_not_found_message(message: &str) -> bool {
        let msg = message.to_lowercase();
        msg.contains("name or service not known")
            || msg.contains("nodename nor servname provided")
            || msg.contains("no such host is known")
            || msg.contains("non-existent domain")
    }
}

impl Default for SystemResolver {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}

#[async_trait]
impl NameResolver for SystemResolver {
    async fn resolve(&self, domain: &str) -> Result<Vec<IpAddr>> {
        let lookup = tokio::net::lookup_host((domain, 0u16));

        let addrs = timeout(self.timeout, lookup)
            .await
            .map_err(|_| LocwebError::timeout("DNS lookup", self.timeout.as_secs()))?
            .map_err(|e| {
                let message = e.to_string();
                if Self::is_not_found_message(&message) {
                    LocwebError::name_not_found(domain)
                } else {
                    LocwebError::lookup(domain, message)
                }
            })?;

        Ok(addrs.map(|addr| addr.ip()).collect())
    }

    fn name(&self) -> &'static str {
        "system"
    }
}
