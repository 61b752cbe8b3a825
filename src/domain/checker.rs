//! Domain availability checker

use crate::domain::{CandidateGenerator, NameResolver, SystemResolver};
use crate::types::{AvailabilityResult, BusinessProfile, CheckConfig};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Instant;

/// Classifies candidates as likely available by probing name resolution
pub struct DomainChecker {
    config: CheckConfig,
    resolver: Arc<dyn NameResolver>,
    generator: CandidateGenerator,
}

impl DomainChecker {
    /// Create a new domain checker with default configuration
    pub fn new() -> Self {
        Self::with_config(CheckConfig::default())
    }

    /// Create a domain checker using the system resolver
    pub fn with_config(config: CheckConfig) -> Self {
        let resolver = Arc::new(SystemResolver::new(config.lookup_timeout));
        Self::with_resolver(config, resolver)
    }

    /// Create a domain checker with a custom resolver
    pub fn with_resolver(config: CheckConfig, resolver: Arc<dyn NameResolver>) -> Self {
        Self {
            config,
            resolver,
            generator: CandidateGenerator::new(),
        }
    }

    /// Look up a single domain.
    ///
    /// Resolves → taken. "No such host" → likely available. Any other
    /// failure → taken, so an inconclusive check never advertises a domain.
    pub async fn check_domain(&self, domain: &str) -> AvailabilityResult {
        let start_time = Instant::now();

        let available = match self.resolver.resolve(domain).await {
            Ok(_) => false,
            Err(e) => {
                tracing::debug!(
                    domain = %domain,
                    resolver = self.resolver.name(),
                    error = %e,
                    "Name resolution failed"
                );
                e.suggests_available()
            }
        };

        tracing::debug!(
            domain = %domain,
            available,
            duration_ms = %start_time.elapsed().as_millis(),
            "Domain check completed"
        );

        AvailabilityResult::new(domain, available)
    }

    /// Check candidates in order until enough are available.
    ///
    /// The returned list is a prefix of `candidates` (in lookup order),
    /// stably partitioned so available entries come first.
    pub async fn check_candidates(&self, candidates: &[String]) -> Vec<AvailabilityResult> {
        let batch_start = Instant::now();
        let target = self.config.target_available;
        let mut results = Vec::new();
        let mut available_count = 0usize;

        if target > 0 {
            let mut lookups = stream::iter(candidates.iter().cloned())
                .map(|domain| async move { self.check_domain(&domain).await })
                .buffered(self.config.lookup_concurrency.max(1));

            while let Some(result) = lookups.next().await {
                if result.available {
                    available_count += 1;
                }
                results.push(result);
                if available_count >= target {
                    break;
                }
            }
        }

        tracing::info!(
            candidates = candidates.len(),
            checked = results.len(),
            available = available_count,
            batch_duration_ms = %batch_start.elapsed().as_millis(),
            "Domain availability batch completed"
        );

        partition_available(results)
    }

    /// Generate candidates for a business and check them
    pub async fn suggest(&self, profile: &BusinessProfile) -> Vec<AvailabilityResult> {
        let candidates = self.generator.generate(profile);
        self.check_candidates(&candidates).await
    }

    /// Get checker configuration
    pub fn config(&self) -> &CheckConfig {
        &self.config
    }
}

impl Default for DomainChecker {
    fn default() -> Self {
        Self::new()
    }
}

/// Stable partition: available entries first, relative order kept in each group
pub fn partition_available(results: Vec<AvailabilityResult>) -> Vec<AvailabilityResult> {
    let (mut available, taken): (Vec<_>, Vec<_>) =
        results.into_iter().partition(|result| result.available);
    available.extend(taken);
    available
}
