//! Hostname-based tenant resolution.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tenant_context_sdk::{Tenant, TenantRegistry};
use tracing::{debug, info, warn};

use super::error::DomainError;
use super::origin::Origin;
use crate::config::TenantContextConfig;

/// How a tenant was matched. Variants are ordered by priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// The tenant's subdomain equals the hostname's first label.
    Subdomain,
    /// The tenant's domain equals the full hostname.
    ExactDomain,
    /// The tenant's domain occurs inside the hostname (custom domains).
    DomainSubstring,
    /// Nothing matched; the default tenant was used.
    Fallback,
}

impl MatchKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Subdomain => "subdomain",
            Self::ExactDomain => "exact_domain",
            Self::DomainSubstring => "domain_substring",
            Self::Fallback => "fallback",
        }
    }
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of resolving an origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub tenant: Tenant,
    pub matched_by: MatchKind,
}

/// Resolves the active tenant for a hostname against a [`TenantRegistry`].
pub struct TenantResolver {
    registry: Arc<dyn TenantRegistry>,
    default_tenant: Tenant,
    include_inactive: bool,
}

impl TenantResolver {
    #[must_use]
    pub fn new(registry: Arc<dyn TenantRegistry>, config: &TenantContextConfig) -> Self {
        Self {
            registry,
            default_tenant: config.default_tenant.clone(),
            include_inactive: config.include_inactive,
        }
    }

    #[must_use]
    pub fn default_tenant(&self) -> &Tenant {
        &self.default_tenant
    }

    /// Resolves `hostname` to a tenant, falling back to the default tenant
    /// when no registry entry matches.
    ///
    /// # Errors
    ///
    /// - `MalformedHostname` if `hostname` cannot be parsed
    /// - `Registry` if the registry lookup fails
    #[tracing::instrument(skip_all, fields(hostname = %hostname))]
    pub async fn resolve(&self, hostname: &str) -> Result<Resolution, DomainError> {
        let origin = Origin::parse(hostname)?;
        let tenants = self.registry.list_tenants().await?;

        if let Some((tenant, matched_by)) = match_tenant(&tenants, &origin, self.include_inactive)
        {
            debug!(tenant.id = %tenant.id, match_kind = %matched_by, "Matched tenant");
            return Ok(Resolution {
                tenant: tenant.clone(),
                matched_by,
            });
        }

        info!(
            host = %origin,
            tenant.id = %self.default_tenant.id,
            "No tenant matches origin, using default tenant"
        );
        Ok(self.fallback())
    }

    /// Like [`resolve`](Self::resolve), but any failure degrades to the
    /// default tenant.
    pub async fn resolve_or_default(&self, hostname: &str) -> Resolution {
        match self.resolve(hostname).await {
            Ok(resolution) => resolution,
            Err(e) => {
                warn!(
                    hostname,
                    error = %e,
                    tenant.id = %self.default_tenant.id,
                    "Tenant resolution failed, using default tenant"
                );
                self.fallback()
            }
        }
    }

    fn fallback(&self) -> Resolution {
        Resolution {
            tenant: self.default_tenant.clone(),
            matched_by: MatchKind::Fallback,
        }
    }
}

/// Picks the best-matching tenant for `origin`.
///
/// Lower [`MatchKind`] wins; within the same kind the first tenant in
/// registry order wins.
#[must_use]
pub fn match_tenant<'a>(
    tenants: &'a [Tenant],
    origin: &Origin,
    include_inactive: bool,
) -> Option<(&'a Tenant, MatchKind)> {
    let mut best: Option<(&Tenant, MatchKind)> = None;

    for tenant in tenants {
        if !tenant.is_active && !include_inactive {
            continue;
        }
        let Some(kind) = classify(tenant, origin) else {
            continue;
        };

        if best.is_none_or(|(_, cur)| kind < cur) {
            best = Some((tenant, kind));
        }

        if kind == MatchKind::Subdomain {
            break;
        }
    }

    best
}

fn classify(tenant: &Tenant, origin: &Origin) -> Option<MatchKind> {
    let subdomain = tenant.subdomain.trim();
    if !subdomain.is_empty() && subdomain.eq_ignore_ascii_case(origin.subdomain_label()) {
        return Some(MatchKind::Subdomain);
    }

    let domain = tenant.domain.trim().trim_end_matches('.').to_ascii_lowercase();
    if domain.is_empty() {
        return None;
    }
    if domain == origin.host() {
        Some(MatchKind::ExactDomain)
    } else if origin.host().contains(&domain) {
        Some(MatchKind::DomainSubstring)
    } else {
        None
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tenant_context_sdk::{DEFAULT_TENANT_ID, Limit, SubscriptionPlan, TenantContextError};

    struct FixedRegistry(Result<Vec<Tenant>, TenantContextError>);

    #[async_trait]
    impl TenantRegistry for FixedRegistry {
        async fn list_tenants(&self) -> Result<Vec<Tenant>, TenantContextError> {
            self.0.clone()
        }
    }

    fn tenant(id: &str, subdomain: &str, domain: &str) -> Tenant {
        let mut t = Tenant::builtin_default();
        t.id = id.into();
        t.name = id.to_owned();
        t.subdomain = subdomain.to_owned();
        t.domain = domain.to_owned();
        t.plan = SubscriptionPlan::Professional;
        t
    }

    fn resolver(tenants: Vec<Tenant>) -> TenantResolver {
        TenantResolver::new(
            Arc::new(FixedRegistry(Ok(tenants))),
            &TenantContextConfig::default(),
        )
    }

    #[tokio::test]
    async fn subdomain_match_resolves_registered_tenant() {
        let r = resolver(vec![tenant(
            "empresa-exemplo",
            "exemplo",
            "empresaexemplo.com.br",
        )]);

        let resolution = r.resolve("exemplo.empresaexemplo.com.br").await.unwrap();
        assert_eq!(resolution.tenant.id.as_str(), "empresa-exemplo");
        assert_eq!(resolution.matched_by, MatchKind::Subdomain);
    }

    #[tokio::test]
    async fn domain_substring_match_resolves_custom_domain() {
        let r = resolver(vec![tenant("tech-solutions", "", "techsolutions.com")]);

        let resolution = r.resolve("crm.techsolutions.com").await.unwrap();
        assert_eq!(resolution.tenant.id.as_str(), "tech-solutions");
        assert_eq!(resolution.matched_by, MatchKind::DomainSubstring);
    }

    #[tokio::test]
    async fn exact_domain_match() {
        let r = resolver(vec![tenant("tech-solutions", "", "techsolutions.com")]);

        let resolution = r.resolve("TechSolutions.com").await.unwrap();
        assert_eq!(resolution.matched_by, MatchKind::ExactDomain);
    }

    #[tokio::test]
    async fn localhost_falls_back_to_default() {
        let r = resolver(vec![
            tenant("empresa-exemplo", "exemplo", "empresaexemplo.com.br"),
            tenant("tech-solutions", "", "techsolutions.com"),
        ]);

        let resolution = r.resolve("localhost").await.unwrap();
        assert_eq!(resolution.matched_by, MatchKind::Fallback);
        assert_eq!(resolution.tenant.id.as_str(), DEFAULT_TENANT_ID);
        assert_eq!(resolution.tenant.plan, SubscriptionPlan::Enterprise);
        assert_eq!(resolution.tenant.settings.max_products, Limit::Unbounded);
        assert_eq!(resolution.tenant.settings.max_templates, Limit::Unbounded);
    }

    #[tokio::test]
    async fn subdomain_beats_earlier_substring_match() {
        // Both match "acme.techsolutions.com"; the subdomain match is listed second.
        let r = resolver(vec![
            tenant("tech-solutions", "", "techsolutions.com"),
            tenant("acme", "acme", "acme.io"),
        ]);

        let resolution = r.resolve("acme.techsolutions.com").await.unwrap();
        assert_eq!(resolution.tenant.id.as_str(), "acme");
        assert_eq!(resolution.matched_by, MatchKind::Subdomain);
    }

    #[tokio::test]
    async fn exact_domain_beats_substring_match() {
        let r = resolver(vec![
            tenant("broad", "", "solutions.com"),
            tenant("exact", "", "techsolutions.com"),
        ]);

        let resolution = r.resolve("techsolutions.com").await.unwrap();
        assert_eq!(resolution.tenant.id.as_str(), "exact");
        assert_eq!(resolution.matched_by, MatchKind::ExactDomain);
    }

    #[tokio::test]
    async fn registry_order_breaks_ties() {
        let r = resolver(vec![
            tenant("first", "", "techsolutions.com"),
            tenant("second", "", "techsolutions.com"),
        ]);

        let resolution = r.resolve("crm.techsolutions.com").await.unwrap();
        assert_eq!(resolution.tenant.id.as_str(), "first");
    }

    #[tokio::test]
    async fn inactive_tenants_are_skipped_unless_configured() {
        let mut legacy = tenant("legacy", "legacy", "legacy.com");
        legacy.is_active = false;

        let r = resolver(vec![legacy.clone()]);
        let resolution = r.resolve("legacy.legacy.com").await.unwrap();
        assert_eq!(resolution.matched_by, MatchKind::Fallback);

        let config = TenantContextConfig {
            include_inactive: true,
            ..TenantContextConfig::default()
        };
        let r = TenantResolver::new(Arc::new(FixedRegistry(Ok(vec![legacy]))), &config);
        let resolution = r.resolve("legacy.legacy.com").await.unwrap();
        assert_eq!(resolution.tenant.id.as_str(), "legacy");
    }

    #[tokio::test]
    async fn empty_domain_never_matches_everything() {
        let r = resolver(vec![tenant("blank", "", "")]);

        let resolution = r.resolve("anything.example.org").await.unwrap();
        assert_eq!(resolution.matched_by, MatchKind::Fallback);
    }

    #[tokio::test]
    async fn registry_failure_degrades_to_default() {
        let r = TenantResolver::new(
            Arc::new(FixedRegistry(Err(TenantContextError::ServiceUnavailable(
                "directory down".to_owned(),
            )))),
            &TenantContextConfig::default(),
        );

        let err = r.resolve("exemplo.empresaexemplo.com.br").await.unwrap_err();
        assert!(matches!(err, DomainError::Registry(_)));

        let resolution = r.resolve_or_default("exemplo.empresaexemplo.com.br").await;
        assert_eq!(resolution.matched_by, MatchKind::Fallback);
        assert_eq!(resolution.tenant.id.as_str(), DEFAULT_TENANT_ID);
    }

    #[tokio::test]
    async fn malformed_hostname_degrades_to_default() {
        let r = resolver(vec![tenant("acme", "acme", "acme.io")]);

        let resolution = r.resolve_or_default("not a host").await;
        assert_eq!(resolution.matched_by, MatchKind::Fallback);
        assert_eq!(resolution.tenant, Tenant::builtin_default());
    }
}
