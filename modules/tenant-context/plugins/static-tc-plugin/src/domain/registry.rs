//! Config-backed tenant registry.

use std::collections::HashSet;

use async_trait::async_trait;
use tenant_context_sdk::{Tenant, TenantContextError, TenantRegistry};

/// Registry serving a fixed, validated tenant list in configuration order.
pub struct StaticTenantRegistry {
    tenants: Vec<Tenant>,
}

impl StaticTenantRegistry {
    /// Creates a registry from tenant configuration.
    ///
    /// # Errors
    ///
    /// Returns `Internal` if a tenant id is empty or duplicated, or if two
    /// tenants claim the same subdomain.
    pub fn new(tenants: Vec<Tenant>) -> Result<Self, TenantContextError> {
        let mut ids = HashSet::new();
        let mut subdomains = HashSet::new();

        for tenant in &tenants {
            let id = tenant.id.as_str().trim();
            if id.is_empty() {
                return Err(TenantContextError::Internal(
                    "invalid tenant registry: empty tenant id".to_owned(),
                ));
            }
            if !ids.insert(id) {
                return Err(TenantContextError::Internal(format!(
                    "invalid tenant registry: duplicate tenant id '{id}'"
                )));
            }

            let subdomain = tenant.subdomain.trim().to_ascii_lowercase();
            if !subdomain.is_empty() && !subdomains.insert(subdomain.clone()) {
                return Err(TenantContextError::Internal(format!(
                    "invalid tenant registry: subdomain '{subdomain}' is claimed by more than one tenant"
                )));
            }
        }

        Ok(Self { tenants })
    }

    #[must_use]
    pub fn tenants(&self) -> &[Tenant] {
        &self.tenants
    }
}

#[async_trait]
impl TenantRegistry for StaticTenantRegistry {
    async fn list_tenants(&self) -> Result<Vec<Tenant>, TenantContextError> {
        Ok(self.tenants.clone())
    }
}
