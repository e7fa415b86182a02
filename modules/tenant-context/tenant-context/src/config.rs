//! Configuration for the tenant context module.

use serde::{Deserialize, Serialize};
use tenant_context_sdk::Tenant;

/// Module configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TenantContextConfig {
    /// Tenant that becomes active when the origin matches no registry entry
    /// or resolution fails.
    pub default_tenant: Tenant,

    /// Whether inactive registry tenants take part in hostname resolution.
    pub include_inactive: bool,
}

impl Default for TenantContextConfig {
    fn default() -> Self {
        Self {
            default_tenant: Tenant::builtin_default(),
            include_inactive: false,
        }
    }
}
