//! Configuration for the static tenant context plugin.

use serde::{Deserialize, Serialize};
use tenant_context_sdk::{Product, Template, Tenant, TenantConfiguration};

use crate::seed;

/// Plugin configuration.
///
/// Omitting a section keeps the built-in demo data for that section; an
/// explicit empty list clears it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StaticTcPluginConfig {
    /// Tenants in registry order. Order breaks ties between equally good matches.
    pub tenants: Vec<Tenant>,

    /// Products of every tenant, partitioned by `tenant_id` at startup.
    pub products: Vec<Product>,

    pub templates: Vec<Template>,

    pub configurations: Vec<TenantConfiguration>,
}

impl Default for StaticTcPluginConfig {
    fn default() -> Self {
        Self {
            tenants: seed::tenants(),
            products: seed::products(),
            templates: seed::templates(),
            configurations: seed::configurations(),
        }
    }
}
