//! Static Tenant Context Plugin
//!
//! Provides the tenant registry and the scoped data collaborators of the
//! tenant context from configuration, backed by memory. Useful for
//! development, demos, and tests.
//!
//! ## Configuration
//!
//! ```yaml
//! static_tc_plugin:
//!   tenants:
//!     - id: "empresa-exemplo"
//!       name: "Empresa Exemplo"
//!       domain: "empresaexemplo.com.br"
//!       subdomain: "exemplo"
//!       plan: professional
//!   products:
//!     - id: "p-1"
//!       tenant_id: "empresa-exemplo"
//!       name: "Fibra 300 Mega"
//!       price: "99.90"
//!       created_by: system
//! ```
//!
//! Omitted sections fall back to the built-in demo data.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use std::sync::Arc;

use tenant_context_sdk::{Tenant, TenantContextError};
use tracing::info;

pub mod config;
pub mod domain;
mod seed;

pub use config::StaticTcPluginConfig;
pub use domain::{InMemoryTenantData, StaticTenantRegistry};

/// The plugin's collaborators, ready to be handed to a tenant store.
#[derive(Clone)]
pub struct StaticTcPlugin {
    pub registry: Arc<StaticTenantRegistry>,
    pub data: Arc<InMemoryTenantData>,
}

impl StaticTcPlugin {
    /// Builds the registry and the in-memory data from configuration.
    ///
    /// # Errors
    ///
    /// Returns `Internal` if the tenant list is invalid (see
    /// [`StaticTenantRegistry::new`]).
    pub fn from_config(config: StaticTcPluginConfig) -> Result<Self, TenantContextError> {
        let StaticTcPluginConfig {
            tenants,
            products,
            templates,
            configurations,
        } = config;

        let data = InMemoryTenantData::new(&tenants, products, templates, configurations);
        let registry = StaticTenantRegistry::new(tenants)?;
        info!(
            tenants = registry.tenants().len(),
            "Static tenant context plugin initialized"
        );

        Ok(Self {
            registry: Arc::new(registry),
            data: Arc::new(data),
        })
    }

    /// Like [`from_config`](Self::from_config), additionally accepting writes
    /// for `default_tenant`.
    ///
    /// # Errors
    ///
    /// Same as [`from_config`](Self::from_config).
    pub fn with_default_tenant(
        config: StaticTcPluginConfig,
        default_tenant: &Tenant,
    ) -> Result<Self, TenantContextError> {
        let plugin = Self::from_config(config)?;
        plugin.data.register_tenant(default_tenant);
        Ok(plugin)
    }
}
