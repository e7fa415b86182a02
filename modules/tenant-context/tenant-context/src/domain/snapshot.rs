//! Immutable view of the store state.

use std::sync::Arc;

use serde::Serialize;
use tenant_context_sdk::{Product, QuotaKind, QuotaUsage, Template, Tenant, TenantConfiguration};

/// Store lifecycle: `Uninitialized -> Resolving -> Ready`.
///
/// There is no error state; failures degrade to `Ready` with the default
/// tenant and/or empty collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    #[default]
    Uninitialized,
    Resolving,
    Ready,
}

/// One consistent state of the store.
///
/// Snapshots are never mutated after publication; every change produces a
/// new snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct TenantSnapshot {
    pub lifecycle: LifecycleState,
    pub is_loading: bool,
    pub active_tenant: Option<Arc<Tenant>>,
    pub products: Arc<[Product]>,
    pub templates: Arc<[Template]>,
    pub configurations: Arc<[TenantConfiguration]>,
}

impl Default for TenantSnapshot {
    fn default() -> Self {
        Self {
            lifecycle: LifecycleState::Uninitialized,
            is_loading: false,
            active_tenant: None,
            products: Arc::from(Vec::new()),
            templates: Arc::from(Vec::new()),
            configurations: Arc::from(Vec::new()),
        }
    }
}

impl TenantSnapshot {
    /// Quota usage of the active tenant, `None` before a tenant is active.
    #[must_use]
    pub fn quota(&self, kind: QuotaKind) -> Option<QuotaUsage> {
        let tenant = self.active_tenant.as_deref()?;
        Some(match kind {
            QuotaKind::Products => QuotaUsage::compute(kind, tenant, &self.products),
            QuotaKind::Templates => QuotaUsage::compute(kind, tenant, &self.templates),
        })
    }

    pub(crate) fn clear_collections(&mut self) {
        self.products = Arc::from(Vec::new());
        self.templates = Arc::from(Vec::new());
        self.configurations = Arc::from(Vec::new());
    }
}
