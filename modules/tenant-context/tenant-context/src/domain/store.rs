//! The tenant store: active tenant plus its scoped collections.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use tenant_context_sdk::{
    Product, QuotaKind, QuotaUsage, ScopedDataSource, ScopedRecord, Template, Tenant,
    TenantConfiguration, TenantContextError, TenantDataPatch, TenantDataSink, TenantId,
    TenantRegistry,
};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::resolver::TenantResolver;
use super::snapshot::{LifecycleState, TenantSnapshot};
use crate::config::TenantContextConfig;

/// The three scoped data sources the store loads from.
#[derive(Clone)]
pub struct DataSources {
    pub products: Arc<dyn ScopedDataSource<Product>>,
    pub templates: Arc<dyn ScopedDataSource<Template>>,
    pub configurations: Arc<dyn ScopedDataSource<TenantConfiguration>>,
}

impl DataSources {
    /// Uses one backend for all three collections.
    #[must_use]
    pub fn from_shared<S>(source: &Arc<S>) -> Self
    where
        S: ScopedDataSource<Product>
            + ScopedDataSource<Template>
            + ScopedDataSource<TenantConfiguration>
            + 'static,
    {
        let products: Arc<dyn ScopedDataSource<Product>> = source.clone();
        let templates: Arc<dyn ScopedDataSource<Template>> = source.clone();
        let configurations: Arc<dyn ScopedDataSource<TenantConfiguration>> = source.clone();
        Self {
            products,
            templates,
            configurations,
        }
    }
}

/// Owns the active tenant and its scoped collections.
///
/// State lives in a single `watch` slot holding an `Arc<TenantSnapshot>`.
/// Every change replaces the whole snapshot, so readers never see a
/// half-applied update, and subscribers are notified on each replacement.
pub struct TenantStore {
    resolver: TenantResolver,
    sources: DataSources,
    sink: Arc<dyn TenantDataSink>,
    state: watch::Sender<Arc<TenantSnapshot>>,
    /// Bumped on every load; only the newest load may publish its results.
    load_generation: AtomicU64,
    /// Loads started but not yet settled, stale ones included.
    loads_in_flight: AtomicUsize,
}

impl TenantStore {
    #[must_use]
    pub fn new(
        config: &TenantContextConfig,
        registry: Arc<dyn TenantRegistry>,
        sources: DataSources,
        sink: Arc<dyn TenantDataSink>,
    ) -> Self {
        Self {
            resolver: TenantResolver::new(registry, config),
            sources,
            sink,
            state: watch::Sender::new(Arc::new(TenantSnapshot::default())),
            load_generation: AtomicU64::new(0),
            loads_in_flight: AtomicUsize::new(0),
        }
    }

    /// Resolves the tenant for `hostname`, makes it active, and loads its data.
    ///
    /// Never fails: resolution problems fall back to the default tenant and
    /// load problems fall back to empty collections. The store is `Ready`
    /// once this returns; it stays loading while a concurrently started load
    /// is still in flight.
    #[tracing::instrument(skip_all, fields(hostname = %hostname))]
    pub async fn initialize(&self, hostname: &str) {
        self.modify_state(|s| {
            s.lifecycle = LifecycleState::Resolving;
            s.is_loading = true;
        });

        let resolution = self.resolver.resolve_or_default(hostname).await;
        info!(
            tenant.id = %resolution.tenant.id,
            match_kind = %resolution.matched_by,
            "Active tenant resolved"
        );
        self.set_active_tenant(resolution.tenant);
        self.load_tenant_data().await;

        self.modify_state(|s| {
            s.lifecycle = LifecycleState::Ready;
            s.is_loading = self.loads_in_flight.load(Ordering::SeqCst) > 0;
        });
    }

    /// Replaces the active tenant.
    ///
    /// Does not reload scoped data; call [`load_tenant_data`](Self::load_tenant_data)
    /// afterwards. Switching to a different tenant empties the collections so
    /// the previous tenant's records are never visible under the new one.
    pub fn set_active_tenant(&self, tenant: Tenant) {
        let tenant = Arc::new(tenant);
        self.modify_state(|s| {
            let switched = s.active_tenant.as_ref().is_none_or(|cur| cur.id != tenant.id);
            if switched {
                debug!(tenant.id = %tenant.id, "Switching active tenant");
                s.clear_collections();
            }
            s.active_tenant = Some(tenant);
        });
    }

    /// Loads products, templates, and configurations of the active tenant.
    ///
    /// The three fetches run concurrently and settle independently; a failed
    /// fetch leaves that collection empty. Collections are replaced, never
    /// merged. Results are dropped if a newer load was started meanwhile or
    /// the active tenant changed.
    pub async fn load_tenant_data(&self) {
        let Some(tenant) = self.active_tenant() else {
            debug!("No active tenant, skipping tenant data load");
            return;
        };
        self.load_for(&tenant.id).await;
    }

    #[tracing::instrument(skip_all, fields(tenant.id = %tenant_id, generation))]
    async fn load_for(&self, tenant_id: &TenantId) {
        let generation = self.load_generation.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::Span::current().record("generation", generation);
        self.loads_in_flight.fetch_add(1, Ordering::SeqCst);
        self.modify_state(|s| s.is_loading = true);

        let (products, templates, configurations) = tokio::join!(
            fetch_scoped(self.sources.products.as_ref(), tenant_id),
            fetch_scoped(self.sources.templates.as_ref(), tenant_id),
            fetch_scoped(self.sources.configurations.as_ref(), tenant_id),
        );

        self.state.send_if_modified(|current| {
            let pending = self.loads_in_flight.fetch_sub(1, Ordering::SeqCst) - 1;
            let is_loading = current.lifecycle == LifecycleState::Resolving || pending > 0;

            if self.load_generation.load(Ordering::SeqCst) != generation {
                debug!("Newer load started, discarding results");
                if current.is_loading == is_loading {
                    return false;
                }
                let mut next = TenantSnapshot::clone(current);
                next.is_loading = is_loading;
                *current = Arc::new(next);
                return true;
            }

            let mut next = TenantSnapshot::clone(current);
            next.is_loading = is_loading;

            let still_active = current
                .active_tenant
                .as_ref()
                .is_some_and(|t| &t.id == tenant_id);
            if still_active {
                debug!(
                    products = products.len(),
                    templates = templates.len(),
                    configurations = configurations.len(),
                    "Tenant data loaded"
                );
                next.products = products;
                next.templates = templates;
                next.configurations = configurations;
            } else {
                debug!("Active tenant changed during load, discarding results");
            }

            *current = Arc::new(next);
            true
        });
    }

    /// Applies `patch` through the update sink, then reloads tenant data.
    ///
    /// # Errors
    ///
    /// - `NoActiveTenant` if called before a tenant is active
    /// - any error returned by the sink; no reload happens in that case
    #[tracing::instrument(skip_all, fields(op = patch.op_name()))]
    pub async fn update_tenant_data(
        &self,
        patch: TenantDataPatch,
    ) -> Result<(), TenantContextError> {
        let tenant = self
            .active_tenant()
            .ok_or(TenantContextError::NoActiveTenant)?;

        if let Err(e) = self.sink.apply(&tenant.id, patch).await {
            warn!(tenant.id = %tenant.id, error = %e, "Tenant data update rejected");
            return Err(e);
        }

        self.load_tenant_data().await;
        Ok(())
    }

    /// Current state.
    #[must_use]
    pub fn snapshot(&self) -> Arc<TenantSnapshot> {
        self.state.borrow().clone()
    }

    /// Receives every published snapshot.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Arc<TenantSnapshot>> {
        self.state.subscribe()
    }

    /// `None` until resolution has completed once.
    #[must_use]
    pub fn active_tenant(&self) -> Option<Arc<Tenant>> {
        self.state.borrow().active_tenant.clone()
    }

    #[must_use]
    pub fn products(&self) -> Arc<[Product]> {
        self.state.borrow().products.clone()
    }

    #[must_use]
    pub fn templates(&self) -> Arc<[Template]> {
        self.state.borrow().templates.clone()
    }

    #[must_use]
    pub fn configurations(&self) -> Arc<[TenantConfiguration]> {
        self.state.borrow().configurations.clone()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    #[must_use]
    pub fn lifecycle(&self) -> LifecycleState {
        self.state.borrow().lifecycle
    }

    /// Custom-record usage of the active tenant.
    #[must_use]
    pub fn quota(&self, kind: QuotaKind) -> Option<QuotaUsage> {
        self.state.borrow().quota(kind)
    }

    #[must_use]
    pub fn default_tenant(&self) -> &Tenant {
        self.resolver.default_tenant()
    }

    fn modify_state(&self, f: impl FnOnce(&mut TenantSnapshot)) {
        self.state.send_modify(|current| {
            let mut next = TenantSnapshot::clone(current);
            f(&mut next);
            *current = Arc::new(next);
        });
    }
}

/// Fetches one collection, degrading failures to an empty collection and
/// dropping records that belong to another tenant.
async fn fetch_scoped<T: ScopedRecord>(
    source: &dyn ScopedDataSource<T>,
    tenant_id: &TenantId,
) -> Arc<[T]> {
    match source.fetch_for_tenant(tenant_id).await {
        Ok(records) => {
            let fetched = records.len();
            let scoped: Vec<T> = records
                .into_iter()
                .filter(|r| r.tenant_id() == tenant_id)
                .collect();
            if scoped.len() != fetched {
                warn!(
                    collection = %T::KIND,
                    dropped = fetched.saturating_sub(scoped.len()),
                    "Data source returned records of another tenant, dropped them"
                );
            }
            scoped.into()
        }
        Err(e) => {
            warn!(collection = %T::KIND, error = %e, "Failed to load tenant collection");
            Arc::from(Vec::new())
        }
    }
}
