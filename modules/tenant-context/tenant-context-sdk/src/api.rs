//! Collaborator traits consumed by the tenant store.
//!
//! The store treats these as black boxes. The static plugin provides
//! in-memory implementations; a production deployment would back them
//! with a directory service and a persistence API.

use async_trait::async_trait;

use crate::error::TenantContextError;
use crate::models::{ScopedRecord, Tenant, TenantId};
use crate::patch::TenantDataPatch;

/// Source of known tenants.
#[async_trait]
pub trait TenantRegistry: Send + Sync {
    /// Returns every known tenant in registry order.
    ///
    /// Order matters: when several tenants match a hostname equally well,
    /// the first one wins.
    ///
    /// # Errors
    ///
    /// - `ServiceUnavailable` if the registry cannot be reached
    async fn list_tenants(&self) -> Result<Vec<Tenant>, TenantContextError>;
}

/// Fetches one scoped collection by tenant id.
///
/// Implementations must return only records belonging to `tenant_id`
/// (or an empty sequence).
#[async_trait]
pub trait ScopedDataSource<T: ScopedRecord>: Send + Sync {
    /// # Errors
    ///
    /// Any error makes the store fall back to an empty collection.
    async fn fetch_for_tenant(&self, tenant_id: &TenantId) -> Result<Vec<T>, TenantContextError>;
}

/// Applies writes to the source of truth.
#[async_trait]
pub trait TenantDataSink: Send + Sync {
    /// Applies `patch` to the partition of `tenant_id`.
    ///
    /// # Errors
    ///
    /// - `RecordNotFound` if the patch targets an unknown record
    /// - `ImmutableRecord` if the patch targets a system record
    /// - `QuotaExceeded` / `CustomRecordsDisabled` if the sink enforces quotas
    async fn apply(
        &self,
        tenant_id: &TenantId,
        patch: TenantDataPatch,
    ) -> Result<(), TenantContextError>;
}
