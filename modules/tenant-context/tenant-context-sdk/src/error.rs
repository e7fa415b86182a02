//! Error types for the tenant context.

use thiserror::Error;

use crate::models::{RecordKind, TenantId};
use crate::quota::QuotaKind;

/// Errors returned by the tenant context and its collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TenantContextError {
    /// The requested tenant was not found.
    #[error("tenant not found: {tenant_id}")]
    TenantNotFound {
        /// The tenant ID that was not found.
        tenant_id: TenantId,
    },

    /// A write was attempted before any tenant became active.
    #[error("no active tenant")]
    NoActiveTenant,

    /// The targeted record does not exist in the active tenant's partition.
    #[error("{kind} not found: {id}")]
    RecordNotFound { kind: RecordKind, id: String },

    /// System records are shared baseline data and cannot be changed.
    #[error("{kind} '{id}' is a system record and cannot be modified")]
    ImmutableRecord { kind: RecordKind, id: String },

    /// The tenant is not permitted to author custom records of this kind.
    #[error("custom {kind} are disabled for this tenant")]
    CustomRecordsDisabled { kind: QuotaKind },

    /// The tenant's cap for custom records is reached.
    #[error("quota exceeded for {kind}: limit {limit}")]
    QuotaExceeded { kind: QuotaKind, limit: u32 },

    /// The collaborator is not reachable.
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}
