//! Tenant Context SDK
//!
//! This crate provides the public API of the `tenant-context` module:
//!
//! - [`Tenant`], [`TenantSettings`], [`Limit`] - tenant models
//! - [`Product`], [`Template`], [`TenantConfiguration`] - tenant-scoped records
//! - [`TenantRegistry`], [`ScopedDataSource`], [`TenantDataSink`] - collaborator traits
//! - [`TenantDataPatch`] - typed write payloads
//! - [`QuotaUsage`] - per-tenant quota signal
//! - [`TenantContextError`] - error type
//!
//! ## Usage
//!
//! Implementations of the collaborator traits are handed to the store
//! (`tenant_context::TenantStore`), which owns the active tenant and its
//! scoped collections:
//!
//! ```ignore
//! use tenant_context_sdk::{QuotaKind, TenantDataPatch};
//!
//! store.initialize("exemplo.empresaexemplo.com.br").await;
//!
//! let tenant = store.active_tenant();
//! let products = store.products();
//!
//! if store.quota(QuotaKind::Products).is_some_and(|q| q.allows_create()) {
//!     store.update_tenant_data(TenantDataPatch::CreateProduct(draft)).await?;
//! }
//! ```

pub mod api;
pub mod error;
pub mod models;
pub mod patch;
pub mod quota;

// Re-export main types at crate root
pub use api::{ScopedDataSource, TenantDataSink, TenantRegistry};
pub use error::TenantContextError;
pub use models::{
    CRM_FEATURES, DEFAULT_TENANT_ID, Limit, Product, RecordKind, RecordOrigin, ScopedRecord,
    SubscriptionPlan, Template, TemplateKind, Tenant, TenantBranding, TenantConfiguration,
    TenantId, TenantSettings,
};
pub use patch::{ProductDraft, ProductPatch, TemplateDraft, TemplatePatch, TenantDataPatch};
pub use quota::{QuotaKind, QuotaUsage};
