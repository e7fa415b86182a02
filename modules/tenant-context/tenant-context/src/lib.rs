//! Tenant Context Module
//!
//! Determines which tenant's data partition is active from the request
//! origin, and owns that tenant plus its scoped products, templates, and
//! configurations.
//!
//! The [`TenantStore`] is an explicit object shared by reference (`Arc`).
//! Consumers read snapshots through accessors or [`TenantStore::subscribe`]
//! and write only through [`TenantStore::update_tenant_data`].
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod domain;

pub use config::TenantContextConfig;
pub use domain::{
    DataSources, DomainError, LifecycleState, MatchKind, Origin, Resolution, TenantResolver,
    TenantSnapshot, TenantStore,
};
