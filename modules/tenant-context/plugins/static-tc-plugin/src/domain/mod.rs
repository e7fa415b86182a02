//! Domain layer for the static tenant context plugin.

pub mod data;
pub mod registry;

pub use data::InMemoryTenantData;
pub use registry::StaticTenantRegistry;
