//! Domain layer for the tenant context.

pub mod error;
pub mod origin;
pub mod resolver;
pub mod snapshot;
pub mod store;

pub use error::DomainError;
pub use origin::Origin;
pub use resolver::{MatchKind, Resolution, TenantResolver};
pub use snapshot::{LifecycleState, TenantSnapshot};
pub use store::{DataSources, TenantStore};
