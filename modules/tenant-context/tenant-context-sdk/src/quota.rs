//! Quota signal for custom records.
//!
//! The store only reports usage. Whoever creates records compares
//! `custom_count` against `limit` (or calls [`QuotaUsage::allows_create`])
//! before accepting a new custom record.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{Limit, ScopedRecord, Tenant};

/// Which quota-bearing collection a check is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuotaKind {
    Products,
    Templates,
}

impl QuotaKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Products => "products",
            Self::Templates => "templates",
        }
    }
}

impl fmt::Display for QuotaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Usage of one quota for one tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaUsage {
    pub kind: QuotaKind,
    /// Number of non-system records.
    pub custom_count: usize,
    pub limit: Limit,
    /// Whether the tenant may author custom records of this kind at all.
    pub custom_allowed: bool,
}

impl QuotaUsage {
    /// Computes usage for `tenant` over its loaded `records`.
    #[must_use]
    pub fn compute<T: ScopedRecord>(kind: QuotaKind, tenant: &Tenant, records: &[T]) -> Self {
        let custom_count = records
            .iter()
            .filter(|r| r.tenant_id() == &tenant.id && !r.is_system())
            .count();
        let (limit, custom_allowed) = match kind {
            QuotaKind::Products => (
                tenant.settings.max_products,
                tenant.settings.allow_custom_products,
            ),
            QuotaKind::Templates => (
                tenant.settings.max_templates,
                tenant.settings.allow_custom_templates,
            ),
        };
        Self {
            kind,
            custom_count,
            limit,
            custom_allowed,
        }
    }

    /// Returns `true` if one more custom record may be created.
    #[must_use]
    pub fn allows_create(&self) -> bool {
        self.custom_allowed && self.limit.allows(self.custom_count)
    }

    /// Remaining custom records, or `None` when unbounded.
    #[must_use]
    pub fn remaining(&self) -> Option<u32> {
        self.limit.remaining(self.custom_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Product, RecordOrigin, TenantId};
    use chrono::{DateTime, Utc};
    use rust_decimal::Decimal;

    fn product(tenant: &str, id: &str, system: bool) -> Product {
        Product {
            id: id.to_owned(),
            tenant_id: TenantId::from(tenant),
            name: format!("product {id}"),
            description: String::new(),
            category: String::new(),
            price: Decimal::ONE,
            is_default: system,
            created_by: if system {
                RecordOrigin::System
            } else {
                RecordOrigin::User("seller".to_owned())
            },
            created_at: DateTime::<Utc>::default(),
            updated_at: DateTime::<Utc>::default(),
        }
    }

    fn tenant_with_max_products(max: i64) -> Tenant {
        let mut tenant = Tenant::builtin_default();
        tenant.id = TenantId::from("acme");
        tenant.settings.max_products = Limit::from(max);
        tenant
    }

    #[test]
    fn sixth_custom_product_is_denied_at_cap_five() {
        let tenant = tenant_with_max_products(5);
        let mut records: Vec<Product> = (0..5)
            .map(|i| product("acme", &format!("c{i}"), false))
            .collect();
        records.push(product("acme", "sys", true));

        let usage = QuotaUsage::compute(QuotaKind::Products, &tenant, &records);
        assert_eq!(usage.custom_count, 5);
        assert_eq!(usage.limit, Limit::Max(5));
        assert!(!usage.allows_create());
        assert_eq!(usage.remaining(), Some(0));
    }

    #[test]
    fn unbounded_cap_always_allows() {
        let tenant = tenant_with_max_products(-1);
        let records: Vec<Product> = (0..500)
            .map(|i| product("acme", &format!("c{i}"), false))
            .collect();

        let usage = QuotaUsage::compute(QuotaKind::Products, &tenant, &records);
        assert_eq!(usage.custom_count, 500);
        assert!(usage.allows_create());
        assert_eq!(usage.remaining(), None);
    }

    #[test]
    fn records_of_other_tenants_do_not_count() {
        let tenant = tenant_with_max_products(1);
        let records = vec![product("other", "x", false)];

        let usage = QuotaUsage::compute(QuotaKind::Products, &tenant, &records);
        assert_eq!(usage.custom_count, 0);
        assert!(usage.allows_create());
    }

    #[test]
    fn disabled_custom_records_deny_regardless_of_cap() {
        let mut tenant = tenant_with_max_products(-1);
        tenant.settings.allow_custom_products = false;

        let usage = QuotaUsage::compute::<Product>(QuotaKind::Products, &tenant, &[]);
        assert!(!usage.allows_create());
    }
}
