//! In-memory scoped data store.
//!
//! Records are partitioned by tenant at construction time, so a fetch or a
//! write can only ever see the partition of the tenant it was called for.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use tenant_context_sdk::{
    Limit, Product, ProductDraft, ProductPatch, QuotaKind, QuotaUsage, RecordOrigin,
    ScopedDataSource, ScopedRecord, Template, TemplateDraft, TemplatePatch, Tenant,
    TenantConfiguration, TenantContextError, TenantDataPatch, TenantDataSink, TenantId,
};
use tracing::debug;
use uuid::Uuid;

#[derive(Default)]
struct Partition {
    products: Vec<Product>,
    templates: Vec<Template>,
    configurations: Vec<TenantConfiguration>,
}

#[derive(Default)]
struct State {
    /// Tenants the sink accepts writes for; settings drive quota checks.
    tenants: HashMap<TenantId, Tenant>,
    partitions: HashMap<TenantId, Partition>,
}

/// Shared in-memory backend for products, templates, and configurations.
///
/// Implements [`ScopedDataSource`] for all three record types and
/// [`TenantDataSink`] for writes.
#[derive(Default)]
pub struct InMemoryTenantData {
    state: RwLock<State>,
}

impl InMemoryTenantData {
    /// Builds the store from seed records, partitioning them by `tenant_id`.
    #[must_use]
    pub fn new(
        tenants: &[Tenant],
        products: Vec<Product>,
        templates: Vec<Template>,
        configurations: Vec<TenantConfiguration>,
    ) -> Self {
        let mut state = State::default();
        for tenant in tenants {
            state.tenants.insert(tenant.id.clone(), tenant.clone());
        }
        for product in products {
            state
                .partitions
                .entry(product.tenant_id.clone())
                .or_default()
                .products
                .push(product);
        }
        for template in templates {
            state
                .partitions
                .entry(template.tenant_id.clone())
                .or_default()
                .templates
                .push(template);
        }
        for configuration in configurations {
            state
                .partitions
                .entry(configuration.tenant_id.clone())
                .or_default()
                .configurations
                .push(configuration);
        }
        Self {
            state: RwLock::new(state),
        }
    }

    /// Accepts writes for `tenant`, e.g. the default tenant which is not part
    /// of the registry.
    pub fn register_tenant(&self, tenant: &Tenant) {
        self.state
            .write()
            .tenants
            .insert(tenant.id.clone(), tenant.clone());
    }

    fn read_partition<T: Clone>(
        &self,
        tenant_id: &TenantId,
        select: impl Fn(&Partition) -> &[T],
    ) -> Vec<T> {
        self.state
            .read()
            .partitions
            .get(tenant_id)
            .map(|p| select(p).to_vec())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ScopedDataSource<Product> for InMemoryTenantData {
    async fn fetch_for_tenant(
        &self,
        tenant_id: &TenantId,
    ) -> Result<Vec<Product>, TenantContextError> {
        Ok(self.read_partition(tenant_id, |p| &p.products))
    }
}

#[async_trait]
impl ScopedDataSource<Template> for InMemoryTenantData {
    async fn fetch_for_tenant(
        &self,
        tenant_id: &TenantId,
    ) -> Result<Vec<Template>, TenantContextError> {
        Ok(self.read_partition(tenant_id, |p| &p.templates))
    }
}

#[async_trait]
impl ScopedDataSource<TenantConfiguration> for InMemoryTenantData {
    async fn fetch_for_tenant(
        &self,
        tenant_id: &TenantId,
    ) -> Result<Vec<TenantConfiguration>, TenantContextError> {
        Ok(self.read_partition(tenant_id, |p| &p.configurations))
    }
}

#[async_trait]
impl TenantDataSink for InMemoryTenantData {
    #[tracing::instrument(skip_all, fields(tenant.id = %tenant_id, op = patch.op_name()))]
    async fn apply(
        &self,
        tenant_id: &TenantId,
        patch: TenantDataPatch,
    ) -> Result<(), TenantContextError> {
        let mut guard = self.state.write();
        let State {
            tenants,
            partitions,
        } = &mut *guard;

        let tenant = tenants
            .get(tenant_id)
            .ok_or_else(|| TenantContextError::TenantNotFound {
                tenant_id: tenant_id.clone(),
            })?;
        let partition = partitions.entry(tenant_id.clone()).or_default();

        match patch {
            TenantDataPatch::CreateProduct(draft) => {
                ensure_can_create(QuotaUsage::compute(
                    QuotaKind::Products,
                    tenant,
                    &partition.products,
                ))?;
                partition.products.push(new_product(tenant_id, draft));
            }
            TenantDataPatch::UpdateProduct { id, patch } => {
                let product = find_mutable(&mut partition.products, &id)?;
                apply_product_patch(product, patch);
            }
            TenantDataPatch::DeleteProduct { id } => {
                remove_mutable(&mut partition.products, &id)?;
            }
            TenantDataPatch::CreateTemplate(draft) => {
                ensure_can_create(QuotaUsage::compute(
                    QuotaKind::Templates,
                    tenant,
                    &partition.templates,
                ))?;
                partition.templates.push(new_template(tenant_id, draft));
            }
            TenantDataPatch::UpdateTemplate { id, patch } => {
                let template = find_mutable(&mut partition.templates, &id)?;
                apply_template_patch(template, patch);
            }
            TenantDataPatch::DeleteTemplate { id } => {
                remove_mutable(&mut partition.templates, &id)?;
            }
            TenantDataPatch::UpsertConfiguration { key, value } => {
                upsert_configuration(&mut partition.configurations, tenant_id, key, value)?;
            }
            TenantDataPatch::DeleteConfiguration { key } => {
                let id = partition
                    .configurations
                    .iter()
                    .find(|c| c.key == key)
                    .map(|c| c.id.clone())
                    .ok_or(TenantContextError::RecordNotFound {
                        kind: TenantConfiguration::KIND,
                        id: key,
                    })?;
                remove_mutable(&mut partition.configurations, &id)?;
            }
        }

        debug!("Tenant data patch applied");
        Ok(())
    }
}

fn ensure_can_create(usage: QuotaUsage) -> Result<(), TenantContextError> {
    if !usage.custom_allowed {
        return Err(TenantContextError::CustomRecordsDisabled { kind: usage.kind });
    }
    match usage.limit {
        Limit::Max(limit) if !usage.allows_create() => Err(TenantContextError::QuotaExceeded {
            kind: usage.kind,
            limit,
        }),
        _ => Ok(()),
    }
}

fn find_mutable<'a, T: ScopedRecord>(
    records: &'a mut [T],
    id: &str,
) -> Result<&'a mut T, TenantContextError> {
    let record = records
        .iter_mut()
        .find(|r| r.record_id() == id)
        .ok_or_else(|| TenantContextError::RecordNotFound {
            kind: T::KIND,
            id: id.to_owned(),
        })?;
    if record.is_system() {
        return Err(TenantContextError::ImmutableRecord {
            kind: T::KIND,
            id: id.to_owned(),
        });
    }
    Ok(record)
}

fn remove_mutable<T: ScopedRecord>(
    records: &mut Vec<T>,
    id: &str,
) -> Result<T, TenantContextError> {
    let index = records
        .iter()
        .position(|r| r.record_id() == id)
        .ok_or_else(|| TenantContextError::RecordNotFound {
            kind: T::KIND,
            id: id.to_owned(),
        })?;
    if records[index].is_system() {
        return Err(TenantContextError::ImmutableRecord {
            kind: T::KIND,
            id: id.to_owned(),
        });
    }
    Ok(records.remove(index))
}

fn new_product(tenant_id: &TenantId, draft: ProductDraft) -> Product {
    let now = Utc::now();
    Product {
        id: Uuid::new_v4().to_string(),
        tenant_id: tenant_id.clone(),
        name: draft.name,
        description: draft.description,
        category: draft.category,
        price: draft.price,
        is_default: false,
        created_by: RecordOrigin::User(draft.created_by),
        created_at: now,
        updated_at: now,
    }
}

fn apply_product_patch(product: &mut Product, patch: ProductPatch) {
    if let Some(name) = patch.name {
        product.name = name;
    }
    if let Some(description) = patch.description {
        product.description = description;
    }
    if let Some(category) = patch.category {
        product.category = category;
    }
    if let Some(price) = patch.price {
        product.price = price;
    }
    product.updated_at = Utc::now();
}

fn new_template(tenant_id: &TenantId, draft: TemplateDraft) -> Template {
    let now = Utc::now();
    Template {
        id: Uuid::new_v4().to_string(),
        tenant_id: tenant_id.clone(),
        name: draft.name,
        kind: draft.kind,
        content: draft.content,
        variables: draft.variables,
        is_default: false,
        created_by: RecordOrigin::User(draft.created_by),
        created_at: now,
        updated_at: now,
    }
}

fn apply_template_patch(template: &mut Template, patch: TemplatePatch) {
    if let Some(name) = patch.name {
        template.name = name;
    }
    if let Some(content) = patch.content {
        template.content = content;
    }
    if let Some(variables) = patch.variables {
        template.variables = variables;
    }
    template.updated_at = Utc::now();
}

fn upsert_configuration(
    configurations: &mut Vec<TenantConfiguration>,
    tenant_id: &TenantId,
    key: String,
    value: serde_json::Value,
) -> Result<(), TenantContextError> {
    if let Some(existing) = configurations.iter_mut().find(|c| c.key == key) {
        if existing.is_system() {
            return Err(TenantContextError::ImmutableRecord {
                kind: TenantConfiguration::KIND,
                id: existing.id.clone(),
            });
        }
        existing.value = value;
        existing.updated_at = Utc::now();
        return Ok(());
    }

    configurations.push(TenantConfiguration {
        id: Uuid::new_v4().to_string(),
        tenant_id: tenant_id.clone(),
        key,
        value,
        is_default: false,
        created_by: RecordOrigin::User(tenant_id.to_string()),
        updated_at: Utc::now(),
    });
    Ok(())
}
