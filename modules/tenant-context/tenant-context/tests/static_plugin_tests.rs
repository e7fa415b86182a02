#![allow(clippy::unwrap_used, clippy::expect_used)]

//! End-to-end tests wiring the tenant store to the static plugin.

use rust_decimal::Decimal;
use static_tc_plugin::{StaticTcPlugin, StaticTcPluginConfig};
use tenant_context::{
    DataSources, LifecycleState, MatchKind, TenantContextConfig, TenantResolver, TenantStore,
};
use tenant_context_sdk::{
    DEFAULT_TENANT_ID, Limit, ProductDraft, QuotaKind, SubscriptionPlan, TenantContextError,
    TenantDataPatch,
};

fn store() -> TenantStore {
    let config = TenantContextConfig::default();
    let plugin = StaticTcPlugin::with_default_tenant(
        StaticTcPluginConfig::default(),
        &config.default_tenant,
    )
    .unwrap();

    TenantStore::new(
        &config,
        plugin.registry.clone(),
        DataSources::from_shared(&plugin.data),
        plugin.data,
    )
}

fn draft(name: &str) -> ProductDraft {
    ProductDraft {
        name: name.to_owned(),
        description: "added by test".to_owned(),
        category: "custom".to_owned(),
        price: Decimal::new(5000, 2),
        created_by: "ana".to_owned(),
    }
}

#[tokio::test]
async fn subdomain_origin_activates_empresa_exemplo() {
    let store = store();

    store.initialize("exemplo.empresaexemplo.com.br").await;

    let tenant = store.active_tenant().unwrap();
    assert_eq!(tenant.id.as_str(), "empresa-exemplo");
    assert_eq!(tenant.plan, SubscriptionPlan::Professional);
    assert_eq!(store.lifecycle(), LifecycleState::Ready);
    assert!(!store.is_loading());
    assert!(!store.products().is_empty());
    assert!(
        store
            .products()
            .iter()
            .all(|p| p.tenant_id.as_str() == "empresa-exemplo")
    );
}

#[tokio::test]
async fn custom_domain_origin_activates_tech_solutions() {
    let store = store();

    store.initialize("crm.techsolutions.com").await;

    assert_eq!(store.active_tenant().unwrap().id.as_str(), "tech-solutions");
    assert_eq!(store.templates().len(), 3);
    assert_eq!(store.configurations().len(), 2);
}

#[tokio::test]
async fn localhost_activates_builtin_default_tenant() {
    let store = store();

    store.initialize("localhost").await;

    let tenant = store.active_tenant().unwrap();
    assert_eq!(tenant.id.as_str(), DEFAULT_TENANT_ID);
    assert_eq!(tenant.plan, SubscriptionPlan::Enterprise);
    assert_eq!(tenant.settings.max_products, Limit::Unbounded);
    assert_eq!(tenant.settings.max_templates, Limit::Unbounded);
    assert_eq!(store.products().len(), 3);
}

#[tokio::test]
async fn deactivated_tenant_is_not_resolved() {
    let store = store();

    store.initialize("legacy.legacytelecom.com.br").await;

    assert_eq!(
        store.active_tenant().unwrap().id.as_str(),
        DEFAULT_TENANT_ID
    );
}

#[tokio::test]
async fn resolver_reports_match_kind() {
    let config = TenantContextConfig::default();
    let plugin = StaticTcPlugin::from_config(StaticTcPluginConfig::default()).unwrap();
    let resolver = TenantResolver::new(plugin.registry, &config);

    let cases = [
        ("exemplo.empresaexemplo.com.br", MatchKind::Subdomain),
        ("empresaexemplo.com.br", MatchKind::ExactDomain),
        ("crm.techsolutions.com", MatchKind::DomainSubstring),
        ("localhost:5173", MatchKind::Fallback),
    ];
    for (hostname, expected) in cases {
        let resolution = resolver.resolve(hostname).await.unwrap();
        assert_eq!(resolution.matched_by, expected, "{hostname}");
    }
}

#[tokio::test]
async fn create_product_refreshes_collection_and_quota() {
    let store = store();
    store.initialize("crm.techsolutions.com").await;

    let before = store.quota(QuotaKind::Products).unwrap();
    assert_eq!(before.custom_count, 4);
    assert!(before.allows_create());

    store
        .update_tenant_data(TenantDataPatch::CreateProduct(draft("Edge Router")))
        .await
        .unwrap();

    assert!(store.products().iter().any(|p| p.name == "Edge Router"));
    let after = store.quota(QuotaKind::Products).unwrap();
    assert_eq!(after.custom_count, 5);
    assert_eq!(after.limit, Limit::Max(5));
    assert!(!after.allows_create());

    let err = store
        .update_tenant_data(TenantDataPatch::CreateProduct(draft("One Too Many")))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        TenantContextError::QuotaExceeded {
            kind: QuotaKind::Products,
            limit: 5,
        }
    );
    assert_eq!(store.quota(QuotaKind::Products).unwrap().custom_count, 5);
}

#[tokio::test]
async fn default_tenant_accepts_writes() {
    let store = store();
    store.initialize("localhost").await;

    store
        .update_tenant_data(TenantDataPatch::UpsertConfiguration {
            key: "telephony.provider".to_owned(),
            value: serde_json::json!("asterisk"),
        })
        .await
        .unwrap();

    assert!(
        store
            .configurations()
            .iter()
            .any(|c| c.key == "telephony.provider")
    );
}

#[tokio::test]
async fn switching_tenants_never_mixes_partitions() {
    let store = store();
    store.initialize("exemplo.empresaexemplo.com.br").await;

    let plugin = StaticTcPlugin::from_config(StaticTcPluginConfig::default()).unwrap();
    let tech = plugin.registry.tenants()[1].clone();
    store.set_active_tenant(tech);
    assert!(store.products().is_empty());

    store.load_tenant_data().await;
    assert!(
        store
            .products()
            .iter()
            .all(|p| p.tenant_id.as_str() == "tech-solutions")
    );
}
