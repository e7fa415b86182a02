//! Built-in demo data.
//!
//! Two active demo tenants, one deactivated tenant, and the shared system
//! baseline (products, templates, configurations) for each of them plus the
//! default tenant.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::json;
use tenant_context_sdk::{
    CRM_FEATURES, DEFAULT_TENANT_ID, Limit, Product, RecordOrigin, SubscriptionPlan, Template,
    TemplateKind, Tenant, TenantBranding, TenantConfiguration, TenantId, TenantSettings,
};

pub const EMPRESA_EXEMPLO: &str = "empresa-exemplo";
pub const TECH_SOLUTIONS: &str = "tech-solutions";
pub const LEGACY: &str = "legacy-telecom";

/// Tenants that receive the system baseline.
const BASELINE_TENANTS: &[&str] = &[DEFAULT_TENANT_ID, EMPRESA_EXEMPLO, TECH_SOLUTIONS];

fn epoch() -> DateTime<Utc> {
    DateTime::<Utc>::default()
}

fn features(names: &[&str]) -> std::collections::BTreeSet<String> {
    names.iter().map(|f| (*f).to_owned()).collect()
}

pub fn tenants() -> Vec<Tenant> {
    let professional = SubscriptionPlan::Professional;
    let basic = SubscriptionPlan::Basic;

    vec![
        Tenant {
            id: TenantId::from(EMPRESA_EXEMPLO),
            name: "Empresa Exemplo".to_owned(),
            domain: "empresaexemplo.com.br".to_owned(),
            subdomain: "exemplo".to_owned(),
            branding: TenantBranding {
                primary_color: "#059669".to_owned(),
                secondary_color: "#475569".to_owned(),
                logo_url: None,
            },
            is_active: true,
            plan: professional,
            max_users: professional.default_seat_limit(),
            features: features(&[
                "leads",
                "clients",
                "proposals",
                "contracts",
                "tasks",
                "pipelines",
                "telephony",
                "reports",
            ]),
            settings: professional.default_settings(),
            created_at: epoch(),
            updated_at: epoch(),
        },
        Tenant {
            id: TenantId::from(TECH_SOLUTIONS),
            name: "Tech Solutions".to_owned(),
            domain: "techsolutions.com".to_owned(),
            subdomain: "tech".to_owned(),
            branding: TenantBranding {
                primary_color: "#7c3aed".to_owned(),
                ..TenantBranding::default()
            },
            is_active: true,
            plan: basic,
            max_users: basic.default_seat_limit(),
            features: features(&["leads", "clients", "proposals", "tasks"]),
            settings: TenantSettings {
                max_products: Limit::Max(5),
                max_templates: Limit::Max(3),
                ..basic.default_settings()
            },
            created_at: epoch(),
            updated_at: epoch(),
        },
        Tenant {
            id: TenantId::from(LEGACY),
            name: "Legacy Telecom".to_owned(),
            domain: "legacytelecom.com.br".to_owned(),
            subdomain: "legacy".to_owned(),
            branding: TenantBranding::default(),
            is_active: false,
            plan: basic,
            max_users: basic.default_seat_limit(),
            features: features(CRM_FEATURES),
            settings: basic.default_settings(),
            created_at: epoch(),
            updated_at: epoch(),
        },
    ]
}

fn product(tenant: &str, key: &str, name: &str, category: &str, cents: i64) -> Product {
    Product {
        id: format!("{tenant}-product-{key}"),
        tenant_id: TenantId::from(tenant),
        name: name.to_owned(),
        description: String::new(),
        category: category.to_owned(),
        price: Decimal::new(cents, 2),
        is_default: true,
        created_by: RecordOrigin::System,
        created_at: epoch(),
        updated_at: epoch(),
    }
}

fn custom_product(tenant: &str, key: &str, name: &str, cents: i64) -> Product {
    Product {
        is_default: false,
        created_by: RecordOrigin::User("admin".to_owned()),
        ..product(tenant, key, name, "custom", cents)
    }
}

pub fn products() -> Vec<Product> {
    let mut products: Vec<Product> = BASELINE_TENANTS
        .iter()
        .flat_map(|tenant| {
            [
                product(tenant, "fiber-300", "Fibra 300 Mega", "internet", 9990),
                product(tenant, "voip", "Telefonia VoIP", "telephony", 4990),
                product(tenant, "dedicated-link", "Link Dedicado", "internet", 129_900),
            ]
        })
        .collect();

    // Four of five custom slots used.
    products.extend([
        custom_product(TECH_SOLUTIONS, "cloud-backup", "Cloud Backup", 2990),
        custom_product(TECH_SOLUTIONS, "helpdesk", "Helpdesk 24x7", 19_900),
        custom_product(TECH_SOLUTIONS, "firewall", "Managed Firewall", 34_900),
        custom_product(TECH_SOLUTIONS, "wifi", "Business Wi-Fi", 8990),
    ]);
    products
}

fn template(tenant: &str, key: &str, name: &str, kind: TemplateKind, content: &str) -> Template {
    let variables = ["client_name", "company_name", "total"]
        .iter()
        .filter(|v| content.contains(&format!("{{{{{v}}}}}")))
        .map(|v| (*v).to_owned())
        .collect();
    Template {
        id: format!("{tenant}-template-{key}"),
        tenant_id: TenantId::from(tenant),
        name: name.to_owned(),
        kind,
        content: content.to_owned(),
        variables,
        is_default: true,
        created_by: RecordOrigin::System,
        created_at: epoch(),
        updated_at: epoch(),
    }
}

pub fn templates() -> Vec<Template> {
    BASELINE_TENANTS
        .iter()
        .flat_map(|tenant| {
            [
                template(
                    tenant,
                    "proposal",
                    "Proposta Comercial",
                    TemplateKind::Proposal,
                    "Prezado {{client_name}}, segue a proposta da {{company_name}}: {{total}}.",
                ),
                template(
                    tenant,
                    "contract",
                    "Contrato de Servico",
                    TemplateKind::Contract,
                    "Contrato entre {{company_name}} e {{client_name}}.",
                ),
                template(
                    tenant,
                    "welcome",
                    "Boas-vindas",
                    TemplateKind::Email,
                    "Ola {{client_name}}, bem-vindo a {{company_name}}!",
                ),
            ]
        })
        .collect()
}

fn configuration(tenant: &str, key: &str, value: serde_json::Value) -> TenantConfiguration {
    TenantConfiguration {
        id: format!("{tenant}-config-{key}"),
        tenant_id: TenantId::from(tenant),
        key: key.to_owned(),
        value,
        is_default: true,
        created_by: RecordOrigin::System,
        updated_at: epoch(),
    }
}

pub fn configurations() -> Vec<TenantConfiguration> {
    BASELINE_TENANTS
        .iter()
        .flat_map(|tenant| {
            [
                configuration(
                    tenant,
                    "pipeline.stages",
                    json!(["lead", "qualified", "proposal", "negotiation", "won", "lost"]),
                ),
                configuration(tenant, "proposal.validity_days", json!(15)),
            ]
        })
        .collect()
}
