//! Public models for the tenant context.
//!
//! These are transport-agnostic data structures shared between the store,
//! its collaborators (registry, data sources, update sink), and consumers.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identifier of the built-in fallback tenant.
pub const DEFAULT_TENANT_ID: &str = "jt-telecom";

/// Every feature name the CRM knows about.
///
/// The built-in default tenant has all of them enabled.
pub const CRM_FEATURES: &[&str] = &[
    "leads",
    "clients",
    "proposals",
    "contracts",
    "tasks",
    "pipelines",
    "telephony",
    "chatbot",
    "automation",
    "reports",
    "integrations",
];

/// Opaque, stable tenant identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(String);

impl TenantId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TenantId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for TenantId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A numeric cap that may be unbounded.
///
/// Serialized as an integer; any negative value (canonically `-1`) is the
/// unbounded sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum Limit {
    #[default]
    Unbounded,
    Max(u32),
}

impl Limit {
    #[must_use]
    pub fn is_unbounded(self) -> bool {
        matches!(self, Self::Unbounded)
    }

    /// Returns `true` if one more item may be added on top of `current`.
    #[must_use]
    pub fn allows(self, current: usize) -> bool {
        match self {
            Self::Unbounded => true,
            Self::Max(max) => match usize::try_from(max) {
                Ok(max) => current < max,
                Err(_) => true,
            },
        }
    }

    /// How many more items fit, or `None` when unbounded.
    #[must_use]
    pub fn remaining(self, current: usize) -> Option<u32> {
        match self {
            Self::Unbounded => None,
            Self::Max(max) => {
                Some(max.saturating_sub(u32::try_from(current).unwrap_or(u32::MAX)))
            }
        }
    }
}

impl From<i64> for Limit {
    fn from(value: i64) -> Self {
        if value < 0 {
            Self::Unbounded
        } else {
            Self::Max(u32::try_from(value).unwrap_or(u32::MAX))
        }
    }
}

impl From<Limit> for i64 {
    fn from(limit: Limit) -> Self {
        match limit {
            Limit::Unbounded => -1,
            Limit::Max(max) => i64::from(max),
        }
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unbounded => f.write_str("unbounded"),
            Self::Max(max) => write!(f, "{max}"),
        }
    }
}

/// Subscription plan of a tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionPlan {
    Basic,
    Professional,
    #[default]
    Enterprise,
}

impl SubscriptionPlan {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Professional => "professional",
            Self::Enterprise => "enterprise",
        }
    }

    /// Seat limit a tenant on this plan gets unless configured otherwise.
    #[must_use]
    pub const fn default_seat_limit(self) -> Limit {
        match self {
            Self::Basic => Limit::Max(5),
            Self::Professional => Limit::Max(25),
            Self::Enterprise => Limit::Unbounded,
        }
    }

    /// Settings a tenant on this plan gets unless configured otherwise.
    #[must_use]
    pub const fn default_settings(self) -> TenantSettings {
        match self {
            Self::Basic => TenantSettings {
                allow_custom_products: true,
                allow_custom_templates: true,
                allow_integrations: false,
                max_products: Limit::Max(10),
                max_templates: Limit::Max(5),
            },
            Self::Professional => TenantSettings {
                allow_custom_products: true,
                allow_custom_templates: true,
                allow_integrations: true,
                max_products: Limit::Max(50),
                max_templates: Limit::Max(25),
            },
            Self::Enterprise => TenantSettings::unrestricted(),
        }
    }
}

impl fmt::Display for SubscriptionPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Branding colors and logo of a tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TenantBranding {
    pub primary_color: String,
    pub secondary_color: String,
    pub logo_url: Option<String>,
}

impl Default for TenantBranding {
    fn default() -> Self {
        Self {
            primary_color: "#1e40af".to_owned(),
            secondary_color: "#64748b".to_owned(),
            logo_url: None,
        }
    }
}

/// Per-tenant permissions and caps for custom records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TenantSettings {
    pub allow_custom_products: bool,
    pub allow_custom_templates: bool,
    pub allow_integrations: bool,
    pub max_products: Limit,
    pub max_templates: Limit,
}

impl TenantSettings {
    /// Everything allowed, no caps.
    #[must_use]
    pub const fn unrestricted() -> Self {
        Self {
            allow_custom_products: true,
            allow_custom_templates: true,
            allow_integrations: true,
            max_products: Limit::Unbounded,
            max_templates: Limit::Unbounded,
        }
    }
}

impl Default for TenantSettings {
    fn default() -> Self {
        Self::unrestricted()
    }
}

/// A named organizational partition of the CRM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Tenant {
    pub id: TenantId,
    pub name: String,
    /// Primary domain, e.g. `empresaexemplo.com.br`.
    #[serde(default)]
    pub domain: String,
    /// Subdomain label, e.g. `exemplo`.
    #[serde(default)]
    pub subdomain: String,
    #[serde(default)]
    pub branding: TenantBranding,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub plan: SubscriptionPlan,
    /// Seat limit.
    #[serde(default)]
    pub max_users: Limit,
    #[serde(default)]
    pub features: BTreeSet<String>,
    #[serde(default)]
    pub settings: TenantSettings,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

impl Tenant {
    /// The fallback tenant used when hostname resolution finds no match.
    #[must_use]
    pub fn builtin_default() -> Self {
        Self {
            id: TenantId::new(DEFAULT_TENANT_ID),
            name: "JT Telecom".to_owned(),
            domain: "jttelecom.com.br".to_owned(),
            subdomain: DEFAULT_TENANT_ID.to_owned(),
            branding: TenantBranding::default(),
            is_active: true,
            plan: SubscriptionPlan::Enterprise,
            max_users: Limit::Unbounded,
            features: CRM_FEATURES.iter().map(|f| (*f).to_owned()).collect(),
            settings: TenantSettings::unrestricted(),
            created_at: DateTime::<Utc>::default(),
            updated_at: DateTime::<Utc>::default(),
        }
    }

    #[must_use]
    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.contains(feature)
    }
}

/// Kind of a tenant-scoped record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Product,
    Template,
    Configuration,
}

impl RecordKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Template => "template",
            Self::Configuration => "configuration",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who authored a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordOrigin {
    /// Shared baseline provided by the platform.
    System,
    /// Authored by a tenant user.
    User(String),
}

/// A record that belongs to exactly one tenant.
pub trait ScopedRecord: Clone + Send + Sync + 'static {
    const KIND: RecordKind;

    fn record_id(&self) -> &str;

    fn tenant_id(&self) -> &TenantId;

    /// System records are immutable and never count against quotas.
    fn is_system(&self) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Product {
    pub id: String,
    pub tenant_id: TenantId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub price: Decimal,
    #[serde(default)]
    pub is_default: bool,
    pub created_by: RecordOrigin,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
}

impl ScopedRecord for Product {
    const KIND: RecordKind = RecordKind::Product;

    fn record_id(&self) -> &str {
        &self.id
    }

    fn tenant_id(&self) -> &TenantId {
        &self.tenant_id
    }

    fn is_system(&self) -> bool {
        self.is_default || self.created_by == RecordOrigin::System
    }
}

/// What a template is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    Proposal,
    Contract,
    Email,
    Message,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Template {
    pub id: String,
    pub tenant_id: TenantId,
    pub name: String,
    pub kind: TemplateKind,
    #[serde(default)]
    pub content: String,
    /// Placeholder names referenced by `content`, e.g. `client_name`.
    #[serde(default)]
    pub variables: Vec<String>,
    #[serde(default)]
    pub is_default: bool,
    pub created_by: RecordOrigin,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
}

impl ScopedRecord for Template {
    const KIND: RecordKind = RecordKind::Template;

    fn record_id(&self) -> &str {
        &self.id
    }

    fn tenant_id(&self) -> &TenantId {
        &self.tenant_id
    }

    fn is_system(&self) -> bool {
        self.is_default || self.created_by == RecordOrigin::System
    }
}

/// A keyed configuration entry of a tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TenantConfiguration {
    pub id: String,
    pub tenant_id: TenantId,
    pub key: String,
    pub value: serde_json::Value,
    #[serde(default)]
    pub is_default: bool,
    pub created_by: RecordOrigin,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
}

impl ScopedRecord for TenantConfiguration {
    const KIND: RecordKind = RecordKind::Configuration;

    fn record_id(&self) -> &str {
        &self.id
    }

    fn tenant_id(&self) -> &TenantId {
        &self.tenant_id
    }

    fn is_system(&self) -> bool {
        self.is_default || self.created_by == RecordOrigin::System
    }
}
