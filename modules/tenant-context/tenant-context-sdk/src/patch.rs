//! Typed write payloads accepted by a [`TenantDataSink`](crate::TenantDataSink).
//!
//! Every variant targets exactly one scoped collection of the active tenant.
//! The tenant itself is never part of the payload; the store passes the
//! active tenant id alongside the patch.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{RecordKind, TemplateKind};

/// Fields required to create a custom product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub price: Decimal,
    /// Author of the record.
    pub created_by: String,
}

/// Partial update of a product. `None` leaves the field untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Option<Decimal>,
}

/// Fields required to create a custom template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateDraft {
    pub name: String,
    pub kind: TemplateKind,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub variables: Vec<String>,
    pub created_by: String,
}

/// Partial update of a template. `None` leaves the field untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TemplatePatch {
    pub name: Option<String>,
    pub content: Option<String>,
    pub variables: Option<Vec<String>>,
}

/// A single mutation of the active tenant's scoped data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum TenantDataPatch {
    CreateProduct(ProductDraft),
    UpdateProduct { id: String, patch: ProductPatch },
    DeleteProduct { id: String },
    CreateTemplate(TemplateDraft),
    UpdateTemplate { id: String, patch: TemplatePatch },
    DeleteTemplate { id: String },
    UpsertConfiguration { key: String, value: serde_json::Value },
    DeleteConfiguration { key: String },
}

impl TenantDataPatch {
    /// The collection this patch writes to.
    #[must_use]
    pub const fn record_kind(&self) -> RecordKind {
        match self {
            Self::CreateProduct(_) | Self::UpdateProduct { .. } | Self::DeleteProduct { .. } => {
                RecordKind::Product
            }
            Self::CreateTemplate(_) | Self::UpdateTemplate { .. } | Self::DeleteTemplate { .. } => {
                RecordKind::Template
            }
            Self::UpsertConfiguration { .. } | Self::DeleteConfiguration { .. } => {
                RecordKind::Configuration
            }
        }
    }

    /// Short operation name for logs.
    #[must_use]
    pub const fn op_name(&self) -> &'static str {
        match self {
            Self::CreateProduct(_) => "create_product",
            Self::UpdateProduct { .. } => "update_product",
            Self::DeleteProduct { .. } => "delete_product",
            Self::CreateTemplate(_) => "create_template",
            Self::UpdateTemplate { .. } => "update_template",
            Self::DeleteTemplate { .. } => "delete_template",
            Self::UpsertConfiguration { .. } => "upsert_configuration",
            Self::DeleteConfiguration { .. } => "delete_configuration",
        }
    }
}
