use tenant_context_sdk::TenantContextError;

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("malformed hostname '{hostname}': {reason}")]
    MalformedHostname { hostname: String, reason: String },

    #[error("tenant registry failed: {0}")]
    Registry(#[from] TenantContextError),
}

impl DomainError {
    #[must_use]
    pub fn malformed(hostname: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedHostname {
            hostname: hostname.into(),
            reason: reason.into(),
        }
    }
}

impl From<DomainError> for TenantContextError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::MalformedHostname { hostname, reason } => {
                Self::Internal(format!("malformed hostname '{hostname}': {reason}"))
            }
            DomainError::Registry(inner) => inner,
        }
    }
}
