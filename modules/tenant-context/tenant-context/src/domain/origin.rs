//! Request origin parsing.

use std::fmt;

use super::error::DomainError;

/// A normalized request hostname.
///
/// Normalization trims whitespace, drops an optional `scheme://` prefix, any
/// path, a `:port` suffix and a trailing root dot, and lowercases the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    host: String,
}

impl Origin {
    /// Parses a hostname (or a URL-ish origin string).
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MalformedHostname` if nothing usable remains or
    /// the host contains characters that cannot appear in a DNS name.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let mut host = raw.trim();
        if let Some((_, rest)) = host.split_once("://") {
            host = rest;
        }
        if let Some((authority, _)) = host.split_once('/') {
            host = authority;
        }
        if let Some((_, after_userinfo)) = host.rsplit_once('@') {
            host = after_userinfo;
        }
        host = strip_port(host);
        let host = host.trim_end_matches('.').to_ascii_lowercase();

        if host.is_empty() {
            return Err(DomainError::malformed(raw, "empty host"));
        }
        if let Some(bad) = host.chars().find(|c| !is_host_char(*c)) {
            return Err(DomainError::malformed(
                raw,
                format!("unexpected character '{bad}'"),
            ));
        }
        if host.starts_with('.') || host.contains("..") {
            return Err(DomainError::malformed(raw, "empty label"));
        }

        Ok(Self { host })
    }

    /// The full normalized hostname.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Text up to (not including) the first `.`; the whole host when there is none.
    #[must_use]
    pub fn subdomain_label(&self) -> &str {
        self.host
            .split_once('.')
            .map_or(self.host.as_str(), |(label, _)| label)
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.host)
    }
}

fn strip_port(host: &str) -> &str {
    // Bracketed IPv6 literal: keep the brackets, drop what follows.
    if host.starts_with('[') {
        return host.find(']').map_or(host, |end| &host[..=end]);
    }
    match host.rsplit_once(':') {
        Some((name, port)) if port.chars().all(|c| c.is_ascii_digit()) => name,
        _ => host,
    }
}

fn is_host_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '[' | ']' | ':')
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn subdomain_label_is_text_before_first_dot() {
        let origin = Origin::parse("exemplo.empresaexemplo.com.br").unwrap();
        assert_eq!(origin.host(), "exemplo.empresaexemplo.com.br");
        assert_eq!(origin.subdomain_label(), "exemplo");
    }

    #[test]
    fn host_without_dot_is_its_own_label() {
        let origin = Origin::parse("localhost").unwrap();
        assert_eq!(origin.subdomain_label(), "localhost");
    }

    #[test]
    fn normalizes_case_port_scheme_and_trailing_dot() {
        let origin = Origin::parse("  HTTPS://CRM.TechSolutions.com.:8443/login ").unwrap();
        assert_eq!(origin.host(), "crm.techsolutions.com");
        assert_eq!(origin.subdomain_label(), "crm");

        let origin = Origin::parse("localhost:5173").unwrap();
        assert_eq!(origin.host(), "localhost");
    }

    #[test]
    fn keeps_bracketed_ipv6_literal() {
        let origin = Origin::parse("[::1]:8080").unwrap();
        assert_eq!(origin.host(), "[::1]");
    }

    #[test]
    fn rejects_malformed_hosts() {
        for raw in [
            "",
            "   ",
            "https://",
            "bad host.com",
            "a..b",
            ".leading.com",
            "tab\there.com",
        ] {
            let err = Origin::parse(raw).unwrap_err();
            assert!(
                matches!(err, DomainError::MalformedHostname { .. }),
                "expected malformed for {raw:?}"
            );
        }
    }
}
