//! Key Namespace
//!
//! Deterministic mapping from logical entities (domain, account email, the
//! most-recent-user pointer) to object store keys under a configured prefix.
//!
//! The layout is fixed for compatibility with existing stored data:
//!
//! ```text
//! <prefix>/domain/<domain>     certificate bundle for one domain
//! <prefix>/user/<email>        ACME account data
//! <prefix>/user/recent         email of the most recently stored account
//! ```
//!
//! Domains and emails are lowercased before key construction, so lookups are
//! case-insensitive by construction. No other validation is performed; an
//! empty domain or email produces a well-formed but degenerate key, which is
//! the caller's responsibility to avoid.

/// Key derivation for a single storage prefix.
///
/// Pure and infallible; all methods are side-effect free.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyNamespace {
    prefix: String,
}

impl KeyNamespace {
    /// Create a namespace rooted at the given prefix (no trailing slash).
    pub fn new(prefix: impl Into<String>) -> Self {
        KeyNamespace {
            prefix: prefix.into(),
        }
    }

    /// Namespace for a given ACME CA host, e.g. `acme-v02.api.letsencrypt.org`.
    pub fn for_ca_host(host: &str) -> Self {
        KeyNamespace::new(format!("acme/{}", host))
    }

    /// Key for a domain's certificate bundle.
    pub fn domain_key(&self, domain: &str) -> String {
        format!("{}/domain/{}", self.prefix, domain.to_lowercase())
    }

    /// Key for an ACME account.
    pub fn user_key(&self, email: &str) -> String {
        format!("{}/user/{}", self.prefix, email.to_lowercase())
    }

    /// Key for the most-recent-user pointer.
    pub fn recent_user_key(&self) -> String {
        format!("{}/user/recent", self.prefix)
    }

    /// The configured prefix (for diagnostics).
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_key_layout() {
        let keys = KeyNamespace::new("acme/ca.example.org");
        assert_eq!(
            keys.domain_key("example.com"),
            "acme/ca.example.org/domain/example.com"
        );
    }

    #[test]
    fn test_keys_are_lowercased() {
        let keys = KeyNamespace::new("acme/ca.example.org");
        assert_eq!(
            keys.domain_key("Example.COM"),
            keys.domain_key("example.com")
        );
        assert_eq!(
            keys.user_key("Me@Example.com"),
            keys.user_key("me@example.com")
        );
    }

    #[test]
    fn test_recent_pointer_lives_under_user() {
        let keys = KeyNamespace::new("acme/ca.example.org");
        assert_eq!(keys.recent_user_key(), "acme/ca.example.org/user/recent");
    }

    #[test]
    fn test_for_ca_host_prefix() {
        let keys = KeyNamespace::for_ca_host("acme-v02.api.letsencrypt.org");
        assert_eq!(keys.prefix(), "acme/acme-v02.api.letsencrypt.org");
    }

    #[test]
    fn test_empty_inputs_are_degenerate_but_well_formed() {
        let keys = KeyNamespace::new("acme/ca");
        assert_eq!(keys.domain_key(""), "acme/ca/domain/");
        assert_eq!(keys.user_key(""), "acme/ca/user/");
    }
}
