use once_cell::sync::Lazy;
use regex::Regex;

const DOMAIN_MAX: usize = 253;
#[allow(clippy::expect_used)]
static DOMAIN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?$")
        .expect("compile domain regex")
});

/// Checks whether `domain` looks like a host name of an email
/// address, for example `gmail.com` or `mail.example.org`.
///
/// Single-label names (`localhost`) and IP addresses in brackets
/// are rejected.
#[must_use]
pub fn validate_domain(domain: &str) -> bool {
    domain.len() <= DOMAIN_MAX && DOMAIN_REGEX.is_match(domain)
}

#[cfg(test)]
mod tests {
    use super::validate_domain;

    #[test]
    fn test_validate_domain() {
        assert!(validate_domain("gmail.com"));
        assert!(validate_domain("Mail.Example.ORG"));
        assert!(validate_domain("10minutemail.com"));

        assert!(!validate_domain("localhost"));
        assert!(!validate_domain("-bad.com"));
        assert!(!validate_domain("bad-.com"));
        assert!(!validate_domain("[127.0.0.1]"));
        assert!(!validate_domain("has space.com"));
        assert!(!validate_domain(""));
    }
}
