use error_stack::{Result, ResultExt};
use regex::Regex;
use std::borrow::Cow;
use thiserror::Error;

use crate::config;

pub mod random;
pub use self::random::looks_random;

/// Providers that ignore dots in the local part of an address.
const NORMALIZED_PROVIDERS: &[&str] = &["gmail.com", "googlemail.com"];

/// Why an email address is not accepted by the [`Policy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    PlusNotAllowed,
    TooShort,
    LooksRandom,
    DomainNotAllowed,
    DomainBlocked,
}

/// An email address split at its first `@`.
///
/// `domain` is always lowercase. `normalized_local_part` is the local
/// part with provider specific folding applied and is only used to
/// measure the address, never to store or compare it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress<'a> {
    pub local_part: &'a str,
    pub domain: String,
    pub normalized_local_part: Cow<'a, str>,
}

impl<'a> EmailAddress<'a> {
    #[must_use]
    pub fn parse(email: &'a str, normalize_gmail: bool) -> Option<Self> {
        let (local_part, domain) = email.split_once('@')?;
        let domain = domain.to_lowercase();

        let normalized_local_part =
            if normalize_gmail && NORMALIZED_PROVIDERS.contains(&domain.as_str()) {
                Cow::Owned(local_part.replace('.', ""))
            } else {
                Cow::Borrowed(local_part)
            };

        Some(Self {
            local_part,
            domain,
            normalized_local_part,
        })
    }
}

#[derive(Debug, Error)]
#[error("Invalid registration policy")]
pub struct InvalidPolicy;

/// Compiled form of [`config::Policy`].
#[derive(Debug, Clone)]
pub struct Policy {
    nickname: Regex,
    email: Regex,
    block_plus_emails: bool,
    normalize_gmail: bool,
    min_email_local_length: usize,
    block_random_emails: bool,
    allowed_domains: Vec<String>,
    blocked_domains: Vec<String>,
}

impl Policy {
    pub fn new(cfg: &config::Policy) -> Result<Self, InvalidPolicy> {
        fn lowercase_all(domains: &[String]) -> Vec<String> {
            domains.iter().map(|v| v.to_lowercase()).collect()
        }

        Ok(Self {
            nickname: full_match(&cfg.nickname_pattern).attach_printable("nickname_pattern")?,
            email: full_match(&cfg.email_pattern).attach_printable("email_pattern")?,
            block_plus_emails: cfg.block_plus_emails,
            normalize_gmail: cfg.normalize_gmail,
            min_email_local_length: cfg.min_email_local_length,
            block_random_emails: cfg.block_random_emails,
            allowed_domains: lowercase_all(&cfg.allowed_email_domains),
            blocked_domains: lowercase_all(&cfg.blocked_email_domains),
        })
    }

    #[must_use]
    pub fn matches_nickname(&self, nickname: &str) -> bool {
        self.nickname.is_match(nickname)
    }

    #[must_use]
    pub fn matches_email(&self, email: &str) -> bool {
        self.email.is_match(email)
    }

    #[must_use]
    pub fn parse_email<'a>(&self, email: &'a str) -> Option<EmailAddress<'a>> {
        EmailAddress::parse(email, self.normalize_gmail)
    }

    pub fn check_plus(&self, email: &EmailAddress<'_>) -> std::result::Result<(), Rejection> {
        if self.block_plus_emails && email.local_part.contains('+') {
            Err(Rejection::PlusNotAllowed)
        } else {
            Ok(())
        }
    }

    pub fn check_length(&self, email: &EmailAddress<'_>) -> std::result::Result<(), Rejection> {
        if email.normalized_local_part.chars().count() < self.min_email_local_length {
            Err(Rejection::TooShort)
        } else {
            Ok(())
        }
    }

    pub fn check_random(&self, email: &EmailAddress<'_>) -> std::result::Result<(), Rejection> {
        if self.block_random_emails && looks_random(&email.normalized_local_part) {
            Err(Rejection::LooksRandom)
        } else {
            Ok(())
        }
    }

    /// A non-empty allow-list replaces the block-list entirely.
    pub fn check_domain(&self, email: &EmailAddress<'_>) -> std::result::Result<(), Rejection> {
        let domain = email.domain.as_str();
        if self.allowed_domains.is_empty() {
            if self.blocked_domains.iter().any(|v| v == domain) {
                return Err(Rejection::DomainBlocked);
            }
        } else if !self.allowed_domains.iter().any(|v| v == domain) {
            return Err(Rejection::DomainNotAllowed);
        }
        Ok(())
    }
}

/// Wraps `pattern` so it only matches whole values.
pub(crate) fn anchored(pattern: &str) -> String {
    format!("^(?:{pattern})$")
}

fn full_match(pattern: &str) -> Result<Regex, InvalidPolicy> {
    Regex::new(&anchored(pattern))
        .change_context(InvalidPolicy)
        .attach_printable_lazy(|| format!("pattern: {pattern:?}"))
}
