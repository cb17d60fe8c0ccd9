use serde::Deserialize;
use validator::{Validate, ValidateError};

/// Rules a nickname and an email address must pass before a player
/// can be registered.
///
/// Patterns always have to match the whole value, `^` and `$`
/// anchors are optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Policy {
    /// **Environment variables**:
    /// - `WARDEN_POLICY_NICKNAME_PATTERN`
    pub nickname_pattern: String,
    /// **Environment variables**:
    /// - `WARDEN_POLICY_EMAIL_PATTERN`
    pub email_pattern: String,
    /// Rejects email addresses with sub-addressing (`name+tag@...`).
    ///
    /// **Environment variables**:
    /// - `WARDEN_POLICY_BLOCK_PLUS_EMAILS`
    pub block_plus_emails: bool,
    /// Ignores dots in the local part of `gmail.com` and
    /// `googlemail.com` addresses for the length and randomness
    /// checks, since Gmail ignores them as well.
    ///
    /// **Environment variables**:
    /// - `WARDEN_POLICY_NORMALIZE_GMAIL`
    pub normalize_gmail: bool,
    /// **Environment variables**:
    /// - `WARDEN_POLICY_MIN_EMAIL_LOCAL_LENGTH`
    pub min_email_local_length: usize,
    /// Rejects email addresses that look randomly generated.
    ///
    /// **Environment variables**:
    /// - `WARDEN_POLICY_BLOCK_RANDOM_EMAILS`
    pub block_random_emails: bool,
    /// If not empty, only these domains may be used and
    /// `blocked_email_domains` is ignored.
    ///
    /// **Environment variables**:
    /// - `WARDEN_POLICY_ALLOWED_EMAIL_DOMAINS`
    pub allowed_email_domains: Vec<String>,
    /// **Environment variables**:
    /// - `WARDEN_POLICY_BLOCKED_EMAIL_DOMAINS`
    pub blocked_email_domains: Vec<String>,
}

impl Policy {
    // RFC 5321 limit of the local part
    const LOCAL_PART_MAX: usize = 64;
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            nickname_pattern: "^[A-Za-z0-9_]{3,16}$".into(),
            email_pattern: r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$".into(),
            block_plus_emails: false,
            normalize_gmail: true,
            min_email_local_length: 3,
            block_random_emails: true,
            allowed_email_domains: Vec::new(),
            blocked_email_domains: [
                "10minutemail.com",
                "guerrillamail.com",
                "mailinator.com",
                "temp-mail.org",
                "yopmail.com",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

impl Validate for Policy {
    fn validate(&self) -> Result<(), ValidateError> {
        // checked the same way they are compiled later
        fn validate_full_match(pattern: &str) -> bool {
            !pattern.is_empty()
                && validator::extras::validate_pattern(&crate::email::anchored(pattern))
        }

        fn validate_domains(domains: &[String]) -> ValidateError {
            let mut msg = ValidateError::msg_builder();
            for domain in domains {
                if !validator::extras::validate_domain(domain) {
                    msg.insert(format!("{domain:?} is not a valid domain"));
                }
            }
            msg.build()
        }

        let mut fields = ValidateError::field_builder();

        let mut msg = ValidateError::msg_builder();
        msg.check(
            !validate_full_match(&self.nickname_pattern),
            "Invalid regular expression",
        );
        fields.insert("nickname_pattern", msg.build());

        let mut msg = ValidateError::msg_builder();
        msg.check(
            !validate_full_match(&self.email_pattern),
            "Invalid regular expression",
        );
        fields.insert("email_pattern", msg.build());

        let mut msg = ValidateError::msg_builder();
        msg.check(
            self.min_email_local_length > Self::LOCAL_PART_MAX,
            "must not exceed 64 characters",
        );
        fields.insert("min_email_local_length", msg.build());

        fields.insert(
            "allowed_email_domains",
            validate_domains(&self.allowed_email_domains),
        );
        fields.insert(
            "blocked_email_domains",
            validate_domains(&self.blocked_email_domains),
        );

        fields.build().into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_is_valid() {
        assert!(Policy::default().validate().is_ok());
    }

    #[test]
    fn rejects_broken_patterns() {
        let policy = Policy {
            nickname_pattern: "(".into(),
            ..Default::default()
        };

        let error = policy.validate().unwrap_err();
        assert_eq!(
            r#"{"nickname_pattern": {"_errors": ["Invalid regular expression"]}}"#,
            format!("{error:?}")
        );
    }

    #[test]
    fn rejects_patterns_broken_by_anchoring() {
        let pattern = "(?x)[a-z]+ # lowercase only";
        assert!(validator::extras::validate_pattern(pattern));

        let policy = Policy {
            email_pattern: pattern.into(),
            ..Default::default()
        };

        let error = policy.validate().unwrap_err();
        assert_eq!(
            r#"{"email_pattern": {"_errors": ["Invalid regular expression"]}}"#,
            format!("{error:?}")
        );
    }

    #[test]
    fn rejects_bad_domains() {
        let policy = Policy {
            allowed_email_domains: vec!["example.com".into(), "@example.com".into()],
            min_email_local_length: 65,
            ..Default::default()
        };

        let error = policy.validate().unwrap_err();
        let output = format!("{error:?}");
        assert!(output.contains("min_email_local_length"), "{output}");
        assert!(output.contains(r#"\"@example.com\" is not a valid domain"#), "{output}");
        assert!(!output.contains(r#"\"example.com\""#), "{output}");
    }
}
