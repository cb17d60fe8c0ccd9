use crate::config::Messages;
use crate::email::Rejection;

/// Result of a single command invocation, as seen by its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Usage,
    /// The source may not run the command. Nothing is sent back.
    NoPermission,
    Ratelimited,
    IncorrectNickname,
    InvalidEmail,
    PlusNotAllowed,
    EmailTooShort,
    EmailLooksRandom,
    EmailAlreadyUsed,
    DomainNotAllowed,
    DomainBlocked,
    TakenNickname,
    Successful(String),
    NotSuccessful(String),
}

impl From<Rejection> for Outcome {
    fn from(value: Rejection) -> Self {
        match value {
            Rejection::PlusNotAllowed => Self::PlusNotAllowed,
            Rejection::TooShort => Self::EmailTooShort,
            Rejection::LooksRandom => Self::EmailLooksRandom,
            Rejection::DomainNotAllowed => Self::DomainNotAllowed,
            Rejection::DomainBlocked => Self::DomainBlocked,
        }
    }
}

impl Outcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Successful(..))
    }

    /// Renders the message for this outcome, if any.
    #[must_use]
    pub fn render(&self, messages: &Messages) -> Option<String> {
        let template = match self {
            Self::NoPermission => return None,
            Self::Usage => &messages.usage,
            Self::Ratelimited => &messages.ratelimited,
            Self::IncorrectNickname => &messages.incorrect_nickname,
            Self::InvalidEmail => &messages.invalid_email,
            Self::PlusNotAllowed => &messages.email_plus_not_allowed,
            Self::EmailTooShort => &messages.email_too_short,
            Self::EmailLooksRandom => &messages.email_looks_random,
            Self::EmailAlreadyUsed => &messages.email_already_used,
            Self::DomainNotAllowed => &messages.email_domain_not_allowed,
            Self::DomainBlocked => &messages.email_domain_blocked,
            Self::TakenNickname => &messages.taken_nickname,
            Self::Successful(nickname) => return Some(messages.successful.replace("{0}", nickname)),
            Self::NotSuccessful(nickname) => {
                return Some(messages.not_successful.replace("{0}", nickname))
            }
        };
        Some(template.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_in_nickname() {
        let messages = Messages {
            successful: "{0} is now registered ({0})".into(),
            ..Default::default()
        };

        assert_eq!(
            Outcome::Successful("Steve".into()).render(&messages).unwrap(),
            "Steve is now registered (Steve)"
        );
        assert_eq!(
            Outcome::NotSuccessful("Steve".into()).render(&messages).unwrap(),
            "Unable to register player Steve."
        );
    }

    #[test]
    fn no_permission_is_silent() {
        assert_eq!(Outcome::NoPermission.render(&Messages::default()), None);
    }

    #[test]
    fn every_rejection_has_its_own_message() {
        let messages = Messages::default();
        let rejections = [
            Rejection::PlusNotAllowed,
            Rejection::TooShort,
            Rejection::LooksRandom,
            Rejection::DomainNotAllowed,
            Rejection::DomainBlocked,
        ];

        let mut rendered = rejections
            .into_iter()
            .map(|v| Outcome::from(v).render(&messages).unwrap())
            .collect::<Vec<_>>();

        rendered.sort();
        rendered.dedup();
        assert_eq!(rendered.len(), rejections.len());
    }
}
