use indexmap::IndexMap;
use std::borrow::Cow;

pub struct MessageBuilder(Vec<Cow<'static, str>>);

impl MessageBuilder {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn insert(&mut self, message: impl Into<Cow<'static, str>>) {
        self.0.push(message.into());
    }

    /// Inserts `message` only if `failed` is true.
    pub fn check(&mut self, failed: bool, message: impl Into<Cow<'static, str>>) {
        if failed {
            self.insert(message);
        }
    }

    #[must_use]
    pub fn build(self) -> ValidateError {
        ValidateError::Messages(self.0)
    }
}

pub struct FieldBuilder(IndexMap<Cow<'static, str>, ValidateError>);

#[allow(clippy::new_without_default)]
impl FieldBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(IndexMap::default())
    }

    pub fn insert(&mut self, key: impl Into<Cow<'static, str>>, value: ValidateError) {
        if !value.is_empty() {
            self.0.insert(key.into(), value);
        }
    }

    /// Runs the nested validation of `value` and records it under `key`.
    pub fn nested(&mut self, key: impl Into<Cow<'static, str>>, value: &impl crate::Validate) {
        if let Err(error) = value.validate() {
            self.insert(key, error);
        }
    }

    #[must_use]
    pub fn build(self) -> ValidateError {
        ValidateError::Fields(self.0)
    }
}

#[derive(PartialEq, Eq)]
pub enum ValidateError {
    Fields(IndexMap<Cow<'static, str>, ValidateError>),
    Messages(Vec<Cow<'static, str>>),
}

impl std::fmt::Display for ValidateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Invalid data occurred")
    }
}

impl std::error::Error for ValidateError {}

impl std::fmt::Debug for ValidateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidateError::Fields(n) => n.fmt(f),
            ValidateError::Messages(n) => f.debug_map().entry(&"_errors", &n).finish(),
        }
    }
}

impl ValidateError {
    #[must_use]
    pub fn field_builder() -> FieldBuilder {
        FieldBuilder::new()
    }

    #[must_use]
    pub fn msg_builder() -> MessageBuilder {
        MessageBuilder::new()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            ValidateError::Fields(n) => n.is_empty(),
            ValidateError::Messages(n) => n.is_empty(),
        }
    }

    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Validate;

    struct Limits {
        name: &'static str,
        attempts: u32,
    }

    impl Validate for Limits {
        fn validate(&self) -> Result<(), ValidateError> {
            let mut fields = ValidateError::field_builder();

            let mut msg = ValidateError::msg_builder();
            msg.check(self.name.is_empty(), "name is empty");
            fields.insert("name", msg.build());

            let mut msg = ValidateError::msg_builder();
            msg.check(self.attempts == 0, "must be at least 1");
            msg.check(self.attempts > 100, "too many attempts");
            fields.insert("attempts", msg.build());

            fields.build().into_result()
        }
    }

    struct Parent {
        limits: Option<Limits>,
    }

    impl Validate for Parent {
        fn validate(&self) -> Result<(), ValidateError> {
            let mut fields = ValidateError::field_builder();
            fields.nested("limits", &self.limits);
            fields.build().into_result()
        }
    }

    #[test]
    fn test_debug_fmt() {
        const EXPECTED_FMT_MSG: &str = r#"{"attempts": {"_errors": ["must be at least 1"]}}"#;

        let error = Limits { name: "login", attempts: 0 }.validate().unwrap_err();
        assert_eq!(EXPECTED_FMT_MSG, format!("{error:?}"));
    }

    #[test]
    fn test_nested() {
        assert!(Parent { limits: None }.validate().is_ok());
        assert!(Parent { limits: Some(Limits { name: "a", attempts: 3 }) }
            .validate()
            .is_ok());

        let error = Parent { limits: Some(Limits { name: "", attempts: 3 }) }
            .validate()
            .unwrap_err();

        assert_eq!(
            r#"{"limits": {"name": {"_errors": ["name is empty"]}}}"#,
            format!("{error:?}")
        );
    }

    #[test]
    fn validate_error_is_empty() {
        assert!(MessageBuilder::new().build().is_empty());
        assert!(FieldBuilder::new().build().is_empty());

        let mut msg = MessageBuilder::new();
        msg.check(false, "never inserted");
        assert!(msg.build().is_empty());

        let mut msg = MessageBuilder::new();
        msg.insert("Hello world!");

        let mut err = FieldBuilder::new();
        err.insert("microbar", msg.build());
        assert!(!err.build().is_empty());
    }
}
