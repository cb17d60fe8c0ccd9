use regex::Regex;

/// Checks whether `pattern` can be compiled into a [`Regex`].
#[must_use]
pub fn validate_pattern(pattern: &str) -> bool {
    !pattern.is_empty() && Regex::new(pattern).is_ok()
}

#[cfg(test)]
mod tests {
    use super::validate_pattern;

    #[test]
    fn test_validate_pattern() {
        assert!(validate_pattern("^[A-Za-z0-9_]{3,16}$"));
        assert!(!validate_pattern("[A-Z"));
        assert!(!validate_pattern(""));
    }
}
