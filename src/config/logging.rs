use serde::Deserialize;
use std::fmt::Display;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Logging {
    /// How log lines are laid out in the console.
    ///
    /// **Environment variables**:
    /// - `WARDEN_LOGGING_STYLE`
    pub style: LoggingStyle,
    /// Filter directives in the same syntax as `RUST_LOG`, for
    /// example `warden=debug,sqlx=warn`. `RUST_LOG` is used instead
    /// if this is left empty.
    ///
    /// **Environment variables**:
    /// - `WARDEN_LOGGING_TARGETS`
    pub targets: String,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoggingStyle {
    #[default]
    Compact,
    Full,
    Pretty,
}

impl Display for LoggingStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Compact => f.write_str("compact"),
            Self::Full => f.write_str("full"),
            Self::Pretty => f.write_str("pretty"),
        }
    }
}
