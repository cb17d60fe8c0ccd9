mod domain;
mod pattern;
mod url;

pub use self::domain::validate_domain;
pub use self::pattern::validate_pattern;
pub use self::url::validate_url;
