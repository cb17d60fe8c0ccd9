use url::Url;

/// Checks whether `url` is an absolute URL with a host, such as
/// a database connection string.
#[must_use]
pub fn validate_url(url: &str) -> bool {
    Url::parse(url).map(|v| v.has_host()).unwrap_or_default()
}
