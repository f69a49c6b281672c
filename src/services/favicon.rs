//! Favicon URL derivation.
//!
//! Icons are never fetched here; we only derive a lookup URL on the
//! public favicon service from the destination URL's hostname. Unparseable
//! destinations degrade to "no icon" without error.

use url::Url;

const FAVICON_SERVICE: &str = "https://www.google.com/s2/favicons";
const FAVICON_SIZE: u32 = 128;

/// Derive the favicon lookup URL for a destination URL.
///
/// Uses the hostname exactly: no scheme, port, path, or query. Returns
/// `None` when the destination cannot be parsed or has no host.
#[must_use]
pub fn derive_icon_url(destination: &str) -> Option<String> {
    let parsed = Url::parse(destination).ok()?;
    let host = parsed.host_str()?;
    Some(format!("{FAVICON_SERVICE}?domain={host}&sz={FAVICON_SIZE}"))
}

#[cfg(test)]
#[path = "favicon_test.rs"]
mod tests;
