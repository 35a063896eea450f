use url::{Position, Url};

/// Network location of a URL: `userinfo@host:port` as written after the scheme
///
/// Returns an empty string for URLs without an authority (`mailto:`, `data:`).
pub fn network_location(url: &Url) -> &str {
    &url[Position::BeforeUsername..Position::AfterPort]
}

/// Resolve a possibly relative reference against a page URL
pub fn resolve_reference(base: &Url, reference: &str) -> Option<String> {
    match base.join(reference.trim()) {
        Ok(resolved) => Some(resolved.to_string()),
        Err(e) => {
            ::log::trace!("Dropping unresolvable reference {:?}: {}", reference, e);
            None
        }
    }
}
