use url::Url;

/// Unwrap a search-engine redirect link into its destination.
///
/// A redirect link has the path `/url` and carries the destination in the
/// `q` query parameter (decoded once). Anything else is returned unchanged.
pub fn normalize_link(raw: &str) -> String {
    redirect_target(raw).unwrap_or_else(|| raw.to_string())
}

fn redirect_target(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let parsed = match Url::parse(trimmed) {
        Ok(url) => url,
        // Relative "/url?q=..." links as served in result markup.
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse("http://localhost").ok()?.join(trimmed).ok()?
        }
        Err(_) => return None,
    };

    if parsed.path() != "/url" {
        return None;
    }

    parsed
        .query_pairs()
        .find(|(key, value)| key == "q" && !value.is_empty())
        .map(|(_, value)| value.into_owned())
}
