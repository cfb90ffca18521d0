use indexmap::IndexMap;

/// Split a request target on the first `?`
#[must_use]
pub fn split_path(raw: &str) -> (&str, Option<&str>) {
    match raw.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (raw, None),
    }
}

/// Tokenize a query string into ordered pairs.
///
/// Tokens without `=` or with an empty key are dropped; a repeated key keeps
/// its first position and takes the last value.
#[must_use]
pub fn parse_query(query: &str) -> IndexMap<String, String> {
    let mut params = IndexMap::new();
    for token in query.split('&') {
        match token.split_once('=') {
            Some((key, value)) if !key.is_empty() => {
                params.insert(key.to_string(), value.to_string());
            }
            _ => {
                if !token.is_empty() {
                    log::debug!("Dropping query token without a key/value pair: {token}");
                }
            }
        }
    }
    params
}

#[must_use]
pub fn build_query(params: &IndexMap<String, String>) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&")
}
