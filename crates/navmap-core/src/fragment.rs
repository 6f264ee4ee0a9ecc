//! URL fragment handling for the widget's `key=value&...` navigation fragment.

use url::form_urlencoded;

/// Name displayed according to `fragment`, or `overview` for an empty one.
pub fn displayed_from_fragment(fragment: &str, key: &str, overview: &str) -> String {
    let fragment = fragment.trim_start_matches('#');
    // Only percent escapes are decoded; a literal `+` stays a plus.
    let first = fragment
        .split('&')
        .next()
        .unwrap_or_default()
        .replace('+', "%2B");
    match form_urlencoded::parse(first.as_bytes()).next() {
        Some((k, v)) if k == key && !v.is_empty() => title_case(&v),
        _ => overview.to_string(),
    }
}

/// Rewrite the first part of `fragment` to `key=value`, keeping the rest.
pub fn with_query(fragment: &str, key: &str, value: &str) -> String {
    let fragment = fragment.trim_start_matches('#');
    let encoded: String = form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20");
    let mut parts = vec![format!("{key}={encoded}")];
    parts.extend(
        fragment
            .split('&')
            .skip(1)
            .filter(|p| !p.is_empty())
            .map(str::to_string),
    );
    parts.join("&")
}

/// Upper-case the first letter of every alphabetic run, lower-case the rest.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}
