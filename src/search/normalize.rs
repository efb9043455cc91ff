//! Text canonicalization shared by every comparison in the search pipeline

/// Trim surrounding whitespace and lowercase
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// `normalize` for optional fields; absent gives an empty string
pub fn normalize_opt(text: Option<&str>) -> String {
    text.map(normalize).unwrap_or_default()
}
