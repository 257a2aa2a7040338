//! Entity tags for snapshot reads: the patient's max sequence number.

/// Tag for a sequence number: its decimal string wrapped in double quotes,
/// as `ETag` requires. Clients may echo it back quoted or bare.
pub fn format_etag(max_sequence: i64) -> String {
    format!("\"{max_sequence}\"")
}

/// Whether an `If-None-Match` header value matches the current sequence.
///
/// Accepts quoted or bare tags, weak tags, comma-separated lists and `*`.
pub fn if_none_match_matches(header: &str, max_sequence: i64) -> bool {
    let current = max_sequence.to_string();
    header.split(',').map(str::trim).any(|tag| {
        if tag == "*" {
            return true;
        }
        let tag = tag.strip_prefix("W/").unwrap_or(tag);
        tag.trim_matches('"') == current
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_are_quoted() {
        assert_eq!(format_etag(42), "\"42\"");
    }

    #[test]
    fn quoted_bare_and_weak_tags_match() {
        assert!(if_none_match_matches("\"7\"", 7));
        assert!(if_none_match_matches("7", 7));
        assert!(if_none_match_matches("W/\"7\"", 7));
        assert!(if_none_match_matches("\"3\", \"7\"", 7));
        assert!(if_none_match_matches("*", 7));
    }

    #[test]
    fn other_tags_do_not_match() {
        assert!(!if_none_match_matches("\"6\"", 7));
        assert!(!if_none_match_matches("\"77\"", 7));
        assert!(!if_none_match_matches("", 7));
    }
}
