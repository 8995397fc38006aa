//! Common validation utilities

/// Check if an optional string is absent, empty or whitespace only
pub fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_blank() {
        assert!(is_blank(None));
        assert!(is_blank(Some("")));
        assert!(is_blank(Some("   \t\n")));
        assert!(!is_blank(Some("jane@example.com")));
        assert!(!is_blank(Some(" a ")));
    }
}
