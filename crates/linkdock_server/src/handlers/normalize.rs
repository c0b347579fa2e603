//! Shared trimming helpers for string request fields.

/// Trim a field that defaults to empty when absent.
pub(super) fn trimmed_or_empty(value: Option<String>) -> String {
    value
        .map(|raw| raw.trim().to_string())
        .unwrap_or_default()
}

/// Trim a field while preserving absence.
///
/// Missing stays `None`; present values trim in place, possibly down to an
/// explicit empty clear marker.
pub(super) fn trimmed_preserving_presence(value: Option<String>) -> Option<String> {
    value.map(|raw| raw.trim().to_string())
}

/// Trim a required field, treating empty-after-trim as absent.
pub(super) fn required_field(value: Option<String>) -> Option<String> {
    trimmed_preserving_presence(value).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trimmed_or_empty_handles_missing_and_whitespace() {
        assert_eq!(trimmed_or_empty(None), "");
        assert_eq!(trimmed_or_empty(Some("  x  ".into())), "x");
        assert_eq!(trimmed_or_empty(Some("   ".into())), "");
    }

    #[test]
    fn trimmed_preserving_presence_keeps_clear_markers() {
        assert_eq!(trimmed_preserving_presence(None), None);
        assert_eq!(
            trimmed_preserving_presence(Some("  x ".into())),
            Some("x".into())
        );
        assert_eq!(
            trimmed_preserving_presence(Some("  ".into())),
            Some(String::new())
        );
    }

    #[test]
    fn required_field_rejects_empty_values() {
        assert_eq!(required_field(Some(" id ".into())), Some("id".into()));
        assert_eq!(required_field(Some("   ".into())), None);
        assert_eq!(required_field(None), None);
    }
}
