//! Small string helpers used across the pipeline.

/// Truncate a string for logging purposes.
///
/// Long strings are truncated to `max` characters with an ellipsis and a
/// remaining-byte count appended. Truncation respects character boundaries
/// so multi-byte text never panics.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max).collect();
        format!("{}…(+{} bytes)", cut, s.len() - cut.len())
    }
}

/// Collapse runs of whitespace into single spaces and trim the ends.
///
/// Scraped text arrives as separate nodes with layout whitespace between
/// them; digest fields must read as a single clean line.
pub fn collapse_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_for_log_short_string() {
        assert_eq!(truncate_for_log("Hello, world!", 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_multibyte() {
        let s = "héllo wörld".repeat(50);
        let result = truncate_for_log(&s, 10);
        assert!(result.contains('…'));
    }

    #[test]
    fn test_collapse_ws() {
        assert_eq!(collapse_ws("  hello \n\t world  "), "hello world");
        assert_eq!(collapse_ws("already clean"), "already clean");
        assert_eq!(collapse_ws("   "), "");
    }
}
