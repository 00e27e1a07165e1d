//! Author: [Seclususs](https://github.com/seclususs)

/// Package, service and process names that are safe to splice into a shell
/// command line.
#[inline]
pub fn validate_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '_' || c == '-')
}

#[inline]
pub fn strip_trailing_newline(mut text: String) -> String {
    if text.ends_with('\n') {
        text.pop();
    }
    text
}

#[inline]
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_reject_shell_metacharacters() {
        assert!(validate_name("com.android.inputmethod.latin"));
        assert!(validate_name("vendor.perf-hal_2"));
        assert!(!validate_name(""));
        assert!(!validate_name("foo; reboot"));
        assert!(!validate_name("$(id)"));
    }

    #[test]
    fn strips_only_one_newline() {
        assert_eq!(strip_trailing_newline("abc\n".into()), "abc");
        assert_eq!(strip_trailing_newline("abc\n\n".into()), "abc\n");
        assert_eq!(strip_trailing_newline("abc".into()), "abc");
    }

    #[test]
    fn case_insensitive_match() {
        assert!(contains_ignore_case("/system/bin/SurfaceFlinger", "surfaceflinger"));
        assert!(!contains_ignore_case("zygote64", "zygote32"));
    }
}
