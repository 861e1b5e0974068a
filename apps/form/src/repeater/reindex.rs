use std::sync::LazyLock;

use regex::Regex;

static BRACKETED_INDEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\d+\]").expect("static pattern is valid"));

/// Rewrites the first bracketed number in `name` to `[index]`.
///
/// `education[3][school_name]` → `education[1][school_name]`.
/// Returns `None` when `name` carries no bracketed number.
pub fn replace_first_index(name: &str, index: usize) -> Option<String> {
    if !BRACKETED_INDEX.is_match(name) {
        return None;
    }
    Some(
        BRACKETED_INDEX
            .replacen(name, 1, format!("[{index}]").as_str())
            .into_owned(),
    )
}

/// The first bracketed number in `name`, if any.
pub fn embedded_index(name: &str) -> Option<usize> {
    BRACKETED_INDEX
        .find(name)
        .and_then(|m| name[m.start() + 1..m.end() - 1].parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrites_first_index_only() {
        assert_eq!(
            replace_first_index("education[3][school_name]", 1).as_deref(),
            Some("education[1][school_name]")
        );
        assert_eq!(
            replace_first_index("matrix[4][7]", 0).as_deref(),
            Some("matrix[0][7]")
        );
    }

    #[test]
    fn test_name_without_index_is_untouched() {
        assert_eq!(replace_first_index("fullName", 2), None);
        assert_eq!(replace_first_index("education[][school_name]", 2), None);
        assert_eq!(replace_first_index("education[x][school_name]", 2), None);
    }

    #[test]
    fn test_multi_digit_index() {
        assert_eq!(
            replace_first_index("language[12][fluency]", 9).as_deref(),
            Some("language[9][fluency]")
        );
        assert_eq!(embedded_index("language[12][fluency]"), Some(12));
    }

    #[test]
    fn test_embedded_index_missing() {
        assert_eq!(embedded_index("country"), None);
    }
}
