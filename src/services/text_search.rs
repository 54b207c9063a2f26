use regex::Regex;

/// All non-overlapping matches of `pattern` in `text`, in order. An
/// invalid pattern comes back as the regex error for the surface to show.
pub fn find_matches(text: &str, pattern: &str) -> Result<Vec<String>, regex::Error> {
    let re = Regex::new(pattern)?;

    Ok(re
        .find_iter(text)
        .map(|found| found.as_str().to_string())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::find_matches;

    #[test]
    fn matches_come_back_in_order() {
        let matches = find_matches("one 1 two 22 three 333", r"\d+").unwrap();

        assert_eq!(matches, vec!["1", "22", "333"]);
    }

    #[test]
    fn matches_do_not_overlap() {
        let matches = find_matches("aaaa", "aa").unwrap();

        assert_eq!(matches, vec!["aa", "aa"]);
    }

    #[test]
    fn no_match_is_an_empty_list() {
        assert!(find_matches("plain text", r"\d+").unwrap().is_empty());
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        assert!(find_matches("text", "(unclosed").is_err());
    }
}
