use regex::Regex;

/// Strips markup from user-supplied text so script content never reaches the
/// store or gets echoed back to another client.
pub fn clean(value: &str) -> String {
    let tags = Regex::new(r"<[^>]*>").expect("valid pattern");
    tags.replace_all(value, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::clean;

    #[test]
    fn strips_script_tags() {
        assert_eq!(clean("<script>alert(1)</script>Widget"), "alert(1)Widget");
    }

    #[test]
    fn leaves_plain_text_alone() {
        assert_eq!(clean("1 Main St"), "1 Main St");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(clean("  Alice  "), "Alice");
    }
}
