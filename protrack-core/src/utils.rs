///
/// Parse a residue position as the annotation APIs report it.
///
/// Positions arrive as plain numbers (`"12"`), with uncertainty markers
/// (`"<12"`, `">12"`, `"~12"`) or as an unknown placeholder (`"~"`, `"?"`).
/// Markers are stripped; unknown positions yield `None`.
pub fn parse_position(raw: &str) -> Option<u32> {
    let trimmed = raw.trim().trim_start_matches(['<', '>', '~', '?']);
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<u32>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case("12", Some(12))]
    #[case(" 7 ", Some(7))]
    #[case("<3", Some(3))]
    #[case(">120", Some(120))]
    #[case("~", None)]
    #[case("?", None)]
    #[case("abc", None)]
    #[case("-4", None)]
    fn test_parse_position(#[case] raw: &str, #[case] expected: Option<u32>) {
        assert_eq!(parse_position(raw), expected);
    }
}
