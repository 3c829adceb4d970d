use unicode_normalization::UnicodeNormalization;

/// Classified user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Nothing but whitespace, callers must not search
    Empty,
    /// Any input that is not one of the commands below, including unknown
    /// slash-prefixed input, which is searched literally
    PlainSearch(String),
    List,
    Add(String),
    AddMissingArg,
}

/// Parse already-trimmed input.
///
/// The first whitespace-separated token, NFKC-folded and lowercased, selects
/// the command; the remaining tokens are rejoined with single spaces as the
/// argument. Search terms keep the input exactly as given.
pub fn parse_command(input: &str) -> Command {
    let input = input.trim();
    if input.is_empty() {
        return Command::Empty;
    }
    let mut tokens = input.split_whitespace();
    let command = fold_command(tokens.next().unwrap_or_default());
    if !command.starts_with('/') {
        return Command::PlainSearch(input.to_string());
    }

    let arg = tokens.collect::<Vec<_>>().join(" ");

    match command.as_str() {
        "/list" => Command::List,
        "/add" if arg.is_empty() => Command::AddMissingArg,
        "/add" => Command::Add(arg),
        _ => Command::PlainSearch(input.to_string()),
    }
}

/// Full-width forms like "／ｌｉｓｔ" match their ASCII command
fn fold_command(token: &str) -> String {
    token.nfkc().collect::<String>().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_word() {
        assert_eq!(
            parse_command("Nostalgia"),
            Command::PlainSearch("Nostalgia".to_string())
        );
        assert_eq!(
            parse_command("ice cream"),
            Command::PlainSearch("ice cream".to_string())
        );
    }

    #[test]
    fn test_list_ignores_case_and_trailing_content() {
        assert_eq!(parse_command("/list"), Command::List);
        assert_eq!(parse_command("/LIST"), Command::List);
        assert_eq!(parse_command("/list everything please"), Command::List);
    }

    #[test]
    fn test_add_with_and_without_argument() {
        assert_eq!(parse_command("/add"), Command::AddMissingArg);
        assert_eq!(
            parse_command("/add Serendipity"),
            Command::Add("Serendipity".to_string())
        );
        assert_eq!(
            parse_command("/Add   ice \t cream"),
            Command::Add("ice cream".to_string())
        );
    }

    #[test]
    fn test_whitespace_is_empty() {
        assert_eq!(parse_command(""), Command::Empty);
        assert_eq!(parse_command("  "), Command::Empty);
    }

    #[test]
    fn test_unknown_command_searches_literally() {
        assert_eq!(
            parse_command("/foo bar"),
            Command::PlainSearch("/foo bar".to_string())
        );
        assert_eq!(
            parse_command("/listing"),
            Command::PlainSearch("/listing".to_string())
        );
        assert_eq!(parse_command("/"), Command::PlainSearch("/".to_string()));
    }

    #[test]
    fn test_full_width_command_names_match() {
        assert_eq!(parse_command("／ｌｉｓｔ"), Command::List);
        assert_eq!(
            parse_command("／ＡＤＤ ﬁancé"),
            Command::Add("ﬁancé".to_string())
        );
    }

    #[test]
    fn test_unknown_full_width_command_keeps_original_text() {
        assert_eq!(
            parse_command("／ｆｏｏ bar"),
            Command::PlainSearch("／ｆｏｏ bar".to_string())
        );
    }
}
