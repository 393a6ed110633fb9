//! Splitting a raw command line into a label and argument tokens.
//!
//! Tokens are separated by whitespace. A double-quoted span is kept as part
//! of one token with the quotes removed, and `\"` inside quotes is a literal
//! quote.

use command_tree_core::error::{Error, Result};

/// Splits `line` into its first token (the label) and the remaining tokens.
///
/// Returns `None` for a line without any token.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if a quote is left open.
pub fn tokenize(line: &str) -> Result<Option<(String, Vec<String>)>> {
    let mut tokens = split(line)?.into_iter();

    Ok(tokens.next().map(|label| (label, tokens.collect())))
}

fn split(line: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quoted = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                quoted = !quoted;
                in_token = true;
            }
            '\\' if quoted => match chars.next() {
                Some('"') => current.push('"'),
                Some(other) => {
                    current.push('\\');
                    current.push(other);
                }
                None => current.push('\\'),
            },
            c if c.is_whitespace() && !quoted => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if quoted {
        return Err(Error::invalid_argument(format!(
            "unterminated quote in `{line}`"
        )));
    }

    if in_token {
        tokens.push(current);
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_simple_line() {
        let (label, args) = tokenize("economy give Steve 100").unwrap().unwrap();
        assert_eq!(label, "economy");
        assert_eq!(args, vec!["give", "Steve", "100"]);
    }

    #[test]
    fn test_tokenize_collapses_whitespace() {
        let (label, args) = tokenize("  economy \t give  ").unwrap().unwrap();
        assert_eq!(label, "economy");
        assert_eq!(args, vec!["give"]);
    }

    #[test]
    fn test_tokenize_label_only() {
        let (label, args) = tokenize("economy").unwrap().unwrap();
        assert_eq!(label, "economy");
        assert!(args.is_empty());
    }

    #[test]
    fn test_tokenize_blank_line() {
        assert!(tokenize("").unwrap().is_none());
        assert!(tokenize("   ").unwrap().is_none());
    }

    #[test]
    fn test_tokenize_quotes() {
        let (_, args) = tokenize(r#"say "hello world" "" x"y z"w"#).unwrap().unwrap();
        assert_eq!(args, vec!["hello world", "", "xy zw"]);
    }

    #[test]
    fn test_tokenize_escaped_quote() {
        let (_, args) = tokenize(r#"say "a \"quoted\" word""#).unwrap().unwrap();
        assert_eq!(args, vec![r#"a "quoted" word"#]);
    }

    #[test]
    fn test_tokenize_unterminated_quote() {
        assert!(matches!(
            tokenize(r#"say "hello"#),
            Err(Error::InvalidArgument(_))
        ));
    }
}
