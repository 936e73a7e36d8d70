//! Greentext formatting for nice-mode replies.

/// Prefix every line that does not already start with `>` with one.
///
/// Splitting on `\n` rather than `lines()` keeps trailing empty segments, so
/// the output has the same line structure as the input. Applying the
/// transform twice changes nothing.
pub fn quote_lines(text: &str) -> String {
    text.split('\n')
        .map(|line| {
            if line.starts_with('>') {
                line.to_string()
            } else {
                format!(">{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_every_line() {
        assert_eq!(quote_lines("hi there\nhow are you"), ">hi there\n>how are you");
    }

    #[test]
    fn is_idempotent() {
        let once = quote_lines("already\n>quoted\nmixed");
        assert_eq!(once, ">already\n>quoted\n>mixed");
        assert_eq!(quote_lines(&once), once);
    }

    #[test]
    fn single_line() {
        assert_eq!(quote_lines("hello"), ">hello");
    }

    #[test]
    fn keeps_blank_lines() {
        assert_eq!(quote_lines("a\n\nb"), ">a\n>\n>b");
    }

    #[test]
    fn empty_input_gets_one_prefix() {
        assert_eq!(quote_lines(""), ">");
    }
}
