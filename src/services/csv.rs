//! Minimal CSV field splitting
//!
//! The ranking catalogs ship as separator-delimited text with optional
//! double-quoted fields (`""` escapes a quote inside a field). Covers
//! field splitting only; header handling belongs to the callers.

/// Split one line into fields. Quotes may wrap any field; the separator
/// inside a quoted field does not split.
pub(crate) fn split_fields(line: &str, separator: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(c);
            }
        } else if c == '"' {
            in_quotes = true;
        } else if c == separator {
            fields.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }
    fields.push(current);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_fields() {
        assert_eq!(split_fields("a;b;c", ';'), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_empty_fields_preserved() {
        assert_eq!(split_fields(";;x;", ';'), vec!["", "", "x", ""]);
    }

    #[test]
    fn test_quoted_field_keeps_separator() {
        assert_eq!(
            split_fields(r#"123;"AI (Q1); Software (Q2)";0.5"#, ';'),
            vec!["123", "AI (Q1); Software (Q2)", "0.5"]
        );
    }

    #[test]
    fn test_escaped_quote_inside_field() {
        assert_eq!(
            split_fields(r#""say ""hi""";b"#, ';'),
            vec![r#"say "hi""#, "b"]
        );
    }

    #[test]
    fn test_other_separator() {
        assert_eq!(split_fields("a,b", ','), vec!["a", "b"]);
    }
}
