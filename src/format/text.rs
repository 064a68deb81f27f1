/// Left-pad `value` with zeros, then keep only the rightmost `width` characters.
///
/// Values wider than `width` are cut from the left: `zero_pad(12345, 3)` is `"345"`.
pub fn zero_pad(value: u64, width: usize) -> String {
    let digits = format!("{value:0>width$}");
    digits[digits.len() - width..].to_string()
}

/// Capitalise each whitespace-delimited word.
///
/// The first word character (ASCII alphanumeric or `_`) is uppercased and the
/// rest of the word lowercased. Leading punctuation is kept as-is, so
/// `"(hello WORLD"` becomes `"(Hello World"`.
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_word = false;

    for ch in input.chars() {
        if ch.is_whitespace() {
            in_word = false;
            out.push(ch);
        } else if in_word {
            out.extend(ch.to_lowercase());
        } else if ch.is_ascii_alphanumeric() || ch == '_' {
            in_word = true;
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
    }

    out
}

/// Make a string safe to insert as HTML text content.
///
/// Angle brackets are removed outright, then the characters a text node
/// serialises specially are encoded.
pub fn escape_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());

    for ch in input.chars() {
        match ch {
            '<' | '>' => {}
            '&' => out.push_str("&amp;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            other => out.push(other),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_pad() {
        assert_eq!(zero_pad(7, 3), "007");
        assert_eq!(zero_pad(12345, 3), "345");
        assert_eq!(zero_pad(42, 2), "42");
        assert_eq!(zero_pad(0, 4), "0000");
        assert_eq!(zero_pad(9, 0), "");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("hello world"), "Hello World");
        assert_eq!(title_case("sUPPLIER  bANK"), "Supplier  Bank");
        assert_eq!(title_case("core-ENTERPRISE"), "Core-enterprise");
        assert_eq!(title_case("(hello WORLD"), "(Hello World");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_escape_text() {
        let escaped = escape_text("<b>a&b</b>");
        assert_eq!(escaped, "ba&amp;b/b");
        assert!(!escaped.contains('<'));
        assert!(!escaped.contains('>'));
    }

    #[test]
    fn test_escape_text_keeps_plain_input() {
        assert_eq!(escape_text(""), "");
        assert_eq!(escape_text("acme, ltd \"quoted\""), "acme, ltd \"quoted\"");
        assert_eq!(escape_text("a\u{a0}b"), "a&nbsp;b");
    }
}
