//! Query-string escaping for the search index's query syntax.

const SPECIAL_CHARS: &[char] = &[
    '+', '-', '&', '|', '!', '(', ')', '{', '}', '[', ']', '^', '"', '~', '*', '?', ':', '/',
];

/// Backslash-escapes the literal set `+ - && || ! ( ) { } [ ] ^ " ~ * ? : \ /`.
/// Backslashes are escaped first, so an already-escaped character is not
/// double-escaped.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        if ch == '\\' || SPECIAL_CHARS.contains(&ch) {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_special_characters() {
        assert_eq!(escape("a+b-c"), r"a\+b\-c");
    }

    #[test]
    fn escapes_backslash_without_double_escaping() {
        assert_eq!(escape(r"a\b"), r"a\\b");
    }

    #[test]
    fn escapes_url_like_value() {
        assert_eq!(escape("http://ex.org/a"), r"http\:\/\/ex.org\/a");
    }

    #[test]
    fn leaves_plain_text_untouched() {
        assert_eq!(escape("hello world"), "hello world");
    }
}
