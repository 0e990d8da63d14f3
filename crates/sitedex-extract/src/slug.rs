//! URL-to-slug derivation: basename of the path, URL-decoded, ASCII-folded,
//! lowercased, with non-alphanumeric runs collapsed to a single dash.

use percent_encoding::percent_decode_str;
use unicode_normalization::UnicodeNormalization;

const EMPTY_SLUG: &str = "index-html";

pub fn slug_for(url: &str) -> String {
    let basename = basename(url);
    slugify(&basename)
}

fn basename(url: &str) -> String {
    let path = match url::Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => url.to_string(),
    };
    let segment = path.rsplit('/').find(|s| !s.is_empty()).unwrap_or("");
    percent_decode_str(segment).decode_utf8_lossy().into_owned()
}

fn slugify(input: &str) -> String {
    let folded: String = input
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect();

    let mut slug = String::with_capacity(folded.len());
    let mut last_was_dash = false;
    for c in folded.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_was_dash = false;
        } else if !last_was_dash {
            slug.push('-');
            last_was_dash = true;
        }
    }
    let trimmed = slug.trim_matches('-');

    if trimmed.is_empty() {
        EMPTY_SLUG.to_string()
    } else {
        trimmed.to_string()
    }
}

fn is_combining_mark(c: char) -> bool {
    matches!(c as u32, 0x0300..=0x036F)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basename_of_plain_path() {
        assert_eq!(slug_for("http://ex.org/a/b/Some File.pdf"), "some-file-pdf");
    }

    #[test]
    fn empty_path_is_index_html() {
        assert_eq!(slug_for("http://ex.org/"), EMPTY_SLUG);
        assert_eq!(slug_for("http://ex.org"), EMPTY_SLUG);
    }

    #[test]
    fn url_decodes_before_slugifying() {
        assert_eq!(slug_for("http://ex.org/a%20b"), "a-b");
    }

    #[test]
    fn ascii_folds_diacritics() {
        assert_eq!(slug_for("http://ex.org/caf%C3%A9"), "cafe");
    }

    #[test]
    fn collapses_runs_of_non_alphanumerics() {
        assert_eq!(slug_for("http://ex.org/a---b!!c"), "a-b-c");
    }
}
