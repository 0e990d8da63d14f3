//! Namespace removal for markup trees.
//!
//! The original implementation ran every document through a static XSLT
//! stylesheet that strips all namespace declarations, so that plain,
//! unprefixed element names work in location expressions regardless of
//! whether the source declared namespaces (`<dc:title>` becomes `<title>`).
//! Since every markup MIME type in this component is parsed with one
//! HTML-lenient parser (`scraper`/`html5ever`, which has no notion of XML
//! namespace prefixes to begin with), we reproduce the same effect at the
//! text level before parsing, with a small set of regexes instead of an
//! XSLT engine.

use once_cell::sync::Lazy;
use regex::Regex;

static XMLNS_DECL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\s+xmlns(:[A-Za-z_][\w.-]*)?\s*=\s*("[^"]*"|'[^']*')"#).unwrap());
static TAG_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(</?)[A-Za-z_][\w.-]*:([A-Za-z_][\w.-]*)").unwrap());
static ATTR_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(\s)[A-Za-z_][\w.-]*:([A-Za-z_][\w.-]*\s*=)"#).unwrap());

/// Strips namespace declarations and prefixes from raw markup. Returns the
/// original input unchanged if it contains no `<` at all (not markup).
pub fn strip_namespaces(markup: &str) -> String {
    if !markup.contains('<') {
        return markup.to_string();
    }
    let without_decls = XMLNS_DECL.replace_all(markup, "");
    let without_tag_prefixes = TAG_PREFIX.replace_all(&without_decls, "$1$2");
    let without_attr_prefixes = ATTR_PREFIX.replace_all(&without_tag_prefixes, "$1$2");
    without_attr_prefixes.into_owned()
}
