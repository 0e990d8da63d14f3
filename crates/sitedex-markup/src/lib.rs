//! Markup stripping: parses HTML/XHTML/XML into a namespace-free tree and
//! evaluates location expressions against it.

pub mod encoding;
pub mod namespace;
pub mod xpath_lite;

use anyhow::{anyhow, Result};
use scraper::{Html, Selector};

/// MIME types this component knows how to parse.
pub const SUPPORTED_MIME_TYPES: &[&str] = &[
    "application/xml",
    "application/xhtml+xml",
    "text/xml",
    "text/html",
];

/// A parsed, namespace-free markup tree, ready for [`query`].
pub struct MarkupTree {
    document: Html,
}

/// Parses `bytes` (whose MIME type must be one of [`SUPPORTED_MIME_TYPES`])
/// into a namespace-free tree, using `declared_charset` (e.g. the
/// `charset` parameter off a `Content-Type` header) to guide decoding.
pub fn parse(mime: &str, bytes: &[u8], declared_charset: Option<&str>) -> Result<MarkupTree> {
    if !SUPPORTED_MIME_TYPES.contains(&mime) {
        return Err(anyhow!("unsupported markup MIME type: {mime}"));
    }

    let text = encoding::decode(bytes, declared_charset);
    let stripped = namespace::strip_namespaces(&text);
    let document = Html::parse_document(&stripped);
    Ok(MarkupTree { document })
}

/// Evaluates a location expression (a restricted XPath-like absolute path,
/// e.g. `//div[@id='content']/h1`) and returns matching text nodes in
/// document order. If more than one node matches, callers that expect a
/// single value should take the first and log that fact.
pub fn query(tree: &MarkupTree, expression: &str) -> Result<Vec<String>> {
    let css = xpath_lite::to_css(expression)?;
    let selector =
        Selector::parse(&css).map_err(|e| anyhow!("invalid location expression '{expression}' (as css '{css}'): {e:?}"))?;

    Ok(tree
        .document
        .select(&selector)
        .map(|el| el.text().collect::<String>())
        .collect())
}

/// Convenience for the common case of wanting a single value: the first
/// match, logging if there was more than one.
pub fn query_one(tree: &MarkupTree, expression: &str) -> Result<Option<String>> {
    let mut matches = query(tree, expression)?;
    if matches.len() > 1 {
        log::info!(
            "location expression '{expression}' matched {} nodes, using the first",
            matches.len()
        );
    }
    Ok(if matches.is_empty() {
        None
    } else {
        Some(matches.remove(0))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body><div id="content"><h1>Hello</h1><h1>World</h1></div></body></html>"#;

    #[test]
    fn query_returns_matches_in_document_order() {
        let tree = parse("text/html", PAGE.as_bytes(), None).unwrap();
        let matches = query(&tree, "//div[@id='content']/h1").unwrap();
        assert_eq!(matches, vec!["Hello".to_string(), "World".to_string()]);
    }

    #[test]
    fn query_one_takes_first_of_several() {
        let tree = parse("text/html", PAGE.as_bytes(), None).unwrap();
        let first = query_one(&tree, "//div[@id='content']/h1").unwrap();
        assert_eq!(first, Some("Hello".to_string()));
    }

    #[test]
    fn namespaced_elements_are_queryable_by_bare_name() {
        let xml = r#"<root xmlns:dc="http://purl.org/dc/elements/1.1/"><dc:title>A Title</dc:title></root>"#;
        let tree = parse("application/xml", xml.as_bytes(), None).unwrap();
        let matches = query(&tree, "//title").unwrap();
        assert_eq!(matches, vec!["A Title".to_string()]);
    }

    #[test]
    fn rejects_unsupported_mime() {
        assert!(parse("application/pdf", b"", None).is_err());
    }
}
