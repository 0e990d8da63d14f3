//! The title priority chain, shared by the `Title` extractor and
//! `SnippetText` (which needs to know the title to strip it as a prefix).

use base64::Engine;
use sitedex_types::ResourceInfo;
use sitedex_util::content::normalize_whitespace;

const TITLE_HEADER: &str = "X-Document-Title";
const TITLE_XPATH: &str = "//div[@id='content']/h1";

pub fn title_from_header(resource_info: &ResourceInfo) -> Option<String> {
    let raw = resource_info.header(TITLE_HEADER)?;
    let decoded = base64::engine::general_purpose::STANDARD.decode(raw).ok()?;
    let text = String::from_utf8(decoded).ok()?;
    Some(text.trim().to_string())
}

pub fn title_from_markup(resource_info: &ResourceInfo) -> Option<String> {
    let filename = resource_info.filename.as_ref()?;
    let content_type = resource_info.content_type.as_deref()?;
    if !sitedex_markup::SUPPORTED_MIME_TYPES.contains(&content_type) {
        return None;
    }
    let bytes = std::fs::read(filename).ok()?;
    let tree = sitedex_markup::parse(content_type, &bytes, None).ok()?;
    sitedex_markup::query_one(&tree, TITLE_XPATH).ok().flatten()
}

pub fn title_from_metadata(resource_info: &ResourceInfo) -> Option<String> {
    resource_info.metadata.get("title").cloned()
}

/// Runs the title priority chain: header, markup, metadata, filename, slug.
/// `filename_fallback` and `slug_fallback` receive the canonical URL/headers
/// already resolved by their own extractors to avoid duplicating logic.
pub fn resolve(
    resource_info: &ResourceInfo,
    filename_fallback: impl FnOnce() -> Option<String>,
    slug_fallback: impl FnOnce() -> String,
) -> String {
    let raw = title_from_header(resource_info)
        .or_else(|| title_from_markup(resource_info))
        .or_else(|| title_from_metadata(resource_info))
        .or_else(filename_fallback)
        .unwrap_or_else(slug_fallback);
    normalize_whitespace(&raw)
}
