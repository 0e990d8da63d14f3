//! Content-type, gzip sniffing/decompression, and whitespace normalization.

use std::io::Read;

use anyhow::{Context, Result};
use flate2::read::GzDecoder;

/// Returns the MIME part of a `Content-Type` header value, stripping any
/// `; charset=...` (or other parameter) suffix.
pub fn get_content_type(header: &str) -> String {
    header
        .split(';')
        .next()
        .unwrap_or(header)
        .trim()
        .to_string()
}

/// True if the response is gzip-compressed at the content level: either
/// the MIME type is `application/x-gzip`, or the request URL path ends in
/// `.gz`. Transport-level gzip (the `Content-Encoding` header) is handled
/// by the HTTP client itself and is not this function's concern.
pub fn is_gzipped(content_type: Option<&str>, request_url: &str) -> bool {
    let mime_is_gzip = content_type
        .map(|ct| get_content_type(ct) == "application/x-gzip")
        .unwrap_or(false);
    mime_is_gzip || request_url.ends_with(".gz")
}

/// Gzip-decodes `bytes` into a `String`.
pub fn gunzip(bytes: &[u8]) -> Result<String> {
    let mut decoder = GzDecoder::new(bytes);
    let mut out = String::new();
    decoder
        .read_to_string(&mut out)
        .context("failed to gunzip content")?;
    Ok(out)
}

/// Replaces any run of whitespace (CR, LF, TAB, SPACE) with a single space,
/// then trims the result.
pub fn normalize_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_run = false;
    for c in s.chars() {
        if matches!(c, '\r' | '\n' | '\t' | ' ') {
            if !in_run {
                out.push(' ');
                in_run = true;
            }
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out.trim().to_string()
}
