//! Parses a `filename=` parameter out of a `Content-Disposition` header.

pub fn filename_from_content_disposition(header: &str) -> Option<String> {
    header.split(';').map(str::trim).find_map(|part| {
        let value = part.strip_prefix("filename=")?;
        let unquoted = value.trim_matches('"');
        Some(String::from_utf8_lossy(unquoted.as_bytes()).into_owned())
    })
}
