//! Encoding detection: prefer a declared charset, then fall back to a
//! heuristic over {utf-8, latin-1}. Latin-1 can decode any byte sequence,
//! so it serves as the guaranteed-to-succeed last resort.

pub fn decode(bytes: &[u8], declared_charset: Option<&str>) -> String {
    if let Some(charset) = declared_charset {
        let normalized = charset.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "utf-8" | "utf8" => {
                if let Ok(s) = std::str::from_utf8(bytes) {
                    return s.to_string();
                }
            }
            "latin-1" | "iso-8859-1" | "latin1" => return decode_latin1(bytes),
            _ => {}
        }
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => decode_latin1(bytes),
    }
}

fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_valid_utf8() {
        assert_eq!(decode("héllo".as_bytes(), Some("utf-8")), "héllo");
    }

    #[test]
    fn falls_back_to_latin1_on_invalid_utf8() {
        let bytes = [0xE9u8]; // 'é' in latin-1, invalid utf-8 alone
        assert_eq!(decode(&bytes, None), "é");
    }
}
