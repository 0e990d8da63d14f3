//! Maps prefixed metadata properties from different metadata vocabularies
//! (Dublin Core, XMP, Tika's own `meta:` namespace, ...) to canonical keys.

use std::collections::HashMap;

/// For each canonical key, the prefixed variants that map to it, in
/// priority order: the first one present in the raw mapping wins.
const METADATA_MAPPING: &[(&str, &[&str])] = &[
    ("title", &["dcterms:title", "dc:title", "DC.title", "title"]),
    (
        "created",
        &["dcterms:created", "meta:creation-date", "Creation-Date"],
    ),
    (
        "description",
        &["dcterms:description", "dc:description", "description"],
    ),
    ("creator", &["dcterms:creator", "dc:creator", "creator"]),
    ("keywords", &["meta:keyword", "keywords"]),
];

/// Adds canonical aliases to `raw` in place, preserving the original keys.
/// A canonical key already present in `raw` is left untouched.
pub fn normalize(raw: &mut HashMap<String, String>) {
    for (canonical, candidates) in METADATA_MAPPING {
        if raw.contains_key(*canonical) {
            continue;
        }
        if let Some(value) = candidates.iter().find_map(|key| raw.get(*key)).cloned() {
            raw.insert(canonical.to_string(), value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_matching_prefix_wins() {
        let mut raw = HashMap::new();
        raw.insert("dc:title".to_string(), "from dc".to_string());
        raw.insert("dcterms:title".to_string(), "from dcterms".to_string());
        normalize(&mut raw);
        assert_eq!(raw.get("title"), Some(&"from dcterms".to_string()));
    }

    #[test]
    fn missing_canonical_is_simply_absent() {
        let mut raw = HashMap::new();
        raw.insert("unrelated".to_string(), "x".to_string());
        normalize(&mut raw);
        assert!(!raw.contains_key("title"));
    }

    #[test]
    fn original_keys_are_preserved() {
        let mut raw = HashMap::new();
        raw.insert("dc:title".to_string(), "t".to_string());
        normalize(&mut raw);
        assert_eq!(raw.get("dc:title"), Some(&"t".to_string()));
        assert_eq!(raw.get("title"), Some(&"t".to_string()));
    }

    #[test]
    fn existing_canonical_key_is_not_overwritten() {
        let mut raw = HashMap::new();
        raw.insert("title".to_string(), "already canonical".to_string());
        raw.insert("dc:title".to_string(), "other".to_string());
        normalize(&mut raw);
        assert_eq!(raw.get("title"), Some(&"already canonical".to_string()));
    }
}
