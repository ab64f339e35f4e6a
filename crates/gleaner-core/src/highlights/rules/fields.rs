//! Prioritized key lookups over JSON objects.

use serde_json::{Map, Value};

use super::text::normalize;

/// Return the normalized value of the first candidate key holding a
/// non-empty string.
///
/// Keys are tried in priority order. Non-string values (numbers, booleans,
/// objects, null) are treated as absent and never coerced. Absence yields
/// an empty string.
pub fn pick(bag: &Map<String, Value>, keys: &[String]) -> String {
    keys.iter()
        .filter_map(|key| bag.get(key).and_then(Value::as_str))
        .map(normalize)
        .find(|value| !value.is_empty())
        .unwrap_or_default()
}

/// Return the first candidate key holding a nonzero integer, as text.
///
/// E-reader exports store pages as numbers. Only unsigned integers are
/// read; strings, floats and zero are treated as absent.
pub fn pick_page(bag: &Map<String, Value>, keys: &[String]) -> String {
    keys.iter()
        .filter_map(|key| bag.get(key).and_then(Value::as_u64))
        .find(|page| *page != 0)
        .map(|page| page.to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn keys(list: &[&str]) -> Vec<String> {
        list.iter().map(|k| k.to_string()).collect()
    }

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_pick_respects_priority() {
        let bag = object(json!({"content": "second", "text": "first"}));
        assert_eq!(pick(&bag, &keys(&["text", "content"])), "first");
        assert_eq!(pick(&bag, &keys(&["content", "text"])), "second");
    }

    #[test]
    fn test_pick_normalizes() {
        let bag = object(json!({"text": "  a\n  b "}));
        assert_eq!(pick(&bag, &keys(&["text"])), "a b");
    }

    #[test]
    fn test_pick_skips_non_strings() {
        let bag = object(json!({"page": 42, "position": "12-14", "color": null, "flag": true}));
        assert_eq!(pick(&bag, &keys(&["page", "position"])), "12-14");
        assert_eq!(pick(&bag, &keys(&["page"])), "");
        assert_eq!(pick(&bag, &keys(&["color", "flag"])), "");
    }

    #[test]
    fn test_pick_skips_blank_strings() {
        let bag = object(json!({"text": "   ", "highlight": "kept"}));
        assert_eq!(pick(&bag, &keys(&["text", "highlight"])), "kept");
    }

    #[test]
    fn test_pick_page_reads_integers_only() {
        let bag = object(json!({"location": 0, "page": 12, "position": "7"}));
        assert_eq!(pick_page(&bag, &keys(&["location", "page", "position"])), "12");
        assert_eq!(pick_page(&bag, &keys(&["position"])), "");
        assert_eq!(pick_page(&object(json!({"page": 1.5})), &keys(&["page"])), "");
        assert_eq!(pick_page(&object(json!({"page": -3})), &keys(&["page"])), "");
    }

    #[test]
    fn test_pick_absent() {
        let bag = object(json!({}));
        assert_eq!(pick(&bag, &keys(&["text"])), "");
    }
}
