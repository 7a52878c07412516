//! PropertyMap — the key-value bag on compounds and reaction edges.

use std::collections::HashMap;
use super::Value;
use crate::Result;

/// A map of property names to values.
pub type PropertyMap = HashMap<String, Value>;

/// Merge and lookup helpers shared by compounds and edges.
pub trait PropertyMapExt {
    /// Overlay `patch` key-by-key: new keys are added, existing keys
    /// overwritten, keys absent from the patch left untouched.
    fn overlay(&mut self, patch: PropertyMap);

    /// String-typed lookup.
    fn get_str(&self, key: &str) -> Option<&str>;

    /// Keys in sorted order, for stable rendering.
    fn sorted_keys(&self) -> Vec<&str>;
}

impl PropertyMapExt for PropertyMap {
    fn overlay(&mut self, patch: PropertyMap) {
        self.extend(patch);
    }

    fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    fn sorted_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

/// Convert a JSON object into a PropertyMap, rejecting nested structure.
pub fn property_map_from_json(map: serde_json::Map<String, serde_json::Value>) -> Result<PropertyMap> {
    map.into_iter()
        .map(|(k, v)| {
            let value = Value::from_json(&k, v)?;
            Ok((k, value))
        })
        .collect()
}

/// Build a PropertyMap from `(key, value)` pairs.
pub fn props<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> PropertyMap
where
    K: Into<String>,
    V: Into<Value>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_overlay_merges_not_replaces() {
        let mut base = props([("a", 1)]);
        base.overlay(props([("b", 2)]));
        assert_eq!(base.get("a"), Some(&Value::Int(1)));
        assert_eq!(base.get("b"), Some(&Value::Int(2)));

        base.overlay(props([("a", "one")]));
        assert_eq!(base.get_str("a"), Some("one"));
        assert_eq!(base.len(), 2);
    }

    #[test]
    fn test_from_json_object() {
        let obj = json!({"reagent": "KMnO4", "temperature": 25, "catalyst": ["Pt"]});
        let serde_json::Value::Object(map) = obj else { unreachable!() };
        let pm = property_map_from_json(map).unwrap();
        assert_eq!(pm.get_str("reagent"), Some("KMnO4"));
        assert_eq!(pm.sorted_keys(), vec!["catalyst", "reagent", "temperature"]);
    }
}
