// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Deserializers for fields that older data files may store loosely.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Deserializer;
use serde::de::IgnoredAny;
use serde_json::Value;

/// Read a counter. Missing, null, negative or non-numeric values become 0;
/// numeric strings are parsed and floats are truncated.
pub fn counter<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(counter_from_value(&value))
}

fn counter_from_value(value: &Value) -> u32 {
    match value {
        Value::Number(n) => {
            if let Some(n) = n.as_u64() {
                u32::try_from(n).unwrap_or(u32::MAX)
            } else if let Some(f) = n.as_f64() {
                if f.is_finite() && f > 0.0 {
                    f.min(u32::MAX as f64) as u32
                } else {
                    0
                }
            } else {
                0
            }
        }
        Value::String(s) => s.trim().parse::<u32>().unwrap_or(0),
        Value::Bool(b) => u32::from(*b),
        _ => 0,
    }
}

/// Treat `null` as the type's default.
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Read free text. Null becomes empty, numbers and booleans are rendered.
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

/// Read the topic summaries. Anything other than an object is empty. Every
/// key is kept: null becomes empty text and other values their JSON text.
pub fn summaries<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let mut map = BTreeMap::new();
    if let Value::Object(entries) = value {
        for (topic, summary) in entries {
            let summary = match summary {
                Value::String(summary) => summary,
                Value::Null => String::new(),
                other => other.to_string(),
            };
            map.insert(topic, summary);
        }
    }
    Ok(map)
}

/// Skip over a stored value and use the default. For fields that are
/// recomputed after loading.
pub fn ignored<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default,
{
    IgnoredAny::deserialize(deserializer)?;
    Ok(T::default())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[derive(Deserialize)]
    struct Counted {
        #[serde(default, deserialize_with = "counter")]
        n: u32,
    }

    fn read(value: Value) -> u32 {
        let counted: Counted = serde_json::from_value(value).unwrap();
        counted.n
    }

    #[test]
    fn test_counter() {
        assert_eq!(read(json!({})), 0);
        assert_eq!(read(json!({"n": null})), 0);
        assert_eq!(read(json!({"n": 3})), 3);
        assert_eq!(read(json!({"n": -3})), 0);
        assert_eq!(read(json!({"n": 2.7})), 2);
        assert_eq!(read(json!({"n": "4"})), 4);
        assert_eq!(read(json!({"n": "four"})), 0);
        assert_eq!(read(json!({"n": [1]})), 0);
    }

    #[test]
    fn test_summaries() {
        #[derive(Deserialize)]
        struct S {
            #[serde(default, deserialize_with = "summaries")]
            s: BTreeMap<String, String>,
        }
        let s: S = serde_json::from_value(json!({"s": ["a", "b"]})).unwrap();
        assert!(s.s.is_empty());
        let s: S = serde_json::from_value(json!({"s": {"a": "x", "b": 1, "c": null}})).unwrap();
        assert_eq!(s.s.len(), 3);
        assert_eq!(s.s["a"], "x");
        assert_eq!(s.s["b"], "1");
        assert_eq!(s.s["c"], "");
    }
}
