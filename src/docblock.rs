//! Constructor-annotation scanning.
//!
//! The host type system can declare a property as a container, but not what
//! the container holds. Element and key/value types ride in a free-text blob
//! attached to the constructor, one `@param` line per field:
//!
//! ```text
//! @param string[] $tags
//! @param array<string, ?int> $scores
//! @param array<string, ::fixtures::Child> $children
//! ```
//!
//! Scanning is deliberately forgiving: a line that structurally resembles a
//! container annotation but has no recoverable field name yields no entry at
//! all, and the field is later treated as an unannotated container.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::schema::{MapType, is_builtin};

static ARRAY_PARAM: Lazy<Regex> = Lazy::new(|| Regex::new(r"@param\s+.*\[\]\s+\$\S*").unwrap());
static ARRAY_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\[\]\s$]+").unwrap());
static MAP_PARAM: Lazy<Regex> = Lazy::new(|| Regex::new(r"@param\s+array<.+,.+>\s+\$\S*").unwrap());
static MAP_KEY_VALUE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<(.+),\s*(.+)>").unwrap());
static PARAM_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$(\S+)").unwrap());

/// Nullability of the field itself comes from the declared signature, never
/// from the annotation, so null union fragments are noise for the array scan.
fn strip_null_markers(blob: &str) -> String {
    blob.replace("null|", "").replace("|null", "")
}

/// Scan `TYPE[] $name` annotations into a field-name → element-type map.
pub fn parse_array_types(blob: Option<&str>) -> HashMap<String, String> {
    let Some(blob) = blob else {
        return HashMap::new();
    };
    let stripped = strip_null_markers(blob);

    let mut array_types = HashMap::new();
    for found in ARRAY_PARAM.find_iter(&stripped) {
        let segments: Vec<&str> = ARRAY_SPLIT
            .split(found.as_str())
            .filter(|s| !s.is_empty())
            .collect();
        // segments: ["@param", TYPE, NAME, ...]
        let (Some(element_type), Some(name)) = (segments.get(1), segments.get(2)) else {
            continue;
        };
        array_types.insert(name.to_string(), element_type.to_string());
    }
    array_types
}

/// Scan `array<K, V> $name` annotations into a field-name → map-type map.
pub fn parse_map_types(blob: Option<&str>) -> HashMap<String, MapType> {
    let Some(blob) = blob else {
        return HashMap::new();
    };

    let mut map_types = HashMap::new();
    for found in MAP_PARAM.find_iter(blob) {
        let line = found.as_str();

        let Some(name) = PARAM_NAME.captures(line).map(|c| c[1].to_string()) else {
            continue;
        };
        let Some(key_value) = MAP_KEY_VALUE.captures(line) else {
            continue;
        };

        let key_type = key_value[1].to_string();
        // Class references may be fully qualified with a leading separator.
        let mut value_type = key_value[2].trim_matches(':').to_string();

        let mut value_nullable = false;
        if let Some(rest) = value_type.strip_prefix('?') {
            value_nullable = true;
            value_type = rest.to_string();
        } else if value_type.contains("null") {
            value_nullable = true;
            value_type = value_type.replace("|null", "").replace("null|", "");
        }

        let is_value_builtin = is_builtin(&value_type);
        map_types.insert(
            name,
            MapType {
                key_type,
                value_type,
                is_value_builtin,
                is_value_nullable: value_nullable,
            },
        );
    }
    map_types
}
