//! Argument extraction helpers for tool-call payloads.
//!
//! ```rust
//! use rtooling::string_list;
//! use serde_json::json;
//!
//! let args = json!({"filePaths": ["README.md", 3, "src/lib.rs"]});
//! let paths = string_list(args.as_object().expect("object"), "filePaths");
//! assert_eq!(paths, vec!["README.md", "src/lib.rs"]);
//! ```

use rprovider::JsonObject;
use serde_json::Value;

/// Reads `key` as a list of strings. A bare string counts as a one-element
/// list; non-string array entries and any other shape yield nothing.
pub fn string_list(args: &JsonObject, key: &str) -> Vec<String> {
    match args.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(ToString::to_string)
            .collect(),
        Some(Value::String(single)) => vec![single.clone()],
        _ => Vec::new(),
    }
}
