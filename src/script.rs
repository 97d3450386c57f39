//! Script buffer and argument serialization for generated CasperJS code.

use serde_json::Value;

/// Ordered buffer of rendered script fragments.
///
/// Fragments are appended in call order; the single prepend case is the
/// filesystem-module import injected right before a run when file-writing
/// actions were used.
#[derive(Clone, Debug, Default)]
pub struct Script {
    fragments: Vec<String>,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rendered fragment to the end of the script.
    pub fn push(&mut self, fragment: impl Into<String>) {
        self.fragments.push(fragment.into());
    }

    /// Inserts a rendered fragment at the very beginning of the script.
    pub fn prepend(&mut self, fragment: impl Into<String>) {
        self.fragments.insert(0, fragment.into());
    }

    pub fn clear(&mut self) {
        self.fragments.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Concatenates all fragments, one per line block, in insertion order.
    pub fn render(&self) -> String {
        let mut rendered = String::new();
        for fragment in &self.fragments {
            rendered.push_str(fragment);
            rendered.push('\n');
        }
        rendered
    }
}

/// Converts a host value into a CasperJS literal token.
///
/// Strings become single-quoted literals. The caller is responsible for not
/// passing strings containing a single quote; no escaping is applied.
/// `null` maps to `undefined`, booleans to `true`/`false`, numbers pass
/// through, and collections render as pretty-printed object/array literals.
pub fn serialize(value: &Value) -> String {
    match value {
        Value::Null => "undefined".to_string(),
        Value::Bool(true) => "true".to_string(),
        Value::Bool(false) => "false".to_string(),
        Value::Number(number) => number.to_string(),
        Value::String(text) => format!("'{}'", text),
        collection => {
            serde_json::to_string_pretty(collection).expect("JSON value always serializes")
        }
    }
}

/// Like [`serialize`], with absence mapping to `undefined`.
pub fn serialize_opt(value: Option<&Value>) -> String {
    match value {
        Some(value) => serialize(value),
        None => "undefined".to_string(),
    }
}

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;
