use std::fmt;

use serde::{Deserialize, Serialize};

/// Verbosity passed through to the engine as `--log-level`.
///
/// Also controls output filtering: known-noisy engine diagnostics are
/// suppressed unless the level is [`LogLevel::Debug`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Everything, including engine-internal noise
    Debug,
    /// Normal operation
    #[default]
    Info,
    /// Warnings and errors only
    Warning,
    /// Errors only
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Browser engine backend driven by the CasperJS invocable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    /// WebKit-based PhantomJS (the default backend)
    #[default]
    PhantomJs,
    /// Gecko-based SlimerJS; needs a Firefox executable at runtime
    SlimerJs,
}

impl Engine {
    pub fn as_str(&self) -> &'static str {
        match self {
            Engine::PhantomJs => "phantomjs",
            Engine::SlimerJs => "slimerjs",
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One free-form engine CLI option value.
///
/// Booleans render as `yes`/`no` on the engine command line; a bare
/// [`OptionValue::Flag`] renders with no value at all.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Flag,
    Bool(bool),
    Text(String),
}

impl OptionValue {
    /// Renders the option as a `--name[=value]` command-line token.
    pub fn render(&self, name: &str) -> String {
        match self {
            OptionValue::Flag => format!("--{}", name),
            OptionValue::Bool(true) => format!("--{}=yes", name),
            OptionValue::Bool(false) => format!("--{}=no", name),
            OptionValue::Text(value) => format!("--{}={}", name, value),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Text(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Text(value)
    }
}

/// Structured navigation event parsed from one engine diagnostic line.
///
/// Keys and values come straight from the `Navigation requested:` record;
/// the literal tokens `true`/`false` are coerced to booleans, everything
/// else stays a string.
pub type NavigationRecord = serde_json::Map<String, serde_json::Value>;

/// Mouse event names accepted by [`crate::Casper::mouse_event`].
pub const MOUSE_EVENTS: [&str; 6] = [
    "click",
    "mousedown",
    "mousemove",
    "mouseout",
    "mouseover",
    "mouseup",
];

/// Keyboard modifier tokens for the `send_keys` `modifiers` option.
pub const KEY_MODIFIERS: [&str; 5] = ["ctrl", "alt", "shift", "meta", "keypad"];

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
