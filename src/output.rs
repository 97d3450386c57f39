//! Interprets engine stdout lines into session facts.
//!
//! Each raw line is filtered against known engine noise, rewritten to drop
//! engine-internal prefix tags, and scanned for structured content: either a
//! sentinel-tagged current-URL/current-title echo, or a `Navigation
//! requested:` diagnostic that parses into a [`NavigationRecord`].

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

use crate::types::{LogLevel, NavigationRecord};

/// Diagnostics dropped below debug level: a PhantomJS frame-access warning
/// and a Gecko strict-mode warning.
const NOISE_SUBSTRINGS: [&str; 2] = [
    "Unsafe JavaScript attempt to access frame",
    "JavaScript strict warning:",
];

/// Engine-internal line prefixes removed from every line.
const PREFIX_TAGS: [&str; 2] = ["[phantom] ", "[remote] "];

const URL_SENTINEL: &str = "[CURRENT_URL]";
const TITLE_SENTINEL: &str = "[CURRENT_TITLE]";
const NAVIGATION_MARKER: &str = "Navigation requested:";

lazy_static! {
    static ref PAIR_PATTERN: Regex =
        Regex::new(r" ?([^=,]+)=([^,]+)").expect("valid key=value pattern");
}

/// Decision for one raw output line.
#[derive(Clone, Debug, PartialEq)]
pub enum LineOutcome {
    /// Known noise at a non-debug level; record nothing, skip observers.
    Dropped,
    /// Sentinel-tagged current URL; record the line, skip observers.
    CurrentUrl { text: String, url: String },
    /// Sentinel-tagged current title; record the line, skip observers.
    CurrentTitle { text: String, title: String },
    /// Ordinary line, possibly carrying a navigation record.
    Line {
        text: String,
        navigation: Option<NavigationRecord>,
    },
}

/// Stateless per-line interpreter; the log level decides noise filtering.
#[derive(Clone, Copy, Debug)]
pub struct Interpreter {
    log_level: LogLevel,
}

impl Interpreter {
    pub fn new(log_level: LogLevel) -> Self {
        Self { log_level }
    }

    /// Applies the per-line rules in order: noise filter, prefix-tag strip,
    /// line-ending normalization, then sentinel or navigation extraction.
    pub fn interpret(&self, raw: &str) -> LineOutcome {
        if self.log_level != LogLevel::Debug
            && NOISE_SUBSTRINGS.iter().any(|noise| raw.contains(noise))
        {
            return LineOutcome::Dropped;
        }

        let mut line = raw.to_string();
        for tag in PREFIX_TAGS {
            line = line.replace(tag, "");
        }
        let line = line.trim_end_matches('\r').to_string();

        if let Some(url) = value_after_tag(&line, URL_SENTINEL) {
            return LineOutcome::CurrentUrl { text: line, url };
        }
        if let Some(title) = value_after_tag(&line, TITLE_SENTINEL) {
            return LineOutcome::CurrentTitle { text: line, title };
        }

        let navigation = line
            .contains(NAVIGATION_MARKER)
            .then(|| parse_navigation(&line));
        LineOutcome::Line {
            text: line,
            navigation,
        }
    }
}

/// Extracts the trimmed remainder after a sentinel tag, if present.
fn value_after_tag(line: &str, tag: &str) -> Option<String> {
    line.find(tag)
        .map(|index| line[index + tag.len()..].trim().to_string())
}

/// Parses the `key=value` pairs following `Navigation requested:`.
///
/// Values are terminated by a comma or the end of the line; `true`/`false`
/// coerce to booleans.
fn parse_navigation(line: &str) -> NavigationRecord {
    let payload = line
        .splitn(2, NAVIGATION_MARKER)
        .nth(1)
        .unwrap_or("")
        .trim();

    let mut record = NavigationRecord::new();
    for capture in PAIR_PATTERN.captures_iter(payload) {
        let key = capture[1].trim().to_string();
        let value = match capture[2].trim() {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            text => Value::String(text.to_string()),
        };
        record.insert(key, value);
    }
    record
}

#[cfg(test)]
#[path = "output_test.rs"]
mod output_test;
