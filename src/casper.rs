//! Fluent CasperJS script builder, session state, and process runner.
//!
//! A [`Casper`] accumulates rendered script fragments in call order, then
//! [`Casper::run`] writes them to a temporary file, invokes the `casperjs`
//! binary, and streams its stdout through the output interpreter back into
//! the session.

use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde_json::{json, Map, Value};
use tracing::{debug, info};

use crate::errors::{Result, WraithError};
use crate::output::{Interpreter, LineOutcome};
use crate::provision::{self, Os};
use crate::script::{self, Script};
use crate::types::{Engine, LogLevel, NavigationRecord, OptionValue, MOUSE_EVENTS};

/// Mandatory keys of the `capture` area mapping.
const CAPTURE_AREA_KEYS: [&str; 4] = ["top", "left", "width", "height"];
/// Valid keys of the `capture` options mapping.
const CAPTURE_OPTION_KEYS: [&str; 2] = ["format", "quality"];
/// Valid keys of the `open` settings mapping.
const OPEN_SETTING_KEYS: [&str; 3] = ["method", "data", "headers"];
/// Valid keys of the `send_keys` options mapping.
const SEND_KEYS_OPTION_KEYS: [&str; 3] = ["reset", "keepFocus", "modifiers"];

type Observer = Box<dyn Fn(&str) + Send>;

/// Fluent builder for one automation session.
///
/// Builder methods append script fragments and return `&mut Self` for
/// chaining; methods with structural constraints on their arguments return
/// `Result` and fail fast without touching the script buffer. All session
/// state (script, captured output, parsed navigation records, current
/// URL/title) is cleared by [`Casper::start`].
pub struct Casper {
    script: Script,
    output: Vec<String>,
    requests: Vec<NavigationRecord>,
    current_url: Option<String>,
    current_title: Option<String>,
    log_level: LogLevel,
    engine: Engine,
    user_agent: String,
    bin_dir: Option<PathBuf>,
    options: Vec<(String, OptionValue)>,
    uses_fs_module: bool,
    observers: Vec<Observer>,
}

impl std::fmt::Debug for Casper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Casper")
            .field("script", &self.script)
            .field("output", &self.output)
            .field("requests", &self.requests)
            .field("current_url", &self.current_url)
            .field("current_title", &self.current_title)
            .field("log_level", &self.log_level)
            .field("engine", &self.engine)
            .field("user_agent", &self.user_agent)
            .field("bin_dir", &self.bin_dir)
            .field("options", &self.options)
            .field("uses_fs_module", &self.uses_fs_module)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Default for Casper {
    fn default() -> Self {
        Self {
            script: Script::new(),
            output: Vec::new(),
            requests: Vec::new(),
            current_url: None,
            current_title: None,
            log_level: LogLevel::default(),
            engine: Engine::default(),
            user_agent: "wraith".to_string(),
            bin_dir: None,
            options: Vec::new(),
            uses_fs_module: false,
            observers: Vec::new(),
        }
    }
}

impl Casper {
    pub fn new() -> Self {
        Self::default()
    }

    /* ------------------------- getters and setters ------------------------- */

    pub fn set_log_level(&mut self, log_level: LogLevel) -> &mut Self {
        self.log_level = log_level;
        self
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }

    pub fn set_engine(&mut self, engine: Engine) -> &mut Self {
        self.engine = engine;
        self
    }

    pub fn engine(&self) -> Engine {
        self.engine
    }

    pub fn set_user_agent(&mut self, user_agent: impl Into<String>) -> &mut Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Sets the directory searched first for the engine binaries.
    ///
    /// The directory must exist; the stored path is canonicalized.
    pub fn set_bin_dir(&mut self, bin_dir: impl AsRef<Path>) -> Result<&mut Self> {
        let bin_dir = bin_dir.as_ref();
        let bin_dir = bin_dir
            .canonicalize()
            .map_err(|_| WraithError::BinDirNotFound(bin_dir.to_path_buf()))?;
        self.bin_dir = Some(bin_dir);
        Ok(self)
    }

    /// Effective binary directory: the configured one, or the shared
    /// provisioning default.
    pub fn bin_dir(&self) -> PathBuf {
        self.bin_dir
            .clone()
            .unwrap_or_else(provision::default_bin_dir)
    }

    /// Replaces the whole free-form engine option map.
    pub fn set_options(&mut self, options: Vec<(String, OptionValue)>) -> &mut Self {
        self.options = options;
        self
    }

    /// Sets one free-form engine option, replacing any previous value.
    pub fn set_option(&mut self, name: impl Into<String>, value: OptionValue) -> &mut Self {
        let name = name.into();
        match self.options.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.options.push((name, value)),
        }
        self
    }

    pub fn option(&self, name: &str) -> Result<&OptionValue> {
        self.options
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
            .ok_or_else(|| WraithError::OptionNotSet(name.to_string()))
    }

    pub fn options(&self) -> &[(String, OptionValue)] {
        &self.options
    }

    /// Raw output lines captured during the last run.
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Navigation records parsed from the last run's output.
    pub fn requests(&self) -> &[NavigationRecord] {
        &self.requests
    }

    /// Projects one key out of every navigation record, `None` where absent.
    pub fn request_values(&self, key: &str) -> Vec<Option<&Value>> {
        self.requests.iter().map(|record| record.get(key)).collect()
    }

    pub fn current_url(&self) -> Option<&str> {
        self.current_url.as_deref()
    }

    pub fn current_title(&self) -> Option<&str> {
        self.current_title.as_deref()
    }

    /// The accumulated script text as it would be written to disk.
    pub fn script(&self) -> String {
        self.script.render()
    }

    /// Registers an observer invoked synchronously, in registration order,
    /// with every output line that survives filtering.
    pub fn on_output<F>(&mut self, observer: F) -> &mut Self
    where
        F: Fn(&str) + Send + 'static,
    {
        self.observers.push(Box::new(observer));
        self
    }

    /* ----------------------------- script steps ---------------------------- */

    /// Opens a session: resets all state, renders the engine bootstrap, and
    /// (when a URL is given) an implicit open requesting `text/html`.
    pub fn start(&mut self, url: Option<&str>) -> &mut Self {
        self.reset();

        let fragment = format!(
            "  var casper = require('casper').create({{
    verbose: true,
    pageSettings: {{
      javascriptEnabled: true,
      userAgent: {user_agent}
    }},
    viewportSize: {{
      width: 1280,
      height: 720
    }}
  }});

  casper.start();",
            user_agent = script::serialize(&json!(self.user_agent)),
        );
        self.script.push(fragment);

        if let Some(url) = url {
            let url = script::serialize(&json!(url));
            self.script.push(format!(
                "  casper.then(function() {{
    this.open({url}, {{
      headers: {{
        'Accept': 'text/html'
      }}
    }});
  }});"
            ));
        }

        self
    }

    /// Moves back a step in the browser's history.
    pub fn back(&mut self) -> &mut Self {
        self.script.push("  casper.back();");
        self
    }

    /// Moves a step forward in the browser's history.
    pub fn forward(&mut self) -> &mut Self {
        self.script.push("  casper.forward();");
        self
    }

    /// Reloads the current page.
    pub fn reload(&mut self) -> &mut Self {
        self.script.push("  casper.reload();");
        self
    }

    /// Bypasses a given number of defined navigation steps.
    pub fn bypass(&mut self, count: u32) -> &mut Self {
        self.script.push(format!(
            "  casper.then(function() {{
    this.bypass({count});
  }});"
        ));
        self
    }

    /// Clicks the element matching the selector expression.
    pub fn click(&mut self, selector: &str) -> &mut Self {
        let selector = script::serialize(&json!(selector));
        self.script.push(format!(
            "  casper.then(function() {{
    this.click({selector});
  }});"
        ));
        self
    }

    /// Clicks the first element containing the label text, optionally
    /// restricted to a node name.
    pub fn click_label(&mut self, label: &str, tag: Option<&str>) -> &mut Self {
        let label = script::serialize(&json!(label));
        let tag = script::serialize_opt(tag.map(|tag| json!(tag)).as_ref());
        self.script.push(format!(
            "  casper.then(function() {{
    this.clickLabel({label}, {tag});
  }});"
        ));
        self
    }

    /// Triggers a mouse event on the first element matching the selector.
    ///
    /// The event name must be one of [`MOUSE_EVENTS`].
    pub fn mouse_event(&mut self, selector: &str, event: &str) -> Result<&mut Self> {
        if !MOUSE_EVENTS.contains(&event) {
            return Err(WraithError::InvalidArgument(format!(
                "mouse event \"{}\" is not supported",
                event
            )));
        }

        let selector = script::serialize(&json!(selector));
        let event = script::serialize(&json!(event));
        self.script.push(format!(
            "  casper.then(function() {{
    this.mouseEvent({event}, {selector});
  }});"
        ));
        Ok(self)
    }

    /// Performs an HTTP request for the given location.
    ///
    /// `settings` may carry `method`, `data`, and `headers`; any other key
    /// is a validation error.
    pub fn open(&mut self, url: &str, settings: Option<Value>) -> Result<&mut Self> {
        if let Some(settings) = &settings {
            let mapping = expect_object(settings, "open settings")?;
            check_keys(mapping, &OPEN_SETTING_KEYS, "open settings")?;
        }

        let url = script::serialize(&json!(url));
        let settings = script::serialize_opt(settings.as_ref());
        self.script
            .push(format!("  casper.open({url}, {settings});"));
        Ok(self)
    }

    /// Fills a form, referencing fields by their `name` attribute.
    pub fn fill(&mut self, selector: &str, values: Value, submit: bool) -> &mut Self {
        self.push_fill("fill", selector, values, submit);
        self
    }

    /// Fills a form, referencing fields by CSS3 selectors.
    pub fn fill_selectors(&mut self, selector: &str, values: Value, submit: bool) -> &mut Self {
        self.push_fill("fillSelectors", selector, values, submit);
        self
    }

    /// Fills a form, referencing fields by XPath selectors.
    pub fn fill_xpath(&mut self, selector: &str, values: Value, submit: bool) -> &mut Self {
        self.push_fill("fillXPath", selector, values, submit);
        self
    }

    fn push_fill(&mut self, method: &str, selector: &str, values: Value, submit: bool) {
        let selector = script::serialize(&json!(selector));
        let values = script::serialize(&values);
        let submit = script::serialize(&json!(submit));
        self.script.push(format!(
            "  casper.then(function() {{
    this.{method}({selector}, {values}, {submit});
  }});"
        ));
    }

    /// Sends native keyboard events to the element matching the selector.
    ///
    /// `options` may carry `reset`, `keepFocus`, and `modifiers`; the
    /// `modifiers` value must be an array of modifier tokens and is joined
    /// with `+` before serialization.
    pub fn send_keys(
        &mut self,
        selector: &str,
        keys: &str,
        options: Option<Value>,
    ) -> Result<&mut Self> {
        let options = match options {
            Some(options) => {
                let mut mapping = expect_object(&options, "send keys options")?.clone();
                check_keys(&mapping, &SEND_KEYS_OPTION_KEYS, "send keys options")?;

                let joined = match mapping.get("modifiers") {
                    Some(modifiers) => {
                        let list = modifiers.as_array().ok_or_else(|| {
                            WraithError::InvalidArgument(format!(
                                "value in option \"modifiers\" must be an array, given {}",
                                json_type_name(modifiers)
                            ))
                        })?;
                        Some(
                            list.iter()
                                .map(|modifier| match modifier {
                                    Value::String(token) => token.clone(),
                                    other => other.to_string(),
                                })
                                .collect::<Vec<_>>()
                                .join("+"),
                        )
                    }
                    None => None,
                };
                if let Some(joined) = joined {
                    mapping.insert("modifiers".to_string(), json!(joined));
                }

                script::serialize(&Value::Object(mapping))
            }
            None => "undefined".to_string(),
        };

        let selector = script::serialize(&json!(selector));
        let keys = script::serialize(&json!(keys));
        self.script.push(format!(
            "  casper.then(function() {{
    this.sendKeys({selector}, {keys}, {options});
  }});"
        ));
        Ok(self)
    }

    /// Captures the whole page, or the area given by `top`/`left`/`width`/
    /// `height` (all four mandatory when the mapping is supplied).
    ///
    /// `options` may carry `format` and `quality`.
    pub fn capture(
        &mut self,
        filename: &str,
        area: Option<Value>,
        options: Option<Value>,
    ) -> Result<&mut Self> {
        if let Some(area) = &area {
            let mapping = expect_object(area, "capture area")?;
            check_keys(mapping, &CAPTURE_AREA_KEYS, "capture area")?;
            for key in CAPTURE_AREA_KEYS {
                if !mapping.contains_key(key) {
                    return Err(WraithError::InvalidArgument(format!(
                        "capture area must contain key \"{}\"",
                        key
                    )));
                }
            }
        }
        if let Some(options) = &options {
            let mapping = expect_object(options, "capture options")?;
            check_keys(mapping, &CAPTURE_OPTION_KEYS, "capture options")?;
        }

        let filename = script::serialize(&json!(filename));
        let area = script::serialize_opt(area.as_ref());
        let options = script::serialize_opt(options.as_ref());
        self.script.push(format!(
            "  casper.then(function() {{
    this.capture({filename}, {area}, {options});
  }});"
        ));
        Ok(self)
    }

    /// Saves a remote resource to the filesystem; with no URL, downloads the
    /// current page.
    pub fn download(&mut self, filename: &str, url: Option<&str>) -> &mut Self {
        let url = match url {
            Some(url) => script::serialize(&json!(url)),
            None => "this.getCurrentUrl()".to_string(),
        };
        let filename = script::serialize(&json!(filename));
        self.script.push(format!(
            "  casper.then(function() {{
    this.download({url}, {filename});
  }});"
        ));
        self
    }

    /// Evaluates an expression in the page DOM context, with named arguments
    /// rendered as function parameters.
    pub fn evaluate(&mut self, code: &str, args: Option<Value>) -> Result<&mut Self> {
        let (names, values) = match args {
            Some(Value::Object(mapping)) => {
                let names = mapping.keys().cloned().collect::<Vec<_>>().join(", ");
                let rendered: Vec<String> = mapping.values().map(script::serialize).collect();
                let values = if rendered.is_empty() {
                    String::new()
                } else {
                    format!(", {}", rendered.join(", "))
                };
                (names, values)
            }
            Some(other) => {
                return Err(WraithError::InvalidArgument(format!(
                    "evaluate arguments must be an object, given {}",
                    json_type_name(&other)
                )))
            }
            None => (String::new(), String::new()),
        };

        self.script.push(format!(
            "  casper.evaluate(function({names}) {{
    {code}
  }}{values});"
        ));
        Ok(self)
    }

    /// Retrieves HTML from the current page; written to a file when a
    /// filename is given, echoed to output otherwise.
    pub fn get_html(
        &mut self,
        filename: Option<&str>,
        selector: Option<&str>,
        outer: bool,
    ) -> &mut Self {
        let selector = script::serialize_opt(selector.map(|selector| json!(selector)).as_ref());
        let outer = script::serialize(&json!(outer));
        let getter = format!("this.getHTML({selector}, {outer})");
        self.push_content_step(filename, &getter, "HTML");
        self
    }

    /// Retrieves the current page contents, including non-HTML content
    /// types; written to a file when a filename is given.
    pub fn get_page_content(&mut self, filename: Option<&str>) -> &mut Self {
        self.push_content_step(filename, "this.getPageContent()", "page content");
        self
    }

    fn push_content_step(&mut self, filename: Option<&str>, getter: &str, label: &str) {
        match filename {
            None => {
                self.script.push(format!(
                    "  casper.then(function() {{
    this.echo({getter});
  }});"
                ));
            }
            Some(filename) => {
                // fs module import gets prepended at run time
                self.uses_fs_module = true;
                let filename = script::serialize(&json!(filename));
                self.script.push(format!(
                    "  casper.then(function() {{
    fs.write({filename}, {getter});
    this.echo(\"[save] {label} to {filename}\");
  }});"
                ));
            }
        }
    }

    /// Logs a message through the engine at the given level.
    pub fn log(&mut self, message: &str, log_level: LogLevel) -> &mut Self {
        let message = script::serialize(&json!(message));
        let log_level = script::serialize(&json!(log_level.as_str()));
        self.script.push(format!(
            "  casper.then(function() {{
    this.log({message}, {log_level});
  }});"
        ));
        self
    }

    /// Scrolls the document down and right by pixel offsets.
    pub fn scroll_to(&mut self, down: i64, right: i64) -> &mut Self {
        // scrollTo takes x first
        self.script.push(format!(
            "  casper.then(function() {{
    this.scrollTo({right}, {down});
  }});"
        ));
        self
    }

    /// Scrolls the document to its bottom.
    pub fn scroll_to_bottom(&mut self) -> &mut Self {
        self.script.push(
            "  casper.then(function() {
    this.scrollToBottom();
    this.echo(\"[scrollToBottom]\");
  });",
        );
        self
    }

    /// Pauses the step suite for a fixed number of seconds.
    pub fn wait(&mut self, seconds: u64) -> &mut Self {
        let milliseconds = seconds * 1000;
        self.script.push(format!(
            "  casper.wait({milliseconds}, function() {{
    this.echo('[wait] time {seconds} sec occurred');
  }});"
        ));
        self
    }

    /// Waits until an element matching the selector exists in the remote
    /// DOM; `None` means the engine's default timeout.
    pub fn wait_for_selector(&mut self, selector: &str, max_seconds: Option<u64>) -> &mut Self {
        let selector = script::serialize(&json!(selector));
        let timeout = timeout_literal(max_seconds);
        self.script.push(format!(
            "  casper.waitForSelector({selector},
    function() {{
      this.echo(\"[waitForSelector] element {selector} found\");
    }},
    function() {{
      this.echo(\"[waitForSelector] time for wait on element {selector} occurred\");
    }}, {timeout});"
        ));
        self
    }

    /// Waits until the text is present in the page contents.
    pub fn wait_for_text(&mut self, text: &str, max_seconds: Option<u64>) -> &mut Self {
        let text = script::serialize(&json!(text));
        let timeout = timeout_literal(max_seconds);
        self.script.push(format!(
            "  casper.waitForText({text},
    function() {{
      this.echo(\"[waitForText] text {text} found\");
    }},
    function() {{
      this.echo(\"[waitForText] time for wait on text {text} occurred\");
    }}, {timeout});"
        ));
        self
    }

    /// Waits for the page URL to match the pattern, taken as a raw regular
    /// expression body rather than a quoted string.
    pub fn wait_for_url(&mut self, pattern: &str, max_seconds: Option<u64>) -> &mut Self {
        let timeout = timeout_literal(max_seconds);
        self.script.push(format!(
            "  casper.waitForUrl(/{pattern}/,
    function() {{
      this.echo(\"[waitForUrl] redirected to {pattern}\");
    }},
    function() {{
      this.echo(\"[waitForUrl] time for wait on URL {pattern} occurred\");
    }}, {timeout});"
        ));
        self
    }

    /// Writes text to output; with `evaluate`, the string is taken as a raw
    /// JS expression instead of a quoted literal.
    pub fn echo(&mut self, text: &str, evaluate: bool) -> &mut Self {
        let text = if evaluate {
            text.to_string()
        } else {
            script::serialize(&json!(text))
        };
        self.script.push(format!(
            "  casper.then(function() {{
    this.echo({text});
  }});"
        ));
        self
    }

    /// Writes the current page title to output behind a `[title]` marker.
    pub fn echo_title(&mut self) -> &mut Self {
        self.script.push(
            "  casper.then(function() {
    this.echo(\"[title] \" + this.getTitle());
  });",
        );
        self
    }

    /* -------------------------------- runner ------------------------------- */

    /// Runs the accumulated step suite.
    ///
    /// Writes the script to a uniquely named temporary file, invokes the
    /// engine, and streams its stdout through the output interpreter into
    /// the session. The script file is removed afterwards unless
    /// `preserve_script` is set (the preserved path is logged).
    pub fn run(&mut self, preserve_script: bool) -> Result<()> {
        self.script.push(
            "  casper.then(function() {
    this.echo('[CURRENT_URL]' + this.getCurrentUrl());
    this.echo('[CURRENT_TITLE]' + this.getTitle());
  });

  casper.run();",
        );

        if self.uses_fs_module {
            self.script.prepend("  var fs = require('fs');");
        }

        let mut script_file = tempfile::Builder::new()
            .prefix("casper-")
            .suffix(".js")
            .tempfile()?;
        script_file.write_all(self.script.render().as_bytes())?;
        script_file.flush()?;

        let command = self.command_line(script_file.path());
        let engine_command = command.rsplit(';').next().unwrap_or(&command);
        info!(
            "wraith v{} | run CasperJS: {}",
            env!("CARGO_PKG_VERSION"),
            engine_command
        );

        self.execute(&command)?;

        if preserve_script {
            let (_, path) = script_file.keep().map_err(|error| error.error)?;
            info!("script preserved at {}", path.display());
        }

        Ok(())
    }

    /// Spawns the shell command and consumes its stdout line by line until
    /// the engine exits. There is no read timeout: a hung engine blocks the
    /// caller.
    fn execute(&mut self, command: &str) -> Result<()> {
        let mut child = Command::new("sh")
            .arg("-c")
            .arg(command)
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()?;

        let stdout = child.stdout.take().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "engine stdout not captured")
        })?;

        let interpreter = Interpreter::new(self.log_level);
        for line in BufReader::new(stdout).lines() {
            match interpreter.interpret(&line?) {
                LineOutcome::Dropped => {}
                LineOutcome::CurrentUrl { text, url } => {
                    self.output.push(text);
                    self.current_url = Some(url);
                }
                LineOutcome::CurrentTitle { text, title } => {
                    self.output.push(text);
                    self.current_title = Some(title);
                }
                LineOutcome::Line { text, navigation } => {
                    self.output.push(text);
                    if let Some(record) = navigation {
                        self.requests.push(record);
                    }
                    if let Some(line) = self.output.last() {
                        for observer in &self.observers {
                            observer(line);
                        }
                    }
                }
            }
        }

        let status = child.wait()?;
        debug!("casperjs exited with {}", status);
        Ok(())
    }

    /// Renders the full shell command: PATH setup, the SlimerJS launcher
    /// export where needed, then the engine invocation with all options.
    fn command_line(&self, script_path: &Path) -> String {
        let mut commands = Vec::new();

        // provisioned binaries take priority over user binaries
        commands.push(format!("export PATH={}:$PATH", self.bin_dir().display()));

        if self.engine == Engine::SlimerJs {
            if let Some(launcher) = slimer_launcher_export() {
                commands.push(launcher);
            }
        }

        commands.push(format!(
            "casperjs {}{}",
            script_path.display(),
            self.command_options()
        ));

        commands.join(";")
    }

    /// Renders the typed session options followed by the free-form map.
    fn command_options(&self) -> String {
        let mut rendered = format!(" --log-level={} --engine={}", self.log_level, self.engine);
        for (name, value) in &self.options {
            rendered.push(' ');
            rendered.push_str(&value.render(name));
        }
        rendered
    }

    /// Clears all per-session state at the opening of a session.
    fn reset(&mut self) {
        self.script.clear();
        self.output.clear();
        self.requests.clear();
        self.current_url = None;
        self.current_title = None;
        self.uses_fs_module = false;
    }
}

/// SlimerJS resolves its Firefox executable through this per-OS export.
fn slimer_launcher_export() -> Option<String> {
    match Os::current()? {
        Os::Linux => Some("export SLIMERJSLAUNCHER=/usr/bin/firefox".to_string()),
        Os::MacOs => Some(
            "export SLIMERJSLAUNCHER=/Applications/Firefox.app/Contents/MacOS/firefox".to_string(),
        ),
        Os::Windows => Some(
            r#"SET SLIMERJSLAUNCHER="c:\Program Files\Mozilla Firefox\firefox.exe""#.to_string(),
        ),
    }
}

fn timeout_literal(max_seconds: Option<u64>) -> String {
    match max_seconds {
        Some(seconds) => (seconds * 1000).to_string(),
        None => "undefined".to_string(),
    }
}

fn expect_object<'a>(value: &'a Value, what: &str) -> Result<&'a Map<String, Value>> {
    value.as_object().ok_or_else(|| {
        WraithError::InvalidArgument(format!(
            "{} must be an object, given {}",
            what,
            json_type_name(value)
        ))
    })
}

fn check_keys(mapping: &Map<String, Value>, valid: &[&str], what: &str) -> Result<()> {
    let invalid: Vec<&str> = mapping
        .keys()
        .map(String::as_str)
        .filter(|key| !valid.contains(key))
        .collect();
    if invalid.is_empty() {
        Ok(())
    } else {
        Err(WraithError::InvalidArgument(format!(
            "invalid keys in {}: {}",
            what,
            invalid.join(", ")
        )))
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[path = "casper_test.rs"]
mod casper_test;
