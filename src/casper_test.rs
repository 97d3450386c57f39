// Unit tests for the fluent builder

use serde_json::json;

use super::*;

#[test]
fn test_start_renders_bootstrap_with_user_agent_and_viewport() {
    let mut casper = Casper::new();
    casper.set_user_agent("test-agent").start(None);

    let script = casper.script();
    assert!(script.contains("require('casper').create("));
    assert!(script.contains("userAgent: 'test-agent'"));
    assert!(script.contains("width: 1280"));
    assert!(script.contains("height: 720"));
    assert!(script.contains("casper.start();"));
}

#[test]
fn test_start_with_url_appends_open_with_html_headers() {
    let mut casper = Casper::new();
    casper.start(Some("http://a"));

    let script = casper.script();
    assert!(script.contains("this.open('http://a', {"));
    assert!(script.contains("'Accept': 'text/html'"));
}

#[test]
fn test_fragment_order_matches_call_order() {
    let mut casper = Casper::new();
    casper.start(Some("http://a")).click("#b");

    let script = casper.script();
    let bootstrap = script.find("casper.start();").expect("bootstrap fragment");
    let open = script.find("this.open('http://a'").expect("open fragment");
    let click = script.find("this.click('#b')").expect("click fragment");
    assert!(bootstrap < open);
    assert!(open < click);
}

#[test]
fn test_start_resets_previous_session_state() {
    let mut casper = Casper::new();
    casper.start(None).click("#first");
    casper.output.push("stale line".to_string());
    casper.requests.push(NavigationRecord::new());
    casper.current_url = Some("http://stale".to_string());
    casper.current_title = Some("stale".to_string());
    casper.uses_fs_module = true;

    casper.start(None);

    assert!(casper.output().is_empty());
    assert!(casper.requests().is_empty());
    assert!(casper.current_url().is_none());
    assert!(casper.current_title().is_none());
    assert!(!casper.uses_fs_module);
    assert!(!casper.script().contains("#first"));
}

#[test]
fn test_history_and_reload_fragments() {
    let mut casper = Casper::new();
    casper.start(None).back().forward().reload();

    let script = casper.script();
    assert!(script.contains("casper.back();"));
    assert!(script.contains("casper.forward();"));
    assert!(script.contains("casper.reload();"));
}

#[test]
fn test_bypass_renders_count() {
    let mut casper = Casper::new();
    casper.start(None).bypass(3);
    assert!(casper.script().contains("this.bypass(3);"));
}

#[test]
fn test_click_label_with_and_without_tag() {
    let mut casper = Casper::new();
    casper.start(None).click_label("Sign in", Some("button"));
    assert!(casper
        .script()
        .contains("this.clickLabel('Sign in', 'button');"));

    casper.start(None).click_label("Sign in", None);
    assert!(casper
        .script()
        .contains("this.clickLabel('Sign in', undefined);"));
}

#[test]
fn test_mouse_event_accepts_all_supported_events() {
    for event in MOUSE_EVENTS {
        let mut casper = Casper::new();
        casper.start(None);
        casper.mouse_event("#target", event).expect(event);
        assert!(casper.script().contains(&format!("this.mouseEvent('{}', '#target');", event)));
    }
}

#[test]
fn test_mouse_event_rejects_unknown_event() {
    let mut casper = Casper::new();
    casper.start(None);
    let before = casper.script();
    let error = casper.mouse_event("#target", "dblclick").unwrap_err();
    assert!(error.to_string().contains("dblclick"));
    // failed call leaves the script untouched
    assert_eq!(casper.script(), before);
}

#[test]
fn test_open_with_valid_settings() {
    let mut casper = Casper::new();
    casper.start(None);
    casper
        .open("http://a", Some(json!({"method": "post", "data": {"q": "1"}})))
        .expect("valid settings");

    let script = casper.script();
    assert!(script.contains("casper.open('http://a', {"));
    assert!(script.contains("\"method\": \"post\""));
}

#[test]
fn test_open_rejects_unknown_setting_key() {
    let mut casper = Casper::new();
    casper.start(None);
    let error = casper
        .open("http://a", Some(json!({"method": "get", "timeout": 5})))
        .unwrap_err();
    assert!(error.to_string().contains("timeout"));
}

#[test]
fn test_open_without_settings_never_fails() {
    let mut casper = Casper::new();
    casper.start(None);
    casper.open("http://a", None).expect("no settings");
    assert!(casper.script().contains("casper.open('http://a', undefined);"));
}

#[test]
fn test_fill_variants_render_values_and_submit() {
    let mut casper = Casper::new();
    casper.start(None).fill("form#login", json!({"user": "john"}), true);
    let script = casper.script();
    assert!(script.contains("this.fill('form#login', {"));
    assert!(script.contains("\"user\": \"john\""));
    assert!(script.contains("}, true);"));

    casper.start(None).fill_selectors("form", json!({"input[name=q]": "rust"}), false);
    assert!(casper.script().contains("this.fillSelectors('form', {"));

    casper.start(None).fill_xpath("//form", json!({"//input": "x"}), false);
    assert!(casper.script().contains("this.fillXPath('//form', {"));
}

#[test]
fn test_send_keys_joins_modifier_array() {
    let mut casper = Casper::new();
    casper.start(None);
    casper
        .send_keys("#input", "a", Some(json!({"modifiers": ["ctrl", "shift"]})))
        .expect("valid options");

    let script = casper.script();
    assert!(script.contains("this.sendKeys('#input', 'a', {"));
    assert!(script.contains("\"modifiers\": \"ctrl+shift\""));
}

#[test]
fn test_send_keys_rejects_non_array_modifiers() {
    let mut casper = Casper::new();
    casper.start(None);
    let error = casper
        .send_keys("#input", "a", Some(json!({"modifiers": "ctrl"})))
        .unwrap_err();
    assert!(error.to_string().contains("modifiers"));
    assert!(error.to_string().contains("string"));
}

#[test]
fn test_send_keys_rejects_unknown_option_key() {
    let mut casper = Casper::new();
    casper.start(None);
    let error = casper
        .send_keys("#input", "a", Some(json!({"delay": 10})))
        .unwrap_err();
    assert!(error.to_string().contains("delay"));
}

#[test]
fn test_capture_without_mappings_never_fails() {
    let mut casper = Casper::new();
    casper.start(None);
    casper.capture("shot.png", None, None).expect("no mappings");
    assert!(casper
        .script()
        .contains("this.capture('shot.png', undefined, undefined);"));
}

#[test]
fn test_capture_with_complete_area() {
    let mut casper = Casper::new();
    casper.start(None);
    casper
        .capture(
            "shot.png",
            Some(json!({"top": 0, "left": 0, "width": 800, "height": 600})),
            Some(json!({"format": "jpg", "quality": 75})),
        )
        .expect("valid area");

    let script = casper.script();
    assert!(script.contains("\"width\": 800"));
    assert!(script.contains("\"format\": \"jpg\""));
}

#[test]
fn test_capture_rejects_missing_area_key() {
    let mut casper = Casper::new();
    casper.start(None);
    let error = casper
        .capture("shot.png", Some(json!({"top": 0, "left": 0, "width": 800})), None)
        .unwrap_err();
    assert!(error.to_string().contains("height"));
}

#[test]
fn test_capture_rejects_unknown_area_key() {
    let mut casper = Casper::new();
    casper.start(None);
    let error = casper
        .capture(
            "shot.png",
            Some(json!({"top": 0, "left": 0, "width": 800, "height": 600, "zoom": 2})),
            None,
        )
        .unwrap_err();
    assert!(error.to_string().contains("zoom"));
}

#[test]
fn test_download_defaults_to_current_url() {
    let mut casper = Casper::new();
    casper.start(None).download("page.bin", None);
    assert!(casper
        .script()
        .contains("this.download(this.getCurrentUrl(), 'page.bin');"));

    casper.start(None).download("file.pdf", Some("http://a/file.pdf"));
    assert!(casper
        .script()
        .contains("this.download('http://a/file.pdf', 'file.pdf');"));
}

#[test]
fn test_evaluate_renders_named_arguments() {
    let mut casper = Casper::new();
    casper.start(None);
    casper
        .evaluate(
            "document.title = name;",
            Some(json!({"name": "changed", "count": 2})),
        )
        .expect("valid args");

    let script = casper.script();
    assert!(script.contains("casper.evaluate(function(name, count) {"));
    assert!(script.contains("document.title = name;"));
    assert!(script.contains("}, 'changed', 2);"));
}

#[test]
fn test_evaluate_without_arguments() {
    let mut casper = Casper::new();
    casper.start(None);
    casper.evaluate("return 1;", None).expect("no args");
    assert!(casper.script().contains("casper.evaluate(function() {"));
    assert!(casper.script().contains("});"));
}

#[test]
fn test_evaluate_rejects_non_object_arguments() {
    let mut casper = Casper::new();
    casper.start(None);
    let error = casper.evaluate("return 1;", Some(json!([1, 2]))).unwrap_err();
    assert!(error.to_string().contains("array"));
}

#[test]
fn test_get_html_echoes_without_filename() {
    let mut casper = Casper::new();
    casper.start(None).get_html(None, Some("#content"), true);
    assert!(casper
        .script()
        .contains("this.echo(this.getHTML('#content', true));"));
    assert!(!casper.uses_fs_module);
}

#[test]
fn test_get_html_to_file_marks_fs_module() {
    let mut casper = Casper::new();
    casper.start(None).get_html(Some("page.html"), None, false);

    let script = casper.script();
    assert!(script.contains("fs.write('page.html', this.getHTML(undefined, false));"));
    assert!(script.contains("this.echo(\"[save] HTML to 'page.html'\");"));
    assert!(casper.uses_fs_module);
}

#[test]
fn test_get_page_content_to_file_marks_fs_module() {
    let mut casper = Casper::new();
    casper.start(None).get_page_content(Some("body.txt"));

    let script = casper.script();
    assert!(script.contains("fs.write('body.txt', this.getPageContent());"));
    assert!(script.contains("[save] page content to 'body.txt'"));
    assert!(casper.uses_fs_module);
}

#[test]
fn test_log_renders_message_and_level() {
    let mut casper = Casper::new();
    casper.start(None).log("checkpoint", LogLevel::Warning);
    assert!(casper.script().contains("this.log('checkpoint', 'warning');"));
}

#[test]
fn test_scroll_to_swaps_axis_order() {
    let mut casper = Casper::new();
    casper.start(None).scroll_to(100, 40);
    assert!(casper.script().contains("this.scrollTo(40, 100);"));
}

#[test]
fn test_scroll_to_bottom_echoes_marker() {
    let mut casper = Casper::new();
    casper.start(None).scroll_to_bottom();
    let script = casper.script();
    assert!(script.contains("this.scrollToBottom();"));
    assert!(script.contains("[scrollToBottom]"));
}

#[test]
fn test_wait_converts_seconds_to_milliseconds() {
    let mut casper = Casper::new();
    casper.start(None).wait(3);
    let script = casper.script();
    assert!(script.contains("casper.wait(3000, function() {"));
    assert!(script.contains("[wait] time 3 sec occurred"));
}

#[test]
fn test_wait_for_selector_with_timeout() {
    let mut casper = Casper::new();
    casper.start(None).wait_for_selector("#loaded", Some(5));
    let script = casper.script();
    assert!(script.contains("casper.waitForSelector('#loaded',"));
    assert!(script.contains("}, 5000);"));
}

#[test]
fn test_wait_for_text_default_timeout_is_undefined() {
    let mut casper = Casper::new();
    casper.start(None).wait_for_text("Welcome", None);
    let script = casper.script();
    assert!(script.contains("casper.waitForText('Welcome',"));
    assert!(script.contains("}, undefined);"));
}

#[test]
fn test_wait_for_url_takes_raw_pattern() {
    let mut casper = Casper::new();
    casper.start(None).wait_for_url("dashboard\\?tab=1", Some(2));
    let script = casper.script();
    // pattern is a regex body, not a quoted string
    assert!(script.contains("casper.waitForUrl(/dashboard\\?tab=1/,"));
    assert!(script.contains("}, 2000);"));
}

#[test]
fn test_echo_quotes_unless_evaluated() {
    let mut casper = Casper::new();
    casper.start(None).echo("plain text", false);
    assert!(casper.script().contains("this.echo('plain text');"));

    casper.start(None).echo("document.title", true);
    assert!(casper.script().contains("this.echo(document.title);"));
}

#[test]
fn test_echo_title_fragment() {
    let mut casper = Casper::new();
    casper.start(None).echo_title();
    assert!(casper
        .script()
        .contains("this.echo(\"[title] \" + this.getTitle());"));
}

#[test]
fn test_option_accessors() {
    let mut casper = Casper::new();
    casper.set_option("ignore-ssl-errors", OptionValue::Bool(true));
    casper.set_option("proxy", OptionValue::Text("127.0.0.1:8080".to_string()));

    assert_eq!(
        casper.option("ignore-ssl-errors").expect("set option"),
        &OptionValue::Bool(true)
    );
    assert!(matches!(
        casper.option("missing"),
        Err(WraithError::OptionNotSet(_))
    ));

    // replace keeps position and count
    casper.set_option("ignore-ssl-errors", OptionValue::Bool(false));
    assert_eq!(casper.options().len(), 2);
    assert_eq!(casper.options()[0].0, "ignore-ssl-errors");
}

#[test]
fn test_accessors_are_idempotent() {
    let mut casper = Casper::new();
    casper.set_option("proxy", OptionValue::Text("127.0.0.1:8080".to_string()));
    casper.start(Some("http://a"));

    assert_eq!(casper.output(), casper.output());
    assert_eq!(casper.requests(), casper.requests());
    assert_eq!(casper.script(), casper.script());
    let first = casper.option("proxy").expect("set option").clone();
    let second = casper.option("proxy").expect("set option").clone();
    assert_eq!(first, second);
}

#[test]
fn test_set_bin_dir_rejects_missing_directory() {
    let mut casper = Casper::new();
    let error = casper.set_bin_dir("/definitely/not/here").unwrap_err();
    assert!(matches!(error, WraithError::BinDirNotFound(_)));
}

#[test]
fn test_set_bin_dir_canonicalizes_existing_directory() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut casper = Casper::new();
    casper.set_bin_dir(dir.path()).expect("existing dir");
    assert_eq!(casper.bin_dir(), dir.path().canonicalize().expect("canonical"));
}

#[test]
fn test_command_options_render_typed_then_free_form() {
    let mut casper = Casper::new();
    casper.set_log_level(LogLevel::Warning);
    casper.set_engine(Engine::SlimerJs);
    casper.set_option("web-security", OptionValue::Bool(false));
    casper.set_option("disk-cache", OptionValue::Flag);

    assert_eq!(
        casper.command_options(),
        " --log-level=warning --engine=slimerjs --web-security=no --disk-cache"
    );
}

#[test]
fn test_command_line_exports_path_and_invokes_engine() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut casper = Casper::new();
    casper.set_bin_dir(dir.path()).expect("existing dir");

    let command = casper.command_line(Path::new("/tmp/casper-x.js"));
    assert!(command.starts_with("export PATH="));
    assert!(command.contains(":$PATH;"));
    assert!(command.contains("casperjs /tmp/casper-x.js --log-level=info --engine=phantomjs"));
    assert!(!command.contains("SLIMERJSLAUNCHER"));
}

#[cfg(unix)]
#[test]
fn test_command_line_exports_slimer_launcher() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut casper = Casper::new();
    casper.set_bin_dir(dir.path()).expect("existing dir");
    casper.set_engine(Engine::SlimerJs);

    let command = casper.command_line(Path::new("/tmp/casper-x.js"));
    assert!(command.contains("SLIMERJSLAUNCHER"));
    assert!(command.contains("--engine=slimerjs"));
}
