// Script assembly through the public builder API

use serde_json::json;
use wraith::{Casper, LogLevel};

#[test]
fn test_session_script_matches_call_order() {
    let mut casper = Casper::new();
    casper
        .start(Some("http://a"))
        .click("#b")
        .wait(2)
        .echo_title();

    let script = casper.script();
    let bootstrap = script.find("require('casper').create(").expect("bootstrap");
    let open = script.find("this.open('http://a'").expect("open");
    let click = script.find("this.click('#b')").expect("click");
    let wait = script.find("casper.wait(2000").expect("wait");
    let title = script.find("[title]").expect("title echo");

    assert!(bootstrap < open);
    assert!(open < click);
    assert!(click < wait);
    assert!(wait < title);
}

#[test]
fn test_restarting_a_session_drops_previous_script() {
    let mut casper = Casper::new();
    casper.start(Some("http://first")).click("#first");
    casper.start(Some("http://second")).click("#second");

    let script = casper.script();
    assert!(!script.contains("http://first"));
    assert!(!script.contains("#first"));
    assert!(script.contains("http://second"));
    assert!(script.contains("#second"));

    assert!(casper.output().is_empty());
    assert!(casper.requests().is_empty());
    assert!(casper.current_url().is_none());
    assert!(casper.current_title().is_none());
}

#[test]
fn test_every_argument_appears_serialized() {
    let mut casper = Casper::new();
    casper.start(None);
    casper
        .fill("form#login", json!({"user": "john", "remember": true}), false)
        .log("submitted", LogLevel::Info)
        .scroll_to(250, 0);
    casper
        .send_keys("#search", "rust casperjs", None)
        .expect("plain send keys");

    let script = casper.script();
    assert!(script.contains("'form#login'"));
    assert!(script.contains("\"user\": \"john\""));
    assert!(script.contains("\"remember\": true"));
    assert!(script.contains("this.log('submitted', 'info');"));
    assert!(script.contains("this.scrollTo(0, 250);"));
    assert!(script.contains("this.sendKeys('#search', 'rust casperjs', undefined);"));
}

#[test]
fn test_validation_failure_leaves_script_untouched() {
    let mut casper = Casper::new();
    casper.start(None);
    let before = casper.script();

    assert!(casper.open("http://a", Some(json!({"cookie": "x"}))).is_err());
    assert!(casper.capture("s.png", Some(json!({"top": 1})), None).is_err());
    assert!(casper.mouse_event("#a", "hover").is_err());

    assert_eq!(casper.script(), before);
}

#[test]
fn test_accessors_stable_without_mutation() {
    let mut casper = Casper::new();
    casper.start(Some("http://a")).click("#b");

    let first_script = casper.script();
    let second_script = casper.script();
    assert_eq!(first_script, second_script);

    assert_eq!(casper.output().len(), casper.output().len());
    assert_eq!(casper.requests().len(), casper.requests().len());
    assert_eq!(casper.user_agent(), casper.user_agent());
}
