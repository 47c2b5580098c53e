// Console integration tests
use crate::mocks::MockSink;
use console_intercept::{Console, Level};
use serde_json::json;
use std::sync::{Arc, Mutex};

#[test]
fn test_stock_bindings_resolve_placeholders() {
    let sink = MockSink::new();
    let mut console = Console::with_client(sink.clone());

    console.info("user %s logged in from %s", &[json!("ada"), json!("10.0.0.7")]);

    assert_eq!(
        sink.messages(Level::Info),
        vec!["user ada logged in from 10.0.0.7"]
    );
}

#[test]
fn test_every_level_reaches_the_shared_sink() {
    let sink = MockSink::new();
    let mut console = Console::with_client(sink.clone());

    console.error("e", &[]);
    console.warn("w", &[]);
    console.info("i", &[]);
    console.debug("d", &[]);
    console.trace("t", &[]);

    let lines = sink.lines();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], (Level::Error, "e".to_string()));
    assert_eq!(lines[4], (Level::Trace, "t".to_string()));
}

#[test]
fn test_missing_arguments_substitute_empty() {
    let sink = MockSink::new();
    let mut console = Console::with_client(sink.clone());

    console.warn("retry %s of %s", &[json!(2)]);

    assert_eq!(sink.messages(Level::Warn), vec!["retry 2 of "]);
}

#[test]
fn test_surplus_arguments_are_dropped() {
    let sink = MockSink::new();
    let mut console = Console::with_client(sink.clone());

    console.error("halted", &[json!("ignored"), json!(42)]);

    assert_eq!(sink.messages(Level::Error), vec!["halted"]);
}

#[test]
fn test_rebind_swaps_a_single_level() {
    let sink = MockSink::new();
    let mut console = Console::with_client(sink.clone());

    let seen = Arc::new(Mutex::new(Vec::new()));
    let recorder = {
        let seen = Arc::clone(&seen);
        Box::new(move |message: &str, _args: &[serde_json::Value]| {
            seen.lock().unwrap().push(message.to_string());
        })
    };
    let _previous = console.rebind(Level::Error, recorder);

    console.error("captured %s", &[json!(1)]);
    console.warn("still on the sink", &[]);

    // Bindings receive the raw message; resolution is the binding's job
    assert_eq!(*seen.lock().unwrap(), vec!["captured %s".to_string()]);
    assert!(sink.messages(Level::Error).is_empty());
    assert_eq!(sink.messages(Level::Warn), vec!["still on the sink"]);
}
