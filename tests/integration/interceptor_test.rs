// Interceptor integration tests
use crate::mocks::MockSink;
use console_intercept::{Console, Counter, Interceptor, KeyError, Level, Pattern};
use serde_json::json;

#[test]
fn test_catch_all_counts_a_single_call() {
    let sink = MockSink::new();
    let mut console = Console::with_client(sink.clone());
    let interceptor = Interceptor::catch_all(&mut console, Level::Error);

    console.error("any message at all", &[]);

    assert!(interceptor.expected(Counter::Handled, None));
    assert!(interceptor.expected(Counter::Unhandled, None));
    assert!(interceptor.expected(Counter::Errors, None));
    assert!(interceptor.expected(Counter::All, None));
    // Matched messages are suppressed
    assert!(sink.messages(Level::Error).is_empty());

    interceptor.restore(&mut console);
}

#[test]
fn test_mixed_calls_tabulate_per_outcome() {
    let sink = MockSink::new();
    let mut console = Console::with_client(sink.clone());
    let interceptor = Interceptor::install(
        &mut console,
        Level::Error,
        vec![
            Pattern::regex("token .* expired").unwrap(),
            Pattern::regex("connection refused").unwrap(),
        ],
    );

    console.error("token %s expired", &[json!("abc123")]);
    console.error("connection refused", &[]);
    console.error("surprise: %s", &[json!({"code": 500})]);

    let counts = interceptor.counts();
    assert_eq!(counts.expected, 2);
    assert_eq!(counts.handled, 2);
    assert_eq!(counts.matches, 2);
    assert_eq!(counts.unhandled, 1);

    assert!(interceptor.expected(Counter::Matches, Some(2)));
    assert!(interceptor.expected(Counter::Errors, Some(3)));
    assert!(interceptor.expected(Counter::Unhandled, Some(1)));
    assert!(!interceptor.expected(Counter::All, None));

    // The stray message was forwarded, resolved
    assert_eq!(
        sink.messages(Level::Error),
        vec![r#"surprise: {"code":500}"#]
    );

    interceptor.restore(&mut console);
}

#[test]
fn test_every_call_increments_exactly_one_side() {
    let mut console = Console::new();
    let interceptor = Interceptor::install(
        &mut console,
        Level::Warn,
        vec![Pattern::contains("expected")],
    );

    for i in 1..=6 {
        if i % 2 == 0 {
            console.warn("expected warning %s", &[json!(i)]);
        } else {
            console.warn("odd one out %s", &[json!(i)]);
        }

        let counts = interceptor.counts();
        assert_eq!(counts.handled + counts.unhandled, i);
        assert_eq!(counts.matches, counts.handled);
    }

    let counts = interceptor.counts();
    assert_eq!(counts.handled, 3);
    assert_eq!(counts.unhandled, 3);

    interceptor.restore(&mut console);
}

#[test]
fn test_first_match_wins_counts_once() {
    let mut console = Console::new();
    let interceptor = Interceptor::install(
        &mut console,
        Level::Info,
        vec![
            Pattern::contains("cache"),
            Pattern::regex("cache .* invalidated").unwrap(),
        ],
    );

    // Matches both entries; only the first is counted, once
    console.info("cache key %s invalidated", &[json!("users:42")]);

    let counts = interceptor.counts();
    assert_eq!(counts.matches, 1);
    assert_eq!(counts.handled, 1);

    interceptor.restore(&mut console);
}

#[test]
fn test_placeholders_resolve_before_matching() {
    let mut console = Console::new();
    let interceptor = Interceptor::install(
        &mut console,
        Level::Error,
        vec![Pattern::regex("^user 42 missing$").unwrap()],
    );

    // The raw template does not match; the resolved message does
    console.error("user %s missing", &[json!(42)]);

    assert!(interceptor.expected(Counter::Matches, Some(1)));

    interceptor.restore(&mut console);
}

#[test]
fn test_forwarding_preserves_literal_tokens_in_arguments() {
    let sink = MockSink::new();
    let mut console = Console::with_client(sink.clone());
    let interceptor = Interceptor::install(
        &mut console,
        Level::Error,
        vec![Pattern::contains("expected")],
    );

    // The argument value itself contains a token; the sink must see the same
    // text an uninstalled console would emit
    console.error("price %s today", &[json!("100%s")]);

    assert!(interceptor.expected(Counter::Unhandled, Some(1)));
    assert_eq!(sink.messages(Level::Error), vec!["price 100%s today"]);

    interceptor.restore(&mut console);
}

#[test]
fn test_stacked_recorders_match_identical_resolved_text() {
    let mut console = Console::new();
    let outer = Interceptor::install(
        &mut console,
        Level::Warn,
        vec![Pattern::contains("100%s")],
    );
    let inner = Interceptor::install(
        &mut console,
        Level::Warn,
        vec![Pattern::contains("never")],
    );

    console.warn("price %s today", &[json!("100%s")]);

    // The inner miss hands the raw call down; the outer recorder resolves the
    // same text the inner one matched against
    assert_eq!(inner.counts().unhandled, 1);
    assert_eq!(outer.counts().handled, 1);

    inner.restore(&mut console);
    outer.restore(&mut console);
}

#[test]
fn test_zero_patterns_satisfy_the_aggregate_until_a_call_arrives() {
    let sink = MockSink::new();
    let mut console = Console::with_client(sink.clone());
    let interceptor = Interceptor::install(&mut console, Level::Debug, Vec::new());

    assert!(interceptor.expected(Counter::All, None));
    assert!(interceptor.expected(Counter::Unhandled, None));

    // With no patterns every call is unhandled and forwarded
    console.debug("unexpected %s", &[json!("noise")]);

    assert!(!interceptor.expected(Counter::All, None));
    assert!(interceptor.expected(Counter::Unhandled, Some(1)));
    assert!(interceptor.expected(Counter::Errors, Some(1)));
    assert_eq!(sink.messages(Level::Debug), vec!["unexpected noise"]);

    interceptor.restore(&mut console);
}

#[test]
fn test_defaults_compare_against_the_expected_count() {
    let mut console = Console::new();
    let interceptor = Interceptor::install(
        &mut console,
        Level::Warn,
        vec![Pattern::contains("a"), Pattern::contains("b")],
    );

    // No calls yet: unhandled defaults to zero, the rest to expected (2)
    assert!(interceptor.expected(Counter::Unhandled, None));
    assert!(!interceptor.expected(Counter::Handled, None));
    assert!(!interceptor.expected(Counter::All, None));

    // A uniform explicit threshold of zero holds on a fresh interceptor
    assert!(interceptor.expected(Counter::All, Some(0)));

    interceptor.restore(&mut console);
}

#[test]
fn test_legacy_keys_parse_into_counters() {
    let mut console = Console::new();
    let interceptor = Interceptor::catch_all(&mut console, Level::Error);

    console.error("boom", &[]);

    let counter: Counter = "handled".parse().unwrap();
    assert!(interceptor.expected(counter, None));

    let err = "bogusKey".parse::<Counter>().unwrap_err();
    assert_eq!(err, KeyError::UnknownCounter("bogusKey".to_string()));

    interceptor.restore(&mut console);
}

#[test]
fn test_restore_reinstates_the_original_binding() {
    let sink = MockSink::new();
    let mut console = Console::with_client(sink.clone());

    let interceptor = Interceptor::catch_all(&mut console, Level::Warn);
    console.warn("swallowed", &[]);
    assert!(sink.messages(Level::Warn).is_empty());
    assert!(interceptor.expected(Counter::Handled, Some(1)));

    interceptor.restore(&mut console);

    // Post-restore calls flow to the sink untouched by any recorder
    console.warn("visible %s", &[json!("again")]);
    assert_eq!(sink.messages(Level::Warn), vec!["visible again"]);
}

#[test]
fn test_stacked_interceptors_unwind_in_reverse_order() {
    let sink = MockSink::new();
    let mut console = Console::with_client(sink.clone());

    let outer = Interceptor::install(
        &mut console,
        Level::Error,
        vec![Pattern::contains("alpha")],
    );
    let inner = Interceptor::install(
        &mut console,
        Level::Error,
        vec![Pattern::contains("beta")],
    );

    // Last installed wins; its misses cascade to the one below
    console.error("beta event", &[]);
    console.error("alpha event", &[]);
    console.error("gamma event", &[]);

    let inner_counts = inner.counts();
    assert_eq!(inner_counts.handled, 1);
    assert_eq!(inner_counts.unhandled, 2);

    let outer_counts = outer.counts();
    assert_eq!(outer_counts.handled, 1);
    assert_eq!(outer_counts.unhandled, 1);

    // Only the message neither expected reaches the sink
    assert_eq!(sink.messages(Level::Error), vec!["gamma event"]);

    inner.restore(&mut console);
    outer.restore(&mut console);

    console.error("direct", &[]);
    assert_eq!(
        sink.messages(Level::Error),
        vec!["gamma event", "direct"]
    );
}

#[test]
fn test_interceptors_on_different_levels_are_independent() {
    let sink = MockSink::new();
    let mut console = Console::with_client(sink.clone());

    let errors = Interceptor::catch_all(&mut console, Level::Error);
    let warnings = Interceptor::catch_all(&mut console, Level::Warn);

    console.error("an error", &[]);
    console.warn("a warning", &[]);
    console.warn("another warning", &[]);
    console.info("untouched", &[]);

    assert_eq!(errors.counts().handled, 1);
    assert_eq!(warnings.counts().handled, 2);
    assert_eq!(errors.level(), Level::Error);
    assert_eq!(warnings.level(), Level::Warn);
    assert_eq!(sink.messages(Level::Info), vec!["untouched"]);

    warnings.restore(&mut console);
    errors.restore(&mut console);
}
