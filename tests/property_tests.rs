//! Property-based tests for named_logger using proptest

use named_logger::prelude::*;
use proptest::prelude::*;

fn any_level() -> impl Strategy<Value = Level> {
    prop_oneof![
        Just(Level::DISABLED),
        Just(Level::FATAL),
        Just(Level::ERROR),
        Just(Level::WARNING),
        Just(Level::INFO),
        Just(Level::DEBUG),
        (-5i32..60).prop_map(Level::new),
    ]
}

fn message_registry(threshold: Level) -> (LoggerRegistry, MemorySink) {
    let buffer = MemorySink::new();
    let registry = LoggerRegistry::builder()
        .level(threshold)
        .format("{{.Message}}")
        .output(buffer.clone())
        .build()
        .unwrap();
    (registry, buffer)
}

// ============================================================================
// Level gate
// ============================================================================

proptest! {
    /// A record is emitted exactly when its level is at or below a threshold
    /// above DISABLED
    #[test]
    fn test_gate_predicate(level in any_level(), threshold in any_level()) {
        let expected = threshold > Level::DISABLED && level <= threshold;
        prop_assert_eq!(level.should_emit(threshold), expected);
    }

    /// The registry honours the same predicate, without terminating on FATAL
    #[test]
    fn test_emit_matches_gate(level in any_level(), threshold in any_level()) {
        let (registry, buffer) = message_registry(threshold);
        let dispatch = registry.emit(level, "x");

        prop_assert_eq!(dispatch.is_emitted(), level.should_emit(threshold));
        prop_assert_eq!(buffer.is_empty(), !dispatch.is_emitted());
        prop_assert_eq!(dispatch.is_fatal(), dispatch.is_emitted() && level.is_fatal());
    }

    /// Integer and name forms of a level parse back to the same level
    #[test]
    fn test_level_parse(value in -100i32..100) {
        let level = Level::new(value);
        prop_assert_eq!(value.to_string().parse::<Level>().unwrap(), level);
        prop_assert_eq!(level.to_string().parse::<Level>().unwrap(), level);
    }
}

#[test]
fn test_thresholds_below_disabled_suppress_everything() {
    for threshold in [Level::new(-3), Level::new(-2), Level::DISABLED] {
        for level in [Level::new(-5), Level::new(-4), Level::DISABLED, Level::FATAL] {
            assert!(!level.should_emit(threshold), "{} at {}", level, threshold);
        }
    }
}

// ============================================================================
// Template rendering
// ============================================================================

proptest! {
    /// A message-only template writes the message verbatim
    #[test]
    fn test_message_only_template(message in "[^\\n]{0,64}") {
        let (registry, buffer) = message_registry(Level::DEBUG);
        registry.emit(Level::INFO, &message);
        prop_assert_eq!(buffer.contents(), message);
    }

    /// Line-oriented calls append exactly one newline
    #[test]
    fn test_line_messages(message in "[a-zA-Z0-9 ]{0,32}") {
        let (registry, buffer) = message_registry(Level::DEBUG);
        registry.info(&message);
        prop_assert_eq!(buffer.contents(), format!("{}\n", message));
    }

    /// Text without actions compiles to itself
    #[test]
    fn test_plain_text_template(text in "[^{}]{0,64}") {
        let template = Template::compile(&text).unwrap();
        let record = Record::new(String::new(), "ns", Level::INFO, "msg");
        prop_assert_eq!(template.render(&record), text);
    }

    /// The namespace renders as given
    #[test]
    fn test_namespace_field(namespace in "[a-z][a-z0-9_.-]{0,16}") {
        let (registry, buffer) = message_registry(Level::DEBUG);
        let logger = registry.get_named_logger(&namespace);
        logger.set_format("{{.Namespace}}").unwrap();
        logger.emit(Level::INFO, "");
        prop_assert_eq!(buffer.contents(), namespace);
    }
}
