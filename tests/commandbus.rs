//! Registration and synchronous execution semantics.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use command_bus::{BusError, CommandBus, Message};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, PartialEq, Debug)]
struct Greet {
    name: String,
}

// ============================================================================
// Registration
// ============================================================================

#[test]
fn register_rejects_empty_command_without_mutating_registry() {
    let bus = CommandBus::new("test");
    assert_eq!(bus.name(), "test");

    let err = bus.register("", |p: &Message| Ok(p.clone())).unwrap_err();
    assert!(matches!(err, BusError::InvalidCommand));
    assert!(bus.commands().is_empty());

    bus.shutdown();
}

#[test]
fn duplicate_registration_fails_and_keeps_original_handler() {
    let bus = CommandBus::new("test");

    bus.register("greet", |_: &Message| Ok(Message::from(r#""first""#)))
        .unwrap();
    let err = bus
        .register("greet", |_: &Message| Ok(Message::from(r#""second""#)))
        .unwrap_err();
    assert!(matches!(err, BusError::AlreadyRegistered(ref name) if name == "greet"));

    // The original handler stays bound — observe its behavior, not the
    // rejected one's.
    let out = bus.execute("greet", &Message::from("{}")).unwrap();
    assert_eq!(out.as_str(), Some(r#""first""#));

    bus.shutdown();
}

#[test]
fn registration_after_traffic_is_allowed() {
    let bus = CommandBus::new("test");
    bus.register("a", |p: &Message| Ok(p.clone())).unwrap();
    bus.execute("a", &Message::from("{}")).unwrap();

    bus.register("b", |p: &Message| Ok(p.clone())).unwrap();
    bus.execute("b", &Message::from("{}")).unwrap();

    bus.shutdown();
}

// ============================================================================
// Synchronous execution
// ============================================================================

#[test]
fn execute_returns_handler_result_unmodified() {
    let bus = CommandBus::new("test");
    bus.register("greet", |payload: &Message| {
        let greet: Greet = payload.decode()?;
        Ok(Message::encode(&format!("hello, {}", greet.name))?)
    })
    .unwrap();

    let payload = Message::encode(&Greet {
        name: "Alice".into(),
    })
    .unwrap();
    let reply = bus.execute("greet", &payload).unwrap();
    assert_eq!(reply.decode::<String>().unwrap(), "hello, Alice");

    bus.shutdown();
}

#[test]
fn execute_passes_handler_error_through() {
    let bus = CommandBus::new("test");
    bus.register("fail", |_: &Message| Err("business rule violated".into()))
        .unwrap();

    let err = bus.execute("fail", &Message::from("{}")).unwrap_err();
    match err {
        BusError::Handler(inner) => assert_eq!(inner.to_string(), "business rule violated"),
        other => panic!("expected handler error, got {:?}", other),
    }

    bus.shutdown();
}

#[test]
fn execute_empty_command_fails_without_invoking_any_handler() {
    let bus = CommandBus::new("test");
    let calls = Arc::new(AtomicUsize::new(0));
    let probe = Arc::clone(&calls);
    bus.register("counted", move |p: &Message| {
        probe.fetch_add(1, Ordering::SeqCst);
        Ok(p.clone())
    })
    .unwrap();

    let err = bus.execute("", &Message::from("{}")).unwrap_err();
    assert!(matches!(err, BusError::InvalidCommand));
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    bus.shutdown();
}

#[test]
fn execute_malformed_payload_fails_without_invoking_any_handler() {
    let bus = CommandBus::new("test");
    let calls = Arc::new(AtomicUsize::new(0));
    let probe = Arc::clone(&calls);
    bus.register("counted", move |p: &Message| {
        probe.fetch_add(1, Ordering::SeqCst);
        Ok(p.clone())
    })
    .unwrap();

    for bad in ["", "{truncated", "not json at all"] {
        let err = bus.execute("counted", &Message::from(bad)).unwrap_err();
        assert!(matches!(err, BusError::InvalidPayload(_)));
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    bus.shutdown();
}

#[test]
fn execute_unregistered_command_fails_with_handler_not_found() {
    let bus = CommandBus::new("test");

    let err = bus.execute("missing", &Message::from("{}")).unwrap_err();
    assert!(matches!(err, BusError::HandlerNotFound(ref name) if name == "missing"));

    bus.shutdown();
}

#[test]
fn dispatch_empty_command_and_bad_payload_fail_synchronously() {
    let bus = CommandBus::new("test");
    bus.register("cmd", |p: &Message| Ok(p.clone())).unwrap();

    let err = bus.dispatch("", Message::from("{}")).unwrap_err();
    assert!(matches!(err, BusError::InvalidCommand));

    let err = bus.dispatch("cmd", Message::from("nope")).unwrap_err();
    assert!(matches!(err, BusError::InvalidPayload(_)));

    bus.shutdown();
}
