//! Integration tests for the public store surface: create/get/listen,
//! notification semantics, and the end-to-end counter scenario.

use parking_lot::Mutex;
use std::sync::Arc;
use tabstate::{Error, KeyError, Store, Value};

fn recorder() -> (Arc<Mutex<Vec<Value>>>, impl Fn(&Value) + Send + Sync + 'static) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    (seen, move |value: &Value| sink.lock().push(value.clone()))
}

#[test]
fn create_then_get_returns_default() {
    let store = Store::ephemeral();

    let n = store.create(42, ["num"], false).unwrap();
    assert_eq!(n.get(), Value::Int(42));

    let s = store.create("hello", ["text"], false).unwrap();
    assert_eq!(s.get(), Value::String("hello".into()));

    let b = store.create(true, ["flag"], false).unwrap();
    assert_eq!(b.get(), Value::Bool(true));

    let nested = store
        .create(
            Value::Array(vec![Value::Int(1), Value::Null]),
            ["list"],
            false,
        )
        .unwrap();
    assert_eq!(nested.get(), Value::Array(vec![Value::Int(1), Value::Null]));
}

#[test]
fn updater_receives_current_value() {
    let store = Store::ephemeral();
    let slot = store.create("a", ["s"], false).unwrap();
    slot.set(|v| format!("{}b", v.as_str().unwrap()).into()).unwrap();
    slot.set(|v| format!("{}c", v.as_str().unwrap()).into()).unwrap();
    assert_eq!(slot.get(), Value::String("abc".into()));
}

#[test]
fn empty_key_is_rejected_before_any_state_change() {
    let store = Store::ephemeral();

    let err = store.create(1, Vec::<String>::new(), true).unwrap_err();
    match err {
        Error::InvalidKey(KeyError::Empty) => {}
        other => panic!("expected empty-key error, got {other:?}"),
    }

    // Neither the registry nor the persisted store was touched
    assert_eq!(store.slot_count(), 0);
    assert!(store.get(["any"]).unwrap().is_empty());
}

#[test]
fn listener_matches_exact_key_only() {
    let store = Store::ephemeral();
    let (seen, callback) = recorder();
    store.listen(["a", "b"], callback).unwrap();

    store.create(1, ["a"], false).unwrap();
    store.create(2, ["a", "b", "c"], false).unwrap();
    assert!(seen.lock().is_empty(), "prefix-related keys must not fire");

    store.create(3, ["a", "b"], false).unwrap();
    assert_eq!(*seen.lock(), vec![Value::Int(3)]);
}

#[test]
fn listeners_fire_in_registration_order_and_panics_are_isolated() {
    let store = Store::ephemeral();
    let order = Arc::new(Mutex::new(Vec::new()));

    {
        let order = order.clone();
        store.listen(["k"], move |_| order.lock().push("first")).unwrap();
    }
    store
        .listen(["k"], |_| panic!("buggy listener"))
        .unwrap();
    {
        let order = order.clone();
        store.listen(["k"], move |_| order.lock().push("third")).unwrap();
    }

    store.create(1, ["k"], false).unwrap();
    assert_eq!(*order.lock(), vec!["first", "third"]);
}

#[test]
fn notifications_do_not_depend_on_persistence_flag() {
    let store = Store::ephemeral();
    let (seen, callback) = recorder();
    store.listen(["t"], callback).unwrap();
    let (seen_p, callback_p) = recorder();
    store.listen(["p"], callback_p).unwrap();

    store.create(1, ["t"], false).unwrap();
    store.create(2, ["p"], true).unwrap();

    assert_eq!(*seen.lock(), vec![Value::Int(1)]);
    assert_eq!(*seen_p.lock(), vec![Value::Int(2)]);
}

#[test]
fn listener_mutating_another_slot_runs_to_completion() {
    let store = Store::ephemeral();
    let doubled = store.create(0, ["doubled"], false).unwrap();
    let source = store.create(0, ["source"], false).unwrap();

    let doubled2 = doubled.clone();
    store
        .listen(["source"], move |value| {
            let n = value.as_int().unwrap_or(0);
            doubled2.set(move |_| (n * 2).into()).unwrap();
        })
        .unwrap();

    source.set(|_| 21.into()).unwrap();
    assert_eq!(doubled.get(), Value::Int(42));
    source.set(|_| 5.into()).unwrap();
    assert_eq!(doubled.get(), Value::Int(10));
}

#[test]
fn external_code_can_share_the_channel() {
    let store = Store::ephemeral();
    let (seen, callback) = recorder();
    store.listen(["shared"], callback).unwrap();

    // Another sender on the same channel, bypassing the store
    let key = tabstate::Key::new(["shared"]).unwrap();
    store.bus().publish(&key, &Value::Int(99));
    assert_eq!(*seen.lock(), vec![Value::Int(99)]);

    // An independent observer sees the store's own events too
    let (outside, outside_cb) = recorder();
    store.bus().subscribe(key.clone(), outside_cb);
    store.create(1, ["shared"], false).unwrap();
    assert_eq!(outside.lock().last(), Some(&Value::Int(1)));
}

#[test]
fn end_to_end_counter_scenario() {
    let store = Store::ephemeral();
    let counter = store.create(0, ["counter"], true).unwrap();

    let (seen, callback) = recorder();
    store.listen(["counter"], callback).unwrap();

    counter.set(|v| (v.as_int().unwrap() + 1).into()).unwrap();
    counter.set(|v| (v.as_int().unwrap() + 1).into()).unwrap();

    assert_eq!(counter.get(), Value::Int(2));
    assert_eq!(store.get(["counter"]).unwrap(), vec![Value::Int(2)]);
    assert_eq!(*seen.lock(), vec![Value::Int(1), Value::Int(2)]);
}
