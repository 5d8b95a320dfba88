//! The observed state store and the read-only snapshot handed to views.
//!
//! Every write runs the registered hook exactly once, synchronously, after
//! the store has been released, so the hook (a render) may read the store
//! freely. Reads are never observed.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use serde_json::{Map, Value};

/// Callback run after every write.
pub type WriteHook = Rc<dyn Fn()>;

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// User state as JSON values keyed by string.
#[derive(Default)]
pub struct Store {
    values: RefCell<Map<String, Value>>,
    hook: RefCell<Option<WriteHook>>,
    writes: Cell<u64>,
}

impl Store {
    /// Create a store holding `values`, with no hook.
    pub fn new(values: Map<String, Value>) -> Self {
        Self {
            values: RefCell::new(values),
            hook: RefCell::new(None),
            writes: Cell::new(0),
        }
    }

    /// A clone of the value under `key`.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.values.borrow().get(key).cloned()
    }

    /// Run `f` on the value under `key`.
    ///
    /// The store is not borrowed while `f` runs, so `f` may write to it.
    pub fn with<R>(&self, key: &str, f: impl FnOnce(Option<&Value>) -> R) -> R {
        let value = self.get(key);
        f(value.as_ref())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.borrow().contains_key(key)
    }

    /// Store `value` under `key`, then run the hook.
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.borrow_mut().insert(key.into(), value.into());
        self.notify();
    }

    /// Replace the value under `key` with `f(current)`, then run the hook.
    ///
    /// A missing key is seen as `Value::Null`. `f` runs on a copy of the
    /// current value and may read other keys.
    pub fn update(&self, key: &str, f: impl FnOnce(&Value) -> Value) {
        let current = self.get(key).unwrap_or(Value::Null);
        let next = f(&current);
        self.values.borrow_mut().insert(key.to_string(), next);
        self.notify();
    }

    /// A read-only copy of the current state.
    pub fn snapshot(&self) -> State {
        State {
            values: self.values.borrow().clone(),
        }
    }

    /// Register the hook run after every write, replacing any previous one.
    pub fn on_write(&self, hook: WriteHook) {
        *self.hook.borrow_mut() = Some(hook);
    }

    /// Drop the write hook. Later writes are kept but render nothing.
    pub fn clear_hook(&self) {
        self.hook.borrow_mut().take();
    }

    /// Number of writes since creation.
    pub fn write_count(&self) -> u64 {
        self.writes.get()
    }

    fn notify(&self) {
        self.writes.set(self.writes.get() + 1);
        let hook = self.hook.borrow().clone();
        if let Some(hook) = hook {
            hook();
        }
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("values", &self.values.borrow())
            .field("hooked", &self.hook.borrow().is_some())
            .field("writes", &self.writes.get())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// The state as seen by a view: a snapshot taken at the start of a render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct State {
    values: Map<String, Value>,
}

impl State {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// The value under `key` as an integer.
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.values.get(key).and_then(Value::as_i64)
    }

    /// The value under `key` as a string slice.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.values.get(key).and_then(Value::as_bool)
    }

    /// The value under `key` as an array; empty when missing or not an array.
    pub fn get_array(&self, key: &str) -> &[Value] {
        self.values
            .get(key)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store() -> Store {
        let Value::Object(map) = json!({ "counter": 0, "tasks": ["a"] }) else {
            unreachable!()
        };
        Store::new(map)
    }

    fn counting_hook(store: &Store) -> Rc<Cell<u32>> {
        let runs = Rc::new(Cell::new(0));
        let seen = Rc::clone(&runs);
        store.on_write(Rc::new(move || seen.set(seen.get() + 1)));
        runs
    }

    #[test]
    fn reads_do_not_notify() {
        let store = store();
        let runs = counting_hook(&store);
        assert_eq!(store.get("counter"), Some(json!(0)));
        assert!(store.with("tasks", |v| v.is_some_and(Value::is_array)));
        assert!(!store.contains_key("missing"));
        let _ = store.snapshot();
        assert_eq!(runs.get(), 0);
    }

    #[test]
    fn each_write_notifies_once() {
        let store = store();
        let runs = counting_hook(&store);
        store.set("counter", 1);
        assert_eq!(runs.get(), 1);
        store.update("counter", |v| json!(v.as_i64().unwrap_or(0) + 1));
        assert_eq!(runs.get(), 2);
        assert_eq!(store.get("counter"), Some(json!(2)));
        assert_eq!(store.write_count(), 2);
    }

    #[test]
    fn update_of_missing_key_sees_null() {
        let store = store();
        store.update("fresh", |v| {
            assert!(v.is_null());
            json!("x")
        });
        assert_eq!(store.get("fresh"), Some(json!("x")));
    }

    #[test]
    fn update_may_derive_from_other_keys() {
        let store = store();
        let runs = counting_hook(&store);
        store.set("counter", 4);
        store.update("total", |_| {
            json!(store.get("counter").and_then(|v| v.as_i64()).unwrap_or(0) + 1)
        });
        assert_eq!(store.get("total"), Some(json!(5)));
        assert_eq!(runs.get(), 2);
    }

    #[test]
    fn with_may_write() {
        let store = store();
        let len = store.with("tasks", |tasks| {
            store.set("seen", true);
            tasks.and_then(Value::as_array).map_or(0, Vec::len)
        });
        assert_eq!(len, 1);
        assert_eq!(store.get("seen"), Some(json!(true)));
    }

    #[test]
    fn hook_may_read_the_store() {
        let store = Rc::new(store());
        let seen = Rc::new(RefCell::new(None));
        let (reader, sink) = (Rc::downgrade(&store), Rc::clone(&seen));
        store.on_write(Rc::new(move || {
            if let Some(store) = reader.upgrade() {
                *sink.borrow_mut() = store.get("counter");
            }
        }));
        store.set("counter", 5);
        assert_eq!(*seen.borrow(), Some(json!(5)));
    }

    #[test]
    fn cleared_hook_keeps_writes() {
        let store = store();
        let runs = counting_hook(&store);
        store.clear_hook();
        store.set("counter", 9);
        assert_eq!(runs.get(), 0);
        assert_eq!(store.get("counter"), Some(json!(9)));
    }

    #[test]
    fn state_accessors() {
        let state = store().snapshot();
        assert_eq!(state.get_i64("counter"), Some(0));
        assert_eq!(state.get_array("tasks"), &[json!("a")]);
        assert!(state.get_array("counter").is_empty());
        assert_eq!(state.get_str("tasks"), None);
        assert_eq!(state.get_bool("missing"), None);
        assert_eq!(state.as_map().len(), 2);
    }
}
