//! Key-value preference store (browser `localStorage`, or memory natively)

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

/// In-memory store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self { Self::default() }

    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.set(key, value);
        self
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
    }
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for &S {
    fn get(&self, key: &str) -> Option<String> { (**self).get(key) }
    fn set(&self, key: &str, value: &str) { (**self).set(key, value) }
}
