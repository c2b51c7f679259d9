//! `localStorage` as a [`PreferenceStore`]. Storage errors (private mode, quota) are swallowed.

use crate::core::store::PreferenceStore;
use web_sys::Storage;

#[derive(Clone)]
pub struct LocalStorage {
    inner: Option<Storage>,
}

impl LocalStorage {
    pub fn open() -> Self {
        let inner = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        Self { inner }
    }

    pub fn is_available(&self) -> bool { self.inner.is_some() }
}

impl PreferenceStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = &self.inner {
            if storage.set_item(key, value).is_err() {
                super::log_error!("[storage] failed to write {}", key);
            }
        }
    }
}
