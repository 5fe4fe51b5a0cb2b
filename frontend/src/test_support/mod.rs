#[cfg(test)]
pub mod helpers {
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;
    use std::rc::Rc;

    use crate::api::UserRecord;
    use crate::session::store::{Session, StorageBackend, StorageError};

    pub fn with_runtime<T>(test: impl FnOnce() -> T) -> T {
        let runtime = leptos::create_runtime();
        let result = test();
        runtime.dispose();
        result
    }

    pub fn sample_user() -> UserRecord {
        serde_json::from_value(serde_json::json!({
            "id": 1,
            "email": "a@x.com",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "profile_picture": "https://lh3.example.com/p/ada",
            "created_at": "2024-01-01T00:00:00Z"
        }))
        .expect("sample user json is well-formed")
    }

    pub fn sample_session(token: &str) -> Session {
        Session {
            access_token: token.to_string(),
            user: sample_user(),
        }
    }

    /// In-memory stand-in for localStorage with knobs for failure
    /// injection and write observation.
    #[derive(Clone, Default)]
    pub struct MemoryBackend {
        entries: Rc<RefCell<HashMap<String, String>>>,
        fail_all: Rc<Cell<bool>>,
        fail_after: Rc<Cell<Option<usize>>>,
        on_write: Rc<RefCell<Option<Rc<dyn Fn()>>>>,
    }

    impl MemoryBackend {
        pub fn new() -> Self {
            Self::default()
        }

        /// Every subsequent write fails.
        pub fn fail_writes(&self) {
            self.fail_all.set(true);
        }

        /// The first `n` writes succeed, the next one fails, and writes
        /// recover afterwards (a transient quota error).
        pub fn fail_after_writes(&self, n: usize) {
            self.fail_after.set(Some(n));
        }

        /// Called after each successful write; used to simulate events
        /// firing while a transition is mid-flight.
        pub fn on_write(&self, hook: impl Fn() + 'static) {
            *self.on_write.borrow_mut() = Some(Rc::new(hook));
        }

        pub fn contains(&self, key: &str) -> bool {
            self.entries.borrow().contains_key(key)
        }

        pub fn seed(&self, key: &str, value: &str) {
            self.entries
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
        }
    }

    impl StorageBackend for MemoryBackend {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Ok(self.entries.borrow().get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if self.fail_all.get() {
                return Err(StorageError::Write(key.to_string()));
            }
            if let Some(remaining) = self.fail_after.get() {
                if remaining == 0 {
                    self.fail_after.set(None);
                    return Err(StorageError::Write(key.to_string()));
                }
                self.fail_after.set(Some(remaining - 1));
            }
            self.entries
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
            let hook = self.on_write.borrow().clone();
            if let Some(hook) = hook {
                hook();
            }
            Ok(())
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.entries.borrow_mut().remove(key);
            Ok(())
        }
    }
}
