// Copyright (c) 2025 MPC Autocomplete Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Shared, swappable handle to the live model.
//!
//! Readers take a snapshot (an `Arc` clone, the lock is held only for the
//! clone) and query it without any locking. A reload builds a complete new
//! model elsewhere and swaps it in; snapshots taken before the swap keep
//! answering from the old model until they are dropped.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use super::CompletionModel;

/// Handle to the model currently serving queries.
pub struct SharedModel {
    current: RwLock<Arc<dyn CompletionModel>>,
}

impl SharedModel {
    /// Wraps a fully built model.
    pub fn new<M>(model: M) -> Self
    where
        M: CompletionModel + 'static,
    {
        Self::from_arc(Arc::new(model))
    }

    /// Wraps a boxed model, as returned by [`super::create_model`].
    pub fn from_boxed(model: Box<dyn CompletionModel>) -> Self {
        Self::from_arc(Arc::from(model))
    }

    /// Wraps an already shared model.
    pub fn from_arc(model: Arc<dyn CompletionModel>) -> Self {
        Self {
            current: RwLock::new(model),
        }
    }

    /// The model serving queries right now.
    pub fn snapshot(&self) -> Arc<dyn CompletionModel> {
        Arc::clone(&self.current.read())
    }

    /// Installs `model` and returns the one it replaced.
    pub fn swap(&self, model: Arc<dyn CompletionModel>) -> Arc<dyn CompletionModel> {
        let entries = model.len();
        let previous = std::mem::replace(&mut *self.current.write(), model);
        tracing::info!(
            previous_entries = previous.len(),
            entries,
            "Swapped in new model"
        );
        previous
    }

    /// Boxed convenience wrapper around [`SharedModel::swap`].
    pub fn replace(&self, model: Box<dyn CompletionModel>) -> Arc<dyn CompletionModel> {
        self.swap(Arc::from(model))
    }
}

impl fmt::Debug for SharedModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let model = self.snapshot();
        f.debug_struct("SharedModel")
            .field("kind", &model.kind())
            .field("entries", &model.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_structures::Entry;
    use crate::model::MostPopularCompletionModel;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;

    fn model_with(entries: &[(&str, u64)]) -> MostPopularCompletionModel {
        let mut model = MostPopularCompletionModel::new(3);
        model
            .build(entries.iter().map(|&(k, f)| Entry::new(k, f)).collect())
            .unwrap();
        model
    }

    #[test]
    fn test_swap_keeps_old_snapshots_valid() {
        let shared = SharedModel::new(model_with(&[("old entry", 1)]));
        let before = shared.snapshot();

        let previous = shared.swap(Arc::new(model_with(&[("new entry", 1), ("new item", 2)])));

        assert_eq!(previous.complete("old"), vec!["old entry"]);
        assert_eq!(before.complete("old"), vec!["old entry"]);
        assert!(shared.snapshot().complete("old").is_empty());
        assert_eq!(shared.snapshot().complete("new"), vec!["new item", "new entry"]);
    }

    /// Readers racing a writer only ever see one complete model or the other.
    #[test]
    fn test_readers_never_observe_partial_model() {
        let shared = Arc::new(SharedModel::new(model_with(&[("a1", 1), ("a2", 2)])));
        let done = Arc::new(AtomicBool::new(false));

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let shared = Arc::clone(&shared);
                let done = Arc::clone(&done);
                thread::spawn(move || {
                    while !done.load(Ordering::Acquire) {
                        let model = shared.snapshot();
                        let a = model.complete("a");
                        let b = model.complete("b");
                        assert!(
                            (a == ["a2", "a1"] && b.is_empty())
                                || (b == ["b2", "b1"] && a.is_empty()),
                            "inconsistent snapshot: {a:?} {b:?}"
                        );
                    }
                })
            })
            .collect();

        for i in 0..50 {
            let next = if i % 2 == 0 {
                model_with(&[("b1", 1), ("b2", 2)])
            } else {
                model_with(&[("a1", 1), ("a2", 2)])
            };
            shared.swap(Arc::new(next));
        }
        done.store(true, Ordering::Release);

        for reader in readers {
            reader.join().unwrap();
        }
    }

    #[test]
    fn test_debug_output() {
        let shared = SharedModel::new(model_with(&[("x", 1)]));
        let debug = format!("{shared:?}");
        assert!(debug.contains("Mpc"));
        assert!(debug.contains("entries: 1"));
    }
}
