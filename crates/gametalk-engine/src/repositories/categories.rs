//! Categories are local only: seeded once from the catalogue, then observed

use gametalk_core::model::Category;
use gametalk_core::Result;
use gametalk_store::{LiveQuery, LocalStore};

#[derive(Clone)]
pub struct CategoryRepository {
    store: LocalStore,
}

impl CategoryRepository {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    /// Seed the default catalogue into an empty store. Safe to call on every
    /// start; returns whether this call seeded.
    ///
    /// # Errors
    ///
    /// Propagates Local Store failures.
    pub fn initialize_default_categories(&self) -> Result<bool> {
        self.store.seed_default_categories()
    }

    /// All categories by name, re-emitted on every change
    pub fn observe_categories(&self) -> LiveQuery<Category> {
        self.store.observe_categories()
    }

    pub fn get_category(&self, category_id: i64) -> Result<Option<Category>> {
        self.store.get_category(category_id)
    }
}
