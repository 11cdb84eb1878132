//! The recipe collection and its persistence contract.
//!
//! [`RecipeStore`] owns the authoritative in-memory collection and mirrors it
//! to a [`KeyValueStore`] on every mutation. A mutation is staged on a copy
//! of the collection and only committed once the write succeeded, so the
//! in-memory and persisted copies never diverge.

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::filter::Filter;
use crate::recipe::{Recipe, RecipeForm};
use crate::storage::KeyValueStore;

/// Key the collection is stored under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "recipes";

/// Options controlling how a [`RecipeStore`] persists and validates recipes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    /// Key holding the serialized collection.
    pub key: String,
    /// Refuse recipes with an empty name.
    pub reject_empty_name: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            key: DEFAULT_STORAGE_KEY.to_string(),
            reject_empty_name: false,
        }
    }
}

impl From<&Config> for StoreOptions {
    fn from(config: &Config) -> Self {
        Self {
            key: config.storage.key.clone(),
            reject_empty_name: config.recipes.reject_empty_name,
        }
    }
}

/// Ordered recipe collection mirrored to a key-value store.
#[derive(Debug)]
pub struct RecipeStore<S> {
    kv: S,
    options: StoreOptions,
    recipes: Vec<Recipe>,
}

impl<S: KeyValueStore> RecipeStore<S> {
    /// Load the collection from `kv` using default options.
    ///
    /// # Errors
    ///
    /// Returns an error only if the backend itself cannot be read.
    pub fn load(kv: S) -> Result<Self> {
        Self::load_with(kv, StoreOptions::default())
    }

    /// Load the collection from `kv`.
    ///
    /// A missing key or a value that does not parse as a recipe list both
    /// yield an empty collection.
    ///
    /// # Errors
    ///
    /// Returns an error only if the backend itself cannot be read.
    pub fn load_with(kv: S, options: StoreOptions) -> Result<Self> {
        let recipes = match kv.get(&options.key)? {
            None => {
                debug!("No stored recipes under key {}", options.key);
                Vec::new()
            }
            Some(raw) => match serde_json::from_str::<Vec<Recipe>>(&raw) {
                Ok(recipes) => recipes,
                Err(e) => {
                    warn!(
                        "Stored recipes under key {} are unreadable, starting empty: {}",
                        options.key, e
                    );
                    Vec::new()
                }
            },
        };

        info!("Loaded {} recipes", recipes.len());
        Ok(Self {
            kv,
            options,
            recipes,
        })
    }

    /// Append a recipe built from raw form fields and persist the collection.
    ///
    /// Returns the index of the new recipe.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyName`] if empty names are rejected and the name is
    /// empty, or a storage error if the collection cannot be written. The
    /// collection is unchanged in both cases.
    pub fn add(&mut self, form: &RecipeForm) -> Result<usize> {
        if self.options.reject_empty_name && form.name.is_empty() {
            return Err(Error::EmptyName);
        }

        let mut staged = self.recipes.clone();
        staged.push(form.to_recipe());
        self.persist(&staged)?;
        self.recipes = staged;

        let index = self.recipes.len() - 1;
        debug!("Added recipe {:?} at index {}", form.name, index);
        Ok(index)
    }

    /// Remove the recipe at `index` and persist the collection.
    ///
    /// Later recipes shift down by one. Returns the removed recipe.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index` is not in the collection,
    /// or a storage error if the collection cannot be written. The collection
    /// is unchanged in both cases.
    pub fn remove_at(&mut self, index: usize) -> Result<Recipe> {
        self.check_index(index)?;

        let mut staged = self.recipes.clone();
        let removed = staged.remove(index);
        self.persist(&staged)?;
        self.recipes = staged;

        debug!("Removed recipe {:?} from index {}", removed.name, index);
        Ok(removed)
    }

    /// Get the recipe at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index` is not in the collection.
    pub fn get(&self, index: usize) -> Result<&Recipe> {
        self.check_index(index)?;
        Ok(&self.recipes[index])
    }

    /// The current collection in insertion order.
    #[must_use]
    pub fn all(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Recipes passing `filter`, paired with their index in the collection.
    #[must_use]
    pub fn search(&self, filter: &Filter) -> Vec<(usize, &Recipe)> {
        self.recipes
            .iter()
            .enumerate()
            .filter(|(_, recipe)| filter.matches(recipe))
            .collect()
    }

    /// Number of recipes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    /// Check if the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// The options this store was loaded with.
    #[must_use]
    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    /// The backing key-value store.
    #[must_use]
    pub fn backend(&self) -> &S {
        &self.kv
    }

    /// Mutable access to the backing key-value store.
    pub fn backend_mut(&mut self) -> &mut S {
        &mut self.kv
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.recipes.len() {
            Ok(())
        } else {
            Err(Error::IndexOutOfRange {
                index,
                len: self.recipes.len(),
            })
        }
    }

    fn persist(&mut self, recipes: &[Recipe]) -> Result<()> {
        let serialized = serde_json::to_string(recipes)?;
        self.kv.set(&self.options.key, &serialized)?;
        debug!("Persisted {} recipes", recipes.len());
        Ok(())
    }
}
