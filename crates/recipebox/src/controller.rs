//! User action handling.
//!
//! The [`Controller`] owns the recipe store, the renderer and the downloader,
//! and turns user actions into store mutations followed by a fresh view.
//! Every handler runs to completion before it returns; failures are scoped
//! to the single action and reported both as a [`Notification`] and as the
//! returned error.

use std::fmt;
use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::export::Downloader;
use crate::filter::Filter;
use crate::recipe::{Recipe, RecipeForm};
use crate::render::{Action, ListView, Renderer};
use crate::storage::KeyValueStore;
use crate::store::RecipeStore;

/// Message shown after a recipe was saved.
pub const SAVED_MESSAGE: &str = "Recipe saved successfully!";

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    /// The action succeeded.
    Success,
    /// The action failed and changed nothing.
    Error,
}

/// A message for the user about the outcome of an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// How the action went.
    pub level: NotificationLevel,
    /// Human-readable message.
    pub message: String,
}

impl Notification {
    /// Create a success notification.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    /// Create an error notification.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }

    /// Check if this notification reports a failure.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.level == NotificationLevel::Error
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Connects user actions to the store, the renderer and the downloader.
#[derive(Debug)]
pub struct Controller<S, D> {
    store: RecipeStore<S>,
    renderer: Renderer,
    downloader: D,
    form: RecipeForm,
    search_query: String,
    view: ListView,
    notifications: Vec<Notification>,
}

impl<S: KeyValueStore, D: Downloader> Controller<S, D> {
    /// Create a controller showing the full collection.
    #[must_use]
    pub fn new(store: RecipeStore<S>, downloader: D) -> Self {
        let renderer = Renderer::new();
        let view = renderer.render_all(store.all());
        Self {
            store,
            renderer,
            downloader,
            form: RecipeForm::default(),
            search_query: String::new(),
            view,
            notifications: Vec::new(),
        }
    }

    /// Save the recipe currently entered in the form.
    ///
    /// On success the form is cleared and the full list is shown again. The
    /// search query is kept as entered.
    /// Returns the index of the new recipe.
    ///
    /// # Errors
    ///
    /// Returns an error if the store refuses or cannot persist the recipe; the
    /// form and the collection are left as they were.
    pub fn on_submit(&mut self) -> Result<usize> {
        match self.store.add(&self.form) {
            Ok(index) => {
                info!("Saved recipe {:?}", self.form.name);
                self.notify(Notification::success(SAVED_MESSAGE));
                self.form.clear();
                self.view = self.renderer.render_all(self.store.all());
                Ok(index)
            }
            Err(e) => {
                warn!("Failed to save recipe {:?}: {}", self.form.name, e);
                self.notify(Notification::error(format!("Unable to save recipe: {e}")));
                Err(e)
            }
        }
    }

    /// Delete the recipe at `index`.
    ///
    /// The search query is cleared and the full list is shown again.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of range or the store cannot be
    /// written; nothing changes in that case.
    pub fn on_delete(&mut self, index: usize) -> Result<Recipe> {
        match self.store.remove_at(index) {
            Ok(removed) => {
                info!("Deleted recipe {:?}", removed.name);
                self.search_query.clear();
                self.refresh();
                Ok(removed)
            }
            Err(e) => Err(self.report("delete", index, e)),
        }
    }

    /// Export the recipe at `index` as a text file.
    ///
    /// Returns where the file was delivered.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of range or the download fails.
    pub fn on_save_as_file(&mut self, index: usize) -> Result<PathBuf> {
        let (text, file_name) = match self.store.get(index) {
            Ok(recipe) => (recipe.to_text(), recipe.file_name()),
            Err(e) => return Err(self.report("export", index, e)),
        };

        match self.downloader.trigger_download(text.as_bytes(), &file_name) {
            Ok(path) => {
                self.notify(Notification::success(format!(
                    "Saved recipe to {}",
                    path.display()
                )));
                Ok(path)
            }
            Err(e) => Err(self.report("export", index, e)),
        }
    }

    /// Show the recipes whose name contains `query`, ignoring case.
    ///
    /// An empty query shows the full list.
    pub fn on_search_input(&mut self, query: &str) -> &ListView {
        self.search_query = query.to_string();
        self.refresh();
        &self.view
    }

    /// Run an action taken from a rendered entry.
    ///
    /// # Errors
    ///
    /// Returns the error of the underlying handler.
    pub fn dispatch(&mut self, action: Action) -> Result<()> {
        debug!("Dispatching {:?}", action);
        match action {
            Action::SaveAsFile { index } => self.on_save_as_file(index).map(|_| ()),
            Action::Delete { index } => self.on_delete(index).map(|_| ()),
        }
    }

    /// The current view.
    #[must_use]
    pub fn view(&self) -> &ListView {
        &self.view
    }

    /// The form fields as currently entered.
    #[must_use]
    pub fn form(&self) -> &RecipeForm {
        &self.form
    }

    /// Mutable access to the form fields.
    pub fn form_mut(&mut self) -> &mut RecipeForm {
        &mut self.form
    }

    /// The current search query.
    #[must_use]
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// The recipe store.
    #[must_use]
    pub fn store(&self) -> &RecipeStore<S> {
        &self.store
    }

    /// The downloader.
    #[must_use]
    pub fn downloader(&self) -> &D {
        &self.downloader
    }

    /// Notifications raised so far, oldest first, leaving none behind.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    fn refresh(&mut self) {
        let filter = Filter::from_query(&self.search_query);
        self.view = if filter.is_all() {
            self.renderer.render_all(self.store.all())
        } else {
            self.renderer.render_filtered(&self.store.search(&filter))
        };
    }

    fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    fn report(&mut self, action: &str, index: usize, err: Error) -> Error {
        warn!("Could not {} recipe {}: {}", action, index, err);
        self.notify(Notification::error(format!(
            "Could not {action} recipe {index}: {err}"
        )));
        err
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::export::{DirectoryDownloader, MemoryDownloader};
    use crate::storage::MemoryStore;
    use crate::store::DEFAULT_STORAGE_KEY;

    type TestController = Controller<MemoryStore, MemoryDownloader>;

    fn controller() -> TestController {
        let store = RecipeStore::load(MemoryStore::new()).unwrap();
        Controller::new(store, MemoryDownloader::new())
    }

    fn submit(c: &mut TestController, name: &str, ingredients: &str, method: &str) -> usize {
        *c.form_mut() = RecipeForm::new(name, ingredients, method);
        c.on_submit().unwrap()
    }

    fn view_names(c: &TestController) -> Vec<String> {
        c.view().entries().iter().map(|e| e.name.clone()).collect()
    }

    #[test]
    fn test_new_renders_loaded_collection() {
        let json = r#"[{"name":"Soup","ingredients":["water"],"method":"boil"}]"#;
        let store = RecipeStore::load(MemoryStore::with_entry(DEFAULT_STORAGE_KEY, json)).unwrap();
        let c = Controller::new(store, MemoryDownloader::new());

        assert_eq!(c.view().len(), 1);
        assert_eq!(c.view().entries()[0].name, "Soup");
    }

    #[test]
    fn test_new_empty_shows_empty_state() {
        let c = controller();
        assert!(c.view().is_empty());
        assert!(c.view().empty_message().is_some());
    }

    #[test]
    fn test_submit_saves_clears_form_and_renders() {
        let mut c = controller();
        let index = submit(&mut c, "Soup", "water, salt", "boil");

        assert_eq!(index, 0);
        assert!(c.form().is_empty());
        assert_eq!(view_names(&c), vec!["Soup"]);
        assert_eq!(
            c.take_notifications(),
            vec![Notification::success(SAVED_MESSAGE)]
        );
        assert!(c.take_notifications().is_empty());
    }

    #[test]
    fn test_submit_with_unavailable_storage() {
        let store = RecipeStore::load(MemoryStore::new()).unwrap();
        let mut c = Controller::new(store, MemoryDownloader::new());
        *c.form_mut() = RecipeForm::new("Soup", "water", "boil");

        // Simulate the host losing its storage after startup.
        c.store.backend_mut().set_available(false);

        let err = c.on_submit().unwrap_err();
        assert!(err.is_storage_error());
        assert!(c.store().is_empty());
        assert_eq!(c.form().name, "Soup");

        let notes = c.take_notifications();
        assert_eq!(notes.len(), 1);
        assert!(notes[0].is_error());
    }

    #[test]
    fn test_delete_resets_search_and_renders_all() {
        let mut c = controller();
        submit(&mut c, "Apple Pie", "", "");
        submit(&mut c, "Banana Bread", "", "");
        submit(&mut c, "Apple Crumble", "", "");

        c.on_search_input("apple");
        assert_eq!(c.view().len(), 2);

        let removed = c.on_delete(2).unwrap();
        assert_eq!(removed.name, "Apple Crumble");
        assert_eq!(c.search_query(), "");
        assert!(!c.view().is_filtered());
        assert_eq!(view_names(&c), vec!["Apple Pie", "Banana Bread"]);
    }

    #[test]
    fn test_delete_out_of_range_is_reported_noop() {
        let mut c = controller();
        submit(&mut c, "A", "", "");
        c.take_notifications();

        let err = c.on_delete(3).unwrap_err();
        assert!(err.is_index_out_of_range());
        assert_eq!(c.store().len(), 1);

        let notes = c.take_notifications();
        assert_eq!(notes.len(), 1);
        assert!(notes[0].is_error());
        assert!(notes[0].message.contains('3'));
    }

    #[test]
    fn test_save_as_file() {
        let mut c = controller();
        submit(&mut c, "Hot Soup", "water, salt", "boil");

        let path = c.on_save_as_file(0).unwrap();
        assert_eq!(path, Path::new("hot-soup.txt"));

        let (file_name, bytes) = &c.downloader().downloads()[0];
        assert_eq!(file_name, "hot-soup.txt");
        assert_eq!(
            std::str::from_utf8(bytes).unwrap(),
            "Recipe: Hot Soup\nIngredients:\nwater\nsalt\nMethod:\nboil"
        );
    }

    #[test]
    fn test_save_as_file_out_of_range() {
        let mut c = controller();
        let err = c.on_save_as_file(0).unwrap_err();

        assert!(err.is_index_out_of_range());
        assert!(c.downloader().downloads().is_empty());
        assert!(c.take_notifications()[0].is_error());
    }

    #[test]
    fn test_search_filters_by_name() {
        let mut c = controller();
        submit(&mut c, "Apple Pie", "", "");
        submit(&mut c, "Banana Bread", "", "");

        let view = c.on_search_input("ap");
        assert!(view.is_filtered());
        assert_eq!(view.len(), 1);
        assert_eq!(view.entries()[0].name, "Apple Pie");
    }

    #[test]
    fn test_empty_search_equals_render_all() {
        let mut c = controller();
        submit(&mut c, "Apple Pie", "", "");
        submit(&mut c, "Banana Bread", "", "");
        let full = c.view().clone();

        c.on_search_input("banana");
        let restored = c.on_search_input("").clone();
        assert_eq!(restored, full);
    }

    #[test]
    fn test_search_then_dispatch_targets_original_index() {
        let mut c = controller();
        submit(&mut c, "Soup", "", "");
        submit(&mut c, "Apple Pie", "", "");

        let action = c.on_search_input("apple").entries()[0].actions[1];
        assert_eq!(action, Action::Delete { index: 1 });

        c.dispatch(action).unwrap();
        assert_eq!(view_names(&c), vec!["Soup"]);
    }

    #[test]
    fn test_dispatch_save_as_file() {
        let mut c = controller();
        submit(&mut c, "Toast", "bread", "toast it");

        let action = c.view().entries()[0].actions[0];
        c.dispatch(action).unwrap();
        assert_eq!(c.downloader().downloads()[0].0, "toast.txt");
    }

    #[test]
    fn test_submit_while_searching_shows_full_list() {
        let mut c = controller();
        submit(&mut c, "Apple Pie", "", "");
        c.on_search_input("zzz");
        assert!(c.view().is_empty());

        submit(&mut c, "Banana Bread", "", "");
        assert!(!c.view().is_filtered());
        assert_eq!(view_names(&c), vec!["Apple Pie", "Banana Bread"]);
        assert_eq!(c.search_query(), "zzz");
    }

    #[test]
    fn test_save_as_file_into_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecipeStore::load(MemoryStore::new()).unwrap();
        let mut c = Controller::new(store, DirectoryDownloader::new(dir.path()));
        *c.form_mut() = RecipeForm::new("Hot Soup", "water, salt", "boil");
        c.on_submit().unwrap();

        let path = c.on_save_as_file(0).unwrap();

        assert_eq!(path, dir.path().join("hot-soup.txt"));
        assert_eq!(
            std::fs::read(&path).unwrap(),
            b"Recipe: Hot Soup\nIngredients:\nwater\nsalt\nMethod:\nboil"
        );
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_save_as_file_stays_inside_export_directory() {
        let dir = tempfile::tempdir().unwrap();
        let export_dir = dir.path().join("exports");
        std::fs::create_dir(&export_dir).unwrap();
        let store = RecipeStore::load(MemoryStore::new()).unwrap();
        let mut c = Controller::new(store, DirectoryDownloader::new(&export_dir));

        let outside = dir.path().join("stolen");
        for name in [outside.to_string_lossy().into_owned(), "../stolen".to_string()] {
            *c.form_mut() = RecipeForm::new(name, "", "");
            c.on_submit().unwrap();
        }
        c.take_notifications();

        for index in 0..2 {
            let err = c.on_save_as_file(index).unwrap_err();
            assert!(matches!(err, Error::Export { .. }));
        }
        assert!(!dir.path().join("stolen.txt").exists());
        assert_eq!(std::fs::read_dir(&export_dir).unwrap().count(), 0);
        assert!(c.take_notifications().iter().all(Notification::is_error));
    }
}
