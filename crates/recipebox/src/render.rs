//! List projection of the recipe collection.
//!
//! The renderer turns recipes into a [`ListView`]: plain data describing what
//! to display, including the actions each entry offers. Rendering never
//! touches the store, so the same input always yields the same view.

use std::fmt;

use serde::Serialize;

use crate::recipe::Recipe;

/// Message shown when there are no recipes at all.
pub const EMPTY_LIST_MESSAGE: &str = "No recipes yet. Add one to get started.";

/// Message shown when a search matches nothing.
pub const NO_MATCHES_MESSAGE: &str = "No recipes match your search.";

/// An action offered by a rendered entry.
///
/// The index always addresses the full collection, never a position within a
/// filtered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Export the recipe as a text file.
    SaveAsFile {
        /// Index of the recipe in the collection.
        index: usize,
    },
    /// Delete the recipe.
    Delete {
        /// Index of the recipe in the collection.
        index: usize,
    },
}

/// One displayed recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryView {
    /// Index of the recipe in the collection.
    pub index: usize,
    /// Recipe name.
    pub name: String,
    /// Ingredients in order.
    pub ingredients: Vec<String>,
    /// Preparation method.
    pub method: String,
    /// Actions available on this entry.
    pub actions: [Action; 2],
}

impl EntryView {
    fn new(index: usize, recipe: &Recipe) -> Self {
        Self {
            index,
            name: recipe.name.clone(),
            ingredients: recipe.ingredients.clone(),
            method: recipe.method.clone(),
            actions: [Action::SaveAsFile { index }, Action::Delete { index }],
        }
    }
}

/// A rendered list of recipes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ListView {
    entries: Vec<EntryView>,
    filtered: bool,
}

impl ListView {
    /// The displayed entries, in collection order.
    #[must_use]
    pub fn entries(&self) -> &[EntryView] {
        &self.entries
    }

    /// Number of displayed entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing is displayed, i.e. the empty state is shown.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check if this view shows search results rather than the full list.
    #[must_use]
    pub fn is_filtered(&self) -> bool {
        self.filtered
    }

    /// The empty-state message, if the empty state is showing.
    #[must_use]
    pub fn empty_message(&self) -> Option<&'static str> {
        match (self.is_empty(), self.filtered) {
            (false, _) => None,
            (true, false) => Some(EMPTY_LIST_MESSAGE),
            (true, true) => Some(NO_MATCHES_MESSAGE),
        }
    }
}

impl fmt::Display for ListView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(message) = self.empty_message() {
            return writeln!(f, "{message}");
        }

        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "[{}] {}", entry.index, entry.name)?;
            writeln!(f, "    Ingredients:")?;
            for ingredient in &entry.ingredients {
                writeln!(f, "      - {ingredient}")?;
            }
            writeln!(f, "    Method:")?;
            for line in entry.method.lines() {
                writeln!(f, "      {line}")?;
            }
        }
        Ok(())
    }
}

/// Projects recipes into list views.
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer;

impl Renderer {
    /// Create a renderer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Render the whole collection, one entry per recipe.
    #[must_use]
    pub fn render_all(&self, recipes: &[Recipe]) -> ListView {
        ListView {
            entries: recipes
                .iter()
                .enumerate()
                .map(|(index, recipe)| EntryView::new(index, recipe))
                .collect(),
            filtered: false,
        }
    }

    /// Render search results.
    ///
    /// Each match carries its index in the full collection, which is what the
    /// entry's actions will target.
    #[must_use]
    pub fn render_filtered(&self, matches: &[(usize, &Recipe)]) -> ListView {
        ListView {
            entries: matches
                .iter()
                .map(|(index, recipe)| EntryView::new(*index, recipe))
                .collect(),
            filtered: true,
        }
    }
}
