//! Recipe search filters.

use crate::recipe::Recipe;

/// Which recipes a list view should show.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Filter {
    /// Every recipe, no filtering.
    #[default]
    All,
    /// Recipes whose name contains the needle, ignoring case.
    ///
    /// The needle is stored lowercased and is never empty.
    NameContains(String),
}

impl Filter {
    /// Build a filter from the text of a search input.
    ///
    /// An empty query means "no filter" and maps to [`Filter::All`].
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        if query.is_empty() {
            Self::All
        } else {
            Self::NameContains(query.to_lowercase())
        }
    }

    /// Check whether a recipe passes this filter.
    #[must_use]
    pub fn matches(&self, recipe: &Recipe) -> bool {
        match self {
            Self::All => true,
            Self::NameContains(needle) => recipe.name_contains_lowercase(needle),
        }
    }

    /// Check if this filter lets everything through.
    #[must_use]
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}
