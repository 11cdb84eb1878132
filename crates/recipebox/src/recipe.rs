//! Core recipe types for recipebox.
//!
//! This module defines the recipe record, the raw form it is built from, and
//! the plain-text export representation of a recipe.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Extension appended to exported recipe file names.
const EXPORT_EXTENSION: &str = "txt";

/// A single recipe.
///
/// Recipes are never edited after creation; a changed recipe is a new record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Display name. Not required to be unique.
    pub name: String,

    /// Ingredients in the order they were entered.
    pub ingredients: Vec<String>,

    /// Free-text preparation method.
    pub method: String,
}

impl Recipe {
    /// Build a recipe from raw field values.
    ///
    /// The ingredients string is split on commas and every segment is trimmed.
    /// Empty segments are kept, so `"salt,,pepper"` yields three ingredients.
    #[must_use]
    pub fn from_fields(name: &str, ingredients: &str, method: &str) -> Self {
        Self {
            name: name.to_string(),
            ingredients: parse_ingredients(ingredients),
            method: method.to_string(),
        }
    }

    /// Check whether the recipe name contains `needle`, ignoring case.
    ///
    /// `needle` is expected to be lowercased already.
    #[must_use]
    pub fn name_contains_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
    }

    /// Render the recipe as the plain-text export document.
    ///
    /// Lines are separated by `\n` and there is no trailing newline.
    #[must_use]
    pub fn to_text(&self) -> String {
        format!(
            "Recipe: {}\nIngredients:\n{}\nMethod:\n{}",
            self.name,
            self.ingredients.join("\n"),
            self.method
        )
    }

    /// File name used when exporting this recipe, e.g. `hot-soup.txt`.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.{EXPORT_EXTENSION}", slug(&self.name))
    }
}

/// Split a comma-separated ingredient list, trimming each entry.
#[must_use]
pub fn parse_ingredients(raw: &str) -> Vec<String> {
    raw.split(',').map(|s| s.trim().to_string()).collect()
}

/// Derive a file-name-safe slug from a recipe name.
///
/// Every run of whitespace becomes a single `-` and the result is lowercased.
#[must_use]
pub fn slug(name: &str) -> String {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    let re = WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("static regex is valid"));
    re.replace_all(name, "-").to_lowercase()
}

/// Raw values of the three recipe input fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeForm {
    /// Recipe name field.
    pub name: String,
    /// Comma-separated ingredients field.
    pub ingredients: String,
    /// Method field.
    pub method: String,
}

impl RecipeForm {
    /// Create a form holding the given field values.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        ingredients: impl Into<String>,
        method: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            ingredients: ingredients.into(),
            method: method.into(),
        }
    }

    /// Build the recipe these fields describe.
    #[must_use]
    pub fn to_recipe(&self) -> Recipe {
        Recipe::from_fields(&self.name, &self.ingredients, &self.method)
    }

    /// Reset every field to empty.
    pub fn clear(&mut self) {
        self.name.clear();
        self.ingredients.clear();
        self.method.clear();
    }

    /// Check if every field is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.ingredients.is_empty() && self.method.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hot_soup() -> Recipe {
        Recipe::from_fields("Hot Soup", "water, salt", "boil")
    }

    #[test]
    fn test_from_fields_splits_and_trims() {
        let recipe = Recipe::from_fields("Soup", "water, salt", "boil");
        assert_eq!(recipe.name, "Soup");
        assert_eq!(recipe.ingredients, vec!["water", "salt"]);
        assert_eq!(recipe.method, "boil");
    }

    #[test]
    fn test_parse_ingredients_keeps_empty_segments() {
        assert_eq!(parse_ingredients("salt,, pepper "), vec!["salt", "", "pepper"]);
        assert_eq!(parse_ingredients("egg,"), vec!["egg", ""]);
    }

    #[test]
    fn test_parse_ingredients_empty_input() {
        assert_eq!(parse_ingredients(""), vec![""]);
    }

    #[test]
    fn test_to_text() {
        assert_eq!(
            hot_soup().to_text(),
            "Recipe: Hot Soup\nIngredients:\nwater\nsalt\nMethod:\nboil"
        );
    }

    #[test]
    fn test_to_text_empty_method() {
        let recipe = Recipe::from_fields("Toast", "bread", "");
        assert_eq!(recipe.to_text(), "Recipe: Toast\nIngredients:\nbread\nMethod:\n");
    }

    #[test]
    fn test_file_name() {
        assert_eq!(hot_soup().file_name(), "hot-soup.txt");
    }

    #[test]
    fn test_slug_collapses_whitespace_runs() {
        assert_eq!(slug("Grandma's   Apple\tPie"), "grandma's-apple-pie");
        assert_eq!(slug(" Leading"), "-leading");
        assert_eq!(slug("plain"), "plain");
    }

    #[test]
    fn test_name_contains_lowercase() {
        let recipe = Recipe::from_fields("Apple Pie", "", "");
        assert!(recipe.name_contains_lowercase("ap"));
        assert!(recipe.name_contains_lowercase("e p"));
        assert!(!recipe.name_contains_lowercase("banana"));
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_value(hot_soup()).unwrap();
        assert_eq!(json["name"], "Hot Soup");
        assert_eq!(json["ingredients"][1], "salt");
        assert_eq!(json["method"], "boil");
    }

    #[test]
    fn test_form_to_recipe_and_clear() {
        let mut form = RecipeForm::new("Soup", "water, salt", "boil");
        assert!(!form.is_empty());
        assert_eq!(form.to_recipe(), Recipe::from_fields("Soup", "water, salt", "boil"));

        form.clear();
        assert!(form.is_empty());
        assert_eq!(form, RecipeForm::default());
    }
}
