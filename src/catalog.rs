//! The recipe catalog.
//!
//! Composes a [`RecipeStore`] with the attribute organizer: loads every
//! persisted recipe on open, keeps the collection in memory, and persists
//! before mutating memory so the store stays the source of truth.

use tracing::{debug, warn};

use crate::difficulty::Difficulty;
use crate::error::{CatalogError, OrganizerError};
use crate::organizer::{self, FilterKey};
use crate::recipe::{Recipe, RecipeAttr};
use crate::store::RecipeStore;

/// The user-facing recipe collection.
pub struct Catalog<S: RecipeStore> {
    store: S,
    recipes: Vec<Recipe>,
}

impl<S: RecipeStore> Catalog<S> {
    /// Open a catalog, loading every recipe the store lists.
    ///
    /// Entries that fail to read or validate are skipped with a warning; a
    /// corrupt file does not prevent the rest of the catalog from loading.
    pub fn open(store: S) -> Result<Self, CatalogError> {
        let mut recipes = Vec::new();
        for id in store.list()? {
            match store.read(&id).map_err(CatalogError::from).and_then(|record| {
                Recipe::from_record(record).map_err(CatalogError::from)
            }) {
                Ok(recipe) => recipes.push(recipe),
                Err(error) => warn!(id = %id, %error, "skipping unreadable recipe entry"),
            }
        }
        debug!(count = recipes.len(), "catalog loaded");
        Ok(Self { store, recipes })
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Add a new recipe: persist it, then append it to the collection.
    ///
    /// Fails with a conflict error if a recipe with the same full name is
    /// already cataloged, or if the store already holds its id.
    pub fn add_recipe(&mut self, recipe: Recipe) -> Result<(), CatalogError> {
        if self.find(recipe.name_full()).is_some() {
            return Err(CatalogError::DuplicateRecipe(recipe.name_full().to_string()));
        }
        self.store
            .create(recipe.name_compressed(), &recipe.to_record())?;
        debug!(name = recipe.name_full(), "recipe added");
        self.recipes.push(recipe);
        Ok(())
    }

    /// Remove a recipe by full name: delete its file, then drop it from the
    /// collection.
    pub fn remove_recipe(&mut self, name_full: &str) -> Result<(), CatalogError> {
        let index = self
            .find(name_full)
            .ok_or_else(|| CatalogError::RecipeNotFound(name_full.to_string()))?;
        self.store.delete(self.recipes[index].name_compressed())?;
        debug!(name = name_full, "recipe removed");
        self.recipes.remove(index);
        Ok(())
    }

    /// Replace the stored recipe with the same full name.
    pub fn update_recipe(&mut self, recipe: Recipe) -> Result<(), CatalogError> {
        let index = self
            .find(recipe.name_full())
            .ok_or_else(|| CatalogError::RecipeNotFound(recipe.name_full().to_string()))?;
        self.store
            .update(recipe.name_compressed(), &recipe.to_record())?;
        debug!(name = recipe.name_full(), "recipe updated");
        self.recipes[index] = recipe;
        Ok(())
    }

    fn find(&self, name_full: &str) -> Option<usize> {
        self.recipes.iter().position(|r| r.name_full() == name_full)
    }

    // Sorting replaces the stored order. Sort by a second criterion after a
    // first one to get a two-level ordering, last call leading.

    pub fn sort_by_name(&mut self, reverse: bool) {
        self.sort(RecipeAttr::NameFull, reverse);
    }

    pub fn sort_by_ingredient_count(&mut self, reverse: bool) {
        self.sort(RecipeAttr::IngredientsCount, reverse);
    }

    pub fn sort_by_difficulty(&mut self, reverse: bool) {
        self.sort(RecipeAttr::Difficulty, reverse);
    }

    pub fn sort_by_estimated_time(&mut self, reverse: bool) {
        self.sort(RecipeAttr::EstimatedTime, reverse);
    }

    fn sort(&mut self, attr: RecipeAttr, reverse: bool) {
        self.recipes = organizer::sort_by(&self.recipes, attr, reverse);
    }

    // Filtering returns matching clones; the stored order is untouched.

    /// Recipes whose full name contains any of the phrases, or all of them
    /// with `mutual_exclusion`.
    pub fn filter_by_name_phrases(
        &self,
        phrases: &[&str],
        mutual_exclusion: bool,
    ) -> Result<Vec<Recipe>, OrganizerError> {
        let keys: Vec<FilterKey> = phrases.iter().map(|p| FilterKey::from(*p)).collect();
        organizer::filter_by(&self.recipes, RecipeAttr::NameFull, &keys, mutual_exclusion)
    }

    /// Recipes containing any of the named ingredients, or all of them with
    /// `mutual_exclusion`.
    pub fn filter_by_ingredients(
        &self,
        names: &[&str],
        mutual_exclusion: bool,
    ) -> Result<Vec<Recipe>, OrganizerError> {
        let keys: Vec<FilterKey> = names.iter().map(|n| FilterKey::from(*n)).collect();
        organizer::filter_by(
            &self.recipes,
            RecipeAttr::Ingredients,
            &keys,
            mutual_exclusion,
        )
    }

    /// Recipes whose difficulty equals any of the given levels. Recipes with
    /// no difficulty set never match.
    pub fn filter_by_difficulty(
        &self,
        levels: &[Difficulty],
    ) -> Result<Vec<Recipe>, OrganizerError> {
        let keys: Vec<FilterKey> = levels.iter().map(|d| FilterKey::from(*d)).collect();
        organizer::filter_by(&self.recipes, RecipeAttr::Difficulty, &keys, false)
    }

    /// Recipes whose estimated time equals any of the given durations.
    pub fn filter_by_estimated_time(
        &self,
        minutes: &[u32],
    ) -> Result<Vec<Recipe>, OrganizerError> {
        let keys: Vec<FilterKey> = minutes.iter().map(|m| FilterKey::from(*m as i64)).collect();
        organizer::filter_by(&self.recipes, RecipeAttr::EstimatedTime, &keys, false)
    }
}
