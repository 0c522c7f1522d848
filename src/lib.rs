//! Personal recipe catalog: validated recipe and ingredient value types, a
//! generic attribute-based sort/filter engine, and flat-file JSON
//! persistence behind a store trait.

pub mod catalog;
pub mod difficulty;
pub mod error;
pub mod ingredient;
pub mod organizer;
pub mod recipe;
pub mod store;

pub use catalog::Catalog;
pub use difficulty::Difficulty;
pub use error::{CatalogError, OrganizerError, RecipeError, StoreError};
pub use ingredient::{Ingredient, IngredientRecord, COUNTABLE_UNIT};
pub use organizer::{filter_by, sort_by, AttrKind, AttrSpec, AttrValue, Attributed, FilterKey};
pub use recipe::{compress_name, Recipe, RecipeAttr, RecipeBuilder, RecipeRecord, RelatedLinks};
pub use store::{DirStore, MemoryStore, RecipeStore};
