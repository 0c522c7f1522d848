//! Ingredient value type.
//!
//! An ingredient is a normalized named quantity: lowercase name, positive
//! measure, lowercase unit. Countable articles (eggs, apples) omit the unit
//! and get the `pcs.` token instead.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RecipeError;

/// Unit token for countable articles with no measurement unit.
pub const COUNTABLE_UNIT: &str = "pcs.";

/// A single ingredient of a recipe.
///
/// Constructed through [`Ingredient::new`] so the invariants hold for every
/// value in circulation: non-empty lowercase `name`, finite `measure > 0`,
/// lowercase non-empty `unit`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "IngredientRecord", into = "IngredientRecord")]
pub struct Ingredient {
    name: String,
    measure: f64,
    unit: String,
}

/// Wire form of an [`Ingredient`], exactly the `{name, measure, unit}` keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IngredientRecord {
    pub name: String,
    pub measure: f64,
    #[serde(default)]
    pub unit: String,
}

impl Ingredient {
    /// Create a validated, normalized ingredient.
    ///
    /// `name` and `unit` are lowercased; an empty `unit` marks a countable
    /// article and becomes [`COUNTABLE_UNIT`].
    pub fn new(name: &str, measure: f64, unit: &str) -> Result<Self, RecipeError> {
        if name.trim().is_empty() {
            return Err(RecipeError::EmptyName);
        }
        if !measure.is_finite() {
            return Err(RecipeError::NonFiniteMeasure(measure));
        }
        if measure <= 0.0 {
            return Err(RecipeError::NonPositiveMeasure(measure));
        }

        let unit = unit.trim();
        Ok(Self {
            name: name.trim().to_lowercase(),
            measure,
            unit: if unit.is_empty() {
                COUNTABLE_UNIT.to_string()
            } else {
                unit.to_lowercase()
            },
        })
    }

    /// Shorthand for a countable article, e.g. `Ingredient::countable("jajka", 5.0)`.
    pub fn countable(name: &str, measure: f64) -> Result<Self, RecipeError> {
        Self::new(name, measure, "")
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn measure(&self) -> f64 {
        self.measure
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.name)?;
        // Whole measures print without a decimal point
        if self.measure.fract() == 0.0 {
            write!(f, "{}", self.measure as i64)?;
        } else {
            write!(f, "{}", self.measure)?;
        }
        write!(f, " {}", self.unit)
    }
}

impl TryFrom<IngredientRecord> for Ingredient {
    type Error = RecipeError;

    fn try_from(record: IngredientRecord) -> Result<Self, Self::Error> {
        Ingredient::new(&record.name, record.measure, &record.unit)
    }
}

impl From<Ingredient> for IngredientRecord {
    fn from(ingredient: Ingredient) -> Self {
        IngredientRecord {
            name: ingredient.name,
            measure: ingredient.measure,
            unit: ingredient.unit,
        }
    }
}
