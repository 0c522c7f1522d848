use thiserror::Error;

/// Validation failures raised while constructing value types.
#[derive(Error, Debug)]
pub enum RecipeError {
    #[error("Ingredient name must not be empty")]
    EmptyName,

    #[error("Ingredient measure must be positive, got {0}")]
    NonPositiveMeasure(f64),

    #[error("Ingredient measure must be a finite number, got {0}")]
    NonFiniteMeasure(f64),

    #[error("A recipe needs at least 2 ingredients, got {0}")]
    TooFewIngredients(usize),

    #[error("A recipe needs a description")]
    MissingDescription,

    #[error("Estimated time must be positive")]
    NonPositiveTime,

    #[error("Recipe name {0:?} contains no word characters to compress")]
    NoWordCharacters(String),
}

/// Failures raised by the attribute sort/filter engine.
#[derive(Error, Debug)]
pub enum OrganizerError {
    #[error("No filter keys supplied")]
    NoKeys,

    #[error("Filter keys have mixed types; all keys must share one type")]
    MixedKeys,

    #[error("Filter keys of type {keys} do not match attribute values of type {values}")]
    KeyShape { keys: &'static str, values: &'static str },

    #[error("Mutual exclusion over a scalar attribute can never match more than one key")]
    Unsatisfiable,

    #[error("Unknown attribute {name:?}; valid attributes: {valid}")]
    UnknownAttribute { name: String, valid: String },
}

/// Failures raised by a recipe store backend.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("No stored recipe with id {0:?}")]
    NotFound(String),

    #[error("A recipe with id {0:?} is already stored")]
    AlreadyExists(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid recipe record: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures raised by catalog operations.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("A recipe named {0:?} already exists in the catalog")]
    DuplicateRecipe(String),

    #[error("No recipe named {0:?} in the catalog")]
    RecipeNotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Recipe(#[from] RecipeError),
}
