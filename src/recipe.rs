//! Recipe aggregate and its wire form.
//!
//! A recipe carries a full name, at least two ingredients and a description,
//! plus optional difficulty, estimated time and related links. The derived
//! `name_compressed` is a filesystem-safe short identifier. Construction
//! goes through [`RecipeBuilder`] so every `Recipe` in circulation is
//! validated.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::difficulty::Difficulty;
use crate::error::{OrganizerError, RecipeError};
use crate::ingredient::Ingredient;
use crate::organizer::{AttrKind, AttrSpec, AttrValue, Attributed};

/// Hyperlinks related to a recipe: a single link or a list of links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelatedLinks {
    One(String),
    Many(Vec<String>),
}

/// Compress a recipe name into a short identifier.
///
/// Punctuation and digits are stripped first. A single-word name becomes the
/// capitalized word; a multi-word name becomes the concatenation of each
/// word's first two letters, capitalized (`"Puszyste placki"` -> `"PuPl"`).
pub fn compress_name(name: &str) -> Result<String, RecipeError> {
    let cleaned: String = name
        .chars()
        .filter(|c| !c.is_ascii_punctuation() && !c.is_ascii_digit())
        .collect();
    let words: Vec<&str> = cleaned.split_whitespace().collect();

    match words.len() {
        0 => Err(RecipeError::NoWordCharacters(name.to_string())),
        1 => Ok(capitalize(words[0])),
        _ => Ok(words
            .iter()
            .map(|word| capitalize(&word.chars().take(2).collect::<String>()))
            .collect()),
    }
}

/// Uppercase the first letter, lowercase the rest.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(|c| c.to_lowercase()))
            .collect(),
        None => String::new(),
    }
}

/// A single validated recipe.
#[derive(Debug, Clone)]
pub struct Recipe {
    name_full: String,
    name_compressed: String,
    ingredients: Vec<Ingredient>,
    description: String,
    estimated_time: Option<u32>,
    difficulty: Option<Difficulty>,
    related_links: Option<RelatedLinks>,
}

impl Recipe {
    /// Start building a recipe with the given full name.
    pub fn builder(name: &str) -> RecipeBuilder {
        RecipeBuilder::new(name)
    }

    /// Rebuild a recipe from its wire form, re-running full validation.
    pub fn from_record(record: RecipeRecord) -> Result<Self, RecipeError> {
        let mut builder = Recipe::builder(&record.name_full)
            .ingredients(record.ingredients)
            .description(&record.description);
        if let Some(time) = record.estimated_time {
            builder = builder.estimated_time(time);
        }
        if let Some(difficulty) = record.difficulty {
            builder = builder.difficulty(difficulty);
        }
        if let Some(links) = record.related_links {
            builder = builder.related_links(links);
        }
        builder.build()
    }

    /// Convert to the wire form covering exactly the primary attribute set.
    pub fn to_record(&self) -> RecipeRecord {
        RecipeRecord {
            name_full: self.name_full.clone(),
            ingredients: self.ingredients.clone(),
            description: self.description.clone(),
            estimated_time: self.estimated_time,
            difficulty: self.difficulty,
            related_links: self.related_links.clone(),
        }
    }

    pub fn name_full(&self) -> &str {
        &self.name_full
    }

    /// Short identifier derived from the name, used as the storage id.
    pub fn name_compressed(&self) -> &str {
        &self.name_compressed
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn estimated_time(&self) -> Option<u32> {
        self.estimated_time
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    pub fn related_links(&self) -> Option<&RelatedLinks> {
        self.related_links.as_ref()
    }
}

/// Equality over the primary attribute set; `name_compressed` is derived
/// from `name_full` and not compared.
impl PartialEq for Recipe {
    fn eq(&self, other: &Self) -> bool {
        self.name_full == other.name_full
            && self.ingredients == other.ingredients
            && self.description == other.description
            && self.estimated_time == other.estimated_time
            && self.difficulty == other.difficulty
            && self.related_links == other.related_links
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n\n", self.name_full)?;

        if let Some(difficulty) = self.difficulty {
            write!(f, "Difficulty: {difficulty}\n\n")?;
        }
        if let Some(time) = self.estimated_time {
            write!(f, "Estimated time: {time} min\n\n")?;
        }

        write!(f, "Ingredients:")?;
        for ingredient in &self.ingredients {
            write!(f, "\n\t- {ingredient}")?;
        }
        write!(f, "\n\n")?;

        write!(f, "Description:\n{}", self.description)?;

        match &self.related_links {
            Some(RelatedLinks::Many(links)) => {
                write!(f, "\nRelated links:")?;
                for link in links {
                    write!(f, "\n\t{link}")?;
                }
            }
            Some(RelatedLinks::One(link)) => {
                write!(f, "\n\nRelated links: {link}")?;
            }
            None => {}
        }

        Ok(())
    }
}

/// Builder for [`Recipe`]; `build` runs all validation.
#[derive(Debug, Clone)]
pub struct RecipeBuilder {
    name: String,
    ingredients: Vec<Ingredient>,
    description: Option<String>,
    paragraphs: Vec<String>,
    estimated_time: Option<u32>,
    difficulty: Option<Difficulty>,
    related_links: Option<RelatedLinks>,
}

impl RecipeBuilder {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ingredients: Vec::new(),
            description: None,
            paragraphs: Vec::new(),
            estimated_time: None,
            difficulty: None,
            related_links: None,
        }
    }

    pub fn ingredient(mut self, ingredient: Ingredient) -> Self {
        self.ingredients.push(ingredient);
        self
    }

    pub fn ingredients(mut self, ingredients: Vec<Ingredient>) -> Self {
        self.ingredients.extend(ingredients);
        self
    }

    /// Set the description verbatim. Overrides any added paragraphs.
    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Add one description paragraph. Paragraphs are joined tab-indented,
    /// one per line.
    pub fn paragraph(mut self, paragraph: &str) -> Self {
        self.paragraphs.push(paragraph.to_string());
        self
    }

    pub fn estimated_time(mut self, minutes: u32) -> Self {
        self.estimated_time = Some(minutes);
        self
    }

    pub fn difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    pub fn related_link(mut self, link: &str) -> Self {
        self.related_links = Some(RelatedLinks::One(link.to_string()));
        self
    }

    pub fn related_links(mut self, links: RelatedLinks) -> Self {
        self.related_links = Some(links);
        self
    }

    pub fn build(self) -> Result<Recipe, RecipeError> {
        let name_compressed = compress_name(&self.name)?;

        if self.ingredients.len() < 2 {
            return Err(RecipeError::TooFewIngredients(self.ingredients.len()));
        }

        let description = match self.description {
            Some(description) => description,
            None if !self.paragraphs.is_empty() => {
                format!("\t{}\n", self.paragraphs.join("\n\t"))
            }
            None => return Err(RecipeError::MissingDescription),
        };

        if self.estimated_time == Some(0) {
            return Err(RecipeError::NonPositiveTime);
        }

        Ok(Recipe {
            name_full: self.name,
            name_compressed,
            ingredients: self.ingredients,
            description,
            estimated_time: self.estimated_time,
            difficulty: self.difficulty,
            related_links: self.related_links,
        })
    }
}

/// Wire form of a [`Recipe`]: exactly the primary attribute set, absent
/// optionals omitted, unknown keys rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RecipeRecord {
    pub name_full: String,
    pub ingredients: Vec<Ingredient>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_links: Option<RelatedLinks>,
}

/// Sortable/filterable attributes of a [`Recipe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeAttr {
    NameFull,
    NameCompressed,
    Ingredients,
    IngredientsCount,
    Description,
    EstimatedTime,
    Difficulty,
}

impl RecipeAttr {
    /// All attributes, in declaration order.
    pub const ALL: &'static [RecipeAttr] = &[
        RecipeAttr::NameFull,
        RecipeAttr::NameCompressed,
        RecipeAttr::Ingredients,
        RecipeAttr::IngredientsCount,
        RecipeAttr::Description,
        RecipeAttr::EstimatedTime,
        RecipeAttr::Difficulty,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecipeAttr::NameFull => "nameFull",
            RecipeAttr::NameCompressed => "nameCompressed",
            RecipeAttr::Ingredients => "ingredients",
            RecipeAttr::IngredientsCount => "ingredientsCount",
            RecipeAttr::Description => "description",
            RecipeAttr::EstimatedTime => "estimatedTime",
            RecipeAttr::Difficulty => "difficulty",
        }
    }
}

impl FromStr for RecipeAttr {
    type Err = OrganizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecipeAttr::ALL
            .iter()
            .find(|attr| attr.as_str() == s)
            .copied()
            .ok_or_else(|| OrganizerError::UnknownAttribute {
                name: s.to_string(),
                valid: RecipeAttr::ALL
                    .iter()
                    .map(|attr| attr.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

impl AttrSpec for RecipeAttr {
    fn kind(self) -> AttrKind {
        match self {
            RecipeAttr::NameFull | RecipeAttr::NameCompressed | RecipeAttr::Description => {
                AttrKind::Text
            }
            RecipeAttr::Ingredients => AttrKind::Collection,
            RecipeAttr::IngredientsCount | RecipeAttr::EstimatedTime | RecipeAttr::Difficulty => {
                AttrKind::Scalar
            }
        }
    }
}

impl Attributed for Recipe {
    type Attr = RecipeAttr;

    fn project(&self, attr: RecipeAttr) -> AttrValue {
        match attr {
            RecipeAttr::NameFull => AttrValue::Text(self.name_full.clone()),
            RecipeAttr::NameCompressed => AttrValue::Text(self.name_compressed.clone()),
            RecipeAttr::Ingredients => AttrValue::TextList(
                self.ingredients
                    .iter()
                    .map(|i| i.name().to_string())
                    .collect(),
            ),
            RecipeAttr::IngredientsCount => AttrValue::Int(self.ingredients.len() as i64),
            RecipeAttr::Description => AttrValue::Text(self.description.clone()),
            RecipeAttr::EstimatedTime => self
                .estimated_time
                .map(|t| AttrValue::Int(t as i64))
                .unwrap_or(AttrValue::Absent),
            RecipeAttr::Difficulty => self
                .difficulty
                .map(AttrValue::Difficulty)
                .unwrap_or(AttrValue::Absent),
        }
    }
}
