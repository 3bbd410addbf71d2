use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One way to replace an ingredient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitution {
    pub substitute: String,
    pub ratio: String,
    pub notes: String,
}

/// A named group of common ingredient words (`dairy`, `proteins`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientCategory {
    pub name: String,
    pub ingredients: Vec<String>,
}

/// Ingredient to substitutions. Serializes as a JSON object in insertion order.
pub type SubstitutionMap = IndexMap<String, Vec<Substitution>>;
