//! Ingredient substitution table.

use crate::models::{IngredientCategory, Substitution, SubstitutionMap};
use serde::Deserialize;
use service_core::error::AppError;
use std::collections::HashSet;
use std::path::Path;

/// Table shipped with the binary.
const EMBEDDED_TABLE: &str = include_str!("../../data/substitutions.json");

#[derive(Debug, Deserialize)]
struct TableFile {
    substitutions: Vec<TableEntry>,
    #[serde(default)]
    categories: Vec<IngredientCategory>,
}

#[derive(Debug, Deserialize)]
struct TableEntry {
    ingredient: String,
    substitutes: Vec<Substitution>,
}

/// Read-only lookup from ingredient to replacements.
#[derive(Debug, Clone)]
pub struct SubstitutionTable {
    entries: SubstitutionMap,
    categories: Vec<IngredientCategory>,
}

impl SubstitutionTable {
    /// The table compiled into the binary.
    pub fn embedded() -> Result<Self, AppError> {
        Self::from_json(EMBEDDED_TABLE)
    }

    /// Load from `path` when given, otherwise use the embedded table.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|e| {
                    AppError::ConfigError(anyhow::anyhow!(
                        "Failed to read substitution table {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                Self::from_json(&raw)
            }
            None => Self::embedded(),
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, AppError> {
        let file: TableFile = serde_json::from_str(raw).map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!("Invalid substitution table: {}", e))
        })?;

        let mut seen = HashSet::new();
        let mut entries = SubstitutionMap::new();
        for entry in file.substitutions {
            let key = normalize(&entry.ingredient);
            if key.is_empty() {
                return Err(AppError::ConfigError(anyhow::anyhow!(
                    "Substitution table has an entry with an empty ingredient"
                )));
            }
            if !seen.insert(key.clone()) {
                return Err(AppError::ConfigError(anyhow::anyhow!(
                    "Substitution table lists '{}' more than once",
                    key
                )));
            }
            entries.insert(key, entry.substitutes);
        }

        Ok(Self {
            entries,
            categories: file.categories,
        })
    }

    /// The whole table, in table order.
    pub fn entries(&self) -> &SubstitutionMap {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Table keys in table order.
    pub fn ingredients(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn categories(&self) -> &[IngredientCategory] {
        &self.categories
    }

    /// Exact key first, then the first key (in table order) that contains
    /// the input or is contained by it.
    pub fn find(&self, ingredient: &str) -> Option<&[Substitution]> {
        let needle = normalize(ingredient);
        if needle.is_empty() {
            return None;
        }

        if let Some(subs) = self.entries.get(&needle) {
            return Some(subs.as_slice());
        }

        self.entries
            .iter()
            .find(|(key, _)| needle.contains(key.as_str()) || key.contains(needle.as_str()))
            .map(|(_, subs)| subs.as_slice())
    }

    /// Substitutions for each requested ingredient that resolves, keyed by
    /// the ingredient as requested.
    pub fn suggestions<S: AsRef<str>>(&self, ingredients: &[S]) -> SubstitutionMap {
        let mut found = SubstitutionMap::new();
        for ingredient in ingredients {
            let ingredient = ingredient.as_ref();
            if found.contains_key(ingredient) {
                continue;
            }
            if let Some(subs) = self.find(ingredient) {
                found.insert(ingredient.to_string(), subs.to_vec());
            }
        }
        found
    }

    /// Substitutions for the category's ingredient words, or `None` for an
    /// unknown category.
    pub fn category_substitutions(&self, category: &str) -> Option<SubstitutionMap> {
        let category = self
            .categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(category.trim()))?;
        Some(self.suggestions(&category.ingredients))
    }
}

fn normalize(ingredient: &str) -> String {
    ingredient.trim().to_lowercase()
}
