//! In-memory recipe catalog.
//!
//! The catalog is built once at startup from the SQLite database and never
//! mutated afterwards, so handlers share it behind an `Arc` without locking.

use crate::models::{CategoryCount, Recipe, RecipeSummary};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct RecipeCatalog {
    /// Sorted by name, then id.
    recipes: Vec<Recipe>,
    complete_count: usize,
}

impl RecipeCatalog {
    pub fn new(mut recipes: Vec<Recipe>) -> Self {
        recipes.sort_by(|a, b| {
            a.name()
                .cmp(b.name())
                .then_with(|| a.id().to_string().cmp(&b.id().to_string()))
        });
        let complete_count = recipes.iter().filter(|r| r.is_complete()).count();

        Self {
            recipes,
            complete_count,
        }
    }

    /// Every recipe, complete or not.
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn complete_count(&self) -> usize {
        self.complete_count
    }

    pub fn complete(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.iter().filter(|r| r.is_complete())
    }

    /// One page of complete recipes. `page` is 1-based.
    pub fn page(&self, page: u32, limit: u32) -> Vec<RecipeSummary> {
        let offset = (page.saturating_sub(1) as usize).saturating_mul(limit as usize);
        self.complete()
            .skip(offset)
            .take(limit as usize)
            .map(|r| r.summary.clone())
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id().to_string() == id)
    }

    /// Complete recipes matching any of `terms`, in name order.
    pub fn search<S: AsRef<str>>(&self, terms: &[S], limit: usize) -> Vec<RecipeSummary> {
        let needles: Vec<String> = terms
            .iter()
            .map(|t| t.as_ref().to_ascii_lowercase())
            .collect();

        self.complete()
            .filter(|r| needles.iter().any(|n| r.matches(n)))
            .take(limit)
            .map(|r| r.summary.clone())
            .collect()
    }

    /// Categories with the number of complete recipes in each,
    /// most populated first, ties by name.
    pub fn categories(&self) -> Vec<CategoryCount> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for recipe in self.complete() {
            for category in &recipe.categories {
                *counts.entry(category.as_str()).or_default() += 1;
            }
        }

        let mut categories: Vec<CategoryCount> = counts
            .into_iter()
            .map(|(name, count)| CategoryCount {
                name: name.to_string(),
                count,
            })
            .collect();
        categories.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
        categories
    }
}
