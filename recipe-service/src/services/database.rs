//! Read-only access to the bundled SQLite recipe database.

use crate::models::{ColumnValue, Instruction, Recipe, RecipeIngredient, RecipeSummary};
use crate::services::catalog::RecipeCatalog;
use service_core::error::AppError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, instrument, warn};

#[derive(Debug, FromRow)]
struct IngredientRow {
    recipe_id: ColumnValue,
    name: String,
    amount: Option<ColumnValue>,
    unit: Option<String>,
}

#[derive(Debug, FromRow)]
struct InstructionRow {
    recipe_id: ColumnValue,
    step_number: i64,
    instruction: String,
}

#[derive(Debug, FromRow)]
struct CategoryRow {
    recipe_id: ColumnValue,
    name: String,
}

/// Connection pool over the recipe database file.
#[derive(Clone)]
pub struct RecipeDb {
    pool: SqlitePool,
    path: PathBuf,
}

impl RecipeDb {
    /// Open the database read-only.
    ///
    /// A missing file is reported as `ServiceUnavailable` so callers can
    /// tell it apart from a corrupt or unreadable database.
    #[instrument(skip(path), fields(path = %path.display()))]
    pub async fn open(path: &Path) -> Result<Self, AppError> {
        if !path.exists() {
            return Err(AppError::ServiceUnavailable(format!(
                "Recipe database not found: {}",
                path.display()
            )));
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true)
            .create_if_missing(false);

        let pool = SqlitePoolOptions::new()
            .max_connections(2)
            .acquire_timeout(Duration::from_secs(10))
            .connect_with(options)
            .await
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!(
                    "Failed to open {}: {}",
                    path.display(),
                    e
                ))
            })?;

        info!("Recipe database opened");

        Ok(Self {
            pool,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check database health.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Health check failed: {}", e)))?;
        Ok(())
    }

    /// Read every recipe with its ingredients, instructions and categories.
    ///
    /// Ids and quantities are decoded by storage class, and child rows are
    /// joined on the id's text form.
    #[instrument(skip(self))]
    pub async fn load_catalog(&self) -> Result<RecipeCatalog, AppError> {
        let summaries = sqlx::query_as::<_, RecipeSummary>(
            r#"
            SELECT id, name, description, total_time, servings
            FROM recipes
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to load recipes: {}", e)))?;

        let ingredients = sqlx::query_as::<_, IngredientRow>(
            r#"
            SELECT ri.recipe_id AS recipe_id,
                   i.name AS name,
                   ri.amount AS amount,
                   ri.unit AS unit
            FROM recipe_ingredients ri
            JOIN ingredients i ON ri.ingredient_id = i.id
            ORDER BY i.name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to load ingredients: {}", e))
        })?;

        let instructions = sqlx::query_as::<_, InstructionRow>(
            r#"
            SELECT recipe_id,
                   CAST(step_number AS INTEGER) AS step_number,
                   instruction
            FROM instructions
            ORDER BY step_number
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to load instructions: {}", e))
        })?;

        let categories = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT DISTINCT rc.recipe_id AS recipe_id, c.name AS name
            FROM recipe_categories rc
            JOIN categories c ON rc.category_id = c.id
            ORDER BY c.name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to load categories: {}", e))
        })?;

        let mut recipes: HashMap<String, Recipe> = summaries
            .into_iter()
            .map(|summary| (summary.id.to_string(), Recipe::new(summary)))
            .collect();

        let mut orphans = 0usize;

        for row in ingredients {
            match recipes.get_mut(&row.recipe_id.to_string()) {
                Some(recipe) => recipe.ingredients.push(RecipeIngredient {
                    name: row.name,
                    amount: row.amount,
                    unit: row.unit,
                }),
                None => orphans += 1,
            }
        }

        for row in instructions {
            match recipes.get_mut(&row.recipe_id.to_string()) {
                Some(recipe) => recipe.instructions.push(Instruction {
                    step_number: row.step_number,
                    instruction: row.instruction,
                }),
                None => orphans += 1,
            }
        }

        for row in categories {
            match recipes.get_mut(&row.recipe_id.to_string()) {
                Some(recipe) => recipe.categories.push(row.name),
                None => orphans += 1,
            }
        }

        if orphans > 0 {
            warn!(orphans, "Skipped rows referencing unknown recipes");
        }

        let catalog = RecipeCatalog::new(recipes.into_values().collect());

        info!(
            recipes = catalog.len(),
            complete = catalog.complete_count(),
            "Recipe catalog loaded"
        );

        Ok(catalog)
    }

    /// Close the pool once the catalog is in memory.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
