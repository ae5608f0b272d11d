//! Category service
//!
//! Enforces case-insensitive name uniqueness on create and rename, and
//! refuses to delete a category that any expense still points at.

use crate::audit::EntityType;
use crate::error::{MoneyTrackError, MoneyTrackResult};
use crate::models::category::{DEFAULT_CATEGORY_COLOR, DEFAULT_CATEGORY_ICON};
use crate::models::{Category, CategoryId};
use crate::storage::Storage;

pub struct CategoryService<'a> {
    storage: &'a Storage,
}

/// Fields to change on a category; `None` leaves a field as is
#[derive(Debug, Clone, Default)]
pub struct UpdateCategoryInput {
    pub name: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

impl<'a> CategoryService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn create(
        &self,
        name: &str,
        color: Option<&str>,
        icon: Option<&str>,
    ) -> MoneyTrackResult<Category> {
        let name = name.trim();
        self.ensure_name_available(name, None)?;

        let category = Category::with_style(
            name,
            color.unwrap_or(DEFAULT_CATEGORY_COLOR).trim(),
            icon.unwrap_or(DEFAULT_CATEGORY_ICON).trim(),
        );

        category
            .validate()
            .map_err(|e| MoneyTrackError::Validation(e.to_string()))?;

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        self.storage.log_create(
            EntityType::Category,
            category.id.to_string(),
            Some(category.name.clone()),
            &category,
        )?;

        tracing::info!(name = %category.name, "category created");
        Ok(category)
    }

    pub fn get(&self, id: CategoryId) -> MoneyTrackResult<Option<Category>> {
        self.storage.categories.get(id)
    }

    /// Find by name (case-insensitive), full UUID or short display ID
    pub fn find(&self, identifier: &str) -> MoneyTrackResult<Option<Category>> {
        self.storage.categories.find(identifier)
    }

    /// Like [`find`](Self::find) but a missing category is an error
    pub fn require(&self, identifier: &str) -> MoneyTrackResult<Category> {
        self.find(identifier)?
            .ok_or_else(|| MoneyTrackError::category_not_found(identifier))
    }

    /// All categories in stored order
    pub fn list(&self) -> MoneyTrackResult<Vec<Category>> {
        self.storage.categories.get_all()
    }

    /// Number of expenses pointing at a category
    pub fn usage_count(&self, id: CategoryId) -> MoneyTrackResult<usize> {
        self.storage.expenses.count_by_category(id)
    }

    pub fn update(&self, id: CategoryId, input: UpdateCategoryInput) -> MoneyTrackResult<Category> {
        let mut category = self
            .storage
            .categories
            .get(id)?
            .ok_or_else(|| MoneyTrackError::category_not_found(id.to_string()))?;

        let before = category.clone();

        if let Some(name) = input.name {
            let name = name.trim();
            self.ensure_name_available(name, Some(id))?;
            category.name = name.to_string();
        }
        if let Some(color) = input.color {
            category.color = color.trim().to_string();
        }
        if let Some(icon) = input.icon {
            category.icon = icon.trim().to_string();
        }

        category
            .validate()
            .map_err(|e| MoneyTrackError::Validation(e.to_string()))?;

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        self.storage.log_update(
            EntityType::Category,
            category.id.to_string(),
            Some(category.name.clone()),
            &before,
            &category,
        )?;

        Ok(category)
    }

    /// Delete a category no expense refers to
    ///
    /// A referenced category is never removed; the error carries the number
    /// of referencing expenses.
    pub fn delete(&self, id: CategoryId) -> MoneyTrackResult<Category> {
        let category = self
            .storage
            .categories
            .get(id)?
            .ok_or_else(|| MoneyTrackError::category_not_found(id.to_string()))?;

        let expense_count = self.usage_count(id)?;
        if expense_count > 0 {
            return Err(MoneyTrackError::CategoryInUse {
                name: category.name,
                expense_count,
            });
        }

        self.storage.categories.delete(id)?;
        self.storage.categories.save()?;

        self.storage.log_delete(
            EntityType::Category,
            category.id.to_string(),
            Some(category.name.clone()),
            &category,
        )?;

        tracing::info!(name = %category.name, "category deleted");
        Ok(category)
    }

    fn ensure_name_available(
        &self,
        name: &str,
        current: Option<CategoryId>,
    ) -> MoneyTrackResult<()> {
        match self.storage.categories.get_by_name(name)? {
            Some(existing) if Some(existing.id) != current => Err(MoneyTrackError::Duplicate {
                entity_type: "Category",
                identifier: name.to_string(),
            }),
            _ => Ok(()),
        }
    }
}
