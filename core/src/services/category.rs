//! Category management.

use std::sync::Arc;
use tracing::info;

use crate::domain::entities::category::{
    Category, CategoryUpdate, NewCategory, MAX_CATEGORY_NAME_LENGTH,
};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::CategoryRepository;

/// Service for the product categories shown on the dashboard
pub struct CategoryService {
    repository: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    pub fn new(repository: Arc<dyn CategoryRepository>) -> Self {
        Self { repository }
    }

    /// All categories ordered by name, optionally filtered by active flag
    pub async fn list(&self, is_active: Option<bool>) -> DomainResult<Vec<Category>> {
        self.repository.list(is_active).await
    }

    pub async fn get(&self, id: i64) -> DomainResult<Category> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Category"))
    }

    /// Create a category; names are unique ignoring case
    pub async fn create(&self, category: NewCategory) -> DomainResult<Category> {
        let category = NewCategory {
            name: clean_name(&category.name)?,
            description: clean_description(category.description),
            is_active: category.is_active,
        };
        if self.repository.find_by_name(&category.name).await?.is_some() {
            return Err(DomainError::business_rule("Category name already exists"));
        }

        let created = self.repository.create(category).await?;
        info!(category_id = created.id, name = %created.name, "Category created");
        Ok(created)
    }

    pub async fn update(&self, id: i64, update: CategoryUpdate) -> DomainResult<Category> {
        if update.is_empty() {
            return Err(DomainError::validation("No fields to update"));
        }
        let name = match update.name.as_deref() {
            Some(name) => {
                let name = clean_name(name)?;
                if let Some(existing) = self.repository.find_by_name(&name).await? {
                    if existing.id != id {
                        return Err(DomainError::business_rule("Category name already exists"));
                    }
                }
                Some(name)
            }
            None => None,
        };
        let update = CategoryUpdate {
            name,
            description: update.description.map(|d| d.trim().to_string()),
            is_active: update.is_active,
        };

        let updated = self
            .repository
            .update(id, update)
            .await?
            .ok_or_else(|| DomainError::not_found("Category"))?;
        info!(category_id = id, "Category updated");
        Ok(updated)
    }

    /// Delete a category that no batch refers to
    pub async fn delete(&self, id: i64) -> DomainResult<()> {
        self.get(id).await?;
        let batches = self.repository.count_batches(id).await?;
        if batches > 0 {
            return Err(DomainError::business_rule(format!(
                "Cannot delete category with {} existing batches",
                batches
            )));
        }
        if !self.repository.delete(id).await? {
            return Err(DomainError::not_found("Category"));
        }
        info!(category_id = id, "Category deleted");
        Ok(())
    }
}

fn clean_name(raw: &str) -> DomainResult<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(DomainError::validation("Category name is required"));
    }
    if name.chars().count() > MAX_CATEGORY_NAME_LENGTH {
        return Err(DomainError::validation(format!(
            "Category name must be at most {} characters",
            MAX_CATEGORY_NAME_LENGTH
        )));
    }
    Ok(name.to_string())
}

fn clean_description(raw: Option<String>) -> Option<String> {
    raw.map(|d| d.trim().to_string()).filter(|d| !d.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::InMemoryStore;

    fn service() -> CategoryService {
        CategoryService::new(Arc::new(InMemoryStore::new()))
    }

    fn new_category(name: &str, is_active: bool) -> NewCategory {
        NewCategory {
            name: name.to_string(),
            description: None,
            is_active,
        }
    }

    #[tokio::test]
    async fn test_list_ordered_and_filtered() {
        let service = service();
        service.create(new_category("Tai nghe", true)).await.unwrap();
        service.create(new_category("cáp sạc", false)).await.unwrap();
        service.create(new_category("Điện thoại", true)).await.unwrap();
        service.create(new_category("Apple", true)).await.unwrap();

        let all: Vec<String> = service.list(None).await.unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(all.first().map(String::as_str), Some("Apple"));
        assert_eq!(all.len(), 4);

        let active = service.list(Some(true)).await.unwrap();
        let inactive = service.list(Some(false)).await.unwrap();
        assert_eq!(active.len(), 3);
        assert_eq!(inactive.len(), 1);
        assert!(active.iter().all(|c| c.is_active));
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_name() {
        let service = service();
        service.create(new_category("Cáp", true)).await.unwrap();
        let err = service.create(new_category("  cáp ", true)).await.unwrap_err();
        assert_eq!(err, DomainError::business_rule("Category name already exists"));
    }

    #[tokio::test]
    async fn test_create_trims_and_validates() {
        let service = service();
        let created = service
            .create(NewCategory {
                name: "  iPhone  ".to_string(),
                description: Some("   ".to_string()),
                is_active: true,
            })
            .await
            .unwrap();
        assert_eq!(created.name, "iPhone");
        assert_eq!(created.description, None);

        let err = service.create(new_category(" ", true)).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_update_and_rename_conflict() {
        let service = service();
        let a = service.create(new_category("A-series", true)).await.unwrap();
        service.create(new_category("B-series", true)).await.unwrap();

        let renamed = service
            .update(a.id, CategoryUpdate { is_active: Some(false), ..Default::default() })
            .await
            .unwrap();
        assert!(!renamed.is_active);

        let err = service
            .update(a.id, CategoryUpdate { name: Some("b-series".into()), ..Default::default() })
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::business_rule("Category name already exists"));

        let err = service
            .update(999, CategoryUpdate { name: Some("C".into()), ..Default::default() })
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::not_found("Category"));
    }

    #[tokio::test]
    async fn test_delete() {
        let service = service();
        let a = service.create(new_category("Cáp", true)).await.unwrap();
        service.delete(a.id).await.unwrap();
        assert_eq!(service.get(a.id).await.unwrap_err(), DomainError::not_found("Category"));
        assert!(service.delete(a.id).await.is_err());
    }
}
