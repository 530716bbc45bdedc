//! MySQL implementation of the CategoryRepository trait.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::mysql::MySqlRow;

use wh_core::domain::entities::category::{Category, CategoryUpdate, NewCategory};
use wh_core::errors::DomainError;
use wh_core::repositories::CategoryRepository;

use super::row::get;
use super::row::is_duplicate;
use crate::database::{Database, Params};

const COLUMNS: &str = "id, name, description, is_active, created_at, updated_at";
const NAME_INDEX: &str = "uq_crm_categories_name";

pub struct MySqlCategoryRepository {
    db: Database,
}

impl MySqlCategoryRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn from_row(row: &MySqlRow) -> Result<Category, DomainError> {
        Ok(Category {
            id: get(row, "id")?,
            name: get(row, "name")?,
            description: get(row, "description")?,
            is_active: get(row, "is_active")?,
            created_at: get(row, "created_at")?,
            updated_at: get(row, "updated_at")?,
        })
    }

    async fn find_one(&self, filter: &str, params: Params) -> Result<Option<Category>, DomainError> {
        let sql = format!("SELECT {} FROM crm_categories WHERE {} LIMIT 1", COLUMNS, filter);
        let rows = self.db.execute_query(&sql, &params).await?;
        rows.first().map(Self::from_row).transpose()
    }
}

#[async_trait]
impl CategoryRepository for MySqlCategoryRepository {
    async fn list(&self, is_active: Option<bool>) -> Result<Vec<Category>, DomainError> {
        let mut sql = format!("SELECT {} FROM crm_categories", COLUMNS);
        let mut params = Params::new();
        if let Some(active) = is_active {
            sql.push_str(" WHERE is_active = @isActive");
            params = params.with("isActive", active);
        }
        sql.push_str(" ORDER BY name ASC, id ASC");

        let rows = self.db.execute_query(&sql, &params).await?;
        rows.iter().map(Self::from_row).collect()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, DomainError> {
        self.find_one("id = @id", Params::new().with("id", id)).await
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, DomainError> {
        // Column collation is case-insensitive
        self.find_one("name = @name", Params::new().with("name", name)).await
    }

    async fn create(&self, category: NewCategory) -> Result<Category, DomainError> {
        let now = Utc::now();
        let params = Params::new()
            .with("name", category.name.as_str())
            .with("description", category.description.clone())
            .with("isActive", category.is_active)
            .with("now", now);

        let result = self
            .db
            .execute_statement(
                "INSERT INTO crm_categories (name, description, is_active, created_at, updated_at) \
                 VALUES (@name, @description, @isActive, @now, @now)",
                &params,
            )
            .await
            .map_err(|e| {
                if is_duplicate(&e, NAME_INDEX) {
                    DomainError::business_rule("Category name already exists")
                } else {
                    e.into()
                }
            })?;

        Ok(Category {
            id: result.last_insert_id() as i64,
            name: category.name,
            description: category.description,
            is_active: category.is_active,
            created_at: now,
            updated_at: now,
        })
    }

    async fn update(&self, id: i64, update: CategoryUpdate) -> Result<Option<Category>, DomainError> {
        let mut category = match self.find_by_id(id).await? {
            Some(category) => category,
            None => return Ok(None),
        };
        update.apply_to(&mut category, Utc::now());

        let params = Params::new()
            .with("id", id)
            .with("name", category.name.as_str())
            .with("description", category.description.clone())
            .with("isActive", category.is_active)
            .with("updatedAt", category.updated_at);
        self.db
            .execute_statement(
                "UPDATE crm_categories SET name = @name, description = @description, \
                 is_active = @isActive, updated_at = @updatedAt WHERE id = @id",
                &params,
            )
            .await
            .map_err(|e| {
                if is_duplicate(&e, NAME_INDEX) {
                    DomainError::business_rule("Category name already exists")
                } else {
                    e.into()
                }
            })?;

        Ok(Some(category))
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let result = self
            .db
            .execute_statement("DELETE FROM crm_categories WHERE id = @id", &Params::new().with("id", id))
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count_batches(&self, id: i64) -> Result<i64, DomainError> {
        let rows = self
            .db
            .execute_query(
                "SELECT COUNT(*) AS total FROM crm_import_batches WHERE category_id = @id",
                &Params::new().with("id", id),
            )
            .await?;
        match rows.first() {
            Some(row) => get(row, "total"),
            None => Ok(0),
        }
    }
}
