use serde::Deserialize;
use validator::Validate;
use wh_core::{CategoryUpdate, NewCategory};

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    #[validate(length(max = 100, message = "Category name must be at most 100 characters"))]
    pub name: String,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

impl From<CreateCategoryRequest> for NewCategory {
    fn from(request: CreateCategoryRequest) -> Self {
        NewCategory {
            name: request.name,
            description: request.description,
            is_active: request.is_active.unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryRequest {
    #[validate(length(max = 100, message = "Category name must be at most 100 characters"))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

impl From<UpdateCategoryRequest> for CategoryUpdate {
    fn from(request: UpdateCategoryRequest) -> Self {
        CategoryUpdate {
            name: request.name,
            description: request.description,
            is_active: request.is_active,
        }
    }
}
