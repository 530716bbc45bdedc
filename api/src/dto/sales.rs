use serde::{Deserialize, Serialize};
use validator::Validate;
use wh_core::{NewSaleLine, SaleRequest};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SaleItemRequest {
    pub product_id: i64,
    /// Falls back to the product's selling price
    #[serde(alias = "salePrice")]
    #[validate(range(
        min = 0i64,
        max = 1000000000000i64,
        message = "Unit price must be between 0 and 1000000000000"
    ))]
    pub unit_price: Option<i64>,
}

/// Body of `POST /api/sales`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSaleRequest {
    #[validate(length(max = 255, message = "Customer name must be at most 255 characters"))]
    pub customer_name: Option<String>,
    #[validate(length(max = 20, message = "Customer phone must be at most 20 characters"))]
    pub customer_phone: Option<String>,
    #[validate(length(max = 32, message = "Payment method must be at most 32 characters"))]
    pub payment_method: Option<String>,
    pub notes: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, message = "At least one item is required"), nested)]
    pub items: Vec<SaleItemRequest>,
}

impl From<CreateSaleRequest> for SaleRequest {
    fn from(request: CreateSaleRequest) -> Self {
        SaleRequest {
            customer_name: request.customer_name,
            customer_phone: request.customer_phone,
            payment_method: request.payment_method,
            notes: request.notes,
            items: request
                .items
                .into_iter()
                .map(|item| NewSaleLine {
                    product_id: item.product_id,
                    unit_price: item.unit_price,
                })
                .collect(),
        }
    }
}
