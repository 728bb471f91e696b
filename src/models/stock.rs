use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, ToSchema)]
pub struct Stock {
    pub stockid: i64,
    pub name: String,
    pub price: i64,
    pub company: String,
}

/// Body of create and update requests. Missing fields decode to their zero
/// value and any `stockid` sent by the caller is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(default)]
pub struct StockInput {
    pub name: String,
    pub price: i64,
    pub company: String,
}

impl StockInput {
    pub fn into_stock(self, stockid: i64) -> Stock {
        Stock {
            stockid,
            name: self.name,
            price: self.price,
            company: self.company,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StockResponse {
    #[serde(skip_serializing_if = "is_zero")]
    pub id: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub message: String,
}

impl StockResponse {
    pub fn created(id: i64) -> Self {
        Self {
            id,
            message: "Stock created successfully".into(),
        }
    }

    pub fn updated(id: i64, rows: u64) -> Self {
        Self {
            id,
            message: format!("Stock updated successfully. Total rows/records affected {rows}"),
        }
    }

    pub fn deleted(id: i64, rows: u64) -> Self {
        Self {
            id,
            message: format!("Stock deleted successfully. Total rows/records deleted {rows}"),
        }
    }
}

fn is_zero(n: &i64) -> bool {
    *n == 0
}
