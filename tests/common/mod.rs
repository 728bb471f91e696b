#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Mutex;

use axum::{
    async_trait,
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use stocks_api::{
    db::StockRepository,
    error::AppError,
    models::{Stock, StockInput},
    routes,
    state::AppState,
};

/// In-process stand-in for the `stocks` table.
#[derive(Default)]
pub struct MemoryStockRepository {
    rows: Mutex<BTreeMap<i64, Stock>>,
    next_id: Mutex<i64>,
}

#[async_trait]
impl StockRepository for MemoryStockRepository {
    async fn insert(&self, stock: &StockInput) -> Result<i64, AppError> {
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let id = *next_id;
        self.rows.lock().unwrap().insert(id, stock.clone().into_stock(id));
        Ok(id)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Stock>, AppError> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Stock>, AppError> {
        // Newest first, so callers cannot rely on insertion order.
        Ok(self.rows.lock().unwrap().values().rev().cloned().collect())
    }

    async fn update_by_id(&self, id: i64, stock: &StockInput) -> Result<u64, AppError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.get_mut(&id) {
            Some(row) => {
                *row = stock.clone().into_stock(id);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_by_id(&self, id: i64) -> Result<u64, AppError> {
        Ok(self.rows.lock().unwrap().remove(&id).map_or(0, |_| 1))
    }
}

/// Repository whose every call fails the way a dropped database would.
pub struct UnavailableRepository;

#[async_trait]
impl StockRepository for UnavailableRepository {
    async fn insert(&self, _: &StockInput) -> Result<i64, AppError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn find_by_id(&self, _: i64) -> Result<Option<Stock>, AppError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn find_all(&self) -> Result<Vec<Stock>, AppError> {
        Err(AppError::Timeout)
    }

    async fn update_by_id(&self, _: i64, _: &StockInput) -> Result<u64, AppError> {
        Err(sqlx::Error::RowNotFound.into())
    }

    async fn delete_by_id(&self, _: i64) -> Result<u64, AppError> {
        Err(sqlx::Error::PoolClosed.into())
    }
}

pub fn app() -> Router {
    routes::router(AppState::new(MemoryStockRepository::default()))
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.map_or_else(Body::empty, |b| Body::from(b.to_owned())))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };

    (status, value)
}
