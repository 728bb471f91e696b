//! HTTP service exposing CRUD over the `stocks` table.
//!
//! Requests flow `routes` → `handlers` → `db::StockRepository` → PostgreSQL,
//! one SQL statement per request.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod openapi;
pub mod routes;
pub mod state;
