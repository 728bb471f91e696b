use std::sync::Arc;

use crate::db::StockRepository;

#[derive(Clone)]
pub struct AppState {
    pub stocks: Arc<dyn StockRepository>,
}

impl AppState {
    pub fn new(stocks: impl StockRepository + 'static) -> Self {
        Self {
            stocks: Arc::new(stocks),
        }
    }
}
