pub mod stocks;

pub use stocks::{create_stock, delete_stock, get_all_stocks, get_stock, update_stock};
