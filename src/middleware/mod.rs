pub mod extract;

pub use extract::{JsonBody, StockId};
