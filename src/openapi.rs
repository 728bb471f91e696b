use utoipa::OpenApi;

use crate::handlers::stocks;
use crate::models::{Stock, StockInput, StockResponse};

#[derive(OpenApi)]
#[openapi(
    info(title = "Stocks API", description = "CRUD over the stocks table"),
    paths(
        stocks::create_stock,
        stocks::get_stock,
        stocks::get_all_stocks,
        stocks::update_stock,
        stocks::delete_stock,
    ),
    components(schemas(Stock, StockInput, StockResponse)),
    tags((name = "stocks", description = "Stock records"))
)]
pub struct ApiDoc;
