use axum::Router;
use domain_catalog::{PgCategoryRepository, PgProductRepository, ProductService, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    let products = PgProductRepository::new(state.db.clone());
    let categories = PgCategoryRepository::new(state.db.clone());
    let service = ProductService::with_limits(products, categories, state.config.limits);
    handlers::products_router(service)
}
