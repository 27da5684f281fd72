use axum::Router;
use domain_catalog::{CategoryService, PgCategoryRepository, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = PgCategoryRepository::new(state.db.clone());
    let service = CategoryService::new(repository);
    handlers::categories_router(service)
}
