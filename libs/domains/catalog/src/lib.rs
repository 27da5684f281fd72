//! Catalog Domain
//!
//! Products grouped into Categories behind a CRUD HTTP interface.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business logic, validation, category resolution
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (traits + implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs, validation rules
//! └─────────────┘
//! ```
//!
//! Every Product write runs the same gauntlet: identity check (updates),
//! field rules, the stock rule, then resolution of the referenced Category.
//! Deleting a Category cascades to its Products as one transaction.
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_catalog::{
//!     handlers,
//!     repository::InMemoryCatalog,
//!     service::{CategoryService, ProductService},
//! };
//!
//! // Create repositories and services
//! let catalog = InMemoryCatalog::new();
//! let categories = CategoryService::new(catalog.categories());
//! let products = ProductService::new(catalog.products(), catalog.categories());
//!
//! // Create Axum routers
//! let categories_router = handlers::categories_router(categories);
//! let products_router = handlers::products_router(products);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod validation;

// Re-export commonly used types
pub use error::{CatalogError, CatalogResult};
pub use models::{
    Category, CategoryWithProducts, CreateCategory, CreateProduct, Product, UpdateCategory,
    UpdateProduct,
};
pub use postgres::{PgCategoryRepository, PgProductRepository};
pub use repository::{
    CategoryRepository, InMemoryCatalog, InMemoryCategoryRepository, InMemoryProductRepository,
    ProductRepository,
};
pub use service::{CategoryService, ProductService};
pub use validation::{ValidationLimits, Violation};
