use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    ValidatedJson,
    errors::responses::{
        BadRequestValidationResponse, InternalServerErrorResponse, NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::CatalogResult;
use crate::models::{
    Category, CategoryWithProducts, CreateCategory, CreateProduct, Product, UpdateCategory,
    UpdateProduct,
};
use crate::repository::{CategoryRepository, ProductRepository};
use crate::service::{CategoryService, ProductService};
use crate::validation::Violation;

/// OpenAPI documentation for the Categories API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_categories,
        list_categories_with_products,
        create_category,
        get_category,
        update_category,
        delete_category,
    ),
    components(
        schemas(Category, CategoryWithProducts, CreateCategory, UpdateCategory),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "categorias", description = "Category management endpoints")
    )
)]
pub struct CategoriesApiDoc;

/// OpenAPI documentation for the Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        delete_product,
    ),
    components(
        schemas(Product, CreateProduct, UpdateProduct, Violation),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "produtos", description = "Product management endpoints")
    )
)]
pub struct ProductsApiDoc;

/// Create the category router with all HTTP endpoints
pub fn categories_router<R: CategoryRepository + 'static>(
    service: CategoryService<R>,
) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route("/produtos", get(list_categories_with_products))
        .route(
            "/{id}",
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        )
        .with_state(shared_service)
}

/// Create the product router with all HTTP endpoints
pub fn products_router<P, C>(service: ProductService<P, C>) -> Router
where
    P: ProductRepository + 'static,
    C: CategoryRepository + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(shared_service)
}

/// List all categories
#[utoipa::path(
    get,
    path = "",
    tag = "categorias",
    responses(
        (status = 200, description = "List of categories", body = Vec<Category>),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_categories<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
) -> CatalogResult<Json<Vec<Category>>> {
    let categories = service.list_categories().await?;
    Ok(Json(categories))
}

/// List all categories with their products eagerly loaded
#[utoipa::path(
    get,
    path = "/produtos",
    tag = "categorias",
    responses(
        (status = 200, description = "Categories with their products", body = Vec<CategoryWithProducts>),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_categories_with_products<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
) -> CatalogResult<Json<Vec<CategoryWithProducts>>> {
    let categories = service.list_categories_with_products().await?;
    Ok(Json(categories))
}

/// Create a new category
#[utoipa::path(
    post,
    path = "",
    tag = "categorias",
    request_body = CreateCategory,
    responses(
        (status = 201, description = "Category created successfully", body = Category),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateCategory>,
) -> CatalogResult<impl IntoResponse> {
    let category = service.create_category(input).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// Get a category by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "categorias",
    params(
        ("id" = i32, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category found", body = Category),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    Path(id): Path<i32>,
) -> CatalogResult<Json<Category>> {
    let category = service.get_category(id).await?;
    Ok(Json(category))
}

/// Update a category (the name is the only editable attribute)
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "categorias",
    params(
        ("id" = i32, Path, description = "Category ID")
    ),
    request_body = UpdateCategory,
    responses(
        (status = 200, description = "Category updated successfully", body = Category),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    Path(id): Path<i32>,
    ValidatedJson(input): ValidatedJson<UpdateCategory>,
) -> CatalogResult<Json<Category>> {
    let category = service.update_category(id, input).await?;
    Ok(Json(category))
}

/// Delete a category, cascading to its products
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "categorias",
    params(
        ("id" = i32, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category deleted, returns the deleted entity", body = Category),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    Path(id): Path<i32>,
) -> CatalogResult<Json<Category>> {
    let category = service.delete_category(id).await?;
    Ok(Json(category))
}

/// List all products
#[utoipa::path(
    get,
    path = "",
    tag = "produtos",
    responses(
        (status = 200, description = "List of products", body = Vec<Product>),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<P, C>(
    State(service): State<Arc<ProductService<P, C>>>,
) -> CatalogResult<Json<Vec<Product>>>
where
    P: ProductRepository,
    C: CategoryRepository,
{
    let products = service.list_products().await?;
    Ok(Json(products))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = "produtos",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created successfully", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<P, C>(
    State(service): State<Arc<ProductService<P, C>>>,
    Json(input): Json<CreateProduct>,
) -> CatalogResult<impl IntoResponse>
where
    P: ProductRepository,
    C: CategoryRepository,
{
    let product = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "produtos",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<P, C>(
    State(service): State<Arc<ProductService<P, C>>>,
    Path(id): Path<i32>,
) -> CatalogResult<Json<Product>>
where
    P: ProductRepository,
    C: CategoryRepository,
{
    let product = service.get_product(id).await?;
    Ok(Json(product))
}

/// Update a product by full replacement of its mutable fields
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "produtos",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated successfully", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<P, C>(
    State(service): State<Arc<ProductService<P, C>>>,
    Path(id): Path<i32>,
    Json(input): Json<UpdateProduct>,
) -> CatalogResult<Json<Product>>
where
    P: ProductRepository,
    C: CategoryRepository,
{
    let product = service.update_product(id, input).await?;
    Ok(Json(product))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "produtos",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deleted, returns the deleted entity", body = Product),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<P, C>(
    State(service): State<Arc<ProductService<P, C>>>,
    Path(id): Path<i32>,
) -> CatalogResult<Json<Product>>
where
    P: ProductRepository,
    C: CategoryRepository,
{
    let product = service.delete_product(id).await?;
    Ok(Json(product))
}
