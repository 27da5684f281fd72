use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Catalogo API",
        version = "0.1.0",
        description = "CRUD API for a catalog of products grouped into categories"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = "/categorias", api = domain_catalog::handlers::CategoriesApiDoc),
        (path = "/produtos", api = domain_catalog::handlers::ProductsApiDoc)
    )
)]
pub struct ApiDoc;
