//! Handler tests for the catalog domain
//!
//! These run the HTTP handlers against the in-memory repositories:
//! - Request deserialization (JSON → Rust structs)
//! - Response serialization (Rust structs → JSON)
//! - HTTP status codes and error bodies
//!
//! Unlike the integration tests, no database is involved.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_catalog::*;
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

fn catalog_app() -> Router {
    let catalog = InMemoryCatalog::new();

    Router::new()
        .nest(
            "/categorias",
            handlers::categories_router(CategoryService::new(catalog.categories())),
        )
        .nest(
            "/produtos",
            handlers::products_router(ProductService::new(
                catalog.products(),
                catalog.categories(),
            )),
        )
}

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn put(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Creates a category through the API and returns it
async fn seed_category(app: &Router) -> Category {
    let response = app
        .clone()
        .oneshot(post(
            "/categorias",
            json!({"nome": "Bebidas", "imagem_url": "bebidas.jpg"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response.into_body()).await
}

#[tokio::test]
async fn test_create_product_returns_201_and_round_trips() {
    let app = catalog_app();
    let category = seed_category(&app).await;

    let response = app
        .clone()
        .oneshot(post(
            "/produtos",
            json!({
                "nome": "Coca-Cola",
                "descricao": "Refrigerante de cola 350 ml",
                "preco": 5.45,
                "imagem_url": "cocacola.jpg",
                "estoque": 50.0,
                "categoria_id": category.categoria_id
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Product = json_body(response.into_body()).await;

    assert_eq!(created.nome, "Coca-Cola");
    assert_eq!(created.preco, Decimal::new(545, 2));
    assert_eq!(created.estoque, 50.0);

    // Reading it back returns the same record
    let response = app
        .clone()
        .oneshot(get(&format!("/produtos/{}", created.produto_id)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let fetched: Product = json_body(response.into_body()).await;
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_short_name_is_rejected_with_length_violation() {
    let app = catalog_app();
    let category = seed_category(&app).await;

    let response = app
        .clone()
        .oneshot(post(
            "/produtos",
            json!({
                "nome": "Coca",
                "descricao": "Refrigerante",
                "preco": 5.45,
                "imagem_url": "cocacola.jpg",
                "estoque": 10.0,
                "categoria_id": category.categoria_id
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;

    assert_eq!(body["error"], "VALIDATION_ERROR");
    let details = body["details"].as_array().unwrap();
    assert!(details.iter().any(|v| {
        v["field"] == "nome" && v["message"] == "O nome deve ter entre 5 e 15 caracteres"
    }));
}

#[tokio::test]
async fn test_lowercase_name_is_rejected_with_casing_violation() {
    let app = catalog_app();
    let category = seed_category(&app).await;

    let response = app
        .clone()
        .oneshot(post(
            "/produtos",
            json!({
                "nome": "coca-cola",
                "descricao": "Refrigerante",
                "preco": 5.45,
                "imagem_url": "cocacola.jpg",
                "estoque": 10.0,
                "categoria_id": category.categoria_id
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;

    let details = body["details"].as_array().unwrap();
    assert!(details.iter().any(|v| {
        v["field"] == "nome" && v["message"] == "A primeira letra do nome deve ser maiúscula"
    }));
}

#[tokio::test]
async fn test_zero_stock_is_rejected() {
    let app = catalog_app();
    let category = seed_category(&app).await;

    let response = app
        .clone()
        .oneshot(post(
            "/produtos",
            json!({
                "nome": "Coca-Cola",
                "descricao": "Refrigerante",
                "preco": 5.45,
                "imagem_url": "cocacola.jpg",
                "estoque": 0.0,
                "categoria_id": category.categoria_id
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;

    let details = body["details"].as_array().unwrap();
    assert!(details.iter().any(|v| {
        v["field"] == "estoque" && v["message"] == "O estoque deve ser maior que zero"
    }));
}

#[tokio::test]
async fn test_missing_category_reference_is_404_and_writes_nothing() {
    let app = catalog_app();
    seed_category(&app).await;

    let response = app
        .clone()
        .oneshot(post(
            "/produtos",
            json!({
                "nome": "Coca-Cola",
                "descricao": "Refrigerante",
                "preco": 5.45,
                "imagem_url": "cocacola.jpg",
                "estoque": 10.0,
                "categoria_id": 9999
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Categoria com ID 9999 não encontrada.");

    // No product row was written
    let response = app.clone().oneshot(get("/produtos")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_with_identity_mismatch_is_400() {
    let app = catalog_app();
    let category = seed_category(&app).await;

    let response = app
        .clone()
        .oneshot(put(
            "/produtos/1",
            json!({
                "produto_id": 2,
                "nome": "Coca-Cola",
                "descricao": "Refrigerante",
                "preco": 5.45,
                "imagem_url": "cocacola.jpg",
                "estoque": 10.0,
                "categoria_id": category.categoria_id
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_categories_empty_is_404_with_message() {
    let app = catalog_app();

    let response = app.clone().oneshot(get("/categorias")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Nenhuma categoria encontrada.");
}

#[tokio::test]
async fn test_category_crud_and_cascade_delete() {
    let app = catalog_app();
    let category = seed_category(&app).await;

    // Two products referencing the category
    for nome in ["Coca-Cola", "Guaraná"] {
        let response = app
            .clone()
            .oneshot(post(
                "/produtos",
                json!({
                    "nome": nome,
                    "descricao": "Refrigerante 350 ml",
                    "preco": 5.45,
                    "imagem_url": "refri.jpg",
                    "estoque": 20.0,
                    "categoria_id": category.categoria_id
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    // Rename the category
    let response = app
        .clone()
        .oneshot(put(
            &format!("/categorias/{}", category.categoria_id),
            json!({"categoria_id": category.categoria_id, "nome": "Refrigerantes"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let renamed: Category = json_body(response.into_body()).await;
    assert_eq!(renamed.nome, "Refrigerantes");
    assert_eq!(renamed.imagem_url, category.imagem_url);

    // The eager join lists both products under it
    let response = app
        .clone()
        .oneshot(get("/categorias/produtos"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let joined: Vec<CategoryWithProducts> = json_body(response.into_body()).await;
    assert_eq!(joined.len(), 1);
    assert_eq!(joined[0].produtos.len(), 2);

    // Cascade delete returns the category and removes its products
    let response = app
        .clone()
        .oneshot(delete(&format!("/categorias/{}", category.categoria_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let deleted: Category = json_body(response.into_body()).await;
    assert_eq!(deleted.categoria_id, category.categoria_id);

    let response = app
        .clone()
        .oneshot(get(&format!("/categorias/{}", category.categoria_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.clone().oneshot(get("/produtos")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_missing_product_is_404() {
    let app = catalog_app();

    let response = app.clone().oneshot(delete("/produtos/77")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Produto com ID 77 não encontrado.");
}

#[tokio::test]
async fn test_malformed_json_body_is_rejected() {
    let app = catalog_app();

    let request = Request::builder()
        .method("POST")
        .uri("/categorias")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
