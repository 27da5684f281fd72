use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Category - grouping entity that owns zero or more Products
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    /// Unique identifier, assigned by the store
    pub categoria_id: i32,
    /// Category name
    pub nome: String,
    /// Image reference
    pub imagem_url: String,
}

/// A Category together with the Products that reference it.
///
/// This is the result of an explicit eager-join query; the Product side
/// never carries a back-pointer to a live Category object.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryWithProducts {
    pub categoria_id: i32,
    pub nome: String,
    pub imagem_url: String,
    pub produtos: Vec<Product>,
}

impl CategoryWithProducts {
    pub fn new(category: Category, produtos: Vec<Product>) -> Self {
        Self {
            categoria_id: category.categoria_id,
            nome: category.nome,
            imagem_url: category.imagem_url,
            produtos,
        }
    }
}

/// DTO for creating a new Category
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCategory {
    #[validate(length(min = 1, max = 80, message = "O nome deve ter entre 1 e 80 caracteres"))]
    pub nome: String,
    #[validate(length(
        min = 1,
        max = 300,
        message = "A imagem deve ter no máximo 300 caracteres"
    ))]
    pub imagem_url: String,
}

/// DTO for updating a Category.
///
/// The name is the only editable attribute; the body identity must match
/// the path identity.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateCategory {
    pub categoria_id: i32,
    #[validate(length(min = 1, max = 80, message = "O nome deve ter entre 1 e 80 caracteres"))]
    pub nome: String,
}

/// Product - catalog item belonging to exactly one Category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Unique identifier, assigned by the store
    pub produto_id: i32,
    pub nome: String,
    pub descricao: String,
    pub preco: Decimal,
    pub imagem_url: String,
    pub estoque: f32,
    /// Registration timestamp, set by the server at creation
    pub data_cadastro: DateTime<Utc>,
    /// Owning category (lookup key, never an embedded object)
    pub categoria_id: i32,
}

/// DTO for creating a new Product.
///
/// Field and cross-field rules are checked by the service through
/// [`crate::validation`], not by a derive; the Category reference is
/// resolved before any row is written.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateProduct {
    pub nome: String,
    pub descricao: String,
    pub preco: Decimal,
    pub imagem_url: String,
    pub estoque: f32,
    pub categoria_id: i32,
}

/// DTO for updating a Product: full replacement of the mutable fields.
///
/// The body carries the identity and it must match the path; the
/// registration timestamp is not replaceable.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateProduct {
    pub produto_id: i32,
    pub nome: String,
    pub descricao: String,
    pub preco: Decimal,
    pub imagem_url: String,
    pub estoque: f32,
    pub categoria_id: i32,
}
