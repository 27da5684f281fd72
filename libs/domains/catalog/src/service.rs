use std::sync::Arc;
use validator::Validate;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{
    Category, CategoryWithProducts, CreateCategory, CreateProduct, Product, UpdateCategory,
    UpdateProduct,
};
use crate::repository::{CategoryRepository, ProductRepository};
use crate::validation::{ValidationLimits, validate_product};

/// Service layer for Category business logic
#[derive(Clone)]
pub struct CategoryService<R: CategoryRepository> {
    repository: Arc<R>,
}

impl<R: CategoryRepository> CategoryService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new category
    pub async fn create_category(&self, input: CreateCategory) -> CatalogResult<Category> {
        input.validate()?;

        self.repository.insert(input).await
    }

    /// Get a category by ID
    pub async fn get_category(&self, id: i32) -> CatalogResult<Category> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::CategoryNotFound(id))
    }

    /// List all categories; an empty catalog is reported as not found,
    /// never as an empty success.
    pub async fn list_categories(&self) -> CatalogResult<Vec<Category>> {
        let categories = self.repository.find_all().await?;

        if categories.is_empty() {
            return Err(CatalogError::NoCategories);
        }

        Ok(categories)
    }

    /// List all categories with their products eagerly loaded
    pub async fn list_categories_with_products(
        &self,
    ) -> CatalogResult<Vec<CategoryWithProducts>> {
        let categories = self.repository.find_all_with_products().await?;

        if categories.is_empty() {
            return Err(CatalogError::NoCategories);
        }

        Ok(categories)
    }

    /// Update a category. The path identity must match the body identity;
    /// a mismatch fails before any store access.
    pub async fn update_category(
        &self,
        id: i32,
        input: UpdateCategory,
    ) -> CatalogResult<Category> {
        if id != input.categoria_id {
            return Err(CatalogError::IdentityMismatch {
                path: id,
                body: input.categoria_id,
            });
        }

        input.validate()?;

        self.repository.replace(id, input).await
    }

    /// Delete a category, cascading to its products. Returns the deleted
    /// category.
    pub async fn delete_category(&self, id: i32) -> CatalogResult<Category> {
        self.repository
            .cascade_delete(id)
            .await?
            .ok_or(CatalogError::CategoryNotFound(id))
    }
}

/// Service layer for Product business logic.
///
/// Every write runs, in order: identity check (updates only), the field
/// and cross-field rules, resolution of the referenced category, and only
/// then the store call.
#[derive(Clone)]
pub struct ProductService<P: ProductRepository, C: CategoryRepository> {
    products: Arc<P>,
    categories: Arc<C>,
    limits: ValidationLimits,
}

impl<P: ProductRepository, C: CategoryRepository> ProductService<P, C> {
    pub fn new(products: P, categories: C) -> Self {
        Self::with_limits(products, categories, ValidationLimits::default())
    }

    pub fn with_limits(products: P, categories: C, limits: ValidationLimits) -> Self {
        Self {
            products: Arc::new(products),
            categories: Arc::new(categories),
            limits,
        }
    }

    /// Create a new product
    pub async fn create_product(&self, input: CreateProduct) -> CatalogResult<Product> {
        let violations = validate_product(&(&input).into(), &self.limits);
        if !violations.is_empty() {
            return Err(CatalogError::Validation(violations));
        }

        self.resolve_category(input.categoria_id).await?;

        self.products.insert(input).await
    }

    /// Get a product by ID
    pub async fn get_product(&self, id: i32) -> CatalogResult<Product> {
        self.products
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::ProductNotFound(id))
    }

    /// List all products; empty is reported as not found
    pub async fn list_products(&self) -> CatalogResult<Vec<Product>> {
        let products = self.products.find_all().await?;

        if products.is_empty() {
            return Err(CatalogError::NoProducts);
        }

        Ok(products)
    }

    /// Update a product by full replacement of its mutable fields
    pub async fn update_product(&self, id: i32, input: UpdateProduct) -> CatalogResult<Product> {
        if id != input.produto_id {
            return Err(CatalogError::IdentityMismatch {
                path: id,
                body: input.produto_id,
            });
        }

        let violations = validate_product(&(&input).into(), &self.limits);
        if !violations.is_empty() {
            return Err(CatalogError::Validation(violations));
        }

        // The referenced category is resolved on update as well, so a stale
        // identity is rejected instead of written.
        self.resolve_category(input.categoria_id).await?;

        self.products.replace(input).await
    }

    /// Delete a product. Returns the deleted product.
    pub async fn delete_product(&self, id: i32) -> CatalogResult<Product> {
        self.products
            .delete(id)
            .await?
            .ok_or(CatalogError::ProductNotFound(id))
    }

    /// Confirm the referenced category exists; a missing category rejects
    /// the write without mutating store state.
    async fn resolve_category(&self, categoria_id: i32) -> CatalogResult<()> {
        if self.categories.exists(categoria_id).await? {
            Ok(())
        } else {
            Err(CatalogError::CategoryNotFound(categoria_id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{MockCategoryRepository, MockProductRepository};
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn valid_create() -> CreateProduct {
        CreateProduct {
            nome: "Coca-Cola".to_string(),
            descricao: "Refrigerante de cola 350 ml".to_string(),
            preco: Decimal::new(545, 2),
            imagem_url: "cocacola.jpg".to_string(),
            estoque: 50.0,
            categoria_id: 1,
        }
    }

    fn valid_update(produto_id: i32) -> UpdateProduct {
        UpdateProduct {
            produto_id,
            nome: "Coca-Cola".to_string(),
            descricao: "Refrigerante de cola 350 ml".to_string(),
            preco: Decimal::new(545, 2),
            imagem_url: "cocacola.jpg".to_string(),
            estoque: 50.0,
            categoria_id: 1,
        }
    }

    fn stored_product(produto_id: i32) -> Product {
        Product {
            produto_id,
            nome: "Coca-Cola".to_string(),
            descricao: "Refrigerante de cola 350 ml".to_string(),
            preco: Decimal::new(545, 2),
            imagem_url: "cocacola.jpg".to_string(),
            estoque: 50.0,
            data_cadastro: Utc::now(),
            categoria_id: 1,
        }
    }

    #[tokio::test]
    async fn test_identity_mismatch_short_circuits_before_any_store_access() {
        // No expectations on either mock: any repository call would panic.
        let products = MockProductRepository::new();
        let categories = MockCategoryRepository::new();
        let service = ProductService::new(products, categories);

        let result = service.update_product(1, valid_update(2)).await;

        assert!(matches!(
            result,
            Err(CatalogError::IdentityMismatch { path: 1, body: 2 })
        ));
    }

    #[tokio::test]
    async fn test_validation_failure_short_circuits_before_any_store_access() {
        let products = MockProductRepository::new();
        let categories = MockCategoryRepository::new();
        let service = ProductService::new(products, categories);

        let mut input = valid_create();
        input.nome = "Coca".to_string(); // 4 chars

        let result = service.create_product(input).await;

        match result {
            Err(CatalogError::Validation(violations)) => {
                assert!(violations.iter().any(|v| v.field == "nome"));
            }
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_category_rejects_create_without_insert() {
        let products = MockProductRepository::new();
        let mut categories = MockCategoryRepository::new();

        categories
            .expect_exists()
            .with(mockall::predicate::eq(9999))
            .returning(|_| Ok(false));

        let service = ProductService::new(products, categories);

        let mut input = valid_create();
        input.categoria_id = 9999;

        let result = service.create_product(input).await;
        assert!(matches!(result, Err(CatalogError::CategoryNotFound(9999))));
    }

    #[tokio::test]
    async fn test_create_resolves_category_then_inserts() {
        let mut products = MockProductRepository::new();
        let mut categories = MockCategoryRepository::new();

        categories
            .expect_exists()
            .with(mockall::predicate::eq(1))
            .returning(|_| Ok(true));
        products
            .expect_insert()
            .returning(|_| Ok(stored_product(7)));

        let service = ProductService::new(products, categories);

        let created = service.create_product(valid_create()).await.unwrap();
        assert_eq!(created.produto_id, 7);
        assert_eq!(created.estoque, 50.0);
    }

    #[tokio::test]
    async fn test_update_resolves_category_as_well() {
        let products = MockProductRepository::new();
        let mut categories = MockCategoryRepository::new();

        categories
            .expect_exists()
            .with(mockall::predicate::eq(1))
            .returning(|_| Ok(false));

        let service = ProductService::new(products, categories);

        let result = service.update_product(3, valid_update(3)).await;
        assert!(matches!(result, Err(CatalogError::CategoryNotFound(1))));
    }

    #[tokio::test]
    async fn test_stock_rule_rejects_zero() {
        let products = MockProductRepository::new();
        let categories = MockCategoryRepository::new();
        let service = ProductService::new(products, categories);

        let mut input = valid_create();
        input.estoque = 0.0;

        let result = service.create_product(input).await;

        match result {
            Err(CatalogError::Validation(violations)) => {
                assert_eq!(violations.len(), 1);
                assert_eq!(violations[0].field, "estoque");
            }
            other => panic!("expected stock violation, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_list_products_empty_is_not_found() {
        let mut products = MockProductRepository::new();
        let categories = MockCategoryRepository::new();

        products.expect_find_all().returning(|| Ok(vec![]));

        let service = ProductService::new(products, categories);

        let result = service.list_products().await;
        assert!(matches!(result, Err(CatalogError::NoProducts)));
    }

    #[tokio::test]
    async fn test_category_update_identity_mismatch() {
        let categories = MockCategoryRepository::new();
        let service = CategoryService::new(categories);

        let input = UpdateCategory {
            categoria_id: 5,
            nome: "Bebidas".to_string(),
        };

        let result = service.update_category(4, input).await;
        assert!(matches!(
            result,
            Err(CatalogError::IdentityMismatch { path: 4, body: 5 })
        ));
    }

    #[tokio::test]
    async fn test_list_categories_empty_is_not_found() {
        let mut categories = MockCategoryRepository::new();
        categories.expect_find_all().returning(|| Ok(vec![]));

        let service = CategoryService::new(categories);

        let result = service.list_categories().await;
        assert!(matches!(result, Err(CatalogError::NoCategories)));
        assert_eq!(
            result.unwrap_err().to_string(),
            "Nenhuma categoria encontrada."
        );
    }
}
