use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{
    Category, CategoryWithProducts, CreateCategory, CreateProduct, Product, UpdateCategory,
    UpdateProduct,
};

/// Repository trait for Category persistence and the Category↔Product
/// relation queries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Insert a new category, returning it with its assigned identity
    async fn insert(&self, input: CreateCategory) -> CatalogResult<Category>;

    /// Get a category by ID
    async fn find_by_id(&self, id: i32) -> CatalogResult<Option<Category>>;

    /// List all categories
    async fn find_all(&self) -> CatalogResult<Vec<Category>>;

    /// List all categories with their products eagerly loaded
    async fn find_all_with_products(&self) -> CatalogResult<Vec<CategoryWithProducts>>;

    /// Replace the mutable fields of an existing category
    async fn replace(&self, id: i32, input: UpdateCategory) -> CatalogResult<Category>;

    /// Delete a category and, atomically, every product referencing it.
    /// Returns the deleted category, or None if it did not exist.
    async fn cascade_delete(&self, id: i32) -> CatalogResult<Option<Category>>;

    /// Check whether a category exists (referential-integrity probe)
    async fn exists(&self, id: i32) -> CatalogResult<bool>;
}

/// Repository trait for Product persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a new product, returning it with its assigned identity and
    /// server-set registration timestamp
    async fn insert(&self, input: CreateProduct) -> CatalogResult<Product>;

    /// Get a product by ID
    async fn find_by_id(&self, id: i32) -> CatalogResult<Option<Product>>;

    /// List all products (store order, no guarantee)
    async fn find_all(&self) -> CatalogResult<Vec<Product>>;

    /// Replace the mutable fields of an existing product; the registration
    /// timestamp is preserved
    async fn replace(&self, input: UpdateProduct) -> CatalogResult<Product>;

    /// Delete a product by ID, returning it, or None if it did not exist
    async fn delete(&self, id: i32) -> CatalogResult<Option<Product>>;
}

#[derive(Debug, Default)]
struct CatalogStore {
    categories: BTreeMap<i32, Category>,
    products: BTreeMap<i32, Product>,
    next_category_id: i32,
    next_product_id: i32,
}

/// In-memory catalog store (for development/testing).
///
/// Both repository halves share the same store behind one lock, so foreign
/// key checks and cascade deletes behave like the relational store.
#[derive(Debug, Default, Clone)]
pub struct InMemoryCatalog {
    store: Arc<RwLock<CatalogStore>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn categories(&self) -> InMemoryCategoryRepository {
        InMemoryCategoryRepository {
            store: self.store.clone(),
        }
    }

    pub fn products(&self) -> InMemoryProductRepository {
        InMemoryProductRepository {
            store: self.store.clone(),
        }
    }
}

/// In-memory implementation of CategoryRepository
#[derive(Debug, Clone)]
pub struct InMemoryCategoryRepository {
    store: Arc<RwLock<CatalogStore>>,
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn insert(&self, input: CreateCategory) -> CatalogResult<Category> {
        let mut store = self.store.write().await;

        store.next_category_id += 1;
        let category = Category {
            categoria_id: store.next_category_id,
            nome: input.nome,
            imagem_url: input.imagem_url,
        };
        store.categories.insert(category.categoria_id, category.clone());

        tracing::info!(categoria_id = category.categoria_id, "Created category");
        Ok(category)
    }

    async fn find_by_id(&self, id: i32) -> CatalogResult<Option<Category>> {
        let store = self.store.read().await;
        Ok(store.categories.get(&id).cloned())
    }

    async fn find_all(&self) -> CatalogResult<Vec<Category>> {
        let store = self.store.read().await;
        Ok(store.categories.values().cloned().collect())
    }

    async fn find_all_with_products(&self) -> CatalogResult<Vec<CategoryWithProducts>> {
        let store = self.store.read().await;

        Ok(store
            .categories
            .values()
            .map(|category| {
                let produtos = store
                    .products
                    .values()
                    .filter(|p| p.categoria_id == category.categoria_id)
                    .cloned()
                    .collect();
                CategoryWithProducts::new(category.clone(), produtos)
            })
            .collect())
    }

    async fn replace(&self, id: i32, input: UpdateCategory) -> CatalogResult<Category> {
        let mut store = self.store.write().await;

        let category = store
            .categories
            .get_mut(&id)
            .ok_or(CatalogError::CategoryNotFound(id))?;
        category.nome = input.nome;
        let updated = category.clone();

        tracing::info!(categoria_id = id, "Updated category");
        Ok(updated)
    }

    async fn cascade_delete(&self, id: i32) -> CatalogResult<Option<Category>> {
        // One write lock covers both removals, so no partial state is
        // observable.
        let mut store = self.store.write().await;

        let Some(category) = store.categories.remove(&id) else {
            return Ok(None);
        };
        store.products.retain(|_, p| p.categoria_id != id);

        tracing::info!(categoria_id = id, "Deleted category with its products");
        Ok(Some(category))
    }

    async fn exists(&self, id: i32) -> CatalogResult<bool> {
        let store = self.store.read().await;
        Ok(store.categories.contains_key(&id))
    }
}

/// In-memory implementation of ProductRepository
#[derive(Debug, Clone)]
pub struct InMemoryProductRepository {
    store: Arc<RwLock<CatalogStore>>,
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn insert(&self, input: CreateProduct) -> CatalogResult<Product> {
        let mut store = self.store.write().await;

        // The relational store enforces this through the foreign key
        if !store.categories.contains_key(&input.categoria_id) {
            return Err(CatalogError::CategoryNotFound(input.categoria_id));
        }

        store.next_product_id += 1;
        let product = Product {
            produto_id: store.next_product_id,
            nome: input.nome,
            descricao: input.descricao,
            preco: input.preco,
            imagem_url: input.imagem_url,
            estoque: input.estoque,
            data_cadastro: Utc::now(),
            categoria_id: input.categoria_id,
        };
        store.products.insert(product.produto_id, product.clone());

        tracing::info!(produto_id = product.produto_id, "Created product");
        Ok(product)
    }

    async fn find_by_id(&self, id: i32) -> CatalogResult<Option<Product>> {
        let store = self.store.read().await;
        Ok(store.products.get(&id).cloned())
    }

    async fn find_all(&self) -> CatalogResult<Vec<Product>> {
        let store = self.store.read().await;
        Ok(store.products.values().cloned().collect())
    }

    async fn replace(&self, input: UpdateProduct) -> CatalogResult<Product> {
        let mut store = self.store.write().await;

        if !store.categories.contains_key(&input.categoria_id) {
            return Err(CatalogError::CategoryNotFound(input.categoria_id));
        }

        let product = store
            .products
            .get_mut(&input.produto_id)
            .ok_or(CatalogError::ProductNotFound(input.produto_id))?;

        product.nome = input.nome;
        product.descricao = input.descricao;
        product.preco = input.preco;
        product.imagem_url = input.imagem_url;
        product.estoque = input.estoque;
        product.categoria_id = input.categoria_id;
        let updated = product.clone();

        tracing::info!(produto_id = updated.produto_id, "Updated product");
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> CatalogResult<Option<Product>> {
        let mut store = self.store.write().await;

        let removed = store.products.remove(&id);
        if removed.is_some() {
            tracing::info!(produto_id = id, "Deleted product");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn create_category() -> CreateCategory {
        CreateCategory {
            nome: "Bebidas".to_string(),
            imagem_url: "bebidas.jpg".to_string(),
        }
    }

    fn create_product(categoria_id: i32) -> CreateProduct {
        CreateProduct {
            nome: "Coca-Cola".to_string(),
            descricao: "Refrigerante de cola 350 ml".to_string(),
            preco: Decimal::new(545, 2),
            imagem_url: "cocacola.jpg".to_string(),
            estoque: 50.0,
            categoria_id,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get_category() {
        let catalog = InMemoryCatalog::new();
        let repo = catalog.categories();

        let category = repo.insert(create_category()).await.unwrap();
        assert_eq!(category.nome, "Bebidas");

        let fetched = repo.find_by_id(category.categoria_id).await.unwrap();
        assert_eq!(fetched, Some(category));
    }

    #[tokio::test]
    async fn test_product_insert_requires_existing_category() {
        let catalog = InMemoryCatalog::new();
        let products = catalog.products();

        let result = products.insert(create_product(9999)).await;
        assert!(matches!(result, Err(CatalogError::CategoryNotFound(9999))));

        let all = products.find_all().await.unwrap();
        assert!(all.is_empty(), "no orphan row may be written");
    }

    #[tokio::test]
    async fn test_cascade_delete_removes_category_and_products() {
        let catalog = InMemoryCatalog::new();
        let categories = catalog.categories();
        let products = catalog.products();

        let category = categories.insert(create_category()).await.unwrap();
        for _ in 0..3 {
            products
                .insert(create_product(category.categoria_id))
                .await
                .unwrap();
        }

        let deleted = categories
            .cascade_delete(category.categoria_id)
            .await
            .unwrap();
        assert_eq!(deleted.map(|c| c.categoria_id), Some(category.categoria_id));

        assert!(
            categories
                .find_by_id(category.categoria_id)
                .await
                .unwrap()
                .is_none()
        );
        assert!(products.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cascade_delete_missing_category_is_none() {
        let catalog = InMemoryCatalog::new();
        let deleted = catalog.categories().cascade_delete(42).await.unwrap();
        assert!(deleted.is_none());
    }

    #[tokio::test]
    async fn test_replace_preserves_registration_timestamp() {
        let catalog = InMemoryCatalog::new();
        let categories = catalog.categories();
        let products = catalog.products();

        let category = categories.insert(create_category()).await.unwrap();
        let created = products
            .insert(create_product(category.categoria_id))
            .await
            .unwrap();

        let updated = products
            .replace(UpdateProduct {
                produto_id: created.produto_id,
                nome: "Coca-Zero".to_string(),
                descricao: created.descricao.clone(),
                preco: Decimal::new(625, 2),
                imagem_url: created.imagem_url.clone(),
                estoque: 12.0,
                categoria_id: created.categoria_id,
            })
            .await
            .unwrap();

        assert_eq!(updated.nome, "Coca-Zero");
        assert_eq!(updated.data_cadastro, created.data_cadastro);
    }
}
