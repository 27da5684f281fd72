use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, TransactionError,
    TransactionTrait,
};

use crate::{
    entity,
    error::{CatalogError, CatalogResult},
    models::{
        Category, CategoryWithProducts, CreateCategory, CreateProduct, Product, UpdateCategory,
        UpdateProduct,
    },
    repository::{CategoryRepository, ProductRepository},
};

pub struct PgCategoryRepository {
    base: BaseRepository<entity::categorias::Entity>,
}

impl PgCategoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn insert(&self, input: CreateCategory) -> CatalogResult<Category> {
        let active_model: entity::categorias::ActiveModel = input.into();
        let model = self.base.insert(active_model).await?;

        tracing::info!(categoria_id = model.categoria_id, "Created category");
        Ok(model.into())
    }

    async fn find_by_id(&self, id: i32) -> CatalogResult<Option<Category>> {
        let model = self.base.find_by_id(id).await?;
        Ok(model.map(|m| m.into()))
    }

    async fn find_all(&self) -> CatalogResult<Vec<Category>> {
        let models = self.base.find_all().await?;
        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn find_all_with_products(&self) -> CatalogResult<Vec<CategoryWithProducts>> {
        let rows = entity::categorias::Entity::find()
            .find_with_related(entity::produtos::Entity)
            .all(self.base.db())
            .await?;

        Ok(rows
            .into_iter()
            .map(|(category, produtos)| {
                CategoryWithProducts::new(
                    category.into(),
                    produtos.into_iter().map(|p| p.into()).collect(),
                )
            })
            .collect())
    }

    async fn replace(&self, id: i32, input: UpdateCategory) -> CatalogResult<Category> {
        let model = self
            .base
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::CategoryNotFound(id))?;

        // The name is the only editable attribute
        let active_model = entity::categorias::ActiveModel {
            categoria_id: Set(model.categoria_id),
            nome: Set(input.nome),
            imagem_url: Set(model.imagem_url),
        };

        let updated = self.base.update(active_model).await?;

        tracing::info!(categoria_id = id, "Updated category");
        Ok(updated.into())
    }

    async fn cascade_delete(&self, id: i32) -> CatalogResult<Option<Category>> {
        let Some(model) = self.base.find_by_id(id).await? else {
            return Ok(None);
        };

        // Products first, then the category, in one transaction; partial
        // completion is never an observable end state.
        self.base
            .db()
            .transaction::<_, (), DbErr>(move |txn| {
                Box::pin(async move {
                    entity::produtos::Entity::delete_many()
                        .filter(entity::produtos::Column::CategoriaId.eq(id))
                        .exec(txn)
                        .await?;

                    entity::categorias::Entity::delete_by_id(id).exec(txn).await?;

                    Ok(())
                })
            })
            .await
            .map_err(|e| match e {
                TransactionError::Connection(e) => CatalogError::Database(e),
                TransactionError::Transaction(e) => CatalogError::Database(e),
            })?;

        tracing::info!(categoria_id = id, "Deleted category with its products");
        Ok(Some(model.into()))
    }

    async fn exists(&self, id: i32) -> CatalogResult<bool> {
        let found = self.base.find_by_id(id).await?;
        Ok(found.is_some())
    }
}

pub struct PgProductRepository {
    base: BaseRepository<entity::produtos::Entity>,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn insert(&self, input: CreateProduct) -> CatalogResult<Product> {
        let active_model: entity::produtos::ActiveModel = input.into();
        let model = self.base.insert(active_model).await?;

        tracing::info!(produto_id = model.produto_id, "Created product");
        Ok(model.into())
    }

    async fn find_by_id(&self, id: i32) -> CatalogResult<Option<Product>> {
        let model = self.base.find_by_id(id).await?;
        Ok(model.map(|m| m.into()))
    }

    async fn find_all(&self) -> CatalogResult<Vec<Product>> {
        let models = self.base.find_all().await?;
        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn replace(&self, input: UpdateProduct) -> CatalogResult<Product> {
        let existing = self
            .base
            .find_by_id(input.produto_id)
            .await?
            .ok_or(CatalogError::ProductNotFound(input.produto_id))?;

        let active_model = entity::produtos::ActiveModel {
            produto_id: Set(existing.produto_id),
            nome: Set(input.nome),
            descricao: Set(input.descricao),
            preco: Set(input.preco),
            imagem_url: Set(input.imagem_url),
            estoque: Set(input.estoque),
            // Set once at creation, never replaced by the caller
            data_cadastro: Set(existing.data_cadastro),
            categoria_id: Set(input.categoria_id),
        };

        let updated = self.base.update(active_model).await?;

        tracing::info!(produto_id = updated.produto_id, "Updated product");
        Ok(updated.into())
    }

    async fn delete(&self, id: i32) -> CatalogResult<Option<Product>> {
        let Some(existing) = self.base.find_by_id(id).await? else {
            return Ok(None);
        };

        self.base.delete_by_id(id).await?;

        tracing::info!(produto_id = id, "Deleted product");
        Ok(Some(existing.into()))
    }
}
