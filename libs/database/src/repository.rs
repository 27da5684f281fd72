//! Generic repository over any SeaORM entity.
//!
//! `BaseRepository` is the single place row-level create/read/update/delete
//! goes through. Each method is one statement against the store; retries,
//! pooling policy, and caching stay with the connection layer.

use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, PrimaryKeyTrait,
};
use std::marker::PhantomData;

/// Generic repository providing basic CRUD operations for a SeaORM entity.
///
/// Domain repositories wrap this and add their entity-specific queries,
/// using [`BaseRepository::db`] for anything beyond plain CRUD.
///
/// # Example
/// ```ignore
/// use database::BaseRepository;
///
/// struct PgCategoryRepository {
///     base: BaseRepository<entity::categorias::Entity>,
/// }
/// ```
pub struct BaseRepository<E: EntityTrait> {
    db: DatabaseConnection,
    _entity: PhantomData<E>,
}

impl<E: EntityTrait> BaseRepository<E> {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }

    /// Access the underlying connection for entity-specific queries.
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Insert a new row, returning the stored model with its assigned identity.
    pub async fn insert<A>(&self, model: A) -> Result<E::Model, DbErr>
    where
        A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
        E::Model: IntoActiveModel<A>,
    {
        model.insert(&self.db).await
    }

    /// Fetch a row by primary key.
    pub async fn find_by_id(
        &self,
        id: <E::PrimaryKey as PrimaryKeyTrait>::ValueType,
    ) -> Result<Option<E::Model>, DbErr> {
        E::find_by_id(id).one(&self.db).await
    }

    /// Fetch all rows. Ordering is whatever the store returns.
    pub async fn find_all(&self) -> Result<Vec<E::Model>, DbErr> {
        E::find().all(&self.db).await
    }

    /// Update an existing row, returning the stored model.
    pub async fn update<A>(&self, model: A) -> Result<E::Model, DbErr>
    where
        A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
        E::Model: IntoActiveModel<A>,
    {
        model.update(&self.db).await
    }

    /// Delete a row by primary key, returning the number of rows affected.
    pub async fn delete_by_id(
        &self,
        id: <E::PrimaryKey as PrimaryKeyTrait>::ValueType,
    ) -> Result<u64, DbErr> {
        let result = E::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    mod widgets {
        use sea_orm::entity::prelude::*;

        #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
        #[sea_orm(table_name = "widgets")]
        pub struct Model {
            #[sea_orm(primary_key)]
            pub id: i32,
            pub name: String,
        }

        #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
        pub enum Relation {}

        impl ActiveModelBehavior for ActiveModel {}
    }

    #[tokio::test]
    async fn test_find_by_id_returns_model() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![widgets::Model {
                id: 1,
                name: "one".to_owned(),
            }]])
            .into_connection();

        let repo = BaseRepository::<widgets::Entity>::new(db);
        let found = repo.find_by_id(1).await.unwrap();
        assert_eq!(
            found,
            Some(widgets::Model {
                id: 1,
                name: "one".to_owned(),
            })
        );
    }

    #[tokio::test]
    async fn test_find_by_id_missing_returns_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<widgets::Model>::new()])
            .into_connection();

        let repo = BaseRepository::<widgets::Entity>::new(db);
        let found = repo.find_by_id(99).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_delete_by_id_reports_rows_affected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let repo = BaseRepository::<widgets::Entity>::new(db);
        assert_eq!(repo.delete_by_id(1).await.unwrap(), 1);
    }
}
