pub use sea_orm_migration::prelude::*;

mod m20250131_000001_create_categorias;
mod m20250131_000002_create_produtos;
mod m20250131_000003_seed_catalog;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250131_000001_create_categorias::Migration),
            Box::new(m20250131_000002_create_produtos::Migration),
            Box::new(m20250131_000003_seed_catalog::Migration),
        ]
    }
}
