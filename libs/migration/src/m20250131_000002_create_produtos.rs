use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250131_000001_create_categorias::Categorias;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Produtos::Table)
                    .if_not_exists()
                    .col(pk_auto(Produtos::ProdutoId))
                    .col(string(Produtos::Nome))
                    .col(string(Produtos::Descricao))
                    .col(decimal_len(Produtos::Preco, 10, 2))
                    .col(string_len(Produtos::ImagemUrl, 300))
                    .col(float(Produtos::Estoque))
                    .col(
                        timestamp_with_time_zone(Produtos::DataCadastro)
                            .default(Expr::current_timestamp()),
                    )
                    .col(integer(Produtos::CategoriaId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_produtos_categoria_id")
                            .from(Produtos::Table, Produtos::CategoriaId)
                            .to(Categorias::Table, Categorias::CategoriaId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_produtos_categoria_id")
                    .table(Produtos::Table)
                    .col(Produtos::CategoriaId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Produtos::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Produtos {
    Table,
    ProdutoId,
    Nome,
    Descricao,
    Preco,
    ImagemUrl,
    Estoque,
    DataCadastro,
    CategoriaId,
}
