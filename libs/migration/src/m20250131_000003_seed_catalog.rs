use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(
            "INSERT INTO categorias (nome, imagem_url) VALUES \
             ('Bebidas', 'bebidas.jpg'), \
             ('Lanches', 'Lanches.jpg'), \
             ('Sobremesas', 'Sobremesas.jpg')",
        )
        .await?;

        db.execute_unprepared(
            "INSERT INTO produtos (nome, descricao, preco, imagem_url, estoque, data_cadastro, categoria_id) \
             VALUES ('Coca-cola Diet', 'Refrigerante de cola 350 ml', 5.45, 'cocacola.jpg', 50, now(), \
             (SELECT categoria_id FROM categorias WHERE nome = 'Bebidas'))",
        )
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared("DELETE FROM produtos").await?;
        db.execute_unprepared("DELETE FROM categorias").await?;

        Ok(())
    }
}
