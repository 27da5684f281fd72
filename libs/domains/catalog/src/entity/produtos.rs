use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// SeaORM entity for the `produtos` table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "produtos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub produto_id: i32,
    pub nome: String,
    pub descricao: String,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub preco: Decimal,
    #[sea_orm(column_type = "String(StringLen::N(300))")]
    pub imagem_url: String,
    pub estoque: f32,
    pub data_cadastro: DateTimeWithTimeZone,
    pub categoria_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::categorias::Entity",
        from = "Column::CategoriaId",
        to = "super::categorias::Column::CategoriaId",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Categorias,
}

impl Related<super::categorias::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categorias.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::Product {
    fn from(model: Model) -> Self {
        Self {
            produto_id: model.produto_id,
            nome: model.nome,
            descricao: model.descricao,
            preco: model.preco,
            imagem_url: model.imagem_url,
            estoque: model.estoque,
            data_cadastro: model.data_cadastro.into(),
            categoria_id: model.categoria_id,
        }
    }
}

// Conversion from CreateProduct to an ActiveModel; the identity comes from
// the store, the registration timestamp from the server clock.
impl From<crate::models::CreateProduct> for ActiveModel {
    fn from(input: crate::models::CreateProduct) -> Self {
        ActiveModel {
            nome: Set(input.nome),
            descricao: Set(input.descricao),
            preco: Set(input.preco),
            imagem_url: Set(input.imagem_url),
            estoque: Set(input.estoque),
            data_cadastro: Set(chrono::Utc::now().into()),
            categoria_id: Set(input.categoria_id),
            ..Default::default()
        }
    }
}
