use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// SeaORM entity for the `categorias` table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "categorias")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub categoria_id: i32,
    #[sea_orm(column_type = "String(StringLen::N(80))")]
    pub nome: String,
    #[sea_orm(column_type = "String(StringLen::N(300))")]
    pub imagem_url: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::produtos::Entity")]
    Produtos,
}

impl Related<super::produtos::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Produtos.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::Category {
    fn from(model: Model) -> Self {
        Self {
            categoria_id: model.categoria_id,
            nome: model.nome,
            imagem_url: model.imagem_url,
        }
    }
}

// Conversion from CreateCategory to an ActiveModel; the identity is
// assigned by the store.
impl From<crate::models::CreateCategory> for ActiveModel {
    fn from(input: crate::models::CreateCategory) -> Self {
        ActiveModel {
            nome: Set(input.nome),
            imagem_url: Set(input.imagem_url),
            ..Default::default()
        }
    }
}
